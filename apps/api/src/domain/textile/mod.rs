pub mod entity;
pub mod errors;
pub mod facets;
pub mod filters;
pub mod query;
pub mod repository;
pub mod value_objects;
