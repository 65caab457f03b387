pub mod shared;
pub mod textile;
