pub mod health;
pub mod search;
pub mod textiles;
