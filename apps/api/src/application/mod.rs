pub mod get_textile;
pub mod search_textiles;
