pub mod error;
pub mod field;
pub mod record;
pub mod schema;
pub mod table;
