pub mod dates;
pub mod readings;
pub mod table;
