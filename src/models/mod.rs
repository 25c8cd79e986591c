pub mod offer;
pub mod table;
