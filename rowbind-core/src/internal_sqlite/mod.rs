pub mod connection;
pub mod rows;
pub mod statement;
