pub mod connection;
pub mod cors;
pub mod payload;
