pub mod api;
pub mod product;
