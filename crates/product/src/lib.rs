pub mod abstract_trait;
pub mod di;
pub mod domain;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod repository;
pub mod serverless;
pub mod service;
pub mod state;

pub const SERVICE_NAME: &str = "product-catalog";
