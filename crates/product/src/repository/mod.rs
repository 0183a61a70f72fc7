pub mod connector;
pub mod product;

#[cfg(test)]
pub mod memory;
