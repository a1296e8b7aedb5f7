pub mod pricing;
pub mod repository;
