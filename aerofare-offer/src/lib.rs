pub mod composer;
pub mod generator;
pub mod models;
pub mod random;
