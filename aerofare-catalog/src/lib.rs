pub mod airlines;
pub mod airports;
pub mod geo;
