/// Module containing environment and secret-file readers
pub mod config;
/// Module containing logging utilities
pub mod logger;

pub use logger::*;
