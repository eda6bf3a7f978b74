pub mod config;
pub mod generator;
pub mod metadata;
pub mod pool;
pub mod stats;

#[cfg(test)]
mod generator_tests;

pub use config::*;
pub use generator::*;
pub use metadata::*;
pub use stats::*;
