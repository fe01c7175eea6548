// Library module to expose code for integration tests

pub mod generator;
pub mod models;
pub mod rng;
pub mod writer;

#[cfg(test)]
mod generator_tests;
