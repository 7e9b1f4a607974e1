pub mod bellman;
pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod policy;
pub mod report;
pub mod solve;
pub mod value_iteration;

#[cfg(test)]
mod tests;
