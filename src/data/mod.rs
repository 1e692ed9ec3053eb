//! Report ingestion and the in-memory observation table.

pub mod dataset;
pub mod loader;

pub use dataset::{Dataset, Observation};
