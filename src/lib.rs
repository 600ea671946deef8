pub mod config;
pub mod error;
pub mod evals;
pub mod handler;
pub mod metrics;
pub mod mock;
pub mod nl;
pub mod structures;
pub mod suite;
