pub mod compose;
pub mod config;
pub mod runtime;
pub mod tracing;
