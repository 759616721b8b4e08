pub mod application;
pub mod cli;
pub mod client;
pub mod daemon;
pub mod domain;
pub mod infrastructure;
