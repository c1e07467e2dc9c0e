pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod logging;
pub mod types;
