pub mod analyzer;
pub mod chain;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod explorer;
pub mod listing;
pub mod logger;
pub mod output;
pub mod throttle;
pub mod types;

pub use error::{Result, ScoutError};
