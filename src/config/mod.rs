//! Configuration loading and management for the work time engine.
//!
//! The configuration is read once at startup and passed explicitly to every
//! caller; nothing in the engine reads it from global state.
//!
//! # Example
//!
//! ```no_run
//! use worktime_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./worktime.yaml").unwrap();
//! println!("Region: {}", loader.config().region);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DEFAULT_HOLIDAY_PATH, DEFAULT_REGION, WorktimeConfig};
