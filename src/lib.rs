pub mod config;
pub mod error;
pub mod flight;
pub mod gap;
pub mod import;
pub mod loader;
pub mod matcher;
pub mod store;
pub mod task;
