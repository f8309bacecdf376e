pub mod backend;
pub mod bootstrap;
pub mod capability;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod service;

#[cfg(test)]
pub mod test_helpers;

pub use config::Config;
pub use error::{Error, Result};
