//! Startup helpers shared by front ends
//!
//! - Configuration loading
//! - Backend construction

pub mod config;
pub mod services;

pub use config::load_config;
pub use services::init_backend;
