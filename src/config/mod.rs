//! Configuration module for Portal-Import
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. All settings have built-in defaults describing the rea.ru source,
//! so the config file is optional.
//!
//! # Example
//!
//! ```no_run
//! use portal_import::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("import.toml")).unwrap();
//! println!("Importing from: {}", config.source.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HttpConfig, ImportConfig, OutputConfig, RetryConfig, SectionConfig, SourceConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
