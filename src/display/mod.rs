//! Display formatting for terminal output
//!
//! Provides utilities for formatting bundle listings and the backup
//! configuration for terminal display.

pub mod bundle;

pub use bundle::{format_age, format_bundle_list, format_interval, format_parameters, format_size};
