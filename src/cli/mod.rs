//! Command-line interface module
//!
//! Handles argument parsing and sub-command registration

pub mod args;

pub use args::*;
