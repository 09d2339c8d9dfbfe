//! Shared utility functions

pub mod path;
