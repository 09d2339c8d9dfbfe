//! Operations module
//!
//! Sub-command implementations and the shell runner they share

pub mod compile;
pub mod shell;

pub use compile::*;
pub use shell::*;
