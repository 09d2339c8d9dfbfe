//! Build tree module
//!
//! Loads `.bld` build description files and assembles them into the
//! dependency tree the compile stages walk

pub mod builder;
pub mod tree;

pub use builder::*;
pub use tree::*;
