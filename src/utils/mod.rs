//! Utility modules.

pub mod exec;
pub mod hash;
pub mod path;
