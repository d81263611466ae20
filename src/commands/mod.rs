//! Command implementations for Simbundle CLI

pub mod bundle;
pub mod check;
pub mod completions;
pub mod deps;
pub mod helpers;
pub mod version;
