//! CLI command implementations.

pub mod common;
pub mod curve;
pub mod modes;
pub mod params;
pub mod process;
