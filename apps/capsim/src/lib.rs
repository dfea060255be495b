//! # Capsim Library
//!
//! This library exposes the capsim modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;

// Re-export capsim_core for convenience
pub use capsim_core;
