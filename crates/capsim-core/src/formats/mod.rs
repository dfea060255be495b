//! # Formats Module
//!
//! Serialization and format handling for cap-table snapshots.
//!
//! This module contains:
//! - Canonical binary snapshot format (postcard + header)
//! - Optional integrity digest behind the `crypto-hash` feature
//!
//! Note: File I/O operations remain in the app layer (apps/capsim).
//! This module only handles format conversion (pure transformations).

mod canonical;

pub use canonical::*;
