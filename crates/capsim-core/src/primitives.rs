//! # Primitives Module
//!
//! Shared constants and small pure helpers used across the engine.

/// Upper bound on the number of stakeholders accepted by strict validation.
///
/// The simulator itself is O(n) and happily processes more; the bound exists
/// so that callers feeding untrusted input get a hard stop at a sane size.
pub const MAX_STAKEHOLDERS: usize = 4096;

/// Absolute tolerance for percentage comparisons in tests and invariants.
pub const PCT_TOLERANCE: f64 = 1e-6;

/// Lowercase kebab-case id material derived from a display name.
///
/// ASCII alphanumerics are kept, everything else collapses into single
/// dashes. A name with no usable characters falls back to `"round"` so
/// derived ids are never empty.
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if out.is_empty() {
        out.push_str("round");
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================
