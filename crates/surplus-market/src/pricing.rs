//! Shared pricing and code-generation helpers.
//!
//! All money amounts are whole currency units; rounding is to the nearest
//! unit.

use rand::Rng;

/// Share of each order retained by the marketplace operator.
pub const PLATFORM_FEE_RATE: f64 = 0.15;

/// Percentage saved versus the original price, rounded to the nearest
/// integer.
///
/// Callers guarantee `discounted < original` (enforced at listing
/// creation/update), so the result is always in `1..=100`.
pub fn discount_percentage(original: u32, discounted: u32) -> u32 {
    (((original - discounted) as f64 / original as f64) * 100.0).round() as u32
}

/// Splits an order total into (platform fee, restaurant earnings).
pub fn fee_split(total: u32) -> (u32, u32) {
    let fee = (total as f64 * PLATFORM_FEE_RATE).round() as u32;
    (fee, total - fee)
}

/// Generates a 6-digit numeric pickup code in `100000..=999999`.
///
/// Uniqueness is not guaranteed here; the order store enforces it, and the
/// order client regenerates on collision.
pub fn generate_pickup_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

/// Whether a string is a well-formed pickup code.
pub fn is_valid_pickup_code(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit()) && !code.starts_with('0')
}
