//! Deterministic result reference.
//!
//! `reference = xxhash64(home_cents | vehicle_cents | savings_cents |
//! income_cents | life_cents | current_label | tier_label)`
//!
//! Amounts are hashed as whole cents, never as raw f64 bits, so `"1000"`
//! and `"1000.001"` from the form give the same reference.

use xxhash_rust::xxh64::xxh64;

use super::amount::AssetAmount;
use super::assets::AssetInput;
use super::tiers::CoverageTier;

/// Hash the canonical fields of an estimate.
pub fn compute_reference(input: &AssetInput, tier: CoverageTier) -> u64 {
    // 0xFF never appears in UTF-8, so it separates fields unambiguously.
    let mut buf = Vec::with_capacity(96);

    for amount in [
        input.home_value,
        input.vehicle_value,
        input.savings_value,
        input.income_value,
        input.life_insurance,
    ] {
        buf.extend_from_slice(&whole_cents(amount).to_le_bytes());
        buf.push(0xFF);
    }
    buf.extend_from_slice(input.current_coverage.label().as_bytes());
    buf.push(0xFF);
    buf.extend_from_slice(tier.label().as_bytes());

    xxh64(&buf, 0)
}

/// Format a reference as 16 lowercase hex digits.
pub fn format_reference(reference: u64) -> String {
    format!("{reference:016x}")
}

fn whole_cents(amount: AssetAmount) -> u64 {
    // Saturating cast; amounts are already finite and non-negative.
    (amount.value() * 100.0).round() as u64
}
