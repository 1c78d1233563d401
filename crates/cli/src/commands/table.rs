//! Print the `(N, T)` to vector type table.

use anyhow::{ensure, Result};
use tier_lanes::MAPPING;

/// Print every mapping row, optionally only those of one register width.
pub fn execute(bits: Option<usize>) -> Result<()> {
    if let Some(bits) = bits {
        ensure!(
            matches!(bits, 128 | 256 | 512),
            "register width must be 128, 256 or 512, got {bits}"
        );
    }

    println!(
        "{:>5}  {:<4}  {:>4}  {:<8}  {:<8}",
        "lanes", "type", "bits", "vector", "mask"
    );
    for row in MAPPING
        .iter()
        .filter(|row| bits.map_or(true, |bits| row.total_bits == bits))
    {
        println!(
            "{:>5}  {:<4}  {:>4}  {:<8}  {:<8}",
            row.lanes, row.element, row.total_bits, row.vector, row.mask
        );
    }

    Ok(())
}
