//! Run the dispatched `sum16` kernel.

use anyhow::{anyhow, Context, Result};

use crate::kernels::{sum16, SUM16};

/// Sum sixteen values (1 through 16 by default) and report the variant used.
pub fn execute(values: Option<Vec<f32>>) -> Result<()> {
    let values: [f32; 16] = match values {
        None => core::array::from_fn(|i| (i + 1) as f32),
        Some(values) => values
            .as_slice()
            .try_into()
            .map_err(|_| anyhow!("expected 16 values, got {}", values.len()))?,
    };

    // Resolve up front so an unsupported host is an error, not a panic.
    SUM16
        .try_entry()
        .with_context(|| format!("cannot run `{}` on this processor", SUM16.name()))?;
    let total = sum16(&values);

    if let Some(tier) = SUM16.selected() {
        tracing::info!(function = SUM16.name(), %tier, "dispatched");
        println!("Variant: {tier}");
    }
    println!("Sum:     {total}");

    Ok(())
}
