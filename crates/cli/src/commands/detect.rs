//! Host detection report.

use anyhow::Result;
use tier_dispatch::{detect_level, CpuFeatures, DispatchConfig, InstructionSet, MAX_ISA_ENV};

/// Print the detected tier, the compiled baseline and every probed feature.
pub fn execute() -> Result<()> {
    let features = CpuFeatures::detect();
    let config = DispatchConfig::from_env();
    let raw = features.instruction_set();
    let level = detect_level();

    println!("Instruction Set");
    println!("───────────────");
    println!("Detected:  {} (level {})", level, level.level());
    if raw != level {
        println!("Hardware:  {} (level {})", raw, raw.level());
    }
    println!(
        "Compiled:  {} (level {})",
        InstructionSet::compiled(),
        InstructionSet::compiled().level()
    );
    if !level.target_features().is_empty() {
        println!("Enables:   {}", level.target_features().join(", "));
    }
    match config.max_instruction_set {
        Some(cap) => println!("Cap:       {cap} (from {MAX_ISA_ENV})"),
        None => println!("Cap:       none"),
    }
    println!();

    println!("Features");
    println!("────────");
    let rows = [
        ("sse", features.has_sse),
        ("sse2", features.has_sse2),
        ("sse3", features.has_sse3),
        ("ssse3", features.has_ssse3),
        ("sse4.1", features.has_sse4_1),
        ("sse4.2", features.has_sse4_2),
        ("avx", features.has_avx),
        ("avx2", features.has_avx2),
        ("fma", features.has_fma),
        ("avx512f", features.has_avx512_f),
        ("avx512bw", features.has_avx512_bw),
        ("avx512dq", features.has_avx512_dq),
        ("avx512vl", features.has_avx512_vl),
    ];
    for (name, present) in rows {
        println!("  {:<10} {}", name, if present { "yes" } else { "no" });
    }

    Ok(())
}
