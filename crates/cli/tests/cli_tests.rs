//! Integration tests for the `tier` binary.
//!
//! Each test spawns the built binary; the instruction-set cap in the
//! environment pins the dispatch outcome regardless of the host CPU.

use std::process::{Command, Output};

use tier_dispatch::{CpuFeatures, InstructionSet};

const MAX_ISA_ENV: &str = "TIER_DISPATCH_MAX_ISA";

fn tier(args: &[&str], cap: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_tier"));
    command.args(args).env_remove(MAX_ISA_ENV).env_remove("RUST_LOG");
    if let Some(cap) = cap {
        command.env(MAX_ISA_ENV, cap);
    }
    command.output().expect("Failed to run tier binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_sum_default_input() {
    let output = tier(&["sum"], None);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Sum:     136"), "{}", stdout(&output));
}

#[test]
fn test_sum_custom_values() {
    let values = "--values=-1,-2,-3,-4,1,2,3,4,0.5,0.5,0.5,0.5,10,10,10,10";
    let output = tier(&["sum", values], None);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Sum:     42"), "{}", stdout(&output));
}

#[test]
fn test_sum_rejects_wrong_count() {
    let output = tier(&["sum", "--values", "1,2,3"], None);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("expected 16 values, got 3"));
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[test]
fn test_sum_capped_to_sse2_uses_lowest_variant() {
    let output = tier(&["sum"], Some("sse2"));
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Variant: sse2"), "{text}");
    assert!(text.contains("Sum:     136"), "{text}");
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[test]
fn test_sum_capped_between_tiers_uses_lower_neighbour() {
    if CpuFeatures::detect().instruction_set() < InstructionSet::SSE4_1 {
        eprintln!("Skipping test: host lacks SSE4.1");
        return;
    }

    // AVX sits between the SSE4.1 and AVX2 variants.
    let output = tier(&["sum"], Some("avx"));
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Variant: sse4.1"), "{text}");
    assert!(!text.contains("Variant: avx2"), "{text}");
    assert!(text.contains("Sum:     136"), "{text}");
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[test]
fn test_sum_below_minimum_fails() {
    let output = tier(&["sum"], Some("sse"));
    assert!(!output.status.success());
    let text = stderr(&output);
    assert!(text.contains("cannot run `sum16` on this processor"), "{text}");
    assert!(text.contains("least required instruction set"), "{text}");
}

#[test]
fn test_detect_reports_cap() {
    let output = tier(&["detect"], Some("sse2"));
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Cap:       sse2"), "{text}");
    assert!(text.contains("Compiled:"), "{text}");
}

#[test]
fn test_invalid_cap_is_ignored() {
    let output = tier(&["detect"], Some("altivec"));
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Cap:       none"));
}

#[test]
fn test_table_filters_by_width() {
    let output = tier(&["table", "--bits", "512"], None);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Vec16f"), "{text}");
    assert!(text.contains("Vec8db"), "{text}");
    assert!(!text.contains("Vec4i "), "{text}");
    // Header plus ten rows per width.
    assert_eq!(text.lines().count(), 11);
}

#[test]
fn test_table_rejects_unknown_width() {
    let output = tier(&["table", "--bits", "64"], None);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("register width must be 128, 256 or 512"));
}
