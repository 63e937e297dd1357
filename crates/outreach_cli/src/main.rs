//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `outreach_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("outreach_core ping={}", outreach_core::ping());
    println!("outreach_core version={}", outreach_core::core_version());
}
