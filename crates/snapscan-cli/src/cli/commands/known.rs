//! `snapscan known` – list builds that are always skipped.

use anyhow::Result;
use snapscan_core::config::AuditConfig;
use snapscan_core::known::KnownBuilds;

pub fn run_known(cfg: &AuditConfig) -> Result<()> {
    let known = KnownBuilds::with_extra(&cfg.extra_known_builds);
    println!("{:<12} {}", "VERSION", "BUILD");
    for (version, build_number) in known.sorted() {
        println!("{:<12} {}", version, build_number);
    }
    Ok(())
}
