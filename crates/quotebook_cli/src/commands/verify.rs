//! Verify command implementation.

use crate::commands::inspect::ensure_store_exists;
use quotebook_core::verify::{self, IntegrityReport};
use quotebook_core::Config;
use quotebook_storage::FileBackend;

/// Runs the verify command. Returns whether the store is clean.
pub fn run(config: &Config) -> Result<bool, Box<dyn std::error::Error>> {
    ensure_store_exists(&config.root)?;

    let backend = FileBackend::open(&config.root)?;
    let report = verify::scan(&backend)?;
    print_report(&config.root.display().to_string(), &report);

    Ok(report.is_clean())
}

fn print_report(root: &str, report: &IntegrityReport) {
    println!("Verifying {}", root);
    println!("  Last id: {}", report.last_id);
    println!("  Live:    {}", report.live.len());
    println!("  Retired: {}", report.retired.len());

    for doc in &report.malformed {
        println!("  ✗ malformed {}: {}", doc.key, doc.reason);
    }
    for key in &report.dangling {
        println!("  ✗ dangling {} (beyond the id counter)", key);
    }
    for key in &report.unrecognized {
        println!("  ? unrecognized {}", key);
    }

    if report.is_clean() {
        println!("✓ Store is consistent");
    } else {
        println!(
            "✗ {} malformed, {} dangling",
            report.malformed.len(),
            report.dangling.len()
        );
    }
}
