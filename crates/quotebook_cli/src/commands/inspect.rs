//! Inspect command implementation.

use quotebook_core::{Config, QuoteStore, WriteMode};
use serde::Serialize;
use std::path::Path;

/// Store inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Storage directory.
    pub root: String,
    /// Aggregate export path.
    pub export_path: String,
    /// Highest id ever allocated.
    pub last_id: u64,
    /// Number of live quotes.
    pub live: usize,
    /// Number of allocated ids with no live quote.
    pub retired: u64,
    /// Write mode in effect.
    pub write_mode: &'static str,
}

/// Runs the inspect command.
pub fn run(config: &Config, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    ensure_store_exists(&config.root)?;

    let store = QuoteStore::open(config)?;
    let stats = store.stats();
    let result = InspectResult {
        root: config.root.display().to_string(),
        export_path: config.export_path.display().to_string(),
        last_id: stats.last_id,
        live: stats.live,
        retired: stats.retired,
        write_mode: match config.write_mode {
            WriteMode::Overwrite => "overwrite",
            WriteMode::AtomicRename => "atomic-rename",
        },
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print_text_output(&result),
    }

    Ok(())
}

/// Fails unless `root` is an existing directory. Opening a store would
/// create it.
pub fn ensure_store_exists(root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !root.is_dir() {
        return Err(format!("No quote store found at {:?}", root).into());
    }
    Ok(())
}

fn print_text_output(result: &InspectResult) {
    println!("Quote store: {}", result.root);
    println!("  Export path: {}", result.export_path);
    println!("  Write mode:  {}", result.write_mode);
    println!("  Last id:     {}", result.last_id);
    println!("  Live:        {}", result.live);
    println!("  Retired:     {}", result.retired);
}
