//! List command implementation.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use k5k_core::{Bank, DecodeOptions, PatchOrder};

/// Run the list command
pub fn run(file: &Path, order: PatchOrder, options: &DecodeOptions) -> Result<()> {
    let bank = Bank::load_with(file, options)?;
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    for line in format_listing(&bank, &name, order) {
        println!("{}", line);
    }
    Ok(())
}

fn percentage(part: usize, whole: usize) -> f64 {
    100.0 * part as f64 / whole as f64
}

/// Usage summary followed by one line per patch
pub fn format_listing(bank: &Bank, name: &str, order: PatchOrder) -> Vec<String> {
    let used = bank.used_bytes();
    let free = bank.free_bytes();
    let pool_size = bank.pool_size();

    let mut lines = vec![
        format!(
            "'{}' contains {} patches using {} bytes ({:.1}% of memory).",
            name,
            bank.patch_count(),
            used,
            percentage(used, pool_size)
        ),
        format!(
            "{} bytes ({:.1}% of memory) free.",
            free,
            percentage(free, pool_size)
        ),
        format!("Base offset = {:08X}. Patches:", bank.base()),
    ];

    let padding: HashMap<usize, i64> = bank
        .layout()
        .iter()
        .map(|extent| (extent.slot_index, extent.padding))
        .collect();

    for patch in bank.sorted_by(order) {
        lines.push(format!(
            "{:03} {:<8} {:<10} {:>5} {:#07X} {:>4}",
            patch.slot_index,
            patch.trimmed_name(),
            patch.source_mix(),
            patch.size,
            patch.tone_pointer,
            padding.get(&patch.slot_index).copied().unwrap_or(0)
        ));
    }
    lines
}
