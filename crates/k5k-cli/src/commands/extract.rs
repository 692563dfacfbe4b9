//! Extract command implementation.
//!
//! Writes each patch record of a bank to `<name>.ka1` in the destination
//! directory. The record bytes are copied verbatim from the pool.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use k5k_core::{Bank, DecodeOptions, Patch};
use tracing::info;

/// Run the extract command
pub fn run(file: &Path, dir: &Path, options: &DecodeOptions) -> Result<()> {
    let bank = Bank::load_with(file, options)?;
    let written = extract_all(&bank, dir)?;
    println!("Wrote {} patch files to {}", written.len(), dir.display());
    Ok(())
}

/// File stem for a patch, safe on common filesystems
fn file_stem(patch: &Patch) -> String {
    let stem: String = patch
        .trimmed_name()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim().to_string();

    if stem.is_empty() {
        format!("slot-{:03}", patch.slot_index)
    } else {
        stem
    }
}

/// Write every patch and return the created paths
pub fn extract_all(bank: &Bank, dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        info!("Destination directory {:?} created", dir);
    }

    let mut used = HashSet::new();
    let mut written = Vec::with_capacity(bank.patch_count());

    for (index, patch) in bank.patches().iter().enumerate() {
        let mut stem = file_stem(patch);
        if !used.insert(stem.clone()) {
            stem = format!("{}-{:03}", stem, patch.slot_index);
            used.insert(stem.clone());
        }

        let path = dir.join(format!("{}.ka1", stem));
        let data = bank.patch_data(index)?;
        info!("Writing {} bytes to {:?}", data.len(), path);
        fs::write(&path, data)?;
        written.push(path);
    }

    Ok(written)
}
