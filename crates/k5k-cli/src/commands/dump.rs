//! Dump command implementation.

use std::path::Path;

use anyhow::Result;
use k5k_core::{Bank, BankReport, DecodeOptions, ExportFormat, Patch, TsvExporter};

use crate::cli::DumpFormat;

/// Run the dump command
pub fn run(
    file: &Path,
    format: DumpFormat,
    output: Option<&Path>,
    options: &DecodeOptions,
) -> Result<()> {
    let bank = Bank::load_with(file, options)?;

    let content = match format {
        DumpFormat::Text => format_text(&bank),
        DumpFormat::Json => BankReport::from_bank(&bank).to_json()?,
        DumpFormat::Tsv => TsvExporter.format_rows(bank.patches()),
    };

    if let Some(output_path) = output {
        std::fs::write(output_path, &content)?;
        eprintln!("Dump saved to: {}", output_path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn describe_patch(patch: &Patch) -> String {
    let common = &patch.common;
    let polyphony = common
        .polyphony()
        .map(|p| p.to_string())
        .unwrap_or_else(|| format!("unknown ({})", common.polyphony_raw));

    let mut text = format!(
        "{:03} {}, volume = {}, polyphony = {}, sources = {} ({})\n",
        patch.slot_index,
        patch.trimmed_name(),
        common.volume,
        polyphony,
        patch.source_count,
        patch.source_types
    );
    text.push_str(&format!(
        "Effect algorithm = {}\n",
        common.effect_algorithm_number()
    ));

    let reverb = &common.reverb;
    text.push_str(&format!(
        "Reverb: {}: dry/wet = {}, params = {:?}\n",
        reverb.name().unwrap_or("(none)"),
        reverb.dry_wet,
        reverb.params
    ));

    for (i, effect) in common.effects.iter().enumerate() {
        text.push_str(&format!(
            "Effect #{} = {}: depth = {}, params = {:?}\n",
            i + 1,
            effect.name().unwrap_or("(none)"),
            effect.depth,
            effect.params
        ));
    }

    text.push_str(&format!("GEQ: {:?}\n", common.geq.bands));
    text
}

/// Human-readable dump of every patch
pub fn format_text(bank: &Bank) -> String {
    let mut text = format!(
        "Base = 0x{:08X}, watermark = 0x{:X}, {} of {} bytes free\n\n",
        bank.base(),
        bank.displacement(),
        bank.free_bytes(),
        bank.pool_size()
    );
    for patch in bank.patches() {
        text.push_str(&describe_patch(patch));
        text.push('\n');
    }
    text
}
