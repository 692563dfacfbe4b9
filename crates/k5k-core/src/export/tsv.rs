//! TSV export format implementation

use crate::bank::Patch;

use super::format::ExportFormat;

/// TSV (Tab-Separated Values) exporter
#[derive(Debug, Clone, Copy, Default)]
pub struct TsvExporter;

impl ExportFormat for TsvExporter {
    fn header(&self) -> Option<String> {
        Some(
            [
                "slot",
                "name",
                "sources",
                "additive",
                "code",
                "size",
                "tone_pointer",
                "volume",
                "polyphony",
            ]
            .join("\t"),
        )
    }

    fn format_row(&self, patch: &Patch) -> String {
        let polyphony = patch
            .common
            .polyphony()
            .map(|p| p.to_string())
            .unwrap_or_else(|| patch.common.polyphony_raw.to_string());

        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t0x{:X}\t{}\t{}",
            patch.slot_index,
            patch.trimmed_name(),
            patch.source_count,
            patch.additive_kit_count,
            patch.source_types,
            patch.size,
            patch.tone_pointer,
            patch.common.volume,
            polyphony
        )
    }
}
