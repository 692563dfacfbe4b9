//! JSON export format implementation

use serde::Serialize;

use crate::bank::{Bank, Patch, PoolExtent};
use crate::error::Result;

use super::format::ExportFormat;

/// JSON exporter (one object per line, NDJSON format)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl ExportFormat for JsonExporter {
    fn header(&self) -> Option<String> {
        None // JSON doesn't need a header
    }

    fn format_row(&self, patch: &Patch) -> String {
        serde_json::to_string(&PatchJson::from(patch)).unwrap_or_default()
    }
}

/// Flattened patch summary for serialization
#[derive(Debug, Clone, Serialize)]
pub struct PatchJson {
    pub slot: usize,
    pub name: String,
    pub tone_pointer: u32,
    pub source_count: usize,
    pub additive_kit_count: usize,
    pub source_types: String,
    pub size: usize,
    pub volume: u8,
    pub polyphony: Option<String>,
    pub effect_algorithm: u16,
    pub reverb: Option<&'static str>,
    pub effects: Vec<Option<&'static str>>,
    pub geq: Vec<i8>,
}

impl From<&Patch> for PatchJson {
    fn from(patch: &Patch) -> Self {
        let common = &patch.common;
        Self {
            slot: patch.slot_index,
            name: patch.trimmed_name().to_string(),
            tone_pointer: patch.tone_pointer,
            source_count: patch.source_count,
            additive_kit_count: patch.additive_kit_count,
            source_types: patch.source_types.clone(),
            size: patch.size,
            volume: common.volume,
            polyphony: common.polyphony().map(|p| p.to_string()),
            effect_algorithm: common.effect_algorithm_number(),
            reverb: common.reverb.name(),
            effects: common.effects.iter().map(|e| e.name()).collect(),
            geq: common.geq.bands.to_vec(),
        }
    }
}

/// Whole-bank dump for diagnostic purposes
#[derive(Debug, Clone, Serialize)]
pub struct BankReport {
    pub base: String,
    pub displacement: u32,
    pub pool_size: usize,
    pub used_bytes: usize,
    pub free_bytes: usize,
    pub patch_count: usize,
    pub patches: Vec<PatchJson>,
    pub layout: Vec<PoolExtent>,
}

impl BankReport {
    pub fn from_bank(bank: &Bank) -> Self {
        Self {
            base: format!("0x{:08X}", bank.base()),
            displacement: bank.displacement(),
            pool_size: bank.pool_size(),
            used_bytes: bank.used_bytes(),
            free_bytes: bank.free_bytes(),
            patch_count: bank.patch_count(),
            patches: bank.patches().iter().map(PatchJson::from).collect(),
            layout: bank.layout(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::mock::MockBankBuilder;

    fn bank() -> Bank {
        let image = MockBankBuilder::new()
            .slot(1, 0x1000, [0; 6])
            .displacement(0x1000 + 82)
            .record(0, b"Init    ", 0)
            .pool_bytes(2, &[3])
            .pool_bytes(8, &[15])
            .build();
        Bank::from_bytes(&image).unwrap()
    }

    #[test]
    fn test_json_row() {
        let bank = bank();
        let row = JsonExporter.format_row(&bank.patches()[0]);
        let value: serde_json::Value = serde_json::from_str(&row).unwrap();

        assert_eq!(value["slot"], 1);
        assert_eq!(value["name"], "Init");
        assert_eq!(value["size"], 82);
        assert_eq!(value["source_types"], "------");
        assert_eq!(value["polyphony"], "POLY");
        assert_eq!(value["effect_algorithm"], 1);
        assert_eq!(value["reverb"], "Room 1");
        assert_eq!(value["effects"][0], "Single Delay");
        assert!(value["effects"][1].is_null());
        assert_eq!(value["geq"][0], -64);
    }

    #[test]
    fn test_json_row_with_unchecked_common_bytes() {
        let image = MockBankBuilder::new()
            .slot(1, 0x1000, [0; 6])
            .displacement(0x1000 + 82)
            .record(0, b"Init    ", 0)
            .pool_bytes(1, &[0xFF])
            .build();
        let bank = Bank::from_bytes(&image).unwrap();

        let row = JsonExporter.format_row(&bank.patches()[0]);
        let value: serde_json::Value = serde_json::from_str(&row).unwrap();
        assert_eq!(value["effect_algorithm"], 256);

        let report = BankReport::from_bank(&bank);
        assert_eq!(report.patches[0].effect_algorithm, 256);
    }

    #[test]
    fn test_json_rows_have_no_header() {
        let bank = bank();
        let output = JsonExporter.format_rows(bank.patches());
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_bank_report() {
        let report = BankReport::from_bank(&bank());
        assert_eq!(report.base, "0x00001000");
        assert_eq!(report.used_bytes, 82);
        assert_eq!(report.free_bytes, 131072 - 82);
        assert_eq!(report.layout[0].padding, 0);

        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["patch_count"], 1);
        assert_eq!(value["patches"][0]["name"], "Init");
    }
}
