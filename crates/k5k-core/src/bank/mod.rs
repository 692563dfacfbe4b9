//! Bank decoding pipeline.
//!
//! A bank file is decoded in three strictly ordered steps:
//!
//! 1. [`scanner`] reads the slot table, the watermark and the pool
//! 2. [`relocate`] finds the base offset and rebases every pointer
//! 3. [`patch`] decodes each used slot's record from the pool
//!
//! Any failure aborts the whole decode; a partial `Bank` is never returned.

mod common;
pub mod layout;
mod patch;
pub mod relocate;
pub mod scanner;

#[cfg(test)]
pub mod mock;

use std::cmp::Reverse;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use tracing::info;

use crate::config::DecodeOptions;
use crate::error::{Error, Result};

pub use common::{CommonParams, Effect, Geq, Polyphony, Reverb};
pub use patch::{Patch, Source, SourceKind, decode_patch};

use layout::pool::POOL_SIZE;

/// Sort keys for listing patches
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PatchOrder {
    /// Original slot table order
    #[default]
    Slot,
    /// Position in the pool
    Tone,
    Name,
    /// Source count, most sources first
    Sources,
    /// Record size, largest first
    Size,
    /// Source classification code
    Code,
}

/// Where one patch record sits in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolExtent {
    pub slot_index: usize,
    pub start: usize,
    pub end: usize,
    /// Bytes until the next record or the watermark; negative on overlap
    pub padding: i64,
}

/// A decoded sound bank
#[derive(Debug, Clone)]
pub struct Bank {
    patches: Vec<Patch>,
    pool: Vec<u8>,
    base: u32,
    displacement: u32,
    free_bytes: usize,
}

/// Decode a bank from a byte stream with default options
pub fn decode_bank<R: Read>(reader: R) -> Result<Bank> {
    decode_bank_with(reader, &DecodeOptions::default())
}

/// Decode a bank from a byte stream
pub fn decode_bank_with<R: Read>(mut reader: R, options: &DecodeOptions) -> Result<Bank> {
    let mut bytes = Vec::with_capacity(layout::pool::FILE_SIZE);
    reader.read_to_end(&mut bytes)?;
    Bank::from_bytes_with(&bytes, options)
}

impl Bank {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with(bytes, &DecodeOptions::default())
    }

    pub fn from_bytes_with(bytes: &[u8], options: &DecodeOptions) -> Result<Self> {
        let raw = scanner::scan(bytes)?;
        let relocation = relocate::relocate(raw)?;

        let patches = relocation
            .slots
            .iter()
            .map(|slot| decode_patch(slot, &relocation.pool, options))
            .collect::<Result<Vec<_>>>()?;
        let free_bytes = relocation.free_bytes();

        Ok(Self {
            patches,
            pool: relocation.pool,
            base: relocation.base,
            displacement: relocation.displacement,
            free_bytes,
        })
    }

    /// Load a bank file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with(path, &DecodeOptions::default())
    }

    pub fn load_with<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let bank = Self::from_bytes_with(&bytes, options)?;
        info!(
            "Loaded {} patches from {} ({} bytes free)",
            bank.patch_count(),
            path.display(),
            bank.free_bytes()
        );
        Ok(bank)
    }

    pub fn patch_count(&self) -> usize {
        self.patches.len()
    }

    /// Used patches in slot order
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Patch by 0-based position in `patches()`
    pub fn patch(&self, index: usize) -> Result<&Patch> {
        self.patches.get(index).ok_or(Error::IndexOutOfRange {
            index,
            count: self.patches.len(),
        })
    }

    /// Patch by 1-based slot table position, if that slot is used
    pub fn patch_by_slot(&self, slot_index: usize) -> Option<&Patch> {
        self.patches.iter().find(|p| p.slot_index == slot_index)
    }

    /// Raw record bytes of one patch
    pub fn patch_data(&self, index: usize) -> Result<&[u8]> {
        let patch = self.patch(index)?;
        Ok(&self.pool[patch.range()])
    }

    pub fn pool(&self) -> &[u8] {
        &self.pool
    }

    pub fn pool_size(&self) -> usize {
        POOL_SIZE
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    /// Relocated allocation watermark
    pub fn displacement(&self) -> u32 {
        self.displacement
    }

    pub fn free_bytes(&self) -> usize {
        self.free_bytes
    }

    /// Sum of all patch record sizes
    pub fn used_bytes(&self) -> usize {
        self.patches.iter().map(|p| p.size).sum()
    }

    pub fn sorted_by(&self, order: PatchOrder) -> Vec<&Patch> {
        let mut patches: Vec<&Patch> = self.patches.iter().collect();
        match order {
            PatchOrder::Slot => {}
            PatchOrder::Tone => patches.sort_by_key(|p| p.tone_pointer),
            PatchOrder::Name => patches.sort_by(|a, b| a.name.cmp(&b.name)),
            PatchOrder::Sources => patches.sort_by_key(|p| Reverse(p.source_count)),
            PatchOrder::Size => patches.sort_by_key(|p| Reverse(p.size)),
            PatchOrder::Code => patches.sort_by(|a, b| a.source_types.cmp(&b.source_types)),
        }
        patches
    }

    /// Patch records in pool order with the gap after each
    pub fn layout(&self) -> Vec<PoolExtent> {
        let sorted = self.sorted_by(PatchOrder::Tone);
        sorted
            .iter()
            .enumerate()
            .map(|(i, patch)| {
                let range = patch.range();
                let next = sorted
                    .get(i + 1)
                    .map(|p| p.tone_pointer)
                    .unwrap_or(self.displacement);
                PoolExtent {
                    slot_index: patch.slot_index,
                    start: range.start,
                    end: range.end,
                    padding: next as i64 - range.end as i64,
                }
            })
            .collect()
    }
}
