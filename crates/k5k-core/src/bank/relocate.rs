//! Pointer relocation.
//!
//! The device stores absolute addresses. The lowest pointer in the dump
//! (any used tone pointer or the watermark) marks the start of the pool, so
//! every pointer is rebased against that minimum.

use tracing::debug;

use super::layout::{pool, table};
use super::patch::Source;
use super::scanner::{RawBank, RawSlot};
use crate::error::{Error, Result};

/// A used slot with pool-relative pointers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelocatedSlot {
    pub slot_index: usize,
    pub tone_pointer: u32,
    pub sources: [Source; table::MAX_SOURCE_COUNT],
}

/// Relocated bank contents, ready for patch decoding
#[derive(Debug, Clone)]
pub struct Relocation {
    pub slots: Vec<RelocatedSlot>,
    pub base: u32,
    /// Watermark relative to the pool start
    pub displacement: u32,
    pub pool: Vec<u8>,
}

impl Relocation {
    /// Unallocated bytes left in the pool
    pub fn free_bytes(&self) -> usize {
        pool::POOL_SIZE - self.displacement as usize
    }
}

/// Minimum of all used tone pointers and the raw watermark
pub fn base_offset(raw: &RawBank) -> u32 {
    raw.slots
        .iter()
        .map(|slot| slot.tone_pointer)
        .fold(raw.displacement, u32::min)
}

fn relocate_slot(slot: &RawSlot, base: u32) -> Result<RelocatedSlot> {
    let tone_pointer = slot.tone_pointer.checked_sub(base).ok_or_else(|| {
        Error::corrupt(
            slot.slot_index,
            format!("tone pointer {:#X} below base {:#X}", slot.tone_pointer, base),
        )
    })?;

    let mut sources = [Source::PCM; table::MAX_SOURCE_COUNT];
    for (i, &raw_pointer) in slot.source_pointers.iter().enumerate() {
        if !slot.is_additive(i) {
            continue;
        }
        let kit_pointer = raw_pointer.checked_sub(base).ok_or_else(|| {
            Error::corrupt(
                slot.slot_index,
                format!(
                    "source {} kit pointer {:#X} below base {:#X}",
                    i + 1,
                    raw_pointer,
                    base
                ),
            )
        })?;
        sources[i] = Source::additive(kit_pointer);
    }

    Ok(RelocatedSlot {
        slot_index: slot.slot_index,
        tone_pointer,
        sources,
    })
}

/// Rebase every pointer in a scanned bank
pub fn relocate(raw: RawBank) -> Result<Relocation> {
    let base = base_offset(&raw);
    debug!("Base offset = {:#X}", base);

    let slots = raw
        .slots
        .iter()
        .map(|slot| relocate_slot(slot, base))
        .collect::<Result<Vec<_>>>()?;

    let displacement = raw.displacement - base;
    if displacement as usize > pool::POOL_SIZE {
        return Err(Error::CorruptBank(format!(
            "watermark {:#X} lies beyond the {:#X}-byte pool",
            displacement,
            pool::POOL_SIZE
        )));
    }

    Ok(Relocation {
        slots,
        base,
        displacement,
        pool: raw.pool,
    })
}
