//! Patch records and their decoding from the pool.

use std::ops::Range;

use serde::Serialize;
use tracing::warn;

use super::common::CommonParams;
use super::layout::{record, table};
use super::relocate::RelocatedSlot;
use crate::config::{DecodeOptions, NamePolicy};
use crate::error::{Error, Result};

/// Padding for source classification beyond `source_count`
const UNUSED_SOURCE: char = '-';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SourceKind {
    /// Simple PCM source, stored with a zero pointer
    Pcm,
    /// Additive source with its own wave kit
    Additive,
}

impl SourceKind {
    pub fn code(&self) -> char {
        match self {
            Self::Pcm => 'P',
            Self::Additive => 'A',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Source {
    pub kind: SourceKind,
    /// Pool-relative wave kit pointer, additive sources only
    pub kit_pointer: Option<u32>,
}

impl Source {
    pub const PCM: Source = Source {
        kind: SourceKind::Pcm,
        kit_pointer: None,
    };

    pub fn additive(kit_pointer: u32) -> Self {
        Self {
            kind: SourceKind::Additive,
            kit_pointer: Some(kit_pointer),
        }
    }

    pub fn is_additive(&self) -> bool {
        self.kind == SourceKind::Additive
    }
}

/// One decoded sound program
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patch {
    /// 1-based position in the slot table
    pub slot_index: usize,
    /// Pool-relative record start
    pub tone_pointer: u32,
    pub source_count: usize,
    pub additive_kit_count: usize,
    pub name: String,
    pub size: usize,
    /// 'A' or 'P' per used source, '-' for the rest
    pub source_types: String,
    pub sources: [Source; table::MAX_SOURCE_COUNT],
    pub common: CommonParams,
}

impl Patch {
    /// Pool range holding this patch's record
    pub fn range(&self) -> Range<usize> {
        let start = self.tone_pointer as usize;
        start..start + self.size
    }

    pub fn pcm_count(&self) -> usize {
        self.source_count - self.additive_kit_count
    }

    /// Name with trailing padding removed
    pub fn trimmed_name(&self) -> &str {
        self.name.trim_end_matches([' ', '\0'])
    }

    /// Source mix such as "2ADD 1PCM"
    pub fn source_mix(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if self.additive_kit_count != 0 {
            parts.push(format!("{}ADD", self.additive_kit_count));
        }
        if self.pcm_count() != 0 {
            parts.push(format!("{}PCM", self.pcm_count()));
        }
        parts.join(" ")
    }
}

fn decode_name(slot_index: usize, bytes: &[u8], policy: NamePolicy) -> Result<String> {
    if !encoding_rs::mem::is_ascii(bytes) {
        match policy {
            NamePolicy::Strict => {
                return Err(Error::DecodeError {
                    slot: slot_index,
                    bytes: bytes.to_vec(),
                });
            }
            NamePolicy::Lossy => {
                warn!(
                    "Patch name in slot {} is not ASCII: {:02X?}",
                    slot_index, bytes
                );
            }
        }
    }
    Ok(encoding_rs::mem::decode_latin1(bytes).into_owned())
}

fn classify(sources: &[Source], source_count: usize) -> String {
    sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            if i < source_count {
                source.kind.code()
            } else {
                UNUSED_SOURCE
            }
        })
        .collect()
}

/// Decode the record of one relocated slot
pub fn decode_patch(slot: &RelocatedSlot, pool: &[u8], options: &DecodeOptions) -> Result<Patch> {
    let start = slot.tone_pointer as usize;
    let common_end = start + record::COMMON_DATA_SIZE;
    if common_end > pool.len() {
        return Err(Error::corrupt(
            slot.slot_index,
            format!("common block at {:#X} runs past the pool", start),
        ));
    }
    let common_block = &pool[start..common_end];

    let source_count = common_block[record::SOURCE_COUNT_OFFSET] as usize;
    if source_count > table::MAX_SOURCE_COUNT {
        return Err(Error::corrupt(
            slot.slot_index,
            format!(
                "source count {} exceeds {}",
                source_count,
                table::MAX_SOURCE_COUNT
            ),
        ));
    }

    let additive_kit_count = slot.sources[..source_count]
        .iter()
        .filter(|source| source.is_additive())
        .count();
    if slot.sources[source_count..]
        .iter()
        .any(|source| source.is_additive())
    {
        warn!(
            "Slot {} has kit pointers beyond its {} sources, ignoring them",
            slot.slot_index, source_count
        );
    }

    let size = record::patch_size(source_count, additive_kit_count);
    if start + size > pool.len() {
        return Err(Error::corrupt(
            slot.slot_index,
            format!("{}-byte record at {:#X} runs past the pool", size, start),
        ));
    }

    let name_bytes = &common_block[record::NAME_OFFSET..record::NAME_OFFSET + record::NAME_SIZE];
    let name = decode_name(slot.slot_index, name_bytes, options.name_policy)?;

    Ok(Patch {
        slot_index: slot.slot_index,
        tone_pointer: slot.tone_pointer,
        source_count,
        additive_kit_count,
        name,
        size,
        source_types: classify(&slot.sources, source_count),
        sources: slot.sources,
        common: CommonParams::parse(common_block),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::layout::pool;

    fn pool_with(offset: usize, name: &[u8; 8], source_count: u8) -> Vec<u8> {
        let mut pool = vec![0u8; pool::POOL_SIZE];
        pool[offset + record::NAME_OFFSET..offset + record::NAME_OFFSET + 8].copy_from_slice(name);
        pool[offset + record::SOURCE_COUNT_OFFSET] = source_count;
        pool
    }

    fn slot(tone_pointer: u32, sources: [Source; 6]) -> RelocatedSlot {
        RelocatedSlot {
            slot_index: 5,
            tone_pointer,
            sources,
        }
    }

    #[test]
    fn test_decode_pcm_patch() {
        let pool = pool_with(0x400, b"Strings ", 3);
        let patch =
            decode_patch(&slot(0x400, [Source::PCM; 6]), &pool, &DecodeOptions::default()).unwrap();

        assert_eq!(patch.slot_index, 5);
        assert_eq!(patch.source_count, 3);
        assert_eq!(patch.additive_kit_count, 0);
        assert_eq!(patch.size, 340);
        assert_eq!(patch.source_types, "PPP---");
        assert_eq!(patch.name, "Strings ");
        assert_eq!(patch.trimmed_name(), "Strings");
        assert_eq!(patch.source_mix(), "3PCM");
        assert_eq!(patch.range(), 0x400..0x400 + 340);
    }

    #[test]
    fn test_decode_additive_patch() {
        let pool = pool_with(0x400, b"AddBell\0", 3);
        let mut sources = [Source::PCM; 6];
        sources[1] = Source::additive(0x1400);

        let patch = decode_patch(&slot(0x400, sources), &pool, &DecodeOptions::default()).unwrap();
        assert_eq!(patch.additive_kit_count, 1);
        assert_eq!(patch.size, 1146);
        assert_eq!(patch.source_types, "PAP---");
        assert_eq!(patch.source_mix(), "1ADD 2PCM");
        assert_eq!(patch.trimmed_name(), "AddBell");
        assert_eq!(patch.sources[1].kit_pointer, Some(0x1400));
    }

    #[test]
    fn test_kit_pointers_beyond_source_count_are_ignored() {
        let pool = pool_with(0, b"Two     ", 2);
        let mut sources = [Source::PCM; 6];
        sources[0] = Source::additive(0x100);
        sources[4] = Source::additive(0x900);

        let patch = decode_patch(&slot(0, sources), &pool, &DecodeOptions::default()).unwrap();
        assert_eq!(patch.additive_kit_count, 1);
        assert_eq!(patch.source_types, "AP----");
        assert!(patch.additive_kit_count <= patch.source_count);
    }

    #[test]
    fn test_source_count_out_of_range() {
        let pool = pool_with(0x400, b"Broken  ", 9);
        let err = decode_patch(&slot(0x400, [Source::PCM; 6]), &pool, &DecodeOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::CorruptPatch { slot: 5, .. }));
    }

    #[test]
    fn test_record_past_pool_end() {
        let start = pool::POOL_SIZE - record::COMMON_DATA_SIZE;
        let pool = pool_with(start, b"Edge    ", 1);

        let err = decode_patch(&slot(start as u32, [Source::PCM; 6]), &pool, &DecodeOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::CorruptPatch { .. }));

        let err = decode_patch(
            &slot(pool::POOL_SIZE as u32 - 10, [Source::PCM; 6]),
            &pool,
            &DecodeOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::CorruptPatch { .. }));
    }

    #[test]
    fn test_non_ascii_name() {
        let pool = pool_with(0, b"Caf\xE9    ", 1);

        let err = decode_patch(&slot(0, [Source::PCM; 6]), &pool, &DecodeOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::DecodeError { slot: 5, ref bytes } if bytes[3] == 0xE9));

        let lossy = DecodeOptions::builder()
            .name_policy(NamePolicy::Lossy)
            .build();
        let patch = decode_patch(&slot(0, [Source::PCM; 6]), &pool, &lossy).unwrap();
        assert_eq!(patch.name, "Café    ");
        assert_eq!(patch.size, 82 + 86);
    }
}
