//! Slot table scanning.
//!
//! Reads the 128 fixed-size slot records, the allocation watermark and the
//! data pool from a raw bank image. Pointers are left in device coordinates.

use tracing::debug;

use super::layout::{pool, table};
use crate::error::{Error, Result};

/// One used slot as stored in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSlot {
    /// 1-based position in the slot table
    pub slot_index: usize,
    pub tone_pointer: u32,
    pub source_pointers: [u32; table::MAX_SOURCE_COUNT],
}

impl RawSlot {
    pub fn is_additive(&self, source_index: usize) -> bool {
        self.source_pointers[source_index] != 0
    }
}

/// Unrelocated contents of a bank image
#[derive(Debug, Clone)]
pub struct RawBank {
    /// Used slots only, in table order
    pub slots: Vec<RawSlot>,
    pub displacement: u32,
    pub pool: Vec<u8>,
}

fn read_u32_be(bytes: &[u8], offset: usize) -> u32 {
    let mut word = [0u8; table::WORD];
    word.copy_from_slice(&bytes[offset..offset + table::WORD]);
    u32::from_be_bytes(word)
}

/// Scan a complete bank image
pub fn scan(bytes: &[u8]) -> Result<RawBank> {
    if bytes.len() < pool::FILE_SIZE {
        return Err(Error::TruncatedInput {
            expected: pool::FILE_SIZE,
            actual: bytes.len(),
        });
    }
    if bytes.len() > pool::FILE_SIZE {
        debug!(
            "Ignoring {} trailing bytes after pool",
            bytes.len() - pool::FILE_SIZE
        );
    }

    let slots: Vec<RawSlot> = bytes[..table::TABLE_SIZE]
        .chunks_exact(table::SLOT_SIZE)
        .enumerate()
        .filter_map(|(i, slot)| {
            let tone_pointer = read_u32_be(slot, 0);
            if tone_pointer == 0 {
                return None;
            }
            let mut source_pointers = [0u32; table::MAX_SOURCE_COUNT];
            for (s, pointer) in source_pointers.iter_mut().enumerate() {
                *pointer = read_u32_be(slot, table::WORD * (s + 1));
            }
            Some(RawSlot {
                slot_index: i + 1,
                tone_pointer,
                source_pointers,
            })
        })
        .collect();

    let displacement = read_u32_be(bytes, table::DISPLACEMENT_OFFSET);
    let pool = bytes[pool::POOL_OFFSET..pool::FILE_SIZE].to_vec();

    debug!(
        "Scanned {} used slots, displacement = {:#X}",
        slots.len(),
        displacement
    );

    Ok(RawBank {
        slots,
        displacement,
        pool,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::mock::MockBankBuilder;

    #[test]
    fn test_scan_skips_unused_slots() {
        let image = MockBankBuilder::new()
            .slot(5, 0x1000, [0; 6])
            .slot(9, 0x2000, [0, 0x3000, 0, 0, 0, 0])
            .displacement(0x0C00)
            .build();

        let raw = scan(&image).unwrap();
        assert_eq!(raw.slots.len(), 2);
        assert_eq!(raw.slots[0].slot_index, 5);
        assert_eq!(raw.slots[0].tone_pointer, 0x1000);
        assert_eq!(raw.slots[1].slot_index, 9);
        assert!(raw.slots[1].is_additive(1));
        assert!(!raw.slots[1].is_additive(0));
        assert_eq!(raw.displacement, 0x0C00);
        assert_eq!(raw.pool.len(), pool::POOL_SIZE);
    }

    #[test]
    fn test_scan_reads_big_endian() {
        let mut image = MockBankBuilder::new().build();
        // Slot 1 tone pointer, then source 6 of slot 1
        image[0..4].copy_from_slice(&[0x00, 0x01, 0x02, 0x03]);
        image[24..28].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

        let raw = scan(&image).unwrap();
        assert_eq!(raw.slots[0].slot_index, 1);
        assert_eq!(raw.slots[0].tone_pointer, 0x0001_0203);
        assert_eq!(raw.slots[0].source_pointers[5], 0xDEAD_BEEF);
    }

    #[test]
    fn test_scan_keeps_pool_verbatim() {
        let image = MockBankBuilder::new()
            .pool_bytes(0, b"K5000")
            .pool_bytes(pool::POOL_SIZE - 1, &[0x7F])
            .build();

        let raw = scan(&image).unwrap();
        assert_eq!(&raw.pool[..5], b"K5000");
        assert_eq!(raw.pool[pool::POOL_SIZE - 1], 0x7F);
    }

    #[test]
    fn test_scan_truncated() {
        let image = MockBankBuilder::new().build();
        let err = scan(&image[..pool::FILE_SIZE - 1]).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedInput {
                expected: pool::FILE_SIZE,
                actual
            } if actual == pool::FILE_SIZE - 1
        ));

        assert!(matches!(scan(&[]), Err(Error::TruncatedInput { .. })));
    }

    #[test]
    fn test_scan_ignores_trailing_bytes() {
        let mut image = MockBankBuilder::new().slot(1, 0x10, [0; 6]).build();
        image.extend_from_slice(&[0xAA; 16]);

        let raw = scan(&image).unwrap();
        assert_eq!(raw.slots.len(), 1);
        assert_eq!(raw.pool.len(), pool::POOL_SIZE);
    }
}
