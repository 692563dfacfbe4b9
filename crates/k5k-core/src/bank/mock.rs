//! Synthetic bank images for tests.

use super::layout::{pool, record, table};

/// Builds a complete bank image byte by byte
#[derive(Debug, Clone)]
pub struct MockBankBuilder {
    image: Vec<u8>,
}

impl Default for MockBankBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBankBuilder {
    pub fn new() -> Self {
        Self {
            image: vec![0; pool::FILE_SIZE],
        }
    }

    /// Set the pointers of a 1-based slot
    pub fn slot(mut self, slot_index: usize, tone: u32, sources: [u32; 6]) -> Self {
        let start = (slot_index - 1) * table::SLOT_SIZE;
        self.image[start..start + 4].copy_from_slice(&tone.to_be_bytes());
        for (i, pointer) in sources.iter().enumerate() {
            let at = start + table::WORD * (i + 1);
            self.image[at..at + 4].copy_from_slice(&pointer.to_be_bytes());
        }
        self
    }

    pub fn displacement(mut self, value: u32) -> Self {
        let at = table::DISPLACEMENT_OFFSET;
        self.image[at..at + 4].copy_from_slice(&value.to_be_bytes());
        self
    }

    /// Write raw bytes at a pool-relative offset
    pub fn pool_bytes(mut self, offset: usize, bytes: &[u8]) -> Self {
        let at = pool::POOL_OFFSET + offset;
        self.image[at..at + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Write a name and source count into the common block at `offset`
    pub fn record(self, offset: usize, name: &[u8; 8], source_count: u8) -> Self {
        self.pool_bytes(offset + record::NAME_OFFSET, name)
            .pool_bytes(offset + record::SOURCE_COUNT_OFFSET, &[source_count])
    }

    pub fn build(self) -> Vec<u8> {
        self.image
    }
}
