//! Bank file layout constants
//!
//! This module centralizes the fixed layout of a K5000 bank dump and of the
//! variable-size patch records stored in its data pool.
//! Constants are organized by structure type.

/// Slot header table at the start of the file
pub mod table {
    /// Pointer size (4 bytes / 32-bit big-endian integer)
    pub const WORD: usize = 4;

    /// Number of patch slots in a bank
    pub const MAX_PATCH_COUNT: usize = 128;

    /// Number of source pointers following each tone pointer
    pub const MAX_SOURCE_COUNT: usize = 6;

    /// One tone pointer plus six source pointers (28 bytes)
    pub const SLOT_SIZE: usize = WORD * (1 + MAX_SOURCE_COUNT);

    /// All slots (3584 bytes)
    pub const TABLE_SIZE: usize = SLOT_SIZE * MAX_PATCH_COUNT;

    /// Allocation watermark stored right after the slot table
    pub const DISPLACEMENT_OFFSET: usize = TABLE_SIZE;

    /// Everything before the pool (3588 bytes)
    pub const HEADER_SIZE: usize = TABLE_SIZE + WORD;
}

/// Data pool following the header
pub mod pool {
    /// Size of the pool (128 KiB)
    pub const POOL_SIZE: usize = 0x20000;

    /// Pool start within the file
    pub const POOL_OFFSET: usize = super::table::HEADER_SIZE;

    /// Minimum file length for a complete bank (134660 bytes)
    pub const FILE_SIZE: usize = POOL_OFFSET + POOL_SIZE;
}

/// Variable-size patch record inside the pool
pub mod record {
    pub const COMMON_DATA_SIZE: usize = 82;
    pub const SOURCE_DATA_SIZE: usize = 86;
    pub const ADDITIVE_KIT_SIZE: usize = 806;

    pub const NAME_OFFSET: usize = 40;
    pub const NAME_SIZE: usize = 8;
    pub const SOURCE_COUNT_OFFSET: usize = 51;

    /// Record size for a patch with the given source mix
    pub const fn patch_size(source_count: usize, additive_kit_count: usize) -> usize {
        COMMON_DATA_SIZE + SOURCE_DATA_SIZE * source_count + ADDITIVE_KIT_SIZE * additive_kit_count
    }
}

/// Parameter offsets within the 82-byte common block
pub mod common {
    pub const CHECKSUM: usize = 0;
    pub const EFFECT_ALGORITHM: usize = 1;

    /// Reverb type, dry/wet, param1..4
    pub const REVERB: usize = 2;

    /// Effect type, depth, param1..4 for effects 1-4
    pub const EFFECTS: [usize; 4] = [8, 14, 20, 26];
    pub const EFFECT_BLOCK_SIZE: usize = 6;

    /// Seven graphic EQ bands, stored with +64 bias
    pub const GEQ: usize = 32;
    pub const GEQ_BANDS: usize = 7;
    pub const GEQ_BIAS: i16 = 64;

    pub const VOLUME: usize = 48;
    pub const POLYPHONY: usize = 49;
}
