//! # k5k-core
//!
//! Core library for reading Kawai K5000 sound bank dumps.
//!
//! This crate provides:
//! - Slot table scanning and pointer relocation for bank files
//! - Per-patch decoding (name, size, source composition, common parameters)
//! - The `Bank` aggregate with sorted views and pool layout
//! - TSV and JSON export of decoded patches

pub mod bank;
pub mod config;
pub mod error;
pub mod export;

pub use bank::{
    Bank, CommonParams, Effect, Geq, Patch, PatchOrder, Polyphony, PoolExtent, Reverb, Source,
    SourceKind, decode_bank, decode_bank_with, layout,
};
pub use config::{DecodeOptions, DecodeOptionsBuilder, NamePolicy};
pub use error::{Error, Result};
pub use export::{BankReport, ExportFormat, JsonExporter, PatchJson, TsvExporter};
