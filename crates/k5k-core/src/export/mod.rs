mod format;
mod json;
mod tsv;

pub use format::ExportFormat;
pub use json::{BankReport, JsonExporter, PatchJson};
pub use tsv::TsvExporter;
