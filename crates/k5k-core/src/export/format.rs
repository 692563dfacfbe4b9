//! ExportFormat trait definition

use crate::bank::Patch;

/// Trait for export format implementations
///
/// Provides a common interface for different export formats (TSV, JSON, etc.)
pub trait ExportFormat {
    /// Returns the header line for the format (empty for formats without headers)
    fn header(&self) -> Option<String>;

    /// Format a single patch
    fn format_row(&self, patch: &Patch) -> String;

    /// Format multiple patches
    fn format_rows<'a, I>(&self, patches: I) -> String
    where
        I: IntoIterator<Item = &'a Patch>,
    {
        let mut output = String::new();
        if let Some(header) = self.header() {
            output.push_str(&header);
            output.push('\n');
        }
        for patch in patches {
            output.push_str(&self.format_row(patch));
            output.push('\n');
        }
        output
    }
}
