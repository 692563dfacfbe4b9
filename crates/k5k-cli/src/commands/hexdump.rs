//! Hexdump command implementation.
//!
//! Displays the raw record bytes of one patch in traditional hexdump format,
//! useful for investigating parameter layouts.
//!
//! # Output Format
//!
//! ```text
//! 0x000: 48 65 6C 6C 6F 20 57 6F  72 6C 64 00 00 00 00 00  |Hello World.....|
//! ```

use std::path::Path;

use anyhow::{Result, bail};
use k5k_core::{Bank, DecodeOptions};

/// Run the hexdump command
pub fn run(file: &Path, number: usize, ascii: bool, options: &DecodeOptions) -> Result<()> {
    if number == 0 {
        bail!("Patch numbers start at 1");
    }

    let bank = Bank::load_with(file, options)?;
    let patch = bank.patch(number - 1)?;
    let bytes = bank.patch_data(number - 1)?;

    println!(
        "Hexdump of patch {} '{}' at 0x{:X} ({} bytes):",
        number,
        patch.trimmed_name(),
        patch.tone_pointer,
        bytes.len()
    );
    println!();

    for line in hexdump_lines(bytes, ascii) {
        println!("{}", line);
    }

    Ok(())
}

/// Format bytes as hexdump lines, 16 bytes per line
pub fn hexdump_lines(bytes: &[u8], ascii: bool) -> Vec<String> {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(i, chunk)| {
            let mut line = format!("0x{:03X}: ", i * 16);

            // Hex bytes
            for (j, byte) in chunk.iter().enumerate() {
                if j == 8 {
                    line.push(' ');
                }
                line.push_str(&format!("{:02X} ", byte));
            }

            // Padding for incomplete lines
            for j in chunk.len()..16 {
                if j == 8 {
                    line.push(' ');
                }
                line.push_str("   ");
            }

            // ASCII representation
            if ascii {
                line.push_str(" |");
                for byte in chunk {
                    if (0x20..0x7F).contains(byte) {
                        line.push(*byte as char);
                    } else {
                        line.push('.');
                    }
                }
                for _ in chunk.len()..16 {
                    line.push(' ');
                }
                line.push('|');
            }

            line
        })
        .collect()
}
