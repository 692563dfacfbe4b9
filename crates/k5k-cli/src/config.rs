//! Settings file for the command-line tool.
//!
//! ```toml
//! name_policy = "lossy"
//! sort = "tone"
//! ```

use std::fs;
use std::path::Path;

use anyhow::Result;
use k5k_core::{DecodeOptions, NamePolicy, PatchOrder};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub name_policy: NamePolicy,
    pub sort: PatchOrder,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Decode options, with `--lossy-names` taking precedence
    pub fn decode_options(&self, lossy_names: bool) -> DecodeOptions {
        let policy = if lossy_names {
            NamePolicy::Lossy
        } else {
            self.name_policy
        };
        DecodeOptions::builder().name_policy(policy).build()
    }
}
