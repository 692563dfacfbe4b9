//! Decode options for bank parsing.
//!
//! ## Example
//!
//! ```
//! use k5k_core::{DecodeOptions, NamePolicy};
//!
//! let options = DecodeOptions::builder()
//!     .name_policy(NamePolicy::Lossy)
//!     .build();
//! assert_eq!(options.name_policy, NamePolicy::Lossy);
//! ```

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// How patch name bytes outside 7-bit ASCII are handled
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NamePolicy {
    /// Fail the whole decode with `Error::DecodeError`
    #[default]
    Strict,
    /// Decode each byte as Latin-1 and keep going
    Lossy,
}

/// Options controlling how a bank is decoded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub name_policy: NamePolicy,
}

impl DecodeOptions {
    /// Create a new options builder
    pub fn builder() -> DecodeOptionsBuilder {
        DecodeOptionsBuilder::default()
    }
}

/// Builder for DecodeOptions
#[derive(Debug, Clone, Default)]
pub struct DecodeOptionsBuilder {
    name_policy: Option<NamePolicy>,
}

impl DecodeOptionsBuilder {
    /// Set the patch name policy
    pub fn name_policy(mut self, policy: NamePolicy) -> Self {
        self.name_policy = Some(policy);
        self
    }

    /// Build the options
    pub fn build(self) -> DecodeOptions {
        let default = DecodeOptions::default();
        DecodeOptions {
            name_policy: self.name_policy.unwrap_or(default.name_policy),
        }
    }
}
