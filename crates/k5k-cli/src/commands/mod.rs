//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod dump;
pub mod extract;
pub mod hexdump;
pub mod list;
