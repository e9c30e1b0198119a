//! Command-line interface for dialogue-forge.
//!
//! Provides commands for generating screening-dialogue sessions and for
//! previewing sampled profiles without touching the network.

mod commands;

pub use commands::{parse_cli, run, run_with_cli};
