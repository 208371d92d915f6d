//! # meridian-cli — Command Handlers
//!
//! Each subcommand has an `Args` struct (clap derive) and a `run_*`
//! function returning the process exit code. `main.rs` only parses and
//! dispatches.

pub mod context;
pub mod frequency;
pub mod snapshot;
pub mod stats;
pub mod sync;
pub mod views;
