//! # PackRS Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the subcommands of the PackRS CLI. Each submodule
//! defines its clap arguments struct and a `handle_*` function, and `main.rs`
//! routes to them.
//!
//! ## Command Groups
//!
//! - `create`: pack files and directories into a new archive
//! - `extract`: restore every entry of an archive into a directory
//! - `list`: print an archive's manifest
//!

/// Implements `packrs create`.
pub mod create;
/// Implements `packrs extract`.
pub mod extract;
/// Implements `packrs list`.
pub mod list;
