//! # PackRS Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Everything that touches the local filesystem lives under this module.
//! The archive logic itself only sees the `storage::Storage` trait.
//!
//! ## Architecture
//!
//! - **`storage`**: the `Storage` trait (`exists`, `read`, `write`) and its
//!   `std::fs` implementation, `LocalStorage`.
//! - **`io`**: directory creation and expansion of `packrs create` inputs
//!   into named files.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::{io, storage::{LocalStorage, Storage}};
//!
//! let inputs = io::collect_inputs(&paths)?;
//! let bytes = LocalStorage.read(&inputs[0].path)?;
//! ```
//!

/// Directory helpers and input expansion (e.g., `ensure_dir_exists`, `collect_inputs`).
pub mod io;
/// The injectable storage backend (`Storage`, `LocalStorage`).
pub mod storage;
