//! # PackRS Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by every command:
//! - `config`: configuration loading, merging and validation
//! - `error`: the `PackError` taxonomy and `Result` aliases
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{PackError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
