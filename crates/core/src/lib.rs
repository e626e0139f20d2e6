//! Duka Kuu Core - Shared types library.
//!
//! This crate provides common types used across all Duka Kuu components:
//! - `dashboard` - Store management API (stores, products, heroes, ...)
//! - `cli` - Command-line tools for migrations and store bootstrap
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, names and colors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
