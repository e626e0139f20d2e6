//! Core types for Duka Kuu.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod color;
pub mod id;
pub mod name;
pub mod price;

pub use color::{HexColor, HexColorError};
pub use id::*;
pub use name::{StoreName, StoreNameError};
pub use price::{Price, PriceError};
