//! Domain models for the dashboard.
//!
//! Models serialize with camelCase field names, which is the JSON shape the
//! dashboard UI consumes.

pub mod category;
pub mod color;
pub mod hero;
pub mod product;
pub mod size;
pub mod store;

pub use category::{Category, CategoryDetails, CategoryInput};
pub use color::{Color, ColorInput};
pub use hero::{Hero, HeroInput};
pub use product::{Image, Product, ProductDetails, ProductFilter, ProductInput};
pub use size::{Size, SizeInput};
pub use store::Store;
