//! Products domain module.
//!
//! The cheese catalog ("assortment"): products, their milk-source category,
//! and parsing of bulk imports.

pub mod import;
pub mod product;

pub use import::parse_import_lines;
pub use product::{CheeseCategory, Product, normalize_name};
