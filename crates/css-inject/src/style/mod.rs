//! Style data model.
//!
//! This module provides the data held by a registry:
//!
//! - [`StyleMap`]: selectors mapped to their declarations
//! - [`PropertyMap`]: property/value declarations of one selector
//! - [`StyleError`]: errors shared by the whole crate
//! - [`loader`]: strict conversion from JSON, YAML, and files
//!
//! Both map levels preserve insertion order, which is also the order the
//! stylesheet is serialized in.

mod error;
pub mod loader;
mod map;

pub use error::StyleError;
pub use map::{PropertyMap, StyleMap};
