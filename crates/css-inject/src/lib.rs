//! # css-inject
//!
//! Batch dynamic style declarations and flush them as one generated
//! stylesheet, instead of writing inline styles element by element.
//!
//! Declarations are collected in a [`StyleRegistry`] as
//! `selector -> property -> value`. Nothing reaches the document until
//! [`StyleRegistry::apply`] serializes the whole map and writes it into a
//! single `<style>` element, so any number of changes cost one document write.
//!
//! ## Quick start
//!
//! ```rust
//! use css_inject::{StyleMap, StyleRegistry};
//!
//! let mut registry = StyleRegistry::new();
//! registry
//!     .add("#content", "height", "200px")?
//!     .object_add(&StyleMap::new().with("#sidebar", "width", "30%"))?;
//!
//! assert_eq!(registry.parse(), "#content {height:200px;}#sidebar {width:30%;}");
//!
//! registry.apply()?;
//! # Ok::<(), css_inject::StyleError>(())
//! ```
//!
//! ## Documents
//!
//! Flushing goes through the [`Document`] trait. [`HeadlessDocument`] keeps
//! the head in memory and can render it as HTML; on `wasm32` targets
//! `WebDocument` writes to the browser DOM. Document failures are reported
//! as [`StyleError::Environment`]; serialization never touches the document.
//!
//! ## Loading styles
//!
//! Style maps can be merged from JSON or YAML text and files through
//! [`style::loader`], with strict shape checks and all-or-nothing merges.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: mutations at `trace`, flushes at
//! `debug`, rejected input at `warn`. Install any logger to see them.

pub mod config;
pub mod document;
pub mod extension;
pub mod global;
pub mod registry;
pub mod style;
#[cfg(target_arch = "wasm32")]
mod web;

pub use config::{RegistryConfig, DEFAULT_ELEMENT_ID};
pub use document::{Document, HeadlessDocument, NodeId, StyleNode};
pub use extension::{ExtensionFn, Extensions};
pub use registry::StyleRegistry;
pub use style::{PropertyMap, StyleError, StyleMap};
#[cfg(target_arch = "wasm32")]
pub use web::WebDocument;
