//! Extending a registry with new operations.
//!
//! Two mechanisms are available.
//!
//! **Extension traits** suit operations known at compile time. Declare a trait
//! and implement it for [`StyleRegistry`]; methods that should chain return
//! the registry themselves:
//!
//! ```rust
//! use css_inject::{Document, StyleError, StyleRegistry};
//!
//! trait SizeExt {
//!     fn size(&mut self, selector: &str, width: &str, height: &str) -> Result<&mut Self, StyleError>;
//! }
//!
//! impl<D: Document> SizeExt for StyleRegistry<D> {
//!     fn size(&mut self, selector: &str, width: &str, height: &str) -> Result<&mut Self, StyleError> {
//!         self.add(selector, "width", width)?.add(selector, "height", height)
//!     }
//! }
//!
//! let mut registry = StyleRegistry::new();
//! registry.size("#box", "10px", "20px").unwrap();
//! assert_eq!(registry.parse(), "#box {width:10px;height:20px;}");
//! ```
//!
//! **Named callbacks** suit operations chosen at runtime, for example from a
//! plugin list. They are registered on a registry under a name and receive the
//! style map plus string arguments:
//!
//! ```rust
//! use css_inject::StyleRegistry;
//!
//! let mut registry = StyleRegistry::new();
//! registry.register_extension("hide", |styles, args| {
//!     for selector in args {
//!         styles.declare(*selector, "display", "none");
//!     }
//!     Ok(())
//! });
//!
//! registry.call_extension("hide", &[".modal", ".toast"]).unwrap();
//! assert_eq!(registry.parse(), ".modal {display:none;}.toast {display:none;}");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::style::{StyleError, StyleMap};

/// Signature of a named registry extension.
pub type ExtensionFn = dyn Fn(&mut StyleMap, &[&str]) -> Result<(), StyleError> + Send + Sync;

/// Table of named extensions attached to a registry.
#[derive(Clone, Default)]
pub struct Extensions {
    table: HashMap<String, Arc<ExtensionFn>>,
}

impl Extensions {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `f` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&mut StyleMap, &[&str]) -> Result<(), StyleError> + Send + Sync + 'static,
    {
        self.table.insert(name.into(), Arc::new(f));
    }

    /// Looks up an extension by name.
    pub fn get(&self, name: &str) -> Result<Arc<ExtensionFn>, StyleError> {
        self.table
            .get(name)
            .cloned()
            .ok_or_else(|| StyleError::UnknownExtension {
                name: name.to_string(),
            })
    }

    /// Returns true if an extension is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Removes an extension, returning true if it existed.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.table.remove(name).is_some()
    }

    /// Returns registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.table.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered extensions.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if no extensions are registered.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl fmt::Debug for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extensions")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut extensions = Extensions::new();
        extensions.register("noop", |_, _| Ok(()));
        assert!(extensions.contains("noop"));
        assert!(extensions.get("noop").is_ok());
        assert_eq!(extensions.len(), 1);
    }

    #[test]
    fn test_get_unknown() {
        let extensions = Extensions::new();
        let err = extensions.get("missing").err().unwrap();
        assert_eq!(
            err,
            StyleError::UnknownExtension {
                name: "missing".into()
            }
        );
    }

    #[test]
    fn test_register_replaces() {
        let mut extensions = Extensions::new();
        extensions.register("paint", |styles, _| {
            styles.declare("a", "color", "red");
            Ok(())
        });
        extensions.register("paint", |styles, _| {
            styles.declare("a", "color", "blue");
            Ok(())
        });

        let mut styles = StyleMap::new();
        (extensions.get("paint").unwrap())(&mut styles, &[]).unwrap();
        assert_eq!(styles.value("a", "color"), Some("blue"));
        assert_eq!(extensions.len(), 1);
    }

    #[test]
    fn test_unregister_and_names() {
        let mut extensions = Extensions::new();
        extensions.register("b", |_, _| Ok(()));
        extensions.register("a", |_, _| Ok(()));
        assert_eq!(extensions.names(), vec!["a", "b"]);

        assert!(extensions.unregister("a"));
        assert!(!extensions.unregister("a"));
        assert_eq!(extensions.names(), vec!["b"]);
    }

    #[test]
    fn test_is_empty() {
        let mut extensions = Extensions::new();
        assert!(extensions.is_empty());
        extensions.register("noop", |_, _| Ok(()));
        assert!(!extensions.is_empty());
    }

    #[test]
    fn test_debug_lists_names() {
        let mut extensions = Extensions::new();
        extensions.register("hide", |_, _| Ok(()));
        assert!(format!("{:?}", extensions).contains("hide"));
    }
}
