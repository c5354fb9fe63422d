//! Two-level style mapping: selector -> property -> value.
//!
//! Both levels keep insertion order. Overwriting a key keeps its original
//! position and removal keeps the relative order of what remains, so the
//! serialized stylesheet is stable for a given sequence of mutations.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::error::StyleError;

/// Property declarations for a single selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyMap {
    declarations: IndexMap<String, String>,
}

impl PropertyMap {
    /// Creates an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration, returning an updated map for chaining.
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Sets `property` to `value`, returning the value it replaced.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.declarations.insert(property.into(), value.into())
    }

    /// Returns the value declared for `property`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations.get(property).map(String::as_str)
    }

    /// Removes `property`, returning its value if it was declared.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        self.declarations.shift_remove(property)
    }

    /// Returns true if `property` is declared.
    pub fn contains(&self, property: &str) -> bool {
        self.declarations.contains_key(property)
    }

    /// Returns the number of declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns true if no properties are declared.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterates over `(property, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(property, value)| (property.as_str(), value.as_str()))
    }

    fn write_block(&self, selector: &str, out: &mut impl fmt::Write) -> fmt::Result {
        write!(out, "{} {{", selector)?;
        for (property, value) in self.iter() {
            write!(out, "{}:{};", property, value)?;
        }
        out.write_char('}')
    }
}

impl<P: Into<String>, V: Into<String>> FromIterator<(P, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (P, V)>>(iter: I) -> Self {
        let mut map = PropertyMap::new();
        for (property, value) in iter {
            map.set(property, value);
        }
        map
    }
}

/// A mapping from CSS selector to its [`PropertyMap`].
///
/// Every selector present maps to a property map, possibly an empty one.
/// An empty map serializes to an empty rule (`"#a {}"`).
///
/// # Example
///
/// ```rust
/// use css_inject::StyleMap;
///
/// let styles = StyleMap::new()
///     .with("#content", "height", "200px")
///     .with("#content", "width", "50%");
///
/// assert_eq!(styles.to_css(), "#content {height:200px;width:50%;}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap {
    rules: IndexMap<String, PropertyMap>,
}

impl StyleMap {
    /// Creates an empty style map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration, returning an updated map for chaining.
    pub fn with(
        mut self,
        selector: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.declare(selector, property, value);
        self
    }

    /// Sets `selector { property: value }`, creating the selector entry if needed.
    ///
    /// Returns the value it replaced. No validation is performed here; the
    /// registry checks arguments before calling this.
    pub fn declare(
        &mut self,
        selector: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.rules
            .entry(selector.into())
            .or_default()
            .set(property, value)
    }

    /// Returns the property map for `selector`, creating an empty one if absent.
    pub fn selector_mut(&mut self, selector: impl Into<String>) -> &mut PropertyMap {
        self.rules.entry(selector.into()).or_default()
    }

    /// Returns the property map for `selector`.
    pub fn get(&self, selector: &str) -> Option<&PropertyMap> {
        self.rules.get(selector)
    }

    /// Returns the value declared for `property` under `selector`.
    pub fn value(&self, selector: &str, property: &str) -> Option<&str> {
        self.rules.get(selector)?.get(property)
    }

    /// Returns true if `selector` has an entry, even an empty one.
    pub fn contains_selector(&self, selector: &str) -> bool {
        self.rules.contains_key(selector)
    }

    /// Removes the whole entry for `selector`.
    pub fn remove_selector(&mut self, selector: &str) -> Option<PropertyMap> {
        self.rules.shift_remove(selector)
    }

    /// Removes a single property, leaving the selector entry in place.
    pub fn remove_property(&mut self, selector: &str, property: &str) -> Option<String> {
        self.rules.get_mut(selector)?.remove(property)
    }

    /// Deep-merges `other` into this map. Overlapping declarations take
    /// `other`'s value; everything else is left untouched.
    pub fn merge(&mut self, other: &StyleMap) {
        for (selector, properties) in other.iter() {
            let target = self.selector_mut(selector);
            for (property, value) in properties.iter() {
                target.set(property, value);
            }
        }
    }

    /// Checks that every selector, property, and value is a non-empty string.
    pub fn validate(&self) -> Result<(), StyleError> {
        for (selector, properties) in self.iter() {
            if selector.trim().is_empty() {
                return Err(StyleError::malformed(selector, None, "selector is empty"));
            }
            for (property, value) in properties.iter() {
                if property.trim().is_empty() {
                    return Err(StyleError::malformed(
                        selector,
                        Some(property),
                        "property name is empty",
                    ));
                }
                if value.trim().is_empty() {
                    return Err(StyleError::malformed(
                        selector,
                        Some(property),
                        "value is empty",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Returns the number of selectors.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no selectors are present.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Removes every selector.
    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Iterates over selectors in insertion order.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Iterates over `(selector, properties)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyMap)> {
        self.rules
            .iter()
            .map(|(selector, properties)| (selector.as_str(), properties))
    }

    /// Serializes the map as a stylesheet, emitting empty selectors as `"sel {}"`.
    pub fn to_css(&self) -> String {
        self.to_css_with(false)
    }

    /// Serializes the map, optionally skipping selectors with no declarations.
    pub fn to_css_with(&self, omit_empty_rules: bool) -> String {
        let mut css = String::new();
        for (selector, properties) in self.iter() {
            if omit_empty_rules && properties.is_empty() {
                continue;
            }
            // Writing into a String cannot fail.
            let _ = properties.write_block(selector, &mut css);
        }
        css
    }
}

impl fmt::Display for StyleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (selector, properties) in self.iter() {
            properties.write_block(selector, f)?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, PropertyMap)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (S, PropertyMap)>>(iter: I) -> Self {
        let mut map = StyleMap::new();
        for (selector, properties) in iter {
            map.rules.insert(selector.into(), properties);
        }
        map
    }
}
