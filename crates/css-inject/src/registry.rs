//! The style registry.
//!
//! A [`StyleRegistry`] collects declarations in memory and writes them into
//! its document as a single stylesheet only when [`apply`](StyleRegistry::apply)
//! is called. Any number of `add`/`remove` calls between two flushes cost one
//! document write.
//!
//! # Design
//!
//! Mutations and serialization never touch the document. `apply` is the only
//! operation with a side effect; it creates the style element lazily, adopts
//! an element already carrying the configured id if the page shipped one, and
//! replaces the element's full text on every call.

use std::fmt;
use std::path::Path;

use log::{debug, trace, warn};
use serde_json::Value;

use crate::config::RegistryConfig;
use crate::document::{Document, HeadlessDocument};
use crate::extension::Extensions;
use crate::style::{loader, StyleError, StyleMap};

/// Batches style declarations and flushes them into a document.
///
/// # Example
///
/// ```rust
/// use css_inject::StyleRegistry;
///
/// let mut registry = StyleRegistry::new();
/// registry
///     .add("#content", "height", "200px")?
///     .add("#content", "width", "50%")?
///     .remove("#content", Some("width"))
///     .apply()?;
///
/// assert_eq!(registry.parse(), "#content {height:200px;}");
/// assert_eq!(
///     registry.document().style_text("css-inject-style"),
///     Some("#content {height:200px;}")
/// );
/// # Ok::<(), css_inject::StyleError>(())
/// ```
pub struct StyleRegistry<D: Document = HeadlessDocument> {
    styles: StyleMap,
    document: D,
    injected: Option<D::Element>,
    // Created by a failed `apply` but never attached; retried before creating another.
    pending: Option<D::Element>,
    config: RegistryConfig,
    extensions: Extensions,
}

impl StyleRegistry<HeadlessDocument> {
    /// Creates an empty registry backed by a [`HeadlessDocument`].
    pub fn new() -> Self {
        Self::with_document(HeadlessDocument::new())
    }
}

impl Default for StyleRegistry<HeadlessDocument> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Document> StyleRegistry<D> {
    /// Creates an empty registry that flushes into `document`.
    pub fn with_document(document: D) -> Self {
        Self {
            styles: StyleMap::new(),
            document,
            injected: None,
            pending: None,
            config: RegistryConfig::default(),
            extensions: Extensions::new(),
        }
    }

    /// Replaces the configuration, returning an updated registry.
    pub fn with_config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Declares `selector { property: value }`, overwriting an earlier value
    /// for the same selector and property.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::EmptyArgument`] if any argument is empty or only
    /// whitespace. The registry is unchanged in that case.
    pub fn add(
        &mut self,
        selector: &str,
        property: &str,
        value: &str,
    ) -> Result<&mut Self, StyleError> {
        for (argument, text) in [
            ("selector", selector),
            ("property", property),
            ("value", value),
        ] {
            if text.trim().is_empty() {
                warn!("rejected declaration with empty {}", argument);
                return Err(StyleError::EmptyArgument { argument });
            }
        }

        trace!("add {} {{{}:{}}}", selector, property, value);
        self.styles.declare(selector, property, value);
        Ok(self)
    }

    /// Deep-merges `source` into the registry.
    ///
    /// Declarations present in both take `source`'s value; everything else is
    /// kept. The merge is all-or-nothing: `source` is checked first and nothing
    /// is written if any entry is invalid.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::MalformedEntry`] for the first empty selector,
    /// property, or value found in `source`.
    pub fn object_add(&mut self, source: &StyleMap) -> Result<&mut Self, StyleError> {
        if let Err(err) = source.validate() {
            warn!("rejected style merge: {}", err);
            return Err(err);
        }
        trace!("merging {} selectors", source.len());
        self.styles.merge(source);
        Ok(self)
    }

    /// Deep-merges an untyped `{ selector: { property: value } }` value.
    ///
    /// See [`loader::from_value`] for the accepted shape.
    pub fn object_add_value(&mut self, source: &Value) -> Result<&mut Self, StyleError> {
        let styles = loader::from_value(source)?;
        self.object_add(&styles)
    }

    /// Deep-merges styles from a JSON document.
    pub fn object_add_json(&mut self, source: &str) -> Result<&mut Self, StyleError> {
        let styles = loader::from_json_str(source)?;
        self.object_add(&styles)
    }

    /// Deep-merges styles from a YAML document.
    pub fn object_add_yaml(&mut self, source: &str) -> Result<&mut Self, StyleError> {
        let styles = loader::from_yaml_str(source)?;
        self.object_add(&styles)
    }

    /// Deep-merges styles from a `.json`, `.yaml`, or `.yml` file.
    pub fn object_add_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, StyleError> {
        let styles = loader::from_file(path)?;
        self.object_add(&styles)
    }

    /// Removes a whole selector, or a single property when `property` is given.
    ///
    /// Unknown selectors and properties are ignored. A selector whose last
    /// property is removed keeps an empty entry unless
    /// [`RegistryConfig::prune_empty_selectors`] is set.
    pub fn remove(&mut self, selector: &str, property: Option<&str>) -> &mut Self {
        match property {
            None => {
                if self.styles.remove_selector(selector).is_some() {
                    trace!("removed selector {}", selector);
                }
            }
            Some(property) => {
                if self.styles.remove_property(selector, property).is_none() {
                    return self;
                }
                trace!("removed {} from {}", property, selector);
                let emptied = self
                    .styles
                    .get(selector)
                    .map(|properties| properties.is_empty())
                    .unwrap_or(false);
                if emptied && self.config.prune_empty_selectors {
                    trace!("pruned empty selector {}", selector);
                    self.styles.remove_selector(selector);
                }
            }
        }
        self
    }

    /// Serializes the registry as a stylesheet.
    ///
    /// Each selector becomes `"selector {property:value;...}"`, in insertion
    /// order, with no separator between blocks. Calling this has no effect on
    /// the document.
    pub fn parse(&self) -> String {
        self.styles.to_css_with(self.config.omit_empty_rules)
    }

    /// Writes the current stylesheet into the document.
    ///
    /// The first call creates the style element (or adopts one already in the
    /// head with the configured id); later calls reuse it. The element's text
    /// is replaced in full each time.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Environment`] if the document cannot create,
    /// attach, or write the element.
    pub fn apply(&mut self) -> Result<&mut Self, StyleError> {
        let css = self.parse();
        let element = match self.injected.take() {
            Some(element) => element,
            None => self.inject()?,
        };

        let written = self.document.set_text_content(&element, &css);
        self.injected = Some(element);
        written?;

        debug!(
            "applied {} selectors ({} bytes) to #{}",
            self.styles.len(),
            css.len(),
            self.config.element_id
        );
        Ok(self)
    }

    fn inject(&mut self) -> Result<D::Element, StyleError> {
        let id = self.config.element_id.as_str();
        if let Some(existing) = self.document.find_by_id(id)? {
            debug!("adopting existing style element #{}", id);
            return Ok(existing);
        }

        let element = match self.pending.take() {
            Some(element) => element,
            None => self.document.create_style_element(id)?,
        };
        if let Err(err) = self.document.append_to_head(&element) {
            self.pending = Some(element);
            return Err(err);
        }
        debug!("injected style element #{}", id);
        Ok(element)
    }

    /// Returns true once `apply` has attached a style element.
    pub fn is_applied(&self) -> bool {
        self.injected.is_some()
    }

    /// Returns the document the registry flushes into.
    pub fn document(&self) -> &D {
        &self.document
    }

    /// Returns the collected styles.
    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    /// Returns the collected styles for direct editing.
    ///
    /// Edits made here skip argument checks.
    pub fn styles_mut(&mut self) -> &mut StyleMap {
        &mut self.styles
    }

    /// Replaces all collected styles.
    pub fn set_styles(&mut self, styles: StyleMap) -> &mut Self {
        self.styles = styles;
        self
    }

    /// Takes the collected styles, leaving the registry empty.
    pub fn take_styles(&mut self) -> StyleMap {
        std::mem::take(&mut self.styles)
    }

    /// Clears all collected styles. The document keeps its current content
    /// until the next `apply`.
    pub fn reset(&mut self) -> &mut Self {
        self.styles.clear();
        self
    }

    /// Registers a named extension. See [`crate::extension`].
    pub fn register_extension<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&mut StyleMap, &[&str]) -> Result<(), StyleError> + Send + Sync + 'static,
    {
        self.extensions.register(name, f);
        self
    }

    /// Returns true if an extension is registered under `name`.
    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    /// Returns the extension table.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Runs the extension registered under `name` against the collected styles.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownExtension`] if nothing is registered under
    /// `name`, or whatever error the extension itself returns.
    pub fn call_extension(&mut self, name: &str, args: &[&str]) -> Result<&mut Self, StyleError> {
        let extension = self.extensions.get(name)?;
        trace!("calling extension {} with {} args", name, args.len());
        extension(&mut self.styles, args)?;
        Ok(self)
    }
}

impl<D> fmt::Debug for StyleRegistry<D>
where
    D: Document + fmt::Debug,
    D::Element: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleRegistry")
            .field("styles", &self.styles)
            .field("document", &self.document)
            .field("injected", &self.injected)
            .field("pending", &self.pending)
            .field("config", &self.config)
            .field("extensions", &self.extensions)
            .finish()
    }
}
