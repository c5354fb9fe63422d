//! Browser DOM backend (wasm32 only).

use web_sys::Element;

use crate::document::Document;
use crate::style::StyleError;

/// A [`Document`] backed by the page's DOM through `web-sys`.
///
/// ```rust,ignore
/// use css_inject::{StyleRegistry, WebDocument};
///
/// let mut registry = StyleRegistry::with_document(WebDocument::current()?);
/// registry.add("#content", "height", "200px")?.apply()?;
/// ```
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    /// Uses the document of the current window.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Environment`] outside a browser window context,
    /// such as in a worker.
    pub fn current() -> Result<Self, StyleError> {
        let window =
            web_sys::window().ok_or_else(|| StyleError::environment("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| StyleError::environment("window has no document"))?;
        Ok(Self { document })
    }

    /// Wraps an existing DOM document.
    pub fn from_document(document: web_sys::Document) -> Self {
        Self { document }
    }
}

fn js_error(context: &str, err: impl std::fmt::Debug) -> StyleError {
    StyleError::environment(format!("{}: {:?}", context, err))
}

impl Document for WebDocument {
    type Element = Element;

    fn find_by_id(&self, id: &str) -> Result<Option<Element>, StyleError> {
        match self.document.get_element_by_id(id) {
            Some(element) if !element.tag_name().eq_ignore_ascii_case("style") => {
                Err(StyleError::environment(format!(
                    "element #{} is a <{}>, not a <style>",
                    id,
                    element.tag_name().to_ascii_lowercase()
                )))
            }
            found => Ok(found),
        }
    }

    fn create_style_element(&mut self, id: &str) -> Result<Element, StyleError> {
        let element = self
            .document
            .create_element("style")
            .map_err(|e| js_error("createElement failed", e))?;
        element.set_id(id);
        Ok(element)
    }

    fn append_to_head(&mut self, element: &Element) -> Result<(), StyleError> {
        let head = self
            .document
            .head()
            .ok_or_else(|| StyleError::environment("document has no head element"))?;
        head.append_child(element)
            .map_err(|e| js_error("appendChild failed", e))?;
        Ok(())
    }

    fn set_text_content(&mut self, element: &Element, text: &str) -> Result<(), StyleError> {
        element.set_text_content(Some(text));
        Ok(())
    }
}
