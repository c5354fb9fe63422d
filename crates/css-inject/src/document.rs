//! Host document abstraction.
//!
//! This module defines the [`Document`] trait, the only surface a registry
//! needs from the environment it renders into: create a style element, find
//! one by id, attach it to the head, and replace its text. The default
//! implementation is [`HeadlessDocument`], an in-memory head that works
//! anywhere; on `wasm32` targets `WebDocument` writes to
//! the browser DOM.

use crate::style::StyleError;

/// A document that can hold injected style elements.
///
/// Implementations report host failures (no document, no head, a rejected
/// DOM call) as [`StyleError::Environment`].
pub trait Document {
    /// Handle to a style element owned by the document.
    type Element;

    /// Finds an element already attached to the document by its id.
    ///
    /// An element with that id which is not a `<style>` element is reported
    /// as an environment error rather than adopted.
    fn find_by_id(&self, id: &str) -> Result<Option<Self::Element>, StyleError>;

    /// Creates a detached style element carrying the given id.
    fn create_style_element(&mut self, id: &str) -> Result<Self::Element, StyleError>;

    /// Attaches an element to the document head.
    fn append_to_head(&mut self, element: &Self::Element) -> Result<(), StyleError>;

    /// Replaces the full text content of an element.
    fn set_text_content(&mut self, element: &Self::Element, text: &str) -> Result<(), StyleError>;
}

/// Handle to a style node inside a [`HeadlessDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A style element held by a [`HeadlessDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleNode {
    tag: String,
    id: String,
    text: String,
    attached: bool,
}

impl StyleNode {
    /// Lowercase tag name, `"style"` for elements created by a registry.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Value of the element's `id` attribute.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current text content.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// In-memory document with a head of style elements.
///
/// Useful for server-side rendering, where the head is emitted as HTML with
/// [`render_head`](Self::render_head), and for tests.
///
/// # Example
///
/// ```rust
/// use css_inject::{HeadlessDocument, StyleRegistry};
///
/// let mut registry = StyleRegistry::with_document(HeadlessDocument::new());
/// registry.add("#content", "height", "200px").unwrap();
/// registry.apply().unwrap();
///
/// assert_eq!(
///     registry.document().render_head(),
///     r#"<style id="css-inject-style">#content {height:200px;}</style>"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct HeadlessDocument {
    nodes: Vec<StyleNode>,
    head: Option<Vec<NodeId>>,
}

impl HeadlessDocument {
    /// Creates a document with an empty head.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: Some(Vec::new()),
        }
    }

    /// Creates a document without a head; appending to it fails.
    pub fn detached() -> Self {
        Self {
            nodes: Vec::new(),
            head: None,
        }
    }

    /// Appends a pre-existing style element, as if it came with the page markup.
    pub fn with_style(self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.with_element("style", id, text)
    }

    /// Appends a pre-existing element of any tag to the head.
    pub fn with_element(
        mut self,
        tag: impl Into<String>,
        id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let node = NodeId(self.nodes.len());
        self.nodes.push(StyleNode {
            tag: tag.into().to_ascii_lowercase(),
            id: id.into(),
            text: text.into(),
            attached: true,
        });
        self.head.get_or_insert_with(Vec::new).push(node);
        self
    }

    /// Returns true if the document has a head to append to.
    pub fn has_head(&self) -> bool {
        self.head.is_some()
    }

    /// Returns the number of elements ever created, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates over the elements attached to the head, in order.
    pub fn style_elements(&self) -> impl Iterator<Item = &StyleNode> {
        self.head
            .iter()
            .flatten()
            .filter_map(|node| self.nodes.get(node.0))
    }

    /// Returns the text of the attached element with the given id.
    pub fn style_text(&self, id: &str) -> Option<&str> {
        self.style_elements()
            .find(|node| node.id == id)
            .map(StyleNode::text)
    }

    /// Renders the head's style elements as HTML, one per line.
    pub fn render_head(&self) -> String {
        self.style_elements()
            .map(|node| {
                format!(
                    r#"<{tag} id="{}">{}</{tag}>"#,
                    node.id.replace('"', "&quot;"),
                    node.text.replace("</", "<\\/"),
                    tag = node.tag
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Removes every element and restores an empty head.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = Some(Vec::new());
    }

    fn node_mut(&mut self, element: &NodeId) -> Result<&mut StyleNode, StyleError> {
        self.nodes
            .get_mut(element.0)
            .ok_or_else(|| StyleError::environment(format!("unknown style node {}", element.0)))
    }
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for HeadlessDocument {
    type Element = NodeId;

    fn find_by_id(&self, id: &str) -> Result<Option<NodeId>, StyleError> {
        let found = self.head.iter().flatten().copied().find(|node| {
            self.nodes
                .get(node.0)
                .map(|n| n.id == id)
                .unwrap_or(false)
        });
        match found {
            Some(node) if self.nodes[node.0].tag != "style" => Err(StyleError::environment(
                format!("element #{} is a <{}>, not a <style>", id, self.nodes[node.0].tag),
            )),
            found => Ok(found),
        }
    }

    fn create_style_element(&mut self, id: &str) -> Result<NodeId, StyleError> {
        let node = NodeId(self.nodes.len());
        self.nodes.push(StyleNode {
            tag: "style".to_string(),
            id: id.to_string(),
            text: String::new(),
            attached: false,
        });
        Ok(node)
    }

    fn append_to_head(&mut self, element: &NodeId) -> Result<(), StyleError> {
        if self.head.is_none() {
            return Err(StyleError::environment("document has no head element"));
        }
        let node = self.node_mut(element)?;
        if node.attached {
            return Ok(());
        }
        node.attached = true;
        if let Some(head) = self.head.as_mut() {
            head.push(*element);
        }
        Ok(())
    }

    fn set_text_content(&mut self, element: &NodeId, text: &str) -> Result<(), StyleError> {
        let node = self.node_mut(element)?;
        node.text.clear();
        node.text.push_str(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_is_detached_until_appended() {
        let mut doc = HeadlessDocument::new();
        let node = doc.create_style_element("s").unwrap();
        assert_eq!(doc.find_by_id("s").unwrap(), None);
        assert_eq!(doc.style_elements().count(), 0);

        doc.append_to_head(&node).unwrap();
        assert_eq!(doc.find_by_id("s").unwrap(), Some(node));
        assert_eq!(doc.style_elements().count(), 1);
    }

    #[test]
    fn test_append_twice_attaches_once() {
        let mut doc = HeadlessDocument::new();
        let node = doc.create_style_element("s").unwrap();
        doc.append_to_head(&node).unwrap();
        doc.append_to_head(&node).unwrap();
        assert_eq!(doc.style_elements().count(), 1);
    }

    #[test]
    fn test_set_text_replaces_content() {
        let mut doc = HeadlessDocument::new();
        let node = doc.create_style_element("s").unwrap();
        doc.append_to_head(&node).unwrap();
        doc.set_text_content(&node, "a {x:1;}").unwrap();
        doc.set_text_content(&node, "b {y:2;}").unwrap();
        assert_eq!(doc.style_text("s"), Some("b {y:2;}"));
    }

    #[test]
    fn test_detached_document_rejects_append() {
        let mut doc = HeadlessDocument::detached();
        assert!(!doc.has_head());
        let node = doc.create_style_element("s").unwrap();
        let err = doc.append_to_head(&node).unwrap_err();
        assert!(err.is_environment_error());
    }

    #[test]
    fn test_unknown_node_is_environment_error() {
        let mut other = HeadlessDocument::new();
        let foreign = other.create_style_element("s").unwrap();

        let mut doc = HeadlessDocument::new();
        let err = doc.set_text_content(&foreign, "x").unwrap_err();
        assert!(err.is_environment_error());
    }

    #[test]
    fn test_with_style_is_findable() {
        let doc = HeadlessDocument::new().with_style("server", "p {margin:0;}");
        assert!(doc.find_by_id("server").unwrap().is_some());
        assert_eq!(doc.style_text("server"), Some("p {margin:0;}"));
    }

    #[test]
    fn test_find_by_id_rejects_non_style_element() {
        let doc = HeadlessDocument::new().with_element("DIV", "s", "");
        let err = doc.find_by_id("s").unwrap_err();
        assert!(err.is_environment_error());
        assert!(err.to_string().contains("<div>"));
    }

    #[test]
    fn test_node_count_includes_detached() {
        let mut doc = HeadlessDocument::new().with_style("a", "");
        doc.create_style_element("b").unwrap();
        assert_eq!(doc.node_count(), 2);
        assert_eq!(doc.style_elements().count(), 1);
        let node = doc.style_elements().next().unwrap();
        assert_eq!((node.tag(), node.id(), node.text()), ("style", "a", ""));
    }

    #[test]
    fn test_render_head_escapes_closing_tags() {
        let doc = HeadlessDocument::new()
            .with_style("a", "p {x:1;}")
            .with_style("b", "q {content:\"</style>\";}");
        let html = doc.render_head();
        assert_eq!(
            html,
            "<style id=\"a\">p {x:1;}</style>\n<style id=\"b\">q {content:\"<\\/style>\";}</style>"
        );
    }

    #[test]
    fn test_clear_restores_empty_head() {
        let mut doc = HeadlessDocument::detached().with_style("a", "x");
        doc.clear();
        assert!(doc.has_head());
        assert_eq!(doc.style_elements().count(), 0);
    }
}
