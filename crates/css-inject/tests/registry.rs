//! End-to-end behavior of a registry flushing into a headless document.

use css_inject::{
    HeadlessDocument, RegistryConfig, StyleError, StyleMap, StyleRegistry, DEFAULT_ELEMENT_ID,
};
use proptest::prelude::*;

fn injected(registry: &StyleRegistry) -> Option<&str> {
    registry.document().style_text(DEFAULT_ELEMENT_ID)
}

#[test]
fn test_literal_round_trip() {
    let mut registry = StyleRegistry::new();
    registry.add("#content", "height", "200px").unwrap();
    assert_eq!(registry.parse(), "#content {height:200px;}");
}

#[test]
fn test_declarations_merge_into_one_block() {
    let mut registry = StyleRegistry::new();
    registry
        .add("#a", "x", "1")
        .unwrap()
        .add("#a", "y", "2")
        .unwrap();

    let css = registry.parse();
    assert_eq!(css.matches("#a {").count(), 1);
    assert!(css.contains("x:1;"));
    assert!(css.contains("y:2;"));
}

#[test]
fn test_overwrite_replaces_value() {
    let mut registry = StyleRegistry::new();
    registry
        .add("#a", "h", "1")
        .unwrap()
        .add("#a", "h", "2")
        .unwrap();

    assert_eq!(registry.parse(), "#a {h:2;}");
}

#[test]
fn test_selector_remove() {
    let mut registry = StyleRegistry::new();
    registry.add("#a", "x", "1").unwrap().add("#a", "y", "2").unwrap();
    registry.remove("#a", None);

    assert!(!registry.parse().contains("#a"));
}

#[test]
fn test_property_remove() {
    let mut registry = StyleRegistry::new();
    registry.add("#a", "x", "1").unwrap().add("#a", "y", "2").unwrap();
    registry.remove("#a", Some("x"));

    assert_eq!(registry.parse(), "#a {y:2;}");
}

#[test]
fn test_object_add_merges_without_loss() {
    let mut registry = StyleRegistry::new();
    registry
        .set_styles(StyleMap::new().with("#a", "h", "1"))
        .object_add(
            &StyleMap::new()
                .with("#a", "w", "2")
                .with("#b", "c", "3"),
        )
        .unwrap();

    let css = registry.parse();
    assert!(css.contains("h:1;"));
    assert!(css.contains("w:2;"));
    assert!(css.contains("#b {c:3;}"));
    assert_eq!(registry.styles().value("#a", "h"), Some("1"));
    assert_eq!(registry.styles().value("#a", "w"), Some("2"));
}

#[test]
fn test_empty_reset_flushes_empty_stylesheet() {
    let mut registry = StyleRegistry::new();
    registry.add("#a", "x", "1").unwrap().apply().unwrap();
    assert_eq!(injected(&registry), Some("#a {x:1;}"));

    registry.set_styles(StyleMap::new()).apply().unwrap();
    assert_eq!(injected(&registry), Some(""));
    assert_eq!(registry.document().style_elements().count(), 1);
}

#[test]
fn test_mutations_do_not_touch_document_until_apply() {
    let mut registry = StyleRegistry::new();
    registry.add("#a", "x", "1").unwrap();
    registry.object_add(&StyleMap::new().with("#b", "y", "2")).unwrap();
    registry.remove("#a", None);
    assert_eq!(registry.document().style_elements().count(), 0);

    registry.apply().unwrap();
    assert_eq!(injected(&registry), Some("#b {y:2;}"));
}

#[test]
fn test_apply_reports_missing_head() {
    let mut registry = StyleRegistry::with_document(HeadlessDocument::detached());
    registry.add("#a", "x", "1").unwrap();

    match registry.apply() {
        Err(StyleError::Environment { message }) => assert!(message.contains("head")),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("apply should fail without a head"),
    }
}

#[test]
fn test_custom_config_end_to_end() {
    let config = RegistryConfig::new()
        .with_element_id("app")
        .prune_empty_selectors(true);
    let mut registry = StyleRegistry::new().with_config(config);

    registry
        .add("#a", "x", "1")
        .unwrap()
        .add("#b", "y", "2")
        .unwrap()
        .remove("#a", Some("x"))
        .apply()
        .unwrap();

    assert_eq!(registry.document().style_text("app"), Some("#b {y:2;}"));
    assert_eq!(
        registry.document().render_head(),
        r#"<style id="app">#b {y:2;}</style>"#
    );
}

#[derive(Debug, Clone)]
enum Op {
    Add(usize, usize, String),
    RemoveSelector(usize),
    RemoveProperty(usize, usize),
}

const SELECTORS: &[&str] = &["#a", ".b", "p > span"];
const PROPERTIES: &[&str] = &["color", "margin", "width"];

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..SELECTORS.len(), 0..PROPERTIES.len(), "[a-z0-9]{1,6}")
            .prop_map(|(s, p, v)| Op::Add(s, p, v)),
        (0..SELECTORS.len()).prop_map(Op::RemoveSelector),
        (0..SELECTORS.len(), 0..PROPERTIES.len()).prop_map(|(s, p)| Op::RemoveProperty(s, p)),
    ]
}

proptest! {
    #[test]
    fn prop_apply_is_idempotent(ops in proptest::collection::vec(op(), 0..24)) {
        let mut registry = StyleRegistry::new();
        for op in ops {
            match op {
                Op::Add(s, p, v) => {
                    registry.add(SELECTORS[s], PROPERTIES[p], &v).unwrap();
                }
                Op::RemoveSelector(s) => {
                    registry.remove(SELECTORS[s], None);
                }
                Op::RemoveProperty(s, p) => {
                    registry.remove(SELECTORS[s], Some(PROPERTIES[p]));
                }
            }
        }

        registry.apply().unwrap();
        let first = injected(&registry).map(str::to_string);
        registry.apply().unwrap();
        let second = injected(&registry).map(str::to_string);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, Some(registry.parse()));
        prop_assert_eq!(registry.document().style_elements().count(), 1);
    }
}
