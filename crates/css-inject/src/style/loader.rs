//! Building [`StyleMap`]s from untyped data.
//!
//! Style data often arrives as JSON or YAML documents shaped like
//! `{ selector: { property: value } }`. This module checks that shape strictly
//! and reports the first offending entry:
//!
//! - the top level must be an object of selectors
//! - every selector must map to an object of properties
//! - every value must be a non-empty string (numbers, booleans, nulls and
//!   nested objects are rejected, not coerced)
//!
//! Files are dispatched on their extension:
//!
//! | Extension       | Format |
//! |-----------------|--------|
//! | `.json`         | JSON   |
//! | `.yaml`, `.yml` | YAML   |

use std::path::Path;

use serde_json::Value;

use super::error::StyleError;
use super::map::{PropertyMap, StyleMap};

/// Recognized style file extensions.
pub const STYLE_EXTENSIONS: &[&str] = &[".json", ".yaml", ".yml"];

/// Converts an untyped two-level value into a [`StyleMap`].
///
/// # Errors
///
/// Returns [`StyleError::MalformedEntry`] naming the first entry that is not
/// a selector -> property -> string mapping.
pub fn from_value(value: &Value) -> Result<StyleMap, StyleError> {
    let selectors = value.as_object().ok_or_else(|| {
        StyleError::malformed(
            "<root>",
            None,
            format!("expected an object of selectors, found {}", kind_of(value)),
        )
    })?;

    let mut styles = StyleMap::new();
    for (selector, properties) in selectors {
        *styles.selector_mut(selector.as_str()) = property_map(selector, properties)?;
    }
    styles.validate()?;
    Ok(styles)
}

fn property_map(selector: &str, value: &Value) -> Result<PropertyMap, StyleError> {
    let properties = value.as_object().ok_or_else(|| {
        StyleError::malformed(
            selector,
            None,
            format!("expected an object of properties, found {}", kind_of(value)),
        )
    })?;

    let mut map = PropertyMap::new();
    for (property, value) in properties {
        let Some(text) = value.as_str() else {
            return Err(StyleError::malformed(
                selector,
                Some(property),
                format!("value must be a string, found {}", kind_of(value)),
            ));
        };
        map.set(property.as_str(), text);
    }
    Ok(map)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parses a JSON document into a [`StyleMap`].
pub fn from_json_str(source: &str) -> Result<StyleMap, StyleError> {
    let value: Value = serde_json::from_str(source).map_err(|e| StyleError::Load {
        source_name: "<json>".to_string(),
        message: e.to_string(),
    })?;
    from_value(&value)
}

/// Parses a YAML document into a [`StyleMap`].
pub fn from_yaml_str(source: &str) -> Result<StyleMap, StyleError> {
    let value: Value = serde_yaml::from_str(source).map_err(|e| StyleError::Load {
        source_name: "<yaml>".to_string(),
        message: e.to_string(),
    })?;
    from_value(&value)
}

/// Reads a style file, choosing the format from its extension.
///
/// # Errors
///
/// Returns [`StyleError::UnsupportedFormat`] for unknown extensions,
/// [`StyleError::Load`] if the file cannot be read or decoded, and
/// [`StyleError::MalformedEntry`] if the decoded data has the wrong shape.
pub fn from_file(path: impl AsRef<Path>) -> Result<StyleMap, StyleError> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();
    let extension = STYLE_EXTENSIONS
        .iter()
        .find(|ext| path_str.ends_with(*ext))
        .ok_or_else(|| StyleError::UnsupportedFormat {
            path: path_str.to_string(),
        })?;

    let content = std::fs::read_to_string(path).map_err(|e| StyleError::Load {
        source_name: path_str.to_string(),
        message: e.to_string(),
    })?;

    let loaded = if *extension == ".json" {
        from_json_str(&content)
    } else {
        from_yaml_str(&content)
    };

    // Swap the placeholder source name for the real path.
    loaded.map_err(|err| match err {
        StyleError::Load { message, .. } => StyleError::Load {
            source_name: path_str.to_string(),
            message,
        },
        other => other,
    })
}
