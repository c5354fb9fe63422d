//! Style registry errors.

/// Error returned by registry, loader, and document operations.
///
/// Variants fall into two classes: argument errors, raised when a caller hands
/// in empty or malformed style data, and environment errors, raised when the
/// host document cannot be written. [`StyleError::is_argument_error`] and
/// [`StyleError::is_environment_error`] tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// A selector, property, or value passed to `add` was empty
    EmptyArgument { argument: &'static str },
    /// An entry of a merged style mapping does not have the expected shape
    MalformedEntry {
        selector: String,
        property: Option<String>,
        reason: String,
    },
    /// No extension is registered under the requested name
    UnknownExtension { name: String },
    /// The host document is missing or rejected a write
    Environment { message: String },
    /// A style file has an extension no loader understands
    UnsupportedFormat { path: String },
    /// A style source could not be read or decoded
    Load { source_name: String, message: String },
}

impl StyleError {
    /// Shorthand for building an [`StyleError::Environment`] error.
    pub fn environment(message: impl Into<String>) -> Self {
        StyleError::Environment {
            message: message.into(),
        }
    }

    pub(crate) fn malformed(
        selector: impl Into<String>,
        property: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        StyleError::MalformedEntry {
            selector: selector.into(),
            property: property.map(str::to_string),
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by bad caller input.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            StyleError::EmptyArgument { .. }
                | StyleError::MalformedEntry { .. }
                | StyleError::UnknownExtension { .. }
        )
    }

    /// Returns true for errors raised by the document boundary.
    pub fn is_environment_error(&self) -> bool {
        matches!(self, StyleError::Environment { .. })
    }
}

impl std::fmt::Display for StyleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleError::EmptyArgument { argument } => {
                write!(f, "{} must be a non-empty string", argument)
            }
            StyleError::MalformedEntry {
                selector,
                property: Some(property),
                reason,
            } => {
                write!(
                    f,
                    "malformed style entry '{}' -> '{}': {}",
                    selector, property, reason
                )
            }
            StyleError::MalformedEntry {
                selector,
                property: None,
                reason,
            } => {
                write!(f, "malformed style entry '{}': {}", selector, reason)
            }
            StyleError::UnknownExtension { name } => {
                write!(f, "no registry extension named '{}'", name)
            }
            StyleError::Environment { message } => {
                write!(f, "document unavailable: {}", message)
            }
            StyleError::UnsupportedFormat { path } => {
                write!(
                    f,
                    "unsupported style file '{}' (expected .json, .yaml or .yml)",
                    path
                )
            }
            StyleError::Load {
                source_name,
                message,
            } => {
                write!(f, "failed to load styles from {}: {}", source_name, message)
            }
        }
    }
}

impl std::error::Error for StyleError {}
