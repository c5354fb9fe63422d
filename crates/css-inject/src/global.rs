//! Process-wide registry.
//!
//! Most code should own a [`StyleRegistry`] and pass it where it is needed.
//! For hosts that want a single page-wide registry, this module keeps one
//! behind a mutex. It is constructed on first use with the default
//! configuration and is only ever reinitialized by [`reset_global`].
//!
//! On `wasm32` targets `with_web_global` keeps a second, thread-local
//! registry that flushes into the page's DOM.

use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;

use crate::document::HeadlessDocument;
use crate::registry::StyleRegistry;

static GLOBAL_REGISTRY: Lazy<Mutex<StyleRegistry<HeadlessDocument>>> =
    Lazy::new(|| Mutex::new(StyleRegistry::new()));

/// Runs `f` with exclusive access to the process-wide registry.
///
/// A panic inside `f` does not disable the registry; the poisoned lock is
/// recovered on the next call. Calling `with_global` or [`reset_global`]
/// from inside `f` deadlocks, since the lock is not reentrant.
///
/// # Example
///
/// ```rust
/// use css_inject::global::with_global;
///
/// with_global(|registry| {
///     registry.add("#banner", "display", "none")?.apply()?;
///     Ok::<(), css_inject::StyleError>(())
/// })
/// .unwrap();
/// ```
pub fn with_global<R>(f: impl FnOnce(&mut StyleRegistry<HeadlessDocument>) -> R) -> R {
    let mut guard = GLOBAL_REGISTRY
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Replaces the process-wide registry with a fresh one: no styles, no
/// extensions, default configuration, and an empty document.
pub fn reset_global() {
    with_global(|registry| *registry = StyleRegistry::new());
}

#[cfg(target_arch = "wasm32")]
mod web_global {
    use std::cell::RefCell;

    use crate::registry::StyleRegistry;
    use crate::style::StyleError;
    use crate::web::WebDocument;

    thread_local! {
        static WEB_REGISTRY: RefCell<Option<StyleRegistry<WebDocument>>> = RefCell::new(None);
    }

    /// Runs `f` with the page-wide registry bound to the current window's
    /// document, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Environment`] when there is no window document,
    /// or when called again from inside `f`.
    pub fn with_web_global<R>(
        f: impl FnOnce(&mut StyleRegistry<WebDocument>) -> R,
    ) -> Result<R, StyleError> {
        WEB_REGISTRY.with(|cell| {
            let mut slot = cell
                .try_borrow_mut()
                .map_err(|_| StyleError::environment("web registry is already in use"))?;
            if slot.is_none() {
                *slot = Some(StyleRegistry::with_document(WebDocument::current()?));
            }
            match slot.as_mut() {
                Some(registry) => Ok(f(registry)),
                None => Err(StyleError::environment("web registry unavailable")),
            }
        })
    }

    /// Drops the page-wide web registry; the next call rebuilds it.
    pub fn reset_web_global() -> Result<(), StyleError> {
        WEB_REGISTRY.with(|cell| {
            let mut slot = cell
                .try_borrow_mut()
                .map_err(|_| StyleError::environment("web registry is already in use"))?;
            *slot = None;
            Ok(())
        })
    }
}

#[cfg(target_arch = "wasm32")]
pub use web_global::{reset_web_global, with_web_global};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ELEMENT_ID;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_global_state_persists_between_calls() {
        reset_global();
        with_global(|registry| {
            registry.add("#a", "x", "1").unwrap();
        });
        let css = with_global(|registry| registry.parse());
        assert_eq!(css, "#a {x:1;}");
        reset_global();
    }

    #[test]
    #[serial]
    fn test_reset_global_clears_styles_and_document() {
        reset_global();
        with_global(|registry| {
            registry.add("#a", "x", "1").unwrap().apply().unwrap();
            assert!(registry.document().style_text(DEFAULT_ELEMENT_ID).is_some());
        });

        reset_global();
        with_global(|registry| {
            assert!(registry.styles().is_empty());
            assert!(!registry.is_applied());
            assert_eq!(registry.document().style_elements().count(), 0);
        });
    }
}
