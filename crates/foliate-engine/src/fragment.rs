use crate::dom::Element;
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum FragmentError {
    #[error("Fragment not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed fragment at {path}: {reason}")]
    Malformed { path: String, reason: String },
}

/// Supplies authored content fragments as element subtrees.
///
/// Fragment retrieval and parsing live outside the engine; decorators only
/// see the resulting tree.
pub trait FragmentSource {
    fn load(&self, path: &str) -> Result<Element, FragmentError>;
}

/// Load a fragment, degrading to `None` on failure.
///
/// A missing or malformed fragment must never surface an error to the page;
/// the caller renders the affected region empty instead.
pub fn load_or_empty(source: &dyn FragmentSource, path: &str) -> Option<Element> {
    match source.load(path) {
        Ok(fragment) => Some(fragment),
        Err(err) => {
            log::warn!("fragment {path} unavailable, rendering region empty: {err}");
            None
        }
    }
}

/// Fragment source backed by pre-built trees, keyed by path.
#[derive(Debug, Default)]
pub struct InMemoryFragmentSource {
    fragments: BTreeMap<String, Element>,
}

impl InMemoryFragmentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &str, fragment: Element) {
        self.fragments.insert(path.to_string(), fragment);
    }
}

impl FragmentSource for InMemoryFragmentSource {
    fn load(&self, path: &str) -> Result<Element, FragmentError> {
        self.fragments
            .get(path)
            .cloned()
            .ok_or_else(|| FragmentError::NotFound(path.to_string()))
    }
}
