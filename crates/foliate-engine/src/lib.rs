pub mod blocks;
pub mod dom;
pub mod fragment;
pub mod header;

// Re-export key types for easier usage
pub use dom::{Element, Node};
pub use fragment::{FragmentError, FragmentSource, InMemoryFragmentSource};
pub use header::{
    HeaderController, Key, ListenerHost, ListenerKind, MenuState, NoopListenerHost, SectionId,
    SectionKind, ViewportMode, ViewportObserver, decorate_header,
};
