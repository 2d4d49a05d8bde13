pub mod focus;
pub mod listeners;
pub mod registry;
pub mod state;
pub mod viewport;

pub use focus::{FocusManager, FocusTarget, Key};
pub use listeners::{
    LISTENER_KINDS, ListenerHost, ListenerKind, ListenerSet, NoopListenerHost, desired_listeners,
};
pub use registry::{Section, SectionId, SectionKind, SectionRegistry};
pub use state::MenuState;
pub use viewport::{ViewportMode, ViewportObserver, WIDE_BREAKPOINT};

use crate::dom::Element;
use crate::fragment::{self, FragmentSource};

const NAV_REGIONS: [&str; 3] = ["brand", "sections", "tools"];
const BUTTON_CLASSES: [&str; 4] = ["button", "primary", "secondary", "brand"];

/// Load the navigation fragment and build the decorated header.
///
/// A missing or malformed fragment degrades to a header with an empty nav
/// region; no error surfaces to the page.
pub fn decorate_header(
    source: &dyn FragmentSource,
    nav_path: &str,
    observer: ViewportObserver,
    host: Box<dyn ListenerHost>,
) -> HeaderController {
    let fragment = fragment::load_or_empty(source, nav_path);
    HeaderController::new(fragment, observer, host)
}

/// Owns the decorated navigation subtree and its disclosure state.
///
/// All interaction funnels through the `handle_*` methods; each transition
/// runs to completion, re-projects attributes onto the owned tree, and
/// reconciles the page-level listener set before the next event arrives.
pub struct HeaderController {
    root: Element,
    registry: SectionRegistry,
    observer: ViewportObserver,
    state: MenuState,
    listeners: ListenerSet,
    focus: FocusManager,
    host: Box<dyn ListenerHost>,
    scroll_locked: bool,
}

impl HeaderController {
    pub fn new(
        fragment: Option<Element>,
        observer: ViewportObserver,
        host: Box<dyn ListenerHost>,
    ) -> Self {
        let (root, registry) = build_nav(fragment);
        let state = MenuState::initial(observer.mode());

        let mut controller = Self {
            root,
            registry,
            observer,
            state,
            listeners: ListenerSet::new(),
            focus: FocusManager::new(),
            host,
            scroll_locked: false,
        };
        controller.mark_groups();
        controller.transition(state);
        controller
    }

    // --- events ---

    /// Viewport resize. A threshold crossing forces the closed/idle state
    /// for the new mode, discarding any in-flight open or expanded state.
    pub fn handle_viewport(&mut self, width: f64) {
        if let Some(mode) = self.observer.update(width) {
            self.transition(self.state.set_mode(mode));
        }
    }

    /// Hamburger click. Valid in compact mode only; silently ignored in wide.
    pub fn handle_menu_toggle(&mut self) {
        self.transition(self.state.toggle_menu());
    }

    /// Pointer activation of a section. Only disclosure groups in wide mode
    /// change state; anything else is a silent no-op.
    pub fn handle_section_activate(&mut self, id: SectionId) {
        if self.registry.is_group(id) {
            self.transition(self.state.toggle_section(id));
        }
    }

    /// A dropdown trigger received focus; binds its keydown handling.
    pub fn handle_trigger_focus(&mut self, id: SectionId) {
        if self.state.mode() == ViewportMode::Wide && self.registry.is_group(id) {
            self.focus.on_trigger_focus(id);
        }
    }

    /// A dropdown trigger lost focus; unbinds its keydown handling.
    pub fn handle_trigger_blur(&mut self, id: SectionId) {
        self.focus.on_trigger_blur(id);
    }

    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Enter | Key::Space => {
                // Only the trigger currently holding focus is listening
                if let Some(id) = self.focus.bound_trigger() {
                    self.handle_section_activate(id);
                }
            }
            Key::Escape => {
                if self.listeners.is_armed(ListenerKind::EscapeKey) {
                    self.close_on_escape();
                }
            }
            Key::Other => {}
        }
    }

    /// Focus moved; `moved_inside_nav` is whether the newly focused node is
    /// still within the nav container.
    pub fn handle_focus_out(&mut self, moved_inside_nav: bool) {
        if !moved_inside_nav && self.listeners.is_armed(ListenerKind::FocusOut) {
            self.transition(self.state.collapse_all());
        }
    }

    fn close_on_escape(&mut self) {
        let restore = match self.state {
            MenuState::WideExpanded(id) => Some(FocusTarget::SectionTrigger(id)),
            MenuState::CompactOpen => Some(FocusTarget::MenuToggle),
            MenuState::CompactClosed | MenuState::WideIdle => None,
        };
        if let Some(target) = restore {
            self.transition(self.state.collapse_all());
            self.focus.restore(target);
        }
    }

    // --- state application ---

    fn transition(&mut self, next: MenuState) {
        self.state = next;
        self.sync();
        self.listeners.reconcile(next, &mut *self.host);
    }

    /// Idempotent projection of the current state onto the owned subtree.
    fn sync(&mut self) {
        let state = self.state;
        let mode = state.mode();

        // The nav's open marker: compact follows the menu flag, wide always
        // shows its sections
        let open_marker = match mode {
            ViewportMode::Wide => "true",
            ViewportMode::Compact => {
                if state.is_open() {
                    "true"
                } else {
                    "false"
                }
            }
        };
        if let Some(nav) = self.root.find_mut("nav") {
            nav.set_attr("aria-expanded", open_marker);
        }

        if let Some(button) = self
            .root
            .find_where_mut(&|el| el.tag() == "button" && el.attr("aria-controls") == Some("nav"))
        {
            let label = if state.is_open() {
                "Close navigation"
            } else {
                "Open navigation"
            };
            button.set_attr("aria-label", label);
        }

        if let Some(sections) = self.root.find_where_mut(&|el| el.has_class("nav-sections")) {
            let display = if state == MenuState::CompactClosed {
                "none"
            } else {
                "block"
            };
            sections.set_attr("style", &format!("display: {display}"));
        }

        let registry = &self.registry;
        for_each_section_entry(&mut self.root, |id, entry| {
            let expanded = match state {
                MenuState::CompactOpen => true,
                MenuState::WideExpanded(expanded_id) => expanded_id == id,
                MenuState::CompactClosed | MenuState::WideIdle => false,
            };
            entry.set_attr("aria-expanded", if expanded { "true" } else { "false" });

            if registry.is_group(id) {
                // Triggers are tab stops in wide mode only; when the compact
                // menu is open, subsections sit in the normal tab order
                match mode {
                    ViewportMode::Wide => entry.set_attr("tabindex", "0"),
                    ViewportMode::Compact => {
                        entry.remove_attr("tabindex");
                    }
                }
            }
        });

        self.scroll_locked = state == MenuState::CompactOpen;
    }

    fn mark_groups(&mut self) {
        let registry = &self.registry;
        for_each_section_entry(&mut self.root, |id, entry| {
            if registry.is_group(id) {
                entry.add_class("nav-drop");
            }
        });
    }

    // --- accessors ---

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    /// Whether the whole menu is open (compact mode).
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Whether page background scrolling is suspended (compact menu open).
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn listener_armed(&self, kind: ListenerKind) -> bool {
        self.listeners.is_armed(kind)
    }

    pub fn armed_listener_count(&self) -> usize {
        self.listeners.armed_count()
    }

    pub fn focus(&self) -> Option<FocusTarget> {
        self.focus.focus()
    }

    /// The decorated header subtree (`div.nav-wrapper`).
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn html(&self) -> String {
        self.root.to_html()
    }
}

/// Build the nav subtree from the loaded fragment and classify its sections.
fn build_nav(fragment: Option<Element>) -> (Element, SectionRegistry) {
    let mut nav = Element::new("nav").with_attr("id", "nav");
    if let Some(mut fragment) = fragment {
        for child in fragment.take_children() {
            nav.append(child);
        }
    }

    for (region, section) in NAV_REGIONS.iter().zip(nav.child_elements_mut()) {
        section.add_class(&format!("nav-{region}"));
    }

    if let Some(brand) = nav.find_where_mut(&|el| el.has_class("nav-brand")) {
        strip_button_styling(brand);
    }

    let registry = match nav.find_where_mut(&|el| el.has_class("nav-sections")) {
        Some(sections) => {
            strip_button_styling(sections);
            SectionRegistry::build(sections)
        }
        None => SectionRegistry::default(),
    };

    let hamburger = Element::new("div").with_class("nav-hamburger").with_child(
        Element::new("button")
            .with_attr("type", "button")
            .with_attr("aria-controls", "nav")
            .with_attr("aria-label", "Open navigation")
            .with_child(Element::new("span").with_class("nav-hamburger-icon")),
    );
    nav.prepend_element(hamburger);
    nav.set_attr("aria-expanded", "false");

    let root = Element::new("div").with_class("nav-wrapper").with_child(nav);
    (root, registry)
}

/// Remove the auto-applied button styling the authoring pipeline puts on
/// plain links.
fn strip_button_styling(region: &mut Element) {
    if region.tag() == "a" {
        for class in BUTTON_CLASSES {
            region.remove_class(class);
        }
    }
    region.remove_class("button-container");
    for child in region.child_elements_mut() {
        strip_button_styling(child);
    }
}

/// Visit each top-level section entry with its registry id.
fn for_each_section_entry(root: &mut Element, mut visit: impl FnMut(SectionId, &mut Element)) {
    let Some(sections) = root.find_where_mut(&|el| el.has_class("nav-sections")) else {
        return;
    };
    let Some(list) = sections.find_mut("ul") else {
        return;
    };
    let mut index = 0;
    for entry in list.child_elements_mut() {
        if entry.tag() == "li" {
            visit(SectionId(index), entry);
            index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(href: &str, text: &str) -> Element {
        Element::new("a").with_attr("href", href).with_text(text)
    }

    fn nav_fragment() -> Element {
        let brand = Element::new("div").with_child(
            Element::new("p").with_class("button-container").with_child(
                link("/", "Acme").with_class("button").with_class("primary"),
            ),
        );
        let sub_list = Element::new("ul")
            .with_child(Element::new("li").with_child(link("/products/a", "A")))
            .with_child(Element::new("li").with_child(link("/products/b", "B")));
        let sections = Element::new("div").with_child(
            Element::new("div").with_child(
                Element::new("ul")
                    .with_child(Element::new("li").with_child(link("/home", "Home")))
                    .with_child(Element::new("li").with_text("Products").with_child(sub_list)),
            ),
        );
        let tools = Element::new("div").with_child(link("/search", "Search"));
        Element::new("div")
            .with_child(brand)
            .with_child(sections)
            .with_child(tools)
    }

    fn controller(width: f64) -> HeaderController {
        HeaderController::new(
            Some(nav_fragment()),
            ViewportObserver::new(width),
            Box::new(NoopListenerHost),
        )
    }

    #[test]
    fn test_regions_tagged_in_order() {
        let controller = controller(1200.0);
        let nav = controller.root().find("nav").unwrap();

        let classes: Vec<_> = nav
            .child_elements()
            .filter_map(|el| el.attr("class"))
            .collect();
        assert!(classes.contains(&"nav-hamburger"));
        assert!(classes.contains(&"nav-brand"));
        assert!(classes.contains(&"nav-sections"));
        assert!(classes.contains(&"nav-tools"));
    }

    #[test]
    fn test_brand_link_loses_button_styling() {
        let controller = controller(1200.0);
        let brand = controller
            .root()
            .find_where(&|el| el.has_class("nav-brand"))
            .unwrap();

        let brand_link = brand.find("a").unwrap();
        assert!(!brand_link.has_class("button"));
        assert!(!brand_link.has_class("primary"));
        assert!(brand.find_where(&|el| el.has_class("button-container")).is_none());
    }

    #[test]
    fn test_group_entries_marked_nav_drop() {
        let controller = controller(1200.0);
        let drops: Vec<_> = controller
            .root()
            .find_all("li")
            .into_iter()
            .filter(|li| li.has_class("nav-drop"))
            .collect();

        assert_eq!(drops.len(), 1);
        assert!(drops[0].find("ul").is_some());
    }

    #[test]
    fn test_missing_fragment_renders_empty_nav() {
        let controller = HeaderController::new(
            None,
            ViewportObserver::new(1200.0),
            Box::new(NoopListenerHost),
        );

        let nav = controller.root().find("nav").unwrap();
        // Only the hamburger remains
        assert_eq!(nav.child_elements().count(), 1);
        assert!(controller.registry().is_empty());
        assert_eq!(controller.state(), MenuState::WideIdle);
    }

    #[test]
    fn test_initial_state_follows_viewport_mode() {
        assert_eq!(controller(1200.0).state(), MenuState::WideIdle);
        assert_eq!(controller(400.0).state(), MenuState::CompactClosed);
    }

    #[test]
    fn test_initial_markup_markers() {
        let compact = controller(400.0);
        let nav = compact.root().find("nav").unwrap();
        assert_eq!(nav.attr("aria-expanded"), Some("false"));

        let wide = controller(1200.0);
        let nav = wide.root().find("nav").unwrap();
        assert_eq!(nav.attr("aria-expanded"), Some("true"));
    }
}
