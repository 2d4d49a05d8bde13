use super::registry::SectionId;

/// Keys the header controller reacts to. Hosts map their own key events
/// onto this and may forward anything else as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other,
}

/// Where focus should sit after a collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// The menu open/close control (hamburger button).
    MenuToggle,
    /// A disclosure section's trigger.
    SectionTrigger(SectionId),
}

/// Tracks which dropdown trigger currently holds focus.
///
/// Keydown handling is bound to a trigger only between its focus and blur
/// events, so at most one trigger is ever listening regardless of how many
/// sections exist.
#[derive(Debug, Default)]
pub struct FocusManager {
    bound: Option<SectionId>,
    focus: Option<FocusTarget>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_trigger_focus(&mut self, id: SectionId) {
        self.bound = Some(id);
        self.focus = Some(FocusTarget::SectionTrigger(id));
    }

    pub fn on_trigger_blur(&mut self, id: SectionId) {
        if self.bound == Some(id) {
            self.bound = None;
        }
        if self.focus == Some(FocusTarget::SectionTrigger(id)) {
            self.focus = None;
        }
    }

    /// The trigger whose keydown handler is currently bound, if any.
    pub fn bound_trigger(&self) -> Option<SectionId> {
        self.bound
    }

    /// Move focus back to a control after a collapse.
    pub fn restore(&mut self, target: FocusTarget) {
        self.focus = Some(target);
    }

    pub fn focus(&self) -> Option<FocusTarget> {
        self.focus
    }
}
