use super::registry::SectionId;
use super::viewport::ViewportMode;

/// The menu's complete disclosure state.
///
/// Compact mode owns a single open/closed flag for the whole menu; wide
/// mode owns at most one expanded section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    CompactClosed,
    CompactOpen,
    WideIdle,
    WideExpanded(SectionId),
}

impl MenuState {
    /// The closed/idle state for a viewport mode.
    pub fn initial(mode: ViewportMode) -> Self {
        match mode {
            ViewportMode::Compact => MenuState::CompactClosed,
            ViewportMode::Wide => MenuState::WideIdle,
        }
    }

    pub fn mode(self) -> ViewportMode {
        match self {
            MenuState::CompactClosed | MenuState::CompactOpen => ViewportMode::Compact,
            MenuState::WideIdle | MenuState::WideExpanded(_) => ViewportMode::Wide,
        }
    }

    /// Whether the whole menu is open (meaningful in compact mode only).
    pub fn is_open(self) -> bool {
        self == MenuState::CompactOpen
    }

    pub fn expanded_section(self) -> Option<SectionId> {
        match self {
            MenuState::WideExpanded(id) => Some(id),
            _ => None,
        }
    }

    /// A mode change always wins over in-flight interaction: whatever was
    /// open or expanded is discarded.
    pub fn set_mode(self, mode: ViewportMode) -> MenuState {
        MenuState::initial(mode)
    }

    /// Flip the whole menu open or closed. Valid in compact mode only;
    /// a silent no-op otherwise.
    pub fn toggle_menu(self) -> MenuState {
        match self {
            MenuState::CompactClosed => MenuState::CompactOpen,
            MenuState::CompactOpen => MenuState::CompactClosed,
            wide => wide,
        }
    }

    /// Expand or collapse one section. Valid in wide mode only; expanding a
    /// section collapses any other expanded section in the same transition.
    pub fn toggle_section(self, id: SectionId) -> MenuState {
        match self {
            MenuState::WideExpanded(current) if current == id => MenuState::WideIdle,
            MenuState::WideIdle | MenuState::WideExpanded(_) => MenuState::WideExpanded(id),
            compact => compact,
        }
    }

    /// Force the closed/idle state for the current mode.
    pub fn collapse_all(self) -> MenuState {
        MenuState::initial(self.mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: SectionId = SectionId(0);
    const B: SectionId = SectionId(1);

    #[test]
    fn test_toggle_menu_flips_compact_states() {
        assert_eq!(MenuState::CompactClosed.toggle_menu(), MenuState::CompactOpen);
        assert_eq!(MenuState::CompactOpen.toggle_menu(), MenuState::CompactClosed);
    }

    #[test]
    fn test_toggle_menu_is_noop_in_wide_mode() {
        assert_eq!(MenuState::WideIdle.toggle_menu(), MenuState::WideIdle);
        assert_eq!(
            MenuState::WideExpanded(A).toggle_menu(),
            MenuState::WideExpanded(A)
        );
    }

    #[test]
    fn test_toggle_section_expands_and_collapses() {
        assert_eq!(
            MenuState::WideIdle.toggle_section(A),
            MenuState::WideExpanded(A)
        );
        assert_eq!(
            MenuState::WideExpanded(A).toggle_section(A),
            MenuState::WideIdle
        );
    }

    #[test]
    fn test_expanding_another_section_is_one_transition() {
        assert_eq!(
            MenuState::WideExpanded(A).toggle_section(B),
            MenuState::WideExpanded(B)
        );
    }

    #[test]
    fn test_toggle_section_is_noop_in_compact_mode() {
        assert_eq!(
            MenuState::CompactOpen.toggle_section(A),
            MenuState::CompactOpen
        );
        assert_eq!(
            MenuState::CompactClosed.toggle_section(A),
            MenuState::CompactClosed
        );
    }

    #[test]
    fn test_set_mode_discards_open_state() {
        assert_eq!(
            MenuState::WideExpanded(A).set_mode(ViewportMode::Compact),
            MenuState::CompactClosed
        );
        assert_eq!(
            MenuState::CompactOpen.set_mode(ViewportMode::Wide),
            MenuState::WideIdle
        );
    }

    #[test]
    fn test_collapse_all_is_idempotent() {
        let once = MenuState::WideExpanded(B).collapse_all();
        assert_eq!(once, MenuState::WideIdle);
        assert_eq!(once.collapse_all(), once);

        let once = MenuState::CompactOpen.collapse_all();
        assert_eq!(once, MenuState::CompactClosed);
        assert_eq!(once.collapse_all(), once);
    }
}
