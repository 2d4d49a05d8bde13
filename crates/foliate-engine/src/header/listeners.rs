use super::state::MenuState;
use std::collections::BTreeSet;

/// The page-level listeners the header may need while something is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ListenerKind {
    /// Escape key on the whole page.
    EscapeKey,
    /// Focus leaving the nav container.
    FocusOut,
}

pub const LISTENER_KINDS: [ListenerKind; 2] = [ListenerKind::EscapeKey, ListenerKind::FocusOut];

/// Seam to the host environment that performs the actual subscription.
///
/// The lifecycle manager guarantees `attach`/`detach` are each called at
/// most once per armed/disarmed transition, so hosts need no bookkeeping.
pub trait ListenerHost {
    fn attach(&mut self, kind: ListenerKind);
    fn detach(&mut self, kind: ListenerKind);
}

/// Host that drops subscriptions on the floor; for headless use and tests.
#[derive(Debug, Default)]
pub struct NoopListenerHost;

impl ListenerHost for NoopListenerHost {
    fn attach(&mut self, _kind: ListenerKind) {}
    fn detach(&mut self, _kind: ListenerKind) {}
}

/// The listeners a state needs: exactly those that can validly collapse it.
///
/// Pure function of state, so reconciliation never depends on which code
/// path got us here.
pub fn desired_listeners(state: MenuState) -> BTreeSet<ListenerKind> {
    match state {
        MenuState::CompactOpen | MenuState::WideExpanded(_) => {
            LISTENER_KINDS.into_iter().collect()
        }
        MenuState::CompactClosed | MenuState::WideIdle => BTreeSet::new(),
    }
}

/// Record of which page-level listeners are currently armed.
///
/// Arming an armed listener or disarming a disarmed one is a no-op; that is
/// what prevents duplicate handlers from accumulating across repeated
/// toggles.
#[derive(Debug, Default)]
pub struct ListenerSet {
    armed: BTreeSet<ListenerKind>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self, kind: ListenerKind) -> bool {
        self.armed.contains(&kind)
    }

    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    pub fn arm(&mut self, kind: ListenerKind, host: &mut dyn ListenerHost) {
        if self.armed.insert(kind) {
            host.attach(kind);
        }
    }

    pub fn disarm(&mut self, kind: ListenerKind, host: &mut dyn ListenerHost) {
        if self.armed.remove(&kind) {
            host.detach(kind);
        }
    }

    /// Bring the armed set in line with what `state` requires. Invoked after
    /// every transition and mode change.
    pub fn reconcile(&mut self, state: MenuState, host: &mut dyn ListenerHost) {
        let desired = desired_listeners(state);
        for kind in LISTENER_KINDS {
            if desired.contains(&kind) {
                self.arm(kind, host);
            } else {
                self.disarm(kind, host);
            }
        }
    }
}
