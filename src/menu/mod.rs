//! Exclusive context-menu coordination.
//!
//! A single coordinator per page consumes a typed event stream and enforces
//! the single-owner rule: at most one menu instance is visible at a time,
//! page-wide. Opening runs through a short suppression window so the
//! click/contextmenu pair that triggered the open cannot immediately dismiss
//! it, and the "is anything visible?" check is deferred until the caller
//! polls — mirroring the deferred evaluation a UI layer needs so every entry
//! can register before the check runs.
//!
//! Time is explicit: every event carries a millisecond timestamp and the
//! deferred check runs from `poll(now)`. Nothing here owns a timer; the
//! machine checks deadlines against the clock it is handed and never acts on
//! a stale one.

use crate::types::MenuDescriptor;

/// Suppression window after an open request during which outside-click
/// dismissals are ignored (milliseconds).
pub const OPEN_SUPPRESS_WINDOW_MS: f64 = 400.0;

/// Identity of the menu instance requesting ownership.
pub type MenuOwnerId = u32;

/// Coordinator states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    /// No menu visible.
    #[default]
    Hidden,
    /// An open request was accepted; awaiting the deferred visibility check.
    Opening,
    /// The menu is visible for the current owner.
    Shown,
}

/// Visibility/enablement predicate for one menu entry.
///
/// Either a static flag or a rule over `(item, descriptor)`. Rules are
/// evaluated fresh on every check — never cached — since enablement may
/// depend on mutable application state.
pub enum Predicate<T> {
    /// Constant answer.
    Always(bool),
    /// Evaluated per data item and descriptor.
    Rule(Box<dyn Fn(&T, &MenuDescriptor) -> bool>),
}

impl<T> Predicate<T> {
    /// Evaluate against a data item.
    pub fn eval(&self, item: &T, descriptor: &MenuDescriptor) -> bool {
        match self {
            Predicate::Always(flag) => *flag,
            Predicate::Rule(rule) => rule(item, descriptor),
        }
    }
}

impl<T> From<bool> for Predicate<T> {
    fn from(flag: bool) -> Self {
        Predicate::Always(flag)
    }
}

/// One configured menu entry: descriptor plus its predicates.
pub struct MenuEntry<T> {
    /// The entry's descriptor (id, order, description).
    pub descriptor: MenuDescriptor,
    /// Whether the entry appears for a given item.
    pub visible: Predicate<T>,
    /// Whether the entry can be executed for a given item.
    pub enabled: Predicate<T>,
}

impl<T> MenuEntry<T> {
    /// Entry that is always visible and enabled.
    pub fn new(descriptor: MenuDescriptor) -> Self {
        Self {
            descriptor,
            visible: Predicate::Always(true),
            enabled: Predicate::Always(true),
        }
    }

    /// Replace the visibility predicate.
    pub fn with_visible(mut self, visible: impl Into<Predicate<T>>) -> Self {
        self.visible = visible.into();
        self
    }

    /// Replace the enablement predicate.
    pub fn with_enabled(mut self, enabled: impl Into<Predicate<T>>) -> Self {
        self.enabled = enabled.into();
        self
    }
}

/// One unit of the coordinator's event stream.
#[derive(Debug, Clone)]
pub enum MenuEvent<T> {
    /// A context request targeting `item` from the menu instance `owner`.
    Open {
        /// Requesting menu instance.
        owner: MenuOwnerId,
        /// Data item the menu applies to.
        item: T,
        /// Pointer position at the time of the request.
        position: (f32, f32),
        /// Event timestamp in milliseconds.
        at: f64,
    },
    /// Global dismiss signal (click/contextmenu outside the active menu).
    Dismiss {
        /// Event timestamp in milliseconds.
        at: f64,
    },
    /// Selection of a menu entry.
    Execute {
        /// Descriptor id of the selected entry.
        descriptor_id: u32,
        /// Event timestamp in milliseconds.
        at: f64,
    },
}

/// Outcome of a completed menu selection, handed to the collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution<T> {
    /// The data item the menu was opened for.
    pub item: T,
    /// Descriptor of the selected entry.
    pub descriptor: MenuDescriptor,
}

/// Single-owner context-menu state machine.
pub struct ContextMenuCoordinator<T> {
    entries: Vec<MenuEntry<T>>,
    state: MenuState,
    owner: Option<MenuOwnerId>,
    item: Option<T>,
    mouse_location: (f32, f32),
    suppress_until: f64,
    check_at: Option<f64>,
}

impl<T> ContextMenuCoordinator<T> {
    /// Create a coordinator over a configured entry set.
    pub fn new(entries: Vec<MenuEntry<T>>) -> Self {
        Self {
            entries,
            state: MenuState::Hidden,
            owner: None,
            item: None,
            mouse_location: (0.0, 0.0),
            suppress_until: 0.0,
            check_at: None,
        }
    }

    /// Current machine state.
    pub fn state(&self) -> MenuState {
        self.state
    }

    /// True when a menu is visible.
    pub fn is_shown(&self) -> bool {
        self.state == MenuState::Shown
    }

    /// Owner of the current open/shown menu, if any.
    pub fn owner(&self) -> Option<MenuOwnerId> {
        self.owner
    }

    /// The data item the menu currently applies to.
    pub fn active_item(&self) -> Option<&T> {
        self.item.as_ref()
    }

    /// Pointer position recorded at the last open request.
    pub fn mouse_location(&self) -> (f32, f32) {
        self.mouse_location
    }

    /// Feed one event into the machine.
    ///
    /// Returns the selection outcome when an `Execute` event completes;
    /// every other event returns `None`. Unknown descriptor ids, executes
    /// while hidden, and dismissals inside the suppression window are
    /// absorbed without effect.
    pub fn handle(&mut self, event: MenuEvent<T>) -> Option<Execution<T>> {
        match event {
            MenuEvent::Open {
                owner,
                item,
                position,
                at,
            } => {
                if self.owner.is_some_and(|current| current != owner) {
                    // Another instance owns the menu: force it closed before
                    // evaluating this request
                    self.hide();
                }
                self.state = MenuState::Opening;
                self.owner = Some(owner);
                self.item = Some(item);
                self.mouse_location = position;
                self.suppress_until = at + OPEN_SUPPRESS_WINDOW_MS;
                self.check_at = Some(at);
                None
            }
            MenuEvent::Dismiss { at } => {
                if at < self.suppress_until {
                    return None;
                }
                self.hide();
                None
            }
            MenuEvent::Execute { descriptor_id, .. } => {
                if self.state != MenuState::Shown {
                    return None;
                }
                let descriptor = self
                    .entries
                    .iter()
                    .find(|e| e.descriptor.id == descriptor_id)
                    .filter(|e| {
                        self.item.as_ref().is_some_and(|item| {
                            e.visible.eval(item, &e.descriptor)
                                && e.enabled.eval(item, &e.descriptor)
                        })
                    })
                    .map(|e| e.descriptor.clone())?;
                let item = self.item.take()?;
                self.hide();
                Some(Execution { item, descriptor })
            }
        }
    }

    /// Run the deferred visibility check if its deadline has passed.
    ///
    /// While `Opening`, once `now` reaches the check point the menu becomes
    /// `Shown` iff at least one entry's visibility predicate passes for the
    /// current item, otherwise it returns to `Hidden`. Any event that moved
    /// the machine since the open request cancels the pending check, so a
    /// stale deadline never fires.
    pub fn poll(&mut self, now: f64) -> MenuState {
        if self.state == MenuState::Opening {
            if let Some(check_at) = self.check_at {
                if now >= check_at {
                    self.check_at = None;
                    let any_visible = match self.item.as_ref() {
                        Some(item) => self
                            .entries
                            .iter()
                            .any(|e| e.visible.eval(item, &e.descriptor)),
                        None => false,
                    };
                    if any_visible {
                        self.state = MenuState::Shown;
                    } else {
                        self.hide();
                    }
                }
            }
        }
        self.state
    }

    /// Entries visible for the current item, stable-sorted by `order`.
    ///
    /// Duplicate orders keep configuration order between themselves; the
    /// engine does not validate uniqueness.
    pub fn visible_entries(&self) -> Vec<&MenuEntry<T>> {
        let Some(item) = self.item.as_ref() else {
            return Vec::new();
        };
        let mut visible: Vec<&MenuEntry<T>> = self
            .entries
            .iter()
            .filter(|e| e.visible.eval(item, &e.descriptor))
            .collect();
        visible.sort_by_key(|e| e.descriptor.order);
        visible
    }

    /// Whether the entry with the given descriptor id is enabled for the
    /// current item. Evaluated fresh on every call.
    pub fn is_entry_enabled(&self, descriptor_id: u32) -> bool {
        let Some(item) = self.item.as_ref() else {
            return false;
        };
        self.entries
            .iter()
            .find(|e| e.descriptor.id == descriptor_id)
            .is_some_and(|e| e.enabled.eval(item, &e.descriptor))
    }

    fn hide(&mut self) {
        self.state = MenuState::Hidden;
        self.owner = None;
        self.item = None;
        self.check_at = None;
    }
}
