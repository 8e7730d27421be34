//! Context-menu coordinator tests
//!
//! Tests for the open/show/hide state machine, the suppression window,
//! single-owner exclusivity, and predicate evaluation.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::Cell;
use std::rc::Rc;

use gridview::{
    ContextMenuCoordinator, MenuDescriptor, MenuEntry, MenuEvent, MenuState, Predicate,
    OPEN_SUPPRESS_WINDOW_MS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Offer {
    id: u64,
    cancelled: bool,
}

fn offer(id: u64) -> Offer {
    Offer {
        id,
        cancelled: false,
    }
}

fn default_entries() -> Vec<MenuEntry<Offer>> {
    vec![
        MenuEntry::new(MenuDescriptor::new(1, 0, "View")),
        MenuEntry::new(MenuDescriptor::new(2, 1, "Edit")),
        MenuEntry::new(MenuDescriptor::new(3, 2, "Cancel")).with_visible(Predicate::Rule(
            Box::new(|item: &Offer, _| !item.cancelled),
        )),
    ]
}

fn open_event(owner: u32, item: Offer, at: f64) -> MenuEvent<Offer> {
    MenuEvent::Open {
        owner,
        item,
        position: (120.0, 80.0),
        at,
    }
}

// =============================================================================
// OPEN / SHOW TRANSITION TESTS
// =============================================================================

#[test]
fn test_open_then_poll_shows_menu() {
    let mut menu = ContextMenuCoordinator::new(default_entries());

    assert_eq!(menu.state(), MenuState::Hidden);
    menu.handle(open_event(1, offer(7), 1000.0));
    assert_eq!(menu.state(), MenuState::Opening, "show waits for the poll");

    assert_eq!(menu.poll(1000.0), MenuState::Shown);
    assert!(menu.is_shown());
    assert_eq!(menu.active_item(), Some(&offer(7)));
    assert_eq!(menu.mouse_location(), (120.0, 80.0));
}

#[test]
fn test_open_with_no_visible_entries_hides() {
    let entries = vec![
        MenuEntry::new(MenuDescriptor::new(1, 0, "View")).with_visible(false),
        MenuEntry::new(MenuDescriptor::new(2, 1, "Edit")).with_visible(false),
    ];
    let mut menu = ContextMenuCoordinator::new(entries);

    menu.handle(open_event(1, offer(1), 0.0));
    assert_eq!(menu.poll(0.0), MenuState::Hidden);
}

#[test]
fn test_open_with_empty_entry_set_hides() {
    let mut menu: ContextMenuCoordinator<Offer> = ContextMenuCoordinator::new(Vec::new());

    menu.handle(open_event(1, offer(1), 0.0));
    assert_eq!(menu.poll(0.0), MenuState::Hidden);
}

#[test]
fn test_poll_before_check_point_does_nothing() {
    let mut menu = ContextMenuCoordinator::new(default_entries());

    menu.handle(open_event(1, offer(1), 500.0));
    assert_eq!(menu.poll(499.0), MenuState::Opening);
    assert_eq!(menu.poll(500.0), MenuState::Shown);
}

// =============================================================================
// DISMISS / SUPPRESSION WINDOW TESTS
// =============================================================================

#[test]
fn test_dismiss_inside_suppression_window_is_ignored() {
    let mut menu = ContextMenuCoordinator::new(default_entries());

    menu.handle(open_event(1, offer(1), 1000.0));
    menu.poll(1000.0);
    assert!(menu.is_shown());

    // The click that opened the menu arrives as a global dismiss right after
    menu.handle(MenuEvent::Dismiss { at: 1005.0 });
    assert!(menu.is_shown(), "dismiss within the window must not close");

    menu.handle(MenuEvent::Dismiss {
        at: 1000.0 + OPEN_SUPPRESS_WINDOW_MS,
    });
    assert!(!menu.is_shown(), "dismiss after the window closes the menu");
}

#[test]
fn test_dismiss_while_hidden_is_harmless() {
    let mut menu = ContextMenuCoordinator::new(default_entries());

    menu.handle(MenuEvent::Dismiss { at: 10_000.0 });
    assert_eq!(menu.state(), MenuState::Hidden);
}

#[test]
fn test_dismiss_cancels_pending_check() {
    let mut menu = ContextMenuCoordinator::new(default_entries());

    menu.handle(open_event(1, offer(1), 0.0));
    menu.handle(MenuEvent::Dismiss {
        at: OPEN_SUPPRESS_WINDOW_MS + 1.0,
    });
    assert_eq!(menu.state(), MenuState::Hidden);

    // The stale check point must not resurrect the menu
    assert_eq!(menu.poll(OPEN_SUPPRESS_WINDOW_MS + 2.0), MenuState::Hidden);
}

// =============================================================================
// SINGLE-OWNER EXCLUSIVITY TESTS
// =============================================================================

#[test]
fn test_second_owner_takes_over() {
    let mut menu = ContextMenuCoordinator::new(default_entries());

    menu.handle(open_event(1, offer(1), 0.0));
    menu.poll(0.0);
    assert_eq!(menu.owner(), Some(1));

    menu.handle(open_event(2, offer(2), 50.0));
    assert_eq!(menu.state(), MenuState::Opening);
    assert_eq!(menu.owner(), Some(2), "new owner displaces the old one");

    menu.poll(50.0);
    assert!(menu.is_shown());
    assert_eq!(menu.active_item(), Some(&offer(2)));
}

#[test]
fn test_at_most_one_owner_shown_at_any_instant() {
    let mut menu = ContextMenuCoordinator::new(default_entries());

    // Interleave open requests from three owners; after every event the
    // machine tracks exactly one owner
    let owners = [1u32, 2, 3, 2, 1];
    for (step, &owner) in owners.iter().enumerate() {
        let at = (step as f64) * 10.0;
        menu.handle(open_event(owner, offer(u64::from(owner)), at));
        menu.poll(at);
        assert!(menu.is_shown());
        assert_eq!(menu.owner(), Some(owner));
    }
}

#[test]
fn test_reopen_same_owner_updates_item_and_position() {
    let mut menu = ContextMenuCoordinator::new(default_entries());

    menu.handle(open_event(1, offer(1), 0.0));
    menu.poll(0.0);

    menu.handle(MenuEvent::Open {
        owner: 1,
        item: offer(9),
        position: (300.0, 200.0),
        at: 10.0,
    });
    menu.poll(10.0);

    assert_eq!(menu.active_item(), Some(&offer(9)));
    assert_eq!(menu.mouse_location(), (300.0, 200.0));
}

// =============================================================================
// EXECUTE TESTS
// =============================================================================

#[test]
fn test_execute_emits_selection_and_hides() {
    let mut menu = ContextMenuCoordinator::new(default_entries());

    menu.handle(open_event(1, offer(4), 0.0));
    menu.poll(0.0);

    let outcome = menu.handle(MenuEvent::Execute {
        descriptor_id: 2,
        at: 600.0,
    });

    let execution = outcome.expect("selection should complete");
    assert_eq!(execution.item, offer(4));
    assert_eq!(execution.descriptor.description, "Edit");
    assert_eq!(menu.state(), MenuState::Hidden);
}

#[test]
fn test_execute_while_hidden_is_ignored() {
    let mut menu = ContextMenuCoordinator::new(default_entries());

    let outcome = menu.handle(MenuEvent::Execute {
        descriptor_id: 1,
        at: 0.0,
    });
    assert!(outcome.is_none());
}

#[test]
fn test_execute_unknown_descriptor_is_ignored() {
    let mut menu = ContextMenuCoordinator::new(default_entries());

    menu.handle(open_event(1, offer(1), 0.0));
    menu.poll(0.0);

    let outcome = menu.handle(MenuEvent::Execute {
        descriptor_id: 99,
        at: 600.0,
    });
    assert!(outcome.is_none());
    assert!(menu.is_shown(), "unknown id leaves the menu up");
}

#[test]
fn test_execute_disabled_entry_is_ignored() {
    let entries = vec![
        MenuEntry::new(MenuDescriptor::new(1, 0, "View")).with_enabled(false),
    ];
    let mut menu = ContextMenuCoordinator::new(entries);

    menu.handle(open_event(1, offer(1), 0.0));
    menu.poll(0.0);
    assert!(menu.is_shown());

    let outcome = menu.handle(MenuEvent::Execute {
        descriptor_id: 1,
        at: 600.0,
    });
    assert!(outcome.is_none(), "disabled entries cannot execute");
}

// =============================================================================
// PREDICATE TESTS
// =============================================================================

#[test]
fn test_visibility_rule_sees_the_item() {
    let mut menu = ContextMenuCoordinator::new(default_entries());

    // A cancelled offer hides the "Cancel" entry
    menu.handle(MenuEvent::Open {
        owner: 1,
        item: Offer {
            id: 1,
            cancelled: true,
        },
        position: (0.0, 0.0),
        at: 0.0,
    });
    menu.poll(0.0);

    let visible: Vec<&str> = menu
        .visible_entries()
        .iter()
        .map(|e| e.descriptor.description.as_str())
        .collect();
    assert_eq!(visible, vec!["View", "Edit"]);
}

#[test]
fn test_predicates_are_evaluated_fresh() {
    // Enablement flips between checks through shared mutable state; the
    // coordinator must observe the change because nothing is cached
    let armed = Rc::new(Cell::new(false));
    let armed_probe = Rc::clone(&armed);

    let entries = vec![MenuEntry::new(MenuDescriptor::new(1, 0, "Delete"))
        .with_enabled(Predicate::Rule(Box::new(move |_: &Offer, _| {
            armed_probe.get()
        })))];
    let mut menu = ContextMenuCoordinator::new(entries);

    menu.handle(open_event(1, offer(1), 0.0));
    menu.poll(0.0);

    assert!(!menu.is_entry_enabled(1));
    armed.set(true);
    assert!(menu.is_entry_enabled(1));
}

#[test]
fn test_visible_entries_sorted_by_order() {
    let entries = vec![
        MenuEntry::new(MenuDescriptor::new(10, 2, "Third")),
        MenuEntry::new(MenuDescriptor::new(11, 0, "First")),
        MenuEntry::new(MenuDescriptor::new(12, 1, "Second")),
    ];
    let mut menu = ContextMenuCoordinator::new(entries);

    menu.handle(open_event(1, offer(1), 0.0));
    menu.poll(0.0);

    let descriptions: Vec<&str> = menu
        .visible_entries()
        .iter()
        .map(|e| e.descriptor.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["First", "Second", "Third"]);
}

#[test]
fn test_visible_entries_empty_without_item() {
    let menu = ContextMenuCoordinator::new(default_entries());
    assert!(menu.visible_entries().is_empty());
    assert!(!menu.is_entry_enabled(1));
}
