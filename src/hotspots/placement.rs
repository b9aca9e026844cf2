// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Interactive placement mode.
//!
//! While the store says `is_pointing`, the controller holds one pointer-move
//! and one click subscription on the surface. Pointer moves feed the hint;
//! the first click turns into a new hotspot and ends placement. Leaving
//! placement by any route, or dropping the controller, removes both
//! subscriptions and clears the hint.

use super::dispatcher::Dispatcher;
use super::ids::IdGenerator;
use super::store::ListenerId;
use crate::models::Hotspot;
use crate::surface::{EventKind, PointerHint, SubscriptionId, Surface, SurfaceEvent};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    Idle,
    Placing,
}

struct Subscriptions {
    pointer_move: SubscriptionId,
    click: SubscriptionId,
}

struct Placement {
    surface: Surface,
    hint: Rc<RefCell<dyn PointerHint>>,
    actions: Dispatcher,
    ids: RefCell<Box<dyn IdGenerator>>,
    active: RefCell<Option<Subscriptions>>,
}

impl Placement {
    fn mode(&self) -> PlacementMode {
        if self.active.borrow().is_some() {
            PlacementMode::Placing
        } else {
            PlacementMode::Idle
        }
    }

    fn sync(self: &Rc<Self>, is_pointing: bool) {
        if is_pointing {
            self.enter();
        } else {
            self.exit();
        }
    }

    fn enter(self: &Rc<Self>) {
        if self.active.borrow().is_some() {
            return;
        }

        let weak = Rc::downgrade(self);
        let pointer_move = self.surface.subscribe(EventKind::PointerMove, {
            let weak = Weak::clone(&weak);
            move |event| {
                if let Some(placement) = weak.upgrade() {
                    placement.hint.borrow_mut().apply_pointer_hint(event);
                }
            }
        });
        let click = self.surface.subscribe(EventKind::Click, move |event| {
            if let Some(placement) = weak.upgrade() {
                placement.place(event);
            }
        });

        *self.active.borrow_mut() = Some(Subscriptions { pointer_move, click });
        log::debug!("placement mode entered");
    }

    fn exit(&self) {
        let Some(subs) = self.active.borrow_mut().take() else {
            return;
        };
        self.surface.unsubscribe(subs.pointer_move);
        self.surface.unsubscribe(subs.click);
        self.hint.borrow_mut().clear_pointer_hint();
        log::debug!("placement mode left");
    }

    fn place(&self, event: &SurfaceEvent) {
        let SurfaceEvent::Click(position) = *event else {
            return;
        };
        // No usable target; stay in placement mode
        if !position.is_finite() {
            return;
        }

        self.hint.borrow_mut().clear_pointer_hint();
        self.actions.toggle_is_pointing().call(Some(false));
        let id = self.ids.borrow_mut().next_id();
        log::info!(
            "placing hotspot {} at ({:.1}, {:.1})",
            id,
            position.left,
            position.top
        );
        self.actions.save_hotspot().call(Hotspot::new(id, position));
    }
}

/// Keeps surface subscriptions in step with the store's `is_pointing` flag.
pub struct PlacementController {
    placement: Rc<Placement>,
    listener: ListenerId,
}

impl PlacementController {
    pub fn attach(
        actions: Dispatcher,
        surface: Surface,
        hint: Rc<RefCell<dyn PointerHint>>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        let store = actions.store().clone();
        let placement = Rc::new(Placement {
            surface,
            hint,
            actions,
            ids: RefCell::new(ids),
            active: RefCell::new(None),
        });

        let weak = Rc::downgrade(&placement);
        let listener = store.subscribe(move |_, next| {
            if let Some(placement) = weak.upgrade() {
                placement.sync(next.is_pointing());
            }
        });
        placement.sync(store.state().is_pointing());

        Self { placement, listener }
    }

    pub fn mode(&self) -> PlacementMode {
        self.placement.mode()
    }
}

impl Drop for PlacementController {
    fn drop(&mut self) {
        self.placement.actions.store().unsubscribe(self.listener);
        self.placement.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotspots::store::StoreHandle;
    use crate::models::Position;
    use crate::surface::CursorHint;

    struct Fixture {
        store: StoreHandle,
        actions: Dispatcher,
        surface: Surface,
        hint: Rc<RefCell<CursorHint>>,
        controller: PlacementController,
    }

    fn fixture() -> Fixture {
        let store = StoreHandle::default();
        let actions = Dispatcher::new(store.clone());
        let surface = Surface::new();
        let hint = Rc::new(RefCell::new(CursorHint::new()));
        let mut n = 0;
        let ids = move || {
            n += 1;
            format!("spot-{n}")
        };
        let controller =
            PlacementController::attach(actions.clone(), surface.clone(), hint.clone(), Box::new(ids));
        Fixture { store, actions, surface, hint, controller }
    }

    #[test]
    fn test_idle_has_no_subscriptions() {
        let f = fixture();
        assert_eq!(f.controller.mode(), PlacementMode::Idle);
        assert_eq!(f.surface.subscription_count(), 0);
    }

    #[test]
    fn test_click_while_placing_creates_hotspot() {
        let f = fixture();
        f.actions.toggle_is_pointing().call(Some(true));
        assert_eq!(f.controller.mode(), PlacementMode::Placing);

        f.surface.click(120.0, 45.0);

        let state = f.store.state();
        assert!(!state.is_pointing());
        assert_eq!(state.hotspots().len(), 1);
        let created = &state.hotspots()[0];
        assert_eq!(created.id(), "spot-1");
        assert_eq!(created.position, Position::new(120.0, 45.0));
        assert_eq!(created.title, "");
        assert_eq!(created.description, "");
        assert_eq!(f.controller.mode(), PlacementMode::Idle);
        assert_eq!(f.surface.subscription_count(), 0);
    }

    #[test]
    fn test_non_finite_click_is_ignored() {
        let f = fixture();
        f.actions.toggle_is_pointing().call(Some(true));
        f.surface.click(f64::NAN, 45.0);
        f.surface.click(120.0, f64::INFINITY);

        let state = f.store.state();
        assert!(state.hotspots().is_empty());
        assert!(state.is_pointing());
        assert_eq!(f.controller.mode(), PlacementMode::Placing);

        f.surface.click(120.0, 45.0);
        assert_eq!(f.store.state().hotspots().len(), 1);
    }

    #[test]
    fn test_only_first_click_places() {
        let f = fixture();
        f.actions.toggle_is_pointing().call(Some(true));
        f.surface.click(1.0, 1.0);
        f.surface.click(2.0, 2.0);

        assert_eq!(f.store.state().hotspots().len(), 1);
    }

    #[test]
    fn test_external_cancel_unsubscribes() {
        let f = fixture();
        f.actions.toggle_is_pointing().call(Some(true));
        assert_eq!(f.surface.subscription_count(), 2);

        f.actions.toggle_is_pointing().call(Some(false));
        assert_eq!(f.surface.subscription_count(), 0);

        f.surface.click(120.0, 45.0);
        assert!(f.store.state().hotspots().is_empty());
    }

    #[test]
    fn test_entering_twice_keeps_one_pair() {
        let f = fixture();
        f.actions.toggle_is_pointing().call(Some(true));
        f.actions.toggle_is_pointing().call(Some(true));

        assert_eq!(f.surface.subscription_count_for(EventKind::PointerMove), 1);
        assert_eq!(f.surface.subscription_count_for(EventKind::Click), 1);
    }

    #[test]
    fn test_pointer_moves_prime_hint_until_click() {
        let f = fixture();
        f.surface.pointer_move(5.0, 5.0);
        assert!(f.hint.borrow().primed().is_none());

        f.actions.toggle_is_pointing().call(Some(true));
        f.surface.pointer_move(10.0, 20.0);
        assert_eq!(f.hint.borrow().primed(), Some(Position::new(10.0, 20.0)));

        f.surface.click(10.0, 20.0);
        assert!(f.hint.borrow().primed().is_none());
    }

    #[test]
    fn test_cancel_clears_hint() {
        let f = fixture();
        f.actions.toggle_is_pointing().call(Some(true));
        f.surface.pointer_move(10.0, 20.0);
        f.actions.toggle_is_pointing().call(None);

        assert!(f.hint.borrow().primed().is_none());
    }

    #[test]
    fn test_unrelated_changes_keep_subscriptions() {
        let f = fixture();
        f.actions.toggle_is_pointing().call(Some(true));
        f.actions.save_hotspot().call(Hotspot::new("other", Position::default()));

        assert_eq!(f.controller.mode(), PlacementMode::Placing);
        assert_eq!(f.surface.subscription_count(), 2);
    }

    #[test]
    fn test_repeated_sessions_get_unique_ids() {
        let f = fixture();
        for i in 0..5 {
            f.actions.toggle_is_pointing().call(Some(true));
            f.surface.click(i as f64, i as f64);
        }

        let state = f.store.state();
        let ids: Vec<&str> = state.hotspots().iter().map(|h| h.id()).collect();
        assert_eq!(ids, ["spot-1", "spot-2", "spot-3", "spot-4", "spot-5"]);
    }

    #[test]
    fn test_drop_tears_down() {
        let f = fixture();
        f.actions.toggle_is_pointing().call(Some(true));
        let listeners = f.store.listener_count();

        drop(f.controller);

        assert_eq!(f.surface.subscription_count(), 0);
        assert_eq!(f.store.listener_count(), listeners - 1);
        f.surface.click(1.0, 1.0);
        assert!(f.store.state().hotspots().is_empty());
    }
}
