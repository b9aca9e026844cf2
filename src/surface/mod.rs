// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Host surface notifications.
//!
//! The host pushes pointer-move and click events in surface coordinates;
//! handlers subscribe per event kind and are removed by id.

pub mod hint;

use crate::models::Position;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub use hint::{CursorHint, PointerHint};

/// A pointer notification in surface-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    PointerMove(Position),
    Click(Position),
}

impl SurfaceEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SurfaceEvent::PointerMove(_) => EventKind::PointerMove,
            SurfaceEvent::Click(_) => EventKind::Click,
        }
    }

    pub fn position(&self) -> Position {
        match *self {
            SurfaceEvent::PointerMove(p) | SurfaceEvent::Click(p) => p,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    Click,
}

/// Handle returned by [`Surface::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(&SurfaceEvent)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(SubscriptionId, EventKind, Handler)>,
}

/// Event source for one drawing surface. Clones share subscriptions.
#[derive(Clone, Default)]
pub struct Surface {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("subscriptions", &self.subscription_count())
            .finish()
    }
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &self,
        kind: EventKind,
        handler: impl Fn(&SurfaceEvent) + 'static,
    ) -> SubscriptionId {
        let mut registry = self.registry.borrow_mut();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.handlers.push((id, kind, Rc::new(handler)));
        id
    }

    /// Remove a handler. Returns false if it was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.borrow_mut();
        let before = registry.handlers.len();
        registry.handlers.retain(|(sub, _, _)| *sub != id);
        registry.handlers.len() != before
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.registry
            .borrow()
            .handlers
            .iter()
            .any(|(sub, _, _)| *sub == id)
    }

    pub fn subscription_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }

    pub fn subscription_count_for(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .handlers
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }

    /// Deliver an event to every handler subscribed to its kind.
    ///
    /// Handlers run without the registry borrowed, so they may subscribe or
    /// unsubscribe. A handler removed mid-delivery is skipped.
    pub fn emit(&self, event: SurfaceEvent) {
        let kind = event.kind();
        let targets: Vec<(SubscriptionId, Handler)> = self
            .registry
            .borrow()
            .handlers
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(id, _, handler)| (*id, Rc::clone(handler)))
            .collect();

        for (id, handler) in targets {
            if self.is_subscribed(id) {
                handler(&event);
            }
        }
    }

    pub fn pointer_move(&self, left: f64, top: f64) {
        self.emit(SurfaceEvent::PointerMove(Position::new(left, top)));
    }

    pub fn click(&self, left: f64, top: f64) {
        self.emit(SurfaceEvent::Click(Position::new(left, top)));
    }
}
