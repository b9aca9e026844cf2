// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hotspot state machine.
//!
//! [`transition`] is a pure function over [`Action`]s. [`StoreHandle`] owns
//! the current state, applies actions one at a time and tells listeners
//! about each `(previous, next)` pair.

use crate::models::{Hotspot, State};
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Everything that can change a [`State`].
///
/// Deserializes from `{"type": "<camelCaseName>", ...fields}`. Unrecognized
/// types become [`Action::Unknown`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    DeleteHotspot {
        id: String,
    },
    EditHotspot {
        hotspot: Hotspot,
    },
    SaveHotspot {
        hotspot: Hotspot,
    },
    ToggleIsPointing {
        #[serde(rename = "isPointing", default)]
        is_pointing: bool,
    },
    #[serde(other)]
    Unknown,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::DeleteHotspot { .. } => "deleteHotspot",
            Action::EditHotspot { .. } => "editHotspot",
            Action::SaveHotspot { .. } => "saveHotspot",
            Action::ToggleIsPointing { .. } => "toggleIsPointing",
            Action::Unknown => "unknown",
        }
    }
}

/// Compute the state that follows `state` under `action`.
///
/// Never fails. Actions that change nothing return a state sharing the
/// previous hotspot list.
pub fn transition(state: &State, action: &Action) -> State {
    match action {
        Action::DeleteHotspot { id } => {
            if state.hotspot(id).is_none() {
                return state.clone();
            }
            let remaining = state
                .hotspots()
                .iter()
                .filter(|h| h.id() != id)
                .cloned()
                .collect();
            state.replace_hotspots(remaining)
        }
        Action::EditHotspot { hotspot } => {
            if state.hotspot(hotspot.id()).is_none() {
                return state.clone();
            }
            let edited = state
                .hotspots()
                .iter()
                .map(|h| {
                    if h.id() == hotspot.id() {
                        hotspot.clone()
                    } else {
                        h.clone()
                    }
                })
                .collect();
            state.replace_hotspots(edited)
        }
        Action::SaveHotspot { hotspot } => {
            let mut hotspots = state.hotspots().to_vec();
            hotspots.push(hotspot.clone());
            state.replace_hotspots(hotspots)
        }
        Action::ToggleIsPointing { is_pointing } => state.set_pointing(*is_pointing),
        Action::Unknown => state.clone(),
    }
}

/// Handle returned by [`StoreHandle::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&State, &State)>;

struct Store {
    state: State,
    next_listener: u64,
    listeners: Vec<(ListenerId, Listener)>,
    pending: VecDeque<Action>,
    dispatching: bool,
}

/// Shared, single-writer owner of the current [`State`].
#[derive(Clone)]
pub struct StoreHandle {
    inner: Rc<RefCell<Store>>,
}

impl fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.inner.borrow();
        f.debug_struct("StoreHandle")
            .field("state", &store.state)
            .field("listeners", &store.listeners.len())
            .finish()
    }
}

impl Default for StoreHandle {
    fn default() -> Self {
        Self::new(State::default())
    }
}

impl StoreHandle {
    pub fn new(initial: State) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Store {
                state: initial,
                next_listener: 0,
                listeners: Vec::new(),
                pending: VecDeque::new(),
                dispatching: false,
            })),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> State {
        self.inner.borrow().state.clone()
    }

    /// Apply an action, then notify listeners with `(previous, next)`.
    ///
    /// The store is not borrowed while listeners run, so they may read it
    /// or dispatch further actions. Actions dispatched from a listener are
    /// queued and applied, in order, once every listener has seen the
    /// current transition.
    pub fn dispatch(&self, action: Action) {
        {
            let mut store = self.inner.borrow_mut();
            store.pending.push_back(action);
            if store.dispatching {
                return;
            }
            store.dispatching = true;
        }

        loop {
            let step = {
                let mut store = self.inner.borrow_mut();
                match store.pending.pop_front() {
                    Some(action) => {
                        log::debug!("dispatch {}", action.name());
                        let previous = store.state.clone();
                        let next = transition(&previous, &action);
                        store.state = next.clone();
                        let listeners: Vec<Listener> = store
                            .listeners
                            .iter()
                            .map(|(_, listener)| Rc::clone(listener))
                            .collect();
                        Some((previous, next, listeners))
                    }
                    None => {
                        store.dispatching = false;
                        None
                    }
                }
            };

            let Some((previous, next, listeners)) = step else {
                break;
            };
            for listener in listeners {
                listener(&previous, &next);
            }
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&State, &State) + 'static) -> ListenerId {
        let mut store = self.inner.borrow_mut();
        let id = ListenerId(store.next_listener);
        store.next_listener += 1;
        store.listeners.push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(listener, _)| *listener != id);
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// True when both handles refer to the same store.
    pub fn same_store(&self, other: &StoreHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
