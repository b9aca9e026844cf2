// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Named operations over the store.
//!
//! Each operation is built once per store and handed out by reference, so
//! consumers that remember a handle can tell it has not changed with
//! [`Operation::same`].

use super::store::{Action, StoreHandle};
use crate::models::Hotspot;
use std::fmt;
use std::rc::Rc;

/// A shared, callable operation handle.
pub struct Operation<T> {
    op: Rc<dyn Fn(T)>,
}

impl<T> Operation<T> {
    fn new(op: impl Fn(T) + 'static) -> Self {
        Self { op: Rc::new(op) }
    }

    pub fn call(&self, arg: T) {
        (self.op)(arg)
    }

    /// True when both handles wrap the same operation.
    pub fn same(&self, other: &Operation<T>) -> bool {
        Rc::ptr_eq(&self.op, &other.op)
    }
}

impl<T> Clone for Operation<T> {
    fn clone(&self) -> Self {
        Self {
            op: Rc::clone(&self.op),
        }
    }
}

impl<T> fmt::Debug for Operation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Operation({:p})", Rc::as_ptr(&self.op))
    }
}

/// The public hotspot operations bound to one store.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    store: StoreHandle,
    delete_hotspot: Operation<String>,
    edit_hotspot: Operation<Hotspot>,
    save_hotspot: Operation<Hotspot>,
    toggle_is_pointing: Operation<Option<bool>>,
}

impl Dispatcher {
    pub fn new(store: StoreHandle) -> Self {
        let delete_hotspot = {
            let store = store.clone();
            Operation::new(move |id: String| store.dispatch(Action::DeleteHotspot { id }))
        };
        let edit_hotspot = {
            let store = store.clone();
            Operation::new(move |hotspot: Hotspot| store.dispatch(Action::EditHotspot { hotspot }))
        };
        let save_hotspot = {
            let store = store.clone();
            Operation::new(move |hotspot: Hotspot| store.dispatch(Action::SaveHotspot { hotspot }))
        };
        let toggle_is_pointing = {
            let store = store.clone();
            Operation::new(move |is_pointing: Option<bool>| {
                store.dispatch(Action::ToggleIsPointing {
                    is_pointing: is_pointing.unwrap_or(false),
                })
            })
        };

        Self {
            store,
            delete_hotspot,
            edit_hotspot,
            save_hotspot,
            toggle_is_pointing,
        }
    }

    /// Remove a hotspot by id. Unknown ids are ignored.
    pub fn delete_hotspot(&self) -> &Operation<String> {
        &self.delete_hotspot
    }

    /// Replace the hotspot with the same id. Unknown ids are ignored.
    pub fn edit_hotspot(&self) -> &Operation<Hotspot> {
        &self.edit_hotspot
    }

    /// Append a hotspot. The caller supplies a fresh id.
    pub fn save_hotspot(&self) -> &Operation<Hotspot> {
        &self.save_hotspot
    }

    /// Enter (`Some(true)`) or leave placement mode. `None` means leave.
    pub fn toggle_is_pointing(&self) -> &Operation<Option<bool>> {
        &self.toggle_is_pointing
    }

    /// Apply an arbitrary action, e.g. one decoded from a host message.
    pub fn dispatch(&self, action: Action) {
        self.store.dispatch(action);
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }
}
