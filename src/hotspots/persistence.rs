// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Mirror the hotspot list into durable storage.
//!
//! Every transition that produces a new hotspot list writes the whole list
//! under one key. Failures are logged and queued for the host; memory is
//! never rolled back.

use super::store::{ListenerId, StoreHandle};
use crate::error::StorageError;
use crate::io::serialization;
use crate::io::Storage;
use crate::models::Hotspot;
use std::cell::RefCell;
use std::rc::Rc;

struct Sink {
    storage: Box<dyn Storage>,
    key: String,
    errors: RefCell<Vec<StorageError>>,
}

impl Sink {
    fn write(&self, hotspots: &[Hotspot]) {
        let result = serialization::to_json(hotspots)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set(&self.key, &json));

        match result {
            Ok(()) => log::debug!("persisted {} hotspots under {:?}", hotspots.len(), self.key),
            Err(e) => {
                log::error!("Failed to persist hotspots: {}", e);
                self.errors.borrow_mut().push(e);
            }
        }
    }
}

/// Store listener that writes the hotspot list whenever it changes.
pub struct PersistenceSync {
    sink: Rc<Sink>,
    store: StoreHandle,
    listener: ListenerId,
}

impl PersistenceSync {
    /// Start mirroring `store` into `storage` under `key`. The current list
    /// is written immediately.
    pub fn attach(store: StoreHandle, storage: Box<dyn Storage>, key: impl Into<String>) -> Self {
        let sink = Rc::new(Sink {
            storage,
            key: key.into(),
            errors: RefCell::new(Vec::new()),
        });

        let listener = store.subscribe({
            let sink = Rc::clone(&sink);
            move |previous, next| {
                if !next.same_hotspots(previous) {
                    sink.write(next.hotspots());
                }
            }
        });
        sink.write(store.state().hotspots());

        Self {
            sink,
            store,
            listener,
        }
    }

    pub fn key(&self) -> &str {
        &self.sink.key
    }

    /// Drain write failures recorded since the last call.
    pub fn take_errors(&self) -> Vec<StorageError> {
        std::mem::take(&mut *self.sink.errors.borrow_mut())
    }
}

impl Drop for PersistenceSync {
    fn drop(&mut self) {
        self.store.unsubscribe(self.listener);
    }
}
