// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hotspot session: store, operations, placement mode and persistence.
//!
//! A [`HotspotSession`] owns one store and attaches both effects to it. Hosts
//! feed pointer events into [`HotspotSession::surface`], call operations on
//! [`HotspotSession::actions`] and render from [`HotspotSession::state`].

pub mod dispatcher;
pub mod ids;
pub mod persistence;
pub mod placement;
pub mod store;

use crate::config::Config;
use crate::error::StorageError;
use crate::io::serialization;
use crate::io::Storage;
use crate::models::{Hotspot, State};
use crate::surface::{CursorHint, PointerHint, Surface};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

pub use dispatcher::{Dispatcher, Operation};
pub use ids::{IdGenerator, UuidIds};
pub use persistence::PersistenceSync;
pub use placement::{PlacementController, PlacementMode};
pub use store::{transition, Action, ListenerId, StoreHandle};

/// Default storage slot name.
pub const DEFAULT_STORAGE_KEY: &str = "hotspots";

/// Configures and builds a [`HotspotSession`].
pub struct SessionBuilder {
    storage: Box<dyn Storage>,
    key: String,
    restore: bool,
    surface: Surface,
    hint: Rc<RefCell<dyn PointerHint>>,
    ids: Box<dyn IdGenerator>,
}

impl SessionBuilder {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            key: DEFAULT_STORAGE_KEY.to_string(),
            restore: true,
            surface: Surface::new(),
            hint: Rc::new(RefCell::new(CursorHint::new())),
            ids: Box::new(UuidIds),
        }
    }

    /// Apply the storage settings from a loaded [`Config`].
    pub fn config(self, config: &Config) -> Self {
        self.key(config.storage_key.clone())
            .restore(config.restore_on_start)
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Whether to load the persisted list before attaching persistence.
    pub fn restore(mut self, restore: bool) -> Self {
        self.restore = restore;
        self
    }

    pub fn surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }

    pub fn hint(mut self, hint: Rc<RefCell<dyn PointerHint>>) -> Self {
        self.hint = hint;
        self
    }

    pub fn ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Build the session. Fails only when restoring and the stored slot
    /// cannot be read or decoded.
    pub fn build(self) -> Result<HotspotSession, StorageError> {
        let initial = if self.restore {
            State::with_hotspots(restore_hotspots(self.storage.as_ref(), &self.key)?)
        } else {
            State::default()
        };

        let store = StoreHandle::new(initial);
        let actions = Dispatcher::new(store.clone());
        let placement =
            PlacementController::attach(actions.clone(), self.surface.clone(), self.hint, self.ids);
        let persistence = PersistenceSync::attach(store.clone(), self.storage, self.key);

        Ok(HotspotSession {
            store,
            actions,
            surface: self.surface,
            placement,
            persistence,
        })
    }
}

/// Load the persisted list, dropping entries whose id was already seen.
fn restore_hotspots(storage: &dyn Storage, key: &str) -> Result<Vec<Hotspot>, StorageError> {
    let Some(json) = storage.get(key)? else {
        return Ok(Vec::new());
    };
    let stored = serialization::from_json(&json)?;

    let mut seen = HashSet::new();
    let total = stored.len();
    let hotspots: Vec<Hotspot> = stored
        .into_iter()
        .filter(|h| seen.insert(h.id().to_string()))
        .collect();
    if hotspots.len() != total {
        log::warn!(
            "Dropped {} stored hotspots with duplicate ids",
            total - hotspots.len()
        );
    }

    log::info!("Restored {} hotspots from {:?}", hotspots.len(), key);
    Ok(hotspots)
}

/// A running hotspot manager.
pub struct HotspotSession {
    store: StoreHandle,
    actions: Dispatcher,
    surface: Surface,
    placement: PlacementController,
    persistence: PersistenceSync,
}

impl HotspotSession {
    pub fn builder(storage: impl Storage + 'static) -> SessionBuilder {
        SessionBuilder::new(storage)
    }

    /// Current `{hotspots, is_pointing}` snapshot.
    pub fn state(&self) -> State {
        self.store.state()
    }

    /// Stable operation handles.
    pub fn actions(&self) -> &Dispatcher {
        &self.actions
    }

    /// Where the host delivers pointer-move and click events.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn placement_mode(&self) -> PlacementMode {
        self.placement.mode()
    }

    pub fn storage_key(&self) -> &str {
        self.persistence.key()
    }

    /// Drain persistence failures since the last call.
    pub fn take_persist_errors(&self) -> Vec<StorageError> {
        self.persistence.take_errors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryStorage;
    use crate::models::Position;
    use crate::surface::EventKind;

    fn counter_ids() -> impl IdGenerator {
        let mut n = 0;
        move || {
            n += 1;
            format!("id-{n}")
        }
    }

    fn stored(storage: &MemoryStorage, key: &str) -> Vec<Hotspot> {
        serialization::from_json(&storage.get(key).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_fresh_session_is_empty_and_idle() {
        let session = HotspotSession::builder(MemoryStorage::new()).build().unwrap();
        let state = session.state();

        assert!(state.hotspots().is_empty());
        assert!(!state.is_pointing());
        assert_eq!(session.placement_mode(), PlacementMode::Idle);
        assert_eq!(session.storage_key(), DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_place_edit_delete_flow_persists() {
        let storage = MemoryStorage::new();
        let session = HotspotSession::builder(storage.clone())
            .ids(counter_ids())
            .build()
            .unwrap();

        session.actions().toggle_is_pointing().call(Some(true));
        session.surface().pointer_move(100.0, 40.0);
        session.surface().click(120.0, 45.0);

        let state = session.state();
        assert!(!state.is_pointing());
        assert_eq!(state.hotspots(), [Hotspot::new("id-1", Position::new(120.0, 45.0))]);
        assert_eq!(stored(&storage, "hotspots"), state.hotspots());

        let edited = state.hotspots()[0].with_title("Door").with_description("Front");
        session.actions().edit_hotspot().call(edited.clone());
        assert_eq!(stored(&storage, "hotspots"), [edited]);

        session.actions().delete_hotspot().call("id-1".into());
        assert!(stored(&storage, "hotspots").is_empty());
    }

    #[test]
    fn test_cancel_then_click_creates_nothing() {
        let session = HotspotSession::builder(MemoryStorage::new()).build().unwrap();

        session.actions().toggle_is_pointing().call(Some(true));
        session.actions().toggle_is_pointing().call(Some(false));
        session.surface().click(120.0, 45.0);

        assert!(session.state().hotspots().is_empty());
        assert_eq!(session.surface().subscription_count_for(EventKind::Click), 0);
    }

    #[test]
    fn test_restore_from_storage() {
        let storage = MemoryStorage::new();
        let saved = vec![
            Hotspot::new("a", Position::new(1.0, 2.0)).with_title("A"),
            Hotspot::new("b", Position::new(3.0, 4.0)),
        ];
        storage
            .set("hotspots", &serialization::to_json(&saved).unwrap())
            .unwrap();

        let session = HotspotSession::builder(storage).build().unwrap();
        assert_eq!(session.state().hotspots(), saved.as_slice());
    }

    #[test]
    fn test_restore_disabled_starts_empty_and_overwrites() {
        let storage = MemoryStorage::new();
        storage
            .set("hotspots", r#"[{"id":"old","position":{"left":0,"top":0}}]"#)
            .unwrap();

        let session = HotspotSession::builder(storage.clone())
            .restore(false)
            .build()
            .unwrap();

        assert!(session.state().hotspots().is_empty());
        assert!(stored(&storage, "hotspots").is_empty());
    }

    #[test]
    fn test_restore_drops_duplicate_ids() {
        let storage = MemoryStorage::new();
        storage
            .set(
                "hotspots",
                r#"[{"id":"a","position":{"left":1,"top":1},"title":"first"},
                    {"id":"a","position":{"left":2,"top":2},"title":"second"}]"#,
            )
            .unwrap();

        let session = HotspotSession::builder(storage).build().unwrap();
        let state = session.state();
        assert_eq!(state.hotspots().len(), 1);
        assert_eq!(state.hotspots()[0].title, "first");
    }

    #[test]
    fn test_corrupt_storage_fails_build() {
        let storage = MemoryStorage::new();
        storage.set("hotspots", "not json").unwrap();

        let result = HotspotSession::builder(storage.clone()).build();
        assert!(matches!(result, Err(StorageError::Serde(_))));
        // Nothing was overwritten
        assert_eq!(storage.get("hotspots").unwrap().as_deref(), Some("not json"));
    }

    #[test]
    fn test_config_sets_key() {
        let storage = MemoryStorage::new();
        let config = Config {
            storage_key: "plan-a".to_string(),
            ..Config::default()
        };
        let session = HotspotSession::builder(storage.clone())
            .config(&config)
            .build()
            .unwrap();

        assert_eq!(session.storage_key(), "plan-a");
        assert_eq!(storage.get("plan-a").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_shared_hint_is_driven() {
        let hint = Rc::new(RefCell::new(CursorHint::new()));
        let session = HotspotSession::builder(MemoryStorage::new())
            .hint(hint.clone())
            .build()
            .unwrap();

        session.actions().toggle_is_pointing().call(Some(true));
        session.surface().pointer_move(7.0, 8.0);
        assert_eq!(hint.borrow().primed(), Some(Position::new(7.0, 8.0)));
    }

    #[test]
    fn test_persist_errors_surface_on_session() {
        let session = HotspotSession::builder(MemoryStorage::with_quota(2))
            .build()
            .unwrap();

        session
            .actions()
            .save_hotspot()
            .call(Hotspot::new("a", Position::default()));

        assert_eq!(session.state().hotspots().len(), 1);
        assert_eq!(session.take_persist_errors().len(), 1);
    }

    #[test]
    fn test_drop_releases_surface() {
        let surface = Surface::new();
        let session = HotspotSession::builder(MemoryStorage::new())
            .surface(surface.clone())
            .build()
            .unwrap();
        session.actions().toggle_is_pointing().call(Some(true));
        assert_eq!(surface.subscription_count(), 2);

        drop(session);
        assert_eq!(surface.subscription_count(), 0);
    }
}
