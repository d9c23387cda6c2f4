//! The flow store: sole owner and mutator of the [`FlowData`] aggregate and the
//! current screen selection.
//!
//! Every mutation goes through the methods below. The regular operations are
//! total: an unknown id degrades to a no-op that is only visible in the debug
//! log. The `try_*` variants report the same conditions as [`FlowError`].

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{FlowError, FlowResult};
use crate::event::{EventBus, EventHandler, FlowEvent};
use crate::flow::{
    ActionId, Connection, ConnectionId, FlowData, NewAction, NewConnection, NewScreen,
    PropertyEdit, Screen, ScreenId, ScreenUpdate,
};

#[derive(Debug, Default)]
pub struct FlowStore {
    flow: FlowData,
    selected: Option<ScreenId>,
    events: EventBus,
}

impl FlowStore {
    pub fn new(flow: FlowData) -> Self {
        Self {
            flow,
            selected: None,
            events: EventBus::new(),
        }
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    /// Read-only view of the aggregate.
    pub fn flow(&self) -> &FlowData {
        &self.flow
    }

    /// An owned snapshot of the current flow.
    pub fn export_flow(&self) -> FlowData {
        self.flow.clone()
    }

    pub fn selected_screen_id(&self) -> Option<&ScreenId> {
        self.selected.as_ref()
    }

    /// The selected screen, if the selection still resolves.
    pub fn selected_screen(&self) -> Option<&Screen> {
        self.selected.as_ref().and_then(|id| self.flow.screen(id))
    }

    pub fn add_screen(&mut self, screen: NewScreen) -> ScreenId {
        let id = loop {
            let candidate = ScreenId::generate();
            if !self.flow.contains_screen(&candidate) {
                break candidate;
            }
        };

        self.flow.screens.push(screen.into_screen(id.clone()));
        self.flow.touch();
        log::debug!("added screen {id}");
        self.events.emit(FlowEvent::ScreenAdded {
            screen_id: id.clone(),
        });
        id
    }

    /// Shallow-merges `update` into the screen. Unknown ids are ignored, but
    /// `updated_at` is refreshed either way.
    pub fn update_screen(&mut self, screen_id: &ScreenId, update: ScreenUpdate) {
        if let Err(err) = self.try_update_screen(screen_id, update) {
            log::debug!("update ignored: {err}");
            self.flow.touch();
        }
    }

    pub fn try_update_screen(&mut self, screen_id: &ScreenId, update: ScreenUpdate) -> FlowResult<()> {
        let screen = self
            .flow
            .screen_mut(screen_id)
            .ok_or_else(|| FlowError::ScreenNotFound(screen_id.clone()))?;
        update.apply_to(screen);
        self.flow.touch();
        self.events.emit(FlowEvent::ScreenUpdated {
            screen_id: screen_id.clone(),
        });
        Ok(())
    }

    /// Removes the screen, every connection touching it, and the selection if
    /// it pointed here. Deleting an unknown id changes nothing.
    pub fn delete_screen(&mut self, screen_id: &ScreenId) {
        if let Err(err) = self.try_delete_screen(screen_id) {
            log::debug!("delete ignored: {err}");
        }
    }

    pub fn try_delete_screen(&mut self, screen_id: &ScreenId) -> FlowResult<()> {
        let index = self
            .flow
            .screens
            .iter()
            .position(|screen| &screen.id == screen_id)
            .ok_or_else(|| FlowError::ScreenNotFound(screen_id.clone()))?;
        self.flow.screens.remove(index);

        let mut removed_connections = Vec::new();
        self.flow.connections.retain(|conn| {
            let keep = !conn.touches(screen_id);
            if !keep {
                removed_connections.push(conn.id.clone());
            }
            keep
        });
        self.flow.touch();

        log::debug!(
            "deleted screen {screen_id} and {} connection(s)",
            removed_connections.len()
        );
        self.events.emit(FlowEvent::ScreenDeleted {
            screen_id: screen_id.clone(),
            removed_connections,
        });

        if self.selected.as_ref() == Some(screen_id) {
            self.set_selected_screen(None);
        }
        Ok(())
    }

    /// Appends a connection. Endpoints are not checked.
    pub fn add_connection(&mut self, connection: NewConnection) -> ConnectionId {
        let id = loop {
            let candidate = ConnectionId::generate();
            if self.flow.connection(&candidate).is_none() {
                break candidate;
            }
        };

        self.flow.connections.push(connection.into_connection(id.clone()));
        self.flow.touch();
        log::debug!("added connection {id}");
        self.events.emit(FlowEvent::ConnectionAdded {
            connection_id: id.clone(),
        });
        id
    }

    /// Like [`Self::add_connection`], but refuses endpoints that do not exist.
    pub fn try_add_connection(&mut self, connection: NewConnection) -> FlowResult<ConnectionId> {
        for endpoint in [&connection.from_screen_id, &connection.to_screen_id] {
            if !self.flow.contains_screen(endpoint) {
                return Err(FlowError::DanglingEndpoint(endpoint.clone()));
            }
        }
        Ok(self.add_connection(connection))
    }

    pub fn delete_connection(&mut self, connection_id: &ConnectionId) {
        if let Err(err) = self.try_delete_connection(connection_id) {
            log::debug!("delete ignored: {err}");
        }
    }

    pub fn try_delete_connection(&mut self, connection_id: &ConnectionId) -> FlowResult<Connection> {
        let index = self
            .flow
            .connections
            .iter()
            .position(|conn| &conn.id == connection_id)
            .ok_or_else(|| FlowError::ConnectionNotFound(connection_id.clone()))?;
        let removed = self.flow.connections.remove(index);
        self.flow.touch();
        self.events.emit(FlowEvent::ConnectionDeleted {
            connection_id: connection_id.clone(),
        });
        Ok(removed)
    }

    /// Replaces the selection unconditionally. The id is not checked.
    pub fn set_selected_screen(&mut self, screen_id: Option<ScreenId>) {
        if self.selected == screen_id {
            return;
        }
        let old = std::mem::replace(&mut self.selected, screen_id);
        self.events.emit(FlowEvent::SelectionChanged {
            old,
            new: self.selected.clone(),
        });
    }

    /// Applies one typed property edit by rebuilding the screen's properties.
    pub fn edit_property(&mut self, screen_id: &ScreenId, edit: PropertyEdit) {
        let Some(screen) = self.flow.screen(screen_id) else {
            log::debug!("property edit ignored: screen {screen_id} does not exist");
            return;
        };
        let properties = edit.apply(&screen.properties);
        self.update_screen(screen_id, ScreenUpdate::properties(properties));
    }

    pub fn add_action(&mut self, screen_id: &ScreenId, action: NewAction) -> Option<ActionId> {
        let screen = self.flow.screen(screen_id)?;
        let id = loop {
            let candidate = ActionId::generate();
            if screen.action(&candidate).is_none() {
                break candidate;
            }
        };

        let mut actions = screen.actions.clone();
        actions.push(action.into_action(id.clone()));
        self.update_screen(screen_id, ScreenUpdate::actions(actions));
        Some(id)
    }

    pub fn remove_action(&mut self, screen_id: &ScreenId, action_id: &ActionId) {
        if let Err(err) = self.try_remove_action(screen_id, action_id) {
            log::debug!("remove ignored: {err}");
        }
    }

    pub fn try_remove_action(&mut self, screen_id: &ScreenId, action_id: &ActionId) -> FlowResult<()> {
        let screen = self
            .flow
            .screen(screen_id)
            .ok_or_else(|| FlowError::ScreenNotFound(screen_id.clone()))?;
        if screen.action(action_id).is_none() {
            return Err(FlowError::ActionNotFound {
                screen: screen_id.clone(),
                action: action_id.clone(),
            });
        }

        let actions = screen
            .actions
            .iter()
            .filter(|action| &action.id != action_id)
            .cloned()
            .collect();
        self.try_update_screen(screen_id, ScreenUpdate::actions(actions))
    }
}

/// Shared handle to one [`FlowStore`], cloned into every component that reads
/// or writes the flow.
#[derive(Debug, Clone, Default)]
pub struct FlowHandle {
    inner: Arc<RwLock<FlowStore>>,
}

impl FlowHandle {
    pub fn new(store: FlowStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, FlowStore> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, FlowStore> {
        self.inner.write()
    }
}
