//! The list currently being viewed and the manager that guarantees there is
//! at most one of them.

use shared::domain::{Item, ListId, TaskId};
use tracing::{debug, info};

use crate::{
    error::ListError,
    item_store::ItemStore,
    load_state::{LoadProgress, LoadState},
};

#[derive(Debug, Clone)]
pub struct Session {
    list_id: ListId,
    title: String,
    state: LoadState,
    store: ItemStore,
}

impl Session {
    pub fn new(list_id: ListId, title: impl Into<String>) -> Self {
        Self {
            list_id,
            title: title.into(),
            state: LoadState::Unstarted,
            store: ItemStore::new(),
        }
    }

    pub fn list_id(&self) -> ListId {
        self.list_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn progress(&self) -> LoadProgress {
        self.state.into()
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn get(&self, index: usize) -> Result<&Item, ListError> {
        self.store.get(index)
    }

    pub fn find_by_id(&self, id: TaskId) -> Option<&Item> {
        self.store
            .find_by_id(id)
            .and_then(|index| self.store.get(index).ok())
    }

    pub fn begin_load(&mut self, expected: usize) -> Result<(), ListError> {
        let next = self.state.begin(expected)?;
        self.store.reset(expected);
        self.state = next;
        debug!(list_id = self.list_id.0, expected, "load started");
        Ok(())
    }

    pub fn receive_item(&mut self, index: usize, item: Item) -> Result<(), ListError> {
        let next = self.state.receive(index)?;
        self.store.put(index, item)?;
        self.state = next;
        debug!(
            list_id = self.list_id.0,
            index,
            loaded = ?self.state.loaded_count(),
            "item received"
        );
        Ok(())
    }

    /// Adds an item to a fully loaded list and returns its row index.
    pub fn append_item(&mut self, item: Item) -> Result<usize, ListError> {
        let (next, index) = self.state.append()?;
        let stored_at = self.store.push(item);
        debug_assert_eq!(stored_at, index);
        self.state = next;
        Ok(index)
    }

    /// Sets the done flag of the item with `task_id`. Re-applying the
    /// current value is rejected as [`ListError::NoOp`].
    pub fn set_done(&mut self, task_id: TaskId, done: bool) -> Result<&Item, ListError> {
        self.state.check_update()?;
        let item = self
            .store
            .get_mut_by_id(task_id)
            .ok_or(ListError::NotFound { task_id })?;
        if item.done == done {
            return Err(ListError::NoOp { task_id, done });
        }
        item.done = done;
        Ok(&*item)
    }
}

/// Outcome of showing a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowOutcome {
    /// The previous session, if any, was discarded.
    pub switched: bool,
    /// Nothing has been loaded for this list yet.
    pub needs_query: bool,
}

#[derive(Debug, Default)]
pub struct SessionManager {
    current: Option<Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn current_list_id(&self) -> ListId {
        self.current
            .as_ref()
            .map_or(ListId::NONE, Session::list_id)
    }

    /// Makes `list_id` the live session. A different id discards everything
    /// held for the previous list; the same id keeps items and progress and
    /// only refreshes the title.
    pub fn show(&mut self, list_id: ListId, title: impl Into<String>) -> ShowOutcome {
        let title = title.into();
        let switched = self.current_list_id() != list_id;
        if switched {
            if let Some(old) = &self.current {
                info!(
                    from = old.list_id.0,
                    to = list_id.0,
                    "switching list, dropping previous session"
                );
            }
            self.current = Some(Session::new(list_id, title));
        } else if let Some(session) = self.current.as_mut() {
            session.title = title;
        }
        let needs_query = self
            .current
            .as_ref()
            .is_some_and(|session| session.state == LoadState::Unstarted);
        ShowOutcome {
            switched,
            needs_query,
        }
    }

    /// Resolves the session an event addressed to `list_id` applies to.
    pub fn session_for(&mut self, list_id: ListId) -> Result<&mut Session, ListError> {
        let session = self.current.as_mut().ok_or(ListError::NoSession)?;
        if session.list_id != list_id {
            return Err(ListError::StaleList {
                event: list_id,
                current: session.list_id,
            });
        }
        Ok(session)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
