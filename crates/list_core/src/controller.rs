//! Event handlers that mutate the live session: remote data arrival, list
//! navigation, and menu input.

use shared::{
    domain::{Item, ListId, TaskId},
    error::ApiError,
    protocol::RemoteEvent,
};
use tracing::{debug, info, warn};

use crate::{
    error::ListError,
    load_state::LoadProgress,
    menu::{DisplayOptions, MenuIndex, MenuProjection, Selection},
    notifier::{notify_item_changed, Route, ViewFocus, ViewHost},
    remote::{Dictation, DictationFailure, RemoteService},
    session::{Session, SessionManager},
};

pub const LOADING_STATUS: &str = "Loading tasks...";

/// Owns the single list session and routes every event that touches it.
///
/// Every handler validates against the load state before writing. A
/// rejected event is logged and leaves the session untouched; the error is
/// also returned so callers can observe it.
pub struct TaskListController<R, V, D> {
    sessions: SessionManager,
    remote: R,
    views: V,
    dictation: D,
    options: DisplayOptions,
}

impl<R: RemoteService, V: ViewHost, D: Dictation> TaskListController<R, V, D> {
    pub fn new(remote: R, views: V, dictation: D, options: DisplayOptions) -> Self {
        Self {
            sessions: SessionManager::new(),
            remote,
            views,
            dictation,
            options,
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn views(&self) -> &V {
        &self.views
    }

    pub fn views_mut(&mut self) -> &mut V {
        &mut self.views
    }

    pub fn dictation(&self) -> &D {
        &self.dictation
    }

    pub fn dictation_mut(&mut self) -> &mut D {
        &mut self.dictation
    }

    pub fn options(&self) -> DisplayOptions {
        self.options
    }

    pub fn set_options(&mut self, options: DisplayOptions) {
        self.options = options;
        self.views.reload_menu();
    }

    pub fn session(&self) -> Option<&Session> {
        self.sessions.current()
    }

    pub fn current_list_id(&self) -> ListId {
        self.sessions.current_list_id()
    }

    pub fn is_list_active(&self) -> bool {
        self.views.current_focus() == ViewFocus::TaskList
    }

    /// Load counters of the live session, `None` before any list is shown.
    pub fn snapshot(&self) -> Option<LoadProgress> {
        self.sessions.current().map(Session::progress)
    }

    pub fn menu(&self) -> MenuProjection<'_> {
        MenuProjection::new(self.sessions.current(), self.options)
    }

    /// The list viewer was pushed for `list_id`.
    pub fn on_list_shown(&mut self, list_id: ListId, title: impl Into<String>) {
        info!(list_id = list_id.0, "showing tasks");
        let outcome = self.sessions.show(list_id, title);
        if outcome.switched {
            self.views.reload_menu();
        }
        if outcome.needs_query {
            self.views.show_status(LOADING_STATUS);
            self.remote.query_tasks(list_id);
        }
    }

    /// Applies one event from the task service, dropping it when it belongs
    /// to a list that is no longer being viewed.
    pub fn on_remote_event(&mut self, event: RemoteEvent) -> Result<(), ListError> {
        match event {
            RemoteEvent::LoadBegin { list_id, count } => self.on_load_begin(list_id, count),
            RemoteEvent::ItemReceived {
                list_id,
                index,
                item,
            } => self.on_item_received(list_id, index, item),
            RemoteEvent::ItemAppended { list_id, item } => self.on_item_appended(list_id, item),
            RemoteEvent::ItemStateChanged {
                list_id,
                task_id,
                done,
            } => self.on_item_state_changed(list_id, task_id, done).map(|_| ()),
            RemoteEvent::Error { list_id, error } => self.on_remote_error(list_id, &error),
        }
    }

    pub fn on_load_begin(&mut self, list_id: ListId, count: usize) -> Result<(), ListError> {
        let result = self
            .sessions
            .session_for(list_id)
            .and_then(|session| session.begin_load(count));
        self.finish_load_event("load_begin", list_id, result)
    }

    pub fn on_item_received(
        &mut self,
        list_id: ListId,
        index: usize,
        item: Item,
    ) -> Result<(), ListError> {
        let result = self
            .sessions
            .session_for(list_id)
            .and_then(|session| session.receive_item(index, item));
        self.finish_load_event("item_received", list_id, result)
    }

    pub fn on_item_appended(&mut self, list_id: ListId, item: Item) -> Result<(), ListError> {
        let task_id = item.id;
        let result = self
            .sessions
            .session_for(list_id)
            .and_then(|session| session.append_item(item))
            .map(|index| {
                debug!(list_id = list_id.0, task_id = task_id.0, index, "task appended");
            });
        self.finish_load_event("item_appended", list_id, result)
    }

    /// Records a confirmed done-state change and tells whichever task view
    /// is visible about it.
    pub fn on_item_state_changed(
        &mut self,
        list_id: ListId,
        task_id: TaskId,
        done: bool,
    ) -> Result<Route, ListError> {
        let item = match self
            .sessions
            .session_for(list_id)
            .and_then(|session| session.set_done(task_id, done))
        {
            Ok(item) => item.clone(),
            Err(err) => {
                warn!(
                    list_id = list_id.0,
                    task_id = task_id.0,
                    done,
                    error = %err,
                    "dropping item_state_changed"
                );
                return Err(err);
            }
        };
        Ok(notify_item_changed(&mut self.views, list_id, &item))
    }

    pub fn on_remote_error(&mut self, list_id: ListId, error: &ApiError) -> Result<(), ListError> {
        let current = self.current_list_id();
        if current != list_id {
            let err = ListError::StaleList {
                event: list_id,
                current,
            };
            warn!(error = %err, "dropping remote error");
            return Err(err);
        }
        warn!(
            list_id = list_id.0,
            code = ?error.code,
            message = %error.message,
            "task service error"
        );
        self.views.show_status(&error.message);
        Ok(())
    }

    /// Primary click forwarded by the menu widget.
    pub fn on_select(&mut self, index: MenuIndex) {
        let list_id = self.current_list_id();
        let selection = self.menu().select(index);
        match selection {
            Selection::CreateTask => {
                debug!(list_id = list_id.0, "starting dictation for new task");
                self.dictation.start();
            }
            Selection::SetDone { task_id, done } => {
                debug!(
                    list_id = list_id.0,
                    task_id = task_id.0,
                    done,
                    "requesting status change"
                );
                self.remote.update_task_status(list_id, task_id, done);
            }
            Selection::OpenDetail(_) | Selection::Ignore => {}
        }
    }

    /// Long click forwarded by the menu widget.
    pub fn on_long_select(&mut self, index: MenuIndex) {
        let selection = self.menu().long_select(index);
        if let Selection::OpenDetail(item) = selection {
            let list_id = self.current_list_id();
            self.views.show_detail(list_id, &item);
        }
    }

    /// Completion of a dictation started by the "Create Task" action. The
    /// transcript becomes the title; notes are left empty.
    pub fn on_dictation_finished(&mut self, result: Result<String, DictationFailure>) {
        match result {
            Ok(transcript) => {
                let list_id = self.current_list_id();
                if list_id.is_none() {
                    warn!("dictation finished with no list shown, dropping transcript");
                    return;
                }
                info!(list_id = list_id.0, "creating task from dictation");
                self.remote.create_task(list_id, &transcript, None);
            }
            Err(err) => warn!(error = %err, "dictation session failed"),
        }
    }

    fn finish_load_event(
        &mut self,
        event: &'static str,
        list_id: ListId,
        result: Result<(), ListError>,
    ) -> Result<(), ListError> {
        match &result {
            Ok(()) => self.views.reload_menu(),
            Err(err) => warn!(event, list_id = list_id.0, error = %err, "dropping remote event"),
        }
        result
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
