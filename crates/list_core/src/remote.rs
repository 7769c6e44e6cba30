//! Outbound collaborators: the task service and voice capture.

use shared::{
    domain::{ListId, TaskId},
    protocol::RemoteRequest,
};
use thiserror::Error;

/// Transport to the task service. Calls return immediately; the service's
/// answer comes back later as a `RemoteEvent`.
pub trait RemoteService {
    fn query_tasks(&mut self, list_id: ListId);
    fn create_task(&mut self, list_id: ListId, title: &str, notes: Option<&str>);
    fn update_task_status(&mut self, list_id: ListId, task_id: TaskId, done: bool);
}

/// Any sink of [`RemoteRequest`]s is a remote service.
pub trait RequestSink {
    fn send(&mut self, request: RemoteRequest);
}

impl<S: RequestSink> RemoteService for S {
    fn query_tasks(&mut self, list_id: ListId) {
        self.send(RemoteRequest::QueryTasks { list_id });
    }

    fn create_task(&mut self, list_id: ListId, title: &str, notes: Option<&str>) {
        self.send(RemoteRequest::CreateTask {
            list_id,
            title: title.to_string(),
            notes: notes.map(str::to_string),
        });
    }

    fn update_task_status(&mut self, list_id: ListId, task_id: TaskId, done: bool) {
        self.send(RemoteRequest::UpdateTaskStatus {
            list_id,
            task_id,
            done,
        });
    }
}

/// Voice capture. `start` opens the dictation UI; the transcript is handed
/// back through `TaskListController::on_dictation_finished`.
pub trait Dictation {
    fn start(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictationFailure {
    #[error("dictation was cancelled")]
    Cancelled,
    #[error("no speech was recognized")]
    NoSpeech,
    #[error("dictation is unavailable: {0}")]
    Unavailable(String),
}
