use serde::{Deserialize, Serialize};

use crate::{
    domain::{Item, ListId, TaskId},
    error::ApiError,
};

/// Requests the list viewer issues to the task service. All of them are
/// fire-and-forget; their effect comes back as [`RemoteEvent`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum RemoteRequest {
    QueryTasks {
        list_id: ListId,
    },
    CreateTask {
        list_id: ListId,
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
    UpdateTaskStatus {
        list_id: ListId,
        task_id: TaskId,
        done: bool,
    },
}

impl RemoteRequest {
    pub fn list_id(&self) -> ListId {
        match self {
            Self::QueryTasks { list_id }
            | Self::CreateTask { list_id, .. }
            | Self::UpdateTaskStatus { list_id, .. } => *list_id,
        }
    }
}

/// Data arriving from the task service. Every event names the list it
/// belongs to so events for an abandoned list can be told apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum RemoteEvent {
    LoadBegin {
        list_id: ListId,
        count: usize,
    },
    ItemReceived {
        list_id: ListId,
        index: usize,
        item: Item,
    },
    ItemAppended {
        list_id: ListId,
        item: Item,
    },
    ItemStateChanged {
        list_id: ListId,
        task_id: TaskId,
        done: bool,
    },
    Error {
        list_id: ListId,
        error: ApiError,
    },
}

impl RemoteEvent {
    pub fn list_id(&self) -> ListId {
        match self {
            Self::LoadBegin { list_id, .. }
            | Self::ItemReceived { list_id, .. }
            | Self::ItemAppended { list_id, .. }
            | Self::ItemStateChanged { list_id, .. }
            | Self::Error { list_id, .. } => *list_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_use_tagged_payload_encoding() {
        let event = RemoteEvent::ItemReceived {
            list_id: ListId(4),
            index: 1,
            item: Item::new(TaskId(9), "Buy milk"),
        };
        let value = serde_json::to_value(&event).expect("serialize");
        assert_eq!(value["type"], "item_received");
        assert_eq!(value["payload"]["list_id"], 4);
        assert_eq!(value["payload"]["item"]["title"], "Buy milk");
        assert!(value["payload"]["item"].get("notes").is_none());
    }

    #[test]
    fn create_request_without_notes_parses() {
        let raw = r#"{"type":"create_task","payload":{"list_id":2,"title":"Call mom"}}"#;
        let request: RemoteRequest = serde_json::from_str(raw).expect("parse");
        assert_eq!(
            request,
            RemoteRequest::CreateTask {
                list_id: ListId(2),
                title: "Call mom".to_string(),
                notes: None,
            }
        );
        assert_eq!(request.list_id(), ListId(2));
    }
}
