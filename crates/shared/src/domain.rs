use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ListId);
id_newtype!(TaskId);

impl ListId {
    /// Sentinel held before any list has been shown.
    pub const NONE: ListId = ListId(-1);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// One task of a list as delivered by the task service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: TaskId,
    pub done: bool,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Item {
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            done: false,
            title: title.into(),
            notes: None,
        }
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
