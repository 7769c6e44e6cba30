use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::{Item, ListId, TaskId};

use crate::service::SeedList;

/// One user action replayed against the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    ShowList { list_id: ListId },
    Select { section: usize, row: usize },
    LongSelect { section: usize, row: usize },
    Back,
    Dictate { text: String },
    DictationFailed,
    /// Switches the watch's font size, as from the settings screen.
    LargeFont { enabled: bool },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub lists: Vec<SeedList>,
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read script '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid script '{}'", path.display()))
    }

    pub fn list_title(&self, list_id: ListId) -> &str {
        self.lists
            .iter()
            .find(|list| list.list_id == list_id)
            .map_or("?!?", |list| list.title.as_str())
    }

    /// Built-in walkthrough used when no script is given.
    pub fn demo() -> Self {
        let groceries = SeedList {
            list_id: ListId(1),
            title: "Groceries".into(),
            items: vec![
                Item::new(TaskId(1), "Milk"),
                Item::new(TaskId(2), "Eggs").with_done(true),
                Item::new(TaskId(3), "Bread").with_notes("whole grain"),
            ],
        };
        let errands = SeedList {
            list_id: ListId(2),
            title: "Errands".into(),
            items: Vec::new(),
        };
        Self {
            lists: vec![groceries, errands],
            steps: vec![
                ScriptStep::ShowList { list_id: ListId(1) },
                ScriptStep::Select { section: 0, row: 0 },
                ScriptStep::LongSelect { section: 0, row: 2 },
                ScriptStep::Back,
                ScriptStep::Select { section: 1, row: 0 },
                ScriptStep::Dictate {
                    text: "Butter".into(),
                },
                ScriptStep::Back,
                ScriptStep::ShowList { list_id: ListId(2) },
            ],
        }
    }
}
