//! Read-only projection of the current session into the sectioned menu the
//! list widget draws.

use shared::domain::{Item, TaskId};

use crate::{load_state::LoadState, session::Session};

pub const TASKS_SECTION: usize = 0;
pub const ACTIONS_SECTION: usize = 1;

pub const ACTIONS_HEADER: &str = "Actions";
pub const UNEXPECTED_HEADER: &str = "**unexpected header**";
pub const CREATE_TASK_LABEL: &str = "Create Task";

/// Spaces reserved in front of a condensed title for the state icon.
pub const ICON_SPACES: usize = 5;

/// Display settings read each time the menu is projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub large_font: bool,
    /// Without voice capture there is no way to create a task, so the
    /// actions section is never offered.
    pub dictation_enabled: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            large_font: false,
            dictation_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuIndex {
    pub section: usize,
    pub row: usize,
}

impl MenuIndex {
    pub fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    pub fn task(row: usize) -> Self {
        Self::new(TASKS_SECTION, row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Row promised by the load but not arrived yet, or nothing loaded.
    Pending,
    NoItems,
    /// The list's only task has an empty title.
    EmptyTitle,
}

impl Placeholder {
    pub fn text(self) -> &'static str {
        match self {
            Self::Pending => "<...>",
            Self::NoItems => "No items in this list!",
            Self::EmptyTitle => "<empty>",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowContent<'a> {
    Placeholder(Placeholder),
    Task(&'a Item),
    CreateTask,
    /// Coordinates the menu never advertised.
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Undone,
    Done,
}

impl Icon {
    pub fn for_done(done: bool) -> Self {
        if done {
            Self::Done
        } else {
            Self::Undone
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStyle {
    /// Stock cell with the system font, icon beside the title.
    Basic,
    /// Two-line cell in the condensed font; the icon is drawn over the
    /// leading spaces of the title.
    Condensed,
}

/// Everything the widget needs to draw one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDrawing {
    pub style: DrawStyle,
    pub text: String,
    pub icon: Option<Icon>,
    pub done: bool,
}

/// What the core should do in response to a menu click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Ignore,
    CreateTask,
    SetDone { task_id: TaskId, done: bool },
    OpenDetail(Item),
}

#[derive(Debug, Clone, Copy)]
pub struct MenuProjection<'a> {
    session: Option<&'a Session>,
    options: DisplayOptions,
}

impl<'a> MenuProjection<'a> {
    pub fn new(session: Option<&'a Session>, options: DisplayOptions) -> Self {
        Self { session, options }
    }

    fn state(&self) -> LoadState {
        self.session.map_or(LoadState::Unstarted, Session::state)
    }

    pub fn has_actions(&self) -> bool {
        self.options.dictation_enabled
            && matches!(self.state(), LoadState::Complete { count } if count > 0)
    }

    pub fn section_count(&self) -> usize {
        if self.has_actions() {
            2
        } else {
            1
        }
    }

    pub fn row_count(&self, section: usize) -> usize {
        match section {
            TASKS_SECTION => match self.state() {
                LoadState::Unstarted | LoadState::EmptyComplete => 1,
                LoadState::Loading { expected, .. } => expected,
                LoadState::Complete { count } => count,
            },
            ACTIONS_SECTION if self.has_actions() => 1,
            _ => 0,
        }
    }

    pub fn header(&self, section: usize) -> &'a str {
        match section {
            TASKS_SECTION => self.session.map_or("", Session::title),
            ACTIONS_SECTION => ACTIONS_HEADER,
            _ => UNEXPECTED_HEADER,
        }
    }

    pub fn row(&self, index: MenuIndex) -> RowContent<'a> {
        match index.section {
            TASKS_SECTION => self.task_row(index.row),
            ACTIONS_SECTION if self.has_actions() && index.row == 0 => RowContent::CreateTask,
            _ => RowContent::Invalid,
        }
    }

    fn task_row(&self, row: usize) -> RowContent<'a> {
        let Some(session) = self.session else {
            return RowContent::Placeholder(Placeholder::Pending);
        };
        let state = session.state();
        if state == LoadState::EmptyComplete {
            return RowContent::Placeholder(Placeholder::NoItems);
        }
        let Ok(item) = session.get(row) else {
            return RowContent::Placeholder(Placeholder::Pending);
        };
        if state.expected_count() == Some(1) && item.title.is_empty() {
            return RowContent::Placeholder(Placeholder::EmptyTitle);
        }
        RowContent::Task(item)
    }

    pub fn drawing(&self, index: MenuIndex) -> RowDrawing {
        let (text, icon, done) = match self.row(index) {
            RowContent::Task(item) => (
                item.title.as_str(),
                Some(Icon::for_done(item.done)),
                item.done,
            ),
            RowContent::Placeholder(placeholder) => (placeholder.text(), None, false),
            RowContent::CreateTask => {
                return RowDrawing {
                    style: DrawStyle::Basic,
                    text: CREATE_TASK_LABEL.to_string(),
                    icon: None,
                    done: false,
                };
            }
            RowContent::Invalid => ("", None, false),
        };

        if self.options.large_font {
            RowDrawing {
                style: DrawStyle::Basic,
                text: text.to_string(),
                icon,
                done,
            }
        } else {
            let text = if icon.is_some() {
                format!("{}{text}", " ".repeat(ICON_SPACES))
            } else {
                text.to_string()
            };
            RowDrawing {
                style: DrawStyle::Condensed,
                text,
                icon,
                done,
            }
        }
    }

    /// The received task behind a row, whatever placeholder it is drawn as.
    fn item_at(&self, index: MenuIndex) -> Option<&'a Item> {
        let session = self.session?;
        if index.section != TASKS_SECTION || session.state() == LoadState::EmptyComplete {
            return None;
        }
        session.get(index.row).ok()
    }

    /// Primary click: run the action, or flip a task's done state.
    pub fn select(&self, index: MenuIndex) -> Selection {
        if self.row(index) == RowContent::CreateTask {
            return Selection::CreateTask;
        }
        match self.item_at(index) {
            Some(item) => Selection::SetDone {
                task_id: item.id,
                done: !item.done,
            },
            None => Selection::Ignore,
        }
    }

    /// Long click: open the detail view of a task.
    pub fn long_select(&self, index: MenuIndex) -> Selection {
        self.item_at(index)
            .map_or(Selection::Ignore, |item| Selection::OpenDetail(item.clone()))
    }
}

#[cfg(test)]
#[path = "tests/menu_tests.rs"]
mod tests;
