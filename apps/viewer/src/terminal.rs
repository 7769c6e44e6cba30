//! Text rendering of the list menu and the views around it.

use list_core::{
    menu::{DrawStyle, Icon, ICON_SPACES},
    Dictation, MenuIndex, MenuProjection, ViewFocus, ViewHost,
};
use shared::domain::{Item, ListId};

/// Draws the menu the way the watch would, one text line per cell.
pub fn render_menu(menu: &MenuProjection<'_>) -> Vec<String> {
    let icon_pad = " ".repeat(ICON_SPACES);
    let mut lines = Vec::new();
    for section in 0..menu.section_count() {
        lines.push(format!("== {} ==", menu.header(section)));
        for row in 0..menu.row_count(section) {
            let drawing = menu.drawing(MenuIndex::new(section, row));
            let icon = match drawing.icon {
                Some(Icon::Done) => "[x]",
                Some(Icon::Undone) => "[ ]",
                None => "   ",
            };
            let line = match drawing.style {
                DrawStyle::Basic => format!("{icon} {}", drawing.text),
                // the icon is painted over the reserved leading spaces
                DrawStyle::Condensed => {
                    let text = match drawing.icon {
                        Some(_) => drawing
                            .text
                            .strip_prefix(icon_pad.as_str())
                            .unwrap_or(drawing.text.as_str()),
                        None => drawing.text.as_str(),
                    };
                    if drawing.done {
                        format!("{icon} ~{text}~")
                    } else {
                        format!("{icon} {text}")
                    }
                }
            };
            lines.push(line);
        }
    }
    lines
}

pub fn render_detail(list_id: ListId, item: &Item) -> Vec<String> {
    let state = if item.done { "done" } else { "open" };
    let mut lines = vec![
        format!("-- task {} (list {}) --", item.id.0, list_id.0),
        format!("{} [{state}]", item.title),
    ];
    if let Some(notes) = &item.notes {
        lines.push(notes.clone());
    }
    lines
}

/// Window stack with two task views, recorded as a transcript.
pub struct TerminalHost {
    focus: ViewFocus,
    menu_dirty: bool,
    echo: bool,
    transcript: Vec<String>,
}

impl TerminalHost {
    pub fn new(echo: bool) -> Self {
        Self {
            focus: ViewFocus::Other,
            menu_dirty: false,
            echo,
            transcript: Vec::new(),
        }
    }

    pub fn focus(&self) -> ViewFocus {
        self.focus
    }

    pub fn push_list(&mut self) {
        self.focus = ViewFocus::TaskList;
        self.menu_dirty = true;
    }

    /// Pops the top view: detail back to list, list back to the launcher.
    pub fn back(&mut self) {
        self.focus = match self.focus {
            ViewFocus::TaskDetail(_) => {
                self.menu_dirty = true;
                ViewFocus::TaskList
            }
            _ => ViewFocus::Other,
        };
    }

    pub fn take_menu_dirty(&mut self) -> bool {
        std::mem::take(&mut self.menu_dirty)
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn emit(&mut self, lines: impl IntoIterator<Item = String>) {
        for line in lines {
            if self.echo {
                println!("{line}");
            }
            self.transcript.push(line);
        }
    }
}

impl ViewHost for TerminalHost {
    fn current_focus(&self) -> ViewFocus {
        self.focus
    }

    fn reload_menu(&mut self) {
        if self.focus == ViewFocus::TaskList {
            self.menu_dirty = true;
        }
    }

    fn show_detail(&mut self, list_id: ListId, item: &Item) {
        self.focus = ViewFocus::TaskDetail(item.id);
        self.emit(render_detail(list_id, item));
    }

    fn show_status(&mut self, message: &str) {
        self.emit([format!("(status) {message}")]);
    }
}

/// Voice capture driven by the script: `start` only opens the session, the
/// script supplies what was "heard".
#[derive(Debug, Default)]
pub struct ScriptedDictation {
    listening: bool,
}

impl ScriptedDictation {
    pub fn finish(&mut self) -> bool {
        std::mem::take(&mut self.listening)
    }
}

impl Dictation for ScriptedDictation {
    fn start(&mut self) {
        self.listening = true;
    }
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
