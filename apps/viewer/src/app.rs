//! Single-threaded event loop joining user steps and service output.

use std::{cell::Cell, rc::Rc, time::Duration};

use list_core::{DictationFailure, DisplayOptions, MenuIndex, TaskListController};
use shared::protocol::RemoteEvent;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, warn};

use crate::{
    config::ViewerSettings,
    script::{Script, ScriptStep},
    service::{ChannelRemote, InMemoryTaskService, ServiceOutput},
    terminal::{render_menu, ScriptedDictation, TerminalHost},
};

pub type Controller = TaskListController<ChannelRemote, TerminalHost, ScriptedDictation>;

pub struct Viewer {
    controller: Controller,
    script: Script,
    output: UnboundedReceiver<ServiceOutput>,
    pending: Rc<Cell<usize>>,
}

impl Viewer {
    /// Spawns the in-memory service and wires it to a fresh controller.
    pub fn start(settings: &ViewerSettings, script: Script, echo: bool) -> Self {
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let service = InMemoryTaskService::new(
            &script.lists,
            Duration::from_millis(settings.item_delay_ms),
        );
        tokio::spawn(service.run(req_rx, out_tx));

        let remote = ChannelRemote::new(req_tx);
        let pending = remote.pending();
        let controller = TaskListController::new(
            remote,
            TerminalHost::new(echo),
            ScriptedDictation::default(),
            settings.display_options(),
        );
        Self {
            controller,
            script,
            output: out_rx,
            pending,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub async fn run(&mut self) {
        let steps = self.script.steps.clone();
        for step in steps {
            self.apply(step);
            self.settle().await;
        }
    }

    pub fn apply(&mut self, step: ScriptStep) {
        debug!(?step, "script step");
        match step {
            ScriptStep::ShowList { list_id } => {
                let title = self.script.list_title(list_id).to_string();
                self.controller.views_mut().push_list();
                self.controller.on_list_shown(list_id, title);
            }
            ScriptStep::Select { section, row } => {
                self.controller.on_select(MenuIndex::new(section, row));
            }
            ScriptStep::LongSelect { section, row } => {
                self.controller.on_long_select(MenuIndex::new(section, row));
            }
            ScriptStep::Back => self.controller.views_mut().back(),
            ScriptStep::Dictate { text } => {
                if self.finish_dictation() {
                    self.controller.on_dictation_finished(Ok(text));
                }
            }
            ScriptStep::DictationFailed => {
                if self.finish_dictation() {
                    self.controller
                        .on_dictation_finished(Err(DictationFailure::Cancelled));
                }
            }
            ScriptStep::LargeFont { enabled } => {
                let options = DisplayOptions {
                    large_font: enabled,
                    ..self.controller.options()
                };
                self.controller.set_options(options);
            }
        }
        self.redraw();
    }

    fn finish_dictation(&mut self) -> bool {
        let listening = self.controller.dictation_mut().finish();
        if !listening {
            warn!("no dictation session open, ignoring transcript");
        }
        listening
    }

    /// Applies service output until every request sent so far is answered.
    pub async fn settle(&mut self) {
        while self.pending.get() > 0 {
            match self.output.recv().await {
                Some(ServiceOutput::Event(event)) => self.deliver(event),
                Some(ServiceOutput::Answered) => self.pending.set(self.pending.get() - 1),
                None => {
                    warn!("task service stopped");
                    self.pending.set(0);
                }
            }
        }
    }

    pub fn deliver(&mut self, event: RemoteEvent) {
        // rejected events are already logged by the controller
        let _ = self.controller.on_remote_event(event);
        self.redraw();
    }

    fn redraw(&mut self) {
        if self.controller.views_mut().take_menu_dirty() {
            let lines = render_menu(&self.controller.menu());
            self.controller.views_mut().emit(lines);
        }
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
