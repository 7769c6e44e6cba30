use std::{cell::RefCell, collections::HashMap};

use list_core::{
    menu::{ACTIONS_SECTION, TASKS_SECTION},
    Dictation, DisplayOptions, ListError, LoadState, MenuIndex, RequestSink,
    TaskListController, ViewFocus, ViewHost,
};
use shared::{
    domain::{Item, ListId, TaskId},
    protocol::{RemoteEvent, RemoteRequest},
};

/// Task service double: answers queued requests with the events the real
/// service would eventually send.
#[derive(Default)]
struct FakeService {
    state: RefCell<ServiceState>,
}

#[derive(Default)]
struct ServiceState {
    lists: HashMap<ListId, Vec<Item>>,
    outbox: Vec<RemoteRequest>,
    next_id: i64,
}

impl RequestSink for FakeService {
    fn send(&mut self, request: RemoteRequest) {
        self.state.get_mut().outbox.push(request);
    }
}

impl FakeService {
    fn with_list(list_id: ListId, items: Vec<Item>) -> Self {
        let service = Self::default();
        {
            let mut state = service.state.borrow_mut();
            state.lists.insert(list_id, items);
            state.next_id = 1000;
        }
        service
    }

    fn add_list(&self, list_id: ListId, items: Vec<Item>) {
        self.state.borrow_mut().lists.insert(list_id, items);
    }

    /// Another client changes a task's status.
    fn toggle_elsewhere(&self, list_id: ListId, task_id: TaskId, done: bool) {
        self.state
            .borrow_mut()
            .outbox
            .push(RemoteRequest::UpdateTaskStatus {
                list_id,
                task_id,
                done,
            });
    }

    /// Answers everything pending; items of a query arrive last-first.
    fn drain(&self) -> Vec<RemoteEvent> {
        let mut state = self.state.borrow_mut();
        let mut events = Vec::new();
        for request in std::mem::take(&mut state.outbox) {
            match request {
                RemoteRequest::QueryTasks { list_id } => {
                    let items = state.lists.get(&list_id).cloned().unwrap_or_default();
                    events.push(RemoteEvent::LoadBegin {
                        list_id,
                        count: items.len(),
                    });
                    for (index, item) in items.into_iter().enumerate().rev() {
                        events.push(RemoteEvent::ItemReceived {
                            list_id,
                            index,
                            item,
                        });
                    }
                }
                RemoteRequest::CreateTask {
                    list_id,
                    title,
                    notes,
                } => {
                    state.next_id += 1;
                    let item = Item {
                        id: TaskId(state.next_id),
                        done: false,
                        title,
                        notes,
                    };
                    state.lists.entry(list_id).or_default().push(item.clone());
                    events.push(RemoteEvent::ItemAppended { list_id, item });
                }
                RemoteRequest::UpdateTaskStatus {
                    list_id,
                    task_id,
                    done,
                } => {
                    if let Some(item) = state
                        .lists
                        .get_mut(&list_id)
                        .and_then(|items| items.iter_mut().find(|item| item.id == task_id))
                    {
                        item.done = done;
                    }
                    events.push(RemoteEvent::ItemStateChanged {
                        list_id,
                        task_id,
                        done,
                    });
                }
            }
        }
        events
    }
}

struct Screen {
    focus: ViewFocus,
    reloads: usize,
}

impl ViewHost for Screen {
    fn current_focus(&self) -> ViewFocus {
        self.focus
    }

    fn reload_menu(&mut self) {
        self.reloads += 1;
    }

    fn show_detail(&mut self, _list_id: ListId, item: &Item) {
        self.focus = ViewFocus::TaskDetail(item.id);
    }

    fn show_status(&mut self, _message: &str) {}
}

#[derive(Default)]
struct Microphone {
    started: bool,
}

impl Dictation for Microphone {
    fn start(&mut self) {
        self.started = true;
    }
}

fn pump(controller: &mut TaskListController<FakeService, Screen, Microphone>) {
    let events = controller.remote().drain();
    for event in events {
        controller.on_remote_event(event).expect("event applies");
    }
}

fn groceries() -> Vec<Item> {
    vec![
        Item::new(TaskId(1), "Milk"),
        Item::new(TaskId(2), "Eggs").with_done(true),
        Item::new(TaskId(3), "Bread").with_notes("rye"),
    ]
}

#[test]
fn list_loads_out_of_order_then_grows_and_toggles() {
    let list = ListId(5);
    let mut controller = TaskListController::new(
        FakeService::with_list(list, groceries()),
        Screen {
            focus: ViewFocus::TaskList,
            reloads: 0,
        },
        Microphone::default(),
        DisplayOptions::default(),
    );

    controller.on_list_shown(list, "Groceries");
    pump(&mut controller);

    let session = controller.session().expect("session");
    assert_eq!(session.state(), LoadState::Complete { count: 3 });
    for id in 1..=3 {
        assert!(session.find_by_id(TaskId(id)).is_some());
    }
    assert_eq!(controller.menu().header(TASKS_SECTION), "Groceries");

    controller.on_select(MenuIndex::new(ACTIONS_SECTION, 0));
    assert!(controller.dictation().started);
    controller.on_dictation_finished(Ok("Butter".to_string()));
    pump(&mut controller);
    assert_eq!(controller.menu().row_count(TASKS_SECTION), 4);
    assert_eq!(
        controller.menu().drawing(MenuIndex::task(3)).text.trim(),
        "Butter"
    );

    controller.on_select(MenuIndex::task(0));
    pump(&mut controller);
    assert!(controller.session().expect("session").get(0).expect("milk").done);
}

#[test]
fn detail_view_receives_toggle_for_its_task() {
    let list = ListId(5);
    let mut controller = TaskListController::new(
        FakeService::with_list(list, groceries()),
        Screen {
            focus: ViewFocus::TaskList,
            reloads: 0,
        },
        Microphone::default(),
        DisplayOptions::default(),
    );
    controller.on_list_shown(list, "Groceries");
    pump(&mut controller);

    controller.on_long_select(MenuIndex::task(1));
    assert_eq!(controller.views().focus, ViewFocus::TaskDetail(TaskId(2)));
    let reloads = controller.views().reloads;

    controller
        .remote()
        .toggle_elsewhere(list, TaskId(2), false);
    pump(&mut controller);

    assert_eq!(controller.views().reloads, reloads);
    assert!(!controller.session().expect("session").get(1).expect("eggs").done);
}

#[test]
fn stale_events_after_switch_are_refused() {
    let service = FakeService::with_list(ListId(1), groceries());
    service.add_list(ListId(2), Vec::new());
    let mut controller = TaskListController::new(
        service,
        Screen {
            focus: ViewFocus::TaskList,
            reloads: 0,
        },
        Microphone::default(),
        DisplayOptions::default(),
    );

    controller.on_list_shown(ListId(1), "Groceries");
    let first_answer = controller.remote().drain();
    controller.on_list_shown(ListId(2), "Empty");

    for event in first_answer {
        assert!(matches!(
            controller.on_remote_event(event),
            Err(ListError::StaleList { .. })
        ));
    }
    pump(&mut controller);

    let menu = controller.menu();
    assert_eq!(menu.section_count(), 1);
    assert_eq!(menu.drawing(MenuIndex::task(0)).text, "No items in this list!");
}
