//! In-process stand-in for the task service, reachable only through
//! channels so the list core sees the same asynchronous event stream a
//! phone bridge would deliver.

use std::{cell::Cell, collections::HashMap, rc::Rc, time::Duration};

use list_core::RequestSink;
use serde::Deserialize;
use shared::{
    domain::{Item, ListId, TaskId},
    error::{ApiError, ErrorCode},
    protocol::{RemoteEvent, RemoteRequest},
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

#[derive(Debug, Clone, Deserialize)]
pub struct SeedList {
    pub list_id: ListId,
    pub title: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// What the service task sends back. `Answered` closes out one request.
#[derive(Debug)]
pub enum ServiceOutput {
    Event(RemoteEvent),
    Answered,
}

pub struct InMemoryTaskService {
    lists: HashMap<ListId, Vec<Item>>,
    next_task_id: i64,
    item_delay: Duration,
}

impl InMemoryTaskService {
    pub fn new(seed: &[SeedList], item_delay: Duration) -> Self {
        let lists: HashMap<ListId, Vec<Item>> = seed
            .iter()
            .map(|list| (list.list_id, list.items.clone()))
            .collect();
        let next_task_id = lists
            .values()
            .flatten()
            .map(|item| item.id.0)
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            lists,
            next_task_id,
            item_delay,
        }
    }

    pub async fn run(
        mut self,
        mut requests: UnboundedReceiver<RemoteRequest>,
        output: UnboundedSender<ServiceOutput>,
    ) {
        while let Some(request) = requests.recv().await {
            debug!(?request, "task service request");
            for event in self.answer(request) {
                if matches!(event, RemoteEvent::ItemReceived { .. }) && !self.item_delay.is_zero()
                {
                    tokio::time::sleep(self.item_delay).await;
                }
                if output.send(ServiceOutput::Event(event)).is_err() {
                    return;
                }
            }
            if output.send(ServiceOutput::Answered).is_err() {
                return;
            }
        }
    }

    /// Events produced for one request. Query results are sent last item
    /// first, the way a slow bridge may reorder them.
    pub fn answer(&mut self, request: RemoteRequest) -> Vec<RemoteEvent> {
        match request {
            RemoteRequest::QueryTasks { list_id } => {
                let Some(items) = self.lists.get(&list_id) else {
                    return vec![not_found(list_id)];
                };
                let mut events = vec![RemoteEvent::LoadBegin {
                    list_id,
                    count: items.len(),
                }];
                events.extend(items.iter().cloned().enumerate().rev().map(
                    |(index, item)| RemoteEvent::ItemReceived {
                        list_id,
                        index,
                        item,
                    },
                ));
                events
            }
            RemoteRequest::CreateTask {
                list_id,
                title,
                notes,
            } => {
                let Some(items) = self.lists.get_mut(&list_id) else {
                    return vec![not_found(list_id)];
                };
                let item = Item {
                    id: TaskId(self.next_task_id),
                    done: false,
                    title,
                    notes,
                };
                self.next_task_id += 1;
                items.push(item.clone());
                vec![RemoteEvent::ItemAppended { list_id, item }]
            }
            RemoteRequest::UpdateTaskStatus {
                list_id,
                task_id,
                done,
            } => {
                let Some(item) = self
                    .lists
                    .get_mut(&list_id)
                    .and_then(|items| items.iter_mut().find(|item| item.id == task_id))
                else {
                    warn!(list_id = list_id.0, task_id = task_id.0, "unknown task");
                    return vec![not_found(list_id)];
                };
                item.done = done;
                vec![RemoteEvent::ItemStateChanged {
                    list_id,
                    task_id,
                    done,
                }]
            }
        }
    }
}

fn not_found(list_id: ListId) -> RemoteEvent {
    RemoteEvent::Error {
        list_id,
        error: ApiError::new(ErrorCode::NotFound, "List not found"),
    }
}

/// Request sink handed to the list core; counts requests still waiting for
/// an answer.
pub struct ChannelRemote {
    tx: UnboundedSender<RemoteRequest>,
    pending: Rc<Cell<usize>>,
}

impl ChannelRemote {
    pub fn new(tx: UnboundedSender<RemoteRequest>) -> Self {
        Self {
            tx,
            pending: Rc::new(Cell::new(0)),
        }
    }

    pub fn pending(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.pending)
    }
}

impl RequestSink for ChannelRemote {
    fn send(&mut self, request: RemoteRequest) {
        if self.tx.send(request).is_err() {
            warn!("task service is gone, dropping request");
            return;
        }
        self.pending.set(self.pending.get() + 1);
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
