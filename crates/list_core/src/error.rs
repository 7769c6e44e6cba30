use std::fmt;

use shared::domain::{ListId, TaskId};
use thiserror::Error;

/// Coarse phase of a list load, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Unstarted,
    Loading,
    Complete,
    EmptyComplete,
}

impl fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unstarted => "unstarted",
            Self::Loading => "loading",
            Self::Complete => "complete",
            Self::EmptyComplete => "empty",
        };
        f.write_str(name)
    }
}

/// An event the task service should never have sent in the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("load already started (state is {phase})")]
    AlreadyStarted { phase: LoadPhase },
    #[error("item arrived while not loading (state is {phase})")]
    NotLoading { phase: LoadPhase },
    #[error("append while list is not fully loaded (state is {phase})")]
    NotComplete { phase: LoadPhase },
    #[error("item update before anything was loaded")]
    NothingLoaded,
    #[error("index {index} outside expected range 0..{expected}")]
    IndexOutOfRange { index: usize, expected: usize },
    #[error("index {index} was already received")]
    DuplicateIndex { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("protocol violation: {0}")]
    ProtocolViolation(#[from] Violation),
    #[error("task {} not found in current list", .task_id.0)]
    NotFound { task_id: TaskId },
    #[error("task {} already has done={done}", .task_id.0)]
    NoOp { task_id: TaskId, done: bool },
    #[error("row {index} has not been received")]
    OutOfRange { index: usize },
    #[error("event for list {} ignored, current list is {}", .event.0, .current.0)]
    StaleList { event: ListId, current: ListId },
    #[error("no list is being viewed")]
    NoSession,
}
