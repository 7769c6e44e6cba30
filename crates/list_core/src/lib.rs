//! Incremental list state and menu projection for the to-do list viewer.
//!
//! The task service delivers a list as a count followed by items in any
//! order. [`TaskListController`] merges those events, and user input from
//! the menu, into the single live [`Session`]; [`MenuProjection`] derives
//! the sectioned menu from it.

pub mod controller;
pub mod error;
pub mod item_store;
pub mod load_state;
pub mod menu;
pub mod notifier;
pub mod remote;
pub mod session;

pub use controller::TaskListController;
pub use error::{ListError, LoadPhase, Violation};
pub use item_store::ItemStore;
pub use load_state::{LoadProgress, LoadState};
pub use menu::{DisplayOptions, MenuIndex, MenuProjection, Placeholder, RowContent, Selection};
pub use notifier::{Route, SkipReason, ViewFocus, ViewHost};
pub use remote::{Dictation, DictationFailure, RemoteService, RequestSink};
pub use session::{Session, SessionManager, ShowOutcome};
