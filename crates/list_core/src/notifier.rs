//! Decides which view hears about a task whose done state changed.

use shared::domain::{Item, ListId, TaskId};
use tracing::debug;

/// The view currently on top of the window stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewFocus {
    TaskList,
    TaskDetail(TaskId),
    Other,
}

/// Windowing capabilities the core needs. Implemented by the host that owns
/// the real views.
pub trait ViewHost {
    fn current_focus(&self) -> ViewFocus;
    /// Ask the list widget to re-query the menu projection.
    fn reload_menu(&mut self);
    /// Show (or refresh) the detail view for one task.
    fn show_detail(&mut self, list_id: ListId, item: &Item);
    fn show_status(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ReloadMenu,
    PushDetail,
    Skip(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    DetailShowsOtherTask(TaskId),
    NoTaskView,
}

pub fn route(focus: ViewFocus, task_id: TaskId) -> Route {
    match focus {
        ViewFocus::TaskList => Route::ReloadMenu,
        ViewFocus::TaskDetail(shown) if shown == task_id => Route::PushDetail,
        ViewFocus::TaskDetail(shown) => Route::Skip(SkipReason::DetailShowsOtherTask(shown)),
        ViewFocus::Other => Route::Skip(SkipReason::NoTaskView),
    }
}

/// Delivers a changed item to exactly one view, or to none when neither
/// task view is visible. The item store already holds the change, so a
/// skipped view picks it up next time it is shown.
pub fn notify_item_changed<V: ViewHost + ?Sized>(
    views: &mut V,
    list_id: ListId,
    item: &Item,
) -> Route {
    let route = route(views.current_focus(), item.id);
    match route {
        Route::ReloadMenu => views.reload_menu(),
        Route::PushDetail => views.show_detail(list_id, item),
        Route::Skip(SkipReason::DetailShowsOtherTask(shown)) => debug!(
            task_id = item.id.0,
            shown_task_id = shown.0,
            "skipping update: detail view shows another task"
        ),
        Route::Skip(SkipReason::NoTaskView) => debug!(
            task_id = item.id.0,
            "skipping update: neither list nor detail view is active"
        ),
    }
    route
}

#[cfg(test)]
#[path = "tests/notifier_tests.rs"]
mod tests;
