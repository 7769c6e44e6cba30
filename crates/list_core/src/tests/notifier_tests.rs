use super::*;

#[derive(Default)]
struct RecordingViews {
    focus: Option<ViewFocus>,
    reloads: usize,
    details: Vec<(ListId, Item)>,
}

impl ViewHost for RecordingViews {
    fn current_focus(&self) -> ViewFocus {
        self.focus.unwrap_or(ViewFocus::Other)
    }

    fn reload_menu(&mut self) {
        self.reloads += 1;
    }

    fn show_detail(&mut self, list_id: ListId, item: &Item) {
        self.details.push((list_id, item.clone()));
    }

    fn show_status(&mut self, _message: &str) {}
}

fn done_item() -> Item {
    Item::new(TaskId(1), "Buy milk").with_done(true)
}

#[test]
fn visible_list_is_reloaded() {
    let mut views = RecordingViews {
        focus: Some(ViewFocus::TaskList),
        ..Default::default()
    };
    let route = notify_item_changed(&mut views, ListId(2), &done_item());
    assert_eq!(route, Route::ReloadMenu);
    assert_eq!(views.reloads, 1);
    assert!(views.details.is_empty());
}

#[test]
fn detail_showing_same_task_gets_the_item() {
    let mut views = RecordingViews {
        focus: Some(ViewFocus::TaskDetail(TaskId(1))),
        ..Default::default()
    };
    let route = notify_item_changed(&mut views, ListId(2), &done_item());
    assert_eq!(route, Route::PushDetail);
    assert_eq!(views.reloads, 0);
    assert_eq!(views.details, vec![(ListId(2), done_item())]);
}

#[test]
fn detail_showing_other_task_is_left_alone() {
    let mut views = RecordingViews {
        focus: Some(ViewFocus::TaskDetail(TaskId(8))),
        ..Default::default()
    };
    let route = notify_item_changed(&mut views, ListId(2), &done_item());
    assert_eq!(
        route,
        Route::Skip(SkipReason::DetailShowsOtherTask(TaskId(8)))
    );
    assert_eq!(views.reloads, 0);
    assert!(views.details.is_empty());
}

#[test]
fn unrelated_view_gets_nothing() {
    assert_eq!(
        route(ViewFocus::Other, TaskId(1)),
        Route::Skip(SkipReason::NoTaskView)
    );
}
