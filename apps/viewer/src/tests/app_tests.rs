use super::*;

use std::path::Path;

use list_core::{LoadState, ViewFocus};
use shared::domain::{ListId, TaskId};

fn transcript_has(viewer: &Viewer, line: &str) -> bool {
    viewer
        .controller()
        .views()
        .transcript()
        .iter()
        .any(|l| l == line)
}

#[tokio::test]
async fn demo_script_walks_through_every_view() {
    let mut viewer = Viewer::start(&ViewerSettings::default(), Script::demo(), false);
    viewer.run().await;

    assert!(transcript_has(&viewer, "(status) Loading tasks..."));
    assert!(transcript_has(&viewer, "== Groceries =="));
    assert!(transcript_has(&viewer, "    <...>"));
    assert!(transcript_has(&viewer, "[x] ~Milk~"));
    assert!(transcript_has(&viewer, "Bread [open]"));
    assert!(transcript_has(&viewer, "whole grain"));
    assert!(transcript_has(&viewer, "== Actions =="));
    assert!(transcript_has(&viewer, "    Create Task"));
    assert!(transcript_has(&viewer, "[ ] Butter"));
    assert!(transcript_has(&viewer, "    No items in this list!"));

    let controller = viewer.controller();
    assert_eq!(controller.current_list_id(), ListId(2));
    assert_eq!(
        controller.session().map(|session| session.state()),
        Some(LoadState::EmptyComplete)
    );
    assert_eq!(controller.views().focus(), ViewFocus::TaskList);
}

#[tokio::test]
async fn revisiting_list_reuses_loaded_items() {
    let mut viewer = Viewer::start(&ViewerSettings::default(), Script::demo(), false);
    viewer.apply(ScriptStep::ShowList { list_id: ListId(1) });
    viewer.settle().await;
    viewer.apply(ScriptStep::Back);
    viewer.apply(ScriptStep::ShowList { list_id: ListId(1) });
    viewer.settle().await;

    let statuses = viewer
        .controller()
        .views()
        .transcript()
        .iter()
        .filter(|line| line.starts_with("(status)"))
        .count();
    assert_eq!(statuses, 1);
    assert_eq!(
        viewer.controller().session().map(|session| session.state()),
        Some(LoadState::Complete { count: 3 })
    );
}

#[tokio::test]
async fn transcript_without_open_dictation_is_ignored() {
    let mut viewer = Viewer::start(&ViewerSettings::default(), Script::demo(), false);
    viewer.apply(ScriptStep::ShowList { list_id: ListId(1) });
    viewer.settle().await;
    viewer.apply(ScriptStep::Dictate {
        text: "Nobody asked".into(),
    });
    viewer.settle().await;

    let session = viewer.controller().session().expect("session");
    assert_eq!(session.state(), LoadState::Complete { count: 3 });
    assert!(session.find_by_id(TaskId(4)).is_none());
}

#[tokio::test]
async fn large_font_draws_basic_cells() {
    let settings = ViewerSettings {
        large_font: true,
        ..ViewerSettings::default()
    };
    let mut viewer = Viewer::start(&settings, Script::demo(), false);
    viewer.apply(ScriptStep::ShowList { list_id: ListId(1) });
    viewer.settle().await;

    assert!(transcript_has(&viewer, "[x] Eggs"));
    assert!(!transcript_has(&viewer, "[x] ~Eggs~"));
}

#[tokio::test]
async fn bundled_groceries_script_runs_to_the_end() {
    let path = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/groceries.json"));
    let script = Script::load(path).expect("bundled script parses");
    let mut viewer = Viewer::start(&ViewerSettings::default(), script, false);
    viewer.run().await;

    assert!(transcript_has(&viewer, "[x] ~Eggs~"));
    assert!(transcript_has(&viewer, "[ ] Eggs"));
    assert!(transcript_has(&viewer, "[ ] Coffee"));
    assert!(transcript_has(&viewer, "== Only one =="));
    assert!(transcript_has(&viewer, "    <empty>"));
    assert!(transcript_has(&viewer, "-- task 20 (list 2) --"));
    assert!(transcript_has(&viewer, "[ ] Milk"));

    let controller = viewer.controller();
    assert!(controller.options().large_font);
    let session = controller.session().expect("session");
    assert_eq!(session.list_id(), ListId(1));
    assert_eq!(session.state(), LoadState::Complete { count: 4 });
    assert_eq!(session.find_by_id(TaskId(21)).map(|item| item.title.as_str()), Some("Coffee"));
}

#[tokio::test]
async fn font_step_redraws_open_list() {
    let mut viewer = Viewer::start(&ViewerSettings::default(), Script::demo(), false);
    viewer.apply(ScriptStep::ShowList { list_id: ListId(1) });
    viewer.settle().await;
    assert!(transcript_has(&viewer, "[x] ~Eggs~"));
    assert!(!transcript_has(&viewer, "[x] Eggs"));

    viewer.apply(ScriptStep::LargeFont { enabled: true });

    assert!(transcript_has(&viewer, "[x] Eggs"));
    assert!(viewer.controller().options().dictation_enabled);
}
