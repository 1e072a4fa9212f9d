//! Refs never reach the store

use hooks_lab_runtime::Store;
use refs::{focus_input, NameAction, NameReducer, NameState, NameView};

#[tokio::test]
async fn ref_writes_do_not_bump_revision() {
    let store = Store::new(NameState::default(), NameReducer, ());
    let mut view = NameView::new();
    view.mount();

    let _ = store.send(NameAction::SetName("Ann".to_string())).await;
    let state = store.state(Clone::clone).await;
    view.render(&state);
    assert_eq!(store.revision(), 1);

    // Counter, previous-value and element writes
    view.render_count_ref().with_mut(|count| *count += 10);
    view.render(&state);
    assert!(focus_input(&view.input_ref()));

    assert_eq!(store.revision(), 1);
    assert_eq!(view.renders(), 12);
}

#[tokio::test]
async fn previous_name_follows_dispatches() {
    let store = Store::new(NameState::default(), NameReducer, ());
    let mut view = NameView::new();

    let mut headings = Vec::new();
    for name in ["A", "An", "Ann"] {
        let _ = store.send(NameAction::SetName(name.to_string())).await;
        let state = store.state(Clone::clone).await;
        headings.push(view.render(&state));
    }

    assert_eq!(headings[2], "My name is Ann and it was An before");
}
