//! The callback app driven by a Store

use callback::{CallbackAction, CallbackApp, CallbackReducer, CallbackState};
use hooks_lab_runtime::Store;
use hooks_lab_testing::helpers::send_all;
use std::time::Duration;

#[tokio::test]
async fn theme_toggles_reuse_the_callback() {
    let store = Store::new(CallbackState::default(), CallbackReducer, ());
    let mut app = CallbackApp::new();
    app.render(&store.state(|s| *s).await);

    send_all(
        &store,
        [CallbackAction::ToggleTheme, CallbackAction::ToggleTheme],
        Duration::from_secs(1),
    )
    .await
    .ok();
    let frame = app.render(&store.state(|s| *s).await);

    assert_eq!(frame.items, vec![2, 3, 4]);
    assert_eq!(app.list_updates(), 1);

    send_all(&store, [CallbackAction::SetNumber(7)], Duration::from_secs(1))
        .await
        .ok();
    let frame = app.render(&store.state(|s| *s).await);

    assert_eq!(frame.items, vec![8, 9, 10]);
    assert_eq!(app.list_updates(), 2);
}
