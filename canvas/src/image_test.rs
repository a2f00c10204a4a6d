use super::*;

fn size() -> Size {
    Size::new(400.0, 300.0)
}

#[test]
fn image_path_uses_image_prefix() {
    assert_eq!(image_path("shot_01.jpg"), "image/shot_01.jpg");
}

#[test]
fn default_is_no_image() {
    let state = LoadState::default();
    assert_eq!(state, LoadState::NoImage);
    assert!(state.ready().is_none());
    assert!(state.pending().is_none());
}

#[test]
fn begin_enters_loading() {
    let mut state = LoadState::default();
    state.begin("a".into());
    assert_eq!(state.pending(), Some("a"));
    assert!(state.ready().is_none());
}

#[test]
fn matching_completion_becomes_ready() {
    let mut state = LoadState::default();
    state.begin("a".into());
    assert_eq!(state.complete("a", size()), LoadOutcome::Ready);
    assert_eq!(state.ready(), Some(("a", size())));
    assert!(state.is_ready("a"));
    assert!(!state.is_ready("b"));
}

#[test]
fn stale_completion_after_switch_is_rejected() {
    let mut state = LoadState::default();
    state.begin("a".into());
    state.begin("b".into());
    assert_eq!(state.complete("a", size()), LoadOutcome::Stale);
    assert_eq!(state.pending(), Some("b"));
    assert_eq!(state.complete("b", size()), LoadOutcome::Ready);
    assert!(state.is_ready("b"));
}

#[test]
fn completion_without_request_is_stale() {
    let mut state = LoadState::default();
    assert_eq!(state.complete("a", size()), LoadOutcome::Stale);
    assert_eq!(state, LoadState::NoImage);
}

#[test]
fn duplicate_completion_is_stale() {
    let mut state = LoadState::default();
    state.begin("a".into());
    state.complete("a", size());
    assert_eq!(state.complete("a", Size::new(1.0, 1.0)), LoadOutcome::Stale);
    assert_eq!(state.ready(), Some(("a", size())));
}

#[test]
fn switching_from_ready_discards_old_image() {
    let mut state = LoadState::default();
    state.begin("a".into());
    state.complete("a", size());
    state.begin("b".into());
    assert!(state.ready().is_none());
    assert_eq!(state.pending(), Some("b"));
}

#[test]
fn failure_of_pending_load_clears() {
    let mut state = LoadState::default();
    state.begin("a".into());
    assert!(state.fail("a"));
    assert_eq!(state, LoadState::NoImage);
}

#[test]
fn failure_of_stale_load_is_ignored() {
    let mut state = LoadState::default();
    state.begin("a".into());
    state.begin("b".into());
    assert!(!state.fail("a"));
    assert_eq!(state.pending(), Some("b"));
}

#[test]
fn reset_forgets_ready_image() {
    let mut state = LoadState::default();
    state.begin("a".into());
    state.complete("a", size());
    state.reset();
    assert_eq!(state, LoadState::NoImage);
}
