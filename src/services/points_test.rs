use std::time::{Duration, UNIX_EPOCH};

use super::*;

fn state_with(images: &[&str]) -> PointsState {
    PointsState::new(images.iter().map(|s| (*s).to_owned()))
}

fn place(state: &mut PointsState, image: &str, point: &str, xy: [f64; 2]) {
    state.points.entry(image.to_owned()).or_default().insert(point.to_owned(), xy);
}

#[test]
fn new_lists_every_image_without_points() {
    let state = state_with(&["a.png", "b.png"]);
    assert_eq!(state.points.len(), 2);
    assert!(state.points.values().all(std::collections::BTreeMap::is_empty));
    assert_eq!(state.selected_point, None);
}

#[test]
fn add_point_registers_and_selects() {
    let mut state = state_with(&["a.png"]);
    let id = state.add_point();
    assert!(Uuid::parse_str(&id).is_ok());
    assert!(state.is_known(&id));
    assert_eq!(state.selected_point.as_deref(), Some(id.as_str()));
}

#[test]
fn add_point_twice_gives_distinct_ids() {
    let mut state = state_with(&[]);
    assert_ne!(state.add_point(), state.add_point());
    assert_eq!(state.registered.len(), 2);
}

#[test]
fn select_known_point() {
    let mut state = state_with(&["a.png"]);
    place(&mut state, "a.png", "GCP-1", [0.0, 0.0]);
    state.select_point(Some("GCP-1".into())).unwrap();
    assert_eq!(state.selected_point.as_deref(), Some("GCP-1"));
}

#[test]
fn select_unknown_point_fails_and_keeps_selection() {
    let mut state = state_with(&["a.png"]);
    let id = state.add_point();
    let err = state.select_point(Some("nope".into())).unwrap_err();
    assert_eq!(err, PointsError::UnknownPoint("nope".into()));
    assert_eq!(state.selected_point, Some(id));
}

#[test]
fn select_none_clears_selection() {
    let mut state = state_with(&["a.png"]);
    state.add_point();
    state.select_point(None).unwrap();
    assert_eq!(state.selected_point, None);
}

#[test]
fn remove_selected_deletes_from_every_image() {
    let mut state = state_with(&["a.png", "b.png"]);
    place(&mut state, "a.png", "P", [0.1, 0.1]);
    place(&mut state, "b.png", "P", [0.2, 0.2]);
    place(&mut state, "b.png", "Q", [0.3, 0.3]);
    state.select_point(Some("P".into())).unwrap();

    assert_eq!(state.remove_selected().as_deref(), Some("P"));
    assert!(state.points["a.png"].is_empty());
    assert_eq!(state.points["b.png"].keys().collect::<Vec<_>>(), vec!["Q"]);
    assert_eq!(state.selected_point, None);
    assert!(!state.is_known("P"));
}

#[test]
fn remove_without_selection_is_noop() {
    let mut state = state_with(&["a.png"]);
    place(&mut state, "a.png", "P", [0.1, 0.1]);
    let before = state.clone();
    assert_eq!(state.remove_selected(), None);
    assert_eq!(state, before);
}

#[test]
fn apply_dispatches_client_messages() {
    let mut state = state_with(&["a.png"]);
    state.apply(ClientMessage::AddPoint).unwrap();
    assert!(state.selected_point.is_some());
    state.apply(ClientMessage::RemovePoint).unwrap();
    assert_eq!(state.selected_point, None);
    assert!(state.registered.is_empty());
    assert!(state.apply(ClientMessage::SelectPoint { point_id: Some("ghost".into()) }).is_err());
}

#[test]
fn snapshot_carries_time_points_and_selection() {
    let mut state = state_with(&["a.png"]);
    place(&mut state, "a.png", "P", [0.25, -0.5]);
    state.select_point(Some("P".into())).unwrap();

    let event = state.snapshot(UNIX_EPOCH + Duration::from_millis(1_500));
    assert!((event.time - 1.5).abs() < 1e-9);
    assert_eq!(event.points, state.points);
    assert_eq!(event.selected_point.as_deref(), Some("P"));
}

#[test]
fn snapshot_lists_images_without_points() {
    let state = state_with(&["b.png", "a.png"]);
    let event = state.snapshot(UNIX_EPOCH);
    assert_eq!(event.image_ids(), vec!["a.png".to_owned(), "b.png".to_owned()]);
}

#[test]
fn snapshot_lists_unplaced_points_added_earlier() {
    let mut state = state_with(&["a.png"]);
    let first = state.add_point();
    let second = state.add_point();
    place(&mut state, "a.png", "GCP-1", [0.0, 0.0]);

    let event = state.snapshot(UNIX_EPOCH);
    assert_eq!(event.selected_point.as_deref(), Some(second.as_str()));
    assert!(event.point_ids.contains(&first));
    assert!(event.point_ids.contains(&second));
    assert!(event.point_ids.contains("GCP-1"));

    state.select_point(Some(first.clone())).unwrap();
    assert_eq!(state.selected_point, Some(first));
}

#[test]
fn removed_point_leaves_snapshot_ids() {
    let mut state = state_with(&["a.png"]);
    let id = state.add_point();
    state.remove_selected();
    assert!(!state.snapshot(UNIX_EPOCH).point_ids.contains(&id));
}
