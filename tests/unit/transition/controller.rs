use super::*;
use crate::{
    foundation::core::Rgba8Premul,
    scene::headless::{HeadlessScene, ViewId},
};
use std::sync::{Arc, Mutex};

fn scene() -> (HeadlessScene, ViewId, ViewId) {
    let mut scene = HeadlessScene::new();
    let window = scene
        .add_view(None, Rect::new(0.0, 0.0, 320.0, 480.0), Rgba8Premul::black())
        .unwrap();
    let covering = scene
        .add_view(
            Some(window),
            Rect::new(0.0, 0.0, 320.0, 480.0),
            Rgba8Premul::grey(1.0, 1.0),
        )
        .unwrap();
    let menu = scene
        .add_view(
            None,
            Rect::new(0.0, 0.0, 200.0, 480.0),
            Rgba8Premul::from_straight_rgba(0, 128, 255, 255),
        )
        .unwrap();
    (scene, covering, menu)
}

fn recorder() -> (Arc<Mutex<Vec<bool>>>, CompletionCallback) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    (calls, Box::new(move |ok| sink.lock().unwrap().push(ok)))
}

fn request(direction: Direction) -> FoldRequest {
    FoldRequest::new(2, Duration::from_millis(300), direction)
}

#[test]
fn request_validation() {
    assert!(request(Direction::Left).validate().is_ok());
    assert!(FoldRequest::new(0, Duration::from_millis(1), Direction::Left).validate().is_err());
    assert!(FoldRequest::new(1, Duration::ZERO, Direction::Left).validate().is_err());
}

#[test]
fn invalid_config_is_rejected() {
    let config = FoldConfig {
        keyframe_steps: 1,
        ..FoldConfig::default()
    };
    assert!(FoldTransition::<HeadlessScene>::new(config).is_err());
}

#[test]
fn show_mounts_target_and_commits_one_transaction() {
    let (mut scene, covering, menu) = scene();
    let mut fold = FoldTransition::new(FoldConfig::default()).unwrap();
    let outcome = fold
        .show(&mut scene, covering, menu, request(Direction::Left), None)
        .unwrap();

    assert_eq!(outcome, Outcome::Started);
    assert_eq!(fold.state(), TransitionState::Updating);
    assert!(fold.is_running());
    assert!(scene.has_superview(menu));
    assert_eq!(scene.frame(menu).unwrap(), Rect::new(0.0, 0.0, 200.0, 480.0));
    assert_eq!(scene.container_count(), 1);
    assert!(scene.is_animating());

    let (view, property, value) = scene.sample_slide().unwrap().unwrap();
    assert_eq!(view, covering);
    assert_eq!(property, crate::animation::keyframes::AnimatedProperty::PositionX);
    assert_eq!(value, 160.0);
    assert!(!fold.poll(&mut scene).unwrap());
}

#[test]
fn poll_finishes_after_the_scene_resolves() {
    let (mut scene, covering, menu) = scene();
    let mut fold = FoldTransition::new(FoldConfig::default()).unwrap();
    let (calls, cb) = recorder();
    fold.show(&mut scene, covering, menu, request(Direction::Left), Some(cb))
        .unwrap();

    scene.advance(Duration::from_millis(150));
    assert!(!fold.poll(&mut scene).unwrap());
    assert!(calls.lock().unwrap().is_empty());

    scene.advance(Duration::from_millis(150));
    assert!(fold.poll(&mut scene).unwrap());
    assert_eq!(*calls.lock().unwrap(), vec![true]);
    assert_eq!(fold.state(), TransitionState::Shown);
    assert!(!fold.is_running());
    assert_eq!(scene.container_count(), 0);
    assert_eq!(scene.frame(covering).unwrap().x0, 200.0);
    assert!(!fold.poll(&mut scene).unwrap());
}

#[test]
fn requests_in_the_wrong_state_are_ignored() {
    let (mut scene, covering, menu) = scene();
    let mut fold = FoldTransition::new(FoldConfig::default()).unwrap();
    let (calls, cb) = recorder();

    let outcome = fold
        .hide(&mut scene, covering, menu, request(Direction::Left), Some(cb))
        .unwrap();
    assert_eq!(outcome, Outcome::Ignored);
    assert_eq!(fold.state(), TransitionState::Idle);
    assert!(!scene.has_superview(menu));

    fold.show(&mut scene, covering, menu, request(Direction::Left), None)
        .unwrap();
    let (_, cb) = recorder();
    let outcome = fold
        .show(&mut scene, covering, menu, request(Direction::Left), Some(cb))
        .unwrap();
    assert_eq!(outcome, Outcome::Ignored);
    assert_eq!(scene.container_count(), 1);
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn invalid_request_leaves_the_latch_untouched() {
    let (mut scene, covering, menu) = scene();
    let mut fold = FoldTransition::new(FoldConfig::default()).unwrap();
    let bad = FoldRequest::new(0, Duration::from_millis(300), Direction::Right);
    assert!(matches!(
        fold.show(&mut scene, covering, menu, bad, None),
        Err(FoldError::Validation(_))
    ));
    assert_eq!(fold.state(), TransitionState::Idle);
}

#[test]
fn snapshot_failure_rolls_back() {
    let (mut scene, covering, menu) = scene();
    scene.set_renderable(menu, false).unwrap();
    let mut fold = FoldTransition::new(FoldConfig::default()).unwrap();
    let err = fold
        .show(&mut scene, covering, menu, request(Direction::Right), None)
        .unwrap_err();
    assert!(matches!(err, FoldError::Snapshot(_)));
    assert_eq!(fold.state(), TransitionState::Idle);
    assert!(!fold.is_running());
    assert_eq!(scene.container_count(), 0);
    assert!(!scene.is_animating());
    assert!(!scene.has_superview(menu));
    assert_eq!(scene.frame(menu).unwrap(), Rect::new(0.0, 0.0, 200.0, 480.0));
}

#[test]
fn rejected_commit_detaches_the_container_and_rolls_back() {
    let (mut scene, covering, menu) = scene();
    let mut first = FoldTransition::<HeadlessScene>::new(FoldConfig::default()).unwrap();
    let mut second = FoldTransition::<HeadlessScene>::new(FoldConfig::default()).unwrap();
    assert!(!first.latch().is_shared_with(second.latch()));

    assert_eq!(
        first
            .show(&mut scene, covering, menu, request(Direction::Left), None)
            .unwrap(),
        Outcome::Started
    );
    let (calls, cb) = recorder();
    let err = second
        .show(&mut scene, covering, menu, request(Direction::Left), Some(cb))
        .unwrap_err();

    assert!(matches!(err, FoldError::Scene(_)));
    assert_eq!(second.state(), TransitionState::Idle);
    assert!(!second.is_running());
    assert_eq!(scene.container_count(), 1);
    assert!(calls.lock().unwrap().is_empty());

    assert_eq!(first.state(), TransitionState::Updating);
    scene.finish();
    assert!(first.poll(&mut scene).unwrap());
    assert_eq!(first.state(), TransitionState::Shown);
    assert_eq!(scene.container_count(), 0);
}

#[test]
fn dropped_signal_still_cleans_up() {
    let (mut scene, covering, menu) = scene();
    let mut fold = FoldTransition::new(FoldConfig::default()).unwrap();
    let (calls, cb) = recorder();
    fold.show(&mut scene, covering, menu, request(Direction::Top), Some(cb))
        .unwrap();

    assert!(scene.drop_running());
    assert!(fold.poll(&mut scene).unwrap());
    assert_eq!(*calls.lock().unwrap(), vec![false]);
    assert_eq!(fold.state(), TransitionState::Shown);
    assert_eq!(scene.container_count(), 0);
    assert_eq!(scene.frame(covering).unwrap().y0, 480.0);
}
