use super::*;
use crate::{
    animation::{ease::Ease, keyframes::KeyframeAnimation},
    config::FoldConfig,
    fold::{
        direction::{Direction, Phase},
        joint::build_fold_container,
        plan::{ShadowPeaks, plan_folds},
    },
    foundation::core::Size,
    scene::graph::CompletionSignal,
};

fn red() -> Rgba8Premul {
    Rgba8Premul::from_straight_rgba(255, 0, 0, 255)
}

fn blue() -> Rgba8Premul {
    Rgba8Premul::from_straight_rgba(0, 0, 255, 255)
}

fn container(size: Size) -> FoldContainer {
    let plan = plan_folds(size, 1, Direction::Right, Phase::Show, ShadowPeaks::default()).unwrap();
    build_fold_container(
        &plan,
        &RgbaImage::new(size.width as u32, size.height as u32),
        Duration::from_millis(100),
        &FoldConfig::default(),
    )
    .unwrap()
}

fn transaction(
    view: ViewId,
    container: ContainerId,
) -> (
    Transaction<ViewId, ContainerId>,
    futures::channel::oneshot::Receiver<()>,
) {
    let (completion, rx) = CompletionSignal::pair();
    let slide = KeyframeAnimation::from_ease(
        AnimatedProperty::PositionX,
        50.0,
        -50.0,
        Ease::Linear,
        11,
        Duration::from_millis(100),
    )
    .unwrap();
    (
        Transaction {
            duration: Duration::from_millis(100),
            slide_view: view,
            slide,
            container,
            completion,
        },
        rx,
    )
}

#[test]
fn insert_below_places_view_under_its_sibling() {
    let mut scene = HeadlessScene::new();
    let root = scene
        .add_view(None, Rect::new(0.0, 0.0, 100.0, 100.0), red())
        .unwrap();
    let a = scene
        .add_view(Some(root), Rect::new(0.0, 0.0, 100.0, 100.0), red())
        .unwrap();
    let b = scene
        .add_view(None, Rect::new(0.0, 0.0, 40.0, 100.0), blue())
        .unwrap();
    assert!(!scene.has_superview(b));

    scene.insert_below(b, a).unwrap();
    assert!(scene.has_superview(b));
    assert_eq!(scene.subviews(root).unwrap(), &[b, a]);
    assert_eq!(scene.superview(b).unwrap(), Some(root));

    assert!(matches!(scene.insert_below(a, root), Err(FoldError::Scene(_))));
    assert!(matches!(scene.frame(ViewId(42)), Err(FoldError::Scene(_))));
}

#[test]
fn snapshot_paints_subviews_over_the_fill() {
    let mut scene = HeadlessScene::new();
    let root = scene
        .add_view(None, Rect::new(10.0, 10.0, 50.0, 30.0), red())
        .unwrap();
    scene
        .add_view(Some(root), Rect::new(20.0, 0.0, 40.0, 20.0), blue())
        .unwrap();

    let img = scene.snapshot(root).unwrap();
    assert_eq!(img.dimensions(), (40, 20));
    assert_eq!(img.get_pixel(5, 5).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(25, 5).0, [0, 0, 255, 255]);
    assert_eq!(img.get_pixel(39, 19).0, [0, 0, 255, 255]);
}

#[test]
fn snapshot_failures_are_reported() {
    let mut scene = HeadlessScene::new();
    let v = scene
        .add_view(None, Rect::new(0.0, 0.0, 10.0, 10.0), red())
        .unwrap();
    scene.set_renderable(v, false).unwrap();
    assert!(matches!(scene.snapshot(v), Err(FoldError::Snapshot(_))));

    let broken = scene
        .add_view(None, Rect::new(0.0, 0.0, f64::NAN, 10.0), red())
        .unwrap();
    assert!(matches!(scene.snapshot(broken), Err(FoldError::Snapshot(_))));

    let empty = scene
        .add_view(None, Rect::new(0.0, 0.0, 0.0, 10.0), red())
        .unwrap();
    assert_eq!(scene.snapshot(empty).unwrap().dimensions(), (0, 10));
    assert!(matches!(scene.snapshot(ViewId(9)), Err(FoldError::Scene(_))));
}

#[test]
fn containers_attach_and_detach_once() {
    let mut scene = HeadlessScene::new();
    let v = scene
        .add_view(None, Rect::new(0.0, 0.0, 100.0, 100.0), red())
        .unwrap();
    let id = scene
        .attach_fold_container(v, container(Size::new(100.0, 100.0)))
        .unwrap();
    assert_eq!(scene.container_count(), 1);
    assert_eq!(scene.container_host(id), Some(v));
    assert_eq!(scene.container(id).map(|c| c.depth()), Some(2));

    scene.remove_fold_container(id).unwrap();
    assert_eq!(scene.container_count(), 0);
    assert!(scene.remove_fold_container(id).is_err());
}

#[test]
fn detached_containers_free_their_storage_and_ids_stay_unique() {
    let mut scene = HeadlessScene::new();
    let v = scene
        .add_view(None, Rect::new(0.0, 0.0, 100.0, 100.0), red())
        .unwrap();
    let mut seen = Vec::new();
    for _ in 0..5 {
        let id = scene
            .attach_fold_container(v, container(Size::new(100.0, 100.0)))
            .unwrap();
        assert!(!seen.contains(&id));
        seen.push(id);
        scene.remove_fold_container(id).unwrap();
        assert_eq!(scene.containers.len(), 0);
    }
    assert!(seen.iter().all(|id| scene.container(*id).is_none()));

    let live = scene
        .attach_fold_container(v, container(Size::new(100.0, 100.0)))
        .unwrap();
    assert!(scene.remove_fold_container(seen[0]).is_err());
    assert_eq!(scene.container_host(live), Some(v));
}

#[test]
fn clock_drives_slide_and_resolves_completion() {
    let mut scene = HeadlessScene::new();
    let v = scene
        .add_view(None, Rect::new(0.0, 0.0, 100.0, 100.0), red())
        .unwrap();
    let id = scene
        .attach_fold_container(v, container(Size::new(100.0, 100.0)))
        .unwrap();
    let (tx, mut rx) = transaction(v, id);
    scene.commit(tx).unwrap();
    assert!(scene.is_animating());

    let (again, _rx2) = transaction(v, id);
    assert!(matches!(scene.commit(again), Err(FoldError::Scene(_))));

    assert!(!scene.advance(Duration::from_millis(50)));
    let (view, property, value) = scene.sample_slide().unwrap().unwrap();
    assert_eq!((view, property), (v, AnimatedProperty::PositionX));
    assert!((value - 0.0).abs() < 1e-9);
    let frame = scene.presentation_frame(v).unwrap();
    assert!((frame.x0 + 50.0).abs() < 1e-9);
    assert_eq!(scene.frame(v).unwrap().x0, 0.0);
    assert_eq!(scene.pose().map(|p| p.len()), Some(2));
    assert_eq!(rx.try_recv().unwrap(), None);

    assert!(scene.advance(Duration::from_millis(50)));
    assert!(!scene.is_animating());
    assert_eq!(rx.try_recv().unwrap(), Some(()));
    assert!(!scene.advance(Duration::from_millis(50)));
}

#[test]
fn dropping_the_run_cancels_the_signal() {
    let mut scene = HeadlessScene::new();
    let v = scene
        .add_view(None, Rect::new(0.0, 0.0, 100.0, 100.0), red())
        .unwrap();
    let id = scene
        .attach_fold_container(v, container(Size::new(100.0, 100.0)))
        .unwrap();
    let (tx, mut rx) = transaction(v, id);
    scene.commit(tx).unwrap();
    assert!(scene.drop_running());
    assert!(rx.try_recv().is_err());
}
