//! Paperfold is a paper-fold ("accordion") screen transition engine.
//!
//! A covering view slides off one edge while the view beneath it unfolds like a strip of folded
//! paper; hiding plays the same effect in reverse. The engine is headless: it computes panel
//! geometry, keyframe tracks, and a nested 3D joint chain, and hands them to a host scene graph
//! through the [`SceneGraph`] and [`Snapshotter`] traits.
//!
//! # Pipeline overview
//!
//! 1. **Plan**: `Size + folds + Direction + Phase -> FoldPlan` (panel rects, angles, shadows)
//! 2. **Build**: `FoldPlan + snapshot -> FoldContainer` (nested joints with their animations)
//! 3. **Commit**: the container and the slide track go to the scene as one [`Transaction`]
//! 4. **Finish**: [`FoldTransition::poll`] snaps the covering view and detaches the container
//!
//! [`pose_at`] evaluates a container at any time for hosts that draw panels themselves, and
//! [`HeadlessScene`] is an in-memory scene for tests and the `paperfold` CLI.
#![forbid(unsafe_code)]

mod animation;
mod config;
mod fold;
mod foundation;
mod scene;
mod transition;

pub use animation::ease::Ease;
pub use animation::keyframes::{
    AnimatedProperty, BasicAnimation, DEFAULT_KEYFRAME_STEPS, KeyframeAnimation, sample_keyframes,
};
pub use config::FoldConfig;
pub use fold::direction::{Direction, FoldAxis, Phase};
pub use fold::joint::{
    FoldContainer, ImageLeaf, JointNode, LayerGeometry, ShadowLeaf, build_fold_container,
    crop_texture,
};
pub use fold::plan::{FoldPlan, PanelSpec, ShadowPeaks, ShadowSpec, plan_folds};
pub use fold::pose::{PanelPose, pose_at, pose_with};
pub use foundation::core::{Point, Rect, Rgba8Premul, Size, Vec2, frame_origin};
pub use foundation::error::{FoldError, FoldResult};
pub use foundation::transform::Transform3d;
pub use scene::graph::{CompletionSignal, SceneGraph, Snapshotter, Transaction};
pub use scene::headless::{ContainerId, HeadlessScene, ViewId};
pub use transition::controller::{CompletionCallback, FoldRequest, FoldTransition, Outcome};
pub use transition::latch::{TransitionLatch, TransitionState};
