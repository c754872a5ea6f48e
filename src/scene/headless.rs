//! In-memory scene used by the CLI, tests, and hosts that draw fold poses themselves.
//!
//! Views are flat-filled rectangles in a parent/child tree. Committed transactions advance on a
//! caller-driven clock and resolve their completion signal once the shared duration elapses.

use std::collections::HashMap;
use std::time::Duration;

use image::{Rgba, RgbaImage};

use crate::{
    animation::keyframes::AnimatedProperty,
    fold::{
        joint::FoldContainer,
        pose::{PanelPose, pose_at},
    },
    foundation::core::{Point, Rect, Rgba8Premul},
    foundation::error::{FoldError, FoldResult},
    scene::graph::{SceneGraph, Snapshotter, Transaction},
};

/// Handle to a view in a [`HeadlessScene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ViewId(pub usize);

/// Handle to a fold container attached in a [`HeadlessScene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ContainerId(pub usize);

#[derive(Clone, Debug)]
struct ViewNode {
    frame: Rect,
    superview: Option<ViewId>,
    subviews: Vec<ViewId>,
    fill: Rgba8Premul,
    renderable: bool,
}

#[derive(Debug)]
struct Running {
    transaction: Transaction<ViewId, ContainerId>,
    elapsed: Duration,
}

/// Scene graph with no compositor behind it.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    views: Vec<ViewNode>,
    containers: HashMap<ContainerId, (ViewId, FoldContainer)>,
    /// Container ids are never reused, so a stale id cannot alias a newer container.
    next_container: usize,
    running: Option<Running>,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a view filled with `fill`, appended on top of `parent`'s subviews when given.
    pub fn add_view(
        &mut self,
        parent: Option<ViewId>,
        frame: Rect,
        fill: Rgba8Premul,
    ) -> FoldResult<ViewId> {
        if let Some(parent) = parent {
            self.node(parent)?;
        }
        let id = ViewId(self.views.len());
        self.views.push(ViewNode {
            frame,
            superview: parent,
            subviews: Vec::new(),
            fill,
            renderable: true,
        });
        if let Some(parent) = parent {
            self.node_mut(parent)?.subviews.push(id);
        }
        Ok(id)
    }

    /// Subviews of `view`, back to front.
    pub fn subviews(&self, view: ViewId) -> FoldResult<&[ViewId]> {
        Ok(&self.node(view)?.subviews)
    }

    pub fn superview(&self, view: ViewId) -> FoldResult<Option<ViewId>> {
        Ok(self.node(view)?.superview)
    }

    /// Marks whether `view` can be snapshotted; unrenderable views fail to snapshot.
    pub fn set_renderable(&mut self, view: ViewId, renderable: bool) -> FoldResult<()> {
        self.node_mut(view)?.renderable = renderable;
        Ok(())
    }

    pub fn container(&self, id: ContainerId) -> Option<&FoldContainer> {
        self.containers.get(&id).map(|(_, container)| container)
    }

    /// Host view of an attached container.
    pub fn container_host(&self, id: ContainerId) -> Option<ViewId> {
        self.containers.get(&id).map(|(host, _)| *host)
    }

    /// Number of containers currently attached.
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    pub fn is_animating(&self) -> bool {
        self.running.is_some()
    }

    /// Time into the running transaction, if any.
    pub fn elapsed(&self) -> Option<Duration> {
        self.running.as_ref().map(|r| r.elapsed)
    }

    /// Moves the clock forward by `dt`.
    ///
    /// Returns `true` when this step completed the running transaction, resolving its signal.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(running) = self.running.as_mut() else {
            return false;
        };
        running.elapsed = running.elapsed.saturating_add(dt);
        if running.elapsed < running.transaction.duration {
            return false;
        }
        self.finish()
    }

    /// Completes the running transaction immediately.
    pub fn finish(&mut self) -> bool {
        match self.running.take() {
            Some(running) => {
                tracing::debug!(container = ?running.transaction.container, "transaction finished");
                running.transaction.completion.resolve();
                true
            }
            None => false,
        }
    }

    /// Abandons the running transaction without resolving its signal.
    pub fn drop_running(&mut self) -> bool {
        self.running.take().is_some()
    }

    /// Current value of the slide track: the sliding view, its property, and the centre coordinate.
    pub fn sample_slide(&self) -> FoldResult<Option<(ViewId, AnimatedProperty, f64)>> {
        let Some(running) = &self.running else {
            return Ok(None);
        };
        let tx = &running.transaction;
        let value = tx.slide.value_at(running.elapsed)?;
        Ok(Some((tx.slide_view, tx.slide.property, value)))
    }

    /// Presentation frame of `view`: its model frame, overridden by the slide track while running.
    pub fn presentation_frame(&self, view: ViewId) -> FoldResult<Rect> {
        let frame = self.node(view)?.frame;
        let Some((slid, property, value)) = self.sample_slide()? else {
            return Ok(frame);
        };
        if slid != view {
            return Ok(frame);
        }
        let center = frame.center();
        let center = match property {
            AnimatedProperty::PositionX => Point::new(value, center.y),
            AnimatedProperty::PositionY => Point::new(center.x, value),
            _ => center,
        };
        Ok(frame.with_origin(center - frame.size().to_vec2() / 2.0))
    }

    /// Poses of the running transaction's fold panels at the current clock.
    pub fn pose(&self) -> Option<Vec<PanelPose>> {
        let running = self.running.as_ref()?;
        let container = self.container(running.transaction.container)?;
        Some(pose_at(container, running.elapsed))
    }

    fn node(&self, view: ViewId) -> FoldResult<&ViewNode> {
        self.views
            .get(view.0)
            .ok_or_else(|| FoldError::scene(format!("unknown view {}", view.0)))
    }

    fn node_mut(&mut self, view: ViewId) -> FoldResult<&mut ViewNode> {
        self.views
            .get_mut(view.0)
            .ok_or_else(|| FoldError::scene(format!("unknown view {}", view.0)))
    }

    fn detach(&mut self, view: ViewId) -> FoldResult<()> {
        if let Some(parent) = self.node_mut(view)?.superview.take() {
            self.node_mut(parent)?.subviews.retain(|v| *v != view);
        }
        Ok(())
    }
}

impl SceneGraph for HeadlessScene {
    type ViewId = ViewId;
    type ContainerId = ContainerId;

    fn frame(&self, view: ViewId) -> FoldResult<Rect> {
        Ok(self.node(view)?.frame)
    }

    fn set_frame(&mut self, view: ViewId, frame: Rect) -> FoldResult<()> {
        self.node_mut(view)?.frame = frame;
        Ok(())
    }

    fn has_superview(&self, view: ViewId) -> bool {
        self.node(view).is_ok_and(|n| n.superview.is_some())
    }

    fn insert_below(&mut self, view: ViewId, sibling: ViewId) -> FoldResult<()> {
        if view == sibling {
            return Err(FoldError::scene("cannot insert a view below itself"));
        }
        let parent = self
            .node(sibling)?
            .superview
            .ok_or_else(|| FoldError::scene(format!("view {} has no superview", sibling.0)))?;
        self.node(view)?;
        self.detach(view)?;

        let siblings = &mut self.node_mut(parent)?.subviews;
        let at = siblings
            .iter()
            .position(|v| *v == sibling)
            .ok_or_else(|| FoldError::scene("view tree is inconsistent"))?;
        siblings.insert(at, view);
        self.node_mut(view)?.superview = Some(parent);
        Ok(())
    }

    fn attach_fold_container(
        &mut self,
        host: ViewId,
        container: FoldContainer,
    ) -> FoldResult<ContainerId> {
        self.node(host)?;
        let id = ContainerId(self.next_container);
        self.next_container += 1;
        self.containers.insert(id, (host, container));
        Ok(id)
    }

    fn remove_fold_container(&mut self, container: ContainerId) -> FoldResult<()> {
        self.containers
            .remove(&container)
            .map(|_| ())
            .ok_or_else(|| FoldError::scene(format!("fold container {} is not attached", container.0)))
    }

    fn commit(&mut self, transaction: Transaction<ViewId, ContainerId>) -> FoldResult<()> {
        if self.running.is_some() {
            return Err(FoldError::scene("a transaction is already running"));
        }
        self.node(transaction.slide_view)?;
        if self.container(transaction.container).is_none() {
            return Err(FoldError::scene(format!(
                "fold container {} is not attached",
                transaction.container.0
            )));
        }
        self.running = Some(Running {
            transaction,
            elapsed: Duration::ZERO,
        });
        Ok(())
    }
}

impl Snapshotter<ViewId> for HeadlessScene {
    /// Renders `view` and its subviews, back to front, at the view's frame size.
    fn snapshot(&mut self, view: ViewId) -> FoldResult<RgbaImage> {
        let node = self.node(view)?;
        if !node.renderable {
            return Err(FoldError::snapshot(format!("view {} cannot be rendered", view.0)));
        }
        let size = node.frame.size();
        if !(size.width.is_finite() && size.height.is_finite()) {
            return Err(FoldError::snapshot(format!(
                "view {} has a non-finite frame {}x{}",
                view.0, size.width, size.height
            )));
        }

        let mut image = RgbaImage::from_pixel(
            size.width.round().max(0.0) as u32,
            size.height.round().max(0.0) as u32,
            to_pixel(node.fill),
        );
        self.paint_subviews(view, Point::ZERO, &mut image)?;
        Ok(image)
    }
}

impl HeadlessScene {
    fn paint_subviews(&self, view: ViewId, origin: Point, image: &mut RgbaImage) -> FoldResult<()> {
        for sub in &self.node(view)?.subviews {
            let node = self.node(*sub)?;
            let frame = node.frame + origin.to_vec2();
            let (w, h) = image.dimensions();
            let x0 = frame.x0.round().clamp(0.0, f64::from(w)) as u32;
            let x1 = frame.x1.round().clamp(0.0, f64::from(w)) as u32;
            let y0 = frame.y0.round().clamp(0.0, f64::from(h)) as u32;
            let y1 = frame.y1.round().clamp(0.0, f64::from(h)) as u32;
            let px = to_pixel(node.fill);
            for y in y0..y1 {
                for x in x0..x1 {
                    image.put_pixel(x, y, px);
                }
            }
            self.paint_subviews(*sub, frame.origin(), image)?;
        }
        Ok(())
    }
}

fn to_pixel(c: Rgba8Premul) -> Rgba<u8> {
    Rgba([c.r, c.g, c.b, c.a])
}

#[cfg(test)]
#[path = "../../tests/unit/scene/headless.rs"]
mod tests;
