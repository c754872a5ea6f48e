use std::fmt::Debug;
use std::time::Duration;

use futures::channel::oneshot;
use image::RgbaImage;

use crate::{
    animation::keyframes::KeyframeAnimation,
    fold::joint::FoldContainer,
    foundation::core::Rect,
    foundation::error::FoldResult,
};

/// View hierarchy and layer tree the transition drives.
///
/// Implementations own the views and the compositor; the transition only reads frames, mounts the
/// revealed view, attaches one fold container per run, and hands over one [`Transaction`].
pub trait SceneGraph {
    /// Handle to a view.
    type ViewId: Copy + Eq + Debug;
    /// Handle to an attached fold container.
    type ContainerId: Copy + Eq + Debug;

    /// Current frame of `view` in its superview's coordinates.
    fn frame(&self, view: Self::ViewId) -> FoldResult<Rect>;

    fn set_frame(&mut self, view: Self::ViewId, frame: Rect) -> FoldResult<()>;

    fn has_superview(&self, view: Self::ViewId) -> bool;

    /// Mounts `view` in `sibling`'s superview, directly beneath `sibling`.
    fn insert_below(&mut self, view: Self::ViewId, sibling: Self::ViewId) -> FoldResult<()>;

    /// Adds `container` as the topmost layer of `host`.
    fn attach_fold_container(
        &mut self,
        host: Self::ViewId,
        container: FoldContainer,
    ) -> FoldResult<Self::ContainerId>;

    fn remove_fold_container(&mut self, container: Self::ContainerId) -> FoldResult<()>;

    /// Starts every animation of `transaction` together.
    ///
    /// The scene must call [`CompletionSignal::resolve`] once the last animation finishes. Dropping
    /// the signal instead reports the run as unsuccessful.
    fn commit(
        &mut self,
        transaction: Transaction<Self::ViewId, Self::ContainerId>,
    ) -> FoldResult<()>;
}

/// Rasterizes a view's current appearance.
pub trait Snapshotter<V> {
    fn snapshot(&mut self, view: V) -> FoldResult<RgbaImage>;
}

/// Everything one run animates, started atomically with a shared duration.
#[derive(Debug)]
pub struct Transaction<V, C> {
    pub duration: Duration,
    /// View whose centre the slide track moves.
    pub slide_view: V,
    pub slide: KeyframeAnimation,
    /// Container whose joints carry the rotation and shadow animations.
    pub container: C,
    pub completion: CompletionSignal,
}

/// Single-use notification that a transaction's animations have finished.
#[derive(Debug)]
pub struct CompletionSignal(oneshot::Sender<()>);

impl CompletionSignal {
    pub(crate) fn pair() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (Self(tx), rx)
    }

    pub fn resolve(self) {
        // The receiver is gone only when the controller was dropped mid-run.
        let _ = self.0.send(());
    }
}
