use std::time::Duration;

use futures::channel::oneshot;

use crate::{
    animation::keyframes::KeyframeAnimation,
    config::FoldConfig,
    fold::{
        direction::{Direction, Phase},
        joint::build_fold_container,
        plan::plan_folds,
    },
    foundation::core::Rect,
    foundation::error::{FoldError, FoldResult},
    scene::graph::{CompletionSignal, SceneGraph, Snapshotter, Transaction},
    transition::latch::{TransitionLatch, TransitionState},
};

/// Called once when a started run ends, with `true` unless the scene abandoned it.
pub type CompletionCallback = Box<dyn FnOnce(bool) + Send>;

/// Parameters of one show or hide run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FoldRequest {
    /// Accordion folds; each fold is two panels.
    pub folds: u32,
    pub duration: Duration,
    pub direction: Direction,
}

impl FoldRequest {
    pub fn new(folds: u32, duration: Duration, direction: Direction) -> Self {
        Self {
            folds,
            duration,
            direction,
        }
    }

    pub fn validate(&self) -> FoldResult<()> {
        if self.folds == 0 {
            return Err(FoldError::validation("fold count must be >= 1"));
        }
        if self.duration.is_zero() {
            return Err(FoldError::validation("transition duration must be > 0"));
        }
        Ok(())
    }
}

/// What a show/hide call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Animations were committed; completion arrives through [`FoldTransition::poll`].
    Started,
    /// The latch was not in the required state; nothing happened.
    Ignored,
}

struct InFlight<V, C> {
    phase: Phase,
    covering: V,
    destination: Rect,
    container: C,
    done: oneshot::Receiver<()>,
    on_complete: Option<CompletionCallback>,
}

/// Drives paper-fold show/hide runs against a scene.
///
/// Runs are cooperative: `show`/`hide` build and commit everything synchronously, and the host
/// calls [`poll`](Self::poll) from its render loop until the scene reports completion.
pub struct FoldTransition<S: SceneGraph> {
    latch: TransitionLatch,
    config: FoldConfig,
    in_flight: Option<InFlight<S::ViewId, S::ContainerId>>,
}

impl<S: SceneGraph> std::fmt::Debug for FoldTransition<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoldTransition")
            .field("latch", &self.latch)
            .field("config", &self.config)
            .field("running", &self.in_flight.is_some())
            .finish()
    }
}

impl<S> FoldTransition<S>
where
    S: SceneGraph + Snapshotter<S::ViewId>,
{
    /// Controller with its own latch.
    pub fn new(config: FoldConfig) -> FoldResult<Self> {
        Self::with_latch(config, TransitionLatch::new())
    }

    /// Controller sharing `latch` with any other controller holding it.
    pub fn with_latch(config: FoldConfig, latch: TransitionLatch) -> FoldResult<Self> {
        config.validate()?;
        Ok(Self {
            latch,
            config,
            in_flight: None,
        })
    }

    pub fn state(&self) -> TransitionState {
        self.latch.state()
    }

    pub fn latch(&self) -> &TransitionLatch {
        &self.latch
    }

    pub fn config(&self) -> &FoldConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Slides `covering` away while `target` unfolds behind it.
    ///
    /// Ignored unless the latch is idle. `target` is mounted beneath `covering` if it has no
    /// superview, and its frame is aligned to the edge being uncovered.
    #[tracing::instrument(skip(self, scene, on_complete))]
    pub fn show(
        &mut self,
        scene: &mut S,
        covering: S::ViewId,
        target: S::ViewId,
        request: FoldRequest,
        on_complete: Option<CompletionCallback>,
    ) -> FoldResult<Outcome> {
        self.run(Phase::Show, scene, covering, target, request, on_complete)
    }

    /// Slides `covering` back while `target` folds up. Ignored unless the latch is shown.
    #[tracing::instrument(skip(self, scene, on_complete))]
    pub fn hide(
        &mut self,
        scene: &mut S,
        covering: S::ViewId,
        target: S::ViewId,
        request: FoldRequest,
        on_complete: Option<CompletionCallback>,
    ) -> FoldResult<Outcome> {
        self.run(Phase::Hide, scene, covering, target, request, on_complete)
    }

    /// Finishes the running transition if the scene has signalled completion.
    ///
    /// Returns whether a run finished during this call. Finishing snaps the covering view to its
    /// destination, removes the fold container, settles the latch, and fires the callback.
    pub fn poll(&mut self, scene: &mut S) -> FoldResult<bool> {
        let Some(mut in_flight) = self.in_flight.take() else {
            return Ok(false);
        };
        let success = match in_flight.done.try_recv() {
            Ok(Some(())) => true,
            Ok(None) => {
                self.in_flight = Some(in_flight);
                return Ok(false);
            }
            Err(oneshot::Canceled) => {
                tracing::warn!(phase = ?in_flight.phase, "completion signal dropped by scene");
                false
            }
        };

        let snapped = scene.set_frame(in_flight.covering, in_flight.destination);
        let removed = scene.remove_fold_container(in_flight.container);
        self.latch.settle(in_flight.phase);
        tracing::debug!(phase = ?in_flight.phase, success, "fold transition finished");
        if let Some(on_complete) = in_flight.on_complete.take() {
            on_complete(success);
        }
        snapped.and(removed)?;
        Ok(true)
    }

    fn run(
        &mut self,
        phase: Phase,
        scene: &mut S,
        covering: S::ViewId,
        target: S::ViewId,
        request: FoldRequest,
        on_complete: Option<CompletionCallback>,
    ) -> FoldResult<Outcome> {
        request.validate()?;
        if !self.latch.try_begin(phase) {
            tracing::warn!(?phase, state = ?self.latch.state(), "fold transition request ignored");
            return Ok(Outcome::Ignored);
        }

        match self.start(phase, scene, covering, target, request) {
            Ok((destination, container, done)) => {
                self.in_flight = Some(InFlight {
                    phase,
                    covering,
                    destination,
                    container,
                    done,
                    on_complete,
                });
                Ok(Outcome::Started)
            }
            Err(err) => {
                self.latch.abort(phase);
                Err(err)
            }
        }
    }

    fn start(
        &self,
        phase: Phase,
        scene: &mut S,
        covering: S::ViewId,
        target: S::ViewId,
        request: FoldRequest,
    ) -> FoldResult<(Rect, S::ContainerId, oneshot::Receiver<()>)> {
        let direction = request.direction;
        let covering_frame = scene.frame(covering)?;
        let target_size = scene.frame(target)?.size();
        let destination = direction.slide_destination(phase, covering_frame, target_size);

        // The scene is only mutated once the snapshot and every track have been built.
        let snapshot = scene.snapshot(target)?;
        let plan = plan_folds(
            target_size,
            request.folds,
            direction,
            phase,
            self.config.shadow_peaks,
        )?;
        let container = build_fold_container(&plan, &snapshot, request.duration, &self.config)?;

        let axis = direction.axis();
        let slide = KeyframeAnimation::from_ease(
            axis.position_property(),
            axis.along(covering_frame.center()),
            axis.along(destination.center()),
            self.config.ease_for(phase),
            self.config.keyframe_steps,
            request.duration,
        )?;

        if phase == Phase::Show {
            if !scene.has_superview(target) {
                scene.insert_below(target, covering)?;
            }
            scene.set_frame(target, direction.reveal_frame(covering_frame, target_size))?;
        }

        let container_id = scene.attach_fold_container(target, container)?;
        let (completion, done) = CompletionSignal::pair();
        let transaction = Transaction {
            duration: request.duration,
            slide_view: covering,
            slide,
            container: container_id,
            completion,
        };
        if let Err(err) = scene.commit(transaction) {
            if let Err(cleanup) = scene.remove_fold_container(container_id) {
                tracing::warn!(%cleanup, "failed to detach fold container after rejected commit");
            }
            return Err(err);
        }

        tracing::debug!(
            ?phase,
            ?direction,
            panels = plan.len(),
            from = ?covering_frame,
            to = ?destination,
            "fold transaction committed"
        );
        Ok((destination, container_id, done))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/controller.rs"]
mod tests;
