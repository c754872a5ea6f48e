use std::time::Duration;

use crate::{
    animation::ease::Ease,
    foundation::error::{FoldError, FoldResult},
};

/// Default number of samples used to discretize an easing curve.
pub const DEFAULT_KEYFRAME_STEPS: usize = 100;

/// Scene property an animation drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AnimatedProperty {
    /// Horizontal centre of a view (`position.x`).
    PositionX,
    /// Vertical centre of a view (`position.y`).
    PositionY,
    /// Rotation about the X axis, in radians (`transform.rotation.x`).
    RotationX,
    /// Rotation about the Y axis, in radians (`transform.rotation.y`).
    RotationY,
    Opacity,
}

/// Discretizes `ease` into `steps` values between `from` and `to`.
///
/// Samples are evenly spaced in time: `value[i] = from + ease(i / (steps - 1)) * (to - from)`.
/// The first sample is exactly `from` and the last exactly `to`.
pub fn sample_keyframes(from: f64, to: f64, ease: Ease, steps: usize) -> FoldResult<Vec<f64>> {
    if steps < 2 {
        return Err(FoldError::animation(format!(
            "keyframe sampling needs at least 2 steps, got {steps}"
        )));
    }
    if !from.is_finite() || !to.is_finite() {
        return Err(FoldError::animation("keyframe bounds must be finite"));
    }

    let last = steps - 1;
    let values = (0..steps)
        .map(|i| {
            if i == last {
                return to;
            }
            let t = i as f64 / last as f64;
            from + ease.apply(t) * (to - from)
        })
        .collect();
    Ok(values)
}

/// A two-value animation interpolated linearly over `duration`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BasicAnimation {
    pub property: AnimatedProperty,
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    /// Keep `to` applied after completion instead of reverting to the model value.
    pub hold_final: bool,
}

impl BasicAnimation {
    pub fn new(property: AnimatedProperty, from: f64, to: f64, duration: Duration) -> Self {
        Self {
            property,
            from,
            to,
            duration,
            hold_final: true,
        }
    }

    /// Presentation value after `elapsed`.
    ///
    /// Once finished the animation reports `to` when held; otherwise it has been removed and the
    /// caller's model value (modelled here as `from`) shows through.
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        if elapsed >= self.duration {
            return if self.hold_final { self.to } else { self.from };
        }
        let t = progress(elapsed, self.duration);
        self.from + (self.to - self.from) * t
    }
}

/// A keyframe track with equal time deltas between consecutive values.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframeAnimation {
    pub property: AnimatedProperty,
    pub values: Vec<f64>, // evenly spaced over duration
    pub duration: Duration,
    pub hold_final: bool,
}

impl KeyframeAnimation {
    /// Builds a track from an easing curve via [`sample_keyframes`].
    pub fn from_ease(
        property: AnimatedProperty,
        from: f64,
        to: f64,
        ease: Ease,
        steps: usize,
        duration: Duration,
    ) -> FoldResult<Self> {
        Ok(Self {
            property,
            values: sample_keyframes(from, to, ease, steps)?,
            duration,
            hold_final: true,
        })
    }

    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Presentation value after `elapsed`, interpolating linearly between neighbouring keys.
    pub fn value_at(&self, elapsed: Duration) -> FoldResult<f64> {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return Err(FoldError::animation("keyframe track has no values"));
        };
        if elapsed >= self.duration {
            return Ok(if self.hold_final { last } else { first });
        }
        if self.values.len() == 1 {
            return Ok(first);
        }

        let segments = (self.values.len() - 1) as f64;
        let pos = progress(elapsed, self.duration) * segments;
        let idx = (pos.floor() as usize).min(self.values.len() - 2);
        let local = pos - idx as f64;
        let a = self.values[idx];
        let b = self.values[idx + 1];
        Ok(a + (b - a) * local)
    }
}

fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
