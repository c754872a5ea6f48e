use crate::{
    animation::{ease::Ease, keyframes::DEFAULT_KEYFRAME_STEPS},
    fold::{direction::Phase, plan::ShadowPeaks},
    foundation::core::Rgba8Premul,
    foundation::error::{FoldError, FoldResult},
};

/// Tunables of the fold effect.
///
/// Every field has a default, so a JSON config only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FoldConfig {
    /// Samples per slide keyframe track.
    pub keyframe_steps: usize,
    /// Eye distance for the container's perspective (`m34 = -1 / depth`).
    pub perspective_depth: f64,
    pub shadow_peaks: ShadowPeaks,
    /// Fill behind the panels, visible through the creases.
    pub container_background: Rgba8Premul,
    pub shadow_backdrop: Rgba8Premul,
    /// Opaque gradient stop of the crease shadow.
    pub shadow_color: Rgba8Premul,
    pub show_ease: Ease,
    pub hide_ease: Ease,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            keyframe_steps: DEFAULT_KEYFRAME_STEPS,
            perspective_depth: 800.0,
            shadow_peaks: ShadowPeaks::default(),
            container_background: Rgba8Premul::grey(0.2, 1.0),
            shadow_backdrop: Rgba8Premul::grey(1.0 / 3.0, 1.0),
            shadow_color: Rgba8Premul::black(),
            show_ease: Phase::Show.default_ease(),
            hide_ease: Phase::Hide.default_ease(),
        }
    }
}

impl FoldConfig {
    pub fn from_json_str(s: &str) -> FoldResult<Self> {
        let config: Self = serde_json::from_str(s)
            .map_err(|e| FoldError::validation(format!("invalid fold config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FoldResult<()> {
        if self.keyframe_steps < 2 {
            return Err(FoldError::validation("keyframe_steps must be >= 2"));
        }
        if !self.perspective_depth.is_finite() || self.perspective_depth <= 0.0 {
            return Err(FoldError::validation(
                "perspective_depth must be finite and > 0",
            ));
        }
        for (name, v) in [
            ("shadow_peaks.near", self.shadow_peaks.near),
            ("shadow_peaks.far", self.shadow_peaks.far),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(FoldError::validation(format!("{name} must be in [0, 1]")));
            }
        }
        Ok(())
    }

    pub fn ease_for(&self, phase: Phase) -> Ease {
        match phase {
            Phase::Show => self.show_ease,
            Phase::Hide => self.hide_ease,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
