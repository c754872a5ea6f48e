use std::f64::consts::FRAC_PI_2;

/// Easing curves mapping normalized time to normalized progress.
///
/// `FoldOpen` and `FoldClose` are the two curves the fold transition is tuned for: the reveal
/// starts fast and settles (`sin`), the conceal starts slow and accelerates (`1 - cos`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    FoldOpen,
    FoldClose,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            // Pinned at the end so float error in sin/cos never leaves a residue at t = 1.
            Self::FoldOpen if t >= 1.0 => 1.0,
            Self::FoldOpen => (t * FRAC_PI_2).sin(),
            Self::FoldClose if t >= 1.0 => 1.0,
            Self::FoldClose => 1.0 - (t * FRAC_PI_2).cos(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
