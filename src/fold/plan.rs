use crate::{
    fold::direction::{Direction, FoldAxis, Phase},
    foundation::core::{Point, Rect, Size},
    foundation::error::{FoldError, FoldResult},
};

/// Peak shadow opacities for the two crease orientations.
///
/// These are tuned by eye and are configuration, not derived values.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShadowPeaks {
    /// Peak for panels whose crease faces the viewer at rest.
    pub near: f64,
    /// Peak for panels whose crease faces away from the viewer at rest.
    pub far: f64,
}

impl Default for ShadowPeaks {
    fn default() -> Self {
        Self {
            near: 0.24,
            far: 0.32,
        }
    }
}

/// Directional gradient laid over one panel.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShadowSpec {
    /// Unit-space point where the opaque stop sits.
    pub start: Point,
    /// Unit-space point where the transparent stop sits.
    pub end: Point,
    pub peak_opacity: f64,
}

/// One accordion panel.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanelSpec {
    /// Region of the source image this panel shows, in image coordinates.
    pub rect: Rect,
    /// Fractional hinge point of the panel's joint.
    pub anchor: Point,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Slot of the panel along the fold axis, counted from the image origin.
    pub axis_index: usize,
    pub shadow: ShadowSpec,
}

/// Ordered panels for one transition run, first panel hinging on the revealed edge.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FoldPlan {
    pub bounds: Size,
    pub direction: Direction,
    pub phase: Phase,
    pub panels: Vec<PanelSpec>,
}

impl FoldPlan {
    pub fn axis(&self) -> FoldAxis {
        self.direction.axis()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Sum of panel extents along the fold axis.
    pub fn covered_extent(&self) -> f64 {
        let axis = self.axis();
        self.panels
            .iter()
            .map(|p| axis.extent(p.rect.size()))
            .sum()
    }
}

/// Splits `bounds` into `2 * folds` hinged panels for `direction`.
#[tracing::instrument(skip(peaks))]
pub fn plan_folds(
    bounds: Size,
    folds: u32,
    direction: Direction,
    phase: Phase,
    peaks: ShadowPeaks,
) -> FoldResult<FoldPlan> {
    if folds == 0 {
        return Err(FoldError::validation("fold count must be >= 1"));
    }
    if !(bounds.width.is_finite() && bounds.height.is_finite())
        || bounds.width < 0.0
        || bounds.height < 0.0
    {
        return Err(FoldError::validation(format!(
            "fold bounds must be finite and non-negative, got {}x{}",
            bounds.width, bounds.height
        )));
    }

    let axis = direction.axis();
    let anchor = direction.anchor();
    let count = folds as usize * 2;
    let extent = axis.extent(bounds);
    // Edges are computed from the slot index instead of accumulated so the slots tile exactly.
    let edge = |k: usize| {
        if k == count {
            extent
        } else {
            extent * k as f64 / count as f64
        }
    };

    let panels = (0..count)
        .map(|b| {
            let slot = if direction.enumerates_from_end() {
                count - 1 - b
            } else {
                b
            };
            let (lo, hi) = (edge(slot), edge(slot + 1));
            let rect = match axis {
                FoldAxis::Horizontal => Rect::new(lo, 0.0, hi, bounds.height),
                FoldAxis::Vertical => Rect::new(0.0, lo, bounds.width, hi),
            };
            let (start_angle, end_angle) = phase.angles(direction.folded_angle(b));
            PanelSpec {
                rect,
                anchor,
                start_angle,
                end_angle,
                axis_index: slot,
                shadow: shadow_for(axis, anchor, slot, peaks),
            }
        })
        .collect();

    Ok(FoldPlan {
        bounds,
        direction,
        phase,
        panels,
    })
}

fn shadow_for(axis: FoldAxis, anchor: Point, slot: usize, peaks: ShadowPeaks) -> ShadowSpec {
    let odd = slot % 2 != 0;
    let (axis_start, axis_end) = match axis {
        FoldAxis::Horizontal => (Point::new(0.0, 0.5), Point::new(1.0, 0.5)),
        FoldAxis::Vertical => (Point::new(0.5, 0.0), Point::new(0.5, 1.0)),
    };
    // Keyed on the horizontal anchor for both axes; vertical folds (anchor.x = 0.5) always take
    // the hinge-away assignment, which is how the peaks were tuned.
    let hinge_at_origin = anchor.x == 0.0;
    let (start, end) = if odd {
        (axis_start, axis_end)
    } else {
        (axis_end, axis_start)
    };
    let peak_opacity = if odd == hinge_at_origin {
        peaks.far
    } else {
        peaks.near
    };
    ShadowSpec {
        start,
        end,
        peak_opacity,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fold/plan.rs"]
mod tests;
