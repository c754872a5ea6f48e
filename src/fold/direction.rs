use std::f64::consts::{FRAC_PI_2, PI};

use crate::{
    animation::{ease::Ease, keyframes::AnimatedProperty},
    foundation::core::{Point, Rect, Size},
    foundation::error::{FoldError, FoldResult},
};

/// Edge the covering view slides away from (show) or back to (hide).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Right,
    Left,
    Top,
    Bottom,
}

/// Axis the accordion folds along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldAxis {
    /// Panels are vertical strips; joints rotate about Y.
    Horizontal,
    /// Panels are horizontal strips; joints rotate about X.
    Vertical,
}

impl FoldAxis {
    pub fn extent(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Component of a point along the fold axis.
    pub fn along(self, p: Point) -> f64 {
        match self {
            Self::Horizontal => p.x,
            Self::Vertical => p.y,
        }
    }

    pub fn rotation_property(self) -> AnimatedProperty {
        match self {
            Self::Horizontal => AnimatedProperty::RotationY,
            Self::Vertical => AnimatedProperty::RotationX,
        }
    }

    pub fn position_property(self) -> AnimatedProperty {
        match self {
            Self::Horizontal => AnimatedProperty::PositionX,
            Self::Vertical => AnimatedProperty::PositionY,
        }
    }
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Right, Self::Left, Self::Top, Self::Bottom];

    pub fn parse(s: &str) -> FoldResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "right" | "r" => Ok(Self::Right),
            "left" | "l" => Ok(Self::Left),
            "top" | "t" | "up" => Ok(Self::Top),
            "bottom" | "b" | "down" => Ok(Self::Bottom),
            other => Err(FoldError::validation(format!(
                "unknown fold direction '{other}'"
            ))),
        }
    }

    pub fn axis(self) -> FoldAxis {
        match self {
            Self::Right | Self::Left => FoldAxis::Horizontal,
            Self::Top | Self::Bottom => FoldAxis::Vertical,
        }
    }

    /// Fractional hinge point shared by every joint of a run.
    pub fn anchor(self) -> Point {
        match self {
            Self::Right => Point::new(1.0, 0.5),
            Self::Left => Point::new(0.0, 0.5),
            Self::Top => Point::new(0.5, 0.0),
            Self::Bottom => Point::new(0.5, 1.0),
        }
    }

    /// Panels are enumerated from the far end of the axis (Right, Bottom) rather than its origin.
    pub fn enumerates_from_end(self) -> bool {
        matches!(self, Self::Right | Self::Bottom)
    }

    /// Fully folded angle of panel `b`.
    ///
    /// The first panel turns a quarter so it lies flat against the hinge edge; every later panel
    /// turns a half, alternating sign so neighbours crease in opposite directions.
    pub fn folded_angle(self, b: usize) -> f64 {
        let sign = match self {
            Self::Right | Self::Top => -1.0,
            Self::Left | Self::Bottom => 1.0,
        };
        if b == 0 {
            sign * FRAC_PI_2
        } else if b % 2 != 0 {
            -sign * PI
        } else {
            sign * PI
        }
    }

    /// Where the covering view ends up once `phase` completes.
    ///
    /// Show moves it away from the revealed edge by the target's extent; hide moves it back.
    pub fn slide_destination(self, phase: Phase, covering: Rect, target: Size) -> Rect {
        let sign = match phase {
            Phase::Show => 1.0,
            Phase::Hide => -1.0,
        };
        let (dx, dy) = match self {
            Self::Right => (-target.width, 0.0),
            Self::Left => (target.width, 0.0),
            Self::Top => (0.0, target.height),
            Self::Bottom => (0.0, -target.height),
        };
        covering.with_origin(Point::new(
            covering.x0 + sign * dx,
            covering.y0 + sign * dy,
        ))
    }

    /// Frame for the revealed view, aligned to the edge of the covering view it is uncovered from.
    pub fn reveal_frame(self, covering: Rect, target: Size) -> Rect {
        let origin = match self {
            Self::Right => Point::new(covering.x1 - target.width, covering.y0),
            Self::Left | Self::Top => covering.origin(),
            Self::Bottom => Point::new(covering.x0, covering.y1 - target.height),
        };
        Rect::from_origin_size(origin, target)
    }
}

/// Which half of the show/hide cycle a run performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Unfold the panels flat while the covering view slides away.
    Show,
    /// Fold the panels up while the covering view slides back.
    Hide,
}

impl Phase {
    pub fn parse(s: &str) -> FoldResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "show" | "open" | "unfold" => Ok(Self::Show),
            "hide" | "close" | "fold" => Ok(Self::Hide),
            other => Err(FoldError::validation(format!("unknown phase '{other}'"))),
        }
    }

    /// `(start, end)` rotation for a panel whose folded angle is `folded`.
    pub fn angles(self, folded: f64) -> (f64, f64) {
        match self {
            Self::Show => (folded, 0.0),
            Self::Hide => (0.0, folded),
        }
    }

    pub fn default_ease(self) -> Ease {
        match self {
            Self::Show => Ease::FoldOpen,
            Self::Hide => Ease::FoldClose,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fold/direction.rs"]
mod tests;
