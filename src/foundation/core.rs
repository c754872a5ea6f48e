pub use kurbo::{Point, Rect, Size, Vec2};

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn black() -> Self {
        Self::from_straight_rgba(0, 0, 0, 255)
    }

    /// Grey level and alpha in `[0, 1]`, the way UIKit's `white:alpha:` colours are expressed.
    pub fn grey(white: f64, alpha: f64) -> Self {
        fn unit_to_u8(v: f64) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        let w = unit_to_u8(white);
        Self::from_straight_rgba(w, w, w, unit_to_u8(alpha))
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }
}

/// Top-left corner, in the parent's coordinate space, of a node with `bounds` and fractional
/// `anchor` placed at `position`.
pub fn frame_origin(position: Point, anchor: Point, bounds: Size) -> Point {
    Point::new(
        position.x - anchor.x * bounds.width,
        position.y - anchor.y * bounds.height,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
