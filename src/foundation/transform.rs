//! Minimal column-major 4×4 transform.
//!
//! Covers what the fold chain needs: translation, single-axis rotation, the perspective term
//! applied by the fold container, composition, and point projection. Layout and conventions match
//! Core Animation's `CATransform3D` so hosts can hand the matrices to a native compositor as-is.

use std::ops::Mul;

const PERSPECTIVE_EPSILON: f64 = 1e-9;

/// A column-major 4×4 transform stored as `[[f64; 4]; 4]`.
///
/// Each inner array is one *column* of the matrix.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform3d {
    /// Four columns, each a 4-element array `[x, y, z, w]`.
    pub cols: [[f64; 4]; 4],
}

impl Transform3d {
    /// The 4×4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a pure translation transform.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Rotation around the X axis (radians), as `CATransform3DMakeRotation(a, 1, 0, 0)`.
    #[must_use]
    pub fn from_rotation_x(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, s, 0.0],
                [0.0, -s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation around the Y axis (radians), as `CATransform3DMakeRotation(a, 0, 1, 0)`.
    #[must_use]
    pub fn from_rotation_y(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            cols: [
                [c, 0.0, -s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Identity with the `m34` perspective term set to `-1 / depth`.
    ///
    /// Larger depths flatten the effect; `depth` must be positive.
    #[must_use]
    pub fn perspective(depth: f64) -> Self {
        let mut t = Self::IDENTITY;
        t.cols[2][3] = -1.0 / depth;
        t
    }

    /// Returns column `i` (0-based).
    ///
    /// # Panics
    ///
    /// Panics if `i >= 4`.
    #[inline]
    #[must_use]
    pub const fn col(self, i: usize) -> [f64; 4] {
        self.cols[i]
    }

    /// Applies the transform to a homogeneous point `(x, y, z, 1)`.
    #[must_use]
    pub fn transform_point(&self, x: f64, y: f64, z: f64) -> [f64; 4] {
        let v = [x, y, z, 1.0];
        let mut out = [0.0_f64; 4];
        for (r, slot) in out.iter_mut().enumerate() {
            *slot = self.cols[0][r] * v[0]
                + self.cols[1][r] * v[1]
                + self.cols[2][r] * v[2]
                + self.cols[3][r] * v[3];
        }
        out
    }

    /// Projects a point, applying the perspective divide when `w` is usable.
    #[must_use]
    pub fn project_point(&self, x: f64, y: f64, z: f64) -> [f64; 3] {
        let [tx, ty, tz, tw] = self.transform_point(x, y, z);
        if tw.abs() < PERSPECTIVE_EPSILON {
            [tx, ty, tz]
        } else {
            [tx / tw, ty / tw, tz / tw]
        }
    }

    /// Is every entry finite?
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.cols.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for Transform3d {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform3d {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f64; 4]; 4];
        for (j, col) in out.iter_mut().enumerate() {
            for (i, slot) in col.iter_mut().enumerate() {
                *slot =
                    a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2] + a[3][i] * b[j][3];
            }
        }
        Self { cols: out }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/transform.rs"]
mod tests;
