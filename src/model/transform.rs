//! Affine object transforms

use super::core::Point3;

/// Number of persisted transform values (3x3 linear part plus translation)
pub const AFFINE_VALUE_COUNT: usize = 12;

/// A 4x4 transform matrix, row-major, row-vector convention
///
/// A point is transformed as `[x y z 1] * M`, so the translation lives in the
/// fourth row and the fourth column is `(0, 0, 0, 1)` for every affine matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    /// Matrix entries, `m[row][column]`
    pub m: [[f64; 4]; 4],
}

impl Matrix4 {
    /// The identity transform
    pub const IDENTITY: Matrix4 = Matrix4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Build an affine matrix from its 12 persisted values
    ///
    /// Values `0..3`, `3..6` and `6..9` become the first three rows of the
    /// linear part; `9..12` become the translation row.
    pub fn from_affine(values: &[f64; AFFINE_VALUE_COUNT]) -> Self {
        Self {
            m: [
                [values[0], values[1], values[2], 0.0],
                [values[3], values[4], values[5], 0.0],
                [values[6], values[7], values[8], 0.0],
                [values[9], values[10], values[11], 1.0],
            ],
        }
    }

    /// The 12 affine values in the same order [`Matrix4::from_affine`] reads them
    ///
    /// The fourth column is not part of the output.
    pub fn affine_values(&self) -> [f64; AFFINE_VALUE_COUNT] {
        let m = &self.m;
        [
            m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2],
            m[3][0], m[3][1], m[3][2],
        ]
    }

    /// Whether this is exactly the identity matrix
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Apply the affine part of the transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        let m = &self.m;
        Point3::new(
            point.x * m[0][0] + point.y * m[1][0] + point.z * m[2][0] + m[3][0],
            point.x * m[0][1] + point.y * m[1][1] + point.z * m[2][1] + m[3][1],
            point.x * m[0][2] + point.y * m[1][2] + point.z * m[2][2] + m[3][2],
        )
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}
