//! Geometry value types shared by the ELU and ANI decoders.

use glam::{Mat4, Vec3};
use serde::Serialize;

use super::cursor::ByteCursor;
use crate::error::Result;

/// 4x4 matrix in the file's row-major, row-vector layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Matrix4(pub [f32; 16]);

impl Matrix4 {
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);

    pub(crate) fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self(cursor.read_f32s::<16>()?))
    }

    /// The matrix as four rows.
    #[must_use]
    pub fn rows(&self) -> [[f32; 4]; 4] {
        let m = &self.0;
        [
            [m[0], m[1], m[2], m[3]],
            [m[4], m[5], m[6], m[7]],
            [m[8], m[9], m[10], m[11]],
            [m[12], m[13], m[14], m[15]],
        ]
    }

    /// Translation part (fourth row).
    #[must_use]
    pub fn translation(&self) -> [f32; 3] {
        [self.0[12], self.0[13], self.0[14]]
    }

    /// Convert to a glam matrix.
    ///
    /// Rows of a row-vector matrix are the columns of the equivalent
    /// column-vector matrix, so the array is loaded as columns unchanged.
    #[must_use]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_cols_array(&self.0)
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    pub(crate) fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let min = cursor.read_f32s::<3>()?;
        let max = cursor.read_f32s::<3>()?;
        Ok(Self { min, max })
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[[f32; 3]]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let start = Vec3::from_array(*first);
        let (min, max) = rest.iter().fold((start, start), |(min, max), p| {
            let p = Vec3::from_array(*p);
            (min.min(p), max.max(p))
        });
        Some(Self {
            min: min.to_array(),
            max: max.to_array(),
        })
    }

    #[must_use]
    pub fn size(&self) -> [f32; 3] {
        (Vec3::from_array(self.max) - Vec3::from_array(self.min)).to_array()
    }

    #[must_use]
    pub fn contains(&self, point: [f32; 3]) -> bool {
        let p = Vec3::from_array(point);
        p.cmpge(Vec3::from_array(self.min)).all() && p.cmple(Vec3::from_array(self.max)).all()
    }
}
