//! Axis-aligned bounding boxes
//!
//! One box type serves as mesh bounds, object bounds, obstacle volumes and
//! the camera avatar volume.

use serde::{Deserialize, Serialize};

use super::math::{Mat4, Point3, Vec3};

/// Axis-aligned bounding box given by its minimum and maximum corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from its corners as given
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a box from two opposite corners in any order
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Create a box centered on `center` with full extents `size`
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing every point, or `None` for no points
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Vec3>,
    {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(Self::new(first, first), |mut acc, p| {
            acc.min = acc.min.inf(p);
            acc.max = acc.max.sup(p);
            acc
        }))
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Size along each axis (`max - min`)
    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    /// Inclusive point containment
    pub fn contains_point(&self, p: &Vec3) -> bool {
        (0..3).all(|axis| self.min[axis] <= p[axis] && p[axis] <= self.max[axis])
    }

    /// Overlap test with exclusive bounds on every axis.
    ///
    /// Boxes that only share a face, edge or corner do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        (0..3).all(|axis| {
            Self::overlap_1d(self.min[axis], self.max[axis], other.min[axis], other.max[axis])
        })
    }

    fn overlap_1d(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> bool {
        a_min < b_max && b_min < a_max
    }

    /// The eight corners
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Box enclosing this box after an affine transform
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let corners = self
            .corners()
            .map(|c| matrix.transform_point(&Point3::from(c)).coords);
        // Eight corners, never empty
        Self::from_points(corners.iter()).unwrap_or(*self)
    }
}
