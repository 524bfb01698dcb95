//! Triangle batches: the geometry drawn with one material

use crate::foundation::math::{Vec2, Vec3};
use crate::foundation::Aabb;

/// Normal used to pad vertices of triangles that carry no normals
pub const DEFAULT_NORMAL: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Texture coordinate used to pad vertices of triangles that carry none
pub const DEFAULT_TEX_COORD: Vec2 = Vec2::new(0.0, 0.0);

/// Non-indexed triangle list bound to one material.
///
/// `positions` holds three entries per triangle. `normals` and `tex_coords`
/// are each either empty or exactly as long as `positions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleBatch {
    material_index: usize,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
    bounds: Option<Aabb>,
}

impl TriangleBatch {
    /// Create an empty batch for the material at `material_index`
    pub fn new(material_index: usize) -> Self {
        Self {
            material_index,
            ..Self::default()
        }
    }

    /// Index of this batch's material in the owning table
    pub fn material_index(&self) -> usize {
        self.material_index
    }

    /// Vertex positions, three per triangle
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-vertex normals, empty when the source had none
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Per-vertex texture coordinates, empty when the source had none
    pub fn tex_coords(&self) -> &[Vec2] {
        &self.tex_coords
    }

    /// Whether per-vertex normals are present
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Whether per-vertex texture coordinates are present
    pub fn has_tex_coords(&self) -> bool {
        !self.tex_coords.is_empty()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// True when the batch holds no triangles
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Bounds over `positions`, `None` for an empty batch or before the
    /// owning file finished loading
    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    /// Append one triangle.
    ///
    /// Attribute presence may differ between triangles of one batch; the
    /// first triangle that brings an attribute backfills the earlier
    /// vertices with a default, and later triangles without it are padded
    /// the same way, so the parallel arrays stay index-aligned.
    pub(crate) fn push_triangle(
        &mut self,
        positions: [Vec3; 3],
        normals: Option<[Vec3; 3]>,
        tex_coords: Option<[Vec2; 3]>,
    ) {
        let existing = self.positions.len();
        self.positions.extend_from_slice(&positions);
        Self::push_attribute(&mut self.normals, existing, normals, DEFAULT_NORMAL);
        Self::push_attribute(&mut self.tex_coords, existing, tex_coords, DEFAULT_TEX_COORD);
    }

    fn push_attribute<T: Copy>(values: &mut Vec<T>, existing: usize, triangle: Option<[T; 3]>, default: T) {
        match triangle {
            Some(triangle) => {
                if values.len() < existing {
                    values.resize(existing, default);
                }
                values.extend_from_slice(&triangle);
            }
            None if !values.is_empty() => values.extend_from_slice(&[default; 3]),
            None => {}
        }
    }

    /// Recompute `bounds` with a single scan over the positions
    pub(crate) fn update_bounds(&mut self) {
        self.bounds = Aabb::from_points(&self.positions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(z: f32) -> [Vec3; 3] {
        [Vec3::new(0.0, 0.0, z), Vec3::new(1.0, 0.0, z), Vec3::new(0.0, 1.0, z)]
    }

    #[test]
    fn test_attributes_absent() {
        let mut batch = TriangleBatch::new(2);
        batch.push_triangle(tri(0.0), None, None);
        batch.push_triangle(tri(1.0), None, None);
        assert_eq!(batch.material_index(), 2);
        assert_eq!(batch.triangle_count(), 2);
        assert!(!batch.has_normals());
        assert!(!batch.has_tex_coords());
    }

    #[test]
    fn test_late_normals_backfill() {
        let mut batch = TriangleBatch::new(0);
        batch.push_triangle(tri(0.0), None, None);
        batch.push_triangle(tri(1.0), Some([Vec3::z(); 3]), None);
        assert_eq!(batch.normals().len(), batch.positions().len());
        assert_eq!(batch.normals()[0], DEFAULT_NORMAL);
        assert_eq!(batch.normals()[3], Vec3::z());
    }

    #[test]
    fn test_missing_tex_coords_padded() {
        let mut batch = TriangleBatch::new(0);
        batch.push_triangle(tri(0.0), None, Some([Vec2::new(0.5, 0.5); 3]));
        batch.push_triangle(tri(1.0), None, None);
        assert_eq!(batch.tex_coords().len(), 6);
        assert_eq!(batch.tex_coords()[5], DEFAULT_TEX_COORD);
    }

    #[test]
    fn test_bounds_after_update() {
        let mut batch = TriangleBatch::new(0);
        assert!(batch.bounds().is_none());
        batch.push_triangle(tri(-1.0), None, None);
        batch.push_triangle(tri(3.0), None, None);
        batch.update_bounds();
        let bounds = batch.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 1.0, 3.0));
        assert!(batch.positions().iter().all(|p| bounds.contains_point(p)));
    }
}
