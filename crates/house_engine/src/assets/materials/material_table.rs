//! Material table with lookup-or-create semantics
//!
//! A table owns the materials of one scene object together with one
//! triangle batch per material. Batch `i` always draws with material `i`:
//! [`MaterialTable::get_or_create`] is the only way entries come into
//! existence and it appends both halves of the pair together.

use std::path::{Path, PathBuf};

use crate::assets::TriangleBatch;
use crate::foundation::math::Vec3;
use crate::foundation::Aabb;

/// Phong material as read from a material file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    /// Unique name within the owning table
    pub name: String,
    /// Ambient color (Ka)
    pub ambient: Vec3,
    /// Diffuse color (Kd)
    pub diffuse: Vec3,
    /// Specular color (Ks)
    pub specular: Vec3,
    /// Specular exponent (Ns)
    pub shininess: f32,
    /// Diffuse texture (map_Kd), relative to the assets root
    pub diffuse_map: Option<String>,
}

impl Material {
    /// Zero-initialized material: black, shininess 0, no texture
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Resolve the diffuse map against the assets root
    pub fn diffuse_map_path(&self, assets_dir: &Path) -> Option<PathBuf> {
        self.diffuse_map.as_ref().map(|map| assets_dir.join(map))
    }
}

/// Materials of one object paired index-for-index with their batches
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    materials: Vec<Material>,
    batches: Vec<TriangleBatch>,
}

impl MaterialTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the material called `name`, appending a zero-initialized
    /// material and an empty batch if there is none yet
    pub fn get_or_create(&mut self, name: &str) -> usize {
        if let Some(index) = self.find(name) {
            return index;
        }

        let index = self.materials.len();
        self.materials.push(Material::new(name));
        self.batches.push(TriangleBatch::new(index));
        log::trace!("Created material '{}' at index {}", name, index);
        index
    }

    /// Index of the material called `name`, if present
    pub fn find(&self, name: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.name == name)
    }

    /// Number of materials (and batches)
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// True when no material has been referenced yet
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// All materials in creation order
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// All batches, index-aligned with [`Self::materials`]
    pub fn batches(&self) -> &[TriangleBatch] {
        &self.batches
    }

    /// Material at `index`
    pub fn material(&self, index: usize) -> Option<&Material> {
        self.materials.get(index)
    }

    pub(crate) fn material_mut(&mut self, index: usize) -> Option<&mut Material> {
        self.materials.get_mut(index)
    }

    pub(crate) fn batch_mut(&mut self, index: usize) -> Option<&mut TriangleBatch> {
        self.batches.get_mut(index)
    }

    /// Non-empty batches with their materials, in table order
    pub fn drawables(&self) -> impl Iterator<Item = (&TriangleBatch, &Material)> {
        self.batches
            .iter()
            .zip(&self.materials)
            .filter(|(batch, _)| !batch.is_empty())
    }

    /// Total triangles across all batches
    pub fn triangle_count(&self) -> usize {
        self.batches.iter().map(TriangleBatch::triangle_count).sum()
    }

    /// Recompute every batch's bounds and return their union.
    ///
    /// Empty batches contribute nothing; a table without triangles has no
    /// bounds.
    pub(crate) fn update_bounds(&mut self) -> Option<Aabb> {
        self.batches.iter_mut().fold(None, |aggregate, batch| {
            batch.update_bounds();
            match (aggregate, batch.bounds()) {
                (Some(total), Some(b)) => Some(total.union(&b)),
                (total, b) => total.or(b),
            }
        })
    }
}
