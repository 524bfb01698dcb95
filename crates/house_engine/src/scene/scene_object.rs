//! Scene objects: one loaded mesh with its materials, bounds and placement

use std::path::Path;

use super::placement::Placement;
use crate::assets::{AssetError, Material, MaterialTable, MtlParser, ObjLoader, TriangleBatch};
use crate::foundation::math::{Mat4, Vec3};
use crate::foundation::Aabb;

/// A fully loaded object ready to be placed and drawn.
///
/// Instances only exist after both the geometry and the material file
/// parsed successfully; a failed load never yields a partial object.
#[derive(Debug, Clone)]
pub struct SceneObject {
    name: String,
    table: MaterialTable,
    bounds: Option<Aabb>,
    placement: Placement,
}

impl SceneObject {
    /// Load a geometry file and its material file from `assets_dir`.
    ///
    /// Geometry is read first so batches exist for every material it uses;
    /// the material file then fills in the colors by name.
    pub fn load(
        name: impl Into<String>,
        assets_dir: impl AsRef<Path>,
        geometry: impl AsRef<Path>,
        material: impl AsRef<Path>,
    ) -> Result<Self, AssetError> {
        let name = name.into();
        let (table, bounds) = Self::load_table(assets_dir.as_ref(), geometry.as_ref(), material.as_ref())?;
        log::info!(
            "Loaded object '{}': {} triangles, {} materials",
            name,
            table.triangle_count(),
            table.len()
        );

        Ok(Self {
            name,
            table,
            bounds,
            placement: Placement::default(),
        })
    }

    /// Build an object from in-memory geometry and material text
    pub fn from_sources(name: impl Into<String>, geometry: &str, material: &str) -> Result<Self, AssetError> {
        let mut table = MaterialTable::new();
        ObjLoader::parse(geometry, &mut table)?;
        MtlParser::parse(material, &mut table)?;
        let bounds = Self::aggregate_bounds(&table);

        Ok(Self {
            name: name.into(),
            table,
            bounds,
            placement: Placement::default(),
        })
    }

    /// Replace geometry and materials from new files, keeping the placement.
    ///
    /// On error the object is left exactly as it was.
    pub fn reload(
        &mut self,
        assets_dir: impl AsRef<Path>,
        geometry: impl AsRef<Path>,
        material: impl AsRef<Path>,
    ) -> Result<(), AssetError> {
        let (table, bounds) = Self::load_table(assets_dir.as_ref(), geometry.as_ref(), material.as_ref())?;
        self.table = table;
        self.bounds = bounds;
        log::info!("Reloaded object '{}' from {}", self.name, material.as_ref().display());
        Ok(())
    }

    fn load_table(
        assets_dir: &Path,
        geometry: &Path,
        material: &Path,
    ) -> Result<(MaterialTable, Option<Aabb>), AssetError> {
        let mut table = MaterialTable::new();
        ObjLoader::load(assets_dir.join(geometry), &mut table)?;
        MtlParser::load(assets_dir.join(material), &mut table)?;
        let bounds = Self::aggregate_bounds(&table);
        Ok((table, bounds))
    }

    fn aggregate_bounds(table: &MaterialTable) -> Option<Aabb> {
        table
            .batches()
            .iter()
            .filter_map(TriangleBatch::bounds)
            .reduce(|total, b| total.union(&b))
    }

    /// Object name, as given in the scene description
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Materials and batches
    pub fn table(&self) -> &MaterialTable {
        &self.table
    }

    /// All batches; batch `i` uses material `i`
    pub fn batches(&self) -> &[TriangleBatch] {
        self.table.batches()
    }

    /// All materials
    pub fn materials(&self) -> &[Material] {
        self.table.materials()
    }

    /// Non-empty batches paired with their materials
    pub fn drawables(&self) -> impl Iterator<Item = (&TriangleBatch, &Material)> {
        self.table.drawables()
    }

    /// Union of the batch bounds in object space, `None` without triangles
    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    /// Current placement fields
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Replace all placement fields at once
    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    /// Fit the object into the world box spanned by two corners
    pub fn world_bounding_box(&mut self, x0: f32, y0: f32, z0: f32, x1: f32, y1: f32, z1: f32) {
        self.placement
            .set_world_bounding_box(Vec3::new(x0, y0, z0), Vec3::new(x1, y1, z1));
    }

    /// Place the object's center at a world position
    pub fn world_location(&mut self, x: f32, y: f32, z: f32) {
        self.placement.set_world_location(Vec3::new(x, y, z));
    }

    /// Scale the object to a world size per axis
    pub fn scale_object(&mut self, sx: f32, sy: f32, sz: f32) {
        self.placement.set_scale(Vec3::new(sx, sy, sz));
    }

    /// Set Euler angles in radians
    pub fn set_euler(&mut self, x: f32, y: f32, z: f32) {
        self.placement.set_euler(Vec3::new(x, y, z));
    }

    /// Set a rotation of `angle` radians around `(x, y, z)`
    pub fn set_rotation(&mut self, angle: f32, x: f32, y: f32, z: f32) {
        self.placement.set_rotation(angle, Vec3::new(x, y, z));
    }

    fn local_bounds(&self) -> Aabb {
        self.bounds.unwrap_or_else(|| Aabb::new(Vec3::zeros(), Vec3::zeros()))
    }

    /// Object-to-world transform
    pub fn world_transform(&self) -> Mat4 {
        self.placement.world_matrix(&self.local_bounds())
    }

    /// Normal transform (rotation only)
    pub fn normal_transform(&self) -> Mat4 {
        self.placement.normal_matrix()
    }

    /// Volume the object blocks in the collision map.
    ///
    /// With both an explicit position and size this is the unrotated box
    /// `position ± size / 2`, which is how the scene files size furniture.
    /// Otherwise the placed bounds are transformed into world space.
    /// Objects without triangles block nothing.
    pub fn obstacle_box(&self) -> Option<Aabb> {
        let bounds = self.bounds?;
        match (self.placement.position, self.placement.size) {
            (Some(position), Some(size)) => Some(Aabb::from_center_size(position, size)),
            _ => Some(bounds.transformed(&self.world_transform())),
        }
    }
}
