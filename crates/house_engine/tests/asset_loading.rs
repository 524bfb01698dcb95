//! Integration tests for loading geometry, materials and obstacles from disk

use std::path::PathBuf;

use approx::assert_relative_eq;
use house_engine::assets::{
    load_obstacle_file, AssetError, IndexKind, MaterialTable, MtlParser, ObjLoader, TextureCache,
};
use house_engine::foundation::math::{Vec2, Vec3};
use house_engine::scene::SceneObject;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn demo_assets() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets")
}

#[test]
fn test_cube_geometry_then_materials() {
    let mut table = MaterialTable::new();
    let stats = ObjLoader::load(fixtures().join("cube.obj"), &mut table).unwrap();
    assert_eq!(stats.faces, 6);
    assert_eq!(stats.triangles, 12);
    assert_eq!(table.len(), 1);

    MtlParser::load(fixtures().join("cube.mtl"), &mut table).unwrap();
    let body = table.material(0).unwrap();
    assert_eq!(body.name, "Body");
    assert_eq!(body.diffuse, Vec3::new(0.5, 0.3, 0.1));
    assert_eq!(body.shininess, 32.0);

    let batch = &table.batches()[0];
    assert_eq!(batch.positions().len(), 36);
    assert_eq!(batch.normals().len(), 36);
    assert_eq!(batch.tex_coords().len(), 36);
    // First face is 1/1/1 4/4/1 3/3/1 2/2/1
    assert_eq!(batch.positions()[..3], [Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.0)]);
    assert_eq!(batch.tex_coords()[1], Vec2::new(0.0, 1.0));
    assert!(batch.normals()[..6].iter().all(|n| *n == Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn test_scene_object_load_and_bounds() {
    let object = SceneObject::load("crate", fixtures(), "cube.obj", "cube.mtl").unwrap();
    let bounds = object.bounds().unwrap();
    assert_eq!(bounds.min, Vec3::zeros());
    assert_eq!(bounds.max, Vec3::repeat(1.0));
    for batch in object.batches() {
        assert!(batch.positions().iter().all(|p| bounds.contains_point(p)));
    }
    assert_eq!(object.drawables().count(), 1);
}

#[test]
fn test_bad_index_reports_line() {
    let mut table = MaterialTable::new();
    let err = ObjLoader::load(fixtures().join("broken.obj"), &mut table).unwrap_err();
    match err {
        AssetError::IndexOutOfRange {
            line,
            kind,
            index,
            available,
        } => {
            assert_eq!(line, 6);
            assert_eq!(kind, IndexKind::Position);
            assert_eq!(index, 7);
            assert_eq!(available, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_files_are_not_found() {
    let result = SceneObject::load("ghost", fixtures(), "nowhere.obj", "cube.mtl");
    assert!(matches!(result, Err(AssetError::AssetNotFound(path)) if path.ends_with("nowhere.obj")));

    let result = SceneObject::load("ghost", fixtures(), "cube.obj", "nowhere.mtl");
    assert!(matches!(result, Err(AssetError::AssetNotFound(path)) if path.ends_with("nowhere.mtl")));
}

#[test]
fn test_latin1_bytes_do_not_fail_load() {
    let mut table = MaterialTable::new();
    let stats = ObjLoader::load(fixtures().join("latin1.obj"), &mut table).unwrap();
    assert_eq!(stats.triangles, 1);

    MtlParser::load(fixtures().join("latin1.mtl"), &mut table).unwrap();
    // The undecodable byte maps the same way in both files
    assert_eq!(table.len(), 1);
    let material = table.material(0).unwrap();
    assert_eq!(material.name, "Mat\u{fffd}riau");
    assert_eq!(material.diffuse, Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn test_obstacle_fixture() {
    let boxes = load_obstacle_file(fixtures().join("obstacles.txt")).unwrap();
    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[0].min, Vec3::new(0.0, 0.0, -100.0));
    assert_eq!(boxes[0].max, Vec3::new(4000.0, 2500.0, 0.0));
    assert_eq!(boxes[1].min, Vec3::new(0.0, 0.0, -4000.0));
    assert_eq!(boxes[1].max, Vec3::new(4000.0, 2500.0, -3900.0));
}

#[test]
fn test_negative_indices_in_house_shell() {
    let object = SceneObject::load("house", demo_assets(), "house.obj", "house.mtl").unwrap();
    let wall = object.table().find("Wall").unwrap();
    let batch = &object.batches()[wall];
    // Four outer walls plus two interior quads
    assert_eq!(batch.triangle_count(), 12);
    let interior = &batch.positions()[24..27];
    assert_eq!(interior[0], Vec3::new(6000.0, 0.0, -5000.0));
    assert_eq!(interior[1], Vec3::new(6240.0, 0.0, -5000.0));
    assert_eq!(interior[2], Vec3::new(6240.0, 2500.0, -5000.0));
}

#[test]
fn test_demo_texture_decodes_once() {
    let mut cache = TextureCache::new(demo_assets());
    let first = cache.get_or_load("wood.png").unwrap();
    let again = cache.get_or_load("wood.png").unwrap();
    assert_eq!(first, again);

    let image = cache.get(first).unwrap();
    assert_eq!((image.width, image.height), (2, 2));
    assert_eq!(image.data.len(), 16);
    assert_relative_eq!(f32::from(image.data[0]), 139.0);
}
