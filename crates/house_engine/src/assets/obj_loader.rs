//! OBJ file loader for 3D models
//!
//! Reads `v`, `vn`, `vt`, `usemtl` and `f` records into the triangle
//! batches of a [`MaterialTable`]. Faces are fan-triangulated and
//! de-indexed: every triangle appends its own three vertices to the batch of
//! the material active when the face was read.
//!
//! Face indices are 1-based. A negative index counts back from the end of
//! the records read so far, so `-1` is the most recent one.

use std::path::Path;

use crate::assets::{
    content_lines, parse_floats, read_text, split_directive, AssetError, IndexKind, MaterialTable,
};
use crate::foundation::math::{Vec2, Vec3};

/// Material used for faces that appear before any `usemtl`
pub const DEFAULT_MATERIAL: &str = "";

/// Counters gathered while reading a geometry file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjStats {
    /// `v` records
    pub positions: usize,
    /// `vn` records
    pub normals: usize,
    /// `vt` records
    pub tex_coords: usize,
    /// Faces triangulated
    pub faces: usize,
    /// Triangles emitted
    pub triangles: usize,
    /// Faces with fewer than three refs (lines and points)
    pub skipped_faces: usize,
}

/// Running record buffers, numbered across the whole file
#[derive(Default)]
struct VertexPool {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
}

/// One `p[/t][/n]` ref as written, before resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FaceRef {
    position: i64,
    tex_coord: Option<i64>,
    normal: Option<i64>,
}

/// A face ref resolved to 0-based buffer indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Corner {
    position: usize,
    tex_coord: Option<usize>,
    normal: Option<usize>,
}

/// OBJ geometry loader
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file into `table`
    pub fn load(path: impl AsRef<Path>, table: &mut MaterialTable) -> Result<ObjStats, AssetError> {
        let path = path.as_ref();
        let contents = read_text(path)?;
        let stats = Self::parse(&contents, table)?;
        log::debug!(
            "Read {}: {} positions, {} faces, {} triangles in {} batches",
            path.display(),
            stats.positions,
            stats.faces,
            stats.triangles,
            table.len()
        );
        Ok(stats)
    }

    /// Parse OBJ contents into `table`, then compute every batch's bounds
    pub fn parse(contents: &str, table: &mut MaterialTable) -> Result<ObjStats, AssetError> {
        let mut pool = VertexPool::default();
        let mut stats = ObjStats::default();
        let mut current: Option<usize> = None;

        for (line_num, line) in content_lines(contents) {
            let (command, args) = split_directive(line);

            match command {
                "usemtl" => {
                    if args.is_empty() {
                        return Err(AssetError::MalformedDirective {
                            line: line_num,
                            directive: command.to_string(),
                            reason: "missing material name".to_string(),
                        });
                    }
                    current = Some(table.get_or_create(args));
                }
                "v" => {
                    // An optional trailing w weight is tolerated
                    let [x, y, z] = parse_floats::<3>(args, line_num, command, false)?;
                    pool.positions.push(Vec3::new(x, y, z));
                }
                "vn" => {
                    let [x, y, z] = parse_floats::<3>(args, line_num, command, true)?;
                    pool.normals.push(Vec3::new(x, y, z));
                }
                "vt" => {
                    // An optional trailing w coordinate is tolerated
                    let [s, t] = parse_floats::<2>(args, line_num, command, false)?;
                    pool.tex_coords.push(Vec2::new(s, t));
                }
                "f" => {
                    let refs = args.split_whitespace().collect::<Vec<_>>();
                    if refs.len() < 3 {
                        // Lines and points are not supported
                        log::warn!("Line {}: skipping face with {} refs", line_num, refs.len());
                        stats.skipped_faces += 1;
                        continue;
                    }

                    let corners = refs
                        .iter()
                        .map(|r| Self::parse_ref(r, line_num).and_then(|f| pool.resolve(f, line_num)))
                        .collect::<Result<Vec<_>, _>>()?;

                    let material = *current.get_or_insert_with(|| table.get_or_create(DEFAULT_MATERIAL));
                    stats.triangles += Self::emit_fan(&corners, &pool, table, material);
                    stats.faces += 1;
                }
                // Ignore other commands
                _ => {}
            }
        }

        stats.positions = pool.positions.len();
        stats.normals = pool.normals.len();
        stats.tex_coords = pool.tex_coords.len();
        table.update_bounds();
        Ok(stats)
    }

    /// Split one face ref into its position, texcoord and normal fields
    fn parse_ref(reference: &str, line_num: usize) -> Result<FaceRef, AssetError> {
        let malformed = |reason: String| AssetError::MalformedDirective {
            line: line_num,
            directive: "f".to_string(),
            reason,
        };
        let field = |text: &str| -> Result<Option<i64>, AssetError> {
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<i64>()
                .map(Some)
                .map_err(|_| malformed(format!("invalid index '{}' in ref '{}'", text, reference)))
        };

        let mut fields = reference.split('/');
        let position = field(fields.next().unwrap_or_default())?;
        let tex_coord = field(fields.next().unwrap_or_default())?;
        let normal = field(fields.next().unwrap_or_default())?;
        if fields.next().is_some() {
            return Err(malformed(format!("too many fields in ref '{}'", reference)));
        }

        let position = position.ok_or_else(|| AssetError::MissingPositionIndex {
            line: line_num,
            reference: reference.to_string(),
        })?;

        Ok(FaceRef {
            position,
            tex_coord,
            normal,
        })
    }

    /// Fan-triangulate around the first corner into the batch of `material`.
    ///
    /// Returns the number of triangles emitted (`corners.len() - 2`).
    fn emit_fan(corners: &[Corner], pool: &VertexPool, table: &mut MaterialTable, material: usize) -> usize {
        let Some(batch) = table.batch_mut(material) else {
            return 0;
        };

        let anchor = corners[0];
        for pair in corners[1..].windows(2) {
            let triangle = [anchor, pair[0], pair[1]];
            let positions = triangle.map(|c| pool.positions[c.position]);
            batch.push_triangle(positions, Self::triangle_normals(&triangle, pool), Self::triangle_tex_coords(&triangle, pool));
        }
        corners.len() - 2
    }

    /// Normals for a triangle if any corner names one.
    ///
    /// A corner without a normal borrows the middle corner's normal, or the
    /// first one present when the middle corner has none either.
    fn triangle_normals(triangle: &[Corner; 3], pool: &VertexPool) -> Option<[Vec3; 3]> {
        let fallback = triangle[1].normal.or_else(|| triangle.iter().find_map(|c| c.normal))?;
        Some(triangle.map(|c| pool.normals[c.normal.unwrap_or(fallback)]))
    }

    /// Texture coordinates for a triangle, only when all three corners name one
    fn triangle_tex_coords(triangle: &[Corner; 3], pool: &VertexPool) -> Option<[Vec2; 3]> {
        let [a, b, c] = triangle.map(|corner| corner.tex_coord);
        Some([pool.tex_coords[a?], pool.tex_coords[b?], pool.tex_coords[c?]])
    }
}

impl VertexPool {
    /// Resolve a ref against the buffers as they stand on this line.
    ///
    /// Texcoord indices are ignored while no `vt` has been read.
    fn resolve(&self, face_ref: FaceRef, line_num: usize) -> Result<Corner, AssetError> {
        let position = Self::resolve_index(face_ref.position, self.positions.len(), IndexKind::Position, line_num)?;
        let tex_coord = match face_ref.tex_coord {
            Some(index) if !self.tex_coords.is_empty() => {
                Some(Self::resolve_index(index, self.tex_coords.len(), IndexKind::TexCoord, line_num)?)
            }
            _ => None,
        };
        let normal = face_ref
            .normal
            .map(|index| Self::resolve_index(index, self.normals.len(), IndexKind::Normal, line_num))
            .transpose()?;

        Ok(Corner {
            position,
            tex_coord,
            normal,
        })
    }

    /// Map a 1-based or negative (end-relative) index to a 0-based one
    fn resolve_index(index: i64, len: usize, kind: IndexKind, line_num: usize) -> Result<usize, AssetError> {
        let out_of_range = || AssetError::IndexOutOfRange {
            line: line_num,
            kind,
            index,
            available: len,
        };

        let one_based = if index < 0 {
            i64::try_from(len).map_err(|_| out_of_range())? + index + 1
        } else {
            index
        };
        let one_based = usize::try_from(one_based).map_err(|_| out_of_range())?;
        if one_based == 0 || one_based > len {
            return Err(out_of_range());
        }
        Ok(one_based - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Result<(MaterialTable, ObjStats), AssetError> {
        let mut table = MaterialTable::new();
        let stats = ObjLoader::parse(contents, &mut table)?;
        Ok((table, stats))
    }

    const QUAD: &str = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n";

    #[test]
    fn test_quad_without_material() {
        let (table, stats) = parse(&format!("{}f 1 2 3 4\n", QUAD)).unwrap();
        assert_eq!(stats.triangles, 2);
        assert_eq!(table.len(), 1);

        let batch = &table.batches()[0];
        assert_eq!(
            batch.positions(),
            &[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ]
        );
        assert!(!batch.has_normals());
        assert!(!batch.has_tex_coords());
    }

    #[test]
    fn test_fan_triangle_count() {
        for n in 3..9 {
            let mut text = String::new();
            for i in 0..n {
                let angle = i as f32;
                text.push_str(&format!("v {} {} 0\n", angle.cos(), angle.sin()));
            }
            let refs = (1..=n).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
            text.push_str(&format!("f {}\n", refs));

            let (table, stats) = parse(&text).unwrap();
            assert_eq!(stats.triangles, n - 2);
            assert_eq!(table.batches()[0].positions().len(), 3 * (n - 2));
        }
    }

    #[test]
    fn test_negative_indices() {
        let mut text = String::new();
        for i in 1..=10 {
            text.push_str(&format!("v {} 0 0\n", i));
        }
        text.push_str("f -1 -2 -10\n");
        let (table, _) = parse(&text).unwrap();
        let positions = table.batches()[0].positions();
        assert_eq!(positions[0].x, 10.0);
        assert_eq!(positions[1].x, 9.0);
        assert_eq!(positions[2].x, 1.0);
    }

    #[test]
    fn test_negative_index_relative_to_current_line() {
        let text = "v 1 0 0\nv 2 0 0\nv 3 0 0\nf -3 -2 -1\nv 4 0 0\nf -3 -2 -1\n";
        let (table, _) = parse(text).unwrap();
        let xs: Vec<f32> = table.batches()[0].positions().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_materials_split_batches() {
        let text = format!("{}usemtl Red\nf 1 2 3\nusemtl Blue\nf 1 3 4\nusemtl Red\nf 2 3 4\n", QUAD);
        let (table, _) = parse(&text).unwrap();
        assert_eq!(table.find("Red"), Some(0));
        assert_eq!(table.find("Blue"), Some(1));
        assert_eq!(table.batches()[0].triangle_count(), 2);
        assert_eq!(table.batches()[1].triangle_count(), 1);
    }

    #[test]
    fn test_full_refs_carry_attributes() {
        let text = format!(
            "{}vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\nvn 0 0 1\nf 1/1/1 2/2/1 3/3/1 4/4/1\n",
            QUAD
        );
        let (table, _) = parse(&text).unwrap();
        let batch = &table.batches()[0];
        assert_eq!(batch.normals().len(), 6);
        assert_eq!(batch.tex_coords().len(), 6);
        assert_eq!(batch.tex_coords()[4], Vec2::new(1.0, 1.0));
        assert!(batch.normals().iter().all(|n| *n == Vec3::z()));
    }

    #[test]
    fn test_position_and_normal_refs() {
        let text = format!("{}vn 0 0 1\nf 1//1 2//1 3//1\n", QUAD);
        let (table, _) = parse(&text).unwrap();
        let batch = &table.batches()[0];
        assert_eq!(batch.normals().len(), 3);
        assert!(!batch.has_tex_coords());
    }

    #[test]
    fn test_missing_normals_fall_back_to_middle_ref() {
        let text = format!("{}vn 1 0 0\nvn 0 1 0\nf 1 2//2 3\n", QUAD);
        let (table, _) = parse(&text).unwrap();
        let normals = table.batches()[0].normals();
        assert_eq!(normals, &[Vec3::y(), Vec3::y(), Vec3::y()]);
    }

    #[test]
    fn test_partial_tex_coords_dropped_for_triangle() {
        let text = format!("{}vt 0 0\nvt 1 0\nf 1/1 2/2 3\n", QUAD);
        let (table, _) = parse(&text).unwrap();
        assert!(!table.batches()[0].has_tex_coords());
    }

    #[test]
    fn test_tex_indices_ignored_without_texcoords() {
        let text = format!("{}f 1/7 2/7 3/7\n", QUAD);
        let (table, _) = parse(&text).unwrap();
        assert!(!table.batches()[0].has_tex_coords());
    }

    #[test]
    fn test_short_faces_skipped() {
        let (table, stats) = parse(&format!("{}f 1 2\nf 3\n", QUAD)).unwrap();
        assert_eq!(stats.skipped_faces, 2);
        assert_eq!(stats.triangles, 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_index_out_of_range() {
        let err = parse(&format!("{}f 1 2 5\n", QUAD)).unwrap_err();
        assert!(matches!(
            err,
            AssetError::IndexOutOfRange { line: 5, kind: IndexKind::Position, index: 5, available: 4 }
        ));

        assert!(matches!(parse(&format!("{}f 0 1 2\n", QUAD)), Err(AssetError::IndexOutOfRange { .. })));
        assert!(matches!(parse(&format!("{}f -5 1 2\n", QUAD)), Err(AssetError::IndexOutOfRange { .. })));
        assert!(matches!(
            parse(&format!("{}f 1//1 2//1 3//1\n", QUAD)),
            Err(AssetError::IndexOutOfRange { kind: IndexKind::Normal, .. })
        ));
    }

    #[test]
    fn test_missing_position_index() {
        let err = parse(&format!("{}vn 0 0 1\nf 1//1 //1 3//1\n", QUAD)).unwrap_err();
        assert!(matches!(err, AssetError::MissingPositionIndex { line: 6, .. }));
    }

    #[test]
    fn test_malformed_records() {
        assert!(matches!(parse("v 1 2\n"), Err(AssetError::MalformedDirective { line: 1, .. })));
        assert!(matches!(parse("vt a b\n"), Err(AssetError::MalformedDirective { .. })));
        assert!(matches!(parse("vn 0 1 0 1\n"), Err(AssetError::MalformedDirective { line: 1, .. })));
        assert!(matches!(parse(&format!("{}f 1 2 x\n", QUAD)), Err(AssetError::MalformedDirective { .. })));
        assert!(matches!(parse("usemtl\n"), Err(AssetError::MalformedDirective { .. })));
    }

    #[test]
    fn test_bounds_computed() {
        let text = "v -1 0 2\nv 3 -4 0\nv 0 5 1\nusemtl A\nf 1 2 3\nusemtl Unused\n";
        let (table, stats) = parse(text).unwrap();
        assert_eq!(stats.positions, 3);
        let bounds = table.batches()[0].bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -4.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(3.0, 5.0, 2.0));
        assert!(table.batches()[1].bounds().is_none());
    }

    #[test]
    fn test_ignores_unsupported_records() {
        let text = format!("# comment\no thing\ng group\ns 1\nmtllib x.mtl\n{}l 1 2\nf 1 2 3\n", QUAD);
        let (_, stats) = parse(&text).unwrap();
        assert_eq!(stats.triangles, 1);
    }
}
