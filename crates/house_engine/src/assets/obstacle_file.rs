//! Static obstacle file
//!
//! One box per line as six whitespace-separated numbers in the authoring
//! tool's order:
//!
//! ```text
//! minX  maxZ  minY  maxX  minZ  maxY
//! ```
//!
//! Both Z values are negated before use. The authoring tool measured depth
//! along +Z while the house is modeled along -Z; existing data files depend
//! on this layout, so it is kept as is.

use std::path::Path;

use crate::assets::{content_lines, read_text, AssetError};
use crate::foundation::math::Vec3;
use crate::foundation::Aabb;

/// Load every obstacle box from a file
pub fn load_obstacle_file(path: impl AsRef<Path>) -> Result<Vec<Aabb>, AssetError> {
    let path = path.as_ref();
    let boxes = parse_obstacles(&read_text(path)?);
    log::info!("Loaded {} static obstacles from {}", boxes.len(), path.display());
    Ok(boxes)
}

/// Parse obstacle records, skipping lines that do not hold six numbers
pub fn parse_obstacles(contents: &str) -> Vec<Aabb> {
    content_lines(contents)
        .filter_map(|(line_num, line)| {
            let record = parse_record(line);
            if record.is_none() {
                log::warn!("Obstacle line {}: expected six numbers, skipping '{}'", line_num, line);
            }
            record
        })
        .collect()
}

fn parse_record(line: &str) -> Option<Aabb> {
    let values = line
        .split_whitespace()
        .map(|token| token.parse::<f32>().ok())
        .collect::<Option<Vec<_>>>()?;
    let [min_x, max_z, min_y, max_x, min_z, max_y] = <[f32; 6]>::try_from(values).ok()?;

    Some(Aabb::new(
        Vec3::new(min_x, min_y, -min_z),
        Vec3::new(max_x, max_y, -max_z),
    ))
}
