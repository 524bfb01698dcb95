//! MTL (Material Template Library) file parser
//!
//! Reads the subset of Wavefront `.mtl` the viewer shades with:
//!
//! | Directive        | Effect                                  |
//! |------------------|-----------------------------------------|
//! | `newmtl <name>`  | select (or create) the current material |
//! | `Ka r g b`       | ambient color                           |
//! | `Kd r g b`       | diffuse color                           |
//! | `Ks r g b`       | specular color                          |
//! | `Ns s`           | shininess                               |
//! | `map_Kd <path>`  | diffuse texture, rest of line verbatim  |
//!
//! Anything else is ignored so newer exporters keep loading.

use std::path::Path;

use super::MaterialTable;
use crate::assets::{content_lines, parse_floats, read_text, split_directive, AssetError};
use crate::foundation::math::Vec3;

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Load a material file into `table`
    pub fn load(path: impl AsRef<Path>, table: &mut MaterialTable) -> Result<(), AssetError> {
        let path = path.as_ref();
        let contents = read_text(path)?;
        Self::parse(&contents, table)?;
        log::debug!("Read {} ({} materials in table)", path.display(), table.len());
        Ok(())
    }

    /// Parse MTL contents into `table`.
    ///
    /// Materials are looked up by name, so a table already populated by the
    /// geometry file keeps its indices and only gains the colors.
    pub fn parse(contents: &str, table: &mut MaterialTable) -> Result<(), AssetError> {
        let mut current: Option<usize> = None;

        for (line_num, line) in content_lines(contents) {
            let (command, args) = split_directive(line);

            if command == "newmtl" {
                if args.is_empty() {
                    return Err(AssetError::MalformedDirective {
                        line: line_num,
                        directive: command.to_string(),
                        reason: "missing material name".to_string(),
                    });
                }
                current = Some(table.get_or_create(args));
                continue;
            }

            if !matches!(command, "Ka" | "Kd" | "Ks" | "Ns" | "map_Kd") {
                // Ignore unknown commands silently
                continue;
            }

            let material = current
                .and_then(|index| table.material_mut(index))
                .ok_or_else(|| AssetError::DirectiveBeforeMaterial {
                    line: line_num,
                    directive: command.to_string(),
                })?;

            match command {
                "Ka" => material.ambient = Self::parse_color(args, line_num, command)?,
                "Kd" => material.diffuse = Self::parse_color(args, line_num, command)?,
                "Ks" => material.specular = Self::parse_color(args, line_num, command)?,
                "Ns" => {
                    let [shininess] = parse_floats::<1>(args, line_num, command, true)?;
                    material.shininess = shininess;
                }
                "map_Kd" => {
                    // Texture paths can contain spaces, take the rest of the line
                    if args.is_empty() {
                        return Err(AssetError::MalformedDirective {
                            line: line_num,
                            directive: command.to_string(),
                            reason: "missing texture path".to_string(),
                        });
                    }
                    material.diffuse_map = Some(args.to_string());
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn parse_color(args: &str, line_num: usize, command: &str) -> Result<Vec3, AssetError> {
        let [r, g, b] = parse_floats::<3>(args, line_num, command, true)?;
        Ok(Vec3::new(r, g, b))
    }
}
