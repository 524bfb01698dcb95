//! Asset loading
//!
//! Text parsers for the geometry (`.obj`) and material (`.mtl`) formats, the
//! static obstacle file, and the diffuse texture cache. Every parser returns a
//! typed [`AssetError`] instead of aborting; callers decide whether a failure
//! ends the whole scene or only one object.

pub mod batch;
pub mod image_loader;
pub mod materials;
pub mod obj_loader;
pub mod obstacle_file;
pub mod texture_cache;

pub use batch::TriangleBatch;
pub use image_loader::ImageData;
pub use materials::{Material, MaterialTable, MtlParser};
pub use obj_loader::{ObjLoader, ObjStats};
pub use obstacle_file::{load_obstacle_file, parse_obstacles};
pub use texture_cache::{TextureCache, TextureHandle};

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which running buffer a face index refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// `v` records
    Position,
    /// `vt` records
    TexCoord,
    /// `vn` records
    Normal,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Position => "position",
            Self::TexCoord => "texture coordinate",
            Self::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// Asset loading errors
///
/// Line numbers are 1-based.
#[derive(Error, Debug)]
pub enum AssetError {
    /// File does not exist
    #[error("Asset not found: {}", .0.display())]
    AssetNotFound(PathBuf),

    /// A recognized directive with the wrong number or type of arguments
    #[error("Line {line}: malformed '{directive}' directive: {reason}")]
    MalformedDirective {
        /// Line number
        line: usize,
        /// Directive keyword
        directive: String,
        /// What was wrong
        reason: String,
    },

    /// Material property given with no active material
    #[error("Line {line}: '{directive}' appears before any newmtl")]
    DirectiveBeforeMaterial {
        /// Line number
        line: usize,
        /// Directive keyword
        directive: String,
    },

    /// Face ref without its mandatory position field
    #[error("Line {line}: face ref '{reference}' has no position index")]
    MissingPositionIndex {
        /// Line number
        line: usize,
        /// The ref as written
        reference: String,
    },

    /// Face index outside the records seen so far
    #[error("Line {line}: {kind} index {index} out of range ({available} available)")]
    IndexOutOfRange {
        /// Line number
        line: usize,
        /// Buffer the index refers to
        kind: IndexKind,
        /// Index as written in the file
        index: i64,
        /// Buffer length when the face was read
        available: usize,
    },

    /// Read failure other than a missing file
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Texture decode failure
    #[error("Failed to load image {}: {reason}", path.display())]
    ImageLoad {
        /// Image file
        path: PathBuf,
        /// Decoder message
        reason: String,
    },
}

/// Read a whole text asset, mapping a missing file to [`AssetError::AssetNotFound`].
///
/// Bytes that are not valid UTF-8 (Latin-1 comments and names from some
/// exporters) become U+FFFD, the same way in every file.
pub fn read_text(path: &Path) -> Result<String, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            AssetError::AssetNotFound(path.to_path_buf())
        } else {
            AssetError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Lines of a text asset with their 1-based numbers.
///
/// Leading and trailing whitespace and control characters are removed and
/// blank lines are dropped.
pub(crate) fn content_lines(contents: &str) -> impl Iterator<Item = (usize, &str)> {
    contents.lines().enumerate().filter_map(|(index, raw)| {
        let line = raw.trim_matches(|c: char| c.is_whitespace() || c.is_control());
        (!line.is_empty()).then_some((index + 1, line))
    })
}

/// Split a directive line into its keyword and the rest of the line
pub(crate) fn split_directive(line: &str) -> (&str, &str) {
    match line.split_once(|c: char| c.is_whitespace()) {
        Some((keyword, rest)) => (keyword, rest.trim_start()),
        None => (line, ""),
    }
}

/// Parse the first `N` whitespace-separated floats of `args`.
///
/// With `exact` set, any further token is an error as well.
pub(crate) fn parse_floats<const N: usize>(
    args: &str,
    line: usize,
    directive: &str,
    exact: bool,
) -> Result<[f32; N], AssetError> {
    let malformed = |reason: String| AssetError::MalformedDirective {
        line,
        directive: directive.to_string(),
        reason,
    };

    let mut tokens = args.split_whitespace();
    let mut values = [0.0; N];
    for (i, value) in values.iter_mut().enumerate() {
        let token = tokens
            .next()
            .ok_or_else(|| malformed(format!("expected {} values, found {}", N, i)))?;
        *value = token
            .parse::<f32>()
            .map_err(|_| malformed(format!("invalid number '{}'", token)))?;
    }
    if exact {
        if let Some(extra) = tokens.next() {
            return Err(malformed(format!("unexpected extra value '{}'", extra)));
        }
    }
    Ok(values)
}
