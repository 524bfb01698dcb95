//! Diffuse texture cache
//!
//! Idempotent get-or-load keyed by resolved path: the first request for a
//! path pays the decode, every later request returns the same handle. A
//! failed load is reported to the caller and nothing is cached for it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use slotmap::{new_key_type, SlotMap};

use crate::assets::{AssetError, ImageData};

new_key_type! {
    /// Stable handle to a cached texture
    pub struct TextureHandle;
}

/// Path-keyed texture store rooted at the assets directory
pub struct TextureCache {
    root: PathBuf,
    textures: SlotMap<TextureHandle, ImageData>,
    by_path: HashMap<PathBuf, TextureHandle>,
}

impl TextureCache {
    /// Create an empty cache resolving paths under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            textures: SlotMap::with_key(),
            by_path: HashMap::new(),
        }
    }

    /// Handle for `relative_path`, decoding the image on first use
    pub fn get_or_load(&mut self, relative_path: impl AsRef<Path>) -> Result<TextureHandle, AssetError> {
        self.get_or_load_with(relative_path, |path| ImageData::from_file(path))
    }

    /// Like [`Self::get_or_load`] with a caller-supplied loader
    pub fn get_or_load_with<F>(&mut self, relative_path: impl AsRef<Path>, load: F) -> Result<TextureHandle, AssetError>
    where
        F: FnOnce(&Path) -> Result<ImageData, AssetError>,
    {
        let path = self.root.join(relative_path);
        if let Some(&handle) = self.by_path.get(&path) {
            return Ok(handle);
        }

        let image = load(&path)?;
        let handle = self.textures.insert(image);
        self.by_path.insert(path, handle);
        Ok(handle)
    }

    /// Handle of an already loaded texture, without loading
    pub fn handle(&self, relative_path: impl AsRef<Path>) -> Option<TextureHandle> {
        self.by_path.get(&self.root.join(relative_path)).copied()
    }

    /// Pixels behind a handle
    pub fn get(&self, handle: TextureHandle) -> Option<&ImageData> {
        self.textures.get(handle)
    }

    /// Number of cached textures
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// True when nothing has been loaded
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
