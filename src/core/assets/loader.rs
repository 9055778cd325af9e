//=========================================================================
// Asset Loader
//=========================================================================
//
// The narrow seam to whatever actually produces asset bytes.
//
// Architecture:
//   ResourceScope ──acquire(name)──> AssetLoader::load(root, name) → Asset
//   ResourceScope ──release()──────> AssetLoader::unload(&Asset)
//
// Two loaders ship with the crate: `FsAssetLoader` reads files under the
// content root, `MemoryAssetLoader` serves a fixed table and counts calls.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::error::AssetError;

//=== Asset ===============================================================

/// A resolved binary asset.
///
/// Scenes hold assets through [`AssetHandle`]; identity of the handle is
/// what the scope cache guarantees.
pub struct Asset {
    name: String,
    bytes: Vec<u8>,
}

/// Shared handle to a resolved asset.
pub type AssetHandle = Arc<Asset>;

impl Asset {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Logical name the asset was requested under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Asset")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

//=== AssetLoader Trait ===================================================

/// Resolves logical asset names to loaded assets.
///
/// Loaders are shared by every scope in the process, so they must be
/// `Send + Sync`. Caching is the scope's job, not the loader's.
pub trait AssetLoader: Send + Sync {
    /// Loads `name` relative to `root`.
    fn load(&self, root: &Path, name: &str) -> Result<Asset, AssetError>;

    /// Called exactly once per asset when its owning scope is released.
    fn unload(&self, _asset: &Asset) {}
}

/// Rejects payloads no loader should hand out.
fn validate(name: &str, bytes: Vec<u8>) -> Result<Asset, AssetError> {
    if bytes.is_empty() {
        return Err(AssetError::Invalid {
            name: name.to_owned(),
            reason: "asset has no content".to_owned(),
        });
    }
    Ok(Asset::new(name, bytes))
}

//=== FsAssetLoader =======================================================

/// Reads assets from the filesystem beneath the scope root.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsAssetLoader;

impl AssetLoader for FsAssetLoader {
    fn load(&self, root: &Path, name: &str) -> Result<Asset, AssetError> {
        let path = root.join(name);
        trace!(target: "assets", "Reading {}", path.display());

        match std::fs::read(&path) {
            Ok(bytes) => validate(name, bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AssetError::NotFound {
                name: name.to_owned(),
                root: root.to_path_buf(),
            }),
            Err(source) => Err(AssetError::Io {
                name: name.to_owned(),
                source,
            }),
        }
    }
}

//=== MemoryAssetLoader ===================================================

/// In-memory loader keyed by `root/name`.
///
/// Tracks how many loads and unloads it served, which makes it the loader
/// of choice for tests and for the bundled demo.
#[derive(Default)]
pub struct MemoryAssetLoader {
    entries: HashMap<PathBuf, Vec<u8>>,
    loads: AtomicUsize,
    unloads: AtomicUsize,
}

impl MemoryAssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an asset at `path` (root included, e.g. `content/logo.png`).
    pub fn with_asset(mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(path.into(), bytes.into());
    }

    /// Number of successful loads served so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Number of unloads received so far.
    pub fn unload_count(&self) -> usize {
        self.unloads.load(Ordering::SeqCst)
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl AssetLoader for MemoryAssetLoader {
    fn load(&self, root: &Path, name: &str) -> Result<Asset, AssetError> {
        let Some(bytes) = self.entries.get(&root.join(name)) else {
            return Err(AssetError::NotFound {
                name: name.to_owned(),
                root: root.to_path_buf(),
            });
        };

        let asset = validate(name, bytes.clone())?;
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(asset)
    }

    fn unload(&self, _asset: &Asset) {
        self.unloads.fetch_add(1, Ordering::SeqCst);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_loader_resolves_relative_to_root() {
        let loader = MemoryAssetLoader::new().with_asset("content/logo.png", b"png".to_vec());

        let asset = loader.load(Path::new("content"), "logo.png").unwrap();

        assert_eq!(asset.name(), "logo.png");
        assert_eq!(asset.bytes(), b"png");
        assert_eq!(loader.load_count(), 1);
    }

    #[test]
    fn memory_loader_reports_missing_asset() {
        let loader = MemoryAssetLoader::new();

        let err = loader.load(Path::new("content"), "missing.png").unwrap_err();

        assert!(matches!(err, AssetError::NotFound { ref name, .. } if name == "missing.png"));
        assert_eq!(loader.load_count(), 0);
    }

    #[test]
    fn empty_payload_is_invalid() {
        let loader = MemoryAssetLoader::new().with_asset("content/blank", Vec::new());

        let err = loader.load(Path::new("content"), "blank").unwrap_err();

        assert!(matches!(err, AssetError::Invalid { .. }));
    }

    #[test]
    fn unload_is_counted() {
        let loader = MemoryAssetLoader::new();
        loader.unload(&Asset::new("x", vec![1]));
        assert_eq!(loader.unload_count(), 1);
    }

    #[test]
    fn fs_loader_maps_missing_file_to_not_found() {
        let root = std::env::temp_dir().join("proscenium-fs-loader-missing");

        let err = FsAssetLoader.load(&root, "nope.bin").unwrap_err();

        assert!(matches!(err, AssetError::NotFound { .. }));
    }

    #[test]
    fn fs_loader_reads_existing_file() {
        let root = std::env::temp_dir().join(format!("proscenium-fs-loader-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("hello.txt"), b"hello").unwrap();

        let asset = FsAssetLoader.load(&root, "hello.txt").unwrap();

        assert_eq!(asset.bytes(), b"hello");
        std::fs::remove_dir_all(&root).unwrap();
    }
}
