//=========================================================================
// Resource Scope
//=========================================================================
//
// Scoped asset acquisition with guaranteed, exactly-once release.
//
// Architecture:
//   acquire(name) ─┬─ cache hit  → Arc clone of the cached handle
//                  └─ cache miss → AssetLoader::load → cache → handle
//
//   release() / Drop → AssetLoader::unload for every cached handle, once
//
// One scope lives for the whole process (shared assets such as fonts);
// every mounted scene gets its own child scope for scene-local assets.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::loader::{AssetHandle, AssetLoader};
use crate::core::error::AssetError;

//=== ResourceScope =======================================================

/// Owner of a set of acquired assets.
///
/// Repeated requests for the same logical name return the same handle.
/// After [`release`](Self::release) every acquisition fails with
/// [`AssetError::ScopeReleased`]. Dropping the scope releases it.
pub struct ResourceScope {
    label: String,
    root: PathBuf,
    loader: Arc<dyn AssetLoader>,
    cache: HashMap<String, AssetHandle>,
    released: bool,
}

impl ResourceScope {
    //--- Construction -----------------------------------------------------

    /// Creates an empty scope resolving names under `root`.
    pub fn new(
        label: impl Into<String>,
        root: impl Into<PathBuf>,
        loader: Arc<dyn AssetLoader>,
    ) -> Self {
        Self {
            label: label.into(),
            root: root.into(),
            loader,
            cache: HashMap::new(),
            released: false,
        }
    }

    /// Creates a new, empty scope sharing this scope's loader and root.
    ///
    /// The child owns its own cache; nothing is shared with the parent
    /// except the means to load.
    pub fn child(&self, label: impl Into<String>) -> Self {
        Self::new(label, self.root.clone(), Arc::clone(&self.loader))
    }

    //--- Acquisition ------------------------------------------------------

    /// Returns the asset registered under `name`, loading it on first use.
    ///
    /// # Errors
    ///
    /// - [`AssetError::ScopeReleased`] once the scope has been released
    /// - whatever the loader reports for missing or malformed assets
    pub fn acquire(&mut self, name: &str) -> Result<AssetHandle, AssetError> {
        if self.released {
            return Err(AssetError::ScopeReleased {
                scope: self.label.clone(),
                name: name.to_owned(),
            });
        }

        if let Some(handle) = self.cache.get(name) {
            trace!(target: "assets", "[{}] cache hit for '{}'", self.label, name);
            return Ok(Arc::clone(handle));
        }

        let handle = Arc::new(self.loader.load(&self.root, name)?);
        debug!(
            target: "assets",
            "[{}] loaded '{}' ({} bytes)",
            self.label,
            name,
            handle.len()
        );

        self.cache.insert(name.to_owned(), Arc::clone(&handle));
        Ok(handle)
    }

    //--- Release ----------------------------------------------------------

    /// Unloads every acquired asset. Calling it again does nothing.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        let count = self.cache.len();
        for (_, handle) in self.cache.drain() {
            self.loader.unload(&handle);
        }

        debug!(target: "assets", "[{}] released {} asset(s)", self.label, count);
    }

    //--- Queries ----------------------------------------------------------

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `name` has already been resolved in this scope.
    pub fn contains(&self, name: &str) -> bool {
        self.cache.contains_key(name)
    }

    /// Number of distinct assets currently held.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Drop for ResourceScope {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ResourceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.cache.keys().collect();
        names.sort();

        f.debug_struct("ResourceScope")
            .field("label", &self.label)
            .field("root", &self.root)
            .field("released", &self.released)
            .field("assets", &names)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::MemoryAssetLoader;

    //--- Test Helpers -----------------------------------------------------

    fn loader() -> Arc<MemoryAssetLoader> {
        MemoryAssetLoader::new()
            .with_asset("content/fonts/main.font", b"font".to_vec())
            .with_asset("content/logo.png", b"logo".to_vec())
            .into_shared()
    }

    fn scope(loader: &Arc<MemoryAssetLoader>) -> ResourceScope {
        ResourceScope::new("test", "content", loader.clone())
    }

    //--- Acquisition ------------------------------------------------------

    #[test]
    fn repeated_acquire_returns_identical_instance() {
        let loader = loader();
        let mut scope = scope(&loader);

        let first = scope.acquire("logo.png").unwrap();
        let second = scope.acquire("logo.png").unwrap();

        assert!(Arc::ptr_eq(&first, &second), "cache must hand out the same handle");
        assert_eq!(loader.load_count(), 1, "second acquire must not reload");
        assert!(scope.contains("logo.png"));
    }

    #[test]
    fn missing_asset_error_surfaces_and_is_not_cached() {
        let loader = loader();
        let mut scope = scope(&loader);

        assert!(matches!(
            scope.acquire("missing.png"),
            Err(AssetError::NotFound { .. })
        ));
        assert!(scope.is_empty());
    }

    #[test]
    fn acquire_after_release_fails() {
        let loader = loader();
        let mut scope = scope(&loader);
        scope.acquire("logo.png").unwrap();

        scope.release();

        assert!(matches!(
            scope.acquire("logo.png"),
            Err(AssetError::ScopeReleased { .. })
        ));
        assert_eq!(loader.load_count(), 1, "released scope must not re-acquire");
    }

    //--- Release ----------------------------------------------------------

    #[test]
    fn release_unloads_each_asset_once() {
        let loader = loader();
        let mut scope = scope(&loader);
        scope.acquire("logo.png").unwrap();
        scope.acquire("fonts/main.font").unwrap();
        scope.acquire("logo.png").unwrap();

        scope.release();
        scope.release();

        assert_eq!(loader.unload_count(), 2);
        assert!(scope.is_released());
        assert!(scope.is_empty());
    }

    #[test]
    fn drop_releases_exactly_once() {
        let loader = loader();
        {
            let mut scope = scope(&loader);
            scope.acquire("logo.png").unwrap();
            scope.release();
        }
        assert_eq!(loader.unload_count(), 1, "drop after release must be a no-op");

        {
            let mut scope = scope(&loader);
            scope.acquire("logo.png").unwrap();
        }
        assert_eq!(loader.unload_count(), 2, "drop must release a live scope");
    }

    //--- Child Scopes -----------------------------------------------------

    #[test]
    fn child_scope_has_independent_cache() {
        let loader = loader();
        let mut parent = scope(&loader);
        let shared = parent.acquire("fonts/main.font").unwrap();

        let mut child = parent.child("scene:Title");
        let local = child.acquire("fonts/main.font").unwrap();

        assert!(!Arc::ptr_eq(&shared, &local));
        assert_eq!(child.root(), Path::new("content"));
        assert_eq!(child.label(), "scene:Title");

        drop(child);
        assert_eq!(loader.unload_count(), 1, "child release leaves parent intact");
        assert!(parent.contains("fonts/main.font"));
    }
}
