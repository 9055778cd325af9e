//=========================================================================
// Asset System
//=========================================================================
//
// Scoped asset ownership.
//
// Architecture:
//   GlobalContext.shared_assets : ResourceScope   (process lifetime)
//     └─ child("scene:<name>")  : ResourceScope   (scene lifetime)
//            ↓ acquire / release
//        Arc<dyn AssetLoader>                     (shared by all scopes)
//
//=========================================================================

//=== Module Declarations =================================================

mod loader;
mod resource_scope;

//=== Public API ==========================================================

pub use loader::{Asset, AssetHandle, AssetLoader, FsAssetLoader, MemoryAssetLoader};
pub use resource_scope::ResourceScope;
