//=========================================================================
// Reference Scenes
//=========================================================================
//
// Two small scenes that between them touch every lifecycle hook:
//
//   TitleScene ──Enter──> GameplayScene
//        ^                     │
//        └───────Escape────────┘
//
// Both draw text with the shared font (cached once for the process) and
// a sprite from their own scene scope (released on every switch).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

//=== Internal Dependencies ===============================================

use crate::core::assets::MemoryAssetLoader;

//=== Module Declarations =================================================

mod gameplay;
mod title;

//=== Public API ==========================================================

pub use gameplay::GameplayScene;
pub use title::TitleScene;

/// Font shared by both scenes, loaded into the process-wide scope.
pub const FONT_ASSET: &str = "fonts/main.font";

/// In-memory stand-ins for every asset the reference scenes load,
/// registered under `root`.
pub fn bundled_content(root: impl AsRef<Path>) -> MemoryAssetLoader {
    let root = root.as_ref();
    MemoryAssetLoader::new()
        .with_asset(root.join(FONT_ASSET), b"font:main".to_vec())
        .with_asset(root.join(title::LOGO_ASSET), b"image:logo".to_vec())
        .with_asset(root.join(gameplay::PLAYER_ASSET), b"image:player".to_vec())
}

//=========================================================================
// Test Support
//=========================================================================
