//=========================================================================
// Title & Gameplay Demo
//=========================================================================
//
// Opens a window with the title scene. Enter starts gameplay (arrows or
// WASD to move), Escape goes back to the title, Escape on the title quits.
//
// Assets come from memory unless a content directory is passed:
//   cargo run --example title_and_gameplay -- path/to/content
//
// Set RUST_LOG=scene=debug to follow the transitions.
//
//=========================================================================

use std::sync::Arc;

use proscenium::core::assets::{AssetLoader, FsAssetLoader};
use proscenium::scenes::{bundled_content, TitleScene};
use proscenium::{EngineBuilder, EngineError};

fn main() -> Result<(), EngineError> {
    env_logger::init();

    let content_dir = std::env::args().nth(1);
    let loader: Arc<dyn AssetLoader> = match content_dir {
        Some(_) => Arc::new(FsAssetLoader),
        None => Arc::new(bundled_content("content")),
    };
    let root = content_dir.unwrap_or_else(|| "content".to_owned());
    log::info!("Loading content from '{}'", root);

    EngineBuilder::new()
        .with_window_title("Proscenium - Title & Gameplay")
        .with_window_size(800, 600)
        .with_content_root(root)
        .with_loader(loader)
        .build()?
        .init(|host, _globals| host.request_change(TitleScene::new()))
        .run()
}
