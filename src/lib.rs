//=========================================================================
// Proscenium — Library Root
//=========================================================================
//
// Scene lifecycle and transition runtime.
//
// An application is a set of mutually exclusive scenes (title screen,
// gameplay, ...). Exactly one is active at a time; scenes ask for a
// switch and the host applies it at the start of the next frame, giving
// every scene a clean initialize → load → update/draw → unload → dispose
// lifecycle and its own asset scope.
//
// Typical usage:
// ```no_run
// use proscenium::EngineBuilder;
// use proscenium::scenes::TitleScene;
//
// fn main() -> Result<(), proscenium::EngineError> {
//     EngineBuilder::new()
//         .build()?
//         .init(|host, _| host.request_change(TitleScene::new()))
//         .run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the scene contract, host, assets, input and render types.
// `scenes` holds the two reference scenes used by the demo.
//
pub mod core;
pub mod prelude;
pub mod scenes;

//--- Internal Modules ----------------------------------------------------
//
// `platform` is the winit window and input layer; it stays private.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use crate::core::platform_bridge::PlatformError;
pub use engine::{Engine, EngineBuilder, EngineError};
