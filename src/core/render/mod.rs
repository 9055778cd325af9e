//=========================================================================
// Render Surface
//=========================================================================
//
// The draw-side contract between scenes and the rendering backend.
//
// Architecture:
//   Scene::draw(&self, &mut DrawSurface)   records DrawCommands
//          ↓
//   RenderBackend::present(&DrawSurface)   consumes them
//
// Scenes never own or create the surface; the frame loop does, and it
// resets the surface at the start of each draw pass.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::assets::Asset;

//=== Color ===============================================================

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const CORNFLOWER_BLUE: Self = Self::rgb(100, 149, 237);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

//=== DrawCommand =========================================================

/// A single recorded draw operation.
///
/// Assets are referenced by logical name; the backend resolves them
/// against its own GPU-side cache.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Sprite {
        texture: String,
        position: (f32, f32),
        tint: Color,
    },
    Text {
        font: String,
        text: String,
        position: (f32, f32),
        color: Color,
    },
}

//=== DrawSurface =========================================================

/// Per-frame command list with a fixed size in pixels.
#[derive(Debug, Clone)]
pub struct DrawSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl DrawSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::with_capacity(64),
        }
    }

    /// Drops last frame's commands, keeping the allocation.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    //--- Recording --------------------------------------------------------

    pub fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    pub fn sprite(&mut self, texture: &Asset, position: (f32, f32), tint: Color) {
        self.commands.push(DrawCommand::Sprite {
            texture: texture.name().to_owned(),
            position,
            tint,
        });
    }

    pub fn text(&mut self, font: &Asset, text: impl Into<String>, position: (f32, f32), color: Color) {
        self.commands.push(DrawCommand::Text {
            font: font.name().to_owned(),
            text: text.into(),
            position,
            color,
        });
    }

    //--- Queries ----------------------------------------------------------

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

//=== RenderBackend =======================================================

/// Presents a finished surface.
///
/// Runs on the frame thread, after the active scene has drawn.
pub trait RenderBackend: Send {
    fn present(&mut self, surface: &DrawSurface);
}

//=== LogBackend ==========================================================

/// Backend that only traces what would have been presented.
///
/// Default for headless runs and the bundled demo.
#[derive(Debug, Default)]
pub struct LogBackend {
    frames: u64,
}

impl LogBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }
}

impl RenderBackend for LogBackend {
    fn present(&mut self, surface: &DrawSurface) {
        self.frames += 1;
        trace!(
            target: "render",
            "frame {}: {} command(s) on {:?}",
            self.frames,
            surface.commands().len(),
            surface.size()
        );
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
