//=========================================================================
// Title Scene
//=========================================================================
//
// Logo plus a blinking "press Enter" prompt. Enter requests gameplay;
// the cancel key quits (exit-on-cancel is switched on here).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::debug;

//=== Internal Dependencies ===============================================

use super::{GameplayScene, FONT_ASSET};
use crate::core::assets::AssetHandle;
use crate::core::error::SceneError;
use crate::core::input::KeyCode;
use crate::core::render::{Color, DrawSurface};
use crate::core::scene::{Scene, SceneContext};

//=== Constants ===========================================================

pub(crate) const LOGO_ASSET: &str = "images/logo.png";

const PROMPT: &str = "Press Enter to start";
const BLINK_INTERVAL: Duration = Duration::from_millis(500);

//=== TitleScene ==========================================================

#[derive(Debug)]
pub struct TitleScene {
    font: Option<AssetHandle>,
    logo: Option<AssetHandle>,
    logo_position: (f32, f32),
    prompt_position: (f32, f32),
    blink_timer: Duration,
    prompt_visible: bool,
}

impl TitleScene {
    pub fn new() -> Self {
        Self {
            font: None,
            logo: None,
            logo_position: (0.0, 0.0),
            prompt_position: (0.0, 0.0),
            blink_timer: Duration::ZERO,
            prompt_visible: true,
        }
    }

    pub fn prompt_visible(&self) -> bool {
        self.prompt_visible
    }
}

impl Default for TitleScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for TitleScene {
    fn initialize(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), SceneError> {
        ctx.toggles.exit_on_cancel = true;

        let (width, height) = ctx.viewport;
        let center_x = width as f32 / 2.0;
        self.logo_position = (center_x, height as f32 / 3.0);
        self.prompt_position = (center_x, height as f32 * 2.0 / 3.0);

        self.load_content(ctx)
    }

    fn load_content(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), SceneError> {
        self.font = Some(ctx.shared_assets.acquire(FONT_ASSET)?);
        self.logo = Some(ctx.assets.acquire(LOGO_ASSET)?);
        debug!(target: "scene", "Title content loaded");
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>, elapsed: Duration) {
        self.blink_timer += elapsed;
        while self.blink_timer >= BLINK_INTERVAL {
            self.blink_timer -= BLINK_INTERVAL;
            self.prompt_visible = !self.prompt_visible;
        }

        if ctx.input.is_key_pressed(KeyCode::Enter) && !ctx.has_pending_transition() {
            ctx.request_change(GameplayScene::new());
        }
    }

    fn draw(&self, surface: &mut DrawSurface, _elapsed: Duration) {
        surface.clear(Color::CORNFLOWER_BLUE);

        if let Some(logo) = &self.logo {
            surface.sprite(logo, self.logo_position, Color::WHITE);
        }

        if let (true, Some(font)) = (self.prompt_visible, &self.font) {
            surface.text(font, PROMPT, self.prompt_position, Color::WHITE);
        }
    }

    fn unload_content(&mut self, _ctx: &mut SceneContext<'_>) {
        self.font = None;
        self.logo = None;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::{MemoryAssetLoader, ResourceScope};
    use crate::core::globals::GlobalContext;
    use crate::core::render::{DrawCommand, LogBackend};
    use crate::core::scene::HostState;
    use crate::core::{FrameLoop, TickControl};
    use crate::scenes::testing::{frame_loop, press, STEP};

    #[test]
    fn initialize_enables_exit_and_lays_out() {
        let (mut fl, loader) = frame_loop();
        fl.globals_mut().toggles.exit_on_cancel = false;
        fl.host_mut().request_change(TitleScene::new());

        fl.tick(&[], Duration::from_millis(16)).unwrap();

        assert!(fl.globals().toggles.exit_on_cancel);
        assert_eq!(fl.host().active_name(), Some("TitleScene"));
        assert_eq!(
            fl.surface().commands(),
            &[
                DrawCommand::Clear(Color::CORNFLOWER_BLUE),
                DrawCommand::Sprite {
                    texture: LOGO_ASSET.to_owned(),
                    position: (100.0, 100.0 / 3.0),
                    tint: Color::WHITE,
                },
                DrawCommand::Text {
                    font: FONT_ASSET.to_owned(),
                    text: PROMPT.to_owned(),
                    position: (100.0, 200.0 / 3.0),
                    color: Color::WHITE,
                },
            ]
        );
        assert!(fl.globals().shared_assets.contains(FONT_ASSET));
        assert_eq!(loader.load_count(), 2);
    }

    #[test]
    fn prompt_blinks_every_half_second() {
        let (mut fl, _) = frame_loop();
        fl.host_mut().request_change(TitleScene::new());

        let mut visible = Vec::new();
        for _ in 0..4 {
            fl.tick(&[], STEP).unwrap();
            let has_text = fl
                .surface()
                .commands()
                .iter()
                .any(|c| matches!(c, DrawCommand::Text { .. }));
            visible.push(has_text);
        }

        assert_eq!(visible, vec![true, false, false, true]);
    }

    #[test]
    fn enter_switches_to_gameplay_on_next_frame() {
        let (mut fl, loader) = frame_loop();
        fl.host_mut().request_change(TitleScene::new());
        fl.tick(&[], STEP).unwrap();

        fl.tick(&press(KeyCode::Enter), STEP).unwrap();
        assert_eq!(fl.host().state(), HostState::TransitionPending);
        assert_eq!(fl.host().active_name(), Some("TitleScene"));

        fl.tick(&[], STEP).unwrap();
        assert_eq!(fl.host().active_name(), Some("GameplayScene"));
        assert_eq!(loader.unload_count(), 1, "logo released with the title scope");
        assert_eq!(loader.load_count(), 3, "shared font loaded only once");
    }

    #[test]
    fn cancel_on_title_ends_the_loop() {
        let (mut fl, _) = frame_loop();
        fl.host_mut().request_change(TitleScene::new());
        fl.tick(&[], STEP).unwrap();

        assert_eq!(fl.tick(&press(KeyCode::Escape), STEP).unwrap(), TickControl::Exit);
    }

    #[test]
    fn missing_logo_aborts_activation() {
        let loader = MemoryAssetLoader::new()
            .with_asset("content/fonts/main.font", b"font".to_vec())
            .into_shared();
        let globals = GlobalContext::new(ResourceScope::new("shared", "content", loader), (10, 10));
        let mut fl = FrameLoop::new(globals, Box::new(LogBackend::new()));
        fl.host_mut().request_change(TitleScene::new());

        let err = fl.tick(&[], STEP).unwrap_err();

        assert_eq!(err.scene, "TitleScene");
        assert_eq!(fl.host().state(), HostState::Empty);
    }
}
