//=========================================================================
// Gameplay Scene
//=========================================================================
//
// A player sprite moved with the arrow keys or WASD, kept inside the
// viewport, and a score that ticks up once per second survived.
//
// Escape returns to the title instead of quitting, so exit-on-cancel is
// switched off while this scene is active.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::info;

//=== Internal Dependencies ===============================================

use super::{TitleScene, FONT_ASSET};
use crate::core::assets::AssetHandle;
use crate::core::error::SceneError;
use crate::core::input::{KeyCode, StateTracker};
use crate::core::render::{Color, DrawSurface};
use crate::core::scene::{Scene, SceneContext};

//=== Constants ===========================================================

pub(crate) const PLAYER_ASSET: &str = "images/player.png";

/// Pixels per second.
const PLAYER_SPEED: f32 = 200.0;
const SCORE_INTERVAL: Duration = Duration::from_secs(1);
const HUD_POSITION: (f32, f32) = (16.0, 16.0);

//=== GameplayScene =======================================================

#[derive(Debug)]
pub struct GameplayScene {
    font: Option<AssetHandle>,
    player: Option<AssetHandle>,
    position: (f32, f32),
    bounds: (f32, f32),
    score: u32,
    score_timer: Duration,
}

impl GameplayScene {
    pub fn new() -> Self {
        Self {
            font: None,
            player: None,
            position: (0.0, 0.0),
            bounds: (0.0, 0.0),
            score: 0,
            score_timer: Duration::ZERO,
        }
    }

    pub fn position(&self) -> (f32, f32) {
        self.position
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    fn move_player(&mut self, input: &StateTracker, elapsed: Duration) {
        let held = |a: KeyCode, b: KeyCode| input.is_key_down(a) || input.is_key_down(b);
        let axis = |negative: bool, positive: bool| f32::from(positive as u8) - f32::from(negative as u8);

        let dx = axis(
            held(KeyCode::ArrowLeft, KeyCode::KeyA),
            held(KeyCode::ArrowRight, KeyCode::KeyD),
        );
        let dy = axis(
            held(KeyCode::ArrowUp, KeyCode::KeyW),
            held(KeyCode::ArrowDown, KeyCode::KeyS),
        );

        let step = PLAYER_SPEED * elapsed.as_secs_f32();
        self.position.0 = (self.position.0 + dx * step).clamp(0.0, self.bounds.0);
        self.position.1 = (self.position.1 + dy * step).clamp(0.0, self.bounds.1);
    }
}

impl Default for GameplayScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for GameplayScene {
    fn initialize(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), SceneError> {
        ctx.toggles.exit_on_cancel = false;

        let (width, height) = ctx.viewport;
        self.bounds = (width as f32, height as f32);
        self.position = (self.bounds.0 / 2.0, self.bounds.1 / 2.0);

        self.load_content(ctx)
    }

    fn load_content(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), SceneError> {
        self.font = Some(ctx.shared_assets.acquire(FONT_ASSET)?);
        self.player = Some(ctx.assets.acquire(PLAYER_ASSET)?);
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>, elapsed: Duration) {
        if ctx.input.is_key_pressed(KeyCode::Escape) && !ctx.has_pending_transition() {
            ctx.request_change(TitleScene::new());
        }

        self.move_player(ctx.input, elapsed);

        self.score_timer += elapsed;
        while self.score_timer >= SCORE_INTERVAL {
            self.score_timer -= SCORE_INTERVAL;
            self.score += 1;
        }
    }

    fn draw(&self, surface: &mut DrawSurface, _elapsed: Duration) {
        surface.clear(Color::BLACK);

        if let Some(player) = &self.player {
            surface.sprite(player, self.position, Color::WHITE);
        }
        if let Some(font) = &self.font {
            surface.text(font, format!("Score: {}", self.score), HUD_POSITION, Color::WHITE);
        }
    }

    fn unload_content(&mut self, _ctx: &mut SceneContext<'_>) {
        info!(target: "scene", "Gameplay ended with score {}", self.score);
        self.font = None;
        self.player = None;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::InputEvent;
    use crate::core::render::DrawCommand;
    use crate::core::scene::HostState;
    use crate::core::{FrameLoop, TickControl};
    use crate::scenes::testing::{frame_loop, press, STEP};

    fn started() -> FrameLoop {
        let (mut fl, _) = frame_loop();
        fl.host_mut().request_change(GameplayScene::new());
        fl.tick(&[], Duration::ZERO).unwrap();
        fl
    }

    fn player_position(fl: &FrameLoop) -> (f32, f32) {
        fl.surface()
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Sprite { position, .. } => Some(*position),
                _ => None,
            })
            .expect("player sprite drawn")
    }

    fn hud_text(fl: &FrameLoop) -> String {
        fl.surface()
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .expect("score drawn")
    }

    #[test]
    fn starts_centred_with_exit_disabled() {
        let fl = started();

        assert_eq!(player_position(&fl), (100.0, 50.0));
        assert_eq!(hud_text(&fl), "Score: 0");
        assert!(!fl.globals().toggles.exit_on_cancel);
    }

    #[test]
    fn held_keys_move_the_player() {
        let mut fl = started();

        fl.tick(&press(KeyCode::ArrowRight), Duration::from_millis(100))
            .unwrap();
        let (x, y) = player_position(&fl);
        assert!((x - 120.0).abs() < 1e-3, "x = {}", x);
        assert_eq!(y, 50.0);

        // Still held: no new event needed.
        fl.tick(&[], Duration::from_millis(100)).unwrap();
        assert!((player_position(&fl).0 - 140.0).abs() < 1e-3);

        fl.tick(&[vec![InputEvent::key_up(KeyCode::ArrowRight)]], Duration::from_millis(100))
            .unwrap();
        assert!((player_position(&fl).0 - 140.0).abs() < 1e-3);
    }

    #[test]
    fn wasd_moves_diagonally_and_clamps() {
        let mut fl = started();
        let keys = vec![vec![
            InputEvent::key_down(KeyCode::KeyW),
            InputEvent::key_down(KeyCode::KeyA),
        ]];

        fl.tick(&keys, STEP).unwrap();
        for _ in 0..8 {
            fl.tick(&[], STEP).unwrap();
        }

        assert_eq!(player_position(&fl), (0.0, 0.0));
    }

    #[test]
    fn score_counts_whole_seconds() {
        let mut fl = started();

        for _ in 0..10 {
            fl.tick(&[], STEP).unwrap();
        }

        assert_eq!(hud_text(&fl), "Score: 2");
    }

    #[test]
    fn escape_returns_to_title_instead_of_exiting() {
        let mut fl = started();

        let control = fl.tick(&press(KeyCode::Escape), STEP).unwrap();
        assert_eq!(control, TickControl::Continue);
        assert_eq!(fl.host().state(), HostState::TransitionPending);

        fl.tick(&[], STEP).unwrap();
        assert_eq!(fl.host().active_name(), Some("TitleScene"));
        assert!(fl.globals().toggles.exit_on_cancel);
    }

    #[test]
    fn direct_state_accessors() {
        let scene = GameplayScene::default();
        assert_eq!(scene.score(), 0);
        assert_eq!(scene.position(), (0.0, 0.0));
    }
}
