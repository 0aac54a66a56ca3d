//! Software renderer: paints a game state into a frame buffer

use glam::Vec2;

use super::font::BitmapFont;
use super::frame::{FrameBuffer, colors::*};
use crate::sim::{Entity, GameState, Player, PowerUpKind, Rect};

/// Score readout: font size and top edge
const SCORE_FONT_SIZE: u32 = 18;
const SCORE_TOP: f32 = 10.0;

/// Health bar geometry
const HEALTH_BAR_X: f32 = 5.0;
const HEALTH_BAR_Y: f32 = 15.0;
const HEALTH_BAR_LENGTH: f32 = 100.0;
const HEALTH_BAR_HEIGHT: f32 = 10.0;
const HEALTH_BAR_OUTLINE: f32 = 2.0;

/// Paints a game state into a frame buffer
pub trait Renderer {
    fn render(&mut self, state: &GameState, frame: &mut FrameBuffer);
}

/// Resources supplied at construction
#[derive(Debug, Clone)]
pub struct Assets {
    /// Drawn at the top-left corner before any entity
    pub background: Option<FrameBuffer>,
    pub font: BitmapFont,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            background: None,
            font: BitmapFont::with_size(SCORE_FONT_SIZE),
        }
    }
}

/// Flat-shaded CPU renderer
#[derive(Debug, Clone, Default)]
pub struct SoftwareRenderer {
    assets: Assets,
}

impl SoftwareRenderer {
    pub fn new(assets: Assets) -> Self {
        Self { assets }
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }
}

impl Renderer for SoftwareRenderer {
    fn render(&mut self, state: &GameState, frame: &mut FrameBuffer) {
        frame.fill(BLACK);
        if let Some(background) = &self.assets.background {
            frame.blit(background, 0, 0);
        }

        for (_, entity) in state.world.iter() {
            draw_entity(frame, entity);
        }

        if state.player.is_alive() {
            draw_ship(frame, &state.player);
        }
        for bullet in &state.player.bullets {
            frame.fill_rect(&bullet.rect, YELLOW);
        }

        let mid = frame.width() as f32 / 2.0;
        self.assets
            .font
            .draw(frame, &state.score.to_string(), mid, SCORE_TOP, WHITE);
        draw_health(
            frame,
            state.player.health,
            state.player.max_health,
            HEALTH_BAR_X,
            HEALTH_BAR_Y,
        );
    }
}

fn draw_entity(frame: &mut FrameBuffer, entity: &Entity) {
    match entity {
        Entity::Rock(rock) => {
            let center = rock.rect.center();
            let radius = rock.rect.w / 2.0;
            frame.fill_circle(center, radius, ROCK);
            // Crater marks the spin
            let angle = rock.rotation.to_radians();
            let crater = center + Vec2::new(angle.cos(), angle.sin()) * radius * 0.5;
            frame.fill_circle(crater, radius * 0.25, ROCK_CRATER);
        }
        Entity::PowerUp(power) => {
            let color = match power.kind {
                PowerUpKind::Shield => SHIELD,
                PowerUpKind::Gun => GUN,
            };
            frame.fill_rect(&power.rect, color);
            frame.stroke_rect(&power.rect, 2.0, WHITE);
        }
        Entity::Explosion(explosion) => {
            let radius = explosion.size.pixels() / 2.0 * explosion.progress();
            frame.fill_circle(explosion.center, radius, EXPLOSION);
            frame.fill_circle(explosion.center, radius * 0.5, EXPLOSION_CORE);
        }
    }
}

fn draw_ship(frame: &mut FrameBuffer, player: &Player) {
    let r = player.rect;
    // Wings across the lower half, fuselage up the middle
    frame.fill_rect(&Rect::new(r.x, r.y + r.h / 2.0, r.w, r.h / 2.0), SHIP);
    frame.fill_rect(&Rect::new(r.x + r.w / 3.0, r.y, r.w / 3.0, r.h), SHIP);
    frame.fill_rect(
        &Rect::from_center(r.center() - Vec2::new(0.0, r.h / 4.0), r.w / 6.0, r.h / 4.0),
        SHIP_COCKPIT,
    );
}

fn draw_health(frame: &mut FrameBuffer, health: i32, max_health: i32, x: f32, y: f32) {
    let hp = health.max(0) as f32;
    let fill = hp / max_health.max(1) as f32 * HEALTH_BAR_LENGTH;
    frame.fill_rect(&Rect::new(x, y, fill, HEALTH_BAR_HEIGHT), GREEN);
    frame.stroke_rect(
        &Rect::new(x, y, HEALTH_BAR_LENGTH, HEALTH_BAR_HEIGHT),
        HEALTH_BAR_OUTLINE,
        WHITE,
    );
}
