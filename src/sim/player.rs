//! The player ship and its health/lives state machine

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Collider, Group, Hitbox, Rect};
use super::entity::{Bullet, Playfield, PowerUpKind};
use crate::settings::Settings;

/// Control signal for one frame (deterministic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Idle,
    Left,
    Right,
    Fire,
}

impl Action {
    /// Size of the discrete action space
    pub const COUNT: usize = 4;
    pub const ALL: [Action; Action::COUNT] = [Action::Idle, Action::Left, Action::Right, Action::Fire];

    /// Map a discrete controller index; unknown indices are treated as idle
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Player lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Flying, colliding and firing
    Alive,
    /// Parked off-screen after losing a life
    Hidden { respawn_in: u32 },
    /// Out of lives (terminal)
    Dead,
}

/// Outcome of the end-of-frame terminal check
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TerminalCheck {
    /// Ship position at the moment it was destroyed this frame
    pub died_at: Option<Vec2>,
    /// The last life was lost this frame
    pub game_over: bool,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub radius: f32,
    /// Can dip below zero mid-frame; clamped by the terminal check
    pub health: i32,
    pub max_health: i32,
    pub lives: u32,
    pub gun_level: u32,
    pub phase: Phase,
    /// Shots in flight (outlive the frame they were fired in)
    pub bullets: Vec<Bullet>,
    /// Frames since the last gun upgrade or decay
    gun_ticks: u32,
    next_bullet_id: u32,
    shield_heal: i32,
    respawn_ticks: u32,
    gun_duration_ticks: u32,
    field: Playfield,
}

impl Player {
    pub const WIDTH: f32 = 50.0;
    pub const HEIGHT: f32 = 38.0;
    pub const RADIUS: f32 = 20.0;
    pub const SPEED: f32 = 8.0;
    /// Gap between the ship's bottom edge and the playfield bottom
    pub const BOTTOM_MARGIN: f32 = 10.0;
    /// How far below the playfield a hidden ship is parked
    pub const HIDE_OFFSET: f32 = 500.0;

    pub fn new(settings: &Settings) -> Self {
        let field = Playfield::from_settings(settings);
        let mut player = Self {
            rect: Rect::new(0.0, 0.0, Self::WIDTH, Self::HEIGHT),
            radius: Self::RADIUS,
            health: settings.max_health,
            max_health: settings.max_health,
            lives: settings.start_lives,
            gun_level: 1,
            phase: Phase::Alive,
            bullets: Vec::new(),
            gun_ticks: 0,
            next_bullet_id: 0,
            shield_heal: settings.shield_heal,
            respawn_ticks: settings.respawn_ticks,
            gun_duration_ticks: settings.gun_duration_ticks,
            field,
        };
        player.reset_position();
        player
    }

    fn reset_position(&mut self) {
        self.rect.x = self.field.width / 2.0 - Self::WIDTH / 2.0;
        self.rect.y = self.field.height - Self::BOTTOM_MARGIN - Self::HEIGHT;
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn is_alive(&self) -> bool {
        self.phase == Phase::Alive
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self.phase, Phase::Hidden { .. })
    }

    pub fn is_dead(&self) -> bool {
        self.phase == Phase::Dead
    }

    /// Advance the ship and its bullets one frame
    pub fn update(&mut self, action: Action) {
        self.bullets.retain_mut(|b| b.update());

        match self.phase {
            Phase::Dead => return,
            Phase::Hidden { respawn_in } => {
                let remaining = respawn_in.saturating_sub(1);
                if remaining == 0 {
                    self.respawn();
                } else {
                    self.phase = Phase::Hidden {
                        respawn_in: remaining,
                    };
                }
                return;
            }
            Phase::Alive => {}
        }

        if self.gun_level > 1 {
            self.gun_ticks += 1;
            if self.gun_ticks > self.gun_duration_ticks {
                self.gun_level -= 1;
                self.gun_ticks = 0;
            }
        }

        match action {
            Action::Left => self.rect.x -= Self::SPEED,
            Action::Right => self.rect.x += Self::SPEED,
            Action::Idle | Action::Fire => {}
        }
        self.rect.x = self.rect.x.clamp(0.0, (self.field.width - Self::WIDTH).max(0.0));

        if action == Action::Fire {
            self.shoot();
        }
    }

    /// Fire from the nose, or from both wing tips once the gun is upgraded
    pub fn shoot(&mut self) {
        if !self.is_alive() {
            return;
        }
        if self.gun_level <= 1 {
            self.spawn_bullet(Vec2::new(self.center().x, self.rect.top()));
        } else {
            let y = self.center().y;
            self.spawn_bullet(Vec2::new(self.rect.left(), y));
            self.spawn_bullet(Vec2::new(self.rect.right(), y));
        }
    }

    /// Add a bullet with its bottom-center at `muzzle`
    pub fn spawn_bullet(&mut self, muzzle: Vec2) -> u32 {
        let id = self.next_bullet_id;
        self.next_bullet_id = self.next_bullet_id.wrapping_add(1);
        self.bullets.push(Bullet::new(id, muzzle));
        id
    }

    /// Rock impact: damage equals the rock radius, no clamping here
    pub fn take_rock_hit(&mut self, radius: u32) {
        self.health -= radius as i32;
    }

    pub fn apply_power(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Shield => {
                self.health = (self.health + self.shield_heal).min(self.max_health);
            }
            PowerUpKind::Gun => self.gun_up(),
        }
    }

    pub fn gun_up(&mut self) {
        self.gun_level = self.gun_level.saturating_add(1);
        self.gun_ticks = 0;
    }

    /// Park the ship off-screen until the respawn timer runs out
    pub fn hide(&mut self) {
        self.phase = Phase::Hidden {
            respawn_in: self.respawn_ticks,
        };
        self.rect.set_center(Vec2::new(
            self.field.width / 2.0,
            self.field.height + Self::HIDE_OFFSET,
        ));
    }

    fn respawn(&mut self) {
        self.phase = Phase::Alive;
        self.health = self.max_health;
        self.reset_position();
    }

    /// End-of-frame transitions: Alive -> Hidden on zero health, then
    /// -> Dead once no lives remain
    pub fn check_terminal(&mut self) -> TerminalCheck {
        let mut check = TerminalCheck::default();

        if self.is_alive() && self.health <= 0 {
            check.died_at = Some(self.center());
            self.health = 0;
            self.lives = self.lives.saturating_sub(1);
            self.hide();
        }

        if self.lives == 0 && !self.is_dead() {
            self.phase = Phase::Dead;
            check.game_over = true;
        }

        check
    }
}

impl Collider for Player {
    fn hitbox(&self) -> Hitbox {
        Hitbox {
            rect: self.rect,
            radius: self.radius,
        }
    }
}

/// The ship as a single-member group; it only collides while alive and is
/// never consumed
impl Group for Player {
    type Key = ();
    type Item = ();

    fn hitboxes(&self) -> Vec<((), Hitbox)> {
        if self.is_alive() {
            vec![((), self.hitbox())]
        } else {
            Vec::new()
        }
    }

    fn consume(&mut self, _key: ()) -> Option<()> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(&Settings::default())
    }

    #[test]
    fn test_starts_bottom_center() {
        let p = player();
        assert_eq!(p.center().x, 250.0);
        assert_eq!(p.rect.bottom(), 590.0);
        assert_eq!(p.health, 100);
        assert_eq!(p.lives, 3);
        assert!(p.is_alive());
    }

    #[test]
    fn test_action_from_index() {
        assert_eq!(Action::from_index(0), Action::Idle);
        assert_eq!(Action::from_index(3), Action::Fire);
        assert_eq!(Action::from_index(42), Action::Idle);
        for action in Action::ALL {
            assert_eq!(Action::from_index(action.index()), action);
        }
    }

    #[test]
    fn test_movement_clamped_to_field() {
        let mut p = player();
        for _ in 0..100 {
            p.update(Action::Left);
        }
        assert_eq!(p.rect.left(), 0.0);
        for _ in 0..100 {
            p.update(Action::Right);
        }
        assert_eq!(p.rect.right(), 500.0);
    }

    #[test]
    fn test_field_narrower_than_ship_pins_to_left() {
        let settings = Settings {
            width: 40,
            ..Settings::default()
        };
        let mut p = Player::new(&settings);
        p.update(Action::Right);
        p.update(Action::Left);
        assert_eq!(p.rect.left(), 0.0);
    }

    #[test]
    fn test_gun_level_controls_bullet_count() {
        let mut p = player();
        p.update(Action::Fire);
        assert_eq!(p.bullets.len(), 1);

        p.gun_up();
        p.update(Action::Fire);
        assert_eq!(p.bullets.len(), 3);
    }

    #[test]
    fn test_gun_upgrade_decays() {
        let settings = Settings {
            gun_duration_ticks: 5,
            ..Settings::default()
        };
        let mut p = Player::new(&settings);
        p.apply_power(PowerUpKind::Gun);
        assert_eq!(p.gun_level, 2);
        for _ in 0..5 {
            p.update(Action::Idle);
        }
        assert_eq!(p.gun_level, 2);
        p.update(Action::Idle);
        assert_eq!(p.gun_level, 1);
    }

    #[test]
    fn test_shield_clamps_to_max() {
        let mut p = player();
        p.health = 90;
        p.apply_power(PowerUpKind::Shield);
        assert_eq!(p.health, 100);
        p.health = 50;
        p.apply_power(PowerUpKind::Shield);
        assert_eq!(p.health, 70);
    }

    #[test]
    fn test_death_hides_and_respawns() {
        let settings = Settings {
            respawn_ticks: 3,
            ..Settings::default()
        };
        let mut p = Player::new(&settings);
        let start = p.center();
        p.take_rock_hit(150);
        assert_eq!(p.health, -50);

        let check = p.check_terminal();
        assert_eq!(check.died_at, Some(start));
        assert!(!check.game_over);
        assert_eq!(p.health, 0);
        assert_eq!(p.lives, 2);
        assert!(p.is_hidden());
        assert!(p.hitboxes().is_empty());

        // A hidden ship does not lose further lives
        assert_eq!(p.check_terminal(), TerminalCheck::default());
        assert_eq!(p.lives, 2);

        // Cannot fire while hidden
        p.update(Action::Fire);
        p.update(Action::Fire);
        assert!(p.bullets.is_empty());
        p.update(Action::Idle);
        assert!(p.is_alive());
        assert_eq!(p.health, 100);
        assert_eq!(p.center(), start);
    }

    #[test]
    fn test_last_life_is_terminal() {
        let mut p = player();
        p.lives = 1;
        p.take_rock_hit(100);
        let check = p.check_terminal();
        assert!(check.died_at.is_some());
        assert!(check.game_over);
        assert!(p.is_dead());
        assert_eq!(p.lives, 0);

        // Dead is absorbing
        assert_eq!(p.check_terminal(), TerminalCheck::default());
        p.update(Action::Fire);
        assert!(p.is_dead());
        assert!(p.bullets.is_empty());
    }
}
