//! Fixed frame simulation step
//!
//! One call advances the game exactly one frame. The collision stages run in
//! a fixed order: bullets against rocks, then the ship against rocks, then the
//! ship against power-ups, then the terminal check. A rock shot down in a frame
//! is already gone from the rocks subset when the ship is tested, so it can
//! never both score and deal damage.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Consume, Overlap, resolve};
use super::entity::{ExplosionSize, PowerUpKind};
use super::player::Action;
use super::state::{FrameFlags, GameState};

/// Summary of a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameReport {
    /// Frame counter after the step
    pub frame: u64,
    pub flags: FrameFlags,
    pub score: u64,
    /// Score gained this frame
    pub score_delta: u64,
    /// Rocks shot down this frame
    pub rocks_destroyed: u32,
    /// The ship was destroyed this frame
    pub lost_life: bool,
    /// The game is over (set on the frame the last life is lost and after)
    pub terminal: bool,
}

impl FrameReport {
    fn snapshot(state: &GameState) -> Self {
        Self {
            frame: state.frame,
            flags: state.flags,
            score: state.score,
            score_delta: 0,
            rocks_destroyed: 0,
            lost_life: false,
            terminal: !state.running,
        }
    }
}

/// Advance the game state by one frame.
///
/// Once the game is over this is a no-op: lives, health, score and the frame
/// counter stay untouched and the returned report is marked terminal.
pub fn tick(state: &mut GameState, action: Action) -> FrameReport {
    if !state.running {
        return FrameReport::snapshot(state);
    }

    // Entities first, then the ship with this frame's action
    state.world.update_all(&mut state.rng, state.field);
    state.player.update(action);

    let score_before = state.score;
    let rocks_destroyed = collide_bullet_rock(state);
    collide_player_rock(state);
    collide_player_power(state);
    let lost_life = check_state(state);

    state.frame += 1;

    FrameReport {
        score_delta: state.score - score_before,
        rocks_destroyed,
        lost_life,
        ..FrameReport::snapshot(state)
    }
}

/// Bullets against rocks: both sides consumed, every match scores
fn collide_bullet_rock(state: &mut GameState) -> u32 {
    let hits = resolve(
        &mut state.world.rock_group(),
        &mut state.player.bullets,
        Overlap::Rect,
        Consume::BOTH,
    );

    for rock in &hits.consumed_a {
        let center = rock.rect.center();
        state.score += u64::from(rock.radius) * 2;
        state.spawn_explosion(ExplosionSize::Large, center);

        if state.rng.random::<f32>() < state.settings.power_drop_chance {
            let kind = PowerUpKind::random(&mut state.rng);
            state.spawn_power(kind, center);
            log::debug!("Rock (r={}) dropped {:?}", rock.radius, kind);
        }

        // Keep the rock population constant
        state.new_rock();
    }

    state.flags.is_hit_rock = !hits.is_empty();
    if state.flags.is_hit_rock {
        log::debug!(
            "Frame {}: {} rock(s) shot down, score {}",
            state.frame,
            hits.consumed_a.len(),
            state.score
        );
    }
    hits.consumed_a.len() as u32
}

/// Ship against rocks: circular test, one hit per frame deals damage.
/// Every other overlapping rock is consumed without damage and replaced.
fn collide_player_rock(state: &mut GameState) {
    let hits = resolve(
        &mut state.player,
        &mut state.world.rock_group(),
        Overlap::Circle,
        Consume::B,
    );

    if let Some(first) = hits.consumed_b.first() {
        state.player.take_rock_hit(first.radius);
        state.spawn_explosion(ExplosionSize::Small, first.rect.center());
        log::debug!(
            "Frame {}: ship hit by rock (r={}), health {}",
            state.frame,
            first.radius,
            state.player.health
        );
    }

    // Every rammed rock is replaced, including ones beyond the first
    for _ in &hits.consumed_b {
        state.new_rock();
    }

    state.flags.is_collided = !hits.is_empty();
}

/// Ship against power-ups: every overlapping pickup applies
fn collide_player_power(state: &mut GameState) {
    let hits = resolve(
        &mut state.player,
        &mut state.world.power_group(),
        Overlap::Rect,
        Consume::B,
    );

    for power in &hits.consumed_b {
        state.player.apply_power(power.kind);
        log::debug!("Frame {}: picked up {:?}", state.frame, power.kind);
    }

    state.flags.is_power = !hits.is_empty();
}

/// Run the player's terminal check and apply its side effects
fn check_state(state: &mut GameState) -> bool {
    let check = state.player.check_terminal();

    if let Some(at) = check.died_at {
        state.spawn_explosion(ExplosionSize::Player, at);
        log::info!(
            "Ship destroyed at frame {}, {} lives left",
            state.frame,
            state.player.lives
        );
    }

    if check.game_over {
        state.running = false;
        log::info!("Game over at frame {}: score {}", state.frame, state.score);
    }

    check.died_at.is_some()
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::settings::Settings;
    use crate::sim::entity::{Entity, Rock, Subset};

    fn new_state(settings: Settings) -> GameState {
        GameState::new(&settings)
    }

    fn explosions_of(state: &GameState, size: ExplosionSize) -> usize {
        state
            .world
            .explosions()
            .filter(|(_, e)| e.size == size)
            .count()
    }

    #[test]
    fn test_rock_hit_damages_player() {
        let mut state = new_state(Settings::with_seed(1));
        let center = state.player.center();
        state.spawn_rock(Rock::stationary(center, 30));
        let rocks_before = state.world.rock_count();

        let report = tick(&mut state, Action::Idle);

        assert_eq!(state.player.health, 70);
        assert!(report.flags.is_collided);
        assert!(!report.flags.is_hit_rock);
        assert_eq!(state.world.rock_count(), rocks_before);
        assert_eq!(state.player.lives, 3);
        assert_eq!(explosions_of(&state, ExplosionSize::Small), 1);
        assert!(state.running);
    }

    #[test]
    fn test_fatal_hit_loses_a_life() {
        let mut state = new_state(Settings::with_seed(2));
        state.player.health = 10;
        let center = state.player.center();
        state.spawn_rock(Rock::stationary(center, 30));

        let report = tick(&mut state, Action::Idle);

        assert!(report.lost_life);
        assert!(state.player.is_hidden());
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.player.health, 0);
        assert_eq!(explosions_of(&state, ExplosionSize::Player), 1);
        assert!(state.running);
        assert!(!report.terminal);
    }

    #[test]
    fn test_last_life_ends_game_on_that_frame() {
        let mut state = new_state(Settings::with_seed(3));
        state.player.lives = 1;
        state.player.health = 5;
        let center = state.player.center();
        state.spawn_rock(Rock::stationary(center, 30));

        let report = tick(&mut state, Action::Idle);
        assert!(report.terminal);
        assert!(!state.running);
        assert_eq!(state.player.lives, 0);

        // Post-terminal steps change nothing
        let frame = state.frame;
        let after = tick(&mut state, Action::Fire);
        assert!(after.terminal);
        assert_eq!(after.score_delta, 0);
        assert_eq!(state.frame, frame);
        assert_eq!(state.player.lives, 0);
        assert!(!state.running);
    }

    #[test]
    fn test_bullet_kill_scores_and_drops() {
        let settings = Settings {
            power_drop_chance: 1.0,
            ..Settings::with_seed(4)
        };
        let mut state = new_state(settings);
        let rock_center = Vec2::new(100.0, 300.0);
        state.spawn_rock(Rock::stationary(rock_center, 15));
        // Bullet moves 10 px up during the step and still overlaps
        state.player.spawn_bullet(Vec2::new(100.0, 320.0));
        let rocks_before = state.world.rock_count();

        let report = tick(&mut state, Action::Idle);

        assert_eq!(report.score_delta, 30);
        assert_eq!(state.score, 30);
        assert_eq!(report.rocks_destroyed, 1);
        assert!(report.flags.is_hit_rock);
        assert!(state.player.bullets.is_empty());
        assert_eq!(state.world.rock_count(), rocks_before);
        assert_eq!(explosions_of(&state, ExplosionSize::Large), 1);

        let (power_id, power) = state.world.powers().next().unwrap();
        assert_eq!(power.rect.center(), rock_center);
        assert!(matches!(state.world.get(power_id), Some(Entity::PowerUp(_))));
    }

    #[test]
    fn test_no_drop_when_chance_is_zero() {
        let settings = Settings {
            power_drop_chance: 0.0,
            ..Settings::with_seed(5)
        };
        let mut state = new_state(settings);
        state.spawn_rock(Rock::stationary(Vec2::new(100.0, 300.0), 15));
        state.player.spawn_bullet(Vec2::new(100.0, 320.0));

        tick(&mut state, Action::Idle);
        assert_eq!(state.world.power_count(), 0);
        assert_eq!(state.score, 30);
    }

    #[test]
    fn test_one_bullet_two_rocks_multi_kill() {
        let mut state = new_state(Settings::with_seed(6));
        state.spawn_rock(Rock::stationary(Vec2::new(90.0, 300.0), 15));
        state.spawn_rock(Rock::stationary(Vec2::new(110.0, 300.0), 20));
        state.player.spawn_bullet(Vec2::new(100.0, 320.0));
        let rocks_before = state.world.rock_count();

        let report = tick(&mut state, Action::Idle);
        assert_eq!(report.rocks_destroyed, 2);
        assert_eq!(state.score, 70);
        assert_eq!(state.world.rock_count(), rocks_before);
    }

    #[test]
    fn test_only_first_rock_deals_damage() {
        let mut state = new_state(Settings::with_seed(7));
        let center = state.player.center();
        state.spawn_rock(Rock::stationary(center, 20));
        state.spawn_rock(Rock::stationary(center + Vec2::new(5.0, 0.0), 40));
        let rocks_before = state.world.rock_count();

        tick(&mut state, Action::Idle);
        assert_eq!(state.player.health, 80);
        assert_eq!(state.world.rock_count(), rocks_before);
        assert_eq!(explosions_of(&state, ExplosionSize::Small), 1);
    }

    #[test]
    fn test_shot_rock_cannot_damage_ship() {
        let mut state = new_state(Settings::with_seed(8));
        let center = state.player.center();
        state.spawn_rock(Rock::stationary(center, 30));
        state.player.spawn_bullet(center + Vec2::new(0.0, 20.0));

        let report = tick(&mut state, Action::Idle);
        assert!(report.flags.is_hit_rock);
        assert!(!report.flags.is_collided);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.score, 60);
    }

    #[test]
    fn test_all_overlapping_powers_apply() {
        let mut state = new_state(Settings::with_seed(9));
        state.player.health = 50;
        let center = state.player.center();
        state.spawn_power(PowerUpKind::Shield, center);
        state.spawn_power(PowerUpKind::Shield, center);
        state.spawn_power(PowerUpKind::Gun, center);

        let report = tick(&mut state, Action::Idle);
        assert!(report.flags.is_power);
        assert_eq!(state.player.health, 90);
        assert_eq!(state.player.gun_level, 2);
        assert_eq!(state.world.power_count(), 0);
    }

    #[test]
    fn test_flags_reset_each_frame() {
        let mut state = new_state(Settings::with_seed(10));
        let center = state.player.center();
        state.spawn_power(PowerUpKind::Gun, center);
        assert!(tick(&mut state, Action::Idle).flags.is_power);
        assert!(!tick(&mut state, Action::Idle).flags.is_power);
    }

    #[test]
    fn test_hidden_ship_ignores_rocks() {
        let mut state = new_state(Settings::with_seed(11));
        let start = state.player.center();
        state.player.hide();
        // Sits where the ship flew before hiding and stays on the field
        let rock = state.spawn_rock(Rock::stationary(start, 30));

        let report = tick(&mut state, Action::Idle);
        assert!(!report.flags.is_collided);
        assert!(state.world.in_subset(Subset::Rocks, rock));
        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.lives, 3);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(&Settings::with_seed(99999));
        let mut state2 = GameState::new(&Settings::with_seed(99999));

        for i in 0..600 {
            let action = Action::from_index(i % Action::COUNT);
            let r1 = tick(&mut state1, action);
            let r2 = tick(&mut state2, action);
            assert_eq!(r1, r2);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.world.len(), state2.world.len());
        assert_eq!(state1.player.center(), state2.player.center());
    }

    #[test]
    fn test_serialized_state_replays_identically() {
        let mut state = GameState::new(&Settings::with_seed(31337));
        for _ in 0..120 {
            tick(&mut state, Action::Fire);
        }

        let json = serde_json::to_string(&state).unwrap();
        let mut restored: GameState = serde_json::from_str(&json).unwrap();

        for i in 0..240 {
            let action = Action::from_index(i % Action::COUNT);
            assert_eq!(tick(&mut state, action), tick(&mut restored, action));
        }
    }
}
