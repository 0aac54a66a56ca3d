//! Game state and spawn operations
//!
//! All state that determines the next frame lives here, including the RNG,
//! so a cloned or deserialized state replays identically.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{
    Entity, EntityId, EntityStore, Explosion, ExplosionSize, Playfield, PowerUp, PowerUpKind, Rock,
};
use super::player::Player;
use crate::settings::Settings;

/// Which collision categories fired during the last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameFlags {
    /// Player rammed a rock
    pub is_collided: bool,
    /// At least one bullet destroyed a rock
    pub is_hit_rock: bool,
    /// Player picked up at least one power-up
    pub is_power: bool,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub settings: Settings,
    pub field: Playfield,
    /// Spawn and drop rolls
    pub rng: Pcg32,
    /// Completed frames
    pub frame: u64,
    /// Cumulative score (only ever increases)
    pub score: u64,
    /// Cleared exactly once, when the last life is lost
    pub running: bool,
    pub flags: FrameFlags,
    pub player: Player,
    /// Rocks, power-ups and explosions
    pub world: EntityStore,
}

impl GameState {
    /// Create a new game with the initial rock population
    pub fn new(settings: &Settings) -> Self {
        let mut state = Self {
            seed: settings.seed,
            settings: settings.clone(),
            field: Playfield::from_settings(settings),
            rng: Pcg32::seed_from_u64(settings.seed),
            frame: 0,
            score: 0,
            running: true,
            flags: FrameFlags::default(),
            player: Player::new(settings),
            world: EntityStore::new(),
        };

        for _ in 0..settings.initial_rocks {
            state.new_rock();
        }

        log::info!(
            "New game: seed={}, rocks={}, lives={}",
            state.seed,
            state.world.rock_count(),
            state.player.lives
        );
        state
    }

    pub fn is_terminal(&self) -> bool {
        !self.running
    }

    /// Spawn a randomly rolled rock above the playfield
    pub fn new_rock(&mut self) -> EntityId {
        let rock = Rock::random(&mut self.rng, self.field);
        self.spawn_rock(rock)
    }

    /// Add a specific rock to the global set and the rocks subset
    pub fn spawn_rock(&mut self, rock: Rock) -> EntityId {
        self.world.spawn(Entity::Rock(rock))
    }

    pub fn spawn_power(&mut self, kind: PowerUpKind, center: Vec2) -> EntityId {
        self.world.spawn(Entity::PowerUp(PowerUp::new(kind, center)))
    }

    pub fn spawn_explosion(&mut self, size: ExplosionSize, center: Vec2) -> EntityId {
        let frame_ticks = self.settings.explosion_frame_ticks;
        self.world
            .spawn(Entity::Explosion(Explosion::new(size, center, frame_ticks)))
    }
}
