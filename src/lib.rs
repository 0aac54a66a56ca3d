//! Space Survival - a falling-rock arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, player state machine, frame step)
//! - `renderer`: CPU frame buffer, software renderer and observation buffer
//! - `game`: Step/observation facade for human or automated controllers
//! - `settings`: Data-driven tuning loaded from JSON

pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const WIDTH: u32 = 500;
    pub const HEIGHT: u32 = 600;
    /// Simulation frames per second (timers below are in frames)
    pub const FPS: u32 = 60;

    /// Rock population kept on the field at all times
    pub const INITIAL_ROCKS: usize = 8;

    /// Player defaults
    pub const START_LIVES: u32 = 3;
    pub const MAX_HEALTH: i32 = 100;
    pub const SHIELD_HEAL: i32 = 20;
    /// Ship stays hidden this long after losing a life (1 s)
    pub const RESPAWN_TICKS: u32 = FPS;
    /// Each gun upgrade lasts this long before decaying one level (5 s)
    pub const GUN_DURATION_TICKS: u32 = 5 * FPS;

    /// Chance that a destroyed rock drops a power-up
    pub const POWER_DROP_CHANCE: f32 = 0.2;

    /// Explosion animation: 9 frames, one every 50 ms
    pub const EXPLOSION_FRAMES: u32 = 9;
    pub const EXPLOSION_FRAME_TICKS: u32 = 3;
}
