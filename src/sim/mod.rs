//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One frame per tick, timers counted in frames
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{
    Collider, Consume, Contact, Group, Hitbox, Overlap, Rect, Resolution, ResolutionOf, detect,
    resolve,
};
pub use entity::{
    Bullet, Entity, EntityId, EntityKind, EntityStore, Explosion, ExplosionSize, Playfield,
    PowerUp, PowerUpKind, Rock, Subset,
};
pub use player::{Action, Phase, Player, TerminalCheck};
pub use state::{FrameFlags, GameState};
pub use tick::{FrameReport, tick};
