//! Entity kinds and the entity store
//!
//! Every non-player entity lives in one id-keyed map (the global set). Rocks
//! and power-ups are additionally indexed by id in typed subsets; the subsets
//! never own anything, and [`EntityStore::despawn`] purges an id from all of
//! them at once.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Collider, Group, Hitbox, Rect};
use crate::consts::EXPLOSION_FRAMES;
use crate::settings::Settings;

/// Entity identifier, allocated in spawn order
pub type EntityId = u32;

/// Playfield bounds in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.width as f32, settings.height as f32)
    }
}

/// A falling, spinning rock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rock {
    pub rect: Rect,
    /// Collision radius; also the damage dealt and half the score awarded
    pub radius: u32,
    pub vel: Vec2,
    /// Spin (degrees per frame)
    pub rot_speed: f32,
    /// Accumulated rotation (degrees, 0-360)
    pub rotation: f32,
}

impl Rock {
    pub const MIN_SIZE: u32 = 30;
    pub const MAX_SIZE: u32 = 100;

    /// Roll a new rock above the top edge
    pub fn random(rng: &mut impl Rng, field: Playfield) -> Self {
        let size = rng.random_range(Self::MIN_SIZE..=Self::MAX_SIZE) as f32;
        let mut rock = Self {
            rect: Rect::new(0.0, 0.0, size, size),
            radius: (size * 0.85 / 2.0).floor() as u32,
            vel: Vec2::ZERO,
            rot_speed: rng.random_range(-3..3) as f32,
            rotation: 0.0,
        };
        rock.reroll(rng, field);
        rock
    }

    /// Motionless rock centered on `center` (scripted setups and tests)
    pub fn stationary(center: Vec2, radius: u32) -> Self {
        let size = radius as f32 * 2.0;
        Self {
            rect: Rect::from_center(center, size, size),
            radius,
            vel: Vec2::ZERO,
            rot_speed: 0.0,
            rotation: 0.0,
        }
    }

    /// Re-enter from above with a fresh position and velocity
    fn reroll(&mut self, rng: &mut impl Rng, field: Playfield) {
        let max_x = (field.width - self.rect.w).max(1.0) as i32;
        self.rect.x = rng.random_range(0..max_x) as f32;
        self.rect.y = rng.random_range(-180..-100) as f32;
        self.vel = Vec2::new(
            rng.random_range(-3..3) as f32,
            rng.random_range(2..10) as f32,
        );
    }

    fn out_of_bounds(&self, field: Playfield) -> bool {
        self.rect.top() > field.height || self.rect.left() > field.width || self.rect.right() < 0.0
    }

    pub fn update(&mut self, rng: &mut impl Rng, field: Playfield) {
        self.rotation = (self.rotation + self.rot_speed).rem_euclid(360.0);
        self.rect.translate(self.vel);
        if self.out_of_bounds(field) {
            self.reroll(rng, field);
        }
    }
}

impl Collider for Rock {
    fn hitbox(&self) -> Hitbox {
        Hitbox {
            rect: self.rect,
            radius: self.radius as f32,
        }
    }
}

/// A player shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub rect: Rect,
}

impl Bullet {
    pub const WIDTH: f32 = 10.0;
    pub const HEIGHT: f32 = 20.0;
    pub const SPEED: f32 = 10.0;

    /// Bullet with its bottom-center at `muzzle`
    pub fn new(id: u32, muzzle: Vec2) -> Self {
        Self {
            id,
            rect: Rect::new(
                muzzle.x - Self::WIDTH / 2.0,
                muzzle.y - Self::HEIGHT,
                Self::WIDTH,
                Self::HEIGHT,
            ),
        }
    }

    /// Advance one frame. Returns false once the bullet has left the top edge.
    pub fn update(&mut self) -> bool {
        self.rect.y -= Self::SPEED;
        self.rect.bottom() >= 0.0
    }
}

impl Collider for Bullet {
    fn hitbox(&self) -> Hitbox {
        Hitbox {
            rect: self.rect,
            radius: Self::WIDTH / 2.0,
        }
    }
}

/// Bullets are keyed by their id inside the owning vector
impl Group for Vec<Bullet> {
    type Key = u32;
    type Item = Bullet;

    fn hitboxes(&self) -> Vec<(u32, Hitbox)> {
        self.iter().map(|b| (b.id, b.hitbox())).collect()
    }

    fn consume(&mut self, key: u32) -> Option<Bullet> {
        let idx = self.iter().position(|b| b.id == key)?;
        Some(self.remove(idx))
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Restores health
    Shield,
    /// Raises the gun level
    Gun,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::Shield, PowerUpKind::Gun];

    /// Uniformly random kind
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A falling pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub rect: Rect,
}

impl PowerUp {
    pub const SIZE: f32 = 30.0;
    pub const SPEED: f32 = 3.0;

    pub fn new(kind: PowerUpKind, center: Vec2) -> Self {
        Self {
            kind,
            rect: Rect::from_center(center, Self::SIZE, Self::SIZE),
        }
    }

    /// Advance one frame. Returns false once it has fallen past the bottom.
    pub fn update(&mut self, field: Playfield) -> bool {
        self.rect.y += Self::SPEED;
        self.rect.top() <= field.height
    }
}

impl Collider for PowerUp {
    fn hitbox(&self) -> Hitbox {
        Hitbox {
            rect: self.rect,
            radius: Self::SIZE / 2.0,
        }
    }
}

/// Explosion classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionSize {
    /// Rock shot down
    Large,
    /// Rock rammed into the ship
    Small,
    /// Ship destroyed
    Player,
}

impl ExplosionSize {
    /// Sprite edge length in pixels
    pub fn pixels(self) -> f32 {
        match self {
            ExplosionSize::Large => 75.0,
            ExplosionSize::Small => 30.0,
            ExplosionSize::Player => 100.0,
        }
    }
}

/// Visual-only animation; removes itself when the last frame has played
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub size: ExplosionSize,
    pub center: Vec2,
    /// Current animation frame (0-based)
    pub frame: u32,
    ticks: u32,
    frame_ticks: u32,
}

impl Explosion {
    pub fn new(size: ExplosionSize, center: Vec2, frame_ticks: u32) -> Self {
        Self {
            size,
            center,
            frame: 0,
            ticks: 0,
            frame_ticks: frame_ticks.max(1),
        }
    }

    /// Advance one frame. Returns false when the animation has finished.
    pub fn update(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks >= self.frame_ticks {
            self.ticks = 0;
            self.frame += 1;
        }
        self.frame < EXPLOSION_FRAMES
    }

    /// Animation progress in (0, 1]
    pub fn progress(&self) -> f32 {
        (self.frame + 1) as f32 / EXPLOSION_FRAMES as f32
    }
}

/// Kind tag of a stored entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Rock,
    PowerUp,
    Explosion,
}

/// A stored entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Rock(Rock),
    PowerUp(PowerUp),
    Explosion(Explosion),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Rock(_) => EntityKind::Rock,
            Entity::PowerUp(_) => EntityKind::PowerUp,
            Entity::Explosion(_) => EntityKind::Explosion,
        }
    }

    /// Advance one frame. Returns false when the entity should be removed.
    pub fn update(&mut self, rng: &mut impl Rng, field: Playfield) -> bool {
        match self {
            Entity::Rock(rock) => {
                rock.update(rng, field);
                true
            }
            Entity::PowerUp(power) => power.update(field),
            Entity::Explosion(explosion) => explosion.update(),
        }
    }
}

/// Typed subsets of the global entity set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subset {
    Rocks,
    Powers,
}

/// Owner of every non-player entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    entities: BTreeMap<EntityId, Entity>,
    rocks: BTreeSet<EntityId>,
    powers: BTreeSet<EntityId>,
    next_id: EntityId,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity to the global set and to the subset matching its kind
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        match entity.kind() {
            EntityKind::Rock => {
                self.rocks.insert(id);
            }
            EntityKind::PowerUp => {
                self.powers.insert(id);
            }
            EntityKind::Explosion => {}
        }
        self.entities.insert(id, entity);
        id
    }

    /// Remove an entity from the global set and every subset
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.rocks.remove(&id);
        self.powers.remove(&id);
        self.entities.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn in_subset(&self, subset: Subset, id: EntityId) -> bool {
        match subset {
            Subset::Rocks => self.rocks.contains(&id),
            Subset::Powers => self.powers.contains(&id),
        }
    }

    /// Number of entities in the global set
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn rock_count(&self) -> usize {
        self.rocks.len()
    }

    pub fn power_count(&self) -> usize {
        self.powers.len()
    }

    pub fn explosion_count(&self) -> usize {
        self.explosions().count()
    }

    /// All entities in spawn order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(&id, e)| (id, e))
    }

    pub fn rocks(&self) -> impl Iterator<Item = (EntityId, &Rock)> {
        self.rocks.iter().filter_map(|id| match self.entities.get(id) {
            Some(Entity::Rock(rock)) => Some((*id, rock)),
            _ => None,
        })
    }

    pub fn powers(&self) -> impl Iterator<Item = (EntityId, &PowerUp)> {
        self.powers.iter().filter_map(|id| match self.entities.get(id) {
            Some(Entity::PowerUp(power)) => Some((*id, power)),
            _ => None,
        })
    }

    pub fn explosions(&self) -> impl Iterator<Item = (EntityId, &Explosion)> {
        self.entities.iter().filter_map(|(&id, e)| match e {
            Entity::Explosion(explosion) => Some((id, explosion)),
            _ => None,
        })
    }

    /// Advance every entity one frame, despawning those that finished
    pub fn update_all(&mut self, rng: &mut impl Rng, field: Playfield) {
        let mut finished = Vec::new();
        for (&id, entity) in self.entities.iter_mut() {
            if !entity.update(rng, field) {
                finished.push(id);
            }
        }
        for id in finished {
            self.despawn(id);
        }
    }

    /// Collision view over the rocks subset
    pub fn rock_group(&mut self) -> RockGroup<'_> {
        RockGroup { store: self }
    }

    /// Collision view over the powers subset
    pub fn power_group(&mut self) -> PowerGroup<'_> {
        PowerGroup { store: self }
    }
}

/// Rocks as a collision group; consuming a rock despawns it everywhere
pub struct RockGroup<'a> {
    store: &'a mut EntityStore,
}

impl Group for RockGroup<'_> {
    type Key = EntityId;
    type Item = Rock;

    fn hitboxes(&self) -> Vec<(EntityId, Hitbox)> {
        self.store.rocks().map(|(id, r)| (id, r.hitbox())).collect()
    }

    fn consume(&mut self, key: EntityId) -> Option<Rock> {
        match self.store.despawn(key)? {
            Entity::Rock(rock) => Some(rock),
            _ => None,
        }
    }
}

/// Power-ups as a collision group; consuming one despawns it everywhere
pub struct PowerGroup<'a> {
    store: &'a mut EntityStore,
}

impl Group for PowerGroup<'_> {
    type Key = EntityId;
    type Item = PowerUp;

    fn hitboxes(&self) -> Vec<(EntityId, Hitbox)> {
        self.store.powers().map(|(id, p)| (id, p.hitbox())).collect()
    }

    fn consume(&mut self, key: EntityId) -> Option<PowerUp> {
        match self.store.despawn(key)? {
            Entity::PowerUp(power) => Some(power),
            _ => None,
        }
    }
}
