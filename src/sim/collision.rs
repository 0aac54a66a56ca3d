//! Collision detection and resolution between entity groups
//!
//! Detection is pure: every collider exposes a [`Hitbox`] and a pair of groups
//! is tested with an [`Overlap`] predicate. Resolution then optionally
//! consumes the matched members from their owning collections, handing the
//! removed items back to the caller so their last position and size stay
//! available for scoring and effects.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Collision shape exposed by every collider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub rect: Rect,
    /// Radius used by the circular predicate, centered on `rect`
    pub radius: f32,
}

impl Hitbox {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

/// Anything that can be tested for overlap
pub trait Collider {
    fn hitbox(&self) -> Hitbox;
}

/// Overlap predicate used to pair up two groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// Axis-aligned rectangle intersection
    Rect,
    /// Circle intersection (touching circles collide)
    Circle,
}

impl Overlap {
    pub fn test(self, a: &Hitbox, b: &Hitbox) -> bool {
        match self {
            Overlap::Rect => a.rect.intersects(&b.rect),
            Overlap::Circle => {
                let reach = a.radius + b.radius;
                a.center().distance_squared(b.center()) <= reach * reach
            }
        }
    }
}

/// Which sides of a resolution lose their matched members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Consume {
    pub a: bool,
    pub b: bool,
}

impl Consume {
    pub const NONE: Consume = Consume { a: false, b: false };
    pub const A: Consume = Consume { a: true, b: false };
    pub const B: Consume = Consume { a: false, b: true };
    pub const BOTH: Consume = Consume { a: true, b: true };
}

/// A collection that takes part in collision resolution
pub trait Group {
    /// Stable identity of a member inside this group
    type Key: Copy + PartialEq;
    /// Value handed back when a member is consumed
    type Item;

    /// Hitboxes of every member able to collide, in deterministic order
    fn hitboxes(&self) -> Vec<(Self::Key, Hitbox)>;

    /// Remove a member, returning it if it was present
    fn consume(&mut self, key: Self::Key) -> Option<Self::Item>;
}

/// One overlapping pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact<KA, KB> {
    pub a: KA,
    pub b: KB,
    pub a_box: Hitbox,
    pub b_box: Hitbox,
}

/// Outcome of resolving two groups against each other
#[derive(Debug, Clone)]
pub struct Resolution<KA, KB, IA, IB> {
    /// Every overlapping pair, ordered by group A then group B
    pub contacts: Vec<Contact<KA, KB>>,
    /// Members removed from group A, in first-contact order
    pub consumed_a: Vec<IA>,
    /// Members removed from group B, in first-contact order
    pub consumed_b: Vec<IB>,
}

/// Resolution type produced for a pair of groups
pub type ResolutionOf<A, B> = Resolution<
    <A as Group>::Key,
    <B as Group>::Key,
    <A as Group>::Item,
    <B as Group>::Item,
>;

impl<KA: Copy + PartialEq, KB: Copy + PartialEq, IA, IB> Resolution<KA, KB, IA, IB> {
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn first(&self) -> Option<&Contact<KA, KB>> {
        self.contacts.first()
    }

    /// Distinct group A members that matched anything
    pub fn matched_a(&self) -> Vec<KA> {
        let mut keys = Vec::new();
        for contact in &self.contacts {
            if !keys.contains(&contact.a) {
                keys.push(contact.a);
            }
        }
        keys
    }

    /// Distinct group B members that matched anything
    pub fn matched_b(&self) -> Vec<KB> {
        let mut keys = Vec::new();
        for contact in &self.contacts {
            if !keys.contains(&contact.b) {
                keys.push(contact.b);
            }
        }
        keys
    }
}

/// Report every overlapping pair between two hitbox lists
pub fn detect<KA: Copy, KB: Copy>(
    group_a: &[(KA, Hitbox)],
    group_b: &[(KB, Hitbox)],
    overlap: Overlap,
) -> Vec<Contact<KA, KB>> {
    let mut contacts = Vec::new();
    for &(a, a_box) in group_a {
        for &(b, b_box) in group_b {
            if overlap.test(&a_box, &b_box) {
                contacts.push(Contact { a, b, a_box, b_box });
            }
        }
    }
    contacts
}

/// Detect overlaps between two groups, then consume the matched members on
/// each side flagged in `consume`.
///
/// Detection runs against the state before any removal, so one member that
/// overlaps several members of the other group is matched with all of them
/// and consumed exactly once.
pub fn resolve<A, B>(a: &mut A, b: &mut B, overlap: Overlap, consume: Consume) -> ResolutionOf<A, B>
where
    A: Group + ?Sized,
    B: Group + ?Sized,
{
    let contacts = detect(&a.hitboxes(), &b.hitboxes(), overlap);
    let mut resolution = Resolution {
        contacts,
        consumed_a: Vec::new(),
        consumed_b: Vec::new(),
    };

    if consume.a {
        for key in resolution.matched_a() {
            if let Some(item) = a.consume(key) {
                resolution.consumed_a.push(item);
            }
        }
    }
    if consume.b {
        for key in resolution.matched_b() {
            if let Some(item) = b.consume(key) {
                resolution.consumed_b.push(item);
            }
        }
    }

    resolution
}
