//! Actors: every dynamic entity that moves or collides
//!
//! The variant set is closed. Fireball-like variants share one motion helper
//! and differ only in how they react to an obstruction.

use std::sync::atomic::{AtomicU32, Ordering};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::level::Level;
use super::vector::Vector;
use crate::consts::*;

static NEXT_ACTOR_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of an actor. Two actors are the same instance iff their ids match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ActorId(u32);

impl ActorId {
    fn next() -> Self {
        Self(NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Type tag used by collision resolution and renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    Actor,
    Player,
    Coin,
    Fireball,
}

impl ActorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorType::Actor => "actor",
            ActorType::Player => "player",
            ActorType::Coin => "coin",
            ActorType::Fireball => "fireball",
        }
    }
}

/// Variant-specific state and behavior selector
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ActorKind {
    /// Inert actor with no motion of its own
    Plain,
    /// Bounces off obstructions
    Fireball,
    HorizontalFireball,
    VerticalFireball,
    /// Falls and restarts from `origin` when obstructed
    FireRain { origin: Vector },
    /// Bobs around `start`; `spring` is the current phase in radians
    Coin { spring: f32, start: Vector },
    /// Moved externally by input
    Player,
}

impl ActorKind {
    pub fn actor_type(&self) -> ActorType {
        match self {
            ActorKind::Plain => ActorType::Actor,
            ActorKind::Fireball
            | ActorKind::HorizontalFireball
            | ActorKind::VerticalFireball
            | ActorKind::FireRain { .. } => ActorType::Fireball,
            ActorKind::Coin { .. } => ActorType::Coin,
            ActorKind::Player => ActorType::Player,
        }
    }
}

/// An entity with an axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Actor {
    id: ActorId,
    pub pos: Vector,
    pub size: Vector,
    pub speed: Vector,
    pub kind: ActorKind,
}

impl Default for Actor {
    fn default() -> Self {
        Self::new(Vector::ZERO, Vector::ONE, Vector::ZERO)
    }
}

impl Actor {
    /// Plain actor with no behavior
    pub fn new(pos: Vector, size: Vector, speed: Vector) -> Self {
        Self::with_kind(pos, size, speed, ActorKind::Plain)
    }

    fn with_kind(pos: Vector, size: Vector, speed: Vector, kind: ActorKind) -> Self {
        debug_assert!(size.x >= 0.0 && size.y >= 0.0, "actor size must be non-negative");
        Self {
            id: ActorId::next(),
            pos,
            size,
            speed,
            kind,
        }
    }

    pub fn fireball(pos: Vector, speed: Vector) -> Self {
        Self::with_kind(pos, FIREBALL_SIZE, speed, ActorKind::Fireball)
    }

    pub fn horizontal_fireball(pos: Vector) -> Self {
        Self::with_kind(
            pos,
            FIREBALL_SIZE,
            HORIZONTAL_FIREBALL_SPEED,
            ActorKind::HorizontalFireball,
        )
    }

    pub fn vertical_fireball(pos: Vector) -> Self {
        Self::with_kind(
            pos,
            FIREBALL_SIZE,
            VERTICAL_FIREBALL_SPEED,
            ActorKind::VerticalFireball,
        )
    }

    pub fn fire_rain(pos: Vector) -> Self {
        Self::with_kind(
            pos,
            FIREBALL_SIZE,
            FIRE_RAIN_SPEED,
            ActorKind::FireRain { origin: pos },
        )
    }

    /// Coin spawned at a plan cell, with an explicit spring phase
    pub fn coin(pos: Vector, spring: f32) -> Self {
        let start = pos.plus(COIN_OFFSET);
        Self::with_kind(
            start,
            COIN_SIZE,
            Vector::ZERO,
            ActorKind::Coin { spring, start },
        )
    }

    /// Coin with a random spring phase in [0, 2π)
    pub fn random_coin<R: Rng + ?Sized>(pos: Vector, rng: &mut R) -> Self {
        Self::coin(pos, rng.random_range(0.0..std::f32::consts::TAU))
    }

    pub fn player(pos: Vector) -> Self {
        Self::with_kind(
            pos.plus(PLAYER_OFFSET),
            PLAYER_SIZE,
            Vector::ZERO,
            ActorKind::Player,
        )
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn actor_type(&self) -> ActorType {
        self.kind.actor_type()
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// AABB overlap; edge contact does not count, and an actor never
    /// intersects itself.
    pub fn is_intersect(&self, other: &Actor) -> bool {
        if self.id == other.id {
            return false;
        }
        !(other.left() >= self.right()
            || other.right() <= self.left()
            || other.top() >= self.bottom()
            || other.bottom() <= self.top())
    }

    /// Advance this actor by `time` seconds against the level's terrain
    pub fn act(&mut self, time: f32, level: &Level) {
        match self.kind {
            ActorKind::Plain | ActorKind::Player => {}
            ActorKind::Fireball
            | ActorKind::HorizontalFireball
            | ActorKind::VerticalFireball
            | ActorKind::FireRain { .. } => self.act_fireball(time, level),
            ActorKind::Coin { spring, start } => {
                let spring =
                    (spring + COIN_SPRING_SPEED * time).rem_euclid(std::f32::consts::TAU);
                self.kind = ActorKind::Coin { spring, start };
                self.pos = start.plus(Vector::new(0.0, spring.sin() * COIN_SPRING_DIST));
            }
        }
    }

    fn act_fireball(&mut self, time: f32, level: &Level) {
        let next = self.pos.plus(self.speed.times(time));
        if level.obstacle_at(next, self.size).is_some() {
            self.handle_obstacle();
        } else {
            self.pos = next;
        }
    }

    fn handle_obstacle(&mut self) {
        match self.kind {
            ActorKind::FireRain { origin } => self.pos = origin,
            _ => self.speed = self.speed.times(-1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::Obstacle;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn open_level(width: usize, height: usize) -> Level {
        Level::new(vec![vec![None; width]; height], Vec::new())
    }

    #[test]
    fn test_default_actor() {
        let actor = Actor::default();
        assert_eq!(actor.pos, Vector::ZERO);
        assert_eq!(actor.size, Vector::ONE);
        assert_eq!(actor.speed, Vector::ZERO);
        assert_eq!(actor.actor_type(), ActorType::Actor);
        assert_eq!(actor.actor_type().as_str(), "actor");
    }

    #[test]
    fn test_bounds() {
        let actor = Actor::new(Vector::new(2.0, 3.0), Vector::new(1.5, 0.5), Vector::ZERO);
        assert_eq!(actor.left(), 2.0);
        assert_eq!(actor.top(), 3.0);
        assert_eq!(actor.right(), 3.5);
        assert_eq!(actor.bottom(), 3.5);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Actor::default();
        let b = Actor::default();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_intersect_same_position_distinct_actors() {
        let a = Actor::new(Vector::new(1.0, 1.0), Vector::ONE, Vector::ZERO);
        let b = Actor::new(Vector::new(1.0, 1.0), Vector::ONE, Vector::ZERO);
        assert!(a.is_intersect(&b));
        assert!(b.is_intersect(&a));
    }

    #[test]
    fn test_edge_touching_does_not_intersect() {
        let a = Actor::new(Vector::new(0.0, 0.0), Vector::ONE, Vector::ZERO);
        let right = Actor::new(Vector::new(1.0, 0.0), Vector::ONE, Vector::ZERO);
        let below = Actor::new(Vector::new(0.0, 1.0), Vector::ONE, Vector::ZERO);
        assert!(!a.is_intersect(&right));
        assert!(!a.is_intersect(&below));
    }

    #[test]
    fn test_partial_and_contained_overlap() {
        let a = Actor::new(Vector::new(0.0, 0.0), Vector::new(2.0, 2.0), Vector::ZERO);
        let partial = Actor::new(Vector::new(1.5, 1.5), Vector::ONE, Vector::ZERO);
        let inside = Actor::new(Vector::new(0.5, 0.5), Vector::new(0.5, 0.5), Vector::ZERO);
        let far = Actor::new(Vector::new(5.0, 5.0), Vector::ONE, Vector::ZERO);
        assert!(a.is_intersect(&partial));
        assert!(a.is_intersect(&inside));
        assert!(inside.is_intersect(&a));
        assert!(!a.is_intersect(&far));
    }

    #[test]
    fn test_variant_types_and_sizes() {
        let pos = Vector::new(3.0, 4.0);

        let player = Actor::player(pos);
        assert_eq!(player.actor_type(), ActorType::Player);
        assert_eq!(player.pos, Vector::new(3.0, 3.5));
        assert_eq!(player.size, Vector::new(0.8, 1.5));

        let coin = Actor::coin(pos, 0.0);
        assert_eq!(coin.actor_type(), ActorType::Coin);
        assert!((coin.pos.x - 3.2).abs() < 1e-5);
        assert!((coin.pos.y - 4.1).abs() < 1e-5);
        assert_eq!(coin.size, Vector::new(0.6, 0.6));

        let h = Actor::horizontal_fireball(pos);
        assert_eq!(h.actor_type(), ActorType::Fireball);
        assert_eq!(h.speed, Vector::new(2.0, 0.0));
        assert_eq!(h.size, Vector::ONE);

        let v = Actor::vertical_fireball(pos);
        assert_eq!(v.speed, Vector::new(0.0, 2.0));

        let rain = Actor::fire_rain(pos);
        assert_eq!(rain.actor_type(), ActorType::Fireball);
        assert_eq!(rain.speed, Vector::new(0.0, 3.0));
        assert_eq!(rain.kind, ActorKind::FireRain { origin: pos });
    }

    #[test]
    fn test_random_coin_phase_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..64 {
            let coin = Actor::random_coin(Vector::ZERO, &mut rng);
            let ActorKind::Coin { spring, .. } = coin.kind else {
                panic!("expected a coin");
            };
            assert!((0.0..std::f32::consts::TAU).contains(&spring));
        }
    }

    #[test]
    fn test_fireball_moves_when_free() {
        let level = open_level(10, 10);
        let mut ball = Actor::fireball(Vector::new(5.0, 5.0), Vector::new(1.0, 0.0));
        ball.act(1.0, &level);
        assert_eq!(ball.pos, Vector::new(6.0, 5.0));
        assert_eq!(ball.speed, Vector::new(1.0, 0.0));

        ball.act(0.5, &level);
        assert_eq!(ball.pos, Vector::new(6.5, 5.0));
    }

    #[test]
    fn test_fireball_bounces_off_wall() {
        let mut grid = vec![vec![None; 10]; 10];
        grid[5][7] = Some(Obstacle::Wall);
        let level = Level::new(grid, Vec::new());

        let mut ball = Actor::fireball(Vector::new(5.0, 5.0), Vector::new(2.0, 0.0));
        ball.act(1.0, &level);
        assert_eq!(ball.pos, Vector::new(5.0, 5.0));
        assert_eq!(ball.speed, Vector::new(-2.0, 0.0));
    }

    #[test]
    fn test_fireball_bounces_off_level_edge() {
        let level = open_level(3, 3);
        let mut ball = Actor::vertical_fireball(Vector::new(1.0, 2.0));
        ball.act(1.0, &level);
        // Falling past the bottom counts as lava, still an obstruction
        assert_eq!(ball.pos, Vector::new(1.0, 2.0));
        assert_eq!(ball.speed, Vector::new(0.0, -2.0));
    }

    #[test]
    fn test_fire_rain_resets_to_origin() {
        let mut grid = vec![vec![None; 5]; 5];
        grid[4][2] = Some(Obstacle::Lava);
        let level = Level::new(grid, Vec::new());

        let origin = Vector::new(2.0, 0.0);
        let mut rain = Actor::fire_rain(origin);
        rain.act(1.0, &level);
        assert_eq!(rain.pos, Vector::new(2.0, 3.0));

        rain.act(1.0, &level);
        assert_eq!(rain.pos, origin);
        assert_eq!(rain.speed, Vector::new(0.0, 3.0));
    }

    #[test]
    fn test_coin_bobs_around_start() {
        let level = open_level(4, 4);
        let mut coin = Actor::coin(Vector::new(1.0, 1.0), 0.0);
        let ActorKind::Coin { start, .. } = coin.kind else {
            panic!("expected a coin");
        };

        coin.act(0.1, &level);
        let ActorKind::Coin { spring, .. } = coin.kind else {
            panic!("expected a coin");
        };
        assert!((spring - 0.8).abs() < 1e-5);
        assert_eq!(coin.pos.x, start.x);
        let expected_y = start.y + 0.8f32.sin() * COIN_SPRING_DIST;
        assert!((coin.pos.y - expected_y).abs() < 1e-5);

        for _ in 0..100 {
            coin.act(0.05, &level);
            assert!((coin.pos.y - start.y).abs() <= COIN_SPRING_DIST + 1e-5);
        }
    }

    #[test]
    fn test_coin_phase_stays_wrapped() {
        let level = open_level(4, 4);
        let mut coin = Actor::coin(Vector::new(1.0, 1.0), 6.0);
        for _ in 0..10_000 {
            coin.act(0.5, &level);
            let ActorKind::Coin { spring, .. } = coin.kind else {
                panic!("expected a coin");
            };
            assert!((0.0..std::f32::consts::TAU).contains(&spring));
        }
    }

    #[test]
    fn test_player_and_plain_actor_stay_put() {
        let level = open_level(4, 4);
        let mut player = Actor::player(Vector::new(1.0, 2.0));
        let before = player;
        player.act(1.0, &level);
        assert_eq!(player, before);

        let mut plain = Actor::new(Vector::ZERO, Vector::ONE, Vector::new(1.0, 1.0));
        plain.act(1.0, &level);
        assert_eq!(plain.pos, Vector::ZERO);
    }

    proptest! {
        #[test]
        fn never_intersects_itself(
            x in -50f32..50.0, y in -50f32..50.0,
            w in 0f32..10.0, h in 0f32..10.0,
        ) {
            let a = Actor::new(Vector::new(x, y), Vector::new(w, h), Vector::ZERO);
            prop_assert!(!a.is_intersect(&a));
        }

        #[test]
        fn intersection_is_symmetric(
            ax in -10f32..10.0, ay in -10f32..10.0,
            bx in -10f32..10.0, by in -10f32..10.0,
        ) {
            let a = Actor::new(Vector::new(ax, ay), Vector::new(2.0, 1.0), Vector::ZERO);
            let b = Actor::new(Vector::new(bx, by), Vector::new(1.0, 3.0), Vector::ZERO);
            prop_assert_eq!(a.is_intersect(&b), b.is_intersect(&a));
        }
    }
}
