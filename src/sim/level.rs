//! Level state: terrain grid, live actors and the win/lose machine

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorType};
use super::vector::Vector;
use crate::consts::FINISH_DELAY;

/// Static terrain kind of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Obstacle {
    Wall,
    Lava,
}

impl Obstacle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Obstacle::Wall => "wall",
            Obstacle::Lava => "lava",
        }
    }
}

/// Terrain rows; rows may have different lengths
pub type Grid = Vec<Vec<Option<Obstacle>>>;

/// Terminal outcome of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Won,
    Lost,
}

/// What the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touched {
    Obstacle(Obstacle),
    Actor(ActorType),
}

impl From<Obstacle> for Touched {
    fn from(obstacle: Obstacle) -> Self {
        Touched::Obstacle(obstacle)
    }
}

impl From<ActorType> for Touched {
    fn from(actor_type: ActorType) -> Self {
        Touched::Actor(actor_type)
    }
}

/// A playable level
#[derive(Debug, Clone, Serialize)]
pub struct Level {
    grid: Grid,
    actors: Vec<Actor>,
    status: Option<Status>,
    finish_delay: f32,
    player: Option<ActorId>,
    height: usize,
    width: usize,
}

impl Default for Level {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl Level {
    pub fn new(grid: Grid, actors: Vec<Actor>) -> Self {
        let height = grid.len();
        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        let player = actors
            .iter()
            .find(|a| a.actor_type() == ActorType::Player)
            .map(Actor::id);

        Self {
            grid,
            actors,
            status: None,
            finish_delay: FINISH_DELAY,
            player,
            height,
            width,
        }
    }

    /// Override the post-game delay (seconds of simulated time)
    pub fn with_finish_delay(mut self, finish_delay: f32) -> Self {
        self.finish_delay = finish_delay;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn finish_delay(&self) -> f32 {
        self.finish_delay
    }

    /// The cached player, if it is still in the level
    pub fn player(&self) -> Option<&Actor> {
        self.player.and_then(|id| self.actor(id))
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id() == id)
    }

    /// True once the outcome is decided and the finish delay has run out
    pub fn is_finished(&self) -> bool {
        self.status.is_some() && self.finish_delay < 0.0
    }

    /// Step the post-game delay. Called by the driver, never by level logic.
    pub fn count_down(&mut self, dt: f32) {
        if self.status.is_some() {
            self.finish_delay -= dt;
        }
    }

    /// First actor in stored order overlapping `actor`
    pub fn actor_at(&self, actor: &Actor) -> Option<&Actor> {
        self.actors.iter().find(|other| other.is_intersect(actor))
    }

    /// Terrain under the rectangle at `pos` with `size`.
    ///
    /// Leaving the level sideways or through the top hits a wall, falling out
    /// of the bottom hits lava. Otherwise the first non-empty covered cell in
    /// row-major order wins.
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle> {
        let min = Vec2::from(pos).floor();
        let max = Vec2::from(pos.plus(size)).ceil();

        if min.x < 0.0 || max.x > self.width as f32 || min.y < 0.0 {
            return Some(Obstacle::Wall);
        }
        if max.y > self.height as f32 {
            return Some(Obstacle::Lava);
        }

        let (left, top) = (min.x as usize, min.y as usize);
        let (right, bottom) = (max.x as usize, max.y as usize);
        if right <= left || bottom <= top {
            return None;
        }
        for row in &self.grid[top..bottom] {
            for x in left..right {
                if let Some(obstacle) = row.get(x).copied().flatten() {
                    return Some(obstacle);
                }
            }
        }
        None
    }

    /// Add an externally spawned actor at the end of the actor order
    pub fn add_actor(&mut self, actor: Actor) {
        if self.player.is_none() && actor.actor_type() == ActorType::Player {
            self.player = Some(actor.id());
        }
        self.actors.push(actor);
    }

    /// Remove the actor with this id; no-op when absent
    pub fn remove_actor(&mut self, id: ActorId) {
        if let Some(index) = self.actors.iter().position(|a| a.id() == id) {
            let removed = self.actors.remove(index);
            log::debug!("Removed {} #{}", removed.actor_type().as_str(), id.get());
        }
    }

    pub fn no_more_actors(&self, actor_type: ActorType) -> bool {
        !self.actors.iter().any(|a| a.actor_type() == actor_type)
    }

    /// Resolve a player collision. The first terminal event wins; later
    /// touches are ignored.
    pub fn player_touched(&mut self, touched: Touched, actor: Option<&Actor>) {
        if self.status.is_some() {
            return;
        }

        match touched {
            Touched::Obstacle(Obstacle::Lava) | Touched::Actor(ActorType::Fireball) => {
                self.set_status(Status::Lost);
            }
            Touched::Actor(ActorType::Coin) => {
                if let Some(coin) = actor.filter(|a| a.actor_type() == ActorType::Coin) {
                    self.remove_actor(coin.id());
                    if self.no_more_actors(ActorType::Coin) {
                        self.set_status(Status::Won);
                    }
                }
            }
            _ => {}
        }
    }

    /// Replace the stored copy of an actor after it has acted
    pub(crate) fn update_actor(&mut self, actor: Actor) {
        if let Some(slot) = self.actors.iter_mut().find(|a| a.id() == actor.id()) {
            *slot = actor;
        }
    }

    fn set_status(&mut self, status: Status) {
        log::debug!("Level status: {:?}", status);
        self.status = Some(status);
    }
}
