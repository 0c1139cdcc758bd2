//! Level plan parsing
//!
//! A plan is an ordered list of rows. Obstacle symbols are fixed (`x` wall,
//! `!` lava); actor symbols come from a caller-supplied dictionary.

use std::collections::HashMap;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::Actor;
use super::level::{Grid, Level, Obstacle};
use super::vector::Vector;
use crate::consts::DEFAULT_SEED;

/// Builds an actor for a plan cell at the given position
pub type ActorFactory = fn(Vector, &mut Pcg32) -> Actor;

/// Dictionary used by the stock levels
pub fn default_actors() -> HashMap<char, ActorFactory> {
    let mut dictionary: HashMap<char, ActorFactory> = HashMap::new();
    dictionary.insert('@', |pos, _| Actor::player(pos));
    dictionary.insert('o', |pos, rng| Actor::random_coin(pos, rng));
    dictionary.insert('=', |pos, _| Actor::horizontal_fireball(pos));
    dictionary.insert('|', |pos, _| Actor::vertical_fireball(pos));
    dictionary.insert('v', |pos, _| Actor::fire_rain(pos));
    dictionary
}

/// Turns plans into levels
#[derive(Debug, Clone)]
pub struct LevelParser {
    dictionary: HashMap<char, ActorFactory>,
    seed: u64,
}

impl LevelParser {
    pub fn new(dictionary: &HashMap<char, ActorFactory>) -> Self {
        Self {
            dictionary: dictionary.clone(),
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_default_actors() -> Self {
        Self::new(&default_actors())
    }

    /// Seed for per-actor randomness (coin spring phases)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn actor_from_symbol(&self, symbol: char) -> Option<ActorFactory> {
        self.dictionary.get(&symbol).copied()
    }

    pub fn obstacle_from_symbol(&self, symbol: char) -> Option<Obstacle> {
        match symbol {
            'x' => Some(Obstacle::Wall),
            '!' => Some(Obstacle::Lava),
            _ => None,
        }
    }

    pub fn create_grid<S: AsRef<str>>(&self, plan: &[S]) -> Grid {
        plan.iter()
            .map(|row| {
                row.as_ref()
                    .chars()
                    .map(|symbol| self.obstacle_from_symbol(symbol))
                    .collect()
            })
            .collect()
    }

    /// Actors in row-major plan order. Symbols without a factory are skipped.
    pub fn create_actors<S: AsRef<str>>(&self, plan: &[S]) -> Vec<Actor> {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        let mut actors = Vec::new();
        for (y, row) in plan.iter().enumerate() {
            for (x, symbol) in row.as_ref().chars().enumerate() {
                if let Some(factory) = self.actor_from_symbol(symbol) {
                    actors.push(factory(Vector::new(x as f32, y as f32), &mut rng));
                }
            }
        }
        actors
    }

    pub fn parse<S: AsRef<str>>(&self, plan: &[S]) -> Level {
        let level = Level::new(self.create_grid(plan), self.create_actors(plan));
        log::debug!(
            "Parsed level {}x{} with {} actors",
            level.width(),
            level.height(),
            level.actors().len()
        );
        level
    }
}
