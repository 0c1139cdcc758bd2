//! Tilejump - a tile-based platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vectors, actors, levels, plan parsing, tick driver)
//! - `plans`: Level plans as plain JSON data
//! - `settings`: Driver settings

pub mod plans;
pub mod settings;
pub mod sim;

pub use plans::{Plan, PlanError};
pub use settings::{Settings, SettingsError};

/// Simulation constants
pub mod consts {
    use crate::sim::Vector;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest slice `advance` feeds into a single tick
    pub const MAX_STEP: f32 = 0.05;

    /// Simulated seconds a decided level keeps running before it is finished
    pub const FINISH_DELAY: f32 = 1.0;
    /// One minute of simulated time per attempt
    pub const MAX_TICKS_PER_LEVEL: u32 = 60 * 60;
    pub const MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_SEED: u64 = 0x5eed_1e7e;

    /// Fireballs
    pub const FIREBALL_SIZE: Vector = Vector::new(1.0, 1.0);
    pub const HORIZONTAL_FIREBALL_SPEED: Vector = Vector::new(2.0, 0.0);
    pub const VERTICAL_FIREBALL_SPEED: Vector = Vector::new(0.0, 2.0);
    pub const FIRE_RAIN_SPEED: Vector = Vector::new(0.0, 3.0);

    /// Coins bob around a point inset from their plan cell
    pub const COIN_SIZE: Vector = Vector::new(0.6, 0.6);
    pub const COIN_OFFSET: Vector = Vector::new(0.2, 0.1);
    /// Spring phase advance (radians per second)
    pub const COIN_SPRING_SPEED: f32 = 8.0;
    /// Bobbing amplitude
    pub const COIN_SPRING_DIST: f32 = 0.07;

    /// Player is taller than a tile and stands half a tile up
    pub const PLAYER_SIZE: Vector = Vector::new(0.8, 1.5);
    pub const PLAYER_OFFSET: Vector = Vector::new(0.0, -0.5);
}
