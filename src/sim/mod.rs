//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (actor parse order)
//! - No rendering, input or platform dependencies

pub mod actor;
pub mod level;
pub mod parser;
pub mod tick;
pub mod vector;

pub use actor::{Actor, ActorId, ActorKind, ActorType};
pub use level::{Grid, Level, Obstacle, Status, Touched};
pub use parser::{ActorFactory, LevelParser, default_actors};
pub use tick::{GameOutcome, advance, run_game, run_level, tick};
pub use vector::Vector;
