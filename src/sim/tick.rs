//! Fixed timestep simulation driver
//!
//! Advances a level one step at a time: actors act in stored order, then the
//! player's contacts are resolved. Levels and whole games can be run headless.

use super::actor::{Actor, ActorId};
use super::level::{Level, Obstacle, Status};
use super::parser::LevelParser;
use crate::consts::MAX_STEP;
use crate::settings::Settings;

/// Advance the level by one step of `dt` seconds
pub fn tick(level: &mut Level, dt: f32) {
    // Ids are snapshotted so removals during the step don't disturb iteration
    let ids: Vec<ActorId> = level.actors().iter().map(Actor::id).collect();
    for id in ids {
        let Some(mut actor) = level.actor(id).copied() else {
            continue;
        };
        actor.act(dt, level);
        level.update_actor(actor);
    }

    if level.status().is_none() {
        resolve_player_contacts(level);
    }

    level.count_down(dt);
}

fn resolve_player_contacts(level: &mut Level) {
    let Some(player) = level.player().copied() else {
        return;
    };

    if level.obstacle_at(player.pos, player.size) == Some(Obstacle::Lava) {
        level.player_touched(Obstacle::Lava.into(), None);
    }

    if let Some(other) = level.actor_at(&player).copied() {
        log::trace!(
            "Player touched {} #{}",
            other.actor_type().as_str(),
            other.id().get()
        );
        level.player_touched(other.actor_type().into(), Some(&other));
    }
}

/// Advance by an arbitrary `elapsed` time, sliced into steps of at most
/// `max_step` seconds
///
/// A non-positive or NaN `max_step` advances nothing.
pub fn advance(level: &mut Level, elapsed: f32, max_step: f32) {
    if !(max_step > 0.0) {
        log::warn!("Ignoring advance with step {max_step}");
        return;
    }
    let mut remaining = elapsed;
    while remaining > 0.0 {
        let dt = remaining.min(max_step);
        tick(level, dt);
        remaining -= dt;
    }
}

/// Run a level until it finishes or `settings.max_ticks_per_level` is hit.
///
/// Returns the decided status, or `None` when the tick budget ran out first.
pub fn run_level(level: &mut Level, settings: &Settings) -> Option<Status> {
    for _ in 0..settings.max_ticks_per_level {
        if level.is_finished() {
            break;
        }
        advance(level, settings.step, MAX_STEP);
    }
    level.status()
}

/// Result of playing a sequence of plans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    /// Levels won before the game ended
    pub levels_won: usize,
    pub status: Status,
}

/// Play each plan in order. A level that is not won is replayed from scratch
/// until `settings.max_attempts` is used up, which loses the game.
pub fn run_game<S: AsRef<str>>(
    parser: &LevelParser,
    plans: &[Vec<S>],
    settings: &Settings,
) -> GameOutcome {
    for (index, plan) in plans.iter().enumerate() {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let mut level = parser
                .parse(plan.as_slice())
                .with_finish_delay(settings.finish_delay);
            log::info!(
                "Level {} attempt {}: {}x{}, {} actors",
                index + 1,
                attempt,
                level.width(),
                level.height(),
                level.actors().len()
            );

            match run_level(&mut level, settings) {
                Some(Status::Won) => {
                    log::info!("Level {} won", index + 1);
                    break;
                }
                outcome => {
                    log::info!("Level {} not won: {:?}", index + 1, outcome);
                    if attempt >= settings.max_attempts {
                        return GameOutcome {
                            levels_won: index,
                            status: Status::Lost,
                        };
                    }
                }
            }
        }
    }

    GameOutcome {
        levels_won: plans.len(),
        status: Status::Won,
    }
}
