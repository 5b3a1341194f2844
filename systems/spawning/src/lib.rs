#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawn point lifecycle system responsible for emitting enemy spawn commands.

use std::{f32::consts::TAU, time::Duration};

use arena_shooter_core::{Command, Event, GameConfig, GameStatus, SpawnPointSnapshot};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    min_interval: Duration,
    max_interval: Duration,
    min_offset: f32,
    max_offset: f32,
    enemy_cap: usize,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration from the game tunables and an RNG seed.
    #[must_use]
    pub fn new(game: &GameConfig, rng_seed: u64) -> Self {
        Self {
            min_interval: Duration::from_millis(game.spawn.min_interval_ms),
            max_interval: Duration::from_millis(game.spawn.max_interval_ms),
            min_offset: game.spawn.min_offset,
            max_offset: game.spawn.max_offset,
            enemy_cap: game.enemy.max_alive,
            rng_seed,
        }
    }
}

/// Pure system that emits one enemy per due spawn point while the run is live.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            config,
        }
    }

    /// Consumes the tick's events and immutable views to emit spawn commands.
    ///
    /// A spawn point is due once the clock is strictly past its schedule.
    /// Destroyed spawn points and a full enemy roster emit nothing.
    pub fn handle(
        &mut self,
        events: &[Event],
        status: GameStatus,
        now: Duration,
        spawn_points: &[SpawnPointSnapshot],
        enemies_alive: usize,
        out: &mut Vec<Command>,
    ) {
        if status != GameStatus::Running {
            return;
        }
        let ticked = events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }));
        if !ticked {
            return;
        }

        let mut alive = enemies_alive;
        for spawn in spawn_points {
            if !spawn.is_active() || now <= spawn.next_spawn_at {
                continue;
            }
            if alive >= self.config.enemy_cap {
                break;
            }

            let offset = self.next_offset();
            let next_spawn_at = now.saturating_add(self.next_interval());
            out.push(Command::SpawnEnemy {
                spawn_point: spawn.id,
                offset,
                next_spawn_at,
            });
            alive += 1;
        }
    }

    fn next_offset(&mut self) -> Vec2 {
        let angle = self.rng.gen_range(0.0..TAU);
        let distance = sample(&mut self.rng, self.config.min_offset, self.config.max_offset);
        Vec2::new(angle.cos(), angle.sin()) * distance
    }

    fn next_interval(&mut self) -> Duration {
        let (low, high) = (self.config.min_interval, self.config.max_interval);
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }
}

fn sample(rng: &mut ChaCha8Rng, low: f32, high: f32) -> f32 {
    if low < high && (high - low).is_finite() {
        rng.gen_range(low..high)
    } else {
        low
    }
}
