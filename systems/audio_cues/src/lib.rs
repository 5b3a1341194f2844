#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure audio system that maps world events onto fire-and-forget sound cues.

use std::{collections::HashMap, time::Duration};

use arena_shooter_core::{EnemyId, Event, SoundCue};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const FOOTSTEP_INTERVAL: Duration = Duration::from_millis(500);
const GROWL_QUIET_PERIOD: Duration = Duration::from_millis(8_000);
const GROWL_QUIET_JITTER_MS: u64 = 5_000;
const GROWL_CHANCE: f64 = 0.1;

/// Pure system that throttles and emits sound cues.
#[derive(Debug)]
pub struct AudioCues {
    rng: ChaCha8Rng,
    now: Duration,
    last_footstep: Option<Duration>,
    last_growl: HashMap<EnemyId, Duration>,
}

impl AudioCues {
    /// Creates an audio system whose random growls are driven by `rng_seed`.
    #[must_use]
    pub fn new(rng_seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(rng_seed),
            now: Duration::ZERO,
            last_footstep: None,
            last_growl: HashMap::new(),
        }
    }

    /// Number of enemies whose growl throttle is being tracked.
    #[must_use]
    pub fn tracked_enemies(&self) -> usize {
        self.last_growl.len()
    }

    /// Consumes world events in order and emits the cues they trigger.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<SoundCue>) {
        for event in events {
            match event {
                Event::LevelLoaded { .. } => {
                    self.now = Duration::ZERO;
                    self.last_footstep = None;
                    self.last_growl.clear();
                }
                Event::TimeAdvanced { now, .. } => self.now = *now,
                Event::PlayerWalked => {
                    let due = self
                        .last_footstep
                        .map_or(true, |last| self.now > last + FOOTSTEP_INTERVAL);
                    if due {
                        self.last_footstep = Some(self.now);
                        out.push(SoundCue::Footstep);
                    }
                }
                Event::PlayerFired { .. } => out.push(SoundCue::Shoot),
                Event::EnemySpawned { .. } => out.push(SoundCue::Growl),
                Event::EnemyEngaging { enemy } => {
                    if self.growl_due(*enemy) && self.rng.gen_bool(GROWL_CHANCE) {
                        let _ = self.last_growl.insert(*enemy, self.now);
                        out.push(SoundCue::Growl);
                    }
                }
                Event::EnemyHit { .. } => out.push(SoundCue::Hit),
                Event::EnemyKilled { enemy } => {
                    let _ = self.last_growl.remove(enemy);
                    out.push(SoundCue::Death);
                }
                Event::PlayerDamaged { .. } => out.push(SoundCue::PlayerHit),
                Event::SpawnPointDestroyed { .. } => out.push(SoundCue::SpawnDestroyed),
                Event::StatusChanged { .. }
                | Event::EnemyFired { .. }
                | Event::SpawnPointDamaged { .. }
                | Event::ScoreChanged { .. }
                | Event::BulletRemoved { .. } => {}
            }
        }
    }

    fn growl_due(&mut self, enemy: EnemyId) -> bool {
        let Some(last) = self.last_growl.get(&enemy).copied() else {
            return true;
        };
        let jitter = Duration::from_millis(self.rng.gen_range(0..GROWL_QUIET_JITTER_MS));
        self.now > last + GROWL_QUIET_PERIOD + jitter
    }
}
