#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless harness that wires the world and its systems into a tickable session.
//!
//! A [`Session`] owns the authoritative [`World`] together with every pure
//! system. Each tick forwards platform input through player control, advances
//! the world clock, lets the spawning system react to the new time and turns
//! the resulting events into sound cues.

mod autopilot;
mod run_flag;
mod scheduler;

use std::{mem, time::Duration};

use arena_shooter_core::{
    Command, Event, GameConfig, GameStatus, InputEvent, LevelGeometry, LevelSeed, SoundCue,
};
use arena_shooter_rendering::Scene;
use arena_shooter_system_audio_cues::AudioCues;
use arena_shooter_system_level_generation::{GeneratedLevel, LevelGenerator};
use arena_shooter_system_player_control::PlayerControl;
use arena_shooter_system_spawning::{Config as SpawningConfig, Spawning};
use arena_shooter_world::{self as world, query, World};
use tracing::{debug, info};

pub use autopilot::Autopilot;
pub use run_flag::RunFlag;
pub use scheduler::{FixedStepScheduler, SchedulerReport};

/// World plus systems, advanced one tick at a time.
#[derive(Debug)]
pub struct Session {
    world: World,
    generated: Option<GeneratedLevel>,
    player_control: PlayerControl,
    spawning: Spawning,
    audio: AudioCues,
    run_flag: RunFlag,
    last_events: Vec<Event>,
    cues: Vec<SoundCue>,
}

impl Session {
    /// Generates the level for `seed` and loads it into a fresh session.
    #[must_use]
    pub fn generate(config: GameConfig, seed: LevelSeed) -> Self {
        let level = LevelGenerator::new(&config).generate(seed);
        let geometry = level.geometry.clone();
        let mut session = Self::with_geometry(config, geometry, u64::from(seed.get()));
        session.generated = Some(level);
        session
    }

    /// Loads hand-built geometry into a fresh session.
    ///
    /// `rng_seed` drives enemy emission offsets and growl rolls.
    #[must_use]
    pub fn with_geometry(config: GameConfig, geometry: LevelGeometry, rng_seed: u64) -> Self {
        let player_control = PlayerControl::new(config.player.look_sensitivity);
        let spawning = Spawning::new(SpawningConfig::new(&config, rng_seed));
        let mut world = World::new(config);
        let mut events = Vec::new();
        world::apply(&mut world, Command::LoadLevel { geometry }, &mut events);

        let mut audio = AudioCues::new(rng_seed);
        let mut cues = Vec::new();
        audio.handle(&events, &mut cues);

        Self {
            world,
            generated: None,
            player_control,
            spawning,
            audio,
            run_flag: RunFlag::new(false),
            last_events: events,
            cues,
        }
    }

    /// Leaves the menu and raises the run flag.
    pub fn start(&mut self) {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::StartRun, &mut events);
        if query::status(&self.world) == GameStatus::Running {
            self.run_flag.start();
            info!(
                spawn_points = query::spawn_points(&self.world).len(),
                "session started"
            );
        }
        self.audio.handle(&events, &mut self.cues);
        self.last_events = events;
    }

    /// Advances the session by `dt`, returning `false` when the run flag was down.
    ///
    /// The flag is lowered automatically once the run reaches a terminal status.
    pub fn tick(&mut self, dt: Duration, inputs: &[InputEvent]) -> bool {
        if !self.run_flag.is_running() {
            return false;
        }

        let mut commands = Vec::new();
        self.player_control
            .handle(inputs, query::status(&self.world), &mut commands);
        commands.push(Command::Tick { dt });

        let mut events = Vec::new();
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, &mut events);
        }

        self.spawning.handle(
            &events,
            query::status(&self.world),
            query::now(&self.world),
            &query::spawn_points(&self.world),
            query::enemy_count(&self.world),
            &mut commands,
        );
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        self.audio.handle(&events, &mut self.cues);
        self.last_events = events;

        let status = query::status(&self.world);
        if status.is_terminal() {
            self.run_flag.stop();
            info!(?status, score = query::score(&self.world), "session finished");
        }
        true
    }

    /// Handle that stops the session when lowered.
    #[must_use]
    pub fn run_flag(&self) -> RunFlag {
        self.run_flag.clone()
    }

    /// Authoritative world, for read-only queries.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Generation report when the level was procedurally generated.
    #[must_use]
    pub const fn generated(&self) -> Option<&GeneratedLevel> {
        self.generated.as_ref()
    }

    /// Current run status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        query::status(&self.world)
    }

    /// Simulation clock.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        query::now(&self.world)
    }

    /// Events produced by the most recent tick or lifecycle call.
    #[must_use]
    pub fn last_events(&self) -> &[Event] {
        &self.last_events
    }

    /// Takes every sound cue emitted since the previous call.
    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        let cues = mem::take(&mut self.cues);
        if !cues.is_empty() {
            debug!(count = cues.len(), "sound cues drained");
        }
        cues
    }

    /// Captures the scene a renderer would draw for the current state.
    #[must_use]
    pub fn scene(&self) -> Scene {
        Scene::new(
            query::level(&self.world),
            query::player(&self.world),
            query::enemies(&self.world),
            query::spawn_points(&self.world),
            query::bullets(&self.world),
            query::hud(&self.world),
            query::now(&self.world),
        )
    }
}
