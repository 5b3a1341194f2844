#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the arena shooter engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use glam::{Vec2, Vec3};

mod config;
mod geometry;
mod grid;
mod seed;

pub use config::{
    CollisionConfig, ConfigError, EnemyConfig, GameConfig, LevelConfig, PlayerConfig, SpawnConfig,
    WeaponConfig, MIN_GRID_SIZE,
};
pub use geometry::{GridTransform, LevelGeometry, WallBox};
pub use grid::{CellCoord, CellKind, LevelGrid};
pub use seed::{LevelSeed, SeedLabel, SEED_SPACE};

/// Lifecycle of a single run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Level loaded, waiting for the player to start.
    #[default]
    Menu,
    /// Simulation ticks are processed.
    Running,
    /// The player ran out of health.
    GameOver,
    /// Every spawn point and enemy was destroyed.
    Victory,
}

impl GameStatus {
    /// Reports whether the run has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the world contents with a freshly generated level.
    LoadLevel {
        /// Collidable geometry produced by level generation.
        geometry: LevelGeometry,
    },
    /// Transitions a loaded level from the menu into the running state.
    StartRun,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Replaces the held movement keys.
    SetMovement {
        /// Keys currently held by the player.
        input: MovementInput,
    },
    /// Rotates the view by pointer-derived deltas.
    Look {
        /// Change of yaw in radians.
        yaw_delta: f32,
        /// Change of pitch in radians.
        pitch_delta: f32,
    },
    /// Requests a jump if the player stands on the ground.
    Jump,
    /// Requests a shot from the player's weapon.
    FireWeapon,
    /// Requests that a spawn point emit a new enemy.
    SpawnEnemy {
        /// Spawn point responsible for the enemy.
        spawn_point: SpawnPointId,
        /// Offset from the spawn point on the XZ plane.
        offset: Vec2,
        /// Instant at which the spawn point may emit again.
        next_spawn_at: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a level replaced the world contents.
    LevelLoaded {
        /// Number of collidable wall boxes.
        walls: usize,
        /// Number of spawn point structures.
        spawn_points: usize,
    },
    /// Announces a transition of the run lifecycle.
    StatusChanged {
        /// Status that became active.
        status: GameStatus,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
        /// Simulation clock after the tick.
        now: Duration,
    },
    /// The player held a movement key during the tick.
    PlayerWalked,
    /// The player's weapon produced a projectile.
    PlayerFired {
        /// Identifier of the new projectile.
        bullet: BulletId,
    },
    /// A spawn point emitted an enemy.
    EnemySpawned {
        /// Identifier of the new enemy.
        enemy: EnemyId,
        /// Spawn point that emitted the enemy.
        spawn_point: SpawnPointId,
        /// Initial enemy position.
        position: Vec3,
    },
    /// An enemy is within engagement range of the player.
    EnemyEngaging {
        /// Identifier of the engaging enemy.
        enemy: EnemyId,
    },
    /// An enemy fired at the player.
    EnemyFired {
        /// Identifier of the shooter.
        enemy: EnemyId,
        /// Identifier of the new projectile.
        bullet: BulletId,
    },
    /// A player projectile struck an enemy.
    EnemyHit {
        /// Identifier of the enemy.
        enemy: EnemyId,
        /// Health left after the hit.
        remaining_health: u32,
    },
    /// An enemy ran out of health and was removed.
    EnemyKilled {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
    },
    /// A player projectile struck a spawn point.
    SpawnPointDamaged {
        /// Identifier of the spawn point.
        spawn_point: SpawnPointId,
        /// Health left after the hit.
        remaining_health: u32,
        /// Emissive intensity of the structure core after the hit.
        core_intensity: f32,
    },
    /// A spawn point ran out of health and stopped emitting enemies.
    SpawnPointDestroyed {
        /// Identifier of the destroyed spawn point.
        spawn_point: SpawnPointId,
    },
    /// An enemy projectile struck the player.
    PlayerDamaged {
        /// Health left after the hit.
        remaining_health: u32,
    },
    /// The score changed.
    ScoreChanged {
        /// Score after the change.
        score: u32,
    },
    /// A projectile left the world.
    BulletRemoved {
        /// Identifier of the projectile.
        bullet: BulletId,
        /// Side that fired the projectile.
        owner: BulletOwner,
        /// Why the projectile was removed.
        reason: BulletRemoval,
    },
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a spawn point structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpawnPointId(u32);

impl SpawnPointId {
    /// Creates a new spawn point identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletId(u32);

impl BulletId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Side that fired a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BulletOwner {
    /// Fired by the player; damages enemies and spawn points.
    Player,
    /// Fired by an enemy; damages the player.
    Enemy,
}

/// Reasons a projectile leaves the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BulletRemoval {
    /// Its tick budget ran out.
    Expired,
    /// It came within range of a wall centre.
    HitWall,
    /// It struck an entity.
    HitEntity,
}

/// Movement keys held by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MovementInput {
    /// Move along the facing direction.
    pub forward: bool,
    /// Move against the facing direction.
    pub backward: bool,
    /// Rotate counter-clockwise.
    pub turn_left: bool,
    /// Rotate clockwise.
    pub turn_right: bool,
}

impl MovementInput {
    /// Reports whether any key is held.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.forward || self.backward || self.turn_left || self.turn_right
    }
}

/// Keys understood by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move forward.
    Forward,
    /// Move backward.
    Backward,
    /// Turn left.
    TurnLeft,
    /// Turn right.
    TurnRight,
    /// Jump.
    Jump,
}

impl Key {
    /// Maps a physical key code such as `KeyW` to a game key.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(Self::Forward),
            "KeyS" => Some(Self::Backward),
            "KeyA" => Some(Self::TurnLeft),
            "KeyD" => Some(Self::TurnRight),
            "Space" => Some(Self::Jump),
            _ => None,
        }
    }
}

/// Discrete input delivered by the platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown(Key),
    /// A key was released.
    KeyUp(Key),
    /// The pointer moved while captured.
    PointerMoved {
        /// Horizontal movement in pixels.
        dx: f32,
        /// Vertical movement in pixels.
        dy: f32,
    },
    /// The primary pointer button was clicked while captured.
    Click,
}

/// Fire-and-forget audio cues emitted at simulation transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// The player fired.
    Shoot,
    /// A player projectile struck an enemy.
    Hit,
    /// An enemy died.
    Death,
    /// An enemy growled.
    Growl,
    /// The player was struck.
    PlayerHit,
    /// A spawn point was destroyed.
    SpawnDestroyed,
    /// The player took a step.
    Footstep,
}

/// Emissive intensity of a spawn point core for the given health.
///
/// Follows `0.8 - 0.6 · (1 - health / max_health)`: `0.8` at full health,
/// falling linearly to `0.2` when the structure is destroyed.
#[must_use]
pub fn core_intensity(health: u32, max_health: u32) -> f32 {
    if max_health == 0 {
        return 0.2;
    }
    let fraction = health as f32 / max_health as f32;
    0.8 - 0.6 * (1.0 - fraction)
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Player origin.
    pub position: Vec3,
    /// Current velocity.
    pub velocity: Vec3,
    /// Rotation about the vertical axis, in radians.
    pub yaw: f32,
    /// Camera pitch, in radians.
    pub pitch: f32,
    /// Remaining health.
    pub health: u32,
    /// Whether the player stands on the ground and may jump.
    pub grounded: bool,
    /// Camera position derived from the player origin.
    pub camera: Vec3,
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Enemy body origin, held at the player's ground height.
    pub position: Vec3,
    /// Rotation about the vertical axis that faces the player.
    pub facing: f32,
    /// Remaining health.
    pub health: u32,
    /// Instant of the most recent shot.
    pub last_fired_at: Duration,
}

/// Immutable representation of a spawn point used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPointSnapshot {
    /// Unique identifier assigned to the spawn point.
    pub id: SpawnPointId,
    /// Structure origin on the floor.
    pub position: Vec3,
    /// Remaining health; zero once destroyed.
    pub health: u32,
    /// Emissive intensity of the structure core.
    pub core_intensity: f32,
    /// Instant after which the spawn point may emit again.
    pub next_spawn_at: Duration,
    /// Number of enemies emitted so far.
    pub enemies_spawned: u32,
}

impl SpawnPointSnapshot {
    /// Reports whether the structure still stands.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.health > 0
    }
}

/// Immutable representation of a projectile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletSnapshot {
    /// Unique identifier assigned to the projectile.
    pub id: BulletId,
    /// Side that fired the projectile.
    pub owner: BulletOwner,
    /// Current position.
    pub position: Vec3,
    /// Current velocity.
    pub velocity: Vec3,
    /// Remaining ticks before expiry.
    pub lifetime: u32,
}

/// Read-only values shown on the heads-up display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudSnapshot {
    /// Remaining player health.
    pub health: u32,
    /// Accumulated score.
    pub score: u32,
    /// Spawn points destroyed so far.
    pub spawn_points_destroyed: usize,
    /// Spawn points placed in the level.
    pub spawn_points_total: usize,
    /// Enemies currently alive.
    pub enemies_alive: usize,
    /// Run lifecycle status.
    pub status: GameStatus,
}

impl HudSnapshot {
    /// Status line summarising spawn point and enemy counts.
    #[must_use]
    pub fn spawn_status(&self) -> String {
        format!(
            "Spawn Points: {}/{} destroyed | Enemies: {}",
            self.spawn_points_destroyed, self.spawn_points_total, self.enemies_alive
        )
    }
}
