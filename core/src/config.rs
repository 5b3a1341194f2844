//! Tunable parameters for generation and simulation.
//!
//! Every section carries a [`Default`] matching the shipped gameplay balance, and
//! every field deserialises with `#[serde(default)]` so a TOML file only needs to
//! name the values it overrides.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::GridTransform;

/// Smallest grid that leaves room for the interior generation margins.
pub const MIN_GRID_SIZE: u32 = 16;

/// Aggregated tuning knobs for a single run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid and geometry dimensions.
    pub level: LevelConfig,
    /// Player movement, health and camera parameters.
    pub player: PlayerConfig,
    /// Enemy health, movement and firing parameters.
    pub enemy: EnemyConfig,
    /// Player weapon parameters.
    pub weapon: WeaponConfig,
    /// Spawn point structure parameters.
    pub spawn: SpawnConfig,
    /// Hit radii used by projectile collision tests.
    pub collision: CollisionConfig,
}

impl GameConfig {
    /// Parses a configuration from TOML text and validates it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a level that can be generated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::Invalid {
                field: "level.grid_size",
                reason: format!(
                    "must be at least {MIN_GRID_SIZE} (received {})",
                    self.level.grid_size
                ),
            });
        }
        positive("level.cell_size", self.level.cell_size)?;
        for (field, value) in self.float_tunables() {
            non_negative(field, value)?;
        }
        if self.player.idle_damping > 1.0 {
            return Err(ConfigError::Invalid {
                field: "player.idle_damping",
                reason: format!("must not exceed 1 (received {})", self.player.idle_damping),
            });
        }
        if self.spawn.max_health == 0 {
            return Err(ConfigError::Invalid {
                field: "spawn.max_health",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.spawn.min_offset > self.spawn.max_offset {
            return Err(ConfigError::Invalid {
                field: "spawn.min_offset",
                reason: "must not exceed spawn.max_offset".to_owned(),
            });
        }
        if self.enemy.max_alive == 0 {
            return Err(ConfigError::Invalid {
                field: "enemy.max_alive",
                reason: "must allow at least one enemy".to_owned(),
            });
        }
        if self.spawn.min_interval_ms > self.spawn.max_interval_ms {
            return Err(ConfigError::Invalid {
                field: "spawn.min_interval_ms",
                reason: "must not exceed spawn.max_interval_ms".to_owned(),
            });
        }
        Ok(())
    }

    fn float_tunables(&self) -> [(&'static str, f32); 24] {
        [
            ("level.wall_height", self.level.wall_height),
            ("level.ceiling_height", self.level.ceiling_height),
            ("player.move_speed", self.player.move_speed),
            ("player.turn_rate", self.player.turn_rate),
            ("player.gravity", self.player.gravity),
            ("player.jump_impulse", self.player.jump_impulse),
            ("player.radius", self.player.radius),
            ("player.idle_damping", self.player.idle_damping),
            ("player.ground_height", self.player.ground_height),
            ("player.camera_offset", self.player.camera_offset),
            ("player.look_sensitivity", self.player.look_sensitivity),
            ("enemy.speed", self.enemy.speed),
            ("enemy.radius", self.enemy.radius),
            ("enemy.stop_distance", self.enemy.stop_distance),
            ("enemy.engage_range", self.enemy.engage_range),
            ("enemy.bullet_speed", self.enemy.bullet_speed),
            ("enemy.muzzle_height", self.enemy.muzzle_height),
            ("weapon.bullet_speed", self.weapon.bullet_speed),
            ("spawn.min_offset", self.spawn.min_offset),
            ("spawn.max_offset", self.spawn.max_offset),
            ("collision.bullet_enemy_radius", self.collision.bullet_enemy_radius),
            ("collision.bullet_spawn_radius", self.collision.bullet_spawn_radius),
            ("collision.bullet_player_radius", self.collision.bullet_player_radius),
            ("collision.bullet_wall_radius", self.collision.bullet_wall_radius),
        ]
    }

    /// Grid transform implied by the level section.
    #[must_use]
    pub fn transform(&self) -> GridTransform {
        GridTransform::new(self.level.grid_size, self.level.cell_size)
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number (received {value})"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a finite, non-negative number (received {value})"),
        })
    }
}

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value parsed correctly but is outside its permitted range.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Human readable explanation.
        reason: String,
    },
}

/// Grid and geometry dimensions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Number of cells along each grid edge.
    pub grid_size: u32,
    /// Side length of a cell in world units.
    pub cell_size: f32,
    /// Height of wall boxes.
    pub wall_height: f32,
    /// Height of the ceiling plane.
    pub ceiling_height: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            grid_size: 50,
            cell_size: 2.0,
            wall_height: 4.0,
            ceiling_height: 4.0,
        }
    }
}

/// Player movement, health and camera parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Health at the start of a run.
    pub max_health: u32,
    /// Horizontal speed while a movement key is held.
    pub move_speed: f32,
    /// Yaw change per second while a turn key is held, in radians.
    pub turn_rate: f32,
    /// Downward acceleration applied every tick.
    pub gravity: f32,
    /// Vertical velocity added by a jump.
    pub jump_impulse: f32,
    /// Collision radius against wall boxes.
    pub radius: f32,
    /// Horizontal velocity multiplier applied on idle ticks.
    pub idle_damping: f32,
    /// Height of the player origin above the floor.
    pub ground_height: f32,
    /// Vertical offset of the camera above the player origin.
    pub camera_offset: f32,
    /// Radians of rotation per pointer pixel.
    pub look_sensitivity: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            move_speed: 10.0,
            turn_rate: 2.0,
            gravity: 30.0,
            jump_impulse: 10.0,
            radius: 0.5,
            idle_damping: 0.9,
            ground_height: 0.8,
            camera_offset: 0.8,
            look_sensitivity: 0.002,
        }
    }
}

/// Enemy health, movement and firing parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Health of a freshly spawned enemy.
    pub max_health: u32,
    /// Movement speed toward the player.
    pub speed: f32,
    /// Collision radius against wall boxes.
    pub radius: f32,
    /// Enemies stop advancing once this close to the player.
    pub stop_distance: f32,
    /// Enemies consider firing only within this distance.
    pub engage_range: f32,
    /// Minimum delay between shots from one enemy, in milliseconds.
    pub fire_cooldown_ms: u64,
    /// Speed of enemy projectiles.
    pub bullet_speed: f32,
    /// Lifetime of enemy projectiles, in ticks.
    pub bullet_lifetime: u32,
    /// Height above the enemy origin at which projectiles appear.
    pub muzzle_height: f32,
    /// Player health removed by one enemy projectile.
    pub damage: u32,
    /// Score awarded when an enemy is destroyed.
    pub score: u32,
    /// Maximum number of enemies alive at once.
    pub max_alive: usize,
}

impl EnemyConfig {
    /// Fire cooldown expressed as a duration.
    #[must_use]
    pub const fn fire_cooldown(&self) -> Duration {
        Duration::from_millis(self.fire_cooldown_ms)
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: 3,
            speed: 5.0,
            radius: 0.5,
            stop_distance: 3.0,
            engage_range: 20.0,
            fire_cooldown_ms: 2_000,
            bullet_speed: 20.0,
            bullet_lifetime: 150,
            muzzle_height: 1.0,
            damage: 10,
            score: 100,
            max_alive: 30,
        }
    }
}

/// Player weapon parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Minimum delay between player shots, in milliseconds.
    pub cooldown_ms: u64,
    /// Speed of player projectiles.
    pub bullet_speed: f32,
    /// Lifetime of player projectiles, in ticks.
    pub bullet_lifetime: u32,
}

impl WeaponConfig {
    /// Fire cooldown expressed as a duration.
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 200,
            bullet_speed: 50.0,
            bullet_lifetime: 100,
        }
    }
}

/// Spawn point structure parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Health of a spawn point at level start.
    pub max_health: u32,
    /// Score awarded when a spawn point is destroyed.
    pub score: u32,
    /// Delay before a spawn point first emits an enemy, in milliseconds.
    pub first_emission_ms: u64,
    /// Lower bound of the emission interval, in milliseconds.
    pub min_interval_ms: u64,
    /// Upper bound of the emission interval, in milliseconds.
    pub max_interval_ms: u64,
    /// Smallest distance from the structure at which enemies appear.
    pub min_offset: f32,
    /// Largest distance from the structure at which enemies appear.
    pub max_offset: f32,
}

impl SpawnConfig {
    /// Delay before the first emission expressed as a duration.
    #[must_use]
    pub const fn first_emission(&self) -> Duration {
        Duration::from_millis(self.first_emission_ms)
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            max_health: 10,
            score: 500,
            first_emission_ms: 2_000,
            min_interval_ms: 3_000,
            max_interval_ms: 5_000,
            min_offset: 3.0,
            max_offset: 5.0,
        }
    }
}

/// Hit radii used by projectile collision tests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Player projectile versus enemy.
    pub bullet_enemy_radius: f32,
    /// Player projectile versus spawn point.
    pub bullet_spawn_radius: f32,
    /// Enemy projectile versus player.
    pub bullet_player_radius: f32,
    /// Any projectile versus a wall centre.
    pub bullet_wall_radius: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            bullet_enemy_radius: 1.5,
            bullet_spawn_radius: 2.5,
            bullet_player_radius: 1.0,
            bullet_wall_radius: 1.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            [level]
            grid_size = 40

            [enemy]
            max_alive = 12
            "#,
        )
        .expect("partial configuration should parse");

        assert_eq!(config.level.grid_size, 40);
        assert!((config.level.cell_size - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.enemy.max_alive, 12);
        assert_eq!(config.enemy.max_health, 3);
        assert_eq!(config.weapon, WeaponConfig::default());
    }

    #[test]
    fn tiny_grids_are_rejected() {
        let error = GameConfig::from_toml_str("[level]\ngrid_size = 8\n")
            .expect_err("grid below the minimum must be rejected");
        assert!(matches!(
            error,
            ConfigError::Invalid {
                field: "level.grid_size",
                ..
            }
        ));
    }

    #[test]
    fn malformed_toml_reports_a_parse_error() {
        let error = GameConfig::from_toml_str("[level\n").expect_err("malformed toml");
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn nan_spawn_offsets_are_rejected() {
        let error = GameConfig::from_toml_str("[spawn]\nmin_offset = nan\nmax_offset = nan\n")
            .expect_err("nan offsets must be rejected");
        assert!(matches!(
            error,
            ConfigError::Invalid {
                field: "spawn.min_offset",
                ..
            }
        ));
    }

    #[test]
    fn inverted_or_infinite_spawn_offsets_are_rejected() {
        let mut config = GameConfig::default();
        config.spawn.min_offset = 6.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.spawn.max_offset = f32::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_finite_or_negative_tunables_are_rejected() {
        let error = GameConfig::from_toml_str("[enemy]\nspeed = -1.0\n")
            .expect_err("negative speed must be rejected");
        assert!(matches!(
            error,
            ConfigError::Invalid {
                field: "enemy.speed",
                ..
            }
        ));

        let mut config = GameConfig::default();
        config.collision.bullet_wall_radius = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.level.cell_size = 0.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.spawn.max_health = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn defaults_validate() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_spawn_interval_is_rejected() {
        let mut config = GameConfig::default();
        config.spawn.min_interval_ms = 6_000;
        assert!(config.validate().is_err());
    }
}
