#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for arena shooter adapters.

mod ascii;
mod minimap;

use std::time::Duration;

use anyhow::Result as AnyResult;
use arena_shooter_core::{
    BulletSnapshot, EnemySnapshot, HudSnapshot, InputEvent, LevelGeometry, PlayerSnapshot,
    SpawnPointId, SpawnPointSnapshot, WallBox,
};
use glam::{Vec2, Vec3};

pub use ascii::{render_level_map, render_minimap, AsciiBackend};
pub use minimap::{Blip, BlipKind, Minimap, MinimapView};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Magenta glow of an intact spawn point core.
    pub const SPAWN_CORE: Self = Self::from_rgb_u8(255, 0, 255);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the color with its RGB channels dimmed by `intensity`.
    #[must_use]
    pub fn scaled(self, intensity: f32) -> Self {
        let intensity = intensity.clamp(0.0, 1.0);
        Self {
            red: self.red * intensity,
            green: self.green * intensity,
            blue: self.blue * intensity,
            alpha: self.alpha,
        }
    }
}

/// Input gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Platform input observed since the previous frame, in arrival order.
    pub events: Vec<InputEvent>,
}

/// Camera placement for the first-person view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Eye position in world space.
    pub position: Vec3,
    /// Rotation about the vertical axis, in radians.
    pub yaw: f32,
    /// Rotation about the camera's horizontal axis, in radians.
    pub pitch: f32,
}

/// Spawn point structure as drawn by a backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPointPresentation {
    /// Identifier allocated to the spawn point by the world.
    pub id: SpawnPointId,
    /// Structure origin on the floor.
    pub position: Vec3,
    /// Emissive color of the core, dimming as the structure takes damage.
    pub core_color: Color,
    /// Whether the structure still stands.
    pub active: bool,
}

impl From<SpawnPointSnapshot> for SpawnPointPresentation {
    fn from(snapshot: SpawnPointSnapshot) -> Self {
        Self {
            id: snapshot.id,
            position: snapshot.position,
            core_color: Color::SPAWN_CORE.scaled(snapshot.core_intensity),
            active: snapshot.is_active(),
        }
    }
}

/// Scene description captured from world queries once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Collidable wall boxes.
    pub walls: Vec<WallBox>,
    /// Point light positions on the XZ plane.
    pub lamps: Vec<Vec2>,
    /// Side length of the floor and ceiling planes.
    pub floor_extent: f32,
    /// Height of the ceiling plane.
    pub ceiling_height: f32,
    /// First-person camera.
    pub camera: CameraPose,
    /// Player state backing the camera and the minimap centre.
    pub player: PlayerSnapshot,
    /// Living enemies.
    pub enemies: Vec<EnemySnapshot>,
    /// Every spawn point, destroyed ones included.
    pub spawn_points: Vec<SpawnPointPresentation>,
    /// Projectiles in flight.
    pub bullets: Vec<BulletSnapshot>,
    /// Heads-up display values.
    pub hud: HudSnapshot,
    /// Simulation clock.
    pub elapsed: Duration,
}

impl Scene {
    /// Creates a new scene descriptor from world snapshots.
    ///
    /// A missing level yields an empty, zero-sized arena.
    #[must_use]
    pub fn new(
        level: Option<&LevelGeometry>,
        player: PlayerSnapshot,
        enemies: Vec<EnemySnapshot>,
        spawn_points: Vec<SpawnPointSnapshot>,
        bullets: Vec<BulletSnapshot>,
        hud: HudSnapshot,
        elapsed: Duration,
    ) -> Self {
        let (walls, lamps, floor_extent, ceiling_height) = match level {
            Some(level) => (
                level.walls.clone(),
                level.lamps.clone(),
                level.floor_extent(),
                level.ceiling_height,
            ),
            None => (Vec::new(), Vec::new(), 0.0, 0.0),
        };
        Self {
            walls,
            lamps,
            floor_extent,
            ceiling_height,
            camera: CameraPose {
                position: player.camera,
                yaw: player.yaw,
                pitch: player.pitch,
            },
            player,
            enemies,
            spawn_points: spawn_points
                .into_iter()
                .map(SpawnPointPresentation::from)
                .collect(),
            bullets,
            hud,
            elapsed,
        }
    }

    /// Status line shown beneath the health and score counters.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!(
            "t={:.1}s health={} score={} | {}",
            self.elapsed.as_secs_f32(),
            self.hud.health,
            self.hud.score,
            self.hud.spawn_status()
        )
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window or printed banner.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting arena shooter scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and refreshes the scene before it is
    /// drawn. Backends stop once the scene reports a terminal status.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RenderingError {
    /// The minimap must cover a positive area.
    #[error("minimap size must be positive (received {size})")]
    InvalidMinimapSize {
        /// Provided size that failed validation.
        size: f32,
    },
    /// The minimap zoom must be positive.
    #[error("minimap scale must be positive (received {scale})")]
    InvalidMinimapScale {
        /// Provided scale that failed validation.
        scale: f32,
    },
    /// Text rasters need at least one column.
    #[error("raster needs at least one column")]
    EmptyRaster,
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_shooter_core::{GameStatus, GridTransform, LevelGrid};

    pub(crate) fn player_at(x: f32, z: f32, yaw: f32) -> PlayerSnapshot {
        PlayerSnapshot {
            position: Vec3::new(x, 0.8, z),
            velocity: Vec3::ZERO,
            yaw,
            pitch: 0.0,
            health: 100,
            grounded: true,
            camera: Vec3::new(x, 1.6, z),
        }
    }

    pub(crate) fn hud() -> HudSnapshot {
        HudSnapshot {
            health: 100,
            score: 0,
            spawn_points_destroyed: 0,
            spawn_points_total: 0,
            enemies_alive: 0,
            status: GameStatus::Running,
        }
    }

    #[test]
    fn scene_without_level_is_empty() {
        let scene = Scene::new(
            None,
            player_at(0.0, 0.0, 0.0),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            hud(),
            Duration::ZERO,
        );

        assert!(scene.walls.is_empty());
        assert!(scene.lamps.is_empty());
        assert_eq!(scene.floor_extent, 0.0);
        assert_eq!(scene.camera.position, Vec3::new(0.0, 1.6, 0.0));
    }

    #[test]
    fn scene_copies_level_dimensions() {
        let level = LevelGeometry {
            grid: LevelGrid::new(50),
            transform: GridTransform::new(50, 2.0),
            walls: vec![WallBox::centered(Vec2::new(4.0, 4.0), 1.0, 4.0)],
            player_start: Vec3::new(0.0, 0.8, 0.0),
            spawn_points: Vec::new(),
            lamps: vec![Vec2::new(-10.0, 6.0)],
            ceiling_height: 4.0,
        };
        let scene = Scene::new(
            Some(&level),
            player_at(0.0, 0.0, 0.0),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            hud(),
            Duration::from_millis(1_500),
        );

        assert_eq!(scene.walls.len(), 1);
        assert_eq!(scene.lamps, vec![Vec2::new(-10.0, 6.0)]);
        assert_eq!(scene.floor_extent, 100.0);
        assert_eq!(scene.ceiling_height, 4.0);
        assert_eq!(
            scene.status_line(),
            "t=1.5s health=100 score=0 | Spawn Points: 0/0 destroyed | Enemies: 0"
        );
    }

    #[test]
    fn damaged_spawn_cores_dim() {
        let snapshot = SpawnPointSnapshot {
            id: SpawnPointId::new(0),
            position: Vec3::ZERO,
            health: 0,
            core_intensity: 0.2,
            next_spawn_at: Duration::ZERO,
            enemies_spawned: 0,
        };
        let presentation = SpawnPointPresentation::from(snapshot);

        assert!(!presentation.active);
        assert!((presentation.core_color.red - 0.2).abs() < 1e-6);
        assert_eq!(presentation.core_color.green, 0.0);
        assert_eq!(presentation.core_color.alpha, 1.0);
    }
}
