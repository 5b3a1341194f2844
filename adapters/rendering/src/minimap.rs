use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};

use crate::{RenderingError, Scene};

/// Top-down radar centred on the player and rotated with the view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Minimap {
    size: f32,
    scale: f32,
}

impl Minimap {
    /// Side length of the default radar, in minimap units.
    pub const DEFAULT_SIZE: f32 = 200.0;
    /// Minimap units drawn per world unit by default.
    pub const DEFAULT_SCALE: f32 = 2.0;

    /// Creates a radar covering `size` minimap units at the given zoom.
    pub fn new(size: f32, scale: f32) -> Result<Self, RenderingError> {
        if !(size > 0.0) {
            return Err(RenderingError::InvalidMinimapSize { size });
        }
        if !(scale > 0.0) {
            return Err(RenderingError::InvalidMinimapScale { scale });
        }
        Ok(Self { size, scale })
    }

    /// Distance from the centre to the radar edge.
    #[must_use]
    pub fn half_extent(&self) -> f32 {
        self.size / 2.0
    }

    /// Projects walls, standing spawn points and nearby enemies into radar space.
    ///
    /// Positions are taken relative to the player, scaled, then rotated by
    /// `-yaw - π/2`. Enemies are culled on their unrotated offset; everything
    /// else is dropped only when it falls off the rotated radar.
    #[must_use]
    pub fn project(&self, scene: &Scene) -> MinimapView {
        let half = self.half_extent();
        let origin = scene.player.position;
        let rotation = Vec2::from_angle(-scene.player.yaw - FRAC_PI_2);
        let relative = |position: Vec3| {
            Vec2::new(position.x - origin.x, position.z - origin.z) * self.scale
        };
        let on_radar = |point: Vec2| point.x.abs() < half && point.y.abs() < half;

        let mut blips = Vec::new();
        for wall in &scene.walls {
            let point = rotation.rotate(relative(wall.center3()));
            if on_radar(point) {
                blips.push(Blip::new(BlipKind::Wall, point));
            }
        }
        for spawn in scene.spawn_points.iter().filter(|spawn| spawn.active) {
            let point = rotation.rotate(relative(spawn.position));
            if on_radar(point) {
                blips.push(Blip::new(BlipKind::SpawnPoint, point));
            }
        }
        for enemy in &scene.enemies {
            let offset = relative(enemy.position);
            if on_radar(offset) {
                blips.push(Blip::new(BlipKind::Enemy, rotation.rotate(offset)));
            }
        }

        MinimapView {
            half_extent: half,
            blips,
        }
    }
}

impl Default for Minimap {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            scale: Self::DEFAULT_SCALE,
        }
    }
}

/// Category of a radar mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlipKind {
    /// Centre of a wall cell.
    Wall,
    /// Standing spawn point structure.
    SpawnPoint,
    /// Living enemy.
    Enemy,
}

impl BlipKind {
    pub(crate) const fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::SpawnPoint => 'S',
            Self::Enemy => 'E',
        }
    }
}

/// Single mark on the radar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blip {
    /// What the mark represents.
    pub kind: BlipKind,
    /// Offset from the radar centre; +y points down the display.
    pub position: Vec2,
}

impl Blip {
    const fn new(kind: BlipKind, position: Vec2) -> Self {
        Self { kind, position }
    }
}

/// Radar contents for a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct MinimapView {
    /// Distance from the centre to the radar edge.
    pub half_extent: f32,
    /// Marks in draw order: walls, then spawn points, then enemies.
    pub blips: Vec<Blip>,
}

impl MinimapView {
    /// Marks of the requested kind.
    pub fn of_kind(&self, kind: BlipKind) -> impl Iterator<Item = &Blip> + '_ {
        self.blips.iter().filter(move |blip| blip.kind == kind)
    }
}
