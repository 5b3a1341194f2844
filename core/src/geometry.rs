//! World-space geometry derived from the grid model.

use glam::{Vec2, Vec3};

use crate::grid::{CellCoord, LevelGrid};

/// The single affine transform between grid cells and world space.
///
/// Cell `(column, row)` maps onto the world plane at
/// `((column - size/2) · cell_size, (row - size/2) · cell_size)`, so the grid is
/// centred on the world origin. Generation, geometry building, simulation and
/// rendering all convert through this type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridTransform {
    grid_size: u32,
    cell_size: f32,
}

impl GridTransform {
    /// Creates a transform for a square grid of the provided dimensions.
    #[must_use]
    pub const fn new(grid_size: u32, cell_size: f32) -> Self {
        Self {
            grid_size,
            cell_size,
        }
    }

    /// Number of cells along each grid edge.
    #[must_use]
    pub const fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Side length of a single cell in world units.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Centre of the cell projected onto the world XZ plane.
    #[must_use]
    pub fn cell_to_world(&self, cell: CellCoord) -> Vec2 {
        let half = self.grid_size as f32 / 2.0;
        Vec2::new(
            (cell.column() as f32 - half) * self.cell_size,
            (cell.row() as f32 - half) * self.cell_size,
        )
    }

    /// Cell whose centre lies closest to the provided world position, if any.
    #[must_use]
    pub fn world_to_cell(&self, position: Vec2) -> Option<CellCoord> {
        if self.cell_size <= 0.0 {
            return None;
        }
        let half = self.grid_size as f32 / 2.0;
        let column = (position.x / self.cell_size + half).round();
        let row = (position.y / self.cell_size + half).round();
        if column < 0.0 || row < 0.0 {
            return None;
        }
        let cell = CellCoord::new(column as u32, row as u32);
        (cell.column() < self.grid_size && cell.row() < self.grid_size).then_some(cell)
    }

    /// Side length of the whole level in world units.
    #[must_use]
    pub fn level_extent(&self) -> f32 {
        self.grid_size as f32 * self.cell_size
    }

    /// Largest absolute X or Z coordinate the player may occupy.
    #[must_use]
    pub fn boundary(&self) -> f32 {
        (self.grid_size as f32 / 2.0 - 1.0) * self.cell_size
    }
}

/// World-space axis-aligned box occupied by a single wall cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallBox {
    min: Vec2,
    max: Vec2,
    height: f32,
}

impl WallBox {
    /// Creates a wall box centred on the provided plane position.
    #[must_use]
    pub fn centered(center: Vec2, half_extent: f32, height: f32) -> Self {
        let half = Vec2::splat(half_extent);
        Self {
            min: center - half,
            max: center + half,
            height,
        }
    }

    /// Minimum corner on the XZ plane.
    #[must_use]
    pub const fn min(&self) -> Vec2 {
        self.min
    }

    /// Maximum corner on the XZ plane.
    #[must_use]
    pub const fn max(&self) -> Vec2 {
        self.max
    }

    /// Vertical extent of the wall measured from the floor.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Centre of the box on the XZ plane.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Half of the box extent along X and Z.
    #[must_use]
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Volumetric centre of the wall.
    #[must_use]
    pub fn center3(&self) -> Vec3 {
        let center = self.center();
        Vec3::new(center.x, self.height / 2.0, center.y)
    }
}

/// Collidable world produced from a finished grid.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelGeometry {
    /// Grid the geometry was derived from.
    pub grid: LevelGrid,
    /// Transform used to convert between the grid and the world.
    pub transform: GridTransform,
    /// Wall boxes in column-major grid order.
    pub walls: Vec<WallBox>,
    /// Player spawn position, already lifted to eye height.
    pub player_start: Vec3,
    /// Spawn-point structure positions on the XZ plane.
    pub spawn_points: Vec<Vec2>,
    /// Lamp positions on the XZ plane.
    pub lamps: Vec<Vec2>,
    /// Height of the ceiling plane.
    pub ceiling_height: f32,
}

impl LevelGeometry {
    /// Side length of the floor and ceiling planes.
    #[must_use]
    pub fn floor_extent(&self) -> f32 {
        self.transform.level_extent()
    }
}
