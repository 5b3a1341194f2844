//! Conversion of a finished grid into world-space collision geometry.

use arena_shooter_core::{
    CellCoord, CellKind, GameConfig, GridTransform, LevelGeometry, LevelGrid, WallBox,
};
use glam::Vec3;

/// Builds the collidable world for a finished grid.
///
/// Every wall cell becomes one box spanning its full cell; walls are listed in
/// the grid's column-major order. Spawn points keep the order they were
/// accepted in.
#[must_use]
pub fn build_geometry(
    grid: &LevelGrid,
    config: &GameConfig,
    spawn_cells: &[CellCoord],
    lamp_cells: &[CellCoord],
) -> LevelGeometry {
    let transform = config.transform();
    let half_extent = transform.cell_size() / 2.0;

    let walls = grid
        .iter()
        .filter(|(_, kind)| *kind == CellKind::Wall)
        .map(|(cell, _)| {
            WallBox::centered(
                transform.cell_to_world(cell),
                half_extent,
                config.level.wall_height,
            )
        })
        .collect();

    let start = grid
        .player_start()
        .map(|cell| transform.cell_to_world(cell))
        .unwrap_or_default();

    LevelGeometry {
        grid: grid.clone(),
        transform,
        walls,
        player_start: Vec3::new(start.x, config.player.ground_height, start.y),
        spawn_points: to_world(&transform, spawn_cells),
        lamps: to_world(&transform, lamp_cells),
        ceiling_height: config.level.ceiling_height,
    }
}

fn to_world(transform: &GridTransform, cells: &[CellCoord]) -> Vec<glam::Vec2> {
    cells
        .iter()
        .map(|cell| transform.cell_to_world(*cell))
        .collect()
}
