#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded procedural level generation.
//!
//! A [`LevelGenerator`] turns a [`LevelSeed`] into a walled grid with rooms,
//! corridors and clutter, a cleared player start, reachable spawn points and
//! lamps, and finally the world-space [`LevelGeometry`] the simulation collides
//! against. Every random decision is drawn from a [`SeedStream`], so identical
//! seeds reproduce identical levels.

mod geometry;
mod reachability;
mod rng;
mod rooms;
mod spawn_placement;

use arena_shooter_core::{CellCoord, CellKind, GameConfig, LevelGeometry, LevelGrid, LevelSeed};
use tracing::{debug, info};

pub use geometry::build_geometry;
pub use reachability::{is_reachable, ReachabilityField};
pub use rng::{seeded_random, SeedStream};
pub use rooms::Room;

/// Counter offset of the clutter wall stream.
pub const CLUTTER_STREAM_OFFSET: u32 = 1_000;
/// Counter offset of the spawn placement stream.
pub const SPAWN_STREAM_OFFSET: u32 = 5_000;
/// Counter offset of the lamp placement stream.
pub const LAMP_STREAM_OFFSET: u32 = 10_000;

/// Half width of the square kept free of walls around the player start.
const START_CLEARANCE: i32 = 2;

/// Everything produced by a single generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedLevel {
    /// Seed the level was generated from.
    pub seed: LevelSeed,
    /// Rooms accepted during generation, in placement order.
    pub rooms: Vec<Room>,
    /// Number of cells converted into clutter walls.
    pub clutter_cells: usize,
    /// Cell the player starts in.
    pub player_start: CellCoord,
    /// Spawn-point cells, in acceptance order.
    pub spawn_cells: Vec<CellCoord>,
    /// Lamp cells.
    pub lamp_cells: Vec<CellCoord>,
    /// Collidable world derived from the finished grid.
    pub geometry: LevelGeometry,
}

impl GeneratedLevel {
    /// Finished grid.
    #[must_use]
    pub fn grid(&self) -> &LevelGrid {
        &self.geometry.grid
    }
}

/// Deterministic generator configured from the level section of [`GameConfig`].
#[derive(Clone, Debug)]
pub struct LevelGenerator {
    config: GameConfig,
}

impl LevelGenerator {
    /// Creates a generator that builds levels for the provided configuration.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Generates the level identified by `seed`.
    #[must_use]
    pub fn generate(&self, seed: LevelSeed) -> GeneratedLevel {
        let size = self.config.level.grid_size;
        info!(seed = seed.get(), grid_size = size, "generating level");

        let mut grid = walled_border(size);

        let mut layout = SeedStream::starting_at(seed.stream(0));
        let rooms = rooms::place_rooms(&mut grid, &mut layout);
        rooms::connect_rooms(&mut grid, &rooms);

        let mut clutter = SeedStream::starting_at(seed.stream(CLUTTER_STREAM_OFFSET));
        let clutter_cells = rooms::scatter_clutter(&mut grid, &mut clutter);

        let player_start = CellCoord::new(size / 2, size / 2);
        let _ = grid.set(player_start, CellKind::PlayerStart);
        clear_start_area(&mut grid, player_start);

        let mut spawns = SeedStream::starting_at(seed.stream(SPAWN_STREAM_OFFSET));
        let spawn_cells = spawn_placement::place_spawn_points(&mut grid, player_start, &mut spawns);

        let transform = self.config.transform();
        let mut lamps = SeedStream::starting_at(seed.stream(LAMP_STREAM_OFFSET));
        let lamp_cells = spawn_placement::place_lamps(&grid, &transform, &mut lamps);

        let geometry = build_geometry(&grid, &self.config, &spawn_cells, &lamp_cells);

        debug!(
            rooms = rooms.len(),
            clutter_cells,
            walls = geometry.walls.len(),
            lamps = lamp_cells.len(),
            "level layout finished"
        );
        info!(
            seed = seed.get(),
            spawn_points = spawn_cells.len(),
            "level generated"
        );

        GeneratedLevel {
            seed,
            rooms,
            clutter_cells,
            player_start,
            spawn_cells,
            lamp_cells,
            geometry,
        }
    }
}

fn walled_border(size: u32) -> LevelGrid {
    let mut grid = LevelGrid::new(size);
    for column in 0..size {
        for row in 0..size {
            let cell = CellCoord::new(column, row);
            if grid.is_border(cell) {
                let _ = grid.set(cell, CellKind::Wall);
            }
        }
    }
    grid
}

fn clear_start_area(grid: &mut LevelGrid, start: CellCoord) {
    for dx in -START_CLEARANCE..=START_CLEARANCE {
        for dz in -START_CLEARANCE..=START_CLEARANCE {
            let Some(cell) = start.offset(dx, dz) else {
                continue;
            };
            if grid.get(cell) == Some(CellKind::Wall) {
                let _ = grid.set(cell, CellKind::Empty);
            }
        }
    }
}
