//! Reachability-gated placement of spawn points and lamps.

use arena_shooter_core::{CellCoord, CellKind, GridTransform, LevelGrid};
use tracing::debug;

use crate::{reachability::ReachabilityField, rng::SeedStream};

const MIN_SPAWN_POINTS: i64 = 3;
const SPAWN_COUNT_SPREAD: i64 = 3;
const SPAWN_ATTEMPTS: u32 = 100;
const SPAWN_MIN_DISTANCE: f32 = 8.0;

const LAMP_ATTEMPTS: u32 = 30;
const LAMP_MIN_SPACING: f32 = 8.0;

/// Interior band, in cells from each edge, that candidate cells are sampled from.
const SAMPLING_MARGIN: i64 = 5;

/// Selects spawn-point cells that are empty, distant from the player start and
/// reachable from it.
///
/// Accepted cells become [`CellKind::SpawnMarker`] and walls in their 3×3
/// neighbourhood are cleared. Running out of attempts yields fewer spawn points.
pub(crate) fn place_spawn_points(
    grid: &mut LevelGrid,
    player_start: CellCoord,
    stream: &mut SeedStream,
) -> Vec<CellCoord> {
    let requested = usize::try_from(MIN_SPAWN_POINTS + stream.scaled(SPAWN_COUNT_SPREAD))
        .unwrap_or(0);
    let mut accepted = Vec::with_capacity(requested);
    let mut validator = ReachabilityCache::default();
    let mut attempts = 0;

    while accepted.len() < requested && attempts < SPAWN_ATTEMPTS {
        attempts += 1;
        let Some(cell) = sample_interior(grid, stream) else {
            continue;
        };
        if grid.get(cell) != Some(CellKind::Empty) {
            continue;
        }
        if cell.distance(player_start) <= SPAWN_MIN_DISTANCE {
            continue;
        }
        if !validator.is_reachable(grid, player_start, cell) {
            continue;
        }

        let _ = grid.set(cell, CellKind::SpawnMarker);
        clear_walls_around(grid, cell);
        validator.invalidate();
        accepted.push(cell);
    }

    if accepted.len() < requested {
        debug!(
            requested,
            placed = accepted.len(),
            "spawn placement exhausted its attempts"
        );
    }

    accepted
}

/// Selects lamp cells on empty floor, keeping lamps apart in world space.
pub(crate) fn place_lamps(
    grid: &LevelGrid,
    transform: &GridTransform,
    stream: &mut SeedStream,
) -> Vec<CellCoord> {
    let mut lamps: Vec<CellCoord> = Vec::new();

    for _ in 0..LAMP_ATTEMPTS {
        let Some(cell) = sample_interior(grid, stream) else {
            continue;
        };
        if grid.get(cell) != Some(CellKind::Empty) {
            continue;
        }
        let position = transform.cell_to_world(cell);
        let crowded = lamps.iter().any(|existing| {
            transform.cell_to_world(*existing).distance(position) < LAMP_MIN_SPACING
        });
        if !crowded {
            lamps.push(cell);
        }
    }

    lamps
}

/// Breadth-first validator that reuses one field until the grid changes.
///
/// Spawn acceptance only ever clears walls, so a field rebuilt after each
/// acceptance answers every query exactly as a fresh search would.
#[derive(Debug, Default)]
struct ReachabilityCache {
    field: ReachabilityField,
    fresh: bool,
}

impl ReachabilityCache {
    fn is_reachable(&mut self, grid: &LevelGrid, origin: CellCoord, target: CellCoord) -> bool {
        if !self.fresh || self.field.origin() != Some(origin) {
            self.field.rebuild(grid, origin);
            self.fresh = true;
        }
        self.field.is_reachable(target)
    }

    fn invalidate(&mut self) {
        self.fresh = false;
    }
}

fn sample_interior(grid: &LevelGrid, stream: &mut SeedStream) -> Option<CellCoord> {
    let span = i64::from(grid.size()) - 2 * SAMPLING_MARGIN;
    let x = SAMPLING_MARGIN + stream.scaled(span);
    let z = SAMPLING_MARGIN + stream.scaled(span);
    let cell = CellCoord::new(u32::try_from(x).ok()?, u32::try_from(z).ok()?);
    grid.contains(cell).then_some(cell)
}

fn clear_walls_around(grid: &mut LevelGrid, center: CellCoord) {
    for dx in -1..=1 {
        for dz in -1..=1 {
            let Some(cell) = center.offset(dx, dz) else {
                continue;
            };
            if grid.get(cell) == Some(CellKind::Wall) {
                let _ = grid.set(cell, CellKind::Empty);
            }
        }
    }
}
