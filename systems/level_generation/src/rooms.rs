//! Room, corridor and clutter carving passes.

use arena_shooter_core::{CellCoord, CellKind, LevelGrid};
use tracing::debug;

use crate::rng::SeedStream;

const MIN_ROOMS: i64 = 8;
const ROOM_COUNT_SPREAD: i64 = 8;
const MIN_ROOM_SIDE: i64 = 4;
const ROOM_SIDE_SPREAD: i64 = 8;
const ROOM_MARGIN: i64 = 3;
const ROOM_PADDING: u32 = 2;
const ROOM_ATTEMPTS: u32 = 50;

const MIN_CLUTTER: i64 = 15;
const CLUTTER_COUNT_SPREAD: i64 = 20;
const MIN_CLUTTER_LENGTH: i64 = 2;
const CLUTTER_LENGTH_SPREAD: i64 = 6;
const CLUTTER_START: i64 = 3;
const CLUTTER_MARGIN: u32 = 2;

/// Rectangular room accepted during generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Room {
    origin: CellCoord,
    width: u32,
    height: u32,
}

impl Room {
    /// Creates a room anchored at its upper-left cell.
    #[must_use]
    pub const fn new(origin: CellCoord, width: u32, height: u32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Upper-left cell of the room.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Width of the room in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the room in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Cell that anchors corridors to the room.
    #[must_use]
    pub const fn center(&self) -> CellCoord {
        CellCoord::new(
            self.origin.column() + self.width / 2,
            self.origin.row() + self.height / 2,
        )
    }

    /// Reports whether the rooms intersect once both are grown by `padding` cells.
    #[must_use]
    pub const fn overlaps_padded(&self, other: &Room, padding: u32) -> bool {
        let (x, z) = (self.origin.column(), self.origin.row());
        let (ox, oz) = (other.origin.column(), other.origin.row());
        x < ox + other.width + padding
            && x + self.width + padding > ox
            && z < oz + other.height + padding
            && z + self.height + padding > oz
    }
}

/// Places non-overlapping rooms and carves their interiors.
///
/// Rooms that exhaust their placement attempts are skipped.
pub(crate) fn place_rooms(grid: &mut LevelGrid, stream: &mut SeedStream) -> Vec<Room> {
    let size = i64::from(grid.size());
    let requested = MIN_ROOMS + stream.scaled(ROOM_COUNT_SPREAD);
    let mut rooms: Vec<Room> = Vec::new();

    for _ in 0..requested {
        let mut accepted = None;
        for _ in 0..ROOM_ATTEMPTS {
            let width = MIN_ROOM_SIDE + stream.scaled(ROOM_SIDE_SPREAD);
            let height = MIN_ROOM_SIDE + stream.scaled(ROOM_SIDE_SPREAD);
            let x = ROOM_MARGIN + stream.scaled(size - width - 2 * ROOM_MARGIN);
            let z = ROOM_MARGIN + stream.scaled(size - height - 2 * ROOM_MARGIN);

            let Some(candidate) = room_from_parts(x, z, width, height) else {
                continue;
            };
            if rooms
                .iter()
                .any(|room| candidate.overlaps_padded(room, ROOM_PADDING))
            {
                continue;
            }
            accepted = Some(candidate);
            break;
        }

        match accepted {
            Some(room) => {
                carve_room(grid, &room);
                rooms.push(room);
            }
            None => debug!("room placement exhausted its attempts"),
        }
    }

    rooms
}

/// Connects consecutive rooms with L-shaped corridors.
///
/// Each corridor runs horizontally along the first room's centre row, then
/// vertically along the second room's centre column.
pub(crate) fn connect_rooms(grid: &mut LevelGrid, rooms: &[Room]) {
    for pair in rooms.windows(2) {
        let from = pair[0].center();
        let to = pair[1].center();
        let elbow = CellCoord::new(to.column(), from.row());
        carve_corridor(grid, from, elbow);
        carve_corridor(grid, elbow, to);
    }
}

/// Clears the axis-aligned run between two cells, widening it by one cell on every side.
///
/// Border cells are never altered.
pub(crate) fn carve_corridor(grid: &mut LevelGrid, from: CellCoord, to: CellCoord) {
    let size = grid.size();
    let (start_x, end_x) = ordered(from.column(), to.column());
    let (start_z, end_z) = ordered(from.row(), to.row());

    for x in start_x..=end_x {
        for z in start_z..=end_z {
            if x == 0 || z == 0 || x + 1 >= size || z + 1 >= size {
                continue;
            }
            let _ = grid.set(CellCoord::new(x, z), CellKind::Empty);

            if x > 1 {
                clear_wall(grid, CellCoord::new(x - 1, z));
            }
            if x + 2 < size {
                clear_wall(grid, CellCoord::new(x + 1, z));
            }
            if z > 1 {
                clear_wall(grid, CellCoord::new(x, z - 1));
            }
            if z + 2 < size {
                clear_wall(grid, CellCoord::new(x, z + 1));
            }
        }
    }
}

/// Scatters short axis-aligned wall segments over empty interior cells.
///
/// Returns the number of cells converted to walls.
pub(crate) fn scatter_clutter(grid: &mut LevelGrid, stream: &mut SeedStream) -> usize {
    let size = grid.size();
    let span = i64::from(size) - 2 * CLUTTER_START;
    let segments = MIN_CLUTTER + stream.scaled(CLUTTER_COUNT_SPREAD);
    let mut converted = 0;

    for _ in 0..segments {
        let length = MIN_CLUTTER_LENGTH + stream.scaled(CLUTTER_LENGTH_SPREAD);
        let start_x = CLUTTER_START + stream.scaled(span);
        let start_z = CLUTTER_START + stream.scaled(span);
        let horizontal = stream.coin();

        for step in 0..length {
            let (x, z) = if horizontal {
                (start_x + step, start_z)
            } else {
                (start_x, start_z + step)
            };
            let lower = i64::from(CLUTTER_MARGIN);
            let upper = i64::from(size) - i64::from(CLUTTER_MARGIN);
            if x < lower || x >= upper || z < lower || z >= upper {
                continue;
            }
            let (Ok(x), Ok(z)) = (u32::try_from(x), u32::try_from(z)) else {
                continue;
            };
            let cell = CellCoord::new(x, z);
            if grid.get(cell) == Some(CellKind::Empty) {
                let _ = grid.set(cell, CellKind::Wall);
                converted += 1;
            }
        }
    }

    converted
}

fn carve_room(grid: &mut LevelGrid, room: &Room) {
    let last = grid.size().saturating_sub(1);
    let origin = room.origin();
    for x in origin.column()..origin.column() + room.width() {
        for z in origin.row()..origin.row() + room.height() {
            if x > 0 && x < last && z > 0 && z < last {
                let _ = grid.set(CellCoord::new(x, z), CellKind::Empty);
            }
        }
    }
}

fn room_from_parts(x: i64, z: i64, width: i64, height: i64) -> Option<Room> {
    let origin = CellCoord::new(u32::try_from(x).ok()?, u32::try_from(z).ok()?);
    Some(Room::new(
        origin,
        u32::try_from(width).ok()?,
        u32::try_from(height).ok()?,
    ))
}

const fn ordered(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn clear_wall(grid: &mut LevelGrid, cell: CellCoord) {
    if grid.get(cell) == Some(CellKind::Wall) {
        let _ = grid.set(cell, CellKind::Empty);
    }
}
