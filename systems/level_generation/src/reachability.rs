//! Breadth-first reachability over the level grid.

use std::collections::VecDeque;

use arena_shooter_core::{CellCoord, LevelGrid};

/// Dense breadth-first distance grid seeded from a single origin cell.
///
/// Distances default to `u32::MAX` for cells that cannot be reached through
/// 4-connected non-wall neighbours, so callers can distinguish enclosed
/// pockets from open floor.
#[derive(Clone, Debug, Default)]
pub struct ReachabilityField {
    size: u32,
    origin: Option<CellCoord>,
    distances: Vec<u32>,
}

impl ReachabilityField {
    /// Rebuilds the distances from `origin` over the current grid contents.
    pub fn rebuild(&mut self, grid: &LevelGrid, origin: CellCoord) {
        let size = grid.size();
        let side = usize::try_from(size).unwrap_or(0);
        let cell_count = side.checked_mul(side).unwrap_or(0);

        self.size = size;
        self.origin = Some(origin);

        if self.distances.len() != cell_count {
            self.distances = vec![u32::MAX; cell_count];
        } else {
            self.distances.fill(u32::MAX);
        }

        let Some(origin_index) = index(side, size, origin) else {
            return;
        };
        self.distances[origin_index] = 0;

        let mut queue = VecDeque::new();
        queue.push_back(origin);

        while let Some(cell) = queue.pop_front() {
            let Some(current_index) = index(side, size, cell) else {
                continue;
            };
            let current_distance = self.distances[current_index];
            if current_distance >= u32::MAX.saturating_sub(1) {
                continue;
            }
            let next_distance = current_distance + 1;

            for neighbor in grid.neighbors(cell) {
                if !grid.is_passable(neighbor) {
                    continue;
                }
                let Some(neighbor_index) = index(side, size, neighbor) else {
                    continue;
                };
                if self.distances[neighbor_index] <= next_distance {
                    continue;
                }
                self.distances[neighbor_index] = next_distance;
                queue.push_back(neighbor);
            }
        }
    }

    /// Origin the field was last built from.
    #[must_use]
    pub const fn origin(&self) -> Option<CellCoord> {
        self.origin
    }

    /// Number of 4-connected steps from the origin, if the cell is reachable.
    #[must_use]
    pub fn distance(&self, cell: CellCoord) -> Option<u32> {
        let side = usize::try_from(self.size).ok()?;
        index(side, self.size, cell)
            .and_then(|offset| self.distances.get(offset).copied())
            .filter(|distance| *distance != u32::MAX)
    }

    /// Reports whether a non-wall path connects the origin to the cell.
    #[must_use]
    pub fn is_reachable(&self, cell: CellCoord) -> bool {
        self.distance(cell).is_some()
    }

    /// Number of cells reachable from the origin, origin included.
    #[must_use]
    pub fn reachable_count(&self) -> usize {
        self.distances
            .iter()
            .filter(|distance| **distance != u32::MAX)
            .count()
    }
}

/// Single-query breadth-first search from `start` that stops at `target`.
///
/// Walls are never entered; the start cell itself is accepted regardless of
/// its contents.
#[must_use]
pub fn is_reachable(grid: &LevelGrid, start: CellCoord, target: CellCoord) -> bool {
    if !grid.contains(start) || !grid.contains(target) {
        return false;
    }

    let size = grid.size();
    let side = usize::try_from(size).unwrap_or(0);
    let mut visited = vec![false; side.saturating_mul(side)];
    let mut queue = VecDeque::new();

    if let Some(start_index) = index(side, size, start) {
        visited[start_index] = true;
        queue.push_back(start);
    }

    while let Some(cell) = queue.pop_front() {
        if cell == target {
            return true;
        }
        for neighbor in grid.neighbors(cell) {
            let Some(neighbor_index) = index(side, size, neighbor) else {
                continue;
            };
            if visited[neighbor_index] || !grid.is_passable(neighbor) {
                continue;
            }
            visited[neighbor_index] = true;
            queue.push_back(neighbor);
        }
    }

    false
}

fn index(side: usize, size: u32, cell: CellCoord) -> Option<usize> {
    if cell.column() >= size || cell.row() >= size {
        return None;
    }
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(side)?.checked_add(column)
}
