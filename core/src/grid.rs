//! Grid model describing the cell layout of a generated arena.

use serde::{Deserialize, Serialize};

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Columns map onto the world X axis and rows onto the world Z axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Euclidean distance between two cells measured in whole-cell units.
    #[must_use]
    pub fn distance(self, other: CellCoord) -> f32 {
        let dc = self.column.abs_diff(other.column) as f32;
        let dr = self.row.abs_diff(other.row) as f32;
        (dc * dc + dr * dr).sqrt()
    }

    /// Returns the cell displaced by the provided signed offsets, if it stays non-negative.
    #[must_use]
    pub fn offset(self, columns: i32, rows: i32) -> Option<CellCoord> {
        let column = i64::from(self.column) + i64::from(columns);
        let row = i64::from(self.row) + i64::from(rows);
        let column = u32::try_from(column).ok()?;
        let row = u32::try_from(row).ok()?;
        Some(CellCoord::new(column, row))
    }
}

/// Contents of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Passable floor.
    #[default]
    Empty,
    /// Blocking wall volume.
    Wall,
    /// Location where the player enters the arena.
    PlayerStart,
    /// Location of a spawn-point structure.
    SpawnMarker,
}

impl CellKind {
    /// Reports whether entities may traverse the cell.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Single-character glyph used by text renderers.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => '#',
            Self::PlayerStart => 'P',
            Self::SpawnMarker => 'S',
        }
    }
}

/// Square matrix of cells produced by level generation.
///
/// The grid is mutated only while a level is being generated and treated as
/// read-only afterwards. Cells are stored in row-major order, but iteration
/// through [`LevelGrid::iter`] walks columns in the outer loop so that derived
/// wall lists enumerate in a stable column-major order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelGrid {
    size: u32,
    cells: Vec<CellKind>,
}

impl LevelGrid {
    /// Creates a grid of `size × size` empty cells.
    #[must_use]
    pub fn new(size: u32) -> Self {
        let side = usize::try_from(size).unwrap_or(0);
        Self {
            size,
            cells: vec![CellKind::Empty; side.saturating_mul(side)],
        }
    }

    /// Number of cells along each edge of the grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Dense cell storage in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// Reports whether the cell lies within the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.size && cell.row() < self.size
    }

    /// Reports whether the cell lies on the outermost ring of the grid.
    #[must_use]
    pub fn is_border(&self, cell: CellCoord) -> bool {
        let last = self.size.saturating_sub(1);
        self.contains(cell)
            && (cell.column() == 0 || cell.row() == 0 || cell.column() == last || cell.row() == last)
    }

    /// Contents of the cell, if it lies within the grid.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<CellKind> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the cell exists and is not a wall.
    #[must_use]
    pub fn is_passable(&self, cell: CellCoord) -> bool {
        self.get(cell).is_some_and(CellKind::is_passable)
    }

    /// Overwrites the contents of a cell. Returns `false` when the cell is out of bounds.
    pub fn set(&mut self, cell: CellCoord, kind: CellKind) -> bool {
        match self.index(cell).and_then(|index| self.cells.get_mut(index)) {
            Some(slot) => {
                *slot = kind;
                true
            }
            None => false,
        }
    }

    /// Iterates over every cell in column-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellKind)> + '_ {
        let size = self.size;
        (0..size).flat_map(move |column| {
            (0..size).filter_map(move |row| {
                let cell = CellCoord::new(column, row);
                self.get(cell).map(|kind| (cell, kind))
            })
        })
    }

    /// Collects the cells that currently hold the provided kind.
    #[must_use]
    pub fn cells_of(&self, kind: CellKind) -> Vec<CellCoord> {
        self.iter()
            .filter(|(_, candidate)| *candidate == kind)
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Counts the cells that currently hold the provided kind.
    #[must_use]
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|candidate| **candidate == kind).count()
    }

    /// Location of the player start cell, if one has been placed.
    #[must_use]
    pub fn player_start(&self) -> Option<CellCoord> {
        self.iter()
            .find(|(_, kind)| *kind == CellKind::PlayerStart)
            .map(|(cell, _)| cell)
    }

    /// Orthogonal neighbours of the cell that lie within the grid.
    pub fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> {
        let mut candidates = [None; 4];
        let mut count = 0;

        if let Some(row) = cell.row().checked_add(1) {
            if row < self.size {
                candidates[count] = Some(CellCoord::new(cell.column(), row));
                count += 1;
            }
        }

        if let Some(column) = cell.column().checked_add(1) {
            if column < self.size {
                candidates[count] = Some(CellCoord::new(column, cell.row()));
                count += 1;
            }
        }

        if let Some(row) = cell.row().checked_sub(1) {
            candidates[count] = Some(CellCoord::new(cell.column(), row));
            count += 1;
        }

        if let Some(column) = cell.column().checked_sub(1) {
            candidates[count] = Some(CellCoord::new(column, cell.row()));
            count += 1;
        }

        candidates.into_iter().take(count).flatten()
    }

    /// Renders the grid as rows of glyphs, one line per grid row.
    #[must_use]
    pub fn to_ascii(&self) -> String {
        let side = usize::try_from(self.size).unwrap_or(0);
        let mut text = String::with_capacity(side.saturating_mul(side + 1));
        for row in 0..self.size {
            for column in 0..self.size {
                let kind = self.get(CellCoord::new(column, row)).unwrap_or_default();
                text.push(kind.glyph());
            }
            text.push('\n');
        }
        text
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.size).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_detection_covers_all_four_edges() {
        let grid = LevelGrid::new(5);
        assert!(grid.is_border(CellCoord::new(0, 2)));
        assert!(grid.is_border(CellCoord::new(4, 2)));
        assert!(grid.is_border(CellCoord::new(2, 0)));
        assert!(grid.is_border(CellCoord::new(2, 4)));
        assert!(!grid.is_border(CellCoord::new(2, 2)));
        assert!(!grid.is_border(CellCoord::new(5, 5)));
    }

    #[test]
    fn set_rejects_out_of_bounds_cells() {
        let mut grid = LevelGrid::new(3);
        assert!(grid.set(CellCoord::new(1, 1), CellKind::Wall));
        assert!(!grid.set(CellCoord::new(3, 0), CellKind::Wall));
        assert_eq!(grid.get(CellCoord::new(1, 1)), Some(CellKind::Wall));
        assert_eq!(grid.count(CellKind::Wall), 1);
    }

    #[test]
    fn neighbors_are_clipped_at_the_edges() {
        let grid = LevelGrid::new(3);
        let corner: Vec<_> = grid.neighbors(CellCoord::new(0, 0)).collect();
        assert_eq!(corner.len(), 2);
        let center: Vec<_> = grid.neighbors(CellCoord::new(1, 1)).collect();
        assert_eq!(center.len(), 4);
    }

    #[test]
    fn iteration_walks_columns_in_the_outer_loop() {
        let grid = LevelGrid::new(2);
        let order: Vec<_> = grid.iter().map(|(cell, _)| cell).collect();
        assert_eq!(
            order,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(0, 1),
                CellCoord::new(1, 0),
                CellCoord::new(1, 1),
            ]
        );
    }

    #[test]
    fn offset_rejects_negative_results() {
        let cell = CellCoord::new(1, 1);
        assert_eq!(cell.offset(-1, 2), Some(CellCoord::new(0, 3)));
        assert_eq!(cell.offset(-2, 0), None);
    }

    #[test]
    fn ascii_rendering_uses_cell_glyphs() {
        let mut grid = LevelGrid::new(2);
        let _ = grid.set(CellCoord::new(0, 0), CellKind::Wall);
        let _ = grid.set(CellCoord::new(1, 1), CellKind::PlayerStart);
        assert_eq!(grid.to_ascii(), "#.\n.P\n");
    }
}
