//! Core data types: the fixed 4x4 grid, boards and paths.
//!
//! Boards use flat `Vec` storage in row-major layout:
//! `cells[row * BOARD_SIZE + col]` maps to the JS equivalent `board[row][col]`.

use std::fmt;
use std::ops::Deref;

use serde::Serialize;

use crate::error::{BoggleError, Result};

/// Board edge length.
pub const BOARD_SIZE: usize = 4;

/// Number of cells (and dice) on a board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A grid position, always in bounds. Outside this module the only way to
/// build one is `Cell::new` (or `Cell::all`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cell {
    row: usize,
    col: usize,
}

impl Cell {
    /// `None` when `(row, col)` falls off the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    #[inline(always)]
    pub fn row(self) -> usize {
        self.row
    }

    #[inline(always)]
    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major index into a flat board.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// `index` must be below `CELL_COUNT`.
    #[inline(always)]
    pub(crate) fn from_index(index: usize) -> Self {
        Self {
            row: index / BOARD_SIZE,
            col: index % BOARD_SIZE,
        }
    }

    /// All 16 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..CELL_COUNT).map(Cell::from_index)
    }

    /// King-move adjacency: differs by at most one in each axis, not equal.
    pub fn is_adjacent(self, other: Cell) -> bool {
        self != other && self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.row, self.col)
    }
}

/// Up to 8 neighbors of one cell, stored inline so it can be copied out of
/// the cache while the caller keeps mutating its own search state.
#[derive(Clone, Copy, Debug)]
pub struct Neighbors {
    cells: [Cell; 8],
    len: usize,
}

impl Neighbors {
    #[inline(always)]
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells[..self.len]
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [Cell] {
        &mut self.cells[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.as_slice().contains(&cell)
    }
}

/// The up-to-8 cells around `cell` (diagonals included), clipped to the board.
///
/// Directions are visited top row first, left to right, matching the order
/// the word search explores them.
pub fn neighbors(cell: Cell) -> Neighbors {
    let mut out = Neighbors {
        cells: [Cell { row: 0, col: 0 }; 8],
        len: 0,
    };
    for dr in -1i32..=1 {
        for dc in -1i32..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let nr = cell.row as i32 + dr;
            let nc = cell.col as i32 + dc;
            if nr >= 0 && nr < BOARD_SIZE as i32 && nc >= 0 && nc < BOARD_SIZE as i32 {
                out.cells[out.len] = Cell {
                    row: nr as usize,
                    col: nc as usize,
                };
                out.len += 1;
            }
        }
    }
    out
}

/// Pre-computed neighbor lists for all 16 cells.
pub struct NeighborCache {
    data: [Neighbors; CELL_COUNT],
}

impl NeighborCache {
    pub fn new() -> Self {
        Self {
            data: std::array::from_fn(|i| neighbors(Cell::from_index(i))),
        }
    }

    /// Get the pre-computed neighbors for `cell`.
    #[inline(always)]
    pub fn get(&self, cell: Cell) -> Neighbors {
        self.data[cell.index()]
    }
}

impl Default for NeighborCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Check the path invariant: non-empty, in bounds, no repeated cell, and
/// each consecutive pair adjacent.
pub fn is_valid_path(cells: &[Cell]) -> bool {
    if cells.is_empty() || cells.len() > CELL_COUNT {
        return false;
    }
    let mut seen = [false; CELL_COUNT];
    for (i, &cell) in cells.iter().enumerate() {
        if cell.row >= BOARD_SIZE || cell.col >= BOARD_SIZE || seen[cell.index()] {
            return false;
        }
        seen[cell.index()] = true;
        if i > 0 && !cells[i - 1].is_adjacent(cell) {
            return false;
        }
    }
    true
}

/// An ordered, non-repeating, adjacency-connected sequence of cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Path(Vec<Cell>);

impl Path {
    /// `None` unless `cells` satisfies [`is_valid_path`].
    pub fn new(cells: Vec<Cell>) -> Option<Self> {
        is_valid_path(&cells).then_some(Self(cells))
    }

    /// Wrap cells produced by a search that already enforces the invariant.
    pub(crate) fn from_search(cells: Vec<Cell>) -> Self {
        debug_assert!(is_valid_path(&cells));
        Self(cells)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    /// Concatenate the faces along this path.
    pub fn spell(&self, board: &Board) -> String {
        self.0.iter().map(|&cell| board.face(cell)).collect()
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.0
    }
}

impl Deref for Path {
    type Target = [Cell];

    fn deref(&self) -> &[Cell] {
        &self.0
    }
}

/// 4x4 assignment of face-strings to cells. An empty string is an empty cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Board {
    cells: Vec<String>,
}

impl Board {
    /// A board with every cell empty.
    pub fn empty() -> Self {
        Self {
            cells: vec![String::new(); CELL_COUNT],
        }
    }

    /// Build from 16 faces in row-major order. Faces are trimmed and uppercased.
    pub fn from_faces<I, S>(faces: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cells: Vec<String> = faces.into_iter().map(|f| normalize_face(f.as_ref())).collect();
        if cells.len() != CELL_COUNT {
            return Err(BoggleError::InvalidBoard(cells.len()));
        }
        Ok(Self { cells })
    }

    pub fn from_rows(rows: [[&str; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self {
            cells: rows.iter().flatten().map(|f| normalize_face(f)).collect(),
        }
    }

    #[inline(always)]
    pub fn face(&self, cell: Cell) -> &str {
        &self.cells[cell.index()]
    }

    pub fn set(&mut self, cell: Cell, face: &str) {
        self.cells[cell.index()] = normalize_face(face);
    }

    #[inline(always)]
    pub fn is_empty_cell(&self, cell: Cell) -> bool {
        self.cells[cell.index()].is_empty()
    }

    /// True when at least one cell carries a letter.
    pub fn has_letters(&self) -> bool {
        self.cells.iter().any(|f| !f.is_empty())
    }

    /// Number of cells carrying a face.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|f| !f.is_empty()).count()
    }

    pub fn faces(&self) -> &[String] {
        &self.cells
    }

    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.cells.chunks(BOARD_SIZE).map(|row| row.to_vec()).collect()
    }
}

fn normalize_face(face: &str) -> String {
    face.trim().to_uppercase()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "┌───┬───┬───┬───┐")?;
        for (r, row) in self.cells.chunks(BOARD_SIZE).enumerate() {
            write!(f, "│")?;
            for face in row {
                write!(f, " {:<2}│", face)?;
            }
            writeln!(f)?;
            if r + 1 < BOARD_SIZE {
                writeln!(f, "├───┼───┼───┼───┤")?;
            }
        }
        write!(f, "└───┴───┴───┴───┘")
    }
}
