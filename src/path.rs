//! Random simple paths of a requested length.
//!
//! Only the shape matters here: any simple adjacent path of the right
//! length qualifies, whatever letters will later sit on it.

use log::trace;

use crate::error::{BoggleError, Result};
use crate::rng::BoardRng;
use crate::types::{Cell, NeighborCache, Path, CELL_COUNT};

/// DFS state for one start cell. Completions are sampled with a reservoir
/// of size one, so every completion from this start is equally likely and
/// none of them has to be stored.
struct PathSearch<'a> {
    target: usize,
    nc: &'a NeighborCache,
    rng: &'a mut BoardRng,
    visited: [bool; CELL_COUNT],
    path: Vec<Cell>,
    chosen: Option<Vec<Cell>>,
    completions: usize,
}

impl PathSearch<'_> {
    fn extend(&mut self, cell: Cell) {
        self.visited[cell.index()] = true;
        self.path.push(cell);

        if self.path.len() == self.target {
            self.completions += 1;
            if self.rng.gen_range(self.completions) == 0 {
                self.chosen = Some(self.path.clone());
            }
        } else {
            let mut next = self.nc.get(cell);
            self.rng.shuffle(next.as_mut_slice());
            for &n in next.as_slice() {
                if !self.visited[n.index()] {
                    self.extend(n);
                }
            }
        }

        self.path.pop();
        self.visited[cell.index()] = false;
    }
}

/// Find a random simple path of `length` cells (1..=16).
pub fn find_path(length: usize, rng: &mut BoardRng) -> Result<Path> {
    if length == 0 || length > CELL_COUNT {
        return Err(BoggleError::InvalidPathLength(length));
    }

    let nc = NeighborCache::new();
    let mut starts: Vec<Cell> = Cell::all().collect();
    rng.shuffle(&mut starts);

    for start in starts {
        let mut search = PathSearch {
            target: length,
            nc: &nc,
            rng: &mut *rng,
            visited: [false; CELL_COUNT],
            path: Vec::with_capacity(length),
            chosen: None,
            completions: 0,
        };
        search.extend(start);
        if let Some(cells) = search.chosen {
            trace!("Path of {} from {} chosen among {} completions", length, start, search.completions);
            return Ok(Path::from_search(cells));
        }
    }

    Err(BoggleError::NoPath(length))
}

/// Find a path with one cell per letter unit.
pub fn find_path_for<S: AsRef<str>>(letters: &[S], rng: &mut BoardRng) -> Result<Path> {
    find_path(letters.len(), rng)
}
