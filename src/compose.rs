//! Fill a board around an embedded path using the dice catalogue.

use log::debug;

use crate::dice::{has_face, roll, Die};
use crate::error::{BoggleError, Result};
use crate::rng::BoardRng;
use crate::types::{Board, Cell, Path, CELL_COUNT};

/// Place `letters` along `path`, then roll the leftover dice into the
/// remaining cells.
///
/// Each path letter takes an unused die showing that face. When no unused
/// die has it, the letter is placed anyway without consuming a die, so the
/// board may not be physically rollable. Every other cell gets its own die,
/// so fewer than `CELL_COUNT` dice is rejected up front.
pub fn compose<S: AsRef<str>>(
    path: &Path,
    letters: &[S],
    dice: &[Die],
    rng: &mut BoardRng,
) -> Result<Board> {
    if dice.len() < CELL_COUNT {
        return Err(BoggleError::NotEnoughDice(dice.len()));
    }
    if path.len() != letters.len() {
        return Err(BoggleError::LetterCountMismatch {
            path: path.len(),
            letters: letters.len(),
        });
    }

    let mut board = Board::empty();
    let mut used = vec![false; dice.len()];

    // Visit dice in random order so equal letters don't always take the same die.
    let mut order: Vec<usize> = (0..dice.len()).collect();
    rng.shuffle(&mut order);

    for (&cell, letter) in path.iter().zip(letters) {
        let letter = letter.as_ref().trim().to_uppercase();
        match order.iter().copied().find(|&d| !used[d] && has_face(&dice[d], &letter)) {
            Some(d) => used[d] = true,
            None => debug!("No unused die shows {:?}; placing it at {} anyway", letter, cell),
        }
        board.set(cell, &letter);
    }

    let mut spare: Vec<usize> = (0..dice.len()).filter(|&d| !used[d]).collect();
    rng.shuffle(&mut spare);
    let mut spare = spare.into_iter();

    for cell in Cell::all() {
        if !board.is_empty_cell(cell) {
            continue;
        }
        if let Some(d) = spare.next() {
            board.set(cell, roll(&dice[d], rng));
        }
    }

    Ok(board)
}
