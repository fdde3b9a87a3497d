//! The dice catalogue and fully random board rolls.

use crate::rng::BoardRng;
use crate::types::{Board, Cell, CELL_COUNT};

/// One six-faced letter die.
pub type Die = [&'static str; 6];

/// Official "New Boggle" dice, one per board cell.
pub const BOGGLE_DICE: [Die; CELL_COUNT] = [
    ["A", "A", "E", "E", "G", "N"],
    ["A", "B", "B", "J", "O", "O"],
    ["A", "C", "H", "O", "P", "S"],
    ["A", "F", "F", "K", "P", "S"],
    ["A", "O", "O", "T", "T", "W"],
    ["C", "I", "M", "O", "T", "U"],
    ["D", "E", "I", "L", "R", "X"],
    ["D", "E", "L", "R", "V", "Y"],
    ["D", "I", "S", "T", "T", "Y"],
    ["E", "E", "G", "H", "N", "W"],
    ["E", "E", "I", "N", "S", "U"],
    ["E", "H", "R", "T", "V", "W"],
    ["E", "I", "O", "S", "S", "T"],
    ["E", "L", "R", "T", "T", "Y"],
    ["H", "I", "M", "N", "U", "QU"],
    ["H", "L", "N", "N", "R", "Z"],
];

/// Roll one die: a uniformly random face.
#[inline]
pub fn roll(die: &Die, rng: &mut BoardRng) -> &'static str {
    die[rng.gen_range(die.len())]
}

pub fn has_face(die: &Die, face: &str) -> bool {
    die.iter().any(|&f| f == face)
}

/// Shuffle the dice into positions and roll each one.
pub fn random_board(dice: &[Die], rng: &mut BoardRng) -> Board {
    let mut order: Vec<usize> = (0..dice.len()).collect();
    rng.shuffle(&mut order);

    let mut board = Board::empty();
    for (cell, &die) in Cell::all().zip(order.iter()) {
        board.set(cell, roll(&dice[die], rng));
    }
    board
}
