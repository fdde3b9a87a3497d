//! Exhaustive word search over a board.
//!
//! Plain depth-first backtracking from every lettered cell. There is no
//! prefix pruning: every simple path is walked until the accumulated string
//! reaches the cap, and each prefix is checked against the word set. The cap
//! is `MAX_WORD_CHARS`, or the longest dictionary word if that is shorter.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::Serialize;

use crate::dictionary::{WordSet, MIN_WORD_LENGTH};
use crate::types::{Board, Cell, NeighborCache, Path, CELL_COUNT};

/// Upper bound on the accumulated string. "QU" cells can push a 16-cell path
/// past 16 characters, so this caps recursion rather than word length.
pub const MAX_WORD_CHARS: usize = 20;

/// A dictionary word together with the cells that spell it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FoundWord {
    pub word: String,
    pub path: Path,
}

/// Every word found on a board, each with the first path discovered for it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FoundWords {
    paths: BTreeMap<String, Path>,
}

impl FoundWords {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.paths.contains_key(word)
    }

    pub fn path(&self, word: &str) -> Option<&Path> {
        self.paths.get(word)
    }

    /// Words in alphabetical order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.paths.iter().map(|(w, p)| (w.as_str(), p))
    }

    pub fn into_found(self) -> Vec<FoundWord> {
        self.paths
            .into_iter()
            .map(|(word, path)| FoundWord { word, path })
            .collect()
    }

    /// Length in characters of the longest word, 0 if none.
    pub fn longest_length(&self) -> usize {
        self.paths.keys().map(String::len).max().unwrap_or(0)
    }

    /// All words tied for the longest length, alphabetical.
    pub fn longest(&self) -> Vec<&str> {
        self.of_length(self.longest_length())
    }

    pub fn of_length(&self, len: usize) -> Vec<&str> {
        self.words().filter(|w| w.len() == len).collect()
    }

    pub fn longer_than(&self, len: usize) -> Vec<&str> {
        self.words().filter(|w| w.len() > len).collect()
    }

    /// Words grouped by length, each group alphabetical.
    pub fn by_length(&self) -> BTreeMap<usize, Vec<&str>> {
        let mut groups: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
        for word in self.words() {
            groups.entry(word.len()).or_default().push(word);
        }
        groups
    }

    /// The single word of exactly `len` characters when it is unique and
    /// nothing longer was found.
    pub fn unique_of_length(&self, len: usize) -> Option<&str> {
        match self.of_length(len).as_slice() {
            [only] if self.longer_than(len).is_empty() => Some(*only),
            _ => None,
        }
    }
}

/// Backtracking state for one board walk. Lives for one call only.
struct Walk<'a, F> {
    board: &'a Board,
    words: &'a WordSet,
    nc: &'a NeighborCache,
    cap: usize,
    visited: [bool; CELL_COUNT],
    path: Vec<Cell>,
    current: String,
    on_word: F,
}

impl<F: FnMut(&str, &[Cell])> Walk<'_, F> {
    fn visit(&mut self, cell: Cell) {
        self.visited[cell.index()] = true;
        self.path.push(cell);
        let mark = self.current.len();
        self.current.push_str(self.board.face(cell));

        if self.current.len() >= MIN_WORD_LENGTH && self.words.contains(&self.current) {
            (self.on_word)(self.current.as_str(), self.path.as_slice());
        }

        if self.current.len() < self.cap {
            let neighbors = self.nc.get(cell);
            for &next in neighbors.as_slice() {
                if !self.visited[next.index()] && !self.board.is_empty_cell(next) {
                    self.visit(next);
                }
            }
        }

        self.current.truncate(mark);
        self.path.pop();
        self.visited[cell.index()] = false;
    }
}

/// Finds dictionary words on boards. Holds the dictionary snapshot and the
/// neighbor table; each call keeps its own visited state.
pub struct WordFinder<'a> {
    words: &'a WordSet,
    nc: NeighborCache,
}

impl<'a> WordFinder<'a> {
    pub fn new(words: &'a WordSet) -> Self {
        Self {
            words,
            nc: NeighborCache::new(),
        }
    }

    pub fn words(&self) -> &WordSet {
        self.words
    }

    /// Run the search, calling `on_word` for every dictionary hit (the same
    /// word may be reported once per distinct path).
    fn walk<F: FnMut(&str, &[Cell])>(&self, board: &Board, on_word: F) {
        let mut walk = Walk {
            board,
            words: self.words,
            nc: &self.nc,
            cap: MAX_WORD_CHARS.min(self.words.max_len()),
            visited: [false; CELL_COUNT],
            path: Vec::with_capacity(CELL_COUNT),
            current: String::with_capacity(MAX_WORD_CHARS + 2),
            on_word,
        };
        for cell in Cell::all() {
            if !board.is_empty_cell(cell) {
                walk.visit(cell);
            }
        }
    }

    /// Every word on the board with the first path found for it.
    pub fn find_all_words(&self, board: &Board) -> FoundWords {
        let mut paths: BTreeMap<String, Path> = BTreeMap::new();
        self.walk(board, |word, path| {
            if !paths.contains_key(word) {
                paths.insert(word.to_string(), Path::from_search(path.to_vec()));
            }
        });
        debug!("Found {} words on board", paths.len());
        FoundWords { paths }
    }

    /// Every word on the board, without path tracking.
    pub fn find_words(&self, board: &Board) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        self.walk(board, |word, _| {
            if !found.contains(word) {
                found.insert(word.to_string());
            }
        });
        found
    }
}
