//! The "find the longest word" result, ready for display.

use std::collections::HashMap;

use serde::Serialize;

use crate::dictionary::FrequencyTable;
use crate::error::{BoggleError, Result};
use crate::finder::{FoundWords, WordFinder};
use crate::types::{Board, Path};

/// One word with its optional annotations.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub word: String,
    pub path: Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_million: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_definition: Option<bool>,
}

/// All words of one length.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LengthGroup {
    pub length: usize,
    pub words: Vec<WordEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    pub total_words: usize,
    pub longest_length: usize,
    /// Every word tied for longest, alphabetical.
    pub longest: Vec<WordEntry>,
    /// Longest group first.
    pub groups: Vec<LengthGroup>,
}

impl SearchReport {
    /// Annotate `found` with whatever collaborators are available. Missing
    /// frequency or definition data only leaves the fields empty.
    pub fn build(
        found: &FoundWords,
        frequencies: Option<&FrequencyTable>,
        definitions: Option<&HashMap<String, bool>>,
    ) -> Self {
        let entry = |word: &str, path: &Path| WordEntry {
            word: word.to_string(),
            path: path.clone(),
            per_million: frequencies.and_then(|f| f.per_million(word)),
            has_definition: definitions.and_then(|d| d.get(word).copied()),
        };

        let groups: Vec<LengthGroup> = found
            .by_length()
            .into_iter()
            .rev()
            .map(|(length, words)| LengthGroup {
                length,
                words: words
                    .into_iter()
                    .filter_map(|w| found.path(w).map(|p| entry(w, p)))
                    .collect(),
            })
            .collect();

        let longest_length = found.longest_length();
        let longest = groups
            .first()
            .map(|g| g.words.clone())
            .unwrap_or_default();

        Self {
            total_words: found.len(),
            longest_length,
            longest,
            groups,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_words == 0
    }
}

/// Search `board` and build the report. A board with no letters is
/// rejected before searching.
pub fn find_longest_word(
    finder: &WordFinder,
    board: &Board,
    frequencies: Option<&FrequencyTable>,
    definitions: Option<&HashMap<String, bool>>,
) -> Result<SearchReport> {
    if !board.has_letters() {
        return Err(BoggleError::EmptyBoard);
    }
    let found = finder.find_all_words(board);
    Ok(SearchReport::build(&found, frequencies, definitions))
}
