//! Word lists and frequency tables, loaded through injected sources.
//!
//! The engine only ever sees immutable snapshots (`WordSet`,
//! `FrequencyTable`); how the text got here (fetch, disk, bundled) is the
//! caller's business.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use log::{debug, warn};

use crate::error::{BoggleError, Result};

/// Shortest word the finder will report.
pub const MIN_WORD_LENGTH: usize = 3;

/// Uppercase dictionary words of length >= `MIN_WORD_LENGTH`, exact membership only.
#[derive(Clone, Debug, Default)]
pub struct WordSet {
    words: HashSet<String>,
    max_len: usize,
}

impl WordSet {
    /// Parse a word list with one word per line. Lines are trimmed and
    /// uppercased; anything shorter than three letters is dropped.
    pub fn from_text(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: HashSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| w.len() >= MIN_WORD_LENGTH)
            .collect();
        let max_len = words.iter().map(String::len).max().unwrap_or(0);
        Self { words, max_len }
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Length of the longest word, 0 when empty.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Somewhere a dictionary comes from.
pub trait WordSource {
    /// Load the full word set. A source that yields nothing is an error,
    /// never an empty dictionary.
    fn load(&self) -> Result<WordSet>;
}

/// Word list already held in memory (e.g. fetched by the JS side).
pub struct TextWordSource {
    name: String,
    text: String,
}

impl TextWordSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl WordSource for TextWordSource {
    fn load(&self) -> Result<WordSet> {
        non_empty(&self.name, WordSet::from_text(&self.text))
    }
}

/// Word list on disk, one word per line.
pub struct FileWordSource {
    path: PathBuf,
}

impl FileWordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WordSource for FileWordSource {
    fn load(&self) -> Result<WordSet> {
        let name = self.path.display().to_string();
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| BoggleError::source_unavailable(name.clone(), e))?;
        non_empty(&name, WordSet::from_text(&text))
    }
}

fn non_empty(name: &str, words: WordSet) -> Result<WordSet> {
    if words.is_empty() {
        return Err(BoggleError::source_unavailable(name, "no words of 3+ letters"));
    }
    debug!("Dictionary {} loaded: {} words", name, words.len());
    Ok(words)
}

/// Word -> uses per million.
#[derive(Clone, Debug, Default)]
pub struct FrequencyTable {
    per_million: HashMap<String, f64>,
}

impl FrequencyTable {
    /// Build from base-10 log frequencies (uses per million = 10^log).
    pub fn from_log_frequencies<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let per_million = entries
            .into_iter()
            .map(|(w, log)| (w.as_ref().trim().to_uppercase(), 10f64.powf(log)))
            .collect();
        Self { per_million }
    }

    /// Parse `WORD LOG10FREQ` lines (whitespace or comma separated).
    /// Malformed lines are skipped.
    pub fn parse(text: &str) -> Self {
        let mut entries = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split(|c: char| c == ',' || c.is_whitespace()).filter(|p| !p.is_empty());
            match (parts.next(), parts.next().map(str::parse::<f64>)) {
                (Some(word), Some(Ok(log))) if log.is_finite() => entries.push((word, log)),
                _ => warn!("Skipping malformed frequency line {}: {:?}", lineno + 1, line),
            }
        }
        Self::from_log_frequencies(entries)
    }

    pub fn per_million(&self, word: &str) -> Option<f64> {
        self.per_million.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.per_million.len()
    }

    pub fn is_empty(&self) -> bool {
        self.per_million.is_empty()
    }
}

/// Optional source of word frequencies.
pub trait FrequencySource {
    fn load(&self) -> Result<FrequencyTable>;
}

pub struct TextFrequencySource {
    name: String,
    text: String,
}

impl TextFrequencySource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl FrequencySource for TextFrequencySource {
    fn load(&self) -> Result<FrequencyTable> {
        let table = FrequencyTable::parse(&self.text);
        if table.is_empty() {
            return Err(BoggleError::source_unavailable(self.name.clone(), "no frequency entries"));
        }
        Ok(table)
    }
}
