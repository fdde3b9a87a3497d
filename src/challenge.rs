//! Challenge boards: boards with exactly one word of a given length and
//! nothing longer.
//!
//! Both generators are plain rejection sampling. They build a candidate,
//! run the word finder over it, and keep going until the predicate holds or
//! the attempt budget runs out. Running out is reported, never retried.

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::compose::compose;
use crate::definition::DefinitionProvider;
use crate::dice::{random_board, BOGGLE_DICE};
use crate::dictionary::MIN_WORD_LENGTH;
use crate::error::{BoggleError, Result};
use crate::finder::WordFinder;
use crate::path::find_path_for;
use crate::rng::BoardRng;
use crate::types::{Board, Path, CELL_COUNT};

/// Length of the hidden word in the classic challenge.
pub const CHALLENGE_WORD_LENGTH: usize = 8;

/// Random boards tried before giving up.
pub const RANDOM_MAX_ATTEMPTS: u32 = 1000;

/// Embeddings tried before giving up.
pub const EMBED_MAX_ATTEMPTS: u32 = 100;

/// Attempts between progress log lines.
pub const PROGRESS_INTERVAL: u32 = 100;

/// Settings for random challenge generation. Missing fields fall back to
/// the defaults when deserialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChallengeConfig {
    pub word_length: usize,
    pub max_attempts: u32,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            word_length: CHALLENGE_WORD_LENGTH,
            max_attempts: RANDOM_MAX_ATTEMPTS,
        }
    }
}

/// An accepted board and the one word that makes it a challenge.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Challenge {
    pub board: Board,
    pub word: String,
    pub path: Path,
    /// How many candidates were tried, including the accepted one.
    pub attempts: u32,
}

/// Split a word into board units. "QU" is one unit, every other letter is
/// its own unit.
pub fn split_units(word: &str) -> Vec<String> {
    let mut units = Vec::with_capacity(word.len());
    let mut chars = word.chars().peekable();
    while let Some(c) = chars.next() {
        if c == 'Q' && chars.peek() == Some(&'U') {
            chars.next();
            units.push("QU".to_string());
        } else {
            units.push(c.to_string());
        }
    }
    units
}

/// Normalize a target word and split it into units, rejecting words that
/// can't be placed or can't be found.
pub fn prepare_target(target: &str, finder: &WordFinder) -> Result<(String, Vec<String>)> {
    let word = target.trim().to_uppercase();
    if word.chars().count() < MIN_WORD_LENGTH {
        return Err(BoggleError::WordTooShort {
            word,
            min: MIN_WORD_LENGTH,
        });
    }
    let units = split_units(&word);
    if units.len() > CELL_COUNT {
        return Err(BoggleError::WordTooLong {
            units: units.len(),
            word,
        });
    }
    if !finder.words().contains(&word) {
        return Err(BoggleError::UnknownWord(word));
    }
    Ok((word, units))
}

fn log_progress(attempt: u32, max_attempts: u32) {
    if attempt % PROGRESS_INTERVAL == 0 {
        debug!("Challenge search: attempt {}/{}", attempt, max_attempts);
    }
}

/// Roll random boards until one has exactly one word of
/// `config.word_length` letters and none longer.
///
/// With a `definitions` provider the word must also be definable; a board
/// whose only candidate can't be defined is rejected like any other. The
/// future only waits on the provider; without one it completes on first poll.
pub async fn generate_challenge(
    finder: &WordFinder<'_>,
    config: &ChallengeConfig,
    definitions: Option<&dyn DefinitionProvider>,
    rng: &mut BoardRng,
) -> Result<Challenge> {
    for attempt in 1..=config.max_attempts {
        let board = random_board(&BOGGLE_DICE, rng);
        let found = finder.find_all_words(&board);

        if let Some(word) = found.unique_of_length(config.word_length) {
            let definable = match definitions {
                Some(provider) => provider.has_definition(word).await,
                None => true,
            };
            match (definable, found.path(word)) {
                (true, Some(path)) => {
                    info!("Challenge board found in {} attempts: {}", attempt, word);
                    return Ok(Challenge {
                        word: word.to_string(),
                        path: path.clone(),
                        board,
                        attempts: attempt,
                    });
                }
                _ => trace!("Attempt {}: {} has no definition", attempt, word),
            }
        }

        log_progress(attempt, config.max_attempts);
    }

    Err(BoggleError::ChallengeExhausted {
        attempts: config.max_attempts,
    })
}

/// Build a board around `target` so it is the only word of its length and
/// nothing longer exists.
pub fn embed_word(
    finder: &WordFinder,
    target: &str,
    max_attempts: u32,
    rng: &mut BoardRng,
) -> Result<Challenge> {
    let (word, units) = prepare_target(target, finder)?;

    for attempt in 1..=max_attempts {
        let path = find_path_for(&units, rng)?;
        let board = compose(&path, &units, &BOGGLE_DICE, rng)?;
        let found = finder.find_all_words(&board);

        if found.unique_of_length(word.len()) == Some(word.as_str()) {
            info!("Embedded {} after {} attempts", word, attempt);
            return Ok(Challenge {
                board,
                word,
                path,
                attempts: attempt,
            });
        }
        trace!(
            "Attempt {}: {} rivals of length >= {}",
            attempt,
            found.words().filter(|w| w.len() >= word.len() && *w != word.as_str()).count(),
            word.len()
        );

        log_progress(attempt, max_attempts);
    }

    Err(BoggleError::ChallengeExhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::definition::StaticDefinitions;
    use crate::dictionary::WordSet;
    use crate::path::find_path;
    use crate::types::is_valid_path;

    /// A dictionary with plenty of short words and a few eight-letter ones.
    fn test_words() -> WordSet {
        WordSet::from_words([
            "ATHLETES", "THEORIES", "HONESTLY", "SMOOTHLY", "ENTIRELY", "INTEREST", "MINISTER",
            "REGISTER", "MOISTURE", "QUESTION", "MOTHERS", "SISTERS", "MOTHER", "SISTER", "CAT",
            "DOG", "THE", "AND", "TEST", "WORD", "TEN", "NET", "SET", "TOE", "NOTE", "STONE",
            "QUEEN", "QUE",
        ])
    }

    #[test]
    fn test_split_units() {
        assert_eq!(split_units("QUEEN"), vec!["QU", "E", "E", "N"]);
        assert_eq!(split_units("QAT"), vec!["Q", "A", "T"]);
        assert_eq!(split_units("AQUA"), vec!["A", "QU", "A"]);
        assert_eq!(split_units("CAT"), vec!["C", "A", "T"]);
    }

    #[test]
    fn test_prepare_target_validation() {
        let words = test_words();
        let finder = WordFinder::new(&words);
        assert!(matches!(prepare_target("at", &finder), Err(BoggleError::WordTooShort { .. })));
        assert!(matches!(
            prepare_target("ABCDEFGHIJKLMNOPQ", &finder),
            Err(BoggleError::WordTooLong { units: 17, .. })
        ));
        assert_eq!(prepare_target("zzz", &finder), Err(BoggleError::UnknownWord("ZZZ".into())));

        let (word, units) = prepare_target(" question ", &finder).unwrap();
        assert_eq!(word, "QUESTION");
        assert_eq!(units.len(), 7);
    }

    #[test]
    fn test_digraph_word_fits_in_fewer_cells() {
        // 17 letters but only 16 cells once QU collapses.
        let long = "QUABCDEFGHIJKLMNO";
        assert_eq!(split_units(long).len(), 16);
        let words = WordSet::from_words([long]);
        let finder = WordFinder::new(&words);
        assert!(prepare_target(long, &finder).is_ok());
    }

    #[test]
    fn test_embed_word_unique() {
        let words = test_words();
        let finder = WordFinder::new(&words);
        let mut rng = BoardRng::from_seed(17);
        let challenge = embed_word(&finder, "athletes", EMBED_MAX_ATTEMPTS, &mut rng).unwrap();

        assert_eq!(challenge.word, "ATHLETES");
        assert!(challenge.attempts >= 1);
        assert!(is_valid_path(&challenge.path));
        assert_eq!(challenge.path.spell(&challenge.board), "ATHLETES");

        let found = finder.find_all_words(&challenge.board);
        assert_eq!(found.unique_of_length(8), Some("ATHLETES"));
        assert!(found.longer_than(8).is_empty());
    }

    #[test]
    fn test_embed_word_with_digraph() {
        let words = test_words();
        let finder = WordFinder::new(&words);
        let mut rng = BoardRng::from_seed(29);
        let challenge = embed_word(&finder, "QUESTION", EMBED_MAX_ATTEMPTS, &mut rng).unwrap();
        assert_eq!(challenge.path.len(), 7);
        assert_eq!(challenge.path.spell(&challenge.board), "QUESTION");
    }

    #[test]
    fn test_embed_word_exhausts_when_rival_is_forced() {
        // Any path spelling TEN spells NET backwards, so TEN is never unique.
        let words = WordSet::from_words(["TEN", "NET"]);
        let finder = WordFinder::new(&words);
        let mut rng = BoardRng::from_seed(2);
        let err = embed_word(&finder, "TEN", 5, &mut rng).unwrap_err();
        assert_eq!(err, BoggleError::ChallengeExhausted { attempts: 5 });
    }

    #[test]
    fn test_generate_challenge_exhaustion() {
        // No eight-letter words at all.
        let words = WordSet::from_words(["CAT", "DOG"]);
        let finder = WordFinder::new(&words);
        let config = ChallengeConfig {
            word_length: 8,
            max_attempts: 3,
        };
        let err = block_on(generate_challenge(&finder, &config, None, &mut BoardRng::from_seed(1))).unwrap_err();
        assert_eq!(err, BoggleError::ChallengeExhausted { attempts: 3 });
        assert!(err.is_exhaustion());
    }

    #[test]
    fn test_generate_challenge_short_words() {
        // Three-letter challenges are common enough to find quickly.
        let words = test_words();
        let finder = WordFinder::new(&words);
        let config = ChallengeConfig {
            word_length: 3,
            max_attempts: RANDOM_MAX_ATTEMPTS,
        };
        let challenge = block_on(generate_challenge(&finder, &config, None, &mut BoardRng::from_seed(6))).unwrap();

        let found = finder.find_all_words(&challenge.board);
        assert_eq!(found.of_length(3), vec![challenge.word.as_str()]);
        assert!(found.longer_than(3).is_empty());
        assert_eq!(challenge.path.spell(&challenge.board), challenge.word);
    }

    #[test]
    fn test_generate_challenge_requires_definition() {
        let words = test_words();
        let finder = WordFinder::new(&words);
        let config = ChallengeConfig {
            word_length: 3,
            max_attempts: 20,
        };
        let nothing_defined = StaticDefinitions::new();
        let err = block_on(generate_challenge(
            &finder,
            &config,
            Some(&nothing_defined),
            &mut BoardRng::from_seed(6),
        ))
        .unwrap_err();
        assert_eq!(err, BoggleError::ChallengeExhausted { attempts: 20 });
    }

    /// The first board `generate_challenge` rolls from `seed`, plus an
    /// eight-letter string spelled along some path on it.
    fn first_board_with_word(seed: u64) -> (Board, String) {
        let board = random_board(&BOGGLE_DICE, &mut BoardRng::from_seed(seed));
        let mut rng = BoardRng::from_seed(seed + 1000);
        loop {
            let word = find_path(CHALLENGE_WORD_LENGTH, &mut rng).unwrap().spell(&board);
            if word.len() == CHALLENGE_WORD_LENGTH {
                return (board, word);
            }
        }
    }

    #[test]
    fn test_generate_challenge_default_config() {
        let (board, word) = first_board_with_word(17);
        let words = WordSet::from_words([word.as_str(), "CAT", "DOG"]);
        let finder = WordFinder::new(&words);

        let challenge = block_on(generate_challenge(
            &finder,
            &ChallengeConfig::default(),
            None,
            &mut BoardRng::from_seed(17),
        ))
        .unwrap();

        assert_eq!(challenge.attempts, 1);
        assert_eq!(challenge.board, board);
        assert_eq!(challenge.word, word);
        assert!(is_valid_path(&challenge.path));
        assert_eq!(challenge.path.spell(&challenge.board), word);

        let found = finder.find_all_words(&challenge.board);
        assert_eq!(found.unique_of_length(CHALLENGE_WORD_LENGTH), Some(word.as_str()));
        assert!(found.longer_than(CHALLENGE_WORD_LENGTH).is_empty());
    }

    #[test]
    fn test_generate_challenge_accepts_defined_word() {
        let (_, word) = first_board_with_word(23);
        let words = WordSet::from_words([word.as_str()]);
        let finder = WordFinder::new(&words);

        let defined = StaticDefinitions::new().with_word(&word, "noun", "A test word.");
        let challenge = block_on(generate_challenge(
            &finder,
            &ChallengeConfig::default(),
            Some(&defined),
            &mut BoardRng::from_seed(23),
        ))
        .unwrap();
        assert_eq!(challenge.word, word);
        assert_eq!(challenge.attempts, 1);

        // Same board, but the word can't be defined.
        let config = ChallengeConfig {
            max_attempts: 1,
            ..ChallengeConfig::default()
        };
        let undefined = StaticDefinitions::new().with_word("CAT", "noun", "A small feline.");
        let err = block_on(generate_challenge(
            &finder,
            &config,
            Some(&undefined),
            &mut BoardRng::from_seed(23),
        ))
        .unwrap_err();
        assert_eq!(err, BoggleError::ChallengeExhausted { attempts: 1 });
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: ChallengeConfig = serde_json::from_str(r#"{"maxAttempts": 50}"#).unwrap();
        assert_eq!(config.word_length, CHALLENGE_WORD_LENGTH);
        assert_eq!(config.max_attempts, 50);
    }
}
