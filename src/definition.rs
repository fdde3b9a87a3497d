//! Definition lookups.
//!
//! The lookup itself is an injected `DefinitionProvider`; this module only
//! knows the entry shape (the free dictionary API format), how to trim an
//! entry for display, and how to check many words in small batches.
//!
//! Lookups are futures because real providers go over the network. They are
//! `!Send` (`LocalBoxFuture`) so a provider can wrap a JS promise.

use std::collections::{HashMap, HashSet};

use futures::future::{self, join_all, LocalBoxFuture};
use futures::FutureExt;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{BoggleError, Result};

/// Words checked per batch, which is also the most lookups in flight at once.
pub const DEFINITION_BATCH_SIZE: usize = 10;

/// Meanings kept by [`DefinitionEntry::summary`].
const SUMMARY_MEANINGS: usize = 3;
/// Definitions kept per meaning by [`DefinitionEntry::summary`].
const SUMMARY_SENSES: usize = 2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sense {
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Sense>,
}

/// One dictionary entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionEntry {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

impl DefinitionEntry {
    /// Parse an API response body (a JSON array of entries) and keep the
    /// first entry. An empty array means the word has no definition.
    pub fn from_api_json(body: &str) -> Result<Option<Self>> {
        let entries: Vec<DefinitionEntry> =
            serde_json::from_str(body).map_err(|e| BoggleError::MalformedDefinition(e.to_string()))?;
        Ok(entries.into_iter().next())
    }

    /// The display form: at most three meanings with two definitions each.
    pub fn summary(&self) -> Self {
        Self {
            word: self.word.clone(),
            phonetic: self.phonetic.clone(),
            meanings: self
                .meanings
                .iter()
                .take(SUMMARY_MEANINGS)
                .map(|m| Meaning {
                    part_of_speech: m.part_of_speech.clone(),
                    definitions: m.definitions.iter().take(SUMMARY_SENSES).cloned().collect(),
                })
                .collect(),
        }
    }
}

/// Something that can define words. Possibly slow or networked.
pub trait DefinitionProvider {
    /// Look up `word`. `Ok(None)` means the provider answered and has nothing.
    fn define<'a>(&'a self, word: &'a str) -> LocalBoxFuture<'a, Result<Option<DefinitionEntry>>>;

    /// True when a definition exists. Lookup failures count as "no".
    fn has_definition<'a>(&'a self, word: &'a str) -> LocalBoxFuture<'a, bool> {
        self.define(word)
            .map(|answer| matches!(answer, Ok(Some(_))))
            .boxed_local()
    }
}

/// In-memory provider keyed by uppercase word.
#[derive(Clone, Debug, Default)]
pub struct StaticDefinitions {
    entries: HashMap<String, DefinitionEntry>,
}

impl StaticDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: DefinitionEntry) {
        self.entries.insert(entry.word.to_uppercase(), entry);
    }

    /// Register a word with a single bare definition.
    pub fn with_word(mut self, word: &str, part_of_speech: &str, definition: &str) -> Self {
        self.insert(DefinitionEntry {
            word: word.to_string(),
            phonetic: None,
            meanings: vec![Meaning {
                part_of_speech: part_of_speech.to_string(),
                definitions: vec![Sense {
                    definition: definition.to_string(),
                    example: None,
                }],
            }],
        });
        self
    }

    pub fn get(&self, word: &str) -> Option<&DefinitionEntry> {
        self.entries.get(&word.to_uppercase())
    }
}

impl DefinitionProvider for StaticDefinitions {
    fn define<'a>(&'a self, word: &'a str) -> LocalBoxFuture<'a, Result<Option<DefinitionEntry>>> {
        future::ready(Ok(self.get(word).cloned())).boxed_local()
    }
}

/// Check which words have definitions.
///
/// Duplicates are looked up once. Each batch of `batch_size` words is in
/// flight together and the next batch starts when all of them have
/// answered. The result is keyed by word, so it does not matter in which
/// order a provider's answers arrive.
pub async fn check_definitions<P, S>(provider: &P, words: &[S], batch_size: usize) -> HashMap<String, bool>
where
    P: DefinitionProvider + ?Sized,
    S: AsRef<str>,
{
    let mut seen = HashSet::with_capacity(words.len());
    let unique: Vec<&str> = words
        .iter()
        .map(|w| w.as_ref())
        .filter(|w| seen.insert(*w))
        .collect();

    let mut checks = HashMap::with_capacity(unique.len());
    for (i, batch) in unique.chunks(batch_size.max(1)).enumerate() {
        let answers = join_all(
            batch
                .iter()
                .map(|&word| async move { (word, provider.has_definition(word).await) }),
        )
        .await;
        debug!("Definition batch {} checked ({} words)", i + 1, batch.len());
        checks.extend(answers.into_iter().map(|(word, ok)| (word.to_string(), ok)));
    }
    checks
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use futures::executor::block_on;

    use super::*;

    const API_BODY: &str = r#"[
        {
            "word": "grace",
            "phonetic": "/ɡɹeɪs/",
            "meanings": [
                {"partOfSpeech": "noun", "definitions": [
                    {"definition": "Elegant movement.", "example": "She moved with grace."},
                    {"definition": "Free and undeserved favour."},
                    {"definition": "A short prayer before a meal."}
                ]},
                {"partOfSpeech": "verb", "definitions": [{"definition": "To adorn."}]},
                {"partOfSpeech": "adjective", "definitions": []},
                {"partOfSpeech": "interjection", "definitions": [{"definition": "Unused."}]}
            ]
        },
        {"word": "grace", "meanings": []}
    ]"#;

    #[test]
    fn test_parse_api_body() {
        let entry = DefinitionEntry::from_api_json(API_BODY).unwrap().unwrap();
        assert_eq!(entry.word, "grace");
        assert_eq!(entry.phonetic.as_deref(), Some("/ɡɹeɪs/"));
        assert_eq!(entry.meanings.len(), 4);
        assert_eq!(entry.meanings[0].definitions[0].example.as_deref(), Some("She moved with grace."));
    }

    #[test]
    fn test_summary_trims() {
        let entry = DefinitionEntry::from_api_json(API_BODY).unwrap().unwrap();
        let summary = entry.summary();
        assert_eq!(summary.meanings.len(), 3);
        assert_eq!(summary.meanings[0].definitions.len(), 2);
        assert_eq!(summary.meanings[1].part_of_speech, "verb");
    }

    #[test]
    fn test_empty_and_malformed_bodies() {
        assert_eq!(DefinitionEntry::from_api_json("[]").unwrap(), None);
        let err = DefinitionEntry::from_api_json("{\"title\": \"No Definitions Found\"}").unwrap_err();
        assert!(matches!(err, BoggleError::MalformedDefinition(_)));
        assert!(!err.to_string().contains("\"\""));
    }

    #[test]
    fn test_serializes_camel_case() {
        let defs = StaticDefinitions::new().with_word("cat", "noun", "A small feline.");
        let entry = block_on(defs.define("CAT")).unwrap().unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["meanings"][0]["partOfSpeech"], "noun");
        assert!(json.get("phonetic").is_none());
    }

    struct Flaky;

    impl DefinitionProvider for Flaky {
        fn define<'a>(&'a self, word: &'a str) -> LocalBoxFuture<'a, Result<Option<DefinitionEntry>>> {
            let answer = if word.starts_with('Q') {
                Err(BoggleError::DefinitionUnavailable {
                    word: word.to_string(),
                    reason: "HTTP 503".to_string(),
                })
            } else if word.len() > 3 {
                Ok(None)
            } else {
                Ok(StaticDefinitions::new().with_word(word, "noun", "x").get(word).cloned())
            };
            future::ready(answer).boxed_local()
        }
    }

    #[test]
    fn test_check_definitions_merges_by_word() {
        let words: Vec<String> = ["CAT", "QUIZ", "ZEPHYR", "DOG", "CAT"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        let checks = block_on(check_definitions(&Flaky, &words, 2));
        assert_eq!(checks.len(), 4);
        assert!(checks["CAT"]);
        assert!(checks["DOG"]);
        // Failures degrade to "no definition".
        assert!(!checks["QUIZ"]);
        assert!(!checks["ZEPHYR"]);
    }

    /// Pending for the given number of polls, then ready.
    struct Polls(u32);

    impl Future for Polls {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 == 0 {
                return Poll::Ready(());
            }
            self.0 -= 1;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }

    /// Words asked earlier take longer to answer; three-letter words are defined.
    #[derive(Default)]
    struct Slow {
        started: Cell<u32>,
        in_flight: Cell<usize>,
        peak: Cell<usize>,
        answered: RefCell<Vec<String>>,
    }

    impl DefinitionProvider for Slow {
        fn define<'a>(&'a self, word: &'a str) -> LocalBoxFuture<'a, Result<Option<DefinitionEntry>>> {
            async move {
                let delay = 50 - self.started.get();
                self.started.set(self.started.get() + 1);
                self.in_flight.set(self.in_flight.get() + 1);
                self.peak.set(self.peak.get().max(self.in_flight.get()));

                Polls(delay).await;

                self.in_flight.set(self.in_flight.get() - 1);
                self.answered.borrow_mut().push(word.to_string());
                let answer: Result<Option<DefinitionEntry>> = Ok((word.len() == 3).then(|| DefinitionEntry {
                    word: word.to_string(),
                    phonetic: None,
                    meanings: Vec::new(),
                }));
                answer
            }
            .boxed_local()
        }
    }

    #[test]
    fn test_batches_run_together_and_answers_arrive_out_of_order() {
        let words = [
            "CAT", "NOTE", "DOG", "STONE", "TEN", "QUEEN", "NET", "TOES", "SET", "MOTHER", "AND", "WORD",
        ];
        let slow = Slow::default();
        let checks = block_on(check_definitions(&slow, &words, 5));

        // Every lookup of a batch was in flight at once, never more.
        assert_eq!(slow.peak.get(), 5);
        assert_eq!(slow.started.get(), 12);

        // Within the first batch the last word asked answered first.
        let answered = slow.answered.borrow();
        assert_eq!(&answered[..5], &["TEN", "STONE", "DOG", "NOTE", "CAT"]);
        assert_ne!(answered.as_slice(), &words[..]);

        assert_eq!(checks.len(), words.len());
        for word in words {
            assert_eq!(checks[word], word.len() == 3, "{}", word);
        }
    }
}
