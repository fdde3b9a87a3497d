//! WebAssembly Boggle word finder and challenge generator.
//!
//! Exports high-level functions callable from JavaScript via wasm-bindgen.
//! Boards are passed as flat arrays of 16 face strings in row-major layout:
//! `faces[row * 4 + col]` maps to JS `board[row][col]`. Structured results
//! come back as plain JS objects.

pub mod challenge;
pub mod compose;
pub mod definition;
pub mod dice;
pub mod dictionary;
pub mod error;
pub mod finder;
pub mod path;
pub mod report;
pub mod rng;
pub mod types;

pub use challenge::{embed_word, generate_challenge, Challenge, ChallengeConfig};
pub use compose::compose;
pub use definition::{check_definitions, DefinitionEntry, DefinitionProvider, StaticDefinitions};
pub use dictionary::{FrequencySource, FrequencyTable, WordSet, WordSource};
pub use error::{BoggleError, Result};
pub use finder::{FoundWord, FoundWords, WordFinder};
pub use path::find_path;
pub use report::{find_longest_word, SearchReport};
pub use rng::BoardRng;
pub use types::{neighbors, Board, Cell, Path};

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use std::rc::Rc;

    use futures::future::{FutureExt, LocalBoxFuture};
    use js_sys::Promise;
    use serde::Serialize;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::{future_to_promise, JsFuture};

    use crate::challenge::{self, ChallengeConfig, EMBED_MAX_ATTEMPTS};
    use crate::definition::{check_definitions, DefinitionEntry, DefinitionProvider, DEFINITION_BATCH_SIZE};
    use crate::dictionary::{TextWordSource, WordSet, WordSource};
    use crate::error::BoggleError;
    use crate::finder::WordFinder;
    use crate::rng::BoardRng;
    use crate::types::Board;
    use crate::{dice, path, report};

    fn js_error(err: impl ToString) -> JsError {
        JsError::new(&err.to_string())
    }

    fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
        value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(js_error)
    }

    fn board_from_js(faces: JsValue) -> Result<Board, JsError> {
        let faces: Vec<String> = serde_wasm_bindgen::from_value(faces).map_err(js_error)?;
        Board::from_faces(faces).map_err(js_error)
    }

    /// A loaded word list, kept on the WASM side between calls.
    #[wasm_bindgen]
    pub struct Dictionary {
        words: Rc<WordSet>,
    }

    #[wasm_bindgen]
    impl Dictionary {
        /// Build from word list text, one word per line. Fails when the text
        /// holds no usable words.
        #[wasm_bindgen(constructor)]
        pub fn new(text: &str) -> Result<Dictionary, JsError> {
            let words = TextWordSource::new("dictionary", text).load().map_err(js_error)?;
            Ok(Dictionary { words: Rc::new(words) })
        }

        #[wasm_bindgen(getter)]
        pub fn size(&self) -> usize {
            self.words.len()
        }

        pub fn contains(&self, word: &str) -> bool {
            self.words.contains(&word.trim().to_uppercase())
        }
    }

    /// Definitions supplied by a JS callback. The callback gets the word and
    /// returns (or resolves a Promise to) a definition entry object, `true`,
    /// or a falsy value.
    struct JsDefinitions {
        lookup: js_sys::Function,
    }

    impl JsDefinitions {
        async fn fetch(&self, word: &str) -> crate::error::Result<Option<DefinitionEntry>> {
            let unavailable = |reason: String| BoggleError::DefinitionUnavailable {
                word: word.to_string(),
                reason,
            };
            let mut value = self
                .lookup
                .call1(&JsValue::NULL, &JsValue::from_str(word))
                .map_err(|e| unavailable(format!("{:?}", e)))?;
            if value.is_instance_of::<Promise>() {
                value = JsFuture::from(value.unchecked_into::<Promise>())
                    .await
                    .map_err(|e| unavailable(format!("{:?}", e)))?;
            }

            if value.is_null() || value.is_undefined() || value.as_bool() == Some(false) {
                return Ok(None);
            }
            if value.as_bool() == Some(true) {
                return Ok(Some(DefinitionEntry {
                    word: word.to_string(),
                    phonetic: None,
                    meanings: Vec::new(),
                }));
            }
            serde_wasm_bindgen::from_value(value)
                .map(Some)
                .map_err(|e| unavailable(e.to_string()))
        }
    }

    impl DefinitionProvider for JsDefinitions {
        fn define<'a>(&'a self, word: &'a str) -> LocalBoxFuture<'a, crate::error::Result<Option<DefinitionEntry>>> {
            self.fetch(word).boxed_local()
        }
    }

    /// All words on the board with their paths: `[{ word, path: [{row, col}] }]`.
    #[wasm_bindgen(js_name = "findAllWords")]
    pub fn wasm_find_all_words(dictionary: &Dictionary, faces: JsValue) -> Result<JsValue, JsError> {
        let board = board_from_js(faces)?;
        let found = WordFinder::new(&dictionary.words).find_all_words(&board);
        to_js(&found.into_found())
    }

    /// Longest-word report, as a Promise. `define` is an optional callback
    /// (sync or Promise-returning) used to flag which words have definitions;
    /// at most `DEFINITION_BATCH_SIZE` lookups are pending at once.
    #[wasm_bindgen(js_name = "findLongestWord")]
    pub fn wasm_find_longest_word(
        dictionary: &Dictionary,
        faces: JsValue,
        define: Option<js_sys::Function>,
    ) -> Result<Promise, JsError> {
        let board = board_from_js(faces)?;
        if !board.has_letters() {
            return Err(js_error(BoggleError::EmptyBoard));
        }
        let found = WordFinder::new(&dictionary.words).find_all_words(&board);

        Ok(future_to_promise(async move {
            let checks = match define {
                Some(lookup) => {
                    let words: Vec<&str> = found.words().collect();
                    Some(check_definitions(&JsDefinitions { lookup }, &words, DEFINITION_BATCH_SIZE).await)
                }
                None => None,
            };
            to_js(&report::SearchReport::build(&found, None, checks.as_ref())).map_err(JsValue::from)
        }))
    }

    /// A fully random board as 4 rows of faces.
    #[wasm_bindgen(js_name = "randomBoard")]
    pub fn wasm_random_board(seed: Option<u32>) -> Result<JsValue, JsError> {
        let mut rng = BoardRng::from_optional_seed(seed.map(u64::from));
        to_js(&dice::random_board(&dice::BOGGLE_DICE, &mut rng).to_rows())
    }

    /// Random board with exactly one word of `config.wordLength` letters, as
    /// a Promise resolving to `{ board, word, path, attempts }`. With `define`
    /// (sync or Promise-returning) the word must also have a definition.
    #[wasm_bindgen(js_name = "generateChallenge")]
    pub fn wasm_generate_challenge(
        dictionary: &Dictionary,
        config: JsValue,
        define: Option<js_sys::Function>,
        seed: Option<u32>,
    ) -> Result<Promise, JsError> {
        let config: ChallengeConfig = if config.is_undefined() || config.is_null() {
            ChallengeConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(js_error)?
        };
        let words = Rc::clone(&dictionary.words);
        let provider = define.map(|lookup| JsDefinitions { lookup });

        Ok(future_to_promise(async move {
            let finder = WordFinder::new(&words);
            let mut rng = BoardRng::from_optional_seed(seed.map(u64::from));
            let result = challenge::generate_challenge(
                &finder,
                &config,
                provider.as_ref().map(|p| p as &dyn DefinitionProvider),
                &mut rng,
            )
            .await;
            result
                .map_err(|e| JsValue::from(js_error(e)))
                .and_then(|accepted| to_js(&accepted).map_err(JsValue::from))
        }))
    }

    /// Board on which `target` is the unique longest word.
    #[wasm_bindgen(js_name = "embedWord")]
    pub fn wasm_embed_word(
        dictionary: &Dictionary,
        target: &str,
        seed: Option<u32>,
    ) -> Result<JsValue, JsError> {
        let finder = WordFinder::new(&dictionary.words);
        let mut rng = BoardRng::from_optional_seed(seed.map(u64::from));
        let result = challenge::embed_word(&finder, target, EMBED_MAX_ATTEMPTS, &mut rng).map_err(js_error)?;
        to_js(&result)
    }

    /// Random simple path of `length` cells.
    #[wasm_bindgen(js_name = "findPath")]
    pub fn wasm_find_path(length: usize, seed: Option<u32>) -> Result<JsValue, JsError> {
        let mut rng = BoardRng::from_optional_seed(seed.map(u64::from));
        to_js(&path::find_path(length, &mut rng).map_err(js_error)?)
    }

    /// Parse a dictionary API response body into a display summary, or `null`.
    #[wasm_bindgen(js_name = "parseDefinition")]
    pub fn wasm_parse_definition(body: &str) -> Result<JsValue, JsError> {
        match DefinitionEntry::from_api_json(body).map_err(js_error)? {
            Some(entry) => to_js(&entry.summary()),
            None => Ok(JsValue::NULL),
        }
    }

    /// Ping function to verify WASM is loaded.
    #[wasm_bindgen(js_name = "ping")]
    pub fn wasm_ping() -> String {
        "WASM boggle ready".to_string()
    }
}
