use crate::config::KulitanConfig;
use crate::core::{
    patterns::PatternTable,
    table::CharacterTable,
    tokenizer::Tokenizer,
    types::{PhraseTransliteration, Token, WordTransliteration},
};
use crate::error::{KulitanError, Result};
use crate::lexicon::Lexicon;
use crate::persistence::load_from_disk;
use crate::recognition::{check_drawing, DrawingVerdict, Prediction};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// The transliteration engine composes the reference tables, the tokenizer,
/// the word lexicon and an optional cache of tokenized words.
pub struct KulitanEngine {
    tokenizer: Tokenizer,
    lexicon: Lexicon,
    /// Keyed by the lowercased word; results are identical with or without it.
    cache: Option<Mutex<LruCache<String, Vec<Token>>>>,
}

impl KulitanEngine {
    pub fn from_tables(
        characters: CharacterTable,
        patterns: PatternTable,
        lexicon: Lexicon,
        cache_capacity: usize,
    ) -> Self {
        let cache = NonZeroUsize::new(cache_capacity).map(|cap| Mutex::new(LruCache::new(cap)));
        Self {
            tokenizer: Tokenizer::new(Arc::new(characters), patterns),
            lexicon,
            cache,
        }
    }

    /// Embedded tables with the default cache size.
    pub fn builtin() -> Self {
        let config = KulitanConfig::default();
        Self::from_tables(
            CharacterTable::builtin(),
            PatternTable::builtin(),
            Lexicon::builtin(),
            config.cache_capacity,
        )
    }

    pub fn from_config(config: &KulitanConfig) -> Result<Self> {
        if let Some(path) = config.snapshot_path.as_deref().filter(|p| p.exists()) {
            let (characters, patterns, lexicon) = load_from_disk(path)?.into_tables()?;
            info!(path = %path.display(), "engine loaded from snapshot");
            return Ok(Self::from_tables(characters, patterns, lexicon, config.cache_capacity));
        }

        let characters = match &config.characters_path {
            Some(p) => CharacterTable::from_json_file(p)?,
            None => CharacterTable::builtin(),
        };
        let patterns = match &config.patterns_path {
            Some(p) => PatternTable::from_toml_file(p)?,
            None => PatternTable::builtin(),
        };
        let lexicon = match &config.words_path {
            Some(p) => Lexicon::from_json_file(p)?,
            None => Lexicon::builtin(),
        };
        info!(
            characters = characters.len(),
            patterns = patterns.len(),
            words = lexicon.len(),
            "engine ready"
        );
        Ok(Self::from_tables(characters, patterns, lexicon, config.cache_capacity))
    }

    pub fn characters(&self) -> &CharacterTable {
        self.tokenizer.table()
    }

    pub fn patterns(&self) -> &PatternTable {
        self.tokenizer.patterns()
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn tokenize(&self, word: &str) -> Vec<Token> {
        let Some(cache) = &self.cache else {
            return self.tokenizer.tokenize(word);
        };

        let key = word.to_ascii_lowercase();
        if let Ok(mut guard) = cache.lock() {
            if let Some(hit) = guard.get(&key) {
                debug!(word = %key, "token cache hit");
                return hit.clone();
            }
        }

        let tokens = self.tokenizer.tokenize(&key);
        if let Ok(mut guard) = cache.lock() {
            guard.put(key, tokens.clone());
        }
        tokens
    }

    pub fn transliterate_word(&self, word: &str) -> WordTransliteration {
        WordTransliteration::from_tokens(word, self.tokenize(word))
    }

    /// Splits on whitespace and transliterates each word.
    pub fn transliterate_phrase(&self, text: &str) -> PhraseTransliteration {
        let words = text
            .split_whitespace()
            .map(|w| self.transliterate_word(w))
            .collect();
        PhraseTransliteration::from_words(words)
    }

    /// Grades a classifier prediction against the character named `name`.
    pub fn check_drawing(&self, name: &str, prediction: &Prediction) -> Result<DrawingVerdict> {
        let entry = self
            .characters()
            .find_by_name(name)
            .ok_or_else(|| KulitanError::UnknownCharacter(name.to_string()))?;
        Ok(check_drawing(entry, prediction))
    }

    pub fn cached_words(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(|c| c.lock().ok().map(|g| g.len()))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Category, CharacterEntry};

    fn engine(cache: usize) -> KulitanEngine {
        let table = CharacterTable::new(vec![
            CharacterEntry::new("1", "KA", "ka", Category::BasicConsonant),
            CharacterEntry::new("2", "NGA", "nga", Category::BasicConsonant),
            CharacterEntry::new("3", "A", "a", Category::BasicVowel),
        ])
        .unwrap();
        KulitanEngine::from_tables(table, PatternTable::builtin(), Lexicon::builtin(), cache)
    }

    #[test]
    fn phrase_reports_per_word_translatability() {
        let phrase = engine(0).transliterate_phrase("ka xyz");
        assert_eq!(phrase.words.len(), 2);

        let ka = &phrase.words[0];
        assert!(ka.translatable);
        assert_eq!((ka.resolved, ka.total), (1, 1));

        let xyz = &phrase.words[1];
        assert!(!xyz.translatable);
        assert_eq!((xyz.resolved, xyz.total), (0, 3));

        assert_eq!(phrase.translatable_words, 1);
        assert_eq!(phrase.untranslatable_words, 1);
    }

    #[test]
    fn blank_phrase_has_no_words() {
        let phrase = engine(0).transliterate_phrase(" \t\n");
        assert!(phrase.words.is_empty());
        assert_eq!(phrase.translatable_words + phrase.untranslatable_words, 0);
    }

    #[test]
    fn cache_does_not_change_results() {
        let cached = engine(4);
        let plain = engine(0);
        for word in ["kanga", "KANGA", "xyz", "kanga", ""] {
            assert_eq!(cached.tokenize(word), plain.tokenize(word));
        }
        assert_eq!(cached.cached_words(), 3);
        assert_eq!(plain.cached_words(), 0);
    }

    #[test]
    fn cache_evicts_least_recent_words() {
        let e = engine(2);
        for word in ["ka", "nga", "a", "ka"] {
            e.tokenize(word);
        }
        assert_eq!(e.cached_words(), 2);
    }

    #[test]
    fn check_drawing_looks_up_expected_character() {
        let e = engine(0);
        let verdict = e.check_drawing("nga", &Prediction::new("NGA", 0.91)).unwrap();
        assert!(verdict.correct);
        assert_eq!(verdict.expected, "NGA");
        assert!(matches!(
            e.check_drawing("zz", &Prediction::new("NGA", 0.5)),
            Err(KulitanError::UnknownCharacter(_))
        ));
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        let shared = engine(8);
        let e = &shared;
        let words = ["kanga", "nga", "xyz", "aka"];
        std::thread::scope(|s| {
            let handles: Vec<_> = words
                .iter()
                .map(|&w| s.spawn(move || e.transliterate_word(w)))
                .collect();
            for (handle, word) in handles.into_iter().zip(words) {
                let result = handle.join().unwrap();
                assert_eq!(result.tokens, engine(0).tokenize(word));
            }
        });
    }

    const SAMPLE_WORDS: [&str; 5] = ["bulan", "kanga", "ngangu", "Tra", "xyz1"];

    #[test]
    fn config_snapshot_path_loads_compiled_tables() {
        use crate::persistence::{save_to_disk, TableSnapshot};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.bin");
        let mut snapshot = TableSnapshot::builtin();
        // A shortened lexicon tells the snapshot apart from the embedded tables.
        snapshot.words.truncate(3);
        save_to_disk(&snapshot, &path).unwrap();

        let config = KulitanConfig {
            snapshot_path: Some(path),
            ..KulitanConfig::default()
        };
        let loaded = KulitanEngine::from_config(&config).unwrap();
        let builtin = KulitanEngine::builtin();
        assert_eq!(loaded.lexicon().len(), 3);
        assert_eq!(loaded.characters().len(), builtin.characters().len());
        for word in SAMPLE_WORDS {
            assert_eq!(loaded.tokenize(word), builtin.tokenize(word), "{word}");
        }
    }

    #[test]
    fn config_table_paths_load_from_files() {
        use crate::core::{patterns::BUILTIN_PATTERNS_TOML, table::BUILTIN_CHARACTERS_JSON};
        use crate::lexicon::KulitanWord;

        let dir = tempfile::tempdir().unwrap();
        let characters_path = dir.path().join("characters.json");
        let patterns_path = dir.path().join("patterns.toml");
        let words_path = dir.path().join("words.json");
        std::fs::write(&characters_path, BUILTIN_CHARACTERS_JSON).unwrap();
        std::fs::write(&patterns_path, BUILTIN_PATTERNS_TOML).unwrap();
        let words: Vec<KulitanWord> = Lexicon::builtin().words()[..2].to_vec();
        std::fs::write(&words_path, serde_json::to_string(&words).unwrap()).unwrap();

        let config = KulitanConfig {
            characters_path: Some(characters_path),
            patterns_path: Some(patterns_path),
            words_path: Some(words_path),
            // Configured but absent, so the table files are used.
            snapshot_path: Some(dir.path().join("missing.bin")),
            ..KulitanConfig::default()
        };
        let loaded = KulitanEngine::from_config(&config).unwrap();
        let builtin = KulitanEngine::builtin();
        assert_eq!(loaded.lexicon().len(), 2);
        assert_eq!(loaded.patterns(), builtin.patterns());
        for word in SAMPLE_WORDS {
            assert_eq!(loaded.tokenize(word), builtin.tokenize(word), "{word}");
        }
    }

    #[test]
    fn config_with_missing_table_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = KulitanConfig {
            characters_path: Some(dir.path().join("nope.json")),
            ..KulitanConfig::default()
        };
        assert!(matches!(
            KulitanEngine::from_config(&config),
            Err(KulitanError::Io(_))
        ));
    }

    #[test]
    fn builtin_engine_transliterates_sample_words() {
        let e = KulitanEngine::builtin();
        let bulan = e.transliterate_word("bulan");
        let syllables: Vec<&str> = bulan.tokens.iter().map(|t| t.syllable.as_str()).collect();
        assert_eq!(syllables, vec!["bu", "la", "n"]);
        assert!(bulan.tokens.iter().all(|t| t.is_resolved()));
    }
}
