// File: src/lexicon.rs
//! Whole-word dictionary between Kulitan script, Kapampangan, Tagalog and
//! English.

use crate::error::{KulitanError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

pub const BUILTIN_WORDS_JSON: &str = include_str!("../data/words.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KulitanWord {
    pub id: String,
    /// The word written in Kulitan script.
    pub kulitan: String,
    pub kapampangan: String,
    pub tagalog: String,
    pub english: String,
    pub pronunciation: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    EnglishToKulitan,
    TagalogToKulitan,
    KapampanganToKulitan,
    KulitanToEnglish,
    KulitanToTagalog,
    KulitanToKapampangan,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::EnglishToKulitan,
        Direction::TagalogToKulitan,
        Direction::KapampanganToKulitan,
        Direction::KulitanToEnglish,
        Direction::KulitanToTagalog,
        Direction::KulitanToKapampangan,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::EnglishToKulitan => "english-to-kulitan",
            Direction::TagalogToKulitan => "tagalog-to-kulitan",
            Direction::KapampanganToKulitan => "kapampangan-to-kulitan",
            Direction::KulitanToEnglish => "kulitan-to-english",
            Direction::KulitanToTagalog => "kulitan-to-tagalog",
            Direction::KulitanToKapampangan => "kulitan-to-kapampangan",
        }
    }

    /// Whether the source text is Kulitan script (matched verbatim after
    /// trimming) rather than a Latin-script language (matched lowercased).
    fn from_script(self) -> bool {
        matches!(
            self,
            Direction::KulitanToEnglish
                | Direction::KulitanToTagalog
                | Direction::KulitanToKapampangan
        )
    }

    fn source(self, word: &KulitanWord) -> &str {
        match self {
            Direction::EnglishToKulitan => &word.english,
            Direction::TagalogToKulitan => &word.tagalog,
            Direction::KapampanganToKulitan => &word.kapampangan,
            Direction::KulitanToEnglish
            | Direction::KulitanToTagalog
            | Direction::KulitanToKapampangan => &word.kulitan,
        }
    }

    fn target(self, word: &KulitanWord) -> &str {
        match self {
            Direction::EnglishToKulitan
            | Direction::TagalogToKulitan
            | Direction::KapampanganToKulitan => &word.kulitan,
            Direction::KulitanToEnglish => &word.english,
            Direction::KulitanToTagalog => &word.tagalog,
            Direction::KulitanToKapampangan => &word.kapampangan,
        }
    }

    fn key(self, text: &str) -> String {
        if self.from_script() {
            text.trim().to_string()
        } else {
            text.trim().to_lowercase()
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = KulitanError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str() == wanted)
            .ok_or_else(|| KulitanError::UnknownDirection(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub original_word: String,
    pub translated_word: String,
    pub word_data: Option<KulitanWord>,
    pub is_translatable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconStats {
    pub total_words: usize,
    pub categories: Vec<String>,
    pub translatable_from_english: usize,
    pub translatable_from_tagalog: usize,
    pub translatable_from_kulitan: usize,
}

#[derive(Debug, Clone)]
pub struct Lexicon {
    words: Vec<KulitanWord>,
    /// direction -> source key -> target text. Later words overwrite
    /// earlier ones with the same key.
    maps: HashMap<Direction, HashMap<String, String>>,
}

impl Lexicon {
    pub fn new(words: Vec<KulitanWord>) -> Self {
        let mut maps = HashMap::new();
        for direction in Direction::ALL {
            let map: HashMap<String, String> = words
                .iter()
                .map(|w| (direction.key(direction.source(w)), direction.target(w).to_string()))
                .collect();
            maps.insert(direction, map);
        }
        Self { words, maps }
    }

    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_WORDS_JSON).expect("embedded word list must be valid")
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let words: Vec<KulitanWord> = serde_json::from_str(json)?;
        Ok(Self::new(words))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let lexicon = Self::from_json_str(&content)?;
        debug!(path = %path.display(), words = lexicon.len(), "loaded lexicon");
        Ok(lexicon)
    }

    pub fn words(&self) -> &[KulitanWord] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn map(&self, direction: Direction) -> Option<&HashMap<String, String>> {
        self.maps.get(&direction)
    }

    pub fn translate(&self, word: &str, direction: Direction) -> TranslationResult {
        let key = direction.key(word);
        let translated = self.map(direction).and_then(|m| m.get(&key));
        let word_data = self
            .words
            .iter()
            .find(|w| direction.key(direction.source(w)) == key)
            .cloned();
        TranslationResult {
            original_word: word.to_string(),
            translated_word: translated.cloned().unwrap_or_else(|| word.to_string()),
            word_data,
            is_translatable: translated.is_some(),
        }
    }

    pub fn translate_text(&self, text: &str, direction: Direction) -> Vec<TranslationResult> {
        text.split_whitespace()
            .map(|word| self.translate(word, direction))
            .collect()
    }

    pub fn is_translatable(&self, word: &str, direction: Direction) -> bool {
        self.map(direction)
            .is_some_and(|m| m.contains_key(&direction.key(word)))
    }

    /// First word whose English, Tagalog, Kapampangan or Kulitan form matches.
    pub fn word_by_any_language(&self, search: &str) -> Option<&KulitanWord> {
        let lower = search.trim().to_lowercase();
        let trimmed = search.trim();
        self.words.iter().find(|w| {
            w.english.to_lowercase() == lower
                || w.tagalog.to_lowercase() == lower
                || w.kapampangan.to_lowercase() == lower
                || w.kulitan == trimmed
        })
    }

    pub fn words_by_category(&self, category: &str) -> Vec<&KulitanWord> {
        self.words.iter().filter(|w| w.category == category).collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for w in &self.words {
            if !out.contains(&w.category) {
                out.push(w.category.clone());
            }
        }
        out
    }

    pub fn search(&self, query: &str) -> Vec<&KulitanWord> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Vec::new();
        }
        self.words
            .iter()
            .filter(|w| {
                [&w.english, &w.tagalog, &w.kapampangan, &w.pronunciation, &w.category]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&q))
            })
            .collect()
    }

    /// Up to `count` distinct words in random order, for practice drills.
    pub fn random_words(&self, count: usize) -> Vec<&KulitanWord> {
        self.random_words_with(count, &mut rand::thread_rng())
    }

    pub fn random_words_with<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<&KulitanWord> {
        self.words.choose_multiple(rng, count).collect()
    }

    pub fn stats(&self) -> LexiconStats {
        let count = |d| self.map(d).map_or(0, HashMap::len);
        LexiconStats {
            total_words: self.words.len(),
            categories: self.categories(),
            translatable_from_english: count(Direction::EnglishToKulitan),
            translatable_from_tagalog: count(Direction::TagalogToKulitan),
            translatable_from_kulitan: count(Direction::KulitanToEnglish),
        }
    }
}
