// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Script category of a Kulitan character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Basic Vowel")]
    BasicVowel,
    #[serde(rename = "Basic Consonant")]
    BasicConsonant,
    #[serde(rename = "Consonant with I")]
    ConsonantWithI,
    #[serde(rename = "Consonant with U")]
    ConsonantWithU,
    #[serde(rename = "Consonant with E")]
    ConsonantWithE,
    #[serde(rename = "Consonant with O")]
    ConsonantWithO,
    #[serde(rename = "Final Consonant")]
    FinalConsonant,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::BasicVowel,
        Category::BasicConsonant,
        Category::ConsonantWithI,
        Category::ConsonantWithU,
        Category::ConsonantWithE,
        Category::ConsonantWithO,
        Category::FinalConsonant,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::BasicVowel => "Basic Vowel",
            Category::BasicConsonant => "Basic Consonant",
            Category::ConsonantWithI => "Consonant with I",
            Category::ConsonantWithU => "Consonant with U",
            Category::ConsonantWithE => "Consonant with E",
            Category::ConsonantWithO => "Consonant with O",
            Category::FinalConsonant => "Final Consonant",
        }
    }

    /// Case-insensitive match on the display label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    pub const ALL: [Rarity; 3] = [Rarity::Common, Rarity::Uncommon, Rarity::Rare];

    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One record of the character reference table.
///
/// `name` and `pronunciation` are the lookup keys used by the resolver.
/// Everything else is descriptive metadata for the detail pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterEntry {
    pub id: String,
    pub name: String,
    /// The glyph shown for this character.
    pub character: String,
    pub pronunciation: String,
    pub category: Category,
    pub rarity: Rarity,
    #[serde(default)]
    pub origin: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub sound_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub uses: Vec<String>,
    #[serde(default)]
    pub characteristics: Vec<String>,
    #[serde(default)]
    pub learning_tips: String,
    #[serde(default)]
    pub writing_instructions: Option<String>,
    #[serde(default)]
    pub combinations: Vec<String>,
}

impl CharacterEntry {
    /// Minimal entry carrying only the fields the matcher looks at.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        pronunciation: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            character: String::new(),
            pronunciation: pronunciation.into(),
            category,
            rarity: Rarity::Common,
            origin: String::new(),
            kind: String::new(),
            sound_description: String::new(),
            description: String::new(),
            uses: Vec::new(),
            characteristics: Vec::new(),
            learning_tips: String::new(),
            writing_instructions: None,
            combinations: Vec::new(),
        }
    }
}

/// One segment of a tokenized word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub syllable: String,
    /// `None` when no character could be resolved for the syllable.
    pub character: Option<Arc<CharacterEntry>>,
}

impl Token {
    pub fn is_resolved(&self) -> bool {
        self.character.is_some()
    }
}

/// Tokenization of a single word plus its match summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordTransliteration {
    pub word: String,
    pub tokens: Vec<Token>,
    pub resolved: usize,
    pub total: usize,
    pub translatable: bool,
}

impl WordTransliteration {
    pub fn from_tokens(word: impl Into<String>, tokens: Vec<Token>) -> Self {
        let resolved = tokens.iter().filter(|t| t.is_resolved()).count();
        let total = tokens.len();
        Self {
            word: word.into(),
            tokens,
            resolved,
            total,
            translatable: resolved > 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseTransliteration {
    pub words: Vec<WordTransliteration>,
    pub translatable_words: usize,
    pub untranslatable_words: usize,
}

impl PhraseTransliteration {
    pub fn from_words(words: Vec<WordTransliteration>) -> Self {
        let translatable_words = words.iter().filter(|w| w.translatable).count();
        let untranslatable_words = words.len() - translatable_words;
        Self {
            words,
            translatable_words,
            untranslatable_words,
        }
    }
}
