// src/core/resolver.rs
use crate::core::table::CharacterTable;
use crate::core::types::CharacterEntry;
use std::sync::Arc;

/// Consonants that take the inherent vowel when written bare.
const CONSONANTS: &str = "bcdfghjklmnpqrstvwxyz";

pub const INHERENT_VOWEL: char = 'a';

/// One way of turning a syllable into a character entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    ExactName,
    ExactPronunciation,
    /// A bare consonant retried as consonant + `a`.
    InherentVowel,
    Substring,
}

impl Strategy {
    pub fn resolve(self, table: &CharacterTable, syllable: &str) -> Option<Arc<CharacterEntry>> {
        match self {
            Strategy::ExactName => table.find_by_name(syllable).cloned(),
            Strategy::ExactPronunciation => table.find_by_pronunciation(syllable).cloned(),
            Strategy::InherentVowel => {
                if !is_bare_consonant(syllable) {
                    return None;
                }
                let with_vowel = format!("{syllable}{INHERENT_VOWEL}");
                Strategy::ExactName
                    .resolve(table, &with_vowel)
                    .or_else(|| Strategy::ExactPronunciation.resolve(table, &with_vowel))
            }
            Strategy::Substring => table.find_substring(syllable).cloned(),
        }
    }
}

fn is_bare_consonant(s: &str) -> bool {
    let mut chars = s.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if CONSONANTS.contains(c.to_ascii_lowercase()))
}

/// Ordered chain of strategies; the first one that finds an entry wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolver {
    strategies: Vec<Strategy>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(vec![
            Strategy::ExactName,
            Strategy::ExactPronunciation,
            Strategy::InherentVowel,
            Strategy::Substring,
        ])
    }
}

impl Resolver {
    pub fn new(strategies: Vec<Strategy>) -> Self {
        Self { strategies }
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    pub fn resolve(&self, table: &CharacterTable, syllable: &str) -> Option<Arc<CharacterEntry>> {
        self.resolve_traced(table, syllable).map(|(entry, _)| entry)
    }

    /// Like `resolve`, also reporting which strategy produced the entry.
    pub fn resolve_traced(
        &self,
        table: &CharacterTable,
        syllable: &str,
    ) -> Option<(Arc<CharacterEntry>, Strategy)> {
        self.strategies
            .iter()
            .find_map(|&s| s.resolve(table, syllable).map(|entry| (entry, s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Category;

    fn table() -> CharacterTable {
        CharacterTable::new(vec![
            CharacterEntry::new("1", "KA", "ka", Category::BasicConsonant),
            CharacterEntry::new("2", "NGA", "nga", Category::BasicConsonant),
            CharacterEntry::new("3", "A", "a", Category::BasicVowel),
            CharacterEntry::new("4", "gí/î", "gi", Category::ConsonantWithI),
            CharacterEntry::new("5", "TANG", "tang", Category::FinalConsonant),
        ])
        .unwrap()
    }

    fn id(entry: Option<Arc<CharacterEntry>>) -> Option<String> {
        entry.map(|e| e.id.clone())
    }

    #[test]
    fn exact_name_strategy() {
        let t = table();
        assert_eq!(id(Strategy::ExactName.resolve(&t, "nga")), Some("2".into()));
        assert_eq!(id(Strategy::ExactName.resolve(&t, "gi")), None);
    }

    #[test]
    fn exact_pronunciation_strategy() {
        let t = table();
        assert_eq!(id(Strategy::ExactPronunciation.resolve(&t, "gi")), Some("4".into()));
    }

    #[test]
    fn inherent_vowel_only_applies_to_bare_consonants() {
        let t = table();
        assert_eq!(id(Strategy::InherentVowel.resolve(&t, "k")), Some("1".into()));
        assert_eq!(id(Strategy::InherentVowel.resolve(&t, "a")), None);
        assert_eq!(id(Strategy::InherentVowel.resolve(&t, "ng")), None);
        assert_eq!(id(Strategy::InherentVowel.resolve(&t, "x")), None);
    }

    #[test]
    fn substring_strategy() {
        let t = table();
        assert_eq!(id(Strategy::Substring.resolve(&t, "/î")), Some("4".into()));
        assert_eq!(id(Strategy::Substring.resolve(&t, "n")), Some("2".into()));
        // "tan" contains "a", and A comes before TANG in table order.
        assert_eq!(id(Strategy::Substring.resolve(&t, "tan")), Some("3".into()));
    }

    #[test]
    fn chain_order_decides_the_winner() {
        let t = table();
        let resolver = Resolver::default();
        let (entry, strategy) = resolver.resolve_traced(&t, "k").unwrap();
        assert_eq!((entry.id.as_str(), strategy), ("1", Strategy::InherentVowel));

        let (_, strategy) = resolver.resolve_traced(&t, "ka").unwrap();
        assert_eq!(strategy, Strategy::ExactName);

        // "g" has no exact or "ga" entry, so it falls through to substring.
        let (entry, strategy) = resolver.resolve_traced(&t, "g").unwrap();
        assert_eq!((entry.id.as_str(), strategy), ("2", Strategy::Substring));

        assert!(resolver.resolve(&t, "x").is_none());
    }

    #[test]
    fn custom_chain_without_substring() {
        let t = table();
        let strict = Resolver::new(vec![Strategy::ExactName, Strategy::ExactPronunciation]);
        assert!(strict.resolve(&t, "g").is_none());
        assert!(strict.resolve(&t, "k").is_none());
        assert_eq!(strict.strategies().len(), 2);
    }
}
