//! Property tests for the syllable tokenizer.

use kulitan_core::core::patterns::PatternTable;
use kulitan_core::core::table::CharacterTable;
use kulitan_core::core::tokenizer::Tokenizer;
use kulitan_core::core::trie::PatternTrie;
use proptest::prelude::*;
use std::sync::Arc;

fn builtin_tokenizer() -> Tokenizer {
    Tokenizer::new(Arc::new(CharacterTable::builtin()), PatternTable::builtin())
}

fn arb_romanized() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::sample::select(vec!['a', 'i', 'u', 'e', 'o']),
            4 => prop::sample::select(vec!['k', 'g', 't', 'd', 'n', 'l', 's', 'm', 'p', 'b']),
            2 => Just('g'),
            1 => prop::sample::select(vec!['x', 'r', 'y', 'w', 'K', 'A', 'N', 'G']),
        ],
        0..12,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn syllables_reconstruct_the_input(word in arb_romanized()) {
        let tokens = builtin_tokenizer().tokenize(&word);
        let joined: String = tokens.iter().map(|t| t.syllable.as_str()).collect();
        prop_assert_eq!(joined, word.to_ascii_lowercase());
        prop_assert!(tokens.iter().all(|t| !t.syllable.is_empty()));
    }

    #[test]
    fn any_string_is_tokenized(word in any::<String>()) {
        let tokens = builtin_tokenizer().tokenize(&word);
        let joined: String = tokens.iter().map(|t| t.syllable.as_str()).collect();
        prop_assert_eq!(joined, word.to_ascii_lowercase());
    }

    #[test]
    fn tokenization_is_deterministic(word in arb_romanized()) {
        let t = builtin_tokenizer();
        prop_assert_eq!(t.tokenize(&word), t.tokenize(&word));
    }

    #[test]
    fn every_token_is_the_longest_available_pattern(word in arb_romanized()) {
        let t = builtin_tokenizer();
        let patterns = t.patterns();
        let normalized = word.to_ascii_lowercase();
        let mut rest = normalized.as_str();
        for token in t.tokenize(&word) {
            let longest = patterns
                .patterns()
                .iter()
                .filter(|p| rest.starts_with(p.as_str()))
                .map(|p| p.len())
                .max()
                .unwrap_or(1);
            prop_assert_eq!(token.syllable.len(), longest);
            rest = &rest[token.syllable.len()..];
        }
        prop_assert!(rest.is_empty());
    }

    #[test]
    fn trie_agrees_with_linear_scan(
        patterns in prop::collection::vec("[a-z]{1,5}", 0..30),
        input in "[a-z0-9]{0,8}",
    ) {
        let table = PatternTable::new(&patterns).unwrap();
        let trie = PatternTrie::build(&table);
        let linear = table.longest_prefix(&input);
        let fast = trie.longest_prefix(&input).map(|(_, idx)| idx);
        prop_assert_eq!(linear, fast);
    }
}
