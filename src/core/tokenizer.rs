// src/core/tokenizer.rs
use crate::core::patterns::PatternTable;
use crate::core::resolver::Resolver;
use crate::core::table::CharacterTable;
use crate::core::trie::PatternTrie;
use crate::core::types::Token;
use std::sync::Arc;

/// Greedy longest-match syllable tokenizer.
///
/// Both tables are injected at construction and never mutated, so a
/// tokenizer can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    table: Arc<CharacterTable>,
    patterns: PatternTable,
    trie: PatternTrie,
    resolver: Resolver,
}

impl Tokenizer {
    pub fn new(table: Arc<CharacterTable>, patterns: PatternTable) -> Self {
        Self::with_resolver(table, patterns, Resolver::default())
    }

    pub fn with_resolver(table: Arc<CharacterTable>, patterns: PatternTable, resolver: Resolver) -> Self {
        let trie = PatternTrie::build(&patterns);
        Self { table, patterns, trie, resolver }
    }

    pub fn table(&self) -> &Arc<CharacterTable> {
        &self.table
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Segments `word` left to right.
    ///
    /// The syllables of the result concatenate to the ASCII-lowercased
    /// input. Spans no pattern covers become one-character tokens without
    /// a character.
    pub fn tokenize(&self, word: &str) -> Vec<Token> {
        let normalized = word.to_ascii_lowercase();
        let mut tokens = Vec::new();
        let mut rest = normalized.as_str();

        while !rest.is_empty() {
            let (syllable, character) = match self.trie.longest_prefix(rest) {
                Some((len, _)) => {
                    let syllable = &rest[..len];
                    (syllable, self.resolver.resolve(&self.table, syllable))
                }
                None => {
                    let Some(ch) = rest.chars().next() else { break };
                    (&rest[..ch.len_utf8()], None)
                }
            };
            rest = &rest[syllable.len()..];
            tokens.push(Token {
                syllable: syllable.to_string(),
                character,
            });
        }

        tokens
    }
}
