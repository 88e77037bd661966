// --- File: src/core/trie.rs
use crate::core::patterns::PatternTable;
use std::collections::HashMap;

#[derive(Clone, Debug)]
struct TrieNode {
    children: HashMap<u8, usize>,
    /// Index into the pattern table of the pattern ending here.
    pattern_idx: Option<usize>,
}

impl TrieNode {
    fn new() -> Self {
        Self { children: HashMap::new(), pattern_idx: None }
    }
}

/// Byte trie over the syllable patterns, answering the same longest-prefix
/// question as `PatternTable::longest_prefix` in O(input length).
#[derive(Clone, Debug)]
pub struct PatternTrie {
    nodes: Vec<TrieNode>,
}

impl PatternTrie {
    pub fn build(table: &PatternTable) -> Self {
        let mut trie = Self { nodes: vec![TrieNode::new()] };
        for (idx, pattern) in table.patterns().iter().enumerate() {
            trie.insert(pattern, idx);
        }
        trie
    }

    /// The first insertion of a key keeps its index, so table priority
    /// survives duplicate patterns.
    fn insert(&mut self, key: &str, pattern_idx: usize) {
        let mut node_idx = 0;
        for &byte in key.as_bytes() {
            let next_idx = if let Some(&id) = self.nodes[node_idx].children.get(&byte) {
                id
            } else {
                let new_node_id = self.nodes.len();
                self.nodes.push(TrieNode::new());
                self.nodes[node_idx].children.insert(byte, new_node_id);
                new_node_id
            };
            node_idx = next_idx;
        }
        let node = &mut self.nodes[node_idx];
        if node.pattern_idx.is_none() {
            node.pattern_idx = Some(pattern_idx);
        }
    }

    /// Longest pattern prefixing `input` as `(byte_len, pattern_idx)`.
    ///
    /// Patterns are ASCII, so the returned length always falls on a char
    /// boundary of `input`.
    pub fn longest_prefix(&self, input: &str) -> Option<(usize, usize)> {
        let mut node_idx = 0;
        let mut best = None;
        for (depth, &byte) in input.as_bytes().iter().enumerate() {
            match self.nodes[node_idx].children.get(&byte) {
                Some(&next) => node_idx = next,
                None => break,
            }
            if let Some(idx) = self.nodes[node_idx].pattern_idx {
                best = Some((depth + 1, idx));
            }
        }
        best
    }
}
