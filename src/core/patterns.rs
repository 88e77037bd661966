// src/core/patterns.rs
use crate::error::{KulitanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

pub const BUILTIN_PATTERNS_TOML: &str = include_str!("../../data/patterns.toml");

/// Longest syllable pattern the table accepts.
pub const MAX_PATTERN_LEN: usize = 5;

#[derive(Deserialize)]
struct PatternFile {
    patterns: Vec<String>,
}

/// Ordered list of romanized syllable patterns.
///
/// Position in the list is priority: when two patterns of the same length
/// both match, the earlier one wins. Every letter `a`-`z` is always present
/// so that any ASCII word can be fully segmented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternTable {
    patterns: Vec<String>,
}

impl PatternTable {
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for raw in patterns {
            let pattern = normalize_pattern(raw.as_ref())?;
            if seen.insert(pattern.clone()) {
                ordered.push(pattern);
            }
        }

        let mut filled = 0;
        for letter in 'a'..='z' {
            let single = letter.to_string();
            if seen.insert(single.clone()) {
                ordered.push(single);
                filled += 1;
            }
        }
        if filled > 0 {
            debug!(filled, "appended missing single-letter fallback patterns");
        }

        Ok(Self { patterns: ordered })
    }

    /// The embedded default table.
    pub fn builtin() -> Self {
        Self::from_toml_str(BUILTIN_PATTERNS_TOML).expect("embedded pattern table must be valid")
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let file: PatternFile = toml::from_str(toml_str)?;
        Self::new(file.patterns)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), patterns = table.len(), "loaded pattern table");
        Ok(table)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.iter().any(|p| p == pattern)
    }

    /// Linear scan for the longest pattern that prefixes `input`.
    /// Returns the pattern's index in the table.
    pub fn longest_prefix(&self, input: &str) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (idx, pattern) in self.patterns.iter().enumerate() {
            if !input.starts_with(pattern.as_str()) {
                continue;
            }
            match best {
                Some(b) if self.patterns[b].len() >= pattern.len() => {}
                _ => best = Some(idx),
            }
        }
        best
    }
}

fn normalize_pattern(raw: &str) -> Result<String> {
    let pattern = raw.trim().to_ascii_lowercase();
    let invalid = |reason: &str| KulitanError::InvalidPattern {
        pattern: raw.to_string(),
        reason: reason.to_string(),
    };
    if pattern.is_empty() {
        return Err(invalid("pattern is empty"));
    }
    if !pattern.bytes().all(|b| b.is_ascii_lowercase()) {
        return Err(invalid("only latin letters a-z are allowed"));
    }
    if pattern.len() > MAX_PATTERN_LEN {
        return Err(invalid("longer than five letters"));
    }
    Ok(pattern)
}
