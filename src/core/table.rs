// src/core/table.rs
use crate::core::types::{Category, CharacterEntry, Rarity};
use crate::error::{KulitanError, Result};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub const BUILTIN_CHARACTERS_JSON: &str = include_str!("../../data/characters.json");

/// Lowercased lookup keys for one entry.
#[derive(Debug, Clone)]
struct EntryKeys {
    name: String,
    pronunciation: String,
}

/// Read-only, ordered character reference table.
///
/// Table order is significant: every query that can match several entries
/// returns the first one.
#[derive(Debug, Clone)]
pub struct CharacterTable {
    entries: Vec<Arc<CharacterEntry>>,
    keys: Vec<EntryKeys>,
}

impl CharacterTable {
    pub fn new(entries: Vec<CharacterEntry>) -> Result<Self> {
        let mut ids = HashSet::new();
        for entry in &entries {
            if !ids.insert(entry.id.as_str()) {
                return Err(KulitanError::DuplicateId(entry.id.clone()));
            }
        }
        let keys = entries
            .iter()
            .map(|e| EntryKeys {
                name: e.name.to_lowercase(),
                pronunciation: e.pronunciation.to_lowercase(),
            })
            .collect();
        Ok(Self {
            entries: entries.into_iter().map(Arc::new).collect(),
            keys,
        })
    }

    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_CHARACTERS_JSON)
            .expect("embedded character table must be valid")
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<CharacterEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&content)?;
        debug!(path = %path.display(), entries = table.len(), "loaded character table");
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CharacterEntry>> {
        self.entries.iter()
    }

    /// Owned copies of the entries in table order.
    pub fn to_entries(&self) -> Vec<CharacterEntry> {
        self.entries.iter().map(|e| CharacterEntry::clone(e)).collect()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Arc<CharacterEntry>> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Exact, case-insensitive match on `name`.
    pub fn find_by_name(&self, name: &str) -> Option<&Arc<CharacterEntry>> {
        let needle = name.to_lowercase();
        self.position(|k| k.name == needle)
    }

    /// Exact, case-insensitive match on `pronunciation`.
    pub fn find_by_pronunciation(&self, pronunciation: &str) -> Option<&Arc<CharacterEntry>> {
        let needle = pronunciation.to_lowercase();
        self.position(|k| k.pronunciation == needle)
    }

    /// First entry whose name or pronunciation contains `query`, or is
    /// contained in it.
    ///
    /// Deliberately narrower than a literal two-way `contains`: an empty
    /// field is contained in every query, so placeholder rows with a blank
    /// name or pronunciation are skipped instead of matching everything.
    pub fn find_substring(&self, query: &str) -> Option<&Arc<CharacterEntry>> {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return None;
        }
        let overlaps = |field: &str| {
            !field.is_empty() && (field.contains(needle.as_str()) || needle.contains(field))
        };
        self.position(|k| overlaps(&k.name) || overlaps(&k.pronunciation))
    }

    fn position(&self, pred: impl Fn(&EntryKeys) -> bool) -> Option<&Arc<CharacterEntry>> {
        self.keys
            .iter()
            .position(pred)
            .map(|idx| &self.entries[idx])
    }

    pub fn by_category(&self, category: Category) -> Vec<Arc<CharacterEntry>> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .cloned()
            .collect()
    }

    pub fn by_rarity(&self, rarity: Rarity) -> Vec<Arc<CharacterEntry>> {
        self.entries
            .iter()
            .filter(|e| e.rarity == rarity)
            .cloned()
            .collect()
    }

    /// Free-text search over name, pronunciation, category and sound description.
    pub fn search(&self, query: &str) -> Vec<Arc<CharacterEntry>> {
        let q = query.to_lowercase();
        self.entries
            .iter()
            .zip(&self.keys)
            .filter(|(e, k)| {
                k.name.contains(&q)
                    || k.pronunciation.contains(&q)
                    || e.category.label().to_lowercase().contains(&q)
                    || e.sound_description.to_lowercase().contains(&q)
            })
            .map(|(e, _)| Arc::clone(e))
            .collect()
    }

    /// Browse filter: name contains `query`, optionally narrowed by rarity
    /// and category. No criteria returns the whole table.
    pub fn filter(
        &self,
        query: &str,
        rarity: Option<Rarity>,
        category: Option<Category>,
    ) -> Vec<Arc<CharacterEntry>> {
        let q = query.to_lowercase();
        self.entries
            .iter()
            .zip(&self.keys)
            .filter(|(e, k)| {
                k.name.contains(&q)
                    && rarity.map_or(true, |r| e.rarity == r)
                    && category.map_or(true, |c| e.category == c)
            })
            .map(|(e, _)| Arc::clone(e))
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<Category> {
        let mut out = Vec::new();
        for e in &self.entries {
            if !out.contains(&e.category) {
                out.push(e.category);
            }
        }
        out
    }

    /// Distinct rarities in first-seen order.
    pub fn rarities(&self) -> Vec<Rarity> {
        let mut out = Vec::new();
        for e in &self.entries {
            if !out.contains(&e.rarity) {
                out.push(e.rarity);
            }
        }
        out
    }
}
