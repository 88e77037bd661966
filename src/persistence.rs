// File: src/persistence.rs
use crate::core::patterns::PatternTable;
use crate::core::table::CharacterTable;
use crate::core::types::CharacterEntry;
use crate::error::Result;
use crate::lexicon::{KulitanWord, Lexicon};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// All reference tables in one compact file, so startup skips JSON/TOML
/// parsing.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TableSnapshot {
    pub characters: Vec<CharacterEntry>,
    pub patterns: PatternTable,
    pub words: Vec<KulitanWord>,
}

impl TableSnapshot {
    pub fn capture(characters: &CharacterTable, patterns: &PatternTable, lexicon: &Lexicon) -> Self {
        Self {
            characters: characters.to_entries(),
            patterns: patterns.clone(),
            words: lexicon.words().to_vec(),
        }
    }

    pub fn builtin() -> Self {
        Self::capture(&CharacterTable::builtin(), &PatternTable::builtin(), &Lexicon::builtin())
    }

    /// Re-validates the stored tables.
    pub fn into_tables(self) -> Result<(CharacterTable, PatternTable, Lexicon)> {
        let characters = CharacterTable::new(self.characters)?;
        let patterns = PatternTable::new(self.patterns.patterns())?;
        Ok((characters, patterns, Lexicon::new(self.words)))
    }
}

/// Writes through a temp file in the target directory, then renames it
/// into place.
pub fn save_to_disk(snapshot: &TableSnapshot, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        bincode::serialize_into(&mut writer, snapshot)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    info!(path = %path.display(), "saved table snapshot");
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<TableSnapshot> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let snapshot: TableSnapshot = bincode::deserialize_from(reader)?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KulitanError;

    #[test]
    fn snapshot_survives_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tables.bin");
        let snapshot = TableSnapshot::builtin();

        save_to_disk(&snapshot, &path).unwrap();
        let loaded = load_from_disk(&path).unwrap();
        assert_eq!(loaded, snapshot);

        let (chars, patterns, lexicon) = loaded.into_tables().unwrap();
        assert_eq!(chars.len(), CharacterTable::builtin().len());
        assert_eq!(patterns, PatternTable::builtin());
        assert_eq!(lexicon.len(), 20);
    }

    #[test]
    fn overwrite_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.bin");
        save_to_disk(&TableSnapshot::builtin(), &path).unwrap();

        let mut small = TableSnapshot::builtin();
        small.words.truncate(1);
        save_to_disk(&small, &path).unwrap();
        assert_eq!(load_from_disk(&path).unwrap().words.len(), 1);
    }

    #[test]
    fn missing_and_corrupt_files_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.bin");
        assert!(matches!(load_from_disk(&missing), Err(KulitanError::Io(_))));

        let corrupt = dir.path().join("corrupt.bin");
        std::fs::write(&corrupt, b"\xff\xff\xff\xff\xff\xff\xff\xff\xff").unwrap();
        assert!(matches!(load_from_disk(&corrupt), Err(KulitanError::Snapshot(_))));
    }
}
