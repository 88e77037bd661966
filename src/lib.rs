// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod lexicon;
pub mod persistence;
pub mod recognition;

pub use crate::config::KulitanConfig;
pub use crate::core::engine::KulitanEngine;
pub use crate::core::types::{CharacterEntry, PhraseTransliteration, Token, WordTransliteration};
pub use crate::error::{KulitanError, Result};
