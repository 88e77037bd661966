// src/core/mod.rs

pub mod engine;
pub mod patterns;
pub mod resolver;
pub mod table;
pub mod tokenizer;
pub mod trie;
pub mod types;
