//! Suffix tree indexing module
//!
//! This module provides O(m) substring search and O(1) longest common prefix
//! queries over a single text using a compressed suffix trie.
//!
//! ## Architecture
//!
//! - `builder`: Constructs the trie (naive insertion or Ukkonen)
//! - `index`: Frozen tree with precomputed query tables
//! - `types`: Core type definitions

pub mod builder;
pub mod index;
pub mod types;

// Re-exports for convenience
pub use builder::{BuiltTrie, SuffixTreeBuilder};
pub use index::SuffixTree;
pub use types::{Alphabet, BuildStrategy, NodeId, ROOT, Symbol, TrieNode};
