//! # stix - Suffix Tree Index
//!
//! stix builds a generalized suffix tree over a text and answers substring
//! queries against it. Longest common prefix queries run in constant time
//! through a lowest-common-ancestor reduction to range minimum queries.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`tree`] - Suffix trie construction (naive and Ukkonen) and the query index
//! - [`rmq`] - Range minimum query tiers, from naive tables to plus-minus-one
//! - [`lca`] - Cartesian trees and Euler-tour flattening for LCA queries
//! - [`config`] - JSON configuration
//! - [`output`] - Result formatting (colored text and JSON)
//! - [`error`] - Error taxonomy
//!
//! ## Quick Start
//!
//! ```
//! use stix::tree::{BuildStrategy, SuffixTree};
//!
//! let tree = SuffixTree::from_text("senselessness", BuildStrategy::Ukkonen).unwrap();
//!
//! let mut positions = tree.find("ss").unwrap();
//! positions.sort();
//! assert_eq!(positions, vec![7, 11]);
//!
//! // "essness" and "ess" share "ess"
//! assert_eq!(tree.longest_common_prefix(6, 10).unwrap(), 3);
//! ```
//!
//! ## Performance
//!
//! Construction is linear with Ukkonen's algorithm. After construction the
//! index precomputes string depths, subtree leaf counts and an Euler tour of
//! the tree, so:
//!
//! 1. **Occurrence counting** costs O(m) for a pattern of length m
//! 2. **Occurrence listing** adds O(k) for k matches
//! 3. **Longest common prefix** of two suffixes is O(1)

pub mod config;
pub mod error;
pub mod lca;
pub mod output;
pub mod rmq;
pub mod tree;
pub mod utils;
