//! Types for suffix tree indexing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Arena index of a trie node. Doubles as the node's unique id.
pub type NodeId = usize;

/// The root is always the first node allocated
pub const ROOT: NodeId = 0;

/// Symbols a suffix tree can be built over.
pub trait Alphabet: Copy + Ord + fmt::Debug {}

impl<S: Copy + Ord + fmt::Debug> Alphabet for S {}

/// A text symbol, or the terminal appended once at the end of every text.
///
/// Keeping the terminal as its own variant means it can never collide with a
/// symbol of the indexed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol<S> {
    Char(S),
    Terminal,
}

impl<S: fmt::Display> fmt::Display for Symbol<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Char(c) => write!(f, "{}", c),
            Symbol::Terminal => f.write_str("$"),
        }
    }
}

/// Construction algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BuildStrategy {
    /// Insert every suffix from the root, O(n^2)
    Naive,
    /// Ukkonen's online construction, O(n)
    #[default]
    Ukkonen,
}

/// Node of the compressed suffix trie.
///
/// The edge from the parent is labeled `text[left..right]`.
#[derive(Debug, Clone)]
pub struct TrieNode<S> {
    pub(crate) left: usize,
    pub(crate) right: usize,
    pub(crate) parent: Option<NodeId>,
    /// Children sorted by the first symbol of their edge label
    pub(crate) children: Vec<(Symbol<S>, NodeId)>,
    /// Start of the suffix spelled by the path to this node, leaves only
    pub(crate) suffix: Option<usize>,
}

impl<S: Ord + Copy> TrieNode<S> {
    pub(crate) fn new(left: usize, right: usize, parent: Option<NodeId>, suffix: Option<usize>) -> Self {
        Self {
            left,
            right,
            parent,
            children: Vec::new(),
            suffix,
        }
    }

    /// Edge label as a range into the terminated text
    pub fn label(&self) -> Range<usize> {
        self.left..self.right
    }

    pub fn label_len(&self) -> usize {
        self.right - self.left
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Suffix start for leaves, `None` for internal nodes
    pub fn suffix_start(&self) -> Option<usize> {
        self.suffix
    }

    pub fn is_leaf(&self) -> bool {
        self.suffix.is_some()
    }

    /// Child whose edge label starts with `symbol`
    #[inline]
    pub fn child(&self, symbol: Symbol<S>) -> Option<NodeId> {
        self.children
            .binary_search_by(|(s, _)| s.cmp(&symbol))
            .ok()
            .map(|k| self.children[k].1)
    }

    /// Children in increasing order of their first symbol
    pub fn children(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.children.iter().map(|&(_, id)| id)
    }

    /// Insert or replace the child starting with `symbol`.
    pub(crate) fn set_child(&mut self, symbol: Symbol<S>, id: NodeId) {
        match self.children.binary_search_by(|(s, _)| s.cmp(&symbol)) {
            Ok(k) => self.children[k].1 = id,
            Err(k) => self.children.insert(k, (symbol, id)),
        }
    }
}

/// Append the terminal to `text`.
pub fn terminate<S: Copy>(text: &[S]) -> Vec<Symbol<S>> {
    text.iter()
        .copied()
        .map(Symbol::Char)
        .chain(std::iter::once(Symbol::Terminal))
        .collect()
}

/// Length of the common prefix of `pattern` and `label`, compared in place.
#[inline]
pub(crate) fn common_prefix<S: PartialEq>(pattern: &[Symbol<S>], label: &[Symbol<S>]) -> usize {
    pattern
        .iter()
        .zip(label)
        .take_while(|(a, b)| a == b)
        .count()
}
