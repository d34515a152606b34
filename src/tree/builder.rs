//! Suffix trie construction
//!
//! Builds the compressed trie of every suffix of a terminated text, either by
//! inserting suffixes one at a time ([`BuildStrategy::Naive`]) or with
//! Ukkonen's algorithm ([`BuildStrategy::Ukkonen`]).
//!
//! Edge labels are ranges into the shared text buffer; no substring is ever
//! copied. Nodes live in a flat arena and refer to each other by index.

use super::types::*;
use crate::error::{IndexError, Result};
use rustc_hash::FxHashMap;

/// Pseudo-node above the root used by Ukkonen's algorithm. Every symbol leads
/// from it to the root over an edge of length one.
const BOTTOM: NodeId = NodeId::MAX;

/// Builder for the compressed suffix trie of one text
pub struct SuffixTreeBuilder<S> {
    /// Text with the terminal appended
    text: Vec<Symbol<S>>,
    nodes: Vec<TrieNode<S>>,
}

/// Frozen result of a build. Read-only outside the crate.
#[derive(Debug, Clone)]
pub struct BuiltTrie<S> {
    pub(crate) text: Vec<Symbol<S>>,
    pub(crate) nodes: Vec<TrieNode<S>>,
    pub(crate) strategy: BuildStrategy,
}

impl<S> BuiltTrie<S> {
    /// Indexed text with the terminal appended
    pub fn text(&self) -> &[Symbol<S>] {
        &self.text
    }

    pub fn nodes(&self) -> &[TrieNode<S>] {
        &self.nodes
    }

    pub fn strategy(&self) -> BuildStrategy {
        self.strategy
    }
}

impl<S: Alphabet> SuffixTreeBuilder<S> {
    pub fn new(text: &[S]) -> Result<Self> {
        if text.is_empty() {
            return Err(IndexError::EmptyInput("suffix tree"));
        }

        let text = terminate(text);
        // A trie over n suffixes has at most 2n nodes
        let mut nodes = Vec::with_capacity(2 * text.len());
        nodes.push(TrieNode::new(0, 0, None, None));

        Ok(Self { text, nodes })
    }

    /// Length of the terminated text
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    pub fn build(mut self, strategy: BuildStrategy) -> Result<BuiltTrie<S>> {
        match strategy {
            BuildStrategy::Naive => self.build_naive()?,
            BuildStrategy::Ukkonen => self.build_ukkonen()?,
        }

        tracing::debug!(
            ?strategy,
            symbols = self.text.len(),
            nodes = self.nodes.len(),
            "built suffix trie"
        );

        Ok(BuiltTrie {
            text: self.text,
            nodes: self.nodes,
            strategy,
        })
    }

    fn push_node(&mut self, left: usize, right: usize, parent: NodeId, suffix: Option<usize>) -> NodeId {
        self.nodes.push(TrieNode::new(left, right, Some(parent), suffix));
        self.nodes.len() - 1
    }

    fn child(&self, node: NodeId, symbol: Symbol<S>) -> Option<NodeId> {
        self.nodes[node].child(symbol)
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        let symbol = self.text[self.nodes[child].left];
        self.nodes[parent].set_child(symbol, child);
        self.nodes[child].parent = Some(parent);
    }

    /// Cut the edge into `child` after `offset` symbols and return the new
    /// internal node sitting at the cut.
    fn split_edge(&mut self, parent: NodeId, child: NodeId, offset: usize) -> NodeId {
        let left = self.nodes[child].left;
        let split = self.push_node(left, left + offset, parent, None);
        self.nodes[child].left = left + offset;
        self.attach(parent, split);
        self.attach(split, child);
        split
    }

    /// Insert every suffix by walking down from the root.
    fn build_naive(&mut self) -> Result<()> {
        let n = self.text.len();

        for start in 0..n {
            let mut j = start;
            let mut cursor = ROOT;

            while j < n {
                let Some(child) = self.child(cursor, self.text[j]) else {
                    break;
                };
                let label = self.nodes[child].label();
                let matched = common_prefix(&self.text[j..], &self.text[label.clone()]);
                j += matched;

                if matched == label.len() {
                    cursor = child;
                    continue;
                }

                cursor = self.split_edge(cursor, child, matched);
                break;
            }

            if j >= n {
                return Err(IndexError::Invariant("suffix already present in the trie"));
            }

            let leaf = self.push_node(j, n, cursor, Some(start));
            self.attach(cursor, leaf);
        }

        Ok(())
    }

    /// Ukkonen's construction.
    ///
    /// The active point is `(cursor, left..i)`: the explicit node `cursor`
    /// followed by `text[left..i]` along one of its edges. Phase `i` extends
    /// every implicit suffix by `text[i]`, creating leaves until the end point
    /// is reached. Leaves get their final right bound `n` immediately, so the
    /// result is the same trie an online build would have after the last phase.
    fn build_ukkonen(&mut self) -> Result<()> {
        let n = self.text.len();
        let mut links: FxHashMap<NodeId, NodeId> = FxHashMap::default();
        links.insert(ROOT, BOTTOM);
        // String depth of every explicit node, needed to label new leaves
        let mut depth: Vec<usize> = vec![0];

        let mut cursor = ROOT;
        let mut left = 0;

        for i in 0..n {
            let mut previous: Option<NodeId> = None;
            let (mut end_point, mut border) = self.test_and_split(cursor, left, i, &mut depth)?;

            while !end_point {
                let leaf = self.push_node(i, n, border, Some(i - depth[border]));
                self.attach(border, leaf);
                depth.push(n - (i - depth[border]));

                if let Some(p) = previous.filter(|&p| p != ROOT) {
                    links.insert(p, border);
                }
                previous = Some(border);

                let link = *links
                    .get(&cursor)
                    .ok_or(IndexError::Invariant("explicit node without a suffix link"))?;
                (cursor, left) = self.canonize(link, left, i)?;
                (end_point, border) = self.test_and_split(cursor, left, i, &mut depth)?;
            }

            if let Some(p) = previous.filter(|&p| p != ROOT) {
                links.insert(p, cursor);
            }

            (cursor, left) = self.canonize(cursor, left, i + 1)?;
        }

        Ok(())
    }

    /// Check whether `text[i]` already continues the active point. If not,
    /// make the active point explicit (splitting an edge when it is implicit)
    /// and return the node a new leaf must hang from.
    fn test_and_split(
        &mut self,
        cursor: NodeId,
        left: usize,
        right: usize,
        depth: &mut Vec<usize>,
    ) -> Result<(bool, NodeId)> {
        let next = self.text[right];

        if left >= right {
            if cursor == BOTTOM {
                return Ok((true, cursor));
            }
            return Ok((self.child(cursor, next).is_some(), cursor));
        }

        let child = self
            .child(cursor, self.text[left])
            .ok_or(IndexError::Invariant("active edge missing"))?;
        let offset = right - left;
        if self.text[self.nodes[child].left + offset] == next {
            return Ok((true, cursor));
        }

        let split = self.split_edge(cursor, child, offset);
        depth.push(depth[cursor] + offset);
        Ok((false, split))
    }

    /// Walk the active point down while the remaining label covers a whole
    /// edge (skip/count: only edge lengths are compared, never symbols).
    fn canonize(&self, mut cursor: NodeId, mut left: usize, right: usize) -> Result<(NodeId, usize)> {
        while left < right {
            let (child, len) = if cursor == BOTTOM {
                (ROOT, 1)
            } else {
                let child = self
                    .child(cursor, self.text[left])
                    .ok_or(IndexError::Invariant("active edge missing"))?;
                (child, self.nodes[child].label_len())
            };

            if len > right - left {
                break;
            }
            left += len;
            cursor = child;
        }

        Ok((cursor, left))
    }
}
