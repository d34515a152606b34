//! Query layer over a built suffix trie
//!
//! [`SuffixTree`] freezes a [`BuiltTrie`] and precomputes, in three linear
//! passes over the arena:
//!
//! 1. string depth of every node (pre-order)
//! 2. number of leaves under every node (post-order)
//! 3. the leaf spelling each suffix (pre-order)
//!
//! It then flattens the trie as an Euler tour and indexes the depth array with
//! a plus-minus-one RMQ table, which makes longest common prefix queries O(1).

use super::builder::{BuiltTrie, SuffixTreeBuilder};
use super::types::*;
use crate::error::{IndexError, Result};
use crate::lca::{EulerTour, flatten_euler_tour};
use crate::rmq::{RangeMinimumQuery, RmqTier, build_rmq};
use rayon::prelude::*;
use std::fmt;
use std::ops::Range;

/// Frozen suffix tree answering occurrence and longest-common-prefix queries.
///
/// Immutable after construction, so it can be shared across threads freely.
pub struct SuffixTree<S> {
    text: Vec<Symbol<S>>,
    nodes: Vec<TrieNode<S>>,
    strategy: BuildStrategy,
    /// Cumulative label length from the root, by node id
    node_depths: Vec<usize>,
    /// Leaves in each node's subtree, by node id
    subtree_leaves: Vec<usize>,
    /// Leaf node for each suffix start
    leaf_nodes: Vec<NodeId>,
    tour: EulerTour<NodeId>,
    lca: Box<dyn RangeMinimumQuery + Send + Sync>,
}

impl<S: Alphabet> SuffixTree<S> {
    /// Build the tree of `text` with `strategy`.
    pub fn new(text: &[S], strategy: BuildStrategy) -> Result<Self> {
        let trie = SuffixTreeBuilder::new(text)?.build(strategy)?;
        Self::from_trie(trie)
    }

    /// Freeze `trie` and run the query precomputations.
    pub fn from_trie(trie: BuiltTrie<S>) -> Result<Self> {
        let BuiltTrie {
            text,
            nodes,
            strategy,
        } = trie;

        check_links(&text, &nodes)?;
        let order = preorder(&nodes, ROOT);

        let mut node_depths = vec![0; nodes.len()];
        for &id in &order {
            if let Some(parent) = nodes[id].parent {
                node_depths[id] = node_depths[parent] + nodes[id].label_len();
            }
        }

        // Reverse pre-order visits every child before its parent
        let mut subtree_leaves = vec![0; nodes.len()];
        for &id in order.iter().rev() {
            if nodes[id].is_leaf() {
                subtree_leaves[id] += 1;
            }
            if let Some(parent) = nodes[id].parent {
                subtree_leaves[parent] += subtree_leaves[id];
            }
        }

        let mut leaf_nodes = vec![ROOT; text.len()];
        let mut leaves_seen = 0;
        for &id in &order {
            if let Some(start) = nodes[id].suffix {
                leaf_nodes[start] = id;
                leaves_seen += 1;
            }
        }
        if leaves_seen != text.len() || subtree_leaves[ROOT] != text.len() {
            return Err(IndexError::Invariant("leaf count differs from text length"));
        }

        let mut tour = flatten_euler_tour(
            ROOT,
            |&id| id,
            |&id| nodes[id].children(),
            |&id| id,
        );
        let lca = build_rmq(RmqTier::PlusMinusOne, tour.take_depths())?;
        if !lca.is_plus_minus_1() {
            return Err(IndexError::Invariant("lca table must accept plus-minus-one input"));
        }

        tracing::debug!(
            nodes = nodes.len(),
            tour = tour.len(),
            "suffix tree ready for queries"
        );

        Ok(Self {
            text,
            nodes,
            strategy,
            node_depths,
            subtree_leaves,
            leaf_nodes,
            tour,
            lca,
        })
    }

    /// Length of the indexed text including the terminal
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Never true for a built tree, the terminal alone has length one
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn text(&self) -> &[Symbol<S>] {
        &self.text
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn strategy(&self) -> BuildStrategy {
        self.strategy
    }

    pub fn node(&self, id: NodeId) -> Option<&TrieNode<S>> {
        self.nodes.get(id)
    }

    pub fn string_depth(&self, id: NodeId) -> Option<usize> {
        self.node_depths.get(id).copied()
    }

    pub fn leaf_count(&self, id: NodeId) -> Option<usize> {
        self.subtree_leaves.get(id).copied()
    }

    /// Node where `pattern` ends. When it ends inside an edge, the node below
    /// that edge is returned. `None` when the pattern falls off the tree.
    fn locate(&self, pattern: &[S]) -> Result<Option<NodeId>> {
        if pattern.is_empty() {
            return Err(IndexError::EmptyPattern);
        }

        let mut j = 0;
        let mut cursor = ROOT;
        loop {
            let Some(child) = self.nodes[cursor].child(Symbol::Char(pattern[j])) else {
                return Ok(None);
            };
            let label = &self.text[self.nodes[child].label()];
            let matched = pattern[j..]
                .iter()
                .zip(label)
                .take_while(|&(&p, &l)| Symbol::Char(p) == l)
                .count();
            j += matched;

            if j == pattern.len() {
                return Ok(Some(child));
            }
            if matched < label.len() {
                return Ok(None);
            }
            cursor = child;
        }
    }

    fn leaves_under(&self, node: NodeId) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.subtree_leaves[node]);
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let current = &self.nodes[id];
            match current.suffix {
                Some(start) => out.push(start),
                None => stack.extend(current.children().rev()),
            }
        }
        out
    }

    /// Start positions of every occurrence of `pattern`, in tree pre-order.
    pub fn occurrences(&self, pattern: &[S]) -> Result<Vec<usize>> {
        Ok(self
            .locate(pattern)?
            .map(|node| self.leaves_under(node))
            .unwrap_or_default())
    }

    /// Number of occurrences of `pattern`, without enumerating them.
    pub fn occurrences_count(&self, pattern: &[S]) -> Result<usize> {
        Ok(self
            .locate(pattern)?
            .map(|node| self.subtree_leaves[node])
            .unwrap_or(0))
    }

    /// Deepest node with at least `min_repetitions` leaves; the first one
    /// found in pre-order wins ties. `None` if only the root qualifies.
    fn deepest_repeat(&self, min_repetitions: usize) -> Result<Option<NodeId>> {
        if min_repetitions < 2 {
            return Err(IndexError::TooFewRepetitions(min_repetitions));
        }

        let mut best = ROOT;
        for id in preorder(&self.nodes, ROOT) {
            if self.subtree_leaves[id] >= min_repetitions
                && self.node_depths[id] > self.node_depths[best]
            {
                best = id;
            }
        }

        Ok((self.node_depths[best] > 0).then_some(best))
    }

    /// Occurrences of the longest substring repeated at least
    /// `min_repetitions` times, or nothing if no non-empty substring is.
    pub fn longest_repeated_substring(&self, min_repetitions: usize) -> Result<Vec<usize>> {
        Ok(self
            .deepest_repeat(min_repetitions)?
            .map(|node| self.leaves_under(node))
            .unwrap_or_default())
    }

    /// Text range of the first reported occurrence of the longest repeat.
    pub fn longest_repeated_span(&self, min_repetitions: usize) -> Result<Option<Range<usize>>> {
        let Some(node) = self.deepest_repeat(min_repetitions)? else {
            return Ok(None);
        };
        let depth = self.node_depths[node];
        Ok(self
            .leaves_under(node)
            .first()
            .map(|&start| start..start + depth))
    }

    /// Length of the longest common prefix of the suffixes starting at `i`
    /// and `j`, in O(1). Positions index the terminated text, so
    /// `longest_common_prefix(i, i) == len() - i`.
    pub fn longest_common_prefix(&self, i: usize, j: usize) -> Result<usize> {
        let (i, j) = if i <= j { (i, j) } else { (j, i) };
        if j >= self.text.len() {
            return Err(IndexError::OutOfRange {
                i,
                j,
                size: self.text.len(),
            });
        }

        let ancestor = self
            .tour
            .lca(&self.lca, self.leaf_nodes[i], self.leaf_nodes[j])?;
        Ok(self.node_depths[*ancestor])
    }
}

impl<S: Alphabet + Send + Sync> SuffixTree<S> {
    /// Run [`occurrences`](Self::occurrences) for many patterns in parallel.
    pub fn occurrences_batch<P>(&self, patterns: &[P]) -> Vec<Result<Vec<usize>>>
    where
        P: AsRef<[S]> + Sync,
    {
        patterns
            .par_iter()
            .map(|pattern| self.occurrences(pattern.as_ref()))
            .collect()
    }
}

impl SuffixTree<char> {
    /// Index the characters of `text`.
    pub fn from_text(text: &str, strategy: BuildStrategy) -> Result<Self> {
        let chars: Vec<char> = text.chars().collect();
        Self::new(&chars, strategy)
    }

    /// [`occurrences`](Self::occurrences) for a string pattern
    pub fn find(&self, pattern: &str) -> Result<Vec<usize>> {
        let chars: Vec<char> = pattern.chars().collect();
        self.occurrences(&chars)
    }

    /// [`occurrences_count`](Self::occurrences_count) for a string pattern
    pub fn count(&self, pattern: &str) -> Result<usize> {
        let chars: Vec<char> = pattern.chars().collect();
        self.occurrences_count(&chars)
    }
}

impl SuffixTree<u8> {
    /// Index raw bytes.
    pub fn from_bytes(bytes: &[u8], strategy: BuildStrategy) -> Result<Self> {
        Self::new(bytes, strategy)
    }
}

/// Reject arenas whose links would send the passes out of bounds: every
/// child must exist, name its parent back and start with the symbol it is
/// keyed under. With one parent per node, what hangs from the root is a tree.
fn check_links<S: Alphabet>(text: &[Symbol<S>], nodes: &[TrieNode<S>]) -> Result<()> {
    let root = nodes
        .get(ROOT)
        .ok_or(IndexError::Invariant("trie has no root"))?;
    if root.parent.is_some() {
        return Err(IndexError::Invariant("root has a parent"));
    }

    for (id, node) in nodes.iter().enumerate() {
        if node.left > node.right || node.right > text.len() {
            return Err(IndexError::Invariant("edge label outside the text"));
        }
        if let Some(start) = node.suffix {
            if start >= text.len() || !node.children.is_empty() {
                return Err(IndexError::Invariant("malformed leaf"));
            }
        }
        for &(symbol, child) in &node.children {
            let Some(below) = nodes.get(child) else {
                return Err(IndexError::Invariant("child outside the node arena"));
            };
            if below.parent != Some(id) || text.get(below.left) != Some(&symbol) {
                return Err(IndexError::Invariant("child does not link back to its parent"));
            }
        }
    }

    Ok(())
}

/// Pre-order node ids under `from`, children in symbol order.
fn preorder<S: Ord + Copy>(nodes: &[TrieNode<S>], from: NodeId) -> Vec<NodeId> {
    let mut order = Vec::with_capacity(nodes.len());
    let mut stack = vec![from];
    while let Some(id) = stack.pop() {
        order.push(id);
        stack.extend(nodes[id].children().rev());
    }
    order
}

impl<S: Alphabet + fmt::Display> fmt::Display for SuffixTree<S> {
    /// One line per edge, indented by the string depth of its parent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SuffixTree [")?;
        for id in preorder(&self.nodes, ROOT) {
            let node = &self.nodes[id];
            let indent = node.parent.map(|p| self.node_depths[p]).unwrap_or(0);
            write!(f, "{:indent$}├", "", indent = indent)?;
            for symbol in &self.text[node.label()] {
                write!(f, "{}", symbol)?;
            }
            match node.suffix {
                Some(start) => writeln!(f, " - <{}>", start)?,
                None => writeln!(f, " -")?,
            }
        }
        write!(f, "]")
    }
}

impl<S> fmt::Debug for SuffixTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuffixTree")
            .field("len", &self.text.len())
            .field("nodes", &self.nodes.len())
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const STRATEGIES: [BuildStrategy; 2] = [BuildStrategy::Naive, BuildStrategy::Ukkonen];

    fn sorted(mut v: Vec<usize>) -> Vec<usize> {
        v.sort_unstable();
        v
    }

    #[test]
    fn test_senselessness() {
        for strategy in STRATEGIES {
            let tree = SuffixTree::from_text("senselessness", strategy).unwrap();
            assert_eq!(tree.len(), 14);
            assert_eq!(sorted(tree.find("s").unwrap()), vec![0, 3, 7, 8, 11, 12]);
            assert_eq!(sorted(tree.find("e").unwrap()), vec![1, 4, 6, 10]);
            assert_eq!(sorted(tree.find("ss").unwrap()), vec![7, 11]);
            assert_eq!(tree.count("s").unwrap(), 6);
            assert_eq!(tree.count("ss").unwrap(), 2);
            assert_eq!(tree.count("less").unwrap(), 1);
            assert!(tree.find("sz").unwrap().is_empty());
            assert_eq!(tree.count("sensesense").unwrap(), 0);
        }
    }

    #[test]
    fn test_longest_repeated_substring() {
        for strategy in STRATEGIES {
            let tree = SuffixTree::from_text("senselessness", strategy).unwrap();
            // "ess" at 6 and 10 is the only repeat of length 3
            let repeats = tree.longest_repeated_substring(2).unwrap();
            assert!(!repeats.is_empty());
            let span = tree.longest_repeated_span(2).unwrap().unwrap();
            assert_eq!(span.len(), 3);
            let needle: Vec<char> = "senselessness".chars().collect::<Vec<_>>()[span].to_vec();
            assert_eq!(sorted(tree.occurrences(&needle).unwrap()), sorted(repeats));

            let four = tree.longest_repeated_substring(4).unwrap();
            assert_eq!(sorted(four), vec![1, 4, 6, 10]);
        }
    }

    #[test]
    fn test_repeat_rules() {
        let tree = SuffixTree::from_text("abc", BuildStrategy::Ukkonen).unwrap();
        assert!(tree.longest_repeated_substring(2).unwrap().is_empty());
        assert_eq!(tree.longest_repeated_span(2).unwrap(), None);
        let err = tree.longest_repeated_substring(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument);
    }

    #[test]
    fn test_longest_common_prefix() {
        for strategy in STRATEGIES {
            let tree = SuffixTree::from_text("senselessness", strategy).unwrap();
            assert_eq!(tree.longest_common_prefix(0, 0).unwrap(), 14);
            assert_eq!(tree.longest_common_prefix(5, 5).unwrap(), 9);
            assert_eq!(tree.longest_common_prefix(0, 3).unwrap(), 2);
            assert_eq!(tree.longest_common_prefix(6, 10).unwrap(), 3);
            assert_eq!(tree.longest_common_prefix(10, 6).unwrap(), 3);
            assert_eq!(tree.longest_common_prefix(13, 2).unwrap(), 0);
        }
    }

    #[test]
    fn test_errors() {
        let tree = SuffixTree::from_text("banana", BuildStrategy::Ukkonen).unwrap();
        assert_eq!(tree.find("").unwrap_err(), IndexError::EmptyPattern);
        assert_eq!(tree.count("").unwrap_err().kind(), ErrorKind::Pattern);
        let err = tree.longest_common_prefix(0, 7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert!(SuffixTree::from_text("", BuildStrategy::Naive).is_err());
    }

    #[test]
    fn test_precomputed_tables() {
        let tree = SuffixTree::from_text("banana", BuildStrategy::Ukkonen).unwrap();
        assert_eq!(tree.string_depth(ROOT), Some(0));
        assert_eq!(tree.leaf_count(ROOT), Some(7));
        for start in 0..tree.len() {
            let leaf = tree.leaf_nodes[start];
            assert_eq!(tree.node(leaf).unwrap().suffix_start(), Some(start));
            assert_eq!(tree.string_depth(leaf), Some(tree.len() - start));
            assert_eq!(tree.leaf_count(leaf), Some(1));
        }
    }

    #[test]
    fn test_damaged_trie_is_rejected() {
        let build = || {
            SuffixTreeBuilder::new(&['b', 'a', 'n', 'a', 'n', 'a'])
                .unwrap()
                .build(BuildStrategy::Ukkonen)
                .unwrap()
        };

        let mut truncated = build();
        truncated.nodes.truncate(3);
        let err = SuffixTree::from_trie(truncated).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invariant);

        let mut relinked = build();
        let child = relinked.nodes[ROOT].children().next().unwrap();
        relinked.nodes[child].parent = Some(child);
        assert!(matches!(SuffixTree::from_trie(relinked), Err(IndexError::Invariant(_))));

        let mut bad_leaf = build();
        let leaf = bad_leaf.nodes.iter().position(|n| n.is_leaf()).unwrap();
        bad_leaf.nodes[leaf].suffix = Some(99);
        assert!(matches!(SuffixTree::from_trie(bad_leaf), Err(IndexError::Invariant(_))));

        let mut empty = build();
        empty.nodes.clear();
        assert!(matches!(SuffixTree::from_trie(empty), Err(IndexError::Invariant(_))));

        let intact = build();
        assert_eq!(intact.strategy(), BuildStrategy::Ukkonen);
        assert_eq!(intact.text().len(), 7);
        let node_count = intact.nodes().len();
        let tree = SuffixTree::from_trie(intact).unwrap();
        assert_eq!(tree.node_count(), node_count);
        assert!(!tree.is_empty());
        // The depth array lives only in the lca table
        assert!(tree.tour.depths().is_empty());
        assert_eq!(tree.tour.len(), 2 * node_count - 1);
        assert_eq!(tree.lca.size(), 2 * node_count - 1);
    }

    #[test]
    fn test_repeated_symbol_is_deep_but_iterative() {
        let text = vec![b'a'; 20_000];
        let tree = SuffixTree::from_bytes(&text, BuildStrategy::Ukkonen).unwrap();
        assert_eq!(tree.occurrences_count(b"aaaa").unwrap(), 20_000 - 3);
        assert_eq!(tree.longest_common_prefix(0, 1).unwrap(), 19_999);
        let span = tree.longest_repeated_span(2).unwrap().unwrap();
        assert_eq!(span.len(), 19_999);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let tree = SuffixTree::from_text("mississippi", BuildStrategy::Ukkonen).unwrap();
        let patterns: Vec<Vec<char>> = ["ss", "i", "issi", "q", "ppi"]
            .iter()
            .map(|p| p.chars().collect())
            .collect();
        let batch = tree.occurrences_batch(&patterns);
        for (pattern, result) in patterns.iter().zip(batch) {
            assert_eq!(result.unwrap(), tree.occurrences(pattern).unwrap());
        }
    }

    #[test]
    fn test_display() {
        let tree = SuffixTree::from_text("aa", BuildStrategy::Naive).unwrap();
        let rendered = tree.to_string();
        assert!(rendered.starts_with("SuffixTree ["));
        assert!(rendered.contains("├a -\n"));
        assert!(rendered.contains(" ├$ - <1>"));
        assert!(rendered.ends_with(']'));
    }
}
