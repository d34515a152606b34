//! Cartesian tree construction
//!
//! The tree over an array is min-heap ordered by value and its in-order
//! traversal reproduces the array. The lowest common ancestor of positions
//! `i` and `j` is therefore the position of the minimum of `array[i..=j]`,
//! which turns any range minimum query into an LCA query.
//!
//! Node `k` of the arena always wraps array position `k`, so the arena doubles
//! as the index -> node mapper.

use crate::error::{IndexError, Result};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartesianNode {
    /// Position in the source array
    pub index: usize,
    pub parent: Option<usize>,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl CartesianNode {
    fn leaf(index: usize) -> Self {
        Self {
            index,
            parent: None,
            left: None,
            right: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CartesianTree {
    nodes: Vec<CartesianNode>,
    root: usize,
}

impl CartesianTree {
    /// Build the tree with a single left-to-right scan over the right spine.
    ///
    /// Each position is pushed onto the spine once and climbed past at most
    /// once, so the scan is amortized O(n).
    pub fn new<T: PartialOrd>(array: &[T]) -> Result<Self> {
        if array.is_empty() {
            return Err(IndexError::EmptyInput("cartesian tree"));
        }

        let mut nodes: Vec<CartesianNode> = Vec::with_capacity(array.len());
        nodes.push(CartesianNode::leaf(0));
        let mut root = 0;
        let mut cursor = 0;

        for i in 1..array.len() {
            nodes.push(CartesianNode::leaf(i));

            while less(&array[i], &array[cursor])? {
                match nodes[cursor].parent {
                    Some(parent) => cursor = parent,
                    None => break,
                }
            }

            if less(&array[i], &array[cursor])? {
                // New minimum so far: everything scanned becomes its left subtree
                nodes[i].left = Some(cursor);
                nodes[cursor].parent = Some(i);
                root = i;
            } else {
                let demoted = nodes[cursor].right;
                nodes[i].left = demoted;
                if let Some(d) = demoted {
                    nodes[d].parent = Some(i);
                }
                nodes[cursor].right = Some(i);
                nodes[i].parent = Some(cursor);
            }
            cursor = i;
        }

        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node wrapping array position `index`
    pub fn node(&self, index: usize) -> Option<&CartesianNode> {
        self.nodes.get(index)
    }

    pub fn parent(&self, index: usize) -> Option<usize> {
        self.nodes.get(index).and_then(|n| n.parent)
    }

    /// `(left, right)` children of `index`
    pub fn children(&self, index: usize) -> (Option<usize>, Option<usize>) {
        self.nodes
            .get(index)
            .map(|n| (n.left, n.right))
            .unwrap_or((None, None))
    }
}

fn less<T: PartialOrd>(a: &T, b: &T) -> Result<bool> {
    match a.partial_cmp(b) {
        Some(ordering) => Ok(ordering == Ordering::Less),
        None => Err(IndexError::Invariant("items without a defined ordering")),
    }
}
