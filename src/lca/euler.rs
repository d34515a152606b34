//! Tree flattening for LCA -> RMQ reduction
//!
//! Two traversal modes turn a rooted tree into a depth array:
//!
//! - In-order (binary trees only): one slot per node. The LCA of two nodes is
//!   the shallowest node between their slots.
//! - Euler tour: a slot on entering each node and another after returning from
//!   each child, `2n - 1` slots in total. Adjacent depths differ by exactly
//!   one, which is what the plus-minus-one RMQ tier needs.
//!
//! Both traversals use an explicit stack, so degenerate trees (a path of
//! `n` nodes) do not exhaust the call stack.

use crate::error::{IndexError, Result};
use crate::rmq::RangeMinimumQuery;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalMode {
    InOrder,
    EulerTour,
}

/// Flattened tree: depth per slot plus mappings between slots and nodes.
#[derive(Debug, Clone)]
pub struct EulerTour<D> {
    mode: TraversalMode,
    depths: Vec<usize>,
    /// Slot -> node data
    backward: Vec<D>,
    /// Node id -> every slot the node occupies, in increasing order
    forward: FxHashMap<usize, Vec<usize>>,
}

impl<D> EulerTour<D> {
    fn with_mode(mode: TraversalMode) -> Self {
        Self {
            mode,
            depths: Vec::new(),
            backward: Vec::new(),
            forward: FxHashMap::default(),
        }
    }

    #[inline]
    fn record(&mut self, id: usize, data: D, depth: usize) {
        self.forward.entry(id).or_default().push(self.depths.len());
        self.depths.push(depth);
        self.backward.push(data);
    }

    pub fn mode(&self) -> TraversalMode {
        self.mode
    }

    /// True when produced by the Euler tour mode
    pub fn is_plus_minus_1(&self) -> bool {
        self.mode == TraversalMode::EulerTour
    }

    pub fn depths(&self) -> &[usize] {
        &self.depths
    }

    /// Move the depth array out, to hand it to an RMQ table without a copy.
    /// [`depths`](Self::depths) is empty afterwards; slot lookups and
    /// [`lca`](Self::lca) keep working.
    pub fn take_depths(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.depths)
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.backward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backward.is_empty()
    }

    /// Node data recorded at `position`
    pub fn data_at(&self, position: usize) -> Option<&D> {
        self.backward.get(position)
    }

    /// Every slot occupied by node `id`
    pub fn positions(&self, id: usize) -> &[usize] {
        self.forward.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first_position(&self, id: usize) -> Option<usize> {
        self.positions(id).first().copied()
    }

    /// Data of the lowest common ancestor of nodes `a` and `b`, using `rmq`
    /// built over [`depths`](Self::depths).
    pub fn lca<R>(&self, rmq: &R, a: usize, b: usize) -> Result<&D>
    where
        R: RangeMinimumQuery + ?Sized,
    {
        let size = self.backward.len();
        let (Some(pa), Some(pb)) = (self.first_position(a), self.first_position(b)) else {
            return Err(IndexError::OutOfRange { i: a, j: b, size });
        };
        let position = rmq.rmq(pa, pb)?;
        self.data_at(position)
            .ok_or(IndexError::Invariant("rmq table does not match the flattened tree"))
    }
}

/// Flatten a binary tree in order. `children` returns `(left, right)`.
pub fn flatten_in_order<N, D>(
    root: N,
    node_id: impl Fn(&N) -> usize,
    children: impl Fn(&N) -> (Option<N>, Option<N>),
    node_data: impl Fn(&N) -> D,
) -> EulerTour<D>
where
    N: Copy,
{
    let mut tour = EulerTour::with_mode(TraversalMode::InOrder);
    let mut stack: Vec<(N, usize)> = Vec::new();
    let mut current = Some((root, 0));

    loop {
        while let Some((node, depth)) = current {
            stack.push((node, depth));
            current = children(&node).0.map(|left| (left, depth + 1));
        }
        let Some((node, depth)) = stack.pop() else {
            break;
        };
        tour.record(node_id(&node), node_data(&node), depth);
        current = children(&node).1.map(|right| (right, depth + 1));
    }

    tour
}

/// Flatten any rooted tree as an Euler tour.
pub fn flatten_euler_tour<N, D, I>(
    root: N,
    node_id: impl Fn(&N) -> usize,
    children: impl Fn(&N) -> I,
    node_data: impl Fn(&N) -> D,
) -> EulerTour<D>
where
    N: Copy,
    I: Iterator<Item = N>,
{
    let mut tour = EulerTour::with_mode(TraversalMode::EulerTour);
    tour.record(node_id(&root), node_data(&root), 0);
    let mut stack: Vec<(N, usize, I)> = vec![(root, 0, children(&root))];

    while let Some((_, depth, pending)) = stack.last_mut() {
        let depth = *depth;
        match pending.next() {
            Some(child) => {
                tour.record(node_id(&child), node_data(&child), depth + 1);
                stack.push((child, depth + 1, children(&child)));
            }
            None => {
                stack.pop();
                // Back in the parent after finishing a child
                if let Some((parent, parent_depth, _)) = stack.last() {
                    tour.record(node_id(parent), node_data(parent), *parent_depth);
                }
            }
        }
    }

    tour
}
