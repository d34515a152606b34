//! Reductions between lowest common ancestor and range minimum queries
//!
//! - [`cartesian`]: array -> Cartesian tree (RMQ -> LCA)
//! - [`euler`]: tree -> depth array (LCA -> RMQ, optionally plus-minus-one)
//!
//! [`CartesianRmq`] chains both so any array gets the tier of the caller's
//! choice over its flattened Cartesian tree.

pub mod cartesian;
pub mod euler;

pub use cartesian::{CartesianNode, CartesianTree};
pub use euler::{EulerTour, TraversalMode, flatten_euler_tour, flatten_in_order};

use crate::error::{IndexError, Result};
use crate::rmq::{RangeMinimumQuery, RmqTier, build_rmq, normalize};

/// Range minimum queries over an arbitrary array, answered as LCA queries on
/// its Cartesian tree.
///
/// The tree is flattened in Euler tour mode when the chosen tier only accepts
/// plus-minus-one input, and in order otherwise.
pub struct CartesianRmq<T> {
    data: Vec<T>,
    tour: EulerTour<usize>,
    table: Box<dyn RangeMinimumQuery + Send + Sync>,
}

impl<T: PartialOrd> CartesianRmq<T> {
    pub fn new(data: Vec<T>, tier: RmqTier) -> Result<Self> {
        // A Cartesian tier over a Cartesian tree would never terminate
        let tier = match tier {
            RmqTier::Cartesian => RmqTier::PlusMinusOne,
            other => other,
        };

        let tree = CartesianTree::new(&data)?;
        let mut tour = if tier.requires_plus_minus_1() {
            flatten_euler_tour(
                tree.root(),
                |&n| n,
                |&n| {
                    let (left, right) = tree.children(n);
                    left.into_iter().chain(right)
                },
                |&n| n,
            )
        } else {
            flatten_in_order(tree.root(), |&n| n, |&n| tree.children(n), |&n| n)
        };

        let table = build_rmq(tier, tour.take_depths())?;
        if table.is_plus_minus_1() != tour.is_plus_minus_1() {
            return Err(IndexError::Invariant("flattening mode does not match the rmq tier"));
        }

        Ok(Self { data, tour, table })
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Flattened Cartesian tree backing the queries
    pub fn tour(&self) -> &EulerTour<usize> {
        &self.tour
    }
}

impl<T: PartialOrd> RangeMinimumQuery for CartesianRmq<T> {
    fn rmq(&self, i: usize, j: usize) -> Result<usize> {
        let (i, j) = normalize(i, j, self.data.len())?;
        self.tour.lca(&self.table, i, j).copied()
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn is_plus_minus_1(&self) -> bool {
        false
    }
}
