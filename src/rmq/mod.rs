//! Range minimum query engine
//!
//! Four tiers answer `rmq(i, j)`, the position of a minimal element in the
//! inclusive range `[i, j]`. Each tier builds on the one before it:
//!
//! - [`naive`]: every range precomputed, O(n^2) build, O(1) query
//! - [`sparse`]: power-of-two windows, O(n log n) build, O(1) query
//! - [`block`]: block minima promoted into a sparse table, O(n) build,
//!   O(log n) query
//! - [`plus_minus_one`]: block decomposition with per-signature lookup
//!   tables, O(n) build, O(1) query, restricted to plus-minus-one input
//!
//! All tiers implement [`RangeMinimumQuery`]. Composing code that needs the
//! plus-minus-one guarantee checks [`RangeMinimumQuery::is_plus_minus_1`].

pub mod block;
pub mod naive;
pub mod plus_minus_one;
pub mod sparse;

pub use block::BlockRmq;
pub use naive::NaiveRmq;
pub use plus_minus_one::PlusMinusOneRmq;
pub use sparse::SparseTable;

use crate::error::{IndexError, Result};
use crate::lca::CartesianRmq;
use serde::{Deserialize, Serialize};

/// Common contract of every range minimum query structure.
pub trait RangeMinimumQuery {
    /// Position of a minimal element in `[min(i, j), max(i, j)]`.
    ///
    /// Ties resolve to the same position for every call on a given build.
    fn rmq(&self, i: usize, j: usize) -> Result<usize>;

    /// Length of the indexed array
    fn size(&self) -> usize;

    /// Whether this structure only accepts plus-minus-one input
    fn is_plus_minus_1(&self) -> bool;
}

impl<R: RangeMinimumQuery + ?Sized> RangeMinimumQuery for Box<R> {
    fn rmq(&self, i: usize, j: usize) -> Result<usize> {
        (**self).rmq(i, j)
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn is_plus_minus_1(&self) -> bool {
        (**self).is_plus_minus_1()
    }
}

/// Tier selector for [`build_rmq`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RmqTier {
    Naive,
    #[default]
    SparseTable,
    Block,
    PlusMinusOne,
    /// Cartesian tree reduction feeding a plus-minus-one table
    Cartesian,
}

impl RmqTier {
    /// Whether the tier rejects input that is not plus-minus-one
    pub fn requires_plus_minus_1(self) -> bool {
        matches!(self, RmqTier::PlusMinusOne)
    }
}

/// Values whose neighbours can be checked for the plus-minus-one property.
pub trait UnitStep: Copy + Ord {
    fn differs_by_one(self, other: Self) -> bool;
}

macro_rules! impl_unit_step {
    ($($t:ty),*) => {
        $(
            impl UnitStep for $t {
                #[inline]
                fn differs_by_one(self, other: Self) -> bool {
                    self.abs_diff(other) == 1
                }
            }
        )*
    };
}

impl_unit_step!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Build the structure for `tier` over `data`.
pub fn build_rmq<T>(tier: RmqTier, data: Vec<T>) -> Result<Box<dyn RangeMinimumQuery + Send + Sync>>
where
    T: UnitStep + Send + Sync + 'static,
{
    let rmq: Box<dyn RangeMinimumQuery + Send + Sync> = match tier {
        RmqTier::Naive => Box::new(NaiveRmq::new(data)?),
        RmqTier::SparseTable => Box::new(SparseTable::new(data)?),
        RmqTier::Block => Box::new(BlockRmq::new(data)?),
        RmqTier::PlusMinusOne => Box::new(PlusMinusOneRmq::new(data)?),
        RmqTier::Cartesian => Box::new(CartesianRmq::new(data, RmqTier::PlusMinusOne)?),
    };
    tracing::debug!(?tier, size = rmq.size(), "built range minimum query table");
    Ok(rmq)
}

/// Order a query pair and check it against `size`.
#[inline]
pub(crate) fn normalize(i: usize, j: usize, size: usize) -> Result<(usize, usize)> {
    let (i, j) = if i <= j { (i, j) } else { (j, i) };
    if j >= size {
        return Err(IndexError::OutOfRange { i, j, size });
    }
    Ok((i, j))
}

/// Pick the position holding the smaller value, preferring `a` on ties.
#[inline]
pub(crate) fn min_index<T: PartialOrd>(data: &[T], a: usize, b: usize) -> usize {
    if data[a] <= data[b] { a } else { b }
}

/// `floor(log2(n))` for `n >= 1`
#[inline]
pub(crate) fn floor_log2(n: usize) -> usize {
    (usize::BITS - 1 - n.leading_zeros()) as usize
}

/// `ceil(log2(n))` for `n >= 1`
#[inline]
pub(crate) fn ceil_log2(n: usize) -> usize {
    (usize::BITS - (n - 1).leading_zeros()) as usize
}

/// Block length shared by the block and plus-minus-one tiers: `ceil(log2(n) / 2)`, at least 1.
#[inline]
pub(crate) fn block_size(n: usize) -> usize {
    ceil_log2(n).div_ceil(2).max(1)
}
