//! Tier 3: block decomposition
//!
//! The array is cut into blocks of `ceil(log2(n) / 2)` elements. The minimum
//! of each block is promoted into an array of roughly `2n / log n` entries,
//! indexed by a [`SparseTable`]. Since the sparse table only sees the promoted
//! array, its `log` factor cancels and the whole structure is O(n).
//!
//! A query scans the partially covered blocks at either end and looks up the
//! fully covered middle blocks in O(1).

use super::{RangeMinimumQuery, SparseTable, block_size, min_index, normalize};
use crate::error::{IndexError, Result};

#[derive(Debug, Clone)]
pub struct BlockRmq<T> {
    data: Vec<T>,
    block: usize,
    /// Position in `data` of each block's minimum
    promoted_indices: Vec<usize>,
    /// Sparse table over the values at `promoted_indices`
    promoted: SparseTable<T>,
}

impl<T: PartialOrd + Clone> BlockRmq<T> {
    pub fn new(data: Vec<T>) -> Result<Self> {
        if data.is_empty() {
            return Err(IndexError::EmptyInput("block range minimum table"));
        }

        let block = block_size(data.len());
        let promoted_indices: Vec<usize> = data
            .chunks(block)
            .enumerate()
            .map(|(b, chunk)| {
                let start = b * block;
                (start + 1..start + chunk.len()).fold(start, |best, k| min_index(&data, best, k))
            })
            .collect();
        let promoted_values = promoted_indices.iter().map(|&k| data[k].clone()).collect();
        let promoted = SparseTable::new(promoted_values)?;

        Ok(Self {
            data,
            block,
            promoted_indices,
            promoted,
        })
    }
}

impl<T: PartialOrd> BlockRmq<T> {
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Number of elements per block (the last block may be shorter)
    pub fn block_len(&self) -> usize {
        self.block
    }

    pub fn block_count(&self) -> usize {
        self.promoted_indices.len()
    }

    /// Position of the minimum over blocks `first..=last`, in O(1).
    #[inline]
    pub fn block_minimum(&self, first: usize, last: usize) -> Result<usize> {
        let (first, last) = normalize(first, last, self.promoted_indices.len())?;
        Ok(self.promoted_indices[self.promoted.query(first, last)])
    }

    fn scan(&self, best: Option<usize>, from: usize, to: usize) -> Option<usize> {
        (from..=to).fold(best, |best, k| match best {
            Some(b) => Some(min_index(&self.data, b, k)),
            None => Some(k),
        })
    }
}

impl<T: PartialOrd> RangeMinimumQuery for BlockRmq<T> {
    fn rmq(&self, i: usize, j: usize) -> Result<usize> {
        let (i, j) = normalize(i, j, self.data.len())?;
        let first_block = i / self.block;
        let last_block = j / self.block;

        if first_block == last_block {
            return self
                .scan(None, i, j)
                .ok_or(IndexError::Invariant("empty block scan"));
        }

        // Left partial block, middle blocks, right partial block
        let mut best = self.scan(None, i, (first_block + 1) * self.block - 1);
        if first_block + 1 < last_block {
            let k = self.block_minimum(first_block + 1, last_block - 1)?;
            best = best.map(|b| min_index(&self.data, b, k));
        }
        best = self.scan(best, last_block * self.block, j);

        best.ok_or(IndexError::Invariant("empty block scan"))
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn is_plus_minus_1(&self) -> bool {
        false
    }
}
