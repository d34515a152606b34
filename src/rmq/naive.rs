//! Tier 1: exhaustive range table
//!
//! `level[s][p]` holds the answer for the range of `s + 1` elements starting
//! at `p`. Each level is derived from the previous one, so the whole table is
//! O(n^2) in time and space. The plus-minus-one tier keeps one of these per
//! distinct block shape, where `n` is tiny.

use super::{RangeMinimumQuery, min_index, normalize};
use crate::error::{IndexError, Result};

#[derive(Debug, Clone)]
pub struct NaiveRmq<T> {
    data: Vec<T>,
    level: Vec<Vec<usize>>,
}

impl<T: PartialOrd> NaiveRmq<T> {
    pub fn new(data: Vec<T>) -> Result<Self> {
        if data.is_empty() {
            return Err(IndexError::EmptyInput("naive range minimum table"));
        }

        let n = data.len();
        let mut level: Vec<Vec<usize>> = Vec::with_capacity(n);
        level.push((0..n).collect());

        for span in 1..n {
            let previous = &level[span - 1];
            let current: Vec<usize> = (0..n - span)
                .map(|p| min_index(&data, previous[p], previous[p + 1]))
                .collect();
            level.push(current);
        }

        Ok(Self { data, level })
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }
}

impl<T: PartialOrd> RangeMinimumQuery for NaiveRmq<T> {
    #[inline]
    fn rmq(&self, i: usize, j: usize) -> Result<usize> {
        let (i, j) = normalize(i, j, self.data.len())?;
        Ok(self.level[j - i][i])
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn is_plus_minus_1(&self) -> bool {
        false
    }
}
