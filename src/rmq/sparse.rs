//! Tier 2: sparse table
//!
//! `table[k][i]` is the answer for `[i, i + 2^k)`. A query covers `[i, j]`
//! with the two largest power-of-two windows anchored at each end; they may
//! overlap, which is harmless for a minimum.

use super::{RangeMinimumQuery, floor_log2, min_index, normalize};
use crate::error::{IndexError, Result};

#[derive(Debug, Clone)]
pub struct SparseTable<T> {
    data: Vec<T>,
    table: Vec<Vec<usize>>,
}

impl<T: PartialOrd> SparseTable<T> {
    pub fn new(data: Vec<T>) -> Result<Self> {
        if data.is_empty() {
            return Err(IndexError::EmptyInput("sparse table"));
        }

        let n = data.len();
        let levels = floor_log2(n) + 1;
        let mut table: Vec<Vec<usize>> = Vec::with_capacity(levels);
        table.push((0..n).collect());

        for k in 1..levels {
            let half = 1 << (k - 1);
            let previous = &table[k - 1];
            // Windows of length 2^k that fit entirely inside the array
            let current: Vec<usize> = (0..=n - (1 << k))
                .map(|i| min_index(&data, previous[i], previous[i + half]))
                .collect();
            table.push(current);
        }

        Ok(Self { data, table })
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Number of doubling levels in the table
    pub fn levels(&self) -> usize {
        self.table.len()
    }

    /// Query without bounds checks; callers guarantee `i <= j < size`.
    #[inline]
    pub(crate) fn query(&self, i: usize, j: usize) -> usize {
        let k = floor_log2(j - i + 1);
        let left = self.table[k][i];
        let right = self.table[k][j + 1 - (1 << k)];
        min_index(&self.data, left, right)
    }
}

impl<T: PartialOrd> RangeMinimumQuery for SparseTable<T> {
    #[inline]
    fn rmq(&self, i: usize, j: usize) -> Result<usize> {
        let (i, j) = normalize(i, j, self.data.len())?;
        Ok(self.query(i, j))
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn is_plus_minus_1(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rmq::test_support::*;

    #[test]
    fn test_sample_queries() {
        let rmq = SparseTable::new(SAMPLE.to_vec()).unwrap();
        assert_eq!(rmq.rmq(0, 0).unwrap(), 0);
        assert_eq!(rmq.rmq(0, 2).unwrap(), 2);
        assert_eq!(rmq.rmq(2, 5).unwrap(), 2);
        assert_eq!(rmq.rmq(4, 5).unwrap(), 4);
        assert_eq!(rmq.rmq(5, 7).unwrap(), 6);
        assert_eq!(rmq.rmq(8, 8).unwrap(), 8);
        assert_eq!(data_at(&rmq, 2, 8), 2);
    }

    fn data_at(rmq: &SparseTable<i64>, i: usize, j: usize) -> i64 {
        rmq.data()[rmq.rmq(i, j).unwrap()]
    }

    #[test]
    fn test_level_count() {
        assert_eq!(SparseTable::new(vec![1]).unwrap().levels(), 1);
        assert_eq!(SparseTable::new(vec![0; 8]).unwrap().levels(), 4);
        assert_eq!(SparseTable::new(vec![0; 9]).unwrap().levels(), 4);
    }

    #[test]
    fn test_single_element() {
        let rmq = SparseTable::new(vec![42]).unwrap();
        assert_eq!(rmq.rmq(0, 0).unwrap(), 0);
        assert!(rmq.rmq(0, 1).is_err());
    }

    #[test]
    fn test_random_against_scan() {
        let mut rng = XorShift(0xdead_beef);
        for len in [2, 3, 17, 64, 65, 130] {
            let data = rng.values(len, 50);
            let rmq = SparseTable::new(data.clone()).unwrap();
            for i in 0..len {
                for j in i..len {
                    assert_eq!(data[rmq.rmq(i, j).unwrap()], brute_min(&data, i, j));
                }
            }
        }
    }
}
