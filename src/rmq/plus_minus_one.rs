//! Tier 4: plus-minus-one range minimum query
//!
//! Reuses the block split of [`BlockRmq`] for queries spanning whole blocks.
//! Inside a block, consecutive values differ by exactly one, so a block is
//! fully described (up to a constant offset) by its length and a bitmask of
//! rises. Blocks with the same description share one [`NaiveRmq`], which
//! answers any in-block range in O(1). With blocks of `log2(n) / 2` elements
//! there are at most `O(sqrt(n))` distinct masks, so the shared tables stay
//! within O(n) space overall.

use super::{BlockRmq, NaiveRmq, RangeMinimumQuery, UnitStep, min_index, normalize};
use crate::error::{IndexError, Result};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub struct PlusMinusOneRmq<T> {
    blocks: BlockRmq<T>,
    /// Index into `tables` for every block
    block_table: Vec<usize>,
    /// One lookup table per distinct `(length, signature)` pair
    tables: Vec<NaiveRmq<T>>,
}

impl<T: UnitStep> PlusMinusOneRmq<T> {
    pub fn new(data: Vec<T>) -> Result<Self> {
        if data.is_empty() {
            return Err(IndexError::EmptyInput("plus-minus-one range minimum table"));
        }
        if let Some(position) = data.windows(2).position(|w| !w[0].differs_by_one(w[1])) {
            return Err(IndexError::NotPlusMinusOne { position });
        }

        let blocks = BlockRmq::new(data)?;
        let mut signatures: FxHashMap<(usize, u64), usize> = FxHashMap::default();
        let mut tables = Vec::new();
        let mut block_table = Vec::with_capacity(blocks.block_count());

        for chunk in blocks.data().chunks(blocks.block_len()) {
            let key = (chunk.len(), signature(chunk));
            let table = match signatures.get(&key) {
                Some(&table) => table,
                None => {
                    tables.push(NaiveRmq::new(chunk.to_vec())?);
                    signatures.insert(key, tables.len() - 1);
                    tables.len() - 1
                }
            };
            block_table.push(table);
        }

        tracing::debug!(
            size = blocks.data().len(),
            block = blocks.block_len(),
            shared_tables = tables.len(),
            "built plus-minus-one table"
        );

        Ok(Self {
            blocks,
            block_table,
            tables,
        })
    }

    /// Number of distinct in-block lookup tables
    pub fn distinct_tables(&self) -> usize {
        self.tables.len()
    }

    /// Minimum position within block `b` between local offsets `from..=to`.
    #[inline]
    fn in_block(&self, b: usize, from: usize, to: usize) -> Result<usize> {
        let local = self.tables[self.block_table[b]].rmq(from, to)?;
        Ok(b * self.blocks.block_len() + local)
    }
}

/// Bit `s` is set when the step from element `s` to `s + 1` rises.
fn signature<T: UnitStep>(chunk: &[T]) -> u64 {
    chunk
        .windows(2)
        .enumerate()
        .fold(0u64, |code, (s, w)| if w[1] > w[0] { code | (1 << s) } else { code })
}

impl<T: UnitStep> RangeMinimumQuery for PlusMinusOneRmq<T> {
    fn rmq(&self, i: usize, j: usize) -> Result<usize> {
        let data = self.blocks.data();
        let (i, j) = normalize(i, j, data.len())?;
        let block = self.blocks.block_len();
        let (first_block, last_block) = (i / block, j / block);

        if first_block == last_block {
            return self.in_block(first_block, i % block, j % block);
        }

        let mut best = self.in_block(first_block, i % block, block - 1)?;
        if first_block + 1 < last_block {
            let k = self.blocks.block_minimum(first_block + 1, last_block - 1)?;
            best = min_index(data, best, k);
        }
        let k = self.in_block(last_block, 0, j % block)?;
        Ok(min_index(data, best, k))
    }

    fn size(&self) -> usize {
        self.blocks.data().len()
    }

    fn is_plus_minus_1(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rmq::test_support::*;

    #[test]
    fn test_signature() {
        assert_eq!(signature(&[3i64]), 0);
        assert_eq!(signature(&[3i64, 4, 3, 4]), 0b101);
        assert_eq!(signature(&[0usize, 1, 2]), 0b11);
    }

    #[test]
    fn test_rejects_non_unit_steps() {
        let err = PlusMinusOneRmq::new(SAMPLE.to_vec()).unwrap_err();
        assert_eq!(err, IndexError::NotPlusMinusOne { position: 0 });
        let err = PlusMinusOneRmq::new(vec![0i64, 1, 1]).unwrap_err();
        assert_eq!(err, IndexError::NotPlusMinusOne { position: 1 });
    }

    #[test]
    fn test_euler_depths() {
        // Depths of an Euler tour over a small tree
        let data: Vec<usize> = vec![0, 1, 2, 1, 2, 1, 0, 1, 0];
        let rmq = PlusMinusOneRmq::new(data.clone()).unwrap();
        assert!(rmq.is_plus_minus_1());
        assert_eq!(rmq.rmq(1, 5).unwrap(), 1);
        assert_eq!(data[rmq.rmq(2, 4).unwrap()], 1);
        assert_eq!(data[rmq.rmq(4, 7).unwrap()], 0);
        assert_eq!(rmq.rmq(8, 8).unwrap(), 8);
    }

    #[test]
    fn test_shared_tables() {
        // Blocks of 5 alternate between two shapes; the short tail adds a third
        let data: Vec<i64> = (0..1024).map(|k| if k % 2 == 0 { 0 } else { 1 }).collect();
        let rmq = PlusMinusOneRmq::new(data).unwrap();
        assert_eq!(rmq.distinct_tables(), 3);
    }

    #[test]
    fn test_random_walks_against_scan() {
        let mut rng = XorShift(0x5eed);
        for len in [1, 2, 3, 9, 31, 64, 129, 300] {
            let data = rng.walk(len);
            let rmq = PlusMinusOneRmq::new(data.clone()).unwrap();
            for i in 0..len {
                for j in i..len {
                    let k = rmq.rmq(j, i).unwrap();
                    assert!((i..=j).contains(&k));
                    assert_eq!(data[k], brute_min(&data, i, j), "({}, {}) len {}", i, j, len);
                }
            }
        }
    }

    #[test]
    fn test_matches_block_tier_exactly_on_values() {
        let mut rng = XorShift(99);
        let data = rng.walk(200);
        let block = BlockRmq::new(data.clone()).unwrap();
        let pm1 = PlusMinusOneRmq::new(data.clone()).unwrap();
        for i in (0..200).step_by(7) {
            for j in (i..200).step_by(5) {
                assert_eq!(data[block.rmq(i, j).unwrap()], data[pm1.rmq(i, j).unwrap()]);
            }
        }
    }
}
