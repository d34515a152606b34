#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use stix::rmq::{RangeMinimumQuery, RmqTier, build_rmq};

#[derive(Arbitrary, Debug)]
struct Input {
    values: Vec<i16>,
    /// Step directions for a plus-minus-one walk
    steps: Vec<bool>,
    queries: Vec<(u16, u16)>,
}

fuzz_target!(|input: Input| {
    if input.values.is_empty() {
        return;
    }
    let values = input.values;
    let mut walk = vec![0i32];
    for &up in &input.steps {
        let last = walk[walk.len() - 1];
        walk.push(if up { last + 1 } else { last - 1 });
    }

    let tables: Vec<_> = [RmqTier::Naive, RmqTier::SparseTable, RmqTier::Block, RmqTier::Cartesian]
        .into_iter()
        .filter(|&tier| tier != RmqTier::Naive || values.len() <= 512)
        .map(|tier| build_rmq(tier, values.clone()).unwrap())
        .collect();
    let walk_table = build_rmq(RmqTier::PlusMinusOne, walk.clone()).unwrap();

    for &(a, b) in &input.queries {
        let (i, j) = (a as usize % values.len(), b as usize % values.len());
        let (lo, hi) = (i.min(j), i.max(j));
        let expected = *values[lo..=hi].iter().min().unwrap();
        for table in &tables {
            assert_eq!(values[table.rmq(i, j).unwrap()], expected);
        }

        let (i, j) = (a as usize % walk.len(), b as usize % walk.len());
        let (lo, hi) = (i.min(j), i.max(j));
        let expected = *walk[lo..=hi].iter().min().unwrap();
        assert_eq!(walk[walk_table.rmq(i, j).unwrap()], expected);
    }
});
