//! End-to-end scenarios for the public library API.

mod common;

use common::sorted;
use stix::error::{ErrorKind, IndexError};
use stix::rmq::{RangeMinimumQuery, RmqTier, build_rmq};
use stix::tree::{BuildStrategy, SuffixTree};

const SAMPLE: [i64; 9] = [8, 7, 2, 8, 6, 9, 4, 5, 2];

#[test]
fn senselessness_queries() {
    let tree = SuffixTree::from_text("senselessness", BuildStrategy::Ukkonen).unwrap();

    let expected: Vec<usize> = "senselessness"
        .char_indices()
        .filter(|&(_, c)| c == 's')
        .map(|(i, _)| i)
        .collect();
    assert_eq!(sorted(tree.find("s").unwrap()), expected);
    assert_eq!(tree.count("ss").unwrap(), 2);

    let repeats = tree.longest_repeated_substring(2).unwrap();
    assert!(!repeats.is_empty());
    assert!(tree.longest_repeated_span(2).unwrap().unwrap().len() > 0);
}

#[test]
fn sample_array_queries() {
    for tier in [RmqTier::Naive, RmqTier::SparseTable, RmqTier::Block, RmqTier::Cartesian] {
        let rmq = build_rmq(tier, SAMPLE.to_vec()).unwrap();
        assert_eq!(SAMPLE[rmq.rmq(0, 2).unwrap()], 2, "{:?}", tier);
        assert_eq!(rmq.rmq(5, 7).unwrap(), 6, "{:?}", tier);
        assert_eq!(rmq.rmq(8, 8).unwrap(), 8, "{:?}", tier);
    }
}

#[test]
fn strategies_agree() {
    let text = "abcabxabcd";
    let naive = SuffixTree::from_text(text, BuildStrategy::Naive).unwrap();
    let ukkonen = SuffixTree::from_text(text, BuildStrategy::Ukkonen).unwrap();
    let chars: Vec<char> = text.chars().collect();
    for start in 0..chars.len() {
        for end in start + 1..=chars.len() {
            let pattern = &chars[start..end];
            assert_eq!(
                sorted(naive.occurrences(pattern).unwrap()),
                sorted(ukkonen.occurrences(pattern).unwrap())
            );
        }
    }
}

#[test]
fn self_prefix_is_suffix_length() {
    let tree = SuffixTree::from_text("banana", BuildStrategy::Naive).unwrap();
    for i in 0..tree.len() {
        assert_eq!(tree.longest_common_prefix(i, i).unwrap(), tree.len() - i);
    }
}

#[test]
fn error_kinds() {
    let tree = SuffixTree::from_text("banana", BuildStrategy::Ukkonen).unwrap();
    let err = tree.occurrences(&[]).unwrap_err();
    assert_eq!(err, IndexError::EmptyPattern);
    assert_eq!(err.kind(), ErrorKind::Pattern);

    let rmq = build_rmq(RmqTier::SparseTable, SAMPLE.to_vec()).unwrap();
    let err = rmq.rmq(0, 9).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
}

#[test]
fn shared_across_threads() {
    let tree = SuffixTree::from_text("abracadabra", BuildStrategy::Ukkonen).unwrap();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(sorted(tree.find("abra").unwrap()), vec![0, 7]);
                assert_eq!(tree.longest_common_prefix(0, 7).unwrap(), 4);
            });
        }
    });
}
