#![no_main]

use libfuzzer_sys::fuzz_target;
use stix::tree::{BuildStrategy, SuffixTree};

fuzz_target!(|data: &[u8]| {
    // Quadratic naive build, keep inputs short
    let text = &data[..data.len().min(256)];
    let (Ok(naive), Ok(ukkonen)) = (
        SuffixTree::from_bytes(text, BuildStrategy::Naive),
        SuffixTree::from_bytes(text, BuildStrategy::Ukkonen),
    ) else {
        assert!(text.is_empty());
        return;
    };

    assert_eq!(naive.node_count(), ukkonen.node_count());

    for start in 0..text.len() {
        let end = (start + 4).min(text.len());
        let pattern = &text[start..end];
        let mut a = naive.occurrences(pattern).unwrap();
        let mut b = ukkonen.occurrences(pattern).unwrap();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
        assert!(a.contains(&start));

        assert_eq!(
            naive.longest_common_prefix(0, start).unwrap(),
            ukkonen.longest_common_prefix(0, start).unwrap()
        );
    }
});
