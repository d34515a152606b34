//! Shared helpers for the integration tests.
#![allow(dead_code)]

/// Small deterministic xorshift generator
pub struct XorShift(pub u64);

impl XorShift {
    pub fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Text of `len` symbols drawn from `alphabet`
    pub fn text(&mut self, len: usize, alphabet: &[char]) -> String {
        (0..len)
            .map(|_| alphabet[(self.next() % alphabet.len() as u64) as usize])
            .collect()
    }

    /// Values in `[-modulo/2, modulo/2)`
    pub fn values(&mut self, len: usize, modulo: u64) -> Vec<i64> {
        (0..len)
            .map(|_| (self.next() % modulo) as i64 - (modulo / 2) as i64)
            .collect()
    }

    /// Random walk with steps of exactly one
    pub fn walk(&mut self, len: usize) -> Vec<i64> {
        let mut out = Vec::with_capacity(len);
        let mut value = 0i64;
        for _ in 0..len {
            out.push(value);
            value += if self.next() & 1 == 0 { 1 } else { -1 };
        }
        out
    }
}

/// Every start position of `pattern` in `text`, by direct comparison
pub fn brute_occurrences(text: &[char], pattern: &[char]) -> Vec<usize> {
    if pattern.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|&start| &text[start..start + pattern.len()] == pattern)
        .collect()
}

/// LCP of two suffixes of `text` with the terminal counted as one extra symbol
pub fn brute_lcp(text: &[char], i: usize, j: usize) -> usize {
    let n = text.len() + 1;
    if i == j {
        return n - i;
    }
    text[i.min(text.len())..]
        .iter()
        .zip(&text[j.min(text.len())..])
        .take_while(|(a, b)| a == b)
        .count()
}

pub fn sorted(mut v: Vec<usize>) -> Vec<usize> {
    v.sort_unstable();
    v
}
