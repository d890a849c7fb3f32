//! Multi-hashing from a single seed via a xorshift64 hash chain.
//!
//! `value[0] = xorshift64(seed)`, `value[i] = xorshift64(value[i-1])`, each reduced
//! modulo the filter size afterwards. The chain is cheap but its values are not
//! independent; it is not a cryptographic primitive.

/// One xorshift64 mixing step (shifts 13, 7, 17).
#[inline]
pub const fn xorshift64(mut x: u64) -> u64 {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

/// Iterator over the first `count` links of the hash chain started at `seed`,
/// each reduced modulo `modulus`.
///
/// The chain advances on the raw 64-bit values; only the yielded items are reduced.
#[derive(Clone, Debug)]
pub struct HashChain {
    state: u64,
    remaining: usize,
    modulus: u64,
}

impl HashChain {
    /// `modulus` must be non-zero.
    #[inline]
    pub fn new(seed: u64, count: usize, modulus: u64) -> Self {
        debug_assert!(modulus > 0, "modulus must be positive");
        Self {
            state: seed,
            remaining: count,
            modulus,
        }
    }
}

impl Iterator for HashChain {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.state = xorshift64(self.state);
        Some(self.state % self.modulus)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for HashChain {}

/// Derive `count` bit positions in `[0, modulus)` from `seed`.
///
/// Pure function of its arguments: identical inputs give identical sequences.
pub fn derive(seed: u64, count: usize, modulus: u64) -> Vec<u64> {
    HashChain::new(seed, count, modulus).collect()
}
