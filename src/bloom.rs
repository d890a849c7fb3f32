//! Bloom filter over canonical k-mer codes.
//!
//! Bits are packed into `u64` words; bit positions come from [`crate::hash::HashChain`]
//! seeded with the code, so insert and query derive the same positions without any
//! retained scratch state. The filter only ever fills up: no clearing, no resizing.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::hash::HashChain;

/// Fixed-size Bloom filter with a hash-chain family of `num_hashes` functions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BloomFilter {
    /// Number of addressable bits (the hash modulus).
    num_bits: u64,
    /// Hash positions derived per code.
    num_hashes: usize,
    /// Bit array, `ceil(num_bits / 64)` words.
    words: Vec<u64>,
}

impl BloomFilter {
    /// Create an all-zero filter of `num_bits` bits using `num_hashes` positions per code.
    ///
    /// Both parameters must be at least 1.
    pub fn new(num_bits: u64, num_hashes: usize) -> Result<Self> {
        if num_bits == 0 {
            return Err(Error::Config("filter size must be at least 1 bit".into()));
        }
        if num_hashes == 0 {
            return Err(Error::Config("hash count must be at least 1".into()));
        }
        let num_words = usize::try_from(num_bits.div_ceil(64))
            .map_err(|_| Error::Config(format!("filter size {num_bits} is not addressable")))?;
        Ok(Self {
            num_bits,
            num_hashes,
            words: vec![0u64; num_words],
        })
    }

    #[inline]
    fn positions(&self, code: u64) -> HashChain {
        HashChain::new(code, self.num_hashes, self.num_bits)
    }

    #[inline]
    fn test_bit(&self, pos: u64) -> bool {
        (self.words[(pos >> 6) as usize] >> (pos & 63)) & 1 == 1
    }

    /// Set every bit derived from `code`. Idempotent.
    pub fn insert(&mut self, code: u64) {
        for pos in self.positions(code) {
            self.words[(pos >> 6) as usize] |= 1u64 << (pos & 63);
        }
    }

    /// `true` iff every bit derived from `code` is set.
    ///
    /// Never `false` for an inserted code; may be `true` for one never inserted.
    pub fn query(&self, code: u64) -> bool {
        self.positions(code).all(|pos| self.test_bit(pos))
    }

    /// Number of codes in `codes` reported present, queried in parallel.
    pub fn count_present(&self, codes: &[u64]) -> usize {
        codes.par_iter().filter(|&&c| self.query(c)).count()
    }

    /// Size of the bit array in bits.
    #[inline]
    pub fn num_bits(&self) -> u64 {
        self.num_bits
    }

    #[inline]
    pub fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    /// Population count of the bit array.
    pub fn count_ones(&self) -> u64 {
        self.words.iter().map(|w| u64::from(w.count_ones())).sum()
    }

    /// Whether no bit is set yet.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Fraction of bits set.
    pub fn load_factor(&self) -> f64 {
        self.count_ones() as f64 / self.num_bits as f64
    }

    /// False-positive probability implied by the current fill: `load_factor ^ num_hashes`.
    pub fn estimated_fpp(&self) -> f64 {
        let exp = i32::try_from(self.num_hashes).unwrap_or(i32::MAX);
        self.load_factor().powi(exp)
    }
}
