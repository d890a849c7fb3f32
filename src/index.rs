//! KmerBloomIndex: a Bloom filter bound to the k-mer length it was built with.

use rayon::prelude::*;

use crate::bloom::BloomFilter;
use crate::encode::{canonical_code, validate_kmer};
use crate::error::Result;

/// Query-time API over canonical k-mer codes.
#[derive(Clone, Debug)]
pub struct KmerBloomIndex {
    k: usize,
    filter: BloomFilter,
}

impl KmerBloomIndex {
    pub(crate) fn new(k: usize, filter: BloomFilter) -> Self {
        Self { k, filter }
    }

    /// Return the k used by this index.
    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn filter(&self) -> &BloomFilter {
        &self.filter
    }

    pub(crate) fn filter_mut(&mut self) -> &mut BloomFilter {
        &mut self.filter
    }

    /// Insert a literal k-mer (length `k`, symbols A/C/G/T).
    pub fn insert_kmer(&mut self, kmer: &[u8]) -> Result<()> {
        validate_kmer(kmer, self.k)?;
        self.filter.insert(canonical_code(kmer));
        Ok(())
    }

    /// Membership of a literal k-mer or its reverse complement.
    pub fn query_kmer(&self, kmer: &[u8]) -> Result<bool> {
        validate_kmer(kmer, self.k)?;
        Ok(self.filter.query(canonical_code(kmer)))
    }

    /// Membership of a canonical code, e.g. one produced by a rolling encoder.
    #[inline]
    pub fn query_code(&self, code: u64) -> bool {
        self.filter.query(code)
    }

    /// Query many literal k-mers in parallel. Fails on the first invalid k-mer.
    pub fn query_kmers<K>(&self, kmers: &[K]) -> Result<Vec<bool>>
    where
        K: AsRef<[u8]> + Sync,
    {
        kmers
            .par_iter()
            .map(|kmer| self.query_kmer(kmer.as_ref()))
            .collect()
    }

    /// Population count of the underlying bit array.
    #[inline]
    pub fn count_ones(&self) -> u64 {
        self.filter.count_ones()
    }
}
