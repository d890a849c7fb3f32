//! Builder: configuration record and the streaming FASTA → Bloom filter pipeline.

use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::bloom::BloomFilter;
use crate::encode::{MAX_K, RollingEncoder};
use crate::error::{Error, Result};
use crate::index::KmerBloomIndex;
use crate::io::FastaSymbols;

/// Largest accepted filter size in bits (2^34, i.e. 2 GiB of bit array).
pub const MAX_FILTER_BITS: u64 = 1 << 34;
/// Largest accepted number of hash positions per k-mer.
pub const MAX_HASH_COUNT: usize = 64;

/// Build-time configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildConfig {
    k: usize,
    filter_bits: u64,
    hash_count: usize,
    threads: Option<usize>,
}

impl BuildConfig {
    /// K-mer length, filter size in bits and hash positions per k-mer.
    pub fn new(k: usize, filter_bits: u64, hash_count: usize) -> Self {
        Self {
            k,
            filter_bits,
            hash_count,
            threads: None,
        }
    }
    /// Fix the number of threads used by rayon for batch queries.
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = Some(n);
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }
    pub fn filter_bits(&self) -> u64 {
        self.filter_bits
    }
    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// Reject parameters outside the supported ranges.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 || self.k > MAX_K {
            return Err(Error::Config(format!(
                "k must be 1..={MAX_K}, got {}",
                self.k
            )));
        }
        if self.filter_bits == 0 || self.filter_bits > MAX_FILTER_BITS {
            return Err(Error::Config(format!(
                "filter size must be 1..={MAX_FILTER_BITS} bits, got {}",
                self.filter_bits
            )));
        }
        if self.hash_count == 0 || self.hash_count > MAX_HASH_COUNT {
            return Err(Error::Config(format!(
                "hash count must be 1..={MAX_HASH_COUNT}, got {}",
                self.hash_count
            )));
        }
        if self.threads == Some(0) {
            return Err(Error::Config("threads must be at least 1".into()));
        }
        Ok(())
    }

    /// Validate and allocate an empty index.
    pub fn empty_index(&self) -> Result<KmerBloomIndex> {
        self.validate()?;
        let filter = BloomFilter::new(self.filter_bits, self.hash_count)?;
        Ok(KmerBloomIndex::new(self.k, filter))
    }
}

/// Counters collected while streaming the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Sequence symbols consumed after header and skip filtering.
    pub symbols: u64,
    /// K-mer windows inserted (overlapping, duplicates included).
    pub kmers: u64,
}

/// Build a k-mer Bloom index from a FASTA file.
pub fn build_from_path(path: &Path, cfg: &BuildConfig) -> Result<(KmerBloomIndex, BuildStats)> {
    debug!(path = %path.display(), "opening FASTA input");
    let symbols = FastaSymbols::from_path(path)?;
    build_from_symbols(symbols, cfg)
}

/// Build a k-mer Bloom index from any FASTA byte stream.
pub fn build_from_reader<R: Read>(
    reader: R,
    cfg: &BuildConfig,
) -> Result<(KmerBloomIndex, BuildStats)> {
    build_from_symbols(FastaSymbols::new(reader), cfg)
}

fn build_from_symbols<R: Read>(
    mut symbols: FastaSymbols<R>,
    cfg: &BuildConfig,
) -> Result<(KmerBloomIndex, BuildStats)> {
    let mut index = cfg.empty_index()?;
    if let Some(n) = cfg.threads {
        // Fails only if the global pool already exists; keep that pool.
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .ok();
    }
    debug!(
        k = cfg.k,
        filter_bits = cfg.filter_bits,
        hash_count = cfg.hash_count,
        "building k-mer Bloom filter"
    );

    let mut encoder = RollingEncoder::new(cfg.k);
    let mut stats = BuildStats::default();
    let filter = index.filter_mut();
    while let Some(v) = symbols.next_digit()? {
        if let Some(code) = encoder.push_digit(v) {
            filter.insert(code);
            stats.kmers += 1;
        }
    }
    stats.symbols = symbols.symbols_read();

    if stats.kmers == 0 {
        return Err(Error::StreamTruncated {
            k: cfg.k,
            available: stats.symbols as usize,
        });
    }

    info!(
        symbols = stats.symbols,
        kmers = stats.kmers,
        bits_set = index.filter().count_ones(),
        "built k-mer Bloom filter"
    );
    Ok((index, stats))
}
