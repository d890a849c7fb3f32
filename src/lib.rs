//! Bloom filter index over the canonical k-mers of a FASTA sequence.
//!
//! - Canonical k-mers: a k-mer and its reverse complement share one code in `[1, 4^k]`
//! - O(1) rolling canonical encoding while streaming the sequence
//! - Hash positions from a xorshift64 hash chain seeded with the code
//! - Parallel batch queries via `rayon`
//!
//! Typical flow: [`BuildConfig`] → [`build_from_path`] → [`KmerBloomIndex::query_kmer`].
//! No false negatives: every k-mer of the input (or its reverse complement) queries `true`.

mod bloom;
mod builder;
pub mod encode;
mod error;
pub mod hash;
mod index;
mod io;

pub use bloom::BloomFilter;
pub use builder::{
    BuildConfig, BuildStats, MAX_FILTER_BITS, MAX_HASH_COUNT, build_from_path, build_from_reader,
};
pub use encode::{MAX_K, canonical_code, canonicalize, encode, reverse_complement};
pub use error::{Error, Result};
pub use index::KmerBloomIndex;
pub use io::FastaSymbols;
