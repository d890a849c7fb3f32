//! Error type shared by the library.

/// Result alias over [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while configuring, building or querying a k-mer Bloom index.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A byte outside the accepted alphabet.
    ///
    /// For streams the offset is the byte position in the input (header included);
    /// for query k-mers it is the position within the k-mer.
    #[error("Invalid symbol {:?} at offset {offset}", char::from(*symbol))]
    InvalidSymbol { symbol: u8, offset: u64 },

    /// A query k-mer whose length differs from the configured `k`.
    #[error("Invalid k-mer length: {found}. Expected: {expected}")]
    InvalidLength { expected: usize, found: usize },

    /// Rejected construction parameters.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Fewer than `k` sequence symbols after the header; no k-mer can be formed.
    #[error("Stream truncated: {available} sequence symbols, need at least k={k}")]
    StreamTruncated { k: usize, available: usize },

    /// I/O error while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
