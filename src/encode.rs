//! K-mer encoding: 2-bit mapping, canonicalization, base-4 codes and rolling windows.
//!
//! Conventions
//! - Digits: A=0, C=1, G=2, T=3.
//! - `encode` is **position-weighted from the start**: symbol `i` contributes `digit * 4^i`.
//! - Codes are shifted by one, so every code lies in `[1, 4^k]` and 0 is never produced.
//! - Canonical form is the lexicographically smaller of a k-mer and its reverse complement.

use crate::error::{Error, Result};

/// Largest supported k-mer length: `4^31` still fits in a `u64` code.
pub const MAX_K: usize = 31;

/// 256-entry LUT: ASCII → 2-bit (A=0, C=1, G=2, T=3), 0xFF for everything else.
pub static MAP_LUT: [u8; 256] = {
    const X: u8 = 0xFF;
    let mut t = [X; 256];
    t[b'A' as usize] = 0;
    t[b'C' as usize] = 1;
    t[b'G' as usize] = 2;
    t[b'T' as usize] = 3;
    t
};

const SYMBOLS: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// 2-bit digit of a nucleotide. `None` outside {A,C,G,T}.
#[inline]
pub fn map_base(b: u8) -> Option<u8> {
    let v = MAP_LUT[b as usize];
    if v <= 3 { Some(v) } else { None }
}

/// Complementary base (A↔T, C↔G). `None` outside {A,C,G,T}.
#[inline]
pub fn complement(b: u8) -> Option<u8> {
    map_base(b).map(|v| SYMBOLS[(v ^ 0b11) as usize])
}

/// Check that `kmer` has length `k` and only contains {A,C,G,T}.
pub fn validate_kmer(kmer: &[u8], k: usize) -> Result<()> {
    if kmer.len() != k {
        return Err(Error::InvalidLength {
            expected: k,
            found: kmer.len(),
        });
    }
    match kmer.iter().position(|&b| map_base(b).is_none()) {
        Some(i) => Err(Error::InvalidSymbol {
            symbol: kmer[i],
            offset: i as u64,
        }),
        None => Ok(()),
    }
}

/// Reverse complement of a k-mer over {A,C,G,T}.
///
/// Callers must pass validated input; other bytes are passed through unchanged.
pub fn reverse_complement(kmer: &[u8]) -> Vec<u8> {
    kmer.iter()
        .rev()
        .map(|&b| complement(b).unwrap_or(b))
        .collect()
}

/// Canonical representative of a k-mer: itself or its reverse complement,
/// whichever is lexicographically smaller.
///
/// Scans `kmer[i]` against `complement(kmer[k-1-i])` and decides at the first
/// mismatch; the reverse complement is only materialized when it wins.
/// Palindromic k-mers are returned unchanged.
pub fn canonicalize(kmer: &[u8]) -> Vec<u8> {
    let k = kmer.len();
    for i in 0..k {
        let alt = complement(kmer[k - 1 - i]).unwrap_or(kmer[k - 1 - i]);
        if kmer[i] > alt {
            return reverse_complement(kmer);
        }
        if kmer[i] < alt {
            break;
        }
    }
    kmer.to_vec()
}

/// Base-4 code of a canonical k-mer, in `[1, 4^k]`.
///
/// Only meaningful on the output of [`canonicalize`]; on a raw k-mer the
/// reverse-complement equivalence is lost.
#[inline]
pub fn encode(canonical_kmer: &[u8]) -> u64 {
    debug_assert!(canonical_kmer.len() <= MAX_K);
    let mut code: u64 = 0;
    for &b in canonical_kmer.iter().rev() {
        let v = map_base(b).unwrap_or(0) as u64;
        code = (code << 2) | v;
    }
    code + 1
}

/// Canonicalize then encode: the code shared by a k-mer and its reverse complement.
#[inline]
pub fn canonical_code(kmer: &[u8]) -> u64 {
    encode(&canonicalize(kmer))
}

/// Shift `window` one symbol to the left, append `incoming`, and return the
/// canonical code of the new window (recomputed from scratch).
pub fn roll(window: &mut [u8], incoming: u8) -> u64 {
    let k = window.len();
    if k == 0 {
        return encode(window);
    }
    window.copy_within(1.., 0);
    window[k - 1] = incoming;
    canonical_code(window)
}

/// Mask of the lower `2k` bits.
#[inline]
fn kmer_mask(k: usize) -> u64 {
    if k >= 32 {
        u64::MAX
    } else {
        (1u64 << (2 * k)) - 1
    }
}

/// O(1) rolling canonical encoder.
///
/// Keeps two views of the current window:
/// - `fwd_msb`: first symbol in the top digit, so numeric order is lexicographic order.
/// - `fwd_lsb`: first symbol in the bottom digit, i.e. the [`encode`] layout.
///
/// The reverse complement's views are their digit-wise complements:
/// `rc_msb = mask - fwd_lsb`, `rc_lsb = mask - fwd_msb`.
/// Every code equals [`canonical_code`] of the same window.
#[derive(Clone, Debug)]
pub struct RollingEncoder {
    k: usize,
    mask: u64,
    fwd_msb: u64,
    fwd_lsb: u64,
    len: usize,
}

impl RollingEncoder {
    /// Encoder for windows of length `k` (`1..=MAX_K`).
    pub fn new(k: usize) -> Self {
        debug_assert!(k > 0 && k <= MAX_K, "k must be 1..=31");
        Self {
            k,
            mask: kmer_mask(k),
            fwd_msb: 0,
            fwd_lsb: 0,
            len: 0,
        }
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Whether a full window has been seen.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len >= self.k
    }

    /// Push a 2-bit digit; returns the canonical code once the window is full.
    #[inline]
    pub fn push_digit(&mut self, v: u8) -> Option<u64> {
        let v = (v & 0b11) as u64;
        self.fwd_msb = ((self.fwd_msb << 2) | v) & self.mask;
        self.fwd_lsb = (self.fwd_lsb >> 2) | (v << (2 * (self.k - 1)));
        if self.len < self.k {
            self.len += 1;
        }
        if !self.is_full() {
            return None;
        }
        Some(self.code())
    }

    /// Canonical code of the current window. Only meaningful once full.
    #[inline]
    pub fn code(&self) -> u64 {
        let rc_msb = self.mask - self.fwd_lsb;
        if self.fwd_msb <= rc_msb {
            self.fwd_lsb + 1
        } else {
            (self.mask - self.fwd_msb) + 1
        }
    }
}

/// A k-length sliding window over nucleotide symbols.
///
/// Each [`push`](Self::push) drops the first symbol and appends the new one;
/// [`as_bytes`](Self::as_bytes) exposes the current window in order.
#[derive(Clone, Debug)]
pub struct KmerWindow {
    buf: Vec<u8>,
    encoder: RollingEncoder,
    pushed: u64,
}

impl KmerWindow {
    pub fn new(k: usize) -> Self {
        Self {
            buf: Vec::with_capacity(k),
            encoder: RollingEncoder::new(k),
            pushed: 0,
        }
    }

    /// Push one symbol from {A,C,G,T}; returns the canonical code once `k`
    /// symbols have been seen.
    pub fn push(&mut self, symbol: u8) -> Result<Option<u64>> {
        let v = map_base(symbol).ok_or(Error::InvalidSymbol {
            symbol,
            offset: self.pushed,
        })?;
        self.pushed += 1;
        if self.buf.len() == self.encoder.k() {
            self.buf.copy_within(1.., 0);
            let last = self.buf.len() - 1;
            self.buf[last] = symbol;
        } else {
            self.buf.push(symbol);
        }
        Ok(self.encoder.push_digit(v))
    }

    /// Current window contents (shorter than `k` until filled).
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.encoder.is_full()
    }
}

