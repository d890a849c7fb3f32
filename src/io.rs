//! FASTA symbol stream.
//!
//! The first line is a header and is discarded up to and including its `\n`.
//! Everything after it is sequence: `\n`, `\r` and `N` are skipped, A/C/G/T are
//! yielded as 2-bit digits, and any other byte is an [`Error::InvalidSymbol`].

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::encode::map_base;
use crate::error::{Error, Result};

const CHUNK_SIZE: usize = 64 * 1024;

/// Streaming reader over the sequence symbols of a single-header FASTA input.
pub struct FastaSymbols<R: Read> {
    inner: R,
    buf: Box<[u8]>,
    pos: usize,
    end: usize,
    /// Absolute offset of `buf[0]` in the input.
    base: u64,
    in_header: bool,
    eof: bool,
    symbols: u64,
}

impl FastaSymbols<BufReader<File>> {
    /// Open a FASTA file for streaming.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> FastaSymbols<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: vec![0u8; CHUNK_SIZE].into_boxed_slice(),
            pos: 0,
            end: 0,
            base: 0,
            in_header: true,
            eof: false,
            symbols: 0,
        }
    }

    /// Sequence symbols yielded so far.
    #[inline]
    pub fn symbols_read(&self) -> u64 {
        self.symbols
    }

    fn refill(&mut self) -> Result<()> {
        self.base += self.end as u64;
        self.pos = 0;
        self.end = 0;
        loop {
            match self.inner.read(&mut self.buf) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.end = n;
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Next sequence symbol as a 2-bit digit, or `None` at end of stream.
    pub fn next_digit(&mut self) -> Result<Option<u8>> {
        loop {
            if self.pos == self.end {
                if self.eof {
                    return Ok(None);
                }
                self.refill()?;
                continue;
            }

            if self.in_header {
                match self.buf[self.pos..self.end].iter().position(|&b| b == b'\n') {
                    Some(i) => {
                        self.pos += i + 1;
                        self.in_header = false;
                    }
                    None => self.pos = self.end,
                }
                continue;
            }

            let b = self.buf[self.pos];
            let offset = self.base + self.pos as u64;
            self.pos += 1;
            match b {
                b'\n' | b'\r' | b'N' => continue,
                _ => match map_base(b) {
                    Some(v) => {
                        self.symbols += 1;
                        return Ok(Some(v));
                    }
                    None => return Err(Error::InvalidSymbol { symbol: b, offset }),
                },
            }
        }
    }
}

impl<R: Read> Iterator for FastaSymbols<R> {
    type Item = Result<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_digit().transpose()
    }
}
