use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;
use log::{info, trace};

use super::format;
use super::types::error::{BfbinError, Result};
use super::types::models::{LENGTH_WIDTH, MAGIC, TAG_WIDTH};
use super::utils;

/// Buffer this many bytes of input to amortize the many small reads the grammar needs.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 10 * 1024 * 1024;

/// Buffered, position-tracking access to a Byfl binary-output stream.
///
/// Owns the scratch buffer that backs every string value read during a
/// session. The buffer grows geometrically on demand and never shrinks;
/// its previous contents are not preserved across reads.
#[derive(Debug)]
pub struct BinaryReader<R: Read> {
    source: R,
    position: u64,
    scratch: Vec<u8>,
}

impl BinaryReader<BufReader<File>> {
    /// Opens `path` with a read buffer of `buffer_size` bytes and validates its magic header.
    ///
    /// # Errors
    /// - `Io` if the file cannot be opened
    /// - `Format` if the magic header is missing or wrong
    pub fn open(path: impl AsRef<Path>, buffer_size: usize) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening Byfl binary file: {}", path.display());
        let file = File::open(path)?;
        let mut reader = Self::new(BufReader::with_capacity(buffer_size, file));
        reader.check_magic()?;
        Ok(reader)
    }
}

impl<R: Read> BinaryReader<R> {
    /// Wraps an arbitrary byte source positioned at the start of a file.
    ///
    /// The magic header is not consumed; call [`check_magic`](Self::check_magic) first.
    pub fn new(source: R) -> Self {
        Self {
            source,
            position: 0,
            scratch: Vec::with_capacity(std::mem::size_of::<u64>()),
        }
    }

    /// Consumes and validates the 7-byte magic header.
    pub fn check_magic(&mut self) -> Result<()> {
        format::header::parse(&mut self.source)?;
        self.position += MAGIC.len() as u64;
        Ok(())
    }

    /// Number of bytes consumed so far, magic header included.
    pub fn position(&self) -> u64 {
        self.position
    }

    #[cfg(test)]
    fn scratch_capacity(&self) -> usize {
        self.scratch.capacity()
    }

    /// Reads an unsigned big-endian integer of `width` bytes.
    pub fn read_uint(&mut self, width: usize) -> Result<u64> {
        let value = utils::read_big_endian(&mut self.source, width)
            .map_err(|e| self.truncated(e, width))?;
        self.position += width as u64;
        Ok(value)
    }

    /// Reads a one-byte structural tag.
    pub fn read_tag(&mut self) -> Result<u8> {
        Ok(self.read_uint(TAG_WIDTH)? as u8)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_uint(8)
    }

    /// Reads a one-byte boolean; any nonzero byte is `true`.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_uint(1)? != 0)
    }

    /// Reads a string with a 2-byte big-endian length prefix into the scratch buffer.
    ///
    /// The returned slice borrows the scratch buffer and is invalidated by
    /// the next read. Each byte sequence that is not valid UTF-8 becomes
    /// U+FFFD; the raw bytes are not kept.
    pub fn read_string(&mut self) -> Result<Cow<'_, str>> {
        let len = self.read_uint(LENGTH_WIDTH)? as usize;
        self.ensure_scratch(len)?;

        self.scratch.clear();
        self.scratch.resize(len, 0);
        let start = self.position;
        self.source.read_exact(&mut self.scratch).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                BfbinError::Truncated { offset: start, wanted: len }
            } else {
                BfbinError::Io(e)
            }
        })?;
        self.position += len as u64;
        trace!("Read {}-byte string at position {}", len, start);

        Ok(String::from_utf8_lossy(&self.scratch))
    }

    /// Grows the scratch buffer so it can hold at least `len` bytes.
    fn ensure_scratch(&mut self, len: usize) -> Result<()> {
        let capacity = self.scratch.capacity();
        if capacity >= len {
            return Ok(());
        }
        let target = len.max(capacity.saturating_mul(2));
        trace!("Growing scratch buffer from {} to {} bytes", capacity, target);
        self.scratch.clear();
        reserve_scratch(&mut self.scratch, target)
    }

    fn truncated(&self, err: BfbinError, wanted: usize) -> BfbinError {
        match err {
            BfbinError::Io(e) if e.kind() == ErrorKind::UnexpectedEof => BfbinError::Truncated {
                offset: self.position,
                wanted,
            },
            other => other,
        }
    }
}

/// Reserves room for exactly `target` bytes in an emptied scratch buffer.
fn reserve_scratch(scratch: &mut Vec<u8>, target: usize) -> Result<()> {
    scratch
        .try_reserve_exact(target)
        .map_err(|_| BfbinError::Allocation { bytes: target })
}
