//! Magic header validation.
//!
//! A Byfl binary-output file opens with the 7-byte ASCII sequence
//! `BYFLBIN`. Nothing else is read until this check passes.

use std::io::{ErrorKind, Read};
use log::{debug, trace};

use crate::bfbin::types::error::{BfbinError, Result};
use crate::bfbin::types::models::MAGIC;

/// Reads and validates the magic header from the start of `source`.
///
/// # Errors
/// - `Format` if fewer than 7 bytes are available or they do not match
/// - `Io` for any other read failure
pub fn parse<R: Read>(source: &mut R) -> Result<()> {
    let mut magic = [0u8; MAGIC.len()];
    match source.read_exact(&mut magic) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
            return Err(BfbinError::Format(
                "Failed to read the file header (input shorter than the magic sequence)".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    }
    trace!("Magic bytes: {:02x?}", magic);

    if &magic != MAGIC {
        return Err(BfbinError::Format(
            "Input does not appear to be a Byfl binary-output file".to_string(),
        ));
    }

    debug!("Magic header validated");
    Ok(())
}
