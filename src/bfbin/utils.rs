//! Low-level byte reading utilities

use std::io::Read;
use byteorder::{BigEndian, ReadBytesExt};
use crate::bfbin::types::error::{BfbinError, Result};

/// Read a 1, 2, 4 or 8 byte unsigned big-endian number.
///
/// Every tag, length prefix and integer value in the format goes through
/// this function. The width is dictated by the grammar position being
/// decoded, never by the data itself.
pub fn read_big_endian(reader: &mut impl Read, width: usize) -> Result<u64> {
    match width {
        8 => Ok(reader.read_u64::<BigEndian>()?),
        4 => Ok(reader.read_u32::<BigEndian>()? as u64),
        2 => Ok(reader.read_u16::<BigEndian>()? as u64),
        1 => Ok(reader.read_u8()? as u64),
        _ => Err(BfbinError::Internal(format!("Invalid number width: {}", width))),
    }
}
