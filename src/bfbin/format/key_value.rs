//! Key-value table decoding.
//!
//! ```text
//! Body(KeyValue) := KVEntry* KVEnd
//! KVEntry        := ColumnType KeyName Value    (ColumnType != None)
//! KVEnd          := ColumnType(None)
//! ```
//!
//! There are no rows and no header/body split. The terminator is checked
//! before a name is read, so it never consumes one.

use std::io::Read;
use log::{debug, trace};

use super::decode_value;
use crate::bfbin::handler::{Flow, TableHandler};
use crate::bfbin::reader::BinaryReader;
use crate::bfbin::types::error::Result;
use crate::bfbin::types::models::ColumnType;

/// Decodes entries until the terminator, firing a column event then a data event for each.
pub fn decode<R: Read, H: TableHandler>(
    reader: &mut BinaryReader<R>,
    handler: &mut H,
) -> Result<Flow> {
    let mut entries = 0u64;
    while let Some(ty) = ColumnType::from_tag(reader.read_tag()?)? {
        let key = reader.read_string()?;
        trace!("Entry {}: {} '{}'", entries, ty, key);
        emit!(handler.on_column(ty, &key));
        emit!(decode_value(reader, handler, ty)?);
        entries += 1;
    }
    debug!("Key-value table complete: {} entr{}", entries, if entries == 1 { "y" } else { "ies" });
    Ok(Flow::Continue(()))
}
