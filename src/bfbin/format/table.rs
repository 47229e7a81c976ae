//! Top-level table loop.

use std::io::Read;
use log::debug;

use super::{basic, key_value};
use crate::bfbin::handler::TableHandler;
use crate::bfbin::reader::BinaryReader;
use crate::bfbin::types::error::Result;
use crate::bfbin::types::models::TableKind;

/// What happened after one call to [`decode_next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A complete table was decoded; more may follow.
    Table,
    /// The end-of-stream terminator was read.
    End,
    /// The handler asked to stop.
    Stopped,
}

/// Decodes one table: kind tag, name, body.
///
/// ```text
/// Table := TableKind TableName Body    (TableKind != None)
/// ```
///
/// A `None` kind ends the file and is reported as [`Step::End`] without
/// reading a name. Unknown kinds are an `Internal` error.
pub fn decode_next<R: Read, H: TableHandler>(
    reader: &mut BinaryReader<R>,
    handler: &mut H,
) -> Result<Step> {
    let Some(kind) = TableKind::from_tag(reader.read_tag()?)? else {
        debug!("End-of-stream marker at position {}", reader.position());
        return Ok(Step::End);
    };

    let name = reader.read_string()?;
    debug!("Decoding {} table '{}'", kind, name);
    if handler.on_table_begin(kind, &name).is_break() {
        return Ok(Step::Stopped);
    }

    let flow = match kind {
        TableKind::Basic => basic::decode(reader, handler)?,
        TableKind::KeyValue => key_value::decode(reader, handler)?,
    };
    if flow.is_break() || handler.on_table_end().is_break() {
        return Ok(Step::Stopped);
    }
    Ok(Step::Table)
}
