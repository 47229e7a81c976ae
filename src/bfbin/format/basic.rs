//! Basic table decoding: a typed column header followed by rows.
//!
//! ```text
//! Body(Basic)  := ColumnHeader* HeaderEnd Row* RowsEnd
//! ColumnHeader := ColumnType ColumnName    (ColumnType != None)
//! Row          := RowMarker(Data) Value{numColumns, in column order}
//! ```
//!
//! The column list is frozen once the header terminator is read. Every
//! row then carries exactly one value per column, of the declared type,
//! in declared order. Values are not self-describing, so the frozen list
//! is the only way to know how many bytes each row occupies.

use std::io::Read;
use log::{debug, trace};

use super::decode_value;
use crate::bfbin::handler::{Flow, TableHandler};
use crate::bfbin::reader::BinaryReader;
use crate::bfbin::types::error::Result;
use crate::bfbin::types::models::{Column, ColumnType, RowMarker};

/// Decodes the body of a basic table: header phase, then row phase.
pub fn decode<R: Read, H: TableHandler>(
    reader: &mut BinaryReader<R>,
    handler: &mut H,
) -> Result<Flow> {
    let mut columns = Vec::new();
    emit!(decode_header(reader, handler, &mut columns)?);
    debug!("Column header complete: {} column(s)", columns.len());
    decode_rows(reader, handler, &columns)
}

/// Reads column declarations until the header terminator, appending them to `columns`.
fn decode_header<R: Read, H: TableHandler>(
    reader: &mut BinaryReader<R>,
    handler: &mut H,
    columns: &mut Vec<Column>,
) -> Result<Flow> {
    emit!(handler.on_columns_begin());
    while let Some(ty) = ColumnType::from_tag(reader.read_tag()?)? {
        let name = reader.read_string()?;
        trace!("Column {}: {} '{}'", columns.len(), ty, name);
        emit!(handler.on_column(ty, &name));
        columns.push(Column { ty, name: name.into_owned() });
    }
    emit!(handler.on_columns_end());
    Ok(Flow::Continue(()))
}

/// Reads rows until the row terminator, one value per frozen column.
fn decode_rows<R: Read, H: TableHandler>(
    reader: &mut BinaryReader<R>,
    handler: &mut H,
    columns: &[Column],
) -> Result<Flow> {
    let mut rows = 0u64;
    while let Some(RowMarker::Data) = RowMarker::from_tag(reader.read_tag()?)? {
        emit!(handler.on_row_begin());
        for column in columns {
            emit!(decode_value(reader, handler, column.ty)?);
        }
        emit!(handler.on_row_end());
        rows += 1;
        trace!("Row {} complete at position {}", rows, reader.position());
    }
    debug!("Row phase complete: {} row(s)", rows);
    Ok(Flow::Continue(()))
}
