//! Grammar layer for Byfl binary-output files.
//!
//! This module sits between the byte-level [`BinaryReader`](crate::bfbin::reader::BinaryReader)
//! and the session driver. Each submodule decodes one production of the
//! grammar and turns it into handler events.
//!
//! # Module Organization
//!
//! - [`header`]: Validates the magic sequence
//! - [`table`]: Reads one table's kind and name, dispatches on kind
//! - [`basic`]: Column header phase, then row phase
//! - [`key_value`]: Flat sequence of typed name/value pairs
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │  "BYFLBIN"      │ ← header::parse()
//! ├─────────────────┤
//! │  Table          │ ← table::decode_next()
//! │   kind + name   │     ├─ basic::decode()
//! │   body          │     └─ key_value::decode()
//! ├─────────────────┤
//! │  ...            │
//! ├─────────────────┤
//! │  kind = None    │ ← end of stream
//! └─────────────────┘
//! ```

use std::io::Read;

use crate::bfbin::handler::{Flow, TableHandler};
use crate::bfbin::reader::BinaryReader;
use crate::bfbin::types::error::Result;
use crate::bfbin::types::models::{ColumnType, Value};

/// Forwards a handler event, returning `Ok(Flow::Break(()))` from the
/// enclosing decoder if the handler asked to stop.
macro_rules! emit {
    ($event:expr) => {
        if let ::std::ops::ControlFlow::Break(()) = $event {
            return Ok(::std::ops::ControlFlow::Break(()));
        }
    };
}

pub mod basic;
pub mod header;
pub mod key_value;
pub mod table;

/// Reads one value of type `ty` and delivers it to the matching data callback.
pub(crate) fn decode_value<R: Read, H: TableHandler>(
    reader: &mut BinaryReader<R>,
    handler: &mut H,
    ty: ColumnType,
) -> Result<Flow> {
    let flow = match ty {
        ColumnType::UInt64 => {
            let v = reader.read_u64()?;
            handler.on_data(Value::UInt64(v))
        }
        ColumnType::String => {
            let s = reader.read_string()?;
            handler.on_data(Value::String(&s))
        }
        ColumnType::Bool => {
            let b = reader.read_bool()?;
            handler.on_data(Value::Bool(b))
        }
    };
    Ok(flow)
}
