//! The callback set driven by the decoder.
//!
//! A [`TableHandler`] receives one event per structural element of the
//! file, in stream order. Every method has a no-op default, so an
//! implementation only overrides the events it cares about; anything left
//! out is silently skipped. The handler value itself carries whatever
//! user context the caller needs.
//!
//! # Event order
//! ```text
//! Basic table:     table_begin columns_begin column* columns_end (row_begin data* row_end)* table_end
//! Key-value table: table_begin (column data)* table_end
//! ```
//!
//! String arguments borrow the session's scratch buffer and must be copied
//! if they are needed after the callback returns. Names and string values
//! are decoded lossily: any byte sequence that is not valid UTF-8 arrives
//! as U+FFFD (`\u{fffd}`), and the original bytes are not recoverable.
//!
//! Returning [`ControlFlow::Break`] from any event stops decoding early.
//! This is not an error: `on_error` is not invoked and the session
//! reports [`Outcome::Stopped`](crate::Outcome::Stopped).

use std::ops::ControlFlow;

use super::types::models::{ColumnType, TableKind, Value};

/// Result of a handler event: continue decoding, or stop gracefully.
pub type Flow = ControlFlow<()>;

/// Number of callbacks in [`TableHandler`].
///
/// Callers that want to guard against being built against a different
/// callback set pass this to
/// [`process_file_checked`](crate::process_file_checked).
pub const CALLBACK_SET_SIZE: usize = 13;

#[allow(unused_variables)]
pub trait TableHandler {
    /// A table named `name` of the given kind begins.
    fn on_table_begin(&mut self, kind: TableKind, name: &str) -> Flow {
        Flow::Continue(())
    }

    fn on_table_end(&mut self) -> Flow {
        Flow::Continue(())
    }

    /// The column header of a basic table begins.
    fn on_columns_begin(&mut self) -> Flow {
        Flow::Continue(())
    }

    fn on_column_uint64(&mut self, name: &str) -> Flow {
        Flow::Continue(())
    }

    fn on_column_string(&mut self, name: &str) -> Flow {
        Flow::Continue(())
    }

    fn on_column_bool(&mut self, name: &str) -> Flow {
        Flow::Continue(())
    }

    /// The column header of a basic table is complete; rows follow.
    fn on_columns_end(&mut self) -> Flow {
        Flow::Continue(())
    }

    fn on_row_begin(&mut self) -> Flow {
        Flow::Continue(())
    }

    fn on_row_end(&mut self) -> Flow {
        Flow::Continue(())
    }

    fn on_data_uint64(&mut self, value: u64) -> Flow {
        Flow::Continue(())
    }

    /// A string value; invalid UTF-8 has been replaced with U+FFFD.
    fn on_data_string(&mut self, value: &str) -> Flow {
        Flow::Continue(())
    }

    fn on_data_bool(&mut self, value: bool) -> Flow {
        Flow::Continue(())
    }

    /// Decoding failed. Called at most once per session, with a
    /// human-readable diagnostic. No further events follow.
    fn on_error(&mut self, message: &str) {}

    /// Dispatches a column declaration (or key-value key) to the typed callback.
    fn on_column(&mut self, ty: ColumnType, name: &str) -> Flow {
        match ty {
            ColumnType::UInt64 => self.on_column_uint64(name),
            ColumnType::String => self.on_column_string(name),
            ColumnType::Bool => self.on_column_bool(name),
        }
    }

    /// Dispatches a decoded value to the typed callback.
    fn on_data(&mut self, value: Value<'_>) -> Flow {
        match value {
            Value::UInt64(v) => self.on_data_uint64(v),
            Value::String(s) => self.on_data_string(s),
            Value::Bool(b) => self.on_data_bool(b),
        }
    }
}

impl<H: TableHandler + ?Sized> TableHandler for &mut H {
    fn on_table_begin(&mut self, kind: TableKind, name: &str) -> Flow {
        (**self).on_table_begin(kind, name)
    }

    fn on_table_end(&mut self) -> Flow {
        (**self).on_table_end()
    }

    fn on_columns_begin(&mut self) -> Flow {
        (**self).on_columns_begin()
    }

    fn on_column_uint64(&mut self, name: &str) -> Flow {
        (**self).on_column_uint64(name)
    }

    fn on_column_string(&mut self, name: &str) -> Flow {
        (**self).on_column_string(name)
    }

    fn on_column_bool(&mut self, name: &str) -> Flow {
        (**self).on_column_bool(name)
    }

    fn on_columns_end(&mut self) -> Flow {
        (**self).on_columns_end()
    }

    fn on_row_begin(&mut self) -> Flow {
        (**self).on_row_begin()
    }

    fn on_row_end(&mut self) -> Flow {
        (**self).on_row_end()
    }

    fn on_data_uint64(&mut self, value: u64) -> Flow {
        (**self).on_data_uint64(value)
    }

    fn on_data_string(&mut self, value: &str) -> Flow {
        (**self).on_data_string(value)
    }

    fn on_data_bool(&mut self, value: bool) -> Flow {
        (**self).on_data_bool(value)
    }

    fn on_error(&mut self, message: &str) {
        (**self).on_error(message)
    }

    fn on_column(&mut self, ty: ColumnType, name: &str) -> Flow {
        (**self).on_column(ty, name)
    }

    fn on_data(&mut self, value: Value<'_>) -> Flow {
        (**self).on_data(value)
    }
}
