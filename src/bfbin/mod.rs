//! Core Byfl binary-output decoding module

mod format;
pub mod handler;
mod reader;
mod session;
pub mod types;
mod utils;

pub use handler::{CALLBACK_SET_SIZE, Flow, TableHandler};
pub use reader::DEFAULT_READ_BUFFER_SIZE;
pub use session::{
    Outcome, SessionOptions, process_file, process_file_checked, process_file_with,
    process_reader,
};
pub use types::error::{BfbinError, Result};
pub use types::models::{Column, ColumnType, OwnedValue, RowMarker, TableKind, Value};
