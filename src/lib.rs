//! # bfbin
//!
//! A streaming decoder for Byfl binary-output files.
//!
//! The format is self-describing and tabular: a file is a sequence of
//! named tables, each either a *basic* table (typed column header plus
//! rows) or a *key-value* table (flat typed name/value pairs). Decoding
//! never materializes the file; instead a caller-supplied
//! [`TableHandler`] receives one event per structural element.
//!
//! ```no_run
//! use std::ops::ControlFlow;
//! use bfbin::{TableHandler, TableKind, Flow};
//!
//! struct Names(Vec<String>);
//!
//! impl TableHandler for Names {
//!     fn on_table_begin(&mut self, _kind: TableKind, name: &str) -> Flow {
//!         self.0.push(name.to_owned());
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let mut names = Names(Vec::new());
//! bfbin::process_file("program.byfl", &mut names).unwrap();
//! println!("{:?}", names.0);
//! ```
//!
//! The `process_*` functions are the only way to decode. They validate the
//! magic header first and report every failure through
//! [`TableHandler::on_error`]. The decoding session and the grammar layer
//! are not part of the public API:
//!
//! ```compile_fail
//! use bfbin::Session;
//! ```
//!
//! ```compile_fail
//! use bfbin::bfbin::format::table::decode_next;
//! ```
//!
//! ```compile_fail
//! let reader = bfbin::bfbin::reader::BinaryReader::new(&b""[..]);
//! ```
pub mod bfbin;

// Re-export the main types for convenience
pub use bfbin::{
    BfbinError, CALLBACK_SET_SIZE, Column, ColumnType, DEFAULT_READ_BUFFER_SIZE, Flow, Outcome,
    OwnedValue, Result, RowMarker, SessionOptions, TableHandler, TableKind, Value, process_file,
    process_file_checked, process_file_with, process_reader,
};
