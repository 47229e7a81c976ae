//! Session driver and error boundary.
//!
//! A session is one complete, single-threaded pass over one input. It
//! owns the reader (file handle, read buffer, scratch buffer) and the
//! caller's handler for its whole lifetime. Every failure anywhere in
//! the decode funnels through [`Session::run`], which reports it to the
//! handler exactly once and then drops everything the session owns.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use log::{debug, info, warn};

use super::format::table::{self, Step};
use super::handler::{CALLBACK_SET_SIZE, TableHandler};
use super::reader::{BinaryReader, DEFAULT_READ_BUFFER_SIZE};
use super::types::error::{BfbinError, Result};

/// How a session that did not fail came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The end-of-stream terminator was reached.
    Completed { tables: u64 },
    /// A handler event returned `ControlFlow::Break`.
    Stopped { tables: u64 },
}

/// Tunables for file-backed sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Capacity of the buffered read window over the input file.
    pub read_buffer_size: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

/// One decode pass over one input.
///
/// Not reentrant: a handler must never start a nested decode of the same
/// session. Distinct sessions share no state and may run on separate threads.
/// Only reachable through the `process_*` entry points, which validate the
/// magic header before a session exists and report every failure.
pub(crate) struct Session<R: Read, H: TableHandler> {
    reader: BinaryReader<R>,
    handler: H,
    tables: u64,
}

impl<R: Read, H: TableHandler> Session<R, H> {
    /// Creates a session over a reader whose magic header has already been validated.
    pub(crate) fn new(reader: BinaryReader<R>, handler: H) -> Self {
        Self {
            reader,
            handler,
            tables: 0,
        }
    }

    /// Decodes tables until the end-of-stream marker or a handler stop.
    fn decode_all(&mut self) -> Result<Outcome> {
        loop {
            match table::decode_next(&mut self.reader, &mut self.handler)? {
                Step::Table => self.tables += 1,
                Step::End => return Ok(Outcome::Completed { tables: self.tables }),
                Step::Stopped => {
                    debug!("Handler requested stop after {} table(s)", self.tables);
                    return Ok(Outcome::Stopped { tables: self.tables });
                }
            }
        }
    }

    /// Runs the session to completion and releases its resources.
    ///
    /// On failure the handler's `on_error` is called once with `context`
    /// prefixed to the diagnostic.
    pub(crate) fn run(mut self, context: &str) -> Result<Outcome> {
        let result = self.decode_all();
        if let Err(e) = &result {
            report(&mut self.handler, context, e);
        }
        result
    }
}

fn report<H: TableHandler>(handler: &mut H, context: &str, err: &BfbinError) {
    let message = format!("{}: {}", context, err);
    warn!("Decoding failed: {}", message);
    handler.on_error(&message);
}

/// Decodes a Byfl binary-output file, driving `handler` with its contents.
///
/// Equivalent to [`process_file_checked`] with this library's own
/// [`CALLBACK_SET_SIZE`].
pub fn process_file<H: TableHandler>(path: impl AsRef<Path>, handler: H) -> Result<Outcome> {
    process_file_checked(path, handler, CALLBACK_SET_SIZE)
}

/// Decodes a file after checking the caller's declared callback-set size.
///
/// A mismatch is reported through `on_error` and returned as
/// `AbiMismatch` before the file is touched.
pub fn process_file_checked<H: TableHandler>(
    path: impl AsRef<Path>,
    handler: H,
    declared_size: usize,
) -> Result<Outcome> {
    process_file_with(path, handler, declared_size, SessionOptions::default())
}

/// Fully parameterized file entry point.
pub fn process_file_with<H: TableHandler>(
    path: impl AsRef<Path>,
    mut handler: H,
    declared_size: usize,
    options: SessionOptions,
) -> Result<Outcome> {
    let path = path.as_ref();
    let context = path.display().to_string();

    if declared_size != CALLBACK_SET_SIZE {
        let err = BfbinError::AbiMismatch {
            expected: CALLBACK_SET_SIZE,
            found: declared_size,
        };
        report(&mut handler, &context, &err);
        return Err(err);
    }

    let reader: BinaryReader<BufReader<File>> =
        match BinaryReader::open(path, options.read_buffer_size) {
            Ok(reader) => reader,
            Err(e) => {
                report(&mut handler, &context, &e);
                return Err(e);
            }
        };

    let outcome = Session::new(reader, handler).run(&context)?;
    info!("Finished decoding {}: {:?}", context, outcome);
    Ok(outcome)
}

/// Decodes a Byfl binary-output stream from any byte source.
///
/// `source` must be positioned at the magic header. Same error contract
/// as [`process_file`]; diagnostics are prefixed with `<input>`.
pub fn process_reader<R: Read, H: TableHandler>(source: R, mut handler: H) -> Result<Outcome> {
    const CONTEXT: &str = "<input>";
    let mut reader = BinaryReader::new(source);
    if let Err(e) = reader.check_magic() {
        report(&mut handler, CONTEXT, &e);
        return Err(e);
    }
    Session::new(reader, handler).run(CONTEXT)
}
