//! Shared helpers for building Byfl binary-output streams and recording decode events.
#![allow(dead_code)]

use std::ops::ControlFlow;
use std::path::PathBuf;

use bfbin::{ColumnType, Flow, OwnedValue, TableHandler, TableKind};

/// Builds a byte stream in the Byfl binary-output format.
#[derive(Default)]
pub struct Builder {
    bytes: Vec<u8>,
}

impl Builder {
    /// Starts a stream with the magic header.
    pub fn new() -> Self {
        let mut b = Self::default();
        b.bytes.extend_from_slice(b"BYFLBIN");
        b
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn tag(self, tag: u8) -> Self {
        self.raw(&[tag])
    }

    pub fn string(mut self, s: &str) -> Self {
        let len = u16::try_from(s.len()).expect("string fits a u16 prefix");
        self.bytes.extend_from_slice(&len.to_be_bytes());
        self.bytes.extend_from_slice(s.as_bytes());
        self
    }

    pub fn u64(self, v: u64) -> Self {
        self.raw(&v.to_be_bytes())
    }

    pub fn bool(self, b: bool) -> Self {
        self.tag(b as u8)
    }

    pub fn table(self, kind: TableKind, name: &str) -> Self {
        self.tag(kind as u8).string(name)
    }

    pub fn column(self, ty: ColumnType, name: &str) -> Self {
        self.tag(ty as u8).string(name)
    }

    /// Terminates a column header, a key-value table, a row phase or the file.
    pub fn none(self) -> Self {
        self.tag(0)
    }

    pub fn row(self) -> Self {
        self.tag(1)
    }

    pub fn value(self, v: &OwnedValue) -> Self {
        match v {
            OwnedValue::UInt64(n) => self.u64(*n),
            OwnedValue::String(s) => self.string(s),
            OwnedValue::Bool(b) => self.bool(*b),
        }
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// One handler event, with owned copies of its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    TableBegin(TableKind, String),
    TableEnd,
    ColumnsBegin,
    Column(ColumnType, String),
    ColumnsEnd,
    RowBegin,
    RowEnd,
    Data(OwnedValue),
    Error(String),
}

/// Records every event; optionally stops after a given number of events.
#[derive(Default)]
pub struct Recorder {
    pub events: Vec<Event>,
    pub stop_after: Option<usize>,
}

impl Recorder {
    pub fn stopping_after(n: usize) -> Self {
        Self { events: Vec::new(), stop_after: Some(n) }
    }

    fn push(&mut self, e: Event) -> Flow {
        self.events.push(e);
        match self.stop_after {
            Some(n) if self.events.len() >= n => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }

    pub fn errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Error(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &Event) -> usize {
        self.events.iter().filter(|e| *e == wanted).count()
    }
}

impl TableHandler for Recorder {
    fn on_table_begin(&mut self, kind: TableKind, name: &str) -> Flow {
        self.push(Event::TableBegin(kind, name.to_owned()))
    }

    fn on_table_end(&mut self) -> Flow {
        self.push(Event::TableEnd)
    }

    fn on_columns_begin(&mut self) -> Flow {
        self.push(Event::ColumnsBegin)
    }

    fn on_column_uint64(&mut self, name: &str) -> Flow {
        self.push(Event::Column(ColumnType::UInt64, name.to_owned()))
    }

    fn on_column_string(&mut self, name: &str) -> Flow {
        self.push(Event::Column(ColumnType::String, name.to_owned()))
    }

    fn on_column_bool(&mut self, name: &str) -> Flow {
        self.push(Event::Column(ColumnType::Bool, name.to_owned()))
    }

    fn on_columns_end(&mut self) -> Flow {
        self.push(Event::ColumnsEnd)
    }

    fn on_row_begin(&mut self) -> Flow {
        self.push(Event::RowBegin)
    }

    fn on_row_end(&mut self) -> Flow {
        self.push(Event::RowEnd)
    }

    fn on_data_uint64(&mut self, value: u64) -> Flow {
        self.push(Event::Data(OwnedValue::UInt64(value)))
    }

    fn on_data_string(&mut self, value: &str) -> Flow {
        self.push(Event::Data(OwnedValue::String(value.to_owned())))
    }

    fn on_data_bool(&mut self, value: bool) -> Flow {
        self.push(Event::Data(OwnedValue::Bool(value)))
    }

    fn on_error(&mut self, message: &str) {
        self.events.push(Event::Error(message.to_owned()));
    }
}

/// Writes `bytes` to a fresh file inside `dir` and returns its path.
pub fn write_fixture(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap_or_else(|e| panic!("failed to write {}: {}", path.display(), e));
    path
}

/// The single-table, single-row file used throughout the tests.
pub fn scenario_bytes() -> Vec<u8> {
    Builder::new()
        .table(TableKind::Basic, "T")
        .column(ColumnType::UInt64, "x")
        .none()
        .row()
        .u64(42)
        .none()
        .none()
        .build()
}

/// A file exercising both table kinds and every value type.
pub fn mixed_bytes() -> Vec<u8> {
    Builder::new()
        .table(TableKind::KeyValue, "Program")
        .column(ColumnType::String, "Name")
        .string("a.out")
        .column(ColumnType::UInt64, "Loads")
        .u64(1 << 40)
        .column(ColumnType::Bool, "Tallied")
        .bool(true)
        .none()
        .table(TableKind::Basic, "Functions")
        .column(ColumnType::String, "Function")
        .column(ColumnType::UInt64, "Ops")
        .column(ColumnType::Bool, "Leaf")
        .none()
        .row()
        .string("main")
        .u64(7)
        .bool(false)
        .row()
        .string("helper")
        .u64(u64::MAX)
        .bool(true)
        .none()
        .none()
        .build()
}
