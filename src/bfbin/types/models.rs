//! Core data structures for the Byfl binary-output format.
//!
//! This module defines the tag families that structure a file and the
//! typed values delivered to handlers:
//! - Table kinds, column types and row markers (one byte each on the wire)
//! - Borrowed and owned scalar values
//! - Column declarations frozen by a basic table's header

use std::fmt;
use super::error::{BfbinError, Result};

/// Magic sequence that opens every Byfl binary-output file.
pub const MAGIC: &[u8; 7] = b"BYFLBIN";

/// Wire value shared by every tag family to mark the end of a sequence.
pub const TAG_NONE: u8 = 0;

/// Width in bytes of every tag (table kind, column type, row marker).
pub const TAG_WIDTH: usize = 1;

/// Width in bytes of a string length prefix.
pub const LENGTH_WIDTH: usize = 2;

/// The two table grammars a file may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Typed column header followed by homogeneous rows.
    Basic = 1,
    /// Flat sequence of independently typed name/value pairs.
    KeyValue = 2,
}

impl TableKind {
    /// Decodes a raw table tag. `Ok(None)` is the end-of-file terminator.
    pub fn from_tag(tag: u8) -> Result<Option<Self>> {
        match tag {
            TAG_NONE => Ok(None),
            1 => Ok(Some(Self::Basic)),
            2 => Ok(Some(Self::KeyValue)),
            _ => Err(BfbinError::Internal(format!("Unknown table kind tag: {}", tag))),
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TableKind::Basic => write!(f, "basic"),
            TableKind::KeyValue => write!(f, "key:value"),
        }
    }
}

/// Type of a column in a basic table, or of an entry in a key-value table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    UInt64 = 1,
    String = 2,
    Bool = 3,
}

impl ColumnType {
    /// Decodes a raw column tag. `Ok(None)` terminates a header or a key-value table.
    pub fn from_tag(tag: u8) -> Result<Option<Self>> {
        match tag {
            TAG_NONE => Ok(None),
            1 => Ok(Some(Self::UInt64)),
            2 => Ok(Some(Self::String)),
            3 => Ok(Some(Self::Bool)),
            _ => Err(BfbinError::Internal(format!("Unknown column type tag: {}", tag))),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ColumnType::UInt64 => write!(f, "uint64"),
            ColumnType::String => write!(f, "string"),
            ColumnType::Bool => write!(f, "bool"),
        }
    }
}

/// Marker preceding each row of a basic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMarker {
    Data = 1,
}

impl RowMarker {
    /// Decodes a raw row tag. `Ok(None)` ends the row phase.
    pub fn from_tag(tag: u8) -> Result<Option<Self>> {
        match tag {
            TAG_NONE => Ok(None),
            1 => Ok(Some(Self::Data)),
            _ => Err(BfbinError::Internal(format!("Unknown row marker tag: {}", tag))),
        }
    }
}

/// A single decoded scalar.
///
/// String values borrow the session's scratch buffer and are only valid
/// for the duration of the callback that receives them. Use
/// [`Value::to_owned_value`] to retain one. String bytes that are not valid
/// UTF-8 are replaced with U+FFFD during decoding, so a `String` value is
/// not guaranteed to round-trip to the bytes on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    UInt64(u64),
    String(&'a str),
    Bool(bool),
}

impl Value<'_> {
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::UInt64(_) => ColumnType::UInt64,
            Value::String(_) => ColumnType::String,
            Value::Bool(_) => ColumnType::Bool,
        }
    }

    pub fn to_owned_value(&self) -> OwnedValue {
        match *self {
            Value::UInt64(v) => OwnedValue::UInt64(v),
            Value::String(s) => OwnedValue::String(s.to_owned()),
            Value::Bool(b) => OwnedValue::Bool(b),
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::UInt64(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// An owned copy of a [`Value`], safe to keep after a callback returns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OwnedValue {
    UInt64(u64),
    String(String),
    Bool(bool),
}

impl OwnedValue {
    pub fn as_value(&self) -> Value<'_> {
        match self {
            OwnedValue::UInt64(v) => Value::UInt64(*v),
            OwnedValue::String(s) => Value::String(s),
            OwnedValue::Bool(b) => Value::Bool(*b),
        }
    }
}

/// A column declared in a basic table's header.
///
/// Once the header terminator is read, the list of columns is frozen and
/// every row supplies exactly one value per column, in this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub ty: ColumnType,
    pub name: String,
}
