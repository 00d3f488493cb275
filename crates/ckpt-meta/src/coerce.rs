//! String coercion for header values
//!
//! Strings pass through untouched. Everything else is written as JSON text
//! with `", "` and `": "` separators on a single line, the form Python's
//! `json.dumps` produces and the form existing checkpoint headers carry.
//! Non-ASCII characters stay unescaped, object keys keep their original
//! order and numbers keep their source digits, so coercing the parse of a
//! coerced value gives the same text back.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::{Map, Value};

use crate::builder::HeaderMap;

/// Single-line JSON with a space after every `,` and `:`.
#[derive(Debug, Clone, Copy, Default)]
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Render `value` as header JSON text, strings included (quoted).
pub fn to_header_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, SpacedFormatter);
    // Serializing a `Value` into memory only fails on allocation
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}

/// Coerce a single JSON value to its header string.
pub fn coerce_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => to_header_json(other),
    }
}

/// Coerce every value of a JSON object.
pub fn coerce_object(object: &Map<String, Value>) -> HeaderMap {
    object
        .iter()
        .map(|(key, value)| (key.clone(), coerce_value(value)))
        .collect()
}
