//! Parsing entry points. One family per input unit width, each with a
//! strict form (the whole input must be one value plus whitespace) and a
//! partial form (stops right after the value and reports how many units
//! were consumed).

pub(crate) mod cursor;
pub(crate) mod number;
pub(crate) mod parser;

pub use cursor::{Cursor, IterCursor, SliceCursor};
pub use number::{lex_number, NumberParts};

use crate::codec::CodeUnit;
use crate::error::Result;
use crate::options::ParseOptions;
use crate::value::Value;

fn parse_units<U: CodeUnit>(units: &[U], options: &ParseOptions) -> Result<Value> {
    let mut cursor = SliceCursor::new(units);
    parser::parse_document(&mut cursor, options)
}

fn parse_units_partial<U: CodeUnit>(
    units: &[U],
    options: &ParseOptions,
) -> Result<(Value, usize)> {
    let mut cursor = SliceCursor::new(units);
    let value = parser::parse_prefix(&mut cursor, options)?;
    Ok((value, cursor.offset()))
}

pub fn from_str(input: &str) -> Result<Value> {
    from_str_with_options(input, &ParseOptions::default())
}

pub fn from_str_with_options(input: &str, options: &ParseOptions) -> Result<Value> {
    parse_units(input.as_bytes(), options)
}

/// Parses one value from the front of `input`, returning it along with
/// the number of bytes consumed.
pub fn from_str_partial(input: &str) -> Result<(Value, usize)> {
    from_str_partial_with_options(input, &ParseOptions::default())
}

pub fn from_str_partial_with_options(
    input: &str,
    options: &ParseOptions,
) -> Result<(Value, usize)> {
    parse_units_partial(input.as_bytes(), options)
}

/// Parses UTF-8 code units.
pub fn from_slice(input: &[u8]) -> Result<Value> {
    from_slice_with_options(input, &ParseOptions::default())
}

pub fn from_slice_with_options(input: &[u8], options: &ParseOptions) -> Result<Value> {
    parse_units(input, options)
}

pub fn from_slice_partial(input: &[u8]) -> Result<(Value, usize)> {
    parse_units_partial(input, &ParseOptions::default())
}

pub fn from_slice_partial_with_options(
    input: &[u8],
    options: &ParseOptions,
) -> Result<(Value, usize)> {
    parse_units_partial(input, options)
}

/// Parses UTF-16 code units, surrogate pairs included.
pub fn from_utf16(input: &[u16]) -> Result<Value> {
    from_utf16_with_options(input, &ParseOptions::default())
}

pub fn from_utf16_with_options(input: &[u16], options: &ParseOptions) -> Result<Value> {
    parse_units(input, options)
}

pub fn from_utf16_partial(input: &[u16]) -> Result<(Value, usize)> {
    parse_units_partial(input, &ParseOptions::default())
}

pub fn from_utf16_partial_with_options(
    input: &[u16],
    options: &ParseOptions,
) -> Result<(Value, usize)> {
    parse_units_partial(input, options)
}

/// Parses UTF-32 code units.
pub fn from_utf32(input: &[u32]) -> Result<Value> {
    from_utf32_with_options(input, &ParseOptions::default())
}

pub fn from_utf32_with_options(input: &[u32], options: &ParseOptions) -> Result<Value> {
    parse_units(input, options)
}

pub fn from_utf32_partial(input: &[u32]) -> Result<(Value, usize)> {
    parse_units_partial(input, &ParseOptions::default())
}

pub fn from_utf32_partial_with_options(
    input: &[u32],
    options: &ParseOptions,
) -> Result<(Value, usize)> {
    parse_units_partial(input, options)
}

/// Parses from a unit iterator with no known end: the streaming cursor
/// flavor. The whole stream must still be one value plus whitespace.
pub fn from_units<U, I>(input: I) -> Result<Value>
where
    U: CodeUnit,
    I: IntoIterator<Item = U>,
{
    from_units_with_options(input, &ParseOptions::default())
}

pub fn from_units_with_options<U, I>(input: I, options: &ParseOptions) -> Result<Value>
where
    U: CodeUnit,
    I: IntoIterator<Item = U>,
{
    let mut cursor = IterCursor::new(input.into_iter());
    parser::parse_document(&mut cursor, options)
}
