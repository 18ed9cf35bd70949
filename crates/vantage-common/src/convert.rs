//! Scalar conversion between typed values and Host Command wire tokens.
//!
//! Every supported scalar type has a serialize/deserialize pair. Fixed-point
//! decimals carry exactly three decimal places on the wire and come in two
//! forms: `"123.456"` in command replies and `"123456"` in status events.
//! Both deserialize to the same decimal. Byte arrays are brace-delimited
//! sequences of signed 32-bit little-endian integers.

use crate::error::{ClientError, ClientResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A typed command parameter, encodable to a wire token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// A string, quoted on the wire when it contains whitespace or quotes.
    String(String),
    /// A bool, encoded as `0`/`1`.
    Bool(bool),
    /// A base-10 integer.
    Int(i64),
    /// A fixed-point decimal, encoded with three decimal places.
    Fixed(Decimal),
    /// A byte array, encoded as `{i1,i2,…}` signed 32-bit integers.
    Bytes(Vec<u8>),
    /// A UTC datetime, encoded as Unix seconds.
    DateTime(DateTime<Utc>),
}

impl Param {
    /// Encode the parameter to its wire form.
    pub fn encode(&self) -> String {
        match self {
            Self::String(s) => encode_string(s, false),
            Self::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Fixed(d) => encode_fixed(*d, 3),
            Self::Bytes(b) => encode_bytes(b),
            Self::DateTime(t) => t.timestamp().to_string(),
        }
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Param {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u16> for Param {
    fn from(value: u16) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<Decimal> for Param {
    fn from(value: Decimal) -> Self {
        Self::Fixed(value)
    }
}

impl From<Vec<u8>> for Param {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<DateTime<Utc>> for Param {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

/// Encode a parameter list as a space-joined request fragment.
pub fn encode_params(params: &[Param]) -> String {
    params
        .iter()
        .map(Param::encode)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Encode a string parameter, quoting when it contains whitespace or quotes,
/// or when `force_quotes` is set. Internal quotes are doubled.
pub fn encode_string(value: &str, force_quotes: bool) -> String {
    if force_quotes || value.is_empty() || value.contains(['"', ' ', '\t']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Decode a string token. Tokens produced by the tokenizer are already
/// unquoted; this also accepts a raw quoted form.
pub fn parse_string(token: &str) -> String {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        token[1..token.len() - 1].replace("\"\"", "\"")
    } else {
        token.to_string()
    }
}

/// Decode a bool token. Any integer is accepted; non-zero means true.
pub fn parse_bool(token: &str) -> ClientResult<bool> {
    let value: i64 = token
        .parse()
        .map_err(|_| ClientError::Decode(format!("invalid bool token: {token:?}")))?;
    Ok(value != 0)
}

/// Decode a base-10 integer token.
pub fn parse_int(token: &str) -> ClientResult<i64> {
    token
        .parse()
        .map_err(|_| ClientError::Decode(format!("invalid integer token: {token:?}")))
}

/// Decode a VID token.
pub fn parse_vid(token: &str) -> ClientResult<crate::Vid> {
    token
        .parse()
        .map_err(|_| ClientError::Decode(format!("invalid VID token: {token:?}")))
}

/// Decode a fixed-point token.
///
/// Handles both wire forms by stripping the decimal separator and dividing
/// by 1000: `"123.456"` (command replies) and `"123456"` (status events)
/// both decode to `123.456`.
pub fn parse_fixed(token: &str) -> ClientResult<Decimal> {
    let digits = token.replace('.', "");
    let value: i64 = digits
        .parse()
        .map_err(|_| ClientError::Decode(format!("invalid fixed-point token: {token:?}")))?;
    Ok(Decimal::new(value, 3))
}

/// Decode a plain decimal token, as used by category status arguments
/// (`S:LOAD <vid> <level>` carries the dotted form directly).
pub fn parse_decimal(token: &str) -> ClientResult<Decimal> {
    token
        .parse()
        .map_err(|_| ClientError::Decode(format!("invalid decimal token: {token:?}")))
}

/// Encode a fixed-point value with the given number of decimal places.
pub fn encode_fixed(value: Decimal, precision: u32) -> String {
    format!("{:.*}", precision as usize, value)
}

/// Decode a byte-array token: a brace- or bracket-delimited sequence of
/// signed 32-bit integers separated by commas or spaces. Each integer
/// contributes four little-endian bytes.
pub fn parse_bytes(token: &str) -> ClientResult<Vec<u8>> {
    let inner = token
        .trim_start_matches(['{', '['])
        .trim_end_matches(['}', ']']);

    let mut bytes = Vec::new();
    for part in inner.split(|c: char| c == ',' || c.is_whitespace()) {
        if part.is_empty() {
            continue;
        }
        let value: i32 = part
            .parse()
            .map_err(|_| ClientError::Decode(format!("invalid byte-array token: {token:?}")))?;
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    Ok(bytes)
}

/// Encode a byte array, padding with zeros to a multiple of four bytes.
pub fn encode_bytes(data: &[u8]) -> String {
    let mut padded = data.to_vec();
    padded.resize(data.len().div_ceil(4) * 4, 0);

    let tokens: Vec<String> = padded
        .chunks_exact(4)
        .map(|chunk| i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]).to_string())
        .collect();

    format!("{{{}}}", tokens.join(","))
}

/// Decode a datetime token: Unix seconds, UTC.
pub fn parse_datetime(token: &str) -> ClientResult<DateTime<Utc>> {
    let secs = parse_int(token)?;
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| ClientError::Decode(format!("datetime out of range: {token:?}")))
}
