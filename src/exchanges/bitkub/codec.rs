//! Bitkub response decoding.
//!
//! Most responses share the envelope `{"error": 0, "result": ..., "pagination": ...}`.
//! The shape of `result` depends only on the endpoint, so every endpoint names
//! the [`ResultShape`] it expects and decoding runs in three steps:
//!
//! 1. parse the envelope (failure is a transport-class error),
//! 2. reject nonzero `error` codes through the error catalog without looking
//!    at `result`,
//! 3. check `result` against the expected shape and type it.

use crate::core::errors::ExchangeError;
use crate::exchanges::bitkub::conversions::f64_to_i64;
use crate::exchanges::bitkub::error_codes;
use crate::exchanges::bitkub::types::{BidAsk, DepthLevel, Pagination, Trade};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::warn;

/// Outer wrapper of every enveloped response.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub error: i32,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub pagination: Value,
}

/// The four layouts `result` can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// A bare string or number.
    Scalar,
    /// Named fields: an object, a map of objects, or a list of objects.
    Object,
    /// A list of positional rows.
    TupleList,
    /// A map from label (`bids`, `asks`) to a list of positional rows.
    KeyedTupleLists,
}

/// `result` after it has been checked against a [`ResultShape`].
#[derive(Debug, Clone, PartialEq)]
pub enum ShapedResult {
    Scalar(Value),
    Object(Value),
    TupleList(Vec<TupleRow>),
    KeyedTupleLists(HashMap<String, Vec<TupleRow>>),
}

/// A successfully decoded result plus the paging metadata, if any.
#[derive(Debug, Clone)]
pub struct Decoded<T> {
    pub result: T,
    pub pagination: Option<Pagination>,
}

/// A record whose fields are identified by position.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleRow(Vec<Value>);

impl TupleRow {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn at(&self, position: usize) -> Result<&Value, ExchangeError> {
        self.0.get(position).ok_or_else(|| {
            ExchangeError::InvalidResponseFormat(format!(
                "row has {} fields, position {} is missing",
                self.0.len(),
                position
            ))
        })
    }

    pub fn number(&self, position: usize) -> Result<f64, ExchangeError> {
        let value = self.at(position)?;
        value.as_f64().ok_or_else(|| {
            ExchangeError::InvalidResponseFormat(format!(
                "expected a number at position {}, got {}",
                position, value
            ))
        })
    }

    /// Integral field, truncated toward zero. See [`f64_to_i64`] for the
    /// precision boundary.
    pub fn integer(&self, position: usize) -> Result<i64, ExchangeError> {
        self.number(position).map(f64_to_i64)
    }

    pub fn string(&self, position: usize) -> Result<String, ExchangeError> {
        let value = self.at(position)?;
        value.as_str().map(str::to_string).ok_or_else(|| {
            ExchangeError::InvalidResponseFormat(format!(
                "expected a string at position {}, got {}",
                position, value
            ))
        })
    }
}

/// Conversion from a positional row. Positions past the schema are ignored.
pub trait FromTupleRow: Sized {
    fn from_row(row: &TupleRow) -> Result<Self, ExchangeError>;
}

impl FromTupleRow for Trade {
    fn from_row(row: &TupleRow) -> Result<Self, ExchangeError> {
        Ok(Self {
            timestamp: row.integer(0)?,
            rate: row.number(1)?,
            amount: row.number(2)?,
            side: row.string(3)?,
        })
    }
}

impl FromTupleRow for BidAsk {
    fn from_row(row: &TupleRow) -> Result<Self, ExchangeError> {
        Ok(Self {
            order_id: row.integer(0)?,
            timestamp: row.integer(1)?,
            volume: row.number(2)?,
            rate: row.number(3)?,
            amount: row.number(4)?,
        })
    }
}

impl FromTupleRow for DepthLevel {
    fn from_row(row: &TupleRow) -> Result<Self, ExchangeError> {
        Ok(Self {
            price: row.number(0)?,
            volume: row.number(1)?,
        })
    }
}

/// Steps 1 and 2: parse the envelope and apply the error gate.
pub fn open_envelope(body: &[u8]) -> Result<Envelope, ExchangeError> {
    let envelope: Envelope = serde_json::from_slice(body).map_err(|e| {
        ExchangeError::DeserializationError(format!("Failed to parse Bitkub envelope: {}", e))
    })?;

    if envelope.error != 0 {
        let message = error_codes::message(envelope.error);
        warn!(code = envelope.error, message, "Bitkub returned an error");
        return Err(ExchangeError::ApiError {
            code: envelope.error,
            message: message.to_string(),
        });
    }

    Ok(envelope)
}

/// Absent, `null` and `{}` all mean the response is not paged. Any other
/// block must carry `page` and `last`.
fn decode_pagination(raw: Value) -> Result<Option<Pagination>, ExchangeError> {
    match &raw {
        Value::Null => return Ok(None),
        Value::Object(map) if map.is_empty() => return Ok(None),
        _ => {}
    }
    serde_json::from_value(raw).map(Some).map_err(|e| {
        ExchangeError::InvalidResponseFormat(format!("Invalid pagination: {}", e))
    })
}

fn shape_mismatch(shape: ResultShape, value: &Value) -> ExchangeError {
    ExchangeError::InvalidResponseFormat(format!("expected {:?} result, got {}", shape, value))
}

fn to_rows(shape: ResultShape, value: Value) -> Result<Vec<TupleRow>, ExchangeError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Array(values) => Ok(TupleRow::new(values)),
                other => Err(shape_mismatch(shape, &other)),
            })
            .collect(),
        other => Err(shape_mismatch(shape, &other)),
    }
}

fn to_keyed_rows(
    shape: ResultShape,
    map: Map<String, Value>,
) -> Result<HashMap<String, Vec<TupleRow>>, ExchangeError> {
    map.into_iter()
        .map(|(label, rows)| Ok((label, to_rows(shape, rows)?)))
        .collect()
}

/// Step 3 without typing: check `result` against `shape`.
pub fn shape_result(value: Value, shape: ResultShape) -> Result<ShapedResult, ExchangeError> {
    match (shape, value) {
        (ResultShape::Scalar, value @ (Value::String(_) | Value::Number(_))) => {
            Ok(ShapedResult::Scalar(value))
        }
        (ResultShape::Object, value @ (Value::Object(_) | Value::Array(_))) => {
            Ok(ShapedResult::Object(value))
        }
        (ResultShape::TupleList, value) => to_rows(shape, value).map(ShapedResult::TupleList),
        (ResultShape::KeyedTupleLists, Value::Object(map)) => {
            to_keyed_rows(shape, map).map(ShapedResult::KeyedTupleLists)
        }
        (shape, other) => Err(shape_mismatch(shape, &other)),
    }
}

/// Full pipeline for one enveloped response.
pub fn decode(
    body: &[u8],
    shape: ResultShape,
) -> Result<(ShapedResult, Option<Pagination>), ExchangeError> {
    let envelope = open_envelope(body)?;
    let shaped = shape_result(envelope.result, shape)?;
    let pagination = decode_pagination(envelope.pagination)?;
    Ok((shaped, pagination))
}

/// Envelope carrying no useful `result`, such as an order cancellation.
pub fn decode_ack(body: &[u8]) -> Result<(), ExchangeError> {
    open_envelope(body).map(|_| ())
}

pub fn decode_string(body: &[u8]) -> Result<String, ExchangeError> {
    match decode(body, ResultShape::Scalar)?.0 {
        ShapedResult::Scalar(Value::String(s)) => Ok(s),
        ShapedResult::Scalar(other) => Err(ExchangeError::InvalidResponseFormat(format!(
            "expected a string result, got {}",
            other
        ))),
        _ => unreachable!("decode returns the requested shape"),
    }
}

pub fn decode_number(body: &[u8]) -> Result<f64, ExchangeError> {
    match decode(body, ResultShape::Scalar)?.0 {
        ShapedResult::Scalar(value) => value.as_f64().ok_or_else(|| {
            ExchangeError::InvalidResponseFormat(format!(
                "expected a numeric result, got {}",
                value
            ))
        }),
        _ => unreachable!("decode returns the requested shape"),
    }
}

/// Named-field result, typed through serde.
pub fn decode_object<T: DeserializeOwned>(body: &[u8]) -> Result<Decoded<T>, ExchangeError> {
    let (shaped, pagination) = decode(body, ResultShape::Object)?;
    let ShapedResult::Object(value) = shaped else {
        unreachable!("decode returns the requested shape")
    };
    let result = serde_json::from_value(value).map_err(|e| {
        ExchangeError::InvalidResponseFormat(format!("Failed to decode result: {}", e))
    })?;
    Ok(Decoded { result, pagination })
}

pub fn decode_tuple_list<T: FromTupleRow>(body: &[u8]) -> Result<Decoded<Vec<T>>, ExchangeError> {
    let (shaped, pagination) = decode(body, ResultShape::TupleList)?;
    let ShapedResult::TupleList(rows) = shaped else {
        unreachable!("decode returns the requested shape")
    };
    let result = rows.iter().map(T::from_row).collect::<Result<_, _>>()?;
    Ok(Decoded { result, pagination })
}

pub fn decode_keyed_tuple_lists<T: FromTupleRow>(
    body: &[u8],
) -> Result<Decoded<HashMap<String, Vec<T>>>, ExchangeError> {
    let (shaped, pagination) = decode(body, ResultShape::KeyedTupleLists)?;
    let ShapedResult::KeyedTupleLists(keyed) = shaped else {
        unreachable!("decode returns the requested shape")
    };
    let result = typed_keyed_rows(keyed)?;
    Ok(Decoded { result, pagination })
}

fn typed_keyed_rows<T: FromTupleRow>(
    keyed: HashMap<String, Vec<TupleRow>>,
) -> Result<HashMap<String, Vec<T>>, ExchangeError> {
    keyed
        .into_iter()
        .map(|(label, rows)| {
            let typed = rows.iter().map(T::from_row).collect::<Result<Vec<_>, _>>()?;
            Ok((label, typed))
        })
        .collect()
}

/// Some public endpoints answer without the envelope.
pub fn decode_bare<T: DeserializeOwned>(body: &[u8]) -> Result<T, ExchangeError> {
    serde_json::from_slice(body).map_err(|e| {
        ExchangeError::DeserializationError(format!("Failed to parse Bitkub response: {}", e))
    })
}

/// Un-enveloped map of row lists, as returned by the depth endpoint.
pub fn decode_bare_keyed_tuple_lists<T: FromTupleRow>(
    body: &[u8],
) -> Result<HashMap<String, Vec<T>>, ExchangeError> {
    let map: Map<String, Value> = decode_bare(body)?;
    typed_keyed_rows(to_keyed_rows(ResultShape::KeyedTupleLists, map)?)
}
