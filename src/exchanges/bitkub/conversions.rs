use crate::core::errors::ExchangeError;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

/// Fractional digits rendered before trimming. Bitkub accepts at most eight.
pub const AMOUNT_PRECISION: usize = 8;

/// Render an amount or rate the way it must appear in a signed payload.
///
/// The value is printed in fixed-point notation, trailing zeros are removed,
/// and then a bare trailing separator is removed. The order matters: the fixed
/// rendering always contains a `.`, so zeros of the integer part survive.
///
/// `10.0 -> "10"`, `0.0010 -> "0.001"`, `100.100 -> "100.1"`, `0.0 -> "0"`
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.*}", AMOUNT_PRECISION, value);
    if !fixed.contains('.') {
        // NaN and infinities
        return fixed;
    }
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        return "0".to_string();
    }
    trimmed.to_string()
}

/// Convert a wire number to an integral id or timestamp, truncating toward zero.
///
/// JSON numbers arrive as `f64`, so integers above 2^53 may already have lost
/// precision before this conversion runs. Out-of-range values saturate.
#[inline]
pub fn f64_to_i64(value: f64) -> i64 {
    value.trunc() as i64
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireInteger {
    Exact(i64),
    Float(f64),
}

impl WireInteger {
    fn into_i64(self) -> i64 {
        match self {
            Self::Exact(v) => v,
            Self::Float(v) => f64_to_i64(v),
        }
    }
}

/// Serde adapter for integral fields of named-field results.
///
/// Exact integers pass through, floats such as `1.0` go through [`f64_to_i64`].
pub fn deserialize_integral<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    WireInteger::deserialize(deserializer).map(WireInteger::into_i64)
}

/// [`deserialize_integral`] for optional fields. `null` becomes `None`.
pub fn deserialize_optional_integral<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<WireInteger>::deserialize(deserializer).map(|v| v.map(WireInteger::into_i64))
}

/// [`deserialize_integral`] for arrays, such as candle timestamps.
pub fn deserialize_integral_vec<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<WireInteger>::deserialize(deserializer)
        .map(|values| values.into_iter().map(WireInteger::into_i64).collect())
}

/// Values at or above this are taken as milliseconds rather than seconds.
const MILLIS_THRESHOLD: u64 = 100_000_000_000;

/// Interpret a server clock reading, in seconds or milliseconds since the epoch.
pub fn server_time_to_datetime(raw: i64) -> Result<DateTime<Utc>, ExchangeError> {
    let millis = if raw.unsigned_abs() >= MILLIS_THRESHOLD {
        raw
    } else {
        raw.saturating_mul(1000)
    };
    Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
        ExchangeError::InvalidResponseFormat(format!("server time out of range: {}", raw))
    })
}
