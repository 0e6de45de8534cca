//! Coercion of database values into scalars.
//!
//! Scanning and JSON decoding both funnel through these functions, so a value
//! is accepted by one exactly when it is accepted by the other. `NULL` is never
//! an error: every function returns `Ok(None)` for it.

use std::str;

use time::format_description::well_known::Rfc3339;

use crate::error::ConversionError;
use crate::value::{DbValue, DbValueKind};

pub(crate) fn to_string(value: DbValue) -> Result<Option<String>, ConversionError> {
    let kind = value.kind();

    Ok(Some(match value {
        DbValue::Null => return Ok(None),
        DbValue::Text(text) => text,
        DbValue::Blob(blob) => String::from_utf8(blob)
            .map_err(|e| ConversionError::with_source::<String>(kind, e))?,
        DbValue::Int(v) => v.to_string(),
        DbValue::Float(v) => format_float(v),
        DbValue::Bool(v) => v.to_string(),
        DbValue::Timestamp(v) => v
            .format(&Rfc3339)
            .map_err(|e| ConversionError::with_source::<String>(kind, e))?,
    }))
}

// Shortest text that round-trips, in exponent form when the decimal exponent is
// below -4 or at least 6 (`1e+20`, `1.5e-07`), plain decimal otherwise.
fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_owned();
    }

    if v.is_infinite() {
        let inf = if v > 0.0 { "+Inf" } else { "-Inf" };
        return inf.to_owned();
    }

    let scientific = format!("{v:e}");

    match scientific
        .split_once('e')
        .and_then(|(mantissa, exp)| Some((mantissa, exp.parse::<i32>().ok()?)))
    {
        Some((mantissa, exp)) if !(-4..6).contains(&exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        _ => v.to_string(),
    }
}

pub(crate) fn to_i64(value: DbValue) -> Result<Option<i64>, ConversionError> {
    let kind = value.kind();

    Ok(Some(match value {
        DbValue::Null => return Ok(None),
        DbValue::Int(v) => v,
        DbValue::Float(v) => float_to_i64(v).ok_or_else(|| ConversionError::new::<i64>(kind))?,
        DbValue::Text(text) => parse_text::<i64>(kind, &text)?,
        DbValue::Blob(blob) => parse_text::<i64>(kind, utf8::<i64>(kind, &blob)?)?,
        DbValue::Bool(_) | DbValue::Timestamp(_) => return Err(ConversionError::new::<i64>(kind)),
    }))
}

pub(crate) fn to_f64(value: DbValue) -> Result<Option<f64>, ConversionError> {
    let kind = value.kind();

    Ok(Some(match value {
        DbValue::Null => return Ok(None),
        DbValue::Float(v) => v,
        DbValue::Int(v) => v as f64,
        DbValue::Text(text) => parse_text::<f64>(kind, &text)?,
        DbValue::Blob(blob) => parse_text::<f64>(kind, utf8::<f64>(kind, &blob)?)?,
        DbValue::Bool(_) | DbValue::Timestamp(_) => return Err(ConversionError::new::<f64>(kind)),
    }))
}

pub(crate) fn to_bool(value: DbValue) -> Result<Option<bool>, ConversionError> {
    let kind = value.kind();

    Ok(Some(match value {
        DbValue::Null => return Ok(None),
        DbValue::Bool(v) => v,
        DbValue::Int(1) => true,
        DbValue::Int(0) => false,
        DbValue::Text(text) => parse_bool(&text).ok_or_else(|| ConversionError::new::<bool>(kind))?,
        DbValue::Blob(blob) => parse_bool(utf8::<bool>(kind, &blob)?)
            .ok_or_else(|| ConversionError::new::<bool>(kind))?,
        DbValue::Int(_) | DbValue::Float(_) | DbValue::Timestamp(_) => {
            return Err(ConversionError::new::<bool>(kind))
        }
    }))
}

fn parse_text<T>(kind: DbValueKind, text: &str) -> Result<T, ConversionError>
where
    T: str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    text.parse::<T>()
        .map_err(|e| ConversionError::with_source::<T>(kind, e))
}

fn utf8<T>(kind: DbValueKind, blob: &[u8]) -> Result<&str, ConversionError> {
    str::from_utf8(blob).map_err(|e| ConversionError::with_source::<T>(kind, e))
}

// 2^63 is exactly representable; anything at or beyond it does not fit
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

#[allow(clippy::cast_possible_truncation)]
fn float_to_i64(v: f64) -> Option<i64> {
    (v.is_finite() && v.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&v)).then(|| v as i64)
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
