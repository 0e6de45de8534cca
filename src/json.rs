//! Encoding and decoding nullable values as JSON text.
//!
//! Every nullable type implements `serde::Serialize` and `serde::Deserialize`
//! and can be used with any serde format; these helpers fix the format to JSON
//! and map failures into [`Error::Encode`] and [`Error::Decode`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

/// Encode `value` as JSON text. `NULL` encodes as `null`.
pub fn to_json<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(value).map_err(Error::Encode)
}

/// Decode JSON text. `null` decodes as `NULL`.
pub fn from_json<T>(json: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str(json).map_err(Error::Decode)
}
