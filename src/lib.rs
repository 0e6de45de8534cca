//! Nullable scalar types for reading and writing database columns, with JSON
//! that encodes `NULL` as `null`.
//!
//! [`NullString`], [`NullInt64`], [`NullFloat64`], [`NullBool`] and [`NullTime`]
//! each hold a value plus a `valid` flag. A database access layer calls
//! [`Scan::scan`] with the [`DbValue`] it read from a column and
//! [`ToDbValue::to_db_value`] to bind a parameter; serde calls the JSON side.
//!
//! ```
//! use sqlx_nullable::{DbValue, NullInt64, Scan, ToDbValue};
//!
//! let mut id = NullInt64::default();
//! id.scan(DbValue::Text("42".into()))?;
//! assert_eq!(id.into_option(), Some(42));
//!
//! let missing = NullInt64::new(DbValue::Null);
//! assert_eq!(missing.to_db_value(), DbValue::Null);
//! # Ok::<(), sqlx_nullable::Error>(())
//! ```
//!
//! ### Timestamps
//! [`NullTime`] parses text with an ordered list of [timestamp formats](crate::format)
//! that can be replaced once at start-up with [`set_timestamp_formats`].
//!
//! ### Feature flags
//! * `json` (default): `serde` support for every type and the [`json`] helpers.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod convert;
mod scan;
mod types;

pub mod error;
pub mod format;
pub mod value;

#[cfg(feature = "json")]
#[cfg_attr(docsrs, doc(cfg(feature = "json")))]
pub mod json;

pub use error::{ConversionError, Error, ParseTimestampError, Result};
pub use format::{
    parse_timestamp, set_timestamp_formats, timestamp_formats, TimestampFormat, TimestampFormats,
};
pub use scan::{Scan, ToDbValue};
pub use types::{NullBool, NullFloat64, NullInt64, NullString, NullTime};
pub use value::{DbValue, DbValueKind};

#[cfg(feature = "json")]
pub use json::{from_json, to_json};

// Re-exported so callers use the same `time` version as the crate.
#[doc(no_inline)]
pub use time::{OffsetDateTime, UtcOffset};
