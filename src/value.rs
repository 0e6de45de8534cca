use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

use time::{OffsetDateTime, PrimitiveDateTime};

/// A value as exchanged with a database driver.
///
/// This is what a driver hands over when reading a column and what the
/// nullable types hand back for binding a parameter.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub enum DbValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
    Timestamp(OffsetDateTime),
}

/// The kind of a [`DbValue`], without its payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DbValueKind {
    Null,
    Bool,
    Int,
    Float,
    Text,
    Blob,
    Timestamp,
}

impl DbValue {
    pub fn kind(&self) -> DbValueKind {
        match self {
            DbValue::Null => DbValueKind::Null,
            DbValue::Bool(_) => DbValueKind::Bool,
            DbValue::Int(_) => DbValueKind::Int,
            DbValue::Float(_) => DbValueKind::Float,
            DbValue::Text(_) => DbValueKind::Text,
            DbValue::Blob(_) => DbValueKind::Blob,
            DbValue::Timestamp(_) => DbValueKind::Timestamp,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, DbValue::Null)
    }
}

impl Display for DbValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DbValueKind::Null => "NULL",
            DbValueKind::Bool => "BOOLEAN",
            DbValueKind::Int => "INTEGER",
            DbValueKind::Float => "REAL",
            DbValueKind::Text => "TEXT",
            DbValueKind::Blob => "BLOB",
            DbValueKind::Timestamp => "TIMESTAMP",
        })
    }
}

macro_rules! impl_from_for_db_value {
    ($variant:ident: $($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for DbValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    DbValue::$variant(value.into())
                }
            }
        )+
    };
}

impl_from_for_db_value!(Bool: bool);
impl_from_for_db_value!(Int: i8, i16, i32, i64, u8, u16, u32);
impl_from_for_db_value!(Float: f32, f64);
impl_from_for_db_value!(Text: String, &'_ str, Cow<'_, str>);
impl_from_for_db_value!(Blob: Vec<u8>, &'_ [u8]);
impl_from_for_db_value!(Timestamp: OffsetDateTime);

impl From<PrimitiveDateTime> for DbValue {
    fn from(value: PrimitiveDateTime) -> Self {
        DbValue::Timestamp(value.assume_utc())
    }
}

impl<T> From<Option<T>> for DbValue
where
    T: Into<DbValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(DbValue::Null, Into::into)
    }
}

#[cfg(feature = "json")]
mod json {
    use std::fmt;

    use serde::de::{self, Deserialize, Deserializer, Visitor};

    use super::DbValue;

    // JSON tokens map onto database values the way a driver would hand them over,
    // so JSON decoding can go through the same coercion path as scanning.
    impl<'de> Deserialize<'de> for DbValue {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(DbValueVisitor)
        }
    }

    struct DbValueVisitor;

    impl<'de> Visitor<'de> for DbValueVisitor {
        type Value = DbValue;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("null, a boolean, a number or a string")
        }

        fn visit_unit<E: de::Error>(self) -> Result<DbValue, E> {
            Ok(DbValue::Null)
        }

        fn visit_none<E: de::Error>(self) -> Result<DbValue, E> {
            Ok(DbValue::Null)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<DbValue, D::Error>
        where
            D: Deserializer<'de>,
        {
            Deserialize::deserialize(deserializer)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<DbValue, E> {
            Ok(DbValue::Bool(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<DbValue, E> {
            Ok(DbValue::Int(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<DbValue, E> {
            // keep the exact digits; coercion decides whether they fit
            Ok(i64::try_from(v).map_or_else(|_| DbValue::Text(v.to_string()), DbValue::Int))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<DbValue, E> {
            Ok(DbValue::Float(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<DbValue, E> {
            Ok(DbValue::Text(v.to_owned()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<DbValue, E> {
            Ok(DbValue::Text(v))
        }

        fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<DbValue, E> {
            Ok(DbValue::Blob(v.to_vec()))
        }

        fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<DbValue, E> {
            Ok(DbValue::Blob(v))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn it_converts_native_values() {
        assert_eq!(DbValue::from(true), DbValue::Bool(true));
        assert_eq!(DbValue::from(7_i32), DbValue::Int(7));
        assert_eq!(DbValue::from(7_u32), DbValue::Int(7));
        assert_eq!(DbValue::from(1.5_f32), DbValue::Float(1.5));
        assert_eq!(DbValue::from("x"), DbValue::Text("x".into()));
        assert_eq!(DbValue::from(&b"x"[..]), DbValue::Blob(b"x".to_vec()));
        assert_eq!(DbValue::from(None::<i64>), DbValue::Null);
        assert_eq!(DbValue::from(Some("x")), DbValue::Text("x".into()));
    }

    #[test]
    fn it_assumes_utc_for_primitive_datetimes() {
        assert_eq!(
            DbValue::from(datetime!(2021-03-04 05:06:07)),
            DbValue::Timestamp(datetime!(2021-03-04 05:06:07 UTC))
        );
    }

    #[test]
    fn it_reports_kinds() {
        assert!(DbValue::default().is_null());
        assert_eq!(DbValue::Float(0.0).kind(), DbValueKind::Float);
        assert_eq!(DbValueKind::Timestamp.to_string(), "TIMESTAMP");
    }

    #[cfg(feature = "json")]
    #[test]
    fn it_deserializes_json_tokens() -> serde_json::Result<()> {
        let parse = |s: &str| serde_json::from_str::<DbValue>(s);

        assert_eq!(parse("null")?, DbValue::Null);
        assert_eq!(parse("true")?, DbValue::Bool(true));
        assert_eq!(parse("-42")?, DbValue::Int(-42));
        assert_eq!(parse("2.5")?, DbValue::Float(2.5));
        assert_eq!(parse("\"hi\"")?, DbValue::Text("hi".into()));
        assert_eq!(
            parse("18446744073709551615")?,
            DbValue::Text("18446744073709551615".into())
        );
        assert!(parse("[1]").is_err());

        Ok(())
    }
}
