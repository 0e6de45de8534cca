use crate::convert;

/// A 64-bit integer that may be `NULL`.
#[derive(Copy, Clone, Debug)]
pub struct NullInt64 {
    pub value: i64,
    pub valid: bool,
}

super::impl_nullable!(NullInt64(i64) = 0);
super::impl_scan!(NullInt64 => convert::to_i64);

#[cfg(feature = "json")]
super::impl_serialize!(NullInt64);

#[cfg(feature = "json")]
mod json {
    use std::fmt;

    use serde::de::{self, Deserialize, Deserializer, Unexpected, Visitor};

    use super::NullInt64;
    use crate::{DbValue, Scan};

    // The token is read as a numeric literal, keeping its exact digits, rather
    // than through a float. A numeric string is accepted as its literal; an
    // empty string and an absent field count as `null`.
    impl<'de> Deserialize<'de> for NullInt64 {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let literal = deserializer.deserialize_option(NumberLiteralVisitor)?;
            let mut this = NullInt64::null();

            this.scan(literal).map_err(de::Error::custom)?;

            Ok(this)
        }
    }

    struct NumberLiteralVisitor;

    impl<'de> Visitor<'de> for NumberLiteralVisitor {
        type Value = DbValue;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer, a numeric string or null")
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
            deserializer.deserialize_any(self)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<DbValue, E> {
            Ok(DbValue::Int(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<DbValue, E> {
            Ok(DbValue::Text(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<DbValue, E> {
            Err(E::invalid_type(Unexpected::Float(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<DbValue, E> {
            if v.is_empty() {
                return Ok(DbValue::Null);
            }

            Ok(DbValue::Text(v.to_owned()))
        }
    }
}
