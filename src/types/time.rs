use time::{OffsetDateTime, UtcOffset};

use crate::error::ParseTimestampError;
use crate::format::{timestamp_formats, TimestampFormats};
use crate::{DbValue, Scan};

/// A timestamp with offset that may be `NULL`.
///
/// Scanning accepts a native [`DbValue::Timestamp`] as-is, and text or bytes
/// parsed with the configured [timestamp formats](crate::format); text
/// without an offset is taken to be UTC.
///
/// Any other kind of value scans as `NULL` *without* an error. Drivers report
/// timestamp columns in kinds this type does not know about, and callers rely
/// on those reading as `NULL` rather than failing the row.
#[derive(Copy, Clone, Debug)]
pub struct NullTime {
    pub value: OffsetDateTime,
    pub valid: bool,
}

super::impl_nullable!(NullTime(OffsetDateTime) = OffsetDateTime::UNIX_EPOCH);

impl NullTime {
    /// Scan `value`, parsing text with `formats` instead of the process-wide list.
    pub fn scan_with(&mut self, formats: &TimestampFormats, value: DbValue) -> crate::Result<()> {
        match scan_timestamp(formats, value) {
            Ok(value) => {
                self.set(value);
                Ok(())
            }
            Err(e) => {
                *self = Self::null();
                Err(e.into())
            }
        }
    }

    /// The timestamp rendered as text with the first configured format, for
    /// backends that store timestamps as text.
    pub fn to_text_value(&self) -> crate::Result<DbValue> {
        match self.as_option() {
            Some(value) => Ok(DbValue::Text(timestamp_formats().format(*value)?)),
            None => Ok(DbValue::Null),
        }
    }
}

impl Scan for NullTime {
    fn scan(&mut self, value: DbValue) -> crate::Result<()> {
        self.scan_with(timestamp_formats(), value)
    }
}

fn scan_timestamp(
    formats: &TimestampFormats,
    value: DbValue,
) -> Result<Option<OffsetDateTime>, ParseTimestampError> {
    match value {
        DbValue::Null => Ok(None),
        DbValue::Timestamp(dt) => Ok(Some(dt)),
        DbValue::Text(text) => formats.parse(&text, UtcOffset::UTC).map(Some),
        DbValue::Blob(blob) => formats
            .parse(&String::from_utf8_lossy(&blob), UtcOffset::UTC)
            .map(Some),
        other => {
            tracing::trace!(
                kind = %other.kind(),
                "unsupported value kind for a timestamp; scanning as NULL"
            );
            Ok(None)
        }
    }
}

#[cfg(feature = "json")]
mod json {
    use serde::de::{self, Deserialize, Deserializer};
    use serde::ser::{self, Serialize, Serializer};
    use time::format_description::well_known::Rfc3339;
    use time::OffsetDateTime;

    use super::NullTime;
    use crate::{DbValue, Scan};

    impl Serialize for NullTime {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self.as_option() {
                Some(value) => {
                    let text = value.format(&Rfc3339).map_err(ser::Error::custom)?;
                    serializer.serialize_str(&text)
                }
                None => serializer.serialize_none(),
            }
        }
    }

    impl<'de> Deserialize<'de> for NullTime {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let mut this = NullTime::null();

            let Some(text) = Option::<String>::deserialize(deserializer)? else {
                return Ok(this);
            };

            let dt = OffsetDateTime::parse(&text, &Rfc3339).map_err(de::Error::custom)?;

            this.scan(DbValue::Timestamp(dt))
                .map_err(de::Error::custom)?;

            Ok(this)
        }
    }
}
