//! Textual timestamp formats understood when scanning [`NullTime`](crate::NullTime).
//!
//! Different backends and drivers hand timestamps over as text in different
//! shapes. The formats are kept in an ordered list: when parsing, each is tried
//! in turn and the first match wins; when rendering text for the database, the
//! first format is used.
//!
//! Patterns use the [`time` format description syntax][fd] (version 1). A
//! zero-padded `[hour]` also matches a single digit when parsing.
//!
//! # Configuration
//!
//! The list consulted by [`parse_timestamp`] and [`Scan`](crate::Scan) for
//! [`NullTime`](crate::NullTime) is process-wide. It defaults to
//! [`TimestampFormats::default()`] and may be replaced exactly once with
//! [`set_timestamp_formats`], which must happen before the first timestamp is
//! parsed (typically at start-up). Code that needs a different list per call
//! can pass one explicitly to [`TimestampFormats::parse`] or
//! [`NullTime::scan_with`](crate::NullTime::scan_with).
//!
//! [fd]: https://time-rs.github.io/book/api/format-description.html

use std::fmt::{self, Debug, Formatter};
use std::str::FromStr;

use once_cell::sync::OnceCell;
use time::format_description::modifier::Padding;
use time::format_description::{self, BorrowedFormatItem, Component, OwnedFormatItem};
use time::macros::format_description as fd;
use time::parsing::Parsed;
use time::{OffsetDateTime, UtcOffset};

use crate::error::{Error, ParseTimestampError, ParseTimestampErrorKind, Result};

static TIMESTAMP_FORMATS: OnceCell<TimestampFormats> = OnceCell::new();

// Declares a default format; the pattern is checked at compile time.
macro_rules! timestamp_format {
    ($pattern:tt) => {
        TimestampFormat::from_static($pattern, fd!($pattern))
    };
}

/// A single timestamp pattern.
///
/// When parsing, a zero-padded `[hour]` also accepts a single digit
/// (`5:06:07`). Rendering always pads.
#[derive(Clone)]
pub struct TimestampFormat {
    pattern: String,
    items: OwnedFormatItem,
    parse_items: OwnedFormatItem,
}

impl TimestampFormat {
    /// Compile a pattern written in the `time` format description syntax.
    pub fn parse(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let items = format_description::parse_owned::<1>(&pattern)?;

        Ok(Self::with_items(pattern, items))
    }

    fn from_static(pattern: &'static str, items: &[BorrowedFormatItem<'_>]) -> Self {
        Self::with_items(pattern.to_owned(), items.into())
    }

    fn with_items(pattern: String, items: OwnedFormatItem) -> Self {
        TimestampFormat {
            pattern,
            parse_items: unpadded_hours(items.clone()),
            items,
        }
    }

    /// The pattern this format was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Render `dt` with this format.
    pub fn format(&self, dt: OffsetDateTime) -> std::result::Result<String, time::error::Format> {
        dt.format(&self.items)
    }

    /// Parse the whole of `text` with this format.
    ///
    /// Components the pattern does not carry are filled in: a missing
    /// time-of-day is midnight and a missing offset is `default_offset`.
    fn parse_with_default(
        &self,
        text: &str,
        default_offset: UtcOffset,
    ) -> std::result::Result<OffsetDateTime, ParseTimestampErrorKind> {
        let mut parsed = Parsed::new();
        let remaining = parsed.parse_item(text.as_bytes(), &self.parse_items)?;

        if !remaining.is_empty() {
            return Err(ParseTimestampErrorKind::TrailingCharacters);
        }

        fill_defaults(&mut parsed, default_offset)
            .ok_or(time::error::TryFromParsed::InsufficientInformation)?;

        Ok(OffsetDateTime::try_from(parsed)?)
    }
}

fn unpadded_hours(item: OwnedFormatItem) -> OwnedFormatItem {
    match item {
        OwnedFormatItem::Component(Component::Hour(mut hour)) => {
            if hour.padding == Padding::Zero {
                hour.padding = Padding::None;
            }
            OwnedFormatItem::Component(Component::Hour(hour))
        }
        OwnedFormatItem::Compound(items) => {
            OwnedFormatItem::Compound(items.into_vec().into_iter().map(unpadded_hours).collect())
        }
        OwnedFormatItem::Optional(item) => {
            OwnedFormatItem::Optional(Box::new(unpadded_hours(*item)))
        }
        OwnedFormatItem::First(items) => {
            OwnedFormatItem::First(items.into_vec().into_iter().map(unpadded_hours).collect())
        }
        other => other,
    }
}

fn fill_defaults(parsed: &mut Parsed, default_offset: UtcOffset) -> Option<()> {
    if parsed.hour_24().is_none() && parsed.hour_12().is_none() {
        parsed.set_hour_24(0)?;
    }

    if parsed.offset_hour().is_none() {
        let (hours, minutes, seconds) = default_offset.as_hms();

        parsed.set_offset_hour(hours)?;
        parsed.set_offset_minute_signed(minutes)?;
        parsed.set_offset_second_signed(seconds)?;
    }

    Some(())
}

impl FromStr for TimestampFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TimestampFormat::parse(s)
    }
}

impl Debug for TimestampFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TimestampFormat").field(&self.pattern).finish()
    }
}

/// An ordered list of timestamp formats.
#[derive(Clone, Debug)]
pub struct TimestampFormats {
    formats: Vec<TimestampFormat>,
}

impl TimestampFormats {
    pub fn new(formats: Vec<TimestampFormat>) -> Self {
        TimestampFormats { formats }
    }

    /// Compile each pattern in order.
    pub fn from_patterns<I>(patterns: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        patterns
            .into_iter()
            .map(TimestampFormat::parse)
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimestampFormat> + '_ {
        self.formats.iter()
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// The format used when rendering timestamps as text.
    pub fn first(&self) -> Option<&TimestampFormat> {
        self.formats.first()
    }

    /// Parse `text` with the first format that accepts it.
    ///
    /// A single trailing `Z` is dropped before matching, so `...T05:06:07Z`
    /// parses like `...T05:06:07` in `default_offset`. When no format matches,
    /// the error from the last format tried is returned.
    pub fn parse(
        &self,
        text: &str,
        default_offset: UtcOffset,
    ) -> std::result::Result<OffsetDateTime, ParseTimestampError> {
        let candidate = text.strip_suffix('Z').unwrap_or(text);
        let mut last = None;

        for format in &self.formats {
            match format.parse_with_default(candidate, default_offset) {
                Ok(dt) => return Ok(dt),
                Err(kind) => last = Some((format, kind)),
            }
        }

        let err = match last {
            Some((format, kind)) => {
                ParseTimestampError::new(text, Some(format.pattern.clone()), kind)
            }
            None => ParseTimestampError::new(text, None, ParseTimestampErrorKind::NoFormats),
        };

        tracing::trace!(input = text, error = %err, "no timestamp format matched");

        Err(err)
    }

    /// Render `dt` with the first format.
    pub fn format(&self, dt: OffsetDateTime) -> Result<String> {
        let format = self.first().ok_or(Error::NoTimestampFormats)?;

        Ok(format.format(dt)?)
    }
}

impl Default for TimestampFormats {
    /// Longer, more specific formats come first so a shorter format never
    /// claims a timestamp that carries more precision.
    fn default() -> Self {
        TimestampFormats::new(vec![
            // Stored with whatever offset they came with, returned with the same offset.
            timestamp_format!("[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]][offset_hour sign:mandatory]:[offset_minute]"),
            timestamp_format!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]][offset_hour sign:mandatory]:[offset_minute]"),
            timestamp_format!("[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"),
            timestamp_format!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"),
            timestamp_format!("[year]-[month]-[day] [hour]:[minute]:[second]"),
            timestamp_format!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
            timestamp_format!("[year]-[month]-[day] [hour]:[minute]"),
            timestamp_format!("[year]-[month]-[day]T[hour]:[minute]"),
            timestamp_format!("[year]-[month]-[day]"),
        ])
    }
}

impl<'a> IntoIterator for &'a TimestampFormats {
    type Item = &'a TimestampFormat;
    type IntoIter = std::slice::Iter<'a, TimestampFormat>;

    fn into_iter(self) -> Self::IntoIter {
        self.formats.iter()
    }
}

/// The process-wide timestamp format list.
///
/// Initialized to [`TimestampFormats::default()`] on first use unless
/// [`set_timestamp_formats`] ran earlier.
pub fn timestamp_formats() -> &'static TimestampFormats {
    TIMESTAMP_FORMATS.get_or_init(TimestampFormats::default)
}

/// Replace the process-wide timestamp format list.
///
/// This succeeds only once, and only before the list has been used. An empty
/// list is never installed. Otherwise the list is handed back unchanged in
/// `Err`.
pub fn set_timestamp_formats(
    formats: TimestampFormats,
) -> std::result::Result<(), TimestampFormats> {
    let len = formats.len();

    if len == 0 {
        tracing::debug!("refusing to install an empty timestamp format list");
        return Err(formats);
    }

    match TIMESTAMP_FORMATS.set(formats) {
        Ok(()) => {
            tracing::debug!(formats = len, "installed timestamp formats");
            Ok(())
        }
        Err(rejected) => {
            tracing::debug!("timestamp formats are already in use; keeping the current list");
            Err(rejected)
        }
    }
}

/// Parse `text` with the process-wide format list.
pub fn parse_timestamp(
    text: &str,
    default_offset: UtcOffset,
) -> std::result::Result<OffsetDateTime, ParseTimestampError> {
    timestamp_formats().parse(text, default_offset)
}
