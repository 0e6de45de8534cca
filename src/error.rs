//! Error types for scanning, parsing and decoding nullable values.

use std::any::type_name;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::result::Result as StdResult;

use crate::value::DbValueKind;

/// A specialized `Result` type for this crate.
pub type Result<T> = StdResult<T, Error>;

/// A boxed error, used as the cause of a [`ConversionError`].
pub type BoxDynError = Box<dyn StdError + 'static + Send + Sync>;

/// Represents all the ways converting a nullable value can fail.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A database value could not be coerced into the target scalar.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// No configured timestamp format matched the text.
    #[error(transparent)]
    TimeParse(#[from] ParseTimestampError),

    /// A value could not be encoded as JSON.
    #[cfg(feature = "json")]
    #[error("error occurred while encoding JSON: {0}")]
    Encode(#[source] serde_json::Error),

    /// Malformed JSON, or JSON that did not coerce into the target scalar.
    #[cfg(feature = "json")]
    #[error("error occurred while decoding JSON: {0}")]
    Decode(#[source] serde_json::Error),

    /// A timestamp could not be rendered with the configured format.
    #[error("failed to format timestamp: {0}")]
    Format(#[from] time::error::Format),

    /// A timestamp was rendered with an empty format list.
    #[error("no timestamp formats are configured")]
    NoTimestampFormats,

    /// A timestamp format pattern could not be compiled.
    #[error("invalid timestamp format: {0}")]
    InvalidFormat(#[from] time::error::InvalidFormatDescription),
}

/// A database value of one kind could not be converted to a Rust scalar.
#[derive(Debug, thiserror::Error)]
#[error("converting database value of kind {from} to `{to}`{}", Cause(.source))]
pub struct ConversionError {
    from: DbValueKind,
    to: &'static str,
    #[source]
    source: Option<BoxDynError>,
}

impl ConversionError {
    pub(crate) fn new<T>(from: DbValueKind) -> Self {
        ConversionError {
            from,
            to: type_name::<T>(),
            source: None,
        }
    }

    pub(crate) fn with_source<T>(from: DbValueKind, source: impl Into<BoxDynError>) -> Self {
        ConversionError {
            from,
            to: type_name::<T>(),
            source: Some(source.into()),
        }
    }

    /// The kind of the value that was offered.
    pub fn from_kind(&self) -> DbValueKind {
        self.from
    }

    /// The name of the Rust type the value was being converted to.
    pub fn to_type(&self) -> &'static str {
        self.to
    }
}

struct Cause<'a>(&'a Option<BoxDynError>);

impl Display for Cause<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(source) => write!(f, ": {source}"),
            None => Ok(()),
        }
    }
}

/// Text could not be parsed as a timestamp by any configured format.
///
/// Carries the failure of the *last* format attempted so the error is the
/// same on every run for the same input.
#[derive(Debug)]
pub struct ParseTimestampError {
    input: String,
    format: Option<String>,
    kind: ParseTimestampErrorKind,
}

impl ParseTimestampError {
    pub(crate) fn new(
        input: impl Into<String>,
        format: Option<String>,
        kind: ParseTimestampErrorKind,
    ) -> Self {
        ParseTimestampError {
            input: input.into(),
            format,
            kind,
        }
    }

    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The pattern of the last format attempted, if any format was configured.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn kind(&self) -> &ParseTimestampErrorKind {
        &self.kind
    }
}

impl Display for ParseTimestampError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse timestamp {:?}", self.input)?;

        if let Some(format) = &self.format {
            write!(f, " (last tried format `{format}`)")?;
        }

        write!(f, ": {}", self.kind)
    }
}

impl StdError for ParseTimestampError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.kind.source()
    }
}

/// Why the last timestamp format rejected its input.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ParseTimestampErrorKind {
    /// The text did not match the format description.
    #[error(transparent)]
    Description(#[from] time::error::ParseFromDescription),

    /// The format matched a prefix of the text but input was left over.
    #[error("unexpected trailing characters")]
    TrailingCharacters,

    /// The matched components do not form a valid timestamp.
    #[error(transparent)]
    Components(#[from] time::error::TryFromParsed),

    #[error("no timestamp formats are configured")]
    NoFormats,
}
