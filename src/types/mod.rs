//! Nullable scalar types.
//!
//! Each type pairs a `value` with a `valid` flag. When `valid` is `false` the
//! value is `NULL` and `value` holds a zero value that carries no meaning;
//! equality and every conversion ignore it.
//!
//! | Rust type       | Wrapped value    | JSON              |
//! |-----------------|------------------|-------------------|
//! | [`NullString`]  | `String`         | string            |
//! | [`NullInt64`]   | `i64`            | number            |
//! | [`NullFloat64`] | `f64`            | number            |
//! | [`NullBool`]    | `bool`           | `true` / `false`  |
//! | [`NullTime`]    | `OffsetDateTime` | RFC 3339 string   |
//!
//! `NULL` is `null` in JSON.
//!
//! # Construction
//!
//! The `new` constructor on each type scans an arbitrary [`DbValue`] and
//! **discards any scan error**: a value that cannot be converted silently
//! becomes `NULL`. Use [`Scan::scan`] directly when the failure matters.
//!
//! [`DbValue`]: crate::DbValue
//! [`Scan::scan`]: crate::Scan::scan

mod bool;
mod float;
mod int;
mod str;
mod time;

pub use self::bool::NullBool;
pub use self::float::NullFloat64;
pub use self::int::NullInt64;
pub use self::str::NullString;
pub use self::time::NullTime;

// Shared surface of every nullable type: constructors, `Option` conversions,
// validity-aware equality and `ToDbValue`.
macro_rules! impl_nullable {
    ($name:ident($ty:ty) = $zero:expr) => {
        impl $name {
            /// A `NULL` value.
            pub fn null() -> Self {
                $name {
                    value: $zero,
                    valid: false,
                }
            }

            /// A valid, non-`NULL` value.
            pub fn from_value(value: $ty) -> Self {
                $name { value, valid: true }
            }

            /// Scan `value`, falling back to `NULL` if it cannot be converted.
            ///
            /// Scan errors are discarded. Call [`Scan::scan`](crate::Scan::scan)
            /// to observe them.
            pub fn new(value: impl Into<$crate::DbValue>) -> Self {
                let mut this = Self::null();
                let _ = $crate::Scan::scan(&mut this, value.into());
                this
            }

            #[inline]
            pub fn is_null(&self) -> bool {
                !self.valid
            }

            pub fn as_option(&self) -> Option<&$ty> {
                self.valid.then_some(&self.value)
            }

            pub fn into_option(self) -> Option<$ty> {
                self.valid.then_some(self.value)
            }

            pub(crate) fn set(&mut self, value: Option<$ty>) {
                *self = value.map_or_else(Self::null, Self::from_value);
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::null()
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.as_option() == other.as_option()
            }
        }

        impl From<$ty> for $name {
            fn from(value: $ty) -> Self {
                Self::from_value(value)
            }
        }

        impl From<Option<$ty>> for $name {
            fn from(value: Option<$ty>) -> Self {
                value.map_or_else(Self::null, Self::from_value)
            }
        }

        impl From<$name> for Option<$ty> {
            fn from(value: $name) -> Self {
                value.into_option()
            }
        }

        impl $crate::ToDbValue for $name {
            fn to_db_value(&self) -> $crate::DbValue {
                $crate::DbValue::from(self.as_option().cloned())
            }
        }

        impl From<$name> for $crate::DbValue {
            fn from(value: $name) -> Self {
                $crate::DbValue::from(value.into_option())
            }
        }
    };
}

// `Scan` for the scalar types: delegate to the shared coercion routine.
macro_rules! impl_scan {
    ($name:ident => $convert:path) => {
        impl $crate::Scan for $name {
            fn scan(&mut self, value: $crate::DbValue) -> $crate::Result<()> {
                match $convert(value) {
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
        }
    };
}

// JSON decoding for the scalar types: read the token as a `DbValue` and scan it.
#[cfg(feature = "json")]
macro_rules! impl_deserialize_via_scan {
    ($name:ident) => {
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                // Through `Option` so an absent field decodes as `NULL`.
                let value: Option<$crate::DbValue> = serde::Deserialize::deserialize(deserializer)?;
                let value = value.unwrap_or_default();
                let mut this = Self::null();

                $crate::Scan::scan(&mut this, value).map_err(serde::de::Error::custom)?;

                Ok(this)
            }
        }
    };
}

// JSON encoding where the wrapped value serializes itself.
#[cfg(feature = "json")]
macro_rules! impl_serialize {
    ($name:ident) => {
        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                match self.as_option() {
                    Some(value) => serde::Serialize::serialize(value, serializer),
                    None => serializer.serialize_none(),
                }
            }
        }
    };
}

pub(crate) use impl_nullable;
pub(crate) use impl_scan;

#[cfg(feature = "json")]
pub(crate) use {impl_deserialize_via_scan, impl_serialize};
