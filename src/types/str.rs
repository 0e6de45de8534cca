use crate::convert;

/// A string that may be `NULL`.
#[derive(Clone, Debug)]
pub struct NullString {
    pub value: String,
    pub valid: bool,
}

super::impl_nullable!(NullString(String) = String::new());
super::impl_scan!(NullString => convert::to_string);

#[cfg(feature = "json")]
super::impl_serialize!(NullString);

#[cfg(feature = "json")]
super::impl_deserialize_via_scan!(NullString);

impl From<&'_ str> for NullString {
    fn from(value: &str) -> Self {
        Self::from_value(value.to_owned())
    }
}
