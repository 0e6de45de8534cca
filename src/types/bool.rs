use crate::convert;

/// A boolean that may be `NULL`.
///
/// Besides booleans, scanning accepts the integers `1` and `0` and the texts
/// `1`, `t`, `T`, `TRUE`, `true`, `True` and their false counterparts.
#[derive(Copy, Clone, Debug)]
pub struct NullBool {
    pub value: bool,
    pub valid: bool,
}

super::impl_nullable!(NullBool(bool) = false);
super::impl_scan!(NullBool => convert::to_bool);

#[cfg(feature = "json")]
super::impl_serialize!(NullBool);

#[cfg(feature = "json")]
super::impl_deserialize_via_scan!(NullBool);
