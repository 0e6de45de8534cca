//! Traits the database access layer calls on nullable values.

use crate::error::Result;
use crate::value::DbValue;

/// Populate a value in place from a [`DbValue`] read out of a column.
///
/// A `NULL` always succeeds and leaves the receiver null. When the value
/// cannot be converted, the receiver is reset to null and the error returned.
pub trait Scan {
    fn scan(&mut self, value: DbValue) -> Result<()>;
}

/// Produce the [`DbValue`] to bind as a query parameter.
pub trait ToDbValue {
    fn to_db_value(&self) -> DbValue;
}

impl<T: ToDbValue + ?Sized> ToDbValue for &'_ T {
    #[inline]
    fn to_db_value(&self) -> DbValue {
        (**self).to_db_value()
    }
}
