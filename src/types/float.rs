use crate::convert;

/// A 64-bit float that may be `NULL`.
#[derive(Copy, Clone, Debug)]
pub struct NullFloat64 {
    pub value: f64,
    pub valid: bool,
}

super::impl_nullable!(NullFloat64(f64) = 0.0);
super::impl_scan!(NullFloat64 => convert::to_f64);

#[cfg(feature = "json")]
super::impl_deserialize_via_scan!(NullFloat64);

// JSON has no representation for NaN or the infinities.
#[cfg(feature = "json")]
impl serde::Serialize for NullFloat64 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self.as_option() {
            Some(value) if !value.is_finite() => Err(serde::ser::Error::custom(format_args!(
                "unsupported value: {value}"
            ))),
            Some(value) => serializer.serialize_f64(*value),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DbValue, Scan};

    #[test]
    fn it_widens_integers_and_parses_text() {
        assert_eq!(NullFloat64::new(3_i64), NullFloat64::from(3.0));
        assert_eq!(NullFloat64::new("2.75"), NullFloat64::from(2.75));
    }

    #[test]
    fn it_rejects_booleans() {
        let mut f = NullFloat64::default();

        assert!(f.scan(DbValue::Bool(true)).is_err());
        assert!(f.is_null());
    }
}
