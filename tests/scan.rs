use sqlx_nullable::{
    DbValue, Error, NullBool, NullFloat64, NullInt64, NullString, NullTime, Scan, ToDbValue,
};
use time::macros::datetime;

// Scan each database value into a fresh `$ty` and compare with the expected value.
macro_rules! test_scan {
    ($name:ident<$ty:ty>($($raw:expr => $value:expr),+ $(,)?)) => {
        paste::item! {
            #[test]
            fn [< scan_ $name >] () -> anyhow::Result<()> {
                $(
                    let mut scanned = <$ty>::default();
                    scanned.scan(DbValue::from($raw))?;

                    let expected: $ty = $value;
                    assert_eq!(scanned, expected, "scanning {:?}", DbValue::from($raw));
                )+

                Ok(())
            }
        }
    };
}

// Scan each database value into a `$ty` and expect a conversion error.
macro_rules! test_scan_fails {
    ($name:ident<$ty:ty>($($raw:expr),+ $(,)?)) => {
        paste::item! {
            #[test]
            fn [< scan_ $name _fails >] () {
                $(
                    let mut scanned = <$ty>::default();
                    let result = scanned.scan(DbValue::from($raw));

                    assert!(
                        matches!(result, Err(Error::Conversion(_))),
                        "scanning {:?} gave {:?}",
                        DbValue::from($raw),
                        result,
                    );
                    assert!(scanned.is_null());
                )+
            }
        }
    };
}

test_scan!(string<NullString>(
    None::<String> => NullString::null(),
    "" => NullString::from(""),
    "hello" => NullString::from("hello"),
    b"bytes".to_vec() => NullString::from("bytes"),
    -5_i64 => NullString::from("-5"),
    true => NullString::from("true"),
    datetime!(2021-03-04 05:06:07 UTC) => NullString::from("2021-03-04T05:06:07Z"),
));

test_scan!(int64<NullInt64>(
    None::<i64> => NullInt64::null(),
    9358295312_i64 => NullInt64::from(9358295312),
    "42" => NullInt64::from(42),
    "-17" => NullInt64::from(-17),
    b"7".to_vec() => NullInt64::from(7),
    12.0_f64 => NullInt64::from(12),
));

test_scan_fails!(int64<NullInt64>(
    "4.2",
    "",
    "forty-two",
    12.5_f64,
    false,
    datetime!(2021-03-04 05:06:07 UTC),
));

test_scan!(float64<NullFloat64>(
    None::<f64> => NullFloat64::null(),
    939399419.1225182_f64 => NullFloat64::from(939399419.1225182),
    3_i64 => NullFloat64::from(3.0),
    "1e3" => NullFloat64::from(1000.0),
));

test_scan_fails!(float64<NullFloat64>("pi", true));

test_scan!(bool<NullBool>(
    None::<bool> => NullBool::null(),
    true => NullBool::from(true),
    1_i64 => NullBool::from(true),
    0_i64 => NullBool::from(false),
    "t" => NullBool::from(true),
    "FALSE" => NullBool::from(false),
    b"1".to_vec() => NullBool::from(true),
));

test_scan_fails!(bool<NullBool>(2_i64, "yes", 1.0_f64));

test_scan!(time<NullTime>(
    None::<&str> => NullTime::null(),
    datetime!(2021-03-04 05:06:07 +3) => NullTime::from(datetime!(2021-03-04 05:06:07 +3)),
    "2021-03-04 05:06:07.123456789-07:00"
        => NullTime::from(datetime!(2021-03-04 05:06:07.123456789 -7)),
    "2021-03-04T05:06:07.5+01:00" => NullTime::from(datetime!(2021-03-04 05:06:07.5 +1)),
    "2021-03-04 05:06:07.25" => NullTime::from(datetime!(2021-03-04 05:06:07.25 UTC)),
    "2021-03-04T05:06:07Z" => NullTime::from(datetime!(2021-03-04 05:06:07 UTC)),
    "2021-03-04 05:06:07" => NullTime::from(datetime!(2021-03-04 05:06:07 UTC)),
    "2021-03-04T05:06" => NullTime::from(datetime!(2021-03-04 05:06 UTC)),
    "2021-03-04" => NullTime::from(datetime!(2021-03-04 0:00 UTC)),
    b"2021-03-04 05:06".to_vec() => NullTime::from(datetime!(2021-03-04 05:06 UTC)),
));

#[test]
fn scan_null_is_always_null() -> anyhow::Result<()> {
    let mut s = NullString::from("x");
    let mut i = NullInt64::from(1);
    let mut f = NullFloat64::from(1.0);
    let mut b = NullBool::from(true);
    let mut t = NullTime::from(datetime!(2021-03-04 0:00 UTC));

    s.scan(DbValue::Null)?;
    i.scan(DbValue::Null)?;
    f.scan(DbValue::Null)?;
    b.scan(DbValue::Null)?;
    t.scan(DbValue::Null)?;

    assert!(s.is_null() && i.is_null() && f.is_null() && b.is_null() && t.is_null());

    Ok(())
}

#[test]
fn scan_time_with_unparseable_text_fails() {
    let mut t = NullTime::from(datetime!(2021-03-04 0:00 UTC));

    match t.scan(DbValue::from("not-a-date")) {
        Err(Error::TimeParse(err)) => {
            assert_eq!(err.input(), "not-a-date");
            assert_eq!(err.format(), Some("[year]-[month]-[day]"));
        }
        other => panic!("unexpected result: {other:?}"),
    }

    assert!(t.is_null());
}

#[test]
fn scan_time_with_unsupported_kind_is_silently_null() -> anyhow::Result<()> {
    let mut t = NullTime::from(datetime!(2021-03-04 0:00 UTC));

    t.scan(DbValue::Bool(true))?;
    assert!(t.is_null());

    t.scan(DbValue::Float(1.5))?;
    assert!(t.is_null());

    Ok(())
}

#[test]
fn new_discards_scan_errors() {
    assert!(NullInt64::new("nope").is_null());
    assert!(NullBool::new(7_i64).is_null());
    assert!(NullTime::new("nope").is_null());

    assert_eq!(NullInt64::new(Some(3_i64)), NullInt64::from(3));
}

#[test]
fn values_bind_as_native_or_null() {
    let ts = datetime!(2021-03-04 05:06:07 -7);

    assert_eq!(NullString::from("a").to_db_value(), DbValue::Text("a".into()));
    assert_eq!(NullInt64::from(1).to_db_value(), DbValue::Int(1));
    assert_eq!(NullFloat64::from(0.5).to_db_value(), DbValue::Float(0.5));
    assert_eq!(NullBool::from(false).to_db_value(), DbValue::Bool(false));
    assert_eq!(NullTime::from(ts).to_db_value(), DbValue::Timestamp(ts));

    assert_eq!(NullString::null().to_db_value(), DbValue::Null);
    assert_eq!(NullInt64::null().to_db_value(), DbValue::Null);
    assert_eq!(NullFloat64::null().to_db_value(), DbValue::Null);
    assert_eq!(NullBool::null().to_db_value(), DbValue::Null);
    assert_eq!(NullTime::null().to_db_value(), DbValue::Null);
}
