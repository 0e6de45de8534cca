//! Replacing the process-wide format list. Kept in its own test binary: the list
//! can only be installed once per process.

use sqlx_nullable::{
    parse_timestamp, set_timestamp_formats, timestamp_formats, DbValue, NullTime, Scan,
    TimestampFormats, UtcOffset,
};
use time::macros::datetime;

#[test]
fn it_installs_a_custom_format_list_once() -> anyhow::Result<()> {
    let formats = TimestampFormats::from_patterns([
        "[day].[month].[year] [hour]:[minute]",
        "[day].[month].[year]",
    ])?;

    // an empty list is refused without using up the one replacement
    let empty = set_timestamp_formats(TimestampFormats::new(Vec::new())).unwrap_err();
    assert!(empty.is_empty());

    set_timestamp_formats(formats).expect("no timestamps parsed yet");

    assert_eq!(timestamp_formats().len(), 2);
    assert_eq!(
        parse_timestamp("04.03.2021 05:06", UtcOffset::UTC)?,
        datetime!(2021-03-04 05:06 UTC)
    );

    let mut t = NullTime::null();
    t.scan(DbValue::from("04.03.2021"))?;
    assert_eq!(t, NullTime::from(datetime!(2021-03-04 0:00 UTC)));

    // the default dialect is gone, and the error names the new last format
    let err = parse_timestamp("2021-03-04", UtcOffset::UTC).unwrap_err();
    assert_eq!(err.format(), Some("[day].[month].[year]"));

    // a second replacement is refused and handed back
    let rejected = set_timestamp_formats(TimestampFormats::default()).unwrap_err();
    assert_eq!(rejected.len(), 9);
    assert_eq!(timestamp_formats().len(), 2);

    Ok(())
}
