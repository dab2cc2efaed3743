//! Time related utils.

use crate::Error;
use chrono::format::Item;
use chrono::format::Numeric;
use chrono::format::Pad;
use chrono::NaiveDateTime;
use chrono::Utc;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// DATE is a time format like `20220301`
const DATE: &[Item<'static>] = &[
    Item::Numeric(Numeric::Year, Pad::Zero),
    Item::Numeric(Numeric::Month, Pad::Zero),
    Item::Numeric(Numeric::Day, Pad::Zero),
];

/// Format time into date: `20220301`
pub fn format_date(t: DateTime) -> String {
    t.format_with_items(DATE.iter()).to_string()
}

/// ISO8601 is a time format like `20220313T072004Z`.
const ISO8601: &[Item<'static>] = &[
    Item::Numeric(Numeric::Year, Pad::Zero),
    Item::Numeric(Numeric::Month, Pad::Zero),
    Item::Numeric(Numeric::Day, Pad::Zero),
    Item::Literal("T"),
    Item::Numeric(Numeric::Hour, Pad::Zero),
    Item::Numeric(Numeric::Minute, Pad::Zero),
    Item::Numeric(Numeric::Second, Pad::Zero),
    Item::Literal("Z"),
];

/// Format time into ISO8601: `20220313T072004Z`
pub fn format_iso8601(t: DateTime) -> String {
    t.format_with_items(ISO8601.iter()).to_string()
}

/// Parse time from ISO8601 basic format: `20220313T072004Z`
pub fn parse_iso8601(s: &str) -> crate::Result<DateTime> {
    let t = NaiveDateTime::parse_from_str(s, "%Y%m%dT%H%M%SZ").map_err(|e| {
        Error::request_invalid(format!("parse {s} into iso8601 timestamp failed"))
            .with_source(e)
    })?;

    Ok(t.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn test_time() -> DateTime {
        Utc.with_ymd_and_hms(2022, 3, 1, 8, 12, 34).unwrap()
    }

    #[test]
    fn test_format_date() {
        let t = test_time();
        assert_eq!("20220301", format_date(t))
    }

    #[test]
    fn test_format_iso8601() {
        let t = test_time();
        assert_eq!("20220301T081234Z", format_iso8601(t))
    }

    #[test]
    fn test_parse_iso8601() {
        let t = parse_iso8601("20220301T081234Z").expect("must be valid");
        assert_eq!(test_time(), t);

        assert!(parse_iso8601("2022-03-01T08:12:34Z").is_err());
    }
}
