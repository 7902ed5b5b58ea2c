/// Calendar date parsing and rendering
///
/// Exercise dates are plain calendar dates with no time component. On the
/// wire they are rendered in a human-readable form such as
/// `"Mon Jan 01 2024"`, and accepted from clients in any of:
///
/// - `YYYY-MM-DD`
/// - RFC 3339 timestamps (`2024-01-01T08:30:00Z`), reduced to their UTC date
/// - Naive timestamps (`2024-01-01T08:30:00`)
/// - The rendered form itself (`Mon Jan 01 2024`)
///
/// # Example
///
/// ```
/// use exercise_tracker_shared::calendar;
///
/// let date = calendar::parse("2024-01-01").unwrap();
/// assert_eq!(calendar::render(date), "Mon Jan 01 2024");
/// assert_eq!(calendar::parse("Mon Jan 01 2024").unwrap(), date);
/// ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// `strftime` pattern for rendered dates (weekday, month, day, year)
pub const RENDERED_FORMAT: &str = "%a %b %d %Y";

/// Error returned when a date string matches none of the accepted formats
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid date: {0:?}")]
pub struct InvalidDate(pub String);

/// Renders a date as `"Mon Jan 01 2024"`
pub fn render(date: NaiveDate) -> String {
    date.format(RENDERED_FORMAT).to_string()
}

/// Today's date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parses a client-supplied date string
///
/// # Errors
///
/// Returns `InvalidDate` if the input matches none of the accepted formats.
pub fn parse(input: &str) -> Result<NaiveDate, InvalidDate> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.with_timezone(&Utc).date_naive());
    }

    if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(timestamp.date());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, RENDERED_FORMAT) {
        return Ok(date);
    }

    Err(InvalidDate(input.to_string()))
}

/// Parses an optional date where absent and blank both mean "not given"
///
/// # Errors
///
/// Returns `InvalidDate` if a non-blank value cannot be parsed.
pub fn parse_optional(input: Option<&str>) -> Result<Option<NaiveDate>, InvalidDate> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse(value).map(Some),
    }
}

/// Serde adapter that writes dates in the rendered form
///
/// Use with `#[serde(with = "calendar::rendered")]`.
pub mod rendered {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(super::RENDERED_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_render_pads_day() {
        assert_eq!(render(ymd(2024, 1, 1)), "Mon Jan 01 2024");
        assert_eq!(render(ymd(2024, 2, 29)), "Thu Feb 29 2024");
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse("2024-01-15").unwrap(), ymd(2024, 1, 15));
        assert_eq!(parse("  2024-01-15 ").unwrap(), ymd(2024, 1, 15));
    }

    #[test]
    fn test_parse_timestamps() {
        assert_eq!(parse("2024-01-15T10:30:00Z").unwrap(), ymd(2024, 1, 15));
        // 23:00 at -05:00 is already the next day in UTC
        assert_eq!(parse("2024-01-15T23:00:00-05:00").unwrap(), ymd(2024, 1, 16));
        assert_eq!(parse("2024-01-15T10:30:00").unwrap(), ymd(2024, 1, 15));
    }

    #[test]
    fn test_parse_rendered_form() {
        let date = ymd(2023, 12, 25);
        assert_eq!(parse(&render(date)).unwrap(), date);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse("yesterday"), Err(InvalidDate("yesterday".to_string())));
        assert!(parse("2024-13-01").is_err());
    }

    #[test]
    fn test_parse_optional_blank_is_none() {
        assert_eq!(parse_optional(None).unwrap(), None);
        assert_eq!(parse_optional(Some("")).unwrap(), None);
        assert_eq!(parse_optional(Some("   ")).unwrap(), None);
        assert_eq!(
            parse_optional(Some("2024-03-04")).unwrap(),
            Some(ymd(2024, 3, 4))
        );
        assert!(parse_optional(Some("nope")).is_err());
    }

    #[test]
    fn test_rendered_serde() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wrapper {
            #[serde(with = "rendered")]
            date: NaiveDate,
        }

        let json = serde_json::to_string(&Wrapper { date: ymd(2024, 1, 1) }).unwrap();
        assert_eq!(json, r#"{"date":"Mon Jan 01 2024"}"#);

        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back.date, ymd(2024, 1, 1));
    }
}
