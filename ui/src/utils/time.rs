use jiff::{Timestamp, Zoned, tz::TimeZone};

/// Localize a timestamp to the browser's time zone.
pub fn localize_timestamp(timestamp: Timestamp) -> Zoned {
    timestamp.to_zoned(TimeZone::system())
}

/// Short date for table cells, e.g. "01 May 2024".
pub fn format_date(zoned: &Zoned) -> String {
    zoned.strftime("%d %b %Y").to_string()
}

/// Table cell text for an optional creation timestamp.
pub fn created_cell(timestamp: Option<Timestamp>) -> String {
    timestamp
        .map(|ts| format_date(&localize_timestamp(ts)))
        .unwrap_or_else(|| "-".to_string())
}

/// Current calendar year in the browser's time zone.
pub fn current_year() -> i16 {
    Zoned::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_day_month_year() {
        let ts: Timestamp = "2024-05-01T10:00:00Z".parse().unwrap();
        assert_eq!(format_date(&ts.to_zoned(TimeZone::UTC)), "01 May 2024");
    }

    #[test]
    fn missing_timestamp_is_a_dash() {
        assert_eq!(created_cell(None), "-");
    }
}
