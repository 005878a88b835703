// Parsing of server timestamps, which carry no offset and are always
// local time in the configured source zone.
use crate::error::{JekinError, Result};
use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse "YYYY-MM-DD HH:MM:SS" as local time in `zone`
pub fn parse_in_zone(raw: &str, zone: Tz) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
        .map_err(|e| JekinError::InvalidTimestamp(format!("'{}': {}", raw, e)))?;
    localize(naive, zone)
}

/// Lenient variant used at the display boundary.
///
/// Missing, empty, and malformed input all come back as `None`. Malformed
/// input is logged; nothing is propagated.
pub fn parse_source_timestamp(raw: Option<&str>, zone: Tz) -> Option<DateTime<Utc>> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;

    match parse_in_zone(raw, zone) {
        Ok(instant) => Some(instant),
        Err(e) => {
            tracing::warn!("Treating timestamp as unavailable: {}", e);
            None
        }
    }
}

/// Parse a date-only "YYYY-MM-DD" and pin it to `at` in `zone`
pub fn parse_date_at(raw: &str, at: NaiveTime, zone: Tz) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| JekinError::InvalidDate(format!("'{}': {}", raw, e)))?;
    localize(date.and_time(at), zone)
}

/// Render an instant back in the source zone, e.g. for status text
pub fn format_in_zone(instant: &DateTime<Utc>, zone: Tz, fmt: &str) -> String {
    instant.with_timezone(&zone).format(fmt).to_string()
}

fn localize(naive: NaiveDateTime, zone: Tz) -> Result<DateTime<Utc>> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        // Fall-back overlap: take the earlier reading
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(JekinError::InvalidTimestamp(format!(
            "{} does not exist in {}",
            naive,
            zone.name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Pacific::Efate;

    #[test]
    fn test_parse_in_fixed_zone() {
        let instant = parse_in_zone("2025-06-15 14:30:00", Efate).unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 6, 15, 3, 30, 0).unwrap();
        assert_eq!(instant, expected);
    }

    #[test]
    fn test_parse_ignores_host_zone() {
        // Same input, same instant, whatever TZ the process runs under
        let original = std::env::var("TZ").ok();
        let mut seen = Vec::new();
        for host in ["UTC", "America/New_York", "Asia/Kolkata"] {
            std::env::set_var("TZ", host);
            let instant = parse_in_zone("2025-06-15 14:30:00", Efate).unwrap();
            let shown = format_in_zone(&instant, Efate, TIMESTAMP_FORMAT);
            seen.push((host, instant, shown));
        }
        match original {
            Some(tz) => std::env::set_var("TZ", tz),
            None => std::env::remove_var("TZ"),
        }

        for (host, instant, shown) in seen {
            assert_eq!(instant.to_rfc3339(), "2025-06-15T03:30:00+00:00", "TZ={}", host);
            assert_eq!(shown, "2025-06-15 14:30:00", "TZ={}", host);
        }
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(parse_in_zone("2025-06-15T14:30:00", Efate).is_err());
        assert!(parse_in_zone("2025-06-15 14:30", Efate).is_err());
        assert!(parse_in_zone("15/06/2025 14:30:00", Efate).is_err());
        assert!(parse_in_zone("2025-13-01 00:00:00", Efate).is_err());
    }

    #[test]
    fn test_lenient_parse_degrades_to_none() {
        assert!(parse_source_timestamp(None, Efate).is_none());
        assert!(parse_source_timestamp(Some(""), Efate).is_none());
        assert!(parse_source_timestamp(Some("   "), Efate).is_none());
        assert!(parse_source_timestamp(Some("not a date"), Efate).is_none());
        assert!(parse_source_timestamp(Some("2025-06-15 14:30:00"), Efate).is_some());
    }

    #[test]
    fn test_parse_date_at_eight() {
        let eight = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let instant = parse_date_at("2025-06-10", eight, Efate).unwrap();
        // 08:00 +11:00 is 21:00 UTC the previous day
        assert_eq!(instant, Utc.with_ymd_and_hms(2025, 6, 9, 21, 0, 0).unwrap());
        assert!(parse_date_at("10-06-2025", eight, Efate).is_err());
    }

    #[test]
    fn test_format_in_zone() {
        let instant = Utc.with_ymd_and_hms(2025, 6, 15, 1, 0, 0).unwrap();
        assert_eq!(
            format_in_zone(&instant, Efate, "%Y-%m-%d %H:%M"),
            "2025-06-15 12:00"
        );
    }
}
