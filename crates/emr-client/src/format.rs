//! Date Formatting
//!
//! The backend sends ISO-8601 strings; views show them in a handful of
//! fixed formats. Anything missing or unparsable renders as a dash.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Placeholder for missing values
pub const MISSING: &str = "—";

const LONG_DATE: &str = "%B %d, %Y";
const LONG_DATE_TIME: &str = "%B %d, %Y %H:%M";
const SHORT_DATE: &str = "%b %d, %Y";
const DATE_TIME: &str = "%b %d, %Y %H:%M";
const TIME: &str = "%H:%M";

/// Value format of `<input type="date">`
pub const DATE_INPUT: &str = "%Y-%m-%d";
/// Value format of `<input type="datetime-local">`
pub const DATETIME_INPUT: &str = "%Y-%m-%dT%H:%M";

/// Parse an ISO timestamp, keeping the wall-clock time it was written in
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", DATETIME_INPUT] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, DATE_INPUT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn render(raw: Option<&str>, pattern: &str) -> String {
    raw.and_then(parse_timestamp)
        .map(|dt| dt.format(pattern).to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// "March 05, 2026"
pub fn long_date(raw: Option<&str>) -> String {
    render(raw, LONG_DATE)
}

/// "March 05, 2026 09:30"
pub fn long_date_time(raw: Option<&str>) -> String {
    render(raw, LONG_DATE_TIME)
}

/// "Mar 05, 2026"
pub fn short_date(raw: Option<&str>) -> String {
    render(raw, SHORT_DATE)
}

/// "Mar 05, 2026 09:30"
pub fn date_time(raw: Option<&str>) -> String {
    render(raw, DATE_TIME)
}

/// "09:30"
pub fn time_of_day(raw: Option<&str>) -> String {
    render(raw, TIME)
}

/// An availability slot's start as a `datetime-local` value
pub fn timestamp_to_input(raw: &str) -> Option<String> {
    parse_timestamp(raw).map(|dt| dt.format(DATETIME_INPUT).to_string())
}

/// Whole years between `dob` and `today`
pub fn age_on(dob: &str, today: NaiveDate) -> Option<i32> {
    let born = parse_timestamp(dob)?.date();
    if born > today {
        return None;
    }
    let mut years = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        years -= 1;
    }
    Some(years)
}

pub fn age(dob: Option<&str>) -> Option<i32> {
    dob.and_then(|d| age_on(d, today()))
}

/// "34 tahun", or a dash
pub fn age_label(dob: Option<&str>) -> String {
    age(dob)
        .map(|years| format!("{} tahun", years))
        .unwrap_or_else(|| MISSING.to_string())
}

const DAY_NAMES: [&str; 7] = ["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu"];
const MONTH_NAMES: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni",
    "Juli", "Agustus", "September", "Oktober", "November", "Desember",
];

/// "Jumat, 16 Oktober 2026" for the top bar
pub fn indonesian_date(date: NaiveDate) -> String {
    let day = DAY_NAMES[date.weekday().num_days_from_monday() as usize];
    let month = MONTH_NAMES[date.month0() as usize];
    format!("{}, {} {} {}", day, date.day(), month, date.year())
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Today as `YYYY-MM-DD`, the appointment list's default filter
pub fn today_input() -> String {
    today().format(DATE_INPUT).to_string()
}

/// Current local time as a `datetime-local` value
pub fn now_input() -> String {
    Local::now().naive_local().format(DATETIME_INPUT).to_string()
}

/// A date input read as midnight UTC, e.g. "1990-04-12T00:00:00.000Z"
pub fn date_input_to_iso(value: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(value.trim(), DATE_INPUT).ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// A datetime-local input read as wall-clock time in `zone`, sent as UTC
pub fn datetime_input_to_iso<Tz: TimeZone>(value: &str, zone: &Tz) -> Option<String> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), DATETIME_INPUT).ok()?;
    let local = zone.from_local_datetime(&naive).earliest()?;
    Some(local.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// [`datetime_input_to_iso`] in the browser's time zone
pub fn local_input_to_iso(value: &str) -> Option<String> {
    datetime_input_to_iso(value, &Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_formats() {
        let raw = Some("2026-03-05T09:30:00Z");
        assert_eq!(long_date(raw), "March 05, 2026");
        assert_eq!(long_date_time(raw), "March 05, 2026 09:30");
        assert_eq!(short_date(raw), "Mar 05, 2026");
        assert_eq!(date_time(raw), "Mar 05, 2026 09:30");
        assert_eq!(time_of_day(raw), "09:30");
    }

    #[test]
    fn test_offset_keeps_wall_clock() {
        assert_eq!(time_of_day(Some("2026-03-05T09:30:00+07:00")), "09:30");
        assert_eq!(short_date(Some("1990-04-12")), "Apr 12, 1990");
        assert_eq!(date_time(Some("2026-03-05T14:05:10.123")), "Mar 05, 2026 14:05");
        assert_eq!(timestamp_to_input("2026-03-05T09:30:00+07:00").as_deref(), Some("2026-03-05T09:30"));
    }

    #[test]
    fn test_missing_and_garbage() {
        assert_eq!(long_date(None), MISSING);
        assert_eq!(short_date(Some("")), MISSING);
        assert_eq!(date_time(Some("kemarin")), MISSING);
    }

    #[test]
    fn test_indonesian_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(indonesian_date(date), "Jumat, 16 Oktober 2026");
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(indonesian_date(date), "Minggu, 1 Maret 2026");
    }

    #[test]
    fn test_age_on() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(age_on("1990-03-05", today), Some(36));
        assert_eq!(age_on("1990-03-06", today), Some(35));
        assert_eq!(age_on("1990-03-06T00:00:00.000Z", today), Some(35));
        assert_eq!(age_on("2027-01-01", today), None);
        assert_eq!(age_on("n/a", today), None);
    }

    #[test]
    fn test_input_conversion() {
        assert_eq!(date_input_to_iso("1990-04-12").as_deref(), Some("1990-04-12T00:00:00.000Z"));
        assert_eq!(date_input_to_iso(""), None);

        let jakarta = FixedOffset::east_opt(7 * 3600).unwrap();
        assert_eq!(
            datetime_input_to_iso("2026-03-05T09:30", &jakarta).as_deref(),
            Some("2026-03-05T02:30:00.000Z")
        );
        assert_eq!(datetime_input_to_iso("2026-03-05T09:30", &Utc).as_deref(), Some("2026-03-05T09:30:00.000Z"));
        assert_eq!(datetime_input_to_iso("09:30", &Utc), None);
    }
}
