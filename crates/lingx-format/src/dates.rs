//! Date and time preset rendering

use crate::ast::DateTimePreset;
use chrono::{DateTime, Datelike, Timelike, Utc};

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const MONTHS_ABBR_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const WEEKDAYS_EN: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

const MONTHS_DE: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
    "Oktober", "November", "Dezember",
];
const WEEKDAYS_DE: [&str; 7] = [
    "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag",
];

const MONTHS_FR: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];
const WEEKDAYS_FR: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];

const MONTHS_ES: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
    "octubre", "noviembre", "diciembre",
];
const WEEKDAYS_ES: [&str; 7] = [
    "lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo",
];

fn month_full(language: &str, month0: usize) -> &'static str {
    match language {
        "de" => MONTHS_DE[month0],
        "fr" => MONTHS_FR[month0],
        "es" => MONTHS_ES[month0],
        _ => MONTHS_EN[month0],
    }
}

fn month_abbr(language: &str, month0: usize) -> String {
    match language {
        "en" => MONTHS_ABBR_EN[month0].to_string(),
        // Romance and Germanic abbreviations: truncated full name with a dot
        _ => {
            let full = month_full(language, month0);
            let abbr: String = full.chars().take(3).collect();
            format!("{}.", abbr)
        }
    }
}

fn weekday(language: &str, weekday0: usize) -> &'static str {
    match language {
        "de" => WEEKDAYS_DE[weekday0],
        "fr" => WEEKDAYS_FR[weekday0],
        "es" => WEEKDAYS_ES[weekday0],
        _ => WEEKDAYS_EN[weekday0],
    }
}

/// Render a date according to a named preset
pub fn format_date(language: &str, value: &DateTime<Utc>, preset: DateTimePreset) -> String {
    let (year, month, day) = (value.year(), value.month() as usize, value.day());
    let month0 = month - 1;
    let weekday0 = value.weekday().num_days_from_monday() as usize;

    match (language, preset) {
        ("de", DateTimePreset::Short) => format!("{:02}.{:02}.{:02}", day, month, year % 100),
        ("de", DateTimePreset::Medium) => format!("{:02}.{:02}.{}", day, month, year),
        ("de", DateTimePreset::Long) => {
            format!("{}. {} {}", day, month_full(language, month0), year)
        }
        ("de", DateTimePreset::Full) => format!(
            "{}, {}. {} {}",
            weekday(language, weekday0),
            day,
            month_full(language, month0),
            year
        ),

        ("fr", DateTimePreset::Short) => format!("{:02}/{:02}/{}", day, month, year),
        ("fr", DateTimePreset::Medium) => {
            format!("{} {} {}", day, month_abbr(language, month0), year)
        }
        ("fr", DateTimePreset::Long) => {
            format!("{} {} {}", day, month_full(language, month0), year)
        }
        ("fr", DateTimePreset::Full) => format!(
            "{} {} {} {}",
            weekday(language, weekday0),
            day,
            month_full(language, month0),
            year
        ),

        ("es", DateTimePreset::Short) => format!("{}/{}/{:02}", day, month, year % 100),
        ("es", DateTimePreset::Medium) => {
            format!("{} {} {}", day, month_abbr(language, month0), year)
        }
        ("es", DateTimePreset::Long) => {
            format!("{} de {} de {}", day, month_full(language, month0), year)
        }
        ("es", DateTimePreset::Full) => format!(
            "{}, {} de {} de {}",
            weekday(language, weekday0),
            day,
            month_full(language, month0),
            year
        ),

        (_, DateTimePreset::Short) => format!("{}/{}/{:02}", month, day, year % 100),
        (_, DateTimePreset::Medium) => {
            format!("{} {}, {}", month_abbr(language, month0), day, year)
        }
        (_, DateTimePreset::Long) => {
            format!("{} {}, {}", month_full(language, month0), day, year)
        }
        (_, DateTimePreset::Full) => format!(
            "{}, {} {}, {}",
            weekday(language, weekday0),
            month_full(language, month0),
            day,
            year
        ),
    }
}

/// Render a time of day according to a named preset
pub fn format_time(language: &str, value: &DateTime<Utc>, preset: DateTimePreset) -> String {
    let (hour, minute, second) = (value.hour(), value.minute(), value.second());

    let twelve_hour = matches!(language, "en");
    let body = if twelve_hour {
        let meridiem = if hour < 12 { "AM" } else { "PM" };
        let display_hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        match preset {
            DateTimePreset::Short => format!("{}:{:02} {}", display_hour, minute, meridiem),
            _ => format!("{}:{:02}:{:02} {}", display_hour, minute, second, meridiem),
        }
    } else {
        match preset {
            DateTimePreset::Short => format!("{:02}:{:02}", hour, minute),
            _ => format!("{:02}:{:02}:{:02}", hour, minute, second),
        }
    };

    match preset {
        DateTimePreset::Long | DateTimePreset::Full => format!("{} UTC", body),
        _ => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> DateTime<Utc> {
        // Monday, 2024-01-15 14:30:05 UTC
        Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 5).unwrap()
    }

    #[test]
    fn test_english_date_presets() {
        let dt = sample();
        assert_eq!(format_date("en", &dt, DateTimePreset::Short), "1/15/24");
        assert_eq!(format_date("en", &dt, DateTimePreset::Medium), "Jan 15, 2024");
        assert_eq!(format_date("en", &dt, DateTimePreset::Long), "January 15, 2024");
        assert_eq!(
            format_date("en", &dt, DateTimePreset::Full),
            "Monday, January 15, 2024"
        );
    }

    #[test]
    fn test_german_date_presets() {
        let dt = sample();
        assert_eq!(format_date("de", &dt, DateTimePreset::Short), "15.01.24");
        assert_eq!(format_date("de", &dt, DateTimePreset::Medium), "15.01.2024");
        assert_eq!(format_date("de", &dt, DateTimePreset::Long), "15. Januar 2024");
        assert_eq!(
            format_date("de", &dt, DateTimePreset::Full),
            "Montag, 15. Januar 2024"
        );
    }

    #[test]
    fn test_spanish_long_date() {
        let dt = sample();
        assert_eq!(
            format_date("es", &dt, DateTimePreset::Long),
            "15 de enero de 2024"
        );
    }

    #[test]
    fn test_time_presets() {
        let dt = sample();
        assert_eq!(format_time("en", &dt, DateTimePreset::Short), "2:30 PM");
        assert_eq!(format_time("en", &dt, DateTimePreset::Medium), "2:30:05 PM");
        assert_eq!(format_time("en", &dt, DateTimePreset::Long), "2:30:05 PM UTC");
        assert_eq!(format_time("de", &dt, DateTimePreset::Short), "14:30");
        assert_eq!(format_time("de", &dt, DateTimePreset::Full), "14:30:05 UTC");
    }

    #[test]
    fn test_midnight_and_noon() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 15, 0, 5, 0).unwrap();
        let noon = Utc.with_ymd_and_hms(2024, 1, 15, 12, 5, 0).unwrap();
        assert_eq!(format_time("en", &midnight, DateTimePreset::Short), "12:05 AM");
        assert_eq!(format_time("en", &noon, DateTimePreset::Short), "12:05 PM");
    }
}
