use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::api::models::{first_text_field, text_field, RawRow};

pub const WEEKDAYS_ES: [&str; 7] = [
    "Domingo",
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
];

pub const SATURDAY_ENTRY_TIME: &str = "08:00:00";
pub const WEEKDAY_ENTRY_TIME: &str = "17:00:00";
pub const LATE_LABEL: &str = "Atraso";
pub const ON_TIME_LABEL: &str = "A tiempo";

const DATE_KEYS: [&str; 2] = ["fecha", "date"];
const RECORDED_TIME_KEYS: [&str; 2] = ["hora_registro", "time"];
const STATUS_KEYS: [&str; 2] = ["novedad", "estado"];
const ENTRY_TIME_KEY: &str = "hora_entrada";
const LATE_MARKER: &str = "atraso";

/// Canonical display shape of one attendance mark.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub user: String,
    pub weekday: String,
    pub date: String,
    pub recorded_time: String,
    pub entry_time: String,
    pub status: String,
    pub is_late: bool,
}

pub fn weekday_label(weekday: Weekday) -> &'static str {
    WEEKDAYS_ES[weekday.num_days_from_sunday() as usize]
}

/// Saturday classes start in the morning; every other day is the evening shift.
pub fn default_entry_time(weekday: Weekday) -> &'static str {
    if weekday == Weekday::Sat {
        SATURDAY_ENTRY_TIME
    } else {
        WEEKDAY_ENTRY_TIME
    }
}

/// Pads `H:M[:S]` to `HH:MM:SS`. Anything that doesn't fit that pattern is
/// returned as-is.
pub fn normalize_time(raw: &str) -> String {
    let parts: Vec<&str> = raw.split(':').collect();
    let well_formed = (2..=3).contains(&parts.len())
        && parts
            .iter()
            .all(|part| (1..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return raw.to_string();
    }

    let hours = parts[0];
    let minutes = parts[1];
    let seconds = parts.get(2).copied().unwrap_or("0");
    format!("{hours:0>2}:{minutes:0>2}:{seconds:0>2}")
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

pub fn is_late_status(status: &str) -> bool {
    status.to_lowercase().contains(LATE_MARKER)
}

/// Builds one display record from a raw server row.
///
/// `today` stands in for rows without a date when picking the default entry
/// time; such rows get an empty weekday label.
pub fn normalize_row(row: &RawRow, display_name: &str, today: NaiveDate) -> AttendanceRecord {
    let date = first_text_field(row, &DATE_KEYS).unwrap_or_default();
    let status = first_text_field(row, &STATUS_KEYS).unwrap_or_default();
    let recorded = first_text_field(row, &RECORDED_TIME_KEYS).unwrap_or_default();

    let (weekday, default_entry) = if date.is_empty() {
        (String::new(), default_entry_time(today.weekday()))
    } else {
        match parse_date(&date) {
            Some(parsed) => (
                weekday_label(parsed.weekday()).to_string(),
                default_entry_time(parsed.weekday()),
            ),
            None => (String::new(), WEEKDAY_ENTRY_TIME),
        }
    };

    // Only an absent or null `hora_entrada` gets the default; a blank one
    // renders blank.
    let entry_time = text_field(row, ENTRY_TIME_KEY)
        .map(|value| normalize_time(&value))
        .unwrap_or_else(|| default_entry.to_string());

    let is_late = is_late_status(&status);
    let status = match (status.is_empty(), is_late) {
        (true, true) => LATE_LABEL.to_string(),
        (true, false) => ON_TIME_LABEL.to_string(),
        (false, _) => status,
    };

    AttendanceRecord {
        user: display_name.to_string(),
        weekday,
        date,
        recorded_time: normalize_time(&recorded),
        entry_time,
        status,
        is_late,
    }
}

pub fn normalize_rows(rows: &[RawRow], display_name: &str, today: NaiveDate) -> Vec<AttendanceRecord> {
    rows.iter()
        .map(|row| normalize_row(row, display_name, today))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn row(value: Value) -> RawRow {
        match value {
            Value::Object(map) => map,
            _ => panic!("test rows must be objects"),
        }
    }

    fn a_tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 7).unwrap()
    }

    #[test]
    fn pads_short_times() {
        assert_eq!(normalize_time("9:5"), "09:05:00");
        assert_eq!(normalize_time("8:0"), "08:00:00");
        assert_eq!(normalize_time("7:30:2"), "07:30:02");
    }

    #[test]
    fn leaves_well_formed_and_malformed_times_alone() {
        assert_eq!(normalize_time("23:59:59"), "23:59:59");
        assert_eq!(normalize_time("abc"), "abc");
        assert_eq!(normalize_time("123:00"), "123:00");
        assert_eq!(normalize_time("12"), "12");
        assert_eq!(normalize_time("1:2:3:4"), "1:2:3:4");
        assert_eq!(normalize_time(""), "");
    }

    #[test]
    fn both_field_conventions_produce_the_same_record() {
        let spanish = row(json!({ "fecha": "2024-05-04", "hora_registro": "8:0", "novedad": "Atraso" }));
        let english = row(json!({ "date": "2024-05-04", "time": "8:0", "estado": "Atraso" }));

        let a = normalize_row(&spanish, "GOMEZ MARCO", a_tuesday());
        let b = normalize_row(&english, "GOMEZ MARCO", a_tuesday());

        assert_eq!(a, b);
        assert_eq!(a.weekday, "Sábado");
        assert_eq!(a.recorded_time, "08:00:00");
        assert!(a.is_late);
        assert_eq!(a.user, "GOMEZ MARCO");
    }

    #[test]
    fn entry_time_defaults_by_weekday() {
        let saturday = normalize_row(&row(json!({ "fecha": "2024-05-04" })), "", a_tuesday());
        assert_eq!(saturday.entry_time, "08:00:00");

        let monday = normalize_row(&row(json!({ "fecha": "2024-05-06" })), "", a_tuesday());
        assert_eq!(monday.weekday, "Lunes");
        assert_eq!(monday.entry_time, "17:00:00");
    }

    #[test]
    fn supplied_entry_time_is_normalized() {
        let record = normalize_row(
            &row(json!({ "fecha": "2024-05-04", "hora_entrada": "7:5" })),
            "",
            a_tuesday(),
        );
        assert_eq!(record.entry_time, "07:05:00");

        let blank = normalize_row(
            &row(json!({ "fecha": "2024-05-04", "hora_entrada": "" })),
            "",
            a_tuesday(),
        );
        assert_eq!(blank.entry_time, "");

        let null = normalize_row(
            &row(json!({ "fecha": "2024-05-04", "hora_entrada": null })),
            "",
            a_tuesday(),
        );
        assert_eq!(null.entry_time, "08:00:00");
    }

    #[test]
    fn missing_date_falls_back_to_today_for_entry_time() {
        let saturday_today = NaiveDate::from_ymd_opt(2024, 5, 11).unwrap();
        let record = normalize_row(&row(json!({ "hora_registro": "18:01" })), "", saturday_today);
        assert_eq!(record.weekday, "");
        assert_eq!(record.entry_time, "08:00:00");
    }

    #[test]
    fn unparseable_date_uses_evening_entry_time() {
        let record = normalize_row(&row(json!({ "fecha": "04/05/2024" })), "", a_tuesday());
        assert_eq!(record.weekday, "");
        assert_eq!(record.date, "04/05/2024");
        assert_eq!(record.entry_time, "17:00:00");
    }

    #[test]
    fn status_label_defaults_and_lateness_is_case_insensitive() {
        let silent = normalize_row(&row(json!({ "fecha": "2024-05-06" })), "", a_tuesday());
        assert_eq!(silent.status, "A tiempo");
        assert!(!silent.is_late);

        let shouting = normalize_row(
            &row(json!({ "fecha": "2024-05-06", "estado": "ATRASO 10 min" })),
            "",
            a_tuesday(),
        );
        assert_eq!(shouting.status, "ATRASO 10 min");
        assert!(shouting.is_late);
    }

    #[test]
    fn spanish_field_wins_when_both_present() {
        let record = normalize_row(
            &row(json!({ "fecha": "2024-05-06", "date": "2024-05-04", "novedad": "", "estado": "Atraso" })),
            "",
            a_tuesday(),
        );
        assert_eq!(record.weekday, "Lunes");
        assert_eq!(record.status, "A tiempo");
    }
}
