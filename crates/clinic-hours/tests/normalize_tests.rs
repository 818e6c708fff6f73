//! Tests for configuration normalization.
//!
//! Normalizers take arbitrary JSON and must never fail: bad entries are dropped
//! or defaulted, and the output always satisfies the structural invariants.

use chrono::{NaiveDate, Weekday};
use clinic_hours::{
    normalize_exceptions, normalize_holidays, normalize_time_of_day, normalize_weekly_schedule,
    HolidayCategory, TimeOfDay, WeeklyDayConfig, WeeklySchedule,
};
use serde_json::json;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn t(raw: &str) -> TimeOfDay {
    raw.parse().unwrap()
}

fn date(raw: &str) -> NaiveDate {
    raw.parse().unwrap()
}

// ── normalize_time_of_day ───────────────────────────────────────────────────

#[test]
fn time_of_day_keeps_valid_value() {
    assert_eq!(normalize_time_of_day(&json!("09:45"), t("08:00")), t("09:45"));
}

#[test]
fn time_of_day_falls_back_on_anything_else() {
    let fallback = t("08:00");
    for raw in [
        json!("25:99"),
        json!("9:45"),
        json!(""),
        json!(945),
        json!(null),
        json!(true),
        json!(["09:45"]),
    ] {
        assert_eq!(normalize_time_of_day(&raw, fallback), fallback, "input {raw}");
    }
}

// ── normalize_weekly_schedule ───────────────────────────────────────────────

#[test]
fn weekly_reads_all_seven_keys() {
    let raw = json!({
        "1": {"enabled": true, "openTime": "08:00", "closeTime": "14:00"},
        "2": {"enabled": true, "openTime": "09:00", "closeTime": "17:00"},
        "3": {"enabled": false, "openTime": "08:00", "closeTime": "12:00"},
        "4": {"enabled": true, "openTime": "10:00", "closeTime": "19:00"},
        "5": {"enabled": true, "openTime": "07:30", "closeTime": "16:30"},
        "6": {"enabled": false, "openTime": "08:00", "closeTime": "12:00"},
        "7": {"enabled": true, "openTime": "09:00", "closeTime": "11:00"},
    });
    let schedule = normalize_weekly_schedule(&raw);

    assert_eq!(
        *schedule.day(Weekday::Mon),
        WeeklyDayConfig::new(true, t("08:00"), t("14:00"))
    );
    assert!(!schedule.day(Weekday::Wed).enabled);
    assert_eq!(schedule.day(Weekday::Fri).open_time, t("07:30"));
    assert!(schedule.day(Weekday::Sun).enabled);
    assert_eq!(schedule.day(Weekday::Sun).close_time, t("11:00"));
}

#[test]
fn weekly_missing_keys_use_builtin_defaults() {
    let raw = json!({"1": {"enabled": false, "openTime": "08:00", "closeTime": "12:00"}});
    let schedule = normalize_weekly_schedule(&raw);

    assert!(!schedule.day(Weekday::Mon).enabled);
    for weekday in [Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sat, Weekday::Sun] {
        assert_eq!(*schedule.day(weekday), WeeklyDayConfig::builtin(weekday));
    }
}

#[test]
fn weekly_builtin_defaults_are_documented_values() {
    let schedule = WeeklySchedule::default();
    assert_eq!(
        *schedule.day(Weekday::Mon),
        WeeklyDayConfig::new(true, t("08:00"), t("18:00"))
    );
    assert_eq!(
        *schedule.day(Weekday::Sat),
        WeeklyDayConfig::new(true, t("08:00"), t("12:00"))
    );
    assert!(!schedule.day(Weekday::Sun).enabled);
}

#[test]
fn weekly_non_object_payload_yields_builtin_table() {
    for raw in [json!(null), json!([]), json!("weekly"), json!(7)] {
        assert_eq!(normalize_weekly_schedule(&raw), WeeklySchedule::default(), "input {raw}");
    }
}

#[test]
fn malformed_wednesday_falls_back_to_builtin_window() {
    // enabled is not a boolean and openTime is out of range.
    let raw = json!({"3": {"enabled": "yes", "openTime": "25:99"}});
    let schedule = normalize_weekly_schedule(&raw);

    assert_eq!(*schedule.day(Weekday::Wed), WeeklyDayConfig::builtin(Weekday::Wed));
}

#[test]
fn weekly_inverted_window_reverts_both_times() {
    // 16:00 is a valid close time on its own, but the pair is inverted, so
    // neither value survives.
    let raw = json!({"2": {"enabled": true, "openTime": "17:00", "closeTime": "16:00"}});
    let tuesday = *normalize_weekly_schedule(&raw).day(Weekday::Tue);

    assert!(tuesday.enabled);
    assert_eq!(tuesday.open_time, t("08:00"));
    assert_eq!(tuesday.close_time, t("18:00"));
}

#[test]
fn weekly_empty_window_reverts_both_times() {
    let raw = json!({"6": {"enabled": true, "openTime": "10:00", "closeTime": "10:00"}});
    let saturday = *normalize_weekly_schedule(&raw).day(Weekday::Sat);
    assert_eq!((saturday.open_time, saturday.close_time), (t("08:00"), t("12:00")));
}

#[test]
fn weekly_partial_entry_mixes_given_and_builtin_fields() {
    // Only closeTime given: open stays at the built-in 08:00.
    let raw = json!({"4": {"closeTime": "13:00"}});
    let thursday = *normalize_weekly_schedule(&raw).day(Weekday::Thu);
    assert!(thursday.enabled);
    assert_eq!((thursday.open_time, thursday.close_time), (t("08:00"), t("13:00")));
}

#[test]
fn weekly_accepts_snake_case_fields() {
    let raw = json!({"1": {"enabled": true, "open_time": "09:00", "close_time": "15:00"}});
    let monday = *normalize_weekly_schedule(&raw).day(Weekday::Mon);
    assert_eq!((monday.open_time, monday.close_time), (t("09:00"), t("15:00")));
}

#[test]
fn weekly_ignores_unknown_keys() {
    let raw = json!({"0": {"enabled": false}, "8": {"enabled": false}, "sunday": {"enabled": true}});
    assert_eq!(normalize_weekly_schedule(&raw), WeeklySchedule::default());
}

#[test]
fn weekly_serializes_keyed_one_to_seven() {
    let value = serde_json::to_value(WeeklySchedule::default()).unwrap();
    let map = value.as_object().unwrap();
    assert_eq!(map.len(), 7);
    assert_eq!(
        map["1"],
        json!({"enabled": true, "openTime": "08:00", "closeTime": "18:00"})
    );
    assert_eq!(map["7"]["enabled"], json!(false));
}

// ── normalize_holidays ──────────────────────────────────────────────────────

#[test]
fn holidays_accept_objects_and_plain_strings() {
    let raw = json!([
        {"date": "2024-12-25", "label": "Natal", "category": "national"},
        "2024-11-20",
    ]);
    let holidays = normalize_holidays(&raw);

    assert_eq!(holidays.len(), 2);
    let christmas = holidays.get(date("2024-12-25")).unwrap();
    assert_eq!(christmas.label, "Natal");
    assert_eq!(christmas.category, HolidayCategory::National);

    let plain = holidays.get(date("2024-11-20")).unwrap();
    assert_eq!(plain.label, "");
    assert_eq!(plain.category, HolidayCategory::Local);
}

#[test]
fn holidays_drop_invalid_dates() {
    let raw = json!([
        {"date": "2024-13-01", "label": "bad month"},
        {"date": "25/12/2024", "label": "wrong shape"},
        {"label": "no date"},
        {"date": 20241225},
        42,
        null,
        {"date": "2024-01-01", "label": "Ano Novo"},
    ]);
    let holidays = normalize_holidays(&raw);

    assert_eq!(holidays.len(), 1);
    assert!(holidays.contains(date("2024-01-01")));
}

#[test]
fn holidays_category_requires_exact_national() {
    let raw = json!([
        {"date": "2024-01-01", "category": "National"},
        {"date": "2024-01-02", "category": "national "},
        {"date": "2024-01-03", "category": "regional"},
        {"date": "2024-01-04", "category": 1},
        {"date": "2024-01-05", "category": "national"},
    ]);
    let categories: Vec<HolidayCategory> =
        normalize_holidays(&raw).iter().map(|h| h.category).collect();

    assert_eq!(
        categories,
        vec![
            HolidayCategory::Local,
            HolidayCategory::Local,
            HolidayCategory::Local,
            HolidayCategory::Local,
            HolidayCategory::National,
        ]
    );
}

#[test]
fn holidays_are_sorted_ascending() {
    let raw = json!(["2024-12-25", "2024-01-01", "2024-04-21", "2023-12-31"]);
    let dates: Vec<NaiveDate> = normalize_holidays(&raw).iter().map(|h| h.date).collect();
    assert_eq!(
        dates,
        vec![
            date("2023-12-31"),
            date("2024-01-01"),
            date("2024-04-21"),
            date("2024-12-25"),
        ]
    );
}

#[test]
fn holidays_duplicate_dates_keep_last_occurrence() {
    let raw = json!([
        {"date": "2024-12-25", "label": "first"},
        {"date": "2024-12-25", "label": "second"},
    ]);
    let holidays = normalize_holidays(&raw);
    assert_eq!(holidays.len(), 1);
    assert_eq!(holidays.get(date("2024-12-25")).unwrap().label, "second");
}

#[test]
fn holidays_non_array_payload_is_empty() {
    for raw in [json!(null), json!({"date": "2024-12-25"}), json!("2024-12-25")] {
        assert!(normalize_holidays(&raw).is_empty(), "input {raw}");
    }
}

#[test]
fn holidays_label_is_trimmed() {
    let raw = json!([{"date": "2024-12-25", "label": "  Natal  "}]);
    assert_eq!(normalize_holidays(&raw).get(date("2024-12-25")).unwrap().label, "Natal");
}

// ── normalize_exceptions ────────────────────────────────────────────────────

#[test]
fn exceptions_read_all_fields() {
    let raw = json!([
        {"date": "2024-12-25", "enabled": true, "openTime": "09:00", "closeTime": "11:00", "reason": "Plantão"},
    ]);
    let exceptions = normalize_exceptions(&raw);
    let e = exceptions.get(date("2024-12-25")).unwrap();

    assert!(e.enabled);
    assert_eq!((e.open_time, e.close_time), (t("09:00"), t("11:00")));
    assert_eq!(e.reason, "Plantão");
}

#[test]
fn exceptions_missing_fields_default() {
    let raw = json!([{"date": "2024-03-01"}]);
    let exceptions = normalize_exceptions(&raw);
    let e = exceptions.get(date("2024-03-01")).unwrap();

    assert!(e.enabled, "missing enabled defaults to true");
    assert_eq!((e.open_time, e.close_time), (t("08:00"), t("18:00")));
    assert_eq!(e.reason, "");
}

#[test]
fn exceptions_non_boolean_enabled_defaults_to_true() {
    let raw = json!([{"date": "2024-03-01", "enabled": "false"}]);
    assert!(normalize_exceptions(&raw).get(date("2024-03-01")).unwrap().enabled);
}

#[test]
fn exceptions_inverted_window_reverts_to_default_pair() {
    let raw = json!([{"date": "2024-03-01", "openTime": "12:00", "closeTime": "09:00"}]);
    let e = normalize_exceptions(&raw);
    let e = e.get(date("2024-03-01")).unwrap();
    assert_eq!((e.open_time, e.close_time), (t("08:00"), t("18:00")));
}

#[test]
fn exceptions_invalid_time_falls_back_per_field() {
    // Valid open, invalid close: close becomes 18:00, and 10:00 < 18:00 holds.
    let raw = json!([{"date": "2024-03-01", "openTime": "10:00", "closeTime": "99:00"}]);
    let e = normalize_exceptions(&raw);
    let e = e.get(date("2024-03-01")).unwrap();
    assert_eq!((e.open_time, e.close_time), (t("10:00"), t("18:00")));
}

#[test]
fn exceptions_drop_invalid_dates() {
    let raw = json!([
        {"date": "2024-02-30", "enabled": false},
        {"date": "tomorrow"},
        "2024-03-01",
        {"date": "2024-03-02", "enabled": false},
    ]);
    let exceptions = normalize_exceptions(&raw);
    assert_eq!(exceptions.len(), 1);
    assert!(exceptions.contains(date("2024-03-02")));
}

#[test]
fn exceptions_duplicate_dates_keep_last_occurrence() {
    let raw = json!([
        {"date": "2024-03-01", "enabled": false, "reason": "first"},
        {"date": "2024-03-01", "enabled": true, "reason": "second"},
    ]);
    let exceptions = normalize_exceptions(&raw);
    assert_eq!(exceptions.len(), 1);
    let e = exceptions.get(date("2024-03-01")).unwrap();
    assert!(e.enabled);
    assert_eq!(e.reason, "second");
}

#[test]
fn exceptions_are_sorted_ascending() {
    let raw = json!([{"date": "2024-05-01"}, {"date": "2024-01-15"}, {"date": "2024-03-10"}]);
    let dates: Vec<NaiveDate> = normalize_exceptions(&raw).iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![date("2024-01-15"), date("2024-03-10"), date("2024-05-01")]);
}

#[test]
fn exceptions_serialize_in_camel_case() {
    let raw = json!([{"date": "2024-03-01", "enabled": false, "reason": "Reforma"}]);
    let value = serde_json::to_value(normalize_exceptions(&raw)).unwrap();
    assert_eq!(
        value,
        json!([{
            "date": "2024-03-01",
            "enabled": false,
            "openTime": "08:00",
            "closeTime": "18:00",
            "reason": "Reforma"
        }])
    );
}

// ── Deserialize routes through normalization ────────────────────────────────

#[test]
fn deserializing_structures_never_fails_on_shape() {
    let weekly: WeeklySchedule = serde_json::from_str(r#"{"3": {"enabled": "yes"}}"#).unwrap();
    assert_eq!(weekly, WeeklySchedule::default());

    let holidays: clinic_hours::HolidaySet = serde_json::from_str(r#"[1, "x", "2024-12-25"]"#).unwrap();
    assert_eq!(holidays.len(), 1);

    let exceptions: clinic_hours::ExceptionTable = serde_json::from_str(r#"{"not": "a list"}"#).unwrap();
    assert!(exceptions.is_empty());
}
