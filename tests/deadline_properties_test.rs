use chrono::{DateTime, TimeZone, Timelike};
use chrono_tz::America::Bogota;
use chrono_tz::Tz;
use sla_hours::{
    business_hours_between, calculate_deadline, DeadlineResponse, HolidaySet, SlaError,
    WorkingHoursConfig,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
    Bogota.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn deadline(start: DateTime<Tz>, hours: f64, holidays: &HolidaySet) -> DateTime<Tz> {
    calculate_deadline(&start, hours, holidays, &WorkingHoursConfig::default()).unwrap()
}

#[test]
fn test_documented_scenarios() {
    let none = HolidaySet::new();
    let tuesday_off = HolidaySet::parse(["2025-03-11"]).unwrap();

    // (start, hours, holidays, expected)
    let cases = [
        (at(2025, 3, 7, 17, 0), 2.0, &none, at(2025, 3, 10, 9, 0)),
        (at(2025, 3, 10, 8, 0), 12.0, &tuesday_off, at(2025, 3, 12, 10, 0)),
        (at(2025, 3, 10, 6, 0), 1.0, &none, at(2025, 3, 10, 9, 0)),
        (at(2025, 3, 10, 19, 0), 1.0, &none, at(2025, 3, 11, 9, 0)),
        (at(2025, 3, 10, 18, 0), 1.0, &none, at(2025, 3, 11, 9, 0)),
    ];

    for (start, hours, holidays, expected) in cases {
        assert_eq!(deadline(start, hours, holidays), expected, "start {}", start);
    }
}

#[test]
fn test_holiday_then_weekend_run() {
    // 星期五與星期一都放假，連同中間的週末一次跳過
    let holidays = HolidaySet::parse(["2025-12-05", "2025-12-08"]).unwrap();
    let thursday = at(2025, 12, 4, 17, 0);
    assert_eq!(deadline(thursday, 3.0, &holidays), at(2025, 12, 9, 10, 0));
}

#[test]
fn test_monotonic_over_long_horizon() {
    let holidays = HolidaySet::parse(["2025-03-24", "2025-04-17", "2025-04-18", "2025-05-01"]).unwrap();
    let start = at(2025, 3, 20, 13, 37);
    let mut previous = deadline(start, 0.0, &holidays);
    assert_eq!(previous, start);

    for quarter in 1..=800 {
        let hours = quarter as f64 * 0.25;
        let next = deadline(start, hours, &holidays);
        assert!(next >= previous, "deadline for {}h moved backwards", hours);
        previous = next;
    }
}

#[test]
fn test_deadline_always_inside_working_window() {
    let holidays = HolidaySet::parse(["2025-03-24"]).unwrap();
    let config = WorkingHoursConfig::default();
    let start = at(2025, 3, 21, 21, 15);

    for hours in [0.5, 1.0, 9.5, 10.0, 10.5, 25.0, 49.75] {
        let result = deadline(start, hours, &holidays);
        let elapsed = business_hours_between(&start, &result, &holidays, &config).unwrap();
        assert!((elapsed - hours).abs() < 1e-6, "{}h measured as {}", hours, elapsed);
        assert!(sla_hours::is_working_day(result.date_naive(), &holidays));
        assert!(result.hour() >= config.start_hour, "{} before opening", result);
        let closing = Bogota
            .from_local_datetime(&result.date_naive().and_hms_opt(config.end_hour, 0, 0).unwrap())
            .unwrap();
        assert!(result <= closing, "{} after closing", result);
    }
}

#[test]
fn test_rejections() {
    let start = at(2025, 3, 10, 9, 0);
    let holidays = HolidaySet::new();

    let same = WorkingHoursConfig { start_hour: 9, end_hour: 9 };
    assert!(matches!(
        calculate_deadline(&start, 1.0, &holidays, &same),
        Err(SlaError::ConfigurationError { start_hour: 9, end_hour: 9 })
    ));
    assert!(matches!(
        calculate_deadline(&start, -0.01, &holidays, &WorkingHoursConfig::default()),
        Err(SlaError::InvalidDurationError { .. })
    ));
}

#[test]
fn test_far_dates_are_valid() {
    let holidays = HolidaySet::parse(["1999-01-01"]).unwrap();
    // 1900-01-01 是星期一
    let old = at(1900, 1, 1, 8, 0);
    assert_eq!(deadline(old, 10.0, &holidays), at(1900, 1, 1, 18, 0));

    let future = at(2199, 12, 31, 17, 0);
    let result = deadline(future, 1.0, &holidays);
    assert!(result > future);
}

#[test]
fn test_response_wire_format() {
    let response = DeadlineResponse {
        id: "doc-1".to_string(),
        start: DateTime::parse_from_rfc3339("2025-03-07T17:00:00-05:00").unwrap(),
        hours: 2.0,
        deadline: deadline(at(2025, 3, 7, 17, 0), 2.0, &HolidaySet::new()).fixed_offset(),
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["deadline"], "2025-03-10T09:00:00-05:00");
    assert_eq!(json["hours"], 2.0);

    let back: DeadlineResponse = serde_json::from_value(json).unwrap();
    assert_eq!(back, response);
}
