//! Due date input parsing.
//!
//! Dates typed into the form or passed on the command line are normalised to
//! `YYYY-MM-DD` when they are recognised. Anything else is kept as typed.

use chrono::{Datelike, Duration, Local, NaiveDate};

/// Parse human-readable due date input relative to `today`.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - weekday names ("friday", "fri"), "next friday", "this friday"
/// - "in 3d", "in 2w"
/// - "YYYY-MM-DD" format
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return today.succ_opt(),
        "yesterday" => return today.pred_opt(),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                // Out of range offsets fall through and stay as typed.
                if let Some(date) = offset(today, Duration::try_days(days)) {
                    return Some(date);
                }
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                if let Some(date) = offset(today, Duration::try_weeks(weeks)) {
                    return Some(date);
                }
            }
        }
    }

    let weekdays = [
        ("monday", 0), ("tuesday", 1), ("wednesday", 2), ("thursday", 3),
        ("friday", 4), ("saturday", 5), ("sunday", 6),
        ("mon", 0), ("tue", 1), ("wed", 2), ("thu", 3),
        ("fri", 4), ("sat", 5), ("sun", 6),
    ];

    let current_day = today.weekday().num_days_from_monday() as i64;
    for (day_name, target_day) in weekdays {
        let days_ahead = (target_day + 7 - current_day) % 7;
        if s == day_name || s == format!("this {day_name}") {
            return offset(today, Duration::try_days(days_ahead));
        }
        if s == format!("next {day_name}") {
            let days_to_add = if days_ahead == 0 { 7 } else { days_ahead + 7 };
            return offset(today, Duration::try_days(days_to_add));
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

fn offset(today: NaiveDate, delta: Option<Duration>) -> Option<NaiveDate> {
    today.checked_add_signed(delta?)
}

/// Normalise a date field value for storage.
pub fn normalise_date_input(s: &str) -> String {
    normalise_date_input_on(s, Local::now().date_naive())
}

/// As `normalise_date_input`, relative to a fixed day.
pub fn normalise_date_input_on(s: &str, today: NaiveDate) -> String {
    match parse_due_input(s, today) {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => s.trim().to_string(),
    }
}
