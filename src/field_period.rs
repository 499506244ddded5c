// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Human-readable field periods derived from questionnaire names.
//!
//! Questionnaire names follow `TLA` + `YY` + `MM` + suffix, e.g. `OPN2004A`
//! is the April 2020 field period of the OPN survey.

/// Returned when the month digits do not name a calendar month.
pub const FIELD_PERIOD_UNKNOWN: &str = "Field period unknown";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const YEAR_OFFSET: usize = 3;
const MONTH_OFFSET: usize = 5;

/// Format the field period encoded in a questionnaire name as "Month Year".
///
/// The year digits are taken verbatim, so `XXXXX05` gives `May 20XX`.
pub fn field_period_to_text(name: &str) -> String {
    let Some(month) = month_name(&substr(name, MONTH_OFFSET, 2)) else {
        return FIELD_PERIOD_UNKNOWN.to_string();
    };

    format!("{month} 20{}", substr(name, YEAR_OFFSET, 2))
}

fn month_name(digits: &str) -> Option<&'static str> {
    let month: usize = digits.trim().parse().ok()?;
    MONTH_NAMES.get(month.checked_sub(1)?).copied()
}

/// Character-based substring that clamps to the end of the input.
fn substr(value: &str, start: usize, len: usize) -> String {
    value.chars().skip(start).take(len).collect()
}
