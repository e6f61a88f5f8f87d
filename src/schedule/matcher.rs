use chrono::{Datelike, Days, Months, NaiveDate};
use log::debug;

use crate::models::WeekRecord;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Month number (1-12) for an English month name or an abbreviation of at
/// least three letters ("Sep", "Sept", "September").
pub fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.trim().to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|full| full.starts_with(&lower))
        .map(|idx| idx as u32 + 1)
}

/// Resolve a `"<day>-<month>"` string against `year`. Returns `None` when the
/// day is not numeric or the month is unknown. Days past the end of the month
/// roll into the next one (`29-Feb` in 2025 is 1 March) and day 0 is the last
/// day of the previous month.
pub fn parse_day_month(s: &str, year: i32) -> Option<NaiveDate> {
    let mut parts = s.split('-').map(str::trim);
    let day: u64 = parts.next()?.parse().ok()?;
    let month = month_from_name(parts.next()?)?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    match day {
        0 => first.checked_sub_days(Days::new(1)),
        _ => first.checked_add_days(Days::new(day - 1)),
    }
}

/// Index of the first week whose span contains `today`, trying the previous,
/// current and next calendar year for each week.
pub fn find_index_for_date<P>(today: NaiveDate, weeks: &[WeekRecord<P>]) -> Option<usize> {
    let year_now = today.year();

    for (i, week) in weeks.iter().enumerate() {
        for year in [year_now - 1, year_now, year_now + 1] {
            let (Some(from), Some(mut to)) = (
                parse_day_month(&week.from, year),
                parse_day_month(&week.to, year),
            ) else {
                continue;
            };
            // Dec → Jan span
            if to < from {
                match to.checked_add_months(Months::new(12)) {
                    Some(next) => to = next,
                    None => continue,
                }
            }
            if from <= today && today <= to {
                debug!("{} falls in week {} ({} — {})", today, i, from, to);
                return Some(i);
            }
        }
    }
    None
}
