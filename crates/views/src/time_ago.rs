//! Human readable distance between two instants.
//!
//! Buckets and wording follow the usual "distance in words" conventions:
//! under a minute reads "less than a minute", hours are "about", day counts
//! are exact, and spans over a year are "about", "over" or "almost" a number
//! of years depending on the leftover months.

use chrono::{DateTime, Datelike, Days, NaiveDate, Timelike, Utc};

const MINUTES_IN_DAY: f64 = 1440.0;
const MINUTES_IN_ALMOST_TWO_DAYS: f64 = 2520.0;
const MINUTES_IN_MONTH: f64 = 43200.0;
const MINUTES_IN_TWO_MONTHS: f64 = 86400.0;

/// Distance from `date` to `now` with a direction suffix.
///
/// Past dates read "5 minutes ago", future dates read "in 5 minutes".
#[must_use]
pub fn time_ago(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let distance = format_distance(date, now);
    if date > now {
        format!("in {distance}")
    } else {
        format!("{distance} ago")
    }
}

/// Distance between two instants in words, without direction.
#[must_use]
pub fn format_distance(date: DateTime<Utc>, base: DateTime<Utc>) -> String {
    let (earlier, later) = if date > base { (base, date) } else { (date, base) };

    let seconds = (later - earlier).num_seconds();
    let minutes = (seconds as f64 / 60.0).round();

    if minutes < 2.0 {
        return if minutes < 1.0 {
            "less than a minute".to_string()
        } else {
            "1 minute".to_string()
        };
    }
    if minutes < 45.0 {
        return plural(minutes as i64, "minute", "minutes");
    }
    if minutes < 90.0 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        let hours = (minutes / 60.0).round() as i64;
        return format!("about {}", plural(hours, "hour", "hours"));
    }
    if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        let days = (minutes / MINUTES_IN_DAY).round() as i64;
        return plural(days, "day", "days");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        let months = (minutes / MINUTES_IN_MONTH).round() as i64;
        return format!("about {}", plural(months, "month", "months"));
    }

    let months = difference_in_months(later, earlier);
    if months < 12 {
        let nearest = (minutes / MINUTES_IN_MONTH).round() as i64;
        return plural(nearest, "month", "months");
    }

    let leftover = months % 12;
    let years = months / 12;
    if leftover < 3 {
        format!("about {}", plural(years, "year", "years"))
    } else if leftover < 9 {
        format!("over {}", plural(years, "year", "years"))
    } else {
        format!("almost {}", plural(years + 1, "year", "years"))
    }
}

/// Whole months from `earlier` to `later`.
///
/// `later` is shifted back by the calendar month difference and compared
/// with `earlier`; the last month only counts when it is complete. A `later`
/// at the end of February is read as the 30th, so Jan 31 to Feb 29 counts
/// one month.
fn difference_in_months(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    let difference = i64::from(later.year() - earlier.year()) * 12
        + i64::from(later.month())
        - i64::from(earlier.month());
    if difference < 1 {
        return 0;
    }

    let day = if later.month() == 2 && later.day() > 27 {
        30
    } else {
        later.day()
    };
    let Some(anchor) = overflowing_date(later.year(), i64::from(later.month0()), day) else {
        return difference;
    };
    let shifted_month = i64::from(anchor.month0()) - difference;
    let Some(shifted) = overflowing_date(anchor.year(), shifted_month, anchor.day()) else {
        return difference;
    };

    let later_time = later.num_seconds_from_midnight();
    let mut last_month_not_full =
        (shifted, later_time) < (earlier.date_naive(), earlier.num_seconds_from_midnight());

    // One full calendar month ending on the last day of a month
    if difference == 1 && is_last_day_of_month(later.date_naive()) && later > earlier {
        last_month_not_full = false;
    }

    difference - i64::from(last_month_not_full)
}

/// The date `day` days into month `month0` (zero-based, may be out of range)
/// of `year`, rolling surplus months and days forward.
fn overflowing_date(year: i32, month0: i64, day: u32) -> Option<NaiveDate> {
    let total = i64::from(year) * 12 + month0;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_days(Days::new(u64::from(day.saturating_sub(1))))
}

fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt().is_some_and(|next| next.month() != date.month())
}

fn plural(count: i64, one: &str, many: &str) -> String {
    if count == 1 {
        format!("1 {one}")
    } else {
        format!("{count} {many}")
    }
}
