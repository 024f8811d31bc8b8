use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use chrono_tz::Tz;

use crate::model::{HOUR_MS, Ms};

// ── Time arithmetic ───────────────────────────────────────────────
//
// Every boundary computation here observes wall-clock time in the listing's
// configured zone, never the process-local one. Inputs and outputs are
// absolute Unix millis; zones only matter while truncating.
//
// All functions are non-throwing: instants chrono cannot represent (out of
// range, or wall-clock times swallowed by a DST gap with no later fallback)
// come back as `None`, and callers skip rather than fail.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryUnit {
    Hour,
    Day,
    Week,
    Month,
}

/// Parse an IANA zone name, falling back to UTC for unknown names.
pub fn parse_tz(name: &str) -> Tz {
    name.parse().unwrap_or(chrono_tz::UTC)
}

pub(crate) fn to_local(t: Ms, tz: Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp_millis(t).map(|dt| dt.with_timezone(&tz))
}

/// Resolve a wall-clock datetime to an absolute instant in `tz`.
///
/// Ambiguous times (DST fall-back) take the earlier instant; nonexistent
/// times (DST spring-forward) resolve to the first valid instant after the
/// jump.
pub(crate) fn localize_naive(naive: NaiveDateTime, tz: Tz) -> Option<Ms> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.timestamp_millis()),
        LocalResult::Ambiguous(dt, _) => Some(dt.timestamp_millis()),
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.timestamp_millis()),
    }
}

/// Resolve a `"HH:MM"` wall-clock time on a calendar date to an absolute
/// instant in `tz`.
pub fn parse_localized_time(date: NaiveDate, time: &str, tz: Tz) -> Option<Ms> {
    let t = NaiveTime::parse_from_str(time, "%H:%M").ok()?;
    localize_naive(date.and_time(t), tz)
}

/// Start of the `unit` containing `t`, observed in `tz`, shifted by `offset`
/// units. Idempotent at offset 0: feeding the result back in yields the same
/// instant.
pub fn start_of(t: Ms, unit: BoundaryUnit, tz: Tz, offset: i64) -> Option<Ms> {
    let local = to_local(t, tz)?;
    match unit {
        BoundaryUnit::Hour => {
            // Hour boundaries are fixed-width in absolute time; truncate once
            // in local time, then shift by whole hours.
            let trunc = local.with_minute(0)?.with_second(0)?.with_nanosecond(0)?;
            Some(trunc.timestamp_millis() + offset * HOUR_MS)
        }
        BoundaryUnit::Day => {
            let date = local.date_naive() + Duration::days(offset);
            localize_naive(date.and_hms_opt(0, 0, 0)?, tz)
        }
        BoundaryUnit::Week => {
            let monday = local.date_naive()
                - Duration::days(local.weekday().num_days_from_monday() as i64);
            let date = monday + Duration::days(7 * offset);
            localize_naive(date.and_hms_opt(0, 0, 0)?, tz)
        }
        BoundaryUnit::Month => {
            let months = local.year() as i64 * 12 + local.month0() as i64 + offset;
            let date =
                NaiveDate::from_ymd_opt(months.div_euclid(12) as i32, months.rem_euclid(12) as u32 + 1, 1)?;
            localize_naive(date.and_hms_opt(0, 0, 0)?, tz)
        }
    }
}

/// Smallest instant ≥ `t` aligned to a `unit` boundary in `tz`.
pub fn next_boundary(t: Ms, unit: BoundaryUnit, tz: Tz) -> Option<Ms> {
    let base = start_of(t, unit, tz, 0)?;
    if base == t { Some(t) } else { start_of(t, unit, tz, 1) }
}

/// Half-open interval test `[start, end)`.
pub fn is_in_range(t: Ms, start: Ms, end: Ms) -> bool {
    start <= t && t < end
}

/// Half-open interval test truncated to day granularity in `tz` — a "day"
/// check that ignores time-of-day on all three arguments.
pub fn is_day_in_range(t: Ms, start: Ms, end: Ms, tz: Tz) -> bool {
    let day = |x| start_of(x, BoundaryUnit::Day, tz, 0);
    match (day(t), day(start), day(end)) {
        (Some(d), Some(s), Some(e)) => s <= d && d < e,
        _ => false,
    }
}

/// Non-strict ordering predicate — the pervasive "constraint already
/// satisfied" tie-break.
pub fn is_same_or_after(a: Ms, b: Ms) -> bool {
    a >= b
}

/// ISO calendar-day identifier (`YYYY-MM-DD`) of `t` observed in `tz`.
pub fn day_id(t: Ms, tz: Tz) -> Option<String> {
    to_local(t, tz).map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// Wall-clock `HH:MM` label of `t` observed in `tz`.
pub fn time_label(t: Ms, tz: Tz) -> Option<String> {
    to_local(t, tz).map(|dt| dt.format("%H:%M").to_string())
}
