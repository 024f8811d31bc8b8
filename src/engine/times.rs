use chrono_tz::Tz;

use crate::model::{HourOption, Ms, TimeSlot};

use super::merge::combine_slots;
use super::slots::SlotMap;
use super::timeutil::{BoundaryUnit, day_id, next_boundary, start_of, time_label};

// ── Hour enumeration ──────────────────────────────────────────────

fn hour_option(t: Ms, tz: Tz) -> Option<HourOption> {
    time_label(t, tz).map(|time_of_day| HourOption {
        time_of_day,
        timestamp: t,
    })
}

/// Hour boundaries inside `[start, end)` that leave room for at least one
/// full hour — the legal booking *starts*. A 09:00–17:00 range yields
/// 09:00..=16:00.
pub fn start_hours(start: Ms, end: Ms, tz: Tz) -> Vec<HourOption> {
    let mut out = Vec::new();
    let Some(mut h) = next_boundary(start, BoundaryUnit::Hour, tz) else {
        return out;
    };
    while let Some(next) = start_of(h, BoundaryUnit::Hour, tz, 1) {
        if next > end {
            break;
        }
        out.extend(hour_option(h, tz));
        h = next;
    }
    out
}

/// Hour boundaries strictly after `start`, up to and including `end` — the
/// legal booking *ends*. A start of 09:00 in a range closing 17:00 yields
/// 10:00..=17:00.
pub fn end_hours(start: Ms, end: Ms, tz: Tz) -> Vec<HourOption> {
    let mut out = Vec::new();
    let Some(aligned) = next_boundary(start, BoundaryUnit::Hour, tz) else {
        return out;
    };
    let first = if aligned == start {
        start_of(start, BoundaryUnit::Hour, tz, 1)
    } else {
        Some(aligned)
    };
    let Some(mut h) = first else {
        return out;
    };
    loop {
        if h > end {
            break;
        }
        out.extend(hour_option(h, tz));
        match start_of(h, BoundaryUnit::Hour, tz, 1) {
            Some(next) => h = next,
            None => break,
        }
    }
    out
}

/// Every aligned hour in `[start, end]`, both endpoints included when
/// aligned. Used for multi-day full-day end boundaries.
pub fn sharp_hours(start: Ms, end: Ms, tz: Tz) -> Vec<HourOption> {
    let mut out = Vec::new();
    let Some(mut h) = next_boundary(start, BoundaryUnit::Hour, tz) else {
        return out;
    };
    loop {
        if h > end {
            break;
        }
        out.extend(hour_option(h, tz));
        match start_of(h, BoundaryUnit::Hour, tz, 1) {
            Some(next) => h = next,
            None => break,
        }
    }
    out
}

// ── Start/end time resolution ─────────────────────────────────────

/// Legal start hours on the selected start date. Each slot covering the day
/// is clipped to `[max(day start, slot start), min(next day, slot end))`
/// before enumeration. No selection or no slots ⇒ empty, never an error.
pub fn available_start_times(map: &SlotMap, booking_start: Option<Ms>, tz: Tz) -> Vec<HourOption> {
    let Some(bs) = booking_start else {
        return Vec::new();
    };
    let Some(day) = day_id(bs, tz) else {
        return Vec::new();
    };
    let Some(slots) = map.get(&day) else {
        return Vec::new();
    };
    let (Some(day_start), Some(next_day)) = (
        start_of(bs, BoundaryUnit::Day, tz, 0),
        start_of(bs, BoundaryUnit::Day, tz, 1),
    ) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for slot in slots {
        let lo = slot.span.start.max(day_start);
        let hi = slot.span.end.min(next_day);
        if lo < hi {
            out.extend(start_hours(lo, hi, tz));
        }
    }
    out.sort_by_key(|o| o.timestamp);
    out.dedup_by_key(|o| o.timestamp);
    out
}

/// Legal end hours for a chosen start time and candidate end date.
///
/// The slot containing the start is extended across its back-to-back run,
/// then clipped to the day after the end date. Same-day selections use
/// end-of-hour boundaries; multi-day ones use sharp hours on the end date.
/// A final candidate landing exactly on the following midnight is dropped —
/// a booking "ending at 00:00 next day" reads as ending a day later than it
/// does.
pub fn available_end_times(
    slots: &[TimeSlot],
    start_time: Option<Ms>,
    end_date: Option<Ms>,
    tz: Tz,
    seats_enabled: bool,
) -> Vec<HourOption> {
    let Some(start) = start_time else {
        return Vec::new();
    };
    let Some(idx) = slots.iter().position(|s| s.span.contains_instant(start)) else {
        return Vec::new();
    };
    let Some(combined) = combine_slots(slots, idx, None, seats_enabled) else {
        return Vec::new();
    };

    let end_anchor = end_date.unwrap_or(start);
    let Some(day_limit) = start_of(end_anchor, BoundaryUnit::Day, tz, 1) else {
        return Vec::new();
    };
    let clipped_end = combined.span.end.min(day_limit);
    if clipped_end <= start {
        return Vec::new();
    }

    let same_day = day_id(start, tz) == day_id(end_anchor, tz);
    let mut out = if same_day {
        end_hours(start, clipped_end, tz)
    } else {
        let Some(day_floor) = start_of(end_anchor, BoundaryUnit::Day, tz, 0) else {
            return Vec::new();
        };
        sharp_hours(day_floor.max(start), clipped_end, tz)
    };

    if out.last().is_some_and(|o| o.timestamp == day_limit) {
        out.pop();
    }
    out
}
