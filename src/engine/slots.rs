use std::collections::BTreeMap;

use chrono::Datelike;
use chrono_tz::Tz;
use tracing::trace;

use crate::model::{AvailabilityPlan, Exception, Ms, SlotKind, Span, TimeSlot, Weekday};

use super::timeutil::{BoundaryUnit, day_id, parse_localized_time, parse_tz, start_of, to_local};

/// Calendar-day identifier (ISO date in the listing zone) → slots active on
/// that day. Days with no availability are absent.
pub type SlotMap = BTreeMap<String, Vec<TimeSlot>>;

/// `[start of month, start of next month)` around `anchor`, in `tz`.
pub fn month_window(anchor: Ms, tz: Tz) -> Option<Span> {
    let start = start_of(anchor, BoundaryUnit::Month, tz, 0)?;
    let end = start_of(anchor, BoundaryUnit::Month, tz, 1)?;
    Some(Span::new(start, end))
}

/// Project the weekly plan onto every calendar day in `window` and overlay
/// the exceptions.
///
/// An exception replaces whatever the plan says for its span: its range is
/// carved out of the plan-derived slots first, then re-added with the
/// exception's own capacity when `seats > 0`. Later exceptions win where
/// they overlap earlier ones.
pub fn materialize(plan: &AvailabilityPlan, exceptions: &[Exception], window: Span) -> SlotMap {
    let tz = parse_tz(&plan.timezone);
    let mut map = SlotMap::new();

    let Some(mut day_start) = start_of(window.start, BoundaryUnit::Day, tz, 0) else {
        return map;
    };

    while day_start < window.end {
        let Some(next_day) = start_of(day_start, BoundaryUnit::Day, tz, 1) else {
            break;
        };
        let day_span = Span::new(day_start, next_day);
        let Some(local) = to_local(day_start, tz) else {
            break;
        };
        let date = local.date_naive();
        let weekday: Weekday = local.weekday().into();

        let mut slots: Vec<TimeSlot> = Vec::new();
        for entry in plan.entries.iter().filter(|e| e.day_of_week == weekday) {
            let Some(start) = parse_localized_time(date, &entry.start_time, tz) else {
                continue;
            };
            // An end of "00:00" means midnight closing this day, not a
            // zero-duration slot at its start.
            let end = if entry.end_time == "00:00" || entry.end_time == "24:00" {
                next_day
            } else {
                match parse_localized_time(date, &entry.end_time, tz) {
                    Some(e) => e,
                    None => continue,
                }
            };
            if start >= end {
                continue;
            }
            let Some(clamped) = Span::new(start, end).clamp_to(&day_span) else {
                continue;
            };
            let kind = if clamped == day_span {
                SlotKind::FullDay
            } else {
                SlotKind::TimeBased
            };
            slots.push(TimeSlot::new(clamped, entry.seats, kind));
        }
        slots.sort_by_key(|s| s.span.start);

        for exc in exceptions {
            let Some(clipped) = exc.span.clamp_to(&day_span) else {
                continue;
            };
            slots = subtract_span(slots, clipped);
            if exc.seats > 0 {
                let kind = if clipped == day_span {
                    SlotKind::FullDay
                } else {
                    SlotKind::TimeBased
                };
                slots.push(TimeSlot::new(clipped, exc.seats, kind));
                slots.sort_by_key(|s| s.span.start);
            }
        }

        if !slots.is_empty()
            && let Some(id) = day_id(day_start, tz)
        {
            trace!(day = %id, slots = slots.len(), "materialized day");
            map.insert(id, slots);
        }
        day_start = next_day;
    }

    map
}

/// Carve `cut` out of every slot, splitting around it and preserving seat
/// counts on the surviving fragments.
pub(crate) fn subtract_span(slots: Vec<TimeSlot>, cut: Span) -> Vec<TimeSlot> {
    let mut out = Vec::with_capacity(slots.len());
    for slot in slots {
        if !slot.span.overlaps(&cut) {
            out.push(slot);
            continue;
        }
        if slot.span.start < cut.start {
            out.push(TimeSlot::new(
                Span::new(slot.span.start, cut.start),
                slot.seats,
                SlotKind::TimeBased,
            ));
        }
        if cut.end < slot.span.end {
            out.push(TimeSlot::new(
                Span::new(cut.end, slot.span.end),
                slot.seats,
                SlotKind::TimeBased,
            ));
        }
    }
    out
}

/// All slots in the map flattened into one chronological sequence, for
/// computations that cross day boundaries.
pub fn ordered_slots(map: &SlotMap) -> Vec<TimeSlot> {
    let mut all: Vec<TimeSlot> = map.values().flatten().cloned().collect();
    all.sort_by_key(|s| s.span.start);
    all
}
