mod blocking;
mod merge;
mod slots;
mod times;
mod timeutil;

pub use blocking::{StartConstraint, is_day_blocked, is_day_blocked_at};
pub use merge::{
    can_combine, combine_slots, find_first_adjacent, find_last_adjacent, is_back_to_back,
    merge_slots, minimum_available_seats,
};
pub use slots::{SlotMap, materialize, month_window, ordered_slots};
pub use times::{available_end_times, available_start_times, end_hours, sharp_hours, start_hours};
pub use timeutil::{
    BoundaryUnit, day_id, is_day_in_range, is_in_range, is_same_or_after, next_boundary,
    parse_localized_time, parse_tz, start_of, time_label,
};

use serde::Serialize;
use tracing::debug;

use crate::model::{AvailabilityPlan, Exception, HourOption, Selection, Span, TimeSlot};

/// Everything a booking form needs after one pass over the pipeline.
///
/// `summary` is the synthetic minimum-seats slot covering the selection
/// (explicit times, or the first start/end option as the implicit default),
/// ready to hand off to pricing. `None` means nothing bookable — absent
/// inputs degrade to empty outputs, never errors.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub slots_by_day: SlotMap,
    pub start_times: Vec<HourOption>,
    pub end_times: Vec<HourOption>,
    pub summary: Option<TimeSlot>,
}

/// Run the full pipeline for one snapshot of plan + exceptions and the
/// caller's current selection: materialize slots over `window`, resolve
/// start hours for the selected date, end hours for the chosen start, and
/// the combined summary slot.
///
/// Stateless and synchronous — callers re-invoke it on every input change
/// rather than caching derived values against stale state.
pub fn resolve(
    plan: &AvailabilityPlan,
    exceptions: &[Exception],
    seats_enabled: bool,
    selection: &Selection,
    window: Span,
) -> Resolution {
    let tz = parse_tz(&plan.timezone);
    let slots_by_day = materialize(plan, exceptions, window);

    let start_times = available_start_times(&slots_by_day, selection.booking_start, tz);
    // An explicit form pick wins over the implicit first-option default.
    let start_time = selection
        .start_time
        .or_else(|| start_times.first().map(|o| o.timestamp));

    let ordered = ordered_slots(&slots_by_day);
    let end_anchor = selection.booking_end.or(selection.booking_start);
    let end_times = available_end_times(&ordered, start_time, end_anchor, tz, seats_enabled);
    let end_time = selection
        .end_time
        .or_else(|| end_times.first().map(|o| o.timestamp));

    let summary = match (start_time, end_time) {
        (Some(s), Some(e)) if s < e => ordered
            .iter()
            .position(|slot| slot.span.contains_instant(s))
            .map(|idx| {
                let seats = if seats_enabled {
                    minimum_available_seats(&ordered, idx, e)
                } else {
                    1
                };
                TimeSlot::new(Span::new(s, e), seats, ordered[idx].kind)
            }),
        _ => None,
    };

    debug!(
        days = slots_by_day.len(),
        starts = start_times.len(),
        ends = end_times.len(),
        bookable = summary.is_some(),
        "resolved availability"
    );

    Resolution {
        slots_by_day,
        start_times,
        end_times,
        summary,
    }
}
