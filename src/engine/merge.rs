use crate::model::{Ms, Span, TimeSlot};

// ── Seat-aware coalescing ─────────────────────────────────────────
//
// Two views of adjacency live here and they are deliberately different:
//
// * the merged *view* (`merge_slots`) joins back-to-back slots only when
//   capacity agrees (or seat tracking is off) — a capacity change is a hard
//   boundary in what the calendar shows;
// * the adjacency *walk* (`find_first_adjacent`/`find_last_adjacent`) ignores
//   capacity, because a booking may span a capacity change as long as it is
//   priced at the scarcest slot it crosses (`minimum_available_seats`).

/// Millisecond-exact adjacency: one slot ends where the other starts.
pub fn is_back_to_back(a: &TimeSlot, b: &TimeSlot) -> bool {
    a.span.end == b.span.start
}

/// Whether two slots may appear as one continuous bookable interval.
pub fn can_combine(a: &TimeSlot, b: &TimeSlot, seats_enabled: bool) -> bool {
    is_back_to_back(a, b) && (!seats_enabled || a.seats == b.seats)
}

/// Coalesce a chronological slot sequence into the view a calendar renders.
/// With seat tracking disabled every back-to-back pair merges and the merged
/// capacity is forced to 1 (single-seat mode).
pub fn merge_slots(slots: &[TimeSlot], seats_enabled: bool) -> Vec<TimeSlot> {
    let mut merged: Vec<TimeSlot> = Vec::new();
    for slot in slots {
        if let Some(last) = merged.last_mut()
            && can_combine(last, slot, seats_enabled)
        {
            last.span.end = slot.span.end;
            if !seats_enabled {
                last.seats = 1;
            }
            continue;
        }
        merged.push(slot.clone());
    }
    merged
}

/// Index of the last slot reachable from `idx` through back-to-back steps.
pub fn find_last_adjacent(slots: &[TimeSlot], idx: usize) -> usize {
    let mut i = idx;
    while i + 1 < slots.len() && is_back_to_back(&slots[i], &slots[i + 1]) {
        i += 1;
    }
    i
}

/// Index of the first slot reachable from `idx` through back-to-back steps.
pub fn find_first_adjacent(slots: &[TimeSlot], idx: usize) -> usize {
    let mut i = idx;
    while i > 0 && is_back_to_back(&slots[i - 1], &slots[i]) {
        i -= 1;
    }
    i
}

/// Capacity of a selection starting in `slots[start_idx]` and ending at
/// `end_time`. If the end lies within the starting slot, that slot's own
/// seat count applies; otherwise the minimum across every slot the selection
/// spans — you cannot promise more seats than the scarcest slot allows.
pub fn minimum_available_seats(slots: &[TimeSlot], start_idx: usize, end_time: Ms) -> u32 {
    let first = &slots[start_idx];
    if end_time <= first.span.end {
        return first.seats;
    }
    let mut min = first.seats;
    let mut i = start_idx;
    while i + 1 < slots.len()
        && is_back_to_back(&slots[i], &slots[i + 1])
        && slots[i].span.end < end_time
    {
        i += 1;
        min = min.min(slots[i].seats);
    }
    min
}

/// Synthetic slot spanning the whole contiguous run around `slots[idx]`,
/// carrying the minimum capacity of the run (or 1 in single-seat mode).
/// Used for end-time-range computation; the input sequence is not touched.
pub fn combine_slots(
    slots: &[TimeSlot],
    idx: usize,
    end_time: Option<Ms>,
    seats_enabled: bool,
) -> Option<TimeSlot> {
    let slot = slots.get(idx)?;
    let first = find_first_adjacent(slots, idx);
    let last = find_last_adjacent(slots, idx);
    let span = Span::new(slots[first].span.start, slots[last].span.end);
    let seats = if !seats_enabled {
        1
    } else {
        match end_time {
            Some(end) => minimum_available_seats(slots, idx, end),
            None => (idx..=last).map(|i| slots[i].seats).min().unwrap_or(slot.seats),
        }
    };
    Some(TimeSlot::new(span, seats, slot.kind))
}
