use chrono_tz::Tz;

use crate::model::Ms;

use super::slots::SlotMap;
use super::timeutil::{day_id, localize_naive, to_local};

/// The calendar's day-blocking behavior is state-dependent by design: before
/// a start time is chosen any open slot makes a day selectable; once one is
/// fixed, a day stays selectable only if it can host that same wall-clock
/// start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartConstraint {
    Unconstrained,
    FixedStart(Ms),
}

/// Whether a calendar day should render as disabled: no materialized entry,
/// or only zero-seat slots.
pub fn is_day_blocked(map: &SlotMap, day: &str) -> bool {
    map.get(day)
        .is_none_or(|slots| slots.iter().all(|s| s.seats == 0))
}

/// Day-blocking for a day given as an instant, honoring the two-state
/// contract. With `FixedStart`, the chosen start's wall-clock time-of-day is
/// projected onto the candidate day and the day is selectable only when a
/// slot with capacity covers that projected instant.
pub fn is_day_blocked_at(map: &SlotMap, day: Ms, constraint: StartConstraint, tz: Tz) -> bool {
    let Some(id) = day_id(day, tz) else {
        return true;
    };
    match constraint {
        StartConstraint::Unconstrained => is_day_blocked(map, &id),
        StartConstraint::FixedStart(start) => {
            let (Some(start_local), Some(day_local)) = (to_local(start, tz), to_local(day, tz))
            else {
                return true;
            };
            let Some(projected) =
                localize_naive(day_local.date_naive().and_time(start_local.time()), tz)
            else {
                return true;
            };
            map.get(&id).is_none_or(|slots| {
                !slots
                    .iter()
                    .any(|s| s.seats > 0 && s.span.contains_instant(projected))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::slots::{materialize, month_window};
    use crate::model::{AvailabilityPlan, Exception, PlanEntry, Span, Weekday};
    use chrono::TimeZone;
    use ulid::Ulid;

    fn tz(name: &str) -> Tz {
        name.parse().unwrap()
    }

    fn at(z: Tz, y: i32, mo: u32, d: u32, h: u32) -> Ms {
        z.with_ymd_and_hms(y, mo, d, h, 0, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn plan(entries: Vec<(Weekday, &str, &str, u32)>) -> AvailabilityPlan {
        AvailabilityPlan {
            timezone: "Etc/UTC".into(),
            entries: entries
                .into_iter()
                .map(|(d, s, e, seats)| PlanEntry {
                    day_of_week: d,
                    start_time: s.into(),
                    end_time: e.into(),
                    seats,
                })
                .collect(),
        }
    }

    #[test]
    fn day_without_entry_is_blocked() {
        let z = tz("Etc/UTC");
        let p = plan(vec![(Weekday::Mon, "09:00", "17:00", 1)]);
        let map = materialize(&p, &[], month_window(at(z, 2024, 1, 1, 0), z).unwrap());
        assert!(!is_day_blocked(&map, "2024-01-08")); // Monday
        assert!(is_day_blocked(&map, "2024-01-09")); // Tuesday
    }

    #[test]
    fn whole_day_blocking_exception_blocks_a_plan_open_day() {
        let z = tz("Etc/UTC");
        let p = plan(vec![(Weekday::Mon, "09:00", "17:00", 1)]);
        let exc = Exception {
            id: Ulid::new(),
            span: Span::new(at(z, 2024, 1, 8, 0), at(z, 2024, 1, 9, 0)),
            seats: 0,
        };
        let map = materialize(&p, &[exc], month_window(at(z, 2024, 1, 1, 0), z).unwrap());
        assert!(is_day_blocked(&map, "2024-01-08"));
        assert!(!is_day_blocked(&map, "2024-01-15"));
    }

    #[test]
    fn unconstrained_mode_uses_any_open_slot() {
        let z = tz("Etc/UTC");
        let p = plan(vec![(Weekday::Mon, "09:00", "17:00", 1)]);
        let map = materialize(&p, &[], month_window(at(z, 2024, 1, 1, 0), z).unwrap());
        assert!(!is_day_blocked_at(
            &map,
            at(z, 2024, 1, 8, 12),
            StartConstraint::Unconstrained,
            z
        ));
        assert!(is_day_blocked_at(
            &map,
            at(z, 2024, 1, 9, 12),
            StartConstraint::Unconstrained,
            z
        ));
    }

    #[test]
    fn fixed_start_narrows_selectable_days() {
        // Monday opens 09:00–17:00, Tuesday only 14:00–17:00. With a 10:00
        // start fixed, Tuesday can no longer host it.
        let z = tz("Etc/UTC");
        let p = plan(vec![
            (Weekday::Mon, "09:00", "17:00", 1),
            (Weekday::Tue, "14:00", "17:00", 1),
        ]);
        let map = materialize(&p, &[], month_window(at(z, 2024, 1, 1, 0), z).unwrap());
        let fixed = StartConstraint::FixedStart(at(z, 2024, 1, 8, 10));
        assert!(!is_day_blocked_at(&map, at(z, 2024, 1, 8, 0), fixed, z));
        assert!(is_day_blocked_at(&map, at(z, 2024, 1, 9, 0), fixed, z));
        // 15:00 fits both days
        let later = StartConstraint::FixedStart(at(z, 2024, 1, 8, 15));
        assert!(!is_day_blocked_at(&map, at(z, 2024, 1, 9, 0), later, z));
    }
}
