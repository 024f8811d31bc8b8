use serde::{Deserialize, Deserializer, Serialize};
use ulid::Ulid;

/// Unix milliseconds — the only time type.
pub type Ms = i64;

pub const MINUTE_MS: Ms = 60_000;
pub const HOUR_MS: Ms = 3_600_000;

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Ms,
    pub end: Ms,
}

impl Span {
    pub fn new(start: Ms, end: Ms) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    pub fn duration_ms(&self) -> Ms {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains_instant(&self, t: Ms) -> bool {
        self.start <= t && t < self.end
    }

    /// Intersection clamped to `other`, if non-empty.
    pub fn clamp_to(&self, other: &Span) -> Option<Span> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then(|| Span::new(start, end))
    }
}

/// Day of week for weekly plan entries. Weeks start on Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl From<chrono::Weekday> for Weekday {
    fn from(wd: chrono::Weekday) -> Self {
        match wd {
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tue,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thu,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
            chrono::Weekday::Sun => Weekday::Sun,
        }
    }
}

/// One recurring open-hours block in a listing's weekly schedule.
///
/// `start_time`/`end_time` are wall-clock `"HH:00"` strings on a 24-boundary;
/// `"00:00"` as an end time means midnight at the end of the day, not the
/// start. Entries for one day must not overlap — enforced upstream, assumed
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub day_of_week: Weekday,
    pub start_time: String,
    pub end_time: String,
    pub seats: u32,
}

/// A listing's recurring weekly schedule. All hour arithmetic for the listing
/// happens in `timezone` (IANA name), never in the caller's local zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityPlan {
    pub timezone: String,
    pub entries: Vec<PlanEntry>,
}

/// One-off override tied to an absolute time range, independent of the
/// weekly plan. `seats == 0` blocks the span; `seats > 0` makes it available
/// with that capacity regardless of what the plan says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exception {
    #[serde(default = "Ulid::new")]
    pub id: Ulid,
    pub span: Span,
    pub seats: u32,
}

/// Distinguishes slots covering a whole calendar day from time-based ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotKind {
    TimeBased,
    FullDay,
}

/// The unit the engine reasons about once plan + exceptions are resolved
/// into concrete time. Within one materialized day, slots are sorted and
/// non-overlapping, though they may be exactly adjacent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Ulid,
    pub span: Span,
    pub seats: u32,
    pub kind: SlotKind,
}

impl TimeSlot {
    pub fn new(span: Span, seats: u32, kind: SlotKind) -> Self {
        Self {
            id: Ulid::new(),
            span,
            seats,
            kind,
        }
    }
}

/// The caller's in-progress date/time selection. All fields optional — the
/// pipeline narrows what can be selected next as fields fill in.
///
/// Booking forms hold timestamps as string-encoded epoch millis; both string
/// and numeric encodings deserialize to the same `Ms`, so no mixed-type
/// comparisons survive past this boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default, deserialize_with = "de_opt_ms")]
    pub booking_start: Option<Ms>,
    #[serde(default, deserialize_with = "de_opt_ms")]
    pub booking_end: Option<Ms>,
    #[serde(default, deserialize_with = "de_opt_ms")]
    pub start_time: Option<Ms>,
    #[serde(default, deserialize_with = "de_opt_ms")]
    pub end_time: Option<Ms>,
}

/// A selectable hour boundary handed to the booking form.
///
/// `timestamp` serializes as a string because that is the encoding form
/// state round-trips through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourOption {
    pub time_of_day: String,
    #[serde(serialize_with = "ser_ms_string")]
    pub timestamp: Ms,
}

fn ser_ms_string<S: serde::Serializer>(t: &Ms, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(t)
}

/// Accepts `1704067200000`, `"1704067200000"`, or null. Unparseable strings
/// degrade to `None` — a garbage form value renders as "nothing selected",
/// it does not fail the whole scenario.
fn de_opt_ms<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Ms>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Text(String),
    }
    Ok(match Option::<Raw>::deserialize(d)? {
        Some(Raw::Num(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_basics() {
        let s = Span::new(100, 200);
        assert_eq!(s.duration_ms(), 100);
        assert!(s.contains_instant(100));
        assert!(s.contains_instant(199));
        assert!(!s.contains_instant(200)); // half-open
    }

    #[test]
    fn span_overlap() {
        let a = Span::new(100, 200);
        let b = Span::new(150, 250);
        let c = Span::new(200, 300);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // adjacent, not overlapping
    }

    #[test]
    fn span_clamp() {
        let a = Span::new(100, 400);
        assert_eq!(a.clamp_to(&Span::new(200, 300)), Some(Span::new(200, 300)));
        assert_eq!(a.clamp_to(&Span::new(0, 250)), Some(Span::new(100, 250)));
        assert_eq!(a.clamp_to(&Span::new(400, 500)), None); // adjacent → empty
    }

    #[test]
    fn weekday_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Weekday::Mon).unwrap(), "\"mon\"");
        let wd: Weekday = serde_json::from_str("\"sun\"").unwrap();
        assert_eq!(wd, Weekday::Sun);
    }

    #[test]
    fn selection_accepts_string_and_numeric_millis() {
        let sel: Selection = serde_json::from_str(
            r#"{"booking_start": 1704067200000, "start_time": "1704099600000"}"#,
        )
        .unwrap();
        assert_eq!(sel.booking_start, Some(1_704_067_200_000));
        assert_eq!(sel.start_time, Some(1_704_099_600_000));
        assert_eq!(sel.booking_end, None);
    }

    #[test]
    fn selection_garbage_string_degrades_to_none() {
        let sel: Selection =
            serde_json::from_str(r#"{"booking_start": "not-a-timestamp"}"#).unwrap();
        assert_eq!(sel.booking_start, None);
    }

    #[test]
    fn hour_option_timestamp_serializes_as_string() {
        let opt = HourOption {
            time_of_day: "09:00".into(),
            timestamp: 1_704_067_200_000,
        };
        let json = serde_json::to_string(&opt).unwrap();
        assert!(json.contains("\"1704067200000\""));
    }
}
