use serde::{Deserialize, Serialize};
use tracing::info;

use bookable::engine::{
    self, BoundaryUnit, StartConstraint, is_day_blocked_at, month_window, parse_tz, start_of,
};
use bookable::model::{AvailabilityPlan, Exception, Selection, Span};

/// One self-contained input for the pipeline: a listing's plan, its
/// exceptions, and the caller's current selection. The JSON mirrors what a
/// booking form would hold in state.
#[derive(Debug, Deserialize)]
struct Scenario {
    plan: AvailabilityPlan,
    #[serde(default)]
    exceptions: Vec<Exception>,
    #[serde(default = "default_seats_enabled")]
    seats_enabled: bool,
    #[serde(default)]
    selection: Selection,
    /// Optional explicit window; defaults to the month around the selected
    /// start date.
    window: Option<Span>,
}

fn default_seats_enabled() -> bool {
    true
}

#[derive(Debug, Serialize)]
struct DayReport {
    day: String,
    blocked: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("BOOKABLE_SCENARIO").ok())
        .ok_or("usage: bookable <scenario.json>")?;

    let raw = std::fs::read_to_string(&path)?;
    let scenario: Scenario = serde_json::from_str(&raw)?;
    let tz = parse_tz(&scenario.plan.timezone);

    let window = match scenario.window {
        Some(w) => w,
        None => {
            let anchor = scenario
                .selection
                .booking_start
                .ok_or("scenario needs either a window or a selected start date")?;
            month_window(anchor, tz).ok_or("selected start date is out of range")?
        }
    };

    info!(scenario = %path, timezone = %scenario.plan.timezone, "resolving availability");

    let resolution = engine::resolve(
        &scenario.plan,
        &scenario.exceptions,
        scenario.seats_enabled,
        &scenario.selection,
        window,
    );

    let constraint = match scenario.selection.start_time {
        Some(t) => StartConstraint::FixedStart(t),
        None => StartConstraint::Unconstrained,
    };
    let mut days = Vec::new();
    let mut day = start_of(window.start, BoundaryUnit::Day, tz, 0)
        .ok_or("window start is out of range")?;
    while day < window.end {
        if let Some(id) = engine::day_id(day, tz) {
            days.push(DayReport {
                day: id,
                blocked: is_day_blocked_at(&resolution.slots_by_day, day, constraint, tz),
            });
        }
        match start_of(day, BoundaryUnit::Day, tz, 1) {
            Some(next) => day = next,
            None => break,
        }
    }

    #[derive(Serialize)]
    struct Output<'a> {
        days: Vec<DayReport>,
        #[serde(flatten)]
        resolution: &'a engine::Resolution,
    }

    let out = Output {
        days,
        resolution: &resolution,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
