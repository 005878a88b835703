// One evaluation pass over a whole itinerary, plus its text rendering
use crate::clock::Clock;
use crate::models::{CheckInStatus, FlightLeg, Itinerary, LegKind};
use crate::pdb::{evaluate_pdb, PdbState, PdbStatus};
use crate::status::{evaluate_window, CheckInPolicy};
use crate::timestamp::format_in_zone;
use crate::window::CheckInWindow;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt::Write;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegReport {
    pub flight_number: String,
    pub kind: LegKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<CheckInWindow>,
    #[serde(flatten)]
    pub status: CheckInStatus,
    pub is_open: bool,
    pub is_closed: bool,
}

impl LegReport {
    fn new(leg: &FlightLeg, window: Option<CheckInWindow>, status: CheckInStatus) -> Self {
        tracing::trace!("{}: {}", leg.display_name(), status.state.as_str());
        Self {
            flight_number: leg.flight_number.clone(),
            kind: leg.kind(),
            window,
            is_open: status.is_open(),
            is_closed: status.is_closed(),
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryReport {
    pub evaluated_at: DateTime<Utc>,
    #[serde(skip)]
    pub zone: Tz,
    pub legs: Vec<LegReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdb: Option<PdbStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdb_location: Option<String>,
}

/// Evaluate every leg (and the briefing) against a single reading of the clock
pub fn build_report(
    clock: &dyn Clock,
    itinerary: &Itinerary,
    policy: &CheckInPolicy,
    briefing_hour: u32,
) -> ItineraryReport {
    let now = clock.now();

    let legs = itinerary
        .flights
        .iter()
        .map(|leg| {
            let window = policy.window_for(leg);
            let status = evaluate_window(now, leg, window.as_ref(), policy);
            LegReport::new(leg, window, status)
        })
        .collect();

    let pdb = itinerary
        .pdb
        .as_ref()
        .map(|record| evaluate_pdb(now, record, briefing_hour, policy.zone));

    let pdb_location = itinerary
        .pdb
        .as_ref()
        .and_then(|record| record.location.clone());

    ItineraryReport {
        evaluated_at: now,
        zone: policy.zone,
        legs,
        pdb,
        pdb_location,
    }
}

impl ItineraryReport {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Check-in status as of {} ({})\n",
            format_in_zone(&self.evaluated_at, self.zone, DISPLAY_FORMAT),
            self.zone.name()
        );

        if self.legs.is_empty() {
            let _ = writeln!(out, "  No flights on this itinerary");
        }

        for leg in &self.legs {
            let name = if leg.flight_number.is_empty() {
                "-"
            } else {
                leg.flight_number.as_str()
            };
            let _ = writeln!(
                out,
                "  {:<10} {:<14} {}",
                name,
                leg.kind.as_str(),
                leg.status.status_text
            );
            if let Some(countdown) = &leg.status.countdown {
                let _ = writeln!(out, "  {:<10} {:<14} {}", "", "", countdown);
            }
        }

        if let Some(pdb) = &self.pdb {
            let _ = writeln!(out);
            let line = match (pdb.state, pdb.briefing_at) {
                (PdbState::Upcoming, Some(at)) => format!(
                    "Pre-departure briefing {} (in {})",
                    format_in_zone(&at, self.zone, DISPLAY_FORMAT),
                    pdb.countdown.as_deref().unwrap_or("-")
                ),
                (PdbState::Passed, Some(at)) => format!(
                    "Pre-departure briefing held {}",
                    format_in_zone(&at, self.zone, DISPLAY_FORMAT)
                ),
                _ => "Pre-departure briefing N/A".to_string(),
            };
            match &self.pdb_location {
                Some(location) => {
                    let _ = writeln!(out, "  {} at {}", line, location);
                }
                None => {
                    let _ = writeln!(out, "  {}", line);
                }
            }
        }

        out
    }

    pub fn open_count(&self) -> usize {
        self.legs.iter().filter(|leg| leg.is_open).count()
    }
}
