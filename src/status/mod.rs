// Check-in status classification
use crate::countdown::format_countdown;
use crate::models::{CheckInState, CheckInStatus, FlightLeg, LegKind};
use crate::timestamp::{format_in_zone, parse_source_timestamp};
use crate::window::{CheckInWindow, LeadTime};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

pub const DEFAULT_INTERNATIONAL_LABEL: &str = "JEK IN";
pub const DEFAULT_DOMESTIC_LABEL: &str = "DOMESTIK JEK IN";

/// Format of the opening instant inside "not yet open" text
pub const OPENS_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Everything `evaluate` needs besides the leg and "now".
///
/// Built once from configuration and passed in explicitly.
#[derive(Debug, Clone)]
pub struct CheckInPolicy {
    pub zone: Tz,
    pub international_lead: LeadTime,
    pub domestic_lead: LeadTime,
    pub international_label: String,
    pub domestic_label: String,
}

impl CheckInPolicy {
    pub fn lead_for(&self, kind: LegKind) -> LeadTime {
        match kind {
            LegKind::International => self.international_lead,
            LegKind::Domestic => self.domestic_lead,
        }
    }

    pub fn label_for(&self, kind: LegKind) -> &str {
        match kind {
            LegKind::International => &self.international_label,
            LegKind::Domestic => &self.domestic_label,
        }
    }

    /// Window for a leg, or `None` if its departure is unusable
    pub fn window_for(&self, leg: &FlightLeg) -> Option<CheckInWindow> {
        let departure = parse_source_timestamp(leg.departure.as_deref(), self.zone)?;
        CheckInWindow::for_departure(departure, self.lead_for(leg.kind()))
    }
}

impl Default for CheckInPolicy {
    fn default() -> Self {
        Self {
            zone: chrono_tz::Pacific::Efate,
            international_lead: LeadTime::INTERNATIONAL_DEFAULT,
            domestic_lead: LeadTime::DOMESTIC_DEFAULT,
            international_label: DEFAULT_INTERNATIONAL_LABEL.to_string(),
            domestic_label: DEFAULT_DOMESTIC_LABEL.to_string(),
        }
    }
}

/// Place `now` relative to the window.
///
/// Each state includes its lower bound and excludes its upper bound, so
/// `now == opens_at` is Open and `now == closes_at` is Closed. A zero-width
/// window goes straight from NotYetOpen to Closed.
pub fn classify(
    now: DateTime<Utc>,
    window: &CheckInWindow,
    prefix: &str,
    zone: Tz,
) -> CheckInStatus {
    if now < window.opens_at {
        CheckInStatus {
            state: CheckInState::NotYetOpen,
            status_text: format!(
                "{} at {}",
                prefix,
                format_in_zone(&window.opens_at, zone, OPENS_AT_FORMAT)
            ),
            countdown: Some(format_countdown(window.opens_at - now)),
        }
    } else if now < window.closes_at {
        CheckInStatus {
            state: CheckInState::Open,
            status_text: format!("{} OPEN", prefix),
            countdown: Some(format_countdown(window.closes_at - now)),
        }
    } else {
        CheckInStatus {
            state: CheckInState::Closed,
            status_text: format!("{} I KLOS FINIS", prefix),
            countdown: None,
        }
    }
}

/// Evaluate one leg at `now`. Never fails; bad input yields "N/A".
pub fn evaluate(now: DateTime<Utc>, leg: &FlightLeg, policy: &CheckInPolicy) -> CheckInStatus {
    evaluate_window(now, leg, policy.window_for(leg).as_ref(), policy)
}

/// Same as [`evaluate`] for a caller that already holds the leg's window
pub fn evaluate_window(
    now: DateTime<Utc>,
    leg: &FlightLeg,
    window: Option<&CheckInWindow>,
    policy: &CheckInPolicy,
) -> CheckInStatus {
    match window {
        Some(window) => classify(now, window, policy.label_for(leg.kind()), policy.zone),
        None => {
            tracing::debug!("No usable departure for {}", leg.display_name());
            CheckInStatus::unavailable()
        }
    }
}
