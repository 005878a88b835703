// Pre-departure briefing countdown
use crate::countdown::format_countdown;
use crate::models::PdbRecord;
use crate::timestamp::parse_date_at;
use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// Briefings are dated only; they are taken to start at this hour
pub const DEFAULT_BRIEFING_HOUR: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PdbState {
    Upcoming,
    Passed,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdbStatus {
    pub state: PdbState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub briefing_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countdown: Option<String>,
}

impl PdbStatus {
    fn unavailable() -> Self {
        Self {
            state: PdbState::Unavailable,
            briefing_at: None,
            countdown: None,
        }
    }
}

/// Instant the briefing starts, or `None` if the date is missing or bad
pub fn briefing_instant(record: &PdbRecord, briefing_hour: u32, zone: Tz) -> Option<DateTime<Utc>> {
    let raw = record
        .date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())?;
    let at = NaiveTime::from_hms_opt(briefing_hour, 0, 0)?;

    match parse_date_at(raw, at, zone) {
        Ok(instant) => Some(instant),
        Err(e) => {
            tracing::warn!("Treating briefing date as unavailable: {}", e);
            None
        }
    }
}

/// Upcoming until the briefing hour; passed from that instant on
pub fn evaluate_pdb(
    now: DateTime<Utc>,
    record: &PdbRecord,
    briefing_hour: u32,
    zone: Tz,
) -> PdbStatus {
    let Some(briefing_at) = briefing_instant(record, briefing_hour, zone) else {
        return PdbStatus::unavailable();
    };

    if now < briefing_at {
        PdbStatus {
            state: PdbState::Upcoming,
            briefing_at: Some(briefing_at),
            countdown: Some(format_countdown(briefing_at - now)),
        }
    } else {
        PdbStatus {
            state: PdbState::Passed,
            briefing_at: Some(briefing_at),
            countdown: None,
        }
    }
}
