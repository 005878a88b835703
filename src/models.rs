use serde::{Deserialize, Serialize};

/// One flight leg as returned by the itinerary API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlightLeg {
    #[serde(rename = "flightNumber", alias = "flight_number", default)]
    pub flight_number: String,

    /// Naive "YYYY-MM-DD HH:MM:SS" in the source time zone
    #[serde(
        rename = "departureDate",
        alias = "departure",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub departure: Option<String>,

    #[serde(
        rename = "arrivalDate",
        alias = "arrival",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub arrival: Option<String>,

    #[serde(
        rename = "isInternational",
        alias = "is_international",
        default
    )]
    pub is_international: bool,
}

impl FlightLeg {
    pub fn kind(&self) -> LegKind {
        if self.is_international {
            LegKind::International
        } else {
            LegKind::Domestic
        }
    }

    pub fn display_name(&self) -> String {
        if self.flight_number.is_empty() {
            format!("({})", self.kind().as_str())
        } else {
            format!("{} ({})", self.flight_number, self.kind().as_str())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegKind {
    International,
    Domestic,
}

impl LegKind {
    pub fn as_str(&self) -> &str {
        match self {
            LegKind::International => "international",
            LegKind::Domestic => "domestic",
        }
    }
}

/// Pre-departure briefing record. Date-only, no time component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PdbRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Everything the itinerary endpoint returns for one worker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Itinerary {
    #[serde(default, alias = "legs")]
    pub flights: Vec<FlightLeg>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdb: Option<PdbRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInState {
    NotYetOpen,
    Open,
    Closed,
    /// Departure missing or unparseable
    Unavailable,
}

impl CheckInState {
    pub fn as_str(&self) -> &str {
        match self {
            CheckInState::NotYetOpen => "NOT YET OPEN",
            CheckInState::Open => "OPEN",
            CheckInState::Closed => "CLOSED",
            CheckInState::Unavailable => "N/A",
        }
    }
}

/// Result of evaluating one leg at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckInStatus {
    pub state: CheckInState,
    pub status_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countdown: Option<String>,
}

impl CheckInStatus {
    pub fn unavailable() -> Self {
        Self {
            state: CheckInState::Unavailable,
            status_text: "N/A".to_string(),
            countdown: None,
        }
    }

    /// Gates the "Checked-In" action
    pub fn is_open(&self) -> bool {
        self.state == CheckInState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state == CheckInState::Closed
    }
}
