// Check-in window arithmetic
use crate::error::{JekinError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Phone check-in closes this long before departure, whatever the lead time
pub const CLOSE_OFFSET_HOURS: i64 = 1;

/// Longest lead time accepted from configuration (one week)
pub const MAX_LEAD_HOURS: f64 = 24.0 * 7.0;

pub fn close_offset() -> Duration {
    Duration::hours(CLOSE_OFFSET_HOURS)
}

/// How long before departure check-in opens.
///
/// Whole hours and the fractional remainder are kept separately, so 2.5
/// becomes 2 hours plus 30 minutes (remainder rounded to whole minutes).
/// Anything below the close offset would open the window after it closes
/// and is rejected, as is anything above [`MAX_LEAD_HOURS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadTime {
    hours: i64,
    minutes: i64,
}

impl LeadTime {
    pub const INTERNATIONAL_DEFAULT: LeadTime = LeadTime {
        hours: 2,
        minutes: 30,
    };
    pub const DOMESTIC_DEFAULT: LeadTime = LeadTime {
        hours: 1,
        minutes: 0,
    };

    pub fn from_hours(hours: f64) -> Result<Self> {
        if !hours.is_finite() || !(CLOSE_OFFSET_HOURS as f64..=MAX_LEAD_HOURS).contains(&hours) {
            return Err(JekinError::InvalidLeadTime(hours));
        }

        let whole = hours.trunc();
        let minutes = ((hours - whole) * 60.0).round();

        Ok(Self {
            hours: whole as i64,
            minutes: minutes as i64,
        })
    }

    pub fn as_duration(&self) -> Duration {
        Duration::hours(self.hours) + Duration::minutes(self.minutes)
    }

    pub fn as_hours(&self) -> f64 {
        self.hours as f64 + self.minutes as f64 / 60.0
    }

    /// True when opening and closing coincide
    pub fn is_zero_width(&self) -> bool {
        self.as_duration() == close_offset()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckInWindow {
    pub opens_at: DateTime<Utc>,
    pub closes_at: DateTime<Utc>,
}

impl CheckInWindow {
    /// `None` only when the departure sits at the very edge of the
    /// representable date range
    pub fn for_departure(departure: DateTime<Utc>, lead: LeadTime) -> Option<Self> {
        let window = Self {
            opens_at: departure.checked_sub_signed(lead.as_duration())?,
            closes_at: departure.checked_sub_signed(close_offset())?,
        };
        debug_assert!(window.opens_at <= window.closes_at);
        Some(window)
    }

    pub fn width(&self) -> Duration {
        self.closes_at - self.opens_at
    }
}
