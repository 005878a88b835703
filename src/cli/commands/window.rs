use crate::config::Config;
use crate::error::{JekinError, Result};
use crate::models::LegKind;
use crate::timestamp::{format_in_zone, parse_in_zone};
use crate::window::CheckInWindow;

const WINDOW_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn execute(departure: String, domestic: bool) -> Result<()> {
    let config = Config::load()?;
    let policy = config.policy()?;

    let kind = if domestic {
        LegKind::Domestic
    } else {
        LegKind::International
    };
    let lead = policy.lead_for(kind);

    let departs_at = parse_in_zone(&departure, policy.zone)?;
    let window = CheckInWindow::for_departure(departs_at, lead).ok_or_else(|| {
        JekinError::InvalidTimestamp(format!("{} is out of range", departure.trim()))
    })?;

    println!("Departure:       {} ({})", departure.trim(), kind.as_str());
    println!("Lead time:       {} hours", lead.as_hours());
    println!(
        "Check-in opens:  {}",
        format_in_zone(&window.opens_at, policy.zone, WINDOW_FORMAT)
    );
    println!(
        "Check-in closes: {}",
        format_in_zone(&window.closes_at, policy.zone, WINDOW_FORMAT)
    );
    println!("Open for:        {} minutes", window.width().num_minutes());
    println!("Time zone:       {}", policy.zone.name());

    if lead.is_zero_width() {
        println!("\nNote: opening and closing coincide, so check-in never shows as open.");
    }

    Ok(())
}
