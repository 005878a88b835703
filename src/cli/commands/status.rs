use crate::cli::SourceArgs;
use crate::clock::{Clock, FixedClock, SystemClock};
use crate::config::Config;
use crate::error::Result;
use crate::itinerary::ItinerarySource;
use crate::report::build_report;
use crate::timestamp::parse_in_zone;

pub async fn execute(source: SourceArgs, at: Option<String>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let policy = config.policy()?;
    let briefing_hour = config.briefing_hour()?;

    let clock: Box<dyn Clock> = match at {
        Some(raw) => Box::new(FixedClock(parse_in_zone(&raw, policy.zone)?)),
        None => Box::new(SystemClock),
    };

    let source = ItinerarySource::resolve(source.file, source.url, &config)?;
    let itinerary = source.load().await?;

    let report = build_report(clock.as_ref(), &itinerary, &policy, briefing_hour);
    tracing::debug!(
        "Evaluated {} legs, {} open for check-in",
        report.legs.len(),
        report.open_count()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    Ok(())
}
