use crate::cli::SourceArgs;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::error::Result;
use crate::itinerary::ItinerarySource;
use crate::watch::{self, WatchState};
use std::time::Duration;

pub async fn execute(source: SourceArgs, interval: Option<u64>) -> Result<()> {
    let config = Config::load()?;
    let policy = config.policy()?;
    let briefing_hour = config.briefing_hour()?;

    let interval = interval
        .map(|secs| Duration::from_secs(secs.max(1)))
        .unwrap_or_else(|| config.refresh_interval());

    let source = ItinerarySource::resolve(source.file, source.url, &config)?;
    tracing::info!(
        "Watching {} every {}s",
        source.describe(),
        interval.as_secs()
    );

    let state = WatchState::connect(source, policy, briefing_hour).await?;
    watch::run(state, &SystemClock, interval).await
}
