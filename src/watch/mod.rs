// Periodic re-evaluation of an itinerary
use crate::clock::Clock;
use crate::error::Result;
use crate::itinerary::ItinerarySource;
use crate::models::Itinerary;
use crate::report::{build_report, ItineraryReport};
use crate::status::CheckInPolicy;
use std::future::Future;
use std::io::BufRead;
use std::time::Duration;
use tokio::sync::mpsc;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    Startup,
    Tick,
    /// User asked for a refresh; the itinerary is re-fetched too
    Resume,
}

/// What the watch loop keeps between refreshes
pub struct WatchState {
    source: ItinerarySource,
    itinerary: Itinerary,
    policy: CheckInPolicy,
    briefing_hour: u32,
    last_error: Option<String>,
}

impl WatchState {
    pub async fn connect(
        source: ItinerarySource,
        policy: CheckInPolicy,
        briefing_hour: u32,
    ) -> Result<Self> {
        let itinerary = source.load().await?;
        Ok(Self {
            source,
            itinerary,
            policy,
            briefing_hour,
            last_error: None,
        })
    }

    /// Re-fetch the itinerary, keeping the previous one if that fails
    pub async fn reload(&mut self) {
        match self.source.load().await {
            Ok(itinerary) => {
                self.itinerary = itinerary;
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!("Itinerary refresh failed: {}", e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn evaluate(&self, clock: &dyn Clock) -> ItineraryReport {
        build_report(clock, &self.itinerary, &self.policy, self.briefing_hour)
    }

    pub fn render(&self, clock: &dyn Clock, interval: Duration) -> String {
        let mut out = self.evaluate(clock).render_text();
        if let Some(err) = &self.last_error {
            out.push_str(&format!("\n  Last refresh failed: {}\n", err));
        }
        out.push_str(&format!(
            "\n  Source: {} | refresh every {}s | Enter: refresh now | Ctrl-C: quit\n",
            self.source.describe(),
            interval.as_secs()
        ));
        out
    }
}

/// Forward each line typed on stdin as a refresh request.
///
/// Reads happen on a plain thread: a blocking stdin read cannot be cancelled,
/// and parking it on the runtime's blocking pool would keep the runtime from
/// shutting down after Ctrl-C. The channel closes at EOF.
fn spawn_stdin_reader() -> Result<mpsc::Receiver<()>> {
    let (tx, rx) = mpsc::channel(1);
    std::thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                if let Err(e) = line {
                    tracing::warn!("Stopped reading stdin: {}", e);
                    break;
                }
                if tx.blocking_send(()).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

/// Redraw on every tick, and re-fetch plus redraw whenever a line arrives on
/// stdin, until Ctrl-C.
pub async fn run(state: WatchState, clock: &dyn Clock, interval: Duration) -> Result<()> {
    let refresh = spawn_stdin_reader()?;
    let interrupted = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    run_until(state, clock, interval, refresh, interrupted).await;
    Ok(())
}

/// The watch loop proper. Each message on `refresh` re-fetches and restarts
/// the tick interval; the loop ends as soon as `shutdown` resolves.
pub async fn run_until<F>(
    mut state: WatchState,
    clock: &dyn Clock,
    interval: Duration,
    mut refresh: mpsc::Receiver<()>,
    shutdown: F,
) where
    F: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    tokio::pin!(shutdown);
    let mut refresh_open = true;
    let mut reason = RefreshReason::Startup;

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::debug!("Watch interrupted");
                break;
            }
            _ = ticker.tick() => {
                tracing::debug!("Refreshing check-in status ({:?})", reason);
                print!("{}{}", CLEAR_SCREEN, state.render(clock, interval));
                reason = RefreshReason::Tick;
            }
            request = refresh.recv(), if refresh_open => {
                match request {
                    Some(()) => {
                        tracing::debug!("Refreshing check-in status ({:?})", RefreshReason::Resume);
                        state.reload().await;
                        print!("{}{}", CLEAR_SCREEN, state.render(clock, interval));
                        ticker.reset();
                    }
                    None => refresh_open = false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;
    use crate::models::CheckInState;
    use crate::timestamp::parse_in_zone;
    use chrono_tz::Pacific::Efate;
    use std::fs;
    use tempfile::TempDir;

    const ONE_LEG: &str = r#"[{ "flightNumber": "NF10",
        "departureDate": "2025-06-15 14:30:00", "isInternational": true }]"#;

    async fn state_for(dir: &TempDir, body: &str) -> WatchState {
        let path = dir.path().join("itinerary.json");
        fs::write(&path, body).unwrap();
        WatchState::connect(ItinerarySource::File(path), CheckInPolicy::default(), 8)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_successive_ticks_follow_clock() {
        let dir = TempDir::new().unwrap();
        let state = state_for(&dir, ONE_LEG).await;

        let readings = [
            "2025-06-15 11:59:00",
            "2025-06-15 12:00:00",
            "2025-06-15 13:30:00",
        ];
        let mut clock = MockClock::new();
        let mut seq = mockall::Sequence::new();
        for reading in readings {
            let now = parse_in_zone(reading, Efate).unwrap();
            clock
                .expect_now()
                .times(1)
                .in_sequence(&mut seq)
                .return_const(now);
        }

        let states: Vec<_> = (0..3)
            .map(|_| state.evaluate(&clock).legs[0].status.state)
            .collect();
        assert_eq!(
            states,
            vec![
                CheckInState::NotYetOpen,
                CheckInState::Open,
                CheckInState::Closed
            ]
        );
    }

    #[tokio::test]
    async fn test_reload_keeps_previous_itinerary_on_failure() {
        let dir = TempDir::new().unwrap();
        let mut state = state_for(&dir, ONE_LEG).await;

        fs::write(dir.path().join("itinerary.json"), "not json").unwrap();
        state.reload().await;
        assert!(state.last_error.is_some());
        assert_eq!(state.itinerary.flights.len(), 1);

        fs::write(dir.path().join("itinerary.json"), "[]").unwrap();
        state.reload().await;
        assert!(state.last_error.is_none());
        assert!(state.itinerary.flights.is_empty());
    }

    #[tokio::test]
    async fn test_loop_ends_on_interrupt_while_stdin_stays_open() {
        let dir = TempDir::new().unwrap();
        let state = state_for(&dir, ONE_LEG).await;

        let mut clock = MockClock::new();
        clock
            .expect_now()
            .return_const(parse_in_zone("2025-06-15 12:00:00", Efate).unwrap());

        // Sender held open for the whole run, like a terminal nobody types into
        let (_keep_open, refresh) = mpsc::channel(1);
        let interrupted = tokio::time::sleep(Duration::from_millis(50));

        let finished = tokio::time::timeout(
            Duration::from_secs(5),
            run_until(state, &clock, Duration::from_secs(60), refresh, interrupted),
        )
        .await;
        assert!(finished.is_ok());
    }

    #[tokio::test]
    async fn test_refresh_request_reloads_and_redraws() {
        let dir = TempDir::new().unwrap();
        let state = state_for(&dir, ONE_LEG).await;
        fs::write(dir.path().join("itinerary.json"), "[]").unwrap();

        // One redraw at startup, one for the refresh request
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .times(2)
            .return_const(parse_in_zone("2025-06-15 12:00:00", Efate).unwrap());

        let (tx, refresh) = mpsc::channel(1);
        tx.send(()).await.unwrap();
        drop(tx);

        run_until(
            state,
            &clock,
            Duration::from_secs(60),
            refresh,
            tokio::time::sleep(Duration::from_millis(100)),
        )
        .await;
    }

    #[tokio::test]
    async fn test_render_footer() {
        let dir = TempDir::new().unwrap();
        let state = state_for(&dir, ONE_LEG).await;

        let mut clock = MockClock::new();
        clock
            .expect_now()
            .return_const(parse_in_zone("2025-06-15 12:00:00", Efate).unwrap());

        let text = state.render(&clock, Duration::from_secs(60));
        assert!(text.contains("JEK IN OPEN"));
        assert!(text.contains("refresh every 60s"));
    }
}
