//! Fixed-period sampling: poll, parse, store, log, refresh.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::error::Result;
use crate::logger::Logger;
use crate::plot::{PlotController, PlotSurface};
use crate::protocol::{self, MalformedSample, Sample};
use crate::source::DataSource;
use crate::store::SeriesStore;

/// Default delay between ticks.
pub const DEFAULT_UPDATE_DELAY: Duration = Duration::from_millis(100);

/// Fixed-period schedule checked from the UI loop.
///
/// Fires at most once per call to [`Ticker::poll_due`]. A tick that runs long
/// pushes the next one back; missed ticks are never replayed in a burst.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Returns `true` if a tick should run at `now`. The first call always fires.
    pub fn poll_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now < due => false,
            Some(due) => {
                let next = due + self.period;
                self.next_due = Some(if next <= now { now + self.period } else { next });
                true
            }
            None => {
                self.next_due = Some(now + self.period);
                true
            }
        }
    }

    /// Time left until the next tick is due.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    Accepted(Sample),
    Rejected(MalformedSample),
}

/// Owns every pipeline stage and runs them in order on each tick.
pub struct SampleLoop<S: PlotSurface> {
    source: DataSource,
    store: SeriesStore,
    logger: Logger,
    plot: PlotController<S>,
    rejected: u64,
}

impl<S: PlotSurface> SampleLoop<S> {
    pub fn new(source: DataSource, logger: Logger, plot: PlotController<S>) -> Self {
        Self {
            source,
            store: SeriesStore::new(),
            logger,
            plot,
            rejected: 0,
        }
    }

    pub fn tick(&mut self) -> Result<Tick> {
        self.tick_with(Local::now)
    }

    /// Run one tick, stamping an accepted sample with `now`.
    pub fn tick_at(&mut self, now: DateTime<Local>) -> Result<Tick> {
        self.tick_with(|| now)
    }

    /// Run one tick. `clock` is read after the source returns its line, so
    /// the timestamp reflects when the line arrived.
    ///
    /// A malformed line leaves the store, the log and the plot untouched. If
    /// the log write fails the sample is still stored and plotted, so the
    /// store may hold samples the log lacks.
    pub fn tick_with<F>(&mut self, clock: F) -> Result<Tick>
    where
        F: FnOnce() -> DateTime<Local>,
    {
        let line = self.source.poll();
        let sample = match protocol::parse_at(&line, clock()) {
            Ok(sample) => sample,
            Err(reason) => {
                self.rejected += 1;
                log::debug!("rejected line {line:?}: {reason}");
                return Ok(Tick::Rejected(reason));
            }
        };

        self.store.append(&sample);
        let logged = self.logger.write(&sample);
        self.plot.refresh(&self.store.snapshot());
        logged?;
        Ok(Tick::Accepted(sample))
    }

    /// Close the data source. Further polls yield nothing.
    pub fn shutdown(&mut self) {
        self.source.close();
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn plot(&self) -> &PlotController<S> {
        &self.plot
    }

    pub fn plot_mut(&mut self) -> &mut PlotController<S> {
        &mut self.plot
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Number of lines rejected so far.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::plot::Curve;
    use crate::source::SyntheticSource;
    use crate::surface::EguiSurface;

    #[test]
    fn first_poll_fires_then_waits_a_period() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(100));
        assert!(ticker.poll_due(t0));
        assert!(!ticker.poll_due(t0));
        assert!(!ticker.poll_due(t0 + Duration::from_millis(99)));
        assert_eq!(
            ticker.time_until_due(t0 + Duration::from_millis(40)),
            Duration::from_millis(60)
        );
        assert!(ticker.poll_due(t0 + Duration::from_millis(100)));
        assert!(!ticker.poll_due(t0 + Duration::from_millis(150)));
        assert!(ticker.poll_due(t0 + Duration::from_millis(205)));
    }

    #[test]
    fn long_tick_delays_instead_of_bursting() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(100));
        assert!(ticker.poll_due(t0));
        // Next frame arrives very late, e.g. after a slow serial read.
        let late = t0 + Duration::from_millis(1_050);
        assert!(ticker.poll_due(late));
        assert!(!ticker.poll_due(late + Duration::from_millis(10)));
        assert!(!ticker.poll_due(late + Duration::from_millis(99)));
        assert!(ticker.poll_due(late + Duration::from_millis(100)));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn failed_log_write_still_stores_and_plots() {
        let full = std::fs::OpenOptions::new()
            .write(true)
            .open("/dev/full")
            .unwrap();
        let logger = Logger::from_file("/dev/full", full);
        let mut sampler = SampleLoop::new(
            SyntheticSource::with_seed(9).into(),
            logger,
            PlotController::new(EguiSurface::new()),
        );

        let result = sampler.tick();
        assert!(matches!(result, Err(Error::Log { .. })), "{result:?}");
        assert_eq!(sampler.store().len(), 1);
        assert_eq!(sampler.plot().surface().points(Curve::Duty).len(), 1);
        assert_eq!(sampler.rejected(), 0);

        assert!(sampler.tick().is_err());
        assert_eq!(sampler.store().len(), 2);
        assert_eq!(sampler.plot().surface().points(Curve::TempA).len(), 2);
    }
}
