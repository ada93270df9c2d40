//! Refresh scheduler and owner of all engine state.
//!
//! The engine is a clock-driven state machine with no internal threads.
//! The caller invokes `poll()` whenever `next_deadline()` has passed; every
//! due timer chain then runs to completion, in the order
//! refresh → progress → beacon.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = Engine::new(Config::default());
//! engine.on_snapshot(|snap| render(snap));
//! engine.set_birth_moment(birth)?;   // immediate refresh tick
//! // In a loop:
//! sleep_until(engine.next_deadline());
//! engine.poll();
//! ```

use chrono::NaiveDateTime;

use crate::animator::{BeaconPulseAnimator, ProgressAnimator, TimerChain};
use crate::calculator::{DurationBreakdown, DurationCalculator};
use crate::clock::{truncate_to_millis, Clock, SystemClock};
use crate::color::{band_color, RED_FROM_PERCENT};
use crate::config::Config;
use crate::error::InputError;
use crate::input;
use crate::snapshot::{DisplaySnapshot, TickSource};

pub type SnapshotCallback = Box<dyn FnMut(&DisplaySnapshot)>;

pub struct Engine {
    config: Config,
    clock: Box<dyn Clock>,
    calculator: DurationCalculator,
    birth: Option<NaiveDateTime>,
    refresh: TimerChain,
    refresh_count: u64,
    stats: Option<DurationBreakdown>,
    progress: ProgressAnimator,
    beacon: BeaconPulseAnimator,
    snapshot: DisplaySnapshot,
    on_snapshot: Option<SnapshotCallback>,
}

impl Engine {
    /// Engine reading the local wall clock.
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, SystemClock)
    }

    pub fn with_clock(config: Config, clock: impl Clock + 'static) -> Self {
        let timing = &config.timing;
        let refresh = TimerChain::new("refresh", timing.refresh_period());
        let progress = ProgressAnimator::new(timing.progress_period());
        let beacon = BeaconPulseAnimator::new(timing.beacon_period());
        let calculator = DurationCalculator::new(config.rates.clone());
        let now = clock.now();

        let mut engine = Self {
            config,
            clock: Box::new(clock),
            calculator,
            birth: None,
            refresh,
            refresh_count: 0,
            stats: None,
            progress,
            beacon,
            snapshot: placeholder_snapshot(now),
            on_snapshot: None,
        };
        engine.snapshot = engine.build_snapshot(TickSource::Idle, now);
        engine
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn birth_moment(&self) -> Option<NaiveDateTime> {
        self.birth
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> &DisplaySnapshot {
        &self.snapshot
    }

    /// True while the refresh chain is live.
    pub fn is_running(&self) -> bool {
        self.refresh.is_pending()
    }

    pub fn is_animating(&self) -> bool {
        self.progress.is_animating()
    }

    pub fn beacon_phase(&self) -> u32 {
        self.beacon.phase()
    }

    /// Earliest pending tick across all three chains.
    pub fn next_deadline(&self) -> Option<NaiveDateTime> {
        [
            self.refresh.due(),
            self.progress.next_due(),
            self.beacon.next_due(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Wall time left until [`Engine::next_deadline`], zero if overdue.
    pub fn time_until_next_deadline(&self) -> Option<std::time::Duration> {
        let deadline = self.next_deadline()?;
        Some((deadline - self.clock.now()).to_std().unwrap_or_default())
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Register the callback invoked with every new snapshot, replacing any
    /// previous one.
    pub fn on_snapshot(&mut self, callback: impl FnMut(&DisplaySnapshot) + 'static) {
        self.on_snapshot = Some(Box::new(callback));
    }

    /// Accept a new birth moment and restart all timer chains.
    ///
    /// Runs one refresh tick immediately. On error nothing changes.
    /// Sub-millisecond precision is dropped.
    pub fn set_birth_moment(&mut self, birth: NaiveDateTime) -> Result<(), InputError> {
        let birth = truncate_to_millis(birth);
        let now = self.clock.now();
        if birth > now {
            tracing::warn!(%birth, %now, "rejected birth moment in the future");
            return Err(InputError::FutureBirthMoment { birth, now });
        }

        self.cancel_chains();
        self.birth = Some(birth);
        self.stats = None;
        self.refresh_count = 0;
        tracing::info!(%birth, "birth moment accepted");
        self.refresh_tick(now);
        Ok(())
    }

    /// [`Engine::set_birth_moment`] for someone `age_years` old right now.
    pub fn set_age_years(&mut self, age_years: f64) -> Result<(), InputError> {
        let birth = input::from_age_years(age_years, self.clock.now()).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected age");
        })?;
        self.set_birth_moment(birth)
    }

    /// [`Engine::set_birth_moment`] from `DD-MM-YYYY` text.
    pub fn set_calendar_date(&mut self, text: &str) -> Result<(), InputError> {
        let birth = input::from_calendar_date(text).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected date");
        })?;
        self.set_birth_moment(birth)
    }

    /// Cancel every timer chain. Safe to call repeatedly.
    ///
    /// The beacon color reverts to the band color of the displayed percent.
    pub fn stop(&mut self) {
        let was_live = self.next_deadline().is_some() || self.beacon.is_active();
        self.cancel_chains();
        if was_live {
            tracing::debug!("engine stopped");
            let now = self.clock.now();
            self.publish(TickSource::Control, now);
        }
    }

    /// Run every chain whose deadline has passed.
    pub fn poll(&mut self) {
        let now = self.clock.now();
        if self.refresh.take_due(now) {
            self.refresh_tick(now);
        }
        if self.progress.poll(now) {
            self.publish(TickSource::Progress, now);
        }
        if self.beacon.poll(now) {
            self.publish(TickSource::Beacon, now);
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn cancel_chains(&mut self) {
        self.refresh.cancel();
        self.progress.stop();
        self.beacon.stop();
    }

    fn refresh_tick(&mut self, now: NaiveDateTime) {
        let Some(birth) = self.birth else {
            return;
        };

        match self.calculator.compute(birth, now) {
            Some(stats) => self.stats = Some(stats),
            None => tracing::warn!(%birth, %now, "clock is behind the birth moment"),
        }
        self.refresh_count += 1;

        let target = self
            .stats
            .map(|s| self.life_percent(s.years_fractional))
            .unwrap_or(0.0);
        self.progress.set_target(target, now);

        if target >= RED_FROM_PERCENT {
            self.beacon.start(now);
        } else {
            self.beacon.stop();
        }

        self.refresh.schedule(now);
        self.publish(TickSource::Refresh, now);
    }

    fn life_percent(&self, years: f64) -> f64 {
        (years / self.config.life.expectancy_years * 100.0).min(100.0)
    }

    fn publish(&mut self, source: TickSource, now: NaiveDateTime) {
        self.snapshot = self.build_snapshot(source, now);
        if let Some(callback) = self.on_snapshot.as_mut() {
            callback(&self.snapshot);
        }
    }

    fn build_snapshot(&self, source: TickSource, now: NaiveDateTime) -> DisplaySnapshot {
        let progress = self.progress.state();
        let color = if self.beacon.is_active() {
            self.beacon.color()
        } else {
            band_color(progress.displayed_percent)
        };
        DisplaySnapshot {
            birth: self.birth,
            stats: self.stats,
            progress,
            beacon_active: self.beacon.is_active(),
            color,
            life_expectancy_years: self.config.life.expectancy_years,
            refresh_count: self.refresh_count,
            source,
            at: now,
        }
    }
}

fn placeholder_snapshot(now: NaiveDateTime) -> DisplaySnapshot {
    DisplaySnapshot {
        birth: None,
        stats: None,
        progress: Default::default(),
        beacon_active: false,
        color: band_color(0.0),
        life_expectancy_years: 0.0,
        refresh_count: 0,
        source: TickSource::Idle,
        at: now,
    }
}
