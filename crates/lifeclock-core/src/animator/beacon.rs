//! Pulsing alert color shown once life progress reaches the red band.

use chrono::{NaiveDateTime, TimeDelta};

use super::chain::TimerChain;
use crate::color::{blend, Rgb, RED, WARN};

/// Phase units in one full rise-and-fall cycle.
pub const PHASE_PERIOD: u32 = 200;
/// Phase units advanced per tick.
pub const PHASE_STEP: u32 = 2;

/// Fold a phase into a symmetric triangle wave in `[0, 1]`.
///
/// Rises from 0 at phase 0 to 1 at phase 100, then falls back.
pub fn triangle(phase: u32) -> f64 {
    let t = f64::from(phase % PHASE_PERIOD) / f64::from(PHASE_PERIOD / 2);
    if t > 1.0 {
        2.0 - t
    } else {
        t
    }
}

#[derive(Debug, Clone)]
pub struct BeaconPulseAnimator {
    phase: u32,
    active: bool,
    color: Rgb,
    chain: TimerChain,
}

impl BeaconPulseAnimator {
    pub fn new(period: TimeDelta) -> Self {
        Self {
            phase: 0,
            active: false,
            color: RED,
            chain: TimerChain::new("beacon", period),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phase(&self) -> u32 {
        self.phase
    }

    /// Current pulse color. Only meaningful while active.
    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn next_due(&self) -> Option<NaiveDateTime> {
        self.chain.due()
    }

    /// Begin pulsing from phase 0, taking the first step immediately.
    /// Returns false if already running.
    pub fn start(&mut self, now: NaiveDateTime) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.phase = 0;
        self.step(now);
        tracing::info!("beacon activated");
        true
    }

    /// Stop pulsing. Safe to call when inactive.
    pub fn stop(&mut self) {
        self.chain.cancel();
        if self.active {
            self.active = false;
            tracing::info!("beacon deactivated");
        }
    }

    /// Run the tick if it is due. Returns true if one ran.
    pub fn poll(&mut self, now: NaiveDateTime) -> bool {
        if !self.active || !self.chain.take_due(now) {
            return false;
        }
        self.step(now);
        true
    }

    fn step(&mut self, now: NaiveDateTime) {
        self.phase = (self.phase + PHASE_STEP) % PHASE_PERIOD;
        self.color = blend(RED, WARN, triangle(self.phase));
        self.chain.schedule(now);
    }
}
