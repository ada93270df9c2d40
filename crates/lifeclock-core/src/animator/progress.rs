//! Eased progress indicator.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --set_target (gap > ε)--> Animating --tick (gap ≤ ε, snap)--> Idle
//! ```
//!
//! Each tick removes a tenth of the remaining gap, a first-order lag rather
//! than a fixed-duration tween.

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;

use super::chain::TimerChain;

/// Gap below which the displayed value snaps onto the target.
pub const CONVERGENCE_EPSILON: f64 = 0.5;

/// Fraction of the remaining gap closed per tick is `1 / EASE_DIVISOR`.
pub const EASE_DIVISOR: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ProgressState {
    pub displayed_percent: f64,
    pub target_percent: f64,
}

impl ProgressState {
    pub fn gap(&self) -> f64 {
        self.target_percent - self.displayed_percent
    }
}

#[derive(Debug, Clone)]
pub struct ProgressAnimator {
    state: ProgressState,
    chain: TimerChain,
}

impl ProgressAnimator {
    pub fn new(period: TimeDelta) -> Self {
        Self {
            state: ProgressState::default(),
            chain: TimerChain::new("progress", period),
        }
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.chain.is_pending()
    }

    pub fn next_due(&self) -> Option<NaiveDateTime> {
        self.chain.due()
    }

    /// Retarget the animation, clamped to `[0, 100]`.
    ///
    /// Starts the tick chain when the gap exceeds epsilon and no tick is
    /// pending. A sub-epsilon gap while idle snaps immediately, the same
    /// as a converging tick would. Returns true if the displayed value
    /// changed synchronously.
    pub fn set_target(&mut self, value: f64, now: NaiveDateTime) -> bool {
        self.state.target_percent = clamp_percent(value);
        if self.chain.is_pending() {
            return false;
        }
        if self.state.gap().abs() > CONVERGENCE_EPSILON {
            self.chain.schedule(now);
            false
        } else if self.state.displayed_percent != self.state.target_percent {
            self.state.displayed_percent = self.state.target_percent;
            true
        } else {
            false
        }
    }

    /// Run the tick if it is due. Returns true if one ran.
    pub fn poll(&mut self, now: NaiveDateTime) -> bool {
        if !self.chain.take_due(now) {
            return false;
        }
        self.step(now);
        true
    }

    fn step(&mut self, now: NaiveDateTime) {
        self.state.displayed_percent += self.state.gap() / EASE_DIVISOR;
        if self.state.gap().abs() <= CONVERGENCE_EPSILON {
            self.state.displayed_percent = self.state.target_percent;
            tracing::trace!(percent = self.state.displayed_percent, "progress converged");
        } else {
            self.chain.schedule(now);
        }
    }

    /// Cancel any pending tick, leaving the displayed value where it is.
    pub fn stop(&mut self) {
        self.chain.cancel();
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const PERIOD_MS: i64 = 30;

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn animator() -> ProgressAnimator {
        ProgressAnimator::new(TimeDelta::milliseconds(PERIOD_MS))
    }

    /// Drive ticks until idle, returning how many ran.
    fn run_to_idle(anim: &mut ProgressAnimator, mut now: NaiveDateTime) -> usize {
        let mut ticks = 0;
        while anim.is_animating() {
            now += TimeDelta::milliseconds(PERIOD_MS);
            assert!(anim.poll(now));
            ticks += 1;
            assert!(ticks < 1_000, "animation never converged");
        }
        ticks
    }

    #[test]
    fn starts_idle_at_zero() {
        let anim = animator();
        assert!(!anim.is_animating());
        assert_eq!(anim.state(), ProgressState::default());
    }

    #[test]
    fn converges_from_zero_to_hundred() {
        let mut anim = animator();
        anim.set_target(100.0, t0());
        assert!(anim.is_animating());

        let mut now = t0();
        let mut previous_gap = 100.0;
        let mut ticks = 0;
        while anim.is_animating() {
            now += TimeDelta::milliseconds(PERIOD_MS);
            anim.poll(now);
            ticks += 1;
            let gap = anim.state().gap().abs();
            if anim.is_animating() {
                assert!((gap - previous_gap * 0.9).abs() < 1e-9);
            }
            previous_gap = gap;
        }

        // 100 * 0.9^51 is the first gap at or below 0.5.
        assert_eq!(ticks, 51);
        assert_eq!(anim.state().displayed_percent, 100.0);
    }

    #[test]
    fn first_tick_closes_a_tenth() {
        let mut anim = animator();
        anim.set_target(100.0, t0());
        assert!(anim.poll(t0() + TimeDelta::milliseconds(PERIOD_MS)));
        assert!((anim.state().displayed_percent - 10.0).abs() < 1e-12);
    }

    #[test]
    fn tick_not_due_before_period() {
        let mut anim = animator();
        anim.set_target(60.0, t0());
        assert!(!anim.poll(t0() + TimeDelta::milliseconds(PERIOD_MS - 1)));
        assert_eq!(anim.state().displayed_percent, 0.0);
    }

    #[test]
    fn animates_downward() {
        let mut anim = animator();
        anim.set_target(80.0, t0());
        run_to_idle(&mut anim, t0());
        anim.set_target(20.0, t0());
        let ticks = run_to_idle(&mut anim, t0());
        assert!(ticks > 0);
        assert_eq!(anim.state().displayed_percent, 20.0);
    }

    #[test]
    fn target_is_clamped() {
        let mut anim = animator();
        anim.set_target(250.0, t0());
        assert_eq!(anim.state().target_percent, 100.0);
        anim.set_target(-3.0, t0());
        assert_eq!(anim.state().target_percent, 0.0);
        anim.set_target(f64::NAN, t0());
        assert_eq!(anim.state().target_percent, 0.0);
    }

    #[test]
    fn small_gap_snaps_without_ticking() {
        let mut anim = animator();
        assert!(anim.set_target(0.4, t0()));
        assert!(!anim.is_animating());
        assert_eq!(anim.state().displayed_percent, 0.4);
        assert!(!anim.set_target(0.4, t0()));
    }

    #[test]
    fn retarget_while_animating_keeps_single_chain() {
        let mut anim = animator();
        anim.set_target(100.0, t0());
        let due = anim.next_due();
        anim.set_target(50.0, t0() + TimeDelta::milliseconds(10));
        assert_eq!(anim.next_due(), due);
        run_to_idle(&mut anim, t0());
        assert_eq!(anim.state().displayed_percent, 50.0);
    }

    #[test]
    fn stop_freezes_displayed_value() {
        let mut anim = animator();
        anim.set_target(100.0, t0());
        anim.poll(t0() + TimeDelta::milliseconds(PERIOD_MS));
        anim.stop();
        anim.stop();
        assert!(!anim.is_animating());
        assert!(!anim.poll(t0() + TimeDelta::seconds(10)));
        assert!((anim.state().displayed_percent - 10.0).abs() < 1e-12);
    }
}
