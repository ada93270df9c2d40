use chrono::{NaiveDateTime, TimeDelta};

/// A self-rescheduling periodic task reduced to its single pending deadline.
///
/// At most one occurrence is ever pending, so a chain can never run twice
/// in parallel with itself. Cancelling an idle chain is a no-op.
#[derive(Debug, Clone)]
pub struct TimerChain {
    name: &'static str,
    period: TimeDelta,
    due: Option<NaiveDateTime>,
}

impl TimerChain {
    pub fn new(name: &'static str, period: TimeDelta) -> Self {
        Self {
            name,
            period,
            due: None,
        }
    }

    pub fn due(&self) -> Option<NaiveDateTime> {
        self.due
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Arrange the next occurrence one period after `now`, replacing any
    /// pending one.
    pub fn schedule(&mut self, now: NaiveDateTime) {
        self.due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        if self.due.take().is_some() {
            tracing::debug!(chain = self.name, "cancelled pending tick");
        }
    }

    /// Consume the pending occurrence if it is due at `now`.
    ///
    /// The tick body must call [`TimerChain::schedule`] again to keep the
    /// chain alive.
    pub fn take_due(&mut self, now: NaiveDateTime) -> bool {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
