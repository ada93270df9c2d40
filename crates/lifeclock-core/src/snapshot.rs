use chrono::NaiveDateTime;
use serde::Serialize;

use crate::animator::ProgressState;
use crate::calculator::DurationBreakdown;
use crate::color::Rgb;

/// Which timer chain produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TickSource {
    /// Nothing has ticked yet.
    Idle,
    Refresh,
    Progress,
    Beacon,
    /// A synchronous entry point such as `stop()`.
    Control,
}

/// Everything the presentation layer needs to draw one frame.
///
/// Replaced wholesale on every tick; readers only ever see complete values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySnapshot {
    pub birth: Option<NaiveDateTime>,
    /// `None` until the first refresh tick after a birth moment is set.
    pub stats: Option<DurationBreakdown>,
    pub progress: ProgressState,
    pub beacon_active: bool,
    pub color: Rgb,
    pub life_expectancy_years: f64,
    /// Refresh ticks run since the birth moment was set.
    pub refresh_count: u64,
    pub source: TickSource,
    pub at: NaiveDateTime,
}

impl DisplaySnapshot {
    /// Share of life expectancy lived, as driven by the latest refresh.
    pub fn target_percent(&self) -> f64 {
        self.progress.target_percent
    }

    pub fn displayed_percent(&self) -> f64 {
        self.progress.displayed_percent
    }
}
