//! # LifeClock Core Library
//!
//! Turns a birth moment into a continuously refreshed breakdown of time
//! lived, and drives the two animations that visualise progress toward a
//! life-expectancy horizon. Presentation layers (the CLI, or any GUI) only
//! read [`DisplaySnapshot`]s and call the engine's entry points.
//!
//! ## Architecture
//!
//! - **Calculator**: pure elapsed-time breakdown with leap-day counting
//! - **Engine**: refresh scheduler owning the birth moment and three
//!   self-rescheduling timer chains (refresh, progress, beacon)
//! - **Animators**: eased progress indicator and pulsing beacon color
//! - **Driver**: tokio loop sleeping until the engine's next deadline
//!
//! ## Key Components
//!
//! - [`Engine`]: entry points `set_birth_moment`, `stop`, `on_snapshot`
//! - [`DurationCalculator`]: `compute(birth, now)`
//! - [`Config`]: TOML configuration

pub mod animator;
pub mod calculator;
pub mod clock;
pub mod color;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod input;
pub mod report;
pub mod snapshot;

pub use animator::{BeaconPulseAnimator, ProgressAnimator, ProgressState, TimerChain};
pub use calculator::{compute, count_leap_days, is_leap_year, DurationBreakdown, DurationCalculator};
pub use clock::{Clock, ManualClock, MonotonicClock, SystemClock};
pub use color::{band_color, blend, Rgb};
pub use config::Config;
pub use engine::Engine;
pub use error::{ConfigError, InputError};
pub use input::{from_age_years, from_calendar_date};
pub use snapshot::{DisplaySnapshot, TickSource};
