mod beacon;
mod chain;
mod progress;

pub use beacon::{triangle, BeaconPulseAnimator, PHASE_PERIOD, PHASE_STEP};
pub use chain::TimerChain;
pub use progress::{ProgressAnimator, ProgressState, CONVERGENCE_EPSILON, EASE_DIVISOR};
