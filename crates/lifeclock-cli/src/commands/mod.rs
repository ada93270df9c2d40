pub mod config;
pub mod report;
pub mod watch;

use clap::Args;
use lifeclock_core::{Engine, InputError};

/// How the birth moment is given.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct BirthArgs {
    /// Current age in years (365.25-day years, fractions allowed)
    #[arg(long, allow_negative_numbers = true)]
    pub age: Option<f64>,
    /// Date of birth as DD-MM-YYYY
    #[arg(long)]
    pub dob: Option<String>,
}

impl BirthArgs {
    /// Hand the birth moment to the engine, starting its timer chains.
    pub fn apply(&self, engine: &mut Engine) -> Result<(), InputError> {
        match (self.age, self.dob.as_deref()) {
            (Some(age), _) => engine.set_age_years(age),
            (None, Some(dob)) => engine.set_calendar_date(dob),
            // clap's required group rules this out.
            (None, None) => Ok(()),
        }
    }
}
