use clap::Args;
use lifeclock_core::report::{progress_caption, Report};
use lifeclock_core::{Config, Engine};

use super::BirthArgs;

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub birth: BirthArgs,
    /// Print the display snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

/// Compute one refresh tick and print it.
pub fn run(args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut engine = Engine::new(config);
    args.birth.apply(&mut engine)?;
    let snapshot = engine.snapshot().clone();
    engine.stop();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    if let Some(stats) = &snapshot.stats {
        let rates = &engine.config().rates;
        println!("{}", Report { stats, rates });
    }
    println!(
        "{}",
        progress_caption(snapshot.target_percent(), snapshot.life_expectancy_years)
    );
    Ok(())
}
