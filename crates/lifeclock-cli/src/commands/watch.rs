use std::io;
use std::rc::Rc;

use clap::Args;
use lifeclock_core::driver::run_until_stopped;
use lifeclock_core::{Config, Engine, MonotonicClock, TickSource};
use tokio::sync::Notify;

use super::BirthArgs;
use crate::render::{self, CursorGuard};

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub birth: BirthArgs,
    /// Exit after this many refresh ticks instead of waiting for Ctrl-C
    #[arg(long)]
    pub ticks: Option<u64>,
}

/// Keep the display live until Ctrl-C.
pub fn run(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch(args, config))
}

async fn watch(args: WatchArgs, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = Engine::with_clock(config, MonotonicClock::new());
    let rates = engine.config().rates.clone();
    let done = Rc::new(Notify::new());

    let trigger = Rc::clone(&done);
    let tick_limit = args.ticks;
    engine.on_snapshot(move |snap| {
        if let Err(e) = render::draw(&mut io::stdout().lock(), snap, &rates) {
            tracing::warn!(error = %e, "failed to draw frame");
        }
        let limit_reached = tick_limit
            .is_some_and(|n| snap.source == TickSource::Refresh && snap.refresh_count >= n);
        if limit_reached {
            trigger.notify_one();
        }
    });

    let _cursor = CursorGuard::new()?;
    args.birth.apply(&mut engine)?;

    let shutdown = async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "could not listen for Ctrl-C");
                    done.notified().await;
                }
            }
            () = done.notified() => {}
        }
    };
    run_until_stopped(&mut engine, shutdown).await;
    Ok(())
}
