//! Terminal frame for the watch view.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use lifeclock_core::config::RatesConfig;
use lifeclock_core::report::{progress_caption, Report};
use lifeclock_core::{DisplaySnapshot, Rgb};

pub const BAR_WIDTH: usize = 50;

/// Filled cells for a percentage of a bar `width` cells wide.
pub fn bar_cells(percent: f64, width: usize) -> usize {
    let fraction = percent.clamp(0.0, 100.0) / 100.0;
    ((fraction * width as f64).round() as usize).min(width)
}

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Redraw the whole frame from the top-left corner.
pub fn draw(out: &mut impl Write, snap: &DisplaySnapshot, rates: &RatesConfig) -> io::Result<()> {
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;

    if let Some(stats) = &snap.stats {
        write!(out, "{}", Report { stats, rates })?;
        writeln!(out)?;
    }
    writeln!(
        out,
        "{}",
        progress_caption(snap.target_percent(), snap.life_expectancy_years)
    )?;

    let filled = bar_cells(snap.displayed_percent(), BAR_WIDTH);
    queue!(
        out,
        SetForegroundColor(term_color(snap.color)),
        Print("█".repeat(filled)),
        ResetColor,
        Print("░".repeat(BAR_WIDTH - filled)),
        Print("\n"),
    )?;
    if snap.beacon_active {
        queue!(
            out,
            SetForegroundColor(term_color(snap.color)),
            Print("❤ Pulse\n"),
            ResetColor,
        )?;
    }
    out.flush()
}

/// Hides the cursor for the lifetime of the guard.
pub struct CursorGuard;

impl CursorGuard {
    pub fn new() -> io::Result<Self> {
        execute!(io::stdout(), Hide)?;
        Ok(Self)
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show);
    }
}
