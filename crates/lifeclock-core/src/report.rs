//! Plain-text rendering of a breakdown, as shown beside the progress bar.

use std::fmt;

use crate::calculator::DurationBreakdown;
use crate::config::RatesConfig;

/// Insert `,` between groups of three digits.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Six decimals with a grouped integer part, e.g. `1,234.500000`.
fn grouped_decimal(value: f64) -> String {
    let fixed = format!("{value:.6}");
    match fixed.split_once('.') {
        Some((int, frac)) => match int.parse::<u64>() {
            Ok(n) => format!("{}.{frac}", group_thousands(n)),
            Err(_) => fixed,
        },
        None => fixed,
    }
}

/// The multi-line stats block.
pub struct Report<'a> {
    pub stats: &'a DurationBreakdown,
    pub rates: &'a RatesConfig,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        writeln!(f, "📊 You are approximately:")?;
        writeln!(f, "  • Leap years : {}", group_thousands(u64::from(s.leap_days_elapsed)))?;
        writeln!(f, "  • Years (approx)     : {}", grouped_decimal(s.years_fractional))?;
        writeln!(f, "  • Months (approx)    : {}", group_thousands(s.months_approx))?;
        writeln!(f, "  • Days               : {}", group_thousands(s.days_elapsed))?;
        writeln!(f, "  • Hours              : {}", group_thousands(s.hours_elapsed))?;
        writeln!(f, "  • Minutes            : {}", group_thousands(s.minutes_elapsed))?;
        writeln!(f, "  • Seconds            : {}", group_thousands(s.seconds_elapsed))?;
        writeln!(f, "  • Milliseconds       : {}", group_thousands(s.milliseconds_elapsed))?;
        writeln!(f)?;
        writeln!(f, "💡 Fun Facts:")?;
        writeln!(f, "  • Heartbeats total   : {} ❤️", group_thousands(s.heartbeats_total))?;
        writeln!(f, "  • Breaths total      : {} 🌬️", group_thousands(s.breaths_total))?;
        writeln!(f, "  • Steps approx       : {} 🚶", group_thousands(s.steps_approx))?;
        writeln!(f, "  • Estimated pulse    : {} bpm (avg)", self.rates.heartbeats_per_minute)
    }
}

pub fn render(stats: &DurationBreakdown, rates: &RatesConfig) -> String {
    Report { stats, rates }.to_string()
}

/// One-line progress caption.
pub fn progress_caption(percent: f64, expectancy_years: f64) -> String {
    format!("Life Progress: {percent:.2}% toward {expectancy_years} years")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute;
    use chrono::{NaiveDate, TimeDelta};

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(12_345_678_901), "12,345,678,901");
    }

    #[test]
    fn decimal_keeps_six_places() {
        assert_eq!(grouped_decimal(45.1225), "45.122500");
        assert_eq!(grouped_decimal(1234.5), "1,234.500000");
    }

    #[test]
    fn render_lists_every_field() {
        let birth = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let stats = compute(birth, birth + TimeDelta::days(1000)).unwrap();
        let text = render(&stats, &RatesConfig::default());

        assert!(text.starts_with("📊 You are approximately:\n"));
        assert!(text.contains("  • Leap years : 1\n"));
        assert!(text.contains("  • Days               : 1,000\n"));
        assert!(text.contains("  • Hours              : 24,000\n"));
        assert!(text.contains("  • Milliseconds       : 86,400,000,000\n"));
        assert!(text.contains("  • Steps approx       : 6,000,000 🚶\n"));
        assert!(text.contains("  • Estimated pulse    : 72 bpm (avg)\n"));
        assert_eq!(text.lines().count(), 15);
    }

    #[test]
    fn caption_uses_two_decimals() {
        assert_eq!(
            progress_caption(50.13611, 90.0),
            "Life Progress: 50.14% toward 90 years"
        );
        assert_eq!(
            progress_caption(12.5, 82.5),
            "Life Progress: 12.50% toward 82.5 years"
        );
    }
}
