//! Benchmark fixtures for tickbars.
//!
//! Ticks are generated deterministically so runs are comparable.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use std::path::Path;
use tempfile::TempDir;
use tickbars_lib::{Tick, TimeRange};

/// Ticks in one synthetic trading day.
pub const TICKS_PER_DAY: usize = 100_000;

/// Linear congruential generator, good enough for benchmark noise.
#[derive(Debug, Clone)]
struct Lcg(u64);

impl Lcg {
    const fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }
}

/// Returns the session open of the given day of September 2024.
pub fn session_open(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 9, day)
        .and_then(|date| date.and_hms_opt(9, 30, 0))
        .unwrap_or_default()
}

/// Returns the regular session of the given day.
pub fn session_range(day: u32) -> TimeRange {
    let open = session_open(day);
    TimeRange {
        start: open,
        end: open + TimeDelta::minutes(390),
    }
}

/// Generates a day of ticks spread over the session.
///
/// Timestamps are ascending; roughly one tick in fifty is missing its price,
/// priced too low, sized too large or outside the session, so the cleaner
/// has work to do.
pub fn synthetic_day(day: u32, count: usize) -> Vec<Tick> {
    let mut rng = Lcg(u64::from(day));
    let open = session_open(day) - TimeDelta::minutes(5);
    let span_micros = 400_u64 * 60 * 1_000_000;
    let step = span_micros / count.max(1) as u64;
    let mut price = 500.0_f64;

    (0..count as u64)
        .map(|i| {
            let timestamp = open + TimeDelta::microseconds((i * step) as i64);
            price += (rng.next_u64() % 21) as f64 / 100.0 - 0.1;
            let size = 1 + rng.next_u64() % 500;
            match rng.next_u64() % 200 {
                0 => Tick::new(timestamp, None, size),
                1 => Tick::new(timestamp, Some(350.0), size),
                2 => Tick::new(timestamp, Some(price), 2_000),
                _ => Tick::new(timestamp, Some(price), size),
            }
        })
        .collect()
}

/// Writes `days` synthetic tick files into a fresh temporary directory.
///
/// # Errors
///
/// Returns an error if the directory or a file cannot be written.
pub fn write_tick_files(days: u32, ticks_per_day: usize) -> std::io::Result<TempDir> {
    let dir = tempfile::tempdir()?;
    for day in 1..=days {
        write_day(dir.path(), day, ticks_per_day)?;
    }
    Ok(dir)
}

fn write_day(dir: &Path, day: u32, count: usize) -> std::io::Result<()> {
    let mut content = String::from("timestamp,price,size\n");
    for tick in synthetic_day(day, count) {
        let price = tick.price.map(|p| format!("{p:.2}")).unwrap_or_default();
        content.push_str(&format!(
            "{},{price},{}\n",
            tick.timestamp.format("%Y-%m-%d %H:%M:%S%.6f"),
            tick.size
        ));
    }
    std::fs::write(dir.join(format!("2024-09-{day:02}.csv")), content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_day_is_sorted_and_deterministic() {
        let a = synthetic_day(16, 1_000);
        let b = synthetic_day(16, 1_000);
        assert_eq!(a, b);
        assert!(a.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_write_tick_files() {
        let dir = write_tick_files(2, 10).unwrap();
        let count = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(count, 2);

        let content = std::fs::read_to_string(dir.path().join("2024-09-01.csv")).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "timestamp,price,size");
        assert!(lines[1..].iter().all(|line| line.split(',').count() == 3));
        assert!(content.ends_with('\n'));
    }
}
