use std::fmt;
use std::num::NonZeroU64;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("time range end {end} is before start {start}")]
pub struct InvalidRange {
    pub start: i64,
    pub end: i64,
}

/// Half-open interval `[start, end)` in epoch seconds, with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: i64,
    end: i64,
}

impl TimeRange {
    pub fn new(start: i64, end: i64) -> Result<Self, InvalidRange> {
        if end < start {
            return Err(InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The `lookback_secs` seconds ending at `end`.
    pub fn ending_at(end: i64, lookback_secs: u64) -> Self {
        let lookback = i64::try_from(lookback_secs).unwrap_or(i64::MAX);
        Self {
            start: end.saturating_sub(lookback),
            end,
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One query window. Always non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    pub fn len_secs(&self) -> u64 {
        self.end.abs_diff(self.start)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Split `range` into contiguous windows of `chunk_size` seconds, the last
/// one truncated to end exactly at `range.end()`.
pub fn plan(range: TimeRange, chunk_size: NonZeroU64) -> Vec<TimeWindow> {
    let chunk = i64::try_from(chunk_size.get()).unwrap_or(i64::MAX);
    let mut windows = Vec::new();
    let mut current = range.start;

    while current < range.end {
        let end = current.saturating_add(chunk).min(range.end);
        windows.push(TimeWindow {
            start: current,
            end,
        });
        current = end;
    }

    windows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(secs: u64) -> NonZeroU64 {
        NonZeroU64::new(secs).unwrap()
    }

    fn assert_covers(range: TimeRange, size: u64, windows: &[TimeWindow]) {
        if range.is_empty() {
            assert!(windows.is_empty());
            return;
        }
        assert_eq!(windows.first().unwrap().start, range.start());
        assert_eq!(windows.last().unwrap().end, range.end());
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        for window in windows {
            assert!(window.start < window.end);
            assert!(window.len_secs() <= size);
        }
    }

    #[test]
    fn test_empty_range_yields_no_windows() {
        let range = TimeRange::new(1_000, 1_000).unwrap();
        assert!(plan(range, chunk(3600)).is_empty());
    }

    #[test]
    fn test_day_in_hour_chunks() {
        let end = 1_700_000_000;
        let range = TimeRange::ending_at(end, 86_400);
        let windows = plan(range, chunk(3600));
        assert_eq!(windows.len(), 24);
        assert!(windows.iter().all(|w| w.len_secs() == 3600));
        assert_covers(range, 3600, &windows);
    }

    #[test]
    fn test_last_window_truncated() {
        let range = TimeRange::new(0, 250).unwrap();
        let windows = plan(range, chunk(100));
        assert_eq!(
            windows,
            vec![
                TimeWindow { start: 0, end: 100 },
                TimeWindow { start: 100, end: 200 },
                TimeWindow { start: 200, end: 250 },
            ]
        );
    }

    #[test]
    fn test_chunk_larger_than_range() {
        let range = TimeRange::new(10, 20).unwrap();
        assert_eq!(plan(range, chunk(3600)), vec![TimeWindow { start: 10, end: 20 }]);
    }

    #[test]
    fn test_coverage_over_many_shapes() {
        for start in [-7_200i64, -1, 0, 13, 1_700_000_000] {
            for len in [0u64, 1, 59, 60, 61, 3599, 3600, 3601, 86_400] {
                for size in [1u64, 7, 60, 3600, 100_000] {
                    let range = TimeRange::ending_at(start + len as i64, len);
                    let windows = plan(range, chunk(size));
                    assert_covers(range, size, &windows);
                }
            }
        }
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert_eq!(
            TimeRange::new(5, 4),
            Err(InvalidRange { start: 5, end: 4 })
        );
    }
}
