//! In-memory, append-only time series of accepted samples.

use chrono::{DateTime, Local};

use crate::protocol::Sample;

/// Seconds between `start` and `t`, with microsecond resolution.
pub fn elapsed_secs(start: DateTime<Local>, t: DateTime<Local>) -> f64 {
    (t - start).num_microseconds().unwrap_or(i64::MAX) as f64 / 1_000_000.0
}

/// Parallel series of every accepted sample.
///
/// All sequences always have the same length and index `i` refers to the same
/// sample in each of them. Data is only ever appended.
#[derive(Debug, Default)]
pub struct SeriesStore {
    captured_at: Vec<DateTime<Local>>,
    temp_a: Vec<f64>,
    temp_b: Vec<f64>,
    duty: Vec<f64>,
}

/// Read-only view of a [`SeriesStore`], with the elapsed-time axis resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSnapshot<'a> {
    /// Seconds since the first sample; `elapsed[0] == 0.0`.
    pub elapsed: Vec<f64>,
    pub temp_a: &'a [f64],
    pub temp_b: &'a [f64],
    pub duty: &'a [f64],
}

impl SeriesSnapshot<'_> {
    pub fn len(&self) -> usize {
        self.elapsed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elapsed.is_empty()
    }
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, sample: &Sample) {
        self.captured_at.push(sample.captured_at());
        self.temp_a.push(sample.temperature_a());
        self.temp_b.push(sample.temperature_b());
        self.duty.push(sample.duty_cycle());
    }

    pub fn len(&self) -> usize {
        self.captured_at.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captured_at.is_empty()
    }

    /// Capture time of the first sample, which anchors the elapsed axis.
    pub fn first_captured_at(&self) -> Option<DateTime<Local>> {
        self.captured_at.first().copied()
    }

    /// Elapsed seconds of sample `index`, if it exists.
    pub fn elapsed_secs(&self, index: usize) -> Option<f64> {
        let start = self.first_captured_at()?;
        self.captured_at
            .get(index)
            .map(|t| elapsed_secs(start, *t))
    }

    /// Borrow the series. The elapsed axis is rebuilt from the timestamp
    /// history on every call.
    pub fn snapshot(&self) -> SeriesSnapshot<'_> {
        let elapsed = match self.first_captured_at() {
            Some(start) => self
                .captured_at
                .iter()
                .map(|t| elapsed_secs(start, *t))
                .collect(),
            None => Vec::new(),
        };
        SeriesSnapshot {
            elapsed,
            temp_a: &self.temp_a,
            temp_b: &self.temp_b,
            duty: &self.duty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn sample_at(t: DateTime<Local>, v: f64) -> Sample {
        Sample::new(v, v + 1.0, v * 2.0, t)
    }

    #[test]
    fn lengths_stay_equal_and_start_at_zero() {
        let t0 = Local::now();
        let mut store = SeriesStore::new();
        assert!(store.snapshot().is_empty());
        for i in 0..10 {
            store.append(&sample_at(t0 + TimeDelta::milliseconds(250 * i), i as f64));
            let snap = store.snapshot();
            assert_eq!(snap.len(), (i + 1) as usize);
            assert_eq!(snap.temp_a.len(), snap.len());
            assert_eq!(snap.temp_b.len(), snap.len());
            assert_eq!(snap.duty.len(), snap.len());
            assert_eq!(snap.elapsed[0], 0.0);
        }
        assert_eq!(store.elapsed_secs(4), Some(1.0));
        assert_eq!(store.elapsed_secs(10), None);
    }

    #[test]
    fn snapshot_is_idempotent() {
        let t0 = Local::now();
        let mut store = SeriesStore::new();
        store.append(&sample_at(t0, 20.0));
        store.append(&sample_at(t0 + TimeDelta::milliseconds(100), 21.0));
        assert_eq!(store.snapshot(), store.snapshot());
    }

    #[test]
    fn values_follow_append_order() {
        let t0 = Local::now();
        let mut store = SeriesStore::new();
        store.append(&sample_at(t0, 1.0));
        store.append(&sample_at(t0 + TimeDelta::seconds(2), 5.0));
        let snap = store.snapshot();
        assert_eq!(snap.elapsed, vec![0.0, 2.0]);
        assert_eq!(snap.temp_a, &[1.0, 5.0]);
        assert_eq!(snap.temp_b, &[2.0, 6.0]);
        assert_eq!(snap.duty, &[2.0, 10.0]);
    }
}
