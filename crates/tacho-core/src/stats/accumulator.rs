// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Numerically stable online accumulator for scalar sample streams.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::report::fmt_sig3;

/// A running accumulator of count, mean, variance, sum and extrema over a
/// stream of `f64` samples.
///
/// The mean and variance are maintained with Welford's online update, which
/// stays numerically stable for long-running streams. No individual sample
/// is retained; every operation is O(1).
///
/// Non-finite samples (NaN, ±∞) are rejected: [`Statistic::add`] leaves the
/// accumulator untouched and returns a NaN sentinel so the caller can detect
/// the rejection without an error path.
#[derive(Debug, Clone)]
pub struct Statistic {
    name: String,
    count: u64,
    mean: f64,
    /// Welford running sum of squared deviations from the mean.
    m2: f64,
    sum: f64,
    last: f64,
    min: f64,
    max: f64,
}

impl Statistic {
    /// Creates a new, empty accumulator with the given label.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: 0,
            mean: 0.0,
            m2: 0.0,
            sum: 0.0,
            last: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Accepts one sample and returns the new running mean.
    ///
    /// A non-finite sample is rejected: no field changes and `f64::NAN` is
    /// returned instead of the mean.
    pub fn add(&mut self, value: f64) -> f64 {
        if !value.is_finite() {
            return f64::NAN;
        }

        self.count += 1;
        self.sum += value;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
        self.last = value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);

        self.mean
    }

    /// Number of samples accepted so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running arithmetic mean. Returns 0.0 before the first sample.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Bessel-corrected sample variance (`n - 1` denominator).
    ///
    /// Returns 0.0 when fewer than two samples have been accepted.
    pub fn var(&self) -> f64 {
        if self.count > 1 {
            // m2 is non-negative up to rounding; clamp so var never goes
            // below zero.
            (self.m2 / (self.count - 1) as f64).max(0.0)
        } else {
            0.0
        }
    }

    /// Bessel-corrected sample standard deviation.
    ///
    /// Returns 0.0 when fewer than two samples have been accepted.
    pub fn std(&self) -> f64 {
        self.var().sqrt()
    }

    /// Most recently accepted sample. 0.0 before the first sample.
    pub fn last(&self) -> f64 {
        self.last
    }

    /// Smallest accepted sample; `+INFINITY` sentinel before the first one.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest accepted sample; `-INFINITY` sentinel before the first one.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Sum of all accepted samples.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// The accumulator's identifying label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns every field to its initial state. The label is kept.
    pub fn reset(&mut self) {
        self.count = 0;
        self.mean = 0.0;
        self.m2 = 0.0;
        self.sum = 0.0;
        self.last = 0.0;
        self.min = f64::INFINITY;
        self.max = f64::NEG_INFINITY;
    }

    /// Captures the current aggregate values as a serializable snapshot.
    pub fn snapshot(&self) -> StatisticSnapshot {
        StatisticSnapshot {
            name: self.name.clone(),
            count: self.count,
            mean: self.mean(),
            std: self.std(),
            sum: self.sum,
            last: self.last,
            min: (self.count > 0).then_some(self.min),
            max: (self.count > 0).then_some(self.max),
        }
    }
}

impl Default for Statistic {
    fn default() -> Self {
        Self::new("Statistic")
    }
}

impl Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count < 1 {
            return writeln!(f, "{} has no sample yet", self.name);
        }

        writeln!(
            f,
            "{:<16}mean|std  {:<5}|{:<5}  [min|max:  {:<5}|{:<5}]",
            self.name,
            fmt_sig3(self.mean()),
            fmt_sig3(self.std()),
            fmt_sig3(self.min),
            fmt_sig3(self.max),
        )
    }
}

/// A point-in-time copy of a [`Statistic`]'s aggregates, for export.
///
/// `min`/`max` are `None` before the first sample instead of the infinite
/// sentinels, so snapshots stay representable in formats without infinities
/// (e.g. JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticSnapshot {
    /// The accumulator's label.
    pub name: String,
    /// Samples accepted so far.
    pub count: u64,
    /// Running mean (0.0 before the first sample).
    pub mean: f64,
    /// Bessel-corrected sample standard deviation.
    pub std: f64,
    /// Sum of accepted samples.
    pub sum: f64,
    /// Most recent sample (0.0 before the first one).
    pub last: f64,
    /// Smallest accepted sample, if any.
    pub min: Option<f64>,
    /// Largest accepted sample, if any.
    pub max: Option<f64>,
}
