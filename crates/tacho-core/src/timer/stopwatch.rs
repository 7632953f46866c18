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

//! Monotonic interval measurement.

use std::time::{Duration, Instant};

/// A monotonic interval stopwatch.
///
/// The start slot is `None` until the stopwatch is armed, so querying an
/// interval that was never started yields `None` instead of a bogus value.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start: Option<Instant>,
}

impl Stopwatch {
    /// Creates a stopwatch armed to the current instant.
    #[inline]
    pub fn new() -> Self {
        Self {
            start: Some(Instant::now()),
        }
    }

    /// Creates an unarmed stopwatch; [`Stopwatch::elapsed`] returns `None`
    /// until [`Stopwatch::restart`] is called.
    #[inline]
    pub fn idle() -> Self {
        Self { start: None }
    }

    /// Arms (or re-arms) the stopwatch to the current instant.
    #[inline]
    pub fn restart(&mut self) {
        self.start = Some(Instant::now());
    }

    /// Disarms the stopwatch.
    #[inline]
    pub fn clear(&mut self) {
        self.start = None;
    }

    /// Whether the stopwatch has been armed.
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.start.is_some()
    }

    /// Elapsed time since arming, or `None` if never armed.
    #[inline]
    pub fn elapsed(&self) -> Option<Duration> {
        self.start.map(|start| start.elapsed())
    }

    /// Elapsed time in seconds as `f64`, or `None` if never armed.
    #[inline]
    pub fn elapsed_secs_f64(&self) -> Option<f64> {
        self.elapsed().map(|d| d.as_secs_f64())
    }

    /// Reads the elapsed interval and re-arms to the same instant, so
    /// consecutive laps tile the timeline without gaps.
    ///
    /// Returns `None` (and stays unarmed) if the stopwatch was never armed.
    #[inline]
    pub fn lap(&mut self) -> Option<Duration> {
        let now = Instant::now();
        let lap = self.start.map(|start| now.duration_since(start))?;
        self.start = Some(now);
        Some(lap)
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}
