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

//! Time-gated invocation.

use std::time::{Duration, Instant};

/// Gate that lets a call through at most once per period.
///
/// Typical use is rate-limiting a report inside a hot loop: hand the work
/// to [`Throttler::run`] every iteration and it only executes once the
/// period has elapsed since the last accepted call (measured on the
/// monotonic clock). The first call always fires.
///
/// Single-threaded, non-reentrant use, like the rest of the toolkit.
#[derive(Debug, Clone)]
pub struct Throttler {
    period: Duration,
    last: Option<Instant>,
}

impl Throttler {
    /// Creates a throttler with the given minimum period between calls.
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// Creates a throttler from a period in (possibly fractional) seconds.
    pub fn from_secs_f64(period_seconds: f64) -> Self {
        Self::new(Duration::from_secs_f64(period_seconds))
    }

    /// The configured minimum period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Runs `f` if the period has elapsed since the last accepted call,
    /// re-arming the gate; otherwise drops it. Returns whether `f` ran.
    pub fn try_run<F: FnOnce()>(&mut self, f: F) -> bool {
        let now = Instant::now();
        let due = match self.last {
            Some(last) => now.duration_since(last) > self.period,
            None => true,
        };
        if due {
            f();
            self.last = Some(now);
        }
        due
    }

    /// Runs `f` if the period has elapsed since the last accepted call;
    /// otherwise drops it.
    pub fn run<F: FnOnce()>(&mut self, f: F) {
        self.try_run(f);
    }

    /// Forgets the last accepted call, so the next one fires immediately.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
