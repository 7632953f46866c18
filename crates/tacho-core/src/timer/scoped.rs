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

//! RAII scope timing: arm on construction, record exactly once on exit.

use crate::sink::ReportSink;
use crate::timer::tree::{Timer, TimerId};

/// Guard that `tic`s a timer node on construction and `toc`s it exactly
/// once when it goes out of scope — on every exit path, including early
/// returns and panic unwind.
///
/// The guard is a two-state machine, armed / fired: [`TimingGuard::finish`]
/// fires it early and returns the recorded value, after which the drop is a
/// no-op, so double-recording cannot occur.
///
/// ```
/// use tacho_core::{Timer, TimingGuard};
///
/// let mut timer = Timer::new("scope");
/// {
///     let _guard = TimingGuard::new(&mut timer);
///     // ... the code to time ...
/// } // guard fires here
/// assert_eq!(timer.count(), 1);
/// ```
#[derive(Debug)]
pub struct TimingGuard<'a> {
    timer: &'a mut Timer,
    id: TimerId,
    sink: Option<&'a mut dyn ReportSink>,
    fired: bool,
}

impl<'a> TimingGuard<'a> {
    /// Arms the timer's root node.
    pub fn new(timer: &'a mut Timer) -> Self {
        let id = timer.root();
        Self::at(timer, id)
    }

    /// Arms the given node.
    pub fn at(timer: &'a mut Timer, id: TimerId) -> Self {
        timer.tic_at(id);
        Self {
            timer,
            id,
            sink: None,
            fired: false,
        }
    }

    /// Arms the given node and, when the guard fires, forwards the timer's
    /// rendered tree report to `sink`. A sink failure is downgraded to a
    /// warning — a report must never take the host down.
    pub fn with_sink(timer: &'a mut Timer, id: TimerId, sink: &'a mut dyn ReportSink) -> Self {
        timer.tic_at(id);
        Self {
            timer,
            id,
            sink: Some(sink),
            fired: false,
        }
    }

    /// Fires the guard early, returning the recorded value in seconds (or
    /// NaN if the sample was rejected). The subsequent drop does nothing.
    pub fn finish(mut self) -> f64 {
        self.fire()
    }

    fn fire(&mut self) -> f64 {
        if self.fired {
            return f64::NAN;
        }
        self.fired = true;

        let recorded = self.timer.toc_at(self.id);
        if let Some(sink) = self.sink.as_deref_mut() {
            let report = self.timer.to_string();
            if let Err(err) = sink.write_report(&report) {
                log::warn!("failed to forward timing report: {err}");
            }
        }
        recorded
    }
}

impl Drop for TimingGuard<'_> {
    fn drop(&mut self) {
        if !self.fired {
            self.fire();
        }
    }
}
