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

//! End-to-end timing scenarios driven through the public API only.

use std::thread;
use std::time::Duration;

use tacho_core::{Timer, TimingGuard};

const SLEEP_MS: u64 = 2;
const ITERATIONS: u64 = 40;
// thread::sleep guarantees "at least"; allow generous scheduler overshoot.
const MARGIN_S: f64 = 0.05;

#[test]
fn simple_timing_loop_matches_the_slept_duration() {
    let mut timer = Timer::new("example");
    for _ in 0..ITERATIONS {
        timer.tic();
        thread::sleep(Duration::from_millis(SLEEP_MS));
        timer.toc();
    }

    let expected = SLEEP_MS as f64 / 1000.0;
    assert_eq!(timer.count(), ITERATIONS);
    assert!(timer.mean() >= expected);
    assert!(timer.mean() < expected + MARGIN_S);
    assert!(timer.min() >= expected);
    assert!(timer.min() <= timer.mean());
    assert!(timer.max() >= timer.mean());
}

#[test]
fn nested_child_reports_its_share_of_the_parent() {
    let mut timer = Timer::new("parent");
    let child = timer.nest("child");

    // The parent's window encloses the child's narrower window plus an
    // equal amount of its own work, so the child covers about half of the
    // parent's aggregate.
    for _ in 0..ITERATIONS {
        timer.tic();
        thread::sleep(Duration::from_millis(SLEEP_MS));
        timer.tic_at(child);
        thread::sleep(Duration::from_millis(SLEEP_MS));
        timer.toc_at(child);
        timer.toc();
    }

    assert_eq!(timer.count(), ITERATIONS);
    assert_eq!(timer.stats_at(child).count(), ITERATIONS);

    let share = (100.0 * timer.stats_at(child).sum() / timer.sum()) as i64;
    assert!(
        (35..=65).contains(&share),
        "child share {share}% far from the expected ~50%"
    );

    // The rendered report carries exactly that integer-truncated share,
    // and marks the child as a nested line.
    let report = timer.render();
    assert!(report.contains(&format!("{share:>3}% ")));
    assert!(report.contains("|-Timer child"));
}

#[test]
fn scoped_guard_and_closure_timing_agree() {
    let mut timer = Timer::new("scoped");
    let guarded = timer.nest("guarded");
    let closured = timer.nest("closured");

    for _ in 0..5 {
        {
            let _guard = TimingGuard::at(&mut timer, guarded);
            thread::sleep(Duration::from_millis(SLEEP_MS));
        }
        timer.time(closured, || thread::sleep(Duration::from_millis(SLEEP_MS)));
    }

    assert_eq!(timer.stats_at(guarded).count(), 5);
    assert_eq!(timer.stats_at(closured).count(), 5);

    let expected = SLEEP_MS as f64 / 1000.0;
    for id in [guarded, closured] {
        let mean = timer.stats_at(id).mean();
        assert!(mean >= expected && mean < expected + MARGIN_S);
    }
}

#[test]
fn unsampled_timer_renders_the_no_sample_marker() {
    let mut timer = Timer::new("fresh");
    timer.nest("never-driven");

    let report = timer.render();
    assert!(report.contains("has no sample yet"));
    assert!(!report.contains('%'));
}
