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

// Tacho sandbox
// Demo binary exercising timers, reports, the reporter and the throttler.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use tacho_core::{ReportSink, Statistic, Throttler, Timer, TimingGuard};
use tacho_infra::{ConsoleSink, FileSink, Reporter, ReporterSettings};

fn main() -> Result<()> {
    env_logger::init();

    let mut reporter = Reporter::new("sandbox");
    reporter.info("Timing a mock pipeline; this takes about a second.");

    // A pipeline with two stages; one stage has a nested sub-step. The
    // parent window encloses both stages, so the report shows each stage's
    // share of it.
    let mut timer = Timer::new("pipeline");
    let prepare = timer.nest("prepare");
    let solve = timer.nest("solve");
    let write_back = timer.nest_under(solve, "write-back");

    let mut progress = Throttler::from_secs_f64(0.25);
    for iteration in 0..50_u32 {
        timer.tic();

        timer.time(prepare, || thread::sleep(Duration::from_millis(3)));

        timer.tic_at(solve);
        thread::sleep(Duration::from_millis(5));
        {
            let _guard = TimingGuard::at(&mut timer, write_back);
            thread::sleep(Duration::from_millis(2));
        }
        timer.toc_at(solve);

        timer.toc();

        // Rate-limited progress: prints a handful of times, not 50.
        progress.run(|| log::info!("iteration {iteration} done"));
    }

    reporter.newline();
    reporter.info("Pipeline timing report:");
    reporter.report(&timer)?;

    // Statistics work on arbitrary scalars too, not just durations.
    let mut residual = Statistic::new("residual");
    for sample in [0.8, 0.4, 0.2, 0.1, f64::NAN, 0.05] {
        if residual.add(sample).is_nan() {
            reporter.warn(format!("rejected non-finite residual sample {sample}"));
        }
    }
    reporter.report(&residual)?;

    // Reports can go to a file; fall back to the console if the file
    // cannot be opened.
    let report_path = std::env::temp_dir().join("tacho-sandbox-report.txt");
    let mut file_sink: Box<dyn ReportSink> = match FileSink::create(&report_path) {
        Ok(sink) => {
            reporter.info(format!("writing report copy to '{}'", report_path.display()));
            Box::new(sink)
        }
        Err(err) => {
            log::error!("{err}; falling back to console");
            Box::new(ConsoleSink::new())
        }
    };
    file_sink.write_report(&timer.render())?;
    file_sink.flush()?;

    // A timed reporter, as a second messaging flavor.
    let mut timed = Reporter::with_settings(
        "timed",
        ReporterSettings {
            timed: true,
            relative_time: true,
            ..ReporterSettings::default()
        },
    );
    timed.info("messages can carry relative timestamps");
    thread::sleep(Duration::from_millis(100));
    timed.info("like this one, a moment later");

    reporter.newline();
    reporter.info("done");
    Ok(())
}
