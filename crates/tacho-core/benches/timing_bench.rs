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

//! Benchmarks for the hot instrumentation paths: accepting a sample and a
//! full tic/toc round trip.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tacho_core::{Statistic, Timer};

fn bench_statistic_add(c: &mut Criterion) {
    c.bench_function("statistic_add", |b| {
        let mut stat = Statistic::new("bench");
        let mut x = 0.0_f64;
        b.iter(|| {
            x += 1.0;
            black_box(stat.add(black_box(x)))
        });
    });
}

fn bench_tic_toc(c: &mut Criterion) {
    c.bench_function("timer_tic_toc", |b| {
        let mut timer = Timer::new("bench");
        b.iter(|| {
            timer.tic();
            black_box(timer.toc())
        });
    });
}

fn bench_render_tree(c: &mut Criterion) {
    c.bench_function("timer_render_tree", |b| {
        let mut timer = Timer::new("bench");
        for i in 0..8 {
            let child = timer.nest(format!("child-{i}"));
            timer.tic_at(child);
            timer.toc_at(child);
        }
        timer.tic();
        timer.toc();
        b.iter(|| black_box(timer.render()));
    });
}

criterion_group!(
    benches,
    bench_statistic_add,
    bench_tic_toc,
    bench_render_tree
);
criterion_main!(benches);
