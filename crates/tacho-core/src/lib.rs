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

//! # Tacho Core
//!
//! Contracts and core types of the Tacho instrumentation toolkit: running
//! statistics, nested timers with tree reporting, scope guards, the report
//! sink contract, and throttled invocation.
//!
//! The core is single-threaded by design: no internal locking, no blocking
//! calls. A [`Timer`] or [`Statistic`] value is driven from one logical
//! thread at a time (`&mut` access already enforces this in safe Rust);
//! distinct values are fully independent and may live on different threads.

#![warn(missing_docs)]

pub mod report;
pub mod sink;
pub mod stats;
pub mod throttle;
pub mod timer;

pub use report::ReportStyle;
pub use sink::{ReportSink, SinkError, SinkResult};
pub use stats::{Statistic, StatisticSnapshot};
pub use throttle::Throttler;
pub use timer::{Stopwatch, Timer, TimerId, TimerSnapshot, TimingGuard};
