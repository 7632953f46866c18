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

//! Running statistics over streams of scalar samples.
//!
//! This module defines the "common language" for all measurements in Tacho:
//! a [`Statistic`] accumulates count, mean, variance, sum and extrema of a
//! sample stream without retaining the samples themselves. The timer layer
//! feeds elapsed durations into it; hosts can feed arbitrary scalars.

pub mod accumulator;

pub use self::accumulator::{Statistic, StatisticSnapshot};
