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

//! # Tacho Infra
//!
//! Concrete implementations of the toolkit's external-facing pieces: the
//! console and file [`tacho_core::ReportSink`]s, and the [`Reporter`]
//! front-end for structured, leveled console/file messaging.

#![warn(missing_docs)]

pub mod reporter;
pub mod sink;

pub use reporter::{Reporter, ReporterSettings};
pub use sink::{ConsoleSink, ConsoleStream, FileSink};
