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

//! The report sink contract.
//!
//! The statistics/timer core renders itself to text and hands that text to
//! a [`ReportSink`] — a deliberately narrow capability so the core depends
//! on "something that accepts rendered text" and never on a concrete stream
//! type. Console and file implementations live in `tacho-infra`.

use std::fmt::{Debug, Display};

/// A specialized `Result` type for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// An error that can occur while emitting a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The underlying writer failed (console, file, ...).
    Io(String),
    /// A fatal-severity message was emitted; carries the reporter's name.
    /// The toolkit never aborts — hosts decide what a fatal message means.
    Fatal(String),
}

impl Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::Io(msg) => write!(f, "sink I/O error: {msg}"),
            SinkError::Fatal(name) => write!(f, "fatal message from '{name}'"),
        }
    }
}

impl std::error::Error for SinkError {}

/// Destination for rendered instrumentation text.
pub trait ReportSink: Debug + Send {
    /// Writes one rendered report (possibly multi-line, newline-terminated).
    fn write_report(&mut self, text: &str) -> SinkResult<()>;

    /// Flushes any buffered output. The default is a no-op for unbuffered
    /// sinks.
    fn flush(&mut self) -> SinkResult<()> {
        Ok(())
    }
}
