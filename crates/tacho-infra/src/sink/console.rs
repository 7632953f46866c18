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

//! Console report sink.

use std::io::{self, Write};

use colored::{Color, Colorize};
use tacho_core::{ReportSink, SinkError, SinkResult};

/// Which console stream a [`ConsoleSink`] writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

/// Report sink writing to the process console.
///
/// An optional tint colors whole reports via ANSI escapes; the `colored`
/// crate drops them automatically when the stream is not a terminal.
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    stream: ConsoleStream,
    tint: Option<Color>,
}

impl ConsoleSink {
    /// Creates a sink writing untinted text to stdout.
    pub fn new() -> Self {
        Self {
            stream: ConsoleStream::Stdout,
            tint: None,
        }
    }

    /// Creates a sink writing untinted text to stderr.
    pub fn stderr() -> Self {
        Self {
            stream: ConsoleStream::Stderr,
            tint: None,
        }
    }

    /// Tints every report in the given color.
    pub fn with_tint(mut self, color: Color) -> Self {
        self.tint = Some(color);
        self
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink for ConsoleSink {
    fn write_report(&mut self, text: &str) -> SinkResult<()> {
        let rendered;
        let bytes = match self.tint {
            Some(color) => {
                rendered = text.color(color).to_string();
                rendered.as_bytes()
            }
            None => text.as_bytes(),
        };

        let outcome = match self.stream {
            ConsoleStream::Stdout => io::stdout().write_all(bytes),
            ConsoleStream::Stderr => io::stderr().write_all(bytes),
        };
        outcome.map_err(|err| SinkError::Io(err.to_string()))
    }

    fn flush(&mut self) -> SinkResult<()> {
        let outcome = match self.stream {
            ConsoleStream::Stdout => io::stdout().flush(),
            ConsoleStream::Stderr => io::stderr().flush(),
        };
        outcome.map_err(|err| SinkError::Io(err.to_string()))
    }
}
