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

//! Structured, leveled console/file messaging.

use std::fmt::Display;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use colored::Colorize;
use serde::{Deserialize, Serialize};
use tacho_core::{ReportSink, SinkError, SinkResult};

use crate::sink::ConsoleSink;

/// Presentation settings for a [`Reporter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReporterSettings {
    /// Tint messages by severity (warnings yellow, errors red). When off,
    /// literal severity indicators are written instead.
    pub colored: bool,
    /// Prefix every message with a timestamp.
    pub timed: bool,
    /// With `timed`: seconds since the reporter was built instead of the
    /// wall-clock time of day.
    pub relative_time: bool,
    /// Column width the `[name] ` prefix is padded to.
    pub name_padding: usize,
}

impl Default for ReporterSettings {
    fn default() -> Self {
        Self {
            colored: true,
            timed: false,
            relative_time: false,
            name_padding: 20,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Severity {
    Info,
    Warn,
    Error,
    Fatal,
}

impl Severity {
    fn indicator(self) -> &'static str {
        match self {
            Severity::Info => "Info:    ",
            Severity::Warn => "Warning: ",
            Severity::Error => "Error:   ",
            Severity::Fatal => "Fatal:   ",
        }
    }
}

/// Structured message front-end over a [`ReportSink`].
///
/// A reporter is constructed with a name that prefixes every line as
/// `[name] `, padded to a fixed column so messages from several reporters
/// align. Messages carry a severity; instrumentation entities (timers,
/// statistics — anything [`Display`]) go through [`Reporter::report`],
/// which is the stream-insertion equivalent of the original toolkit.
///
/// Message emission never panics: a failing sink downgrades to a
/// `log::warn!`. [`Reporter::fatal`] emits like an error and *returns* a
/// [`SinkError::Fatal`] value — the toolkit never aborts the host; what a
/// fatal message means is the host's decision.
#[derive(Debug)]
pub struct Reporter {
    name: String,
    prefix: String,
    settings: ReporterSettings,
    sink: Box<dyn ReportSink>,
    started: Instant,
}

impl Reporter {
    /// Creates a console reporter with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_sink(name, ReporterSettings::default(), Box::new(ConsoleSink::new()))
    }

    /// Creates a console reporter with the given settings.
    pub fn with_settings(name: impl Into<String>, settings: ReporterSettings) -> Self {
        Self::with_sink(name, settings, Box::new(ConsoleSink::new()))
    }

    /// Creates a reporter over an arbitrary sink (e.g. a
    /// [`crate::FileSink`]).
    pub fn with_sink(
        name: impl Into<String>,
        settings: ReporterSettings,
        sink: Box<dyn ReportSink>,
    ) -> Self {
        let name = name.into();
        let prefix = Self::pad_name(&name, settings.name_padding);
        Self {
            name,
            prefix,
            settings,
            sink,
            started: Instant::now(),
        }
    }

    /// The reporter's (unpadded) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Emits an informational message.
    pub fn info(&mut self, msg: impl Display) {
        self.emit(Severity::Info, &msg.to_string());
    }

    /// Emits a warning.
    pub fn warn(&mut self, msg: impl Display) {
        self.emit(Severity::Warn, &msg.to_string());
    }

    /// Emits an error message.
    pub fn error(&mut self, msg: impl Display) {
        self.emit(Severity::Error, &msg.to_string());
    }

    /// Emits a fatal-severity message and returns the matching
    /// [`SinkError::Fatal`] for the host to propagate.
    pub fn fatal(&mut self, msg: impl Display) -> SinkError {
        self.emit(Severity::Fatal, &msg.to_string());
        SinkError::Fatal(self.name.clone())
    }

    /// Forwards a rendered entity (a timer, a statistic, any `Display`)
    /// through the sink, prefixed with the reporter's name.
    pub fn report(&mut self, entity: &dyn Display) -> SinkResult<()> {
        self.sink.write_report(&format!("{}{entity}", self.prefix))
    }

    /// Writes an empty line.
    pub fn newline(&mut self) {
        if let Err(err) = self.sink.write_report("\n") {
            log::warn!("reporter '{}' failed to emit: {err}", self.name);
        }
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> SinkResult<()> {
        self.sink.flush()
    }

    fn emit(&mut self, severity: Severity, msg: &str) {
        let mut line = String::with_capacity(self.prefix.len() + msg.len() + 16);
        line.push_str(&self.prefix);
        if !self.settings.colored {
            line.push_str(severity.indicator());
        }
        if self.settings.timed {
            line.push_str(&self.timestamp());
        }
        line.push_str(msg);
        line.push('\n');

        let line = if self.settings.colored {
            match severity {
                Severity::Info => line,
                Severity::Warn => line.yellow().to_string(),
                Severity::Error | Severity::Fatal => line.red().to_string(),
            }
        } else {
            line
        };

        if let Err(err) = self.sink.write_report(&line) {
            log::warn!("reporter '{}' failed to emit: {err}", self.name);
        }
    }

    fn timestamp(&self) -> String {
        if self.settings.relative_time {
            format!("{}s  ", self.started.elapsed().as_secs())
        } else {
            // Wall-clock time of day in UTC; the toolkit carries no
            // timezone dependency.
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            format!(
                "{:02}:{:02}:{:02}  ",
                (secs / 3600) % 24,
                (secs / 60) % 60,
                secs % 60
            )
        }
    }

    fn pad_name(name: &str, padding: usize) -> String {
        if name.is_empty() {
            return String::new();
        }
        let mut padded = format!("[{name}] ");
        while padded.len() < padding {
            padded.push(' ');
        }
        padded
    }
}
