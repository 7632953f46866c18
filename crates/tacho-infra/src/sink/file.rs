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

//! Buffered file report sink.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tacho_core::{ReportSink, SinkError, SinkResult};

/// Report sink writing to a file through a buffered writer.
///
/// Creation truncates an existing file. Open failure surfaces as
/// [`SinkError::Io`] so the caller can decide how to degrade — typically by
/// falling back to a console sink. Buffered output is flushed on
/// [`ReportSink::flush`] and on drop.
#[derive(Debug)]
pub struct FileSink {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl FileSink {
    /// Opens (creating or truncating) the report file.
    pub fn create(path: impl AsRef<Path>) -> SinkResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)
            .map_err(|err| SinkError::Io(format!("could not open '{}': {err}", path.display())))?;
        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }

    /// The path this sink writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for FileSink {
    fn write_report(&mut self, text: &str) -> SinkResult<()> {
        self.writer
            .write_all(text.as_bytes())
            .map_err(|err| SinkError::Io(format!("write to '{}': {err}", self.path.display())))
    }

    fn flush(&mut self) -> SinkResult<()> {
        self.writer
            .flush()
            .map_err(|err| SinkError::Io(format!("flush of '{}': {err}", self.path.display())))
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Err(err) = self.writer.flush() {
            log::warn!("failed to flush '{}': {err}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tacho-file-sink-{tag}-{}", std::process::id()))
    }

    #[test]
    fn reports_end_up_in_the_file() {
        let path = temp_path("roundtrip");
        {
            let mut sink = FileSink::create(&path).unwrap();
            sink.write_report("first line\n").unwrap();
            sink.write_report("second line\n").unwrap();
            sink.flush().unwrap();
        } // drop flushes as well

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first line\nsecond line\n");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn drop_flushes_buffered_output() {
        let path = temp_path("dropflush");
        {
            let mut sink = FileSink::create(&path).unwrap();
            sink.write_report("buffered\n").unwrap();
        }

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "buffered\n");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn unopenable_path_is_an_io_error() {
        let path = temp_path("missing-dir").join("nested").join("report.txt");
        let result = FileSink::create(&path);
        assert!(matches!(result, Err(SinkError::Io(_))));
    }
}
