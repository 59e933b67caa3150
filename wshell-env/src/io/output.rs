// This file is part of wshell, a POSIX-flavored command shell.
// Copyright (C) 2026 wshell contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Uniform write interface for streams, files, and test-capture buffers

use std::fs;
use std::io::{self, Write as _};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing to an [`OutputDestination`]
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("{0}: {1}")]
    Io(String, #[source] io::Error),
}

/// Uniform write interface for streams, files, and in-memory capture
pub trait OutputDestination {
    fn write(&mut self, bytes: &[u8]) -> Result<(), OutputError>;
    fn flush(&mut self) -> Result<(), OutputError>;
    fn name(&self) -> &str;
}

/// Wraps any [`std::io::Write`] stream, such as stdout or stderr.
pub struct StreamOutput {
    writer: Box<dyn io::Write>,
    name: String,
}

impl StreamOutput {
    pub fn new(writer: Box<dyn io::Write>, name: impl Into<String>) -> Self {
        StreamOutput {
            writer,
            name: name.into(),
        }
    }
}

impl OutputDestination for StreamOutput {
    fn write(&mut self, bytes: &[u8]) -> Result<(), OutputError> {
        self.writer
            .write_all(bytes)
            .map_err(|e| OutputError::Io(self.name.clone(), e))
    }

    fn flush(&mut self) -> Result<(), OutputError> {
        self.writer
            .flush()
            .map_err(|e| OutputError::Io(self.name.clone(), e))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Accumulates written bytes in memory, for test capture.
#[derive(Default)]
pub struct StringOutput {
    buffer: String,
}

impl StringOutput {
    #[must_use]
    pub fn new() -> Self {
        StringOutput::default()
    }

    /// Returns everything written so far.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.buffer
    }
}

impl OutputDestination for StringOutput {
    fn write(&mut self, bytes: &[u8]) -> Result<(), OutputError> {
        self.buffer.push_str(&String::from_utf8_lossy(bytes));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "<string>"
    }
}

/// Whether a [`FileOutput`] truncates or appends to an existing file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpenMode {
    Truncate,
    Append,
}

/// A file opened for writing, in truncate or append mode.
pub struct FileOutput {
    file: fs::File,
    path: PathBuf,
}

impl FileOutput {
    pub fn open(path: impl Into<PathBuf>, mode: OpenMode) -> Result<Self, OutputError> {
        let path = path.into();
        let file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .append(mode == OpenMode::Append)
            .truncate(mode == OpenMode::Truncate)
            .open(&path)
            .map_err(|e| OutputError::Io(path.to_string_lossy().into_owned(), e))?;
        Ok(FileOutput { file, path })
    }
}

impl OutputDestination for FileOutput {
    fn write(&mut self, bytes: &[u8]) -> Result<(), OutputError> {
        self.file
            .write_all(bytes)
            .map_err(|e| OutputError::Io(self.name().to_owned(), e))
    }

    fn flush(&mut self) -> Result<(), OutputError> {
        self.file
            .flush()
            .map_err(|e| OutputError::Io(self.name().to_owned(), e))
    }

    fn name(&self) -> &str {
        self.path.to_str().unwrap_or("<non-utf8 path>")
    }
}

impl Drop for FileOutput {
    fn drop(&mut self) {
        let _ = self.file.flush();
    }
}
