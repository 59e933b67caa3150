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

//! Uniform read interface for files, strings, and streams
//!
//! [`InputSource`] is a single-method-family trait object so the rest of
//! the crate never has to know whether it is reading a script file, an
//! interactive terminal, or an in-memory string supplied by a test.

use crate::policy::Policy;
use std::fs;
use std::io::{self, BufRead, Read as _};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading from an [`InputSource`]
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{0}: no such file")]
    NotFound(String),
    #[error("{0}: permission denied")]
    PermissionDenied(String),
    #[error("{name}: input exceeds the {limit}-byte size limit")]
    TooLarge { name: String, limit: usize },
    #[error("{0}: {1}")]
    Io(String, #[source] io::Error),
}

/// Uniform read interface for files, strings, and streams
///
/// Every method is bounded by the [`Policy`] the source was constructed
/// with: `read` enforces `max_content_size` and `read_line` enforces
/// `max_line_length`.
pub trait InputSource {
    /// Reads the entire remaining content, up to `max_content_size`.
    fn read(&mut self) -> Result<String, InputError>;

    /// Reads one line without its terminator, up to `max_line_length`.
    ///
    /// Returns an empty string at end of input.
    fn read_line(&mut self) -> Result<String, InputError>;

    /// Identifier for this source, used in diagnostics.
    fn name(&self) -> &str;
}

/// A file on disk
#[derive(Debug)]
pub struct FileInput {
    path: PathBuf,
    policy: Policy,
    inner: Option<io::BufReader<fs::File>>,
}

impl FileInput {
    /// Opens `path`, verifying it exists before any content is read.
    pub fn open(path: impl Into<PathBuf>, policy: Policy) -> Result<Self, InputError> {
        let path = path.into();
        let file = fs::File::open(&path).map_err(|e| classify(&path.to_string_lossy(), e))?;
        let metadata = file
            .metadata()
            .map_err(|e| classify(&path.to_string_lossy(), e))?;
        if metadata.len() as usize > policy.max_content_size {
            return Err(InputError::TooLarge {
                name: path.to_string_lossy().into_owned(),
                limit: policy.max_content_size,
            });
        }
        Ok(FileInput {
            inner: Some(io::BufReader::new(file)),
            path,
            policy,
        })
    }
}

impl InputSource for FileInput {
    fn read(&mut self) -> Result<String, InputError> {
        let limit = self.policy.max_content_size;
        let name = self.name().to_owned();
        let reader = self.inner.as_mut().expect("file already consumed");
        read_capped(reader, limit, &name)
    }

    fn read_line(&mut self) -> Result<String, InputError> {
        let limit = self.policy.max_line_length;
        let name = self.name().to_owned();
        let reader = self.inner.as_mut().expect("file already consumed");
        read_line_capped(reader, limit, &name)
    }

    fn name(&self) -> &str {
        self.path.to_str().unwrap_or("<non-utf8 path>")
    }
}

fn classify(name: &str, e: io::Error) -> InputError {
    match e.kind() {
        io::ErrorKind::NotFound => InputError::NotFound(name.to_owned()),
        io::ErrorKind::PermissionDenied => InputError::PermissionDenied(name.to_owned()),
        _ => InputError::Io(name.to_owned(), e),
    }
}

/// A readable stream such as standard input or a pipe
pub struct StreamInput {
    reader: Box<dyn BufRead>,
    name: String,
    policy: Policy,
}

impl StreamInput {
    pub fn new(reader: Box<dyn BufRead>, name: impl Into<String>, policy: Policy) -> Self {
        StreamInput {
            reader,
            name: name.into(),
            policy,
        }
    }
}

impl InputSource for StreamInput {
    fn read(&mut self) -> Result<String, InputError> {
        read_capped(&mut self.reader, self.policy.max_content_size, &self.name)
    }

    fn read_line(&mut self) -> Result<String, InputError> {
        read_line_capped(&mut self.reader, self.policy.max_line_length, &self.name)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// An in-memory string, used by tests and non-interactive `-c COMMAND` runs
pub struct StringInput {
    content: String,
    offset: usize,
    name: String,
    policy: Policy,
}

impl StringInput {
    #[must_use]
    pub fn new(content: impl Into<String>, name: impl Into<String>, policy: Policy) -> Self {
        StringInput {
            content: content.into(),
            offset: 0,
            name: name.into(),
            policy,
        }
    }
}

impl InputSource for StringInput {
    fn read(&mut self) -> Result<String, InputError> {
        let remaining = &self.content[self.offset..];
        if remaining.len() > self.policy.max_content_size {
            return Err(InputError::TooLarge {
                name: self.name.clone(),
                limit: self.policy.max_content_size,
            });
        }
        self.offset = self.content.len();
        Ok(remaining.to_owned())
    }

    fn read_line(&mut self) -> Result<String, InputError> {
        let remaining = &self.content[self.offset..];
        if remaining.is_empty() {
            return Ok(String::new());
        }
        let end = remaining.find('\n').map_or(remaining.len(), |i| i + 1);
        let line = &remaining[..end];
        if line.len() > self.policy.max_line_length {
            return Err(InputError::TooLarge {
                name: self.name.clone(),
                limit: self.policy.max_line_length,
            });
        }
        self.offset += end;
        Ok(line.trim_end_matches('\n').to_owned())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn read_capped(reader: &mut dyn BufRead, limit: usize, name: &str) -> Result<String, InputError> {
    let mut buf = Vec::new();
    // Read one extra byte beyond the limit so an exactly-at-limit source is
    // distinguishable from one that overflows it.
    let mut capped = reader.take(limit as u64 + 1);
    capped
        .read_to_end(&mut buf)
        .map_err(|e| classify(name, e))?;
    if buf.len() as u64 > limit as u64 {
        return Err(InputError::TooLarge {
            name: name.to_owned(),
            limit,
        });
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn read_line_capped(
    reader: &mut dyn BufRead,
    limit: usize,
    name: &str,
) -> Result<String, InputError> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| classify(name, e))?;
    if line.len() > limit {
        return Err(InputError::TooLarge {
            name: name.to_owned(),
            limit,
        });
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}
