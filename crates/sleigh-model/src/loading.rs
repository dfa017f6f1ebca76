// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Problem instance loader for the toy allocation domain.
//!
//! This module turns line-oriented text instances into a validated `Model`.
//! The expected format is:
//!
//! ```raw
//! n m t                                  # factories, countries, children
//! factory_id country_id capacity         # n factory records
//! country_id export_max min_import       # m country records
//! child_id country_id factory_id ...     # t child records, >= 1 wish each
//! ```
//!
//! Records are line-oriented because child records are variable-length:
//! each non-blank line is one record, and factory/country records must
//! carry exactly three fields. Lines may contain comments introduced by
//! `#`, and blank lines between records are skipped.
//!
//! All violations (short input, wrong field counts, non-integer tokens,
//! zero dimensions, duplicate identifiers, references to unknown countries
//! or factories) map to an [`InstanceLoadError`]; no partial model is ever
//! produced.

use crate::model::{Model, ModelBuildError, ModelBuilder};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// The error type for the instance loading process.
#[derive(Debug)]
pub enum InstanceLoadError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input stream ended before all declared records were read.
    UnexpectedEof,
    /// A token could not be parsed as a non-negative integer.
    Parse(ParseTokenError),
    /// A record carried fewer or more fields than its kind allows.
    RecordLength { expected: usize, found: usize },
    /// The declared dimensions (n, m, t) are invalid (each must be >= 1).
    InvalidDimensions,
    /// The records were well-formed but referentially invalid.
    Model(ModelBuildError),
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
}

impl std::fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse token '{}' as a non-negative integer",
            self.token
        )
    }
}

impl std::error::Error for ParseTokenError {}

impl std::fmt::Display for InstanceLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "Unexpected end of input while parsing instance"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::RecordLength { expected, found } => {
                write!(f, "Record has {found} fields, expected {expected}")
            }
            Self::InvalidDimensions => {
                write!(f, "Instance dimensions (n, m, t) must be positive integers")
            }
            Self::Model(e) => write!(f, "Invalid instance: {e}"),
        }
    }
}

impl std::error::Error for InstanceLoadError {}

impl From<std::io::Error> for InstanceLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for InstanceLoadError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

impl From<ModelBuildError> for InstanceLoadError {
    fn from(e: ModelBuildError) -> Self {
        Self::Model(e)
    }
}

/// A loader for toy allocation instances.
///
/// The loader accepts any `BufRead`, file path, raw reader, or string
/// slice, making it convenient to integrate with tests and tooling.
///
/// # Examples
///
/// ```rust
/// use sleigh_model::loading::InstanceLoader;
///
/// let model = InstanceLoader::new()
///     .from_str("1 1 1\n1 1 5\n1 0 1\n1 1 1\n")
///     .expect("valid instance");
/// assert_eq!(model.num_children(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceLoader;

impl InstanceLoader {
    /// Creates a new `InstanceLoader`.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Loads an instance from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Model, InstanceLoadError> {
        let mut records = RecordReader::new(rdr);

        let header = records.next_record()?;
        if header.len() != 3 {
            return Err(InstanceLoadError::RecordLength {
                expected: 3,
                found: header.len(),
            });
        }
        if header.iter().any(|&v| v == 0) {
            return Err(InstanceLoadError::InvalidDimensions);
        }
        let (n, m, t) = (
            to_count(header[0])?,
            to_count(header[1])?,
            to_count(header[2])?,
        );

        // Factory records precede country records in the input, but the
        // builder needs countries first to resolve ownership. Buffer the
        // fixed-size records and replay them in dependency order. The
        // preallocation is capped: the header count is untrusted, and a
        // lying header must surface as `UnexpectedEof`, not an allocation
        // failure.
        let mut factories = Vec::with_capacity(n.min(1024));
        for _ in 0..n {
            let record = records.next_record()?;
            if record.len() != 3 {
                return Err(InstanceLoadError::RecordLength {
                    expected: 3,
                    found: record.len(),
                });
            }
            factories.push((record[0], record[1], record[2]));
        }

        let mut builder = ModelBuilder::new();
        for _ in 0..m {
            let record = records.next_record()?;
            if record.len() != 3 {
                return Err(InstanceLoadError::RecordLength {
                    expected: 3,
                    found: record.len(),
                });
            }
            builder.add_country(record[0], record[1], record[2])?;
        }

        for (id, country_id, capacity) in factories {
            builder.add_factory(id, country_id, capacity)?;
        }

        for _ in 0..t {
            let record = records.next_record()?;
            if record.len() < 3 {
                return Err(InstanceLoadError::RecordLength {
                    expected: 3,
                    found: record.len(),
                });
            }
            builder.add_child(record[0], record[1], &record[2..])?;
        }

        Ok(builder.build())
    }

    /// Loads an instance from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Model, InstanceLoadError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an instance from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Model, InstanceLoadError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads an instance from a string slice.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(&self, s: &str) -> Result<Model, InstanceLoadError> {
        self.from_reader(s.as_bytes())
    }
}

#[inline]
fn to_count(value: u64) -> Result<usize, InstanceLoadError> {
    usize::try_from(value).map_err(|_| InstanceLoadError::InvalidDimensions)
}

/// A helper that yields one parsed record per non-blank line.
struct RecordReader<R> {
    rdr: R,
    buf: String,
}

impl<R: BufRead> RecordReader<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
        }
    }

    /// Reads the next non-blank line and parses all of its fields.
    /// Text following a `#` on the line is ignored.
    fn next_record(&mut self) -> Result<Vec<u64>, InstanceLoadError> {
        loop {
            self.buf.clear();
            let read = self.rdr.read_line(&mut self.buf)?;
            if read == 0 {
                return Err(InstanceLoadError::UnexpectedEof);
            }

            let line = match self.buf.split_once('#') {
                Some((data, _comment)) => data,
                None => self.buf.as_str(),
            };

            let mut record = Vec::new();
            for token in line.split_whitespace() {
                let value = token.parse::<u64>().map_err(|_| ParseTokenError {
                    token: token.to_owned(),
                })?;
                record.push(value);
            }

            if !record.is_empty() {
                return Ok(record);
            }
        }
    }
}
