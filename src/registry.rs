// Copyright (c) 2024-2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The registry module contains the `Registry`: the `Coordinate`s loaded
//! from a coordinate file, each labelled with a single character.
//!
//! A coordinate file holds one comma separated record per line:
//!
//! ```text
//! # latitude, longitude, name
//! 52 31 0 N, 13 23 0 E, Berlin
//! 40 42 0 N, 74 0 0 W, New York
//! ```
//!
//! Lines starting with `#` are comments and blank lines are skipped.
//! The longitude direction 'O' (Ost) is accepted for East.
//! Coordinates are labelled 'A' to 'Z' then 'a' to 'z' in file order.

use crate::angle::{AngleError, AxisKind, DmsAngle, Pole, RotationalDirection};
use crate::coordinate::{Coordinate, Label};
use std::fs::File;
use std::io;
use std::num::ParseIntError;
use std::path::Path;
use thiserror::Error;

/// The comment marker of a coordinate file.
pub const COMMENT: u8 = b'#';

/// The maximum number of coordinates in a `Registry`.
pub const MAX_COORDINATES: usize = 52;

/// The error type for parsing a coordinate record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected latitude, longitude and name fields, found {0} field(s)")]
    Fields(usize),
    #[error("expected <degrees> <minutes> <seconds> <direction>, found {0:?}")]
    Angle(String),
    #[error("invalid number: {0}")]
    Number(#[from] ParseIntError),
    #[error("invalid {kind}: {source}")]
    Range { kind: AxisKind, source: AngleError },
}

/// The error type for loading and using a `Registry`.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read coordinates: {0}")]
    Io(#[from] io::Error),
    #[error("failed to read coordinates: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {source}")]
    Parse { line: u64, source: RecordError },
    #[error("no coordinate labelled '{0}'")]
    UnresolvedLabel(char),
    #[error("too many coordinates, at most {} can be labelled", MAX_COORDINATES)]
    TooManyCoordinates,
}

/// The label of the coordinate at `index` in file order.
/// * `index` - the zero based index of the coordinate.
///
/// returns 'A' to 'Z' then 'a' to 'z', or None beyond `MAX_COORDINATES`.
#[must_use]
pub fn label_for(index: usize) -> Option<char> {
    const LETTERS: usize = 26;
    let letter = |first: u8, offset: usize| {
        u8::try_from(offset)
            .ok()
            .map(|offset| char::from(first + offset))
    };

    if index < LETTERS {
        letter(b'A', index)
    } else if index < MAX_COORDINATES {
        letter(b'a', index - LETTERS)
    } else {
        None
    }
}

/// Parse an angle field: `<degrees> <minutes> <seconds> <direction>`.
fn parse_angle(field: &str, kind: AxisKind) -> Result<DmsAngle, RecordError> {
    let tokens: Vec<&str> = field.split_whitespace().collect();
    let [degrees, minutes, seconds, direction] = tokens.as_slice() else {
        return Err(RecordError::Angle(field.to_owned()));
    };

    let mut chars = direction.chars();
    let (Some(direction), None) = (chars.next(), chars.next()) else {
        return Err(RecordError::Angle(field.to_owned()));
    };

    let degrees = degrees.parse::<u16>()?;
    let minutes = minutes.parse::<u8>()?;
    let seconds = seconds.parse::<u8>()?;

    let range = |source| RecordError::Range { kind, source };
    match kind {
        AxisKind::Latitude => {
            let pole = Pole::try_from(direction).map_err(range)?;
            DmsAngle::latitude(degrees, minutes, seconds, pole).map_err(range)
        }
        AxisKind::Longitude => {
            let direction = RotationalDirection::try_from(direction).map_err(range)?;
            DmsAngle::longitude(degrees, minutes, seconds, direction).map_err(range)
        }
    }
}

/// Parse a coordinate record.
/// * `record` - the fields of the record.
/// * `label` - the label of the coordinate.
fn parse_record(record: &csv::StringRecord, label: char) -> Result<Coordinate, RecordError> {
    if record.len() < 3 {
        return Err(RecordError::Fields(record.len()));
    }

    let lat = parse_angle(&record[0], AxisKind::Latitude)?;
    let lon = parse_angle(&record[1], AxisKind::Longitude)?;
    // a name may contain commas
    let name = record.iter().skip(2).collect::<Vec<_>>().join(", ");

    Coordinate::new(lat, lon, name, Label::Registered(label)).map_err(axis_error)
}

/// Convert the error of a misplaced axis into a `RecordError`.
/// * `source` - the error from `Coordinate::new`, an `AngleError::Axis`.
fn axis_error(source: AngleError) -> RecordError {
    // Coordinate::new only rejects a misplaced axis
    let kind = match source {
        AngleError::Axis(kind) => kind,
        _ => AxisKind::Latitude,
    };
    RecordError::Range { kind, source }
}

/// The labelled coordinates loaded from a coordinate file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    coordinates: Vec<Coordinate>,
}

impl Registry {
    /// Load a `Registry` from a coordinate file.
    /// * `path` - the path of the file.
    ///
    /// # Errors
    ///
    /// `RegistryError` if the file cannot be read or a record is invalid.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        tracing::info!("loading coordinates from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a `Registry` from a reader of coordinate records.
    ///
    /// # Errors
    ///
    /// `RegistryError` if a record cannot be read or is invalid.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, RegistryError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .comment(Some(COMMENT))
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut coordinates = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map_or(0, csv::Position::line);
            if record.iter().all(str::is_empty) {
                continue;
            }

            let label = label_for(coordinates.len()).ok_or(RegistryError::TooManyCoordinates)?;
            let coordinate =
                parse_record(&record, label).map_err(|source| RegistryError::Parse { line, source })?;
            tracing::debug!("{coordinate}");
            coordinates.push(coordinate);
        }

        tracing::info!("loaded {} coordinates", coordinates.len());
        Ok(Self { coordinates })
    }

    /// Find the `Coordinate` with the given label.
    ///
    /// # Errors
    ///
    /// `RegistryError::UnresolvedLabel` if no coordinate has the label.
    pub fn resolve(&self, label: char) -> Result<&Coordinate, RegistryError> {
        self.coordinates
            .iter()
            .find(|coordinate| coordinate.label() == Label::Registered(label))
            .ok_or(RegistryError::UnresolvedLabel(label))
    }

    /// An iterator over the coordinates in label order.
    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> {
        self.coordinates.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}
