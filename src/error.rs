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

//! The error module contains the errors returned by navigation calculations.

use crate::angle::AngleError;
use thiserror::Error;

/// The error type for navigation calculations.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum NavigationError {
    /// The course is undefined: the points coincide, are antipodal or
    /// the start point is at a pole.
    #[error("degenerate route: the course is undefined between these points")]
    DegenerateRoute,
    /// The loxodrome is undefined: a point is at a pole.
    #[error("singular rhumb line: a loxodrome cannot start or end at a pole")]
    SingularRhumb,
    #[error("invalid flight parameters: speed {speed}, fuel {fuel}, consumption {consumption}")]
    InvalidFlightParameters {
        speed: f64,
        fuel: f64,
        consumption: f64,
    },
    #[error(transparent)]
    InvalidAngle(#[from] AngleError),
}

/// The error type for parsing a named option, e.g. a `TravelMode`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

impl ParseOptionError {
    /// Constructor.
    /// * `kind` - the kind of option.
    /// * `value` - the text that could not be parsed.
    #[must_use]
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
