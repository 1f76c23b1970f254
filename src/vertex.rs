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

//! The vertex module contains functions for calculating the northernmost
//! point (vertex) of the great circle through a pair of `Position`s.
//!
//! The latitude of the vertex follows from Clairaut's relation:
//!
//! cos φs = sin α cos φA
//!
//! where α is the interior angle at A. The vertex lies East or West of A
//! depending on which way the great circle runs and where the vertex lies
//! relative to the points, see `VertexPosition`.

use crate::coordinate::Position;
use crate::error::NavigationError;
use crate::great_circle::{delta_longitude, fold_longitude, interior_angle};
use crate::sphere::is_singular;
use angle_sc::{trig::UnitNegRange, Radians};
use core::f64::consts::{FRAC_PI_2, PI};
use core::fmt;

/// Where the vertex lies relative to the points A and B on their great circle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexPosition {
    /// On the shorter arc from A to B.
    Between,
    /// Beyond A, i.e. behind the start point.
    BeforeA,
    /// Beyond B.
    BehindB,
    /// On the longer arc, opposite the shorter arc from A to B.
    FarSide,
}

impl VertexPosition {
    /// Whether the vertex is reached by travelling from A towards B.
    #[must_use]
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::Between | Self::BehindB)
    }

    /// Describe where the vertex lies relative to the named points.
    /// * `a` - the name of the start point.
    /// * `b` - the name of the end point.
    #[must_use]
    pub fn describe(self, a: &str, b: &str) -> String {
        match self {
            Self::Between => format!("between {a} and {b}"),
            Self::BeforeA => format!("before {a}, on the extension behind {a}"),
            Self::BehindB => format!("behind {b}, on the extension beyond {b}"),
            Self::FarSide => format!("on the far side of the great circle from {a} and {b}"),
        }
    }
}

impl fmt::Display for VertexPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe("A", "B"))
    }
}

/// Classify where the vertex lies from the interior angles at A and B.
/// * `alpha` - the interior angle at A of the great circle to B.
/// * `beta` - the interior angle at B of the great circle to A.
#[must_use]
pub fn classify_vertex(alpha: Radians, beta: Radians) -> VertexPosition {
    match (alpha.0 <= FRAC_PI_2, beta.0 <= FRAC_PI_2) {
        (true, true) => VertexPosition::Between,
        (false, true) => VertexPosition::BeforeA,
        (true, false) => VertexPosition::BehindB,
        (false, false) => VertexPosition::FarSide,
    }
}

/// Whether `position` is at a pole, where its longitude is arbitrary.
#[must_use]
pub fn is_polar(position: &Position) -> bool {
    is_singular(libm::cos(position.lat().0))
}

/// Whether the great circle through `a` and `b` is a meridian, i.e. `b` is
/// on the same meridian as `a` or on the opposite meridian, or either point
/// is at a pole.
#[must_use]
pub fn is_meridional(a: &Position, b: &Position) -> bool {
    if is_polar(a) || is_polar(b) {
        return true;
    }

    let delta_lon = libm::fabs(delta_longitude(a.lon(), b.lon()).0);
    is_singular(delta_lon) || is_singular(PI - delta_lon)
}

/// The northernmost point of a great circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    position: Position,
    placement: Option<VertexPosition>,
}

impl Vertex {
    /// The position of the vertex.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Where the vertex lies relative to the points.  
    /// None if the great circle is a meridian, its vertex is the North Pole.
    #[must_use]
    pub const fn placement(&self) -> Option<VertexPosition> {
        self.placement
    }
}

/// Calculate the northernmost point of the great circle through `a` and `b`.  
/// The vertex of a meridian is the North Pole.  
/// Every point of the Equator is a vertex, `a` is returned for it.
/// * `a` - the start position.
/// * `b` - the end position.
///
/// # Errors
///
/// `NavigationError::DegenerateRoute`, see `interior_angle`.
pub fn northernmost_vertex(a: &Position, b: &Position) -> Result<Vertex, NavigationError> {
    if is_meridional(a, b) {
        tracing::trace!("meridional great circle, vertex at the North Pole");
        return Ok(Vertex {
            position: Position::NORTH_POLE,
            placement: None,
        });
    }

    let alpha = interior_angle(a, b)?;
    let beta = interior_angle(b, a)?;
    let placement = classify_vertex(alpha, beta);

    let lat_a = a.lat().0;
    let lat_s = libm::acos(UnitNegRange::clamp(libm::sin(alpha.0) * libm::cos(lat_a)).0);
    if is_singular(lat_s) {
        return Ok(Vertex {
            position: Position::new(Radians(0.0), a.lon()),
            placement: Some(placement),
        });
    }

    let offset = libm::acos(UnitNegRange::clamp(libm::tan(lat_a) / libm::tan(lat_s)).0);

    // a vertex ahead lies East of A when B is to the East, one behind lies West
    let b_west_of_a = delta_longitude(b.lon(), a.lon()).0 > 0.0;
    let eastward = b_west_of_a != placement.is_forward();
    let lon_s = if eastward {
        a.lon().0 + offset
    } else {
        a.lon().0 - offset
    };

    tracing::trace!(
        "vertex {:?}: alpha {} beta {} offset {}",
        placement,
        alpha.0,
        beta.0,
        offset
    );

    Ok(Vertex {
        position: Position::new(Radians(lat_s), fold_longitude(Radians(lon_s))),
        placement: Some(placement),
    })
}
