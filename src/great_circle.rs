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

//! The great_circle module contains functions for calculating the central
//! angle and courses of great circle routes between `Position`s.
//!
//! The central angle between points A and B is given by the spherical law of cosines:
//!
//! cos ζ = sin φA sin φB + cos φA cos φB cos(λB - λA)
//!
//! The interior angle at A between the meridian through A and the great circle
//! to B is given by:
//!
//! cos α = (sin φB - sin φA cos ζ) / (cos φA sin ζ)
//!
//! The interior angle is in [0, π] and does not distinguish East from West,
//! the true course resolves it clockwise from North in [0, 2π).

use crate::coordinate::Position;
use crate::error::{NavigationError, ParseOptionError};
use crate::sphere::is_singular;
use angle_sc::{trig::UnitNegRange, Radians};
use core::f64::consts::{PI, TAU};
use core::fmt;
use core::str::FromStr;

/// Fold an angle into the range (-π, π].
/// * `angle` - the angle to fold.
#[must_use]
pub fn fold_longitude(angle: Radians) -> Radians {
    let angle = libm::fmod(angle.0, TAU);
    if PI < angle {
        Radians(angle - TAU)
    } else if angle <= -PI {
        Radians(angle + TAU)
    } else {
        Radians(angle)
    }
}

/// The longitude difference from `from` to `to`, folded into (-π, π].  
/// Positive when `to` is East of `from`.
#[must_use]
pub fn delta_longitude(from: Radians, to: Radians) -> Radians {
    fold_longitude(Radians(to.0 - from.0))
}

/// Calculate the central angle between a pair of positions.
/// * `a`, `b` - the positions.
///
/// returns the central angle in [0, π].
#[must_use]
pub fn central_angle(a: &Position, b: &Position) -> Radians {
    if a == b {
        return Radians(0.0);
    }

    let (sin_a, cos_a) = libm::sincos(a.lat().0);
    let (sin_b, cos_b) = libm::sincos(b.lat().0);
    let cos_zeta = sin_a * sin_b + cos_a * cos_b * libm::cos(b.lon().0 - a.lon().0);
    Radians(libm::acos(UnitNegRange::clamp(cos_zeta).0))
}

/// Calculate the interior angle at `a` between the meridian through `a`
/// and the great circle to `b`.
/// * `a` - the start position.
/// * `b` - the end position.
///
/// returns the interior angle in [0, π].
///
/// # Errors
///
/// `NavigationError::DegenerateRoute` if the points coincide, are antipodal,
/// or `a` is at a pole.
pub fn interior_angle(a: &Position, b: &Position) -> Result<Radians, NavigationError> {
    let zeta = central_angle(a, b).0;
    let (sin_a, cos_a) = libm::sincos(a.lat().0);
    let denominator = cos_a * libm::sin(zeta);
    if is_singular(zeta) || is_singular(denominator) {
        return Err(NavigationError::DegenerateRoute);
    }

    let cos_alpha = (libm::sin(b.lat().0) - sin_a * libm::cos(zeta)) / denominator;
    Ok(Radians(libm::acos(UnitNegRange::clamp(cos_alpha).0)))
}

/// Whether `b` is West of `a`, i.e. the shorter way round from `a` to `b`
/// is westward.  
/// `b` on the same meridian or the opposite meridian is not West.
#[must_use]
pub fn is_westbound(a: &Position, b: &Position) -> bool {
    delta_longitude(a.lon(), b.lon()).0 < 0.0
}

/// Calculate the true course at `a` of the great circle to `b`.
/// * `a` - the start position.
/// * `b` - the end position.
///
/// returns the course clockwise from North in [0, 2π).
///
/// # Errors
///
/// `NavigationError::DegenerateRoute`, see `interior_angle`.
pub fn true_course(a: &Position, b: &Position) -> Result<Radians, NavigationError> {
    let alpha = interior_angle(a, b)?;
    if is_westbound(a, b) {
        // 2π - 0 is North
        let course = TAU - alpha.0;
        Ok(Radians(if course < TAU { course } else { 0.0 }))
    } else {
        Ok(alpha)
    }
}

/// The convention used to report a great circle heading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CourseConvention {
    /// The interior angle in [0°, 180°], it does not distinguish East from West.
    #[default]
    InteriorAngle,
    /// The course clockwise from North in [0°, 360°).
    TrueCourse,
}

impl CourseConvention {
    /// Calculate the heading at `a` of the great circle to `b` in this convention.
    ///
    /// # Errors
    ///
    /// `NavigationError::DegenerateRoute`, see `interior_angle`.
    pub fn heading(self, a: &Position, b: &Position) -> Result<Radians, NavigationError> {
        match self {
            Self::InteriorAngle => interior_angle(a, b),
            Self::TrueCourse => true_course(a, b),
        }
    }
}

impl FromStr for CourseConvention {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interior" | "interior-angle" => Ok(Self::InteriorAngle),
            "true" | "true-course" => Ok(Self::TrueCourse),
            _ => Err(ParseOptionError::new("course convention", s)),
        }
    }
}

impl fmt::Display for CourseConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InteriorAngle => write!(f, "interior"),
            Self::TrueCourse => write!(f, "true"),
        }
    }
}
