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

//! The rhumb module contains functions for calculating loxodromes: lines of
//! constant course between `Position`s.
//!
//! A loxodrome crosses every meridian at the same angle. Its course is given
//! by the difference in longitude and the difference in isometric latitude:
//!
//! σ(φ) = ln tan(π/4 + φ/2)
//!
//! A loxodrome spirals into a pole, so it is undefined at one.

use crate::coordinate::Position;
use crate::error::NavigationError;
use crate::great_circle::delta_longitude;
use crate::sphere::is_singular;
use angle_sc::Radians;
use core::f64::consts::FRAC_PI_4;

/// Calculate the isometric latitude of a latitude.
/// * `lat` - the latitude.
///
/// # Errors
///
/// `NavigationError::SingularRhumb` if `lat` is at a pole.
pub fn isometric_latitude(lat: Radians) -> Result<f64, NavigationError> {
    if is_singular(libm::cos(lat.0)) {
        return Err(NavigationError::SingularRhumb);
    }

    Ok(libm::log(libm::tan(FRAC_PI_4 + 0.5 * lat.0)))
}

/// Calculate the course of the loxodrome from `a` to `b`.  
/// The loxodrome goes the shorter way round in longitude.
/// * `a` - the start position.
/// * `b` - the end position.
///
/// returns the course in (-π, π], clockwise from North, i.e. negative courses
/// are West.
///
/// # Errors
///
/// `NavigationError::SingularRhumb` if `a` or `b` is at a pole.
pub fn loxodromic_course(a: &Position, b: &Position) -> Result<Radians, NavigationError> {
    let delta_sigma = isometric_latitude(b.lat())? - isometric_latitude(a.lat())?;
    let delta_lon = delta_longitude(a.lon(), b.lon());
    Ok(Radians(libm::atan2(delta_lon.0, delta_sigma)))
}

/// Calculate the length of the loxodrome from `a` to `b` on the unit sphere.
/// * `a` - the start position.
/// * `b` - the end position.
///
/// returns the length in `Radians` of arc.
///
/// # Errors
///
/// `NavigationError::SingularRhumb` if `a` or `b` is at a pole.
pub fn loxodromic_arc(a: &Position, b: &Position) -> Result<Radians, NavigationError> {
    let course = loxodromic_course(a, b)?;
    let delta_lat = b.lat().0 - a.lat().0;

    // along a parallel
    if is_singular(delta_lat) {
        let delta_lon = delta_longitude(a.lon(), b.lon());
        return Ok(Radians(libm::fabs(delta_lon.0 * libm::cos(a.lat().0))));
    }

    let cos_course = libm::cos(course.0);
    if is_singular(cos_course) {
        return Err(NavigationError::SingularRhumb);
    }
    Ok(Radians(libm::fabs(delta_lat / cos_course)))
}
