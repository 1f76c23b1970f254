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

//! The sphere module contains types and functions for converting between
//! great circle arcs on a sphere and distances on its surface.

pub mod earth;

use angle_sc::Radians;
use icao_units::non_si::NauticalMiles;
use icao_units::si::Metres;

/// The minimum value of a trigonometric denominator or of an angle difference
/// in `Radians`.  
/// A calculation that would divide by a smaller value is singular.
pub const MIN_VALUE: f64 = 1.0e-7;

/// A distance in kilometres.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Kilometres(pub f64);

impl Kilometres {
    /// Convert the distance to nautical miles.
    #[must_use]
    pub fn to_nautical_miles(self) -> NauticalMiles {
        NauticalMiles::from(Metres::from(self))
    }
}

impl From<Kilometres> for Metres {
    fn from(km: Kilometres) -> Self {
        Self(1000.0 * km.0)
    }
}

impl From<Metres> for Kilometres {
    fn from(m: Metres) -> Self {
        Self(m.0 / 1000.0)
    }
}

/// Calculate the length of a great circle arc on the surface of a sphere.
/// * `arc` - the great circle arc in `Radians`.
/// * `radius` - the radius of the sphere.
/// # Examples
/// ```
/// use angle_sc::Radians;
/// use sphere_nav::sphere::{arc_to_length, earth, Kilometres};
///
/// assert_eq!(Kilometres(6_371.008_8), arc_to_length(Radians(1.0), earth::MEAN_RADIUS));
/// ```
#[must_use]
pub fn arc_to_length(arc: Radians, radius: Kilometres) -> Kilometres {
    Kilometres(arc.0 * radius.0)
}

/// Calculate the great circle arc of a distance on the surface of a sphere.
/// * `length` - the distance along the surface.
/// * `radius` - the radius of the sphere.
#[must_use]
pub fn length_to_arc(length: Kilometres, radius: Kilometres) -> Radians {
    Radians(length.0 / radius.0)
}

/// Whether a value is too small to divide by.
/// * `value` - a trigonometric denominator or an angle difference.
#[must_use]
pub fn is_singular(value: f64) -> bool {
    libm::fabs(value) < MIN_VALUE
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_kilometres_conversions() {
        let km = Kilometres(1.852);
        let m = Metres::from(km);
        assert!(is_within_tolerance(1852.0, m.0, 1e-9));
        assert_eq!(km, Kilometres::from(m));

        let nm = km.to_nautical_miles();
        assert!(is_within_tolerance(1.0, nm.0, 1e-12));
    }

    #[test]
    fn test_arc_length_conversions() {
        let radius = earth::MEAN_RADIUS;
        let quarter = arc_to_length(Radians(core::f64::consts::FRAC_PI_2), radius);
        assert!(is_within_tolerance(10_007.557_2, quarter.0, 1e-3));

        let arc = length_to_arc(quarter, radius);
        assert!(is_within_tolerance(
            core::f64::consts::FRAC_PI_2,
            arc.0,
            f64::EPSILON
        ));
    }

    #[test]
    fn test_is_singular() {
        assert!(is_singular(0.0));
        assert!(is_singular(-0.5 * MIN_VALUE));
        assert!(!is_singular(MIN_VALUE));
        assert!(!is_singular(-1.0));
    }
}
