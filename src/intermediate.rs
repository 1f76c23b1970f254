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

//! The intermediate module contains functions for calculating the position
//! reached by flying along the great circle from A towards B with a given
//! speed, fuel load and fuel consumption.
//!
//! The range of a flight is: speed * fuel / consumption.
//!
//! In `Bounded` mode an aircraft that reaches B turns back towards A, so the
//! position is always on the arc between A and B.  
//! In `Unbounded` mode it continues around the great circle past B.

use crate::coordinate::Position;
use crate::error::{NavigationError, ParseOptionError};
use crate::great_circle::{central_angle, delta_longitude, fold_longitude, interior_angle};
use crate::sphere::{is_singular, Kilometres};
use crate::vertex::{is_meridional, is_polar};
use angle_sc::{trig::UnitNegRange, Radians};
use core::f64::consts::{FRAC_PI_2, PI, TAU};
use core::fmt;
use core::str::FromStr;

/// How a flight continues when its range exceeds the distance from A to B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TravelMode {
    /// Shuttle between A and B.
    #[default]
    Bounded,
    /// Continue around the great circle.
    Unbounded,
}

impl FromStr for TravelMode {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "b" | "bounded" => Ok(Self::Bounded),
            "u" | "unbounded" => Ok(Self::Unbounded),
            _ => Err(ParseOptionError::new("travel mode", s)),
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded => write!(f, "bounded"),
            Self::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// The speed, fuel load and fuel consumption of a flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightParameters {
    speed: f64,
    fuel: f64,
    consumption: f64,
}

impl FlightParameters {
    /// Constructor.
    /// * `speed` - the ground speed in km/h.
    /// * `fuel` - the fuel load, e.g. in kg.
    /// * `consumption` - the fuel consumption, in fuel units per hour.
    ///
    /// # Errors
    ///
    /// `NavigationError::InvalidFlightParameters` if a value or the range is
    /// not finite, `speed` or `fuel` is negative, or `consumption` is not
    /// positive.
    pub fn new(speed: f64, fuel: f64, consumption: f64) -> Result<Self, NavigationError> {
        let finite = speed.is_finite() && fuel.is_finite() && consumption.is_finite();
        if !finite
            || speed < 0.0
            || fuel < 0.0
            || consumption <= 0.0
            || !(speed * fuel / consumption).is_finite()
        {
            return Err(NavigationError::InvalidFlightParameters {
                speed,
                fuel,
                consumption,
            });
        }

        Ok(Self {
            speed,
            fuel,
            consumption,
        })
    }

    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    #[must_use]
    pub const fn fuel(&self) -> f64 {
        self.fuel
    }

    #[must_use]
    pub const fn consumption(&self) -> f64 {
        self.consumption
    }

    /// The flight time in hours until the fuel is exhausted.
    #[must_use]
    pub fn endurance(&self) -> f64 {
        self.fuel / self.consumption
    }

    /// The distance flown until the fuel is exhausted.
    #[must_use]
    pub fn range(&self) -> Kilometres {
        Kilometres(self.speed * self.endurance())
    }
}

/// Calculate the fraction of the route from A to B at which a flight ends.
/// * `ratio` - the range of the flight divided by the length of the route.
/// * `mode` - the travel mode.
///
/// returns a fraction in [0, 1] for `Bounded` mode, otherwise `ratio`.
#[must_use]
pub fn route_fraction(ratio: f64, mode: TravelMode) -> f64 {
    match mode {
        TravelMode::Bounded => {
            let legs = libm::trunc(ratio);
            let remainder = ratio - legs;
            // on an odd leg the flight is returning from B
            if libm::fmod(legs, 2.0) == 1.0 {
                1.0 - remainder
            } else {
                remainder
            }
        }
        TravelMode::Unbounded => ratio,
    }
}

/// The latitude of a point on a meridian great circle, measured through
/// the North Pole from the meridian of A.  
/// Points on the opposite meridian have latitudes beyond ±π/2.
/// * `lat` - the latitude of the point.
/// * `opposite` - whether the point is on the meridian opposite A.
#[must_use]
pub fn extended_latitude(lat: Radians, opposite: bool) -> Radians {
    if !opposite {
        lat
    } else if 0.0 <= lat.0 {
        Radians(PI - lat.0)
    } else {
        Radians(-PI - lat.0)
    }
}

/// Fold an extended latitude back into [-π/2, π/2].
/// * `theta` - the extended latitude.
///
/// returns the latitude and whether it is on the opposite meridian.
#[must_use]
pub fn fold_extended_latitude(theta: Radians) -> (Radians, bool) {
    let theta = fold_longitude(theta).0;
    if FRAC_PI_2 < theta {
        (Radians(PI - theta), true)
    } else if theta < -FRAC_PI_2 {
        (Radians(-PI - theta), true)
    } else {
        (Radians(theta), false)
    }
}

/// Calculate the position at `distance` from `a` along a meridian great
/// circle towards `b`.  
/// The meridian of a point at a pole is taken from the other point.
/// * `a` - the start position.
/// * `b` - the end position, on the meridian of `a` or the opposite meridian.
/// * `distance` - the arc distance from `a`.
#[must_use]
pub fn meridional_position(a: &Position, b: &Position, distance: Radians) -> Position {
    let a_polar = is_polar(a);
    let b_polar = is_polar(b);
    let meridian = if a_polar { b.lon() } else { a.lon() };
    let opposite = !a_polar
        && !b_polar
        && is_singular(PI - libm::fabs(delta_longitude(a.lon(), b.lon()).0));
    let theta_a = a.lat().0;
    let theta_b = extended_latitude(b.lat(), opposite).0;

    let northward = 0.0 < fold_longitude(Radians(theta_b - theta_a)).0;
    let theta = if northward {
        theta_a + distance.0
    } else {
        theta_a - distance.0
    };

    let (lat, crossed) = fold_extended_latitude(Radians(theta));
    let lon = if crossed {
        fold_longitude(Radians(meridian.0 + PI))
    } else {
        meridian
    };
    Position::new(lat, lon)
}

/// Calculate the position at `distance` from `a` along the great circle
/// towards `b`.
/// * `a` - the start position.
/// * `b` - the end position.
/// * `distance` - the arc distance from `a`, in [0, 2π).
///
/// # Errors
///
/// `NavigationError::DegenerateRoute`, see `interior_angle`.
pub fn great_circle_position(
    a: &Position,
    b: &Position,
    distance: Radians,
) -> Result<Position, NavigationError> {
    let alpha = interior_angle(a, b)?;
    let (sin_a, cos_a) = libm::sincos(a.lat().0);
    let (sin_d, cos_d) = libm::sincos(distance.0);

    let sin_lat = cos_d * sin_a + sin_d * cos_a * libm::cos(alpha.0);
    let lat = libm::asin(UnitNegRange::clamp(sin_lat).0);
    let cos_lat = libm::cos(lat);
    if is_singular(cos_lat) {
        // at a pole
        return Ok(Position::new(Radians(lat), a.lon()));
    }

    let cos_offset = (cos_d - sin_a * libm::sin(lat)) / (cos_a * cos_lat);
    let offset = libm::acos(UnitNegRange::clamp(cos_offset).0);

    // beyond the antipode of A the great circle returns from the other side
    let eastbound = 0.0 < delta_longitude(a.lon(), b.lon()).0;
    let eastward = if distance.0 <= PI {
        eastbound
    } else {
        !eastbound
    };
    let lon = if eastward {
        a.lon().0 + offset
    } else {
        a.lon().0 - offset
    };
    Ok(Position::new(Radians(lat), fold_longitude(Radians(lon))))
}

/// Calculate the position reached by a flight from `a` towards `b`.
/// * `a` - the start position.
/// * `b` - the end position.
/// * `range` - the range of the flight as an arc distance.
/// * `mode` - the travel mode.
///
/// # Errors
///
/// `NavigationError::DegenerateRoute` if the points coincide.
pub fn intermediate_position(
    a: &Position,
    b: &Position,
    range: Radians,
    mode: TravelMode,
) -> Result<Position, NavigationError> {
    let zeta = central_angle(a, b);
    if is_singular(zeta.0) {
        return Err(NavigationError::DegenerateRoute);
    }

    let fraction = route_fraction(range.0 / zeta.0, mode);
    let distance = Radians(libm::fmod(fraction * zeta.0, TAU));
    tracing::trace!(
        "intermediate position: fraction {} distance {}",
        fraction,
        distance.0
    );

    if is_meridional(a, b) {
        Ok(meridional_position(a, b, distance))
    } else {
        great_circle_position(a, b, distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    const RADIUS: f64 = 6_371.008_8;

    fn position(lat: f64, lon: f64) -> Position {
        Position::new(Radians(lat.to_radians()), Radians(lon.to_radians()))
    }

    fn berlin() -> Position {
        position(52.0 + 31.0 / 60.0, 13.0 + 23.0 / 60.0)
    }

    fn new_york() -> Position {
        position(40.0 + 42.0 / 60.0, -74.0)
    }

    fn assert_position(lat: f64, lon: f64, result: &Position) {
        assert!(
            is_within_tolerance(lat, result.lat().0.to_degrees(), 1.0e-9),
            "latitude {}",
            result.lat().0.to_degrees()
        );
        assert!(
            is_within_tolerance(lon, result.lon().0.to_degrees(), 1.0e-9),
            "longitude {}",
            result.lon().0.to_degrees()
        );
    }

    #[test]
    fn test_travel_mode() {
        assert_eq!(TravelMode::Bounded, TravelMode::default());
        assert_eq!(TravelMode::Bounded, "bounded".parse().unwrap());
        assert_eq!(TravelMode::Unbounded, "U".parse().unwrap());
        assert!("sideways".parse::<TravelMode>().is_err());
        assert_eq!("unbounded", TravelMode::Unbounded.to_string());
    }

    #[test]
    fn test_flight_parameters() {
        let params = FlightParameters::new(900.0, 20_000.0, 3_000.0).unwrap();
        assert_eq!(900.0, params.speed());
        assert_eq!(20_000.0, params.fuel());
        assert_eq!(3_000.0, params.consumption());
        assert!(is_within_tolerance(
            20.0 / 3.0,
            params.endurance(),
            f64::EPSILON * 8.0
        ));
        assert!(is_within_tolerance(6_000.0, params.range().0, 1.0e-9));

        assert!(FlightParameters::new(0.0, 0.0, 1.0).is_ok());
        assert!(FlightParameters::new(900.0, 100.0, 0.0).is_err());
        assert!(FlightParameters::new(-1.0, 100.0, 10.0).is_err());
        assert!(FlightParameters::new(900.0, -100.0, 10.0).is_err());
        assert!(FlightParameters::new(f64::NAN, 100.0, 10.0).is_err());
        assert!(FlightParameters::new(900.0, f64::INFINITY, 10.0).is_err());
        assert_eq!(
            Err(NavigationError::InvalidFlightParameters {
                speed: 1.0e200,
                fuel: 1.0e200,
                consumption: 1.0
            }),
            FlightParameters::new(1.0e200, 1.0e200, 1.0)
        );
        assert!(FlightParameters::new(1.0e200, 1.0, 1.0e-200).is_err());
    }

    #[test]
    fn test_route_fraction() {
        assert_eq!(0.0, route_fraction(0.0, TravelMode::Bounded));
        assert_eq!(0.25, route_fraction(0.25, TravelMode::Bounded));
        assert_eq!(0.75, route_fraction(1.25, TravelMode::Bounded));
        assert_eq!(0.25, route_fraction(2.25, TravelMode::Bounded));
        assert_eq!(1.0, route_fraction(1.0, TravelMode::Bounded));
        assert_eq!(0.0, route_fraction(2.0, TravelMode::Bounded));

        assert_eq!(2.25, route_fraction(2.25, TravelMode::Unbounded));
    }

    #[test]
    fn test_extended_latitude() {
        let lat = Radians(1.0);
        assert_eq!(lat, extended_latitude(lat, false));
        assert_eq!(PI - 1.0, extended_latitude(lat, true).0);
        assert_eq!(-PI + 1.0, extended_latitude(Radians(-1.0), true).0);

        assert_eq!((Radians(1.0), false), fold_extended_latitude(Radians(1.0)));
        let (lat, crossed) = fold_extended_latitude(Radians(2.0));
        assert!(crossed);
        assert!(is_within_tolerance(PI - 2.0, lat.0, f64::EPSILON * 4.0));
        let (lat, crossed) = fold_extended_latitude(Radians(-2.0));
        assert!(crossed);
        assert!(is_within_tolerance(2.0 - PI, lat.0, f64::EPSILON * 4.0));
    }

    #[test]
    fn test_meridional_position() {
        let adriatic = position(42.0, 13.0 + 23.0 / 60.0);

        // northward, past Berlin
        let distance = Radians(3.0 * central_angle(&adriatic, &berlin()).0);
        let result = meridional_position(&adriatic, &berlin(), distance);
        assert!(is_within_tolerance(
            73.55,
            result.lat().0.to_degrees(),
            1.0e-9
        ));
        assert_eq!(adriatic.lon(), result.lon());

        // southward
        let distance = Radians(0.5 * central_angle(&berlin(), &adriatic).0);
        let result = meridional_position(&berlin(), &adriatic, distance);
        assert!(is_within_tolerance(
            47.0 + 15.5 / 60.0,
            result.lat().0.to_degrees(),
            1.0e-9
        ));

        // over the North Pole
        let b = position(80.0, 13.0 + 23.0 / 60.0);
        let result = meridional_position(&berlin(), &b, Radians(60.0_f64.to_radians()));
        assert_position(67.0 + 29.0 / 60.0, 13.0 + 23.0 / 60.0 - 180.0, &result);

        // towards the opposite meridian
        let b = position(70.0, 13.0 + 23.0 / 60.0 - 180.0);
        let result = meridional_position(&berlin(), &b, Radians(60.0_f64.to_radians()));
        assert_position(67.0 + 29.0 / 60.0, 13.0 + 23.0 / 60.0 - 180.0, &result);
    }

    #[test]
    fn test_great_circle_position() {
        let result =
            great_circle_position(&berlin(), &new_york(), Radians(53.959221823472284_f64.to_radians()))
                .unwrap();
        assert_position(43.04512392053813, -70.58670963132357, &result);

        // beyond the antipode of Berlin
        let zeta = central_angle(&berlin(), &new_york());
        let distance = Radians(libm::fmod(4.0 * zeta.0, TAU));
        assert!(PI < distance.0);
        let result = great_circle_position(&berlin(), &new_york(), distance).unwrap();
        let expected = position(
            -result.lat().0.to_degrees(),
            result.lon().0.to_degrees() + 180.0,
        );
        let antipodal_distance = Radians(distance.0 - PI);
        let antipode = great_circle_position(&berlin(), &new_york(), antipodal_distance).unwrap();
        assert!(is_within_tolerance(
            expected.lat().0,
            antipode.lat().0,
            1.0e-9
        ));
        assert!(libm::fabs(delta_longitude(expected.lon(), antipode.lon()).0) < 1.0e-9);
    }

    #[test]
    fn test_intermediate_position() {
        let route = central_angle(&berlin(), &new_york());

        let range = Radians(6_000.0 / RADIUS);
        let result =
            intermediate_position(&berlin(), &new_york(), range, TravelMode::Bounded).unwrap();
        assert_position(43.04512392053813, -70.58670963132357, &result);

        // half way, there and back again
        let half_way = Radians(0.5 * route.0);
        let result =
            intermediate_position(&berlin(), &new_york(), half_way, TravelMode::Unbounded)
                .unwrap();
        assert_position(55.499272340712984, -36.27849757681516, &result);
        let one_and_half = Radians(1.5 * route.0);
        let result =
            intermediate_position(&berlin(), &new_york(), one_and_half, TravelMode::Bounded)
                .unwrap();
        assert_position(55.499272340712984, -36.27849757681516, &result);

        let result =
            intermediate_position(&berlin(), &new_york(), one_and_half, TravelMode::Unbounded)
                .unwrap();
        assert_position(18.64839810157391, -95.45372458444841, &result);

        // no range stays at A
        let result =
            intermediate_position(&berlin(), &new_york(), Radians(0.0), TravelMode::Bounded)
                .unwrap();
        assert_position(52.0 + 31.0 / 60.0, 13.0 + 23.0 / 60.0, &result);

        assert_eq!(
            Err(NavigationError::DegenerateRoute),
            intermediate_position(&berlin(), &berlin(), range, TravelMode::Bounded)
        );
    }

    #[test]
    fn test_intermediate_position_meridional() {
        let adriatic = position(42.0, 13.0 + 23.0 / 60.0);
        let route = central_angle(&adriatic, &berlin());

        let result = intermediate_position(
            &adriatic,
            &berlin(),
            Radians(3.0 * route.0),
            TravelMode::Unbounded,
        )
        .unwrap();
        assert_position(73.55, 13.0 + 23.0 / 60.0, &result);

        let result = intermediate_position(
            &adriatic,
            &berlin(),
            Radians(3.0 * route.0),
            TravelMode::Bounded,
        )
        .unwrap();
        assert_position(52.0 + 31.0 / 60.0, 13.0 + 23.0 / 60.0, &result);
    }

    #[test]
    fn test_intermediate_position_through_a_pole() {
        let north_pole = position(90.0, 0.0);
        let south_pole = position(-90.0, -120.0);
        let range = Radians(10.0_f64.to_radians());
        let lat_berlin = 52.0 + 31.0 / 60.0;
        let lon_berlin = 13.0 + 23.0 / 60.0;

        // from a pole along the meridian of the other point
        let result =
            intermediate_position(&north_pole, &berlin(), range, TravelMode::Bounded).unwrap();
        assert_position(80.0, lon_berlin, &result);

        let result =
            intermediate_position(&south_pole, &berlin(), range, TravelMode::Bounded).unwrap();
        assert_position(-80.0, lon_berlin, &result);

        // towards a pole
        let result =
            intermediate_position(&berlin(), &north_pole, range, TravelMode::Bounded).unwrap();
        assert_position(lat_berlin + 10.0, lon_berlin, &result);

        let result =
            intermediate_position(&berlin(), &south_pole, range, TravelMode::Bounded).unwrap();
        assert_position(lat_berlin - 10.0, lon_berlin, &result);

        // over the North Pole onto the opposite meridian
        let range = Radians((90.0 - lat_berlin + 10.0).to_radians());
        let result =
            intermediate_position(&berlin(), &south_pole, range, TravelMode::Unbounded).unwrap();
        assert_position(2.0 * lat_berlin - 100.0, lon_berlin, &result);
        let result =
            intermediate_position(&berlin(), &north_pole, range, TravelMode::Unbounded).unwrap();
        assert_position(80.0, lon_berlin - 180.0, &result);
    }
}
