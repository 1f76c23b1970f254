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

//! sphere-nav
//!
//! A library and command line tool for performing navigation calculations
//! on a spherical Earth.
//!
//! ## Spherical navigation
//!
//! The shortest path between two points on the surface of a sphere is the
//! shorter arc of the [great circle](https://en.wikipedia.org/wiki/Great_circle)
//! through them.
//! A [rhumb line](https://en.wikipedia.org/wiki/Rhumb_line) (loxodrome) is
//! a path of constant course; it is generally longer than the great circle
//! arc but simpler to steer.
//!
//! This library calculates, for an ordered pair of coordinates A and B:
//!
//! - the central angle and great circle distance between them;
//! - the heading at A of the great circle to B;
//! - the course and length of the loxodrome from A to B;
//! - the northernmost point (vertex) of the great circle through A and B;
//! - and the point reached by flying from A towards B with a given speed,
//!   fuel load and fuel consumption.
//!
//! ## Design
//!
//! Coordinates are held in degrees, minutes and seconds, see `DmsAngle` and
//! `Coordinate`. Calculations are performed on signed latitudes and longitudes
//! in `Radians`, see `Position`, by free functions in the `great_circle`,
//! `rhumb`, `vertex` and `intermediate` modules.
//!
//! The `Sphere` struct holds the radius of the sphere.
//! The static `MEAN_EARTH` represents the IUGG mean Earth radius `Sphere` which
//! is used by the `Route` `From` trait to create `Route`s on the mean Earth.
//!
//! A `Route` is the engine entry point: each calculation either returns a
//! result or a `NavigationError`.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`
//!   and perform great-circle and vector calculations.
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres` and
//!   `NauticalMiles` and perform conversions between them.
//!
//! The `registry` and `dispatch` modules load coordinate files and execute
//! the commands of the `sphere-nav` command line tool.

extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod angle;
pub mod coordinate;
pub mod dispatch;
pub mod error;
pub mod great_circle;
pub mod intermediate;
pub mod registry;
pub mod rhumb;
pub mod sphere;
pub mod vertex;

pub use angle::{AngleError, Axis, AxisKind, DmsAngle, Pole, RotationalDirection};
pub use angle_sc::{Angle, Degrees, Radians, Validate};
pub use coordinate::{Coordinate, Label, Position};
pub use error::NavigationError;
pub use great_circle::CourseConvention;
pub use icao_units::non_si::NauticalMiles;
pub use icao_units::si::Metres;
pub use intermediate::{FlightParameters, TravelMode};
pub use sphere::Kilometres;
pub use unit_sphere::LatLong;
pub use vertex::{Vertex, VertexPosition};

use once_cell::sync::Lazy;

/// The parameters of a `Sphere`.
#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    /// The radius of the sphere.
    radius: Kilometres,
}

impl Validate for Sphere {
    /// Test whether a `Sphere` is valid.
    /// Whether the radius is finite and greater than zero.
    fn is_valid(&self) -> bool {
        self.radius.0.is_finite() && 0.0 < self.radius.0
    }
}

impl Sphere {
    /// Constructor.
    /// * `radius` - the radius of the `Sphere`.
    #[must_use]
    pub const fn new(radius: Kilometres) -> Self {
        Self { radius }
    }

    /// Construct a `Sphere` with the IUGG mean Earth radius.
    #[must_use]
    pub const fn mean_earth() -> Self {
        Self::new(sphere::earth::MEAN_RADIUS)
    }

    /// The radius of the sphere.
    #[must_use]
    pub const fn radius(&self) -> Kilometres {
        self.radius
    }

    /// Convert an arc distance to a length on the surface of the sphere.
    #[must_use]
    pub fn arc_to_length(&self, arc: Radians) -> Kilometres {
        sphere::arc_to_length(arc, self.radius)
    }

    /// Convert a length on the surface of the sphere to an arc distance.
    #[must_use]
    pub fn length_to_arc(&self, length: Kilometres) -> Radians {
        sphere::length_to_arc(length, self.radius)
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::mean_earth()
    }
}

/// A static instance of the mean Earth `Sphere`.
pub static MEAN_EARTH: Lazy<Sphere> = Lazy::new(Sphere::mean_earth);

/// An ordered pair of positions on a `Sphere`: from A to B.
///
/// # Examples
/// ```
/// use sphere_nav::*;
/// use angle_sc::is_within_tolerance;
///
/// let berlin = Coordinate::new(
///     DmsAngle::latitude(52, 31, 0, Pole::North).unwrap(),
///     DmsAngle::longitude(13, 23, 0, RotationalDirection::East).unwrap(),
///     "Berlin",
///     Label::Registered('A'),
/// ).unwrap();
/// let new_york = Coordinate::new(
///     DmsAngle::latitude(40, 42, 0, Pole::North).unwrap(),
///     DmsAngle::longitude(74, 0, 0, RotationalDirection::West).unwrap(),
///     "New York",
///     Label::Registered('B'),
/// ).unwrap();
///
/// let route = Route::from((&berlin, &new_york));
/// assert!(is_within_tolerance(57.416913, route.central_angle().0.to_degrees(), 1e-6));
/// assert!(is_within_tolerance(6384.478, route.distance().0, 1e-3));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Route<'a> {
    /// The start position.
    a: Position,
    /// The end position.
    b: Position,
    /// A reference to the underlying `Sphere`.
    sphere: &'a Sphere,
}

impl<'a> Route<'a> {
    /// Construct a `Route` between a pair of coordinates.
    /// * `a` - the start coordinate.
    /// * `b` - the end coordinate.
    /// * `sphere` - a reference to the `Sphere`.
    #[must_use]
    pub fn new(a: &Coordinate, b: &Coordinate, sphere: &'a Sphere) -> Self {
        Self::between_positions(a.position(), b.position(), sphere)
    }

    /// Construct a `Route` between a pair of positions.
    #[must_use]
    pub const fn between_positions(a: Position, b: Position, sphere: &'a Sphere) -> Self {
        Self { a, b, sphere }
    }

    /// The start position.
    #[must_use]
    pub const fn a(&self) -> Position {
        self.a
    }

    /// The end position.
    #[must_use]
    pub const fn b(&self) -> Position {
        self.b
    }

    /// The `Sphere` the `Route` is on.
    #[must_use]
    pub const fn sphere(&self) -> &Sphere {
        self.sphere
    }

    /// The central angle between A and B, in [0, π].
    #[must_use]
    pub fn central_angle(&self) -> Radians {
        great_circle::central_angle(&self.a, &self.b)
    }

    /// The great circle distance between A and B.
    #[must_use]
    pub fn distance(&self) -> Kilometres {
        self.sphere.arc_to_length(self.central_angle())
    }

    /// The interior angle at A between the meridian and the great circle to B.
    ///
    /// # Errors
    ///
    /// `NavigationError::DegenerateRoute` if the points coincide, are antipodal,
    /// or A is at a pole.
    pub fn heading(&self) -> Result<Radians, NavigationError> {
        great_circle::interior_angle(&self.a, &self.b)
    }

    /// The interior angle at B between the meridian and the great circle to A.
    ///
    /// # Errors
    ///
    /// `NavigationError::DegenerateRoute`, see `heading`.
    pub fn end_heading(&self) -> Result<Radians, NavigationError> {
        great_circle::interior_angle(&self.b, &self.a)
    }

    /// The heading at A of the great circle to B in the given convention.
    ///
    /// # Errors
    ///
    /// `NavigationError::DegenerateRoute`, see `heading`.
    pub fn course(&self, convention: CourseConvention) -> Result<Radians, NavigationError> {
        convention.heading(&self.a, &self.b)
    }

    /// The course of the loxodrome from A to B in (-π, π].
    ///
    /// # Errors
    ///
    /// `NavigationError::SingularRhumb` if A or B is at a pole.
    pub fn loxodromic_course(&self) -> Result<Radians, NavigationError> {
        rhumb::loxodromic_course(&self.a, &self.b)
    }

    /// The length of the loxodrome from A to B.
    ///
    /// # Errors
    ///
    /// `NavigationError::SingularRhumb` if A or B is at a pole.
    pub fn loxodromic_length(&self) -> Result<Kilometres, NavigationError> {
        let arc = rhumb::loxodromic_arc(&self.a, &self.b)?;
        Ok(self.sphere.arc_to_length(arc))
    }

    /// The northernmost point of the great circle through A and B, together
    /// with where it lies relative to them.
    ///
    /// # Errors
    ///
    /// `NavigationError::DegenerateRoute`, see `great_circle::interior_angle`.
    pub fn vertex(&self) -> Result<Vertex, NavigationError> {
        vertex::northernmost_vertex(&self.a, &self.b)
    }

    /// The northernmost point of the great circle through A and B as a
    /// derived `Coordinate`, named "North Pole" for a meridian.
    ///
    /// # Errors
    ///
    /// `NavigationError::DegenerateRoute`, see `vertex`.
    pub fn northernmost_point(&self) -> Result<Coordinate, NavigationError> {
        let vertex = self.vertex()?;
        let name = if vertex.placement().is_some() {
            coordinate::NORTHERNMOST_POINT_NAME
        } else {
            coordinate::NORTH_POLE_NAME
        };
        Ok(Coordinate::derived(name, vertex.position())?)
    }

    /// The point reached by flying from A towards B.
    /// * `params` - the speed, fuel load and fuel consumption of the flight.
    /// * `mode` - the travel mode.
    ///
    /// # Errors
    ///
    /// `NavigationError::DegenerateRoute` if the points coincide.
    pub fn intermediate_point(
        &self,
        params: &FlightParameters,
        mode: TravelMode,
    ) -> Result<Coordinate, NavigationError> {
        let range = self.sphere.length_to_arc(params.range());
        let position = intermediate::intermediate_position(&self.a, &self.b, range, mode)?;
        Ok(Coordinate::derived(
            coordinate::INTERMEDIATE_POINT_NAME,
            position,
        )?)
    }
}

impl From<(&Coordinate, &Coordinate)> for Route<'_> {
    /// Construct a `Route` between a pair of coordinates on the mean Earth `Sphere`.
    /// * `a`, `b` - the start and end coordinates.
    fn from(params: (&Coordinate, &Coordinate)) -> Self {
        Route::new(params.0, params.1, &MEAN_EARTH)
    }
}
