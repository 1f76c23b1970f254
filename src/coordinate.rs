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

//! The coordinate module contains the `Coordinate` type: a named, labelled
//! point on the sphere held as `DmsAngle` latitude and longitude.
//!
//! Navigation calculations work on a `Position`: the signed latitude and
//! longitude of a point in `Radians`.

use crate::angle::{AngleError, AxisKind, DmsAngle};
use crate::great_circle::fold_longitude;
use angle_sc::{Angle, Radians};
use core::f64::consts::FRAC_PI_2;
use core::fmt;
use unit_sphere::{LatLong, Vector3d};

/// The name of the derived North Pole coordinate.
pub const NORTH_POLE_NAME: &str = "North Pole";

/// The name of a derived northernmost point of a great circle.
pub const NORTHERNMOST_POINT_NAME: &str = "northernmost point";

/// The name of a derived intermediate point on a great circle.
pub const INTERMEDIATE_POINT_NAME: &str = "intermediate point";

/// The signed latitude and longitude of a point in `Radians`.  
/// South latitudes and West longitudes are negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    lat: Radians,
    lon: Radians,
}

impl Position {
    /// The North Pole.
    pub const NORTH_POLE: Self = Self::new(Radians(FRAC_PI_2), Radians(0.0));

    /// Constructor.
    /// * `lat` - the latitude, in [-π/2, π/2].
    /// * `lon` - the longitude.
    #[must_use]
    pub const fn new(lat: Radians, lon: Radians) -> Self {
        Self { lat, lon }
    }

    /// Accessor for the latitude.
    #[must_use]
    pub const fn lat(&self) -> Radians {
        self.lat
    }

    /// Accessor for the longitude.
    #[must_use]
    pub const fn lon(&self) -> Radians {
        self.lon
    }
}

/// The label of a `Coordinate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    /// A coordinate loaded into a `Registry`.
    Registered(char),
    /// A coordinate synthesized by a calculation.
    Derived,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registered(c) => write!(f, "{c}"),
            Self::Derived => write!(f, "-"),
        }
    }
}

/// A named point on the sphere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coordinate {
    lat: DmsAngle,
    lon: DmsAngle,
    name: String,
    label: Label,
}

impl Coordinate {
    /// Constructor.
    /// * `lat` - the latitude.
    /// * `lon` - the longitude.
    /// * `name` - the name of the point.
    /// * `label` - the label of the point.
    ///
    /// # Errors
    ///
    /// `AngleError::Axis` if `lat` is not a latitude or `lon` is not a longitude.
    pub fn new(
        lat: DmsAngle,
        lon: DmsAngle,
        name: impl Into<String>,
        label: Label,
    ) -> Result<Self, AngleError> {
        if lat.axis().kind() != AxisKind::Latitude {
            return Err(AngleError::Axis(AxisKind::Latitude));
        }
        if lon.axis().kind() != AxisKind::Longitude {
            return Err(AngleError::Axis(AxisKind::Longitude));
        }

        Ok(Self {
            lat,
            lon,
            name: name.into(),
            label,
        })
    }

    /// Construct a `Derived` coordinate from a calculated `Position`.  
    /// The longitude is folded into (-180°, 180°] first.
    /// * `name` - the name of the point.
    /// * `position` - the calculated position.
    ///
    /// # Errors
    ///
    /// `AngleError` if the position is not a finite latitude and longitude.
    pub fn derived(name: impl Into<String>, position: Position) -> Result<Self, AngleError> {
        let lat = DmsAngle::from_signed_radians(position.lat(), AxisKind::Latitude)?;
        let lon =
            DmsAngle::from_signed_radians(fold_longitude(position.lon()), AxisKind::Longitude)?;
        Self::new(lat, lon, name, Label::Derived)
    }

    /// Accessor for the latitude.
    #[must_use]
    pub const fn lat(&self) -> &DmsAngle {
        &self.lat
    }

    /// Accessor for the longitude.
    #[must_use]
    pub const fn lon(&self) -> &DmsAngle {
        &self.lon
    }

    /// Accessor for the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accessor for the label.
    #[must_use]
    pub const fn label(&self) -> Label {
        self.label
    }

    /// The signed latitude and longitude of the coordinate in `Radians`.
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.lat.to_radians(), self.lon.to_radians())
    }

    /// The coordinate as a `unit_sphere::LatLong`.
    #[must_use]
    pub fn to_lat_long(&self) -> LatLong {
        LatLong::new(self.lat.to_signed_degrees(), self.lon.to_signed_degrees())
    }

    /// The coordinate as a point on the unit sphere.
    #[must_use]
    pub fn to_point(&self) -> Vector3d {
        let lat = Angle::from(self.lat.to_signed_degrees());
        let lon = Angle::from(self.lon.to_signed_degrees());
        unit_sphere::vector::to_point(lat, lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}) {}\tΦ: {}\tλ: {}",
            self.label, self.name, self.lat, self.lon
        )
    }
}
