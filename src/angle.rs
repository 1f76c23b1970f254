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

//! The angle module contains `DmsAngle`: an angle held as whole degrees,
//! arc minutes and arc seconds together with a direction.
//!
//! The magnitude of a `DmsAngle` is never negative, its sign is carried by
//! its `Axis`: `South` latitudes and `West` longitudes are negative.
//!
//! A `DmsAngle` may be constructed from its parts or from signed decimal
//! degrees. The decimal conversion truncates the minutes and seconds, so
//! converting to decimal degrees and back may lose up to an arc second, e.g.:
//!
//! ```
//! use angle_sc::Degrees;
//! use sphere_nav::angle::{AxisKind, DmsAngle};
//!
//! let lon = DmsAngle::from_signed_degrees(Degrees(13.0 + 23.0 / 60.0), AxisKind::Longitude).unwrap();
//! assert_eq!((13, 22, 59), (lon.degrees(), lon.minutes(), lon.seconds()));
//! ```

use angle_sc::{Degrees, Radians};
use core::fmt;
use thiserror::Error;

/// The number of arc minutes in a degree.
pub const MINUTES_IN_DEGREE: u8 = 60;

/// The number of arc seconds in an arc minute.
pub const SECONDS_IN_MINUTE: u8 = 60;

/// The error type for constructing or parsing a `DmsAngle`.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum AngleError {
    #[error("{degrees} degrees exceeds the {max} degree limit")]
    Degrees { degrees: u16, max: u16 },
    #[error("arc minutes {0} not in range [0..60)")]
    Minutes(u8),
    #[error("arc seconds {0} not in range [0..60)")]
    Seconds(u8),
    #[error("{0:?} is not a valid direction")]
    Direction(char),
    #[error("expected a {0} angle")]
    Axis(AxisKind),
    #[error("angle is not a finite number")]
    NotFinite,
}

/// The direction of a latitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pole {
    North,
    South,
}

impl TryFrom<char> for Pole {
    type Error = AngleError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'N' | 'n' => Ok(Self::North),
            'S' | 's' => Ok(Self::South),
            _ => Err(AngleError::Direction(c)),
        }
    }
}

impl fmt::Display for Pole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::North => 'N',
            Self::South => 'S',
        };
        write!(f, "{symbol}")
    }
}

/// The direction of a longitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationalDirection {
    East,
    West,
}

impl TryFrom<char> for RotationalDirection {
    type Error = AngleError;

    /// 'O' (Ost) is accepted for East.
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'E' | 'e' | 'O' | 'o' => Ok(Self::East),
            'W' | 'w' => Ok(Self::West),
            _ => Err(AngleError::Direction(c)),
        }
    }
}

impl fmt::Display for RotationalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::East => 'E',
            Self::West => 'W',
        };
        write!(f, "{symbol}")
    }
}

/// The kind of a coordinate axis, without a direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisKind {
    Latitude,
    Longitude,
}

impl AxisKind {
    /// The maximum magnitude of an angle on the axis in degrees.
    #[must_use]
    pub const fn max_degrees(self) -> u16 {
        match self {
            Self::Latitude => 90,
            Self::Longitude => 180,
        }
    }
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latitude => write!(f, "latitude"),
            Self::Longitude => write!(f, "longitude"),
        }
    }
}

/// A coordinate axis together with its direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Latitude(Pole),
    Longitude(RotationalDirection),
}

impl Axis {
    /// Construct an `Axis` of the given kind from the sign of an angle.
    /// * `kind` - the kind of axis.
    /// * `negative` - whether the angle is negative, i.e. South or West.
    #[must_use]
    pub const fn from_sign(kind: AxisKind, negative: bool) -> Self {
        match (kind, negative) {
            (AxisKind::Latitude, false) => Self::Latitude(Pole::North),
            (AxisKind::Latitude, true) => Self::Latitude(Pole::South),
            (AxisKind::Longitude, false) => Self::Longitude(RotationalDirection::East),
            (AxisKind::Longitude, true) => Self::Longitude(RotationalDirection::West),
        }
    }

    /// The kind of the axis.
    #[must_use]
    pub const fn kind(self) -> AxisKind {
        match self {
            Self::Latitude(_) => AxisKind::Latitude,
            Self::Longitude(_) => AxisKind::Longitude,
        }
    }

    /// Whether the direction is the negative member of its pair.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        matches!(
            self,
            Self::Latitude(Pole::South) | Self::Longitude(RotationalDirection::West)
        )
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latitude(pole) => write!(f, "{pole}"),
            Self::Longitude(direction) => write!(f, "{direction}"),
        }
    }
}

/// A latitude or longitude in degrees, minutes and seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DmsAngle {
    degrees: u16,
    minutes: u8,
    seconds: u8,
    axis: Axis,
}

impl DmsAngle {
    /// Constructor.
    /// * `degrees` - the whole degrees, at most 90 for a latitude or 180 for a longitude.
    /// * `minutes` - the arc minutes, less than 60.
    /// * `seconds` - the arc seconds, less than 60.
    /// * `axis` - the axis and direction of the angle.
    ///
    /// # Errors
    ///
    /// `AngleError` if a part is out of range, or the angle exceeds the
    /// maximum magnitude of its axis.
    pub fn new(degrees: u16, minutes: u8, seconds: u8, axis: Axis) -> Result<Self, AngleError> {
        if minutes >= MINUTES_IN_DEGREE {
            return Err(AngleError::Minutes(minutes));
        }
        if seconds >= SECONDS_IN_MINUTE {
            return Err(AngleError::Seconds(seconds));
        }

        let max = axis.kind().max_degrees();
        if max < degrees || (max == degrees && (0 < minutes || 0 < seconds)) {
            return Err(AngleError::Degrees { degrees, max });
        }

        Ok(Self {
            degrees,
            minutes,
            seconds,
            axis,
        })
    }

    /// Construct a latitude.
    ///
    /// # Errors
    ///
    /// `AngleError` if the latitude is not valid, see `new`.
    pub fn latitude(degrees: u16, minutes: u8, seconds: u8, pole: Pole) -> Result<Self, AngleError> {
        Self::new(degrees, minutes, seconds, Axis::Latitude(pole))
    }

    /// Construct a longitude.
    ///
    /// # Errors
    ///
    /// `AngleError` if the longitude is not valid, see `new`.
    pub fn longitude(
        degrees: u16,
        minutes: u8,
        seconds: u8,
        direction: RotationalDirection,
    ) -> Result<Self, AngleError> {
        Self::new(degrees, minutes, seconds, Axis::Longitude(direction))
    }

    /// Construct a `DmsAngle` from signed decimal degrees.  
    /// The sign determines the direction, the minutes and seconds are
    /// truncated, not rounded.
    /// * `value` - the angle in signed decimal degrees.
    /// * `kind` - the kind of axis.
    ///
    /// # Errors
    ///
    /// `AngleError` if the value is not finite or exceeds the maximum
    /// magnitude of its axis.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_signed_degrees(value: Degrees, kind: AxisKind) -> Result<Self, AngleError> {
        if !value.0.is_finite() {
            return Err(AngleError::NotFinite);
        }

        let magnitude = libm::fabs(value.0);
        let degrees = libm::trunc(magnitude);
        let minutes = libm::trunc((magnitude - degrees) * f64::from(MINUTES_IN_DEGREE));
        let seconds = libm::trunc(
            ((magnitude - degrees) * f64::from(MINUTES_IN_DEGREE) - minutes)
                * f64::from(SECONDS_IN_MINUTE),
        );

        // float to int casts saturate, so an overlarge value still fails in `new`
        Self::new(
            degrees as u16,
            minutes as u8,
            seconds as u8,
            Axis::from_sign(kind, value.0 < 0.0),
        )
    }

    /// Construct a `DmsAngle` from signed `Radians`.
    /// * `value` - the angle in signed radians.
    /// * `kind` - the kind of axis.
    ///
    /// # Errors
    ///
    /// `AngleError`, see `from_signed_degrees`.
    pub fn from_signed_radians(value: Radians, kind: AxisKind) -> Result<Self, AngleError> {
        Self::from_signed_degrees(Degrees(value.0.to_degrees()), kind)
    }

    /// The whole degrees.
    #[must_use]
    pub const fn degrees(&self) -> u16 {
        self.degrees
    }

    /// The arc minutes.
    #[must_use]
    pub const fn minutes(&self) -> u8 {
        self.minutes
    }

    /// The arc seconds.
    #[must_use]
    pub const fn seconds(&self) -> u8 {
        self.seconds
    }

    /// The axis and direction.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// The unsigned magnitude of the angle in decimal degrees.
    #[must_use]
    pub fn magnitude(&self) -> Degrees {
        Degrees(
            f64::from(self.degrees)
                + f64::from(self.minutes) / 60.0
                + f64::from(self.seconds) / 3600.0,
        )
    }

    /// The angle in signed decimal degrees.
    #[must_use]
    pub fn to_signed_degrees(&self) -> Degrees {
        let magnitude = self.magnitude();
        if self.axis.is_negative() {
            Degrees(-magnitude.0)
        } else {
            magnitude
        }
    }

    /// The angle in signed `Radians`, negative for South and West.
    #[must_use]
    pub fn to_radians(&self) -> Radians {
        let radians = self.magnitude().0.to_radians();
        if self.axis.is_negative() {
            Radians(-radians)
        } else {
            Radians(radians)
        }
    }
}

impl fmt::Display for DmsAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>3}° {:>2}' {:>2}\" {}",
            self.degrees, self.minutes, self.seconds, self.axis
        )
    }
}
