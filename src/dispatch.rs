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

//! The dispatch module contains the `Command`s of the `sphere-nav` command
//! line tool and the `Dispatcher` that executes them against a `Registry`.
//!
//! A command is a command code followed by its parameters, e.g.:
//!
//! ```text
//! 1 A B
//! 7 A B 900 20000 3000 unbounded
//! ```

use crate::coordinate::Coordinate;
use crate::error::NavigationError;
use crate::great_circle::CourseConvention;
use crate::intermediate::{FlightParameters, TravelMode};
use crate::registry::{Registry, RegistryError};
use crate::{Route, Sphere};
use angle_sc::Radians;
use core::fmt::Write;
use core::str::FromStr;
use thiserror::Error;

/// The error type for parsing and executing a `Command`.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// A command of the command line tool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// 1: the central angle between A and B.
    CentralAngle(char, char),
    /// 2: the heading at A of the great circle to B.
    Heading(char, char),
    /// 3: the northernmost point of the great circle through A and B.
    NorthernmostPoint(char, char),
    /// 4: the great circle distance between A and B.
    RouteLength(char, char),
    /// 5: the course of the loxodrome from A to B.
    LoxodromicCourse(char, char),
    /// 6: the length of the loxodrome from A to B.
    LoxodromicLength(char, char),
    /// 7: the point reached by flying from A towards B.
    IntermediatePoint {
        from: char,
        to: char,
        params: FlightParameters,
        mode: Option<TravelMode>,
    },
    /// l: list the coordinates.
    List,
    /// h: print the menu.
    Help,
    /// 0: exit.
    Exit,
}

fn parse_label(token: &str) -> Result<char, DispatchError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(label), None) if label.is_ascii_alphabetic() => Ok(label),
        _ => Err(DispatchError::Usage(format!(
            "invalid coordinate label {token:?}"
        ))),
    }
}

fn parse_number(token: &str, what: &str) -> Result<f64, DispatchError> {
    token
        .parse::<f64>()
        .map_err(|_| DispatchError::Usage(format!("invalid {what} {token:?}")))
}

fn parse_labels(code: &str, args: &[&str]) -> Result<(char, char), DispatchError> {
    match args {
        [a, b] => Ok((parse_label(a)?, parse_label(b)?)),
        _ => Err(DispatchError::Usage(format!(
            "command {code} expects two coordinate labels, e.g. {code} A B"
        ))),
    }
}

impl FromStr for Command {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let Some((&code, args)) = tokens.split_first() else {
            return Err(DispatchError::Usage("empty command".to_owned()));
        };

        match code {
            "0" | "q" | "quit" | "exit" => Ok(Self::Exit),
            "h" | "help" | "?" => Ok(Self::Help),
            "l" | "list" => Ok(Self::List),
            "1" => parse_labels(code, args).map(|(a, b)| Self::CentralAngle(a, b)),
            "2" => parse_labels(code, args).map(|(a, b)| Self::Heading(a, b)),
            "3" => parse_labels(code, args).map(|(a, b)| Self::NorthernmostPoint(a, b)),
            "4" => parse_labels(code, args).map(|(a, b)| Self::RouteLength(a, b)),
            "5" => parse_labels(code, args).map(|(a, b)| Self::LoxodromicCourse(a, b)),
            "6" => parse_labels(code, args).map(|(a, b)| Self::LoxodromicLength(a, b)),
            "7" => {
                let (labels, flight, mode) = match args {
                    [a, b, speed, fuel, consumption] => {
                        ([*a, *b], [*speed, *fuel, *consumption], None)
                    }
                    [a, b, speed, fuel, consumption, mode] => {
                        ([*a, *b], [*speed, *fuel, *consumption], Some(*mode))
                    }
                    _ => {
                        return Err(DispatchError::Usage(
                            "command 7 expects: 7 A B <speed> <fuel> <consumption> [bounded|unbounded]"
                                .to_owned(),
                        ))
                    }
                };

                let params = FlightParameters::new(
                    parse_number(flight[0], "speed")?,
                    parse_number(flight[1], "fuel")?,
                    parse_number(flight[2], "consumption")?,
                )?;
                let mode = mode
                    .map(str::parse::<TravelMode>)
                    .transpose()
                    .map_err(|e| DispatchError::Usage(e.to_string()))?;

                Ok(Self::IntermediatePoint {
                    from: parse_label(labels[0])?,
                    to: parse_label(labels[1])?,
                    params,
                    mode,
                })
            }
            _ => Err(DispatchError::Usage(format!(
                "unknown command {code:?}, enter h for help"
            ))),
        }
    }
}

/// The configuration of a `Dispatcher`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DispatcherConfig {
    /// The sphere to navigate on.
    pub sphere: Sphere,
    /// The convention used to report great circle headings.
    pub course: CourseConvention,
    /// The travel mode used when a command does not give one.
    pub mode: TravelMode,
}

/// The result of executing a `Command`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Text to print.
    Text(String),
    /// Exit the command loop.
    Exit,
}

/// Executes `Command`s on the coordinates of a `Registry`.
#[derive(Clone, Debug)]
pub struct Dispatcher<'r> {
    registry: &'r Registry,
    config: DispatcherConfig,
}

/// Convert `Radians` to decimal degrees for display.
fn degrees(angle: Radians) -> f64 {
    angle.0.to_degrees()
}

impl<'r> Dispatcher<'r> {
    /// Constructor.
    /// * `registry` - the coordinates.
    /// * `config` - the configuration.
    #[must_use]
    pub const fn new(registry: &'r Registry, config: DispatcherConfig) -> Self {
        Self { registry, config }
    }

    #[must_use]
    pub const fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// The loaded coordinates, one per line.
    #[must_use]
    pub fn listing(&self) -> String {
        self.registry.iter().fold(String::new(), |mut text, coordinate| {
            let _ = writeln!(text, "{coordinate}");
            text
        })
    }

    /// The menu of commands.
    #[must_use]
    pub fn menu(&self) -> String {
        let last = self
            .registry
            .iter()
            .last()
            .map_or_else(|| "A".to_owned(), |coordinate| coordinate.label().to_string());
        let labels = format!("[A-{last}] [A-{last}]");

        let mut text = String::from("Enter a command with its parameters, e.g. 1 A B\n");
        text.push_str("********************************************\n");
        let options = [
            ("Central angle", "1", ""),
            ("Heading", "2", ""),
            ("Northernmost point", "3", ""),
            ("Route length", "4", ""),
            ("Loxodromic course", "5", ""),
            ("Loxodromic length", "6", ""),
            (
                "Intermediate point",
                "7",
                " [speed in km/h] [fuel] [consumption per h] [bounded|unbounded]",
            ),
        ];
        for (name, code, extra) in options {
            let _ = writeln!(text, "{name}:\t{code} {labels}{extra}");
        }
        text.push_str("\nl == list, h == help, 0 == exit\n");
        text
    }

    fn resolve(&self, a: char, b: char) -> Result<(&'r Coordinate, &'r Coordinate), DispatchError> {
        Ok((self.registry.resolve(a)?, self.registry.resolve(b)?))
    }

    /// Execute a `Command`.
    /// * `command` - the command to execute.
    ///
    /// returns the text to print, or `Reply::Exit`.
    ///
    /// # Errors
    ///
    /// `DispatchError` if a label cannot be resolved or a calculation fails.
    pub fn execute(&self, command: &Command) -> Result<Reply, DispatchError> {
        tracing::debug!("executing {:?}", command);
        let result = self.run(command);
        if let Err(error) = &result {
            tracing::warn!("{:?} failed: {}", command, error);
        }
        result
    }

    fn run(&self, command: &Command) -> Result<Reply, DispatchError> {
        let sphere = &self.config.sphere;
        let text = match *command {
            Command::Exit => return Ok(Reply::Exit),
            Command::Help => self.menu(),
            Command::List => self.listing(),
            Command::CentralAngle(a, b) => {
                let (a, b) = self.resolve(a, b)?;
                let route = Route::new(a, b, sphere);
                format!(
                    "Central angle between {} and {}:\t{:.4}°",
                    a.name(),
                    b.name(),
                    degrees(route.central_angle())
                )
            }
            Command::Heading(a, b) => {
                let (a, b) = self.resolve(a, b)?;
                let route = Route::new(a, b, sphere);
                let heading = route.course(self.config.course)?;
                let kind = match self.config.course {
                    CourseConvention::InteriorAngle => "Heading",
                    CourseConvention::TrueCourse => "True course",
                };
                format!(
                    "{kind} on the great circle from {} to {}:\t{:.4}°",
                    a.name(),
                    b.name(),
                    degrees(heading)
                )
            }
            Command::NorthernmostPoint(a, b) => {
                let (a, b) = self.resolve(a, b)?;
                let route = Route::new(a, b, sphere);
                let vertex = route.vertex()?;
                let point = route.northernmost_point()?;
                let mut text = format!(
                    "Northernmost point on the great circle from {} to {}:\n{point}",
                    a.name(),
                    b.name()
                );
                if let Some(placement) = vertex.placement() {
                    let _ = write!(
                        text,
                        "\nVertex position: {}.",
                        placement.describe(a.name(), b.name())
                    );
                }
                text
            }
            Command::RouteLength(a, b) => {
                let (a, b) = self.resolve(a, b)?;
                let distance = Route::new(a, b, sphere).distance();
                format!(
                    "Route length on the great circle from {} to {}:\t{:.3} km ({:.3} NM)",
                    a.name(),
                    b.name(),
                    distance.0,
                    distance.to_nautical_miles().0
                )
            }
            Command::LoxodromicCourse(a, b) => {
                let (a, b) = self.resolve(a, b)?;
                let course = Route::new(a, b, sphere).loxodromic_course()?;
                // clockwise from North in [0°, 360°)
                let course = libm::fmod(degrees(course) + 360.0, 360.0);
                format!(
                    "Loxodromic course from {} to {}:\t{course:.4}°",
                    a.name(),
                    b.name()
                )
            }
            Command::LoxodromicLength(a, b) => {
                let (a, b) = self.resolve(a, b)?;
                let length = Route::new(a, b, sphere).loxodromic_length()?;
                format!(
                    "Loxodromic length from {} to {}:\t{:.3} km",
                    a.name(),
                    b.name(),
                    length.0
                )
            }
            Command::IntermediatePoint {
                from,
                to,
                params,
                mode,
            } => {
                let (a, b) = self.resolve(from, to)?;
                let mode = mode.unwrap_or(self.config.mode);
                let point = Route::new(a, b, sphere).intermediate_point(&params, mode)?;
                format!(
                    "Intermediate point on the great circle from {} to {} after {:.3} km ({mode}):\n{point}",
                    a.name(),
                    b.name(),
                    params.range().0
                )
            }
        };
        Ok(Reply::Text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COORDINATES: &str = "\
52 31 0 N, 13 23 0 E, Berlin
40 42 0 N, 74 0 0 W, New York
42 0 0 N, 13 23 0 E, Adriatic Sea
";

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(text) => text,
            Reply::Exit => panic!("unexpected exit"),
        }
    }

    fn execute(dispatcher: &Dispatcher, line: &str) -> Result<Reply, DispatchError> {
        line.parse::<Command>()
            .and_then(|command| dispatcher.execute(&command))
    }

    #[test]
    fn test_command_from_str() {
        assert_eq!(Command::CentralAngle('A', 'B'), "1 A B".parse().unwrap());
        assert_eq!(Command::Heading('B', 'a'), " 2  B\ta ".parse().unwrap());
        assert_eq!(Command::NorthernmostPoint('A', 'C'), "3 A C".parse().unwrap());
        assert_eq!(Command::RouteLength('A', 'B'), "4 A B".parse().unwrap());
        assert_eq!(Command::LoxodromicCourse('A', 'B'), "5 A B".parse().unwrap());
        assert_eq!(Command::LoxodromicLength('A', 'B'), "6 A B".parse().unwrap());
        assert_eq!(
            Command::IntermediatePoint {
                from: 'A',
                to: 'B',
                params: FlightParameters::new(900.0, 20_000.0, 3_000.0).unwrap(),
                mode: Some(TravelMode::Unbounded)
            },
            "7 A B 900 20000 3000 unbounded".parse().unwrap()
        );
        assert!(matches!(
            "7 A B 900 20000 3000".parse::<Command>(),
            Ok(Command::IntermediatePoint { mode: None, .. })
        ));
        assert_eq!(Command::Exit, "0".parse().unwrap());
        assert_eq!(Command::Exit, "q".parse().unwrap());
        assert_eq!(Command::Help, "h".parse().unwrap());
        assert_eq!(Command::List, "l".parse().unwrap());
    }

    #[test]
    fn test_command_from_str_errors() {
        assert!(matches!("".parse::<Command>(), Err(DispatchError::Usage(_))));
        assert!(matches!("9 A B".parse::<Command>(), Err(DispatchError::Usage(_))));
        assert!(matches!("1 A".parse::<Command>(), Err(DispatchError::Usage(_))));
        assert!(matches!("1 A BC".parse::<Command>(), Err(DispatchError::Usage(_))));
        assert!(matches!("1 A 2".parse::<Command>(), Err(DispatchError::Usage(_))));
        assert!(matches!(
            "7 A B 900 fuel 3000".parse::<Command>(),
            Err(DispatchError::Usage(_))
        ));
        assert!(matches!(
            "7 A B 900 20000 3000 sideways".parse::<Command>(),
            Err(DispatchError::Usage(_))
        ));
        assert!(matches!(
            "7 A B 900 20000 0".parse::<Command>(),
            Err(DispatchError::Navigation(
                NavigationError::InvalidFlightParameters { .. }
            ))
        ));
    }

    #[test]
    fn test_dispatcher_great_circle_commands() {
        let registry = Registry::from_reader(COORDINATES.as_bytes()).unwrap();
        let dispatcher = Dispatcher::new(&registry, DispatcherConfig::default());

        let reply = text(execute(&dispatcher, "1 A B").unwrap());
        assert_eq!("Central angle between Berlin and New York:\t57.4169°", reply);

        let reply = text(execute(&dispatcher, "2 A B").unwrap());
        assert_eq!(
            "Heading on the great circle from Berlin to New York:\t64.0015°",
            reply
        );

        let reply = text(execute(&dispatcher, "4 A B").unwrap());
        assert_eq!(
            "Route length on the great circle from Berlin to New York:\t6384.478 km (3447.342 NM)",
            reply
        );

        let reply = text(execute(&dispatcher, "3 A B").unwrap());
        assert!(reply.contains("-) northernmost point\tΦ:  56° 50' 30\" N\tλ:  18° 11' 28\" W"));
        assert!(reply.ends_with("Vertex position: between Berlin and New York."));

        let reply = text(execute(&dispatcher, "3 C A").unwrap());
        assert!(reply.contains("-) North Pole\tΦ:  90°  0'  0\" N"));
        assert!(!reply.contains("Vertex position"));
    }

    #[test]
    fn test_dispatcher_true_course() {
        let registry = Registry::from_reader(COORDINATES.as_bytes()).unwrap();
        let config = DispatcherConfig {
            course: CourseConvention::TrueCourse,
            ..DispatcherConfig::default()
        };
        let dispatcher = Dispatcher::new(&registry, config);

        let reply = text(execute(&dispatcher, "2 A B").unwrap());
        assert_eq!(
            "True course on the great circle from Berlin to New York:\t295.9985°",
            reply
        );
    }

    #[test]
    fn test_dispatcher_rhumb_commands() {
        let registry = Registry::from_reader(COORDINATES.as_bytes()).unwrap();
        let dispatcher = Dispatcher::new(&registry, DispatcherConfig::default());

        let reply = text(execute(&dispatcher, "5 A B").unwrap());
        assert_eq!("Loxodromic course from Berlin to New York:\t258.8011°", reply);

        let reply = text(execute(&dispatcher, "6 A B").unwrap());
        assert_eq!("Loxodromic length from Berlin to New York:\t6765.444 km", reply);
    }

    #[test]
    fn test_dispatcher_intermediate_point() {
        let registry = Registry::from_reader(COORDINATES.as_bytes()).unwrap();
        let dispatcher = Dispatcher::new(&registry, DispatcherConfig::default());

        let reply = text(execute(&dispatcher, "7 A B 900 20000 3000").unwrap());
        assert!(reply.starts_with(
            "Intermediate point on the great circle from Berlin to New York after 6000.000 km (bounded):\n"
        ));
        assert!(reply.ends_with("-) intermediate point\tΦ:  43°  2' 42\" N\tλ:  70° 35' 12\" W"));
    }

    #[test]
    fn test_dispatcher_errors() {
        let registry = Registry::from_reader(COORDINATES.as_bytes()).unwrap();
        let dispatcher = Dispatcher::new(&registry, DispatcherConfig::default());

        assert!(matches!(
            execute(&dispatcher, "1 A Z"),
            Err(DispatchError::Registry(RegistryError::UnresolvedLabel('Z')))
        ));
        assert!(matches!(
            execute(&dispatcher, "2 A A"),
            Err(DispatchError::Navigation(NavigationError::DegenerateRoute))
        ));

        // the central angle of a coincident route is zero
        let reply = text(execute(&dispatcher, "1 A A").unwrap());
        assert!(reply.ends_with("0.0000°"));
    }

    #[test]
    fn test_dispatcher_menu_and_listing() {
        let registry = Registry::from_reader(COORDINATES.as_bytes()).unwrap();
        let dispatcher = Dispatcher::new(&registry, DispatcherConfig::default());

        assert_eq!(Reply::Exit, execute(&dispatcher, "0").unwrap());

        let menu = text(execute(&dispatcher, "h").unwrap());
        assert!(menu.contains("Central angle:\t1 [A-C] [A-C]\n"));
        assert!(menu.contains("7 [A-C] [A-C] [speed in km/h]"));

        let listing = text(execute(&dispatcher, "l").unwrap());
        assert_eq!(3, listing.lines().count());
        assert!(listing.starts_with("A) Berlin\tΦ:  52° 31'  0\" N\tλ:  13° 23'  0\" E\n"));
    }
}
