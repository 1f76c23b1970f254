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

// extern crate we're testing, same as any other code would do.
extern crate sphere_nav;

use angle_sc::{is_within_tolerance, Radians};
use core::f64::consts::{FRAC_PI_2, PI};
use sphere_nav::coordinate::NORTH_POLE_NAME;
use sphere_nav::great_circle::{central_angle, interior_angle};
use sphere_nav::intermediate::intermediate_position;
use sphere_nav::registry::Registry;
use sphere_nav::vertex::{is_meridional, northernmost_vertex};
use sphere_nav::*;

const COORDINATES: &str = "data/coordinates.txt";

/// One second of arc in radians, the resolution of a `DmsAngle`.
const ONE_SECOND: f64 = PI / (180.0 * 3600.0);

fn registry() -> Registry {
    Registry::from_path(COORDINATES).unwrap()
}

#[test]
fn test_load_coordinates() {
    let registry = registry();
    assert_eq!(8, registry.len());

    let berlin = registry.resolve('A').unwrap();
    assert_eq!("Berlin", berlin.name());
    let reykjavik = registry.resolve('H').unwrap();
    assert_eq!("Reykjavik", reykjavik.name());
    assert_eq!(
        DmsAngle::longitude(21, 56, 0, RotationalDirection::West).unwrap(),
        *reykjavik.lon()
    );
}

#[test]
fn test_identity() {
    let registry = registry();
    for a in registry.iter() {
        let route = Route::from((a, a));
        assert_eq!(0.0, route.central_angle().0);
        assert_eq!(0.0, route.distance().0);
        assert_eq!(Err(NavigationError::DegenerateRoute), route.heading());
    }
}

#[test]
fn test_symmetry_and_range() {
    let registry = registry();
    for a in registry.iter() {
        for b in registry.iter().filter(|b| b.label() != a.label()) {
            let route = Route::from((a, b));
            let reverse = Route::from((b, a));
            assert_eq!(route.central_angle(), reverse.central_angle());
            assert_eq!(route.distance(), reverse.distance());

            let zeta = route.central_angle().0;
            assert!(0.0 < zeta && zeta <= PI, "{a} {b}");
            assert!(0.0 < route.distance().0);

            // the same as the vector distance on the unit sphere
            let vector_distance = unit_sphere::great_circle::e2gc_distance(
                unit_sphere::vector::distance(&a.to_point(), &b.to_point()),
            );
            assert!(is_within_tolerance(vector_distance.0, zeta, 1.0e-9));
        }
    }
}

#[test]
fn test_heading_conventions() {
    let registry = registry();
    for a in registry.iter() {
        for b in registry.iter().filter(|b| b.label() != a.label()) {
            let route = Route::from((a, b));
            let alpha = route.course(CourseConvention::InteriorAngle).unwrap().0;
            let course = route.course(CourseConvention::TrueCourse).unwrap().0;
            assert!((0.0..=PI).contains(&alpha));
            assert!((0.0..2.0 * PI).contains(&course));
            assert!(
                is_within_tolerance(alpha, course, 1.0e-12)
                    || is_within_tolerance(2.0 * PI - alpha, course, 1.0e-12)
            );
        }
    }
}

#[test]
fn test_vertex_is_northernmost() {
    let registry = registry();
    for a in registry.iter() {
        for b in registry.iter().filter(|b| b.label() != a.label()) {
            let (a, b) = (a.position(), b.position());
            let vertex = northernmost_vertex(&a, &b).unwrap();
            let v = vertex.position();

            assert!(a.lat().0 <= v.lat().0 + 1.0e-12);
            assert!(b.lat().0 <= v.lat().0 + 1.0e-12);

            if is_meridional(&a, &b) {
                assert_eq!(Position::NORTH_POLE, v);
                assert_eq!(None, vertex.placement());
            } else {
                // the great circle runs due East or West at its vertex
                let alpha = interior_angle(&v, &a).unwrap();
                assert!(is_within_tolerance(FRAC_PI_2, alpha.0, 1.0e-6));
            }
        }
    }
}

#[test]
fn test_meridian_vertex_is_north_pole() {
    let registry = registry();
    let adriatic = registry.resolve('G').unwrap();
    let berlin = registry.resolve('A').unwrap();

    for (a, b) in [(adriatic, berlin), (berlin, adriatic)] {
        let point = Route::from((a, b)).northernmost_point().unwrap();
        assert_eq!(NORTH_POLE_NAME, point.name());
        assert_eq!(Label::Derived, point.label());
        assert_eq!(
            DmsAngle::latitude(90, 0, 0, Pole::North).unwrap(),
            *point.lat()
        );
    }
}

#[test]
fn test_bounded_round_trip_returns_to_start() {
    let registry = registry();
    for a in registry.iter() {
        for b in registry.iter().filter(|b| b.label() != a.label()) {
            let route = Route::from((a, b));
            let params = FlightParameters::new(2.0 * route.distance().0, 1.0, 1.0).unwrap();
            let point = route.intermediate_point(&params, TravelMode::Bounded).unwrap();

            // a derived coordinate is truncated to whole seconds
            let delta = central_angle(&a.position(), &point.position());
            assert!(delta.0 < 2.0 * ONE_SECOND, "{a} {b} {point}");
        }
    }
}

#[test]
fn test_unbounded_short_range_is_between() {
    let registry = registry();
    for a in registry.iter() {
        for b in registry.iter().filter(|b| b.label() != a.label()) {
            let route = Route::from((a, b));
            let zeta = route.central_angle().0;
            let params = FlightParameters::new(0.6 * route.distance().0, 3.0, 3.0).unwrap();
            let point = route.intermediate_point(&params, TravelMode::Unbounded).unwrap();

            let from_a = central_angle(&a.position(), &point.position()).0;
            let to_b = central_angle(&point.position(), &b.position()).0;
            assert!(0.0 < from_a && from_a < zeta, "{a} {b} {point}");
            assert!(
                is_within_tolerance(zeta, from_a + to_b, 4.0 * ONE_SECOND),
                "{a} {b} {point}"
            );
        }
    }
}

#[test]
fn test_intermediate_positions_lie_on_the_route() {
    let registry = registry();
    for a in registry.iter() {
        for b in registry.iter().filter(|b| b.label() != a.label()) {
            let (a, b) = (a.position(), b.position());
            let zeta = central_angle(&a, &b).0;
            for fraction in [0.25, 0.5, 0.75] {
                let range = Radians(fraction * zeta);
                let p = intermediate_position(&a, &b, range, TravelMode::Unbounded).unwrap();
                assert!(is_within_tolerance(
                    fraction * zeta,
                    central_angle(&a, &p).0,
                    1.0e-9
                ));
                assert!(is_within_tolerance(
                    (1.0 - fraction) * zeta,
                    central_angle(&p, &b).0,
                    1.0e-9
                ));
            }
        }
    }
}
