// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geodesic area of drawn shapes.
//!
//! Rings are measured on the WGS84 ellipsoid. Malformed input measures as
//! zero instead of failing, so a bad gesture never breaks capture.

use crate::models::coords::{DisplayRing, LatLng, WireRing};
use crate::models::shape::{DrawnGeometry, Hectares};
use geo::algorithm::orient::{Direction, Orient};
use geo::GeodesicArea;
use std::f64::consts::PI;

/// Vertices used when a circle has to be sent or exported as a polygon.
pub const CIRCLE_SEGMENTS: usize = 64;

/// Mean earth radius (IUGG), meters.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Area of a ring given in wire order.
pub fn ring_area(ring: &WireRing) -> Hectares {
    if ring.distinct_vertex_count() < 3 {
        return Hectares::ZERO;
    }
    if ring.points().iter().any(|p| !LatLng::from(*p).is_finite()) {
        return Hectares::ZERO;
    }

    let polygon = ring.to_polygon().orient(Direction::Default);
    Hectares::from_square_meters(polygon.geodesic_area_unsigned())
}

/// Area of a circle, π·r².
pub fn circle_area(radius_m: f64) -> Hectares {
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Hectares::ZERO;
    }
    Hectares::from_square_meters(PI * radius_m * radius_m)
}

pub fn geometry_area(geometry: &DrawnGeometry) -> Hectares {
    match geometry {
        DrawnGeometry::Rectangle { ring } | DrawnGeometry::Polygon { ring } => {
            ring_area(&ring.to_wire())
        }
        DrawnGeometry::Circle { radius_m, .. } => circle_area(*radius_m),
    }
}

/// Approximate a circle by a counter-clockwise ring of [`CIRCLE_SEGMENTS`]
/// vertices on the sphere. A degenerate circle collapses to its center.
pub fn circle_ring(center: LatLng, radius_m: f64) -> DisplayRing {
    if !center.is_finite() || !radius_m.is_finite() || radius_m <= 0.0 {
        return DisplayRing::new(vec![center]);
    }

    let lat1 = center.lat.to_radians();
    let lng1 = center.lng.to_radians();
    let delta = radius_m / EARTH_RADIUS_M;

    let points = (0..CIRCLE_SEGMENTS)
        .map(|i| {
            // Negative bearings walk counter-clockwise in lng/lat space.
            let bearing = -2.0 * PI * (i as f64) / (CIRCLE_SEGMENTS as f64);
            let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos()).asin();
            let lng2 = lng1
                + (bearing.sin() * delta.sin() * lat1.cos())
                    .atan2(delta.cos() - lat1.sin() * lat2.sin());
            LatLng::new(lat2.to_degrees(), lng2.to_degrees())
        })
        .collect();

    DisplayRing::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f64, f64)]) -> WireRing {
        DisplayRing::new(points.iter().map(|&(lat, lng)| LatLng::new(lat, lng)).collect()).to_wire()
    }

    #[test]
    fn test_orientation_does_not_matter() {
        let ccw = ring(&[(0.0, 0.0), (0.0, 0.01), (0.01, 0.01), (0.01, 0.0)]);
        let cw = ring(&[(0.0, 0.0), (0.01, 0.0), (0.01, 0.01), (0.0, 0.01)]);
        assert_eq!(ring_area(&ccw).to_string(), ring_area(&cw).to_string());
        assert!(ring_area(&ccw).value() > 100.0);
    }

    #[test]
    fn test_closing_vertex_not_counted() {
        let closed_pair = ring(&[(0.0, 0.0), (0.0, 1.0), (0.0, 0.0)]);
        assert_eq!(ring_area(&closed_pair), Hectares::ZERO);
    }

    #[test]
    fn test_non_finite_ring_is_zero() {
        let bad = ring(&[(0.0, 0.0), (f64::NAN, 1.0), (1.0, 1.0)]);
        assert_eq!(ring_area(&bad).to_string(), "0.00");
    }

    #[test]
    fn test_circle_area() {
        // 100 m radius → 31 415.9 m² → 3.14 ha
        assert_eq!(circle_area(100.0).to_string(), "3.14");
        assert_eq!(circle_area(0.0).to_string(), "0.00");
        assert_eq!(circle_area(-5.0).to_string(), "0.00");
        assert_eq!(circle_area(f64::INFINITY).to_string(), "0.00");
    }

    #[test]
    fn test_circle_ring_stays_on_radius() {
        let center = LatLng::new(23.0, 72.5);
        let ring = circle_ring(center, 500.0);
        assert_eq!(ring.len(), CIRCLE_SEGMENTS);

        // First vertex is due north: 500 m ≈ 0.0045°
        let north = ring.points()[0];
        assert!((north.lat - center.lat - 0.0045).abs() < 0.0001);
        assert!((north.lng - center.lng).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_circle_ring() {
        let ring = circle_ring(LatLng::new(1.0, 2.0), 0.0);
        assert_eq!(ring.len(), 1);
    }
}
