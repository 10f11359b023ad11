//! Coordinates and polygon encoding for PostGIS.
//!
//! Request locations arrive as WGS84 longitude/latitude. Zone and area
//! polygons are stored in ETRS-GK25FIN (EPSG:3879); the projection itself is
//! left to PostGIS (`ST_Transform`) on both insert and lookup.

use std::fmt::Write;

use geo::{LineString, MultiPolygon, Point, Polygon};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// EPSG code of WGS84 geographic coordinates.
pub const WGS84_SRID: i32 = 4326;

/// EPSG code of ETRS-GK25FIN, the projected CRS polygons are stored in.
pub const GK25FIN_SRID: i32 = 3879;

/// A WGS84 point as submitted by clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Location {
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Ensure this value is between -180 and 180."
    ))]
    pub longitude: f64,
    #[validate(range(
        min = -90.0,
        max = 90.0,
        message = "Ensure this value is between -90 and 90."
    ))]
    pub latitude: f64,
}

impl Location {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<Location> for Point<f64> {
    fn from(location: Location) -> Self {
        Point::new(location.longitude, location.latitude)
    }
}

impl From<Point<f64>> for Location {
    fn from(point: Point<f64>) -> Self {
        Location::new(point.x(), point.y())
    }
}

/// Encode a multi-polygon as WKT for `ST_GeomFromText`.
///
/// Rings are written as stored; callers are expected to pass closed rings
/// (geo's polygon constructors close them).
pub fn multi_polygon_wkt(multi: &MultiPolygon<f64>) -> String {
    let mut out = String::from("MULTIPOLYGON(");
    for (i, polygon) in multi.0.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_polygon(&mut out, polygon);
    }
    out.push(')');
    out
}

/// Axis-aligned rectangle as a single-polygon multi-polygon.
///
/// Corners are given as `(min_lon, min_lat)` and `(max_lon, max_lat)`.
pub fn rectangle(min: (f64, f64), max: (f64, f64)) -> MultiPolygon<f64> {
    let exterior = LineString::from(vec![
        (min.0, max.1),
        (max.0, max.1),
        (max.0, min.1),
        (min.0, min.1),
        (min.0, max.1),
    ]);
    MultiPolygon::new(vec![Polygon::new(exterior, vec![])])
}

fn write_polygon(out: &mut String, polygon: &Polygon<f64>) {
    out.push('(');
    write_ring(out, polygon.exterior());
    for interior in polygon.interiors() {
        out.push(',');
        write_ring(out, interior);
    }
    out.push(')');
}

fn write_ring(out: &mut String, ring: &LineString<f64>) {
    out.push('(');
    for (i, coord) in ring.coords().enumerate() {
        if i > 0 {
            out.push(',');
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{} {}", coord.x, coord.y);
    }
    out.push(')');
}
