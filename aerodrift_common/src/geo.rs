/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused,uncommon_codepoints,non_snake_case)]

//! this module provides the spherical earth geometry we need to link and render drifting objects.
//! Points are kept in a new type around [geo::Point](https://docs.rs/geo/latest/geo/struct.Point.html), the
//! metric functions are our own since we need the haversine variant with a fixed 6371km sphere and explicit
//! domain clamping (see [`great_circle_distance_km`])

use std::fmt;
use serde::{Serialize,Deserialize};
use serde::ser::{Serializer, SerializeStruct};
use serde::de::Deserializer;

use geo::Point;

use uom::si::f64::Length;
use uom::si::length::kilometer;

use crate::{sin2, cos, asin, acos, sqrt, rad, deg};
use crate::angle::{normalize_180, normalize_90, wrapped_longitude_delta};
use crate::geo_constants::MEAN_EARTH_RADIUS_KM;

/* #region GeoPoint ***********************************************************************************************/

/// a wrapper for geo::Point that uses geodetic degrees stored as f64 (x = longitude, y = latitude)
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lon_lat_degrees (lon: f64, lat: f64) -> Self {
        GeoPoint( Point::new( normalize_180(lon), normalize_90(lat)))
    }

    #[inline] pub fn longitude_degrees(&self) -> f64 { self.0.x() }
    #[inline] pub fn latitude_degrees(&self) -> f64 { self.0.y() }

    pub fn great_circle_distance (&self, other: &GeoPoint) -> Length {
        Length::new::<kilometer>( great_circle_distance_km( self, other))
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.0.x(),self.0.y())
    }
}

impl Serialize for GeoPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let mut state = serializer.serialize_struct("GeoPoint", 2)?;
        state.serialize_field("lon", &self.longitude_degrees())?;
        state.serialize_field("lat", &self.latitude_degrees())?;
        state.end()
    }
}

// we accept "lon" | "longitude" | "x" and "lat" | "latitude" | "y" so that we can read both our own
// output and data serialized by `geo` types
#[derive(Deserialize)]
struct LonLat {
    #[serde(alias="longitude", alias="x")]
    lon: f64,
    #[serde(alias="latitude", alias="y")]
    lat: f64,
}

impl<'de> Deserialize<'de> for GeoPoint {
    fn deserialize<D>(deserializer: D) -> Result<GeoPoint, D::Error> where D: Deserializer<'de> {
        let LonLat{lon,lat} = LonLat::deserialize(deserializer)?;
        Ok( GeoPoint::from_lon_lat_degrees( lon, lat))
    }
}

/* #endregion GeoPoint */

/* #region metric functions ***************************************************************************************/

/// haversine distance in km on a sphere with [`MEAN_EARTH_RADIUS_KM`].
/// The square root argument is clamped to `[0,1]` before `asin` so that floating point overshoot for
/// (near) antipodal points cannot produce NaN
pub fn great_circle_distance_km (p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    haversine_km( p1.latitude_degrees(), p1.longitude_degrees(), p2.latitude_degrees(), p2.longitude_degrees())
}

/// haversine distance for raw degree values (lat/lon order)
pub fn haversine_km (lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let φ1 = rad(lat1);
    let φ2 = rad(lat2);
    let Δφ = rad(lat2 - lat1);
    let Δλ = rad(lon2 - lon1);

    let a = sin2(Δφ/2.0) + cos(φ1) * cos(φ2) * sin2(Δλ/2.0);
    let c = 2.0 * asin( sqrt( a.clamp(0.0, 1.0)));

    MEAN_EARTH_RADIUS_KM * c
}

/* #endregion metric functions */

/* #region GeoVector **********************************************************************************************/

/// a planar direction vector in degree space (longitude delta, latitude delta).
/// This is only meaningful for short displacements - we use it to compare headings of consecutive
/// track legs, not to navigate
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoVector {
    pub dlon: f64,
    pub dlat: f64,
}

impl GeoVector {
    pub fn new (dlon: f64, dlat: f64) -> Self { GeoVector { dlon, dlat } }

    /// the vector from `from` to `to`, taking the short way around the antimeridian
    pub fn between (from: &GeoPoint, to: &GeoPoint) -> Self {
        GeoVector::between_degrees( from.latitude_degrees(), from.longitude_degrees(), to.latitude_degrees(), to.longitude_degrees())
    }

    pub fn between_degrees (lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Self {
        GeoVector {
            dlon: wrapped_longitude_delta( lon1, lon2),
            dlat: lat2 - lat1
        }
    }

    #[inline] pub fn dot (&self, other: &GeoVector) -> f64 { self.dlon * other.dlon + self.dlat * other.dlat }
    #[inline] pub fn norm_squared (&self) -> f64 { self.dot(self) }

    /// zero length (or non-finite) vectors have no direction
    pub fn is_degenerate (&self) -> bool {
        let n2 = self.norm_squared();
        !(n2 > 0.0 && n2.is_finite())
    }

    pub fn negated (&self) -> Self { GeoVector { dlon: -self.dlon, dlat: -self.dlat } }

    pub fn angle_to (&self, other: &GeoVector) -> Option<f64> { angle_between_deg( self, other) }
}

/// unsigned angle between two vectors in degrees `[0,180]`, or `None` if either of them is degenerate.
/// The cosine is clamped to `[-1,1]` before `acos` to absorb floating point drift
pub fn angle_between_deg (v1: &GeoVector, v2: &GeoVector) -> Option<f64> {
    if v1.is_degenerate() || v2.is_degenerate() {
        None
    } else {
        // sqrt(|v1|²|v2|²) instead of |v1|*|v2| so that parallel vectors come out exact
        let cos_θ = v1.dot(v2) / sqrt( v1.norm_squared() * v2.norm_squared());
        Some( deg( acos( cos_θ.clamp(-1.0, 1.0))))
    }
}

/* #endregion GeoVector */
