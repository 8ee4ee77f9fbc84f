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
#![allow(unused)]

use std::{fmt, marker::PhantomData, cmp};
use serde::ser::{Serialize as SerializeTrait, Serializer};
use serde::de::{self, Deserialize as DeserializeTrait, Deserializer, Visitor};

#[inline]
pub fn normalize_90 (d:f64) -> f64 {
    let x = d % 360.0;

    if x < -90.0 { -180.0 - x }
    else if x > 90.0 { 180.0 - x }
    else { x }
}

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d % 360.0;
    if x < 0.0 { 360.0 + x } else { x }
}

/// the shortest longitude difference `lon2 - lon1` in degrees, normalized into `(-180,180]`.
/// This is the delta that takes the short way around across the antimeridian, i.e.
/// `wrapped_longitude_delta(179.0, -179.0) == 2.0`.
/// Non-finite input is returned as is (there is nothing to wrap)
pub fn wrapped_longitude_delta (lon1: f64, lon2: f64) -> f64 {
    let mut d = lon2 - lon1;
    if !d.is_finite() { return d }

    while d > 180.0 { d -= 360.0 }
    while d <= -180.0 { d += 360.0 }
    d
}

/// signed shortest angular difference `to - from` in degrees, in `[-180,180)`
#[inline]
pub fn shortest_angle_delta (from: f64, to: f64) -> f64 {
    ((to - from + 540.0) % 360.0) - 180.0
}

/// exponential moving average step for compass directions: move `prev` by `alpha` of the shortest
/// angular difference towards `new`. Result is in `[0,360)` for `prev` in `[0,360)`
#[inline]
pub fn smooth_direction (prev: f64, new: f64, alpha: f64) -> f64 {
    let delta = shortest_angle_delta( prev, new);
    (prev + alpha * delta + 360.0) % 360.0
}

pub trait AngleKind {
    fn normalize(v: f64)->f64;
    fn fmt_display(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}deg", value) }
    fn fmt_debug(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

#[derive(Debug,Clone,Copy)]
pub struct LatitudeKind {}
impl AngleKind for LatitudeKind {
    fn normalize(v: f64) -> f64 { normalize_90(v) }
    fn fmt_debug(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Latitude({})", value) }
}

#[derive(Debug,Clone,Copy)]
pub struct LongitudeKind {}
impl AngleKind for LongitudeKind {
    fn normalize(v: f64) -> f64 { normalize_180(v) }
    fn fmt_debug(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Longitude({})", value) }
}

/// compass directions (e.g. where the wind is blowing from)
#[derive(Debug,Clone,Copy)]
pub struct FullCircleKind {}
impl AngleKind for FullCircleKind {
    fn normalize(v: f64) -> f64 { normalize_360(v) }
    fn fmt_debug(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Angle360({})", value) }
}

#[derive(Copy, Clone)]
pub struct NormalizedAngle<K> where K: AngleKind {
    value: f64,
    kind: PhantomData<K>,
}

impl<K> NormalizedAngle<K> where K: AngleKind {
    #[inline]
    pub fn from_degrees(deg: f64) -> Self {
        NormalizedAngle { value: K::normalize(deg), kind: PhantomData }
    }

    #[inline] pub fn degrees(&self)->f64 { self.value }
}

impl <K> From<NormalizedAngle<K>> for f64 where K: AngleKind {
    fn from(a: NormalizedAngle<K>) -> Self { a.value }
}

impl<K> fmt::Display for NormalizedAngle<K> where K: AngleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { K::fmt_display( self.value, f) }
}

impl<K> fmt::Debug for NormalizedAngle<K> where K: AngleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { K::fmt_debug( self.value, f) }
}

impl<K> cmp::PartialOrd for NormalizedAngle<K> where K: AngleKind {
    fn partial_cmp(&self,other:&Self) -> Option<cmp::Ordering> { self.value.partial_cmp( &other.value) }
}

impl<K> cmp::PartialEq for NormalizedAngle<K> where K: AngleKind {
    fn eq(&self, other: &Self) -> bool { self.value == other.value }
}

pub type Longitude = NormalizedAngle<LongitudeKind>;
pub type Latitude = NormalizedAngle<LatitudeKind>;
pub type Angle360 = NormalizedAngle<FullCircleKind>;

//--- serde support

macro_rules! define_angle_deserializer {
    ($angle_type: ident, $min:literal, $max:literal) => {
        impl<'de> DeserializeTrait<'de> for $angle_type {
            fn deserialize<D>(deserializer: D) -> Result<$angle_type, D::Error> where D: Deserializer<'de> {
                struct AngleVisitor;

                impl<'de> Visitor<'de> for AngleVisitor {
                    type Value = $angle_type;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        let msg = format!("expecting floating point degrees between [{}..{}]", $min,  $max);
                        formatter.write_str(&msg)
                    }

                    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> where E: de::Error {
                        if value >= $min && value <= $max {
                            Ok($angle_type::from_degrees(value))
                        } else {
                            Err(E::custom(format!("degrees out of range: {}", value)))
                        }
                    }

                    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> where E: de::Error {
                        self.visit_f64( value as f64)
                    }

                    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> where E: de::Error {
                        self.visit_f64( value as f64)
                    }
                }

                deserializer.deserialize_f64( AngleVisitor)
            }
        }
    };
}

define_angle_deserializer!{ Latitude, -90.0, 90.0 }
define_angle_deserializer!{ Longitude, -180.0, 180.0 }
define_angle_deserializer!{ Angle360, 0.0, 360.0 }

impl<K> SerializeTrait for NormalizedAngle<K> where K: AngleKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_f64(self.value)
    }
}
