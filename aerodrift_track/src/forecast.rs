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

use serde::{Serialize,Serializer,Deserialize,Deserializer,de::Error as DeError};
use serde_json::{Map, Value};
use chrono::{DateTime,Utc};
use uom::si::f64::Velocity;
use uom::si::velocity::meter_per_second;
use tracing::debug;
use aerodrift_common::{atan2, deg, angle::Angle360};

use crate::errors::{Result, parse_error};

/// wind either as (u,v) components (towards east, towards north, in m/s) or as speed (m/s) and
/// meteorological direction (degrees, where the wind is coming from)
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
#[serde(untagged)]
pub enum Wind {
    Components {
        #[serde(alias="uComponent")]
        u: f64,
        #[serde(alias="vComponent")]
        v: f64
    },
    Polar {
        speed: f64,
        direction: f64
    }
}

impl Wind {
    pub fn speed (&self)->Velocity {
        let mps = match *self {
            Wind::Components{u,v} => u.hypot(v),
            Wind::Polar{speed,..} => speed
        };
        Velocity::new::<meter_per_second>(mps)
    }

    pub fn direction (&self)->Angle360 {
        match *self {
            Wind::Components{u,v} => Angle360::from_degrees( (deg( atan2(u,v)) + 180.0) % 360.0),
            Wind::Polar{direction,..} => Angle360::from_degrees( direction)
        }
    }

    pub fn is_valid (&self)->bool {
        match *self {
            Wind::Components{u,v} => u.is_finite() && v.is_finite(),
            Wind::Polar{speed,direction} => speed.is_finite() && direction.is_finite()
        }
    }
}

/// one forecast step for a single location
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct ForecastSample {
    #[serde(rename="timestampMs", alias="timestamp", serialize_with="ser_epoch_millis", deserialize_with="de_epoch_millis_or_rfc3339")]
    pub timestamp: DateTime<Utc>,
    pub wind: Wind,
    #[serde(default)]
    pub pressure: f64, // Pa
    #[serde(default)]
    pub humidity: f64, // %
}

fn ser_epoch_millis<S: Serializer> (dt: &DateTime<Utc>, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_i64( dt.timestamp_millis())
}

/// forecast services either give us epoch milliseconds or (normalized documents) RFC 3339 strings
fn de_epoch_millis_or_rfc3339<'a,D> (deserializer: D) -> std::result::Result<DateTime<Utc>,D::Error> where D: Deserializer<'a> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp { Millis(i64), FractionalMillis(f64), Text(String) }

    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(ms) => DateTime::from_timestamp_millis(ms).ok_or( DeError::custom( format!("invalid timestamp value {ms}"))),
        RawTimestamp::FractionalMillis(ms) => DateTime::from_timestamp_millis(ms as i64).ok_or( DeError::custom( format!("invalid timestamp value {ms}"))),
        RawTimestamp::Text(s) => DateTime::parse_from_rfc3339( &s)
            .map( |dt| dt.with_timezone(&Utc))
            .map_err( |e| DeError::custom( format!("invalid timestamp '{s}': {e}")))
    }
}

/// the normalized forecast document we get from forecast services: `{ "meta": {..}, "data": [samples..] }`.
/// Per-sample location fields (`lat`, `lon`) are ignored
#[derive(Deserialize,Debug)]
struct ForecastDocument {
    data: Vec<ForecastSample>
}

/// convert a raw point-forecast response with parallel arrays (`ts`, `wind_u-<level>`, `wind_v-<level>`,
/// `pressure-<level>`, `rh-<level>`) into time ordered samples
pub fn samples_from_point_forecast (raw: &Value, level: &str)->Result<Vec<ForecastSample>> {
    let obj = raw.as_object().ok_or_else( || parse_error!("point forecast is not an object"))?;

    let ts: Vec<i64> = get_array( obj, "ts")?.iter()
        .map( |v| v.as_i64().or_else( || v.as_f64().map( |f| f as i64)).ok_or_else( || parse_error!("invalid timestamp {}", v)))
        .collect::<Result<Vec<i64>>>()?;

    let u = get_f64_array( obj, &format!("wind_u-{level}"), ts.len())?;
    let v = get_f64_array( obj, &format!("wind_v-{level}"), ts.len())?;
    let pressure = get_f64_array( obj, &format!("pressure-{level}"), ts.len())?;
    let rh = get_f64_array( obj, &format!("rh-{level}"), ts.len())?;

    let mut samples = Vec::with_capacity( ts.len());
    for i in 0..ts.len() {
        let timestamp = DateTime::<Utc>::from_timestamp_millis( ts[i]).ok_or_else( || parse_error!("timestamp out of range {}", ts[i]))?;
        samples.push( ForecastSample {
            timestamp,
            wind: Wind::Components { u: u[i], v: v[i] },
            pressure: pressure[i],
            humidity: rh[i]
        });
    }
    samples.sort_by_key( |s| s.timestamp);

    debug!("normalized {} point forecast samples for level {}", samples.len(), level);
    Ok(samples)
}

fn get_array<'a> (obj: &'a Map<String,Value>, key: &str)->Result<&'a Vec<Value>> {
    obj.get(key).and_then( |v| v.as_array()).ok_or_else( || parse_error!("missing array '{}'", key))
}

fn get_f64_array (obj: &Map<String,Value>, key: &str, len: usize)->Result<Vec<f64>> {
    let a = get_array( obj, key)?;
    if a.len() != len {
        return Err( parse_error!("array '{}' has {} values, expected {}", key, a.len(), len))
    }
    a.iter().map( |v| v.as_f64().ok_or_else( || parse_error!("invalid value in '{}': {}", key, v))).collect()
}

/// parse a forecast from JSON, which can be either a plain array of samples, a normalized forecast document
/// with a `data` array or a raw point-forecast response (detected by its `ts` array)
pub fn forecast_from_json (data: &[u8], level: &str)->Result<Vec<ForecastSample>> {
    let value: Value = serde_json::from_slice(data)?;

    if value.get("ts").is_some() {
        return samples_from_point_forecast( &value, level)
    }

    let mut samples = if value.is_array() {
        serde_json::from_value::<Vec<ForecastSample>>( value)?
    } else {
        serde_json::from_value::<ForecastDocument>( value)?.data
    };

    samples.sort_by_key( |s| s.timestamp);
    Ok(samples)
}
