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

use std::fmt;
use serde::{Serialize,Deserialize};
use serde_json::Value;
use tracing::{debug,warn};
use aerodrift_common::geo::GeoPoint;

use crate::errors::Result;

/// a single observed object position. There is no object identity - `hour_ago` is assigned by the snapshot
/// the position was reported in (0 = most recent hour)
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct Position {
    #[serde(alias="lat")]
    pub latitude: f64,
    #[serde(alias="lon")]
    pub longitude: f64,
    #[serde(alias="altitudeKm", alias="alt")]
    pub altitude_km: f64,
    #[serde(default, alias="hourAgo")]
    pub hour_ago: i32,
}

impl Position {
    pub fn new (latitude: f64, longitude: f64, altitude_km: f64, hour_ago: i32)->Self {
        Position { latitude, longitude, altitude_km, hour_ago }
    }

    pub fn with_hour_ago (&self, hour_ago: i32)->Self {
        Position { hour_ago, ..*self }
    }

    pub fn geo_point (&self)->GeoPoint {
        GeoPoint::from_lon_lat_degrees( self.longitude, self.latitude)
    }

    pub fn is_valid (&self)->bool {
        self.latitude.is_finite() && self.longitude.is_finite() && self.altitude_km.is_finite()
            && self.latitude.abs() <= 90.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4},{:.4},{:.2}km @-{}h]", self.latitude, self.longitude, self.altitude_km, self.hour_ago)
    }
}

/// all positions reported for one hour.
/// On deserialization a missing or `null` position list is an empty hour, malformed position records are
/// skipped, and every position gets tagged with the snapshot hour
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(from="RawSnapshot")]
pub struct Snapshot {
    pub hour_ago: i32,
    pub positions: Vec<Position>,
}

#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(alias="hourAgo")]
    hour_ago: i32,
    #[serde(default)]
    positions: Option<Vec<Value>>,
}

impl From<RawSnapshot> for Snapshot {
    fn from (raw: RawSnapshot)->Self {
        let entries = raw.positions.unwrap_or_default();
        let n_entries = entries.len();
        let positions: Vec<Position> = entries.into_iter()
            .filter_map( |e| serde_json::from_value::<Position>(e).ok())
            .collect();

        if positions.len() < n_entries {
            warn!("skipped {} malformed position records for hour -{}", n_entries - positions.len(), raw.hour_ago);
        }
        Snapshot::new( raw.hour_ago, positions)
    }
}

impl Snapshot {
    /// this drops invalid positions and re-tags the remaining ones with `hour_ago`
    pub fn new (hour_ago: i32, positions: Vec<Position>)->Self {
        let n_raw = positions.len();
        let positions: Vec<Position> = positions.into_iter()
            .filter( |p| p.is_valid())
            .map( |p| p.with_hour_ago(hour_ago))
            .collect();

        if positions.len() < n_raw {
            warn!("dropped {} invalid positions for hour -{}", n_raw - positions.len(), hour_ago);
        }
        Snapshot { hour_ago, positions }
    }

    pub fn empty (hour_ago: i32)->Self {
        Snapshot { hour_ago, positions: Vec::new() }
    }

    /// parse a raw hourly position document, which is a JSON array of `[latitude, longitude, altitude_km]` triples.
    /// Corrupted entries are skipped, and a document that is not a JSON array at all is an empty hour
    pub fn from_raw_json (hour_ago: i32, data: &[u8])->Self {
        match serde_json::from_slice::<Value>(data) {
            Ok(Value::Array(entries)) => {
                let n_entries = entries.len();
                let positions: Vec<Position> = entries.iter().filter_map( |e| position_from_triple(e, hour_ago)).collect();
                if positions.len() < n_entries {
                    warn!("skipped {} corrupted entries for hour -{}", n_entries - positions.len(), hour_ago);
                }
                Snapshot { hour_ago, positions }
            }
            Ok(_) => {
                warn!("hour -{} document is not an array, ignored", hour_ago);
                Snapshot::empty(hour_ago)
            }
            Err(e) => {
                warn!("hour -{} document not parsable: {}", hour_ago, e);
                Snapshot::empty(hour_ago)
            }
        }
    }

    pub fn len (&self)->usize { self.positions.len() }
    pub fn is_empty (&self)->bool { self.positions.is_empty() }
}

fn position_from_triple (v: &Value, hour_ago: i32)->Option<Position> {
    match v.as_array() {
        Some(a) if a.len() == 3 => {
            let p = Position::new( a[0].as_f64()?, a[1].as_f64()?, a[2].as_f64()?, hour_ago);
            if p.is_valid() { Some(p) } else { None }
        }
        _ => None
    }
}

/// parse an aggregated snapshot document `[{hour_ago, positions: [{latitude,longitude,altitude_km}..]}..]`
pub fn snapshots_from_json (data: &[u8])->Result<Vec<Snapshot>> {
    let snapshots: Vec<Snapshot> = serde_json::from_slice(data)?;
    debug!("parsed {} snapshots with {} positions", snapshots.len(), snapshots.iter().map(|s| s.len()).sum::<usize>());
    Ok(snapshots)
}

/// re-order snapshots oldest first (stable for equal hours). Sources report the most recent hour first but
/// tracks are linked in chronological order
pub fn chronological (mut snapshots: Vec<Snapshot>)->Vec<Snapshot> {
    snapshots.sort_by( |a,b| b.hour_ago.cmp( &a.hour_ago));
    snapshots
}

/// thin out each hour to roughly `max_points` by keeping every n-th position, n = max(1, len / max_points)
pub fn sample_by_hour (snapshots: &[Snapshot], max_points: usize)->Vec<Snapshot> {
    snapshots.iter().map( |s| {
        let step = (s.len() / max_points.max(1)).max(1);
        Snapshot {
            hour_ago: s.hour_ago,
            positions: s.positions.iter().step_by(step).copied().collect()
        }
    }).collect()
}

/// all positions as individual (hour tagged) marker points. If `max_per_hour` is set hours with more
/// positions are thinned with a step of ceil(len / max_per_hour)
pub fn flatten_points (snapshots: &[Snapshot], max_per_hour: Option<usize>)->Vec<Position> {
    snapshots.iter().flat_map( |s| {
        let step = match max_per_hour {
            Some(max) if max > 0 && s.len() > max => s.len().div_ceil(max),
            _ => 1
        };
        s.positions.iter().step_by(step).map( move |p| p.with_hour_ago(s.hour_ago))
    }).collect()
}
