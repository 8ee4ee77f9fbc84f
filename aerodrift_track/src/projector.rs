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

//! turn tracks and predicted paths into polylines that map renderers can draw without wrapping around the
//! globe at the antimeridian. Output longitudes can be outside of [-180,180]

use std::fmt;
use serde::{Serialize,Deserialize};

use crate::simulator::LatLon;
use crate::track::{Segment, Track};

/// project each pair of consecutive track positions on its own. Segments are not chained, i.e. the start of
/// a segment is always the raw position
pub fn project_track (track: &Track)->Vec<Segment> {
    track.segments().map( |s| project_segment(&s)).collect()
}

/// shift the segment end by multiples of 360° so that the segment goes the short way around
pub fn project_segment (segment: &Segment)->Segment {
    let mut end = segment.end;
    end.longitude = shifted_longitude( segment.start.longitude, end.longitude);
    Segment { start: segment.start, end }
}

/// cumulative projection of a path into `[lat,lon]` pairs. Each longitude is adjusted relative to the
/// previous *adjusted* one so that paths crossing the antimeridian several times stay continuous
pub fn project_path (path: &[LatLon])->Vec<[f64;2]> {
    let mut projected = Vec::with_capacity( path.len());
    let mut prev_lon: Option<f64> = None;

    for p in path {
        let lon = match prev_lon {
            Some(prev) => shifted_longitude( prev, p.lon),
            None => p.lon
        };
        projected.push( [p.lat, lon]);
        prev_lon = Some(lon);
    }
    projected
}

fn shifted_longitude (ref_lon: f64, lon: f64)->f64 {
    if !(ref_lon.is_finite() && lon.is_finite()) { return lon }

    let mut lon = lon;
    while lon - ref_lon > 180.0 { lon -= 360.0 }
    while lon - ref_lon < -180.0 { lon += 360.0 }
    lon
}

/* #region display colors ********************************************************************************/

#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// segment color by age: recent hours are red and more opaque, old ones blue and faded
pub fn hour_color (hour_ago: i32, hours_total: u32)->Rgba {
    let ratio = if hours_total == 0 { 0.0 } else { (hour_ago as f64 / hours_total as f64).clamp(0.0, 1.0) };

    Rgba {
        r: (255.0 * (1.0 - ratio)).floor() as u8,
        g: 40,
        b: (255.0 * ratio).floor() as u8,
        a: 0.3 + 0.5 * (1.0 - ratio)
    }
}

/* #endregion display colors */
