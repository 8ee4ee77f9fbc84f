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

//! illustrative wind drift prediction. Each forecast sample moves the object for one fixed timestep along the
//! (EMA smoothed) wind direction. This is dead reckoning on a flat earth approximation, not a flight model

use std::fmt;
use serde::{Serialize,Deserialize};
use uom::si::f64::{Length,Time};
use uom::si::{length::kilometer, time::second};
use tracing::{debug,warn};
use aerodrift_common::{sin, cos, rad, angle::smooth_direction};

use crate::config::SimConfig;
use crate::forecast::ForecastSample;

#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new (lat: f64, lon: f64)->Self { LatLon { lat, lon } }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.5},{:.5}]", self.lat, self.lon)
    }
}

/// the simulated path. `points[0]` is the start point, each following point corresponds to one forecast sample.
/// Longitudes are not normalized (the path is continuous across the antimeridian).
/// `singular_steps` counts the steps that were too close to a pole to move in longitude
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct PredictedPath {
    pub points: Vec<LatLon>,
    pub singular_steps: usize,
}

impl PredictedPath {
    pub fn len (&self)->usize { self.points.len() }
    pub fn start (&self)->&LatLon { &self.points[0] }
    pub fn end (&self)->&LatLon { &self.points[self.points.len()-1] }
}

pub struct PathSimulator {
    config: SimConfig
}

impl PathSimulator {
    pub fn new (config: SimConfig)->Self { PathSimulator { config } }

    pub fn config (&self)->&SimConfig { &self.config }

    /// integrate the wind displacement of all forecast samples, starting at `start`.
    /// The result always has `forecast.len() + 1` points
    pub fn simulate_path (&self, start: LatLon, forecast: &[ForecastSample])->PredictedPath {
        let cfg = &self.config;
        let dt = Time::new::<second>( cfg.timestep.as_secs_f64());

        let mut points = Vec::with_capacity( forecast.len() + 1);
        let mut singular_steps = 0;
        let mut last = start;
        points.push( last);

        let mut prev_dir = forecast.first()
            .map( |s| s.wind.direction().degrees())
            .filter( |d| d.is_finite())
            .unwrap_or(0.0);

        for sample in forecast {
            if !sample.wind.is_valid() {
                warn!("invalid wind at {}, no displacement", sample.timestamp);
                points.push( last);
                continue;
            }

            let dir = smooth_direction( prev_dir, sample.wind.direction().degrees(), cfg.ema_alpha);
            prev_dir = dir;

            let distance: Length = sample.wind.speed() * dt;
            let distance_km = distance.get::<kilometer>();
            let dir_rad = rad(dir);

            let delta_lat = distance_km * cos(dir_rad) / cfg.km_per_degree_lat;

            // longitude degrees get longer towards the equator. At the poles there is no defined longitude step
            let cos_lat = cos( rad( last.lat));
            let delta_lon = if cos_lat.abs() < cfg.min_cos_lat {
                warn!("path point {} too close to pole, skipping longitude step", last);
                singular_steps += 1;
                0.0
            } else {
                distance_km * sin(dir_rad) / (cfg.km_per_degree_lat * cos_lat)
            };

            last = LatLon { lat: last.lat + delta_lat, lon: last.lon + delta_lon };
            points.push( last);
        }

        debug!("simulated {} steps from {} to {} ({} singular)", forecast.len(), start, last, singular_steps);
        PredictedPath { points, singular_steps }
    }
}

pub fn simulate_path (start: LatLon, forecast: &[ForecastSample], config: &SimConfig)->PredictedPath {
    PathSimulator::new( config.clone()).simulate_path( start, forecast)
}
