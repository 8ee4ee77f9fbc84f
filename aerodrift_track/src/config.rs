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

//! tunable constants of the linker, the simulator and the display helpers.
//! Configs are RON files (see `configs/aerodrift.ron`). All structs are `#[serde(default)]` so that a config
//! file only has to list the values that differ from the defaults

use std::{fs, path::Path, time::Duration};
use serde::{Serialize,Deserialize,de::DeserializeOwned};
use aerodrift_common::geo_constants::KM_PER_DEGREE_LAT;

use crate::errors::{Result, invalid_config};

pub trait ValidConfig {
    fn validate (&self)->Result<()>;
}

/// thresholds for accepting a link between a track tail and a new position
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct LinkConfig {
    /// candidates at or beyond this great circle distance are rejected
    pub dist_threshold_km: f64,

    /// max ratio between the new leg and the previous leg length (and its inverse as lower bound)
    pub max_speed_ratio: f64,

    /// max heading change between previous and new leg
    pub max_turn_angle_deg: f64,

    /// previous legs shorter than this are considered stationary noise and cannot be continued
    pub min_prev_dist_km: f64,
}

impl Default for LinkConfig {
    fn default()->Self {
        LinkConfig {
            dist_threshold_km: 500.0,
            max_speed_ratio: 3.0,
            max_turn_angle_deg: 90.0,
            min_prev_dist_km: 1.0,
        }
    }
}

impl ValidConfig for LinkConfig {
    fn validate (&self)->Result<()> {
        if !(self.dist_threshold_km > 0.0) {
            return Err( invalid_config( format!("dist_threshold_km has to be positive: {}", self.dist_threshold_km)))
        }
        if !(self.max_speed_ratio >= 1.0) {
            return Err( invalid_config( format!("max_speed_ratio has to be >= 1: {}", self.max_speed_ratio)))
        }
        if !(self.max_turn_angle_deg > 0.0 && self.max_turn_angle_deg <= 180.0) {
            return Err( invalid_config( format!("max_turn_angle_deg has to be in (0,180]: {}", self.max_turn_angle_deg)))
        }
        if !(self.min_prev_dist_km >= 0.0) {
            return Err( invalid_config( format!("min_prev_dist_km cannot be negative: {}", self.min_prev_dist_km)))
        }
        Ok(())
    }
}

/// parameters of the wind drift recurrence
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// weight of the new wind direction in the exponential moving average
    pub ema_alpha: f64,

    /// time covered by each forecast sample step
    pub timestep: Duration,

    pub km_per_degree_lat: f64,

    /// below this |cos(latitude)| we don't move in longitude (we are at a pole)
    pub min_cos_lat: f64,
}

impl Default for SimConfig {
    fn default()->Self {
        SimConfig {
            ema_alpha: 0.3,
            timestep: Duration::from_secs(600),
            km_per_degree_lat: KM_PER_DEGREE_LAT,
            min_cos_lat: 1e-6,
        }
    }
}

impl ValidConfig for SimConfig {
    fn validate (&self)->Result<()> {
        if !(self.ema_alpha > 0.0 && self.ema_alpha <= 1.0) {
            return Err( invalid_config( format!("ema_alpha has to be in (0,1]: {}", self.ema_alpha)))
        }
        if self.timestep.is_zero() {
            return Err( invalid_config("timestep cannot be zero"))
        }
        if !(self.km_per_degree_lat > 0.0) {
            return Err( invalid_config( format!("km_per_degree_lat has to be positive: {}", self.km_per_degree_lat)))
        }
        if !(self.min_cos_lat >= 0.0 && self.min_cos_lat < 1.0) {
            return Err( invalid_config( format!("min_cos_lat has to be in [0,1): {}", self.min_cos_lat)))
        }
        Ok(())
    }
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub max_points_per_hour: usize,
    pub hours_total: u32, // oldest hour of the color gradient
}

impl Default for DisplayConfig {
    fn default()->Self {
        DisplayConfig { max_points_per_hour: 50, hours_total: 23 }
    }
}

impl ValidConfig for DisplayConfig {
    fn validate (&self)->Result<()> {
        if self.max_points_per_hour == 0 { return Err( invalid_config("max_points_per_hour cannot be zero")) }
        if self.hours_total == 0 { return Err( invalid_config("hours_total cannot be zero")) }
        Ok(())
    }
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq,Default)]
#[serde(default)]
pub struct AerodriftConfig {
    pub link: LinkConfig,
    pub sim: SimConfig,
    pub display: DisplayConfig,
}

impl ValidConfig for AerodriftConfig {
    fn validate (&self)->Result<()> {
        self.link.validate()?;
        self.sim.validate()?;
        self.display.validate()
    }
}

/// load and validate a RON config file
pub fn load_config<C> (path: impl AsRef<Path>)->Result<C> where C: DeserializeOwned + ValidConfig {
    let data = fs::read( path.as_ref())?;
    let config: C = ron::de::from_bytes( data.as_slice())?;
    config.validate()?;
    Ok(config)
}

pub fn config_from_str<C> (s: &str)->Result<C> where C: DeserializeOwned + ValidConfig {
    let config: C = ron::de::from_str(s)?;
    config.validate()?;
    Ok(config)
}

pub fn config_to_string<C> (config: &C)->Result<String> where C: Serialize {
    Ok( ron::ser::to_string_pretty( config, ron::ser::PrettyConfig::default())? )
}
