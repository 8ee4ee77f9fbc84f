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

//! identity-less track reconstruction from hourly position snapshots, and wind drift path prediction.
//!
//!   snapshots -> [`link_tracks`] -> tracks -> [`project_track`] -> drawable segments
//!   (start point, forecast) -> [`simulate_path`] -> path -> [`project_path`] -> drawable path
//!
//! All of these are synchronous, pure transformations of fully materialized input. Retrieving snapshots
//! and forecasts is up to the caller

pub mod errors;
pub use errors::{AerodriftError, Result};

pub mod config;
pub use config::{load_config, AerodriftConfig, LinkConfig, SimConfig, DisplayConfig, ValidConfig};

pub mod snapshot;
pub use snapshot::{Position, Snapshot};

pub mod track;
pub use track::{Track, Segment};

pub mod matcher;
pub mod linker;
pub use linker::{link_tracks, TrackLinker};

pub mod forecast;
pub use forecast::{ForecastSample, Wind};

pub mod simulator;
pub use simulator::{simulate_path, LatLon, PathSimulator, PredictedPath};

pub mod projector;
pub use projector::{project_track, project_path, hour_color};
