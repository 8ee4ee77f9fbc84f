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

use std::{fs, path::PathBuf};
use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use aerodrift_track::{
    load_config, simulate_path, project_path, AerodriftConfig, LatLon,
    forecast::forecast_from_json
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "predict a wind drift path from a start point and a forecast JSON file")]
pub struct Args {
    /// optional RON config file (defaults are used if not set)
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// pressure level of raw point forecasts
    #[arg(long, default_value = "surface")]
    pub level: String,

    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// forecast samples, normalized forecast document or raw point forecast
    pub forecast: PathBuf,
}

#[derive(Serialize)]
struct Output {
    path: Vec<[f64;2]>,
    singular_steps: usize,
}

fn main()->Result<()> {
    let _ = tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).try_init();
    let args = Args::parse();

    let config: AerodriftConfig = match &args.config {
        Some(path) => load_config( path)?,
        None => AerodriftConfig::default()
    };

    let forecast = forecast_from_json( &fs::read( &args.forecast)?, &args.level)?;
    info!("simulating {} forecast steps", forecast.len());

    let path = simulate_path( LatLon::new( args.lat, args.lon), &forecast, &config.sim);
    let output = Output { path: project_path( &path.points), singular_steps: path.singular_steps };
    println!("{}", serde_json::to_string_pretty( &output)?);

    Ok(())
}
