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
    load_config, link_tracks, project_track, hour_color, AerodriftConfig, Segment,
    snapshot::{snapshots_from_json, chronological, sample_by_hour}
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "link hourly position snapshots into tracks and print them as JSON")]
pub struct Args {
    /// optional RON config file (defaults are used if not set)
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// thin out hours to `display.max_points_per_hour` before linking
    #[arg(short,long)]
    pub sample: bool,

    /// print projected, colored segments instead of tracks
    #[arg(long)]
    pub segments: bool,

    /// JSON file with `[{hour_ago,positions}..]` snapshots
    pub snapshots: PathBuf,
}

#[derive(Serialize)]
struct ColoredSegment {
    track: usize,
    coords: [[f64;2];2],
    color: String,
}

fn main()->Result<()> {
    let _ = tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).try_init();
    let args = Args::parse();

    let config: AerodriftConfig = match &args.config {
        Some(path) => load_config( path)?,
        None => AerodriftConfig::default()
    };

    let mut snapshots = chronological( snapshots_from_json( &fs::read( &args.snapshots)?)?);
    if args.sample {
        snapshots = sample_by_hour( &snapshots, config.display.max_points_per_hour);
    }

    let tracks = link_tracks( &snapshots, &config.link);
    info!("{} snapshots linked into {} tracks", snapshots.len(), tracks.len());

    if args.segments {
        let segments: Vec<ColoredSegment> = tracks.iter().flat_map( |t| {
            project_track(t).into_iter().map( |s| ColoredSegment {
                track: t.id,
                coords: s.coords(),
                color: hour_color( s.end.hour_ago, config.display.hours_total).to_string()
            })
        }).collect();
        println!("{}", serde_json::to_string_pretty( &segments)?);
    } else {
        println!("{}", serde_json::to_string_pretty( &tracks)?);
    }

    Ok(())
}
