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

//! reconstruct tracks from hourly position snapshots that carry no object identity.
//!
//! Snapshots are processed in the order given. For a snapshot of hour `h` the tracks that can be extended are
//! the ones whose last position is from hour `h+1` (the hour before, in chronological order). Every
//! (extendable track, position) pair is checked against the [`LinkConfig`] thresholds:
//!
//!   - the great circle distance between track tail and position has to be below `dist_threshold_km`
//!   - if the track has at least two positions the previous leg has to be at least `min_prev_dist_km` long,
//!     the length ratio of new and previous leg has to be within `[1/max_speed_ratio, max_speed_ratio]`
//!     and the heading change between the legs cannot exceed `max_turn_angle_deg`
//!
//! The surviving candidates are handed to a [`LinkMatcher`] (closest-first [`GreedyMatcher`] by default).
//! Positions that are not linked start new tracks. The per-hour bookkeeping is local to each step, the
//! linker itself holds nothing but its configuration.

use tracing::{debug,trace};
use aerodrift_common::geo::{great_circle_distance_km, angle_between_deg, GeoVector};

use crate::config::LinkConfig;
use crate::matcher::{GreedyMatcher, LinkCandidate, LinkMatcher};
use crate::snapshot::{Position, Snapshot};
use crate::track::Track;

pub struct TrackLinker<M: LinkMatcher = GreedyMatcher> {
    config: LinkConfig,
    matcher: M,
}

impl TrackLinker<GreedyMatcher> {
    pub fn new (config: LinkConfig)->Self {
        TrackLinker { config, matcher: GreedyMatcher }
    }
}

impl<M: LinkMatcher> TrackLinker<M> {
    pub fn with_matcher (config: LinkConfig, matcher: M)->Self {
        TrackLinker { config, matcher }
    }

    pub fn config (&self)->&LinkConfig { &self.config }

    /// link all snapshots into tracks. Tracks that stopped growing are part of the result, in creation order
    pub fn link_tracks (&self, snapshots: &[Snapshot])->Vec<Track> {
        let mut tracks: Vec<Track> = Vec::new();

        for snapshot in snapshots {
            let h = snapshot.hour_ago;
            let positions = &snapshot.positions;

            let extendable: Vec<usize> = tracks.iter().enumerate()
                .filter( |(_,t)| t.next_hour() == h)
                .map( |(i,_)| i)
                .collect();

            let mut claimed_positions = vec![false; positions.len()];
            let mut n_links = 0;

            if !extendable.is_empty() {
                let candidates = self.get_candidates( &tracks, &extendable, positions);
                let n_candidates = candidates.len();
                let mut claimed_tracks = vec![false; extendable.len()];

                for link in self.matcher.assign( candidates) {
                    // we don't trust the matcher to be exclusive
                    let Ok(ext_idx) = extendable.binary_search( &link.track_idx) else { continue };
                    if link.pos_idx >= positions.len() { continue }
                    if claimed_tracks[ext_idx] || claimed_positions[link.pos_idx] { continue }

                    claimed_tracks[ext_idx] = true;
                    claimed_positions[link.pos_idx] = true;
                    tracks[link.track_idx].push( positions[link.pos_idx].with_hour_ago(h));
                    n_links += 1;
                }
                debug!("hour -{}: {} positions, {} extendable tracks, {} candidates, {} links",
                       h, positions.len(), extendable.len(), n_candidates, n_links);
            } else {
                debug!("hour -{}: {} positions, no extendable tracks", h, positions.len());
            }

            for (pos, claimed) in positions.iter().zip( claimed_positions.iter()) {
                if !claimed {
                    let id = tracks.len();
                    tracks.push( Track::start( id, pos.with_hour_ago(h)));
                }
            }
        }

        debug!("linked {} snapshots into {} tracks", snapshots.len(), tracks.len());
        tracks
    }

    fn get_candidates (&self, tracks: &[Track], extendable: &[usize], positions: &[Position])->Vec<LinkCandidate> {
        let mut candidates = Vec::new();

        for &track_idx in extendable {
            let track = &tracks[track_idx];
            for (pos_idx, pos) in positions.iter().enumerate() {
                if let Some(dist_km) = self.link_distance( track, pos) {
                    candidates.push( LinkCandidate { track_idx, pos_idx, dist_km });
                }
            }
        }
        candidates
    }

    /// the distance between track tail and `pos` if `pos` is a valid continuation of `track`
    pub fn link_distance (&self, track: &Track, pos: &Position)->Option<f64> {
        let cfg = &self.config;
        let last = track.last();

        let dist = great_circle_distance_km( &last.geo_point(), &pos.geo_point());
        if !(dist < cfg.dist_threshold_km) { // also rejects NaN
            trace!("reject {} -> {}: distance {:.1}km", last, pos, dist);
            return None
        }

        if let Some(prev) = track.prev() {
            let dist_prev = great_circle_distance_km( &prev.geo_point(), &last.geo_point());
            if !(dist_prev >= cfg.min_prev_dist_km) {
                trace!("reject {} -> {}: stationary previous leg {:.3}km", last, pos, dist_prev);
                return None
            }

            let speed_ratio = dist / dist_prev;
            if speed_ratio > cfg.max_speed_ratio || speed_ratio < 1.0 / cfg.max_speed_ratio {
                trace!("reject {} -> {}: speed ratio {:.2}", last, pos, speed_ratio);
                return None
            }

            let v_prev = GeoVector::between_degrees( prev.latitude, prev.longitude, last.latitude, last.longitude);
            let v_next = GeoVector::between_degrees( last.latitude, last.longitude, pos.latitude, pos.longitude);
            match angle_between_deg( &v_prev, &v_next) {
                Some(angle) if angle <= cfg.max_turn_angle_deg => {}
                Some(angle) => {
                    trace!("reject {} -> {}: turn angle {:.1}", last, pos, angle);
                    return None
                }
                None => {
                    trace!("reject {} -> {}: degenerate direction", last, pos);
                    return None
                }
            }
        }

        Some(dist)
    }
}

/// link with the default closest-first matcher
pub fn link_tracks (snapshots: &[Snapshot], config: &LinkConfig)->Vec<Track> {
    TrackLinker::new( config.clone()).link_tracks( snapshots)
}
