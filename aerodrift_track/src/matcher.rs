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

use std::collections::HashSet;

/// a link that passed all validity checks. `track_idx` is the index of the track in the linker's
/// track list, `pos_idx` the index of the position within the current snapshot
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct LinkCandidate {
    pub track_idx: usize,
    pub pos_idx: usize,
    pub dist_km: f64,
}

/// strategy to pick the links of one hour from its candidate set.
/// Implementations have to return each `track_idx` and each `pos_idx` at most once
pub trait LinkMatcher {
    fn assign (&self, candidates: Vec<LinkCandidate>)->Vec<LinkCandidate>;
}

/// closest-first greedy assignment. Not globally distance optimal but deterministic: candidates are stably
/// sorted by distance so equal distances keep their generation order (track first, then position)
#[derive(Debug,Clone,Copy,Default)]
pub struct GreedyMatcher;

impl LinkMatcher for GreedyMatcher {
    fn assign (&self, mut candidates: Vec<LinkCandidate>)->Vec<LinkCandidate> {
        candidates.sort_by( |a,b| a.dist_km.total_cmp( &b.dist_km));

        let mut claimed_tracks: HashSet<usize> = HashSet::with_capacity( candidates.len());
        let mut claimed_positions: HashSet<usize> = HashSet::with_capacity( candidates.len());
        let mut links = Vec::new();

        for c in candidates {
            if !claimed_tracks.contains( &c.track_idx) && !claimed_positions.contains( &c.pos_idx) {
                claimed_tracks.insert( c.track_idx);
                claimed_positions.insert( c.pos_idx);
                links.push(c);
            }
        }
        links
    }
}

