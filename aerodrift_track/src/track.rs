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

use std::fmt;
use serde::{Serialize,Deserialize};

use crate::snapshot::Position;

/// a reconstructed trajectory, oldest position first. Consecutive positions are exactly one hour apart
/// (`next.hour_ago == prev.hour_ago - 1`). Tracks only grow at the end and are never merged.
/// `id` is the creation index within one linker run
#[derive(Serialize,Debug,Clone,PartialEq)]
pub struct Track {
    pub id: usize,
    positions: Vec<Position>,
}

impl Track {
    pub(crate) fn start (id: usize, pos: Position)->Self {
        Track { id, positions: vec![pos] }
    }

    pub(crate) fn push (&mut self, pos: Position) {
        debug_assert!( pos.hour_ago == self.last().hour_ago - 1);
        self.positions.push(pos);
    }

    pub fn positions (&self)->&[Position] { self.positions.as_slice() }

    /// tracks are never empty
    pub fn last (&self)->&Position { &self.positions[self.positions.len()-1] }

    pub fn first (&self)->&Position { &self.positions[0] }

    /// the position before the last one, if the track has at least two
    pub fn prev (&self)->Option<&Position> {
        let len = self.positions.len();
        if len > 1 { Some(&self.positions[len-2]) } else { None }
    }

    pub fn len (&self)->usize { self.positions.len() }

    /// the hour the next linked position would have to come from
    pub fn next_hour (&self)->i32 { self.last().hour_ago - 1 }

    /// the raw (unprojected) segments between consecutive positions
    pub fn segments (&self)->impl Iterator<Item=Segment> + '_ {
        self.positions.windows(2).map( |w| Segment { start: w[0], end: w[1] })
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Track({}: {} positions, -{}h..-{}h)", self.id, self.len(), self.first().hour_ago, self.last().hour_ago)
    }
}

/// the renderable edge between two consecutive track positions
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct Segment {
    pub start: Position,
    pub end: Position,
}

impl Segment {
    /// `[[lat,lon],[lat,lon]]` as map libraries want it
    pub fn coords (&self)->[[f64;2];2] {
        [[self.start.latitude, self.start.longitude], [self.end.latitude, self.end.longitude]]
    }

    pub fn longitude_delta (&self)->f64 { self.end.longitude - self.start.longitude }
}
