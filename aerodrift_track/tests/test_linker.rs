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

use aerodrift_track::{link_tracks, LinkConfig, Position, Snapshot, Track, TrackLinker};
use aerodrift_track::matcher::{LinkCandidate, LinkMatcher};
use aerodrift_track::snapshot::{chronological, snapshots_from_json};
use aerodrift_common::geo::{great_circle_distance_km, angle_between_deg, GeoVector};

// run with "cargo test -p aerodrift_track --test test_linker -- --nocapture"

fn snapshot (hour_ago: i32, lat_lons: &[(f64,f64)])->Snapshot {
    Snapshot::new( hour_ago, lat_lons.iter().map( |(lat,lon)| Position::new( *lat, *lon, 1.0, hour_ago)).collect())
}

fn print_tracks (tracks: &[Track]) {
    for t in tracks {
        print!("  {t}:");
        for p in t.positions() { print!(" {p}"); }
        println!();
    }
}

fn assert_contiguous (tracks: &[Track]) {
    for t in tracks {
        for w in t.positions().windows(2) {
            assert_eq!( w[1].hour_ago, w[0].hour_ago - 1, "non contiguous track {t}");
        }
    }
}

#[test]
fn test_straight_line() {
    let snapshots = vec![
        snapshot( 2, &[(10.0, 20.0)]),
        snapshot( 1, &[(10.0, 20.5)]),
        snapshot( 0, &[(10.0, 21.0)]),
    ];
    let tracks = link_tracks( &snapshots, &LinkConfig::default());
    print_tracks( &tracks);

    assert_eq!( tracks.len(), 1);
    assert_eq!( tracks[0].len(), 3);
    assert_eq!( tracks[0].first().hour_ago, 2);
    assert_eq!( tracks[0].last().hour_ago, 0);
    assert_eq!( tracks[0].last().longitude, 21.0);
}

#[test]
fn test_end_to_end_json() {
    let input = r#"[
        {"hourAgo": 1, "positions": [{"lat": 10.0, "lon": 20.0, "alt": 1.0}]},
        {"hourAgo": 0, "positions": [{"lat": 10.01, "lon": 20.01, "alt": 1.0}]}
    ]"#;
    let snapshots = snapshots_from_json( input.as_bytes()).unwrap();
    let config = LinkConfig { dist_threshold_km: 50.0, ..LinkConfig::default() };

    let tracks = link_tracks( &snapshots, &config);
    print_tracks( &tracks);

    assert_eq!( tracks.len(), 1);
    assert_eq!( tracks[0].len(), 2);
    assert_eq!( tracks[0].positions()[0].hour_ago, 1);
    assert_eq!( tracks[0].positions()[1].hour_ago, 0);
}

#[test]
fn test_newest_first_input() {
    // sources list the most recent hour first
    let snapshots = vec![
        snapshot( 0, &[(10.01, 20.01)]),
        snapshot( 1, &[(10.0, 20.0)]),
    ];

    let unordered = link_tracks( &snapshots, &LinkConfig::default());
    println!("as given: {} tracks", unordered.len());
    assert_eq!( unordered.len(), 2);

    let tracks = link_tracks( &chronological( snapshots), &LinkConfig::default());
    println!("chronological: {} tracks", tracks.len());
    assert_eq!( tracks.len(), 1);
    assert_eq!( tracks[0].len(), 2);
}

#[test]
fn test_closest_position_wins() {
    let snapshots = vec![
        snapshot( 1, &[(10.0, 20.0)]),
        snapshot( 0, &[(10.0, 20.5), (10.0, 20.1)]),
    ];
    let tracks = link_tracks( &snapshots, &LinkConfig::default());
    print_tracks( &tracks);

    assert_eq!( tracks.len(), 2);
    assert_eq!( tracks[0].len(), 2);
    assert_eq!( tracks[0].last().longitude, 20.1);
    assert_eq!( tracks[1].len(), 1);
    assert_eq!( tracks[1].first().longitude, 20.5);
}

#[test]
fn test_position_exclusivity() {
    // two tracks compete for a single position, the closer one gets it
    let snapshots = vec![
        snapshot( 1, &[(0.0, 0.0), (0.0, 0.2)]),
        snapshot( 0, &[(0.0, 0.05)]),
    ];
    let tracks = link_tracks( &snapshots, &LinkConfig::default());
    print_tracks( &tracks);

    assert_eq!( tracks.len(), 2);
    assert_eq!( tracks[0].len(), 2);
    assert_eq!( tracks[1].len(), 1);

    let n_positions: usize = tracks.iter().map( |t| t.len()).sum();
    assert_eq!( n_positions, 3);
}

#[test]
fn test_empty_hour_freezes_track() {
    let snapshots = vec![
        snapshot( 2, &[(0.0, 0.0)]),
        Snapshot::empty( 1),
        snapshot( 0, &[(0.0, 0.1)]),
    ];
    let tracks = link_tracks( &snapshots, &LinkConfig::default());
    print_tracks( &tracks);

    assert_eq!( tracks.len(), 2);
    assert!( tracks.iter().all( |t| t.len() == 1));
}

#[test]
fn test_distance_threshold() {
    let snapshots = vec![
        snapshot( 1, &[(0.0, 0.0)]),
        snapshot( 0, &[(0.0, 1.0)]), // ~111km
    ];

    let config = LinkConfig { dist_threshold_km: 100.0, ..LinkConfig::default() };
    assert_eq!( link_tracks( &snapshots, &config).len(), 2);

    let config = LinkConfig { dist_threshold_km: 120.0, ..LinkConfig::default() };
    assert_eq!( link_tracks( &snapshots, &config).len(), 1);
}

#[test]
fn test_speed_ratio_rejection() {
    let snapshots = vec![
        snapshot( 2, &[(0.0, 0.0)]),
        snapshot( 1, &[(0.0, 1.0)]),
        snapshot( 0, &[(0.0, 5.0)]), // 4 times the previous leg
    ];
    let tracks = link_tracks( &snapshots, &LinkConfig::default());
    print_tracks( &tracks);

    assert_eq!( tracks.len(), 2);
    assert_eq!( tracks[0].len(), 2);
    assert_eq!( tracks[1].first().longitude, 5.0);

    // too slow is rejected as well
    let snapshots = vec![
        snapshot( 2, &[(0.0, 0.0)]),
        snapshot( 1, &[(0.0, 1.0)]),
        snapshot( 0, &[(0.0, 1.2)]),
    ];
    assert_eq!( link_tracks( &snapshots, &LinkConfig::default()).len(), 2);
}

#[test]
fn test_turn_angle() {
    // reversing direction
    let snapshots = vec![
        snapshot( 2, &[(0.0, 0.0)]),
        snapshot( 1, &[(0.0, 1.0)]),
        snapshot( 0, &[(0.0, 0.5)]),
    ];
    let tracks = link_tracks( &snapshots, &LinkConfig::default());
    print_tracks( &tracks);
    assert_eq!( tracks.len(), 2);

    // 45 degree turn is fine
    let snapshots = vec![
        snapshot( 2, &[(0.0, 0.0)]),
        snapshot( 1, &[(0.0, 1.0)]),
        snapshot( 0, &[(1.0, 2.0)]),
    ];
    let tracks = link_tracks( &snapshots, &LinkConfig::default());
    print_tracks( &tracks);
    assert_eq!( tracks.len(), 1);
    assert_eq!( tracks[0].len(), 3);

    // unless we are stricter
    let config = LinkConfig { max_turn_angle_deg: 30.0, ..LinkConfig::default() };
    assert_eq!( link_tracks( &snapshots, &config).len(), 2);
}

#[test]
fn test_turn_across_antimeridian() {
    // straight eastward motion across the antimeridian is not a turn
    let snapshots = vec![
        snapshot( 2, &[(0.0, 179.0)]),
        snapshot( 1, &[(0.0, 179.8)]),
        snapshot( 0, &[(0.0, -179.4)]),
    ];
    let tracks = link_tracks( &snapshots, &LinkConfig::default());
    print_tracks( &tracks);
    assert_eq!( tracks.len(), 1);
    assert_eq!( tracks[0].len(), 3);
}

#[test]
fn test_stationary_previous_leg() {
    let snapshots = vec![
        snapshot( 2, &[(0.0, 0.0)]),
        snapshot( 1, &[(0.0, 0.001)]), // ~0.1km
        snapshot( 0, &[(0.0, 0.5)]),
    ];
    let tracks = link_tracks( &snapshots, &LinkConfig::default());
    print_tracks( &tracks);

    assert_eq!( tracks.len(), 2);
    assert_eq!( tracks[0].len(), 2);
}

#[test]
fn test_track_invariants() {
    // two objects moving in parallel plus some noise
    let mut snapshots = Vec::new();
    for h in (0..6).rev() {
        let x = (5 - h) as f64 * 0.5;
        let mut positions = vec![(40.0, -120.0 + x), (42.0, -118.0 + x)];
        if h % 2 == 0 { positions.push( (30.0 + h as f64, 10.0)) }
        snapshots.push( snapshot( h, &positions));
    }
    let n_input: usize = snapshots.iter().map( |s| s.len()).sum();

    let tracks = link_tracks( &snapshots, &LinkConfig::default());
    print_tracks( &tracks);

    assert_contiguous( &tracks);
    let n_output: usize = tracks.iter().map( |t| t.len()).sum();
    assert_eq!( n_input, n_output);

    for (i,t) in tracks.iter().enumerate() {
        assert_eq!( t.id, i);
    }
    assert_eq!( tracks[0].len(), 6);
    assert_eq!( tracks[1].len(), 6);
}

#[test]
fn test_link_distance() {
    let linker = TrackLinker::new( LinkConfig::default());
    let tracks = linker.link_tracks( &[ snapshot( 0, &[(0.0, 0.0)]) ]);

    let d = linker.link_distance( &tracks[0], &Position::new( 0.0, 1.0, 1.0, -1));
    println!("link distance: {d:?}");
    assert!( d.is_some_and( |d| (d - 111.195).abs() < 0.01));

    let d = linker.link_distance( &tracks[0], &Position::new( 0.0, 10.0, 1.0, -1));
    assert!( d.is_none());
}

fn distance_km (a: &Position, b: &Position)->f64 {
    great_circle_distance_km( &a.geo_point(), &b.geo_point())
}

#[test]
fn test_distance_threshold_is_exclusive() {
    let p0 = Position::new( 0.0, 0.0, 1.0, 1);
    let p1 = Position::new( 0.0, 1.0, 1.0, 0);
    let snapshots = vec![ Snapshot::new( 1, vec![p0]), Snapshot::new( 0, vec![p1]) ];
    let d = distance_km( &p0, &p1);
    println!("distance: {d}km");

    let linker = TrackLinker::new( LinkConfig { dist_threshold_km: d, ..LinkConfig::default() });
    assert_eq!( linker.config().dist_threshold_km, d);
    assert_eq!( linker.link_tracks( &snapshots).len(), 2);

    let linker = TrackLinker::new( LinkConfig { dist_threshold_km: d + 1e-6, ..LinkConfig::default() });
    assert_eq!( linker.link_tracks( &snapshots).len(), 1);
}

#[test]
fn test_max_speed_ratio_is_inclusive() {
    let p0 = Position::new( 0.0, 0.0, 1.0, 2);
    let p1 = Position::new( 0.0, 1.0, 1.0, 1);
    let p2 = Position::new( 0.0, 3.0, 1.0, 0);
    let snapshots = vec![ Snapshot::new( 2, vec![p0]), Snapshot::new( 1, vec![p1]), Snapshot::new( 0, vec![p2]) ];
    let ratio = distance_km( &p1, &p2) / distance_km( &p0, &p1);
    println!("speed ratio: {ratio}");

    let tracks = link_tracks( &snapshots, &LinkConfig { max_speed_ratio: ratio, ..LinkConfig::default() });
    print_tracks( &tracks);
    assert_eq!( tracks.len(), 1);
    assert_eq!( tracks[0].len(), 3);

    let tracks = link_tracks( &snapshots, &LinkConfig { max_speed_ratio: ratio - 1e-9, ..LinkConfig::default() });
    assert_eq!( tracks.len(), 2);
}

#[test]
fn test_max_turn_angle_is_inclusive() {
    // right angle turn
    let p0 = Position::new( 0.0, 0.0, 1.0, 2);
    let p1 = Position::new( 0.0, 1.0, 1.0, 1);
    let p2 = Position::new( 1.0, 1.0, 1.0, 0);
    let snapshots = vec![ Snapshot::new( 2, vec![p0]), Snapshot::new( 1, vec![p1]), Snapshot::new( 0, vec![p2]) ];

    let v_prev = GeoVector::between_degrees( p0.latitude, p0.longitude, p1.latitude, p1.longitude);
    let v_next = GeoVector::between_degrees( p1.latitude, p1.longitude, p2.latitude, p2.longitude);
    let angle = angle_between_deg( &v_prev, &v_next).unwrap();
    println!("turn angle: {angle}");
    assert!( (angle - 90.0).abs() < 1e-9);

    let tracks = link_tracks( &snapshots, &LinkConfig { max_turn_angle_deg: angle, ..LinkConfig::default() });
    print_tracks( &tracks);
    assert_eq!( tracks.len(), 1);
    assert_eq!( tracks[0].len(), 3);

    let tracks = link_tracks( &snapshots, &LinkConfig { max_turn_angle_deg: angle - 1e-6, ..LinkConfig::default() });
    assert_eq!( tracks.len(), 2);
}

/// returns all candidates unfiltered - the linker still has to keep links exclusive
struct AllCandidates;

impl LinkMatcher for AllCandidates {
    fn assign (&self, candidates: Vec<LinkCandidate>)->Vec<LinkCandidate> { candidates }
}

/// never links anything
struct NoLinks;

impl LinkMatcher for NoLinks {
    fn assign (&self, _candidates: Vec<LinkCandidate>)->Vec<LinkCandidate> { Vec::new() }
}

#[test]
fn test_custom_matcher() {
    let snapshots = vec![
        snapshot( 1, &[(0.0, 0.0), (0.0, 0.2)]),
        snapshot( 0, &[(0.0, 0.1), (0.0, 0.05)]),
    ];

    let tracks = TrackLinker::with_matcher( LinkConfig::default(), AllCandidates).link_tracks( &snapshots);
    print_tracks( &tracks);
    assert_eq!( tracks.len(), 2);
    assert!( tracks.iter().all( |t| t.len() == 2));
    assert_eq!( tracks[0].last().longitude, 0.1); // first candidate in generation order
    assert_contiguous( &tracks);

    let tracks = TrackLinker::with_matcher( LinkConfig::default(), NoLinks).link_tracks( &snapshots);
    assert_eq!( tracks.len(), 4);
}
