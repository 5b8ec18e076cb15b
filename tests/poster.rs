//! Integration tests for filtering, tier coloring and poster rendering

use chrono::{DateTime, FixedOffset};
use track_poster::{
    render_poster, render_years, BoundingBox, DistanceThresholds, GpsPoint, PosterConfig,
    PosterKind, RenderOutcome, Shape, Tier, TimeBasis, Track, TrackFilter, TrackSet, YearRange,
};

fn start(date: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(&format!("{}T07:00:00+02:00", date)).unwrap()
}

/// A short out-and-back north of `lat`, roughly `km` long.
fn gps_track(id: &str, date: &str, lat: f64, km: f64) -> Track {
    let steps = 10;
    let dlat = km / 111.2 / 2.0 / steps as f64;
    let mut points: Vec<GpsPoint> = (0..=steps)
        .map(|i| GpsPoint::new(lat + i as f64 * dlat, 11.5))
        .collect();
    points.extend((0..steps).rev().map(|i| GpsPoint::new(lat + i as f64 * dlat, 11.5005)));
    Track::from_gps_segments(id, "running", start(date), &[points]).unwrap()
}

fn track_with_length(id: &str, date: &str, km: f64) -> Track {
    let mut track = gps_track(id, date, 48.1, 1.0);
    track.length = km * 1000.0;
    track
}

#[test]
fn test_distance_tiers_end_to_end() {
    let thresholds = DistanceThresholds::new(10.0, 21.1, 42.2).unwrap();
    let tiers: Vec<Tier> = [2.0, 12.0, 25.0, 45.0, 60.0]
        .iter()
        .map(|&km| thresholds.tier_for(km))
        .collect();
    assert_eq!(
        tiers,
        vec![Tier::Default, Tier::Tier1, Tier::Tier2, Tier::Tier3, Tier::Tier3]
    );
}

#[test]
fn test_year_range_follows_filter() {
    let mut set = TrackSet::new(TimeBasis::Utc);
    set.set_tracks(vec![
        track_with_length("a", "2019-04-01", 5.0),
        track_with_length("b", "2021-04-01", 5.0),
        track_with_length("c", "2022-04-01", 5.0),
    ]);
    assert_eq!(set.years().all(), vec![2019, 2020, 2021, 2022]);

    set.filter_by_year_range(YearRange::parse("2021").unwrap());
    assert_eq!(set.years().all(), vec![2021]);
    assert_eq!(set.len(), 1);

    // Reloading drops the filter
    set.set_tracks(vec![track_with_length("d", "2018-04-01", 5.0)]);
    assert_eq!(set.years().all(), vec![2018]);
}

#[test]
fn test_gps_length_is_haversine() {
    let track = gps_track("a", "2021-04-01", 48.1, 10.0);
    assert!((track.length_km() - 10.0).abs() < 0.2);
    assert_eq!(track.polylines.len(), 1);
}

#[test]
fn test_grid_poster_stays_inside_tracks_area() {
    let tracks = (0..7)
        .map(|i| gps_track(&format!("t{}", i), "2021-06-01", 48.0 + i as f64, 3.0 + i as f64))
        .collect();
    let set = TrackSet::from_tracks(tracks, TimeBasis::Utc);
    let config = PosterConfig::default();

    let outcome = render_poster(&set, &config, PosterKind::Grid).unwrap();
    let poster = outcome.poster().unwrap();

    let mut polylines = 0;
    let mut bbox = BoundingBox::new();
    for shape in &poster.shapes {
        if let Shape::Polyline { points, .. } = shape {
            polylines += 1;
            bbox.extend_all(points.iter().copied());
        }
    }
    assert_eq!(polylines, 7);

    let (min, max) = (bbox.min().unwrap(), bbox.max().unwrap());
    assert!(min.x >= 10.0 - 1e-9 && min.y >= 30.0 - 1e-9);
    assert!(max.x <= 190.0 + 1e-9 && max.y <= 270.0 + 1e-9);
}

#[test]
fn test_polar_track_renders_finite_grid() {
    let points = vec![GpsPoint::new(-89.99, 0.0), GpsPoint::new(-90.0, 0.0)];
    let polar = Track::from_gps_segments("pole", "running", start("2021-06-01"), &[points]).unwrap();
    let set = TrackSet::from_tracks(
        vec![polar, gps_track("a", "2021-06-02", 48.1, 5.0)],
        TimeBasis::Utc,
    );

    let outcome = render_poster(&set, &PosterConfig::default(), PosterKind::Grid).unwrap();
    for shape in &outcome.poster().unwrap().shapes {
        if let Shape::Polyline { points, .. } = shape {
            for p in points {
                assert!(p.is_finite(), "{:?}", p);
                assert!(p.x >= 10.0 - 1e-9 && p.x <= 190.0 + 1e-9);
                assert!(p.y >= 30.0 - 1e-9 && p.y <= 270.0 + 1e-9);
            }
        }
    }
}

#[test]
fn test_filtered_out_poster_is_no_tracks() {
    let mut set = TrackSet::from_tracks(
        vec![track_with_length("a", "2021-04-01", 5.0)],
        TimeBasis::Utc,
    );
    set.filter_by_min_length(50_000.0);
    let outcome = render_poster(&set, &PosterConfig::default(), PosterKind::Github).unwrap();
    assert_eq!(outcome, RenderOutcome::NoTracks);
}

#[test]
fn test_circular_years_render_independently() {
    let all = vec![
        track_with_length("a", "2020-03-01", 5.0),
        track_with_length("b", "2021-03-01", 15.0),
        track_with_length("c", "2021-03-02", 0.5),
    ];
    let filter = TrackFilter {
        min_length: 1000.0,
        ..TrackFilter::default()
    };
    let results = render_years(&all, &filter, &PosterConfig::default());
    assert_eq!(results.len(), 2);

    for (year, result) in &results {
        let poster = match result {
            Ok(RenderOutcome::Rendered(poster)) => poster,
            other => panic!("{}: unexpected {:?}", year, other),
        };
        assert_eq!(poster.width, poster.height);
        let sectors = poster
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Sector { .. }))
            .count();
        // The 0.5 km track is below the minimum distance
        assert_eq!(sectors, 1);
    }
}

#[test]
fn test_tracks_json_round_trip_into_set() {
    let json = r##"[
        {
            "id": "run-1",
            "sport_type": "running",
            "start_time": "2021-05-01T07:30:00+02:00",
            "polylines": [[{"x": 1.06, "y": 0.33}, {"x": 1.07, "y": 0.34}]],
            "length": 12000.0
        },
        {
            "id": "ride-1",
            "sport_type": "cycling",
            "start_time": "2021-05-02T07:30:00+02:00",
            "polylines": [[{"x": 1.06, "y": 0.33}, {"x": 1.08, "y": 0.35}]],
            "length": 40000.0,
            "special": true
        }
    ]"##;
    let tracks: Vec<Track> = serde_json::from_str(json).unwrap();
    let mut set = TrackSet::from_tracks(tracks, TimeBasis::Utc);
    assert_eq!(set.filter_by_sport_type("running"), 1);
    assert_eq!(set.tracks()[0].id, "run-1");
    assert_eq!(set.filter_by_sport_type("all"), 2);
}

#[test]
fn test_config_json_overrides() {
    let config = PosterConfig::from_json(
        r##"{"title": "2021", "colors": {"background": "#000000"}, "thresholds": [5, 10, 20]}"##,
    )
    .unwrap();
    assert_eq!(config.title, "2021");
    assert_eq!(config.colors.background.to_hex(), "#000000");
    assert_eq!(config.thresholds.limits(), [5.0, 10.0, 20.0]);
    assert_eq!(config.width, 200.0);

    assert!(PosterConfig::from_json(r#"{"thresholds": [20, 10, 5]}"#).is_err());
}
