//! Grid poster: every track projected into its own square cell.

use log::debug;

use crate::config::PosterConfig;
use crate::error::Result;
use crate::geometry::XY;
use crate::grid::compute_grid;
use crate::projection::project;
use crate::track_set::TrackSet;

use super::{distance_label, ensure_tracks, length_color, Shape, TracksDrawer};

/// Share of a cell taken by the track; the rest is an even margin.
const CELL_FILL: f64 = 0.9;
const STROKE_WIDTH: f64 = 0.5;

#[derive(Debug, Clone, Copy, Default)]
pub struct GridDrawer;

impl TracksDrawer for GridDrawer {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn draw(
        &self,
        tracks: &TrackSet,
        config: &PosterConfig,
        size: XY,
        offset: XY,
    ) -> Result<Vec<Shape>> {
        ensure_tracks(tracks, self.name())?;
        let grid = compute_grid(tracks.len(), size)?;
        debug!(
            "[GridDrawer] {} tracks in {}x{} cells of {:.2}",
            tracks.len(),
            grid.columns,
            grid.rows,
            grid.cell_size
        );

        let cell = XY::new(grid.cell_size, grid.cell_size);
        let inset = 0.5 * (1.0 - CELL_FILL) * cell;
        let mut shapes = Vec::new();

        // Newest first
        for (index, track) in tracks.tracks().iter().rev().enumerate() {
            let origin = grid.cell_origin(index, size, offset);
            let stroke = length_color(config, tracks.length_range(), track.length, track.special);
            let date = track.start_date(tracks.time_basis()).format("%Y-%m-%d").to_string();
            let title = distance_label(config, &date, track.length);

            let bbox = track.bbox();
            let projected = project(&bbox, CELL_FILL * cell, origin + inset, &track.polylines);
            for line in projected.lines() {
                shapes.push(Shape::Polyline {
                    points: line.collect(),
                    stroke,
                    stroke_width: STROKE_WIDTH,
                    title: Some(title.clone()),
                    desc: Some(track.id.clone()),
                });
            }
        }

        Ok(shapes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PosterError;
    use crate::geometry::BoundingBox;
    use crate::track::{TimeBasis, Track};
    use chrono::DateTime;

    fn track(id: &str, date: &str, km: f64, lines: Vec<Vec<XY>>) -> Track {
        Track {
            id: id.to_string(),
            sport_type: "running".to_string(),
            start_time: DateTime::parse_from_rfc3339(&format!("{}T06:00:00Z", date)).unwrap(),
            polylines: lines,
            length: km * 1000.0,
            special: false,
        }
    }

    fn square() -> Vec<Vec<XY>> {
        vec![vec![
            XY::new(1.0, 0.5),
            XY::new(1.01, 0.5),
            XY::new(1.01, 0.51),
            XY::new(1.0, 0.51),
        ]]
    }

    #[test]
    fn test_four_tracks_in_two_by_two() {
        let tracks = (0..4)
            .map(|i| track(&format!("t{}", i), "2021-05-01", 5.0, square()))
            .collect();
        let set = TrackSet::from_tracks(tracks, TimeBasis::Utc);
        let config = PosterConfig::default();
        let shapes = GridDrawer
            .draw(&set, &config, XY::new(100.0, 100.0), XY::new(10.0, 30.0))
            .unwrap();
        assert_eq!(shapes.len(), 4);

        // The last loaded track takes the first cell
        match &shapes[0] {
            Shape::Polyline { points, desc, title, .. } => {
                assert_eq!(desc.as_deref(), Some("t3"));
                assert_eq!(title.as_deref(), Some("2021-05-01 5.0 km"));
                let bbox = BoundingBox::from_polylines([points]);
                let (min, max) = (bbox.min().unwrap(), bbox.max().unwrap());
                assert!((min.x - 12.5).abs() < 1e-9 && (min.y - 32.5).abs() < 1e-9);
                assert!((max.x - 57.5).abs() < 1e-9 && (max.y - 77.5).abs() < 1e-9);
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_tier_colors_applied() {
        let tracks = [2.0, 12.0, 25.0, 45.0, 60.0]
            .iter()
            .enumerate()
            .map(|(i, &km)| track(&format!("t{}", i), "2021-05-01", km, square()))
            .collect();
        let set = TrackSet::from_tracks(tracks, TimeBasis::Utc);
        let config = PosterConfig::default();
        let shapes = GridDrawer
            .draw(&set, &config, XY::new(180.0, 240.0), XY::new(10.0, 30.0))
            .unwrap();

        let tiers = config.colors.tiers.0;
        let strokes: Vec<_> = shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Polyline { stroke, .. } => Some(*stroke),
                _ => None,
            })
            .collect();
        // Drawn newest first
        assert_eq!(strokes[0], tiers[2].unwrap());
        assert_eq!(strokes[1], tiers[2].unwrap());
        assert_eq!(strokes[2], tiers[1].unwrap());
        assert_eq!(strokes[3], tiers[0].unwrap());
        assert_eq!(strokes[4], config.colors.track);
    }

    #[test]
    fn test_multi_segment_track() {
        let lines = vec![
            vec![XY::new(1.0, 0.5), XY::new(1.01, 0.5)],
            vec![XY::new(1.0, 0.51), XY::new(1.01, 0.51)],
        ];
        let set = TrackSet::from_tracks(vec![track("a", "2021-05-01", 3.0, lines)], TimeBasis::Utc);
        let shapes = GridDrawer
            .draw(&set, &PosterConfig::default(), XY::new(50.0, 50.0), XY::ZERO)
            .unwrap();
        assert_eq!(shapes.len(), 2);
    }

    #[test]
    fn test_empty_set_is_layout_error() {
        let set = TrackSet::new(TimeBasis::Utc);
        let err = GridDrawer
            .draw(&set, &PosterConfig::default(), XY::new(50.0, 50.0), XY::ZERO)
            .unwrap_err();
        assert!(matches!(err, PosterError::Layout { .. }));
    }
}
