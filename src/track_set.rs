//! # Track Set
//!
//! Working set of tracks for one poster. The loaded tracks are kept
//! untouched; every filter change rebuilds the visible view from them and
//! recomputes the derived aggregates (year span, length ranges, per-day
//! totals), so the aggregates always describe the current view.
//!
//! Filters are plain predicates over the loaded track attributes, so they
//! compose, are idempotent, and can be applied in any order.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::PosterConfig;
use crate::ranges::{ValueRange, YearRange};
use crate::track::{TimeBasis, Track};

/// Composable filter over the loaded tracks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackFilter {
    /// Calendar years to keep
    pub years: YearRange,
    /// Sport type to keep (`None` keeps every type)
    pub sport_type: Option<String>,
    /// Minimum track length in meters
    pub min_length: f64,
    /// Track ids to flag as special
    pub special: BTreeSet<String>,
}

impl TrackFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `track` stays in the view.
    pub fn accepts(&self, track: &Track, basis: TimeBasis) -> bool {
        self.years.contains(track.start_date(basis))
            && self
                .sport_type
                .as_deref()
                .map_or(true, |sport| track.sport_type == sport)
            && track.length >= self.min_length
    }

    pub fn is_special(&self, track: &Track) -> bool {
        track.special || self.special.contains(&track.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterState {
    Unfiltered,
    Filtered,
}

/// Aggregate statistics of the current view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSetStats {
    pub track_count: usize,
    /// Total length in meters
    pub total_length: f64,
    pub years: YearRange,
    pub length_range: ValueRange,
}

/// Summed activity of one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayTotal {
    pub date: NaiveDate,
    /// Summed length in meters
    pub length: f64,
    pub has_special: bool,
    pub track_count: usize,
}

/// The poster's working set of tracks.
#[derive(Debug, Clone)]
pub struct TrackSet {
    source: Vec<Track>,
    filter: TrackFilter,
    state: FilterState,
    time_basis: TimeBasis,

    // Derived from `filter` over `source`
    tracks: Vec<Track>,
    years: YearRange,
    length_range: ValueRange,
    length_range_by_date: ValueRange,
    tracks_by_date: BTreeMap<NaiveDate, Vec<usize>>,
    total_length: f64,
}

impl TrackSet {
    pub fn new(time_basis: TimeBasis) -> Self {
        Self {
            source: Vec::new(),
            filter: TrackFilter::default(),
            state: FilterState::Unfiltered,
            time_basis,
            tracks: Vec::new(),
            years: YearRange::default(),
            length_range: ValueRange::new(),
            length_range_by_date: ValueRange::new(),
            tracks_by_date: BTreeMap::new(),
            total_length: 0.0,
        }
    }

    pub fn with_config(config: &PosterConfig) -> Self {
        Self::new(config.time_basis)
    }

    pub fn from_tracks(tracks: Vec<Track>, time_basis: TimeBasis) -> Self {
        let mut set = Self::new(time_basis);
        set.set_tracks(tracks);
        set
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Replace the loaded tracks and drop every filter.
    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        info!("[TrackSet] Loaded {} tracks", tracks.len());
        self.source = tracks;
        self.filter = TrackFilter::default();
        self.state = FilterState::Unfiltered;
        self.recompute();
    }

    /// Replace the whole filter at once. Returns the number of visible tracks.
    pub fn apply(&mut self, filter: TrackFilter) -> usize {
        self.filter = filter;
        self.state = FilterState::Filtered;
        self.recompute()
    }

    pub fn filter_by_year_range(&mut self, years: YearRange) -> usize {
        self.filter.years = years;
        self.state = FilterState::Filtered;
        self.recompute()
    }

    /// Keep one sport type; `"all"` keeps every type.
    pub fn filter_by_sport_type(&mut self, sport_type: &str) -> usize {
        self.filter.sport_type = (sport_type != "all").then(|| sport_type.to_string());
        self.state = FilterState::Filtered;
        self.recompute()
    }

    pub fn filter_by_min_length(&mut self, meters: f64) -> usize {
        self.filter.min_length = meters;
        self.state = FilterState::Filtered;
        self.recompute()
    }

    /// Flag the tracks with these ids as special.
    pub fn mark_special<I, S>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.special = ids.into_iter().map(Into::into).collect();
        self.state = FilterState::Filtered;
        self.recompute()
    }

    fn recompute(&mut self) -> usize {
        let filter = &self.filter;
        let basis = self.time_basis;
        self.tracks = self
            .source
            .iter()
            .filter(|t| filter.accepts(t, basis))
            .map(|t| {
                let mut track = t.clone();
                track.special = filter.is_special(t);
                track
            })
            .collect();

        self.years = YearRange::default();
        self.length_range = ValueRange::new();
        self.length_range_by_date = ValueRange::new();
        self.tracks_by_date.clear();
        self.total_length = 0.0;

        for (index, track) in self.tracks.iter().enumerate() {
            let date = track.start_date(basis);
            self.years.add(date);
            self.length_range.extend(track.length);
            self.total_length += track.length;
            self.tracks_by_date.entry(date).or_default().push(index);
        }
        for indices in self.tracks_by_date.values() {
            let day_length: f64 = indices.iter().map(|&i| self.tracks[i].length).sum();
            self.length_range_by_date.extend(day_length);
        }

        debug!(
            "[TrackSet] {} of {} tracks visible, years {:?}-{:?}",
            self.tracks.len(),
            self.source.len(),
            self.years.from_year,
            self.years.to_year
        );
        if self.tracks.is_empty() && !self.source.is_empty() {
            warn!("[TrackSet] Filter left no tracks");
        }
        self.tracks.len()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Tracks in the current view, in load order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Every loaded track, ignoring filters.
    pub fn source_tracks(&self) -> &[Track] {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn state(&self) -> FilterState {
        self.state
    }

    pub fn filter(&self) -> &TrackFilter {
        &self.filter
    }

    pub fn time_basis(&self) -> TimeBasis {
        self.time_basis
    }

    /// Year span of the current view.
    pub fn years(&self) -> &YearRange {
        &self.years
    }

    /// Min/max track length (meters) of the current view.
    pub fn length_range(&self) -> &ValueRange {
        &self.length_range
    }

    /// Min/max summed length per day (meters) of the current view.
    pub fn length_range_by_date(&self) -> &ValueRange {
        &self.length_range_by_date
    }

    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    pub fn tracks_on(&self, date: NaiveDate) -> impl Iterator<Item = &Track> + '_ {
        self.tracks_by_date
            .get(&date)
            .into_iter()
            .flatten()
            .map(move |&i| &self.tracks[i])
    }

    pub fn day_total(&self, date: NaiveDate) -> Option<DayTotal> {
        let indices = self.tracks_by_date.get(&date)?;
        let tracks = indices.iter().map(|&i| &self.tracks[i]);
        Some(DayTotal {
            date,
            length: tracks.clone().map(|t| t.length).sum(),
            has_special: tracks.clone().any(|t| t.special),
            track_count: indices.len(),
        })
    }

    /// Per-day totals in date order.
    pub fn day_totals(&self) -> Vec<DayTotal> {
        self.tracks_by_date
            .keys()
            .filter_map(|&date| self.day_total(date))
            .collect()
    }

    pub fn stats(&self) -> TrackSetStats {
        TrackSetStats {
            track_count: self.tracks.len(),
            total_length: self.total_length,
            years: self.years,
            length_range: self.length_range,
        }
    }
}
