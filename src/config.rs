//! Poster configuration.
//!
//! A [`PosterConfig`] is built once, validated, and then shared read-only by
//! the track set and every drawer.

use serde::{Deserialize, Serialize};

use crate::color::{interpolate_color, Color};
use crate::error::{PosterError, Result};
use crate::ranges::{Units, ValueRange};
use crate::tiers::{DistanceThresholds, TierColors};
use crate::track::TimeBasis;

/// First day of the GitHub-style calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GithubStyle {
    /// Each year starts on January 1st
    #[default]
    AlignFirstday,
    /// Each year starts on the Monday on or before January 1st
    AlignMonday,
}

impl std::str::FromStr for GithubStyle {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "align-firstday" => Ok(GithubStyle::AlignFirstday),
            "align-monday" => Ok(GithubStyle::AlignMonday),
            other => Err(PosterError::parameter(format!("unknown github style '{}'", other))),
        }
    }
}

/// Colors used by the drawers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    pub background: Color,
    /// Start of the gradient for normal tracks
    pub track: Color,
    /// End of the gradient for normal tracks (defaults to `track`)
    pub track2: Option<Color>,
    /// Start of the gradient for special tracks
    pub special: Color,
    /// End of the gradient for special tracks (defaults to `special`)
    pub special2: Option<Color>,
    pub text: Color,
    /// Colors of distance tiers 1..=3
    pub tiers: TierColors,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x22, 0x22, 0x22),
            track: Color::rgb(0x4d, 0xd2, 0xff),
            track2: None,
            special: Color::rgb(0x30, 0x70, 0xf3),
            special2: None,
            text: Color::rgb(0xff, 0xff, 0xff),
            tiers: TierColors::new(
                Some(Color::rgb(0x30, 0x70, 0xf3)),
                Some(Color::rgb(0xff, 0xff, 0x00)),
                Some(Color::rgb(0xff, 0x00, 0x00)),
            ),
        }
    }
}

impl ColorScheme {
    /// Darker palette used for circular year posters.
    pub fn circular() -> Self {
        Self {
            background: Color::rgb(0x1a, 0x1a, 0x1a),
            track: Color::rgb(0xff, 0x00, 0x00),
            special: Color::rgb(0xff, 0xff, 0x00),
            text: Color::rgb(0xe1, 0xed, 0x5e),
            ..Self::default()
        }
    }

    /// Gradient endpoints for normal or special tracks.
    pub fn gradient(&self, special: bool) -> (Color, Color) {
        if special {
            (self.special, self.special2.unwrap_or(self.special))
        } else {
            (self.track, self.track2.unwrap_or(self.track))
        }
    }

    /// Color from the length gradient, used below the first distance tier.
    pub fn default_color(&self, length_range: &ValueRange, length: f64, special: bool) -> Color {
        let (from, to) = self.gradient(special);
        if !length_range.is_valid() {
            return from;
        }
        interpolate_color(from, to, length_range.relative_position(length))
    }
}

/// Everything a poster render needs besides the tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterConfig {
    pub title: String,
    pub athlete: String,
    /// Canvas width in poster units
    pub width: f64,
    /// Canvas height in poster units
    pub height: f64,
    pub units: Units,
    pub time_basis: TimeBasis,
    pub colors: ColorScheme,
    pub thresholds: DistanceThresholds,
    pub github_style: GithubStyle,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            title: "My Tracks".to_string(),
            athlete: "John Doe".to_string(),
            width: 200.0,
            height: 300.0,
            units: Units::Metric,
            time_basis: TimeBasis::Utc,
            colors: ColorScheme::default(),
            thresholds: DistanceThresholds::default(),
            github_style: GithubStyle::AlignFirstday,
        }
    }
}

impl PosterConfig {
    /// Parse and validate a JSON configuration; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PosterError::config(format!(
                    "poster {} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
