//! Scalar ranges, calendar-year ranges and distance units.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{PosterError, Result};

// ============================================================================
// Value Range
// ============================================================================

/// Closed range of values, empty until the first value is added.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueRange {
    lower: Option<f64>,
    upper: Option<f64>,
}

impl ValueRange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pair(a: f64, b: f64) -> Self {
        Self {
            lower: Some(a.min(b)),
            upper: Some(a.max(b)),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }

    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    pub fn diameter(&self) -> f64 {
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => upper - lower,
            _ => 0.0,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => lower <= value && value <= upper,
            _ => false,
        }
    }

    pub fn extend(&mut self, value: f64) {
        self.lower = Some(self.lower.map_or(value, |l| l.min(value)));
        self.upper = Some(self.upper.map_or(value, |u| u.max(value)));
    }

    /// Position of `value` inside the range, clamped to [0, 1].
    /// Empty and zero-width ranges report 0.
    pub fn relative_position(&self, value: f64) -> f64 {
        let (lower, upper) = match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => (lower, upper),
            _ => return 0.0,
        };
        if value <= lower || upper <= lower {
            0.0
        } else if value >= upper {
            1.0
        } else {
            (value - lower) / (upper - lower)
        }
    }

    /// Value at `ratio` of the way from lower to upper.
    pub fn interpolate(&self, ratio: f64) -> Option<f64> {
        self.lower.map(|lower| lower + ratio * self.diameter())
    }
}

// ============================================================================
// Year Range
// ============================================================================

/// Inclusive span of calendar years. Both ends unset means "all years".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YearRange {
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
}

impl YearRange {
    /// Unbounded range matching every year.
    pub fn all_years() -> Self {
        Self::default()
    }

    pub fn single(year: i32) -> Self {
        Self {
            from_year: Some(year),
            to_year: Some(year),
        }
    }

    /// Parse `"all"`, `"NUM"` or `"NUM-NUM"`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "all" {
            return Ok(Self::all_years());
        }

        let parse_year = |part: &str| -> Result<i32> {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(PosterError::parameter(format!("invalid year range '{}'", s)));
            }
            part.parse::<i32>()
                .map_err(|_| PosterError::parameter(format!("invalid year range '{}'", s)))
        };

        match s.split_once('-') {
            None => parse_year(s).map(Self::single),
            Some((from, to)) => {
                let (from, to) = (parse_year(from)?, parse_year(to)?);
                if from > to {
                    return Err(PosterError::parameter(format!(
                        "year range '{}' ends before it starts",
                        s
                    )));
                }
                Ok(Self {
                    from_year: Some(from),
                    to_year: Some(to),
                })
            }
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from_year.is_none() && self.to_year.is_none()
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.from_year.map_or(true, |from| from <= year) && self.to_year.map_or(true, |to| year <= to)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.contains_year(date.year())
    }

    /// Extend the span to cover `date`.
    pub fn add(&mut self, date: NaiveDate) {
        let year = date.year();
        self.from_year = Some(self.from_year.map_or(year, |from| from.min(year)));
        self.to_year = Some(self.to_year.map_or(year, |to| to.max(year)));
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Number of years in the span; 0 unless both ends are set.
    pub fn count(&self) -> usize {
        match (self.from_year, self.to_year) {
            (Some(from), Some(to)) if from <= to => (to - from + 1) as usize,
            _ => 0,
        }
    }

    /// Every year of the span in ascending order.
    pub fn all(&self) -> Vec<i32> {
        match (self.from_year, self.to_year) {
            (Some(from), Some(to)) => (from..=to).collect(),
            _ => Vec::new(),
        }
    }
}

// ============================================================================
// Units
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

const METERS_PER_MILE: f64 = 1609.344;

impl Units {
    /// Convert meters to kilometers or miles.
    pub fn m2u(self, meters: f64) -> f64 {
        match self {
            Units::Metric => meters / 1000.0,
            Units::Imperial => meters / METERS_PER_MILE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Units::Metric => "km",
            Units::Imperial => "mi",
        }
    }
}

impl std::str::FromStr for Units {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            other => Err(PosterError::parameter(format!("unknown units '{}'", other))),
        }
    }
}

pub fn format_float(value: f64) -> String {
    format!("{:.1}", value)
}
