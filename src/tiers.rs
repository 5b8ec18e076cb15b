//! Distance tiers for stroke colors.
//!
//! Three ascending thresholds split distances into four half-open bands:
//! `[0, d1)`, `[d1, d2)`, `[d2, d3)` and `[d3, ∞)`. Bands are evaluated from
//! the highest threshold down, and a tier without a color borrows the color
//! of the next lower tier, ending at the track's default gradient color.
//!
//! ## Example
//! ```rust
//! use track_poster::tiers::{classify, DistanceThresholds, Tier, TierColors};
//! use track_poster::Color;
//!
//! let thresholds = DistanceThresholds::default(); // 10 / 21.1 / 42.2 km
//! assert_eq!(thresholds.tier_for(21.1), Tier::Tier2);
//!
//! let red = Color::rgb(255, 0, 0);
//! let colors = TierColors::new(Some(red), None, None);
//! let fallback = Color::rgb(77, 210, 255);
//! // Tier 3 and tier 2 are unset, so a marathon falls back to the tier 1 color
//! assert_eq!(classify(42.2, &thresholds, &colors, fallback), red);
//! ```

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{PosterError, Result};

/// Ordered distance tier; `Default` is below the first threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Default,
    Tier1,
    Tier2,
    Tier3,
}

impl Tier {
    /// 0 for `Default`, 1..=3 for the colored tiers.
    pub fn index(self) -> usize {
        match self {
            Tier::Default => 0,
            Tier::Tier1 => 1,
            Tier::Tier2 => 2,
            Tier::Tier3 => 3,
        }
    }
}

/// Three strictly ascending distance thresholds in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 3]", into = "[f64; 3]")]
pub struct DistanceThresholds {
    limits: [f64; 3],
}

impl DistanceThresholds {
    /// Validate and build thresholds. Rejects non-finite, negative or
    /// non-ascending values.
    pub fn new(distance1: f64, distance2: f64, distance3: f64) -> Result<Self> {
        let limits = [distance1, distance2, distance3];
        if limits.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(PosterError::config(format!(
                "distance thresholds must be finite and non-negative, got {:?}",
                limits
            )));
        }
        if !(distance1 < distance2 && distance2 < distance3) {
            return Err(PosterError::config(format!(
                "distance thresholds must be strictly ascending, got {} / {} / {}",
                distance1, distance2, distance3
            )));
        }
        Ok(Self { limits })
    }

    pub fn limits(&self) -> [f64; 3] {
        self.limits
    }

    /// Tier of a distance in kilometers. A distance equal to a threshold
    /// belongs to the higher tier.
    pub fn tier_for(&self, distance_km: f64) -> Tier {
        let [d1, d2, d3] = self.limits;
        if distance_km >= d3 {
            Tier::Tier3
        } else if distance_km >= d2 {
            Tier::Tier2
        } else if distance_km >= d1 {
            Tier::Tier1
        } else {
            Tier::Default
        }
    }
}

impl Default for DistanceThresholds {
    fn default() -> Self {
        // 10k, half marathon, marathon
        Self {
            limits: [10.0, 21.1, 42.2],
        }
    }
}

impl TryFrom<[f64; 3]> for DistanceThresholds {
    type Error = PosterError;

    fn try_from(limits: [f64; 3]) -> Result<Self> {
        Self::new(limits[0], limits[1], limits[2])
    }
}

impl From<DistanceThresholds> for [f64; 3] {
    fn from(thresholds: DistanceThresholds) -> Self {
        thresholds.limits
    }
}

/// Optional colors for tiers 1..=3.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TierColors(pub [Option<Color>; 3]);

impl TierColors {
    pub fn new(tier1: Option<Color>, tier2: Option<Color>, tier3: Option<Color>) -> Self {
        Self([tier1, tier2, tier3])
    }

    /// Color for `tier`, walking down to lower tiers while unset.
    pub fn resolve(&self, tier: Tier, default_color: Color) -> Color {
        self.0[..tier.index()]
            .iter()
            .rev()
            .find_map(|c| *c)
            .unwrap_or(default_color)
    }
}

/// Stroke color for a track (or day) of `distance_km`.
pub fn classify(
    distance_km: f64,
    thresholds: &DistanceThresholds,
    tier_colors: &TierColors,
    default_color: Color,
) -> Color {
    tier_colors.resolve(thresholds.tier_for(distance_km), default_color)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Color = Color::rgb(0x30, 0x70, 0xf3);
    const YELLOW: Color = Color::rgb(255, 255, 0);
    const RED: Color = Color::rgb(255, 0, 0);
    const TRACK: Color = Color::rgb(0x4d, 0xd2, 0xff);

    #[test]
    fn test_tier_monotonic_with_closed_lower_bound() {
        let thresholds = DistanceThresholds::new(10.0, 21.1, 42.2).unwrap();
        let distances = [5.0, 10.0, 15.0, 21.1, 30.0, 42.2, 50.0];
        let tiers: Vec<usize> = distances.iter().map(|&d| thresholds.tier_for(d).index()).collect();

        assert_eq!(tiers, vec![0, 1, 1, 2, 2, 3, 3]);
        assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_full_palette() {
        let thresholds = DistanceThresholds::default();
        let colors = TierColors::new(Some(BLUE), Some(YELLOW), Some(RED));

        assert_eq!(classify(2.0, &thresholds, &colors, TRACK), TRACK);
        assert_eq!(classify(12.0, &thresholds, &colors, TRACK), BLUE);
        assert_eq!(classify(25.0, &thresholds, &colors, TRACK), YELLOW);
        assert_eq!(classify(45.0, &thresholds, &colors, TRACK), RED);
    }

    #[test]
    fn test_fallback_chain() {
        let thresholds = DistanceThresholds::default();

        let no_tier3 = TierColors::new(Some(BLUE), Some(YELLOW), None);
        assert_eq!(classify(50.0, &thresholds, &no_tier3, TRACK), YELLOW);

        let only_tier1 = TierColors::new(Some(BLUE), None, None);
        assert_eq!(classify(50.0, &thresholds, &only_tier1, TRACK), BLUE);
        assert_eq!(classify(30.0, &thresholds, &only_tier1, TRACK), BLUE);

        let none = TierColors::default();
        assert_eq!(classify(50.0, &thresholds, &none, TRACK), TRACK);
    }

    #[test]
    fn test_fallback_never_goes_up() {
        let thresholds = DistanceThresholds::default();
        let only_tier3 = TierColors::new(None, None, Some(RED));
        assert_eq!(classify(15.0, &thresholds, &only_tier3, TRACK), TRACK);
        assert_eq!(classify(25.0, &thresholds, &only_tier3, TRACK), TRACK);
        assert_eq!(classify(45.0, &thresholds, &only_tier3, TRACK), RED);
    }

    #[test]
    fn test_threshold_validation() {
        assert!(DistanceThresholds::new(10.0, 21.1, 42.2).is_ok());
        assert!(matches!(
            DistanceThresholds::new(21.1, 10.0, 42.2),
            Err(PosterError::Config { .. })
        ));
        assert!(DistanceThresholds::new(10.0, 10.0, 42.2).is_err());
        assert!(DistanceThresholds::new(-1.0, 10.0, 42.2).is_err());
        assert!(DistanceThresholds::new(1.0, f64::NAN, 42.2).is_err());
    }

    #[test]
    fn test_thresholds_serde() {
        let t: DistanceThresholds = serde_json::from_str("[5, 10, 21.1]").unwrap();
        assert_eq!(t.limits(), [5.0, 10.0, 21.1]);
        assert!(serde_json::from_str::<DistanceThresholds>("[10, 5, 21.1]").is_err());
        assert_eq!(serde_json::to_string(&t).unwrap(), "[5.0,10.0,21.1]");
    }

    #[test]
    fn test_nan_distance_is_default_tier() {
        assert_eq!(DistanceThresholds::default().tier_for(f64::NAN), Tier::Default);
    }
}
