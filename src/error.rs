//! Unified error handling for the track-poster library.
//!
//! Parameter errors are raised eagerly while building configuration, layout
//! errors abort the poster currently being rendered. An empty track set is
//! not an error; see [`crate::poster::RenderOutcome::NoTracks`].

use thiserror::Error;

/// Unified error type for track-poster operations.
#[derive(Debug, Error)]
pub enum PosterError {
    /// Malformed user-supplied parameter (e.g. an unparsable year range)
    #[error("Invalid parameter: {message}")]
    Parameter { message: String },

    /// No grid or poster layout can be computed
    #[error("Unable to compute layout: {message}")]
    Layout { message: String },

    /// Invalid configuration value (colors, thresholds, canvas size)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Track has too few usable GPS points
    #[error("Track '{track_id}' has {point_count} usable points, minimum {minimum_required} required")]
    InsufficientPoints {
        track_id: String,
        point_count: usize,
        minimum_required: usize,
    },

    /// I/O failure in the command-line front end
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON input/output failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PosterError {
    pub fn parameter(message: impl Into<String>) -> Self {
        PosterError::Parameter {
            message: message.into(),
        }
    }

    pub fn layout(message: impl Into<String>) -> Self {
        PosterError::Layout {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        PosterError::Config {
            message: message.into(),
        }
    }

    /// True for errors caused by user input rather than by rendering.
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            PosterError::Parameter { .. } | PosterError::Config { .. }
        )
    }
}

/// Result type alias for track-poster operations.
pub type Result<T> = std::result::Result<T, PosterError>;

/// Extension trait for converting Option to PosterError.
pub trait OptionExt<T> {
    /// Convert Option to Result with a layout error.
    fn ok_or_layout(self, message: &str) -> Result<T>;

    /// Convert Option to Result with a parameter error.
    fn ok_or_parameter(self, message: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_layout(self, message: &str) -> Result<T> {
        self.ok_or_else(|| PosterError::layout(message))
    }

    fn ok_or_parameter(self, message: &str) -> Result<T> {
        self.ok_or_else(|| PosterError::parameter(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PosterError::InsufficientPoints {
            track_id: "morning-run".to_string(),
            point_count: 1,
            minimum_required: 2,
        };
        assert!(err.to_string().contains("morning-run"));
        assert!(err.to_string().contains("1 usable points"));

        let err = PosterError::parameter("year range '20x1'");
        assert_eq!(err.to_string(), "Invalid parameter: year range '20x1'");
    }

    #[test]
    fn test_option_ext() {
        let none: Option<i32> = None;
        let result = none.ok_or_layout("no cells");
        assert!(matches!(result, Err(PosterError::Layout { .. })));

        let some = Some(3).ok_or_parameter("unused");
        assert_eq!(some.unwrap(), 3);
    }

    #[test]
    fn test_parameter_classification() {
        assert!(PosterError::parameter("x").is_parameter_error());
        assert!(PosterError::config("x").is_parameter_error());
        assert!(!PosterError::layout("x").is_parameter_error());
    }
}
