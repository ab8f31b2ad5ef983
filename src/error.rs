// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the pose visualization library.
//!
//! Only external collaborators (frame sources, pose estimators, draw backends) produce
//! errors. Degenerate numeric input inside the renderers is guarded locally and never
//! surfaces here.

use std::fmt;

/// Result type alias for pose visualization operations.
pub type Result<T> = std::result::Result<T, VizError>;

/// Main error type for the pose visualization library.
#[derive(Debug)]
pub enum VizError {
    /// Error decoding or converting images.
    ImageError(String),
    /// Wrapped `std::io::Error`.
    Io(std::io::Error),
    /// Invalid configuration provided.
    ConfigError(String),
    /// Frame source failure (missing file, unsupported pixel format, empty directory).
    SourceError(String),
    /// Pose estimator failure.
    InferenceError(String),
    /// Draw backend failure (texture upload, unknown texture).
    BackendError(String),
    /// Malformed recorded pose data.
    PoseDataError(String),
    /// Window / viewer error.
    VisualizerError(String),
}

impl fmt::Display for VizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
            Self::SourceError(msg) => write!(f, "Source error: {msg}"),
            Self::InferenceError(msg) => write!(f, "Inference error: {msg}"),
            Self::BackendError(msg) => write!(f, "Backend error: {msg}"),
            Self::PoseDataError(msg) => write!(f, "Pose data error: {msg}"),
            Self::VisualizerError(msg) => write!(f, "Visualizer error: {msg}"),
        }
    }
}

impl std::error::Error for VizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VizError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<image::ImageError> for VizError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageError(err.to_string())
    }
}

impl From<serde_json::Error> for VizError {
    fn from(err: serde_json::Error) -> Self {
        Self::PoseDataError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VizError::SourceError("test".to_string());
        assert_eq!(err.to_string(), "Source error: test");

        let err = VizError::BackendError("test".to_string());
        assert_eq!(err.to_string(), "Backend error: test");
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error;

        let err = VizError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("gone"));

        let err = VizError::ConfigError("bad".to_string());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_from_json_error() {
        let parse = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err = VizError::from(parse);
        assert!(matches!(err, VizError::PoseDataError(_)));
    }
}
