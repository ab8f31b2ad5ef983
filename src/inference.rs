// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose estimator interface and a replay implementation.
//!
//! The pipeline only needs a [`PoseEstimator`]: something that turns a preprocessed input
//! tensor into a [`PoseResult`]. [`ReplayEstimator`] plays back recorded results from a
//! JSON file, which drives the renderers without a neural network runtime.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::Array4;

use crate::error::{Result, VizError};
use crate::pose::PoseResult;
use crate::verbose;

/// Default network input size `(height, width)`.
pub const DEFAULT_INPUT_SIZE: (usize, usize) = (256, 448);

/// A pose estimation model.
pub trait PoseEstimator {
    /// Expected input tensor size `(height, width)`.
    fn input_size(&self) -> (usize, usize);

    /// Run the model on a `(1, H, W, 3)` tensor.
    ///
    /// # Errors
    ///
    /// Returns an error if the input has the wrong shape or the model fails.
    fn estimate(&mut self, input: &Array4<f32>) -> Result<PoseResult>;
}

impl<E: PoseEstimator + ?Sized> PoseEstimator for Box<E> {
    fn input_size(&self) -> (usize, usize) {
        (**self).input_size()
    }

    fn estimate(&mut self, input: &Array4<f32>) -> Result<PoseResult> {
        (**self).estimate(input)
    }
}

/// Check that `input` is a `(1, h, w, 3)` tensor.
///
/// # Errors
///
/// Returns [`VizError::InferenceError`] on any other shape.
pub fn check_input_shape(input: &Array4<f32>, input_size: (usize, usize)) -> Result<()> {
    let (h, w) = input_size;
    if input.shape() == [1, h, w, 3].as_slice() {
        Ok(())
    } else {
        Err(VizError::InferenceError(format!(
            "Expected input shape [1, {h}, {w}, 3], got {:?}",
            input.shape()
        )))
    }
}

/// Plays back recorded pose results in order, starting over after the last one.
#[derive(Debug, Clone)]
pub struct ReplayEstimator {
    results: Vec<PoseResult>,
    cursor: usize,
    input_size: (usize, usize),
}

impl ReplayEstimator {
    /// Load a JSON array of pose results.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or holds no results.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            VizError::PoseDataError(format!("Failed to open {}: {e}", path.display()))
        })?;
        let results: Vec<PoseResult> = serde_json::from_reader(BufReader::new(file))?;
        verbose!("Loaded {} recorded pose results from {}", results.len(), path.display());
        Self::from_results(results)
    }

    /// Play back `results`.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::PoseDataError`] if `results` is empty.
    pub fn from_results(results: Vec<PoseResult>) -> Result<Self> {
        if results.is_empty() {
            return Err(VizError::PoseDataError("no pose results to replay".to_string()));
        }
        Ok(Self {
            results,
            cursor: 0,
            input_size: DEFAULT_INPUT_SIZE,
        })
    }

    /// Declare a different input size `(height, width)`.
    #[must_use]
    pub const fn with_input_size(mut self, height: usize, width: usize) -> Self {
        self.input_size = (height, width);
        self
    }

    /// Number of recorded results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether there are no recorded results. Always `false` once constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl PoseEstimator for ReplayEstimator {
    fn input_size(&self) -> (usize, usize) {
        self.input_size
    }

    fn estimate(&mut self, input: &Array4<f32>) -> Result<PoseResult> {
        check_input_shape(input, self.input_size)?;
        let result = self.results[self.cursor % self.results.len()].clone();
        self.cursor = (self.cursor + 1) % self.results.len();
        Ok(result)
    }
}
