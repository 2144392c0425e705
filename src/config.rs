//! Explicit alignment configuration.
//!
//! The training surface this crate serves historically read a flat global
//! option set at import time. Here the knobs that matter to the loss are
//! gathered into [`AlignmentConfig`], constructed explicitly and passed to
//! the components that need it. The struct serializes with serde so an
//! experiment's loss configuration can be recorded alongside its results.
//!
//! # Usage
//!
//! ```
//! use sabor::config::AlignmentConfig;
//! use sabor::loss::Formulation;
//! use sabor::primitives::Matrix;
//!
//! let config = AlignmentConfig::new(Formulation::SoftMargin { margin: 0.0, gamma: 16.0 })
//!     .with_normalize_features(true)
//!     .with_embedding_dim(2);
//!
//! let batch = Matrix::from_vec(4, 2, vec![
//!     1.0, 0.0,
//!     0.0, 1.0,
//!     0.9, 0.1,
//!     0.1, 0.9,
//! ]).unwrap();
//!
//! let outcome = config.alignment_loss(&batch).unwrap();
//! assert!(outcome.loss >= 0.0);
//! ```

use crate::error::{Result, SaborError};
use crate::loss::{class_global_loss, global_loss, AlignmentOutcome, Formulation, TripletLoss};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};

/// Loss-side configuration for one alignment experiment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Which ranking formulation to apply to mined pairs
    pub formulation: Formulation,
    /// L2-normalize embeddings before computing distances
    pub normalize_features: bool,
    /// Expected embedding dimension; batches are validated against it when set
    pub embedding_dim: Option<usize>,
}

impl AlignmentConfig {
    /// Creates a configuration with the given formulation, no feature
    /// normalization, and no dimension check.
    #[must_use]
    pub fn new(formulation: Formulation) -> Self {
        Self {
            formulation,
            normalize_features: false,
            embedding_dim: None,
        }
    }

    /// Toggles L2 feature normalization.
    #[must_use]
    pub fn with_normalize_features(mut self, normalize: bool) -> Self {
        self.normalize_features = normalize;
        self
    }

    /// Sets the expected embedding dimension.
    #[must_use]
    pub fn with_embedding_dim(mut self, dim: usize) -> Self {
        self.embedding_dim = Some(dim);
        self
    }

    /// Builds the loss functor, validating hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns [`SaborError::InvalidHyperparameter`] for out-of-range
    /// formulation parameters.
    pub fn build_loss(&self) -> Result<TripletLoss> {
        TripletLoss::new(self.formulation)
    }

    /// Runs the index-mined alignment loss over a batch.
    ///
    /// # Errors
    ///
    /// Propagates hyperparameter, batch-shape, and mining errors.
    pub fn alignment_loss(&self, features: &Matrix<f32>) -> Result<AlignmentOutcome> {
        self.check_dim(features)?;
        let tri = self.build_loss()?;
        global_loss(&tri, features, self.normalize_features)
    }

    /// Runs the class-mined alignment loss over a batch.
    ///
    /// # Errors
    ///
    /// Propagates hyperparameter, batch-shape, label, and mining errors.
    pub fn class_alignment_loss(
        &self,
        features: &Matrix<f32>,
        image_classes: &[usize],
        recipe_classes: &[usize],
    ) -> Result<AlignmentOutcome> {
        self.check_dim(features)?;
        let tri = self.build_loss()?;
        class_global_loss(
            &tri,
            features,
            image_classes,
            recipe_classes,
            self.normalize_features,
        )
    }

    fn check_dim(&self, features: &Matrix<f32>) -> Result<()> {
        if let Some(dim) = self.embedding_dim {
            let (rows, cols) = features.shape();
            if cols != dim {
                return Err(SaborError::DimensionMismatch {
                    expected: format!("{rows}x{dim}"),
                    actual: format!("{rows}x{cols}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for AlignmentConfig {
    /// Soft-margin formulation with the historical training defaults
    /// (margin 0.0, gamma 16.0), no normalization.
    fn default() -> Self {
        Self::new(Formulation::SoftMargin {
            margin: 0.0,
            gamma: 16.0,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
