//! Sabor: metric-learning losses for cross-modal recipe/image alignment.
//!
//! Sabor computes triplet-style ranking losses with batch-level hard-example
//! mining for models that embed food images and recipe text into a shared
//! vector space. A batch holds 2N embeddings (N images stacked on N paired
//! recipes); the crate computes cross-modal distances, mines the hardest
//! positive and negative per anchor in both query directions, and reduces the
//! mined pairs to a scalar loss under a hinge, soft-margin, or circle
//! formulation.
//!
//! Values are forward-pass numerics only; gradient propagation belongs to
//! the training runtime that consumes the loss.
//!
//! # Quick Start
//!
//! ```
//! use sabor::prelude::*;
//!
//! // N = 2 image embeddings stacked on their paired recipe embeddings
//! let batch = Matrix::from_vec(4, 2, vec![
//!     1.0, 0.0,
//!     0.0, 1.0,
//!     0.9, 0.1,
//!     0.1, 0.9,
//! ]).unwrap();
//!
//! let tri = TripletLoss::new(Formulation::SoftMargin { margin: 0.0, gamma: 16.0 }).unwrap();
//! let outcome = global_loss(&tri, &batch, true).unwrap();
//!
//! assert!(outcome.loss >= 0.0);
//! assert_eq!(outcome.dist_ap.len(), 4);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`distance`]: Cross-modal Euclidean distances and feature normalization
//! - [`mining`]: Index-based and class-based hard-example mining
//! - [`loss`]: Ranking formulations and the batch loss drivers
//! - [`config`]: Explicit per-experiment loss configuration

pub mod config;
pub mod distance;
pub mod error;
pub mod loss;
pub mod mining;
pub mod prelude;
pub mod primitives;

pub use config::AlignmentConfig;
pub use error::{Result, SaborError};
pub use loss::{class_global_loss, global_loss, AlignmentOutcome, Formulation, TripletLoss};
pub use mining::MinedPairs;
pub use primitives::{Matrix, Vector};
