//! Triplet-style ranking losses over mined distance pairs.
//!
//! [`TripletLoss`] converts hardest-positive / hardest-negative distance
//! vectors into a scalar loss under one of three formulations, chosen
//! explicitly at construction through [`Formulation`]:
//!
//! - `Hinge`: classic margin ranking loss.
//! - `SoftMargin`: soft-margin ranking on the scaled distance gap.
//! - `Circle`: circle loss with asymmetric clamped pair weights.
//!
//! The module also hosts the batch drivers [`global_loss`] and
//! [`class_global_loss`], which chain normalization, distance computation,
//! mining, and the loss functor.
//!
//! # Usage
//!
//! ```
//! use sabor::loss::{global_loss, Formulation, TripletLoss};
//! use sabor::primitives::Matrix;
//!
//! let batch = Matrix::from_vec(4, 2, vec![
//!     1.0, 0.0,
//!     0.0, 1.0,
//!     0.9, 0.1,
//!     0.1, 0.9,
//! ]).unwrap();
//!
//! let tri = TripletLoss::new(Formulation::SoftMargin { margin: 0.0, gamma: 16.0 }).unwrap();
//! let outcome = global_loss(&tri, &batch, true).unwrap();
//! assert!(outcome.loss >= 0.0);
//! ```

use crate::distance::{cross_modal_distances, normalize_rows};
use crate::error::{Result, SaborError};
use crate::mining::{class_hard_mining, hard_mining, MinedPairs};
use crate::primitives::{Matrix, Vector};
use serde::{Deserialize, Serialize};

/// Loss formulation applied to mined (dist_ap, dist_an) pairs.
///
/// Each variant carries its own hyperparameters, so a formulation cannot be
/// constructed with a parameter missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Formulation {
    /// Classic margin ranking loss:
    /// `mean(max(0, dist_ap - dist_an + margin))`.
    Hinge {
        /// Minimum required gap between negative and positive distances
        margin: f32,
    },
    /// Soft-margin ranking on the scaled gap:
    /// `mean(softplus(gamma * (dist_ap - dist_an + margin)))`.
    SoftMargin {
        /// Additive margin inside the gap
        margin: f32,
        /// Scale factor applied before the softplus
        gamma: f32,
    },
    /// Circle loss: distances are rescaled by ½, weighted by asymmetric
    /// clamped factors around the targets `delta_p = m` and `delta_n = 1 - m`,
    /// then passed through a soft-margin ranking on
    /// `gamma * (logit_p - logit_n)`.
    Circle {
        /// Relaxation margin `m`, in [0, 1]
        relaxation: f32,
        /// Scale factor applied to the logit difference
        gamma: f32,
    },
}

impl Formulation {
    /// Short human-readable name of the formulation.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Formulation::Hinge { .. } => "Hinge",
            Formulation::SoftMargin { .. } => "SoftMargin",
            Formulation::Circle { .. } => "Circle",
        }
    }
}

/// Margin ranking loss: `mean(max(0, -target * (x1 - x2) + margin))`.
///
/// With a target of 1 and `(x1, x2) = (dist_an, dist_ap)` this is the
/// classic triplet hinge.
///
/// # Panics
///
/// Panics if the vectors are empty or have different lengths.
#[must_use]
pub fn margin_ranking_loss(x1: &Vector<f32>, x2: &Vector<f32>, target: f32, margin: f32) -> f32 {
    assert_eq!(
        x1.len(),
        x2.len(),
        "Ranking inputs must have same length"
    );
    assert!(!x1.is_empty(), "Ranking inputs must be non-empty");

    let hinges: Vec<f32> = x1
        .iter()
        .zip(x2.iter())
        .map(|(a, b)| (-target * (a - b) + margin).max(0.0))
        .collect();
    Vector::from_vec(hinges).mean()
}

/// Soft-margin ranking loss: `mean(ln(1 + exp(-target * score)))`.
///
/// Equivalent to a binary logistic loss on the score sign; evaluated through
/// a numerically stable softplus.
///
/// # Panics
///
/// Panics if the score vector is empty.
#[must_use]
pub fn soft_margin_loss(scores: &Vector<f32>, target: f32) -> f32 {
    assert!(!scores.is_empty(), "Score vector must be non-empty");
    let terms: Vec<f32> = scores.iter().map(|&s| softplus(-target * s)).collect();
    Vector::from_vec(terms).mean()
}

/// Numerically stable `ln(1 + exp(x))`.
fn softplus(x: f32) -> f32 {
    if x > 0.0 {
        x + (-x).exp().ln_1p()
    } else {
        x.exp().ln_1p()
    }
}

/// Triplet loss functor over mined distance pairs.
///
/// Holds one [`Formulation`] fixed at construction.
///
/// # Examples
///
/// ```
/// use sabor::loss::{Formulation, TripletLoss};
/// use sabor::primitives::Vector;
///
/// let tri = TripletLoss::new(Formulation::Hinge { margin: 0.3 }).unwrap();
/// let dist_ap = Vector::from_slice(&[0.2, 0.1]);
/// let dist_an = Vector::from_slice(&[1.0, 0.9]);
///
/// // Negatives are well separated, so the hinge is inactive.
/// assert_eq!(tri.compute(&dist_ap, &dist_an), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripletLoss {
    formulation: Formulation,
}

impl TripletLoss {
    /// Creates a loss functor, validating the formulation's hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns [`SaborError::InvalidHyperparameter`] when a margin is
    /// negative or non-finite, a scale factor is not strictly positive, or
    /// the circle relaxation lies outside [0, 1].
    pub fn new(formulation: Formulation) -> Result<Self> {
        match formulation {
            Formulation::Hinge { margin } => {
                require(margin.is_finite() && margin >= 0.0, "margin", margin, "margin >= 0")?;
            }
            Formulation::SoftMargin { margin, gamma } => {
                require(margin.is_finite() && margin >= 0.0, "margin", margin, "margin >= 0")?;
                require(gamma.is_finite() && gamma > 0.0, "gamma", gamma, "gamma > 0")?;
            }
            Formulation::Circle { relaxation, gamma } => {
                require(
                    (0.0..=1.0).contains(&relaxation),
                    "relaxation",
                    relaxation,
                    "0 <= relaxation <= 1",
                )?;
                require(gamma.is_finite() && gamma > 0.0, "gamma", gamma, "gamma > 0")?;
            }
        }
        Ok(Self { formulation })
    }

    /// Returns the configured formulation.
    #[must_use]
    pub fn formulation(&self) -> Formulation {
        self.formulation
    }

    /// Computes the scalar loss for mined distance vectors.
    ///
    /// # Panics
    ///
    /// Panics if the vectors are empty or have different lengths.
    #[must_use]
    pub fn compute(&self, dist_ap: &Vector<f32>, dist_an: &Vector<f32>) -> f32 {
        assert_eq!(
            dist_ap.len(),
            dist_an.len(),
            "Distance vectors must have same length"
        );
        assert!(!dist_ap.is_empty(), "Distance vectors must be non-empty");

        match self.formulation {
            Formulation::Hinge { margin } => {
                margin_ranking_loss(dist_an, dist_ap, 1.0, margin)
            }
            Formulation::SoftMargin { margin, gamma } => {
                let scores: Vec<f32> = dist_ap
                    .iter()
                    .zip(dist_an.iter())
                    .map(|(ap, an)| gamma * (ap - an + margin))
                    .collect();
                soft_margin_loss(&Vector::from_vec(scores), -1.0)
            }
            Formulation::Circle { relaxation, gamma } => {
                circle_scores(dist_ap, dist_an, relaxation, gamma)
            }
        }
    }
}

/// Circle-loss logit construction over halved distances.
///
/// Distances are rescaled by ½ so normalized embeddings land in [0, 1].
/// The positive term is weighted by `max(d_ap + m, 0)` against the target
/// `delta_p = m`, the negative term by `max(1 + m - d_an, 0)` against
/// `delta_n = 1 - m`; the loss grows when positives drift past their target
/// or negatives fall short of theirs.
fn circle_scores(dist_ap: &Vector<f32>, dist_an: &Vector<f32>, m: f32, gamma: f32) -> f32 {
    let delta_p = m;
    let delta_n = 1.0 - m;
    let scores: Vec<f32> = dist_ap
        .iter()
        .zip(dist_an.iter())
        .map(|(ap, an)| {
            let ap = ap / 2.0;
            let an = an / 2.0;
            let alpha_p = (ap + m).max(0.0);
            let alpha_n = (-an + m + 1.0).max(0.0);
            let logit_p = alpha_p * (ap - delta_p);
            let logit_n = alpha_n * (an - delta_n);
            gamma * (logit_p - logit_n)
        })
        .collect();
    soft_margin_loss(&Vector::from_vec(scores), -1.0)
}

fn require(ok: bool, param: &str, value: f32, constraint: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(SaborError::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        })
    }
}

/// Scalar loss plus the raw distance and mining tensors for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentOutcome {
    /// Scalar batch loss
    pub loss: f32,
    /// Hardest-positive distance per mining row (length 2N)
    pub dist_ap: Vector<f32>,
    /// Hardest-negative distance per mining row (length 2N)
    pub dist_an: Vector<f32>,
    /// N×N image-to-recipe distance matrix
    pub distances: Matrix<f32>,
    /// Reference index of the selected positive per mining row
    pub positive_indices: Vec<usize>,
    /// Reference index of the selected negative per mining row
    pub negative_indices: Vec<usize>,
}

/// Batch driver with index-based mining: sample i's positive is the paired
/// sample i in the other modality half.
///
/// Optionally L2-normalizes features first, then computes cross-modal
/// distances, mines hardest pairs in both query directions, and applies the
/// loss functor.
///
/// # Errors
///
/// Propagates distance errors (empty or odd batch) and mining errors (N < 2).
pub fn global_loss(
    tri_loss: &TripletLoss,
    features: &Matrix<f32>,
    normalize_features: bool,
) -> Result<AlignmentOutcome> {
    let distances = batch_distances(features, normalize_features)?;
    let mined = hard_mining(&distances)?;
    Ok(finish(tri_loss, distances, mined))
}

/// Batch driver with class-based mining: positive/negative membership is
/// decided by class labels, so many-to-one groupings are honored.
///
/// # Errors
///
/// Propagates distance errors plus class-mining errors (label length
/// mismatch, rows without positives or negatives).
pub fn class_global_loss(
    tri_loss: &TripletLoss,
    features: &Matrix<f32>,
    image_classes: &[usize],
    recipe_classes: &[usize],
    normalize_features: bool,
) -> Result<AlignmentOutcome> {
    let distances = batch_distances(features, normalize_features)?;
    let mined = class_hard_mining(&distances, image_classes, recipe_classes)?;
    Ok(finish(tri_loss, distances, mined))
}

fn batch_distances(features: &Matrix<f32>, normalize_features: bool) -> Result<Matrix<f32>> {
    if normalize_features {
        cross_modal_distances(&normalize_rows(features))
    } else {
        cross_modal_distances(features)
    }
}

fn finish(tri_loss: &TripletLoss, distances: Matrix<f32>, mined: MinedPairs) -> AlignmentOutcome {
    let loss = tri_loss.compute(&mined.dist_ap, &mined.dist_an);
    AlignmentOutcome {
        loss,
        dist_ap: mined.dist_ap,
        dist_an: mined.dist_an,
        distances,
        positive_indices: mined.positive_indices,
        negative_indices: mined.negative_indices,
    }
}


#[cfg(test)]
#[path = "tests_contract.rs"]
mod contract;
