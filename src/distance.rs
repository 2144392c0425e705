//! Pairwise distance computation over cross-modal embedding batches.
//!
//! A batch holds 2N embeddings: N image embeddings stacked on top of their
//! N paired recipe embeddings. Distances are always computed between the two
//! halves, never within one modality.
//!
//! # Usage
//!
//! ```
//! use sabor::distance::cross_modal_distances;
//! use sabor::primitives::Matrix;
//!
//! // N = 2 images followed by N = 2 recipes, D = 2
//! let batch = Matrix::from_vec(4, 2, vec![
//!     0.0, 0.0,
//!     1.0, 0.0,
//!     0.0, 3.0,
//!     0.0, 4.0,
//! ]).unwrap();
//!
//! let dist = cross_modal_distances(&batch).unwrap();
//! assert_eq!(dist.shape(), (2, 2));
//! assert!((dist.get(0, 0) - 3.0).abs() < 1e-5);
//! ```

use crate::error::{Result, SaborError};
use crate::primitives::{Matrix, Vector};
use rayon::prelude::*;

/// Floor applied to squared distances before the square root.
///
/// Keeps the square root away from zero so downstream values stay finite.
pub const DISTANCE_FLOOR: f32 = 1e-12;

/// Epsilon added to row norms during feature normalization.
pub const NORM_EPSILON: f32 = 1e-12;

/// L2-normalizes each row of a feature matrix.
///
/// Each row is divided by its Euclidean norm plus [`NORM_EPSILON`], so
/// all-zero rows pass through unchanged instead of producing NaN.
///
/// # Example
///
/// ```
/// use sabor::distance::normalize_rows;
/// use sabor::primitives::Matrix;
///
/// let m = Matrix::from_vec(1, 2, vec![3.0, 4.0]).unwrap();
/// let unit = normalize_rows(&m);
/// assert!((unit.get(0, 0) - 0.6).abs() < 1e-6);
/// assert!((unit.get(0, 1) - 0.8).abs() < 1e-6);
/// ```
#[must_use]
pub fn normalize_rows(features: &Matrix<f32>) -> Matrix<f32> {
    let (rows, cols) = features.shape();
    let mut data = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        let r = features.row_slice(row);
        let norm = r.iter().map(|x| x * x).sum::<f32>().sqrt() + NORM_EPSILON;
        data.extend(r.iter().map(|x| x / norm));
    }
    Matrix::from_vec(rows, cols, data).expect("row-major data matches shape")
}

/// Computes the N×N Euclidean distance matrix between the two halves of a
/// (2N, D) embedding batch.
///
/// Entry (i, j) is the distance between image embedding i and recipe
/// embedding j, computed through the squared-norm expansion
/// `||x||² + ||y||² - 2*x*y` and clamped at [`DISTANCE_FLOOR`] before the
/// square root.
///
/// # Errors
///
/// Returns an error if the batch is empty or has an odd number of rows.
pub fn cross_modal_distances(features: &Matrix<f32>) -> Result<Matrix<f32>> {
    let (rows, dim) = features.shape();
    if rows == 0 {
        return Err(SaborError::EmptyBatch);
    }
    if rows % 2 != 0 {
        return Err(SaborError::OddBatchSize { rows });
    }
    let n = rows / 2;
    let (images, recipes) = features.as_slice().split_at(n * dim);

    let image_sq: Vec<f32> = (0..n)
        .map(|i| squared_norm(&images[i * dim..(i + 1) * dim]))
        .collect();
    let recipe_sq: Vec<f32> = (0..n)
        .map(|j| squared_norm(&recipes[j * dim..(j + 1) * dim]))
        .collect();

    let data: Vec<f32> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            let x = &images[i * dim..(i + 1) * dim];
            let x_sq = image_sq[i];
            let recipe_sq = &recipe_sq;
            (0..n).map(move |j| {
                let y = &recipes[j * dim..(j + 1) * dim];
                let dot: f32 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();
                let sq = x_sq + recipe_sq[j] - 2.0 * dot;
                sq.max(DISTANCE_FLOOR).sqrt()
            })
        })
        .collect();

    Ok(Matrix::from_vec(n, n, data).expect("n * n distances"))
}

/// Cosine similarity between two embeddings.
///
/// The denominator is floored at 1e-8 to avoid division by zero for
/// degenerate (all-zero) embeddings.
///
/// # Panics
///
/// Panics if the vectors have different lengths.
#[must_use]
pub fn cosine_similarity(a: &Vector<f32>, b: &Vector<f32>) -> f32 {
    assert_eq!(
        a.len(),
        b.len(),
        "Embeddings must have same dimension for cosine similarity"
    );
    let denom = (a.norm() * b.norm()).max(1e-8);
    a.dot(b) / denom
}

fn squared_norm(row: &[f32]) -> f32 {
    row.iter().map(|x| x * x).sum()
}

#[cfg(test)]
#[path = "distance_tests.rs"]
mod tests;
