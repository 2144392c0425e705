//! Hard-example mining over cross-modal distance matrices.
//!
//! Given the N×N image-to-recipe distance matrix, mining runs in both query
//! directions: the matrix is stacked with its transpose into 2N rows, where
//! rows 0..N anchor at images (references are recipes) and rows N..2N anchor
//! at recipes (references are images). For each row the hardest positive
//! (maximum intra-class distance) and hardest negative (minimum inter-class
//! distance) are selected.
//!
//! Two membership rules are supported:
//!
//! - [`hard_mining`]: sample i's only positive is the paired sample i in the
//!   other half; every other reference is a negative.
//! - [`class_hard_mining`]: membership is decided by class-label equality,
//!   so several references may be positives for one anchor.
//!
//! # Usage
//!
//! ```
//! use sabor::mining::hard_mining;
//! use sabor::primitives::Matrix;
//!
//! let dist = Matrix::from_vec(2, 2, vec![0.1, 2.0, 3.0, 0.2]).unwrap();
//! let mined = hard_mining(&dist).unwrap();
//!
//! // 2N = 4 mining rows
//! assert_eq!(mined.dist_ap.len(), 4);
//! assert!((mined.dist_ap[0] - 0.1).abs() < 1e-6);
//! assert!((mined.dist_an[0] - 2.0).abs() < 1e-6);
//! ```

use crate::error::{Result, SaborError};
use crate::primitives::{Matrix, Vector};
use rayon::prelude::*;

/// Hardest positive/negative distances selected per mining row, plus the
/// reference indices that produced them.
///
/// All fields have length 2N; indices refer to positions within the
/// reference half (0..N) of the corresponding row.
#[derive(Debug, Clone, PartialEq)]
pub struct MinedPairs {
    /// Distance from each anchor to its hardest (farthest) positive.
    pub dist_ap: Vector<f32>,
    /// Distance from each anchor to its hardest (closest) negative.
    pub dist_an: Vector<f32>,
    /// Reference index of the selected positive per row.
    pub positive_indices: Vec<usize>,
    /// Reference index of the selected negative per row.
    pub negative_indices: Vec<usize>,
}

struct RowPick {
    dist_ap: f32,
    dist_an: f32,
    positive: usize,
    negative: usize,
}

/// Index-based hard mining: positive of anchor i is exactly reference i.
///
/// # Errors
///
/// Returns an error if the matrix is not square, or if N < 2 (a single pair
/// leaves no negative to mine).
pub fn hard_mining(distances: &Matrix<f32>) -> Result<MinedPairs> {
    let n = require_square(distances)?;
    if n < 2 {
        return Err(SaborError::EmptyMiningSet {
            anchor: 0,
            role: "negative",
        });
    }
    let stacked = stack_with_transpose(distances);

    let picks: Vec<RowPick> = (0..2 * n)
        .into_par_iter()
        .map(|row| {
            let refs = stacked.row_slice(row);
            let anchor = row % n;
            let mut negative = usize::from(anchor == 0);
            let mut dist_an = refs[negative];
            for (j, &d) in refs.iter().enumerate() {
                if j != anchor && d < dist_an {
                    dist_an = d;
                    negative = j;
                }
            }
            RowPick {
                dist_ap: refs[anchor],
                dist_an,
                positive: anchor,
                negative,
            }
        })
        .collect();

    Ok(collect_picks(picks))
}

/// Class-based hard mining: membership is decided by class-label equality.
///
/// Rows 0..N anchor at images: row i carries `image_classes[i]` and
/// reference j is a positive when `recipe_classes[j]` matches it. Rows
/// N..2N anchor at recipes with the roles swapped. Multiple references may
/// share the anchor's class (many-to-one grouping).
///
/// # Errors
///
/// Returns an error if the matrix is not square, if a label slice length
/// differs from N, or if any row ends up with zero positives or zero
/// negatives.
pub fn class_hard_mining(
    distances: &Matrix<f32>,
    image_classes: &[usize],
    recipe_classes: &[usize],
) -> Result<MinedPairs> {
    let n = require_square(distances)?;
    for (name, labels) in [("image", image_classes), ("recipe", recipe_classes)] {
        if labels.len() != n {
            return Err(SaborError::DimensionMismatch {
                expected: format!("{n} {name} class labels"),
                actual: labels.len().to_string(),
            });
        }
    }
    let stacked = stack_with_transpose(distances);

    let picks: Vec<RowPick> = (0..2 * n)
        .into_par_iter()
        .map(|row| -> Result<RowPick> {
            let refs = stacked.row_slice(row);
            let (anchor_class, reference_classes) = if row < n {
                (image_classes[row], recipe_classes)
            } else {
                (recipe_classes[row - n], image_classes)
            };

            let mut hardest_pos: Option<(usize, f32)> = None;
            let mut hardest_neg: Option<(usize, f32)> = None;
            for (j, &d) in refs.iter().enumerate() {
                if reference_classes[j] == anchor_class {
                    if hardest_pos.map_or(true, |(_, best)| d > best) {
                        hardest_pos = Some((j, d));
                    }
                } else if hardest_neg.map_or(true, |(_, best)| d < best) {
                    hardest_neg = Some((j, d));
                }
            }

            let (positive, dist_ap) = hardest_pos.ok_or(SaborError::EmptyMiningSet {
                anchor: row,
                role: "positive",
            })?;
            let (negative, dist_an) = hardest_neg.ok_or(SaborError::EmptyMiningSet {
                anchor: row,
                role: "negative",
            })?;
            Ok(RowPick {
                dist_ap,
                dist_an,
                positive,
                negative,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(collect_picks(picks))
}

/// Stacks the distance matrix on top of its transpose, producing the 2N
/// mining rows covering both query directions.
fn stack_with_transpose(distances: &Matrix<f32>) -> Matrix<f32> {
    let (n, _) = distances.shape();
    let mut data = Vec::with_capacity(2 * n * n);
    data.extend_from_slice(distances.as_slice());
    data.extend_from_slice(distances.transpose().as_slice());
    Matrix::from_vec(2 * n, n, data).expect("stacked data matches shape")
}

fn require_square(distances: &Matrix<f32>) -> Result<usize> {
    let (rows, cols) = distances.shape();
    if rows != cols {
        return Err(SaborError::DimensionMismatch {
            expected: format!("{rows}x{rows}"),
            actual: format!("{rows}x{cols}"),
        });
    }
    Ok(rows)
}

fn collect_picks(picks: Vec<RowPick>) -> MinedPairs {
    let mut dist_ap = Vec::with_capacity(picks.len());
    let mut dist_an = Vec::with_capacity(picks.len());
    let mut positive_indices = Vec::with_capacity(picks.len());
    let mut negative_indices = Vec::with_capacity(picks.len());
    for pick in picks {
        dist_ap.push(pick.dist_ap);
        dist_an.push(pick.dist_an);
        positive_indices.push(pick.positive);
        negative_indices.push(pick.negative);
    }
    MinedPairs {
        dist_ap: Vector::from_vec(dist_ap),
        dist_an: Vector::from_vec(dist_an),
        positive_indices,
        negative_indices,
    }
}

#[cfg(test)]
mod tests;
