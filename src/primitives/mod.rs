//! Core compute primitives (Vector, Matrix).
//!
//! These types carry embedding batches, distance matrices, and mined
//! distance vectors through the loss pipeline.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
