//! Convenience re-exports of the common Sabor surface.
//!
//! ```
//! use sabor::prelude::*;
//! ```

pub use crate::config::AlignmentConfig;
pub use crate::distance::{cross_modal_distances, normalize_rows};
pub use crate::error::{Result, SaborError};
pub use crate::loss::{
    class_global_loss, global_loss, AlignmentOutcome, Formulation, TripletLoss,
};
pub use crate::mining::{class_hard_mining, hard_mining, MinedPairs};
pub use crate::primitives::{Matrix, Vector};
