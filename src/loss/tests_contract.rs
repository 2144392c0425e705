// =========================================================================
// FALSIFY-TL: triplet loss pipeline contract
//
// Properties a ranking loss over mined distances must not violate:
//   - soft-margin loss is monotonically increasing in dist_ap - dist_an
//   - hinge loss is non-negative and exactly zero once the margin holds
//   - circle loss stays finite over the reachable distance range
//   - the full pipeline yields 2N finite, non-negative mined distances
// =========================================================================

use super::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

proptest! {
    /// FALSIFY-TL-001: soft-margin loss grows with the positive distance
    #[test]
    fn falsify_tl_001_soft_margin_monotonic(
        ap in 0.0f32..4.0,
        an in 0.0f32..4.0,
        bump in 0.01f32..2.0,
    ) {
        let tri = TripletLoss::new(Formulation::SoftMargin { margin: 0.0, gamma: 4.0 }).unwrap();
        let base = tri.compute(&Vector::from_slice(&[ap]), &Vector::from_slice(&[an]));
        let bumped = tri.compute(&Vector::from_slice(&[ap + bump]), &Vector::from_slice(&[an]));
        prop_assert!(
            bumped >= base,
            "FALSIFIED TL-001: loss({}, {an})={bumped} < loss({ap}, {an})={base}",
            ap + bump
        );
    }

    /// FALSIFY-TL-002: hinge loss is non-negative and zero when separated
    #[test]
    fn falsify_tl_002_hinge_bounds(
        ap in 0.0f32..4.0,
        gap in 0.0f32..4.0,
        margin in 0.0f32..1.0,
    ) {
        let tri = TripletLoss::new(Formulation::Hinge { margin }).unwrap();
        let an = ap + margin + gap;
        let loss = tri.compute(&Vector::from_slice(&[ap]), &Vector::from_slice(&[an]));
        prop_assert!(
            loss.abs() < 1e-5,
            "FALSIFIED TL-002: separated pair produced loss {loss}"
        );

        let violated = tri.compute(&Vector::from_slice(&[an]), &Vector::from_slice(&[ap]));
        prop_assert!(violated >= 0.0, "FALSIFIED TL-002: negative loss {violated}");
    }

    /// FALSIFY-TL-003: circle loss is finite over the normalized range
    #[test]
    fn falsify_tl_003_circle_finite(
        ap in 0.0f32..2.0,
        an in 0.0f32..2.0,
        relaxation in 0.0f32..1.0,
    ) {
        let tri = TripletLoss::new(Formulation::Circle { relaxation, gamma: 16.0 }).unwrap();
        let loss = tri.compute(&Vector::from_slice(&[ap]), &Vector::from_slice(&[an]));
        prop_assert!(loss.is_finite(), "FALSIFIED TL-003: loss {loss} for ap={ap}, an={an}");
        prop_assert!(loss >= 0.0, "FALSIFIED TL-003: softplus output {loss} < 0");
    }

    /// FALSIFY-TL-004: pipeline mines 2N finite non-negative distances
    #[test]
    fn falsify_tl_004_pipeline_shapes(
        n in 2usize..6,
        dim in 1usize..8,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let data: Vec<f32> = (0..2 * n * dim).map(|_| rng.gen_range(-1.0f32..1.0)).collect();
        let batch = Matrix::from_vec(2 * n, dim, data).unwrap();

        let tri = TripletLoss::new(Formulation::SoftMargin { margin: 0.0, gamma: 16.0 }).unwrap();
        let outcome = global_loss(&tri, &batch, true).unwrap();

        prop_assert_eq!(outcome.dist_ap.len(), 2 * n);
        prop_assert_eq!(outcome.dist_an.len(), 2 * n);
        prop_assert!(outcome.loss.is_finite());
        for row in 0..2 * n {
            prop_assert!(outcome.dist_ap[row] >= 0.0);
            prop_assert!(outcome.dist_an[row] >= 0.0);
        }
    }
}
