use super::*;

fn batch_2x2() -> Matrix<f32> {
    // images: (0,0), (1,0); recipes: (0,3), (0,4)
    Matrix::from_vec(
        4,
        2,
        vec![0.0, 0.0, 1.0, 0.0, 0.0, 3.0, 0.0, 4.0],
    )
    .unwrap()
}

#[test]
fn test_hand_computed_distances() {
    let dist = cross_modal_distances(&batch_2x2()).unwrap();
    assert_eq!(dist.shape(), (2, 2));
    assert!((dist.get(0, 0) - 3.0).abs() < 1e-5);
    assert!((dist.get(0, 1) - 4.0).abs() < 1e-5);
    assert!((dist.get(1, 0) - 10.0_f32.sqrt()).abs() < 1e-5);
    assert!((dist.get(1, 1) - 17.0_f32.sqrt()).abs() < 1e-5);
}

#[test]
fn test_identical_halves_diagonal_near_zero() {
    // Anchor i and reference i are the same vector, so the diagonal collapses
    // to the stability floor.
    let batch = Matrix::from_vec(
        4,
        3,
        vec![
            1.0, 2.0, 3.0, -1.0, 0.5, 2.0, 1.0, 2.0, 3.0, -1.0, 0.5, 2.0,
        ],
    )
    .unwrap();
    let dist = cross_modal_distances(&batch).unwrap();
    assert!(dist.get(0, 0) < 1e-3);
    assert!(dist.get(1, 1) < 1e-3);
    // Off-diagonal entries stay genuinely positive.
    assert!(dist.get(0, 1) > 1.0);
}

#[test]
fn test_distances_respect_floor() {
    let batch = Matrix::zeros(6, 4);
    let dist = cross_modal_distances(&batch).unwrap();
    for &d in dist.as_slice() {
        assert!(d >= DISTANCE_FLOOR.sqrt());
        assert!(d.is_finite());
    }
}

#[test]
fn test_odd_batch_rejected() {
    let batch = Matrix::zeros(5, 4);
    let err = cross_modal_distances(&batch).unwrap_err();
    assert!(matches!(err, SaborError::OddBatchSize { rows: 5 }));
}

#[test]
fn test_empty_batch_rejected() {
    let batch = Matrix::zeros(0, 4);
    let err = cross_modal_distances(&batch).unwrap_err();
    assert!(matches!(err, SaborError::EmptyBatch));
}

#[test]
fn test_normalize_rows_unit_norm() {
    let m = Matrix::from_vec(2, 2, vec![3.0, 4.0, 0.0, 2.0]).unwrap();
    let unit = normalize_rows(&m);
    for row in 0..2 {
        let norm = unit.row(row).norm();
        assert!((norm - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_normalize_rows_zero_row_stays_finite() {
    let m = Matrix::from_vec(1, 3, vec![0.0, 0.0, 0.0]).unwrap();
    let unit = normalize_rows(&m);
    assert!(unit.as_slice().iter().all(|x| x.is_finite()));
}

#[test]
fn test_normalized_distances_bounded() {
    // Distances between unit vectors are at most 2.
    let batch = Matrix::from_vec(
        4,
        2,
        vec![5.0, 0.0, 0.0, -7.0, -3.0, 0.0, 0.0, 9.0],
    )
    .unwrap();
    let dist = cross_modal_distances(&normalize_rows(&batch)).unwrap();
    for &d in dist.as_slice() {
        assert!(d <= 2.0 + 1e-5);
    }
}

#[test]
fn test_cosine_similarity_basic() {
    let a = Vector::from_slice(&[1.0, 0.0]);
    let b = Vector::from_slice(&[0.0, 1.0]);
    assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
}

#[test]
#[should_panic(expected = "same dimension")]
fn test_cosine_similarity_mismatched() {
    let a = Vector::from_slice(&[1.0, 0.0]);
    let b = Vector::from_slice(&[1.0]);
    let _ = cosine_similarity(&a, &b);
}
