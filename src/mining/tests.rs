use super::*;

fn sample_distances() -> Matrix<f32> {
    Matrix::from_vec(
        4,
        4,
        vec![
            1.0, 2.0, 5.0, 4.0, //
            3.0, 0.5, 6.0, 7.0, //
            8.0, 9.0, 0.3, 2.5, //
            4.5, 5.5, 1.5, 0.7,
        ],
    )
    .unwrap()
}

#[test]
fn test_hard_mining_output_length() {
    let mined = hard_mining(&sample_distances()).unwrap();
    assert_eq!(mined.dist_ap.len(), 8);
    assert_eq!(mined.dist_an.len(), 8);
    assert_eq!(mined.positive_indices.len(), 8);
    assert_eq!(mined.negative_indices.len(), 8);
}

#[test]
fn test_hard_mining_positive_is_diagonal() {
    let mined = hard_mining(&sample_distances()).unwrap();
    // Image-anchored rows read the diagonal of the matrix, recipe-anchored
    // rows read the diagonal of its transpose (the same values).
    let expected_ap = [1.0, 0.5, 0.3, 0.7, 1.0, 0.5, 0.3, 0.7];
    for (row, &expected) in expected_ap.iter().enumerate() {
        assert!((mined.dist_ap[row] - expected).abs() < 1e-6, "row {row}");
        assert_eq!(mined.positive_indices[row], row % 4);
    }
}

#[test]
fn test_hard_mining_negative_is_row_minimum_off_diagonal() {
    let mined = hard_mining(&sample_distances()).unwrap();
    let expected_an = [2.0, 3.0, 2.5, 1.5, 3.0, 2.0, 1.5, 2.5];
    let expected_idx = [1, 0, 3, 2, 1, 0, 3, 2];
    for row in 0..8 {
        assert!(
            (mined.dist_an[row] - expected_an[row]).abs() < 1e-6,
            "row {row}"
        );
        assert_eq!(mined.negative_indices[row], expected_idx[row], "row {row}");
    }
}

#[test]
fn test_hard_mining_single_pair_has_no_negative() {
    let dist = Matrix::from_vec(1, 1, vec![0.5]).unwrap();
    let err = hard_mining(&dist).unwrap_err();
    assert!(matches!(
        err,
        SaborError::EmptyMiningSet {
            role: "negative",
            ..
        }
    ));
}

#[test]
fn test_hard_mining_rejects_non_square() {
    let dist = Matrix::zeros(2, 3);
    let err = hard_mining(&dist).unwrap_err();
    assert!(matches!(err, SaborError::DimensionMismatch { .. }));
}

#[test]
fn test_class_mining_hand_computed() {
    let classes = [0, 0, 1, 1];
    let mined = class_hard_mining(&sample_distances(), &classes, &classes).unwrap();

    let expected_ap = [2.0, 3.0, 2.5, 1.5, 3.0, 2.0, 1.5, 2.5];
    let expected_p_idx = [1, 0, 3, 2, 1, 0, 3, 2];
    let expected_an = [4.0, 6.0, 8.0, 4.5, 4.5, 5.5, 5.0, 4.0];
    let expected_n_idx = [3, 2, 0, 0, 3, 3, 0, 0];

    for row in 0..8 {
        assert!(
            (mined.dist_ap[row] - expected_ap[row]).abs() < 1e-6,
            "dist_ap row {row}"
        );
        assert!(
            (mined.dist_an[row] - expected_an[row]).abs() < 1e-6,
            "dist_an row {row}"
        );
        assert_eq!(mined.positive_indices[row], expected_p_idx[row], "row {row}");
        assert_eq!(mined.negative_indices[row], expected_n_idx[row], "row {row}");
    }
}

#[test]
fn test_class_mining_groups_shared_labels() {
    // References 0 and 1 share class 7 with the anchor; both must count as
    // positives even though index mining would treat reference 1 as negative.
    let dist = Matrix::from_vec(2, 2, vec![0.5, 3.0, 1.0, 0.5]).unwrap();
    let mined = class_hard_mining(&dist, &[7, 7], &[7, 7]);
    // All references positive for every row, so negatives are missing.
    assert!(matches!(
        mined.unwrap_err(),
        SaborError::EmptyMiningSet {
            role: "negative",
            ..
        }
    ));
}

#[test]
fn test_class_mining_picks_farthest_positive_in_group() {
    let dist = Matrix::from_vec(
        3,
        3,
        vec![
            0.5, 3.0, 1.0, //
            1.5, 0.4, 2.0, //
            4.0, 5.0, 0.2,
        ],
    )
    .unwrap();
    // Anchor image 0 (class 7) has positives at recipes 0 and 1.
    let mined = class_hard_mining(&dist, &[7, 7, 9], &[7, 7, 9]).unwrap();
    assert!((mined.dist_ap[0] - 3.0).abs() < 1e-6);
    assert_eq!(mined.positive_indices[0], 1);
    assert!((mined.dist_an[0] - 1.0).abs() < 1e-6);
    assert_eq!(mined.negative_indices[0], 2);
}

#[test]
fn test_class_mining_disjoint_labels_missing_positive() {
    let dist = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let err = class_hard_mining(&dist, &[0, 1], &[2, 3]).unwrap_err();
    assert!(matches!(
        err,
        SaborError::EmptyMiningSet {
            anchor: 0,
            role: "positive",
        }
    ));
}

#[test]
fn test_class_mining_label_length_mismatch() {
    let dist = Matrix::zeros(3, 3);
    let err = class_hard_mining(&dist, &[0, 1], &[0, 1, 2]).unwrap_err();
    assert!(matches!(err, SaborError::DimensionMismatch { .. }));
}
