//! Edge case and boundary condition tests.

use detection_map::evaluator::{evaluate, get_pr_arrays};
use detection_map::matching::match_category;
use detection_map::metrics::{build_pr_curve, calculate_ap, calculate_iou};
use detection_map::types::{BoundingBox, Category, GroundTruthAnnotation, Prediction};
use std::collections::BTreeMap;

fn create_ground_truth(bbox: [f64; 4], category_id: u64) -> GroundTruthAnnotation {
    GroundTruthAnnotation::new(BoundingBox::try_from(bbox).unwrap(), category_id)
}

fn create_prediction(bbox: [f64; 4], category_id: u64, score: f64) -> Prediction {
    Prediction::new(BoundingBox::try_from(bbox).unwrap(), category_id, score).unwrap()
}

fn create_categories(ids: &[u64]) -> BTreeMap<u64, Category> {
    ids.iter()
        .map(|&id| (id, Category::new(id, format!("class_{}", id))))
        .collect()
}

// ============================================================================
// GEOMETRY EDGE CASES
// ============================================================================

#[test]
fn test_iou_literal_cases() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0).unwrap();
    let b = BoundingBox::new(5.0, 5.0, 10.0, 10.0).unwrap();
    let c = BoundingBox::new(20.0, 20.0, 10.0, 10.0).unwrap();

    assert!((calculate_iou(&a, &b) - 0.1429).abs() < 1e-4);
    assert_eq!(calculate_iou(&a, &c), 0.0);
    assert_eq!(calculate_iou(&a, &a), 1.0);
}

#[test]
fn test_iou_zero_area_boxes() {
    let line = BoundingBox::new(0.0, 0.0, 10.0, 0.0).unwrap();
    let point = BoundingBox::new(0.0, 0.0, 0.0, 0.0).unwrap();
    assert_eq!(calculate_iou(&line, &line), 0.0);
    assert_eq!(calculate_iou(&point, &line), 0.0);
}

// ============================================================================
// MATCHING EDGE CASES
// ============================================================================

#[test]
fn test_empty_predictions_with_ground_truth() {
    let ground_truth = vec![create_ground_truth([10.0, 10.0, 50.0, 50.0], 1)];

    let outcomes = match_category(&ground_truth, &[], 0.5).unwrap();
    assert!(outcomes.is_empty(), "Should have no outcomes with empty predictions");
}

#[test]
fn test_many_predictions_one_ground_truth() {
    let ground_truth = vec![create_ground_truth([50.0, 50.0, 100.0, 100.0], 1)];
    let predictions: Vec<Prediction> = (0..10)
        .map(|i| create_prediction([50.0 + i as f64, 50.0, 100.0, 100.0], 1, 0.9 - i as f64 * 0.05))
        .collect();

    let outcomes = match_category(&ground_truth, &predictions, 0.5).unwrap();
    let tp_count = outcomes.iter().filter(|o| o.is_true_positive).count();
    assert_eq!(tp_count, 1, "A ground truth can justify only one prediction");
    assert!(outcomes[0].is_true_positive, "The top-scored prediction takes it");
}

#[test]
fn test_threshold_one_requires_exact_overlap() {
    let ground_truth = vec![create_ground_truth([0.0, 0.0, 10.0, 10.0], 1)];
    let predictions = vec![
        create_prediction([0.0, 0.0, 10.0, 10.0], 1, 0.5),
        create_prediction([0.1, 0.0, 10.0, 10.0], 1, 0.9),
    ];

    let outcomes = match_category(&ground_truth, &predictions, 1.0).unwrap();
    assert!(!outcomes[0].is_true_positive);
    assert!(outcomes[1].is_true_positive);
}

#[test]
fn test_false_positive_does_not_consume() {
    // A weak overlap below threshold leaves the ground truth for the next one
    let ground_truth = vec![create_ground_truth([0.0, 0.0, 10.0, 10.0], 1)];
    let predictions = vec![
        create_prediction([8.0, 8.0, 10.0, 10.0], 1, 0.9),
        create_prediction([0.0, 0.0, 10.0, 10.0], 1, 0.8),
    ];

    let outcomes = match_category(&ground_truth, &predictions, 0.5).unwrap();
    assert!(!outcomes[0].is_true_positive);
    assert!(outcomes[1].is_true_positive);
}

// ============================================================================
// CURVE AND AP EDGE CASES
// ============================================================================

#[test]
fn test_single_prediction_single_ground_truth() {
    let curve = build_pr_curve(&[true], 1);
    let ap = calculate_ap(&curve.recall, &curve.precision);
    assert!((ap - 1.0).abs() < 1e-9);
}

#[test]
fn test_all_false_positives_zero_ap() {
    let curve = build_pr_curve(&[false, false, false], 2);
    assert!(curve.recall.iter().all(|&r| r == 0.0));
    assert_eq!(calculate_ap(&curve.recall, &curve.precision), 0.0);
}

// ============================================================================
// AGGREGATION EDGE CASES
// ============================================================================

#[test]
fn test_empty_category_map() {
    let ground_truth = vec![create_ground_truth([0.0, 0.0, 10.0, 10.0], 1)];
    let predictions = vec![create_prediction([0.0, 0.0, 10.0, 10.0], 1, 0.9)];

    let result = evaluate(&ground_truth, &predictions, &BTreeMap::new(), 0.5).unwrap();
    assert_eq!(result.mean_ap, 0.0);
    assert!(result.category_aps.is_empty());
}

#[test]
fn test_everything_empty() {
    let result = evaluate(&[], &[], &create_categories(&[1, 2]), 0.5).unwrap();
    assert_eq!(result.mean_ap, 0.0);
    assert!(result.category_aps.is_empty());
}

#[test]
fn test_predictions_without_ground_truth() {
    let predictions = vec![
        create_prediction([0.0, 0.0, 10.0, 10.0], 4, 0.9),
        create_prediction([5.0, 5.0, 10.0, 10.0], 4, 0.8),
    ];

    let result = evaluate(&[], &predictions, &create_categories(&[4]), 0.5).unwrap();
    assert_eq!(result.category_aps[&4], 0.0);
    assert_eq!(result.mean_ap, 0.0);
}

#[test]
fn test_input_order_with_distinct_scores_does_not_change_ap() {
    let ground_truth = vec![
        create_ground_truth([0.0, 0.0, 10.0, 10.0], 1),
        create_ground_truth([30.0, 30.0, 10.0, 10.0], 1),
    ];
    let mut predictions = vec![
        create_prediction([0.0, 0.0, 10.0, 10.0], 1, 0.4),
        create_prediction([31.0, 31.0, 10.0, 10.0], 1, 0.9),
        create_prediction([80.0, 80.0, 10.0, 10.0], 1, 0.6),
    ];
    let categories = create_categories(&[1]);

    let forward = evaluate(&ground_truth, &predictions, &categories, 0.5).unwrap();
    predictions.reverse();
    let reversed = evaluate(&ground_truth, &predictions, &categories, 0.5).unwrap();

    assert_eq!(forward, reversed);
}

// ============================================================================
// PR ARRAY EDGE CASES
// ============================================================================

#[test]
fn test_pr_arrays_both_empty() {
    assert!(get_pr_arrays(&[], &[], None, 0.5).unwrap().is_none());
    assert!(get_pr_arrays(&[], &[], Some(1), 0.5).unwrap().is_none());
}

#[test]
fn test_pr_arrays_predictions_only() {
    let predictions = vec![create_prediction([0.0, 0.0, 10.0, 10.0], 1, 0.9)];

    let curve = get_pr_arrays(&[], &predictions, None, 0.5).unwrap().unwrap();
    assert_eq!(curve.num_ground_truth, 0);
    assert_eq!(curve.recall, vec![0.0]);
    assert_eq!(curve.precision, vec![0.0]);
}
