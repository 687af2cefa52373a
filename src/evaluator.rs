//! Per-category AP and mAP evaluation.

use crate::config::EvalConfig;
use crate::error::Result;
use crate::matching::{greedy_match, partition_by_category, MatchOutcome};
use crate::metrics::ap::{calculate_ap, calculate_map};
use crate::metrics::precision_recall::build_pr_curve;
use crate::threshold::{filter_by_confidence, validate_iou_threshold};
use crate::types::{Category, EvaluationResult, GroundTruthAnnotation, PrCurve, Prediction};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Evaluate predictions against ground truth at a single IoU threshold.
///
/// Categories are taken from `categories` in ascending id order. For each
/// one, both inputs are filtered by id and:
/// - no ground truth and no predictions: the category is left out;
/// - predictions but no ground truth: AP is 0.0;
/// - ground truth but no predictions: AP is 0.0;
/// - otherwise AP is the area under the precision envelope of the
///   category's ranked matches.
///
/// The mean AP is the unweighted mean over the included categories, or 0.0
/// when none qualify (including an empty `categories` map).
///
/// # Arguments
///
/// * `ground_truths` - Ground truth annotations, any mix of categories
/// * `predictions` - Predictions with scores, any mix of categories
/// * `categories` - Category metadata keyed by id
/// * `iou_threshold` - IoU threshold for matching, in (0.0, 1.0]
///
/// # Errors
///
/// Returns an error if `iou_threshold` is outside (0.0, 1.0].
///
/// # Example
///
/// ```
/// use detection_map::evaluator::evaluate;
/// use detection_map::types::{BoundingBox, Category, GroundTruthAnnotation, Prediction};
/// use std::collections::BTreeMap;
///
/// let bbox = BoundingBox::new(10.0, 10.0, 50.0, 50.0).unwrap();
/// let gts = vec![GroundTruthAnnotation::new(bbox, 1)];
/// let preds = vec![Prediction::new(bbox, 1, 0.9).unwrap()];
/// let categories = BTreeMap::from([(1, Category::new(1, "cat"))]);
///
/// let result = evaluate(&gts, &preds, &categories, 0.5).unwrap();
/// assert!((result.mean_ap - 1.0).abs() < 1e-6);
/// ```
pub fn evaluate(
    ground_truths: &[GroundTruthAnnotation],
    predictions: &[Prediction],
    categories: &BTreeMap<u64, Category>,
    iou_threshold: f64,
) -> Result<EvaluationResult> {
    validate_iou_threshold(iou_threshold)?;

    if categories.is_empty() {
        debug!("no categories supplied, returning empty evaluation");
        return Ok(EvaluationResult::default());
    }

    let gt_groups = partition_by_category(ground_truths);
    let pred_groups = partition_by_category(predictions);

    let mut category_aps = BTreeMap::new();
    for &category_id in categories.keys() {
        let gts = gt_groups.get(&category_id).map(Vec::as_slice).unwrap_or_default();
        let preds = pred_groups.get(&category_id).map(Vec::as_slice).unwrap_or_default();

        if let Some(ap) = evaluate_single_category(gts, preds, iou_threshold) {
            debug!(
                category_id,
                ground_truths = gts.len(),
                predictions = preds.len(),
                ap,
                "evaluated category"
            );
            category_aps.insert(category_id, ap);
        }
    }

    let aps: Vec<f64> = category_aps.values().copied().collect();
    let mean_ap = calculate_map(&aps);
    debug!(mean_ap, categories = aps.len(), iou_threshold, "evaluation finished");

    Ok(EvaluationResult {
        mean_ap,
        category_aps,
    })
}

/// AP for one pre-filtered category, or `None` if it has no data at all.
fn evaluate_single_category(
    ground_truths: &[GroundTruthAnnotation],
    predictions: &[Prediction],
    iou_threshold: f64,
) -> Option<f64> {
    match (ground_truths.is_empty(), predictions.is_empty()) {
        (true, true) => None,
        // Recall is undefined without ground truth
        (true, false) => Some(0.0),
        (false, true) => Some(0.0),
        (false, false) => {
            let outcomes = greedy_match(ground_truths, predictions, iou_threshold);
            let curve = build_pr_curve(&true_positive_labels(&outcomes), ground_truths.len());
            Some(calculate_ap(&curve.recall, &curve.precision))
        }
    }
}

/// Evaluate with the thresholds from an [`EvalConfig`].
///
/// Predictions scoring below `config.confidence_threshold` are dropped
/// before [`evaluate`] runs at `config.iou_threshold`.
///
/// # Errors
///
/// Returns an error if either threshold in `config` is out of range.
pub fn evaluate_with_config(
    ground_truths: &[GroundTruthAnnotation],
    predictions: &[Prediction],
    categories: &BTreeMap<u64, Category>,
    config: &EvalConfig,
) -> Result<EvaluationResult> {
    config.validate()?;
    let kept = filter_by_confidence(predictions, config.confidence_threshold)?;
    debug!(
        kept = kept.len(),
        dropped = predictions.len() - kept.len(),
        confidence_threshold = config.confidence_threshold,
        "filtered predictions by confidence"
    );
    evaluate(ground_truths, &kept, categories, config.iou_threshold)
}

/// Raw precision/recall arrays for plotting.
///
/// With `category_id` set, only that category is matched. With `None`, every
/// category present in either input is matched on its own and the outcomes
/// are pooled into one ranking by descending score (equal scores keep their
/// input order across categories); the recall denominator is then the total
/// ground-truth count.
///
/// # Returns
///
/// Returns `None` when no ground truth and no predictions remain after the
/// category filter, meaning there is no curve to draw. Otherwise the curve
/// has one point per prediction, or the single point `(0.0, 0.0)` when there
/// are ground truths but no predictions.
///
/// # Errors
///
/// Returns an error if `iou_threshold` is outside (0.0, 1.0].
pub fn get_pr_arrays(
    ground_truths: &[GroundTruthAnnotation],
    predictions: &[Prediction],
    category_id: Option<u64>,
    iou_threshold: f64,
) -> Result<Option<PrCurve>> {
    validate_iou_threshold(iou_threshold)?;

    let curve = match category_id {
        Some(category_id) => {
            let gts: Vec<GroundTruthAnnotation> = ground_truths
                .iter()
                .filter(|gt| gt.category_id == category_id)
                .cloned()
                .collect();
            let preds: Vec<Prediction> = predictions
                .iter()
                .filter(|pred| pred.category_id == category_id)
                .cloned()
                .collect();

            if gts.is_empty() && preds.is_empty() {
                return Ok(None);
            }

            let outcomes = greedy_match(&gts, &preds, iou_threshold);
            build_pr_curve(&true_positive_labels(&outcomes), gts.len())
        }
        None => {
            if ground_truths.is_empty() && predictions.is_empty() {
                return Ok(None);
            }

            let gt_groups = partition_by_category(ground_truths);
            let category_ids: BTreeSet<u64> =
                predictions.iter().map(|p| p.category_id).collect();

            let mut pooled: Vec<MatchOutcome> = Vec::with_capacity(predictions.len());
            for category_id in category_ids {
                let gts = gt_groups.get(&category_id).map(Vec::as_slice).unwrap_or_default();
                let (input_indices, preds): (Vec<usize>, Vec<Prediction>) = predictions
                    .iter()
                    .enumerate()
                    .filter(|(_, pred)| pred.category_id == category_id)
                    .map(|(idx, pred)| (idx, pred.clone()))
                    .unzip();

                // Report indices into `predictions`, not into the category slice
                pooled.extend(greedy_match(gts, &preds, iou_threshold).into_iter().map(
                    |mut outcome| {
                        outcome.prediction_index = input_indices[outcome.prediction_index];
                        outcome
                    },
                ));
            }
            pooled.sort_by(|a, b| {
                b.score
                    .total_cmp(&a.score)
                    .then(a.prediction_index.cmp(&b.prediction_index))
            });

            build_pr_curve(&true_positive_labels(&pooled), ground_truths.len())
        }
    };

    Ok(Some(curve))
}

fn true_positive_labels(outcomes: &[MatchOutcome]) -> Vec<bool> {
    outcomes.iter().map(|o| o.is_true_positive).collect()
}
