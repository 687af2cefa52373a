//! Greedy matching of predictions against ground truth for one category.

use crate::error::Result;
use crate::metrics::iou::calculate_iou_matrix;
use crate::threshold::validate_iou_threshold;
use crate::types::{BoundingBox, GroundTruthAnnotation, Prediction};
use std::collections::BTreeMap;
use tracing::trace;

/// Outcome of matching a single prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Index of the prediction in the input slice.
    pub prediction_index: usize,
    /// Index of the ground truth this prediction consumed, if any.
    pub ground_truth_index: Option<usize>,
    /// Best IoU against the ground truths still available at match time.
    pub iou: f64,
    pub is_true_positive: bool,
    pub score: f64,
}

/// Annotations that belong to a category.
pub trait Categorized {
    fn category_id(&self) -> u64;
}

impl Categorized for GroundTruthAnnotation {
    fn category_id(&self) -> u64 {
        self.category_id
    }
}

impl Categorized for Prediction {
    fn category_id(&self) -> u64 {
        self.category_id
    }
}

/// Match predictions to ground truth annotations for a single category.
///
/// Uses greedy matching: predictions are stably sorted by confidence
/// (descending, equal scores keep input order), and each prediction is paired
/// with the highest-IoU ground truth that no earlier prediction consumed.
/// Equal IoUs resolve to the lowest ground-truth index. The pair is a true
/// positive when that IoU is at least `iou_threshold`; otherwise the
/// prediction is a false positive and nothing is consumed.
///
/// Ground truths of a different category than the prediction are never
/// candidates, so unfiltered input is safe but wasteful.
///
/// # Arguments
///
/// * `ground_truths` - Ground truth annotations for this category
/// * `predictions` - Predictions for this category
/// * `iou_threshold` - Minimum IoU to consider a match, in (0.0, 1.0]
///
/// # Returns
///
/// Returns one outcome per prediction, in the ranked order. Build the
/// precision-recall curve from this order, not the input order.
///
/// # Errors
///
/// Returns an error if `iou_threshold` is outside (0.0, 1.0].
///
/// # Example
///
/// ```
/// use detection_map::matching::match_category;
/// use detection_map::types::{BoundingBox, GroundTruthAnnotation, Prediction};
///
/// let bbox = BoundingBox::new(10.0, 10.0, 50.0, 50.0).unwrap();
/// let gts = vec![GroundTruthAnnotation::new(bbox, 1)];
/// let preds = vec![
///     Prediction::new(bbox, 1, 0.6).unwrap(),
///     Prediction::new(bbox, 1, 0.9).unwrap(),
/// ];
///
/// let outcomes = match_category(&gts, &preds, 0.5).unwrap();
/// assert_eq!(outcomes[0].prediction_index, 1);
/// assert!(outcomes[0].is_true_positive);
/// assert!(!outcomes[1].is_true_positive);
/// ```
pub fn match_category(
    ground_truths: &[GroundTruthAnnotation],
    predictions: &[Prediction],
    iou_threshold: f64,
) -> Result<Vec<MatchOutcome>> {
    validate_iou_threshold(iou_threshold)?;
    Ok(greedy_match(ground_truths, predictions, iou_threshold))
}

pub(crate) fn greedy_match(
    ground_truths: &[GroundTruthAnnotation],
    predictions: &[Prediction],
    iou_threshold: f64,
) -> Vec<MatchOutcome> {
    // `sort_by` is stable
    let mut ranked: Vec<usize> = (0..predictions.len()).collect();
    ranked.sort_by(|&a, &b| predictions[b].score().total_cmp(&predictions[a].score()));

    let pred_boxes: Vec<BoundingBox> = predictions.iter().map(|p| p.bbox).collect();
    let gt_boxes: Vec<BoundingBox> = ground_truths.iter().map(|g| g.bbox).collect();
    let ious = calculate_iou_matrix(&pred_boxes, &gt_boxes);

    let mut consumed = vec![false; ground_truths.len()];

    ranked
        .into_iter()
        .map(|pred_idx| {
            let pred = &predictions[pred_idx];

            let mut best_iou = 0.0;
            let mut best_gt_idx: Option<usize> = None;
            for (gt_idx, gt) in ground_truths.iter().enumerate() {
                if consumed[gt_idx] || gt.category_id != pred.category_id {
                    continue;
                }
                let iou = ious[pred_idx][gt_idx];
                if iou > best_iou {
                    best_iou = iou;
                    best_gt_idx = Some(gt_idx);
                }
            }

            let matched = best_gt_idx.filter(|_| best_iou >= iou_threshold);
            if let Some(gt_idx) = matched {
                consumed[gt_idx] = true;
            }

            trace!(
                prediction = pred_idx,
                score = pred.score(),
                iou = best_iou,
                ground_truth = ?matched,
                "matched prediction"
            );

            MatchOutcome {
                prediction_index: pred_idx,
                ground_truth_index: matched,
                iou: best_iou,
                is_true_positive: matched.is_some(),
                score: pred.score(),
            }
        })
        .collect()
}

/// Group annotations by category id, preserving input order within a group.
///
/// Callers re-evaluating the same data at several thresholds can build the
/// partitions once and reuse them.
pub fn partition_by_category<T: Categorized + Clone>(items: &[T]) -> BTreeMap<u64, Vec<T>> {
    let mut groups: BTreeMap<u64, Vec<T>> = BTreeMap::new();

    for item in items {
        groups.entry(item.category_id()).or_default().push(item.clone());
    }

    groups
}
