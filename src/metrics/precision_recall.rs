//! Precision/recall curve construction from ranked true-positive labels.

use crate::types::PrCurve;

/// Added to precision and recall denominators so a zero count never divides.
///
/// Small enough that it does not perceptibly bias the values used for AP.
pub const EPSILON: f64 = 1e-10;

/// Build a precision-recall curve from ranked detection labels.
///
/// # Arguments
///
/// * `is_true_positive` - True-positive flag per detection, in descending score order
/// * `num_ground_truth` - Total number of ground truth annotations
///
/// # Returns
///
/// Returns a curve with one point per detection, where
/// `recall[i] = tp[i] / (num_ground_truth + EPSILON)` and
/// `precision[i] = tp[i] / (tp[i] + fp[i] + EPSILON)` over cumulative counts.
/// With no detections the curve is the single point `(0.0, 0.0)`.
///
/// # Example
///
/// ```
/// use detection_map::metrics::precision_recall::build_pr_curve;
///
/// let curve = build_pr_curve(&[true, false, true], 2);
/// assert_eq!(curve.len(), 3);
/// assert!((curve.recall[2] - 1.0).abs() < 1e-9);
/// assert!((curve.precision[1] - 0.5).abs() < 1e-9);
/// ```
pub fn build_pr_curve(is_true_positive: &[bool], num_ground_truth: usize) -> PrCurve {
    if is_true_positive.is_empty() {
        return PrCurve {
            precision: vec![0.0],
            recall: vec![0.0],
            num_ground_truth,
        };
    }

    let mut precision = Vec::with_capacity(is_true_positive.len());
    let mut recall = Vec::with_capacity(is_true_positive.len());
    let mut tp = 0usize;
    let mut fp = 0usize;

    for &is_tp in is_true_positive {
        if is_tp {
            tp += 1;
        } else {
            fp += 1;
        }

        recall.push(tp as f64 / (num_ground_truth as f64 + EPSILON));
        precision.push(tp as f64 / ((tp + fp) as f64 + EPSILON));
    }

    PrCurve {
        precision,
        recall,
        num_ground_truth,
    }
}
