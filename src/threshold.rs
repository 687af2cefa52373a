//! Threshold validation and confidence score filtering.

use crate::error::{DetectionMapError, Result};
use crate::types::Prediction;

/// Filter predictions by confidence score threshold.
///
/// # Arguments
///
/// * `predictions` - Predictions to filter
/// * `threshold` - Minimum confidence score (0.0 to 1.0)
///
/// # Returns
///
/// Returns a new vector containing only predictions with score >= threshold,
/// in their original order.
///
/// # Errors
///
/// Returns an error if the threshold is not in the valid range [0.0, 1.0].
///
/// # Example
///
/// ```
/// use detection_map::threshold::filter_by_confidence;
/// use detection_map::types::{BoundingBox, Prediction};
///
/// let bbox = BoundingBox::new(10.0, 20.0, 30.0, 40.0).unwrap();
/// let predictions = vec![
///     Prediction::new(bbox, 1, 0.9).unwrap(),
///     Prediction::new(bbox, 1, 0.3).unwrap(),
/// ];
///
/// let filtered = filter_by_confidence(&predictions, 0.5).unwrap();
/// assert_eq!(filtered.len(), 1);
/// ```
pub fn filter_by_confidence(predictions: &[Prediction], threshold: f64) -> Result<Vec<Prediction>> {
    validate_confidence_threshold(threshold)?;

    Ok(predictions
        .iter()
        .filter(|pred| pred.score() >= threshold)
        .cloned()
        .collect())
}

/// Validate that a confidence threshold is in the range [0.0, 1.0].
pub fn validate_confidence_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(DetectionMapError::InvalidThreshold(format!(
            "Confidence threshold must be between 0.0 and 1.0, got {}",
            threshold
        )));
    }
    Ok(())
}

/// Validate that an IoU threshold is in the range (0.0, 1.0].
///
/// Zero is rejected: every pair of boxes reaches an IoU of 0.0, so the
/// threshold would accept disjoint matches.
pub fn validate_iou_threshold(threshold: f64) -> Result<()> {
    if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(DetectionMapError::InvalidThreshold(format!(
            "IoU threshold must be in (0.0, 1.0], got {}",
            threshold
        )));
    }
    Ok(())
}
