//! Evaluation parameters.

use crate::error::Result;
use crate::threshold::{validate_confidence_threshold, validate_iou_threshold};
use serde::{Deserialize, Serialize};

/// Tunable parameters of one mAP evaluation.
///
/// Missing JSON fields fall back to the defaults: IoU threshold 0.5 and
/// confidence threshold 0.0 (keep every prediction).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Minimum IoU for a prediction to count as a true positive.
    pub iou_threshold: f64,
    /// Predictions scoring below this are dropped before matching.
    pub confidence_threshold: f64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            iou_threshold: 0.5,
            confidence_threshold: 0.0,
        }
    }
}

impl EvalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iou_threshold(mut self, iou_threshold: f64) -> Self {
        self.iou_threshold = iou_threshold;
        self
    }

    pub fn with_confidence_threshold(mut self, confidence_threshold: f64) -> Self {
        self.confidence_threshold = confidence_threshold;
        self
    }

    /// Parse and validate a configuration from JSON.
    ///
    /// # Example
    ///
    /// ```
    /// use detection_map::config::EvalConfig;
    ///
    /// let config = EvalConfig::from_json_str(r#"{"iou_threshold": 0.75}"#).unwrap();
    /// assert_eq!(config.iou_threshold, 0.75);
    /// assert_eq!(config.confidence_threshold, 0.0);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EvalConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check both thresholds are in range.
    pub fn validate(&self) -> Result<()> {
        validate_iou_threshold(self.iou_threshold)?;
        validate_confidence_threshold(self.confidence_threshold)
    }
}
