//! Core value types for ground truth, predictions and evaluation results.

use crate::error::{DetectionMapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Represents a bounding box in COCO format (x, y, width, height).
///
/// Coordinates are in LTWH (Left-Top-Width-Height) format where:
/// - x: Left coordinate
/// - y: Top coordinate
/// - width: Box width
/// - height: Box height
///
/// A box can only be built through [`BoundingBox::new`] (or deserialized
/// from a `[x, y, w, h]` array, which goes through the same checks), so every
/// value has finite coordinates and non-negative dimensions. Zero-sized
/// boxes are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`DetectionMapError::InvalidBoundingBox`] if any value is NaN
    /// or infinite, or if width or height is negative.
    ///
    /// # Example
    ///
    /// ```
    /// use detection_map::types::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0).unwrap();
    /// assert_eq!(bbox.area(), 100.0);
    /// assert!(BoundingBox::new(0.0, 0.0, -1.0, 10.0).is_err());
    /// ```
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        if ![x, y, width, height].iter().all(|v| v.is_finite()) {
            return Err(DetectionMapError::InvalidBoundingBox(format!(
                "Coordinates must be finite, got [{}, {}, {}, {}]",
                x, y, width, height
            )));
        }
        if width < 0.0 || height < 0.0 {
            return Err(DetectionMapError::InvalidBoundingBox(format!(
                "Width and height must be non-negative, got {}x{}",
                width, height
            )));
        }
        Ok(Self { x, y, width, height })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Get the area of the bounding box.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Get the right coordinate (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom coordinate (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if the box has zero area.
    pub fn is_degenerate(&self) -> bool {
        self.area() == 0.0
    }
}

impl TryFrom<[f64; 4]> for BoundingBox {
    type Error = DetectionMapError;

    fn try_from(value: [f64; 4]) -> Result<Self> {
        Self::new(value[0], value[1], value[2], value[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        [bbox.x, bbox.y, bbox.width, bbox.height]
    }
}

/// Represents a category in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supercategory: Option<String>,
}

impl Category {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            supercategory: None,
        }
    }
}

/// A ground-truth box with its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruthAnnotation {
    pub bbox: BoundingBox,
    pub category_id: u64,
}

impl GroundTruthAnnotation {
    pub fn new(bbox: BoundingBox, category_id: u64) -> Self {
        Self { bbox, category_id }
    }
}

/// A predicted box with its category and confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPrediction")]
pub struct Prediction {
    pub bbox: BoundingBox,
    pub category_id: u64,
    score: f64,
}

impl Prediction {
    /// Create a new prediction.
    ///
    /// # Errors
    ///
    /// Returns [`DetectionMapError::InvalidScore`] if the score is NaN or
    /// outside [0.0, 1.0].
    pub fn new(bbox: BoundingBox, category_id: u64, score: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&score) {
            return Err(DetectionMapError::InvalidScore(format!(
                "Score must be between 0.0 and 1.0, got {}",
                score
            )));
        }
        Ok(Self {
            bbox,
            category_id,
            score,
        })
    }

    /// Confidence score in [0.0, 1.0].
    pub fn score(&self) -> f64 {
        self.score
    }
}

#[derive(Deserialize)]
struct RawPrediction {
    bbox: BoundingBox,
    category_id: u64,
    score: f64,
}

impl TryFrom<RawPrediction> for Prediction {
    type Error = DetectionMapError;

    fn try_from(raw: RawPrediction) -> Result<Self> {
        Self::new(raw.bbox, raw.category_id, raw.score)
    }
}

/// Precision/recall curve over predictions ranked by descending score.
///
/// `precision` and `recall` always have the same, non-zero length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrCurve {
    pub precision: Vec<f64>,
    pub recall: Vec<f64>,
    pub num_ground_truth: usize,
}

impl PrCurve {
    /// Number of ranked points on the curve.
    pub fn len(&self) -> usize {
        self.precision.len()
    }

    pub fn is_empty(&self) -> bool {
        self.precision.is_empty()
    }
}

/// Result of one mAP evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationResult {
    /// Unweighted mean of `category_aps`, 0.0 when no category qualified.
    pub mean_ap: f64,
    /// AP per category id, for categories with ground truth or predictions.
    pub category_aps: BTreeMap<u64, f64>,
}

impl EvaluationResult {
    /// Pair each AP with the category's display name, ordered by id.
    ///
    /// Ids missing from `categories` are labelled `"Unknown"`.
    pub fn named_category_aps(
        &self,
        categories: &BTreeMap<u64, Category>,
    ) -> Vec<(u64, String, f64)> {
        self.category_aps
            .iter()
            .map(|(&id, &ap)| {
                let name = categories
                    .get(&id)
                    .map_or_else(|| "Unknown".to_string(), |c| c.name.clone());
                (id, name, ap)
            })
            .collect()
    }
}
