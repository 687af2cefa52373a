//! # detection-map
//!
//! A Rust library for evaluating object detection predictions against
//! ground truth with per-category Average Precision (AP) and mean Average
//! Precision (mAP) at a single IoU threshold.
//!
//! This library provides:
//! - **IoU** between boxes in COCO `[x, y, width, height]` form
//! - **Greedy matching** of score-ranked predictions to ground truth
//! - **Precision/recall curves** for plotting
//! - **AP** as the exact area under the precision envelope
//! - **mAP** as the unweighted mean of per-category AP
//!
//! Every call is a pure function of its inputs, so it is cheap to re-run as
//! thresholds change and safe to call from several threads at once.
//!
//! ## Quick Start
//!
//! ```rust
//! use detection_map::{evaluate, BoundingBox, Category, GroundTruthAnnotation, Prediction};
//! use std::collections::BTreeMap;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ground_truth = vec![
//!     GroundTruthAnnotation::new(BoundingBox::new(10.0, 10.0, 50.0, 50.0)?, 1),
//! ];
//! let predictions = vec![
//!     Prediction::new(BoundingBox::new(12.0, 12.0, 48.0, 48.0)?, 1, 0.9)?,
//! ];
//! let categories = BTreeMap::from([(1, Category::new(1, "cat"))]);
//!
//! let result = evaluate(&ground_truth, &predictions, &categories, 0.5)?;
//! println!("mAP: {:.4}", result.mean_ap);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod threshold;
pub mod metrics;
pub mod matching;
pub mod evaluator;

// Re-export commonly used types and functions
pub use error::{DetectionMapError, Result};
pub use types::{
    BoundingBox, Category, EvaluationResult, GroundTruthAnnotation, PrCurve, Prediction,
};
pub use config::EvalConfig;
pub use evaluator::{evaluate, evaluate_with_config, get_pr_arrays};
pub use matching::{match_category, MatchOutcome};
pub use metrics::{build_pr_curve, calculate_ap, calculate_iou};
pub use threshold::filter_by_confidence;
