//! Re-evaluating as confidence and IoU thresholds change.

use detection_map::{
    evaluate_with_config, BoundingBox, Category, EvalConfig, GroundTruthAnnotation, Prediction,
};
use std::collections::BTreeMap;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Threshold Sweep Example ===\n");

    let mut ground_truth = Vec::new();
    let mut predictions = Vec::new();
    for i in 0..8 {
        let x = i as f64 * 40.0;
        ground_truth.push(GroundTruthAnnotation::new(BoundingBox::new(x, 0.0, 30.0, 30.0)?, 1));

        // Drift grows with rank, and confidence falls with it
        let drift = i as f64 * 2.0;
        let score = 0.95 - i as f64 * 0.1;
        let bbox = BoundingBox::new(x + drift, drift, 30.0, 30.0)?;
        predictions.push(Prediction::new(bbox, 1, score)?);
    }
    let categories = BTreeMap::from([(1, Category::new(1, "object"))]);

    // Same shape a GUI would send from its sliders
    let base = EvalConfig::from_json_str(r#"{"iou_threshold": 0.5, "confidence_threshold": 0.0}"#)?;

    println!("   Confidence | IoU=0.50 | IoU=0.75");
    println!("   -----------|----------|---------");
    for step in 0..=4 {
        let confidence = step as f64 * 0.2;
        let loose = base.with_confidence_threshold(confidence);
        let strict = loose.with_iou_threshold(0.75);

        let loose_map =
            evaluate_with_config(&ground_truth, &predictions, &categories, &loose)?.mean_ap;
        let strict_map =
            evaluate_with_config(&ground_truth, &predictions, &categories, &strict)?.mean_ap;
        println!("   {:>10.2} | {:>8.4} | {:>8.4}", confidence, loose_map, strict_map);
    }
    println!();

    println!("=== Example Complete ===");

    Ok(())
}
