//! Basic evaluation example demonstrating core functionality.

use detection_map::{
    evaluate, get_pr_arrays, metrics::iou::calculate_iou, BoundingBox, Category,
    GroundTruthAnnotation, Prediction,
};
use std::collections::BTreeMap;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Detection mAP Example ===\n");

    // Example 1: IoU Calculation
    println!("1. IoU Calculation");
    let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0)?;
    let bbox2 = BoundingBox::new(5.0, 5.0, 10.0, 10.0)?;
    println!(
        "   IoU between overlapping boxes: {:.4} (expected 0.1429)",
        calculate_iou(&bbox1, &bbox2)
    );
    println!();

    // Example 2: Parse annotations handed over by a loader
    println!("2. Parsing Annotations");
    let ground_truth: Vec<GroundTruthAnnotation> = serde_json::from_str(
        r#"[
            {"bbox": [10, 10, 50, 50], "category_id": 1},
            {"bbox": [100, 100, 60, 60], "category_id": 1},
            {"bbox": [200, 200, 70, 70], "category_id": 2}
        ]"#,
    )?;
    let predictions: Vec<Prediction> = serde_json::from_str(
        r#"[
            {"bbox": [12, 12, 48, 48], "category_id": 1, "score": 0.9},
            {"bbox": [110, 110, 55, 55], "category_id": 1, "score": 0.8},
            {"bbox": [50, 50, 30, 30], "category_id": 1, "score": 0.7},
            {"bbox": [210, 210, 65, 65], "category_id": 2, "score": 0.95},
            {"bbox": [300, 300, 40, 40], "category_id": 3, "score": 0.88}
        ]"#,
    )?;
    println!(
        "   Loaded {} ground truths and {} predictions",
        ground_truth.len(),
        predictions.len()
    );
    println!();

    let categories = BTreeMap::from([
        (1, Category::new(1, "cat")),
        (2, Category::new(2, "dog")),
        (3, Category::new(3, "person")),
    ]);

    // Example 3: Evaluation
    let iou_threshold = 0.5;
    println!("3. mAP (IoU={:.2})", iou_threshold);
    let result = evaluate(&ground_truth, &predictions, &categories, iou_threshold)?;
    println!("   mAP: {:.4}", result.mean_ap);
    for (id, name, ap) in result.named_category_aps(&categories) {
        println!("   ├─ {} (id={}): {:.4}", name, id, ap);
    }
    println!();

    // Example 4: Precision/recall arrays for plotting
    println!("4. Precision/Recall Curve (all categories)");
    match get_pr_arrays(&ground_truth, &predictions, None, iou_threshold)? {
        Some(curve) => {
            println!("   Rank | Precision | Recall");
            for (rank, (p, r)) in curve.precision.iter().zip(&curve.recall).enumerate() {
                println!("   {:>4} | {:>9.4} | {:>6.4}", rank, p, r);
            }
            println!("   ({} ground truths)", curve.num_ground_truth);
        }
        None => println!("   No data"),
    }
    println!();

    println!("=== Example Complete ===");

    Ok(())
}
