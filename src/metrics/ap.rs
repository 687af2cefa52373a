//! Average Precision (AP) and mean Average Precision (mAP) calculation.

/// Calculate Average Precision (AP) from a precision-recall curve.
///
/// Integrates the precision envelope over recall exactly (no 11- or
/// 101-point sampling). The curve is padded with recall 0.0 at the start and
/// 1.0 at the end (precision 0.0 at both), the envelope is the running
/// maximum of precision scanned from the end, and AP is the sum of
/// `(r[i+1] - r[i]) * envelope[i+1]` over every step where recall changes.
///
/// # Arguments
///
/// * `recalls` - Recall values in rank order
/// * `precisions` - Precision values in rank order
///
/// # Returns
///
/// Returns the Average Precision value (0.0 to 1.0). Empty input gives 0.0.
/// If the slices differ in length, only the common prefix is used.
///
/// # Example
///
/// ```
/// use detection_map::metrics::ap::calculate_ap;
///
/// let recalls = vec![0.5, 1.0, 1.0];
/// let precisions = vec![1.0, 1.0, 2.0 / 3.0];
/// let ap = calculate_ap(&recalls, &precisions);
/// assert!((ap - 1.0).abs() < 1e-12);
/// ```
pub fn calculate_ap(recalls: &[f64], precisions: &[f64]) -> f64 {
    let n = recalls.len().min(precisions.len());
    if n == 0 {
        return 0.0;
    }

    let mut mrec = Vec::with_capacity(n + 2);
    mrec.push(0.0);
    mrec.extend_from_slice(&recalls[..n]);
    mrec.push(1.0);

    let mut mpre = Vec::with_capacity(n + 2);
    mpre.push(0.0);
    mpre.extend_from_slice(&precisions[..n]);
    mpre.push(0.0);

    // Precision envelope
    for i in (0..mpre.len() - 1).rev() {
        mpre[i] = mpre[i].max(mpre[i + 1]);
    }

    mrec.windows(2)
        .zip(mpre.iter().skip(1))
        .filter(|(r, _)| r[1] != r[0])
        .map(|(r, &p)| (r[1] - r[0]) * p)
        .sum()
}

/// Calculate mean Average Precision (mAP) across multiple classes.
///
/// # Arguments
///
/// * `class_aps` - Vector of AP values for each class
///
/// # Returns
///
/// Returns the unweighted mean (0.0 to 1.0), or 0.0 for no classes.
///
/// # Example
///
/// ```
/// use detection_map::metrics::ap::calculate_map;
///
/// let class_aps = vec![0.8, 0.9, 0.75, 0.85];
/// let map = calculate_map(&class_aps);
/// assert!((map - 0.825).abs() < 1e-10);
/// ```
pub fn calculate_map(class_aps: &[f64]) -> f64 {
    if class_aps.is_empty() {
        return 0.0;
    }

    class_aps.iter().sum::<f64>() / class_aps.len() as f64
}
