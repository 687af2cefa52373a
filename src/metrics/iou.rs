//! Intersection over Union (IoU) calculation.

use crate::types::BoundingBox;

/// Calculate the Intersection over Union (IoU) between two bounding boxes.
///
/// IoU is defined as the area of intersection divided by the area of union.
/// The intersection extent is clamped at zero on each axis, so disjoint or
/// touching boxes give exactly 0.0. Two zero-area boxes have a zero union and
/// also give 0.0.
///
/// # Arguments
///
/// * `bbox1` - First bounding box
/// * `bbox2` - Second bounding box
///
/// # Returns
///
/// Returns a value between 0.0 (no overlap) and 1.0 (perfect overlap).
///
/// # Example
///
/// ```
/// use detection_map::metrics::iou::calculate_iou;
/// use detection_map::types::BoundingBox;
///
/// let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0).unwrap();
/// let bbox2 = BoundingBox::new(5.0, 5.0, 10.0, 10.0).unwrap();
/// let iou = calculate_iou(&bbox1, &bbox2);
/// assert!((iou - 25.0 / 175.0).abs() < 1e-12);
/// ```
pub fn calculate_iou(bbox1: &BoundingBox, bbox2: &BoundingBox) -> f64 {
    let x_left = bbox1.x().max(bbox2.x());
    let y_top = bbox1.y().max(bbox2.y());
    let x_right = bbox1.right().min(bbox2.right());
    let y_bottom = bbox1.bottom().min(bbox2.bottom());

    let intersection_area = (x_right - x_left).max(0.0) * (y_bottom - y_top).max(0.0);

    // Areas from the same corners as the intersection, so identical boxes
    // give exactly 1.0 even when x + w rounds.
    let area1 = (bbox1.right() - bbox1.x()) * (bbox1.bottom() - bbox1.y());
    let area2 = (bbox2.right() - bbox2.x()) * (bbox2.bottom() - bbox2.y());
    let union_area = area1 + area2 - intersection_area;

    // Both boxes degenerate
    if union_area <= 0.0 {
        return 0.0;
    }

    (intersection_area / union_area).min(1.0)
}

/// Calculate IoU matrix between two sets of bounding boxes.
///
/// # Arguments
///
/// * `bboxes1` - First set of bounding boxes
/// * `bboxes2` - Second set of bounding boxes
///
/// # Returns
///
/// Returns a 2D vector where `result[i][j]` is the IoU between `bboxes1[i]` and `bboxes2[j]`.
pub fn calculate_iou_matrix(bboxes1: &[BoundingBox], bboxes2: &[BoundingBox]) -> Vec<Vec<f64>> {
    bboxes1
        .iter()
        .map(|bbox1| {
            bboxes2
                .iter()
                .map(|bbox2| calculate_iou(bbox1, bbox2))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x: f64, y: f64, w: f64, h: f64) -> BoundingBox {
        BoundingBox::new(x, y, w, h).unwrap()
    }

    #[test]
    fn test_identical_boxes() {
        let iou = calculate_iou(&bbox(0.0, 0.0, 10.0, 10.0), &bbox(0.0, 0.0, 10.0, 10.0));
        assert_eq!(iou, 1.0);
    }

    #[test]
    fn test_no_overlap() {
        let iou = calculate_iou(&bbox(0.0, 0.0, 10.0, 10.0), &bbox(20.0, 20.0, 10.0, 10.0));
        assert_eq!(iou, 0.0);
    }

    #[test]
    fn test_overlap_on_one_axis_only() {
        // Overlapping in x, disjoint in y: a negative extent must not
        // multiply with another negative extent into a positive area.
        let iou = calculate_iou(&bbox(0.0, 0.0, 10.0, 10.0), &bbox(5.0, 30.0, 10.0, 10.0));
        assert_eq!(iou, 0.0);

        let iou = calculate_iou(&bbox(0.0, 0.0, 10.0, 10.0), &bbox(30.0, 30.0, 10.0, 10.0));
        assert_eq!(iou, 0.0);
    }

    #[test]
    fn test_touching_edges() {
        let iou = calculate_iou(&bbox(0.0, 0.0, 10.0, 10.0), &bbox(10.0, 0.0, 10.0, 10.0));
        assert_eq!(iou, 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let iou = calculate_iou(&bbox(0.0, 0.0, 10.0, 10.0), &bbox(5.0, 5.0, 10.0, 10.0));

        // Intersection: 5x5 = 25
        // Union: 100 + 100 - 25 = 175
        assert!((iou - 0.142857).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_boxes() {
        let point = bbox(5.0, 5.0, 0.0, 0.0);
        assert_eq!(calculate_iou(&point, &point), 0.0);
        assert_eq!(calculate_iou(&point, &bbox(0.0, 0.0, 10.0, 10.0)), 0.0);
    }

    #[test]
    fn test_contained_box() {
        let iou = calculate_iou(&bbox(0.0, 0.0, 10.0, 10.0), &bbox(2.0, 2.0, 5.0, 5.0));
        assert!((iou - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_iou_matrix() {
        let bboxes1 = vec![bbox(0.0, 0.0, 10.0, 10.0), bbox(5.0, 5.0, 10.0, 10.0)];
        let bboxes2 = vec![bbox(0.0, 0.0, 10.0, 10.0)];

        let matrix = calculate_iou_matrix(&bboxes1, &bboxes2);
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0].len(), 1);
        assert_eq!(matrix[0][0], 1.0);
        assert!((matrix[1][0] - 25.0 / 175.0).abs() < 1e-12);
    }
}
