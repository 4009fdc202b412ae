use crate::math::matrix::Matrix;
use crate::network::classifier::DECISION_THRESHOLD;

/// Fraction of rows whose thresholded probability equals the 0/1 label.
/// Returns 0.0 for an empty batch.
pub fn binary_accuracy(predicted: &Matrix, labels: &Matrix) -> f64 {
    if predicted.rows == 0 {
        return 0.0;
    }
    let correct = predicted.col(0).iter().zip(labels.col(0).iter())
        .filter(|(p, y)| {
            let class = if **p >= DECISION_THRESHOLD { 1.0 } else { 0.0 };
            class == **y
        })
        .count();
    correct as f64 / predicted.rows as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        let p = Matrix::column(&[0.5, 0.49, 0.9, 0.1]);
        let y = Matrix::column(&[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(binary_accuracy(&p, &y), 0.75);
    }

    #[test]
    fn nan_prediction_counts_as_class_zero() {
        let p = Matrix::column(&[f64::NAN]);
        assert_eq!(binary_accuracy(&p, &Matrix::column(&[0.0])), 1.0);
        assert_eq!(binary_accuracy(&Matrix::default(), &Matrix::default()), 0.0);
    }
}
