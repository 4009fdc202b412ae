use crate::math::matrix::Matrix;

/// Binary cross-entropy over a batch of probabilities.
pub struct BceLoss;

/// Lower clamp applied to each log term so p ∈ {0, 1} yields a finite loss.
const LOG_FLOOR: f64 = -100.0;
const EPS: f64 = 1e-12;

impl BceLoss {
    /// Scalar BCE: -mean(y·log(p) + (1-y)·log(1-p)), logs clamped at -100.
    pub fn loss(predicted: &Matrix, expected: &Matrix) -> f64 {
        assert_same_shape(predicted, expected);
        let n = (predicted.rows * predicted.cols) as f64;
        predicted.data.iter().flatten().zip(expected.data.iter().flatten())
            .map(|(p, y)| {
                let log_p = p.ln().max(LOG_FLOOR);
                let log_1mp = (1.0 - p).ln().max(LOG_FLOOR);
                -(y * log_p + (1.0 - y) * log_1mp)
            })
            .sum::<f64>() / n
    }

    /// ∂L/∂p for every element: (p - y) / (p·(1-p)) / n, denominator floored at ε.
    pub fn derivative(predicted: &Matrix, expected: &Matrix) -> Matrix {
        assert_same_shape(predicted, expected);
        let n = (predicted.rows * predicted.cols) as f64;
        let data = predicted.data.iter().zip(expected.data.iter())
            .map(|(p_row, y_row)| {
                p_row.iter().zip(y_row.iter())
                    .map(|(p, y)| (p - y) / (p * (1.0 - p)).max(EPS) / n)
                    .collect()
            })
            .collect();
        Matrix::from_data(data)
    }
}

fn assert_same_shape(predicted: &Matrix, expected: &Matrix) {
    assert!(
        predicted.rows == expected.rows && predicted.cols == expected.cols,
        "BceLoss: predicted is {}x{} but expected is {}x{}",
        predicted.rows, predicted.cols, expected.rows, expected.cols
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_flip_prediction_costs_ln2() {
        let p = Matrix::column(&[0.5, 0.5]);
        let y = Matrix::column(&[1.0, 0.0]);
        assert!((BceLoss::loss(&p, &y) - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn confident_wrong_answer_is_clamped() {
        let p = Matrix::column(&[1.0]);
        let y = Matrix::column(&[0.0]);
        assert_eq!(BceLoss::loss(&p, &y), 100.0);
        assert!(BceLoss::derivative(&p, &y).data[0][0].is_finite());
    }

    #[test]
    fn derivative_is_averaged_over_batch() {
        let p = Matrix::column(&[0.5, 0.5]);
        let y = Matrix::column(&[1.0, 1.0]);
        let d = BceLoss::derivative(&p, &y);
        assert_eq!(d.data, vec![vec![-1.0], vec![-1.0]]);
    }
}
