use crate::error::{check_dim, FitError, FitResult};
use crate::ColumnMajorMatrix;

/// Check that `theta`, `x` and `y` describe the same problem.
pub fn check_problem(theta: &[f64], x: &ColumnMajorMatrix<f64>, y: &[f64]) -> FitResult<()> {
    if x.n_rows() == 0 {
        return Err(FitError::EmptyDataset);
    }
    check_dim("theta", x.n_cols(), theta.len())?;
    check_dim("target", x.n_rows(), y.len())
}

/// `X·theta - y`, one residual per row.
pub fn residuals(theta: &[f64], x: &ColumnMajorMatrix<f64>, y: &[f64]) -> FitResult<Vec<f64>> {
    check_problem(theta, x, y)?;
    let mut errors = x.dot_vec(theta)?;
    for (error, &target) in errors.iter_mut().zip(y) {
        *error -= target;
    }
    Ok(errors)
}

/// Mean squared error cost `1/(2m) * sum((X·theta - y)^2)`.
///
/// The result is never negative and is zero exactly when every prediction
/// equals its target.
pub fn compute_cost(theta: &[f64], x: &ColumnMajorMatrix<f64>, y: &[f64]) -> FitResult<f64> {
    let errors = residuals(theta, x, y)?;
    let squared: f64 = errors.iter().map(|e| e.powi(2)).sum();
    Ok(squared / (2. * y.len() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_close {
        ($a : expr, $b: expr, $delta: expr) => {{
            let (a, b, delta) = ($a, $b, $delta);
            assert!(
                (a - b).abs() <= delta,
                "Difference = {:.6} > {:.6} too important between {:.6} and {:.6}",
                a - b,
                delta,
                a,
                b
            );
        }};
    }

    fn design(xs: &[f64]) -> ColumnMajorMatrix<f64> {
        ColumnMajorMatrix::from_rows(xs.iter().map(|&x| vec![x]).collect())
            .unwrap()
            .with_bias_column()
    }

    #[test]
    fn test_cost_value() {
        let x = design(&[1., 2., 3.]);
        let y = vec![2., 4., 6.];
        // theta = 0: (4 + 16 + 36) / 6
        assert_close!(compute_cost(&[0., 0.], &x, &y).unwrap(), 56. / 6., 1e-12);
        // predictions 1 + x = 2, 3, 4: errors 0, 1, 2
        assert_close!(compute_cost(&[1., 1.], &x, &y).unwrap(), 5. / 6., 1e-12);
    }

    #[test]
    fn test_cost_zero_iff_exact() {
        let x = design(&[0., 1., 2., 3.]);
        let y: Vec<f64> = (0..4).map(|i| 3. + 2. * i as f64).collect();
        assert_eq!(compute_cost(&[3., 2.], &x, &y).unwrap(), 0.);

        for theta in &[[3., 2.1], [2.9, 2.], [0., 0.], [-5., 10.]] {
            let cost = compute_cost(theta, &x, &y).unwrap();
            assert!(cost > 0., "cost {} for {:?}", cost, theta);
        }
    }

    #[test]
    fn test_cost_dimension_mismatch() {
        let x = design(&[1., 2.]);
        assert_eq!(
            compute_cost(&[1., 2., 3.], &x, &[1., 2.]).unwrap_err(),
            FitError::DimensionMismatch {
                what: "theta",
                expected: 2,
                found: 3
            }
        );
        assert_eq!(
            compute_cost(&[1., 2.], &x, &[1.]).unwrap_err(),
            FitError::DimensionMismatch {
                what: "target",
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_residuals() {
        let x = design(&[1., 2.]);
        assert_eq!(residuals(&[1., 1.], &x, &[1., 5.]).unwrap(), vec![1., -2.]);
    }
}
