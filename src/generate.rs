//! Synthetic inputs: random feature matrices and the targets derived from them.
use crate::error::ErrorKind;
use crate::matrix::Matrix;
use crate::rng::RandomSource;
use std::f64::consts::PI;
use thiserror::Error;

/// Squared-norm threshold of the Hastie et al. (2009) example 10.2 rule.
pub const HASTIE_THRESHOLD: f64 = 9.34;

/// Minimum feature count of the Friedman #1 problem.
pub const FRIEDMAN1_FEATURES: usize = 5;

/// Matrix with i.i.d. standard normal entries.
pub fn gaussian_matrix<R: RandomSource + ?Sized>(
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Result<Matrix, GenerateError> {
    check_shape(rows, cols)?;
    Ok(Matrix::from_fn(rows, cols, |_, _| rng.standard_normal()))
}

/// Matrix with i.i.d. entries drawn uniformly from `[0, 1)`.
pub fn uniform_matrix<R: RandomSource + ?Sized>(
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Result<Matrix, GenerateError> {
    check_shape(rows, cols)?;
    Ok(Matrix::from_fn(rows, cols, |_, _| rng.uniform()))
}

fn check_shape(rows: usize, cols: usize) -> Result<(), GenerateError> {
    if rows == 0 {
        return Err(GenerateError::NonPositiveRows);
    }
    if cols == 0 {
        return Err(GenerateError::NonPositiveCols);
    }
    if rows.checked_mul(cols).is_none() {
        return Err(GenerateError::TooLarge { rows, cols });
    }
    Ok(())
}

/// Binary classification targets in `{-1, 1}`.
///
/// A row is labeled `1` when the sum of its squared entries exceeds
/// [`HASTIE_THRESHOLD`]. Meant for standard normal inputs, where the two
/// classes come out roughly balanced for ten features.
pub fn hastie_targets(x: &Matrix) -> Result<Vec<f64>, GenerateError> {
    check_non_empty(x)?;
    Ok(x.iter_rows()
        .map(|row| {
            let norm = row.iter().map(|v| v.powi(2)).sum::<f64>();
            if norm > HASTIE_THRESHOLD {
                1.0
            } else {
                -1.0
            }
        })
        .collect())
}

/// Friedman #1 regression targets with additive Gaussian noise of standard
/// deviation `noise`.
///
/// `y = 10 sin(pi x0 x1) + 20 x2^2 + 10 x3 + 5 x4`; columns past the fifth
/// are ignored. `rng` is only drawn from when `noise > 0`.
pub fn friedman1_targets<R: RandomSource + ?Sized>(
    x: &Matrix,
    noise: f64,
    rng: &mut R,
) -> Result<Vec<f64>, GenerateError> {
    check_friedman1(x, noise)?;
    Ok(x.iter_rows()
        .map(|row| {
            let y = friedman1(row);
            if noise > 0.0 {
                y + noise * rng.standard_normal()
            } else {
                y
            }
        })
        .collect())
}

/// [`friedman1_targets`] without noise.
pub fn friedman1_targets_noiseless(x: &Matrix) -> Result<Vec<f64>, GenerateError> {
    check_friedman1(x, 0.0)?;
    Ok(x.iter_rows().map(friedman1).collect())
}

fn friedman1(row: &[f64]) -> f64 {
    10.0 * (PI * row[0] * row[1]).sin() + 20.0 * row[2].powi(2) + 10.0 * row[3] + 5.0 * row[4]
}

fn check_non_empty(x: &Matrix) -> Result<(), GenerateError> {
    if x.rows() == 0 || x.cols() == 0 {
        return Err(GenerateError::EmptyMatrix);
    }
    Ok(())
}

fn check_friedman1(x: &Matrix, noise: f64) -> Result<(), GenerateError> {
    check_non_empty(x)?;
    if x.cols() < FRIEDMAN1_FEATURES {
        return Err(GenerateError::TooFewFeatures {
            required: FRIEDMAN1_FEATURES,
            actual: x.cols(),
        });
    }
    if !(noise >= 0.0) {
        return Err(GenerateError::NegativeNoise);
    }
    Ok(())
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("row count must be positive")]
    NonPositiveRows,

    #[error("column count must be positive")]
    NonPositiveCols,

    #[error("a {rows} x {cols} matrix has more entries than fit in memory")]
    TooLarge { rows: usize, cols: usize },

    #[error("input matrix must have at least one row and one column")]
    EmptyMatrix,

    #[error("input matrix must have at least {required} features, got {actual}")]
    TooFewFeatures { required: usize, actual: usize },

    #[error("noise must be a nonnegative number")]
    NegativeNoise,
}

impl GenerateError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded_rng;

    #[test]
    fn matrices_have_requested_shape() -> Result<(), anyhow::Error> {
        let mut rng = seeded_rng(Some(7));
        let g = gaussian_matrix(150, 10, &mut rng)?;
        let u = uniform_matrix(150, 10, &mut rng)?;
        assert_eq!((g.rows(), g.cols()), (150, 10));
        assert_eq!((u.rows(), u.cols()), (150, 10));
        assert!(u.as_slice().iter().all(|v| (0.0..1.0).contains(v)));
        assert!(g.as_slice().iter().all(|v| v.is_finite()));
        Ok(())
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let mut rng = seeded_rng(Some(7));
        assert_eq!(
            gaussian_matrix(0, 3, &mut rng),
            Err(GenerateError::NonPositiveRows)
        );
        assert_eq!(
            uniform_matrix(3, 0, &mut rng),
            Err(GenerateError::NonPositiveCols)
        );
        assert_eq!(
            gaussian_matrix(usize::MAX, 2, &mut rng),
            Err(GenerateError::TooLarge {
                rows: usize::MAX,
                cols: 2
            })
        );
    }

    #[test]
    fn seeded_generation_is_reproducible() -> Result<(), anyhow::Error> {
        let a = gaussian_matrix(20, 4, &mut seeded_rng(Some(3)))?;
        let b = gaussian_matrix(20, 4, &mut seeded_rng(Some(3)))?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn hastie_rule() -> Result<(), anyhow::Error> {
        let x = Matrix::from_rows(&[[3.0, 0.6], [3.0, 0.0], [0.0, 0.0], [-2.0, -2.5]])?;
        assert_eq!(hastie_targets(&x)?, vec![1.0, -1.0, -1.0, 1.0]);

        let mut rng = seeded_rng(Some(7));
        let y = hastie_targets(&gaussian_matrix(2000, 10, &mut rng)?)?;
        let positives = y.iter().filter(|&&v| v == 1.0).count() as f64 / y.len() as f64;
        assert!((positives - 0.5).abs() < 0.05, "positives = {}", positives);

        assert_eq!(
            hastie_targets(&Matrix::zeros(0, 3)?),
            Err(GenerateError::EmptyMatrix)
        );
        Ok(())
    }

    #[test]
    fn friedman1_rule() -> Result<(), anyhow::Error> {
        let x = Matrix::from_rows(&[
            [0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
            [0.5, 1.0, 1.0, 1.0, 1.0, 9.0],
        ])?;
        let y = friedman1_targets_noiseless(&x)?;
        assert_eq!(y[0], 0.0);
        assert!((y[1] - 45.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn friedman1_noise() -> Result<(), anyhow::Error> {
        let mut rng = seeded_rng(Some(7));
        let x = uniform_matrix(500, 10, &mut rng)?;
        let clean = friedman1_targets_noiseless(&x)?;
        let noisy = friedman1_targets(&x, 1.0, &mut rng)?;
        assert_eq!(clean.len(), noisy.len());
        assert!(clean.iter().zip(&noisy).any(|(a, b)| a != b));

        let zero = friedman1_targets(&x, 0.0, &mut rng)?;
        assert_eq!(zero, clean);
        Ok(())
    }

    #[test]
    fn friedman1_preconditions() -> Result<(), anyhow::Error> {
        let mut rng = seeded_rng(Some(7));
        assert_eq!(
            friedman1_targets_noiseless(&Matrix::zeros(3, 4)?),
            Err(GenerateError::TooFewFeatures {
                required: 5,
                actual: 4
            })
        );
        assert_eq!(
            friedman1_targets(&Matrix::zeros(3, 5)?, -1.0, &mut rng),
            Err(GenerateError::NegativeNoise)
        );
        assert_eq!(
            friedman1_targets(&Matrix::zeros(3, 5)?, f64::NAN, &mut rng),
            Err(GenerateError::NegativeNoise)
        );
        assert_eq!(
            friedman1_targets_noiseless(&Matrix::zeros(0, 5)?),
            Err(GenerateError::EmptyMatrix)
        );
        Ok(())
    }
}
