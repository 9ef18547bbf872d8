use crate::error::ErrorKind;
use crate::functions;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pointwise loss between a true value `y` and a prediction `y_hat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Loss {
    /// `(y - y_hat)^2`
    SquaredError,

    /// `max(0, 1 - y * y_hat)`, for labels in `{-1, 1}`.
    Hinge,

    /// Huber loss with `delta = 1`: quadratic near zero, linear beyond.
    Huber,

    /// Smoothed hinge for labels in `{-1, 1}`: squared hinge for margins of
    /// at least `-1`, linear `-4 * margin` below that.
    ModifiedHuber,
}

impl Loss {
    pub const ALL: [Loss; 4] = [
        Loss::SquaredError,
        Loss::Hinge,
        Loss::Huber,
        Loss::ModifiedHuber,
    ];

    pub fn evaluate(self, y: f64, y_hat: f64) -> f64 {
        match self {
            Self::SquaredError => (y - y_hat).powi(2),
            Self::Hinge => (1.0 - y * y_hat).max(0.0),
            Self::Huber => {
                let d = (y - y_hat).abs();
                if d <= 1.0 {
                    0.5 * d.powi(2)
                } else {
                    d - 0.5
                }
            }
            Self::ModifiedHuber => {
                let margin = y * y_hat;
                if margin >= -1.0 {
                    (1.0 - margin).max(0.0).powi(2)
                } else {
                    -4.0 * margin
                }
            }
        }
    }

    /// Mean loss over paired values.
    pub fn average(self, ys: &[f64], y_hats: &[f64]) -> Result<f64, LossError> {
        if ys.len() != y_hats.len() {
            return Err(LossError::LengthMismatch {
                ys: ys.len(),
                y_hats: y_hats.len(),
            });
        }
        functions::mean(ys.iter().zip(y_hats).map(|(&y, &y_hat)| self.evaluate(y, y_hat)))
            .ok_or(LossError::EmptyInput)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::SquaredError => "squared-error",
            Self::Hinge => "hinge",
            Self::Huber => "huber",
            Self::ModifiedHuber => "modified-huber",
        }
    }
}

impl fmt::Display for Loss {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Loss {
    type Err = UnknownLoss;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.name() == s)
            .ok_or_else(|| UnknownLoss(s.to_owned()))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown loss function {0:?} (expected one of squared-error, hinge, huber, modified-huber)")]
pub struct UnknownLoss(pub String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LossError {
    #[error("cannot average a loss over zero values")]
    EmptyInput,

    #[error("{ys} true values but {y_hats} predictions")]
    LengthMismatch { ys: usize, y_hats: usize },
}

impl LossError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}
