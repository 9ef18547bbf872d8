use crate::error::ErrorKind;
use crate::matrix::Matrix;
use crate::rng::{self, RandomSource};
use crate::sample::{self, SampleError};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_VAL_FRACTION: f64 = 0.2;

#[derive(Debug, Clone)]
pub struct SplitOptions {
    val_fraction: f64,
    seed: Option<u64>,
    parallel: bool,
}

impl SplitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of rows reserved for validation, in `(0, 1)`.
    pub fn val_fraction(mut self, v: f64) -> Self {
        self.val_fraction = v;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Copies rows on the rayon pool. The split itself is unaffected.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Splits using a generator seeded from the options, or from entropy when
    /// no seed was given.
    pub fn split(&self, features: &Matrix, labels: &[f64]) -> Result<Dataset, SplitError> {
        let mut rng = rng::seeded_rng(self.seed);
        self.split_with_rng(features, labels, &mut rng)
    }

    /// Splits drawing from a caller-owned source; the seed option is ignored.
    pub fn split_with_rng<R: RandomSource + ?Sized>(
        &self,
        features: &Matrix,
        labels: &[f64],
        rng: &mut R,
    ) -> Result<Dataset, SplitError> {
        let n_val = self.validate(features, labels)?;
        let n_total = features.rows();
        let n_train = n_total - n_val;

        let val_indices = sample::random_subset(rng, n_total, n_val)?;
        let train_indices = complement(&val_indices, n_total);
        debug_assert_eq!(train_indices.len(), n_train);

        let (train_features, val_features) = if self.parallel {
            rayon::join(
                || features.par_select_rows(&train_indices),
                || features.par_select_rows(&val_indices),
            )
        } else {
            (
                features.select_rows(&train_indices),
                features.select_rows(&val_indices),
            )
        };
        let train_labels = train_indices.iter().map(|&i| labels[i]).collect();
        let val_labels = val_indices.iter().map(|&i| labels[i]).collect();

        tracing::debug!(
            n_total,
            n_train,
            n_val,
            n_dims = features.cols(),
            parallel = self.parallel,
            "split dataset"
        );

        Ok(Dataset {
            n_dims: features.cols(),
            train_indices,
            val_indices,
            train_features,
            val_features,
            train_labels,
            val_labels,
        })
    }

    /// Checks every precondition and returns the validation row count.
    fn validate(&self, features: &Matrix, labels: &[f64]) -> Result<usize, SplitError> {
        if features.is_empty() || labels.is_empty() {
            return Err(SplitError::EmptyRows);
        }
        if features.rows() != labels.len() {
            return Err(SplitError::RowSizeMismatch {
                rows: features.rows(),
                labels: labels.len(),
            });
        }
        if !(self.val_fraction > 0.0 && self.val_fraction < 1.0) {
            return Err(SplitError::FractionOutOfRange {
                val_fraction: self.val_fraction,
            });
        }

        let n_total = features.rows();
        let n_val = (self.val_fraction * n_total as f64).floor() as usize;
        if n_val == 0 {
            return Err(SplitError::InsufficientData {
                n_total,
                val_fraction: self.val_fraction,
            });
        }
        Ok(n_val)
    }
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            val_fraction: DEFAULT_VAL_FRACTION,
            seed: None,
            parallel: false,
        }
    }
}

/// Ascending indices of `0..n` that are absent from the ascending `picked`.
fn complement(picked: &[usize], n: usize) -> Vec<usize> {
    let mut rest = Vec::with_capacity(n - picked.len());
    let mut next = picked.iter().copied().peekable();
    for i in 0..n {
        if next.peek() == Some(&i) {
            next.next();
        } else {
            rest.push(i);
        }
    }
    debug_assert!(next.peek().is_none());
    rest
}

/// A labeled dataset partitioned into training and validation rows.
///
/// Every source row lands in exactly one subset, unchanged, and rows keep
/// their source order within each subset. The dataset owns copies of the
/// rows; later changes to the source have no effect on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    n_dims: usize,
    train_indices: Vec<usize>,
    val_indices: Vec<usize>,
    train_features: Matrix,
    val_features: Matrix,
    train_labels: Vec<f64>,
    val_labels: Vec<f64>,
}

impl Dataset {
    /// Splits with the default options and an entropy-seeded generator.
    pub fn split(features: &Matrix, labels: &[f64]) -> Result<Self, SplitError> {
        SplitOptions::default().split(features, labels)
    }

    pub fn n_total(&self) -> usize {
        self.n_train() + self.n_val()
    }

    pub fn n_train(&self) -> usize {
        self.train_indices.len()
    }

    pub fn n_val(&self) -> usize {
        self.val_indices.len()
    }

    pub fn n_dims(&self) -> usize {
        self.n_dims
    }

    pub fn train_features(&self) -> &Matrix {
        &self.train_features
    }

    pub fn val_features(&self) -> &Matrix {
        &self.val_features
    }

    pub fn train_labels(&self) -> &[f64] {
        &self.train_labels
    }

    pub fn val_labels(&self) -> &[f64] {
        &self.val_labels
    }

    /// Source row of each training row, ascending.
    pub fn train_indices(&self) -> &[usize] {
        &self.train_indices
    }

    /// Source row of each validation row, ascending.
    pub fn val_indices(&self) -> &[usize] {
        &self.val_indices
    }

    pub fn into_parts(self) -> DatasetParts {
        DatasetParts {
            train_features: self.train_features,
            train_labels: self.train_labels,
            val_features: self.val_features,
            val_labels: self.val_labels,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Dataset(n_train = {}, n_val = {}, n_dims = {})",
            self.n_train(),
            self.n_val(),
            self.n_dims
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetParts {
    pub train_features: Matrix,
    pub train_labels: Vec<f64>,
    pub val_features: Matrix,
    pub val_labels: Vec<f64>,
}

#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SplitError {
    #[error("features and labels must have one or more rows")]
    EmptyRows,

    #[error("features have {rows} rows but there are {labels} labels")]
    RowSizeMismatch { rows: usize, labels: usize },

    #[error("validation fraction must be in (0, 1), got {val_fraction}")]
    FractionOutOfRange { val_fraction: f64 },

    #[error(
        "not enough validation points ({n_total} rows x {val_fraction}); \
         increase the validation fraction or use a larger data set"
    )]
    InsufficientData { n_total: usize, val_fraction: f64 },

    #[error(transparent)]
    Sample(#[from] SampleError),
}

impl SplitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientData { .. } => ErrorKind::InsufficientData,
            Self::Sample(e) => e.kind(),
            _ => ErrorKind::InvalidArgument,
        }
    }
}
