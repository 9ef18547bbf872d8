pub use dataset::{Dataset, DatasetParts, SplitError, SplitOptions};
pub use error::ErrorKind;
pub use functions::mean;
pub use loss::{Loss, LossError, UnknownLoss};
pub use matrix::{Matrix, MatrixError};
pub use rng::{seeded_rng, RandomSource};
pub use sample::{random_subset, random_subset_shuffled, SampleError};

pub mod generate;

mod dataset;
mod error;
mod functions;
mod loss;
mod matrix;
mod rng;
mod sample;
