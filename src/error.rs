/// Broad category of a failure, shared by every error type in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed shapes, out-of-range fractions or sizes.
    InvalidArgument,

    /// The inputs are well-formed but too small to yield a validation set.
    InsufficientData,
}
