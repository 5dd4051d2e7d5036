//! Error types for secret reconstruction.
//!
//! The core (expression evaluation, field arithmetic, interpolation and the
//! consensus engine) reports failures through [`SolverError`]. The command
//! layer and the CLI wrap these in `anyhow::Error`.

use thiserror::Error;

/// The Result type for core reconstruction operations.
pub type SolverResult<T> = std::result::Result<T, SolverError>;

/// Errors returned by the reconstruction core
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SolverError {
    /// returned when a share value matches none of the supported expression shapes
    #[error("Unknown expression format: {0}")]
    UnrecognizedExpression(String),

    /// returned when `divide` has a zero divisor or `lcm` has a zero gcd
    #[error("Division by zero")]
    DivisionByZero,

    /// returned when the requested inverse does not exist (gcd(a, m) != 1)
    #[error("Modular inverse does not exist")]
    NoModularInverse,

    /// returned when no combination produced a usable secret
    #[error("Could not determine the correct secret: no combination produced a usable candidate")]
    NoConsensus,

    /// returned when the number of shares does not match the declared count
    #[error("Invalid input: shares length {actual} does not match n = {expected}")]
    InvalidShareCount {
        /// declared share count (n)
        expected: usize,
        /// number of shares actually supplied
        actual: usize,
    },

    /// returned when the threshold is outside 1..=n
    #[error("Invalid threshold: k = {k} must be between 1 and n = {n}")]
    InvalidThreshold {
        /// declared threshold
        k: usize,
        /// declared share count
        n: usize,
    },

    /// returned when a `power` exponent does not fit in 32 bits
    #[error("Exponent too large: {0}")]
    ExponentTooLarge(String),

    /// returned when interpolation is asked for zero points
    #[error("Cannot interpolate an empty point set")]
    EmptyPointSet,

    /// returned when exact integer interpolation leaves a remainder
    #[error("Interpolated secret is not an integer: {numerator}/{denominator}")]
    NonIntegralSecret {
        /// reduced numerator of the constant term
        numerator: String,
        /// reduced denominator of the constant term
        denominator: String,
    },

    /// returned when two shares carry the same id
    #[error("Duplicate share id: {0}")]
    DuplicateShareId(u64),

    /// returned when a base-encoded value names a base outside 2..=36
    #[error("Invalid base: {0}")]
    InvalidBase(u32),

    /// returned when a digit is not valid for the declared base
    #[error("Invalid digit '{digit}' for base {base}")]
    InvalidDigit {
        /// offending character
        digit: char,
        /// declared base
        base: u32,
    },

    /// returned when fewer points than the threshold are available
    #[error("Not enough points to solve polynomial. Need {needed}, got {available}")]
    InsufficientPoints {
        /// threshold k
        needed: usize,
        /// points supplied
        available: usize,
    },

    /// returned when a Lagrange coefficient is requested for a point that does not exist
    #[error("Point index {index} is out of range for {len} points")]
    PointIndexOutOfRange {
        /// requested index
        index: usize,
        /// number of points supplied
        len: usize,
    },
}
