//! Shamir secret reconstruction with corrupted-share detection.
//!
//! Shares arrive as small arithmetic expressions, are evaluated to big
//! integers and treated as points `(id, value)` on a polynomial. Every
//! k-subset is interpolated at x = 0 over the prime field 2^127 - 1; the
//! most frequent result is the secret and shares that never take part in a
//! winning subset are reported as corrupted.

pub mod combinations;
pub mod commands;
pub mod crypto;
pub mod errors;
pub mod expression;
pub mod input;
pub mod reconstruct;
pub mod wasm;

pub use errors::{SolverError, SolverResult};
pub use expression::{evaluate_expression, Expression};
pub use reconstruct::{
    reconstruct_secret, EvaluatedShare, ReconstructionRequest, ReconstructionResult,
    Reconstructor, Share,
};

/// Result from a command, separating educational output from copy-paste result
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Educational output with explanations (🧠, 📊, ✅, etc.)
    pub output: String,
    /// Clean JSON result for copy-pasting
    pub result: String,
}
