// This module defines error types for meta-shader compilation using the thiserror
// crate for idiomatic Rust error handling. MetaError is the main error enum and
// covers the two failure classes the pipeline distinguishes: fatal programmer-error
// conditions (an unrecognized hardware generation reaching profile construction, or
// an emission routine touching an operand the layout planner never bound; both
// indicate a catalog/layout mismatch and abort the compilation) and the single
// recoverable resource condition (allocation failure while packaging the finished
// program). Each variant carries the context needed to diagnose the failure. The
// module also provides MetaResult<T> as a convenience alias for Result<T, MetaError>.

//! Error types for the meta-shader compiler.
//!
//! Using thiserror for more idiomatic error handling.

use thiserror::Error;

use crate::meta::op::MetaOp;

/// Main error type for meta-shader compilation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetaError {
    /// The device generation handed to profile construction is not one the
    /// catalog was written for. This is a defect in the caller's device
    /// detection, not a runtime condition, and is never retried.
    #[error("unsupported hardware generation {gen} (expected 600, 700 or 750)")]
    UnsupportedGeneration { gen: u32 },

    /// An emission routine referenced an operand the layout planner left
    /// unbound for this operation kind. Indicates a catalog/layout mismatch.
    #[error("operand `{operand}` is not bound for {op}")]
    UnboundOperand {
        operand: &'static str,
        op: MetaOp,
    },

    /// Allocating the owned buffer for the finished program failed. The only
    /// recoverable failure in the pipeline.
    #[error("allocation of {bytes} bytes for the compiled program failed")]
    OutOfMemory { bytes: usize },
}

/// Result type alias for compile operations.
pub type MetaResult<T> = Result<T, MetaError>;
