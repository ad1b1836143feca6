//! MeshError: Unified error type for tessa public APIs
//!
//! Only [`MeshError::Parse`] and [`MeshError::Io`] are fatal to the
//! command-line pipeline. Kernel faults are logged and processing continues
//! with whatever state the kernel left behind.

use thiserror::Error;

use crate::kernel::KernelFault;

/// Unified error type for tessa operations.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The input geometry text is malformed.
    #[error("Parse error at {line}:{column}, expected {expected}")]
    Parse {
        /// 1-based line of the offending token.
        line: usize,
        /// 1-based column of the offending token.
        column: usize,
        /// Human-readable description of what the reader expected.
        expected: String,
        /// The full text of the offending line, for the caret indicator.
        source_line: String,
    },
    /// Reading the input or writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The geometric kernel rejected an operation.
    #[error("Kernel fault: {0}")]
    Kernel(#[from] KernelFault),
}

impl MeshError {
    /// Returns the process exit status associated with this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            MeshError::Parse { .. } => 2,
            MeshError::Io(_) | MeshError::Kernel(_) => 1,
        }
    }

    /// Renders the caret indicator line for a parse error (`---^`).
    pub fn caret_indicator(&self) -> Option<String> {
        match self {
            MeshError::Parse { column, .. } => {
                let mut indicator = "-".repeat(column.saturating_sub(1));
                indicator.push('^');
                Some(indicator)
            }
            _ => None,
        }
    }
}
