//! Harness error types.

use std::io;
use thiserror::Error;

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Errors that can occur while driving a device under test
#[derive(Error, Debug)]
pub enum HarnessError {
    /// A handshake invariant was broken, e.g. more than one output beat was
    /// attributed to a single input transfer
    #[error("protocol violation at cycle {cycle}: {message}")]
    ProtocolViolation { cycle: u64, message: String },

    /// The harness was used outside its contract (empty stimulus, streaming
    /// before the coefficients were loaded, ...)
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// The DUT never asserted input readiness within the cycle budget
    #[error("DUT stalled at cycle {cycle}: ready not asserted within {budget} cycles")]
    Stall { cycle: u64, budget: u64 },

    /// A produced output disagreed with the full-precision reference
    #[error("output mismatch at sample {index}: expected {expected}, got {actual}")]
    OutputMismatch {
        index: usize,
        expected: i64,
        actual: i64,
    },

    /// Trace or result file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl HarnessError {
    /// True for errors that indict the DUT rather than the caller.
    pub fn is_dut_fault(&self) -> bool {
        matches!(
            self,
            HarnessError::ProtocolViolation { .. }
                | HarnessError::Stall { .. }
                | HarnessError::OutputMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_classification() {
        assert!(HarnessError::Stall {
            cycle: 10,
            budget: 8
        }
        .is_dut_fault());
        assert!(!HarnessError::Precondition("empty stimulus".into()).is_dut_fault());
    }

    #[test]
    fn test_display_reports_cycle() {
        let err = HarnessError::Stall {
            cycle: 42,
            budget: 16,
        };
        let msg = err.to_string();
        assert!(msg.contains("42"));
        assert!(msg.contains("16"));
    }
}
