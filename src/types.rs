//! Common parameter and sample types.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// One measured point of a DUT's complex frequency response.
pub type ResponseSample = Complex64;

/// A named signal value for waveform tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalValue {
    /// Signal name as it should appear in the waveform viewer
    pub name: &'static str,
    /// Signal width in bits
    pub width: u32,
    /// Current value, zero-extended
    pub value: u64,
}

/// Bit-level geometry a stream filter core declares about itself.
///
/// Every encode/decode operation in the harness respects these widths. The
/// pipeline delay is declared explicitly rather than inferred: it is the
/// number of trailing zero samples a caller must append to flush every
/// output out of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Input sample width in bits
    pub input_width: u32,
    /// Output sample width in bits
    pub output_width: u32,
    /// Coefficient width in bits
    pub tap_width: u32,
    /// Number of filter taps
    pub tap_count: usize,
    /// Clock cycles between an accepted input and its output beat
    pub pipeline_delay: usize,
}

impl FilterParams {
    /// Largest representable input sample, `2^(W-1) - 1`.
    pub fn input_max(&self) -> i64 {
        (1i64 << (self.input_width - 1)) - 1
    }

    /// Smallest representable input sample, `-2^(W-1)`.
    pub fn input_min(&self) -> i64 {
        -(1i64 << (self.input_width - 1))
    }
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            input_width: 16,
            output_width: 36,
            tap_width: 12,
            tap_count: 16,
            pipeline_delay: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_range() {
        let params = FilterParams {
            input_width: 12,
            ..Default::default()
        };
        assert_eq!(params.input_max(), 2047);
        assert_eq!(params.input_min(), -2048);
    }

    #[test]
    fn test_default_widths_sane() {
        let params = FilterParams::default();
        assert!(params.output_width > params.input_width);
        assert!(params.tap_count > 0);
    }
}
