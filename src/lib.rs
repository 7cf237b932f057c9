//! Cycle-accurate verification harness for streaming FIR filter cores.
//!
//! This crate drives a synchronous stream-filter DUT through its native
//! clock and valid/ready handshake interface to verify functional
//! correctness and characterize its frequency response:
//!
//! - **[`Testbench`]**: generic owner of one clocked model; single-tick time
//!   advance, reset, optional VCD waveform trace.
//! - **[`StreamFilterHarness`]**: the protocol driver; width-aware stimulus
//!   and coefficient encoding, bounded handshake waits, vector trials,
//!   overflow stress, impulse-response measurement and frequency sweeps.
//! - **[`analysis`]**: lowpass characteristic estimation from measured
//!   responses.
//!
//! The DUT is anything implementing [`StreamFilterModel`]; the bundled
//! [`SimFir`] software core serves development and testing without RTL.
//!
//! # Example
//!
//! ```
//! use fir_harness::{FilterParams, SimFir, StreamFilterHarness};
//!
//! let params = FilterParams {
//!     input_width: 12,
//!     output_width: 28,
//!     tap_width: 12,
//!     tap_count: 4,
//!     pipeline_delay: 1,
//! };
//! let mut harness = StreamFilterHarness::new(SimFir::new(params));
//! harness.load_coefficients(&[1, 2, 2, 1]).unwrap();
//!
//! // Full convolution support: stimulus, tail zeros, pipeline flush.
//! let stimulus = harness.padded(&[8, 0, 0, 0, 0, 0, 0]);
//! let outputs = harness.run_trial(&stimulus).unwrap();
//! assert_eq!(&outputs[..7], &[8, 16, 16, 8, 0, 0, 0]);
//! ```

pub mod analysis;
pub mod bits;
pub mod error;
pub mod harness;
pub mod sim;
pub mod testbench;
pub mod trace;
pub mod traits;
pub mod types;

pub use analysis::{estimate_lowpass_characteristics, LowpassCharacteristics};
pub use error::{HarnessError, HarnessResult};
pub use harness::{convolve, StreamFilterHarness};
pub use sim::SimFir;
pub use testbench::Testbench;
pub use trace::VcdTrace;
pub use traits::{ClockedModel, StreamFilterModel};
pub use types::{FilterParams, ResponseSample, SignalValue};
