//! Capability traits for clocked models.
//!
//! The harness never depends on a concrete DUT type: anything that can be
//! clocked one edge at a time is a [`ClockedModel`], and anything that also
//! exposes the stream-filter port set is a [`StreamFilterModel`]. The crate's
//! own [`SimFir`](crate::sim::SimFir) implements both; bindings to generated
//! RTL models implement the same pair.

use crate::types::{FilterParams, SignalValue};

/// A synchronous model driven one clock edge at a time.
///
/// Inputs are plain setters; the model latches its registered state when
/// [`eval`](ClockedModel::eval) observes a rising clock edge. The testbench
/// is the sole owner and mutator of a model.
pub trait ClockedModel {
    /// Settle combinational logic against the current input values.
    fn eval(&mut self);

    /// Drive the clock input.
    fn set_clock(&mut self, level: bool);

    /// Drive the synchronous reset input.
    fn set_reset(&mut self, level: bool);

    /// Snapshot of the signals worth recording in a waveform trace.
    ///
    /// The default is empty: models without trace support stay silent and
    /// tracing simply records nothing.
    fn trace_signals(&self) -> Vec<SignalValue> {
        Vec::new()
    }
}

/// A streaming FIR filter core.
///
/// The port set mirrors the usual stream-filter RTL interface: one
/// valid/ready input channel, one valid/ready output channel, and an
/// unconditional coefficient-load strobe with its own data bus. A transfer
/// occurs on a channel in exactly the cycles where both valid and ready are
/// asserted.
pub trait StreamFilterModel: ClockedModel {
    /// Bit widths, tap count and pipeline delay the core was built with.
    fn params(&self) -> FilterParams;

    // Input stream channel

    /// Drive the input channel's valid signal.
    fn set_in_valid(&mut self, level: bool);

    /// Drive the input data bus (already masked to the input width).
    fn set_in_data(&mut self, data: u64);

    /// Input channel ready, as settled by the last `eval`.
    fn in_ready(&self) -> bool;

    // Output stream channel

    /// Output channel valid, as settled by the last `eval`.
    fn out_valid(&self) -> bool;

    /// Drive the output channel's ready signal.
    fn set_out_ready(&mut self, level: bool);

    /// Output data bus, zero-extended at the output width.
    fn out_data(&self) -> u64;

    // Coefficient load port

    /// Drive the coefficient-write strobe.
    fn set_tap_write(&mut self, level: bool);

    /// Drive the coefficient data bus (already masked to the tap width).
    fn set_tap_data(&mut self, data: u64);
}
