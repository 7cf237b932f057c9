//! Generic clocked-model testbench.
//!
//! [`Testbench`] owns one [`ClockedModel`] and advances simulation time one
//! full clock period at a time. It also manages reset and the optional
//! waveform trace; everything protocol-specific lives in
//! [`harness`](crate::harness).

use std::io;
use std::path::Path;

use crate::trace::VcdTrace;
use crate::traits::ClockedModel;

/// Owns a clocked model, its cycle counter and the optional waveform trace.
pub struct Testbench<M: ClockedModel> {
    core: M,
    cycles: u64,
    trace: Option<VcdTrace>,
}

impl<M: ClockedModel> Testbench<M> {
    /// Wrap a model. The clock starts low and no trace is recording.
    pub fn new(mut core: M) -> Self {
        core.set_clock(false);
        Self {
            core,
            cycles: 0,
            trace: None,
        }
    }

    /// The model being exercised.
    pub fn core(&self) -> &M {
        &self.core
    }

    /// Mutable access to the model's input pins.
    pub fn core_mut(&mut self) -> &mut M {
        &mut self.core
    }

    /// Number of completed ticks. Used as the trace timestamp base and in
    /// error reports.
    pub fn cycle(&self) -> u64 {
        self.cycles
    }

    /// Begin recording a waveform trace. Every subsequent tick appends
    /// timestamped samples. Idempotent while a trace is open.
    pub fn open_trace(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        if self.trace.is_none() {
            self.trace = Some(VcdTrace::create(path.as_ref())?);
        }
        Ok(())
    }

    /// Stop recording, flush and release the trace file.
    pub fn close_trace(&mut self) -> io::Result<()> {
        if let Some(trace) = self.trace.take() {
            trace.finish()?;
        }
        Ok(())
    }

    fn dump(&mut self, time: u64) -> io::Result<()> {
        if let Some(trace) = self.trace.as_mut() {
            trace.sample(time, &self.core.trace_signals())?;
        }
        Ok(())
    }

    /// Advance the model by one full clock period.
    ///
    /// Combinational inputs set since the last tick are settled first, so
    /// logic that feeds the rising edge sees them. Trace samples land just
    /// before the edge, on it, and mid-way through the low phase.
    pub fn tick(&mut self) -> io::Result<()> {
        self.cycles += 1;

        self.core.eval();
        self.dump(10 * self.cycles - 2)?;

        self.core.set_clock(true);
        self.core.eval();
        self.dump(10 * self.cycles)?;

        self.core.set_clock(false);
        self.core.eval();
        self.dump(10 * self.cycles + 5)?;

        Ok(())
    }

    /// Assert the reset input for exactly one tick, then deassert it.
    pub fn reset(&mut self) -> io::Result<()> {
        self.core.set_reset(true);
        self.tick()?;
        self.core.set_reset(false);
        Ok(())
    }
}

impl<M: ClockedModel> Drop for Testbench<M> {
    fn drop(&mut self) {
        if let Some(trace) = self.trace.take() {
            let _ = trace.finish();
        }
    }
}
