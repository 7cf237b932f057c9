//! Cycle-accurate software FIR core.
//!
//! [`SimFir`] is a registered model of a streaming FIR filter with the same
//! port set a generated RTL model would expose. It lets the harness be
//! developed and tested without any RTL in the loop, and doubles as the
//! reference implementation of the handshake contract: state changes only on
//! rising clock edges, taps survive reset, and outputs emerge a fixed number
//! of cycles after their input was accepted.

use std::collections::VecDeque;

use crate::bits;
use crate::traits::{ClockedModel, StreamFilterModel};
use crate::types::{FilterParams, SignalValue};

/// Software stream-filter DUT.
///
/// Backpressure is configurable so handshake paths can be exercised:
/// [`ready_every`](SimFir::ready_every) paces input readiness,
/// [`ready_never`](SimFir::ready_never) wedges it for stall testing.
pub struct SimFir {
    params: FilterParams,

    // Input pins, driven between ticks
    clk: bool,
    prev_clk: bool,
    reset: bool,
    in_valid: bool,
    in_data: u64,
    out_ready: bool,
    tap_write: bool,
    tap_data: u64,

    // Registered state
    taps: Vec<i64>,
    delay_line: Vec<i64>,
    pipe: VecDeque<Option<i64>>,
    out_valid: bool,
    out_data: u64,
    tap_ptr: usize,

    // Handshake pacing: ready one cycle in `ready_period`, 0 = never
    ready_period: u64,
    edges: u64,
    in_ready: bool,
}

impl SimFir {
    /// Build a core with the given geometry.
    ///
    /// # Panics
    ///
    /// Panics if the tap count is zero or any width is outside `1..=63`.
    pub fn new(params: FilterParams) -> Self {
        assert!(params.tap_count > 0, "tap count must be nonzero");
        for width in [params.input_width, params.output_width, params.tap_width] {
            assert!(
                (1..=63).contains(&width),
                "width {} outside supported range",
                width
            );
        }
        Self {
            params,
            clk: false,
            prev_clk: false,
            reset: false,
            in_valid: false,
            in_data: 0,
            out_ready: false,
            tap_write: false,
            tap_data: 0,
            taps: vec![0; params.tap_count],
            delay_line: vec![0; params.tap_count],
            pipe: VecDeque::from(vec![None; params.pipeline_delay]),
            out_valid: false,
            out_data: 0,
            tap_ptr: 0,
            ready_period: 1,
            edges: 0,
            in_ready: false,
        }
    }

    /// Assert input readiness one cycle in `period` (1 = always ready).
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero; use [`ready_never`](SimFir::ready_never)
    /// for a wedged core.
    pub fn ready_every(mut self, period: u64) -> Self {
        assert!(period >= 1, "period must be at least 1");
        self.ready_period = period;
        self
    }

    /// Never assert input readiness. Stall-path testing only.
    pub fn ready_never(mut self) -> Self {
        self.ready_period = 0;
        self
    }

    /// The currently loaded coefficients.
    pub fn taps(&self) -> &[i64] {
        &self.taps
    }

    fn rising_edge(&mut self) {
        self.edges += 1;

        if self.reset {
            self.delay_line.fill(0);
            for slot in self.pipe.iter_mut() {
                *slot = None;
            }
            self.out_valid = false;
            self.tap_ptr = 0;
            return;
        }

        if self.tap_write {
            self.taps[self.tap_ptr] = bits::sign_extend(self.tap_data, self.params.tap_width);
            self.tap_ptr = (self.tap_ptr + 1) % self.params.tap_count;
            return;
        }

        if self.out_valid && self.out_ready {
            self.out_valid = false;
        }

        // One accumulate per accepted input, full precision.
        let produced = if self.in_valid && self.in_ready {
            self.delay_line.rotate_right(1);
            self.delay_line[0] = bits::sign_extend(self.in_data, self.params.input_width);
            let acc: i64 = self
                .taps
                .iter()
                .zip(self.delay_line.iter())
                .map(|(&h, &x)| h * x)
                .sum();
            Some(acc)
        } else {
            None
        };

        let emerging = if self.params.pipeline_delay == 0 {
            produced
        } else {
            self.pipe.push_back(produced);
            self.pipe.pop_front().unwrap_or(None)
        };

        // No skid buffer: the harness keeps out_ready high while streaming,
        // so an emerging beat never collides with an unconsumed one.
        if let Some(acc) = emerging {
            self.out_data = bits::mask(acc, self.params.output_width);
            self.out_valid = true;
        }
    }
}

impl ClockedModel for SimFir {
    fn eval(&mut self) {
        if self.clk && !self.prev_clk {
            self.rising_edge();
        }
        self.prev_clk = self.clk;

        // Readiness is combinational, paced by the edge counter.
        self.in_ready =
            !self.reset && self.ready_period != 0 && self.edges % self.ready_period == 0;
    }

    fn set_clock(&mut self, level: bool) {
        self.clk = level;
    }

    fn set_reset(&mut self, level: bool) {
        self.reset = level;
    }

    fn trace_signals(&self) -> Vec<SignalValue> {
        vec![
            SignalValue {
                name: "clk",
                width: 1,
                value: self.clk as u64,
            },
            SignalValue {
                name: "reset",
                width: 1,
                value: self.reset as u64,
            },
            SignalValue {
                name: "s_valid",
                width: 1,
                value: self.in_valid as u64,
            },
            SignalValue {
                name: "s_ready",
                width: 1,
                value: self.in_ready as u64,
            },
            SignalValue {
                name: "s_data",
                width: self.params.input_width,
                value: self.in_data,
            },
            SignalValue {
                name: "m_valid",
                width: 1,
                value: self.out_valid as u64,
            },
            SignalValue {
                name: "m_ready",
                width: 1,
                value: self.out_ready as u64,
            },
            SignalValue {
                name: "m_data",
                width: self.params.output_width,
                value: self.out_data,
            },
            SignalValue {
                name: "tap_wr",
                width: 1,
                value: self.tap_write as u64,
            },
            SignalValue {
                name: "tap_data",
                width: self.params.tap_width,
                value: self.tap_data,
            },
        ]
    }
}

impl StreamFilterModel for SimFir {
    fn params(&self) -> FilterParams {
        self.params
    }

    fn set_in_valid(&mut self, level: bool) {
        self.in_valid = level;
    }

    fn set_in_data(&mut self, data: u64) {
        self.in_data = data;
    }

    fn in_ready(&self) -> bool {
        self.in_ready
    }

    fn out_valid(&self) -> bool {
        self.out_valid
    }

    fn set_out_ready(&mut self, level: bool) {
        self.out_ready = level;
    }

    fn out_data(&self) -> u64 {
        self.out_data
    }

    fn set_tap_write(&mut self, level: bool) {
        self.tap_write = level;
    }

    fn set_tap_data(&mut self, data: u64) {
        self.tap_data = data;
    }
}
