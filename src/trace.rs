//! Minimal VCD waveform writer.
//!
//! Records per-tick signal snapshots as a Value Change Dump file so that
//! externally-viewable waveforms can be captured from any
//! [`ClockedModel`](crate::traits::ClockedModel). Debug tooling only; the
//! harness never reads these files back and correctness does not depend on
//! them.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::types::SignalValue;

/// Writes a VCD file from timestamped signal snapshots.
///
/// The header is emitted lazily from the first snapshot, so the writer does
/// not need the signal list up front. After the first snapshot only changed
/// values are written.
pub struct VcdTrace {
    out: BufWriter<File>,
    last: Vec<u64>,
    header_done: bool,
}

impl VcdTrace {
    /// Create (truncate) the trace file at `path`.
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self {
            out: BufWriter::new(File::create(path)?),
            last: Vec::new(),
            header_done: false,
        })
    }

    // VCD identifiers are single printable characters starting at '!'.
    fn id_for(index: usize) -> char {
        (b'!' + index as u8) as char
    }

    fn write_value(out: &mut BufWriter<File>, index: usize, sig: &SignalValue) -> io::Result<()> {
        let id = Self::id_for(index);
        if sig.width == 1 {
            writeln!(out, "{}{}", sig.value & 1, id)
        } else {
            writeln!(out, "b{:b} {}", sig.value, id)
        }
    }

    fn write_header(&mut self, signals: &[SignalValue]) -> io::Result<()> {
        writeln!(self.out, "$timescale 1ns $end")?;
        writeln!(self.out, "$scope module dut $end")?;
        for (i, sig) in signals.iter().enumerate() {
            writeln!(
                self.out,
                "$var wire {} {} {} $end",
                sig.width,
                Self::id_for(i),
                sig.name
            )?;
        }
        writeln!(self.out, "$upscope $end")?;
        writeln!(self.out, "$enddefinitions $end")?;
        Ok(())
    }

    /// Record one timestamped snapshot. Unchanged signals are skipped; a
    /// snapshot with no changes writes nothing.
    pub fn sample(&mut self, time: u64, signals: &[SignalValue]) -> io::Result<()> {
        if signals.is_empty() {
            return Ok(());
        }

        if !self.header_done {
            self.write_header(signals)?;
            self.header_done = true;
            writeln!(self.out, "#{}", time)?;
            writeln!(self.out, "$dumpvars")?;
            for (i, sig) in signals.iter().enumerate() {
                Self::write_value(&mut self.out, i, sig)?;
            }
            writeln!(self.out, "$end")?;
            self.last = signals.iter().map(|s| s.value).collect();
            return Ok(());
        }

        let mut stamped = false;
        for (i, sig) in signals.iter().enumerate() {
            if self.last.get(i) == Some(&sig.value) {
                continue;
            }
            if !stamped {
                writeln!(self.out, "#{}", time)?;
                stamped = true;
            }
            Self::write_value(&mut self.out, i, sig)?;
            if i < self.last.len() {
                self.last[i] = sig.value;
            }
        }
        Ok(())
    }

    /// Flush and release the trace file.
    pub fn finish(mut self) -> io::Result<()> {
        self.out.flush()
    }
}
