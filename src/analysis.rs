//! Lowpass characteristic estimation from a measured frequency response.
//!
//! Consumes the complex response vectors produced by
//! [`frequency_response`](crate::harness::StreamFilterHarness::frequency_response)
//! and derives scalar passband/stopband figures. Heuristic diagnostic
//! tooling for filter-verification workflows, not a correctness oracle.

use num_complex::Complex64;

/// Scalar characteristics estimated from a lowpass response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowpassCharacteristics {
    /// Passband edge in cycles/sample
    pub passband_edge: f64,
    /// Stopband edge in cycles/sample
    pub stopband_edge: f64,
    /// Dominant stopband lobe relative to DC, in dB (negative)
    pub stopband_db: f64,
    /// Peak-to-peak passband ripple as a linear power ratio
    pub passband_ripple: f64,
}

/// Estimate lowpass characteristics from a measured complex response over
/// normalized frequencies `[0, 0.5)`.
///
/// The passband is scanned below the first bin whose power drops under a
/// quarter of DC. Its edge is the highest bin still above a ripple-aware
/// floor derived from the passband's own observed minimum; when no ripple is
/// observed the floor falls back to the half-power point. The stopband edge
/// is the first bin at or below the dominant stopband lobe's level.
///
/// Returns `None` when the response is too short to scan or has no DC power.
pub fn estimate_lowpass_characteristics(
    response: &[Complex64],
) -> Option<LowpassCharacteristics> {
    let n = response.len();
    if n < 2 {
        return None;
    }

    // Power spectrum; ratios below are power ratios.
    let magv: Vec<f64> = response.iter().map(|c| c.norm_sqr()).collect();
    let dc = magv[0];
    if dc <= 0.0 {
        return None;
    }

    let midcut = magv
        .iter()
        .position(|&m| m < 0.25 * dc)
        .unwrap_or(n - 1);

    let mut maxpass = dc;
    for k in 0..=midcut {
        if magv[k] > maxpass {
            maxpass = magv[k];
        }
    }

    // A local minimum below the running floor counts as ripple.
    let mut minpass = dc;
    let mut ripple_seen = false;
    for k in (0..midcut).rev() {
        if magv[k] < minpass && magv[k + 1] > magv[k] {
            minpass = magv[k];
            ripple_seen = true;
        }
    }
    if !ripple_seen {
        minpass = maxpass / 2.0f64.sqrt();
    }

    let mut passband_bin = 0usize;
    for k in (0..=midcut).rev() {
        if magv[k] > minpass {
            passband_bin = k;
            break;
        }
    }

    // Dominant stopband lobe: the largest rising excursion past the cut.
    let mut maxstop = magv[n - 1];
    for k in midcut.max(1)..n {
        if magv[k] > magv[k - 1] && magv[k] > maxstop {
            maxstop = magv[k];
        }
    }
    let mut stopband_bin = n - 1;
    for k in midcut..n {
        if magv[k] <= maxstop {
            stopband_bin = k;
            break;
        }
    }

    Some(LowpassCharacteristics {
        passband_edge: passband_bin as f64 / (2.0 * n as f64),
        stopband_edge: stopband_bin as f64 / (2.0 * n as f64),
        stopband_db: 10.0 * (maxstop / dc).log10(),
        passband_ripple: 2.0 * (maxpass - minpass) / (maxpass + minpass),
    })
}
