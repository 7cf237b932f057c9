//! Width-parametrized two's-complement helpers.
//!
//! A streaming filter core exposes its data ports as plain machine words;
//! these functions move sample values on and off those ports at the core's
//! declared bit widths. Both are pure and keep no state.

/// Reinterpret the low `width` bits of `raw` as a two's-complement signed
/// integer, sign-extended to 64 bits.
///
/// # Example
///
/// ```
/// use fir_harness::bits::sign_extend;
///
/// assert_eq!(sign_extend(0xFF, 8), -1);
/// assert_eq!(sign_extend(0x7F, 8), 127);
/// assert_eq!(sign_extend(0x80, 8), -128);
/// ```
pub fn sign_extend(raw: u64, width: u32) -> i64 {
    debug_assert!((1..=64).contains(&width), "width {} out of range", width);
    let shift = 64 - width;
    ((raw << shift) as i64) >> shift
}

/// Mask `value` to its low `width` bits, zero-extended.
///
/// This is the inverse of [`sign_extend`] for in-range values and is used to
/// place signed samples and coefficients onto the core's unsigned buses.
///
/// # Example
///
/// ```
/// use fir_harness::bits::mask;
///
/// assert_eq!(mask(-1, 8), 0xFF);
/// assert_eq!(mask(5, 8), 5);
/// ```
pub fn mask(value: i64, width: u32) -> u64 {
    debug_assert!((1..=64).contains(&width), "width {} out of range", width);
    if width == 64 {
        value as u64
    } else {
        (value as u64) & ((1u64 << width) - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_extend_positive() {
        assert_eq!(sign_extend(0, 12), 0);
        assert_eq!(sign_extend(1, 12), 1);
        assert_eq!(sign_extend(0x7FF, 12), 2047);
    }

    #[test]
    fn test_sign_extend_negative() {
        assert_eq!(sign_extend(0x800, 12), -2048);
        assert_eq!(sign_extend(0xFFF, 12), -1);
        assert_eq!(sign_extend(0b10, 2), -2);
    }

    #[test]
    fn test_sign_extend_ignores_upper_bits() {
        // Garbage above the declared width must not leak through.
        assert_eq!(sign_extend(0xDEAD_0001, 8), 1);
        assert_eq!(sign_extend(0xDEAD_00FF, 8), -1);
    }

    #[test]
    fn test_sign_extend_full_width() {
        assert_eq!(sign_extend(u64::MAX, 64), -1);
        assert_eq!(sign_extend(42, 64), 42);
    }

    #[test]
    fn test_mask_basics() {
        assert_eq!(mask(0, 8), 0);
        assert_eq!(mask(127, 8), 127);
        assert_eq!(mask(-128, 8), 0x80);
        assert_eq!(mask(-1, 16), 0xFFFF);
    }

    #[test]
    fn test_mask_full_width() {
        assert_eq!(mask(-1, 64), u64::MAX);
    }

    #[test]
    fn test_roundtrip() {
        for width in [4u32, 8, 12, 16, 24, 33] {
            let lo = -(1i64 << (width - 1));
            let hi = (1i64 << (width - 1)) - 1;
            for v in [lo, lo + 1, -1, 0, 1, hi - 1, hi] {
                assert_eq!(sign_extend(mask(v, width), width), v, "width {}", width);
            }
        }
    }
}
