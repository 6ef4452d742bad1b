//! Zigzag coding of signed deltas.
//!
//! Maps signed integers onto unsigned codes so that values of small magnitude,
//! positive or negative, get small codes: `0, -1, 1, -2, 2, ...` become
//! `0, 1, 2, 3, 4, ...`.

/// Decode a 16-bit zigzag code into a signed delta.
///
/// Even codes map to `c / 2`, odd codes to `-((c + 1) / 2)`.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub const fn zigzag_decode(code: u16) -> i16 {
    ((code >> 1) as i16) ^ -((code & 1) as i16)
}

/// Encode a signed delta as a 16-bit zigzag code.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn zigzag_encode(delta: i16) -> u16 {
    ((delta << 1) ^ (delta >> 15)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zigzag_decode_small_values() {
        assert_eq!(zigzag_decode(0), 0);
        assert_eq!(zigzag_decode(1), -1);
        assert_eq!(zigzag_decode(2), 1);
        assert_eq!(zigzag_decode(3), -2);
        assert_eq!(zigzag_decode(4), 2);
    }

    #[test]
    fn test_zigzag_decode_extremes() {
        assert_eq!(zigzag_decode(u16::MAX - 1), i16::MAX);
        assert_eq!(zigzag_decode(u16::MAX), i16::MIN);
    }

    #[test]
    fn test_zigzag_code_roundtrip_exhaustive() {
        for code in 0..=u16::MAX {
            assert_eq!(zigzag_encode(zigzag_decode(code)), code);
        }
    }

    proptest! {
        #[test]
        fn prop_zigzag_delta_roundtrip(delta in any::<i16>()) {
            prop_assert_eq!(zigzag_decode(zigzag_encode(delta)), delta);
        }

        #[test]
        fn prop_zigzag_keeps_small_magnitudes_small(delta in -1000i16..1000) {
            prop_assert!(u32::from(zigzag_encode(delta)) <= 2 * u32::from(delta.unsigned_abs()));
        }
    }
}
