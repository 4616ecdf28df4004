/*
 * // Copyright (c) Radzivon Bartoshyk 5/2025. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use num_traits::PrimInt;

pub(crate) const DOUBLE_MANTISSA_BITS: u32 = 52;
pub(crate) const DOUBLE_EXPONENT_BITS: u32 = 11;
pub(crate) const DOUBLE_BIAS: i32 = 1023;

pub(crate) const POW5_BITCOUNT: i32 = 125;
pub(crate) const POW5_INV_BITCOUNT: i32 = 125;

/// Returns `ceil(log2(5^e))` for `e >= 1`, and 1 for `e == 0`.
///
/// The multiplier is the smallest integer giving the exact result on the
/// whole interval `0..=3528`.
#[inline]
pub(crate) const fn pow5_bits(e: i32) -> i32 {
    debug_assert!(e >= 0 && e <= 3528);
    (((e as u32 * 1217359) >> 19) + 1) as i32
}

/// Returns `floor(log10(2^e))`, exact on `0..=1650`.
#[inline]
pub(crate) const fn log10_pow2(e: i32) -> u32 {
    debug_assert!(e >= 0 && e <= 1650);
    (e as u32 * 78913) >> 18
}

/// Returns `floor(log10(5^e))`, exact on `0..=2620`.
#[inline]
pub(crate) const fn log10_pow5(e: i32) -> u32 {
    debug_assert!(e >= 0 && e <= 2620);
    (e as u32 * 732923) >> 20
}

/// Decimal digit count of a shortest mantissa.
///
/// 17 digits always round-trip a double, so the argument never reaches
/// 10^17; the cascade runs high to low because long mantissas dominate.
#[inline]
pub(crate) const fn decimal_length_17(v: u64) -> u32 {
    debug_assert!(v < 100_000_000_000_000_000);
    if v >= 10_000_000_000_000_000 {
        return 17;
    }
    if v >= 1_000_000_000_000_000 {
        return 16;
    }
    if v >= 100_000_000_000_000 {
        return 15;
    }
    if v >= 10_000_000_000_000 {
        return 14;
    }
    if v >= 1_000_000_000_000 {
        return 13;
    }
    if v >= 100_000_000_000 {
        return 12;
    }
    if v >= 10_000_000_000 {
        return 11;
    }
    if v >= 1_000_000_000 {
        return 10;
    }
    if v >= 100_000_000 {
        return 9;
    }
    if v >= 10_000_000 {
        return 8;
    }
    if v >= 1_000_000 {
        return 7;
    }
    if v >= 100_000 {
        return 6;
    }
    if v >= 10_000 {
        return 5;
    }
    if v >= 1_000 {
        return 4;
    }
    if v >= 100 {
        return 3;
    }
    if v >= 10 {
        return 2;
    }
    1
}

/// Digit count for cold paths, generic over unsigned widths.
#[inline]
pub(crate) fn decimal_digits<T: PrimInt + From<u8>>(mut v: T) -> u32 {
    let ten = <T as From<u8>>::from(10u8);
    let mut count = 1u32;
    while v >= ten {
        v = v / ten;
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pow5_bits_range() {
        // verify against wide arithmetic as far as u128 carries, then check
        // the recurrence: the bit length of 5^e advances by 2 or 3
        let mut p: u128 = 1;
        let mut bits_prev = 1i32;
        for e in 0..=3528i32 {
            let expected = if e == 0 {
                1
            } else if let Some(np) = p.checked_mul(5) {
                p = np;
                128 - p.leading_zeros() as i32
            } else {
                let step = pow5_bits(e) - bits_prev;
                assert!(step == 2 || step == 3, "step {} at {}", step, e);
                pow5_bits(e)
            };
            assert_eq!(pow5_bits(e), expected, "e = {}", e);
            bits_prev = expected;
        }
    }

    #[test]
    fn test_log10_pow2_range() {
        let mut p: u128 = 1;
        for e in 0..=1650i32 {
            let expected = if e <= 127 {
                if e > 0 {
                    p <<= 1;
                }
                decimal_digits(p) - 1
            } else {
                // past u128 verify monotone steps of 0 or 1
                let prev = log10_pow2(e - 1);
                let cur = log10_pow2(e);
                assert!(cur == prev || cur == prev + 1);
                cur
            };
            assert_eq!(log10_pow2(e), expected, "e = {}", e);
        }
        assert_eq!(log10_pow2(0), 0);
        assert_eq!(log10_pow2(10), 3);
        assert_eq!(log10_pow2(1650), 496);
    }

    #[test]
    fn test_log10_pow5_range() {
        let mut p: u128 = 1;
        for e in 0..=55i32 {
            if e > 0 {
                p *= 5;
            }
            assert_eq!(log10_pow5(e), decimal_digits(p) - 1, "e = {}", e);
        }
        assert_eq!(log10_pow5(1), 0);
        assert_eq!(log10_pow5(2), 1);
        assert_eq!(log10_pow5(3), 2);
        assert_eq!(log10_pow5(2620), 1831);
    }

    #[test]
    fn test_decimal_length_17() {
        assert_eq!(decimal_length_17(1), 1);
        assert_eq!(decimal_length_17(9), 1);
        assert_eq!(decimal_length_17(10), 2);
        assert_eq!(decimal_length_17(99_999_999_999_999_999), 17);
        let mut p = 1u64;
        for digits in 1..=17u32 {
            assert_eq!(decimal_length_17(p), digits);
            assert_eq!(decimal_length_17(p * 9), digits);
            p = p.saturating_mul(10);
        }
    }

    #[test]
    fn test_decimal_digits_generic() {
        assert_eq!(decimal_digits(0u32), 1);
        assert_eq!(decimal_digits(7u32), 1);
        assert_eq!(decimal_digits(308u32), 3);
        assert_eq!(decimal_digits(u64::MAX), 20);
    }
}
