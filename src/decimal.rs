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
//! Shortest-decimal conversion of a decoded `binary64`.
//!
//! The value and its two half-way neighbors are scaled by a power of ten
//! into three integers `v- < v <= v+`; any integer in that window parses
//! back to the input, and the one with the fewest digits wins. Ties round
//! so the last kept digit ends up even.
use crate::common::{
    DOUBLE_BIAS, DOUBLE_MANTISSA_BITS, POW5_BITCOUNT, POW5_INV_BITCOUNT, log10_pow2, log10_pow5,
    pow5_bits,
};
#[cfg(not(feature = "small-tables"))]
use crate::tables::{inv_pow5, pow5};
#[cfg(feature = "small-tables")]
use crate::tables_small::{inv_pow5, pow5};
use crate::wide::mul_shift_all_64;

/// A finite nonzero double expressed as `mantissa * 10^exponent`, with the
/// fewest mantissa digits that still parse back to the original value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ShortestDecimal {
    pub(crate) mantissa: u64,
    pub(crate) exponent: i32,
}

/// How many times 5 divides `value`; `value` must be nonzero.
///
/// Multiplying by the modular inverse of 5 keeps the running value at or
/// below `floor(2^64 / 5)` exactly as long as another factor divides out.
#[inline]
pub(crate) const fn pow5_factor(mut value: u64) -> u32 {
    const INV_5: u64 = 14_757_395_258_967_641_293;
    const N_DIV_5: u64 = 3_689_348_814_741_910_323;
    let mut count = 0u32;
    loop {
        debug_assert!(value != 0);
        value = value.wrapping_mul(INV_5);
        if value > N_DIV_5 {
            break;
        }
        count += 1;
    }
    count
}

#[inline]
const fn multiple_of_power_of_5(value: u64, p: u32) -> bool {
    pow5_factor(value) >= p
}

#[inline]
const fn multiple_of_power_of_2(value: u64, p: u32) -> bool {
    debug_assert!(p < 64);
    value & ((1u64 << p) - 1) == 0
}

/// Core conversion for finite nonzero inputs that are not handled by the
/// small-integer shortcut.
pub(crate) fn d2d(ieee_mantissa: u64, ieee_exponent: u32) -> ShortestDecimal {
    let e2: i32;
    let m2: u64;
    if ieee_exponent == 0 {
        e2 = 1 - DOUBLE_BIAS - DOUBLE_MANTISSA_BITS as i32 - 2;
        m2 = ieee_mantissa;
    } else {
        e2 = ieee_exponent as i32 - DOUBLE_BIAS - DOUBLE_MANTISSA_BITS as i32 - 2;
        m2 = (1u64 << DOUBLE_MANTISSA_BITS) | ieee_mantissa;
    }
    let even = m2 & 1 == 0;
    let accept_bounds = even;

    // the interval of information-preserving outputs spans the half-way
    // points to the neighboring floats; multiply everything by 4 so both
    // ends become integers after scaling
    let mv = 4 * m2;
    // the lower neighbor is half as far away when the mantissa is all zeros
    // (predecessor has a smaller binary exponent), except at the smallest
    // normal exponent
    let mm_shift = (ieee_mantissa != 0 || ieee_exponent <= 1) as u64;

    let mut vr: u64;
    let mut vp: u64;
    let mut vm: u64;
    let e10: i32;
    let mut vm_is_trailing_zeros = false;
    let mut vr_is_trailing_zeros = false;
    if e2 >= 0 {
        let q = log10_pow2(e2) - (e2 > 3) as u32;
        e10 = q as i32;
        let k = POW5_INV_BITCOUNT + pow5_bits(q as i32) - 1;
        let i = -e2 + q as i32 + k;
        let scaled = mul_shift_all_64(m2, inv_pow5(q as usize), i, mm_shift);
        vr = scaled.0;
        vp = scaled.1;
        vm = scaled.2;
        if q <= 21 {
            // at most one of mm, mv, mp can be a multiple of 5, if any
            if mv % 5 == 0 {
                vr_is_trailing_zeros = multiple_of_power_of_5(mv, q);
            } else if accept_bounds {
                vm_is_trailing_zeros = multiple_of_power_of_5(mv - 1 - mm_shift, q);
            } else if multiple_of_power_of_5(mv + 2, q) {
                vp -= 1;
            }
        }
    } else {
        let q = log10_pow5(-e2) - (-e2 > 1) as u32;
        e10 = q as i32 + e2;
        let i = -e2 - q as i32;
        let k = pow5_bits(i) - POW5_BITCOUNT;
        let j = q as i32 - k;
        let scaled = mul_shift_all_64(m2, pow5(i as usize), j, mm_shift);
        vr = scaled.0;
        vp = scaled.1;
        vm = scaled.2;
        if q <= 1 {
            // mv = 4 m2 always has two trailing zero bits
            vr_is_trailing_zeros = true;
            if accept_bounds {
                // mm = mv - 1 - mm_shift has one iff mm_shift == 1
                vm_is_trailing_zeros = mm_shift == 1;
            } else {
                // mp = mv + 2 always has one
                vp -= 1;
            }
        } else if q < 63 {
            // the scaled value keeps q trailing zeros iff mv does
            vr_is_trailing_zeros = multiple_of_power_of_2(mv, q);
        }
    }

    let mut removed = 0i32;
    let mut last_removed_digit = 0u8;
    let output: u64;
    if vm_is_trailing_zeros || vr_is_trailing_zeros {
        // general path, ~0.7% of inputs
        loop {
            let vp_div10 = vp / 10;
            let vm_div10 = vm / 10;
            if vp_div10 <= vm_div10 {
                break;
            }
            let vm_mod10 = vm - 10 * vm_div10;
            let vr_div10 = vr / 10;
            let vr_mod10 = vr - 10 * vr_div10;
            vm_is_trailing_zeros &= vm_mod10 == 0;
            vr_is_trailing_zeros &= last_removed_digit == 0;
            last_removed_digit = vr_mod10 as u8;
            vr = vr_div10;
            vp = vp_div10;
            vm = vm_div10;
            removed += 1;
        }
        if vm_is_trailing_zeros {
            loop {
                let vm_div10 = vm / 10;
                let vm_mod10 = vm - 10 * vm_div10;
                if vm_mod10 != 0 {
                    break;
                }
                let vp_div10 = vp / 10;
                let vr_div10 = vr / 10;
                let vr_mod10 = vr - 10 * vr_div10;
                vr_is_trailing_zeros &= last_removed_digit == 0;
                last_removed_digit = vr_mod10 as u8;
                vr = vr_div10;
                vp = vp_div10;
                vm = vm_div10;
                removed += 1;
            }
        }
        if vr_is_trailing_zeros && last_removed_digit == 5 && vr % 2 == 0 {
            // exact tie: round down so the last digit stays even
            last_removed_digit = 4;
        }
        let round_up =
            (vr == vm && (!accept_bounds || !vm_is_trailing_zeros)) || last_removed_digit >= 5;
        output = vr + round_up as u64;
    } else {
        // common path, ~99.3% of inputs; try two digits at once first
        let mut round_up = false;
        let vp_div100 = vp / 100;
        let vm_div100 = vm / 100;
        if vp_div100 > vm_div100 {
            let vr_div100 = vr / 100;
            let vr_mod100 = vr - 100 * vr_div100;
            round_up = vr_mod100 >= 50;
            vr = vr_div100;
            vp = vp_div100;
            vm = vm_div100;
            removed += 2;
        }
        loop {
            let vp_div10 = vp / 10;
            let vm_div10 = vm / 10;
            if vp_div10 <= vm_div10 {
                break;
            }
            let vr_div10 = vr / 10;
            let vr_mod10 = vr - 10 * vr_div10;
            round_up = vr_mod10 >= 5;
            vr = vr_div10;
            vp = vp_div10;
            vm = vm_div10;
            removed += 1;
        }
        output = vr + (vr == vm || round_up) as u64;
    }

    ShortestDecimal {
        mantissa: output,
        exponent: e10 + removed,
    }
}

/// Exact integers in `[1, 2^53)` skip the interval search entirely.
#[inline]
fn small_int(ieee_mantissa: u64, ieee_exponent: u32) -> Option<ShortestDecimal> {
    let m2 = (1u64 << DOUBLE_MANTISSA_BITS) | ieee_mantissa;
    let e2 = ieee_exponent as i32 - DOUBLE_BIAS - DOUBLE_MANTISSA_BITS as i32;
    if e2 > 0 || e2 < -52 {
        // integer at or above 2^53, or a value with a fractional part
        return None;
    }
    let mask = (1u64 << -e2) - 1;
    if m2 & mask != 0 {
        return None;
    }
    Some(ShortestDecimal {
        mantissa: m2 >> -e2,
        exponent: 0,
    })
}

/// Shortest decimal for a decoded finite nonzero double.
pub(crate) fn shortest(ieee_mantissa: u64, ieee_exponent: u32) -> ShortestDecimal {
    if let Some(mut v) = small_int(ieee_mantissa, ieee_exponent) {
        // the canonical form keeps trailing zeros in the exponent instead
        loop {
            let q = v.mantissa / 10;
            if v.mantissa - 10 * q != 0 {
                break;
            }
            v.mantissa = q;
            v.exponent += 1;
        }
        v
    } else {
        d2d(ieee_mantissa, ieee_exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(x: f64) -> (u64, u32) {
        let bits = x.to_bits();
        (
            bits & ((1u64 << DOUBLE_MANTISSA_BITS) - 1),
            ((bits >> DOUBLE_MANTISSA_BITS) & 0x7ff) as u32,
        )
    }

    fn run(x: f64) -> (u64, i32) {
        let (m, e) = decode(x);
        let d = shortest(m, e);
        (d.mantissa, d.exponent)
    }

    #[test]
    fn test_pow5_factor() {
        assert_eq!(pow5_factor(1), 0);
        assert_eq!(pow5_factor(2), 0);
        assert_eq!(pow5_factor(5), 1);
        assert_eq!(pow5_factor(25), 2);
        assert_eq!(pow5_factor(125), 3);
        assert_eq!(pow5_factor(600), 2);
        assert_eq!(pow5_factor(100_000_000_000_000_000), 17);
        assert_eq!(pow5_factor(2_384_185_791_015_625), 22);
    }

    #[test]
    fn test_multiple_of_power_of_2() {
        assert!(multiple_of_power_of_2(8, 3));
        assert!(!multiple_of_power_of_2(8, 4));
        assert!(multiple_of_power_of_2(0x10_0000, 20));
    }

    #[test]
    fn test_d2d_values() {
        assert_eq!(run(0.1), (1, -1));
        assert_eq!(run(0.3), (3, -1));
        assert_eq!(run(core::f64::consts::PI), (3141592653589793, -15));
        assert_eq!(run(12345.678), (12345678, -3));
        assert_eq!(run(1e20), (1, 20));
    }

    #[test]
    fn test_d2d_extremes() {
        // smallest normal
        assert_eq!(run(2.2250738585072014e-308), (22250738585072014, -324));
        // smallest subnormal
        assert_eq!(run(5e-324), (5, -324));
        assert_eq!(run(f64::MAX), (17976931348623157, 292));
    }

    #[test]
    fn test_small_int_fast_path() {
        assert_eq!(run(1.0), (1, 0));
        assert_eq!(run(5000.0), (5, 3));
        assert_eq!(run(4503599627370496.0), (4503599627370496, 0));
        // 2^53 and beyond decline the shortcut
        let (m, e) = decode(9007199254740992.0);
        assert!(small_int(m, e).is_none());
        let (m, e) = decode(0.5);
        assert!(small_int(m, e).is_none());
    }

    #[test]
    fn test_shortest_matches_std_length() {
        // std's LowerExp also prints shortest round-trip digits
        let mut state = 0x9e3779b97f4a7c15u64;
        for _ in 0..200_000 {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let x = f64::from_bits(state);
            if !x.is_finite() || x == 0.0 {
                continue;
            }
            let (m, e) = decode(x);
            let d = shortest(m, e);
            let mine = crate::common::decimal_length_17(d.mantissa);
            let std_digits = format!("{:e}", x)
                .chars()
                .take_while(|c| *c != 'e')
                .filter(|c| c.is_ascii_digit())
                .count() as u32;
            assert_eq!(mine, std_digits, "{:?} {:e}", x, x);
        }
    }
}
