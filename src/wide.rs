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
//! 128-bit fixed-point primitives over `(lo, hi)` 64-bit limb pairs.
//!
//! The default backend rides on `u128` widening multiplication, which lowers
//! to the single 64x64->128 instruction on 64-bit targets. `portable-wide`
//! swaps in four 32x32->64 products with manual carries for targets where
//! `u128` is emulated.

/// Full 64x64->128 product as `(lo, hi)`.
#[cfg(not(feature = "portable-wide"))]
#[allow(dead_code)]
#[inline(always)]
pub(crate) const fn umul128(a: u64, b: u64) -> (u64, u64) {
    let p = a as u128 * b as u128;
    (p as u64, (p >> 64) as u64)
}

/// Full 64x64->128 product as `(lo, hi)` without touching `u128`.
#[cfg(feature = "portable-wide")]
#[allow(dead_code)]
#[inline(always)]
pub(crate) const fn umul128(a: u64, b: u64) -> (u64, u64) {
    let a_lo = a & 0xffff_ffff;
    let a_hi = a >> 32;
    let b_lo = b & 0xffff_ffff;
    let b_hi = b >> 32;

    let b00 = a_lo * b_lo;
    let b01 = a_lo * b_hi;
    let b10 = a_hi * b_lo;
    let b11 = a_hi * b_hi;

    // partial sums stay below 2^64: each addend is at most (2^32 - 1)^2
    let mid1 = b10 + (b00 >> 32);
    let mid2 = b01 + (mid1 & 0xffff_ffff);

    let p_hi = b11 + (mid1 >> 32) + (mid2 >> 32);
    let p_lo = (mid2 << 32) | (b00 & 0xffff_ffff);
    (p_lo, p_hi)
}

/// Right shift of a 128-bit limb pair, `0 < dist < 64`.
#[allow(dead_code)]
#[inline(always)]
pub(crate) const fn shift_right_128(lo: u64, hi: u64, dist: u32) -> u64 {
    debug_assert!(dist > 0 && dist < 64);
    (hi << (64 - dist)) | (lo >> dist)
}

/// Computes `floor((m * mul) / 2^j)`.
///
/// `m < 2^55` and `mul` carries 125 significant bits, so the product fits
/// 180 bits; with `j` in `118..=125` the result fits a `u64` and the
/// effective shift `j - 64` never leaves `(0, 64)`.
#[cfg(not(feature = "portable-wide"))]
#[inline(always)]
pub(crate) const fn mul_shift_64(m: u64, mul: (u64, u64), j: i32) -> u64 {
    debug_assert!(j > 64 && j < 128);
    let b0 = m as u128 * mul.0 as u128;
    let b2 = m as u128 * mul.1 as u128;
    (((b0 >> 64) + b2) >> (j - 64)) as u64
}

/// Computes `floor((m * mul) / 2^j)` on 32-bit limbs.
#[cfg(feature = "portable-wide")]
#[inline(always)]
pub(crate) const fn mul_shift_64(m: u64, mul: (u64, u64), j: i32) -> u64 {
    debug_assert!(j > 64 && j < 128);
    let (_, high0) = umul128(m, mul.0);
    let (low1, mut high1) = umul128(m, mul.1);
    let sum = low1.wrapping_add(high0);
    if sum < high0 {
        high1 += 1;
    }
    shift_right_128(sum, high1, (j - 64) as u32)
}

/// Scales the midpoint triple in one pass: returns `(v, v+, v-)` for the
/// input `m` and its upper/lower half-way neighbors.
#[inline(always)]
pub(crate) const fn mul_shift_all_64(
    m: u64,
    mul: (u64, u64),
    j: i32,
    mm_shift: u64,
) -> (u64, u64, u64) {
    let v = mul_shift_64(4 * m, mul, j);
    let vp = mul_shift_64(4 * m + 2, mul, j);
    let vm = mul_shift_64(4 * m - 1 - mm_shift, mul, j);
    (v, vp, vm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_umul128() {
        assert_eq!(umul128(0, 0), (0, 0));
        assert_eq!(umul128(1, u64::MAX), (u64::MAX, 0));
        assert_eq!(umul128(u64::MAX, u64::MAX), (1, u64::MAX - 1));
        assert_eq!(umul128(1 << 32, 1 << 32), (0, 1));
        assert_eq!(
            umul128(0x0123_4567_89ab_cdef, 0xfedc_ba98_7654_3210),
            (0x2236_d88f_e561_8cf0, 0x0121_fa00_ad77_d742)
        );
    }

    #[test]
    fn test_shift_right_128() {
        assert_eq!(shift_right_128(0, 1, 1), 1 << 63);
        assert_eq!(shift_right_128(u64::MAX, 0, 1), u64::MAX >> 1);
        assert_eq!(shift_right_128(0, 0xaa, 8), 0xaa << 56);
    }

    #[test]
    fn test_mul_shift_64_against_wide() {
        // cross-check the limb path against plain 128-bit arithmetic over a
        // deterministic scatter of operands in the real operating range
        let mut m: u64 = 3;
        for _ in 0..10_000 {
            m = m.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let mant = (m >> 9) & ((1u64 << 55) - 1);
            if mant == 0 {
                continue;
            }
            let lo = m.wrapping_mul(0x9e3779b97f4a7c15);
            let hi = (m ^ lo).wrapping_mul(0xbf58476d1ce4e5b9) >> 3; // keep below 2^61
            for j in [118i32, 120, 123, 125] {
                let wide = ((mant as u128 * lo as u128) >> 64)
                    .wrapping_add(mant as u128 * hi as u128);
                let expected = (wide >> (j - 64)) as u64;
                assert_eq!(mul_shift_64(mant, (lo, hi), j), expected);
            }
        }
    }

    #[test]
    fn test_mul_shift_all_64() {
        let mul = (0x4000_0000_0000_0001, 0x2000_0000_0000_0000);
        let (v, vp, vm) = mul_shift_all_64(1 << 52, mul, 120, 1);
        assert_eq!(v, mul_shift_64(1 << 54, mul, 120));
        assert_eq!(vp, mul_shift_64((1 << 54) + 2, mul, 120));
        assert_eq!(vm, mul_shift_64((1 << 54) - 2, mul, 120));
    }
}
