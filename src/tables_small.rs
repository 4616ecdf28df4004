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
//! Powers of five split into two 64-bit limbs, 125 significant bits each.
//!
//! Compact power-of-five provider: stride-26 anchors plus on-the-fly
//! interpolation.
//!
//! Every 26th entry of the full tables is stored verbatim; the rest are
//! recovered by multiplying the nearest anchor with an exact small power of
//! five (a 192-bit intermediate), renormalizing to 125 bits, and applying a
//! packed 2-bit correction. The result equals the full-table entry
//! bit-for-bit at every index, which the tests re-check.
use crate::common::pow5_bits;
use crate::wide::{shift_right_128, umul128};

const STRIDE: usize = 26;

static POW5_TABLE: [u64; 26] = [
    1, 5, 25, 125,
    625, 3125, 15625, 78125,
    390625, 1953125, 9765625, 48828125,
    244140625, 1220703125, 6103515625, 30517578125,
    152587890625, 762939453125, 3814697265625, 19073486328125,
    95367431640625, 476837158203125, 2384185791015625, 11920928955078125,
    59604644775390625, 298023223876953125,
];

static POW5_ANCHORS: [(u64, u64); 13] = [
    (0x0000000000000000, 0x1000000000000000), (0x0000000000000000, 0x14adf4b7320334b9),
    (0x0e549208b31adb10, 0x1aba4714957d300d), (0x6dc6ad264d8f0866, 0x1145b7e285bf98f5),
    (0xeb1dbd923d8596ca, 0x1652efdc6018a1fc), (0xb4c1b80b22ae923c, 0x1cda62055b2d9d83),
    (0x5bb28b4e8f7e4c30, 0x12a5568b9f52f416), (0xf08aed437682d4fb, 0x1819651531f9e78f),
    (0xb4ee134ad99bf150, 0x1f25c186a6f04c28), (0x16499ecb70c25f03, 0x1420eb449c8842e6),
    (0x85a56ead360865b0, 0x1a03fde214caf085), (0x093db1d57999890b, 0x10cfeb353a97dad8),
    (0xcf38bb735e3f36ac, 0x15baaf44fa52673e),
];

static POW5_INV_ANCHORS: [(u64, u64); 15] = [
    (0x0000000000000001, 0x2000000000000000), (0x52a6c95fc0655034, 0x18c240c4aecb13bb),
    (0x7ca8d50071dfc806, 0x1327fc58da0f6ff5), (0x6520247d3556476e, 0x1da48ce468e7c702),
    (0x6139cdd76802e6e9, 0x16ef5b40c2fc7779), (0xf951a7ff43de8c79, 0x11bebdf578b2f391),
    (0x7be8bee8d6e957e8, 0x1b758d848fac54b0), (0x8bd3f9e999a423ea, 0x153eda614071a3b7),
    (0x0848f973cb3ee3ce, 0x10701bd527b4978c), (0x153285ebb9efbfa2, 0x196fbb9bb44db44d),
    (0xadeee7f86c07b696, 0x13ae3591f5b4d936), (0x4d686a4eaf182222, 0x1e74404f3daada91),
    (0x98c0a106e09ebd9f, 0x17900ea4fda7c257), (0x8f20e37371497d0e, 0x123b140576d820b2),
    (0xb043138134743d85, 0x1c35f4275f7a29ad),
];

static POW5_OFFSETS: [u32; 21] = [
    0x00000000, 0x00000000, 0x00000000, 0x00000000, 0x40000000, 0x59695995,
    0x55545555, 0x56555515, 0x41150504, 0x40555410, 0x44555145, 0x44504540,
    0x45555550, 0x40004000, 0x96440440, 0x55565565, 0x54454045, 0x40154151,
    0x55559155, 0x51405555, 0x00000105,
];

static POW5_INV_OFFSETS: [u32; 22] = [
    0x54544554, 0x04055545, 0x10041000, 0x00400414, 0x40010000, 0x41155555,
    0x00000454, 0x00010044, 0x40000000, 0x44000041, 0x50454450, 0x55550054,
    0x51655554, 0x40004000, 0x01000001, 0x00010500, 0x51515411, 0x05555554,
    0x50411500, 0x40040000, 0x05040110, 0x00000000,
];

/// Reconstructs the 125-bit fraction of `5^i` for `i` in `0..326`.
pub(crate) fn pow5(i: usize) -> (u64, u64) {
    let base = i / STRIDE;
    let base2 = base * STRIDE;
    let offset = i - base2;
    let (a_lo, a_hi) = POW5_ANCHORS[base];
    if offset == 0 {
        return (a_lo, a_hi);
    }
    let m = POW5_TABLE[offset];
    let (low0, high0) = umul128(m, a_lo);
    let (low1, mut high1) = umul128(m, a_hi);
    let sum = high0.wrapping_add(low1);
    if sum < high0 {
        high1 += 1;
    }
    // renormalize the 192-bit product [high1 sum low0] back to 125 bits
    let delta = (pow5_bits(i as i32) - pow5_bits(base2 as i32)) as u32;
    let corr = (POW5_OFFSETS[i / 16] >> ((i % 16) << 1)) & 3;
    (
        shift_right_128(low0, sum, delta) + corr as u64,
        shift_right_128(sum, high1, delta),
    )
}

/// Reconstructs the 125-bit fraction of `2^k / 5^i` for `i` in `0..342`.
///
/// The anchor low limb is taken one ulp down before multiplying; the `+ 1`
/// puts it back so the packed correction stays within 2 bits.
pub(crate) fn inv_pow5(i: usize) -> (u64, u64) {
    let base = (i + STRIDE - 1) / STRIDE;
    let base2 = base * STRIDE;
    let offset = base2 - i;
    let (a_lo, a_hi) = POW5_INV_ANCHORS[base];
    if offset == 0 {
        return (a_lo, a_hi);
    }
    let m = POW5_TABLE[offset];
    let (low0, high0) = umul128(m, a_lo - 1);
    let (low1, mut high1) = umul128(m, a_hi);
    let sum = high0.wrapping_add(low1);
    if sum < high0 {
        high1 += 1;
    }
    let delta = (pow5_bits(base2 as i32) - pow5_bits(i as i32)) as u32;
    let corr = (POW5_INV_OFFSETS[i / 16] >> ((i % 16) << 1)) & 3;
    (
        shift_right_128(low0, sum, delta) + 1 + corr as u64,
        shift_right_128(sum, high1, delta),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables;

    #[test]
    fn test_pow5_matches_full_table() {
        for i in 0..326usize {
            assert_eq!(pow5(i), tables::pow5(i), "index {}", i);
        }
    }

    #[test]
    fn test_inv_pow5_matches_full_table() {
        for i in 0..342usize {
            assert_eq!(inv_pow5(i), tables::inv_pow5(i), "index {}", i);
        }
    }
}
