/*
 * // Copyright (c) Radzivon Bartoshyk 6/2025. All rights reserved.
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
use crate::common::{
    DOUBLE_EXPONENT_BITS, DOUBLE_MANTISSA_BITS, decimal_digits, decimal_length_17,
};
use crate::decimal::{ShortestDecimal, shortest};

/// Worst case canonical length: `-d.<16 digits>E-xxx`.
pub const MAX_SCIENTIFIC_LEN: usize = 24;

static DIGIT_TABLE: &[u8; 200] = b"0001020304050607080910111213141516171819\
2021222324252627282930313233343536373839\
4041424344454647484950515253545556575859\
6061626364656667686970717273747576777879\
8081828384858687888990919293949596979899";

/// Special values keep the historical spellings; NaN drops the sign.
fn write_special(result: &mut [u8], sign: bool, exponent_nonzero: bool, mantissa_nonzero: bool) -> usize {
    if mantissa_nonzero {
        result[..3].copy_from_slice(b"NaN");
        return 3;
    }
    let mut index = 0usize;
    if sign {
        result[0] = b'-';
        index = 1;
    }
    if exponent_nonzero {
        result[index..index + 8].copy_from_slice(b"Infinity");
        return index + 8;
    }
    result[index..index + 3].copy_from_slice(b"0E0");
    index + 3
}

/// Renders the decimal as `[-]d(.ddd)E[-]dd(d)`.
///
/// Mantissa digits are emitted back to front in two-digit strides out of
/// [`DIGIT_TABLE`], with an eight-digit head start while the mantissa still
/// exceeds 32 bits. The slot after the leading digit is left open for the
/// dot.
fn write_decimal(v: ShortestDecimal, sign: bool, result: &mut [u8]) -> usize {
    let mut index = 0usize;
    if sign {
        result[index] = b'-';
        index += 1;
    }

    let mut output = v.mantissa;
    let olength = decimal_length_17(output) as usize;

    let mut i = 0usize;
    if (output >> 32) != 0 {
        // one 64-bit division carves off eight digits, the rest is 32-bit
        let q = output / 100_000_000;
        let mut output2 = (output - 100_000_000 * q) as u32;
        output = q;

        let c = output2 % 10_000;
        output2 /= 10_000;
        let d = output2 % 10_000;
        let c0 = ((c % 100) << 1) as usize;
        let c1 = ((c / 100) << 1) as usize;
        let d0 = ((d % 100) << 1) as usize;
        let d1 = ((d / 100) << 1) as usize;
        let base = index + olength - i;
        result[base - 1..base + 1].copy_from_slice(&DIGIT_TABLE[c0..c0 + 2]);
        result[base - 3..base - 1].copy_from_slice(&DIGIT_TABLE[c1..c1 + 2]);
        result[base - 5..base - 3].copy_from_slice(&DIGIT_TABLE[d0..d0 + 2]);
        result[base - 7..base - 5].copy_from_slice(&DIGIT_TABLE[d1..d1 + 2]);
        i += 8;
    }
    let mut output2 = output as u32;
    while output2 >= 10_000 {
        let c = output2 % 10_000;
        output2 /= 10_000;
        let c0 = ((c % 100) << 1) as usize;
        let c1 = ((c / 100) << 1) as usize;
        let base = index + olength - i;
        result[base - 1..base + 1].copy_from_slice(&DIGIT_TABLE[c0..c0 + 2]);
        result[base - 3..base - 1].copy_from_slice(&DIGIT_TABLE[c1..c1 + 2]);
        i += 4;
    }
    if output2 >= 100 {
        let c = ((output2 % 100) << 1) as usize;
        output2 /= 100;
        let base = index + olength - i;
        result[base - 1..base + 1].copy_from_slice(&DIGIT_TABLE[c..c + 2]);
        i += 2;
    }
    if output2 >= 10 {
        let c = (output2 << 1) as usize;
        // the dot goes between these two, so no pair copy here
        result[index + olength - i] = DIGIT_TABLE[c + 1];
        result[index] = DIGIT_TABLE[c];
    } else {
        result[index] = b'0' + output2 as u8;
    }

    if olength > 1 {
        result[index + 1] = b'.';
        index += olength + 1;
    } else {
        index += 1;
    }

    result[index] = b'E';
    index += 1;
    let mut exp = v.exponent + olength as i32 - 1;
    if exp < 0 {
        result[index] = b'-';
        index += 1;
        exp = -exp;
    }
    // canonical exponents stay within three digits, no zero padding
    let elen = decimal_digits(exp as u32) as usize;
    let mut e = exp as u32;
    for k in (0..elen).rev() {
        result[index + k] = b'0' + (e % 10) as u8;
        e /= 10;
    }
    index + elen
}

/// Writes the canonical scientific form of `value` into `dst` and returns
/// the number of bytes used.
///
/// The output grammar is `[-]d(.ddd…)E[-]dd(d)` for finite nonzero values,
/// `0E0` / `-0E0` for the zeros, and `NaN` / `Infinity` / `-Infinity`
/// otherwise. `dst` must hold at least [`MAX_SCIENTIFIC_LEN`] bytes.
pub fn write_scientific(value: f64, dst: &mut [u8]) -> usize {
    assert!(
        dst.len() >= MAX_SCIENTIFIC_LEN,
        "destination must hold {} bytes",
        MAX_SCIENTIFIC_LEN
    );
    let bits = value.to_bits();
    let sign = bits >> (DOUBLE_MANTISSA_BITS + DOUBLE_EXPONENT_BITS) != 0;
    let ieee_mantissa = bits & ((1u64 << DOUBLE_MANTISSA_BITS) - 1);
    let ieee_exponent = ((bits >> DOUBLE_MANTISSA_BITS) & ((1u64 << DOUBLE_EXPONENT_BITS) - 1)) as u32;

    if ieee_exponent == (1u32 << DOUBLE_EXPONENT_BITS) - 1
        || (ieee_exponent == 0 && ieee_mantissa == 0)
    {
        return write_special(dst, sign, ieee_exponent != 0, ieee_mantissa != 0);
    }
    write_decimal(shortest(ieee_mantissa, ieee_exponent), sign, dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sci(x: f64) -> String {
        let mut buf = [0u8; MAX_SCIENTIFIC_LEN];
        let n = write_scientific(x, &mut buf);
        String::from_utf8_lossy(&buf[..n]).into_owned()
    }

    #[test]
    fn test_specials() {
        assert_eq!(sci(0.0), "0E0");
        assert_eq!(sci(-0.0), "-0E0");
        assert_eq!(sci(f64::INFINITY), "Infinity");
        assert_eq!(sci(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(sci(f64::NAN), "NaN");
        assert_eq!(sci(-f64::NAN), "NaN");
    }

    #[test]
    fn test_basic_values() {
        assert_eq!(sci(1.0), "1E0");
        assert_eq!(sci(-1.0), "-1E0");
        assert_eq!(sci(0.1), "1E-1");
        assert_eq!(sci(0.3), "3E-1");
        assert_eq!(sci(1.5e-10), "1.5E-10");
        assert_eq!(sci(123456789.0), "1.23456789E8");
        assert_eq!(sci(1.23e45), "1.23E45");
        assert_eq!(sci(core::f64::consts::PI), "3.141592653589793E0");
        assert_eq!(sci(-7.38905609893065), "-7.38905609893065E0");
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(sci(f64::MIN_POSITIVE), "2.2250738585072014E-308");
        assert_eq!(sci(5e-324), "5E-324");
        assert_eq!(sci(-5e-324), "-5E-324");
        assert_eq!(sci(1e-323), "1E-323");
        assert_eq!(sci(f64::MAX), "1.7976931348623157E308");
        assert_eq!(sci(-f64::MAX), "-1.7976931348623157E308");
        assert_eq!(sci(1e308), "1E308");
        for k in 0..=53u32 {
            let x = (1u64 << k) as f64;
            let s = sci(x);
            let parsed: f64 = s.parse().unwrap();
            assert_eq!(parsed, x, "2^{} -> {}", k, s);
        }
    }

    #[test]
    fn test_tie_rounds_to_even() {
        // 2^-25 is exactly 2.98023223876953125e-8; the dropped tail is an
        // exact half, so the kept digit stays even
        assert_eq!(sci(2.0f64.powi(-25)), "2.9802322387695312E-8");
        assert_eq!(sci(2.0f64.powi(-24)), "5.960464477539063E-8");
        assert_eq!(sci(17179869184.007812), "1.7179869184007812E10");
        assert_eq!(sci(137438953472.07812), "1.3743895347207812E11");
    }

    #[test]
    fn test_never_longer_than_max() {
        for x in [
            -f64::MAX,
            f64::MIN_POSITIVE,
            -2.2250738585072014e-308,
            -9.999999999999999e-300,
            1.2345678901234567e-111,
        ] {
            let mut buf = [0u8; MAX_SCIENTIFIC_LEN];
            let n = write_scientific(x, &mut buf);
            assert!(n <= MAX_SCIENTIFIC_LEN);
        }
    }

    #[test]
    fn test_roundtrip_bulk() {
        use rand::Rng;
        let mut rng = rand::rng();
        let mut buf = [0u8; MAX_SCIENTIFIC_LEN];
        for _ in 0..1_000_000u32 {
            let bits: u64 = rng.random();
            let x = f64::from_bits(bits);
            if !x.is_finite() {
                continue;
            }
            let n = write_scientific(x, &mut buf);
            let s = core::str::from_utf8(&buf[..n]).unwrap();
            let parsed: f64 = s.parse().unwrap();
            assert_eq!(parsed.to_bits(), bits, "{}", s);
        }
    }
}
