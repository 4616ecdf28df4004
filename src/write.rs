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
use crate::scientific::{MAX_SCIENTIFIC_LEN, write_scientific};
use std::error::Error;
use std::fmt;

/// Presentation selected by the format byte of [`write_double`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notation {
    /// `d.ddde±x`, format byte `e`
    Scientific,
    /// `d.dddE±x`, format byte `E`
    ScientificUpper,
    /// Plain decimal `ddd.ddd`, format byte `f`
    Fixed,
}

impl Notation {
    #[inline]
    pub(crate) const fn format_byte(self) -> u8 {
        match self {
            Notation::Scientific => b'e',
            Notation::ScientificUpper => b'E',
            Notation::Fixed => b'f',
        }
    }
}

/// The format byte was none of `f`, `e`, `E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedNotation(pub u8);

impl fmt::Display for UnsupportedNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported notation byte {:#04x}", self.0)
    }
}

impl Error for UnsupportedNotation {}

impl TryFrom<u8> for Notation {
    type Error = UnsupportedNotation;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            b'e' => Ok(Notation::Scientific),
            b'E' => Ok(Notation::ScientificUpper),
            b'f' => Ok(Notation::Fixed),
            _ => Err(UnsupportedNotation(value)),
        }
    }
}

/// Counts the full output length while storing at most `dst.len() - 1`
/// characters, keeping the last slot for the terminating NUL.
struct Sink<'a> {
    dst: &'a mut [u8],
    cap: usize,
    len: usize,
}

impl<'a> Sink<'a> {
    fn new(dst: &'a mut [u8]) -> Self {
        let cap = dst.len().saturating_sub(1);
        Sink { dst, cap, len: 0 }
    }

    #[inline]
    fn push(&mut self, b: u8) {
        if self.len < self.cap {
            self.dst[self.len] = b;
        }
        self.len += 1;
    }

    #[inline]
    fn push_slice(&mut self, s: &[u8]) {
        for &b in s {
            self.push(b);
        }
    }

    #[inline]
    fn push_zeros(&mut self, n: usize) {
        for _ in 0..n {
            self.push(b'0');
        }
    }

    fn finish(self) -> usize {
        if !self.dst.is_empty() {
            self.dst[self.len.min(self.cap)] = 0;
        }
        self.len
    }
}

/// Bounded parse of the canonical exponent: a sign and at most three digits.
fn parse_exponent(s: &[u8]) -> i32 {
    let (neg, digits) = match s.split_first() {
        Some((&b'-', rest)) => (true, rest),
        _ => (false, s),
    };
    debug_assert!(digits.len() <= 3);
    let mut value = 0i32;
    for &b in digits {
        value = value * 10 + (b - b'0') as i32;
    }
    if neg { -value } else { value }
}

/// Expands the canonical scientific string into plain decimal notation.
///
/// The canonical mantissa carries no trailing zeros, so whole numbers come
/// out without a dangling dot or a `.0` tail and fractions keep a nonzero
/// final digit.
fn push_fixed(sci: &[u8], sink: &mut Sink) {
    let Some(epos) = sci.iter().position(|&b| b == b'E') else {
        // NaN and the infinities carry no exponent marker
        sink.push_slice(sci);
        return;
    };
    let (mantissa, exponent) = sci.split_at(epos);
    let exp = parse_exponent(&exponent[1..]);

    let mut digits = mantissa;
    if let Some((&b'-', rest)) = digits.split_first() {
        sink.push(b'-');
        digits = rest;
    }
    let head = digits[0];
    let tail = if digits.len() > 2 { &digits[2..] } else { &[] };
    let n = 1 + tail.len();

    if exp < 0 {
        sink.push(b'0');
        sink.push(b'.');
        sink.push_zeros((-exp) as usize - 1);
        sink.push(head);
        sink.push_slice(tail);
    } else if exp as usize + 1 >= n {
        sink.push(head);
        sink.push_slice(tail);
        sink.push_zeros(exp as usize + 1 - n);
    } else {
        sink.push(head);
        sink.push_slice(&tail[..exp as usize]);
        sink.push(b'.');
        sink.push_slice(&tail[exp as usize..]);
    }
}

fn push_notation(sci: &[u8], notation: Notation, sink: &mut Sink) {
    match notation {
        Notation::Scientific | Notation::ScientificUpper => {
            // only the exponent marker changes case
            for &b in sci {
                sink.push(if b == b'E' { notation.format_byte() } else { b });
            }
        }
        Notation::Fixed => push_fixed(sci, sink),
    }
}

/// Formats `value` into `dst` in the notation selected by `format`
/// (`b'f'`, `b'e'`, or `b'E'`) and returns the full untruncated length.
///
/// At most `dst.len() - 1` characters are stored and, whenever `dst` is
/// non-empty, byte `min(return, dst.len() - 1)` is set to NUL. Passing an
/// empty `dst` turns the call into a pure sizing pass. Truncation is
/// detected by comparing the returned length against `dst.len()`. An
/// unrecognized format byte produces the empty string and returns 0.
pub fn write_double(value: f64, format: u8, dst: &mut [u8]) -> usize {
    let mut sink = Sink::new(dst);
    if let Ok(notation) = Notation::try_from(format) {
        let mut sci = [0u8; MAX_SCIENTIFIC_LEN];
        let n = write_scientific(value, &mut sci);
        push_notation(&sci[..n], notation, &mut sink);
    }
    sink.finish()
}

/// Formats `value` into an owned string; [`write_double`] is the
/// allocation-free path.
pub fn format_double(value: f64, notation: Notation) -> String {
    let needed = write_double(value, notation.format_byte(), &mut []);
    let mut buf = vec![0u8; needed + 1];
    let written = write_double(value, notation.format_byte(), &mut buf);
    debug_assert_eq!(written, needed);
    buf.truncate(needed);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(x: f64, format: u8) -> String {
        let mut buf = [0u8; 512];
        let n = write_double(x, format, &mut buf);
        assert_eq!(buf[n], 0);
        String::from_utf8_lossy(&buf[..n]).into_owned()
    }

    #[test]
    fn test_fixed_notation() {
        assert_eq!(fmt(212123123.123188832, b'f'), "212123123.12318882");
        assert_eq!(fmt(9223372036854775808.0, b'f'), "9223372036854776000");
        assert_eq!(fmt(0.000123123001, b'f'), "0.000123123001");
        assert_eq!(fmt(1.0, b'f'), "1");
        assert_eq!(fmt(-0.0, b'f'), "-0");
        assert_eq!(fmt(-0.015, b'f'), "-0.015");
        assert_eq!(fmt(5000.0, b'f'), "5000");
        assert_eq!(fmt(-112.89123883, b'f'), "-112.89123883");
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(fmt(212123123.123188832, b'e'), "2.1212312312318882e8");
        assert_eq!(fmt(212123123.123188832, b'E'), "2.1212312312318882E8");
        assert_eq!(fmt(-0.0, b'e'), "-0e0");
        assert_eq!(fmt(5e-324, b'e'), "5e-324");
        assert_eq!(fmt(f64::MAX, b'E'), "1.7976931348623157E308");
    }

    #[test]
    fn test_specials_pass_through() {
        assert_eq!(fmt(f64::NAN, b'f'), "NaN");
        assert_eq!(fmt(f64::INFINITY, b'f'), "Infinity");
        assert_eq!(fmt(f64::NEG_INFINITY, b'f'), "-Infinity");
        assert_eq!(fmt(f64::NAN, b'e'), "NaN");
        assert_eq!(fmt(f64::INFINITY, b'E'), "Infinity");
    }

    #[test]
    fn test_long_fixed_expansions() {
        let tiny = fmt(5e-324, b'f');
        assert_eq!(tiny.len(), 326);
        assert!(tiny.starts_with("0.0000"));
        assert!(tiny.ends_with("5"));
        let huge = fmt(f64::MAX, b'f');
        assert_eq!(huge.len(), 309);
        assert!(huge.starts_with("17976931348623157"));
        assert!(huge.ends_with("0"));
        assert_eq!(fmt(f64::MIN_POSITIVE, b'f').len(), 326);
    }

    #[test]
    fn test_unsupported_format() {
        let mut buf = [0xffu8; 8];
        assert_eq!(write_double(1.5, b'g', &mut buf), 0);
        assert_eq!(buf[0], 0);
        assert!(Notation::try_from(b'g').is_err());
        assert_eq!(Notation::try_from(b'g').unwrap_err(), UnsupportedNotation(b'g'));
        assert_eq!(Notation::try_from(b'f'), Ok(Notation::Fixed));
    }

    #[test]
    fn test_truncation_ladder() {
        // -112.89123883 formats to 13 characters; every undersized buffer
        // keeps the longest prefix that still leaves room for the NUL
        let value = -112.89123883;
        let expect: [(usize, &str); 6] = [
            (0, ""),
            (1, ""),
            (2, "-"),
            (6, "-112."),
            (5, "-112"),
            (14, "-112.89123883"),
        ];
        for (nbytes, text) in expect {
            let mut buf = vec![0xffu8; nbytes];
            let ret = write_double(value, b'f', &mut buf);
            assert_eq!(ret, 13, "nbytes {}", nbytes);
            if nbytes > 0 {
                let stored = ret.min(nbytes - 1);
                assert_eq!(&buf[..stored], text.as_bytes(), "nbytes {}", nbytes);
                assert_eq!(buf[stored], 0, "nbytes {}", nbytes);
            }
        }
    }

    #[test]
    fn test_sizing_law() {
        let mut big = [0u8; 512];
        for x in [
            0.0,
            -0.0,
            1.0,
            -112.89123883,
            5e-324,
            f64::MAX,
            f64::NAN,
            f64::INFINITY,
            2.2250738585072014e-308,
        ] {
            for format in [b'f', b'e', b'E', b'q'] {
                let sized = write_double(x, format, &mut []);
                let written = write_double(x, format, &mut big);
                assert_eq!(sized, written, "{} {}", x, format as char);
            }
        }
    }

    #[test]
    fn test_truncation_prefix_property() {
        let mut full = [0u8; 512];
        let value = 2.2250738585072014e-308;
        let want = write_double(value, b'f', &mut full);
        for nbytes in 0..want + 8 {
            let mut buf = vec![0xaau8; nbytes];
            let ret = write_double(value, b'f', &mut buf);
            assert_eq!(ret, want);
            if nbytes > 0 {
                let stored = ret.min(nbytes - 1);
                assert_eq!(&buf[..stored], &full[..stored]);
                assert_eq!(buf[stored], 0);
            }
        }
    }

    #[test]
    fn test_format_double() {
        assert_eq!(format_double(-0.015, Notation::Fixed), "-0.015");
        assert_eq!(format_double(1.0, Notation::Fixed), "1");
        assert_eq!(
            format_double(212123123.123188832, Notation::Scientific),
            "2.1212312312318882e8"
        );
        assert_eq!(
            format_double(212123123.123188832, Notation::ScientificUpper),
            "2.1212312312318882E8"
        );
    }

    #[test]
    fn test_fixed_against_parse() {
        use rand::Rng;
        let mut rng = rand::rng();
        let mut buf = [0u8; 512];
        for _ in 0..50_000u32 {
            let bits: u64 = rng.random();
            let x = f64::from_bits(bits);
            if !x.is_finite() {
                continue;
            }
            let n = write_double(x, b'f', &mut buf);
            let s = core::str::from_utf8(&buf[..n]).unwrap();
            let parsed: f64 = s.parse().unwrap();
            assert_eq!(parsed.to_bits(), bits, "{}", s);
        }
    }
}
