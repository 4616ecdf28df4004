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
use moxfloat::{Notation, format_double, write_double};
use rand::Rng;

fn check_against_ryu(samples: u32) {
    let mut rng = rand::rng();
    let mut buf = [0u8; 32];
    let mut ryu_buf = ryu::Buffer::new();
    let mut mismatched_digits = 0u32;
    let mut checked = 0u32;
    for _ in 0..samples {
        let bits: u64 = rng.random();
        let value = f64::from_bits(bits);
        if !value.is_finite() {
            continue;
        }
        checked += 1;
        let n = write_double(value, b'e', &mut buf);
        let mine = core::str::from_utf8(&buf[..n]).unwrap();
        let parsed: f64 = mine.parse().unwrap();
        assert_eq!(
            parsed.to_bits(),
            bits,
            "round-trip failed for {mine} ({bits:#018x})"
        );

        // ryu prints the same shortest digits in a different dressing
        // (fixed notation with a ".0" tail for moderate exponents), so
        // compare the significant digits only
        let reference = ryu_buf.format(value);
        if significant_digits(mine) != significant_digits(reference) {
            mismatched_digits += 1;
            println!("significant digits differ: {mine} vs {reference}");
        }
    }
    println!("{checked} samples round-tripped, {mismatched_digits} digit mismatches");
}

fn significant_digits(s: &str) -> String {
    let digits: String = s
        .chars()
        .take_while(|c| *c != 'e' && *c != 'E')
        .filter(char::is_ascii_digit)
        .collect();
    let trimmed = digits.trim_start_matches('0').trim_end_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn main() {
    let showcase = [
        212123123.123188832,
        9223372036854775808.0,
        0.000123123001,
        1.0,
        -0.0,
        -0.015,
        5000.0,
        5e-324,
        f64::MAX,
        f64::NAN,
        f64::INFINITY,
    ];
    println!("{:>26} | {:>28} | {}", "fixed", "scientific", "sized");
    for value in showcase {
        let fixed = format_double(value, Notation::Fixed);
        let sci = format_double(value, Notation::Scientific);
        let sized = write_double(value, b'f', &mut []);
        let fixed_short = if fixed.len() > 26 {
            format!("{}..", &fixed[..24])
        } else {
            fixed
        };
        println!("{fixed_short:>26} | {sci:>28} | {sized}");
    }

    check_against_ryu(2_000_000);
}
