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
use criterion::{Criterion, criterion_group, criterion_main};
use moxfloat::write_scientific;
use rand::Rng;
use std::hint::black_box;

fn bench_shortest(c: &mut Criterion) {
    let mut rng = rand::rng();
    let values: Vec<f64> = (0..4096)
        .map(|_| f64::from_bits(rng.random()))
        .filter(|x| x.is_finite())
        .collect();

    c.bench_function("moxfloat: write_scientific", |b| {
        let mut buf = [0u8; 32];
        b.iter(|| {
            for &v in &values {
                black_box(write_scientific(black_box(v), &mut buf));
            }
        })
    });

    c.bench_function("ryu: format_finite", |b| {
        let mut ryu_buf = ryu::Buffer::new();
        b.iter(|| {
            for &v in &values {
                black_box(ryu_buf.format_finite(black_box(v)).len());
            }
        })
    });

    c.bench_function("std: LowerExp", |b| {
        use std::io::Write;
        let mut out = Vec::with_capacity(32);
        b.iter(|| {
            for &v in &values {
                out.clear();
                let _ = write!(out, "{:e}", black_box(v));
                black_box(out.len());
            }
        })
    });
}

criterion_group!(benches, bench_shortest);
criterion_main!(benches);
