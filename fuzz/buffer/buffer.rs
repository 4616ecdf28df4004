#![no_main]

use libfuzzer_sys::fuzz_target;
use moxfloat::write_double;

fuzz_target!(|data: (u64, u8, u16)| {
    let (bits, format, nbytes) = data;
    let value = f64::from_bits(bits);

    let mut full = [0u8; 512];
    let want = write_double(value, format, &mut full);
    assert!(want < full.len());

    let mut small = vec![0xa5u8; nbytes as usize % 400];
    let got = write_double(value, format, &mut small);
    assert_eq!(got, want);
    if !small.is_empty() {
        let stored = want.min(small.len() - 1);
        assert_eq!(&small[..stored], &full[..stored]);
        assert_eq!(small[stored], 0);
    }
});
