#![no_main]

use libfuzzer_sys::fuzz_target;
use moxfloat::{MAX_SCIENTIFIC_LEN, write_scientific};

fuzz_target!(|data: u64| {
    let value = f64::from_bits(data);
    if !value.is_finite() {
        return;
    }
    let mut buf = [0u8; MAX_SCIENTIFIC_LEN];
    let n = write_scientific(value, &mut buf);
    assert!(n <= MAX_SCIENTIFIC_LEN);
    let text = core::str::from_utf8(&buf[..n]).unwrap();
    let parsed: f64 = text.parse().unwrap();
    assert_eq!(parsed.to_bits(), data);
});
