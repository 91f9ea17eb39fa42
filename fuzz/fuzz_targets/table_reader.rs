#![no_main]

use libfuzzer_sys::fuzz_target;
use pendulab::table::{parse_trials, read_table};

fuzz_target!(|data: &[u8]| {
    // Any byte sequence must load or fail with an error, never panic
    let _ = read_table(data, "fuzz");

    if let Ok(cell) = std::str::from_utf8(data) {
        let _ = parse_trials(cell);
    }
});
