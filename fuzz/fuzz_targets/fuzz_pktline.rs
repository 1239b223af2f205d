//! Fuzz target for pkt-line parsing.
//!
//! Feeds arbitrary bytes to the reader; malformed input must error or end
//! the stream, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let mut reader = gitgate_git::PktLineReader::new(Cursor::new(data));

    // Bounded so crafted input cannot loop forever
    for _ in 0..100 {
        match reader.read() {
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(_) => break,
        }
    }
});
