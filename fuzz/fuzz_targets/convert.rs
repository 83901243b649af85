//! Conversion fuzzer.
//!
//! Feeds arbitrary text through every input/output dialect pair. Conversion
//! may fail with an error but must never panic.

use honggfuzz::fuzz;
use sqlconv::{Dialect, convert};

const OUTPUTS: [Dialect; 3] = [Dialect::MySql, Dialect::PostgreSql, Dialect::Sqlite];

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            let Ok(sql) = std::str::from_utf8(data) else {
                return;
            };
            for input in Dialect::ALL.into_iter().map(Some).chain([None]) {
                for output in OUTPUTS {
                    let _ = convert(sql, input, output);
                }
            }
        });
    }
}
