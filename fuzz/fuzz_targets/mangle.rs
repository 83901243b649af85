//! Identifier mangling fuzzer.
//!
//! Re-mangling an identifier for a second dialect must give the same result
//! as mangling it for that dialect directly.

use honggfuzz::fuzz;
use sqlconv::{Dialect, mangle, unquote};

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            let Ok(identifier) = std::str::from_utf8(data) else {
                return;
            };
            for first in Dialect::ALL {
                let once = mangle(identifier, first);
                for second in Dialect::ALL {
                    assert_eq!(mangle(&once, second), mangle(identifier, second));
                }
                assert_eq!(unquote(&once), unquote(identifier));
            }
        });
    }
}
