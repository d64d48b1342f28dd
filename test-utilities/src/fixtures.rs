//! Test functions with a known outcome, for building descriptor tables by hand.

pub const PANIC_MESSAGE: &str = "fixture panicked";

pub fn pass() -> bool {
    true
}

pub fn fail() -> bool {
    false
}

pub fn panics() -> bool {
    panic!("{PANIC_MESSAGE}")
}
