//! Helpers shared by the test suites of the workspace.
//!
//! Linking this crate into a test binary also turns on logging for it (see
//! the `test_log` feature), so `RUST_LOG=debug cargo test` shows what the
//! registry and the runner are doing.

pub mod fixtures;
pub mod output;

#[cfg(feature = "test_log")]
#[ctor::ctor]
unsafe fn init_test_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .is_test(true)
        .try_init();

    log::trace!("test logging initialized");
}
