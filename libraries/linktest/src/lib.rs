//! Automatic test registration through linker sections.
//!
//! Every test declared with [`test`] (or the lower level [`declare!`]) becomes
//! an immutable [`TestDesc`] placed in a dedicated section of the final binary.
//! The linker groups the records of every crate into one contiguous region,
//! and [`registry`] walks that region at run time. No crate has to know about
//! any other, and there is no list to maintain by hand.
//!
//! # Example
//! ```ignore
//! #[linktest::test]
//! fn add_one() -> bool {
//!     1 + 1 == 2
//! }
//!
//! fn main() {
//!     let report = linktest::Runner::new()
//!         .run(&linktest::registry(), &mut std::io::stdout())
//!         .unwrap();
//!     assert!(report.is_success());
//! }
//! ```

mod desc;
mod registry;
mod runner;
pub mod section;
mod symbol_ptr;

pub use desc::TestDesc;
pub use registry::{registry, RegistrationError, Registry};
pub use runner::{Outcome, RunReport, Runner};
pub use section::SectionRange;

pub use linktest_macros::test;
