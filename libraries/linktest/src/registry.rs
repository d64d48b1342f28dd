use std::collections::BTreeMap;

use thiserror::Error;

use crate::{section, SectionRange, TestDesc};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// Fewer (or more) descriptors reached the registry than were declared,
    /// usually because a contributing crate was never linked.
    #[error("expected {expected} registered tests, found {found}")]
    CountMismatch { expected: usize, found: usize },
}

/// Every test linked into the program.
pub fn registry() -> Registry {
    let registry = Registry::new(section::bounds());

    log::debug!(
        "{} test descriptors found in the {} registration section",
        registry.len(),
        section::FAMILY
    );

    registry
}

/// A read-only view over a set of test descriptors.
///
/// The order of the descriptors is whatever order the linker chose and is
/// not related to declaration order.
#[derive(Clone, Copy, Debug)]
pub struct Registry {
    tests: SectionRange<TestDesc>,
}

impl Registry {
    pub const fn new(tests: SectionRange<TestDesc>) -> Self {
        Self { tests }
    }

    pub const fn len(&self) -> usize {
        self.tests.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static TestDesc> {
        self.tests.iter()
    }

    pub fn as_slice(&self) -> &'static [TestDesc] {
        self.tests.as_slice()
    }

    /// The first test with exactly this name.
    pub fn find(&self, name: &str) -> Option<&'static TestDesc> {
        self.iter().find(|test| test.name == name)
    }

    /// Tests whose name contains `pattern`.
    pub fn filter<'a>(&self, pattern: &'a str) -> impl Iterator<Item = &'static TestDesc> + 'a {
        self.tests.iter().filter(move |test| test.matches(pattern))
    }

    /// Verifies that exactly `expected` descriptors were registered.
    pub fn expect_count(&self, expected: usize) -> Result<(), RegistrationError> {
        match self.len() {
            found if found == expected => Ok(()),
            found => Err(RegistrationError::CountMismatch { expected, found }),
        }
    }

    /// Names that more than one descriptor was registered under, sorted.
    ///
    /// Sharing a name is allowed; every such test still runs.
    pub fn duplicate_names(&self) -> Vec<&'static str> {
        let mut seen = BTreeMap::<&'static str, usize>::new();

        for test in self.iter() {
            *seen.entry(test.name).or_default() += 1;
        }

        seen.into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name)
            .collect()
    }
}

impl From<&'static [TestDesc]> for Registry {
    fn from(tests: &'static [TestDesc]) -> Self {
        Self::new(SectionRange::from(tests))
    }
}

impl IntoIterator for &Registry {
    type Item = &'static TestDesc;
    type IntoIter = std::slice::Iter<'static, TestDesc>;

    fn into_iter(self) -> Self::IntoIter {
        self.tests.iter()
    }
}
