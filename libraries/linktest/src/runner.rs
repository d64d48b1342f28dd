use std::{
    any::Any,
    cell::Cell,
    fmt::{self, Display},
    io::{self, Write},
    panic::{self, AssertUnwindSafe},
    sync::Once,
};

use crate::TestDesc;

/// What happened when a single test ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
    /// The test panicked instead of returning; holds the panic message.
    Panicked(String),
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Passed => write!(f, "passed"),
            Outcome::Failed | Outcome::Panicked(_) => write!(f, "FAILED"),
        }
    }
}

/// Aggregate counters of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub passes: usize,
    pub failures: usize,
    /// Names of the failed tests, in the order they ran.
    pub failed: Vec<&'static str>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.passes + self.failures
    }

    pub fn is_success(&self) -> bool {
        self.failures == 0
    }

    fn record(&mut self, test: &TestDesc, outcome: &Outcome) {
        if outcome.is_passed() {
            self.passes += 1;
        } else {
            self.failures += 1;
            self.failed.push(test.name);
        }
    }
}

impl Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failures, {} passes", self.failures, self.passes)
    }
}

/// Runs tests one after another on the calling thread.
#[derive(Debug, Default, Clone)]
pub struct Runner {
    filter: Option<String>,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only run tests whose name contains `pattern`.
    pub fn with_filter(pattern: impl Into<String>) -> Self {
        Self {
            filter: Some(pattern.into()),
        }
    }

    fn selects(&self, test: &TestDesc) -> bool {
        match &self.filter {
            Some(pattern) => test.matches(pattern),
            None => true,
        }
    }

    /// Runs every selected test, writing one line per test followed by the
    /// summary line. A failing or panicking test never stops the run.
    pub fn run<'a, I, W>(&self, tests: I, out: &mut W) -> io::Result<RunReport>
    where
        I: IntoIterator<Item = &'a TestDesc>,
        W: Write + ?Sized,
    {
        let mut report = RunReport::default();

        for test in tests.into_iter().filter(|test| self.selects(test)) {
            write!(out, "Calling test '{}'... ", test.name)?;
            out.flush()?;

            let outcome = run_single_test(test);
            writeln!(out, "{}", outcome)?;

            report.record(test, &outcome);
        }

        writeln!(out, "{}", report)?;
        out.flush()?;

        log::info!("test run finished: {}", report);

        Ok(report)
    }
}

pub(crate) fn run_single_test(test: &TestDesc) -> Outcome {
    log::debug!(
        "running {} ({}:{})",
        test.qualified_name(),
        test.source_file,
        test.line
    );

    match with_silenced_panics(|| panic::catch_unwind(AssertUnwindSafe(|| test.run()))) {
        Ok(true) => Outcome::Passed,
        Ok(false) => Outcome::Failed,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            log::warn!("test {} panicked: {}", test.qualified_name(), message);

            Outcome::Panicked(message)
        }
    }
}

thread_local! {
    static SILENCED: Cell<bool> = const { Cell::new(false) };
}

/// Runs `f` with the panic hook muted on the calling thread, so a panicking
/// test does not print between `Calling test '..'... ` and its status word.
///
/// The hook is chained once over the existing one and only consults a
/// thread-local flag, so concurrent runners never race on swapping hooks.
fn with_silenced_panics<R>(f: impl FnOnce() -> R) -> R {
    static INSTALL: Once = Once::new();

    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !is_silenced() {
                previous(info);
            }
        }));
    });

    struct Restore(bool);

    impl Drop for Restore {
        fn drop(&mut self) {
            SILENCED.with(|silenced| silenced.set(self.0));
        }
    }

    let _restore = Restore(SILENCED.with(|silenced| silenced.replace(true)));

    f()
}

fn is_silenced() -> bool {
    SILENCED.with(Cell::get)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}
