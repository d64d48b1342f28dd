// Links every local dependency, so their registered tests are part of this binary.
include!(concat!(env!("OUT_DIR"), "/generated.rs"));

use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;
use linktest::{Registry, Runner};

/// test-runner - run every test linked into this binary
#[derive(Parser, Debug, Default)]
#[command(version, about)]
struct Args {
    /// Only run tests whose name contains this string
    filter: Option<String>,

    /// List the registered tests instead of running them
    #[arg(short, long)]
    list: bool,

    /// Fail unless exactly this many tests are registered
    #[arg(long, value_name = "N")]
    expect: Option<usize>,
}

/// How a run ended; the discriminant is the process exit status.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success = 0,
    TestsFailed = 1,
    /// Usage, registration and I/O errors, as opposed to test failures.
    Error = 2,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status as u8)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    execute(
        &args,
        linktest::registry(),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
    .into()
}

fn execute(
    args: &Args,
    tests: Registry,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Status {
    if let Some(expected) = args.expect {
        if let Err(mismatch) = tests.expect_count(expected) {
            let _ = writeln!(err, "test-runner: {mismatch}");
            return Status::Error;
        }
    }

    for name in tests.duplicate_names() {
        log::warn!("test name '{name}' is registered more than once");
    }

    let result = if args.list {
        list_tests(&tests, args.filter.as_deref().unwrap_or(""), out).map(|()| Status::Success)
    } else {
        let runner = match &args.filter {
            Some(pattern) => Runner::with_filter(pattern.as_str()),
            None => Runner::new(),
        };

        runner.run(&tests, out).map(|report| {
            if report.is_success() {
                Status::Success
            } else {
                Status::TestsFailed
            }
        })
    };

    result.unwrap_or_else(|io_error| {
        let _ = writeln!(err, "test-runner: failed to write the report: {io_error}");
        Status::Error
    })
}

fn list_tests(tests: &Registry, pattern: &str, out: &mut impl Write) -> io::Result<()> {
    let selected = tests.filter(pattern).collect::<Vec<_>>();

    writeln!(out, "Collecting {} tests", selected.len())?;
    for test in selected {
        writeln!(out, " - {} ({})", test.name, test.module_path)?;
    }

    Ok(())
}
