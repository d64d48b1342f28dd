//! Tests declared across several modules of this binary must all land in the
//! registry, exactly once each.

mod arithmetic;
mod text;

use linktest::{registry, Runner};
use pretty_assertions::assert_eq;
use test_utilities::output::CapturedOutput;

const DECLARED: [&str; 5] = [
    "add_one",
    "declared by hand",
    "multiply",
    "split_words",
    "uppercase",
];

fn by_hand() -> bool {
    arithmetic::double(21) == 42
}

linktest::declare!("declared by hand" => by_hand);

fn sorted_names() -> Vec<&'static str> {
    let mut names = registry().iter().map(|t| t.name).collect::<Vec<_>>();
    names.sort_unstable();
    names
}

#[test]
fn every_declared_test_is_registered() {
    assert_eq!(registry().expect_count(DECLARED.len()), Ok(()));
    assert_eq!(sorted_names(), DECLARED);
    assert!(registry().duplicate_names().is_empty());
}

#[test]
fn enumeration_is_restartable() {
    let first = sorted_names();
    let second = sorted_names();

    assert_eq!(first, second);
    assert_eq!(registry().as_slice().len(), registry().iter().count());
}

#[test]
fn descriptors_remember_where_they_were_declared() {
    let add_one = registry().find("add_one").unwrap();
    let by_hand = registry().find("declared by hand").unwrap();

    assert_eq!(add_one.module_path, "registration::arithmetic");
    assert!(add_one.source_file.ends_with("arithmetic.rs"));
    assert_eq!(by_hand.module_path, "registration");
}

#[test]
fn running_the_registry_passes_everything() {
    let mut out = CapturedOutput::new();

    let report = Runner::new().run(&registry(), &mut out).unwrap();

    assert_eq!(report.passes, DECLARED.len());
    assert_eq!(report.failures, 0);
    for name in DECLARED {
        assert!(out.contains_line(&format!("Calling test '{name}'... passed")));
    }
    assert_eq!(out.last_line().as_deref(), Some("0 failures, 5 passes"));
}
