pub fn increment(value: i64) -> i64 {
    value + 1
}

pub fn add(left: i64, right: i64) -> i64 {
    left + right
}

// Registered in every build, so any binary linking this crate runs it.
#[linktest::test]
fn add_one() -> bool {
    increment(41) == 42
}

#[linktest::test]
mod tests {
    use super::*;

    #[linktest::test]
    fn add_is_commutative() -> bool {
        add(2, 3) == add(3, 2)
    }

    #[linktest::test]
    fn increment_crosses_zero() -> bool {
        increment(-1) == 0
    }

    #[test]
    fn registry_holds_every_test_of_this_crate() {
        let registry = linktest::registry();
        let mut names = registry.iter().map(|t| t.name).collect::<Vec<_>>();
        names.sort_unstable();

        assert_eq!(registry.expect_count(3), Ok(()));
        assert_eq!(names, ["add_is_commutative", "add_one", "increment_crosses_zero"]);
    }
}
