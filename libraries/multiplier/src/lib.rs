pub fn product(left: i64, right: i64) -> i64 {
    left * right
}

pub fn square(value: i64) -> i64 {
    product(value, value)
}

#[linktest::test]
fn multiply() -> bool {
    product(6, 7) == 42
}

#[linktest::test]
mod tests {
    use super::*;

    #[linktest::test]
    fn square_of_negative_is_positive() -> bool {
        square(-3) == 9
    }

    #[linktest::test]
    fn product_with_zero() -> bool {
        product(0, i64::MAX) == 0
    }

    #[test]
    fn registry_holds_every_test_of_this_crate() {
        let registry = linktest::registry();
        let mut names = registry.iter().map(|t| t.name).collect::<Vec<_>>();
        names.sort_unstable();

        assert_eq!(registry.expect_count(3), Ok(()));
        assert_eq!(
            names,
            ["multiply", "product_with_zero", "square_of_negative_is_positive"]
        );
    }
}
