pub fn double(value: i64) -> i64 {
    value * 2
}

#[linktest::test]
fn add_one() -> bool {
    1 + 1 == 2
}

#[linktest::test]
fn multiply() -> bool {
    double(4) == 8
}
