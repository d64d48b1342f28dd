#[linktest::test]
fn uppercase() -> bool {
    "section".to_uppercase() == "SECTION"
}

#[linktest::test]
fn split_words() -> bool {
    "start stop".split_whitespace().count() == 2
}
