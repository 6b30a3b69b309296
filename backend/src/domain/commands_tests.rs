//! Validation coverage for book commands.

use rstest::rstest;

use super::*;
use crate::domain::validation::{MAXIMUM_LENGTH_RULE, NOT_EMPTY_RULE, ValidationFailure};

fn reasons(outcome: &ValidationOutcome) -> Vec<(&str, &str)> {
    outcome
        .failures()
        .iter()
        .map(|failure| (failure.rule_code(), failure.field()))
        .collect()
}

#[rstest]
fn create_assigns_distinct_ids() {
    let first = CreateBook::new("Dune", "Frank Herbert", "Science fiction");
    let second = CreateBook::new("Dune", "Frank Herbert", "Science fiction");
    assert_ne!(first.id(), second.id());
    assert!(!first.id().is_nil());
}

#[rstest]
fn valid_create_passes() {
    let command = CreateBook::new("Dune", "Frank Herbert", "Science fiction");
    assert!(command.validate().is_valid());
}

#[rstest]
fn empty_title_yields_single_not_empty_failure() {
    let command = CreateBook::new("", "Frank Herbert", "Science fiction");
    let outcome = command.validate();

    assert_eq!(reasons(&outcome), [(NOT_EMPTY_RULE, "Title")]);
    assert_eq!(outcome.failures()[0].message(), "'Title' must not be empty.");
}

#[rstest]
#[case("t".repeat(151), "a".to_owned(), "g".to_owned(), "Title")]
#[case("t".to_owned(), "a".repeat(101), "g".to_owned(), "Author")]
#[case("t".to_owned(), "a".to_owned(), "g".repeat(51), "Genre")]
fn overlong_fields_fail_maximum_length(
    #[case] title: String,
    #[case] author: String,
    #[case] genre: String,
    #[case] field: &str,
) {
    let outcome = CreateBook::new(title, author, genre).validate();
    assert_eq!(reasons(&outcome), [(MAXIMUM_LENGTH_RULE, field)]);
}

#[rstest]
fn all_blank_create_reports_every_field_in_order() {
    let outcome = CreateBook::new(" ", "", "\t").validate();
    assert_eq!(
        reasons(&outcome),
        [
            (NOT_EMPTY_RULE, "Title"),
            (NOT_EMPTY_RULE, "Author"),
            (NOT_EMPTY_RULE, "Genre"),
        ]
    );
}

#[rstest]
fn update_checks_id_before_fields() {
    let outcome = UpdateBook::new(Uuid::nil(), "", "Frank Herbert", "Science fiction").validate();
    assert_eq!(
        reasons(&outcome),
        [(NOT_EMPTY_RULE, "Id"), (NOT_EMPTY_RULE, "Title")]
    );
}

#[rstest]
fn create_with_nil_id_fails_validation() {
    let outcome = CreateBook::with_id(Uuid::nil(), "Dune", "Frank Herbert", "Science fiction")
        .validate();
    assert_eq!(reasons(&outcome), [(NOT_EMPTY_RULE, "Id")]);
}

#[rstest]
fn delete_is_always_valid() {
    assert!(DeleteBook::new(Uuid::nil()).validate().is_valid());
}

#[rstest]
fn validation_is_repeatable() {
    let command = BookCommand::from(CreateBook::new("", "", "Science fiction"));
    let first: Vec<ValidationFailure> = command.validate().failures().to_vec();
    let second: Vec<ValidationFailure> = command.validate().failures().to_vec();
    assert_eq!(first, second);
}

#[rstest]
#[case(BookCommand::from(CreateBook::new("a", "b", "c")), "create_book")]
#[case(BookCommand::from(UpdateBook::new(Uuid::new_v4(), "a", "b", "c")), "update_book")]
#[case(BookCommand::from(DeleteBook::new(Uuid::new_v4())), "delete_book")]
fn command_kind_names_the_operation(#[case] command: BookCommand, #[case] expected: &str) {
    assert_eq!(command.kind(), expected);
}
