use super::common::*;
use crate::consultants::{ConsultantForm, CreateConsultant, UseCaseError};
use crate::store::EntityId;

#[test]
fn saving_a_new_consultant() {
    let repository = consultant_repository();

    let consultant = CreateConsultant::new(consultant_form("Foo"), repository.clone())
        .run()
        .expect("valid form saves");

    assert_eq!(consultant.name(), "Foo");
    assert_eq!(consultant.id(), Some(EntityId(0)));
    assert_eq!(repository.count().expect("count"), 1);
    assert_eq!(repository.first().expect("first"), Some(consultant));
}

#[test]
fn ids_follow_save_order() {
    let repository = consultant_repository();
    let names = ["Ada", "Grace", "Ada"];
    for (expected, name) in names.into_iter().enumerate() {
        let consultant = create(&repository, name);
        assert_eq!(consultant.id(), Some(EntityId(expected as u64)));
    }

    let stored: Vec<_> = repository
        .all()
        .expect("all")
        .into_iter()
        .map(|consultant| consultant.name().to_string())
        .collect();
    assert_eq!(stored, names);
    assert_eq!(
        repository.first().expect("first").map(|c| c.name().to_string()),
        Some("Ada".to_string())
    );
}

#[test]
fn surrounding_whitespace_is_trimmed_from_names() {
    let repository = consultant_repository();
    let consultant = create(&repository, "  Foo Bar ");
    assert_eq!(consultant.name(), "Foo Bar");
}

#[test]
fn invalid_form_is_rejected_without_saving() {
    let repository = consultant_repository();
    create(&repository, "Existing");

    let result = CreateConsultant::new(ConsultantForm::default(), repository.clone()).run();

    match result {
        Err(UseCaseError::Validation(errors)) => {
            assert_eq!(errors.on("name"), ["can't be blank".to_string()]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(repository.count().expect("count"), 1);
}
