use std::sync::Arc;

use crate::consultants::{
    Attributes, AssignmentForm, Consultant, ConsultantForm, ConsultantRepository,
    CreateConsultant,
};
use crate::store::Repository;

pub(super) fn consultant_repository() -> Arc<ConsultantRepository> {
    Repository::new()
        .for_kind::<Consultant>()
        .expect("consultants are registered")
}

pub(super) fn consultant_form(name: &str) -> ConsultantForm {
    ConsultantForm::from_attributes([("name", name)]).expect("name is a known field")
}

pub(super) fn assignment_form(start: &str, end: &str, project: &str) -> AssignmentForm {
    AssignmentForm::from_attributes([
        ("start_date", start),
        ("end_date", end),
        ("project_id", project),
    ])
    .expect("assignment fields are known")
}

pub(super) fn create(repository: &Arc<ConsultantRepository>, name: &str) -> Consultant {
    CreateConsultant::new(consultant_form(name), repository.clone())
        .run()
        .expect("consultant is created")
}
