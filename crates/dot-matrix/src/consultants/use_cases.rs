use std::sync::Arc;

use tracing::{info, warn};

use super::attributes::{Attributes, UnknownAttribute};
use super::domain::Consultant;
use super::forms::{AssignmentForm, ConsultantForm, Form, FormErrors};
use crate::store::{EntityId, EntityRepository, RepositoryError};

pub type ConsultantRepository = EntityRepository<Consultant>;

/// Validates a [`ConsultantForm`] and saves the resulting consultant.
pub struct CreateConsultant {
    form: ConsultantForm,
    repository: Arc<ConsultantRepository>,
}

impl CreateConsultant {
    pub fn new(form: ConsultantForm, repository: Arc<ConsultantRepository>) -> Self {
        Self { form, repository }
    }

    /// Returns the persisted consultant, carrying its assigned id.
    pub fn run(self) -> Result<Consultant, UseCaseError> {
        let name = match self.form.name() {
            Some(name) if self.form.valid() => name,
            _ => {
                let errors = self.form.errors();
                warn!(%errors, "rejected consultant form");
                return Err(UseCaseError::Validation(errors));
            }
        };

        let consultant = Consultant::from_attributes([("name", name)])?;
        let stored = self.repository.save(consultant)?;
        info!(id = ?stored.id(), name = stored.name(), "consultant created");
        Ok(stored)
    }
}

/// Places an existing consultant on a project described by an [`AssignmentForm`].
pub struct AssignConsultant {
    consultant_id: EntityId,
    form: AssignmentForm,
    repository: Arc<ConsultantRepository>,
}

impl AssignConsultant {
    pub fn new(
        consultant_id: EntityId,
        form: AssignmentForm,
        repository: Arc<ConsultantRepository>,
    ) -> Self {
        Self {
            consultant_id,
            form,
            repository,
        }
    }

    /// Returns the updated consultant, with the new assignment last in its list.
    pub fn run(self) -> Result<Consultant, UseCaseError> {
        let assignment = self.form.assignment().map_err(|errors| {
            warn!(%errors, consultant_id = %self.consultant_id, "rejected assignment form");
            UseCaseError::Validation(errors)
        })?;

        let project_id = assignment.project_id.clone();
        let (starts_on, ends_on) = (assignment.starts_on, assignment.ends_on);

        let updated = self
            .repository
            .modify(self.consultant_id, |consultant| {
                consultant.push_assignment(assignment)
            })?
            .ok_or(UseCaseError::NotFound {
                id: self.consultant_id,
            })?;

        info!(
            consultant_id = %self.consultant_id,
            %project_id,
            %starts_on,
            %ends_on,
            "consultant assigned"
        );
        Ok(updated)
    }
}

/// Error raised by the consultant use cases.
#[derive(Debug, thiserror::Error)]
pub enum UseCaseError {
    #[error("validation failed: {0}")]
    Validation(FormErrors),
    #[error("consultant {id} not found")]
    NotFound { id: EntityId },
    #[error(transparent)]
    UnknownAttribute(#[from] UnknownAttribute),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
