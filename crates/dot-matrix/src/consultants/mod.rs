//! Consultant roster: entities, input forms, and the use cases that persist them.

pub mod attributes;
pub mod domain;
pub mod forms;
pub mod use_cases;

#[cfg(test)]
mod tests;

pub use attributes::{Attributes, UnknownAttribute};
pub use domain::{Assignment, Consultant};
pub use forms::{AssignmentForm, ConsultantForm, Form, FormErrors};
pub use use_cases::{AssignConsultant, ConsultantRepository, CreateConsultant, UseCaseError};
