use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::attributes::{Attributes, UnknownAttribute};
use crate::store::{Entity, EntityId};

/// A consultant on the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consultant {
    id: Option<EntityId>,
    name: String,
    assignments: Vec<Assignment>,
}

impl Consultant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// `None` until the consultant has been saved.
    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub(crate) fn push_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }
}

impl Attributes for Consultant {
    const FIELDS: &'static [&'static str] = &["name"];

    fn assign(&mut self, key: &str, value: String) -> Result<(), UnknownAttribute> {
        match key {
            "name" => self.name = value,
            other => return Err(UnknownAttribute::new(other)),
        }
        Ok(())
    }
}

impl Entity for Consultant {
    const KIND: &'static str = "consultant";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}

/// A consultant's engagement on a project over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub project_id: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

impl Assignment {
    pub fn duration_days(&self) -> i64 {
        (self.ends_on - self.starts_on).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_attributes_sets_known_fields() {
        let consultant = Consultant::from_attributes([("name", "Foo")]).expect("name is known");
        assert_eq!(consultant.name(), "Foo");
        assert!(consultant.id().is_none());
        assert!(consultant.assignments().is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected_including_id() {
        for key in ["id", "email", "Name", ""] {
            let err = Consultant::from_attributes([("name", "Foo"), (key, "x")])
                .expect_err("key should be rejected");
            assert_eq!(err, UnknownAttribute::new(key));
        }
    }

    #[test]
    fn assignment_duration_is_inclusive() {
        let assignment = Assignment {
            project_id: "atlas".to_string(),
            starts_on: NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid"),
            ends_on: NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid"),
        };
        assert_eq!(assignment.duration_days(), 1);
    }
}
