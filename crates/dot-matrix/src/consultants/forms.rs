use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::attributes::{Attributes, UnknownAttribute};
use super::domain::Assignment;

const BLANK: &str = "can't be blank";

/// Field name to validation messages. Empty when the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn on(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field} {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Request-scoped input checked before a use case touches the repository.
pub trait Form {
    fn errors(&self) -> FormErrors;

    fn valid(&self) -> bool {
        self.errors().is_empty()
    }
}

/// Input for creating a consultant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsultantForm {
    pub name: Option<String>,
}

impl ConsultantForm {
    /// Trimmed name, when one was provided and is not blank.
    pub fn name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

impl Attributes for ConsultantForm {
    const FIELDS: &'static [&'static str] = &["name"];

    fn assign(&mut self, key: &str, value: String) -> Result<(), UnknownAttribute> {
        match key {
            "name" => self.name = Some(value),
            other => return Err(UnknownAttribute::new(other)),
        }
        Ok(())
    }
}

impl Form for ConsultantForm {
    fn errors(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        if self.name().is_none() {
            errors.add("name", BLANK);
        }
        errors
    }
}

/// Input for placing a consultant on a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentForm {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub project_id: Option<String>,
}

impl AssignmentForm {
    /// Parses the form into an [`Assignment`], collecting every problem found.
    pub fn assignment(&self) -> Result<Assignment, FormErrors> {
        let mut errors = FormErrors::default();

        let project_id = present(&self.project_id);
        if project_id.is_none() {
            errors.add("project_id", BLANK);
        }
        let starts_on = date_field(&mut errors, "start_date", &self.start_date);
        let ends_on = date_field(&mut errors, "end_date", &self.end_date);

        if let (Some(starts_on), Some(ends_on)) = (starts_on, ends_on) {
            if ends_on < starts_on {
                errors.add("end_date", "must not be before start_date");
            }
        }

        match (project_id, starts_on, ends_on) {
            (Some(project_id), Some(starts_on), Some(ends_on)) if errors.is_empty() => {
                Ok(Assignment {
                    project_id: project_id.to_string(),
                    starts_on,
                    ends_on,
                })
            }
            _ => Err(errors),
        }
    }
}

impl Attributes for AssignmentForm {
    const FIELDS: &'static [&'static str] = &["start_date", "end_date", "project_id"];

    fn assign(&mut self, key: &str, value: String) -> Result<(), UnknownAttribute> {
        match key {
            "start_date" => self.start_date = Some(value),
            "end_date" => self.end_date = Some(value),
            "project_id" => self.project_id = Some(value),
            other => return Err(UnknownAttribute::new(other)),
        }
        Ok(())
    }
}

impl Form for AssignmentForm {
    fn errors(&self) -> FormErrors {
        self.assignment().err().unwrap_or_default()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn date_field(errors: &mut FormErrors, field: &str, raw: &Option<String>) -> Option<NaiveDate> {
    let Some(raw) = present(raw) else {
        errors.add(field, BLANK);
        return None;
    };
    match parse_date(raw) {
        Ok(date) => Some(date),
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment_form(start: &str, end: &str, project: &str) -> AssignmentForm {
        AssignmentForm::from_attributes([
            ("start_date", start),
            ("end_date", end),
            ("project_id", project),
        ])
        .expect("known fields")
    }

    #[test]
    fn consultant_form_requires_a_non_blank_name() {
        let form = ConsultantForm::from_attributes([("name", "Foo")]).expect("known field");
        assert!(form.valid());
        assert!(form.errors().is_empty());

        for blank in [ConsultantForm::default(), ConsultantForm {
            name: Some("   ".to_string()),
        }] {
            assert!(!blank.valid());
            assert_eq!(blank.errors().on("name"), ["can't be blank".to_string()]);
        }
    }

    #[test]
    fn consultant_form_rejects_unknown_keys() {
        let err = ConsultantForm::from_attributes([("nickname", "Foo")]).expect_err("unknown");
        assert_eq!(err.key, "nickname");
        assert_eq!(err.to_string(), "unknown attribute: nickname");
    }

    #[test]
    fn assignment_form_builds_assignment() {
        let form = assignment_form("2025-01-06", "2025-03-28", " atlas ");
        assert!(form.valid());

        let assignment = form.assignment().expect("valid form");
        assert_eq!(assignment.project_id, "atlas");
        assert_eq!(
            assignment.starts_on,
            NaiveDate::from_ymd_opt(2025, 1, 6).expect("valid")
        );
        assert_eq!(
            assignment.ends_on,
            NaiveDate::from_ymd_opt(2025, 3, 28).expect("valid")
        );
    }

    #[test]
    fn assignment_form_reports_every_missing_field() {
        let errors = AssignmentForm::default().errors();
        assert_eq!(errors.on("start_date").len(), 1);
        assert_eq!(errors.on("end_date").len(), 1);
        assert_eq!(errors.on("project_id").len(), 1);
    }

    #[test]
    fn assignment_form_rejects_malformed_and_reversed_dates() {
        let malformed = assignment_form("06/01/2025", "2025-02-30", "atlas").errors();
        assert!(malformed.on("start_date")[0].contains("YYYY-MM-DD"));
        assert!(malformed.on("end_date")[0].contains("YYYY-MM-DD"));
        assert!(malformed.on("project_id").is_empty());

        let reversed = assignment_form("2025-05-01", "2025-04-30", "atlas").errors();
        assert_eq!(
            reversed.on("end_date"),
            ["must not be before start_date".to_string()]
        );
        assert!(reversed.on("start_date").is_empty());
    }

    #[test]
    fn assignment_form_rejects_unknown_keys() {
        let err = AssignmentForm::from_attributes([("start_date", "2025-01-01"), ("rate", "100")])
            .expect_err("unknown key");
        assert_eq!(err, UnknownAttribute::new("rate"));
    }

    #[test]
    fn form_errors_display_joins_messages() {
        let mut errors = FormErrors::default();
        errors.add("name", "can't be blank");
        errors.add("end_date", "must not be before start_date");
        assert_eq!(
            errors.to_string(),
            "end_date must not be before start_date; name can't be blank"
        );
    }
}
