use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use dot_matrix::consultants::{
    AssignConsultant, AssignmentForm, Attributes, Consultant, ConsultantForm, CreateConsultant,
    FormErrors, UseCaseError,
};
use dot_matrix::consultants::forms::parse_date;
use dot_matrix::error::AppError;
use dot_matrix::store::{Entity, Repository, RepositoryError};

const DEFAULT_NAMES: [&str; 3] = ["Ada Lovelace", "Grace Hopper", "Edsger Dijkstra"];

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Consultant to create; repeat for more. Defaults to a sample roster.
    #[arg(long = "name")]
    pub(crate) names: Vec<String>,
    /// Project the first consultant is staffed on
    #[arg(long, default_value = "onboarding")]
    pub(crate) project: String,
    /// Assignment start date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) start: Option<NaiveDate>,
    /// Assignment length in days
    #[arg(long, default_value_t = 14, value_parser = clap::value_parser!(u32).range(1..=36_500))]
    pub(crate) days: u32,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        names,
        project,
        start,
        days,
    } = args;

    let names = if names.is_empty() {
        DEFAULT_NAMES.iter().map(|name| name.to_string()).collect()
    } else {
        names
    };
    let starts_on = start.unwrap_or_else(|| Local::now().date_naive());
    let ends_on = assignment_end(starts_on, days)?;

    let registry = Repository::new();
    let consultants = registry.for_kind::<Consultant>()?;

    let mut created = Vec::with_capacity(names.len());
    for name in &names {
        let form = ConsultantForm::from_attributes([("name", name.as_str())])?;
        created.push(CreateConsultant::new(form, consultants.clone()).run()?);
    }

    if let Some(first) = created.first() {
        let id = first.id().ok_or(RepositoryError::Unsaved {
            kind: Consultant::KIND,
        })?;
        let form = AssignmentForm::from_attributes([
            ("project_id", project),
            ("start_date", starts_on.format("%Y-%m-%d").to_string()),
            ("end_date", ends_on.format("%Y-%m-%d").to_string()),
        ])?;
        AssignConsultant::new(id, form, consultants.clone()).run()?;
    }

    println!("Dot Matrix roster demo");
    println!("{} consultant(s) on file", consultants.count()?);
    for consultant in consultants.all()? {
        let id = consultant
            .id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("- [{}] {}", id, consultant.name());
        for assignment in consultant.assignments() {
            println!(
                "    {} from {} to {} ({} days)",
                assignment.project_id,
                assignment.starts_on,
                assignment.ends_on,
                assignment.duration_days()
            );
        }
    }

    Ok(())
}

/// Last day of an assignment lasting `days` days, inclusive of `starts_on`.
fn assignment_end(starts_on: NaiveDate, days: u32) -> Result<NaiveDate, AppError> {
    Duration::try_days(i64::from(days.max(1)) - 1)
        .and_then(|length| starts_on.checked_add_signed(length))
        .ok_or_else(|| {
            let mut errors = FormErrors::default();
            errors.add("end_date", format!("{days} days from {starts_on} is out of range"));
            UseCaseError::Validation(errors).into()
        })
}
