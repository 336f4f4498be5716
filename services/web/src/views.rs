use dot_matrix::consultants::Consultant;
use std::fmt::Write;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title} | Dot Matrix</title></head>\n<body>\n<nav><a href=\"/\">Home</a> | <a href=\"/consultants\">Consultants</a> | <a href=\"/consultant\">New consultant</a></nav>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

/// Minimal HTML escaping for user-supplied text.
pub(crate) fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub(crate) fn greeting() -> String {
    layout(
        "Welcome",
        "<h1>Dot Matrix</h1>\n<p>Hello! Keep track of consultants and the projects they are staffed on.</p>",
    )
}

pub(crate) fn consultant_list(consultants: &[Consultant]) -> String {
    let mut body = String::from("<h1>Consultants</h1>\n");
    if consultants.is_empty() {
        body.push_str("<p>No consultants yet.</p>");
        return layout("Consultants", &body);
    }

    body.push_str("<ul>\n");
    for consultant in consultants {
        let name = escape(consultant.name());
        match consultant.id() {
            Some(id) => {
                let _ = writeln!(body, "<li><a href=\"/consultant/{id}\">{name}</a></li>");
            }
            None => {
                let _ = writeln!(body, "<li>{name}</li>");
            }
        }
    }
    body.push_str("</ul>");
    layout("Consultants", &body)
}

pub(crate) fn consultant_form() -> String {
    layout(
        "New consultant",
        "<h1>New consultant</h1>\n<form method=\"post\" action=\"/consultant\">\n<label>Name <input type=\"text\" name=\"name\"></label>\n<button type=\"submit\">Create</button>\n</form>",
    )
}

pub(crate) fn consultant_detail(consultant: &Consultant) -> String {
    let name = escape(consultant.name());
    let mut body = format!("<h1>{name}</h1>\n<h2>Assignments</h2>\n");

    if consultant.assignments().is_empty() {
        body.push_str("<p>Not assigned to any project.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for assignment in consultant.assignments() {
            let _ = writeln!(
                body,
                "<li>{project}: {starts} to {ends} ({days} days)</li>",
                project = escape(&assignment.project_id),
                starts = assignment.starts_on,
                ends = assignment.ends_on,
                days = assignment.duration_days(),
            );
        }
        body.push_str("</ul>\n");
    }

    if let Some(id) = consultant.id() {
        let _ = write!(
            body,
            "<form method=\"post\" action=\"/consultant/{id}/assignments\">\n<label>Project <input type=\"text\" name=\"project_id\"></label>\n<label>Start <input type=\"date\" name=\"start_date\"></label>\n<label>End <input type=\"date\" name=\"end_date\"></label>\n<button type=\"submit\">Assign</button>\n</form>"
        );
    }

    layout(consultant.name(), &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn empty_roster_says_so() {
        assert!(consultant_list(&[]).contains("No consultants yet."));
    }

    #[test]
    fn detail_escapes_the_consultant_name() {
        let page = consultant_detail(&Consultant::new("<b>Bold</b>"));
        assert!(page.contains("&lt;b&gt;Bold&lt;/b&gt;"));
        assert!(!page.contains("<b>Bold</b>"));
        assert!(!page.contains("/assignments"), "unsaved consultants get no form");
    }
}
