//! Form schemas, validation and notification formatting.
//!
//! Both form kinds run through one data-driven pipeline: a static schema
//! names the fields in presentation order, [`validate`] checks required-field
//! presence, and the validated submission renders into the notification mail
//! body. Submissions are never stored.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// The two form kinds accepted by the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// Project inquiry from the contact section.
    Project,
    /// Job application from the careers section.
    Application,
}

impl FormKind {
    /// Schema describing this kind's fields and notification subject.
    pub fn schema(&self) -> &'static FormSchema {
        match self {
            FormKind::Project => &PROJECT_SCHEMA,
            FormKind::Application => &APPLICATION_SCHEMA,
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormKind::Project => write!(f, "project"),
            FormKind::Application => write!(f, "application"),
        }
    }
}

/// One field of a form: request key, mail label, required flag.
#[derive(Debug)]
pub struct FieldSpec {
    /// Key in the submitted field map.
    pub key: &'static str,
    /// Row label in the notification mail.
    pub label: &'static str,
    /// Whether the field must be non-empty after trimming.
    pub required: bool,
}

/// Per-kind schema: fixed notification subject plus fields in presentation
/// order.
#[derive(Debug)]
pub struct FormSchema {
    /// Notification subject line.
    pub subject: &'static str,
    /// Fields in the order they appear in the notification.
    pub fields: &'static [FieldSpec],
}

static PROJECT_SCHEMA: FormSchema = FormSchema {
    subject: "Neue Projektanfrage – WSN-Vertrieb",
    fields: &[
        FieldSpec { key: "name", label: "Name", required: true },
        FieldSpec { key: "email", label: "Email", required: true },
        FieldSpec { key: "telefon", label: "Telefon", required: false },
        FieldSpec { key: "projektart", label: "Projektart", required: true },
        FieldSpec { key: "beschreibung", label: "Beschreibung", required: true },
    ],
};

static APPLICATION_SCHEMA: FormSchema = FormSchema {
    subject: "Neue Bewerbung – WSN-Vertrieb",
    fields: &[
        FieldSpec { key: "name", label: "Name", required: true },
        FieldSpec { key: "email", label: "Email", required: true },
        FieldSpec { key: "telefon", label: "Telefon", required: true },
        FieldSpec { key: "erfahrung", label: "Erfahrung", required: false },
        FieldSpec { key: "ueber_dich", label: "Über dich", required: false },
    ],
};

/// Validation failure for a submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Required fields that were absent or empty after trimming, in schema
    /// order.
    #[error("required fields missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// A submission that passed validation, fields in presentation order.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    kind: FormKind,
    rows: Vec<(&'static str, Option<String>)>,
}

/// Check required-field presence for `kind`.
///
/// Values are trimmed; a required field that is absent or empty after
/// trimming fails the whole submission. No other coercion and no format
/// validation is applied, the email field included. Unknown keys are ignored.
pub fn validate(
    kind: FormKind,
    fields: &HashMap<String, String>,
) -> Result<ValidatedSubmission, FormError> {
    let schema = kind.schema();
    let mut missing = Vec::new();
    let mut rows = Vec::with_capacity(schema.fields.len());

    for spec in schema.fields {
        let value = fields
            .get(spec.key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty());
        if spec.required && value.is_none() {
            missing.push(spec.key);
        }
        rows.push((spec.label, value.map(str::to_owned)));
    }

    if !missing.is_empty() {
        return Err(FormError::MissingFields(missing));
    }

    Ok(ValidatedSubmission { kind, rows })
}

/// Placeholder rendered for optional fields the sender left empty.
const PLACEHOLDER: &str = "—";

impl ValidatedSubmission {
    /// The form kind this submission belongs to.
    pub fn kind(&self) -> FormKind {
        self.kind
    }

    /// The fixed notification subject for this submission's kind.
    pub fn subject(&self) -> &'static str {
        self.kind.schema().subject
    }

    /// Render the notification body: one table row per field in schema order,
    /// values HTML-escaped, absent optional values shown as an em-dash.
    pub fn html_body(&self) -> String {
        let rows: String = self
            .rows
            .iter()
            .map(|(label, value)| {
                let value = match value {
                    Some(v) => escape_html(v),
                    None => PLACEHOLDER.to_string(),
                };
                format!(
                    "<tr><th align=\"left\" style=\"padding:6px;border:1px solid #ddd\">{label}</th>\
                     <td style=\"padding:6px;border:1px solid #ddd\">{value}</td></tr>"
                )
            })
            .collect();

        format!(
            "<h3 style=\"font-family:Inter,Arial\">{}</h3>\n\
             <table style=\"border-collapse:collapse;border:1px solid #ddd;font-family:Inter,Arial\">{rows}</table>",
            self.subject()
        )
    }
}

/// Escape a value for embedding in the notification markup.
fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_project() -> HashMap<String, String> {
        fields(&[
            ("name", "Max Mustermann"),
            ("email", "max@example.de"),
            ("telefon", "0151 2345678"),
            ("projektart", "Neubau"),
            ("beschreibung", "Lagerhalle mit Büro"),
        ])
    }

    fn valid_application() -> HashMap<String, String> {
        fields(&[
            ("name", "Erika Musterfrau"),
            ("email", "erika@example.de"),
            ("telefon", "030 123456"),
            ("erfahrung", "5 Jahre Vertrieb"),
            ("ueber_dich", "Teamplayer"),
        ])
    }

    #[test]
    fn test_valid_project_passes() {
        let submission = validate(FormKind::Project, &valid_project()).unwrap();
        assert_eq!(submission.kind(), FormKind::Project);
        assert_eq!(submission.subject(), "Neue Projektanfrage – WSN-Vertrieb");
    }

    #[test]
    fn test_valid_application_passes() {
        let submission = validate(FormKind::Application, &valid_application()).unwrap();
        assert_eq!(submission.subject(), "Neue Bewerbung – WSN-Vertrieb");
    }

    #[test]
    fn test_each_required_project_field_enforced() {
        for key in ["name", "email", "projektart", "beschreibung"] {
            let mut f = valid_project();
            f.remove(key);
            let err = validate(FormKind::Project, &f).unwrap_err();
            assert_eq!(err, FormError::MissingFields(vec![key]), "key: {key}");
        }
    }

    #[test]
    fn test_each_required_application_field_enforced() {
        for key in ["name", "email", "telefon"] {
            let mut f = valid_application();
            f.remove(key);
            let err = validate(FormKind::Application, &f).unwrap_err();
            assert_eq!(err, FormError::MissingFields(vec![key]), "key: {key}");
        }
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let mut f = valid_project();
        f.remove("telefon");
        assert!(validate(FormKind::Project, &f).is_ok());

        let mut f = valid_application();
        f.remove("erfahrung");
        f.remove("ueber_dich");
        assert!(validate(FormKind::Application, &f).is_ok());
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let mut f = valid_project();
        f.insert("beschreibung".to_string(), "   \t ".to_string());
        let err = validate(FormKind::Project, &f).unwrap_err();
        assert_eq!(err, FormError::MissingFields(vec!["beschreibung"]));
    }

    #[test]
    fn test_all_missing_fields_reported_in_schema_order() {
        let f = fields(&[("telefon", "0151 2345678")]);
        let err = validate(FormKind::Project, &f).unwrap_err();
        assert_eq!(
            err,
            FormError::MissingFields(vec!["name", "email", "projektart", "beschreibung"])
        );
    }

    #[test]
    fn test_values_are_trimmed() {
        let mut f = valid_project();
        f.insert("name".to_string(), "  Max  ".to_string());
        let submission = validate(FormKind::Project, &f).unwrap();
        assert!(submission.html_body().contains("<td style=\"padding:6px;border:1px solid #ddd\">Max</td>"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut f = valid_project();
        f.insert("unexpected".to_string(), "x".to_string());
        let submission = validate(FormKind::Project, &f).unwrap();
        assert!(!submission.html_body().contains("unexpected"));
    }

    #[test]
    fn test_body_contains_rows_in_schema_order() {
        let submission = validate(FormKind::Project, &valid_project()).unwrap();
        let body = submission.html_body();

        let positions: Vec<usize> = ["Name", "Email", "Telefon", "Projektart", "Beschreibung"]
            .iter()
            .map(|label| body.find(&format!(">{label}</th>")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_absent_optional_field_renders_placeholder() {
        let mut f = valid_project();
        f.remove("telefon");
        let submission = validate(FormKind::Project, &f).unwrap();
        let body = submission.html_body();
        assert!(body.contains(">Telefon</th>"));
        assert!(body.contains(">—</td>"));
    }

    #[test]
    fn test_values_are_html_escaped() {
        let mut f = valid_project();
        f.insert(
            "beschreibung".to_string(),
            "<script>alert('x')</script> & mehr".to_string(),
        );
        let submission = validate(FormKind::Project, &f).unwrap();
        let body = submission.html_body();
        assert!(body.contains("&lt;script&gt;alert('x')&lt;/script&gt; &amp; mehr"));
        assert!(!body.contains("<script>"));
    }

    #[test]
    fn test_application_body_uses_german_labels() {
        let submission = validate(FormKind::Application, &valid_application()).unwrap();
        let body = submission.html_body();
        assert!(body.contains(">Erfahrung</th>"));
        assert!(body.contains(">Über dich</th>"));
    }

    #[test]
    fn test_missing_fields_display() {
        let err = FormError::MissingFields(vec!["name", "email"]);
        assert_eq!(err.to_string(), "required fields missing: name, email");
    }
}
