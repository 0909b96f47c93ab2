use payloads::requests::StudentDraft;
use payloads::responses::Student;

use super::{AdminResource, Column, muted_cell, status_badge, text_cell};
use crate::forms::{FieldSpec, FormSchema, FormValues, ValidationErrors};
use crate::utils::time::created_cell;

impl AdminResource for Student {
    const TITLE: &'static str = "Students";
    const SINGULAR: &'static str = "Student";
    /// Students sign up through the student app.
    const ALLOW_CREATE: bool = false;
    const EXPORTABLE: bool = true;
    const SEARCH_PLACEHOLDER: &'static str = "Search by name, email or phone...";
    const SORT_OPTIONS: &'static [(&'static str, &'static str)] =
        &[("createdAt", "Date joined"), ("name", "Name")];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Name", |s| text_cell(&s.name)),
            Column::new("Email", |s| muted_cell(&s.email)),
            Column::new("Phone", |s| {
                muted_cell(s.phone.clone().unwrap_or_else(|| "-".into()))
            }),
            Column::new("Subscriptions", |s| {
                muted_cell(s.active_subscriptions.to_string())
            }),
            Column::new("Status", |s| status_badge(s.is_active)),
            Column::new("Joined", |s| muted_cell(created_cell(s.created_at))),
        ]
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::text("name", "Name")
                .required("Name is required")
                .min_len(2, "Name must be at least 2 characters"),
            FieldSpec::email("email", "Email")
                .required("Email is required")
                .valid_email("Enter a valid email address"),
            FieldSpec::text("phone", "Phone")
                .min_len(10, "Phone number must be at least 10 digits")
                .max_len(15, "Phone number must be at most 15 digits"),
            FieldSpec::checkbox("is_active", "Active").default_bool(true),
        ])
    }

    fn values(&self) -> FormValues {
        FormValues::new()
            .with_text("name", &self.name)
            .with_text("email", &self.email)
            .with_opt_text("phone", self.phone.as_deref())
            .with_bool("is_active", self.is_active)
    }

    fn draft(values: &FormValues) -> Result<StudentDraft, ValidationErrors> {
        Ok(StudentDraft {
            name: values.text("name").to_string(),
            email: values.text("email").to_lowercase(),
            phone: values.opt_text("phone"),
            is_active: values.bool("is_active"),
        })
    }

    fn label(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    fn confirmation_value(&self) -> Option<String> {
        Some(self.email.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_validated() {
        let values = Student::schema()
            .defaults()
            .with_text("name", "Ravi Kumar")
            .with_text("email", "ravi@");
        let errors = Student::prepare(&values).unwrap_err();
        assert_eq!(
            errors.for_field("email"),
            Some("Enter a valid email address")
        );

        let draft =
            Student::prepare(&values.with_text("email", " Ravi@Example.in "))
                .unwrap();
        assert_eq!(draft.email, "ravi@example.in");
        assert_eq!(draft.phone, None);
    }
}
