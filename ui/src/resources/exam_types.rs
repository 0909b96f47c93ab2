use payloads::requests::ExamTypeDraft;
use payloads::responses::ExamType;

use super::{AdminResource, Column, muted_cell, status_badge, text_cell};
use crate::forms::{FieldSpec, FormSchema, FormValues, ValidationErrors};
use crate::utils::time::created_cell;

impl AdminResource for ExamType {
    const TITLE: &'static str = "Exam Types";
    const SINGULAR: &'static str = "Exam Type";
    const SEARCH_PLACEHOLDER: &'static str = "Search by name or code...";
    const SORT_OPTIONS: &'static [(&'static str, &'static str)] =
        &[("createdAt", "Date created"), ("name", "Name"), ("code", "Code")];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Name", |e| text_cell(&e.name)),
            Column::new("Code", |e| muted_cell(&e.code)),
            Column::new("Status", |e| status_badge(e.is_active)),
            Column::new("Created", |e| muted_cell(created_cell(e.created_at))),
        ]
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::text("name", "Name")
                .required("Name is required")
                .max_len(100, "Name must be at most 100 characters")
                .placeholder("e.g. Police Sub Inspector"),
            FieldSpec::text("code", "Code")
                .required("Code is required")
                .max_len(10, "Code must be at most 10 characters")
                .uppercase()
                .placeholder("e.g. PSI"),
            FieldSpec::textarea("description", "Description")
                .max_len(500, "Description must be at most 500 characters"),
            FieldSpec::checkbox("is_active", "Active").default_bool(true),
        ])
    }

    fn values(&self) -> FormValues {
        FormValues::new()
            .with_text("name", &self.name)
            .with_text("code", &self.code)
            .with_opt_text("description", self.description.as_deref())
            .with_bool("is_active", self.is_active)
    }

    fn draft(values: &FormValues) -> Result<ExamTypeDraft, ValidationErrors> {
        Ok(ExamTypeDraft {
            name: values.text("name").to_string(),
            code: values.text("code").to_string(),
            description: values.opt_text("description"),
            is_active: values.bool("is_active"),
        })
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }

    fn delete_warning(&self) -> Option<String> {
        Some(
            "Subjects, test series and papers linked to this exam type will \
             lose their exam type."
                .to_string(),
        )
    }

    fn confirmation_value(&self) -> Option<String> {
        Some(self.code.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::ExamTypeId;

    #[test]
    fn code_is_submitted_uppercase() {
        let values = ExamType::schema()
            .defaults()
            .with_text("name", "Police Sub Inspector")
            .with_text("code", "psi");
        let draft = ExamType::prepare(&values).unwrap();
        assert_eq!(draft.name, "Police Sub Inspector");
        assert_eq!(draft.code, "PSI");
        assert!(draft.is_active);
        assert_eq!(draft.description, None);
    }

    #[test]
    fn name_and_code_are_required() {
        let errors = ExamType::prepare(&ExamType::schema().defaults())
            .unwrap_err();
        assert_eq!(errors.for_field("name"), Some("Name is required"));
        assert_eq!(errors.for_field("code"), Some("Code is required"));
    }

    #[test]
    fn unchanged_edit_submits_the_same_record() {
        let record = ExamType {
            id: ExamTypeId::from("e1"),
            name: "Staff Selection Commission".into(),
            code: "SSC".into(),
            description: Some("Central government recruitment".into()),
            is_active: false,
            created_at: None,
        };
        let draft = ExamType::prepare(&record.values()).unwrap();
        assert_eq!(
            draft,
            ExamTypeDraft {
                name: record.name.clone(),
                code: record.code.clone(),
                description: record.description.clone(),
                is_active: record.is_active,
            }
        );
    }
}
