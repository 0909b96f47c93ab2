use payloads::ExamTypeId;
use payloads::requests::SubjectDraft;
use payloads::responses::Subject;
use yew::prelude::*;
use yew_router::prelude::*;

use super::{
    AdminResource, Column, ListFilter, muted_cell, status_badge, text_cell,
};
use crate::Route;
use crate::forms::{
    FieldSpec, FormSchema, FormValues, LookupKind, ValidationErrors,
};

fn hierarchy_link(subject: &Subject) -> Html {
    html! {
        <Link<Route>
            to={Route::Hierarchy { subject_id: subject.id.to_string() }}
            classes="text-sm font-medium text-neutral-900 dark:text-neutral-100 underline hover:text-neutral-700 dark:hover:text-neutral-300"
        >
            {"Hierarchy"}
        </Link<Route>>
    }
}

impl AdminResource for Subject {
    const TITLE: &'static str = "Subjects";
    const SINGULAR: &'static str = "Subject";
    const SEARCH_PLACEHOLDER: &'static str = "Search subjects...";
    const FILTER: Option<ListFilter> = Some(ListFilter {
        key: "examTypeId",
        label: "Exam type",
        lookup: LookupKind::ExamType,
    });
    const SORT_OPTIONS: &'static [(&'static str, &'static str)] =
        &[("createdAt", "Date created"), ("name", "Name")];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Name", |s| text_cell(&s.name)),
            Column::new("Code", |s| muted_cell(&s.code)),
            Column::new("Exam Type", |s| {
                muted_cell(s.exam_type_name.clone().unwrap_or_default())
            }),
            Column::new("Status", |s| status_badge(s.is_active)),
            Column::new("Structure", hierarchy_link),
        ]
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::lookup("exam_type_id", "Exam Type", LookupKind::ExamType)
                .required("Exam type is required"),
            FieldSpec::text("name", "Name")
                .required("Name is required")
                .max_len(100, "Name must be at most 100 characters"),
            FieldSpec::text("code", "Code")
                .required("Code is required")
                .max_len(20, "Code must be at most 20 characters")
                .uppercase(),
            FieldSpec::textarea("description", "Description")
                .max_len(500, "Description must be at most 500 characters"),
            FieldSpec::checkbox("is_active", "Active").default_bool(true),
        ])
    }

    fn values(&self) -> FormValues {
        FormValues::new()
            .with_text("exam_type_id", self.exam_type_id.to_string())
            .with_text("name", &self.name)
            .with_text("code", &self.code)
            .with_opt_text("description", self.description.as_deref())
            .with_bool("is_active", self.is_active)
    }

    fn draft(values: &FormValues) -> Result<SubjectDraft, ValidationErrors> {
        Ok(SubjectDraft {
            name: values.text("name").to_string(),
            code: values.text("code").to_string(),
            exam_type_id: ExamTypeId::from(values.text("exam_type_id")),
            description: values.opt_text("description"),
            is_active: values.bool("is_active"),
        })
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn delete_warning(&self) -> Option<String> {
        Some(
            "The subject's whole hierarchy will be deleted with it."
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

    #[test]
    fn exam_type_must_be_chosen() {
        let values = Subject::schema()
            .defaults()
            .with_text("name", "Quantitative Aptitude")
            .with_text("code", "qa");
        let errors = Subject::prepare(&values).unwrap_err();
        assert_eq!(
            errors.for_field("exam_type_id"),
            Some("Exam type is required")
        );

        let draft =
            Subject::prepare(&values.with_text("exam_type_id", "e1")).unwrap();
        assert_eq!(draft.exam_type_id, ExamTypeId::from("e1"));
        assert_eq!(draft.code, "QA");
    }
}
