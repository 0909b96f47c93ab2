use payloads::requests::FreeTestDraft;
use payloads::responses::FreeTest;
use payloads::{ExamTypeId, SubjectId};

use super::{
    AdminResource, Column, ListFilter, muted_cell, status_badge, text_cell,
};
use crate::forms::{
    FieldSpec, FormSchema, FormValues, LookupKind, ValidationErrors,
};
use crate::utils::time::created_cell;

impl AdminResource for FreeTest {
    const TITLE: &'static str = "Free Tests";
    const SINGULAR: &'static str = "Free Test";
    const SEARCH_PLACEHOLDER: &'static str = "Search free tests...";
    const FILTER: Option<ListFilter> = Some(ListFilter {
        key: "examTypeId",
        label: "Exam type",
        lookup: LookupKind::ExamType,
    });
    const SORT_OPTIONS: &'static [(&'static str, &'static str)] =
        &[("createdAt", "Date created"), ("title", "Title")];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Title", |t| text_cell(&t.title)),
            Column::new("Questions", |t| {
                muted_cell(t.total_questions.to_string())
            }),
            Column::new("Duration", |t| {
                muted_cell(format!("{} min", t.duration_minutes))
            }),
            Column::new("Marks", |t| muted_cell(t.total_marks.to_string())),
            Column::new("Status", |t| status_badge(t.is_active)),
            Column::new("Created", |t| muted_cell(created_cell(t.created_at))),
        ]
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::lookup("exam_type_id", "Exam Type", LookupKind::ExamType)
                .required("Exam type is required"),
            FieldSpec::lookup("subject_id", "Subject", LookupKind::Subject)
                .help("Optional; leave empty for a mixed test"),
            FieldSpec::text("title", "Title")
                .required("Title is required")
                .max_len(200, "Title must be at most 200 characters"),
            FieldSpec::textarea("description", "Description"),
            FieldSpec::number("total_questions", "Total Questions")
                .required("At least 1 question is required")
                .integer("Total questions must be a whole number")
                .min(1, "At least 1 question is required"),
            FieldSpec::number("duration_minutes", "Duration (minutes)")
                .required("Duration is required")
                .integer("Duration must be a whole number of minutes")
                .min(1, "Duration must be at least 1 minute"),
            FieldSpec::number("total_marks", "Total Marks")
                .required("Total marks is required")
                .integer("Total marks must be a whole number")
                .min(1, "Total marks must be at least 1"),
            FieldSpec::checkbox("is_active", "Active").default_bool(true),
        ])
    }

    fn values(&self) -> FormValues {
        FormValues::new()
            .with_text("exam_type_id", self.exam_type_id.to_string())
            .with_text(
                "subject_id",
                self.subject_id
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            )
            .with_text("title", &self.title)
            .with_opt_text("description", self.description.as_deref())
            .with_text("total_questions", self.total_questions.to_string())
            .with_text("duration_minutes", self.duration_minutes.to_string())
            .with_text("total_marks", self.total_marks.to_string())
            .with_bool("is_active", self.is_active)
    }

    fn draft(values: &FormValues) -> Result<FreeTestDraft, ValidationErrors> {
        Ok(FreeTestDraft {
            title: values.text("title").to_string(),
            exam_type_id: ExamTypeId::from(values.text("exam_type_id")),
            subject_id: values.opt_text("subject_id").map(SubjectId),
            description: values.opt_text("description"),
            total_questions: values.number("total_questions")?,
            duration_minutes: values.number("duration_minutes")?,
            total_marks: values.number("total_marks")?,
            is_active: values.bool("is_active"),
        })
    }

    fn label(&self) -> String {
        self.title.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormValues {
        FreeTest::schema()
            .defaults()
            .with_text("exam_type_id", "e1")
            .with_text("title", "Reasoning Sprint")
            .with_text("total_questions", "25")
            .with_text("duration_minutes", "20")
            .with_text("total_marks", "50")
    }

    #[test]
    fn zero_questions_is_rejected() {
        let values = filled().with_text("total_questions", "0");
        let errors = FreeTest::prepare(&values).unwrap_err();
        assert_eq!(
            errors.for_field("total_questions"),
            Some("At least 1 question is required")
        );
        assert_eq!(errors.0.len(), 1);
    }

    #[test]
    fn subject_is_optional() {
        let draft = FreeTest::prepare(&filled()).unwrap();
        assert_eq!(draft.subject_id, None);

        let draft =
            FreeTest::prepare(&filled().with_text("subject_id", "s9")).unwrap();
        assert_eq!(draft.subject_id, Some(SubjectId::from("s9")));
    }
}
