use payloads::ExamTypeId;
use payloads::requests::PyqDraft;
use payloads::responses::Pyq;

use super::{
    AdminResource, Column, ListFilter, muted_cell, status_badge, text_cell,
};
use crate::forms::{
    FieldSpec, FormSchema, FormValues, LookupKind, ValidationErrors,
};
use crate::utils::time::current_year;

/// Oldest paper year accepted.
pub const FIRST_PAPER_YEAR: i32 = 1950;

/// Form for papers up to and including `latest_year`.
pub fn pyq_schema(latest_year: i32) -> FormSchema {
    FormSchema::new(vec![
        FieldSpec::lookup("exam_type_id", "Exam Type", LookupKind::ExamType)
            .required("Exam type is required"),
        FieldSpec::text("title", "Title")
            .required("Title is required")
            .max_len(200, "Title must be at most 200 characters"),
        FieldSpec::number("year", "Year")
            .required("Year is required")
            .integer("Year must be a whole number")
            .min(
                FIRST_PAPER_YEAR,
                format!("Year must be {FIRST_PAPER_YEAR} or later"),
            )
            .max(latest_year, "Year cannot be in the future"),
        FieldSpec::text("shift", "Shift").placeholder("e.g. Morning"),
        FieldSpec::number("total_questions", "Total Questions")
            .required("At least 1 question is required")
            .integer("Total questions must be a whole number")
            .min(1, "At least 1 question is required"),
        FieldSpec::number("duration_minutes", "Duration (minutes)")
            .required("Duration is required")
            .integer("Duration must be a whole number of minutes")
            .min(1, "Duration must be at least 1 minute"),
        FieldSpec::checkbox("is_active", "Active").default_bool(true),
    ])
}

impl AdminResource for Pyq {
    const TITLE: &'static str = "Previous Year Papers";
    const SINGULAR: &'static str = "Paper";
    const SEARCH_PLACEHOLDER: &'static str = "Search papers...";
    const FILTER: Option<ListFilter> = Some(ListFilter {
        key: "examTypeId",
        label: "Exam type",
        lookup: LookupKind::ExamType,
    });
    const SORT_OPTIONS: &'static [(&'static str, &'static str)] = &[
        ("year", "Year"),
        ("createdAt", "Date created"),
        ("title", "Title"),
    ];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Title", |p| text_cell(&p.title)),
            Column::new("Year", |p| muted_cell(p.year.to_string())),
            Column::new("Shift", |p| {
                muted_cell(p.shift.clone().unwrap_or_else(|| "-".into()))
            }),
            Column::new("Questions", |p| {
                muted_cell(p.total_questions.to_string())
            }),
            Column::new("Duration", |p| {
                muted_cell(format!("{} min", p.duration_minutes))
            }),
            Column::new("Status", |p| status_badge(p.is_active)),
        ]
    }

    fn schema() -> FormSchema {
        pyq_schema(i32::from(current_year()))
    }

    fn values(&self) -> FormValues {
        FormValues::new()
            .with_text("exam_type_id", self.exam_type_id.to_string())
            .with_text("title", &self.title)
            .with_text("year", self.year.to_string())
            .with_opt_text("shift", self.shift.as_deref())
            .with_text("total_questions", self.total_questions.to_string())
            .with_text("duration_minutes", self.duration_minutes.to_string())
            .with_bool("is_active", self.is_active)
    }

    fn draft(values: &FormValues) -> Result<PyqDraft, ValidationErrors> {
        Ok(PyqDraft {
            title: values.text("title").to_string(),
            exam_type_id: ExamTypeId::from(values.text("exam_type_id")),
            year: values.number("year")?,
            shift: values.opt_text("shift"),
            total_questions: values.number("total_questions")?,
            duration_minutes: values.number("duration_minutes")?,
            is_active: values.bool("is_active"),
        })
    }

    fn label(&self) -> String {
        format!("{} ({})", self.title, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_year(year: &str) -> FormValues {
        pyq_schema(2024)
            .defaults()
            .with_text("exam_type_id", "e1")
            .with_text("title", "CGL Tier 1")
            .with_text("year", year)
            .with_text("total_questions", "100")
            .with_text("duration_minutes", "60")
    }

    #[test]
    fn year_range_is_enforced() {
        let schema = pyq_schema(2024);
        let normalized = schema.normalize(&with_year("1949"));
        let errors = schema.validate(&normalized).unwrap_err();
        assert_eq!(
            errors.for_field("year"),
            Some("Year must be 1950 or later")
        );

        let normalized = schema.normalize(&with_year("2025"));
        let errors = schema.validate(&normalized).unwrap_err();
        assert_eq!(errors.for_field("year"), Some("Year cannot be in the future"));

        let draft = schema
            .prepare(&with_year("2024"), Pyq::draft)
            .unwrap();
        assert_eq!(draft.year, 2024);
        assert_eq!(draft.shift, None);
    }
}
