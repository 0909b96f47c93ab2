use payloads::Difficulty;
use payloads::requests::QuestionDraft;
use payloads::responses::Question;
use payloads::{NodeId, SubjectId};
use rust_decimal::Decimal;
use yew::prelude::*;

use super::{
    AdminResource, Column, ListFilter, muted_cell, status_badge, text_cell,
};
use crate::forms::{
    FieldError, FieldSpec, FormSchema, FormValues, LookupKind,
    ValidationErrors, decimal_text,
};
use crate::utils::truncate;

pub const OPTION_COUNT: usize = 4;

const CORRECT_OPTIONS: &[(&str, &str)] = &[
    ("1", "Option 1"),
    ("2", "Option 2"),
    ("3", "Option 3"),
    ("4", "Option 4"),
];

const DIFFICULTIES: &[(&str, &str)] =
    &[("easy", "Easy"), ("medium", "Medium"), ("hard", "Hard")];

fn difficulty_badge(question: &Question) -> Html {
    let class = match question.difficulty {
        Difficulty::Easy => "text-green-700 dark:text-green-400",
        Difficulty::Medium => "text-amber-700 dark:text-amber-400",
        Difficulty::Hard => "text-red-700 dark:text-red-400",
    };
    html! {
        <span class={format!("text-xs font-medium {class}")}>
            {question.difficulty.to_string()}
        </span>
    }
}

fn marks_positive(values: &FormValues) -> Option<FieldError> {
    let marks: Decimal = values.decimal("marks").ok()?;
    (marks <= Decimal::ZERO)
        .then(|| FieldError::field("marks", "Marks must be greater than 0"))
}

impl AdminResource for Question {
    const TITLE: &'static str = "Questions";
    const SINGULAR: &'static str = "Question";
    const EXPORTABLE: bool = true;
    const SEARCH_PLACEHOLDER: &'static str = "Search question text...";
    const FILTER: Option<ListFilter> = Some(ListFilter {
        key: "subjectId",
        label: "Subject",
        lookup: LookupKind::Subject,
    });
    const SORT_OPTIONS: &'static [(&'static str, &'static str)] =
        &[("createdAt", "Date created"), ("difficulty", "Difficulty")];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Question", |q| text_cell(truncate(&q.question_text, 80))),
            Column::new("Answer", |q| {
                let answer = q
                    .options
                    .get(usize::from(q.correct_option).saturating_sub(1))
                    .map(|option| truncate(option, 30))
                    .unwrap_or_default();
                muted_cell(format!("{}. {answer}", q.correct_option))
            }),
            Column::new("Difficulty", difficulty_badge),
            Column::new("Marks", |q| {
                muted_cell(format!(
                    "+{} / -{}",
                    decimal_text(q.marks),
                    decimal_text(q.negative_marks)
                ))
            }),
            Column::new("Status", |q| status_badge(q.is_active)),
        ]
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::textarea("question_text", "Question")
                .required("Question text is required")
                .min_len(5, "Question must be at least 5 characters"),
            FieldSpec::slots("options", "Options", OPTION_COUNT)
                .count(OPTION_COUNT, "All 4 options are required"),
            FieldSpec::select("correct_option", "Correct Option", CORRECT_OPTIONS)
                .required("Choose the correct option")
                .default_text("1"),
            FieldSpec::textarea("explanation", "Explanation"),
            FieldSpec::lookup("subject_id", "Subject", LookupKind::Subject),
            FieldSpec::text("hierarchy_node_id", "Hierarchy Node")
                .help("Id of the chapter or topic this question belongs to"),
            FieldSpec::select("difficulty", "Difficulty", DIFFICULTIES)
                .default_text(Difficulty::default().as_str()),
            FieldSpec::number("marks", "Marks")
                .required("Marks are required")
                .default_text("1"),
            FieldSpec::number("negative_marks", "Negative Marks")
                .min(0, "Negative marks cannot be below 0")
                .default_text("0"),
            FieldSpec::checkbox("is_active", "Active").default_bool(true),
        ])
        .check(marks_positive)
    }

    fn values(&self) -> FormValues {
        let mut options = self.options.clone();
        options.resize(OPTION_COUNT, String::new());
        FormValues::new()
            .with_text("question_text", &self.question_text)
            .with_list("options", options)
            .with_text("correct_option", self.correct_option.to_string())
            .with_opt_text("explanation", self.explanation.as_deref())
            .with_text(
                "subject_id",
                self.subject_id.as_ref().map(ToString::to_string).unwrap_or_default(),
            )
            .with_text(
                "hierarchy_node_id",
                self.hierarchy_node_id
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            )
            .with_text("difficulty", self.difficulty.as_str())
            .with_text("marks", decimal_text(self.marks))
            .with_text("negative_marks", decimal_text(self.negative_marks))
            .with_bool("is_active", self.is_active)
    }

    fn draft(values: &FormValues) -> Result<QuestionDraft, ValidationErrors> {
        let correct_option: u8 = values.number("correct_option")?;
        if !(1..=OPTION_COUNT as u8).contains(&correct_option) {
            return Err(FieldError::field(
                "correct_option",
                "Choose the correct option",
            )
            .into());
        }
        let difficulty = Difficulty::parse(values.text("difficulty"))
            .unwrap_or_default();

        Ok(QuestionDraft {
            question_text: values.text("question_text").to_string(),
            options: values.list("options").to_vec(),
            correct_option,
            explanation: values.opt_text("explanation"),
            subject_id: values.opt_text("subject_id").map(SubjectId),
            hierarchy_node_id: values.opt_text("hierarchy_node_id").map(NodeId),
            difficulty,
            marks: values.decimal("marks")?,
            negative_marks: values.opt_number("negative_marks")?.unwrap_or_default(),
            is_active: values.bool("is_active"),
        })
    }

    fn label(&self) -> String {
        truncate(&self.question_text, 40)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn filled() -> FormValues {
        Question::schema()
            .defaults()
            .with_text("question_text", "What is 3/4 of 64?")
            .with_list(
                "options",
                vec!["36".into(), "42".into(), "48".into(), "54".into()],
            )
            .with_text("correct_option", "3")
            .with_text("hierarchy_node_id", "n7")
    }

    #[test]
    fn builds_a_question_with_defaults() {
        let draft = Question::prepare(&filled()).unwrap();
        assert_eq!(draft.correct_option, 3);
        assert_eq!(draft.difficulty, Difficulty::Medium);
        assert_eq!(draft.marks, dec!(1));
        assert_eq!(draft.negative_marks, Decimal::ZERO);
        assert_eq!(draft.hierarchy_node_id, Some(NodeId::from("n7")));
    }

    #[test]
    fn every_option_is_needed() {
        let values = filled().with_list(
            "options",
            vec!["36".into(), " ".into(), "48".into(), "54".into()],
        );
        let errors = Question::prepare(&values).unwrap_err();
        assert_eq!(
            errors.for_field("options"),
            Some("All 4 options are required")
        );
    }

    #[test]
    fn marks_must_be_positive() {
        let errors =
            Question::prepare(&filled().with_text("marks", "0")).unwrap_err();
        assert_eq!(
            errors.for_field("marks"),
            Some("Marks must be greater than 0")
        );
    }
}
