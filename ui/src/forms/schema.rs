use rust_decimal::Decimal;

use super::{FieldError, FieldValue, FormValues, ValidationErrors};

/// Remote collections a dropdown can be filled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    ExamType,
    Subject,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    TextArea,
    Email,
    Number,
    Checkbox,
    /// Fixed choices as `(value, label)` pairs.
    Select(&'static [(&'static str, &'static str)]),
    /// Choices loaded from the backend.
    Lookup(LookupKind),
    /// Free-length list edited one entry per line.
    Lines,
    /// A fixed number of separate inputs.
    Slots(usize),
}

#[derive(Debug, Clone, PartialEq)]
enum Check {
    Required,
    MinLen(usize),
    MaxLen(usize),
    Min(Decimal),
    Max(Decimal),
    Integer,
    Email,
    Count(usize),
}

#[derive(Debug, Clone, PartialEq)]
struct Rule {
    check: Check,
    message: String,
}

/// Declaration of one form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: Option<&'static str>,
    pub help: Option<&'static str>,
    /// Upper-case the text before validation and submission.
    pub uppercase: bool,
    pub default: FieldValue,
    rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        let default = match &kind {
            FieldKind::Checkbox => FieldValue::Bool(false),
            FieldKind::Lines => FieldValue::List(Vec::new()),
            FieldKind::Slots(count) => {
                FieldValue::List(vec![String::new(); *count])
            }
            _ => FieldValue::Text(String::new()),
        };
        Self {
            name,
            label,
            kind,
            placeholder: None,
            help: None,
            uppercase: false,
            default,
            rules: Vec::new(),
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn textarea(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::TextArea)
    }

    pub fn email(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn checkbox(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    pub fn select(
        name: &'static str,
        label: &'static str,
        options: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self::new(name, label, FieldKind::Select(options))
    }

    pub fn lookup(
        name: &'static str,
        label: &'static str,
        kind: LookupKind,
    ) -> Self {
        Self::new(name, label, FieldKind::Lookup(kind))
    }

    pub fn lines(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Lines)
    }

    pub fn slots(name: &'static str, label: &'static str, count: usize) -> Self {
        Self::new(name, label, FieldKind::Slots(count))
    }

    fn rule(mut self, check: Check, message: impl Into<String>) -> Self {
        self.rules.push(Rule {
            check,
            message: message.into(),
        });
        self
    }

    pub fn required(self, message: impl Into<String>) -> Self {
        self.rule(Check::Required, message)
    }

    pub fn min_len(self, len: usize, message: impl Into<String>) -> Self {
        self.rule(Check::MinLen(len), message)
    }

    pub fn max_len(self, len: usize, message: impl Into<String>) -> Self {
        self.rule(Check::MaxLen(len), message)
    }

    pub fn min(self, min: impl Into<Decimal>, message: impl Into<String>) -> Self {
        self.rule(Check::Min(min.into()), message)
    }

    pub fn max(self, max: impl Into<Decimal>, message: impl Into<String>) -> Self {
        self.rule(Check::Max(max.into()), message)
    }

    pub fn integer(self, message: impl Into<String>) -> Self {
        self.rule(Check::Integer, message)
    }

    pub fn valid_email(self, message: impl Into<String>) -> Self {
        self.rule(Check::Email, message)
    }

    /// Exactly `count` non-blank entries.
    pub fn count(self, count: usize, message: impl Into<String>) -> Self {
        self.rule(Check::Count(count), message)
    }

    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn default_text(mut self, value: impl Into<String>) -> Self {
        self.default = FieldValue::Text(value.into());
        self
    }

    pub fn default_bool(mut self, value: bool) -> Self {
        self.default = FieldValue::Bool(value);
        self
    }

    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|rule| rule.check == Check::Required)
    }

    fn normalize(&self, value: &FieldValue) -> FieldValue {
        match value {
            FieldValue::Text(text) => {
                let text = text.trim();
                FieldValue::Text(if self.uppercase {
                    text.to_uppercase()
                } else {
                    text.to_string()
                })
            }
            FieldValue::List(items) => {
                let items = items.iter().map(|item| item.trim().to_string());
                FieldValue::List(match self.kind {
                    FieldKind::Lines => {
                        items.filter(|item| !item.is_empty()).collect()
                    }
                    _ => items.collect(),
                })
            }
            FieldValue::Bool(flag) => FieldValue::Bool(*flag),
        }
    }

    /// First failing rule of this field, if any.
    fn validate(&self, values: &FormValues) -> Option<FieldError> {
        let text = values.text(self.name).trim();

        if self.kind == FieldKind::Number
            && !text.is_empty()
            && text.parse::<Decimal>().is_err()
        {
            return Some(FieldError::field(
                self.name,
                format!("{} must be a number", self.label),
            ));
        }

        let fails = |check: &Check| match check {
            Check::Required => match values.get(self.name) {
                Some(FieldValue::List(items)) => {
                    items.iter().all(|item| item.trim().is_empty())
                }
                Some(FieldValue::Bool(_)) => false,
                _ => text.is_empty(),
            },
            Check::MinLen(len) => {
                !text.is_empty() && text.chars().count() < *len
            }
            Check::MaxLen(len) => text.chars().count() > *len,
            Check::Min(min) => {
                text.parse::<Decimal>().is_ok_and(|value| value < *min)
            }
            Check::Max(max) => {
                text.parse::<Decimal>().is_ok_and(|value| value > *max)
            }
            Check::Integer => text
                .parse::<Decimal>()
                .is_ok_and(|value| !is_storable_integer(value)),
            Check::Email => !text.is_empty() && !looks_like_email(text),
            Check::Count(count) => {
                values
                    .list(self.name)
                    .iter()
                    .filter(|item| !item.trim().is_empty())
                    .count()
                    != *count
            }
        };

        self.rules
            .iter()
            .find(|rule| fails(&rule.check))
            .map(|rule| FieldError::field(self.name, rule.message.clone()))
    }
}

fn looks_like_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    match text.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Rule spanning several fields. Returns the error to report, if any.
pub type CrossCheck = fn(&FormValues) -> Option<FieldError>;

/// A complete form: its fields in display order plus cross-field rules.
#[derive(Debug, Clone)]
pub struct FormSchema {
    pub fields: Vec<FieldSpec>,
    checks: Vec<CrossCheck>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
            checks: Vec::new(),
        }
    }

    pub fn check(mut self, check: CrossCheck) -> Self {
        self.checks.push(check);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Values of an empty create form.
    pub fn defaults(&self) -> FormValues {
        let mut values = FormValues::new();
        for field in &self.fields {
            values.set(field.name, field.default.clone());
        }
        values
    }

    /// Trim text, apply case rules and drop blank list entries.
    pub fn normalize(&self, values: &FormValues) -> FormValues {
        let mut normalized = values.clone();
        for field in &self.fields {
            if let Some(value) = values.get(field.name) {
                normalized.set(field.name, field.normalize(value));
            }
        }
        normalized
    }

    /// Field rules first, then cross-field rules. Every failing field is
    /// reported once.
    pub fn validate(&self, values: &FormValues) -> Result<(), ValidationErrors> {
        let mut errors: Vec<FieldError> = self
            .fields
            .iter()
            .filter_map(|field| field.validate(values))
            .collect();

        for check in &self.checks {
            if let Some(error) = check(values)
                && !errors.iter().any(|e| e.field.is_some() && e.field == error.field)
            {
                errors.push(error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Normalize, validate and build the request body.
    pub fn prepare<D>(
        &self,
        values: &FormValues,
        build: impl FnOnce(&FormValues) -> Result<D, ValidationErrors>,
    ) -> Result<D, ValidationErrors> {
        let values = self.normalize(values);
        self.validate(&values)?;
        build(&values)
    }
}

/// Whole and within `i32`, so it converts into any integer a request
/// field holds.
fn is_storable_integer(value: Decimal) -> bool {
    value.fract().is_zero()
        && value >= Decimal::from(i32::MIN)
        && value <= Decimal::from(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title_schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::text("title", "Title")
                .required("Title is required")
                .min_len(3, "Title must be at least 3 characters")
                .max_len(10, "Title is too long"),
            FieldSpec::number("count", "Count")
                .required("Count is required")
                .min(1, "At least 1 is required")
                .integer("Count must be a whole number"),
        ])
    }

    #[test]
    fn first_failing_rule_wins() {
        let schema = title_schema();
        let values = FormValues::new()
            .with_text("title", "ab")
            .with_text("count", "0");
        let errors = schema.validate(&values).unwrap_err();
        assert_eq!(
            errors.for_field("title"),
            Some("Title must be at least 3 characters")
        );
        assert_eq!(errors.for_field("count"), Some("At least 1 is required"));
    }

    #[test]
    fn blank_optional_rules_are_skipped() {
        let schema = FormSchema::new(vec![
            FieldSpec::email("email", "Email").valid_email("Invalid email"),
            FieldSpec::number("marks", "Marks").min(0, "No negatives"),
        ]);
        assert!(schema.validate(&schema.defaults()).is_ok());
    }

    #[test]
    fn numbers_must_parse() {
        let schema = title_schema();
        let values = FormValues::new()
            .with_text("title", "Mock")
            .with_text("count", "ten");
        let errors = schema.validate(&values).unwrap_err();
        assert_eq!(errors.for_field("count"), Some("Count must be a number"));

        let values = values.with_text("count", "2.5");
        let errors = schema.validate(&values).unwrap_err();
        assert_eq!(
            errors.for_field("count"),
            Some("Count must be a whole number")
        );
    }

    #[test]
    fn integer_rule_bounds_what_a_draft_can_hold() {
        let schema = title_schema();
        let values = FormValues::new().with_text("title", "Mock");

        let whole = values.clone().with_text("count", "1.0");
        assert!(schema.validate(&whole).is_ok());
        assert_eq!(whole.number::<u32>("count"), Ok(1));

        let huge = values.with_text("count", "5000000000");
        let errors = schema.validate(&huge).unwrap_err();
        assert_eq!(
            errors.for_field("count"),
            Some("Count must be a whole number")
        );
    }

    #[test]
    fn normalize_trims_and_uppercases() {
        let schema = FormSchema::new(vec![
            FieldSpec::text("code", "Code").uppercase(),
            FieldSpec::lines("features", "Features"),
            FieldSpec::slots("options", "Options", 2),
        ]);
        let values = FormValues::new()
            .with_text("code", "  psi ")
            .with_list("features", vec![" a ".into(), "  ".into(), "b".into()])
            .with_list("options", vec![" x".into(), "".into()]);

        let normalized = schema.normalize(&values);
        assert_eq!(normalized.text("code"), "PSI");
        assert_eq!(normalized.list("features"), ["a", "b"]);
        assert_eq!(normalized.list("options"), ["x", ""]);
    }

    #[test]
    fn email_check() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a b@c.io"));
        assert!(!looks_like_email("a@@c.io"));
    }

    #[test]
    fn cross_checks_run_after_fields() {
        fn never_equal(values: &FormValues) -> Option<FieldError> {
            (values.text("a") == values.text("b"))
                .then(|| FieldError::form("A and B must differ"))
        }
        let schema = FormSchema::new(vec![
            FieldSpec::text("a", "A"),
            FieldSpec::text("b", "B"),
        ])
        .check(never_equal);

        let values = FormValues::new().with_text("a", "x").with_text("b", "x");
        let errors = schema.validate(&values).unwrap_err();
        assert_eq!(errors.first_message(), "A and B must differ");
    }

    #[test]
    fn slot_count_and_required_lists() {
        let schema = FormSchema::new(vec![
            FieldSpec::slots("options", "Options", 4)
                .count(4, "All 4 options are required"),
            FieldSpec::lines("features", "Features")
                .required("Add at least one feature"),
        ]);
        let errors = schema.validate(&schema.defaults()).unwrap_err();
        assert_eq!(
            errors.for_field("options"),
            Some("All 4 options are required")
        );
        assert_eq!(
            errors.for_field("features"),
            Some("Add at least one feature")
        );
    }
}
