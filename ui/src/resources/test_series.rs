use futures::FutureExt;
use payloads::requests::TestSeriesDraft;
use payloads::responses::TestSeries;
use payloads::{APIClient, ExamTypeId};
use rust_decimal::Decimal;
use yew::prelude::*;

use super::{
    AdminResource, Column, ListFilter, RecordFuture, featured_badge,
    muted_cell, price_cell, status_badge, text_cell,
};
use crate::forms::{
    FieldError, FieldSpec, FormSchema, FormValues, LookupKind,
    ValidationErrors, decimal_text,
};

fn pricing(series: &TestSeries) -> Html {
    match series.discount_price {
        Some(discount) => html! {
            <div class="flex items-baseline gap-2">
                {price_cell(discount)}
                <span class="text-xs line-through text-neutral-500">
                    {format!("₹{}", decimal_text(series.price))}
                </span>
            </div>
        },
        None => price_cell(series.price),
    }
}

fn discount_within_price(values: &FormValues) -> Option<FieldError> {
    let price = values.decimal("price").ok()?;
    let discount =
        values.opt_number::<Decimal>("discount_price").ok()??;
    (discount > price).then(|| {
        FieldError::field(
            "discount_price",
            "Discount price cannot exceed the price",
        )
    })
}

fn free_within_total(values: &FormValues) -> Option<FieldError> {
    let total: u32 = values.number("total_tests").ok()?;
    let free: u32 = values.number("free_tests").ok()?;
    (free > total).then(|| {
        FieldError::field(
            "free_tests",
            "Free tests cannot exceed total tests",
        )
    })
}

impl AdminResource for TestSeries {
    const TITLE: &'static str = "Test Series";
    const SINGULAR: &'static str = "Test Series";
    const SEARCH_PLACEHOLDER: &'static str = "Search test series...";
    const FILTER: Option<ListFilter> = Some(ListFilter {
        key: "examTypeId",
        label: "Exam type",
        lookup: LookupKind::ExamType,
    });
    const SORT_OPTIONS: &'static [(&'static str, &'static str)] = &[
        ("createdAt", "Date created"),
        ("title", "Title"),
        ("price", "Price"),
    ];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Title", |t| text_cell(&t.title)),
            Column::new("Price", pricing),
            Column::new("Tests", |t| {
                muted_cell(format!("{} ({} free)", t.total_tests, t.free_tests))
            }),
            Column::new("Validity", |t| {
                muted_cell(format!("{} days", t.validity_days))
            }),
            Column::new("Status", |t| {
                html! {
                    <div class="flex gap-1">
                        {status_badge(t.is_active)}
                        {featured_badge(t.is_featured)}
                    </div>
                }
            }),
        ]
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::lookup("exam_type_id", "Exam Type", LookupKind::ExamType)
                .required("Exam type is required"),
            FieldSpec::text("title", "Title")
                .required("Title is required")
                .min_len(3, "Title must be at least 3 characters")
                .max_len(200, "Title must be at most 200 characters"),
            FieldSpec::textarea("description", "Description"),
            FieldSpec::number("price", "Price (₹)")
                .required("Price is required")
                .min(0, "Price cannot be negative"),
            FieldSpec::number("discount_price", "Discount Price (₹)")
                .min(0, "Discount price cannot be negative")
                .help("Leave empty for no discount"),
            FieldSpec::number("total_tests", "Total Tests")
                .required("Total tests is required")
                .integer("Total tests must be a whole number")
                .min(1, "At least 1 test is required"),
            FieldSpec::number("free_tests", "Free Tests")
                .integer("Free tests must be a whole number")
                .min(0, "Free tests cannot be negative")
                .default_text("0"),
            FieldSpec::number("validity_days", "Validity (days)")
                .required("Validity is required")
                .integer("Validity must be a whole number of days")
                .min(1, "Validity must be at least 1 day")
                .default_text("365"),
            FieldSpec::checkbox("is_active", "Active").default_bool(true),
            FieldSpec::checkbox("is_featured", "Featured"),
        ])
        .check(discount_within_price)
        .check(free_within_total)
    }

    fn values(&self) -> FormValues {
        FormValues::new()
            .with_text("exam_type_id", self.exam_type_id.to_string())
            .with_text("title", &self.title)
            .with_opt_text("description", self.description.as_deref())
            .with_text("price", decimal_text(self.price))
            .with_text(
                "discount_price",
                self.discount_price.map(decimal_text).unwrap_or_default(),
            )
            .with_text("total_tests", self.total_tests.to_string())
            .with_text("free_tests", self.free_tests.to_string())
            .with_text("validity_days", self.validity_days.to_string())
            .with_bool("is_active", self.is_active)
            .with_bool("is_featured", self.is_featured)
    }

    fn draft(values: &FormValues) -> Result<TestSeriesDraft, ValidationErrors> {
        Ok(TestSeriesDraft {
            title: values.text("title").to_string(),
            exam_type_id: ExamTypeId::from(values.text("exam_type_id")),
            description: values.opt_text("description"),
            price: values.decimal("price")?,
            discount_price: values.opt_number("discount_price")?,
            total_tests: values.number("total_tests")?,
            free_tests: values.opt_number("free_tests")?.unwrap_or(0),
            validity_days: values.number("validity_days")?,
            is_active: values.bool("is_active"),
            is_featured: values.bool("is_featured"),
        })
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn featured(&self) -> Option<bool> {
        Some(self.is_featured)
    }

    fn toggle_featured(
        client: &APIClient,
        id: &Self::Id,
    ) -> Option<RecordFuture<Self>> {
        let client = client.clone();
        let id = id.clone();
        Some(
            async move { client.toggle_featured::<TestSeries>(&id).await }
                .boxed_local(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::TestSeriesId;
    use rust_decimal::dec;

    fn filled() -> FormValues {
        TestSeries::schema()
            .defaults()
            .with_text("exam_type_id", "e1")
            .with_text("title", "SSC CGL Full Mocks")
            .with_text("price", "499")
            .with_text("total_tests", "30")
            .with_text("free_tests", "2")
    }

    #[test]
    fn valid_series_builds_a_draft() {
        let draft = TestSeries::prepare(&filled()).unwrap();
        assert_eq!(draft.price, dec!(499));
        assert_eq!(draft.discount_price, None);
        assert_eq!(draft.validity_days, 365);
        assert!(!draft.is_featured);
    }

    #[test]
    fn free_tests_cannot_exceed_total() {
        let values = filled().with_text("free_tests", "31");
        let errors = TestSeries::prepare(&values).unwrap_err();
        assert_eq!(
            errors.for_field("free_tests"),
            Some("Free tests cannot exceed total tests")
        );
    }

    #[test]
    fn discount_cannot_exceed_price() {
        let values = filled().with_text("discount_price", "500");
        let errors = TestSeries::prepare(&values).unwrap_err();
        assert_eq!(
            errors.for_field("discount_price"),
            Some("Discount price cannot exceed the price")
        );

        let draft =
            TestSeries::prepare(&filled().with_text("discount_price", "299.5"))
                .unwrap();
        assert_eq!(draft.discount_price, Some(dec!(299.5)));
    }

    #[test]
    fn unchanged_edit_submits_the_same_record() {
        let record = TestSeries {
            id: TestSeriesId::from("t1"),
            title: "Banking Prelims".into(),
            exam_type_id: ExamTypeId::from("e2"),
            description: None,
            price: dec!(999.00),
            discount_price: Some(dec!(749.50)),
            total_tests: 40,
            free_tests: 4,
            validity_days: 180,
            is_active: true,
            is_featured: true,
            created_at: None,
        };
        let draft = TestSeries::prepare(&record.values()).unwrap();
        assert_eq!(
            draft,
            TestSeriesDraft {
                title: record.title.clone(),
                exam_type_id: record.exam_type_id.clone(),
                description: None,
                price: record.price,
                discount_price: record.discount_price,
                total_tests: 40,
                free_tests: 4,
                validity_days: 180,
                is_active: true,
                is_featured: true,
            }
        );
    }
}
