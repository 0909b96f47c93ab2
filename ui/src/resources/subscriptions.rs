use futures::FutureExt;
use payloads::requests::SubscriptionDraft;
use payloads::responses::Subscription;
use payloads::{APIClient, ExamTypeId};
use yew::prelude::*;

use super::{
    AdminResource, Column, ListFilter, RecordFuture, featured_badge,
    muted_cell, price_cell, status_badge, text_cell,
};
use crate::forms::{
    FieldSpec, FormSchema, FormValues, LookupKind, ValidationErrors,
    decimal_text,
};

impl AdminResource for Subscription {
    const TITLE: &'static str = "Subscriptions";
    const SINGULAR: &'static str = "Subscription Plan";
    const SEARCH_PLACEHOLDER: &'static str = "Search plans...";
    const FILTER: Option<ListFilter> = Some(ListFilter {
        key: "examTypeId",
        label: "Exam type",
        lookup: LookupKind::ExamType,
    });
    const SORT_OPTIONS: &'static [(&'static str, &'static str)] = &[
        ("createdAt", "Date created"),
        ("price", "Price"),
        ("name", "Name"),
    ];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Plan", |s| text_cell(&s.name)),
            Column::new("Price", |s| price_cell(s.price)),
            Column::new("Duration", |s| {
                muted_cell(format!("{} days", s.duration_days))
            }),
            Column::new("Features", |s| {
                muted_cell(format!("{} included", s.features.len()))
            }),
            Column::new("Status", |s| {
                html! {
                    <div class="flex gap-1">
                        {status_badge(s.is_active)}
                        {featured_badge(s.is_featured)}
                    </div>
                }
            }),
        ]
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::lookup("exam_type_id", "Exam Type", LookupKind::ExamType)
                .required("Exam type is required"),
            FieldSpec::text("name", "Plan Name")
                .required("Plan name is required")
                .max_len(100, "Plan name must be at most 100 characters"),
            FieldSpec::number("price", "Price (₹)")
                .required("Price is required")
                .min(0, "Price cannot be negative"),
            FieldSpec::number("duration_days", "Duration (days)")
                .required("Duration is required")
                .integer("Duration must be a whole number of days")
                .min(1, "Duration must be at least 1 day")
                .default_text("30"),
            FieldSpec::lines("features", "Features")
                .help("One feature per line"),
            FieldSpec::checkbox("is_active", "Active").default_bool(true),
            FieldSpec::checkbox("is_featured", "Featured"),
        ])
    }

    fn values(&self) -> FormValues {
        FormValues::new()
            .with_text("exam_type_id", self.exam_type_id.to_string())
            .with_text("name", &self.name)
            .with_text("price", decimal_text(self.price))
            .with_text("duration_days", self.duration_days.to_string())
            .with_list("features", self.features.clone())
            .with_bool("is_active", self.is_active)
            .with_bool("is_featured", self.is_featured)
    }

    fn draft(
        values: &FormValues,
    ) -> Result<SubscriptionDraft, ValidationErrors> {
        Ok(SubscriptionDraft {
            name: values.text("name").to_string(),
            exam_type_id: ExamTypeId::from(values.text("exam_type_id")),
            price: values.decimal("price")?,
            duration_days: values.number("duration_days")?,
            features: values.list("features").to_vec(),
            is_active: values.bool("is_active"),
            is_featured: values.bool("is_featured"),
        })
    }

    fn label(&self) -> String {
        self.name.clone()
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
            async move { client.toggle_featured::<Subscription>(&id).await }
                .boxed_local(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::SubscriptionId;
    use rust_decimal::dec;

    #[test]
    fn blank_feature_lines_are_dropped() {
        let values = Subscription::schema()
            .defaults()
            .with_text("exam_type_id", "e1")
            .with_text("name", "Gold")
            .with_text("price", "1499")
            .with_list(
                "features",
                vec!["All mocks".into(), "".into(), " PDF notes ".into()],
            );
        let draft = Subscription::prepare(&values).unwrap();
        assert_eq!(draft.features, vec!["All mocks", "PDF notes"]);
        assert_eq!(draft.duration_days, 30);
        assert_eq!(draft.price, dec!(1499));
    }

    #[test]
    fn unchanged_edit_submits_the_same_record() {
        let record = Subscription {
            id: SubscriptionId::from("p1"),
            name: "Silver".into(),
            exam_type_id: ExamTypeId::from("e1"),
            price: dec!(799.99),
            duration_days: 90,
            features: vec!["Mocks".into(), "Analytics".into()],
            is_active: true,
            is_featured: false,
        };
        let draft = Subscription::prepare(&record.values()).unwrap();
        assert_eq!(draft.price, record.price);
        assert_eq!(draft.features, record.features);
        assert_eq!(draft.duration_days, 90);
    }
}
