//! How each admin entity is listed, filtered and edited.
//!
//! [`AdminResource`] extends the wire-level [`ApiResource`] with everything
//! the generic list page and form modal need: table columns, the form
//! schema, and the conversions between a record, form values and the
//! request body.

use futures::future::LocalBoxFuture;
use payloads::{APIClient, ApiResource, ClientError};
use yew::prelude::*;

use crate::forms::{FormSchema, FormValues, LookupKind, ValidationErrors};

pub mod exam_types;
pub mod free_tests;
pub mod hierarchy;
pub mod pdfs;
pub mod pyqs;
pub mod questions;
pub mod students;
pub mod subjects;
pub mod subscriptions;
pub mod test_series;

/// One table column: a header and how to render a record's cell.
pub struct Column<R> {
    pub header: &'static str,
    pub cell: fn(&R) -> Html,
}

impl<R> Column<R> {
    pub const fn new(header: &'static str, cell: fn(&R) -> Html) -> Self {
        Self { header, cell }
    }
}

/// A dropdown above the table that narrows the list to one parent record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFilter {
    /// Query-string key, e.g. `examTypeId`.
    pub key: &'static str,
    pub label: &'static str,
    pub lookup: LookupKind,
}

pub type RecordFuture<R> = LocalBoxFuture<'static, Result<R, ClientError>>;

pub trait AdminResource: ApiResource {
    /// Plural heading of the list page.
    const TITLE: &'static str;
    const SINGULAR: &'static str;
    const ALLOW_CREATE: bool = true;
    const EXPORTABLE: bool = false;
    const SEARCH_PLACEHOLDER: &'static str = "Search...";
    const FILTER: Option<ListFilter> = None;
    /// `(sortBy, label)` choices offered above the table.
    const SORT_OPTIONS: &'static [(&'static str, &'static str)] =
        &[("createdAt", "Date created")];

    fn columns() -> Vec<Column<Self>>;
    fn schema() -> FormSchema;
    /// Form values for editing this record.
    fn values(&self) -> FormValues;
    /// Request body from normalized, validated values.
    fn draft(values: &FormValues) -> Result<Self::Draft, ValidationErrors>;
    /// Human name of the record, used in confirmations and toasts.
    fn label(&self) -> String;

    /// Extra consequence spelled out in the delete confirmation.
    fn delete_warning(&self) -> Option<String> {
        None
    }

    /// Value the admin must type to confirm deletion, if any.
    fn confirmation_value(&self) -> Option<String> {
        None
    }

    /// Current featured flag of records that have one.
    fn featured(&self) -> Option<bool> {
        None
    }

    fn toggle_featured(
        _client: &APIClient,
        _id: &Self::Id,
    ) -> Option<RecordFuture<Self>> {
        None
    }

    /// Normalize, validate and convert form values into a request body.
    fn prepare(values: &FormValues) -> Result<Self::Draft, ValidationErrors> {
        Self::schema().prepare(values, Self::draft)
    }
}

pub fn status_badge(is_active: bool) -> Html {
    let (label, class) = if is_active {
        ("Active", "bg-green-100 text-green-800 dark:bg-green-900 dark:text-green-300")
    } else {
        ("Inactive", "bg-neutral-100 text-neutral-700 dark:bg-neutral-700 dark:text-neutral-300")
    };
    html! {
        <span class={format!(
            "inline-flex px-2 py-0.5 rounded-full text-xs font-medium {class}"
        )}>
            {label}
        </span>
    }
}

pub fn featured_badge(is_featured: bool) -> Html {
    if !is_featured {
        return html! {};
    }
    html! {
        <span class="inline-flex px-2 py-0.5 rounded-full text-xs font-medium \
                     bg-amber-100 text-amber-800 dark:bg-amber-900 \
                     dark:text-amber-300">
            {"Featured"}
        </span>
    }
}

pub fn text_cell(text: impl Into<String>) -> Html {
    html! {
        <span class="text-neutral-900 dark:text-neutral-100">{text.into()}</span>
    }
}

pub fn muted_cell(text: impl Into<String>) -> Html {
    html! {
        <span class="text-neutral-600 dark:text-neutral-400">{text.into()}</span>
    }
}

pub fn price_cell(price: rust_decimal::Decimal) -> Html {
    text_cell(format!("₹{}", crate::forms::decimal_text(price)))
}
