use payloads::requests::PdfDraft;
use payloads::responses::Pdf;
use payloads::{NodeId, SubjectId};
use yew::prelude::*;

use super::{
    AdminResource, Column, ListFilter, muted_cell, status_badge, text_cell,
};
use crate::forms::{
    FieldError, FieldSpec, FormSchema, FormValues, LookupKind,
    ValidationErrors,
};

fn file_link(pdf: &Pdf) -> Html {
    html! {
        <a
            href={pdf.file_url.clone()}
            target="_blank"
            rel="noopener noreferrer"
            class="text-sm underline text-neutral-900 dark:text-neutral-100"
        >
            {"Open"}
        </a>
    }
}

fn url_is_http(values: &FormValues) -> Option<FieldError> {
    let url = values.text("file_url");
    let ok = url.is_empty()
        || url.starts_with("https://")
        || url.starts_with("http://");
    (!ok).then(|| {
        FieldError::field("file_url", "File URL must start with http(s)://")
    })
}

impl AdminResource for Pdf {
    const TITLE: &'static str = "PDFs";
    const SINGULAR: &'static str = "PDF";
    const SEARCH_PLACEHOLDER: &'static str = "Search PDFs...";
    const FILTER: Option<ListFilter> = Some(ListFilter {
        key: "subjectId",
        label: "Subject",
        lookup: LookupKind::Subject,
    });
    const SORT_OPTIONS: &'static [(&'static str, &'static str)] =
        &[("createdAt", "Date created"), ("title", "Title")];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Title", |p| text_cell(&p.title)),
            Column::new("Access", |p| {
                muted_cell(if p.is_free { "Free" } else { "Paid" })
            }),
            Column::new("File", file_link),
            Column::new("Status", |p| status_badge(p.is_active)),
        ]
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::text("title", "Title")
                .required("Title is required")
                .max_len(200, "Title must be at most 200 characters"),
            FieldSpec::lookup("subject_id", "Subject", LookupKind::Subject)
                .required("Subject is required"),
            FieldSpec::text("hierarchy_node_id", "Hierarchy Node")
                .help("Id of the chapter or topic this PDF belongs to"),
            FieldSpec::text("file_url", "File URL")
                .required("File URL is required")
                .placeholder("https://"),
            FieldSpec::checkbox("is_free", "Free to access"),
            FieldSpec::checkbox("is_active", "Active").default_bool(true),
        ])
        .check(url_is_http)
    }

    fn values(&self) -> FormValues {
        FormValues::new()
            .with_text("title", &self.title)
            .with_text(
                "subject_id",
                self.subject_id
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            )
            .with_text(
                "hierarchy_node_id",
                self.hierarchy_node_id
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            )
            .with_text("file_url", &self.file_url)
            .with_bool("is_free", self.is_free)
            .with_bool("is_active", self.is_active)
    }

    fn draft(values: &FormValues) -> Result<PdfDraft, ValidationErrors> {
        Ok(PdfDraft {
            title: values.text("title").to_string(),
            subject_id: values.opt_text("subject_id").map(SubjectId),
            hierarchy_node_id: values.opt_text("hierarchy_node_id").map(NodeId),
            file_url: values.text("file_url").to_string(),
            is_free: values.bool("is_free"),
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

    #[test]
    fn file_url_must_be_a_web_link() {
        let values = Pdf::schema()
            .defaults()
            .with_text("title", "Algebra formula sheet")
            .with_text("subject_id", "s1")
            .with_text("file_url", "ftp://files/algebra.pdf");
        let errors = Pdf::prepare(&values).unwrap_err();
        assert_eq!(
            errors.for_field("file_url"),
            Some("File URL must start with http(s)://")
        );

        let draft = Pdf::prepare(
            &values.with_text("file_url", "https://cdn.mocktale.in/a.pdf"),
        )
        .unwrap();
        assert!(!draft.is_free);
        assert_eq!(draft.subject_id, Some(SubjectId::from("s1")));
    }
}
