use payloads::requests::ListQuery;
use payloads::responses::{ExamType, Subject};
use std::rc::Rc;
use yew::prelude::*;

use super::{FetchOptions, use_api_client, use_fetch};
use crate::forms::LookupKind;

#[derive(Debug, Clone, PartialEq)]
pub struct LookupOption {
    pub value: String,
    pub label: String,
}

pub type LookupOptions = Rc<Vec<LookupOption>>;

/// Dropdown choices for a lookup field. Empty until loaded; a failed load
/// is logged by the fetch hook and leaves the dropdown empty.
#[hook]
pub fn use_lookup(kind: LookupKind) -> LookupOptions {
    let client = use_api_client();

    let fetch = use_fetch(kind, FetchOptions::default(), move || {
        let client = client.clone();
        async move {
            let query = ListQuery::everything();
            let options: Vec<LookupOption> = match kind {
                LookupKind::ExamType => client
                    .list_all::<ExamType>(&query)
                    .await?
                    .into_iter()
                    .map(|exam_type| LookupOption {
                        value: exam_type.id.to_string(),
                        label: format!("{} ({})", exam_type.name, exam_type.code),
                    })
                    .collect(),
                LookupKind::Subject => client
                    .list_all::<Subject>(&query)
                    .await?
                    .into_iter()
                    .map(|subject| LookupOption {
                        value: subject.id.to_string(),
                        label: match subject.exam_type_name {
                            Some(exam) => format!("{} · {exam}", subject.name),
                            None => subject.name,
                        },
                    })
                    .collect(),
            };
            Ok::<_, payloads::ClientError>(Rc::new(options))
        }
    });

    fetch.data.as_ref().cloned().unwrap_or_default()
}
