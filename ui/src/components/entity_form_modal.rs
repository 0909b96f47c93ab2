use yew::prelude::*;

use super::{FormField, Modal};
use crate::contexts::use_toast;
use crate::crud::FormMode;
use crate::forms::{FieldValue, FormValues, ValidationErrors};
use crate::hooks::{use_api_client, use_error_reporter};
use crate::resources::AdminResource;

#[derive(Properties, PartialEq)]
pub struct EntityFormModalProps<R: AdminResource> {
    pub mode: FormMode,
    /// The record being edited; `None` when creating.
    #[prop_or_default]
    pub record: Option<R>,
    /// Values filled into a new record, e.g. the node of a filtered
    /// question list.
    #[prop_or_default]
    pub presets: FormValues,
    pub on_close: Callback<()>,
    /// Receives the record as saved by the server.
    pub on_saved: Callback<R>,
}

/// Starting values of the form.
pub fn initial_values<R: AdminResource>(
    record: Option<&R>,
    presets: &FormValues,
) -> FormValues {
    match record {
        Some(record) => record.values(),
        None => {
            let mut values = R::schema().defaults();
            for (name, value) in presets.iter() {
                values.set(name, value.clone());
            }
            values
        }
    }
}

/// Create and edit form of any admin record.
#[function_component]
pub fn EntityFormModal<R: AdminResource>(
    props: &EntityFormModalProps<R>,
) -> Html {
    let schema = use_memo((), |_| R::schema());
    let values = {
        let record = props.record.clone();
        let presets = props.presets.clone();
        use_state(move || initial_values::<R>(record.as_ref(), &presets))
    };
    let errors = use_state(|| None::<ValidationErrors>);
    let is_submitting = use_state(|| false);
    let client = use_api_client();
    let toast = use_toast();
    let report_error = use_error_reporter();

    let editing = match (props.mode, &props.record) {
        (FormMode::Edit, Some(record)) => Some(record.clone()),
        _ => None,
    };

    let on_change = {
        let values = values.clone();
        let errors = errors.clone();
        Callback::from(move |(name, value): (&'static str, FieldValue)| {
            let mut next = (*values).clone();
            next.set(name, value);
            values.set(next);

            if let Some(ValidationErrors(current)) = &*errors {
                let remaining: Vec<_> = current
                    .iter()
                    .filter(|error| error.field != Some(name))
                    .cloned()
                    .collect();
                errors.set(
                    (!remaining.is_empty()).then_some(ValidationErrors(remaining)),
                );
            }
        })
    };

    let on_submit = {
        let values = values.clone();
        let errors = errors.clone();
        let is_submitting = is_submitting.clone();
        let editing = editing.clone();
        let on_saved = props.on_saved.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_submitting {
                return;
            }

            let draft = match R::prepare(&values) {
                Ok(draft) => draft,
                Err(rejected) => {
                    toast.error(rejected.first_message());
                    errors.set(Some(rejected));
                    return;
                }
            };
            errors.set(None);
            is_submitting.set(true);

            let client = client.clone();
            let toast = toast.clone();
            let report_error = report_error.clone();
            let is_submitting = is_submitting.clone();
            let editing = editing.clone();
            let on_saved = on_saved.clone();
            let on_close = on_close.clone();

            yew::platform::spawn_local(async move {
                let (result, verb) = match &editing {
                    Some(record) => (
                        client.update::<R>(record.id(), &draft).await,
                        "updated",
                    ),
                    None => (client.create::<R>(&draft).await, "created"),
                };
                is_submitting.set(false);

                match result {
                    Ok(saved) => {
                        tracing::debug!("{} {verb}: {}", R::SINGULAR, saved.id());
                        toast.success(format!("{} {verb}", R::SINGULAR));
                        on_saved.emit(saved);
                        on_close.emit(());
                    }
                    Err(e) => report_error.emit(e),
                }
            });
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let title = match editing {
        Some(_) => format!("Edit {}", R::SINGULAR),
        None => format!("Create {}", R::SINGULAR),
    };
    let submitting = *is_submitting;

    html! {
        <Modal
            {title}
            on_close={props.on_close.clone()}
            max_width="max-w-2xl"
            dismissable={!submitting}
        >
            <form onsubmit={on_submit} class="space-y-4" novalidate={true}>
                if let Some(rejected) = &*errors {
                    {for rejected.form_errors().map(|error| html! {
                        <div class="p-3 rounded-md bg-red-50 dark:bg-red-900/20 \
                                    border border-red-200 dark:border-red-800">
                            <p class="text-sm text-red-700 dark:text-red-400">
                                {&error.message}
                            </p>
                        </div>
                    })}
                }

                {for schema.fields.iter().map(|spec| {
                    let value = values
                        .get(spec.name)
                        .cloned()
                        .unwrap_or_else(|| spec.default.clone());
                    let error = errors
                        .as_ref()
                        .and_then(|rejected| rejected.for_field(spec.name))
                        .map(|message| AttrValue::from(message.to_string()));
                    html! {
                        <FormField
                            key={spec.name}
                            spec={spec.clone()}
                            {value}
                            {error}
                            disabled={submitting}
                            on_change={on_change.clone()}
                        />
                    }
                })}

                <div class="flex justify-end gap-3 pt-2">
                    <button
                        type="button"
                        onclick={on_cancel}
                        disabled={submitting}
                        class="px-4 py-2 text-sm font-medium text-neutral-700 \
                               dark:text-neutral-300 bg-white dark:bg-neutral-700 \
                               border border-neutral-300 dark:border-neutral-600 \
                               rounded-md hover:bg-neutral-50 \
                               dark:hover:bg-neutral-600 disabled:opacity-50"
                    >
                        {"Cancel"}
                    </button>
                    <button
                        type="submit"
                        disabled={submitting}
                        class="px-4 py-2 text-sm font-medium text-white \
                               bg-neutral-900 hover:bg-neutral-800 \
                               dark:bg-neutral-100 dark:text-neutral-900 \
                               dark:hover:bg-neutral-200 rounded-md \
                               disabled:opacity-50 disabled:cursor-not-allowed"
                    >
                        {if submitting { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::ExamTypeId;
    use payloads::responses::{ExamType, Question};

    #[test]
    fn presets_only_fill_new_records() {
        let presets = FormValues::new().with_text("hierarchy_node_id", "n7");
        let values = initial_values::<Question>(None, &presets);
        assert_eq!(values.text("hierarchy_node_id"), "n7");

        let exam_type = ExamType {
            id: ExamTypeId::from("e1"),
            name: "Police Sub Inspector".into(),
            code: "PSI".into(),
            description: None,
            is_active: false,
            created_at: None,
        };
        let presets = FormValues::new().with_text("code", "XYZ");
        let values = initial_values(Some(&exam_type), &presets);
        assert_eq!(values.text("code"), "PSI");
        assert!(!values.bool("is_active"));
    }

    #[test]
    fn new_records_start_from_schema_defaults() {
        let values = initial_values::<ExamType>(None, &FormValues::new());
        assert_eq!(values.text("name"), "");
        assert!(values.bool("is_active"));
    }
}
