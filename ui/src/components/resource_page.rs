//! The list page shared by every admin record: search, filter and sort
//! controls, the table, and the create/edit/delete/toggle flows.

use payloads::requests::{ListQuery, SortOrder};
use payloads::{APIClient, ClientError};
use std::rc::Rc;
use yew::prelude::*;

use super::{
    ConfirmationModal, EntityFormModal, LookupSelect, PaginationControls,
    SearchInput, Select, StatusToggle,
};
use crate::contexts::use_toast;
use crate::crud::{ConfirmFlow, ListStatus, ModalState, PendingAction};
use crate::forms::FormValues;
use crate::hooks::{
    use_api_client, use_error_reporter, use_paginated_fetch, use_title,
};
use crate::resources::AdminResource;
use crate::utils::download;

#[derive(Properties, PartialEq)]
pub struct ResourcePageProps {
    /// Query filters every request carries, as `(key, value)`.
    #[prop_or_default]
    pub fixed_filters: Vec<(String, String)>,
    /// Values filled into the create form.
    #[prop_or_default]
    pub presets: FormValues,
    /// Replaces the default heading.
    #[prop_or_default]
    pub heading: Option<AttrValue>,
    /// Shown between the heading and the controls.
    #[prop_or_default]
    pub children: Html,
}

/// First page of a list, newest first unless the record says otherwise.
pub fn initial_query<R: AdminResource>(
    fixed_filters: &[(String, String)],
) -> ListQuery {
    let mut query = ListQuery {
        sort_by: R::SORT_OPTIONS.first().map(|(key, _)| key.to_string()),
        sort_order: Some(SortOrder::Desc),
        ..ListQuery::default()
    };
    for (key, value) in fixed_filters {
        query.filters.insert(key.clone(), value.clone());
    }
    query
}

/// Wording of the confirmation dialog for an action.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmCopy {
    pub title: String,
    pub message: String,
    pub confirm: &'static str,
    pub confirmation_value: Option<String>,
    pub destructive: bool,
}

pub fn confirm_copy<R: AdminResource>(action: &PendingAction<R>) -> ConfirmCopy {
    let record = action.record();
    let label = record.label();
    match action {
        PendingAction::Delete(_) => ConfirmCopy {
            title: format!("Delete {}", R::SINGULAR),
            message: match record.delete_warning() {
                Some(warning) => format!("\"{label}\" will be deleted. {warning}"),
                None => format!("\"{label}\" will be deleted."),
            },
            confirm: "Delete",
            confirmation_value: record.confirmation_value(),
            destructive: true,
        },
        PendingAction::ToggleStatus(_) if record.is_active() => ConfirmCopy {
            title: format!("Deactivate {}", R::SINGULAR),
            message: format!("\"{label}\" will be hidden from students."),
            confirm: "Deactivate",
            confirmation_value: None,
            destructive: false,
        },
        PendingAction::ToggleStatus(_) => ConfirmCopy {
            title: format!("Activate {}", R::SINGULAR),
            message: format!("\"{label}\" will be visible to students."),
            confirm: "Activate",
            confirmation_value: None,
            destructive: false,
        },
        PendingAction::ToggleFeatured(_) => {
            let featured = record.featured().unwrap_or_default();
            ConfirmCopy {
                title: if featured {
                    format!("Unfeature {}", R::SINGULAR)
                } else {
                    format!("Feature {}", R::SINGULAR)
                },
                message: if featured {
                    format!("\"{label}\" will no longer be highlighted.")
                } else {
                    format!("\"{label}\" will be highlighted to students.")
                },
                confirm: if featured { "Unfeature" } else { "Feature" },
                confirmation_value: None,
                destructive: false,
            }
        }
    }
}

/// Send a confirmed action. Returns the success message.
async fn perform<R: AdminResource>(
    client: &APIClient,
    action: &PendingAction<R>,
) -> Result<String, ClientError> {
    match action {
        PendingAction::Delete(record) => {
            let message = client.remove::<R>(record.id()).await?;
            Ok(if message.trim().is_empty() {
                format!("{} deleted", R::SINGULAR)
            } else {
                message
            })
        }
        PendingAction::ToggleStatus(record) => {
            let updated = client.toggle_status::<R>(record.id()).await?;
            Ok(if updated.is_active() {
                format!("{} activated", R::SINGULAR)
            } else {
                format!("{} deactivated", R::SINGULAR)
            })
        }
        PendingAction::ToggleFeatured(record) => {
            let Some(request) = R::toggle_featured(client, record.id()) else {
                return Err(ClientError::Decode(format!(
                    "{} cannot be featured",
                    R::SINGULAR
                )));
            };
            let updated = request.await?;
            Ok(if updated.featured().unwrap_or_default() {
                format!("{} featured", R::SINGULAR)
            } else {
                format!("{} unfeatured", R::SINGULAR)
            })
        }
    }
}

const BUTTON_CLASSES: &str = "px-3 py-2 text-sm font-medium rounded-md \
    border border-neutral-300 dark:border-neutral-600 text-neutral-700 \
    dark:text-neutral-300 bg-white dark:bg-neutral-700 \
    hover:bg-neutral-50 dark:hover:bg-neutral-600 \
    disabled:opacity-50 disabled:cursor-not-allowed transition-colors";
const PRIMARY_BUTTON_CLASSES: &str = "px-4 py-2 text-sm font-medium \
    rounded-md text-white bg-neutral-900 hover:bg-neutral-800 \
    dark:bg-neutral-100 dark:text-neutral-900 dark:hover:bg-neutral-200 \
    transition-colors";
const ROW_ACTION_CLASSES: &str = "text-sm font-medium text-neutral-700 \
    dark:text-neutral-300 hover:text-neutral-900 dark:hover:text-white \
    underline";

#[function_component]
pub fn ResourcePage<R: AdminResource>(props: &ResourcePageProps) -> Html {
    use_title(R::TITLE);
    let client = use_api_client();
    let toast = use_toast();
    let report_error = use_error_reporter();
    let modal = use_state(ModalState::<R>::default);
    let confirm = use_state(ConfirmFlow::<R>::default);
    let is_exporting = use_state(|| false);

    let list = {
        let client = client.clone();
        use_paginated_fetch(
            initial_query::<R>(&props.fixed_filters),
            move |query: ListQuery| {
                let client = client.clone();
                async move { client.list::<R>(&query).await }
            },
        )
    };

    let on_search = {
        let update_params = list.update_params.clone();
        Callback::from(move |term: String| {
            update_params.emit(Rc::new(move |query: &mut ListQuery| {
                query.search = (!term.is_empty()).then(|| term.clone());
            }));
        })
    };

    let filter_control = R::FILTER.map(|filter| {
        let selected = list
            .params
            .filters
            .get(filter.key)
            .cloned()
            .unwrap_or_default();
        let update_params = list.update_params.clone();
        let on_change = Callback::from(move |value: String| {
            update_params.emit(Rc::new(move |query: &mut ListQuery| {
                if value.is_empty() {
                    query.filters.remove(filter.key);
                } else {
                    query.filters.insert(filter.key.to_string(), value.clone());
                }
            }));
        });
        html! {
            <div class="w-full sm:w-56">
                <LookupSelect
                    kind={filter.lookup}
                    {selected}
                    placeholder={format!("All {}", filter.label.to_lowercase())}
                    {on_change}
                />
            </div>
        }
    });

    let on_sort_by = {
        let update_params = list.update_params.clone();
        Callback::from(move |sort_by: String| {
            update_params.emit(Rc::new(move |query: &mut ListQuery| {
                query.sort_by = Some(sort_by.clone());
            }));
        })
    };

    let on_sort_order = {
        let update_params = list.update_params.clone();
        Callback::from(move |_: MouseEvent| {
            update_params.emit(Rc::new(|query: &mut ListQuery| {
                query.sort_order = Some(match query.sort_order {
                    Some(SortOrder::Asc) => SortOrder::Desc,
                    Some(SortOrder::Desc) | None => SortOrder::Asc,
                });
            }));
        })
    };

    let on_export = {
        let client = client.clone();
        let toast = toast.clone();
        let report_error = report_error.clone();
        let is_exporting = is_exporting.clone();
        let query = list.params.clone();
        Callback::from(move |_: MouseEvent| {
            if *is_exporting {
                return;
            }
            is_exporting.set(true);
            let client = client.clone();
            let toast = toast.clone();
            let report_error = report_error.clone();
            let is_exporting = is_exporting.clone();
            let query = query.clone();
            yew::platform::spawn_local(async move {
                match client.export::<R>(&query).await {
                    Ok(bytes) => {
                        let file_name = download::export_file_name(
                            R::PATH,
                            jiff::Zoned::now().date(),
                        );
                        match download::save_bytes(&bytes, &file_name, "text/csv") {
                            Ok(()) => toast.success(format!("Exported {file_name}")),
                            Err(e) => {
                                tracing::error!("Saving export failed: {e:#}");
                                toast.error("Could not save the export");
                            }
                        }
                    }
                    Err(e) => report_error.emit(e),
                }
                is_exporting.set(false);
            });
        })
    };

    let open_create = {
        let modal = modal.clone();
        Callback::from(move |_: MouseEvent| modal.set(ModalState::create()))
    };

    let close_modal = {
        let modal = modal.clone();
        Callback::from(move |_| modal.set(ModalState::Closed))
    };

    let on_saved = {
        let refresh = list.refresh.clone();
        Callback::from(move |_: R| refresh.emit(()))
    };

    let ask = {
        let confirm = confirm.clone();
        Callback::from(move |action: PendingAction<R>| {
            confirm.set(ConfirmFlow::ask(action));
        })
    };

    let on_confirm = {
        let confirm = confirm.clone();
        let client = client.clone();
        let toast = toast.clone();
        let report_error = report_error.clone();
        let refresh = list.refresh.clone();
        Callback::from(move |_| {
            let Some((sending, action)) = confirm.submit() else {
                return;
            };
            confirm.set(sending.clone());

            let confirm = confirm.clone();
            let client = client.clone();
            let toast = toast.clone();
            let report_error = report_error.clone();
            let refresh = refresh.clone();
            yew::platform::spawn_local(async move {
                match perform::<R>(&client, &action).await {
                    Ok(message) => {
                        confirm.set(ConfirmFlow::finished());
                        toast.success(message);
                        refresh.emit(());
                    }
                    Err(e) => {
                        confirm.set(sending.failed(e.user_message()));
                        report_error.emit(e);
                    }
                }
            });
        })
    };

    let on_cancel_confirm = {
        let confirm = confirm.clone();
        Callback::from(move |_| confirm.set(confirm.cancel()))
    };

    let columns = R::columns();
    let status = ListStatus::of(
        list.is_loading,
        !list.items.is_empty() || list.pagination.is_some(),
        list.error.is_some(),
    );

    let body = match status {
        ListStatus::Errored if list.items.is_empty() => html! {
            <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border \
                        border-red-200 dark:border-red-800">
                <p class="text-sm text-red-700 dark:text-red-400">
                    {format!(
                        "Error loading {}: {}",
                        R::TITLE.to_lowercase(),
                        list.error.clone().unwrap_or_default()
                    )}
                </p>
            </div>
        },
        ListStatus::Loading | ListStatus::Idle if list.items.is_empty() => html! {
            <div class="text-center py-12">
                <p class="text-neutral-600 dark:text-neutral-400">
                    {format!("Loading {}...", R::TITLE.to_lowercase())}
                </p>
            </div>
        },
        _ if list.items.is_empty() => html! {
            <div class="text-center py-12">
                <p class="text-neutral-600 dark:text-neutral-400">
                    {format!("No {} found", R::TITLE.to_lowercase())}
                </p>
            </div>
        },
        _ => html! {
            <div class="overflow-x-auto rounded-lg border border-neutral-200 \
                        dark:border-neutral-700">
                <table class="min-w-full divide-y divide-neutral-200 \
                              dark:divide-neutral-700">
                    <thead class="bg-neutral-50 dark:bg-neutral-800">
                        <tr>
                            {for columns.iter().map(|column| html! {
                                <th class="px-4 py-3 text-left text-xs \
                                           font-semibold uppercase \
                                           tracking-wider text-neutral-500 \
                                           dark:text-neutral-400">
                                    {column.header}
                                </th>
                            })}
                            <th class="px-4 py-3 text-right text-xs \
                                       font-semibold uppercase tracking-wider \
                                       text-neutral-500 dark:text-neutral-400">
                                {"Actions"}
                            </th>
                        </tr>
                    </thead>
                    <tbody class="bg-white dark:bg-neutral-900 divide-y \
                                  divide-neutral-200 dark:divide-neutral-700">
                        {for list.items.iter().map(|record| {
                            let edit = {
                                let modal = modal.clone();
                                let record = record.clone();
                                Callback::from(move |_: MouseEvent| {
                                    modal.set(ModalState::edit(record.clone()));
                                })
                            };
                            let delete = {
                                let ask = ask.clone();
                                let record = record.clone();
                                Callback::from(move |_: MouseEvent| {
                                    ask.emit(PendingAction::Delete(record.clone()));
                                })
                            };
                            let toggle_status = {
                                let ask = ask.clone();
                                let record = record.clone();
                                Callback::from(move |_| {
                                    ask.emit(PendingAction::ToggleStatus(record.clone()));
                                })
                            };
                            let toggle_featured = record.featured().map(|featured| {
                                let ask = ask.clone();
                                let record = record.clone();
                                let onclick = Callback::from(move |_: MouseEvent| {
                                    ask.emit(PendingAction::ToggleFeatured(record.clone()));
                                });
                                html! {
                                    <button
                                        type="button"
                                        {onclick}
                                        class={ROW_ACTION_CLASSES}
                                    >
                                        {if featured { "Unfeature" } else { "Feature" }}
                                    </button>
                                }
                            });

                            html! {
                                <tr key={record.id().to_string()}>
                                    {for columns.iter().map(|column| html! {
                                        <td class="px-4 py-3 text-sm align-top">
                                            {(column.cell)(record)}
                                        </td>
                                    })}
                                    <td class="px-4 py-3 text-sm align-top">
                                        <div class="flex items-center justify-end gap-3">
                                            <StatusToggle
                                                is_active={record.is_active()}
                                                on_toggle={toggle_status}
                                            />
                                            {toggle_featured}
                                            <button
                                                type="button"
                                                onclick={edit}
                                                class={ROW_ACTION_CLASSES}
                                            >
                                                {"Edit"}
                                            </button>
                                            <button
                                                type="button"
                                                onclick={delete}
                                                class="text-sm font-medium \
                                                       text-red-600 \
                                                       dark:text-red-400 \
                                                       hover:text-red-800 \
                                                       underline"
                                            >
                                                {"Delete"}
                                            </button>
                                        </div>
                                    </td>
                                </tr>
                            }
                        })}
                    </tbody>
                </table>
            </div>
        },
    };

    let confirm_modal = confirm.pending.as_ref().map(|action| {
        let copy = confirm_copy(action);
        html! {
            <ConfirmationModal
                title={copy.title}
                message={copy.message}
                confirm_text={copy.confirm}
                confirmation_value={copy.confirmation_value.map(AttrValue::from)}
                destructive={copy.destructive}
                on_confirm={on_confirm}
                on_close={on_cancel_confirm}
                is_loading={confirm.in_flight}
                error_message={confirm.error.clone().map(AttrValue::from)}
            />
        }
    });

    let sort_options: Vec<(String, String)> = R::SORT_OPTIONS
        .iter()
        .map(|(key, label)| (key.to_string(), label.to_string()))
        .collect();
    let ascending = list.params.sort_order == Some(SortOrder::Asc);

    html! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100">
                    {props.heading.clone().unwrap_or_else(|| R::TITLE.into())}
                </h1>
                <div class="flex items-center gap-3">
                    if R::EXPORTABLE {
                        <button
                            type="button"
                            onclick={on_export}
                            disabled={*is_exporting}
                            class={BUTTON_CLASSES}
                        >
                            {if *is_exporting { "Exporting..." } else { "Export CSV" }}
                        </button>
                    }
                    if R::ALLOW_CREATE {
                        <button
                            type="button"
                            onclick={open_create}
                            class={PRIMARY_BUTTON_CLASSES}
                        >
                            {format!("Add {}", R::SINGULAR)}
                        </button>
                    }
                </div>
            </div>

            {props.children.clone()}

            <div class="flex flex-wrap items-center gap-3">
                <SearchInput
                    on_search={on_search}
                    placeholder={R::SEARCH_PLACEHOLDER}
                />
                {filter_control}
                if sort_options.len() > 1 {
                    <div class="w-full sm:w-44">
                        <Select
                            options={sort_options}
                            selected={list.params.sort_by.clone().unwrap_or_default()}
                            on_change={on_sort_by}
                        />
                    </div>
                }
                <button
                    type="button"
                    onclick={on_sort_order}
                    class={BUTTON_CLASSES}
                    title="Toggle sort order"
                >
                    {if ascending { "↑ Ascending" } else { "↓ Descending" }}
                </button>
            </div>

            {body}

            <PaginationControls
                pagination={list.pagination}
                shown={list.items.len()}
                on_load_more={list.load_more.clone()}
                is_loading={list.is_loading}
            />

            if let ModalState::Open { mode, record } = &*modal {
                <EntityFormModal<R>
                    mode={*mode}
                    record={record.clone()}
                    presets={props.presets.clone()}
                    on_close={close_modal}
                    {on_saved}
                />
            }

            {confirm_modal}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::ExamTypeId;
    use payloads::responses::{ExamType, Question};

    fn exam_type(is_active: bool) -> ExamType {
        ExamType {
            id: ExamTypeId::from("e1"),
            name: "Police Sub Inspector".into(),
            code: "PSI".into(),
            description: None,
            is_active,
            created_at: None,
        }
    }

    #[test]
    fn first_sort_option_is_the_default() {
        let query = initial_query::<ExamType>(&[]);
        assert_eq!(query.sort_by.as_deref(), Some("createdAt"));
        assert_eq!(query.sort_order, Some(SortOrder::Desc));
        assert_eq!(query.page, 1);
    }

    #[test]
    fn fixed_filters_are_always_sent() {
        let query = initial_query::<Question>(&[(
            "hierarchyNodeId".to_string(),
            "n7".to_string(),
        )]);
        assert_eq!(
            query.filters.get("hierarchyNodeId").map(String::as_str),
            Some("n7")
        );
    }

    #[test]
    fn deleting_asks_for_the_code() {
        let copy = confirm_copy(&PendingAction::Delete(exam_type(true)));
        assert_eq!(copy.title, "Delete Exam Type");
        assert_eq!(copy.confirmation_value.as_deref(), Some("PSI"));
        assert!(copy.destructive);
        assert!(copy.message.starts_with("\"Police Sub Inspector (PSI)\" will be deleted."));
    }

    #[test]
    fn status_wording_follows_the_current_state() {
        let copy = confirm_copy(&PendingAction::ToggleStatus(exam_type(true)));
        assert_eq!(copy.confirm, "Deactivate");
        assert!(!copy.destructive);

        let copy = confirm_copy(&PendingAction::ToggleStatus(exam_type(false)));
        assert_eq!(copy.confirm, "Activate");
        assert!(copy.confirmation_value.is_none());
    }
}
