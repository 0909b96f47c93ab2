use payloads::responses::{HierarchyNode, Subject};
use payloads::{APIClient, ClientError, NodeId, SubjectId};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::{
    ConfirmationModal, HierarchyNodeModal, HierarchyTree, NodeTarget,
};
use crate::contexts::use_toast;
use crate::crud::{ConfirmFlow, PendingAction};
use crate::hooks::{
    FetchOptions, use_api_client, use_error_reporter, use_fetch,
    use_push_route, use_title,
};
use crate::resources::hierarchy::delete_warning;
use crate::tree::Forest;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub subject_id: SubjectId,
}

async fn perform(
    client: &APIClient,
    action: &PendingAction<HierarchyNode>,
) -> Result<String, ClientError> {
    match action {
        PendingAction::Delete(node) => {
            client.delete_node(&node.id).await?;
            Ok(format!("\"{}\" deleted", node.level_name))
        }
        PendingAction::ToggleStatus(node) | PendingAction::ToggleFeatured(node) => {
            let updated = client.toggle_node_status(&node.id).await?;
            Ok(if updated.is_active {
                format!("\"{}\" activated", updated.level_name)
            } else {
                format!("\"{}\" deactivated", updated.level_name)
            })
        }
    }
}

/// Editor of one subject's hierarchy.
#[function_component]
pub fn HierarchyPage(props: &Props) -> Html {
    use_title("Hierarchy");
    let client = use_api_client();
    let toast = use_toast();
    let report_error = use_error_reporter();
    let push_route = use_push_route();
    let node_modal = use_state(|| None::<NodeTarget>);
    let confirm = use_state(ConfirmFlow::<HierarchyNode>::default);

    let subject = {
        let client = client.clone();
        let subject_id = props.subject_id.clone();
        use_fetch(subject_id.clone(), FetchOptions::default(), move || {
            let client = client.clone();
            let subject_id = subject_id.clone();
            async move { client.fetch::<Subject>(&subject_id).await }
        })
    };

    let hierarchy = {
        let client = client.clone();
        let subject_id = props.subject_id.clone();
        use_fetch(subject_id.clone(), FetchOptions::default(), move || {
            let client = client.clone();
            let subject_id = subject_id.clone();
            async move { client.subject_hierarchy(&subject_id).await }
        })
    };

    let forest = use_memo(hierarchy.data.clone(), |data| {
        data.as_ref()
            .map(|nodes| Forest::from_nodes(nodes))
            .unwrap_or_default()
    });

    let on_create_child = {
        let node_modal = node_modal.clone();
        Callback::from(move |parent: Option<NodeId>| {
            node_modal.set(Some(NodeTarget::NewChild(parent)));
        })
    };
    let on_edit = {
        let node_modal = node_modal.clone();
        Callback::from(move |node: HierarchyNode| {
            node_modal.set(Some(NodeTarget::Edit(node)));
        })
    };
    let on_delete = {
        let confirm = confirm.clone();
        Callback::from(move |node: HierarchyNode| {
            confirm.set(ConfirmFlow::ask(PendingAction::Delete(node)));
        })
    };
    let on_toggle_status = {
        let confirm = confirm.clone();
        Callback::from(move |node: HierarchyNode| {
            confirm.set(ConfirmFlow::ask(PendingAction::ToggleStatus(node)));
        })
    };
    let on_view_content = Callback::from(move |node: HierarchyNode| {
        push_route.emit(Route::NodeQuestions {
            node_id: node.id.to_string(),
        });
    });
    let on_create_root = on_create_child.reform(|_: MouseEvent| None);

    let close_node_modal = {
        let node_modal = node_modal.clone();
        Callback::from(move |_| node_modal.set(None))
    };

    let on_confirm = {
        let confirm = confirm.clone();
        let refetch = hierarchy.refetch.clone();
        Callback::from(move |_| {
            let Some((sending, action)) = confirm.submit() else {
                return;
            };
            confirm.set(sending.clone());

            let confirm = confirm.clone();
            let client = client.clone();
            let toast = toast.clone();
            let report_error = report_error.clone();
            let refetch = refetch.clone();
            yew::platform::spawn_local(async move {
                match perform(&client, &action).await {
                    Ok(message) => {
                        confirm.set(ConfirmFlow::finished());
                        toast.success(message);
                        refetch.emit(());
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

    let confirm_modal = confirm.pending.as_ref().map(|action| {
        let (title, message, confirm_text, destructive) = match action {
            PendingAction::Delete(node) => (
                "Delete level".to_string(),
                delete_warning(&forest, node),
                "Delete",
                true,
            ),
            PendingAction::ToggleStatus(node)
            | PendingAction::ToggleFeatured(node) => {
                if node.is_active {
                    (
                        "Deactivate level".to_string(),
                        format!("\"{}\" will be hidden from students.", node.level_name),
                        "Deactivate",
                        false,
                    )
                } else {
                    (
                        "Activate level".to_string(),
                        format!("\"{}\" will be visible to students.", node.level_name),
                        "Activate",
                        false,
                    )
                }
            }
        };
        html! {
            <ConfirmationModal
                {title}
                {message}
                {confirm_text}
                {destructive}
                on_confirm={on_confirm}
                on_close={on_cancel_confirm}
                is_loading={confirm.in_flight}
                error_message={confirm.error.clone().map(AttrValue::from)}
            />
        }
    });

    let subject_name = subject
        .data
        .as_ref()
        .map(|subject| subject.name.clone());

    html! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <div>
                    <Link<Route>
                        to={Route::Subjects}
                        classes="text-sm text-neutral-600 dark:text-neutral-400 underline"
                    >
                        {"← Subjects"}
                    </Link<Route>>
                    <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100">
                        {match &subject_name {
                            Some(name) => format!("{name} hierarchy"),
                            None => "Hierarchy".to_string(),
                        }}
                    </h1>
                </div>
                if !forest.is_empty() {
                    <button
                        type="button"
                        onclick={on_create_root}
                        class="px-4 py-2 text-sm font-medium rounded-md text-white \
                               bg-neutral-900 hover:bg-neutral-800 \
                               dark:bg-neutral-100 dark:text-neutral-900 \
                               dark:hover:bg-neutral-200"
                    >
                        {"Add root level"}
                    </button>
                }
            </div>

            {hierarchy.render("hierarchy", |_, _, _| html! {
                <HierarchyTree
                    forest={forest.clone()}
                    on_create_child={on_create_child.clone()}
                    on_edit={on_edit.clone()}
                    on_delete={on_delete.clone()}
                    on_toggle_status={on_toggle_status.clone()}
                    on_view_content={on_view_content.clone()}
                />
            })}

            if let Some(target) = &*node_modal {
                <HierarchyNodeModal
                    subject_id={props.subject_id.clone()}
                    forest={forest.clone()}
                    target={target.clone()}
                    on_close={close_node_modal}
                    on_saved={hierarchy.refetch.clone()}
                />
            }

            {confirm_modal}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forest_of_nested_payload() {
        let payload = r#"[
            {"_id": "c6", "subjectId": "s1", "levelName": "Class 6",
             "levelType": "class", "isActive": true, "children": [
                {"_id": "frac", "subjectId": "s1", "levelName": "Fractions",
                 "levelType": "chapter", "isActive": false}
             ]}
        ]"#;
        let nodes: Vec<HierarchyNode> = serde_json::from_str(payload).unwrap();
        let forest = Forest::from_nodes(&nodes);
        assert_eq!(forest.len(), 2);
        let fractions = forest.get(&NodeId::from("frac")).unwrap();
        assert_eq!(
            delete_warning(&forest, fractions),
            "\"Fractions\" will be deleted."
        );
    }
}
