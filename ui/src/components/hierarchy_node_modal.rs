use payloads::responses::HierarchyNode;
use payloads::{NodeId, SubjectId};
use std::rc::Rc;
use yew::prelude::*;

use super::{FormField, LABEL_CLASSES, Modal, Select};
use crate::contexts::use_toast;
use crate::forms::{FieldValue, FormValues, ValidationErrors};
use crate::hooks::{use_api_client, use_error_reporter};
use crate::resources::hierarchy::{
    PARENT_FIELD, new_node_values, node_schema, node_values, prepare_create,
    prepare_update,
};
use crate::tree::Forest;

/// What the node form is for.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeTarget {
    /// A new node under the given parent, or a new root.
    NewChild(Option<NodeId>),
    Edit(HierarchyNode),
}

#[derive(Properties, PartialEq)]
pub struct HierarchyNodeModalProps {
    pub subject_id: SubjectId,
    pub forest: Rc<Forest>,
    pub target: NodeTarget,
    pub on_close: Callback<()>,
    pub on_saved: Callback<()>,
}

/// Options of the parent dropdown, indented by depth.
pub fn parent_options(
    forest: &Forest,
    editing: Option<&NodeId>,
) -> Vec<(String, String)> {
    forest
        .parent_candidates(editing)
        .into_iter()
        .map(|(node, depth)| {
            (
                node.id.to_string(),
                format!(
                    "{}{} ({})",
                    "\u{a0}\u{a0}\u{a0}".repeat(depth),
                    node.level_name,
                    node.level_type
                ),
            )
        })
        .collect()
}

#[function_component]
pub fn HierarchyNodeModal(props: &HierarchyNodeModalProps) -> Html {
    let schema = use_memo((), |_| node_schema());
    let values = {
        let forest = props.forest.clone();
        let target = props.target.clone();
        use_state(move || match &target {
            NodeTarget::NewChild(parent) => new_node_values(&forest, parent.as_ref()),
            NodeTarget::Edit(node) => node_values(node),
        })
    };
    let errors = use_state(|| None::<ValidationErrors>);
    let is_submitting = use_state(|| false);
    let client = use_api_client();
    let toast = use_toast();
    let report_error = use_error_reporter();

    let editing = match &props.target {
        NodeTarget::Edit(node) => Some(node.id.clone()),
        NodeTarget::NewChild(_) => None,
    };

    let on_change = {
        let values = values.clone();
        Callback::from(move |(name, value): (&'static str, FieldValue)| {
            let mut next: FormValues = (*values).clone();
            next.set(name, value);
            values.set(next);
        })
    };

    let on_parent_change = on_change.reform(|parent: String| {
        (PARENT_FIELD, FieldValue::Text(parent))
    });

    let on_submit = {
        let values = values.clone();
        let errors = errors.clone();
        let is_submitting = is_submitting.clone();
        let forest = props.forest.clone();
        let subject_id = props.subject_id.clone();
        let editing = editing.clone();
        let on_saved = props.on_saved.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_submitting {
                return;
            }

            enum Request {
                Create(payloads::requests::CreateHierarchyNode),
                Update(NodeId, payloads::requests::UpdateHierarchyNode),
            }

            let request = match &editing {
                Some(id) => prepare_update(&values, id, &forest)
                    .map(|details| Request::Update(id.clone(), details)),
                None => prepare_create(&values, &subject_id, &forest)
                    .map(Request::Create),
            };
            let request = match request {
                Ok(request) => request,
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
            let on_saved = on_saved.clone();
            let on_close = on_close.clone();

            yew::platform::spawn_local(async move {
                let (result, verb) = match &request {
                    Request::Create(details) => {
                        (client.create_node(details).await, "created")
                    }
                    Request::Update(id, details) => {
                        (client.update_node(id, details).await, "updated")
                    }
                };
                is_submitting.set(false);

                match result {
                    Ok(node) => {
                        tracing::debug!("Hierarchy node {verb}: {}", node.id);
                        toast.success(format!("\"{}\" {verb}", node.level_name));
                        on_saved.emit(());
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

    let title = match &props.target {
        NodeTarget::Edit(node) => format!("Edit \"{}\"", node.level_name),
        NodeTarget::NewChild(Some(parent)) => match props.forest.get(parent) {
            Some(parent) => format!("Add level under \"{}\"", parent.level_name),
            None => "Add level".to_string(),
        },
        NodeTarget::NewChild(None) => "Add root level".to_string(),
    };
    let submitting = *is_submitting;
    let error_for = |name: &str| {
        errors
            .as_ref()
            .and_then(|rejected| rejected.for_field(name))
            .map(|message| AttrValue::from(message.to_string()))
    };

    html! {
        <Modal
            {title}
            on_close={props.on_close.clone()}
            max_width="max-w-lg"
            dismissable={!submitting}
        >
            <form onsubmit={on_submit} class="space-y-4" novalidate={true}>
                <div>
                    <label for="field-parent_id" class={LABEL_CLASSES}>
                        {"Parent"}
                    </label>
                    <Select
                        id={"field-parent_id".to_string()}
                        options={parent_options(&props.forest, editing.as_ref())}
                        selected={values.text(PARENT_FIELD).to_string()}
                        placeholder={Some(AttrValue::from("No parent (root level)"))}
                        disabled={submitting}
                        on_change={on_parent_change}
                    />
                    if let Some(error) = error_for(PARENT_FIELD) {
                        <p class="mt-1 text-sm text-red-600 dark:text-red-400">
                            {error}
                        </p>
                    }
                </div>

                {for schema.fields.iter().map(|spec| html! {
                    <FormField
                        key={spec.name}
                        spec={spec.clone()}
                        value={values
                            .get(spec.name)
                            .cloned()
                            .unwrap_or_else(|| spec.default.clone())}
                        error={error_for(spec.name)}
                        disabled={submitting}
                        on_change={on_change.clone()}
                    />
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
    use payloads::LevelType;

    fn node(id: &str, parent: Option<&str>) -> HierarchyNode {
        HierarchyNode {
            id: NodeId::from(id),
            subject_id: SubjectId::from("s1"),
            level_name: id.to_uppercase(),
            level_type: LevelType::Chapter,
            parent_id: parent.map(NodeId::from),
            order_index: 0,
            is_active: true,
            children: Vec::new(),
        }
    }

    #[test]
    fn parent_choices_exclude_the_subtree_being_moved() {
        let forest = Forest::from_nodes(&[
            node("a", None),
            node("b", Some("a")),
            node("c", Some("b")),
            node("d", None),
        ]);
        let ids: Vec<_> = parent_options(&forest, Some(&NodeId::from("b")))
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, ["a", "d"]);

        let options = parent_options(&forest, None);
        assert_eq!(options.len(), 4);
        assert_eq!(options[2].1, "\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}C (Chapter)");
    }
}
