use payloads::NodeId;
use payloads::responses::HierarchyNode;
use std::rc::Rc;
use yew::prelude::*;

use crate::resources::status_badge;
use crate::tree::{ExpansionSet, Forest, TreeRow, indent_px};

#[derive(Properties, PartialEq)]
pub struct HierarchyTreeProps {
    pub forest: Rc<Forest>,
    /// `None` creates a root.
    pub on_create_child: Callback<Option<NodeId>>,
    pub on_edit: Callback<HierarchyNode>,
    pub on_delete: Callback<HierarchyNode>,
    pub on_toggle_status: Callback<HierarchyNode>,
    pub on_view_content: Callback<HierarchyNode>,
}

const ACTION_CLASSES: &str = "text-xs font-medium text-neutral-600 \
    dark:text-neutral-400 hover:text-neutral-900 dark:hover:text-white \
    underline";

/// Collapsible rendering of a subject hierarchy. Nodes start collapsed;
/// adding a child expands its parent.
#[function_component]
pub fn HierarchyTree(props: &HierarchyTreeProps) -> Html {
    let expanded = use_state(ExpansionSet::default);

    if props.forest.is_empty() {
        let on_create_root = props.on_create_child.reform(|_: MouseEvent| None);
        return html! {
            <div class="text-center py-12 border border-dashed \
                        border-neutral-300 dark:border-neutral-600 rounded-lg">
                <p class="text-neutral-600 dark:text-neutral-400 mb-4">
                    {"This subject has no hierarchy yet."}
                </p>
                <button
                    type="button"
                    onclick={on_create_root}
                    class="px-4 py-2 text-sm font-medium rounded-md text-white \
                           bg-neutral-900 hover:bg-neutral-800 \
                           dark:bg-neutral-100 dark:text-neutral-900 \
                           dark:hover:bg-neutral-200"
                >
                    {"Create root level"}
                </button>
            </div>
        };
    }

    let expand_all = {
        let expanded = expanded.clone();
        let forest = props.forest.clone();
        Callback::from(move |_: MouseEvent| {
            expanded.set(ExpansionSet::all(&forest));
        })
    };
    let collapse_all = {
        let expanded = expanded.clone();
        Callback::from(move |_: MouseEvent| expanded.set(ExpansionSet::default()))
    };

    let rows = props.forest.visible_rows(&expanded);

    html! {
        <div class="rounded-lg border border-neutral-200 dark:border-neutral-700 \
                    bg-white dark:bg-neutral-900">
            <div class="flex justify-end gap-3 px-4 py-2 border-b \
                        border-neutral-200 dark:border-neutral-700">
                <button type="button" onclick={expand_all} class={ACTION_CLASSES}>
                    {"Expand all"}
                </button>
                <button type="button" onclick={collapse_all} class={ACTION_CLASSES}>
                    {"Collapse all"}
                </button>
            </div>
            <ul class="divide-y divide-neutral-100 dark:divide-neutral-800">
                {for rows.into_iter().enumerate().map(|(position, row)| match row {
                    TreeRow::Node { node, depth, has_children, expanded: is_open } => {
                        let toggle = {
                            let expanded = expanded.clone();
                            let id = node.id.clone();
                            Callback::from(move |_: MouseEvent| {
                                expanded.set(expanded.toggled(&id));
                            })
                        };
                        let add_child = {
                            let expanded = expanded.clone();
                            let on_create_child = props.on_create_child.clone();
                            let id = node.id.clone();
                            Callback::from(move |_: MouseEvent| {
                                expanded.set(expanded.with_expanded(&id));
                                on_create_child.emit(Some(id.clone()));
                            })
                        };
                        let emit = |callback: &Callback<HierarchyNode>| {
                            let callback = callback.clone();
                            let node = node.clone();
                            Callback::from(move |_: MouseEvent| callback.emit(node.clone()))
                        };

                        html! {
                            <li
                                key={node.id.to_string()}
                                class="flex items-center gap-2 px-4 py-2"
                                style={format!("padding-left: {}px", indent_px(depth) + 16)}
                            >
                                if has_children {
                                    <button
                                        type="button"
                                        onclick={toggle}
                                        class="w-5 text-neutral-500 hover:text-neutral-900 \
                                               dark:hover:text-white"
                                        aria-label={if is_open { "Collapse" } else { "Expand" }}
                                    >
                                        {if is_open { "▾" } else { "▸" }}
                                    </button>
                                } else {
                                    <span class="w-5"></span>
                                }
                                <span class="font-medium text-sm text-neutral-900 \
                                             dark:text-neutral-100">
                                    {&node.level_name}
                                </span>
                                <span class="text-xs text-neutral-500 \
                                             dark:text-neutral-400">
                                    {node.level_type.to_string()}
                                </span>
                                {status_badge(node.is_active)}
                                <div class="ml-auto flex items-center gap-3">
                                    <button type="button" onclick={emit(&props.on_view_content)} class={ACTION_CLASSES}>
                                        {"Questions"}
                                    </button>
                                    <button type="button" onclick={add_child} class={ACTION_CLASSES}>
                                        {"Add child"}
                                    </button>
                                    <button type="button" onclick={emit(&props.on_edit)} class={ACTION_CLASSES}>
                                        {"Edit"}
                                    </button>
                                    <button type="button" onclick={emit(&props.on_toggle_status)} class={ACTION_CLASSES}>
                                        {if node.is_active { "Deactivate" } else { "Activate" }}
                                    </button>
                                    <button
                                        type="button"
                                        onclick={emit(&props.on_delete)}
                                        class="text-xs font-medium text-red-600 \
                                               dark:text-red-400 hover:text-red-800 underline"
                                    >
                                        {"Delete"}
                                    </button>
                                </div>
                            </li>
                        }
                    }
                    TreeRow::Truncated { depth, hidden } => html! {
                        <li
                            key={format!("truncated-{position}")}
                            class="px-4 py-2 text-xs italic text-neutral-500 \
                                   dark:text-neutral-400"
                            style={format!("padding-left: {}px", indent_px(depth) + 16)}
                        >
                            {format!("… {hidden} deeper level(s) not shown")}
                        </li>
                    },
                })}
            </ul>
        </div>
    }
}
