use payloads::NodeId;
use payloads::responses::Question;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::ResourcePage;
use crate::forms::FormValues;

/// Query key narrowing the question list to one hierarchy node.
pub const NODE_FILTER: &str = "hierarchyNodeId";

#[derive(Properties, PartialEq)]
pub struct Props {
    pub node_id: NodeId,
}

/// Questions attached to one hierarchy node. New questions are attached
/// to it as well.
#[function_component]
pub fn NodeQuestionsPage(props: &Props) -> Html {
    let node_id = props.node_id.to_string();
    let fixed_filters = vec![(NODE_FILTER.to_string(), node_id.clone())];
    let presets = FormValues::new().with_text("hierarchy_node_id", node_id);

    let navigator = use_navigator();
    let go_back = Callback::from(move |_: MouseEvent| {
        if let Some(navigator) = &navigator {
            navigator.back();
        }
    });

    html! {
        <ResourcePage<Question>
            {fixed_filters}
            {presets}
            heading="Questions of this level"
        >
            <button
                type="button"
                onclick={go_back}
                class="text-sm text-neutral-600 dark:text-neutral-400 underline"
            >
                {"← Back to hierarchy"}
            </button>
        </ResourcePage<Question>>
    }
}
