use wasm_bindgen::JsCast;
use yew::prelude::*;

/// A reusable modal component that supports backdrop clicks to close.
///
/// # Example
///
/// ```rust,ignore
/// use crate::components::Modal;
/// use yew::prelude::*;
///
/// #[function_component]
/// fn ExamTypeDetails() -> Html {
///     let show_modal = use_state(|| false);
///
///     let close_modal = {
///         let show_modal = show_modal.clone();
///         Callback::from(move |_| show_modal.set(false))
///     };
///
///     html! {
///         if *show_modal {
///             <Modal title="Exam Type" on_close={close_modal}>
///                 <p>{"Police Sub Inspector (PSI)"}</p>
///             </Modal>
///         }
///     }
/// }
/// ```
#[derive(Properties, PartialEq)]
pub struct ModalProps {
    /// Modal content (passed as children)
    pub children: Html,
    /// Called when user clicks backdrop or the close button
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub title: Option<AttrValue>,
    /// Maximum width class (default: "max-w-md")
    #[prop_or_else(|| AttrValue::from("max-w-md"))]
    pub max_width: AttrValue,
    /// Whether the modal may be dismissed at all, e.g. false while a
    /// request is in flight (default: true)
    #[prop_or(true)]
    pub dismissable: bool,
}

#[function_component]
pub fn Modal(props: &ModalProps) -> Html {
    let backdrop_ref = use_node_ref();

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        let backdrop_ref = backdrop_ref.clone();
        let dismissable = props.dismissable;

        Callback::from(move |e: MouseEvent| {
            if !dismissable {
                return;
            }

            if let Some(backdrop_element) =
                backdrop_ref.cast::<web_sys::Element>()
                && let Some(target) = e.target()
                && target.dyn_ref::<web_sys::Element>()
                    == Some(&backdrop_element)
            {
                on_close.emit(());
            }
        })
    };

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div
            ref={backdrop_ref.clone()}
            onclick={on_backdrop_click}
            class="fixed inset-0 bg-black bg-opacity-50 z-50 flex
                   items-center justify-center p-4"
        >
            <div
                class={format!(
                    "bg-white dark:bg-neutral-800 rounded-lg shadow-xl \
                     w-full max-h-[90vh] overflow-y-auto p-6 {}",
                    props.max_width
                )}
            >
                if let Some(title) = &props.title {
                    <div class="flex items-center justify-between mb-4">
                        <h3 class="text-lg font-semibold text-neutral-900 \
                                   dark:text-neutral-100">
                            {title}
                        </h3>
                        <button
                            type="button"
                            onclick={on_close_click}
                            disabled={!props.dismissable}
                            class="text-neutral-400 hover:text-neutral-600 \
                                   dark:hover:text-neutral-200 \
                                   disabled:opacity-50"
                            title="Close"
                        >
                            <span class="text-xl leading-none">{"×"}</span>
                        </button>
                    </div>
                }
                {props.children.clone()}
            </div>
        </div>
    }
}
