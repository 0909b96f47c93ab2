use yew::prelude::*;

use super::Modal;

#[derive(Properties, PartialEq)]
pub struct ConfirmationModalProps {
    /// Modal title (e.g., "Delete Exam Type")
    pub title: AttrValue,
    /// What is about to happen
    pub message: AttrValue,
    /// Confirm button text (e.g., "Delete")
    pub confirm_text: AttrValue,
    /// When set, the user must type this value to enable the confirm button
    #[prop_or_default]
    pub confirmation_value: Option<AttrValue>,
    /// Destructive actions get a red confirm button and the "cannot be
    /// undone" notice
    #[prop_or(true)]
    pub destructive: bool,
    pub on_confirm: Callback<()>,
    /// Called when user cancels or clicks backdrop
    pub on_close: Callback<()>,
    /// Whether the confirmed request is in flight
    #[prop_or_default]
    pub is_loading: bool,
    #[prop_or_default]
    pub error_message: Option<AttrValue>,
}

#[function_component]
pub fn ConfirmationModal(props: &ConfirmationModalProps) -> Html {
    let confirmation_input = use_state(String::new);

    let typed_ok = props
        .confirmation_value
        .as_ref()
        .is_none_or(|value| confirmation_input.trim() == value.as_str());

    let on_input = {
        let confirmation_input = confirmation_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            confirmation_input.set(input.value());
        })
    };

    let on_confirm_click = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };

    let on_cancel_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let confirm_class = if props.destructive {
        "bg-red-600 hover:bg-red-700 dark:bg-red-700 dark:hover:bg-red-600 text-white"
    } else {
        "bg-neutral-900 hover:bg-neutral-800 dark:bg-neutral-100 \
         dark:hover:bg-neutral-200 text-white dark:text-neutral-900"
    };

    html! {
        <Modal
            title={props.title.clone()}
            on_close={props.on_close.clone()}
            dismissable={!props.is_loading}
        >
            <div class="space-y-4">
                <p class="text-sm text-neutral-600 dark:text-neutral-400">
                    if props.destructive {
                        {"This action "}
                        <span class="font-semibold text-red-600 dark:text-red-400">
                            {"cannot be undone"}
                        </span>
                        {". "}
                    }
                    {&props.message}
                </p>

                if let Some(value) = &props.confirmation_value {
                    <p class="text-sm text-neutral-600 dark:text-neutral-400">
                        {"Please type "}
                        <span class="font-mono font-semibold text-neutral-900 dark:text-neutral-100">
                            {value}
                        </span>
                        {" to confirm."}
                    </p>

                    <input
                        type="text"
                        value={(*confirmation_input).clone()}
                        oninput={on_input}
                        placeholder={format!("Enter {value}")}
                        disabled={props.is_loading}
                        class="w-full px-3 py-2 text-sm border border-neutral-300 dark:border-neutral-600
                               rounded-md bg-white dark:bg-neutral-700
                               text-neutral-900 dark:text-neutral-100
                               placeholder-neutral-400 dark:placeholder-neutral-500
                               focus:outline-none focus:ring-2 focus:ring-red-500 focus:border-red-500
                               disabled:opacity-50 disabled:cursor-not-allowed"
                    />
                }

                if let Some(error) = &props.error_message {
                    <div class="text-sm text-red-600 dark:text-red-400">
                        {error}
                    </div>
                }
            </div>

            <div class="flex justify-end gap-3 mt-6">
                <button
                    type="button"
                    onclick={on_cancel_click}
                    disabled={props.is_loading}
                    class="px-4 py-2 text-sm font-medium text-neutral-700 dark:text-neutral-300
                           bg-white dark:bg-neutral-700 border border-neutral-300 dark:border-neutral-600
                           rounded-md hover:bg-neutral-50 dark:hover:bg-neutral-600
                           disabled:opacity-50 disabled:cursor-not-allowed
                           transition-colors"
                >
                    {"Cancel"}
                </button>
                <button
                    type="button"
                    onclick={on_confirm_click}
                    disabled={!typed_ok || props.is_loading}
                    class={format!(
                        "px-4 py-2 text-sm font-medium rounded-md \
                         disabled:opacity-50 disabled:cursor-not-allowed \
                         transition-colors {confirm_class}"
                    )}
                >
                    {if props.is_loading { "Processing..." } else { &props.confirm_text }}
                </button>
            </div>
        </Modal>
    }
}
