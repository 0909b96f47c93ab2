use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub is_active: bool,
    /// Asks to flip the status. The page confirms before anything is sent.
    pub on_toggle: Callback<()>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component]
pub fn StatusToggle(props: &Props) -> Html {
    let on_toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |e: Event| {
            // The switch only moves once the change is confirmed and saved
            e.prevent_default();
            on_toggle.emit(());
        })
    };

    html! {
        <label class="relative inline-flex items-center cursor-pointer">
            <input
                type="checkbox"
                checked={props.is_active}
                onchange={on_toggle}
                disabled={props.disabled}
                class="sr-only peer"
            />
            <div class="w-11 h-6 bg-neutral-200 peer-focus:outline-none \
                        peer-focus:ring-2 peer-focus:ring-neutral-300 \
                        dark:peer-focus:ring-neutral-600 rounded-full peer \
                        dark:bg-neutral-700 peer-checked:after:translate-x-full \
                        after:content-[''] \
                        after:absolute after:top-[2px] after:left-[2px] \
                        after:bg-white after:border-neutral-300 after:border \
                        after:rounded-full after:h-5 after:w-5 \
                        after:transition-all \
                        dark:after:bg-neutral-900 dark:after:border-neutral-500 \
                        peer-checked:bg-neutral-900 \
                        dark:peer-checked:bg-neutral-100 \
                        peer-disabled:opacity-50 peer-disabled:cursor-not-allowed">
            </div>
            <span class="ml-3 text-sm font-medium text-neutral-700 \
                         dark:text-neutral-300">
                {if props.is_active { "Active" } else { "Inactive" }}
            </span>
        </label>
    }
}
