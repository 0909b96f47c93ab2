use gloo_timers::callback::Timeout;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Quiet period after the last keystroke before a search is issued.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Receives the trimmed term once typing pauses.
    pub on_search: Callback<String>,
    #[prop_or_else(|| AttrValue::from("Search..."))]
    pub placeholder: AttrValue,
}

#[function_component]
pub fn SearchInput(props: &Props) -> Html {
    let value = use_state(String::new);
    // Dropping a pending timeout cancels it
    let pending = use_mut_ref(|| None::<Timeout>);

    let on_input = {
        let value = value.clone();
        let pending = pending.clone();
        let on_search = props.on_search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let term = input.value();
            value.set(term.clone());

            let on_search = on_search.clone();
            *pending.borrow_mut() = Some(Timeout::new(SEARCH_DEBOUNCE_MS, move || {
                on_search.emit(term.trim().to_string());
            }));
        })
    };

    html! {
        <input
            type="search"
            value={(*value).clone()}
            oninput={on_input}
            placeholder={props.placeholder.clone()}
            class="w-full sm:w-72 px-3 py-2 text-sm border border-neutral-300 \
                   dark:border-neutral-600 rounded-md bg-white \
                   dark:bg-neutral-700 text-neutral-900 dark:text-neutral-100 \
                   placeholder-neutral-400 dark:placeholder-neutral-500 \
                   focus:outline-none focus:ring-2 focus:ring-neutral-500"
        />
    }
}
