use payloads::Pagination;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Pagination block of the most recent page, as sent by the server
    pub pagination: Option<Pagination>,
    /// Number of rows currently shown
    pub shown: usize,
    pub on_load_more: Callback<()>,
    /// Whether currently loading (to disable the button)
    #[prop_or(false)]
    pub is_loading: bool,
}

#[function_component]
pub fn PaginationControls(props: &Props) -> Html {
    let Some(pagination) = props.pagination else {
        return html! {};
    };

    // Don't show controls for an empty list
    if pagination.total == 0 {
        return html! {};
    }

    let on_load_more = {
        let on_load_more = props.on_load_more.clone();
        Callback::from(move |_: MouseEvent| on_load_more.emit(()))
    };

    let disabled = props.is_loading;
    let button_class = if disabled {
        "px-4 py-2 border border-neutral-300 dark:border-neutral-600 \
         rounded-md text-sm font-medium text-neutral-400 \
         dark:text-neutral-500 bg-neutral-100 dark:bg-neutral-800 \
         cursor-not-allowed"
    } else {
        "px-4 py-2 border border-neutral-300 dark:border-neutral-600 \
         rounded-md text-sm font-medium text-neutral-700 \
         dark:text-neutral-300 bg-white dark:bg-neutral-700 \
         hover:bg-neutral-50 dark:hover:bg-neutral-600 \
         transition-colors duration-200"
    };

    html! {
        <div class="flex items-center justify-between mt-4 pt-4 \
                    border-t border-neutral-200 dark:border-neutral-700">
            <span class="text-sm text-neutral-600 dark:text-neutral-400">
                {format!(
                    "Showing {} of {} · page {} of {}",
                    props.shown,
                    pagination.total,
                    pagination.page,
                    pagination.total_pages
                )}
            </span>

            if pagination.has_next_page() {
                <button
                    type="button"
                    onclick={on_load_more}
                    disabled={disabled}
                    class={button_class}
                >
                    {if props.is_loading { "Loading..." } else { "Load more" }}
                </button>
            }
        </div>
    }
}
