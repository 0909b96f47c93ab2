use yew::prelude::*;
use yewdux::prelude::*;

use crate::State;
use crate::hooks::use_logout;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub on_menu: Callback<()>,
}

#[function_component]
pub fn Header(props: &HeaderProps) -> Html {
    let admin = use_selector(|state: &State| {
        state.session().map(|session| session.admin.clone())
    });
    let logout = use_logout();
    let on_menu = props.on_menu.reform(|_: MouseEvent| ());

    html! {
        <header class="bg-white dark:bg-neutral-800 border-b border-neutral-200 dark:border-neutral-700">
            <div class="px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center gap-3">
                        <button
                            onclick={on_menu}
                            class="md:hidden p-1 text-neutral-500 hover:text-neutral-700 \
                                   dark:text-neutral-400 dark:hover:text-neutral-200"
                            aria-label="Toggle menu"
                        >
                            <MenuIcon />
                        </button>
                        <h1 class="text-xl font-semibold text-neutral-900 dark:text-white">
                            {"MockTale Admin"}
                        </h1>
                    </div>
                    if let Some(admin) = &*admin {
                        <div class="flex items-center space-x-4">
                            <div class="hidden sm:block text-right">
                                <p class="text-sm font-medium text-neutral-900 dark:text-neutral-100">
                                    {&admin.name}
                                </p>
                                <p class="text-xs text-neutral-500 dark:text-neutral-400">
                                    {&admin.email}
                                </p>
                            </div>
                            <button
                                onclick={logout}
                                class="px-3 py-1.5 text-sm font-medium rounded-md \
                                       border border-neutral-300 dark:border-neutral-600 \
                                       text-neutral-700 dark:text-neutral-300 \
                                       hover:bg-neutral-50 dark:hover:bg-neutral-700"
                            >
                                {"Log out"}
                            </button>
                        </div>
                    }
                </div>
            </div>
        </header>
    }
}

/// Hamburger menu icon.
#[function_component]
fn MenuIcon() -> Html {
    html! {
        <svg class="w-6 h-6" fill="none" viewBox="0 0 24 24" stroke="currentColor">
            <path
                stroke-linecap="round"
                stroke-linejoin="round"
                stroke-width="2"
                d="M4 6h16M4 12h16M4 18h16"
            />
        </svg>
    }
}
