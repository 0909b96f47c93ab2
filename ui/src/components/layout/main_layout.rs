use super::{Header, Sidebar};
use crate::Route;
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MainLayoutProps {
    pub children: Children,
}

/// Page frame of the signed-in app: header, navigation and content.
#[function_component]
pub fn MainLayout(props: &MainLayoutProps) -> Html {
    let route = use_route::<Route>().unwrap_or(Route::Home);

    let drawer_open = use_state(|| false);

    let toggle_drawer = {
        let drawer_open = drawer_open.clone();
        Callback::from(move |_| {
            drawer_open.set(!*drawer_open);
        })
    };

    let close_drawer = {
        let drawer_open = drawer_open.clone();
        Callback::from(move |_| {
            drawer_open.set(false);
        })
    };

    html! {
        <div class="min-h-screen bg-neutral-50 dark:bg-neutral-900 \
                    text-neutral-900 dark:text-neutral-100 transition-colors">
            <Header on_menu={toggle_drawer} />
            <div class="flex min-h-0">
                // Desktop sidebar - hidden on mobile
                <aside class="hidden md:block w-64 flex-shrink-0 border-r \
                              border-neutral-200 dark:border-neutral-700 \
                              bg-white dark:bg-neutral-900">
                    <Sidebar active_route={route.clone()} />
                </aside>

                <main class="flex-1 min-w-0 px-4 sm:px-6 lg:px-8 py-8">
                    {for props.children.iter()}
                </main>
            </div>

            if *drawer_open {
                <MobileDrawer
                    active_route={route.clone()}
                    on_close={close_drawer}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct MobileDrawerProps {
    active_route: Route,
    on_close: Callback<()>,
}

/// Mobile drawer component that slides in from the left.
#[function_component]
fn MobileDrawer(props: &MobileDrawerProps) -> Html {
    let backdrop_ref = use_node_ref();

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        let backdrop_ref = backdrop_ref.clone();

        Callback::from(move |e: MouseEvent| {
            // Only close if clicking directly on backdrop, not on drawer content
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

    html! {
        <div
            ref={backdrop_ref}
            onclick={on_backdrop_click}
            class="md:hidden fixed inset-0 z-50 bg-black bg-opacity-50"
        >
            <aside class="absolute left-0 top-0 bottom-0 w-64 \
                          bg-white dark:bg-neutral-900 shadow-xl \
                          border-r border-neutral-200 dark:border-neutral-700">
                <Sidebar
                    active_route={props.active_route.clone()}
                    on_navigate={props.on_close.clone()}
                />
            </aside>
        </div>
    }
}
