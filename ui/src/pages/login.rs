use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::Route;
use crate::components::LoginForm;
use crate::hooks::use_title;
use crate::session::Session;
use crate::state::State;

#[function_component]
pub fn LoginPage() -> Html {
    use_title("Sign in");
    let navigator = use_navigator();
    let is_authenticated =
        use_selector(|state: &State| state.is_authenticated());

    // Redirect to the dashboard if already signed in
    {
        let navigator = navigator.clone();
        use_effect_with(*is_authenticated, move |is_auth| {
            if *is_auth && let Some(navigator) = navigator {
                navigator.push(&Route::Home);
            }
        });
    }

    let on_success = Callback::from(move |_session: Session| {
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Home);
        }
    });

    html! {
        <div class="min-h-screen flex items-center justify-center \
                    bg-neutral-50 dark:bg-neutral-900 px-4">
            <LoginForm {on_success} />
        </div>
    }
}
