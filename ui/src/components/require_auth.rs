use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::session::Session;
use crate::{AuthState, Route, State};

/// Component that only renders its children when an admin is signed in.
///
/// While the stored session is still being checked a placeholder is shown;
/// once it is known that nobody is signed in, the login page takes over.
/// Children and their hooks therefore never run without a session.
///
/// Supports two modes:
/// 1. Simple children mode: Just wraps content that doesn't need the session
/// 2. Render prop mode: Provides the Session to children that need it
#[derive(Properties, PartialEq)]
pub struct RequireAuthProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub render: Option<Callback<Session, Html>>,
}

#[function_component]
pub fn RequireAuth(props: &RequireAuthProps) -> Html {
    let auth_state = use_selector(|state: &State| state.auth_state.clone());

    let session = match &*auth_state {
        AuthState::Unknown => {
            return html! {
                <div class="min-h-screen flex items-center justify-center">
                    <p class="text-neutral-600 dark:text-neutral-400">
                        {"Loading..."}
                    </p>
                </div>
            };
        }
        AuthState::LoggedOut => {
            return html! { <Redirect<Route> to={Route::Login} /> };
        }
        AuthState::LoggedIn(session) => session.clone(),
    };

    // If render prop is provided, use it and pass the session
    if let Some(render) = &props.render {
        return render.emit(session);
    }

    html! {
        <>
            {for props.children.iter()}
        </>
    }
}
