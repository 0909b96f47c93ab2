use crate::{Route, State};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

/// Drops the session and returns to the login page. The backend keeps no
/// session state, so there is nothing to call.
#[hook]
pub fn use_logout() -> Callback<MouseEvent> {
    let dispatch = use_dispatch::<State>();
    let navigator = use_navigator();

    Callback::from(move |_| {
        dispatch.reduce_mut(|state| state.logout());
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Login);
        }
    })
}
