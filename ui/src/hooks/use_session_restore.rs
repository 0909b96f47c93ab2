use yew::prelude::*;
use yewdux::prelude::*;

use crate::{AuthState, State, get_api_client, session};

/// Restore the stored session once on startup.
///
/// The stored profile is trusted immediately so pages render without a
/// round trip; the token is then checked against the profile endpoint and
/// the session dropped if the backend rejects it.
#[hook]
pub fn use_session_restore() {
    let dispatch = use_dispatch::<State>();

    use_effect_with((), move |_| {
        let stored = match session::load() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Ignoring stored session: {e:#}");
                None
            }
        };

        let Some(stored) = stored else {
            dispatch.reduce_mut(|state| state.logout());
            return;
        };

        let api_client = get_api_client(Some(&stored.token));
        dispatch.reduce_mut(|state| {
            state.auth_state = AuthState::LoggedIn(stored);
        });

        yew::platform::spawn_local(async move {
            match api_client.profile().await {
                Ok(admin) => dispatch.reduce_mut(|state| {
                    if let AuthState::LoggedIn(session) = &mut state.auth_state
                    {
                        session.admin = admin;
                    }
                }),
                Err(e) if e.is_unauthorized() => {
                    tracing::info!("Stored session was rejected");
                    dispatch.reduce_mut(|state| state.logout());
                }
                // Offline or a flaky backend: keep the stored session
                Err(e) => {
                    tracing::warn!("Could not verify session: {e}");
                }
            }
        });
    });
}
