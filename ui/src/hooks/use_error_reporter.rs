use payloads::ClientError;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::State;
use crate::contexts::use_toast;

/// Reports a failed mutation: a toast with the server's message, and the
/// session is dropped when the token was rejected.
#[hook]
pub fn use_error_reporter() -> Callback<ClientError> {
    let toast = use_toast();
    let dispatch = use_dispatch::<State>();

    Callback::from(move |error: ClientError| {
        tracing::warn!("Request failed: {error}");
        if error.is_unauthorized() {
            dispatch.reduce_mut(|state| state.logout());
        }
        toast.error(error.user_message());
    })
}
