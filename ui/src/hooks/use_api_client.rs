use payloads::APIClient;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{State, get_api_client};

/// API client carrying the current session's token. Rebuilt only when the
/// token changes.
#[hook]
pub fn use_api_client() -> APIClient {
    let token =
        use_selector(|state: &State| state.token().map(str::to_string));
    let client = use_memo(token, |token| get_api_client(token.as_deref()));
    (*client).clone()
}
