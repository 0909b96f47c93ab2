pub mod use_api_client;
pub mod use_error_reporter;
pub mod use_fetch;
pub mod use_logout;
pub mod use_lookup;
pub mod use_paginated_fetch;
pub mod use_push_route;
pub mod use_session_restore;
pub mod use_title;

pub use use_api_client::use_api_client;
pub use use_error_reporter::use_error_reporter;
pub use use_fetch::{FetchHandle, FetchHookReturn, FetchOptions, use_fetch};
pub use use_logout::use_logout;
pub use use_lookup::{LookupOption, LookupOptions, use_lookup};
pub use use_paginated_fetch::{
    PageParams, PaginatedHookReturn, use_paginated_fetch,
};
pub use use_push_route::use_push_route;
pub use use_session_restore::use_session_restore;
pub use use_title::use_title;

/// Distinguishes "not fetched yet" from "fetched, possibly empty".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    NotFetched,
    Fetched(T),
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, FetchState::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            FetchState::NotFetched => None,
            FetchState::Fetched(data) => Some(data),
        }
    }
}
