use payloads::requests::ListQuery;
use payloads::responses::ListPage;
use payloads::{ClientError, Pagination};
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

use super::{FetchOptions, use_fetch};

/// Query parameters of a paginated list. Anything else about them is opaque
/// to the hook; they are compared by value to decide when to re-fetch.
pub trait PageParams: Clone + PartialEq + 'static {
    fn page(&self) -> u32;
    fn set_page(&mut self, page: u32);
}

impl PageParams for ListQuery {
    fn page(&self) -> u32 {
        self.page
    }

    fn set_page(&mut self, page: u32) {
        self.page = page;
    }
}

/// Accumulated pages of one list.
pub struct PaginatedState<T, P> {
    pub params: P,
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
    /// Bumped by `Refresh` so that reloading unchanged params still counts
    /// as a change of the fetch deps.
    reload: u32,
}

impl<T, P> PaginatedState<T, P> {
    pub fn new(params: P) -> Self {
        Self {
            params,
            items: Vec::new(),
            pagination: None,
            reload: 0,
        }
    }

    pub fn has_more(&self) -> bool {
        self.pagination
            .as_ref()
            .is_some_and(Pagination::has_next_page)
    }
}

impl<T: PartialEq, P: PartialEq> PartialEq for PaginatedState<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
            && self.items == other.items
            && self.pagination == other.pagination
            && self.reload == other.reload
    }
}

pub enum PaginatedAction<T, P> {
    /// Merge new filter or sort values; always starts over at page 1.
    UpdateParams(Rc<dyn Fn(&mut P)>),
    LoadMore,
    Refresh,
    Received {
        page: u32,
        items: Vec<T>,
        pagination: Option<Pagination>,
    },
}

impl<T: Clone, P: PageParams> Reducible for PaginatedState<T, P> {
    type Action = PaginatedAction<T, P>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            PaginatedAction::UpdateParams(update) => {
                let mut params = self.params.clone();
                update(&mut params);
                params.set_page(1);
                if params == self.params {
                    return self;
                }
                Rc::new(PaginatedState {
                    params,
                    items: Vec::new(),
                    pagination: None,
                    reload: self.reload,
                })
            }
            PaginatedAction::LoadMore => {
                let mut params = self.params.clone();
                params.set_page(self.params.page() + 1);
                Rc::new(PaginatedState {
                    params,
                    items: self.items.clone(),
                    pagination: self.pagination,
                    reload: self.reload,
                })
            }
            PaginatedAction::Refresh => {
                let mut params = self.params.clone();
                params.set_page(1);
                Rc::new(PaginatedState {
                    params,
                    items: Vec::new(),
                    pagination: None,
                    reload: self.reload.wrapping_add(1),
                })
            }
            PaginatedAction::Received {
                page,
                items,
                pagination,
            } => {
                // A page for params that have since moved on
                if page != self.params.page() {
                    return self;
                }
                let items = if page <= 1 {
                    items
                } else {
                    let mut accumulated = self.items.clone();
                    accumulated.extend(items);
                    accumulated
                };
                Rc::new(PaginatedState {
                    params: self.params.clone(),
                    items,
                    pagination,
                    reload: self.reload,
                })
            }
        }
    }
}

/// Paginated fetch hook return type
pub struct PaginatedHookReturn<T, P: 'static> {
    pub items: Vec<T>,
    pub params: P,
    pub pagination: Option<Pagination>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub has_more: bool,
    pub load_more: Callback<()>,
    pub refresh: Callback<()>,
    pub update_params: Callback<Rc<dyn Fn(&mut P)>>,
}

impl<T, P: 'static> PaginatedHookReturn<T, P> {
    /// Convenience wrapper around `update_params` for a plain closure.
    pub fn set_params(&self, update: impl Fn(&mut P) + 'static) {
        self.update_params.emit(Rc::new(update));
    }
}

/// Fetch a list page by page, accumulating the results.
///
/// Changing the params (through `update_params`) starts over at page 1 and
/// clears what was loaded. `load_more` asks for the next page and appends
/// it. Pagination metadata is taken as reported by the server.
#[hook]
pub fn use_paginated_fetch<T, P, F, Fut>(
    initial_params: P,
    fetch_fn: F,
) -> PaginatedHookReturn<T, P>
where
    T: Clone + PartialEq + 'static,
    P: PageParams,
    F: Fn(P) -> Fut + 'static,
    Fut: Future<Output = Result<ListPage<T>, ClientError>> + 'static,
{
    let state = use_reducer(move || PaginatedState::<T, P>::new(initial_params));

    let on_success = {
        let dispatcher = state.dispatcher();
        Callback::from(move |(page, list): (u32, ListPage<T>)| {
            dispatcher.dispatch(PaginatedAction::Received {
                page,
                items: list.items,
                pagination: list.pagination,
            });
        })
    };

    let params = state.params.clone();
    let fetch = use_fetch(
        (state.params.clone(), state.reload),
        FetchOptions::default().on_success(on_success),
        move || {
            let page = params.page();
            let request = fetch_fn(params.clone());
            async move { request.await.map(|list| (page, list)) }
        },
    );

    let load_more = {
        let dispatcher = state.dispatcher();
        let can_load = state.has_more() && !fetch.is_loading;
        Callback::from(move |_| {
            if can_load {
                dispatcher.dispatch(PaginatedAction::LoadMore);
            }
        })
    };

    let refresh = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(PaginatedAction::Refresh))
    };

    let update_params = {
        let dispatcher = state.dispatcher();
        Callback::from(move |update: Rc<dyn Fn(&mut P)>| {
            dispatcher.dispatch(PaginatedAction::UpdateParams(update));
        })
    };

    PaginatedHookReturn {
        items: state.items.clone(),
        params: state.params.clone(),
        pagination: state.pagination,
        is_loading: fetch.is_loading,
        error: fetch.error.clone(),
        has_more: state.has_more(),
        load_more,
        refresh,
        update_params,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type State = PaginatedState<&'static str, ListQuery>;

    fn pagination(page: u32, total_pages: u32) -> Option<Pagination> {
        Some(Pagination {
            total: u64::from(total_pages) * 2,
            page,
            limit: 2,
            total_pages,
        })
    }

    fn received(
        page: u32,
        items: &[&'static str],
        total_pages: u32,
    ) -> PaginatedAction<&'static str, ListQuery> {
        PaginatedAction::Received {
            page,
            items: items.to_vec(),
            pagination: pagination(page, total_pages),
        }
    }

    fn loaded_first_page() -> Rc<State> {
        Rc::new(State::new(ListQuery::default()))
            .reduce(received(1, &["a", "b"], 3))
    }

    #[test]
    fn load_more_appends() {
        let state = loaded_first_page();
        assert!(state.has_more());

        let state = state.reduce(PaginatedAction::LoadMore);
        assert_eq!(state.params.page, 2);
        assert_eq!(state.items, vec!["a", "b"]);

        let state = state.reduce(received(2, &["c", "d"], 3));
        assert_eq!(state.items, vec!["a", "b", "c", "d"]);
        assert_eq!(state.pagination, pagination(2, 3));
    }

    #[test]
    fn update_params_resets_before_next_response() {
        let state = loaded_first_page()
            .reduce(PaginatedAction::LoadMore)
            .reduce(received(2, &["c"], 3));

        let state = state.reduce(PaginatedAction::UpdateParams(Rc::new(
            |q: &mut ListQuery| q.search = Some("ssc".into()),
        )));
        assert_eq!(state.params.page, 1);
        assert_eq!(state.params.search.as_deref(), Some("ssc"));
        assert!(state.items.is_empty());
        assert!(state.pagination.is_none());

        let state = state.reduce(received(1, &["x"], 1));
        assert_eq!(state.items, vec!["x"]);
        assert!(!state.has_more());
    }

    #[test]
    fn unchanged_params_keep_the_list() {
        let state = loaded_first_page();
        let next = state
            .clone()
            .reduce(PaginatedAction::UpdateParams(Rc::new(|_: &mut ListQuery| {})));
        assert!(Rc::ptr_eq(&state, &next));
    }

    #[test]
    fn late_page_for_old_params_is_ignored() {
        let state = loaded_first_page().reduce(PaginatedAction::LoadMore);
        let state = state.reduce(PaginatedAction::UpdateParams(Rc::new(
            |q: &mut ListQuery| q.search = Some("neet".into()),
        )));
        // Page 2 of the previous search arrives after the reset
        let state = state.reduce(received(2, &["stale"], 3));
        assert!(state.items.is_empty());
    }

    #[test]
    fn refresh_starts_over_and_changes_deps() {
        let state = loaded_first_page().reduce(PaginatedAction::LoadMore);
        let before = state.reload;
        let state = state.reduce(PaginatedAction::Refresh);
        assert_eq!(state.params.page, 1);
        assert!(state.items.is_empty());
        assert_ne!(state.reload, before);
    }
}
