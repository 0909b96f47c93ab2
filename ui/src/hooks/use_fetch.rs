use futures::FutureExt;
use futures::future::LocalBoxFuture;
use payloads::ClientError;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;
use yewdux::prelude::*;

use super::FetchState;
use crate::State;

/// What one fetch hook instance currently knows.
///
/// Every request is tagged with a sequence number. Only the outcome of the
/// most recently started request is recorded, so a slow response to a
/// superseded request can never overwrite a newer one.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSnapshot<T> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    latest: u64,
}

impl<T> Default for FetchSnapshot<T> {
    fn default() -> Self {
        Self {
            data: FetchState::NotFetched,
            is_loading: false,
            error: None,
            latest: 0,
        }
    }
}

impl<T> FetchSnapshot<T> {
    pub fn latest_request(&self) -> u64 {
        self.latest
    }
}

pub enum FetchAction<T> {
    Started(u64),
    Succeeded(u64, T),
    Failed(u64, String),
}

impl<T: Clone> Reducible for FetchSnapshot<T> {
    type Action = FetchAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            FetchAction::Started(seq) => Rc::new(FetchSnapshot {
                data: self.data.clone(),
                is_loading: true,
                error: None,
                latest: seq,
            }),
            FetchAction::Succeeded(seq, data) if seq == self.latest => {
                Rc::new(FetchSnapshot {
                    data: FetchState::Fetched(data),
                    is_loading: false,
                    error: None,
                    latest: seq,
                })
            }
            FetchAction::Failed(seq, message) if seq == self.latest => {
                Rc::new(FetchSnapshot {
                    data: self.data.clone(),
                    is_loading: false,
                    error: Some(message),
                    latest: seq,
                })
            }
            // Outcome of a superseded request
            FetchAction::Succeeded(..) | FetchAction::Failed(..) => self,
        }
    }
}

/// Options for [`use_fetch`].
pub struct FetchOptions<T> {
    /// Fetch on mount and whenever the deps change. Defaults to true.
    pub immediate: bool,
    pub on_success: Option<Callback<T>>,
    pub on_error: Option<Callback<String>>,
}

impl<T> Default for FetchOptions<T> {
    fn default() -> Self {
        Self {
            immediate: true,
            on_success: None,
            on_error: None,
        }
    }
}

impl<T> FetchOptions<T> {
    /// Only fetch when `execute` is called.
    pub fn lazy() -> Self {
        Self {
            immediate: false,
            ..Self::default()
        }
    }

    pub fn on_success(mut self, callback: Callback<T>) -> Self {
        self.on_success = Some(callback);
        self
    }

    pub fn on_error(mut self, callback: Callback<String>) -> Self {
        self.on_error = Some(callback);
        self
    }
}

type BoxedFetch<T> =
    Rc<dyn Fn() -> LocalBoxFuture<'static, Result<T, ClientError>>>;

/// The closure to run and the sequence number of its request. Nothing is
/// numbered while the slot is still empty.
fn next_request<T>(
    slot: &RefCell<Option<BoxedFetch<T>>>,
    sequence: &RefCell<u64>,
) -> Result<(BoxedFetch<T>, u64), ClientError> {
    let fetch = slot
        .borrow()
        .clone()
        .ok_or_else(|| ClientError::Decode("fetch hook not ready".into()))?;
    let mut sequence = sequence.borrow_mut();
    *sequence += 1;
    Ok((fetch, *sequence))
}

/// Runs the latest fetch closure of a hook instance.
///
/// Cloning is cheap; all clones share the same closure slot and request
/// counter.
pub struct FetchHandle<T: Clone + 'static> {
    fetch: Rc<RefCell<Option<BoxedFetch<T>>>>,
    options: Rc<RefCell<FetchOptions<T>>>,
    sequence: Rc<RefCell<u64>>,
    dispatcher: UseReducerDispatcher<FetchSnapshot<T>>,
    on_unauthorized: Callback<()>,
}

impl<T: Clone + 'static> Clone for FetchHandle<T> {
    fn clone(&self) -> Self {
        Self {
            fetch: self.fetch.clone(),
            options: self.options.clone(),
            sequence: self.sequence.clone(),
            dispatcher: self.dispatcher.clone(),
            on_unauthorized: self.on_unauthorized.clone(),
        }
    }
}

impl<T: Clone + 'static> FetchHandle<T> {
    /// Fetch and record the outcome, handing the original result back so
    /// callers can react to the error themselves.
    pub async fn run(&self) -> Result<T, ClientError> {
        let (fetch, seq) = next_request(&self.fetch, &self.sequence)?;
        self.dispatcher.dispatch(FetchAction::Started(seq));

        let result = fetch().await;
        let is_latest = *self.sequence.borrow() == seq;

        match &result {
            Ok(data) => {
                self.dispatcher
                    .dispatch(FetchAction::Succeeded(seq, data.clone()));
                if is_latest
                    && let Some(on_success) =
                        self.options.borrow().on_success.clone()
                {
                    on_success.emit(data.clone());
                }
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!("Fetch failed: {message}");
                if e.is_unauthorized() {
                    self.on_unauthorized.emit(());
                }
                self.dispatcher
                    .dispatch(FetchAction::Failed(seq, message.clone()));
                if is_latest
                    && let Some(on_error) =
                        self.options.borrow().on_error.clone()
                {
                    on_error.emit(message);
                }
            }
        }

        result
    }

    /// Fire and forget.
    pub fn execute(&self) {
        let handle = self.clone();
        yew::platform::spawn_local(async move {
            let _ = handle.run().await;
        });
    }
}

/// Generic fetch hook return type
pub struct FetchHookReturn<T: Clone + 'static> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub refetch: Callback<()>,
    pub handle: FetchHandle<T>,
}

impl<T: Clone + 'static> FetchHookReturn<T> {
    /// Returns true if this is the initial load (data not yet fetched,
    /// currently loading, and no error).
    pub fn is_initial_loading(&self) -> bool {
        self.is_loading && !self.data.is_fetched() && self.error.is_none()
    }

    /// Render based on fetch state with contextual loading/error messages.
    ///
    /// The render function receives the data, whether a refetch is in
    /// progress, and the error of a failed refetch (the data of the
    /// previous fetch is still shown in that case).
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool, Option<&String>) -> Html,
    {
        match self.data.as_ref() {
            None => {
                if let Some(error) = &self.error {
                    html! {
                        <div class="p-4 rounded-md bg-red-50 \
                                   dark:bg-red-900/20 border \
                                   border-red-200 dark:border-red-800">
                            <p class="text-sm text-red-700 \
                                      dark:text-red-400">
                                {format!("Error loading {}: {}", context, error)}
                            </p>
                        </div>
                    }
                } else {
                    html! {
                        <div class="text-center py-12">
                            <p class="text-neutral-600 dark:text-neutral-400">
                                {format!("Loading {}...", context)}
                            </p>
                        </div>
                    }
                }
            }
            Some(data) => render_fn(data, self.is_loading, self.error.as_ref()),
        }
    }
}

/// Generic fetch hook.
///
/// Fetches on mount (unless the options say otherwise) and again whenever
/// `deps` change. The closure may capture anything; the most recent one is
/// kept in a stable slot, so passing a fresh closure on every render does
/// not trigger a fetch by itself.
///
/// # Example
///
/// ```rust,ignore
/// #[hook]
/// pub fn use_subject(subject_id: SubjectId) -> FetchHookReturn<Subject> {
///     let client = use_api_client();
///     use_fetch(subject_id.clone(), FetchOptions::default(), move || {
///         let client = client.clone();
///         let subject_id = subject_id.clone();
///         async move { client.fetch::<Subject>(&subject_id).await }
///     })
/// }
/// ```
#[hook]
pub fn use_fetch<T, D, F, Fut>(
    deps: D,
    options: FetchOptions<T>,
    fetch_fn: F,
) -> FetchHookReturn<T>
where
    T: Clone + 'static,
    D: PartialEq + Clone + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, ClientError>> + 'static,
{
    let snapshot = use_reducer(FetchSnapshot::<T>::default);
    let fetch_slot = use_mut_ref(|| None::<BoxedFetch<T>>);
    let options_slot = use_mut_ref(FetchOptions::<T>::default);
    let sequence = use_mut_ref(|| 0_u64);
    let dispatch = use_dispatch::<State>();

    let immediate = options.immediate;
    *fetch_slot.borrow_mut() =
        Some(Rc::new(move || fetch_fn().boxed_local()) as BoxedFetch<T>);
    *options_slot.borrow_mut() = options;

    let handle = FetchHandle {
        fetch: fetch_slot,
        options: options_slot,
        sequence,
        dispatcher: snapshot.dispatcher(),
        on_unauthorized: Callback::from(move |_| {
            dispatch.reduce_mut(|state| state.logout());
        }),
    };

    {
        let handle = handle.clone();
        use_effect_with((deps, immediate), move |(_, immediate)| {
            if *immediate {
                handle.execute();
            }
        });
    }

    let refetch = {
        let handle = handle.clone();
        Callback::from(move |_| handle.execute())
    };

    FetchHookReturn {
        data: snapshot.data.clone(),
        is_loading: snapshot.is_loading,
        error: snapshot.error.clone(),
        refetch,
        handle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(
        state: Rc<FetchSnapshot<u32>>,
        action: FetchAction<u32>,
    ) -> Rc<FetchSnapshot<u32>> {
        state.reduce(action)
    }

    #[test]
    fn loading_goes_up_then_down_on_success() {
        let state = Rc::new(FetchSnapshot::<u32>::default());
        assert!(!state.is_loading);

        let state = apply(state, FetchAction::Started(1));
        assert!(state.is_loading);
        assert!(state.error.is_none());

        let state = apply(state, FetchAction::Succeeded(1, 7));
        assert!(!state.is_loading);
        assert_eq!(state.data, FetchState::Fetched(7));
        assert!(state.error.is_none());
    }

    #[test]
    fn error_is_set_only_on_failure() {
        let state = apply(
            Rc::new(FetchSnapshot::default()),
            FetchAction::Started(1),
        );
        let state = apply(state, FetchAction::Failed(1, "boom".into()));
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("boom"));

        // A new attempt clears the error straight away
        let state = apply(state, FetchAction::Started(2));
        assert!(state.error.is_none());
        let state = apply(state, FetchAction::Succeeded(2, 1));
        assert!(state.error.is_none());
    }

    #[test]
    fn failed_refetch_keeps_previous_data() {
        let state = apply(
            Rc::new(FetchSnapshot::default()),
            FetchAction::Started(1),
        );
        let state = apply(state, FetchAction::Succeeded(1, 3));
        let state = apply(state, FetchAction::Started(2));
        let state = apply(state, FetchAction::Failed(2, "offline".into()));
        assert_eq!(state.data, FetchState::Fetched(3));
        assert_eq!(state.error.as_deref(), Some("offline"));
    }

    #[test]
    fn empty_slot_starts_no_request() {
        let slot = RefCell::new(None::<BoxedFetch<u32>>);
        let sequence = RefCell::new(4);
        assert!(next_request(&slot, &sequence).is_err());
        assert_eq!(*sequence.borrow(), 4);

        let fetch: BoxedFetch<u32> =
            Rc::new(|| async { Ok::<_, ClientError>(1) }.boxed_local());
        *slot.borrow_mut() = Some(fetch);
        let (_, seq) = next_request(&slot, &sequence).unwrap();
        assert_eq!(seq, 5);
    }

    #[test]
    fn superseded_responses_are_discarded() {
        let state = apply(
            Rc::new(FetchSnapshot::default()),
            FetchAction::Started(1),
        );
        let state = apply(state, FetchAction::Started(2));

        // The second request resolves first
        let state = apply(state, FetchAction::Succeeded(2, 20));
        // The first one arrives late and must not win
        let state = apply(state, FetchAction::Succeeded(1, 10));
        assert_eq!(state.data, FetchState::Fetched(20));

        let state = apply(state, FetchAction::Failed(1, "late".into()));
        assert!(state.error.is_none());
        assert_eq!(state.latest_request(), 2);
    }

    #[test]
    fn stale_response_does_not_end_loading() {
        let state = apply(
            Rc::new(FetchSnapshot::default()),
            FetchAction::Started(1),
        );
        let state = apply(state, FetchAction::Started(2));
        let state = apply(state, FetchAction::Succeeded(1, 10));
        assert!(state.is_loading);
        assert_eq!(state.data, FetchState::NotFetched);
    }
}
