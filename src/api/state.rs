//! Request lifecycle state shared by query and mutation handles.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;

use crate::models::envelope::Body;
use crate::ApiClient;

/// The observable state of one request handle.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<TData> {
    /// Payload of the last successful request.
    pub data: Option<TData>,
    /// True while a request is in flight.
    pub loading: bool,
    /// True when the last completed request failed.
    pub error: bool,
}

impl<TData> Default for RequestState<TData> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: false,
        }
    }
}

/// Transitions applied to a [`RequestState`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action<TData> {
    /// A request was started.
    Fetch,
    /// A request resolved without errors. The payload is whatever the
    /// envelope carried, `None` for `data: null`.
    FetchSuccess(Option<TData>),
    /// A request failed at the transport or GraphQL level.
    FetchError,
}

impl<TData> RequestState<TData> {
    /// Applies an action and returns the next state.
    ///
    /// `Fetch` leaves data and error untouched so the previous result stays
    /// visible while revalidating. `FetchSuccess` replaces the whole state.
    /// `FetchError` keeps whatever data was already there.
    pub fn reduce(self, action: Action<TData>) -> Self {
        match action {
            Action::Fetch => Self {
                loading: true,
                ..self
            },
            Action::FetchSuccess(payload) => Self {
                data: payload,
                loading: false,
                error: false,
            },
            Action::FetchError => Self {
                loading: false,
                error: true,
                ..self
            },
        }
    }

    /// In-place form of [`RequestState::reduce`].
    pub fn apply(&mut self, action: Action<TData>) {
        let current = std::mem::take(self);
        *self = current.reduce(action);
    }
}

/// Owns one [`RequestState`] and drives request lifecycles through it.
///
/// Every lifecycle takes a generation number when it dispatches `Fetch`.
/// Completions from a superseded generation are dropped, so the most
/// recently started request decides the final state.
pub(crate) struct Lifecycle<TData> {
    state: watch::Sender<RequestState<TData>>,
    generation: AtomicU64,
}

impl<TData> Lifecycle<TData>
where
    TData: DeserializeOwned,
{
    pub(crate) fn new() -> Self {
        let (state, _) = watch::channel(RequestState::default());
        Self {
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<RequestState<TData>> {
        self.state.subscribe()
    }

    pub(crate) fn borrow(&self) -> watch::Ref<'_, RequestState<TData>> {
        self.state.borrow()
    }

    fn dispatch(&self, action: Action<TData>) {
        self.state.send_modify(|state| state.apply(action));
    }

    /// Runs one request and applies its outcome.
    ///
    /// Resolves once the terminal action has been applied or discarded.
    pub(crate) async fn run<TVariables>(&self, client: &ApiClient, body: &Body<'_, TVariables>)
    where
        TVariables: Serialize,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.dispatch(Action::Fetch);

        let action = match client.fetch::<TData, TVariables>(body).await {
            Ok(response) => match response.first_error() {
                Some(message) => {
                    log::warn!("request failed: GraphQL error: {message}");
                    Action::FetchError
                }
                None => Action::FetchSuccess(response.data),
            },
            Err(e) => {
                log::warn!("request failed: {e}");
                Action::FetchError
            }
        };

        // Checked under the channel's write lock so a newer Fetch cannot
        // slip between the check and the update.
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                log::debug!("discarding result of superseded request #{generation}");
                return false;
            }
            state.apply(action);
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_keeps_previous_result_visible() {
        let state = RequestState {
            data: Some(7),
            loading: false,
            error: true,
        };

        let next = state.reduce(Action::Fetch);

        assert_eq!(
            next,
            RequestState {
                data: Some(7),
                loading: true,
                error: true,
            }
        );
    }

    #[test]
    fn success_replaces_whole_state() {
        let state = RequestState {
            data: Some(1),
            loading: true,
            error: true,
        };

        let next = state.reduce(Action::FetchSuccess(Some(2)));

        assert_eq!(
            next,
            RequestState {
                data: Some(2),
                loading: false,
                error: false,
            }
        );
    }

    #[test]
    fn null_success_clears_data() {
        let state = RequestState {
            data: Some(1),
            loading: true,
            error: true,
        };

        let next = state.reduce(Action::FetchSuccess(None));

        assert_eq!(next, RequestState::default());
    }

    #[test]
    fn error_preserves_data() {
        let mut state = RequestState {
            data: Some("listings"),
            loading: true,
            error: false,
        };

        state.apply(Action::FetchError);

        assert_eq!(state.data, Some("listings"));
        assert!(!state.loading);
        assert!(state.error);
    }

    #[test]
    fn default_is_idle() {
        let state: RequestState<u8> = RequestState::default();
        assert_eq!(state.data, None);
        assert!(!state.loading);
        assert!(!state.error);
    }
}
