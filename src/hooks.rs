use crate::{
	api::graphql::{FetchPolicy, GraphqlClient, Query, QueryFailure},
	session::SessionHandle,
};
use std::{cell::Cell, future::Future, pin::Pin};
use time::OffsetDateTime;
use yew::prelude::*;
use yew_hooks::{use_mount, UseAsyncState};

/// State of an async operation, plus a callback that starts it again.
pub struct AsyncHandle<T, E> {
	state: UseStateHandle<UseAsyncState<T, E>>,
	run: Callback<()>,
}
impl<T, E> AsyncHandle<T, E> {
	pub fn run(&self) {
		self.run.emit(());
	}

	/// [`run`](Self::run) as a click handler.
	pub fn reload_callback(&self) -> Callback<MouseEvent> {
		self.run.reform(|_| ())
	}
}
impl<T, E> std::ops::Deref for AsyncHandle<T, E> {
	type Target = UseAsyncState<T, E>;

	fn deref(&self) -> &Self::Target {
		&self.state
	}
}

type LocalFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>>>>;

/// Runs `make_future` on mount (when `run_first_mount`) and on every
/// [`AsyncHandle::run`]. Only the latest run may write its result.
#[hook]
pub fn use_async<F, T, E>(run_first_mount: bool, make_future: F) -> AsyncHandle<T, E>
where
	F: Fn() -> LocalFuture<T, E> + 'static,
	T: 'static,
	E: 'static,
{
	let state = use_state(|| UseAsyncState {
		loading: run_first_mount,
		data: None,
		error: None,
	});
	let latest = use_memo((), |_| Cell::new(0u64));
	let run = {
		let state = state.clone();
		let latest = latest.clone();
		Callback::from(move |()| {
			let ticket = latest.get().wrapping_add(1);
			latest.set(ticket);
			state.set(UseAsyncState {
				loading: true,
				data: None,
				error: None,
			});
			let state = state.clone();
			let latest = latest.clone();
			let future = make_future();
			wasm_bindgen_futures::spawn_local(async move {
				let result = future.await;
				if latest.get() != ticket {
					return;
				}
				let (data, error) = match result {
					Ok(data) => (Some(data), None),
					Err(err) => (None, Some(err)),
				};
				state.set(UseAsyncState {
					loading: false,
					data,
					error,
				});
			});
		})
	};
	use_mount({
		let run = run.clone();
		move || {
			if run_first_mount {
				run.emit(());
			}
		}
	});
	AsyncHandle { state, run }
}

/// Runs `Q` when the calling component mounts (and again on
/// [`AsyncHandle::run`]). A rejected credential is reported to the session,
/// which logs the user out.
#[hook]
pub fn use_query<Q>(variables: Q::Variables, policy: FetchPolicy) -> AsyncHandle<Q::Data, QueryFailure>
where
	Q: Query + 'static,
	Q::Variables: Clone + 'static,
	Q::Data: 'static,
{
	let client = use_context::<GraphqlClient>().expect("GraphqlClient context is provided by the app root");
	let session = use_context::<SessionHandle>().expect("session context is provided by the app root");
	use_async(true, move || {
		let client = client.clone();
		let session = session.clone();
		let variables = variables.clone();
		Box::pin(async move {
			let snapshot = (*session).clone();
			let outcome = client
				.execute::<Q>(&snapshot, &variables, policy, OffsetDateTime::now_utc())
				.await;
			if let Some(action) = outcome.session_action() {
				session.dispatch(action);
			}
			outcome.into_result()
		})
	})
}
