use crate::{
	api::graphql::{QueryError, QueryFailure},
	hooks::AsyncHandle,
};
use yew::prelude::*;

/// Loading indicator, error notice with a reload button, or `render(data)`.
///
/// Each section of a page goes through this so that one failing query only
/// blanks its own section.
pub fn query_panel<T>(handle: &AsyncHandle<T, QueryFailure>, render: impl FnOnce(&T) -> Html) -> Html {
	if handle.loading {
		return html! {
			<progress class="progress is-small is-info" />
		};
	}
	match (&handle.data, &handle.error) {
		(Some(data), _) => render(data),
		// The session is ending; the page is about to be replaced.
		(None, Some(QueryFailure::Expired(_))) | (None, Some(QueryFailure::Query(QueryError::Discarded))) => {
			html!()
		}
		(None, Some(QueryFailure::Query(error))) => html! {
			<div class="notification is-danger is-light">
				<p>{format!("Could not load this section: {error}")}</p>
				<button class="button is-small" onclick={handle.reload_callback()}>{"Reload"}</button>
			</div>
		},
		(None, None) => html!(),
	}
}
