use crate::{
	api::{graphql::FetchPolicy, queries::GetUser},
	hooks::use_query,
	session::{SessionAction, SessionHandle},
};
use yew::prelude::*;

/// Login of the signed-in account, as the engine resolves it.
#[function_component]
pub fn Identification() -> Html {
	let user = use_query::<GetUser>((), FetchPolicy::CacheFirst);
	let login = user
		.data
		.as_ref()
		.and_then(|list| list.user.first())
		.and_then(|identity| identity.login.clone());
	match login {
		Some(login) => html! {
			<span class="navbar-item">{"Signed in as "}<strong>{login}</strong></span>
		},
		None => html!(),
	}
}

#[function_component]
pub fn LogoutButton() -> Html {
	let session = use_context::<SessionHandle>().expect("session context is provided by the app root");
	let onclick = Callback::from(move |_: MouseEvent| session.dispatch(SessionAction::Logout));
	html! {
		<button class="button is-danger is-outlined" {onclick}>{"Sign Out"}</button>
	}
}
