use crate::{
	api::auth::{sign_in, AuthError, SignIn},
	config::Config,
	session::{SessionAction, SessionHandle},
};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[function_component]
pub fn Page() -> Html {
	let config = use_context::<Config>().expect("Config context is provided by the app root");
	let session = use_context::<SessionHandle>().expect("session context is provided by the app root");
	let form = use_state(SignIn::default);
	let pending = use_state_eq(|| false);
	let error = use_state(|| None::<AuthError>);

	let on_username = {
		let form = form.clone();
		Callback::from(move |event: InputEvent| {
			let input: HtmlInputElement = event.target_unchecked_into();
			form.set(SignIn {
				username: input.value(),
				..(*form).clone()
			});
		})
	};
	let on_password = {
		let form = form.clone();
		Callback::from(move |event: InputEvent| {
			let input: HtmlInputElement = event.target_unchecked_into();
			form.set(SignIn {
				password: input.value(),
				..(*form).clone()
			});
		})
	};

	let onsubmit = {
		let session = session.clone();
		let form = form.clone();
		let pending = pending.clone();
		let error = error.clone();
		Callback::from(move |event: SubmitEvent| {
			event.prevent_default();
			if *pending {
				return;
			}
			pending.set(true);
			error.set(None);
			let request = (*form).clone();
			let config = config.clone();
			let session = session.clone();
			let pending = pending.clone();
			let error = error.clone();
			crate::util::spawn_local("auth", async move {
				let result = sign_in(&config, &request).await;
				pending.set(false);
				if let Err(err) = &result {
					error.set(Some(err.clone()));
				}
				session.dispatch(SessionAction::SignedIn(result?));
				Ok::<(), AuthError>(())
			});
		})
	};

	let notice = match (&*error, session.last_exit()) {
		(Some(err), _) => Some(("is-danger", err.to_string())),
		(None, Some(reason)) => Some(("is-warning", reason.to_string())),
		(None, None) => None,
	};

	html! {
		<section class="section">
			<div class="container" style="max-width: 420px;">
				<h1 class="title">{"Sign In"}</h1>
				{notice.map(|(class, message)| html! {
					<div class={classes!("notification", "is-light", class)}>{message}</div>
				})}
				<form {onsubmit}>
					<div class="field">
						<label class="label" for="username">{"Username or email"}</label>
						<div class="control">
							<input id="username" class="input" type="text" autocomplete="username" required=true
								value={form.username.clone()} oninput={on_username} />
						</div>
					</div>
					<div class="field">
						<label class="label" for="password">{"Password"}</label>
						<div class="control">
							<input id="password" class="input" type="password" autocomplete="current-password" required=true
								value={form.password.clone()} oninput={on_password} />
						</div>
					</div>
					<button class={classes!("button", "is-primary", pending.then_some("is-loading"))} type="submit" disabled={*pending}>
						{"Sign In"}
					</button>
				</form>
			</div>
		</section>
	}
}
