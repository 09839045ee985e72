use crate::session::SessionHandle;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct AuthSwitchProps {
	#[prop_or_default]
	pub identified: Option<Html>,
	#[prop_or_default]
	pub anonymous: Option<Html>,
}

/// Renders `identified` while a credential is held, `anonymous` otherwise.
#[function_component]
pub fn AuthSwitch(props: &AuthSwitchProps) -> Html {
	let session = use_context::<SessionHandle>().expect("session context is provided by the app root");
	let branch = match session.is_logged_in() {
		true => &props.identified,
		false => &props.anonymous,
	};
	branch.clone().unwrap_or_default()
}
