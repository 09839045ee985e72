use crate::components::AuthSwitch;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod login;
pub mod profile;

#[derive(Debug, Clone, Copy, PartialEq, Routable)]
pub enum Route {
	#[at("/")]
	Profile,
	#[at("/login")]
	Login,
	#[not_found]
	#[at("/404")]
	NotFound,
}

impl Route {
	pub fn html(self) -> Html {
		match self {
			Self::Profile => html! {
				<AuthSwitch
					identified={html!(<profile::Page />)}
					anonymous={html!(<Redirect<Route> to={Route::Login} />)}
				/>
			},
			Self::Login => html! {
				<AuthSwitch
					identified={html!(<Redirect<Route> to={Route::Profile} />)}
					anonymous={html!(<login::Page />)}
				/>
			},
			Self::NotFound => html! {
				<section class="section">
					<h1 class="title">{"Not Found"}</h1>
					<Link<Route> to={Route::Profile}>{"Back to your profile"}</Link<Route>>
				</section>
			},
		}
	}
}
