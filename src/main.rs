use yew::prelude::*;
use yew_hooks::use_mount;
use yew_router::prelude::*;

pub mod api;
pub mod components;
pub mod config;
pub mod data;
pub mod hooks;
pub mod page;
pub mod response;
pub mod session;
pub mod storage;
pub mod token;
pub mod util;

#[cfg(target_family = "wasm")]
fn main() {
	wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
	yew::Renderer::<App>::new().render();
}

#[cfg(not(target_family = "wasm"))]
fn main() {
	let _ = simplelog::SimpleLogger::init(log::LevelFilter::Info, simplelog::Config::default());
	log::warn!(target: "app", "the dashboard runs in the browser; build it for wasm32 and serve it with trunk");
}

#[cfg_attr(not(target_family = "wasm"), allow(dead_code))]
#[function_component]
fn App() -> Html {
	let config = use_state(config::Config::default);
	let client = use_state({
		let config = config.clone();
		move || api::graphql::GraphqlClient::new(&config)
	});
	use_mount({
		let config = config.clone();
		move || {
			if let Err(err) = config.validate() {
				log::error!(target: "app", "{err}");
			}
		}
	});
	let basename = AttrValue::from(config.base_path.clone());
	html! {
		<ContextProvider<config::Config> context={(*config).clone()}>
			<ContextProvider<api::graphql::GraphqlClient> context={(*client).clone()}>
				<session::Provider>
					<BrowserRouter {basename}>
						<Switch<page::Route> render={page::Route::html} />
					</BrowserRouter>
				</session::Provider>
			</ContextProvider<api::graphql::GraphqlClient>>
		</ContextProvider<config::Config>>
	}
}
