/// Where the school platform lives. Overridable at build time so a dev build
/// can point at a proxy (`PROFILE_SIGNIN_URL=... trunk serve`).
static SIGNIN_URL: &str = match option_env!("PROFILE_SIGNIN_URL") {
	Some(url) => url,
	None => "https://learn.reboot01.com/api/auth/signin",
};
static GRAPHQL_URL: &str = match option_env!("PROFILE_GRAPHQL_URL") {
	Some(url) => url,
	None => "https://learn.reboot01.com/api/graphql-engine/v1/graphql",
};
static BASE_PATH: &str = match option_env!("PROFILE_BASE_PATH") {
	Some(path) => path,
	None => "/graphql/",
};

/// Key of the persisted credential slot.
pub static CREDENTIAL_KEY: &str = "jwt_token";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
	pub signin_url: String,
	pub graphql_url: String,
	pub base_path: String,
	pub credential_key: &'static str,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			signin_url: SIGNIN_URL.to_owned(),
			graphql_url: GRAPHQL_URL.to_owned(),
			base_path: BASE_PATH.to_owned(),
			credential_key: CREDENTIAL_KEY,
		}
	}
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
	#[error("{name} is not a valid url: {reason}")]
	InvalidUrl { name: &'static str, reason: String },
}

impl Config {
	/// Checks that both endpoints parse as absolute urls.
	pub fn validate(&self) -> Result<(), ConfigError> {
		for (name, value) in [("signin_url", &self.signin_url), ("graphql_url", &self.graphql_url)] {
			url::Url::parse(value).map_err(|err| ConfigError::InvalidUrl {
				name,
				reason: err.to_string(),
			})?;
		}
		Ok(())
	}
}
