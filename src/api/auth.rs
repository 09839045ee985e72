//! Exchanging a username and password for a credential.

use crate::{
	config::Config,
	response::{Fetched, Request},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignIn {
	/// Login name or email.
	pub username: String,
	pub password: String,
}

impl SignIn {
	pub fn basic_authorization(&self) -> String {
		let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
		format!("Basic {encoded}")
	}
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AuthError {
	#[error("Invalid credentials: {message}")]
	AuthenticationFailed { status: u16, message: String },
	#[error("Could not reach the sign-in service: {0}")]
	Transport(String),
}

#[derive(Deserialize)]
struct SignInFailure {
	error: Option<String>,
}

/// Requests a credential. Returns the unquoted credential string.
pub async fn sign_in(config: &Config, request: &SignIn) -> Result<String, AuthError> {
	log::debug!(target: "auth", "signing in as {:?}", request.username);
	let builder = reqwest::Client::new()
		.post(&config.signin_url)
		.header(AUTHORIZATION, request.basic_authorization());
	let fetched = Request::from(builder)
		.fetch()
		.await
		.map_err(|err| AuthError::Transport(err.to_string()))?;
	classify(fetched)
}

/// Maps the sign-in response to a credential string or the reason it was
/// refused.
pub fn classify(fetched: Fetched) -> Result<String, AuthError> {
	if !fetched.is_success() {
		let message = fetched
			.json::<SignInFailure>()
			.ok()
			.and_then(|failure| failure.error)
			.unwrap_or_else(|| format!("sign-in was refused (status {})", fetched.status));
		log::warn!(target: "auth", "sign-in failed with status {}", fetched.status);
		return Err(AuthError::AuthenticationFailed {
			status: fetched.status,
			message,
		});
	}
	Ok(unquote(&fetched.text))
}

/// The endpoint answers with the token as a json string literal.
pub fn unquote(body: &str) -> String {
	let body = body.trim();
	match serde_json::from_str::<String>(body) {
		Ok(token) => token,
		Err(_) => {
			let body = body.strip_prefix('"').unwrap_or(body);
			body.strip_suffix('"').unwrap_or(body).to_owned()
		}
	}
}
