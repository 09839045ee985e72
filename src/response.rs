use reqwest::RequestBuilder;
use serde::{de::DeserializeOwned, Serialize};

/// An outgoing request, read back as a [`Fetched`] status and body.
pub struct Request {
	builder: RequestBuilder,
}
impl std::fmt::Debug for Request {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.builder.fmt(f)
	}
}
impl From<RequestBuilder> for Request {
	fn from(builder: RequestBuilder) -> Self {
		Self { builder }
	}
}
impl Request {
	pub fn with_json<Q>(mut self, json: &Q) -> Self
	where
		Q: Serialize + ?Sized,
	{
		self.builder = self.builder.json(json);
		self
	}

	/// Sends the request and reads the whole body, whatever the status.
	pub async fn fetch(self) -> Result<Fetched, ResponseError> {
		let response = self.builder.send().await?;
		let status = response.status().as_u16();
		let text = response.text().await?;
		Ok(Fetched { status, text })
	}
}

/// A completed exchange: status and body text.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
	pub status: u16,
	pub text: String,
}
impl Fetched {
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	pub fn json<T: DeserializeOwned>(&self) -> Result<T, InvalidJson> {
		serde_json::from_str(&self.text).map_err(|err| InvalidJson(self.text.clone(), err.to_string()))
	}
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ResponseError {
	#[error("request failed: {0}")]
	Transport(String),
	#[error("server responded with status {status}")]
	Status { status: u16, body: String },
	#[error(transparent)]
	InvalidJson(#[from] InvalidJson),
}
impl From<reqwest::Error> for ResponseError {
	fn from(value: reqwest::Error) -> Self {
		Self::Transport(value.to_string())
	}
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub struct InvalidJson(pub String, pub String);
impl std::fmt::Display for InvalidJson {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Invalid json: {:?}\nError: {}", self.0, self.1)
	}
}
