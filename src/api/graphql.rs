//! Talking to the platform's GraphQL engine.
//!
//! Every request carries the session's credential. Results are classified
//! into [`QueryOutcome`] so that a rejected credential is handled in exactly
//! one place (the session) instead of by every view.

use super::cache::QueryCache;
use crate::{
	config::Config,
	response::{Fetched, InvalidJson, Request, ResponseError},
	session::{ExpiryReason, Session, SessionAction},
	token::Credential,
};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use time::OffsetDateTime;

pub trait Query {
	const NAME: &'static str;
	const DOCUMENT: &'static str;
	type Variables: Serialize;
	type Data: DeserializeOwned;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
	/// Answer from the cache when possible.
	CacheFirst,
	/// Always ask the server; the answer still refreshes the cache.
	NetworkOnly,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum QueryError {
	#[error(transparent)]
	Response(#[from] ResponseError),
	#[error("{}", .0.join("; "))]
	Graphql(Vec<String>),
	#[error("the response did not contain any data")]
	MissingData,
	#[error("could not encode query variables: {0}")]
	Variables(String),
	#[error("the session changed before the response arrived")]
	Discarded,
}
impl From<InvalidJson> for QueryError {
	fn from(value: InvalidJson) -> Self {
		Self::Response(value.into())
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome<T> {
	Data(T),
	AuthExpired(ExpiryReason),
	Failed(QueryError),
}
impl<T> QueryOutcome<T> {
	/// What the session has to do about this outcome, if anything.
	pub fn session_action(&self) -> Option<SessionAction> {
		match self {
			Self::AuthExpired(reason) => Some(SessionAction::Expired(reason.clone())),
			_ => None,
		}
	}

	pub fn into_result(self) -> Result<T, QueryFailure> {
		match self {
			Self::Data(data) => Ok(data),
			Self::AuthExpired(reason) => Err(QueryFailure::Expired(reason)),
			Self::Failed(error) => Err(QueryFailure::Query(error)),
		}
	}
}

/// The error half of an outcome, for views that only need something to show.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum QueryFailure {
	#[error(transparent)]
	Expired(ExpiryReason),
	#[error(transparent)]
	Query(QueryError),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestBody<'a, V> {
	query: &'a str,
	variables: &'a V,
	operation_name: &'a str,
}

/// A request ready to go out; kept as plain data until it is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
	pub url: String,
	pub authorization: Option<String>,
	pub body: serde_json::Value,
}
impl PreparedQuery {
	pub async fn send(self, http: &reqwest::Client) -> Result<Fetched, ResponseError> {
		let mut builder = http.post(&self.url).header(ACCEPT, "application/json");
		if let Some(authorization) = &self.authorization {
			builder = builder.header(AUTHORIZATION, authorization);
		}
		Request::from(builder).with_json(&self.body).fetch().await
	}
}

#[derive(Deserialize)]
struct Envelope {
	data: Option<serde_json::Value>,
	#[serde(default)]
	errors: Vec<GraphqlError>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GraphqlError {
	pub message: String,
	#[serde(default)]
	pub extensions: Option<ErrorExtensions>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorExtensions {
	pub code: Option<String>,
}

impl GraphqlError {
	/// Hasura reports bad or stale tokens as `invalid-jwt`, with messages like
	/// `Could not verify JWT: JWTExpired`.
	pub fn is_expiry_signal(&self) -> bool {
		let code = self.extensions.as_ref().and_then(|ext| ext.code.as_deref());
		if matches!(code, Some("invalid-jwt" | "jwt-invalid-claims")) {
			return true;
		}
		self.message.contains("JWT") && self.message.to_lowercase().contains("expired")
	}
}

#[derive(Debug, Clone)]
pub struct GraphqlClient {
	endpoint: String,
	http: reqwest::Client,
}
impl PartialEq for GraphqlClient {
	fn eq(&self, other: &Self) -> bool {
		self.endpoint == other.endpoint
	}
}

impl GraphqlClient {
	pub fn new(config: &Config) -> Self {
		Self {
			endpoint: config.graphql_url.clone(),
			http: reqwest::Client::new(),
		}
	}

	pub fn prepare<Q: Query>(
		&self,
		credential: Option<&Credential>,
		variables: &Q::Variables,
	) -> Result<PreparedQuery, QueryError> {
		let body = serde_json::to_value(RequestBody {
			query: Q::DOCUMENT,
			variables,
			operation_name: Q::NAME,
		})
		.map_err(|err| QueryError::Variables(err.to_string()))?;
		Ok(PreparedQuery {
			url: self.endpoint.clone(),
			authorization: credential.map(|credential| format!("Bearer {}", credential.as_str())),
			body,
		})
	}

	pub async fn execute<Q: Query>(
		&self,
		session: &Session,
		variables: &Q::Variables,
		policy: FetchPolicy,
		now: OffsetDateTime,
	) -> QueryOutcome<Q::Data> {
		let credential = session.credential();
		if let Some(credential) = credential {
			if credential.is_expired_at(now) {
				log::info!(target: "graphql", "not sending {}: credential expired", Q::NAME);
				return QueryOutcome::AuthExpired(ExpiryReason::LocalExpiry);
			}
		}

		let cache = session.cache();
		let key = match cache_key::<Q>(variables) {
			Ok(key) => key,
			Err(err) => return QueryOutcome::Failed(err),
		};
		if policy == FetchPolicy::CacheFirst {
			if let Some(data) = cache.get(&key).and_then(|value| serde_json::from_value(value).ok()) {
				log::debug!(target: "graphql", "{key} answered from cache");
				return QueryOutcome::Data(data);
			}
		}

		let generation = cache.generation();
		let prepared = match self.prepare::<Q>(credential, variables) {
			Ok(prepared) => prepared,
			Err(err) => return QueryOutcome::Failed(err),
		};
		log::debug!(target: "graphql", "sending {}", Q::NAME);
		let fetched = match prepared.send(&self.http).await {
			Ok(fetched) => fetched,
			Err(err) => {
				log::error!(target: "graphql", "{} failed: {err}", Q::NAME);
				return QueryOutcome::Failed(err.into());
			}
		};
		settle::<Q>(cache, generation, key, fetched)
	}
}

/// Turns a response into the query's outcome, caching the data only if the
/// cache is still in the generation the request started in.
fn settle<Q: Query>(cache: &QueryCache, generation: u64, key: String, fetched: Fetched) -> QueryOutcome<Q::Data> {
	if cache.generation() != generation {
		log::debug!(target: "graphql", "discarding {}: the session changed", Q::NAME);
		return QueryOutcome::Failed(QueryError::Discarded);
	}
	match interpret(&fetched) {
		QueryOutcome::Data(value) => match serde_json::from_value::<Q::Data>(value.clone()) {
			Ok(data) => {
				cache.insert(generation, key, value);
				QueryOutcome::Data(data)
			}
			Err(err) => QueryOutcome::Failed(InvalidJson(fetched.text, err.to_string()).into()),
		},
		QueryOutcome::AuthExpired(reason) => QueryOutcome::AuthExpired(reason),
		QueryOutcome::Failed(err) => {
			log::error!(target: "graphql", "{} failed: {err}", Q::NAME);
			QueryOutcome::Failed(err)
		}
	}
}

fn cache_key<Q: Query>(variables: &Q::Variables) -> Result<String, QueryError> {
	let variables = serde_json::to_string(variables).map_err(|err| QueryError::Variables(err.to_string()))?;
	Ok(format!("{}:{variables}", Q::NAME))
}

/// Classifies a raw response. The engine answers 200 with an `errors` list
/// for most failures, so the body is inspected before the status.
pub fn interpret(fetched: &Fetched) -> QueryOutcome<serde_json::Value> {
	let envelope = match fetched.json::<Envelope>() {
		Ok(envelope) => envelope,
		Err(err) if fetched.status == 401 => {
			return QueryOutcome::AuthExpired(ExpiryReason::ServerRejected(err.0));
		}
		Err(_) if !fetched.is_success() => {
			return QueryOutcome::Failed(QueryError::Response(ResponseError::Status {
				status: fetched.status,
				body: fetched.text.clone(),
			}));
		}
		Err(err) => return QueryOutcome::Failed(err.into()),
	};

	if let Some(error) = envelope.errors.iter().find(|error| error.is_expiry_signal()) {
		return QueryOutcome::AuthExpired(ExpiryReason::ServerRejected(error.message.clone()));
	}
	if fetched.status == 401 {
		return QueryOutcome::AuthExpired(ExpiryReason::ServerRejected("unauthorized".into()));
	}
	if !envelope.errors.is_empty() {
		let messages = envelope.errors.into_iter().map(|error| error.message).collect();
		return QueryOutcome::Failed(QueryError::Graphql(messages));
	}
	if !fetched.is_success() {
		return QueryOutcome::Failed(QueryError::Response(ResponseError::Status {
			status: fetched.status,
			body: fetched.text.clone(),
		}));
	}
	match envelope.data {
		Some(data) if !data.is_null() => QueryOutcome::Data(data),
		_ => QueryOutcome::Failed(QueryError::MissingData),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		api::{
			cache::QueryCache,
			queries::{GetUser, GetUserProfile, UserVariables},
		},
		storage::{CredentialSlot, MemorySlot},
		token::{testing::token_for, UserId},
	};
	use futures_util::FutureExt;
	use serde_json::json;
	use std::rc::Rc;

	const NOW: i64 = 1_700_000_000;

	fn at(seconds: i64) -> OffsetDateTime {
		OffsetDateTime::from_unix_timestamp(seconds).unwrap()
	}

	fn client() -> GraphqlClient {
		GraphqlClient::new(&Config::default())
	}

	fn fetched(status: u16, body: serde_json::Value) -> Fetched {
		Fetched {
			status,
			text: body.to_string(),
		}
	}

	#[test]
	fn profile_query_carries_subject_and_bearer() {
		let token = token_for(42, NOW + 600);
		let session = Session::init(Rc::new(MemorySlot::with(token.clone())), QueryCache::default(), at(NOW));
		let variables = UserVariables {
			user_id: session.user_id().unwrap(),
		};
		let prepared = client().prepare::<GetUserProfile>(session.credential(), &variables).unwrap();
		assert_eq!(prepared.authorization, Some(format!("Bearer {token}")));
		assert_eq!(prepared.body["variables"], json!({ "userId": 42 }));
		assert_eq!(prepared.body["operationName"], json!("GetUserProfile"));
		assert!(prepared.body["query"].as_str().unwrap().contains("query GetUserProfile($userId: Int!)"));
		assert_eq!(prepared.url, Config::default().graphql_url);
	}

	#[test]
	fn no_credential_means_no_authorization_header() {
		let prepared = client().prepare::<GetUser>(None, &()).unwrap();
		assert_eq!(prepared.authorization, None);
		assert_eq!(prepared.body["variables"], json!(null));
	}

	#[test]
	fn expired_credential_is_never_sent() {
		let slot = MemorySlot::with(token_for(42, NOW + 10));
		let mut session = Session::init(Rc::new(slot.clone()), QueryCache::default(), at(NOW));
		let variables = UserVariables { user_id: UserId(42) };
		let outcome = client()
			.execute::<GetUserProfile>(&session, &variables, FetchPolicy::NetworkOnly, at(NOW + 10))
			.now_or_never()
			.expect("pre-flight check must not wait on the network");
		assert_eq!(outcome, QueryOutcome::AuthExpired(ExpiryReason::LocalExpiry));

		let action = outcome.session_action().unwrap();
		session.transition(action, at(NOW + 10));
		assert!(!session.is_logged_in());
		assert_eq!(slot.load(), None);
	}

	#[test]
	fn cache_first_answers_without_the_network() {
		let session = Session::init(
			Rc::new(MemorySlot::with(token_for(42, NOW + 600))),
			QueryCache::default(),
			at(NOW),
		);
		let cached = json!({ "user": [{ "id": 42, "login": "alice" }] });
		session.cache().insert(session.cache().generation(), "GetUser:null".into(), cached);
		let outcome = client()
			.execute::<GetUser>(&session, &(), FetchPolicy::CacheFirst, at(NOW))
			.now_or_never()
			.expect("cache hit must not wait on the network");
		let QueryOutcome::Data(data) = outcome else {
			panic!("expected cached data, got {outcome:?}");
		};
		assert_eq!(data.user[0].login.as_deref(), Some("alice"));
	}

	#[test]
	fn response_after_logout_is_discarded() {
		let cache = QueryCache::default();
		let started = cache.generation();
		cache.clear();
		let response = fetched(200, json!({ "data": { "user": [{ "id": 1, "login": "alice" }] } }));
		let outcome = settle::<GetUser>(&cache, started, "GetUser:null".into(), response);
		assert_eq!(outcome, QueryOutcome::Failed(QueryError::Discarded));
		assert!(cache.is_empty());
	}

	#[test]
	fn response_in_the_same_session_is_cached() {
		let cache = QueryCache::default();
		let response = fetched(200, json!({ "data": { "user": [{ "id": 1, "login": "alice" }] } }));
		let outcome = settle::<GetUser>(&cache, cache.generation(), "GetUser:null".into(), response);
		assert!(matches!(outcome, QueryOutcome::Data(_)));
		assert_eq!(cache.get("GetUser:null"), Some(json!({ "user": [{ "id": 1, "login": "alice" }] })));
	}

	#[test]
	fn expiry_message_is_an_expiry() {
		let outcome = interpret(&fetched(
			200,
			json!({ "errors": [{ "message": "Could not verify JWT: JWTExpired", "extensions": { "code": "invalid-jwt", "path": "$" } }] }),
		));
		assert_eq!(
			outcome,
			QueryOutcome::AuthExpired(ExpiryReason::ServerRejected("Could not verify JWT: JWTExpired".into()))
		);
		let outcome = interpret(&fetched(200, json!({ "errors": [{ "message": "JWT token expired" }] })));
		assert!(matches!(outcome, QueryOutcome::AuthExpired(_)));
	}

	#[test]
	fn other_graphql_errors_are_failures() {
		let outcome = interpret(&fetched(
			200,
			json!({ "errors": [{ "message": "field 'nope' not found", "extensions": { "code": "validation-failed" } }] }),
		));
		assert_eq!(
			outcome,
			QueryOutcome::Failed(QueryError::Graphql(vec!["field 'nope' not found".into()]))
		);
		assert_eq!(outcome.session_action(), None);
	}

	#[test]
	fn unauthorized_status_is_an_expiry() {
		let outcome = interpret(&Fetched {
			status: 401,
			text: "Unauthorized".into(),
		});
		assert!(matches!(outcome, QueryOutcome::AuthExpired(_)));
	}

	#[test]
	fn server_errors_and_garbage_are_failures() {
		let outcome = interpret(&Fetched {
			status: 502,
			text: "<html>bad gateway</html>".into(),
		});
		assert!(matches!(
			outcome,
			QueryOutcome::Failed(QueryError::Response(ResponseError::Status { status: 502, .. }))
		));
		let outcome = interpret(&Fetched {
			status: 200,
			text: "<html>".into(),
		});
		assert!(matches!(
			outcome,
			QueryOutcome::Failed(QueryError::Response(ResponseError::InvalidJson(_)))
		));
	}

	#[test]
	fn data_is_passed_through() {
		assert_eq!(
			interpret(&fetched(200, json!({ "data": { "user": [] } }))),
			QueryOutcome::Data(json!({ "user": [] }))
		);
		assert_eq!(
			interpret(&fetched(200, json!({ "data": null }))),
			QueryOutcome::Failed(QueryError::MissingData)
		);
	}
}
