//! Reading the claims out of the platform's signed credential.
//!
//! The signature is never checked here; the GraphQL engine does that. The
//! client only needs to know who it is talking as and when to stop trying.

use base64::{
	alphabet,
	engine::{general_purpose::GeneralPurpose, DecodePaddingMode, GeneralPurposeConfig},
	Engine,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// JWT payloads are url-safe base64, usually without padding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
	&alphabet::URL_SAFE,
	GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);
impl std::fmt::Display for UserId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TokenError {
	#[error("credential does not have three segments")]
	Malformed,
	#[error("credential payload is not base64: {0}")]
	Encoding(String),
	#[error("credential payload is not a json object: {0}")]
	Payload(String),
	#[error("credential has no subject")]
	MissingSubject,
	#[error("credential subject {0:?} is not numeric")]
	InvalidSubject(String),
	#[error("credential has no usable expiry")]
	MissingExpiry,
}

/// A decoded credential. Holds the raw string so it can be attached to
/// requests unchanged.
#[derive(Clone, PartialEq)]
pub struct Credential {
	raw: String,
	subject: UserId,
	expires_at: OffsetDateTime,
	issued_at: Option<OffsetDateTime>,
}

impl std::fmt::Debug for Credential {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Credential")
			.field("token", &self.redacted())
			.field("subject", &self.subject)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

#[derive(Deserialize)]
struct Payload {
	sub: Option<serde_json::Value>,
	exp: Option<serde_json::Value>,
	iat: Option<serde_json::Value>,
}

impl Credential {
	pub fn parse(raw: impl Into<String>) -> Result<Self, TokenError> {
		let raw = raw.into();
		let mut segments = raw.split('.');
		let (Some(_header), Some(payload), Some(_signature), None) =
			(segments.next(), segments.next(), segments.next(), segments.next())
		else {
			return Err(TokenError::Malformed);
		};
		// Tolerate the standard alphabet as well.
		let payload = payload.replace('+', "-").replace('/', "_");
		let bytes = PAYLOAD_ENGINE
			.decode(payload.as_bytes())
			.map_err(|err| TokenError::Encoding(err.to_string()))?;
		let payload: Payload =
			serde_json::from_slice(&bytes).map_err(|err| TokenError::Payload(err.to_string()))?;

		let subject = parse_subject(payload.sub)?;
		let expires_at = payload
			.exp
			.as_ref()
			.and_then(parse_instant)
			.ok_or(TokenError::MissingExpiry)?;
		let issued_at = payload.iat.as_ref().and_then(parse_instant);

		Ok(Self {
			raw,
			subject,
			expires_at,
			issued_at,
		})
	}

	pub fn as_str(&self) -> &str {
		&self.raw
	}

	pub fn subject(&self) -> UserId {
		self.subject
	}

	pub fn expires_at(&self) -> OffsetDateTime {
		self.expires_at
	}

	pub fn issued_at(&self) -> Option<OffsetDateTime> {
		self.issued_at
	}

	/// A credential stops being usable at its expiry instant.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		now >= self.expires_at
	}

	/// Enough of the token to correlate log lines.
	pub fn redacted(&self) -> String {
		let prefix: String = self.raw.chars().take(12).collect();
		format!("{prefix}…")
	}
}

fn parse_subject(value: Option<serde_json::Value>) -> Result<UserId, TokenError> {
	use serde_json::Value;
	match value {
		None | Some(Value::Null) => Err(TokenError::MissingSubject),
		Some(Value::String(text)) => match text.trim().parse::<i64>() {
			Ok(id) => Ok(UserId(id)),
			Err(_) => Err(TokenError::InvalidSubject(text)),
		},
		Some(Value::Number(number)) => number
			.as_i64()
			.map(UserId)
			.ok_or_else(|| TokenError::InvalidSubject(number.to_string())),
		Some(other) => Err(TokenError::InvalidSubject(other.to_string())),
	}
}

fn parse_instant(value: &serde_json::Value) -> Option<OffsetDateTime> {
	let seconds = match value {
		serde_json::Value::Number(number) => match number.as_i64() {
			Some(seconds) => seconds,
			None => number.as_f64().filter(|s| s.is_finite())?.floor() as i64,
		},
		serde_json::Value::String(text) => {
			let text = text.trim();
			match text.parse::<i64>() {
				Ok(seconds) => seconds,
				Err(_) => text.parse::<f64>().ok().filter(|s| s.is_finite())?.floor() as i64,
			}
		}
		_ => return None,
	};
	OffsetDateTime::from_unix_timestamp(seconds).ok()
}

#[cfg(test)]
pub(crate) mod testing {
	use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

	/// Builds an unsigned token with the given payload.
	pub fn token_with(payload: serde_json::Value) -> String {
		let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
		let payload = URL_SAFE_NO_PAD.encode(payload.to_string());
		format!("{header}.{payload}.c2lnbmF0dXJl")
	}

	pub fn token_for(sub: i64, exp: i64) -> String {
		token_with(serde_json::json!({ "sub": sub.to_string(), "exp": exp, "iat": exp - 3600 }))
	}
}

#[cfg(test)]
mod tests {
	use super::{testing::*, *};
	use serde_json::json;

	fn at(seconds: i64) -> OffsetDateTime {
		OffsetDateTime::from_unix_timestamp(seconds).unwrap()
	}

	#[test]
	fn decodes_string_subject_and_expiry() {
		let credential = Credential::parse(token_for(42, 1_700_000_000)).unwrap();
		assert_eq!(credential.subject(), UserId(42));
		assert_eq!(credential.expires_at(), at(1_700_000_000));
		assert_eq!(credential.issued_at(), Some(at(1_699_996_400)));
	}

	#[test]
	fn decodes_numeric_subject() {
		let credential = Credential::parse(token_with(json!({ "sub": 7, "exp": 10 }))).unwrap();
		assert_eq!(credential.subject(), UserId(7));
	}

	#[test]
	fn expiry_boundary_is_exclusive() {
		let credential = Credential::parse(token_for(1, 1_000)).unwrap();
		assert!(!credential.is_expired_at(at(999)));
		assert!(credential.is_expired_at(at(1_000)));
		assert!(credential.is_expired_at(at(1_001)));
	}

	#[test]
	fn missing_subject_never_yields_an_id() {
		let result = Credential::parse(token_with(json!({ "exp": 10 })));
		assert_eq!(result, Err(TokenError::MissingSubject));
		let result = Credential::parse(token_with(json!({ "sub": null, "exp": 10 })));
		assert_eq!(result, Err(TokenError::MissingSubject));
	}

	#[test]
	fn non_numeric_subject_is_rejected() {
		let result = Credential::parse(token_with(json!({ "sub": "abc", "exp": 10 })));
		assert_eq!(result, Err(TokenError::InvalidSubject("abc".into())));
		let result = Credential::parse(token_with(json!({ "sub": [1], "exp": 10 })));
		assert!(matches!(result, Err(TokenError::InvalidSubject(_))));
	}

	#[test]
	fn missing_expiry_is_rejected() {
		let result = Credential::parse(token_with(json!({ "sub": "1" })));
		assert_eq!(result, Err(TokenError::MissingExpiry));
	}

	#[test]
	fn numeric_string_expiry_is_accepted() {
		let credential = Credential::parse(token_with(json!({ "sub": "42", "exp": "4102444800" }))).unwrap();
		assert_eq!(credential.expires_at(), at(4_102_444_800));
		let credential = Credential::parse(token_with(json!({ "sub": "42", "exp": " 1500.9 " }))).unwrap();
		assert_eq!(credential.expires_at(), at(1_500));
		let result = Credential::parse(token_with(json!({ "sub": "42", "exp": "soon" })));
		assert_eq!(result, Err(TokenError::MissingExpiry));
	}

	#[test]
	fn structural_errors() {
		assert_eq!(Credential::parse("only.two"), Err(TokenError::Malformed));
		assert_eq!(Credential::parse("a.b.c.d"), Err(TokenError::Malformed));
		assert!(matches!(Credential::parse("a.!!!.c"), Err(TokenError::Encoding(_))));
		let not_json = format!("a.{}.c", base64::engine::general_purpose::URL_SAFE_NO_PAD.encode("nope"));
		assert!(matches!(Credential::parse(not_json), Err(TokenError::Payload(_))));
	}

	#[test]
	fn padded_payload_is_accepted() {
		let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"sub":"5","exp":20}"#);
		let credential = Credential::parse(format!("h.{payload}.s")).unwrap();
		assert_eq!(credential.subject(), UserId(5));
	}

	#[test]
	fn debug_output_hides_the_token() {
		let raw = token_for(42, 10);
		let credential = Credential::parse(raw.clone()).unwrap();
		assert!(!format!("{credential:?}").contains(&raw));
	}
}
