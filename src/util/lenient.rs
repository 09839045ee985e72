//! `deserialize_with` helpers that never fail.
//!
//! The platform's schema is not ours; a field with an unexpected shape should
//! blank that one field, not the whole response.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// A list, keeping only the items that parse. Anything but an array is empty.
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: DeserializeOwned,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::Array(items) => items
			.into_iter()
			.filter_map(|item| serde_json::from_value(item).ok())
			.collect(),
		_ => Vec::new(),
	})
}

/// A finite number; numeric strings are accepted.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
	D: Deserializer<'de>,
{
	let number = match Value::deserialize(deserializer)? {
		Value::Number(number) => number.as_f64(),
		Value::String(text) => text.trim().parse::<f64>().ok(),
		_ => None,
	};
	Ok(number.filter(|n| n.is_finite()))
}

/// A whole number; numeric strings and integral floats are accepted.
pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
	D: Deserializer<'de>,
{
	let as_whole = |n: f64| (n.is_finite() && n.fract() == 0.0).then_some(n as i64);
	Ok(match Value::deserialize(deserializer)? {
		Value::Number(number) => number.as_i64().or_else(|| number.as_f64().and_then(as_whole)),
		Value::String(text) => {
			let text = text.trim();
			text.parse::<i64>()
				.ok()
				.or_else(|| text.parse::<f64>().ok().and_then(as_whole))
		}
		_ => None,
	})
}

/// A string; anything else reads as absent.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::String(text) => Some(text),
		_ => None,
	})
}

/// An optional nested record; the wrong shape reads as absent.
pub fn record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
	D: Deserializer<'de>,
	T: DeserializeOwned,
{
	Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[derive(Deserialize, Debug, PartialEq)]
	struct Row {
		name: String,
	}

	#[derive(Deserialize, Debug)]
	struct Scalars {
		#[serde(default, deserialize_with = "integer")]
		id: Option<i64>,
		#[serde(default, deserialize_with = "text")]
		name: Option<String>,
	}

	fn scalars(value: serde_json::Value) -> Scalars {
		serde_json::from_value(value).unwrap()
	}

	#[derive(Deserialize, Debug)]
	struct Sample {
		#[serde(default, deserialize_with = "seq")]
		rows: Vec<Row>,
		#[serde(default, deserialize_with = "number")]
		amount: Option<f64>,
		#[serde(default, deserialize_with = "record")]
		nested: Option<Row>,
	}

	fn sample(value: serde_json::Value) -> Sample {
		serde_json::from_value(value).unwrap()
	}

	#[test]
	fn well_formed_values_pass_through() {
		let sample = sample(json!({ "rows": [{ "name": "a" }], "amount": 2.5, "nested": { "name": "n" } }));
		assert_eq!(sample.rows, vec![Row { name: "a".into() }]);
		assert_eq!(sample.amount, Some(2.5));
		assert_eq!(sample.nested, Some(Row { name: "n".into() }));
	}

	#[test]
	fn missing_and_null_fields_are_empty() {
		let sample = sample(json!({ "rows": null, "amount": null }));
		assert!(sample.rows.is_empty());
		assert_eq!(sample.amount, None);
		assert_eq!(sample.nested, None);
	}

	#[test]
	fn ill_typed_fields_degrade() {
		let sample = sample(json!({ "rows": { "name": "a" }, "amount": true, "nested": [1] }));
		assert!(sample.rows.is_empty());
		assert_eq!(sample.amount, None);
		assert_eq!(sample.nested, None);
	}

	#[test]
	fn bad_items_are_skipped() {
		let sample = sample(json!({ "rows": [{ "name": "a" }, { "name": 3 }, 7, { "name": "b" }] }));
		assert_eq!(sample.rows.len(), 2);
	}

	#[test]
	fn numeric_strings_are_numbers() {
		assert_eq!(sample(json!({ "amount": " 12 " })).amount, Some(12.0));
		assert_eq!(sample(json!({ "amount": "twelve" })).amount, None);
	}

	#[test]
	fn integers_from_numbers_and_strings() {
		assert_eq!(scalars(json!({ "id": 42 })).id, Some(42));
		assert_eq!(scalars(json!({ "id": "42" })).id, Some(42));
		assert_eq!(scalars(json!({ "id": 42.0 })).id, Some(42));
		assert_eq!(scalars(json!({ "id": 4.5 })).id, None);
		assert_eq!(scalars(json!({ "id": "x" })).id, None);
		assert_eq!(scalars(json!({ "id": [1] })).id, None);
		assert_eq!(scalars(json!({})).id, None);
	}

	#[test]
	fn text_only_from_strings() {
		assert_eq!(scalars(json!({ "name": "alice" })).name.as_deref(), Some("alice"));
		assert_eq!(scalars(json!({ "name": 1_700_000_000 })).name, None);
		assert_eq!(scalars(json!({ "name": null })).name, None);
	}
}
