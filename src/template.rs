//! Placeholder substitution, kept free of any document handle so it can be
//! exercised without a browser.
//!
//! Placeholders have the form `data.<field>` or `data.<parent>.<child>`.
//! Missing values, and paths whose intermediate segments do not resolve to an
//! object, substitute to the empty string rather than failing.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

static PLACEHOLDER: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"data\.([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)").expect("placeholder pattern is valid"));

/// Substitutes every `data.<path>` placeholder in `template` with the
/// corresponding scalar value of `record`.
#[must_use]
pub fn substitute(template: &str, record: &Value) -> String {
	PLACEHOLDER
		.replace_all(template, |captures: &Captures<'_>| resolve_path(record, &captures[1]))
		.into_owned()
}

fn resolve_path(record: &Value, path: &str) -> String {
	let mut current = record;
	for segment in path.split('.') {
		match current.get(segment) {
			Some(value) => current = value,
			None => return String::new(),
		}
	}
	scalar_text(current)
}

fn scalar_text(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		Value::Number(number) => number.to_string(),
		Value::Bool(flag) => flag.to_string(),
		// Containers and null have no inline representation.
		Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::substitute;
	use serde_json::json;

	#[test]
	fn substitutes_flat_fields() {
		let record = json!({"name": "Ann", "age": 34});
		assert_eq!(substitute("<div>data.name (data.age)</div>", &record), "<div>Ann (34)</div>");
	}

	#[test]
	fn substitutes_nested_paths() {
		let record = json!({"user": {"address": {"city": "Oslo"}}});
		assert_eq!(substitute("data.user.address.city", &record), "Oslo");
	}

	#[test]
	fn missing_field_becomes_empty_string() {
		let record = json!({"name": "Ann"});
		assert_eq!(substitute("<b>data.missing</b>", &record), "<b></b>");
	}

	#[test]
	fn unresolved_intermediate_segment_short_circuits() {
		let record = json!({"user": "not an object"});
		assert_eq!(substitute("data.user.name", &record), "");
	}

	#[test]
	fn containers_render_as_nothing() {
		let record = json!({"tags": ["a", "b"], "meta": {"k": 1}, "gone": null});
		assert_eq!(substitute("data.tags|data.meta|data.gone", &record), "||");
	}

	#[test]
	fn bool_and_number_render_inline() {
		let record = json!({"active": true, "score": 1.5});
		assert_eq!(substitute("data.active/data.score", &record), "true/1.5");
	}
}
