//! The server response shape shared by all listing endpoints.

use crate::Error;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// One pagination link descriptor as the server reports it.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PageLink {
	#[serde(default)]
	pub label: String,
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub active: bool,
}

/// Pagination metadata. Absent fields degrade to a single page.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PageMeta {
	#[serde(default = "first_page")]
	pub current_page: u32,
	#[serde(default = "first_page")]
	pub last_page: u32,
	#[serde(default)]
	pub links: Vec<PageLink>,
}

fn first_page() -> u32 {
	1
}

/// A decoded response: records, optional pagination metadata, and an optional
/// whole-batch pre-rendered HTML override.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
	pub records: Vec<Value>,
	pub meta: Option<PageMeta>,
	pub html: Option<String>,
}

/// Decodes a response body into an [`Envelope`].
///
/// A body that is not JSON at all is an [`Error::Malformed`]; a JSON body
/// missing the configured keys degrades to empty defaults instead.
pub fn parse_envelope(body: &str, data_key: &str, meta_key: &str) -> Result<Envelope, Error> {
	let value: Value = serde_json::from_str(body).map_err(|error| Error::Malformed(error.to_string()))?;

	let records = value
		.get(data_key)
		.and_then(Value::as_array)
		.cloned()
		.unwrap_or_default();

	let meta = value.get(meta_key).cloned().and_then(|meta| match serde_json::from_value::<PageMeta>(meta) {
		Ok(meta) => Some(meta),
		Err(error) => {
			warn!("Ignoring unusable `{}` metadata: {}", meta_key, error);
			None
		}
	});

	let html = value.get("html").and_then(Value::as_str).map(str::to_owned);

	Ok(Envelope { records, meta, html })
}

/// The per-record pre-rendered HTML field, which short-circuits templating.
#[must_use]
pub fn record_html(record: &Value) -> Option<&str> {
	record.get("html").and_then(Value::as_str)
}

/// Extracts a server-supplied `message` field from a (possibly error)
/// response body.
#[must_use]
pub fn server_message(body: &str) -> Option<String> {
	serde_json::from_str::<Value>(body)
		.ok()?
		.get("message")?
		.as_str()
		.map(str::to_owned)
}
