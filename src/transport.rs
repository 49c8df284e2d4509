//! Pluggable HTTP backends.
//!
//! Widgets never reach for an ambient client; each receives an explicit
//! [`Transport`] object. Two backends are provided: the browser's native
//! [***fetch***](https://developer.mozilla.org/en-US/docs/Web/API/fetch) API,
//! and a [`reqwest`]-based client for callers that already carry one.

use crate::Error;
use futures::future::LocalBoxFuture;
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// The verbs the widget set needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
	Get,
	Post,
	Delete,
}

impl Method {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Delete => "DELETE",
		}
	}
}

/// A request body with its content type.
#[derive(Clone, Debug)]
pub struct RequestBody {
	pub mime: &'static str,
	pub content: String,
}

impl RequestBody {
	#[must_use]
	pub fn form(content: String) -> Self {
		Self {
			mime: "application/x-www-form-urlencoded",
			content,
		}
	}
}

/// What a backend hands back once a response arrived at all. Non-success
/// statuses are not an `Err` at this layer; the body is still needed for
/// message extraction.
#[derive(Clone, Debug)]
pub struct TransportResponse {
	pub status: u16,
	pub status_text: String,
	pub body: String,
}

impl TransportResponse {
	#[must_use]
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// One HTTP round trip. Implementations must not panic; every failure is an
/// [`Error::Transport`].
pub trait Transport {
	fn request(
		&self,
		method: Method,
		url: String,
		body: Option<RequestBody>,
	) -> LocalBoxFuture<'static, Result<TransportResponse, Error>>;
}

fn js_message(value: &JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// The native request API backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
	fn request(
		&self,
		method: Method,
		url: String,
		body: Option<RequestBody>,
	) -> LocalBoxFuture<'static, Result<TransportResponse, Error>> {
		Box::pin(async move {
			let init = RequestInit::new();
			init.set_method(method.as_str());
			if let Some(body) = &body {
				init.set_body(&JsValue::from_str(&body.content));
			}

			let request = Request::new_with_str_and_init(&url, &init)
				.map_err(|error| Error::Transport(js_message(&error)))?;
			request
				.headers()
				.set("Accept", "application/json")
				.map_err(|error| Error::Transport(js_message(&error)))?;
			if let Some(body) = &body {
				request
					.headers()
					.set("Content-Type", body.mime)
					.map_err(|error| Error::Transport(js_message(&error)))?;
			}

			debug!("{} {}", method.as_str(), url);
			let window = web_sys::window().ok_or_else(|| Error::Transport("no global `window`".to_owned()))?;
			let response = JsFuture::from(window.fetch_with_request(&request))
				.await
				.map_err(|error| Error::Transport(js_message(&error)))?;
			let response: Response = response
				.dyn_into()
				.map_err(|value| Error::Transport(js_message(&value)))?;

			let text_promise = response
				.text()
				.map_err(|error| Error::Transport(js_message(&error)))?;
			let text = JsFuture::from(text_promise)
				.await
				.map_err(|error| Error::Transport(js_message(&error)))?;

			Ok(TransportResponse {
				status: response.status(),
				status_text: response.status_text(),
				body: text.as_string().unwrap_or_default(),
			})
		})
	}
}

/// The promise-based client backend, for pages that already configure a
/// [`reqwest::Client`] (interceptors, default headers).
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
	client: reqwest::Client,
}

impl ReqwestTransport {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_client(client: reqwest::Client) -> Self {
		Self { client }
	}
}

impl Transport for ReqwestTransport {
	fn request(
		&self,
		method: Method,
		url: String,
		body: Option<RequestBody>,
	) -> LocalBoxFuture<'static, Result<TransportResponse, Error>> {
		let client = self.client.clone();
		Box::pin(async move {
			let verb = match method {
				Method::Get => reqwest::Method::GET,
				Method::Post => reqwest::Method::POST,
				Method::Delete => reqwest::Method::DELETE,
			};

			let mut builder = client.request(verb, &url).header("Accept", "application/json");
			if let Some(body) = body {
				builder = builder.header("Content-Type", body.mime).body(body.content);
			}

			debug!("{} {}", method.as_str(), url);
			let response = builder
				.send()
				.await
				.map_err(|error| Error::Transport(error.to_string()))?;
			let status = response.status();
			let body = response
				.text()
				.await
				.map_err(|error| Error::Transport(error.to_string()))?;

			Ok(TransportResponse {
				status: status.as_u16(),
				status_text: status.canonical_reason().unwrap_or_default().to_owned(),
				body,
			})
		})
	}
}
