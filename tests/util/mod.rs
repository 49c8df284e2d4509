#![allow(dead_code)] // Each test crate uses a different slice of this module.

use futures::future::LocalBoxFuture;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;
use trellis_dom::transport::{Method, RequestBody, Transport, TransportResponse};
use trellis_dom::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlElement};

pub fn init_logging() {
	static ONCE: Once = Once::new();
	ONCE.call_once(tracing_wasm::set_as_global_default);
}

pub fn document() -> Document {
	web_sys::window().unwrap().document().unwrap()
}

pub fn body() -> HtmlElement {
	document().body().unwrap()
}

// ── Mock transport ───────────────────────────────────────────────────

pub struct RecordedRequest {
	pub method: Method,
	pub url: String,
	pub body: Option<String>,
}

type Handler = Box<dyn Fn(&str) -> Result<TransportResponse, Error>>;

/// Records every request and answers from a canned handler, synchronously.
pub struct MockTransport {
	handler: Handler,
	requests: RefCell<Vec<RecordedRequest>>,
}

impl MockTransport {
	pub fn respond_with(handler: impl Fn(&str) -> Result<TransportResponse, Error> + 'static) -> Rc<Self> {
		Rc::new(Self {
			handler: Box::new(handler),
			requests: RefCell::new(Vec::new()),
		})
	}

	pub fn ok(body: &str) -> Rc<Self> {
		let body = body.to_owned();
		Self::respond_with(move |_| {
			Ok(TransportResponse {
				status: 200,
				status_text: "OK".to_owned(),
				body: body.clone(),
			})
		})
	}

	pub fn status(status: u16, status_text: &str, body: &str) -> Rc<Self> {
		let status_text = status_text.to_owned();
		let body = body.to_owned();
		Self::respond_with(move |_| {
			Ok(TransportResponse {
				status,
				status_text: status_text.clone(),
				body: body.clone(),
			})
		})
	}

	pub fn request_count(&self) -> usize {
		self.requests.borrow().len()
	}

	pub fn last_url(&self) -> Option<String> {
		self.requests.borrow().last().map(|request| request.url.clone())
	}

	pub fn last_body(&self) -> Option<String> {
		self.requests.borrow().last().and_then(|request| request.body.clone())
	}

	pub fn last_method(&self) -> Option<Method> {
		self.requests.borrow().last().map(|request| request.method)
	}
}

impl Transport for MockTransport {
	fn request(
		&self,
		method: Method,
		url: String,
		body: Option<RequestBody>,
	) -> LocalBoxFuture<'static, Result<TransportResponse, Error>> {
		let result = (self.handler)(&url);
		self.requests.borrow_mut().push(RecordedRequest {
			method,
			url,
			body: body.map(|body| body.content),
		});
		Box::pin(futures::future::ready(result))
	}
}

// ── DOM fixtures ─────────────────────────────────────────────────────

pub struct Fixture {
	pub container: Element,
	pub pagination: Element,
	pub loading: Element,
	pub empty: Element,
	pub error: Element,
	pub filter: Element,
}

/// Mounts one fresh set of listing regions under `<body>`. The error region
/// carries a `[data-message]` slot.
pub fn mount() -> Fixture {
	let document = document();
	let root = document.create_element("div").unwrap();
	body().append_child(&root).unwrap();

	let make = |tag: &str| {
		let element = document.create_element(tag).unwrap();
		root.append_child(&element).unwrap();
		element
	};

	let error = make("div");
	error.set_inner_html("<p data-message></p>");

	Fixture {
		container: make("div"),
		pagination: make("nav"),
		loading: make("div"),
		empty: make("div"),
		error,
		filter: make("form"),
	}
}

/// Installs a hidden template region with the given id.
pub fn install_template(id: &str, markup: &str) {
	let template = document().create_element("div").unwrap();
	template.set_id(id);
	template.set_attribute("hidden", "").unwrap();
	template.set_inner_html(markup);
	body().append_child(&template).unwrap();
}

pub fn is_hidden(element: &Element) -> bool {
	element.has_attribute("hidden")
}

// ── Events and timing ────────────────────────────────────────────────

/// Dispatches a bubbling (and cancelable) event of the given type.
pub fn fire(element: &Element, kind: &str) {
	let init = web_sys::EventInit::new();
	init.set_bubbles(true);
	init.set_cancelable(true);
	let event = web_sys::Event::new_with_event_init_dict(kind, &init).unwrap();
	element.dispatch_event(&event).unwrap();
}

pub fn click(element: &Element) {
	element.dyn_ref::<HtmlElement>().unwrap().click();
}

/// Yields to the event loop for `ms` milliseconds.
pub async fn sleep(ms: i32) {
	let promise = js_sys::Promise::new(&mut |resolve, _reject| {
		web_sys::window()
			.unwrap()
			.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
			.unwrap();
	});
	JsFuture::from(promise).await.unwrap();
}

/// Lets already-queued microtasks (spawned fetch applications) run.
pub async fn settle() {
	for _ in 0..3 {
		JsFuture::from(js_sys::Promise::resolve(&JsValue::UNDEFINED)).await.unwrap();
	}
}
