//! The fetch-render-paginate listing engine.
//!
//! One [`Listing`] binds to a container inside server-rendered markup, pulls
//! JSON pages from an endpoint through an explicit [`Transport`], renders each
//! record (pre-rendered HTML field, render callback, or template
//! substitution), and wires server-described pagination links back into
//! itself. Callers integrate through the `start`/`rendered`/`error`/
//! `pageChange` events and the four view-state regions.
//!
//! Dropping a [`Listing`] drops its event listeners; controls it rendered
//! earlier will start throwing errors into
//! [***JavaScript***](https://developer.mozilla.org/en-US/docs/Web/JavaScript)
//! if clicked afterwards.

use crate::debounce::Debouncer;
use crate::dom::{self, ElementRef};
use crate::envelope::{self, parse_envelope, record_html, Envelope, PageMeta};
use crate::events::{EventKind, EventRegistry, ListingEvent};
use crate::pagination::{self, PageControl};
use crate::query::{append_query, build_query, FilterMap};
use crate::template;
use crate::transport::{FetchTransport, Method, Transport};
use crate::view_state::{StateRegions, ViewState};
use crate::{error, Error};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{instrument, trace, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlInputElement, HtmlTextAreaElement};

/// Configuration for a [`Listing`], validated and defaulted once at
/// construction.
pub struct ListingOptions {
	url: String,
	container: ElementRef,
	template_id: Option<String>,
	data_key: String,
	meta_key: String,
	fetcher: Option<Rc<dyn Transport>>,
	on_record: Option<Box<dyn Fn(&Value) -> String>>,
	pagination: Option<ElementRef>,
	filter: Option<ElementRef>,
	loading: Option<ElementRef>,
	empty: Option<ElementRef>,
	error: Option<ElementRef>,
	additional_params: Option<Box<dyn Fn() -> Vec<(String, String)>>>,
	debounce_ms: u32,
}

impl ListingOptions {
	/// `url` is the base endpoint; the query string is appended per fetch.
	/// `container` is the required render target.
	#[must_use]
	pub fn new(url: impl Into<String>, container: impl Into<ElementRef>) -> Self {
		Self {
			url: url.into(),
			container: container.into(),
			template_id: None,
			data_key: "data".to_owned(),
			meta_key: "meta".to_owned(),
			fetcher: None,
			on_record: None,
			pagination: None,
			filter: None,
			loading: None,
			empty: None,
			error: None,
			additional_params: None,
			debounce_ms: 300,
		}
	}

	/// Named template region used when no per-record HTML or render callback
	/// applies.
	#[must_use]
	pub fn template_id(mut self, id: impl Into<String>) -> Self {
		self.template_id = Some(id.into());
		self
	}

	/// Envelope field carrying the records. Defaults to `"data"`.
	#[must_use]
	pub fn data_key(mut self, key: impl Into<String>) -> Self {
		self.data_key = key.into();
		self
	}

	/// Envelope field carrying the pagination metadata. Defaults to `"meta"`.
	#[must_use]
	pub fn meta_key(mut self, key: impl Into<String>) -> Self {
		self.meta_key = key.into();
		self
	}

	/// Transport backend. Defaults to [`FetchTransport`].
	#[must_use]
	pub fn fetcher(mut self, transport: Rc<dyn Transport>) -> Self {
		self.fetcher = Some(transport);
		self
	}

	/// Per-record render callback; overrides the template.
	#[must_use]
	pub fn on_record(mut self, render: impl Fn(&Value) -> String + 'static) -> Self {
		self.on_record = Some(Box::new(render));
		self
	}

	#[must_use]
	pub fn pagination(mut self, region: impl Into<ElementRef>) -> Self {
		self.pagination = Some(region.into());
		self
	}

	/// Region whose named fields become filter parameters.
	#[must_use]
	pub fn filter(mut self, region: impl Into<ElementRef>) -> Self {
		self.filter = Some(region.into());
		self
	}

	#[must_use]
	pub fn loading(mut self, region: impl Into<ElementRef>) -> Self {
		self.loading = Some(region.into());
		self
	}

	#[must_use]
	pub fn empty(mut self, region: impl Into<ElementRef>) -> Self {
		self.empty = Some(region.into());
		self
	}

	#[must_use]
	pub fn error(mut self, region: impl Into<ElementRef>) -> Self {
		self.error = Some(region.into());
		self
	}

	/// Extra query parameters, applied after (and overriding) filters.
	#[must_use]
	pub fn additional_params(mut self, produce: impl Fn() -> Vec<(String, String)> + 'static) -> Self {
		self.additional_params = Some(Box::new(produce));
		self
	}

	/// Quiet period for text-filter coalescing. Defaults to 300 ms.
	#[must_use]
	pub fn debounce_ms(mut self, delay: u32) -> Self {
		self.debounce_ms = delay;
		self
	}
}

struct Inner {
	url: String,
	data_key: String,
	meta_key: String,
	template_id: Option<String>,
	transport: Rc<dyn Transport>,
	on_record: Option<Box<dyn Fn(&Value) -> String>>,
	additional_params: Option<Box<dyn Fn() -> Vec<(String, String)>>>,
	regions: StateRegions,
	pagination: Option<Element>,
	filter: Option<Element>,
	filters: FilterMap,
	last_meta: Option<PageMeta>,
	current_page: u32,
	generation: u64,
	registry: EventRegistry,
	debouncer: Debouncer,
	page_closures: Vec<Closure<dyn FnMut()>>,
	filter_closures: Vec<Closure<dyn FnMut(Event)>>,
}

impl Inner {
	/// The filter mapping is a projection of the live region, rebuilt in full
	/// on every read. Empty values never enter it.
	fn refresh_filters(&mut self) {
		self.filters.clear();
		if let Some(region) = &self.filter {
			for (name, value) in dom::read_named_values(region) {
				if name.is_empty() || value.is_empty() {
					continue;
				}
				self.filters.insert(name, value);
			}
		}
	}

	fn build_markup(&self, envelope: &Envelope) -> (String, bool) {
		if let Some(html) = &envelope.html {
			return (html.clone(), html.trim().is_empty());
		}
		if envelope.records.is_empty() {
			return (String::new(), true);
		}

		let template = self.template_source();
		let mut markup = String::new();
		for record in &envelope.records {
			if let Some(html) = record_html(record) {
				markup.push_str(html);
			} else if let Some(render) = &self.on_record {
				markup.push_str(&render(record));
			} else if let Some(template) = &template {
				markup.push_str(&template::substitute(template, record));
			}
		}
		(markup, false)
	}

	fn template_source(&self) -> Option<String> {
		let id = self.template_id.as_deref()?;
		match dom::document().get_element_by_id(id) {
			Some(element) => Some(element.inner_html()),
			None => {
				warn!("Template region `#{}` not found; records render as nothing.", id);
				None
			}
		}
	}
}

/// A fetch-render-paginate widget attached to existing markup.
pub struct Listing {
	inner: Rc<RefCell<Inner>>,
}

impl Listing {
	/// Resolves every configured element exactly once and binds filter
	/// listeners. Does not fetch; call [`fetch`](Self::fetch) to load the
	/// first page.
	///
	/// # Errors
	///
	/// [`Error::Config`] when the container cannot be resolved. Optional
	/// regions that fail to resolve are treated as absent instead.
	pub fn new(options: ListingOptions) -> Result<Self, Error> {
		let container = dom::resolve_required("container", &options.container)?;

		let inner = Rc::new(RefCell::new(Inner {
			url: options.url,
			data_key: options.data_key,
			meta_key: options.meta_key,
			template_id: options.template_id,
			transport: options.fetcher.unwrap_or_else(|| Rc::new(FetchTransport)),
			on_record: options.on_record,
			additional_params: options.additional_params,
			regions: StateRegions {
				content: container,
				loading: dom::resolve_optional(options.loading.as_ref()),
				empty: dom::resolve_optional(options.empty.as_ref()),
				error: dom::resolve_optional(options.error.as_ref()),
			},
			pagination: dom::resolve_optional(options.pagination.as_ref()),
			filter: dom::resolve_optional(options.filter.as_ref()),
			filters: FilterMap::new(),
			last_meta: None,
			current_page: 1,
			generation: 0,
			registry: EventRegistry::default(),
			debouncer: Debouncer::new(options.debounce_ms),
			page_closures: Vec::new(),
			filter_closures: Vec::new(),
		}));

		attach_filter_listeners(&inner);
		Ok(Self { inner })
	}

	/// Registers a listener. Listeners of one kind fire in registration
	/// order and may re-enter the widget.
	pub fn on(&self, kind: EventKind, callback: impl Fn(&ListingEvent<'_>) + 'static) {
		self.inner.borrow_mut().registry.on(kind, callback);
	}

	/// Starts a fetch cycle for `page`.
	///
	/// A fetch started later supersedes any fetch still in flight: the
	/// superseded response is discarded unapplied, so pages never render out
	/// of order.
	pub fn fetch(&self, page: u32) {
		spawn_fetch(&self.inner, page);
	}

	/// Repeats the last fetched page (page 1 before any fetch succeeded).
	pub fn refresh(&self) {
		let page = self.inner.borrow().current_page;
		spawn_fetch(&self.inner, page);
	}

	#[must_use]
	pub fn current_page(&self) -> u32 {
		self.inner.borrow().current_page
	}

	/// The metadata snapshot of the last successful fetch.
	#[must_use]
	pub fn last_meta(&self) -> Option<PageMeta> {
		self.inner.borrow().last_meta.clone()
	}
}

fn emit(inner: &Rc<RefCell<Inner>>, event: &ListingEvent<'_>) {
	// Snapshot first: a listener may re-enter and mutate the registry.
	let callbacks = inner.borrow().registry.snapshot(event.kind());
	for callback in callbacks {
		callback(event);
	}
}

#[instrument(skip(inner))]
fn spawn_fetch(inner: &Rc<RefCell<Inner>>, page: u32) {
	let (generation, request_url, transport, data_key, meta_key) = {
		let mut state = inner.borrow_mut();
		state.generation = state.generation.wrapping_add(1);
		state.refresh_filters();
		let extra = state
			.additional_params
			.as_ref()
			.map(|produce| produce())
			.unwrap_or_default();
		let query = build_query(&state.filters, page, &extra);
		(
			state.generation,
			append_query(&state.url, &query),
			Rc::clone(&state.transport),
			state.data_key.clone(),
			state.meta_key.clone(),
		)
	};

	trace!("Fetching page {}: {}", page, request_url);
	emit(inner, &ListingEvent::Start { page });
	inner.borrow().regions.set_state(ViewState::Loading, None);

	let inner = Rc::clone(inner);
	spawn_local(async move {
		let outcome = transport.request(Method::Get, request_url, None).await;

		if inner.borrow().generation != generation {
			trace!("Discarding response of superseded fetch (page {}).", page);
			return;
		}

		match outcome {
			Err(error) => fail(&inner, &error),
			Ok(response) if !response.is_success() => {
				let message = envelope::server_message(&response.body).unwrap_or_else(|| response.status_text.clone());
				let error = Error::Status {
					status: response.status,
					message,
				};
				fail(&inner, &error);
			}
			Ok(response) => match parse_envelope(&response.body, &data_key, &meta_key) {
				Ok(envelope) => apply(&inner, &envelope, page),
				Err(error) => fail(&inner, &error),
			},
		}
	});
}

#[instrument(skip(inner))]
fn fail(inner: &Rc<RefCell<Inner>>, error: &Error) {
	let message = error::display_message(error);
	warn!("Listing fetch failed: {}", error);
	inner.borrow().regions.set_state(ViewState::Error, Some(&message));
	emit(inner, &ListingEvent::Error { error, message: &message });
}

#[instrument(skip(inner, envelope))]
fn apply(inner: &Rc<RefCell<Inner>>, envelope: &Envelope, requested_page: u32) {
	let (markup, is_empty) = {
		let state = inner.borrow();
		state.build_markup(envelope)
	};

	let page = {
		let mut state = inner.borrow_mut();
		state.last_meta = envelope.meta.clone();
		state.current_page = envelope.meta.as_ref().map_or(requested_page, |meta| meta.current_page);
		state.regions.content.set_inner_html(&markup);
		state.current_page
	};

	render_pagination(inner, envelope.meta.as_ref());

	let state = if is_empty { ViewState::Empty } else { ViewState::Content };
	inner.borrow().regions.set_state(state, None);

	emit(
		inner,
		&ListingEvent::Rendered {
			records: &envelope.records,
			meta: envelope.meta.as_ref(),
			page,
			html: envelope.html.as_deref(),
		},
	);
}

fn render_pagination(inner: &Rc<RefCell<Inner>>, meta: Option<&PageMeta>) {
	let Some(region) = inner.borrow().pagination.clone() else {
		return;
	};

	inner.borrow_mut().page_closures.clear();
	region.set_inner_html("");

	let meta = match meta {
		Some(meta) if pagination::is_multi_page(meta) => meta,
		_ => {
			dom::hide(&region);
			return;
		}
	};

	let document = dom::document();
	let mut closures = Vec::new();
	for control in pagination::plan_controls(meta) {
		let button = document.create_element("button").unwrap_throw();
		button.set_attribute("type", "button").unwrap_throw();
		match control {
			PageControl::Gap { label } => {
				button.set_text_content(Some(&label));
				button.set_attribute("disabled", "").unwrap_throw();
				button.set_attribute("data-gap", "").unwrap_throw();
			}
			PageControl::Page { label, page, active } => {
				button.set_text_content(Some(&label));
				if active {
					button.set_attribute("data-active", "").unwrap_throw();
				}
				match page {
					Some(page) if !active => {
						button.set_attribute("data-page", &page.to_string()).unwrap_throw();
						let weak = Rc::downgrade(inner);
						let closure = Closure::wrap(Box::new(move || {
							let Some(inner) = weak.upgrade() else {
								return;
							};
							emit(&inner, &ListingEvent::PageChange { page, label: &label });
							spawn_fetch(&inner, page);
						}) as Box<dyn FnMut()>);
						button
							.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
							.unwrap_throw();
						closures.push(closure);
					}
					_ => button.set_attribute("disabled", "").unwrap_throw(),
				}
			}
		}
		region.append_child(&button).unwrap_throw();
	}
	dom::show(&region);
	inner.borrow_mut().page_closures = closures;
}

fn attach_filter_listeners(inner: &Rc<RefCell<Inner>>) {
	let Some(region) = inner.borrow().filter.clone() else {
		return;
	};

	let weak = Rc::downgrade(inner);
	let debounced = Closure::wrap(Box::new(move |event: Event| {
		let Some(inner) = weak.upgrade() else {
			return;
		};
		let Some(target) = event.target().and_then(|target| target.dyn_into::<Element>().ok()) else {
			return;
		};
		if !is_named_field(&target) || !is_text_like(&target) {
			return;
		}
		let weak = Rc::downgrade(&inner);
		inner.borrow_mut().debouncer.schedule(move || {
			if let Some(inner) = weak.upgrade() {
				// Filter changes reset pagination.
				spawn_fetch(&inner, 1);
			}
		});
	}) as Box<dyn FnMut(Event)>);
	region
		.add_event_listener_with_callback("input", debounced.as_ref().unchecked_ref())
		.unwrap_throw();

	let weak = Rc::downgrade(inner);
	let immediate = Closure::wrap(Box::new(move |event: Event| {
		let Some(inner) = weak.upgrade() else {
			return;
		};
		let Some(target) = event.target().and_then(|target| target.dyn_into::<Element>().ok()) else {
			return;
		};
		if !is_named_field(&target) || is_text_like(&target) {
			return;
		}
		inner.borrow_mut().debouncer.cancel();
		spawn_fetch(&inner, 1);
	}) as Box<dyn FnMut(Event)>);
	region
		.add_event_listener_with_callback("change", immediate.as_ref().unchecked_ref())
		.unwrap_throw();

	inner.borrow_mut().filter_closures = vec![debounced, immediate];
}

fn is_named_field(element: &Element) -> bool {
	element.get_attribute("name").map_or(false, |name| !name.is_empty())
}

/// Text-like fields debounce; selects, checkboxes and radios apply
/// immediately on `change`.
fn is_text_like(element: &Element) -> bool {
	if element.dyn_ref::<HtmlTextAreaElement>().is_some() {
		return true;
	}
	element
		.dyn_ref::<HtmlInputElement>()
		.map_or(false, |input| !matches!(input.type_().as_str(), "checkbox" | "radio" | "file"))
}
