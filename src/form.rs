//! Ajax form submission: serialize named fields, POST, notify the outcome.

use crate::dom::{self, ElementRef};
use crate::envelope::server_message;
use crate::notify::{NoticeLevel, Notifier};
use crate::transport::{Method, RequestBody, Transport};
use crate::{error, Error};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;
use url::form_urlencoded;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{Event, HtmlFormElement};

type SuccessCallback = Box<dyn Fn(&str)>;

/// Takes over a form's `submit` event. The native submission is always
/// prevented; fields are posted url-encoded to the form's `action` through
/// the injected transport, and the outcome goes to the injected notifier.
pub struct FormSubmit {
	on_success: Rc<RefCell<Option<SuccessCallback>>>,
	_listener: Closure<dyn FnMut(Event)>,
}

impl FormSubmit {
	/// # Errors
	///
	/// [`Error::Config`] when `form` does not resolve to a `<form>` element.
	pub fn attach(
		form: impl Into<ElementRef>,
		transport: Rc<dyn Transport>,
		notifier: Rc<dyn Notifier>,
	) -> Result<Self, Error> {
		let element = dom::resolve_required("form", &form.into())?;
		let form: HtmlFormElement = element
			.dyn_into()
			.map_err(|_| Error::Config("`form` is not a <form> element".to_owned()))?;

		let on_success: Rc<RefCell<Option<SuccessCallback>>> = Rc::new(RefCell::new(None));

		let callback_slot = Rc::clone(&on_success);
		let fields_source = form.clone();
		let listener = Closure::wrap(Box::new(move |event: Event| {
			event.prevent_default();

			let url = fields_source.action();
			let mut serializer = form_urlencoded::Serializer::new(String::new());
			for (name, value) in dom::read_named_values(&fields_source) {
				serializer.append_pair(&name, &value);
			}
			let body = RequestBody::form(serializer.finish());

			let transport = Rc::clone(&transport);
			let notifier = Rc::clone(&notifier);
			let callback_slot = Rc::clone(&callback_slot);
			wasm_bindgen_futures::spawn_local(async move {
				match transport.request(Method::Post, url, Some(body)).await {
					Ok(response) if response.is_success() => {
						let message = server_message(&response.body).unwrap_or_else(|| "Saved.".to_owned());
						notifier.notify(NoticeLevel::Success, &message);
						if let Some(callback) = &*callback_slot.borrow() {
							callback(&response.body);
						}
					}
					Ok(response) => {
						let message = server_message(&response.body).unwrap_or_else(|| response.status_text.clone());
						let error = Error::Status {
							status: response.status,
							message,
						};
						warn!("Form submission rejected: {}", error);
						notifier.notify(NoticeLevel::Error, &error::display_message(&error));
					}
					Err(error) => {
						warn!("Form submission failed: {}", error);
						notifier.notify(NoticeLevel::Error, &error::display_message(&error));
					}
				}
			});
		}) as Box<dyn FnMut(Event)>);

		form.add_event_listener_with_callback("submit", listener.as_ref().unchecked_ref())
			.unwrap_throw();

		Ok(Self {
			on_success,
			_listener: listener,
		})
	}

	/// Invoked with the raw response body after every accepted submission.
	pub fn on_success(&self, callback: impl Fn(&str) + 'static) {
		*self.on_success.borrow_mut() = Some(Box::new(callback));
	}
}
