//! A row of single-character boxes that behaves like one code field.

use crate::dom::{self, ElementRef};
use crate::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{Event, HtmlInputElement};

pub struct CodeInput {
	container: web_sys::Element,
	_listener: Closure<dyn FnMut(Event)>,
}

impl CodeInput {
	/// Binds a delegated `input` listener: each box keeps only its last typed
	/// character and focus advances to the next box.
	///
	/// # Errors
	///
	/// [`Error::Config`] when `container` does not resolve.
	pub fn attach(container: impl Into<ElementRef>) -> Result<Self, Error> {
		let container = dom::resolve_required("container", &container.into())?;

		let boxes_root = container.clone();
		let listener = Closure::wrap(Box::new(move |event: Event| {
			let Some(input) = event.target().and_then(|target| target.dyn_into::<HtmlInputElement>().ok()) else {
				return;
			};

			let value = input.value();
			if value.chars().count() > 1 {
				// Overtyped or pasted into one box; keep the last character.
				if let Some(last) = value.chars().last() {
					input.set_value(&last.to_string());
				}
			}
			if input.value().is_empty() {
				return;
			}

			let boxes = boxes_root.query_selector_all("input").unwrap_throw();
			let mut advance = false;
			for index in 0..boxes.length() {
				let node = boxes.item(index).unwrap_throw();
				let Some(candidate) = node.dyn_ref::<HtmlInputElement>() else {
					continue;
				};
				if advance {
					let _ = candidate.focus();
					break;
				}
				if candidate == &input {
					advance = true;
				}
			}
		}) as Box<dyn FnMut(Event)>);

		container
			.add_event_listener_with_callback("input", listener.as_ref().unchecked_ref())
			.unwrap_throw();

		Ok(Self {
			container,
			_listener: listener,
		})
	}

	/// The boxes' values joined in document order.
	#[must_use]
	pub fn value(&self) -> String {
		let boxes = self.container.query_selector_all("input").unwrap_throw();
		let mut value = String::with_capacity(boxes.length() as usize);
		for index in 0..boxes.length() {
			let node = boxes.item(index).unwrap_throw();
			if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
				value.push_str(&input.value());
			}
		}
		value
	}
}
