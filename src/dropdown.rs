//! A trigger-and-panel dropdown with outside-click and Escape dismissal.

use crate::dom::{self, ElementRef};
use crate::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{Event, KeyboardEvent, Node};

pub struct Dropdown {
	panel: web_sys::Element,
	_toggle: Closure<dyn FnMut(Event)>,
	outside: Closure<dyn FnMut(Event)>,
	escape: Closure<dyn FnMut(Event)>,
}

impl Dropdown {
	/// Hides the panel, then toggles it on trigger clicks. Clicks outside
	/// both elements, and Escape anywhere, close it again.
	///
	/// # Errors
	///
	/// [`Error::Config`] when either element does not resolve.
	pub fn attach(trigger: impl Into<ElementRef>, panel: impl Into<ElementRef>) -> Result<Self, Error> {
		let trigger = dom::resolve_required("trigger", &trigger.into())?;
		let panel = dom::resolve_required("panel", &panel.into())?;
		dom::hide(&panel);

		let toggled = panel.clone();
		let toggle = Closure::wrap(Box::new(move |event: Event| {
			event.stop_propagation();
			if toggled.has_attribute("hidden") {
				dom::show(&toggled);
			} else {
				dom::hide(&toggled);
			}
		}) as Box<dyn FnMut(Event)>);
		trigger
			.add_event_listener_with_callback("click", toggle.as_ref().unchecked_ref())
			.unwrap_throw();

		let own_trigger = trigger.clone();
		let own_panel = panel.clone();
		let outside = Closure::wrap(Box::new(move |event: Event| {
			let Some(node) = event.target().and_then(|target| target.dyn_into::<Node>().ok()) else {
				return;
			};
			if own_trigger.contains(Some(&node)) || own_panel.contains(Some(&node)) {
				return;
			}
			dom::hide(&own_panel);
		}) as Box<dyn FnMut(Event)>);
		dom::document()
			.add_event_listener_with_callback("click", outside.as_ref().unchecked_ref())
			.unwrap_throw();

		let escaped = panel.clone();
		let escape = Closure::wrap(Box::new(move |event: Event| {
			if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
				if key_event.key() == "Escape" {
					dom::hide(&escaped);
				}
			}
		}) as Box<dyn FnMut(Event)>);
		dom::document()
			.add_event_listener_with_callback("keydown", escape.as_ref().unchecked_ref())
			.unwrap_throw();

		Ok(Self {
			panel,
			_toggle: toggle,
			outside,
			escape,
		})
	}

	#[must_use]
	pub fn is_open(&self) -> bool {
		!self.panel.has_attribute("hidden")
	}
}

impl Drop for Dropdown {
	// The document-level listeners outlive any one page section; detach them
	// so a dropped Dropdown doesn't leave throwing callbacks behind.
	fn drop(&mut self) {
		let document = dom::document();
		let _ = document.remove_event_listener_with_callback("click", self.outside.as_ref().unchecked_ref());
		let _ = document.remove_event_listener_with_callback("keydown", self.escape.as_ref().unchecked_ref());
	}
}
