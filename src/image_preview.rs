//! Shows the file chosen in an `<input type="file">` in a target image.

use crate::dom::{self, ElementRef};
use crate::Error;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{Event, HtmlImageElement, HtmlInputElement, Url};

pub struct ImagePreview {
	object_url: Rc<RefCell<Option<String>>>,
	_listener: Closure<dyn FnMut(Event)>,
}

impl ImagePreview {
	/// On every file selection the image's `src` is swapped to an
	/// [***object URL***](https://developer.mozilla.org/en-US/docs/Web/API/URL/createObjectURL_static)
	/// of the chosen file; the previous one is revoked.
	///
	/// # Errors
	///
	/// [`Error::Config`] when `input` is not a file input or `image` is not
	/// an `<img>`.
	pub fn attach(input: impl Into<ElementRef>, image: impl Into<ElementRef>) -> Result<Self, Error> {
		let input: HtmlInputElement = dom::resolve_required("input", &input.into())?
			.dyn_into()
			.map_err(|_| Error::Config("`input` is not an <input> element".to_owned()))?;
		let image: HtmlImageElement = dom::resolve_required("image", &image.into())?
			.dyn_into()
			.map_err(|_| Error::Config("`image` is not an <img> element".to_owned()))?;

		let object_url: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));

		let url_slot = Rc::clone(&object_url);
		let chooser = input.clone();
		let listener = Closure::wrap(Box::new(move |_: Event| {
			let Some(file) = chooser.files().and_then(|files| files.get(0)) else {
				return;
			};
			let Ok(url) = Url::create_object_url_with_blob(&file) else {
				return;
			};
			if let Some(previous) = url_slot.borrow_mut().replace(url.clone()) {
				let _ = Url::revoke_object_url(&previous);
			}
			image.set_src(&url);
		}) as Box<dyn FnMut(Event)>);

		input
			.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
			.unwrap_throw();

		Ok(Self {
			object_url,
			_listener: listener,
		})
	}
}

impl Drop for ImagePreview {
	fn drop(&mut self) {
		if let Some(url) = self.object_url.borrow_mut().take() {
			let _ = Url::revoke_object_url(&url);
		}
	}
}
