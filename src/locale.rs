//! Locale switching: a select whose change navigates the page.

use crate::dom::{self, ElementRef};
use crate::Error;
use tracing::warn;
use url::Url;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{Event, HtmlSelectElement};

pub struct LocaleSwitch {
	_listener: Closure<dyn FnMut(Event)>,
}

impl LocaleSwitch {
	/// The selected `<option>` may carry its target in `data-url`; without
	/// one, navigation goes to the current location with its `locale` query
	/// parameter replaced by the selected value.
	///
	/// # Errors
	///
	/// [`Error::Config`] when `select` does not resolve to a `<select>`.
	pub fn attach(select: impl Into<ElementRef>) -> Result<Self, Error> {
		let select: HtmlSelectElement = dom::resolve_required("select", &select.into())?
			.dyn_into()
			.map_err(|_| Error::Config("`select` is not a <select> element".to_owned()))?;

		let chooser = select.clone();
		let listener = Closure::wrap(Box::new(move |_: Event| {
			let target = chooser
				.selected_options()
				.item(0)
				.and_then(|option| option.get_attribute("data-url"))
				.or_else(|| locale_url(&chooser.value()));
			let Some(target) = target else {
				warn!("Locale switch has no usable target URL.");
				return;
			};
			let window = web_sys::window().expect_throw("trellis-dom: No global `window`.");
			window.location().set_href(&target).unwrap_throw();
		}) as Box<dyn FnMut(Event)>);

		select
			.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
			.unwrap_throw();

		Ok(Self { _listener: listener })
	}
}

/// The current location with `locale` set to `locale`, other parameters kept.
fn locale_url(locale: &str) -> Option<String> {
	let window = web_sys::window()?;
	let href = window.location().href().ok()?;
	let mut url = Url::parse(&href).ok()?;

	let retained: Vec<(String, String)> = url
		.query_pairs()
		.filter(|(key, _)| key != "locale")
		.map(|(key, value)| (key.into_owned(), value.into_owned()))
		.collect();
	url.query_pairs_mut()
		.clear()
		.extend_pairs(retained)
		.append_pair("locale", locale);

	Some(url.into())
}
