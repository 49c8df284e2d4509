use crate::Error;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

/// A configuration value naming an element: either a selector that is queried
/// once at construction, or a handle that is used as-is.
///
/// Resolution happens exactly once; widgets never re-query their regions.
#[derive(Clone)]
pub enum ElementRef {
	Selector(String),
	Element(Element),
}

impl From<&str> for ElementRef {
	fn from(selector: &str) -> Self {
		Self::Selector(selector.to_owned())
	}
}
impl From<String> for ElementRef {
	fn from(selector: String) -> Self {
		Self::Selector(selector)
	}
}
impl From<Element> for ElementRef {
	fn from(element: Element) -> Self {
		Self::Element(element)
	}
}

impl ElementRef {
	fn resolve(&self) -> Option<Element> {
		match self {
			Self::Element(element) => Some(element.clone()),
			Self::Selector(selector) => document().query_selector(selector).ok().flatten(),
		}
	}
}

pub(crate) fn document() -> Document {
	web_sys::window()
		.expect_throw("trellis-dom: No global `window`.")
		.document()
		.expect_throw("trellis-dom: No `document` on `window`.")
}

pub(crate) fn resolve_required(name: &str, source: &ElementRef) -> Result<Element, Error> {
	source
		.resolve()
		.ok_or_else(|| Error::Config(format!("`{}` did not resolve to an element", name)))
}

pub(crate) fn resolve_optional(source: Option<&ElementRef>) -> Option<Element> {
	source.and_then(ElementRef::resolve)
}

pub(crate) fn hide(element: &Element) {
	element.set_attribute("hidden", "").unwrap_throw();
}

pub(crate) fn show(element: &Element) {
	element.remove_attribute("hidden").unwrap_throw();
}

/// Reads every named form field currently inside `region`, in document order.
///
/// The region is queried live on every call; fields added or removed since the
/// last read are picked up. Unchecked checkboxes and radios are skipped.
pub(crate) fn read_named_values(region: &Element) -> Vec<(String, String)> {
	let fields = region
		.query_selector_all("input[name], select[name], textarea[name]")
		.unwrap_throw();
	let mut values = Vec::with_capacity(fields.length() as usize);
	for index in 0..fields.length() {
		let node = fields.item(index).unwrap_throw();
		if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
			let kind = input.type_();
			if (kind == "checkbox" || kind == "radio") && !input.checked() {
				continue;
			}
			values.push((input.name(), input.value()));
		} else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
			values.push((select.name(), select.value()));
		} else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
			values.push((area.name(), area.value()));
		}
	}
	values
}
