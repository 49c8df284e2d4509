//! The single authority over loading/content/empty/error visibility.

use crate::dom;
use web_sys::Element;

/// The four mutually exclusive visual modes of a listing instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
	Loading,
	Content,
	Empty,
	Error,
}

/// The resolved state regions. Only `content` is required; every absent
/// region simply never shows.
pub struct StateRegions {
	pub(crate) content: Element,
	pub(crate) loading: Option<Element>,
	pub(crate) empty: Option<Element>,
	pub(crate) error: Option<Element>,
}

impl StateRegions {
	/// Hides all four regions, then reveals exactly the requested one. For
	/// the error state the message is written into a `[data-message]`
	/// sub-element when the region carries one.
	///
	/// No other code path toggles these regions.
	pub fn set_state(&self, state: ViewState, message: Option<&str>) {
		dom::hide(&self.content);
		for region in &[&self.loading, &self.empty, &self.error] {
			if let Some(region) = region {
				dom::hide(region);
			}
		}

		match state {
			ViewState::Loading => {
				if let Some(loading) = &self.loading {
					dom::show(loading);
				}
			}
			ViewState::Content => dom::show(&self.content),
			ViewState::Empty => {
				if let Some(empty) = &self.empty {
					dom::show(empty);
				}
			}
			ViewState::Error => {
				if let Some(error) = &self.error {
					if let Some(message) = message {
						if let Ok(Some(slot)) = error.query_selector("[data-message]") {
							slot.set_text_content(Some(message));
						}
					}
					dom::show(error);
				}
			}
		}
	}
}
