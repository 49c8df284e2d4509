//! The delete-confirmation flow.
//!
//! Clicks on trigger elements inside a root are delegated here, so triggers
//! rendered later (a listing re-render, say) keep working. The confirmation
//! dialog itself is injected; native `confirm()` is one possible
//! implementation, but that choice belongs to the host page.

use crate::dom::{self, ElementRef};
use crate::envelope::server_message;
use crate::notify::{NoticeLevel, Notifier};
use crate::transport::{Method, Transport};
use crate::Error;
use std::rc::Rc;
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{Element, Event};

const DEFAULT_PROMPT: &str = "Delete this item?";

/// Deletes server resources behind a confirmation step.
///
/// Triggers carry the endpoint in `data-url` and may override the prompt via
/// `data-confirm`. The element removed on success is the trigger's closest
/// `[data-item]` ancestor, if any.
pub struct DeleteConfirm {
	_listener: Closure<dyn FnMut(Event)>,
}

impl DeleteConfirm {
	/// # Errors
	///
	/// [`Error::Config`] when `root` does not resolve.
	pub fn attach(
		root: impl Into<ElementRef>,
		trigger_selector: impl Into<String>,
		transport: Rc<dyn Transport>,
		confirm: impl Fn(&str) -> bool + 'static,
		notifier: Rc<dyn Notifier>,
	) -> Result<Self, Error> {
		let root = dom::resolve_required("root", &root.into())?;
		let selector = trigger_selector.into();

		let listener = Closure::wrap(Box::new(move |event: Event| {
			let Some(target) = event.target().and_then(|target| target.dyn_into::<Element>().ok()) else {
				return;
			};
			let Ok(Some(trigger)) = target.closest(&selector) else {
				return;
			};
			event.prevent_default();

			let Some(url) = trigger.get_attribute("data-url") else {
				warn!("Delete trigger matched `{}` but carries no `data-url`.", selector);
				return;
			};
			let prompt = trigger
				.get_attribute("data-confirm")
				.unwrap_or_else(|| DEFAULT_PROMPT.to_owned());
			if !confirm(&prompt) {
				return;
			}

			let item = trigger.closest("[data-item]").ok().flatten();
			let transport = Rc::clone(&transport);
			let notifier = Rc::clone(&notifier);
			wasm_bindgen_futures::spawn_local(async move {
				match transport.request(Method::Delete, url, None).await {
					Ok(response) if response.is_success() => {
						if let Some(item) = item {
							item.remove();
						}
						let message = server_message(&response.body).unwrap_or_else(|| "Deleted.".to_owned());
						notifier.notify(NoticeLevel::Success, &message);
					}
					Ok(response) => {
						let message = server_message(&response.body).unwrap_or_else(|| response.status_text.clone());
						warn!("Delete rejected with status {}.", response.status);
						notifier.notify(NoticeLevel::Error, &message);
					}
					Err(error) => {
						warn!("Delete failed: {}", error);
						notifier.notify(NoticeLevel::Error, &crate::error::display_message(&error));
					}
				}
			});
		}) as Box<dyn FnMut(Event)>);

		root.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
			.unwrap_throw();

		Ok(Self { _listener: listener })
	}
}
