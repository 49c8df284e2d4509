//! The listing's event-emission side channel.

use crate::envelope::PageMeta;
use crate::Error;
use hashbrown::HashMap;
use serde_json::Value;
use std::rc::Rc;

/// The four moments callers can hook into.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum EventKind {
	Start,
	Rendered,
	Error,
	PageChange,
}

/// Payload handed to listeners. Borrowed views only; nothing is cloned per
/// listener.
#[derive(Debug)]
pub enum ListingEvent<'a> {
	Start {
		page: u32,
	},
	Rendered {
		records: &'a [Value],
		meta: Option<&'a PageMeta>,
		page: u32,
		html: Option<&'a str>,
	},
	Error {
		error: &'a Error,
		message: &'a str,
	},
	PageChange {
		page: u32,
		label: &'a str,
	},
}

impl ListingEvent<'_> {
	#[must_use]
	pub fn kind(&self) -> EventKind {
		match self {
			Self::Start { .. } => EventKind::Start,
			Self::Rendered { .. } => EventKind::Rendered,
			Self::Error { .. } => EventKind::Error,
			Self::PageChange { .. } => EventKind::PageChange,
		}
	}
}

pub type Callback = Rc<dyn Fn(&ListingEvent<'_>)>;

/// Event name → ordered listener list. Listeners fire in registration order.
#[derive(Default)]
pub struct EventRegistry {
	listeners: HashMap<EventKind, Vec<Callback>>,
}

impl EventRegistry {
	pub fn on(&mut self, kind: EventKind, callback: impl Fn(&ListingEvent<'_>) + 'static) {
		self.listeners.entry(kind).or_default().push(Rc::new(callback));
	}

	/// Clones the listener list so emission can run with no registry borrow
	/// held; a listener may re-enter the widget.
	#[must_use]
	pub fn snapshot(&self, kind: EventKind) -> Vec<Callback> {
		self.listeners.get(&kind).cloned().unwrap_or_default()
	}
}
