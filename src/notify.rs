//! The notification capability widgets receive instead of a page-global
//! toast helper. Presentation is the host page's concern.

use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
	Success,
	Error,
}

/// Receives user-facing outcome messages from the form and delete widgets.
pub trait Notifier {
	fn notify(&self, level: NoticeLevel, message: &str);
}

/// Adapter over a plain closure.
pub struct FnNotifier<F: Fn(NoticeLevel, &str)>(pub F);

impl<F: Fn(NoticeLevel, &str)> Notifier for FnNotifier<F> {
	fn notify(&self, level: NoticeLevel, message: &str) {
		(self.0)(level, message);
	}
}

/// Discards every notice.
pub struct NullNotifier;

impl Notifier for NullNotifier {
	fn notify(&self, level: NoticeLevel, message: &str) {
		trace!("Discarded {:?} notice: {}", level, message);
	}
}
