use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, UnwrapThrowExt};

/// A per-instance cancel-and-restart timer: the last call within the window
/// wins.
pub(crate) struct Debouncer {
	delay_ms: u32,
	pending: Option<Pending>,
}

struct Pending {
	handle: i32,
	// Keeps the scheduled callback alive until it fires or is cancelled.
	_closure: Closure<dyn FnMut()>,
}

impl Debouncer {
	pub fn new(delay_ms: u32) -> Self {
		Self { delay_ms, pending: None }
	}

	/// Schedules `action` after the quiet period, discarding any action still
	/// waiting.
	pub fn schedule(&mut self, action: impl FnOnce() + 'static) {
		self.cancel();
		let closure = Closure::once(action);
		let handle = web_sys::window()
			.expect_throw("trellis-dom: No global `window`.")
			.set_timeout_with_callback_and_timeout_and_arguments_0(closure.as_ref().unchecked_ref::<js_sys::Function>(), self.delay_ms as i32)
			.unwrap_throw();
		self.pending = Some(Pending { handle, _closure: closure });
	}

	pub fn cancel(&mut self) {
		if let Some(pending) = self.pending.take() {
			web_sys::window()
				.expect_throw("trellis-dom: No global `window`.")
				.clear_timeout_with_handle(pending.handle);
		}
	}
}
