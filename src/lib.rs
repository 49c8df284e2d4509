#![doc(html_root_url = "https://docs.rs/trellis-dom/0.1.0")]
#![warn(clippy::pedantic)]

//! Independent, DOM-attached Ajax widgets for server-rendered pages.
//!
//! Each widget binds to existing markup once, at construction, and mutates
//! the DOM in response to small JSON calls. There is no shared runtime; the
//! only coordination is the browser event loop. Transports and notifiers are
//! injected capabilities, never ambient globals.

mod debounce;
mod error;

pub mod code_input;
pub mod confirm;
pub mod dom;
pub mod dropdown;
pub mod envelope;
pub mod events;
pub mod form;
pub mod image_preview;
pub mod listing;
pub mod locale;
pub mod notify;
pub mod pagination;
pub mod query;
pub mod template;
pub mod transport;
pub mod view_state;

pub use dom::ElementRef;
pub use error::{display_message, Error};
pub use listing::{Listing, ListingOptions};
