use thiserror::Error;

/// Failure taxonomy of the widget set.
///
/// Configuration problems surface as constructor errors and are fatal to
/// instantiation. Everything else is recovered locally into the error
/// view-state and an `error` event; no widget call path panics past its own
/// boundary.
#[derive(Debug, Error)]
pub enum Error {
	/// A required element could not be resolved, or a configured element has
	/// the wrong type.
	#[error("configuration error: {0}")]
	Config(String),

	/// The transport failed before any response arrived.
	#[error("request failed: {0}")]
	Transport(String),

	/// The server answered with a non-success status.
	#[error("server returned {status}: {message}")]
	Status { status: u16, message: String },

	/// The response body was not a JSON envelope.
	#[error("malformed response body: {0}")]
	Malformed(String),
}

pub(crate) const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Human-readable message for a failed fetch, preferring the server-supplied
/// message, then the transport's, then a generic fallback.
#[must_use]
pub fn display_message(error: &Error) -> String {
	let message = match error {
		Error::Status { message, .. } => message,
		Error::Transport(message) | Error::Malformed(message) | Error::Config(message) => message,
	};
	if message.trim().is_empty() {
		GENERIC_FAILURE.to_owned()
	} else {
		message.clone()
	}
}
