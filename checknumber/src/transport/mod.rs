pub mod webapi;

use reqwest::StatusCode;
pub use webapi::WebApiTransport;

use crate::LookupRequest;

/// Sends lookup requests to the API and hands back the raw response body.
pub trait Transport {
	fn send_request(&mut self, req: &LookupRequest) -> Result<Vec<u8>, TransportError>;

	/// Release the underlying connection. Requests sent after this fail with [`TransportError::Closed`].
	fn close(&mut self);
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
	#[error("Request failed: {0}")]
	NetworkFailure(#[from] reqwest::Error),
	#[error("HTTP error {status}: {body}")]
	HttpStatus { status: StatusCode, body: String },
	#[error("Transport has already been closed")]
	Closed,
}

impl TransportError {
	/// The HTTP status code, if the server replied with a non-success status.
	pub fn status(&self) -> Option<StatusCode> {
		match self {
			TransportError::HttpStatus { status, .. } => Some(*status),
			TransportError::NetworkFailure(err) => err.status(),
			_ => None,
		}
	}
}
